//! Import clause parsing and resolution.

use std::collections::BTreeSet;
use std::ops::Range;

use indexmap::IndexMap;
use tree_sitter::Node;

use super::syntax::SyntaxError;

/// Import paths of the Go standard library.
const STDLIB: &[&str] = &[
    "archive/tar", "archive/zip", "bufio", "bytes", "cmp", "compress/bzip2", "compress/flate",
    "compress/gzip", "compress/lzw", "compress/zlib", "container/heap", "container/list",
    "container/ring", "context", "crypto", "crypto/aes", "crypto/cipher", "crypto/des",
    "crypto/dsa", "crypto/ecdh", "crypto/ecdsa", "crypto/ed25519", "crypto/elliptic",
    "crypto/hmac", "crypto/md5", "crypto/rand", "crypto/rc4", "crypto/rsa", "crypto/sha1",
    "crypto/sha256", "crypto/sha512", "crypto/subtle", "crypto/tls", "crypto/x509",
    "crypto/x509/pkix", "database/sql", "database/sql/driver", "debug/buildinfo", "debug/dwarf",
    "debug/elf", "debug/gosym", "debug/macho", "debug/pe", "debug/plan9obj", "embed",
    "encoding", "encoding/ascii85", "encoding/asn1", "encoding/base32", "encoding/base64",
    "encoding/binary", "encoding/csv", "encoding/gob", "encoding/hex", "encoding/json",
    "encoding/pem", "encoding/xml", "errors", "expvar", "flag", "fmt", "go/ast", "go/build",
    "go/build/constraint", "go/constant", "go/doc", "go/doc/comment", "go/format",
    "go/importer", "go/parser", "go/printer", "go/scanner", "go/token", "go/types",
    "go/version", "hash", "hash/adler32", "hash/crc32", "hash/crc64", "hash/fnv",
    "hash/maphash", "html", "html/template", "image", "image/color", "image/color/palette",
    "image/draw", "image/gif", "image/jpeg", "image/png", "index/suffixarray", "io", "io/fs",
    "io/ioutil", "iter", "log", "log/slog", "log/syslog", "maps", "math", "math/big",
    "math/bits", "math/cmplx", "math/rand", "math/rand/v2", "mime", "mime/multipart",
    "mime/quotedprintable", "net", "net/http", "net/http/cgi", "net/http/cookiejar",
    "net/http/fcgi", "net/http/httptest", "net/http/httptrace", "net/http/httputil",
    "net/http/pprof", "net/mail", "net/netip", "net/rpc", "net/rpc/jsonrpc", "net/smtp",
    "net/textproto", "net/url", "os", "os/exec", "os/signal", "os/user", "path",
    "path/filepath", "plugin", "reflect", "regexp", "regexp/syntax", "runtime", "runtime/cgo",
    "runtime/coverage", "runtime/debug", "runtime/metrics", "runtime/pprof", "runtime/race",
    "runtime/trace", "slices", "sort", "strconv", "strings", "structs", "sync", "sync/atomic",
    "syscall", "testing", "testing/fstest", "testing/iotest", "testing/quick",
    "testing/slogtest", "text/scanner", "text/tabwriter", "text/template",
    "text/template/parse", "time", "time/tzdata", "unicode", "unicode/utf16", "unicode/utf8",
    "unique", "unsafe", "weak",
];

/// Standard library paths chosen when several packages share a name.
const PREFERRED: &[(&str, &str)] = &[
    ("pprof", "runtime/pprof"),
    ("rand", "math/rand"),
    ("scanner", "text/scanner"),
    ("template", "text/template"),
];

/// Standard library import path for the package named `qualifier`.
pub(crate) fn stdlib_path(qualifier: &str) -> Option<&'static str> {
    PREFERRED
        .iter()
        .find(|(name, _)| *name == qualifier)
        .map(|(_, path)| *path)
        .or_else(|| {
            STDLIB
                .iter()
                .copied()
                .find(|path| default_binding(path) == qualifier)
        })
}

/// One import spec: `[name] "path"`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) struct ImportSpec {
    pub name: Option<String>,
    pub path: String,
}

impl ImportSpec {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            name: None,
            path: path.into(),
        }
    }

    /// Identifier the package is referred to by in the file.
    pub fn binding(&self) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => default_binding(&self.path),
        }
    }

    /// Blank and dot imports are kept for their side effects.
    fn is_side_effect(&self) -> bool {
        matches!(self.name.as_deref(), Some("_" | "."))
    }

    fn is_std(&self) -> bool {
        !self.path.split('/').next().unwrap_or_default().contains('.')
    }

    fn render(&self) -> String {
        match &self.name {
            Some(name) => format!("{} \"{}\"", name, self.path),
            None => format!("\"{}\"", self.path),
        }
    }
}

/// Package name assumed for `path` when the import has no explicit name.
///
/// Major version suffixes (`/v2`) are skipped and `go-` prefixes dropped.
pub(crate) fn default_binding(path: &str) -> String {
    let mut segments = path.rsplit('/');
    let mut last = segments.next().unwrap_or(path);
    if is_version_segment(last) {
        last = segments.next().unwrap_or(last);
    }

    let base = last.split('.').next().unwrap_or(last);
    base.strip_prefix("go-").unwrap_or(base).replace('-', "_")
}

fn is_version_segment(s: &str) -> bool {
    s.strip_prefix('v')
        .is_some_and(|n| !n.is_empty() && n.bytes().all(|b| b.is_ascii_digit()))
}

/// Package clause and import declarations of a parsed file.
#[derive(Debug)]
pub(crate) struct Preamble {
    /// End of the package clause.
    pub package_end: usize,
    pub imports: Vec<ImportSpec>,
    /// Byte ranges of every import declaration.
    pub declarations: Vec<Range<usize>>,
}

/// Read the package clause and import declarations under `root`.
pub(crate) fn read_preamble(root: Node<'_>, src: &str) -> Result<Preamble, SyntaxError> {
    let mut cursor = root.walk();
    let mut package_end = None;
    let mut imports = Vec::new();
    let mut declarations = Vec::new();

    for node in root.named_children(&mut cursor) {
        match node.kind() {
            "package_clause" => package_end = Some(node.end_byte()),
            "import_declaration" => {
                collect_specs(node, src, &mut imports)?;
                declarations.push(node.byte_range());
            }
            _ => {}
        }
    }

    let package_end =
        package_end.ok_or_else(|| SyntaxError::new("expected 'package' clause", 0))?;
    Ok(Preamble {
        package_end,
        imports,
        declarations,
    })
}

fn collect_specs(node: Node<'_>, src: &str, out: &mut Vec<ImportSpec>) -> Result<(), SyntaxError> {
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        match child.kind() {
            "import_spec" => out.push(import_spec(child, src)?),
            "import_spec_list" => collect_specs(child, src, out)?,
            _ => {}
        }
    }
    Ok(())
}

/// `[name] "path"`
fn import_spec(node: Node<'_>, src: &str) -> Result<ImportSpec, SyntaxError> {
    let literal = node
        .child_by_field_name("path")
        .ok_or_else(|| SyntaxError::new("missing import path", node.start_byte()))?;

    let quoted = text(literal, src);
    let path = quoted.get(1..quoted.len().saturating_sub(1)).unwrap_or_default();
    if path.is_empty() {
        return Err(SyntaxError::new("invalid import path", literal.start_byte()));
    }

    Ok(ImportSpec {
        name: node
            .child_by_field_name("name")
            .map(|name| text(name, src).to_string()),
        path: path.to_string(),
    })
}

/// Identifiers used as package qualifiers (`pkg.Name`) outside import declarations.
pub(crate) fn used_qualifiers<'s>(root: Node<'_>, src: &'s str) -> BTreeSet<&'s str> {
    let mut used = BTreeSet::new();
    collect_qualifiers(root, src, &mut used);
    used
}

fn collect_qualifiers<'s>(node: Node<'_>, src: &'s str, used: &mut BTreeSet<&'s str>) {
    let qualifier = match node.kind() {
        "import_declaration" => return,
        "qualified_type" => node.child_by_field_name("package"),
        "selector_expression" => node
            .child_by_field_name("operand")
            .filter(|operand| operand.kind() == "identifier"),
        _ => None,
    };
    if let Some(qualifier) = qualifier {
        used.insert(text(qualifier, src));
    }

    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        collect_qualifiers(child, src, used);
    }
}

fn text<'s>(node: Node<'_>, src: &'s str) -> &'s str {
    src.get(node.byte_range()).unwrap_or_default()
}

/// Drop unused imports and add missing ones.
///
/// `known` maps qualifiers to import paths and takes precedence over the
/// standard library table.
pub(crate) fn resolve(
    existing: Vec<ImportSpec>,
    used: &BTreeSet<&str>,
    known: &IndexMap<String, String>,
) -> Vec<ImportSpec> {
    let mut resolved: Vec<ImportSpec> = Vec::new();

    for spec in existing {
        if resolved.contains(&spec) {
            continue;
        }
        if spec.is_side_effect() || used.contains(spec.binding().as_str()) {
            resolved.push(spec);
        } else {
            tracing::debug!(path = %spec.path, "removing unused import");
        }
    }

    for qualifier in used {
        if resolved.iter().any(|s| s.binding() == *qualifier) {
            continue;
        }
        let path = known
            .get(*qualifier)
            .map(String::as_str)
            .or_else(|| stdlib_path(qualifier));

        if let Some(path) = path {
            let mut spec = ImportSpec::new(path);
            if default_binding(path) != *qualifier {
                spec.name = Some(qualifier.to_string());
            }
            tracing::debug!(path, "adding missing import");
            resolved.push(spec);
        }
    }

    resolved
}

/// Render import declarations, standard library first.
pub(crate) fn render(imports: &[ImportSpec]) -> Vec<String> {
    match imports {
        [] => Vec::new(),
        [single] => vec![format!("import {}", single.render())],
        _ => {
            let (mut stdlib, mut third_party): (Vec<_>, Vec<_>) =
                imports.iter().partition(|s| s.is_std());
            stdlib.sort_by(|a, b| a.path.cmp(&b.path).then(a.name.cmp(&b.name)));
            third_party.sort_by(|a, b| a.path.cmp(&b.path).then(a.name.cmp(&b.name)));

            let mut lines = vec!["import (".to_string()];
            lines.extend(stdlib.iter().map(|s| format!("\t{}", s.render())));
            if !stdlib.is_empty() && !third_party.is_empty() {
                lines.push(String::new());
            }
            lines.extend(third_party.iter().map(|s| format!("\t{}", s.render())));
            lines.push(")".to_string());
            lines
        }
    }
}
