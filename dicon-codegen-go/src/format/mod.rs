//! Go source normalization.
//!
//! Stands in for `goimports`: the source is parsed with tree-sitter and
//! rejected at the first syntax error, imports are pruned and completed, and
//! the result is laid out by `gofmt`.

mod gofmt;
mod imports;
mod syntax;

use std::path::{Path, PathBuf};

use dicon_codegen::{FormatError, Formatter};
use indexmap::IndexMap;
pub use syntax::SyntaxError;

use gofmt::GofmtError;

const GOFMT: &str = "gofmt";

/// Normalizer for Go source.
#[derive(Debug, Clone)]
pub struct GoFormatter {
    /// Package qualifier -> import path, for packages outside the standard library.
    imports: IndexMap<String, String>,
    /// Layout program; `None` keeps the parsed layout.
    gofmt: Option<PathBuf>,
}

impl Default for GoFormatter {
    fn default() -> Self {
        Self {
            imports: IndexMap::new(),
            gofmt: Some(PathBuf::from(GOFMT)),
        }
    }
}

impl GoFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register import paths for package qualifiers.
    pub fn with_imports<I, K, V>(mut self, imports: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.imports
            .extend(imports.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Lay out with the `gofmt` at `program` instead of the one on `PATH`.
    pub fn with_gofmt(mut self, program: impl Into<PathBuf>) -> Self {
        self.gofmt = Some(program.into());
        self
    }

    /// Check syntax and fix imports only; lines are left as written.
    pub fn without_gofmt(mut self) -> Self {
        self.gofmt = None;
        self
    }

    /// True when a missing import for `qualifier` can be added.
    pub fn knows(&self, qualifier: &str) -> bool {
        self.imports.contains_key(qualifier) || imports::stdlib_path(qualifier).is_some()
    }

    /// Parse `raw` and rewrite its import declarations.
    fn fix_imports(&self, raw: &str) -> Result<String, SyntaxError> {
        let tree = syntax::parse(raw)?;
        let root = tree.root_node();

        let preamble = imports::read_preamble(root, raw)?;
        let used = imports::used_qualifiers(root, raw);
        let resolved = imports::resolve(preamble.imports, &used, &self.imports);

        let mut body = String::with_capacity(raw.len());
        let mut pos = preamble.package_end;
        for range in &preamble.declarations {
            body.push_str(&raw[pos..range.start]);
            pos = range.end;
        }
        body.push_str(&raw[pos..]);
        let body = body.trim_start_matches(|c: char| c.is_whitespace() || c == ';');

        let mut out = String::with_capacity(raw.len());
        out.push_str(raw[..preamble.package_end].trim_start());
        out.push('\n');
        let rendered = imports::render(&resolved);
        if !rendered.is_empty() {
            out.push('\n');
            for line in rendered {
                out.push_str(&line);
                out.push('\n');
            }
        }
        if !body.trim_end().is_empty() {
            out.push('\n');
            out.push_str(body.trim_end());
            out.push('\n');
        }
        Ok(out)
    }
}

impl Formatter for GoFormatter {
    fn language(&self) -> &'static str {
        "go"
    }

    fn normalize(&self, raw: &str, path_hint: &Path) -> Result<String, FormatError> {
        let reject = |src: &str, err: SyntaxError| {
            tracing::debug!(path = %path_hint.display(), offset = err.offset, %err, "go source rejected");
            let offset = err.offset;
            FormatError::malformed(path_hint, src, Some(offset), err)
        };

        let fixed = self.fix_imports(raw).map_err(|err| reject(raw, err))?;
        let Some(program) = &self.gofmt else {
            return Ok(fixed);
        };

        gofmt::run(program, &fixed).map_err(|err| match err {
            GofmtError::Rejected(err) => reject(&fixed, err),
            spawn @ GofmtError::Spawn { .. } => FormatError::Tool {
                tool: program.display().to_string(),
                source: Box::new(spawn),
            },
        })
    }
}
