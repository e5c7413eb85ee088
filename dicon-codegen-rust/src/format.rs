//! Rust source normalization with `syn` and `prettyplease`.

use std::{collections::HashSet, path::Path};

use dicon_codegen::{FormatError, Formatter};
use proc_macro2::{LineColumn, TokenStream, TokenTree};
use quote::ToTokens;
use syn::{Item, ItemUse, UseTree, Visibility, ext::IdentExt};

/// Normalizer for Rust source.
///
/// Unused single-name `use` items are dropped, duplicates removed, and the
/// file is reprinted by `prettyplease`. Plain `//` comments do not survive
/// reprinting, except for the leading comment block (the generated-file
/// marker), which is carried over as is.
#[derive(Debug, Clone, Copy, Default)]
pub struct RustFormatter;

impl Formatter for RustFormatter {
    fn language(&self) -> &'static str {
        "rust"
    }

    fn normalize(&self, raw: &str, path_hint: &Path) -> Result<String, FormatError> {
        let (header, body) = split_header(raw);

        let mut file = syn::parse_file(body).map_err(|err| {
            let offset = header.len() + byte_offset(body, err.span().start());
            tracing::debug!(path = %path_hint.display(), offset, %err, "rust source rejected");
            FormatError::malformed(path_hint, raw, Some(offset), err)
        })?;

        prune_uses(&mut file);
        let printed = prettyplease::unparse(&file);

        let comments: Vec<&str> = header
            .lines()
            .map(str::trim_end)
            .filter(|l| !l.is_empty())
            .collect();
        if comments.is_empty() {
            return Ok(printed);
        }
        Ok(format!("{}\n\n{}", comments.join("\n"), printed))
    }
}

/// Split off leading `//` comment lines (not doc comments) and blank lines.
fn split_header(raw: &str) -> (&str, &str) {
    let mut end = 0;
    for line in raw.split_inclusive('\n') {
        let trimmed = line.trim();
        let plain_comment =
            trimmed.starts_with("//") && !trimmed.starts_with("///") && !trimmed.starts_with("//!");
        if !(plain_comment || trimmed.is_empty()) {
            break;
        }
        end += line.len();
    }
    raw.split_at(end)
}

/// Byte offset of a 1-based line, 0-based char column position in `src`.
fn byte_offset(src: &str, at: LineColumn) -> usize {
    let mut offset = 0;
    for (index, line) in src.split_inclusive('\n').enumerate() {
        if index + 1 == at.line {
            return offset
                + line
                    .char_indices()
                    .nth(at.column)
                    .map_or(line.len(), |(i, _)| i);
        }
        offset += line.len();
    }
    src.len()
}

fn prune_uses(file: &mut syn::File) {
    let mut used = HashSet::new();
    for item in &file.items {
        if !matches!(item, Item::Use(_)) {
            collect_idents(item.to_token_stream(), &mut used);
        }
    }

    let mut seen = HashSet::new();
    file.items.retain(|item| {
        let Item::Use(item_use) = item else {
            return true;
        };
        if !seen.insert(item_use.to_token_stream().to_string()) {
            tracing::debug!("removing duplicate use");
            return false;
        }
        match binding(item_use) {
            Some(name) if !used.contains(&name) => {
                tracing::debug!(%name, "removing unused use");
                false
            }
            _ => true,
        }
    });
}

fn collect_idents(tokens: TokenStream, out: &mut HashSet<String>) {
    for tree in tokens {
        match tree {
            TokenTree::Ident(ident) => {
                out.insert(ident.unraw().to_string());
            }
            TokenTree::Group(group) => collect_idents(group.stream(), out),
            _ => {}
        }
    }
}

/// Name bound by a private single-name `use`; `None` for anything that is
/// always kept (re-exports, globs, groups, `as _`).
fn binding(item: &ItemUse) -> Option<String> {
    if !matches!(item.vis, Visibility::Inherited) {
        return None;
    }
    let mut tree = &item.tree;
    loop {
        match tree {
            UseTree::Path(path) => tree = &path.tree,
            UseTree::Name(name) => return Some(name.ident.unraw().to_string()),
            UseTree::Rename(rename) if rename.rename != "_" => {
                return Some(rename.rename.unraw().to_string());
            }
            _ => return None,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use super::*;

    fn normalize(src: &str) -> String {
        RustFormatter.normalize(src, Path::new("gen.rs")).unwrap()
    }

    #[test]
    fn test_reprints_and_keeps_header() {
        let src = "// Code generated by \"dicon\"; DO NOT EDIT.\n\nfn  main( ) {   run() ; }\n";
        assert_eq!(
            normalize(src),
            "// Code generated by \"dicon\"; DO NOT EDIT.\n\nfn main() {\n    run();\n}\n"
        );
    }

    #[test]
    fn test_unused_use_is_removed() {
        let src = "use std::sync::Arc;\nuse std::sync::OnceLock;\n\nstruct A {\n    x: OnceLock<u8>,\n}\n";
        let out = normalize(src);
        assert!(!out.contains("use std::sync::Arc;"));
        assert!(out.contains("use std::sync::OnceLock;"));
    }

    #[test]
    fn test_duplicate_use_is_removed() {
        let src = "use std::sync::Arc;\nuse std::sync::Arc;\nfn f(_: Arc<u8>) {}\n";
        assert_eq!(normalize(src).matches("use std::sync::Arc;").count(), 1);
    }

    #[test]
    fn test_reexports_and_groups_are_kept() {
        let src = "pub use a::B;\nuse c::{D, E};\nuse f::*;\n";
        let out = normalize(src);
        assert!(out.contains("pub use a::B;"));
        assert!(out.contains("use c::{D, E};"));
        assert!(out.contains("use f::*;"));
    }

    #[test]
    fn test_doc_comments_are_not_header() {
        let src = "/// Docs\nstruct A;\n";
        assert_eq!(normalize(src), "/// Docs\nstruct A;\n");
    }

    #[test]
    fn test_unmatched_brace_is_malformed() {
        let src = "// header\n\nfn f() {\n}\n}\n";
        let err = RustFormatter
            .normalize(src, Path::new("gen.rs"))
            .unwrap_err();

        assert!(matches!(err, FormatError::MalformedSource { .. }));
        assert!(err.source().unwrap().downcast_ref::<syn::Error>().is_some());
        assert!(err.offset().is_some());
    }

    #[test]
    fn test_byte_offset() {
        let src = "ab\ncd\n";
        assert_eq!(byte_offset(src, LineColumn { line: 2, column: 1 }), 4);
        assert_eq!(byte_offset(src, LineColumn { line: 9, column: 0 }), 6);
    }
}
