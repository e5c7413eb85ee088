//! Go parsing and syntax checking.

use thiserror::Error;
use tree_sitter::{Node, Parser, Tree};

/// Declarations allowed at the top level of a Go file.
const TOP_LEVEL: &[&str] = &[
    "comment",
    "package_clause",
    "import_declaration",
    "const_declaration",
    "var_declaration",
    "type_declaration",
    "function_declaration",
    "method_declaration",
];

/// Parse failure with the byte offset of the offending input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct SyntaxError {
    pub message: String,
    /// Byte offset into the source.
    pub offset: usize,
}

impl SyntaxError {
    pub(crate) fn new(message: impl Into<String>, offset: usize) -> Self {
        Self {
            message: message.into(),
            offset,
        }
    }
}

/// Parse `src` as a Go source file.
///
/// Fails at the first error or missing node, and when the file does not
/// open with a package clause or holds anything but declarations.
pub(crate) fn parse(src: &str) -> Result<Tree, SyntaxError> {
    let mut parser = Parser::new();
    parser
        .set_language(&tree_sitter_go::LANGUAGE.into())
        .map_err(|err| SyntaxError::new(format!("cannot load Go grammar: {err}"), 0))?;
    let tree = parser
        .parse(src, None)
        .ok_or_else(|| SyntaxError::new("parser returned no tree", 0))?;

    let root = tree.root_node();
    if let Some(node) = first_error(root) {
        return Err(describe(node, src));
    }
    check_declarations(root, src)?;
    Ok(tree)
}

/// Leftmost error or missing node under `node`.
fn first_error(node: Node<'_>) -> Option<Node<'_>> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    if !node.has_error() {
        return None;
    }
    let mut cursor = node.walk();
    let found = node.children(&mut cursor).find_map(first_error);
    found
}

fn describe(node: Node<'_>, src: &str) -> SyntaxError {
    let offset = node.start_byte();
    if node.is_missing() {
        return SyntaxError::new(format!("expected '{}'", node.kind()), offset);
    }

    let text = node.utf8_text(src.as_bytes()).unwrap_or_default();
    let snippet: String = text
        .split_whitespace()
        .next()
        .unwrap_or_default()
        .chars()
        .take(24)
        .collect();
    if snippet.is_empty() {
        SyntaxError::new("unexpected end of input", offset)
    } else {
        SyntaxError::new(format!("unexpected '{snippet}'"), offset)
    }
}

fn check_declarations(root: Node<'_>, src: &str) -> Result<(), SyntaxError> {
    let mut cursor = root.walk();
    let mut seen_package = false;

    for node in root.named_children(&mut cursor) {
        match node.kind() {
            "comment" => {}
            "package_clause" if !seen_package => seen_package = true,
            _ if !seen_package => {
                return Err(SyntaxError::new(
                    "expected 'package' clause",
                    node.start_byte(),
                ));
            }
            "package_clause" => {
                return Err(SyntaxError::new(
                    "unexpected second 'package' clause",
                    node.start_byte(),
                ));
            }
            kind if !TOP_LEVEL.contains(&kind) => {
                return Err(SyntaxError::new(
                    "non-declaration statement outside function body",
                    node.start_byte(),
                ));
            }
            _ => {}
        }
    }

    if seen_package {
        Ok(())
    } else {
        Err(SyntaxError::new("expected 'package' clause", src.len()))
    }
}
