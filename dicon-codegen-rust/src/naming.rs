//! Rust-specific naming conventions.

use dicon_codegen::NamingConvention;
use dicon_core::to_snake_case;

/// Keywords that cannot be raw identifiers.
const NON_RAW: &[&str] = &["crate", "self", "Self", "super"];

fn escape_rust_reserved(name: &str) -> String {
    if NON_RAW.contains(&name) {
        format!("{}_", name)
    } else {
        format!("r#{}", name)
    }
}

fn associated_new(ty: &str) -> String {
    format!("{}::new", ty)
}

/// Rust naming conventions.
pub const RUST_NAMING: NamingConvention = NamingConvention {
    container_type: "DiContainer",
    container_constructor: "new_di_container",
    package_separator: "::",
    type_to_accessor: to_snake_case,
    type_to_constructor: associated_new,
    reserved_words: &[
        "as", "async", "await", "break", "const", "continue", "crate", "dyn", "else", "enum",
        "extern", "false", "fn", "for", "gen", "if", "impl", "in", "let", "loop", "match", "mod",
        "move", "mut", "pub", "ref", "return", "self", "Self", "static", "struct", "super",
        "trait", "true", "type", "unsafe", "use", "where", "while", "abstract", "become", "box",
        "do", "final", "macro", "override", "priv", "try", "typeof", "unsized", "virtual",
        "yield",
    ],
    escape_reserved: escape_rust_reserved,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessor_for_type_is_snake_case() {
        assert_eq!(RUST_NAMING.accessor_for_type("Logger"), "logger");
        assert_eq!(RUST_NAMING.accessor_for_type("HTTPClient"), "http_client");
    }

    #[test]
    fn test_keyword_types_are_raw_escaped() {
        assert_eq!(RUST_NAMING.accessor_for_type("Type"), "r#type");
        assert_eq!(RUST_NAMING.accessor_for_type("Match"), "r#match");
    }

    #[test]
    fn test_non_raw_keywords_get_suffix() {
        assert_eq!(RUST_NAMING.safe_name("self"), "self_");
        assert_eq!(RUST_NAMING.safe_name("crate"), "crate_");
    }

    #[test]
    fn test_constructor_is_associated_new() {
        assert_eq!(RUST_NAMING.constructor_for_type("Logger"), "Logger::new");
    }

    #[test]
    fn test_reserved_words() {
        assert!(RUST_NAMING.is_reserved("type"));
        assert!(RUST_NAMING.is_reserved("async"));
        assert!(!RUST_NAMING.is_reserved("logger"));
    }
}
