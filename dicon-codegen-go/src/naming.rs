//! Go naming conventions.

use dicon_codegen::NamingConvention;

/// Go keywords
const GO_KEYWORDS: &[&str] = &[
    "break",
    "case",
    "chan",
    "const",
    "continue",
    "default",
    "defer",
    "else",
    "fallthrough",
    "for",
    "func",
    "go",
    "goto",
    "if",
    "import",
    "interface",
    "map",
    "package",
    "range",
    "return",
    "select",
    "struct",
    "switch",
    "type",
    "var",
];

/// Go naming convention.
///
/// Accessors are named after the type they resolve and constructors follow the
/// `New<Type>` convention.
pub const GO_NAMING: NamingConvention = NamingConvention {
    container_type: "dicontainer",
    container_constructor: "NewDIContainer",
    package_separator: ".",
    type_to_accessor: |s| s.to_string(),
    type_to_constructor: |s| format!("New{}", s),
    reserved_words: GO_KEYWORDS,
    escape_reserved: |s| format!("{}_", s),
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessor_is_type_name() {
        assert_eq!(GO_NAMING.accessor_for_type("Logger"), "Logger");
    }

    #[test]
    fn test_constructor_convention() {
        assert_eq!(GO_NAMING.constructor_for_type("Logger"), "NewLogger");
    }

    #[test]
    fn test_keyword_escape() {
        assert_eq!(GO_NAMING.safe_name("type"), "type_");
        assert_eq!(GO_NAMING.safe_name("Type"), "Type");
    }
}
