//! Target languages.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Go keywords
const GO_KEYWORDS: &[&str] = &[
    "break", "case", "chan", "const", "continue", "default", "defer", "else", "fallthrough",
    "for", "func", "go", "goto", "if", "import", "interface", "map", "package", "range", "return",
    "select", "struct", "switch", "type", "var",
];

/// Rust keywords
/// Source: https://doc.rust-lang.org/reference/keywords.html
const RUST_KEYWORDS: &[&str] = &[
    // Strict keywords
    "as", "async", "await", "break", "const", "continue", "crate", "dyn", "else", "enum", "extern",
    "false", "fn", "for", "gen", "if", "impl", "in", "let", "loop", "match", "mod", "move", "mut",
    "pub", "ref", "return", "self", "Self", "static", "struct", "super", "trait", "true", "type",
    "unsafe", "use", "where", "while",
    // Reserved keywords
    "abstract", "become", "box", "do", "final", "macro", "override", "priv", "try", "typeof",
    "unsized", "virtual", "yield",
];

/// Supported target languages for code generation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Go,
    Rust,
}

impl Language {
    /// Returns the language identifier as a static string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Go => "go",
            Language::Rust => "rust",
        }
    }

    /// Reserved words that cannot name an accessor.
    pub fn keywords(&self) -> &'static [&'static str] {
        match self {
            Language::Go => GO_KEYWORDS,
            Language::Rust => RUST_KEYWORDS,
        }
    }

    pub fn is_keyword(&self, name: &str) -> bool {
        self.keywords().contains(&name)
    }

    /// Separator between package (module) path segments and names.
    pub fn package_separator(&self) -> &'static str {
        match self {
            Language::Go => ".",
            Language::Rust => "::",
        }
    }

    /// Language of a source file, by extension.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext {
            "go" => Some(Language::Go),
            "rs" => Some(Language::Rust),
            _ => None,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "go" | "golang" => Ok(Language::Go),
            "rust" | "rs" => Ok(Language::Rust),
            _ => Err(format!("unknown language '{}', expected 'go' or 'rust'", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str() {
        assert_eq!(Language::from_str("go").unwrap(), Language::Go);
        assert_eq!(Language::from_str("Golang").unwrap(), Language::Go);
        assert_eq!(Language::from_str("rs").unwrap(), Language::Rust);
        assert_eq!(Language::from_str("Rust").unwrap(), Language::Rust);
        assert!(Language::from_str("typescript").is_err());
    }

    #[test]
    fn test_default_is_go() {
        assert_eq!(Language::default(), Language::Go);
    }

    #[test]
    fn test_keywords_are_per_language() {
        assert!(Language::Go.is_keyword("func"));
        assert!(!Language::Rust.is_keyword("func"));
        assert!(Language::Rust.is_keyword("fn"));
        assert!(!Language::Go.is_keyword("fn"));
    }

    #[test]
    fn test_from_extension() {
        assert_eq!(Language::from_extension("go"), Some(Language::Go));
        assert_eq!(Language::from_extension("rs"), Some(Language::Rust));
        assert_eq!(Language::from_extension("ts"), None);
    }

    #[test]
    fn test_deserialize() {
        let rust: Language = serde_json::from_str(r#""rust""#).unwrap();
        assert_eq!(rust, Language::Rust);
    }
}
