//! Identifier and package validation with source spans.

use miette::SourceSpan;

use crate::{Language, Result, SourceContext};

/// Validation context: source for spans, target language, and the current
/// path through the manifest (e.g. `methods.Logger.args`).
#[derive(Debug, Clone)]
pub(crate) struct ParseContext<'a> {
    source: &'a SourceContext,
    language: Language,
    path: Vec<&'a str>,
}

impl<'a> ParseContext<'a> {
    pub fn new(source: &'a SourceContext, language: Language) -> Self {
        Self {
            source,
            language,
            path: Vec::new(),
        }
    }

    /// Push a path segment and return a new context.
    pub fn push(&self, segment: &'a str) -> Self {
        let mut path = self.path.clone();
        path.push(segment);
        Self {
            source: self.source,
            language: self.language,
            path,
        }
    }

    pub fn path_string(&self) -> String {
        self.path.join(".")
    }

    /// e.g. "argument type in 'methods.Logger'", or just "method name".
    pub fn context_for(&self, kind: &str) -> String {
        if self.path.is_empty() {
            kind.to_string()
        } else {
            format!("{} in '{}'", kind, self.path_string())
        }
    }

    pub fn find_span(&self, name: &str) -> Option<SourceSpan> {
        find_name_span(self.source.src(), name)
    }

    /// A plain identifier that is not a keyword of the target language.
    pub fn validate_name(&self, name: &str, kind: &str) -> Result<()> {
        if let Some(reason) = validate_identifier(name) {
            return Err(self.source.invalid_identifier_error(
                name,
                self.context_for(kind),
                reason,
                self.find_span(name),
            ));
        }
        if self.language.is_keyword(name) {
            return Err(self.source.reserved_keyword_error(
                name,
                self.context_for(kind),
                self.language,
                self.find_span(name),
            ));
        }
        Ok(())
    }

    /// A package name (Go) or module path (Rust).
    pub fn validate_package(&self, package: &str, kind: &str) -> Result<()> {
        let reason = match self.language {
            Language::Go => validate_identifier(package).or_else(|| {
                self.language
                    .is_keyword(package)
                    .then_some("package name is a Go keyword")
            }),
            Language::Rust => validate_module_path(package),
        };

        match reason {
            Some(reason) => Err(self.source.invalid_identifier_error(
                package,
                self.context_for(kind),
                reason,
                self.find_span(package),
            )),
            None => Ok(()),
        }
    }
}

/// Find the span of a quoted name in the source, falling back to a bare match.
pub(crate) fn find_name_span(src: &str, name: &str) -> Option<SourceSpan> {
    if name.is_empty() {
        return None;
    }
    if let Some(pos) = src.find(&format!("\"{}\"", name)) {
        return Some(SourceSpan::from((pos + 1, name.len())));
    }
    src.find(name)
        .map(|pos| SourceSpan::from((pos, name.len())))
}

/// Spans of every `key = "value"` (TOML) or `"key": "value"` (JSON) pair.
pub(crate) fn find_key_spans(src: &str, key: &str, value: &str) -> Vec<SourceSpan> {
    let quoted = format!("\"{}\"", value);
    src.match_indices(&quoted)
        .filter(|(pos, _)| {
            let line_start = src[..*pos].rfind('\n').map_or(0, |i| i + 1);
            src[line_start..*pos]
                .trim_end()
                .trim_end_matches(['=', ':'])
                .trim_end()
                .trim_end_matches('"')
                .ends_with(key)
        })
        .map(|(pos, _)| SourceSpan::from((pos + 1, value.len())))
        .collect()
}

/// Returns None if `name` is a valid identifier, Some(reason) otherwise.
pub(crate) fn validate_identifier(name: &str) -> Option<&'static str> {
    let mut chars = name.chars();

    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        Some(_) => return Some("identifiers must start with a letter or underscore"),
        None => return Some("name cannot be empty"),
    }

    if name == "_" {
        return Some("the blank identifier cannot be used as a name");
    }

    if !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Some("identifiers may only contain letters, numbers, and underscores");
    }

    None
}

/// `crate::a::b`, `super::x` or `a::b`: path keywords only in leading position.
fn validate_module_path(path: &str) -> Option<&'static str> {
    if path.is_empty() {
        return Some("module path cannot be empty");
    }

    for (i, segment) in path.split("::").enumerate() {
        let leading_keyword = matches!(segment, "crate" | "self" | "super");
        if leading_keyword && (i == 0 || segment == "super") {
            continue;
        }
        if let Some(reason) = validate_identifier(segment) {
            return Some(reason);
        }
        if Language::Rust.is_keyword(segment) {
            return Some("module path segment is a Rust keyword");
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_identifiers() {
        assert!(validate_identifier("Logger").is_none());
        assert!(validate_identifier("_private").is_none());
        assert!(validate_identifier("repo2").is_none());
    }

    #[test]
    fn test_invalid_identifiers() {
        assert!(validate_identifier("").is_some());
        assert!(validate_identifier("_").is_some());
        assert!(validate_identifier("1st").is_some());
        assert!(validate_identifier("my-logger").is_some());
        assert!(validate_identifier("a.b").is_some());
    }

    #[test]
    fn test_module_paths() {
        assert!(validate_module_path("crate::app").is_none());
        assert!(validate_module_path("super::super::infra").is_none());
        assert!(validate_module_path("app").is_none());
        assert!(validate_module_path("crate::::app").is_some());
        assert!(validate_module_path("app::crate").is_some());
        assert!(validate_module_path("crate::fn").is_some());
    }

    #[test]
    fn test_find_name_span_prefers_quoted() {
        let src = "name = \"Container\"\npackage = \"app\"\n[[methods]]\nname = \"app_logger\"";
        let span = find_name_span(src, "app").unwrap();
        assert_eq!(span.offset(), 30);
        assert_eq!(span.len(), 3);
    }

    #[test]
    fn test_find_key_spans() {
        let src = "name = \"Logger\"\nreturns = [{ type = \"Logger\" }]\nname = \"Logger\"";
        let spans = find_key_spans(src, "name", "Logger");
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0].offset(), 8);
    }

    #[test]
    fn test_find_key_spans_json() {
        let src = "{ \"name\": \"Logger\" }";
        assert_eq!(find_key_spans(src, "name", "Logger").len(), 1);
    }

    #[test]
    fn test_context_for() {
        let source = SourceContext::new("", "dicon.toml");
        let ctx = ParseContext::new(&source, Language::Go);
        assert_eq!(ctx.context_for("method name"), "method name");
        assert_eq!(
            ctx.push("methods").push("Logger").context_for("argument type"),
            "argument type in 'methods.Logger'"
        );
    }

    #[test]
    fn test_keyword_depends_on_language() {
        let source = SourceContext::new("name = \"func\"", "dicon.toml");
        let go = ParseContext::new(&source, Language::Go);
        let rust = ParseContext::new(&source, Language::Rust);

        let err = go.validate_name("func", "method name").unwrap_err();
        assert!(err.to_string().contains("reserved keyword in go"));
        assert!(rust.validate_name("func", "method name").is_ok());
    }

    #[test]
    fn test_go_package_must_be_identifier() {
        let source = SourceContext::new("", "dicon.toml");
        let ctx = ParseContext::new(&source, Language::Go);
        assert!(ctx.validate_package("app", "package").is_ok());
        assert!(ctx.validate_package("crate::app", "package").is_err());
        assert!(ctx.validate_package("type", "package").is_err());
    }
}
