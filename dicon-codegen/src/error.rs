//! Error types for generation and formatting.

use std::path::Path;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Boxed error from an underlying parser, carried unchanged.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Contract violations in the descriptor, detected before any text is emitted.
#[derive(Debug, Error, Diagnostic)]
pub enum GenerateError {
    #[error("factory method '{method}' must return exactly 1 instance but declares {count}")]
    #[diagnostic(
        code(dicon::arity_violation),
        help("a factory method constructs a single instance; declare one return type for '{method}'")
    )]
    ArityViolation { method: String, count: usize },

    #[error("dependency cycle detected: {}", .cycle.join(" -> "))]
    #[diagnostic(
        code(dicon::cyclic_dependency),
        help("the generated accessors would recurse forever; break the cycle in the constructor arguments")
    )]
    CyclicDependency { cycle: Vec<String> },
}

/// Failure of the normalization step.
#[derive(Debug, Error, Diagnostic)]
pub enum FormatError {
    #[error("malformed source in '{name}': {reason}")]
    #[diagnostic(code(dicon::malformed_source))]
    MalformedSource {
        name: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("{reason}")]
        span: Option<SourceSpan>,
        reason: String,
        #[source]
        source: BoxError,
    },

    #[error("could not run '{tool}'")]
    #[diagnostic(
        code(dicon::formatter_unavailable),
        help("make sure '{tool}' is installed and on PATH, or pass --raw to skip normalization")
    )]
    Tool {
        tool: String,
        #[source]
        source: BoxError,
    },
}

impl FormatError {
    /// Wrap a parser error for `src`, pointing at `offset` when it is known.
    pub fn malformed(
        path_hint: &Path,
        src: &str,
        offset: Option<usize>,
        source: impl Into<BoxError>,
    ) -> Self {
        let source = source.into();
        let name = path_hint.display().to_string();
        let span = offset.map(|offset| {
            let offset = offset.min(src.len());
            let len = usize::from(offset < src.len());
            SourceSpan::from((offset, len))
        });

        FormatError::MalformedSource {
            src: NamedSource::new(&name, src.to_string()),
            name,
            span,
            reason: source.to_string(),
            source,
        }
    }

    /// Byte offset of the reported problem, if any.
    pub fn offset(&self) -> Option<usize> {
        match self {
            FormatError::MalformedSource { span, .. } => span.map(|s| s.offset()),
            FormatError::Tool { .. } => None,
        }
    }
}

/// Failure while normalizing and writing generated source to a sink.
#[derive(Debug, Error, Diagnostic)]
pub enum OutputError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Format(#[from] FormatError),

    #[error("failed to write generated source")]
    #[diagnostic(code(dicon::io))]
    Io(#[from] std::io::Error),
}
