//! Language-agnostic code generation traits.

use std::{io::Write, path::Path};

use dicon_ir::{FactorySignature, InterfaceDescriptor};

use super::NamingConvention;
use crate::{FormatError, GenerateError, OutputError};

/// Trait for language-specific container generators.
///
/// Implement this trait to add support for emitting containers in a new language.
/// A generator owns its text buffer, so one instance serves one generation at a
/// time; use separate instances for concurrent runs.
pub trait ContainerCodegen {
    /// Language identifier (e.g., "go", "rust")
    fn language(&self) -> &'static str;

    /// File extension for generated source files (e.g., "go", "rs")
    fn file_extension(&self) -> &'static str;

    /// File name used when no output path is configured
    fn default_file_name(&self) -> &'static str;

    /// Naming contract of the generated API
    fn naming(&self) -> &'static NamingConvention;

    /// Emit raw container source for `descriptor`.
    ///
    /// `methods` is normally `descriptor.methods`; it is passed separately
    /// because it may be gathered from several declaration sites. Each call
    /// replaces the previous buffer contents, so identical input always
    /// yields identical text.
    fn generate(
        &mut self,
        descriptor: &InterfaceDescriptor,
        methods: &[FactorySignature],
    ) -> Result<&str, GenerateError>;

    /// Raw text from the last successful [`generate`](Self::generate) call
    fn raw(&self) -> &str;

    /// Formatter that normalizes this generator's output
    fn formatter(&self) -> &dyn Formatter;

    /// Normalize the buffered text and write it to `sink`
    fn out(&self, sink: &mut dyn Write, path_hint: &Path) -> Result<(), OutputError> {
        self.formatter().write_to(self.raw(), path_hint, sink)
    }
}

/// Trait for source normalizers.
///
/// A formatter knows nothing about containers: it checks that the text
/// parses, resolves imports and applies canonical layout.
pub trait Formatter {
    /// Language identifier (e.g., "go", "rust")
    fn language(&self) -> &'static str;

    /// Normalize `raw`; `path_hint` names the source in diagnostics and is never opened.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError::MalformedSource`] with the parser's error as the
    /// source when `raw` is not syntactically valid, and [`FormatError::Tool`]
    /// when an external formatter the backend delegates to cannot be run.
    fn normalize(&self, raw: &str, path_hint: &Path) -> Result<String, FormatError>;

    /// Normalize `raw` and write the result to `sink`. Nothing is written on failure.
    fn write_to(&self, raw: &str, path_hint: &Path, sink: &mut dyn Write) -> Result<(), OutputError> {
        let formatted = self.normalize(raw, path_hint)?;
        sink.write_all(formatted.as_bytes())?;
        Ok(())
    }
}
