//! Code builder utility for generating properly indented code.

use super::Indent;

/// Fluent API for building code with proper indentation.
///
/// Consuming methods (returning `Self`) suit small declarative renderers;
/// the `push_` methods (returning `&mut Self`) suit emitters that keep a
/// builder as their buffer.
///
/// # Example
///
/// ```
/// use dicon_codegen::builder::CodeBuilder;
///
/// let mut builder = CodeBuilder::go();
/// builder.push_block("func main() {", "}", |b| {
///     b.push_line("run()");
/// });
///
/// assert_eq!(builder.build(), "func main() {\n\trun()\n}\n");
/// ```
#[derive(Debug, Clone)]
pub struct CodeBuilder {
    indent_level: usize,
    indent: Indent,
    buffer: String,
}

impl CodeBuilder {
    fn new(indent: Indent) -> Self {
        Self {
            indent_level: 0,
            indent,
            buffer: String::new(),
        }
    }

    /// Create a new CodeBuilder with tab indentation (Go default).
    pub fn go() -> Self {
        Self::new(Indent::GO)
    }

    /// Create a new CodeBuilder with 4-space indentation (Rust default).
    pub fn rust() -> Self {
        Self::new(Indent::RUST)
    }

    // =========================================================================
    // Mutable API
    // =========================================================================

    /// Add a line of code with current indentation.
    pub fn push_line(&mut self, s: &str) -> &mut Self {
        self.write_indent();
        self.buffer.push_str(s);
        self.buffer.push('\n');
        self
    }

    /// Add a blank line.
    pub fn push_blank(&mut self) -> &mut Self {
        self.buffer.push('\n');
        self
    }

    fn push_indent(&mut self) -> &mut Self {
        self.indent_level += 1;
        self
    }

    fn push_dedent(&mut self) -> &mut Self {
        self.indent_level = self.indent_level.saturating_sub(1);
        self
    }

    /// Add `header`, an indented body, and `close`.
    pub fn push_block<F>(&mut self, header: &str, close: &str, f: F) -> &mut Self
    where
        F: FnOnce(&mut Self),
    {
        self.push_line(header).push_indent();
        f(self);
        self.push_dedent().push_line(close)
    }

    /// Drop everything written so far.
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.indent_level = 0;
    }

    // =========================================================================
    // Consuming API
    // =========================================================================

    /// Add a line of code with current indentation.
    pub fn line(mut self, s: &str) -> Self {
        self.push_line(s);
        self
    }

    /// Add a blank line (no indentation).
    pub fn blank(mut self) -> Self {
        self.push_blank();
        self
    }

    /// Increase indentation level.
    pub fn indent(mut self) -> Self {
        self.push_indent();
        self
    }

    /// Decrease indentation level.
    pub fn dedent(mut self) -> Self {
        self.push_dedent();
        self
    }

    /// Add a Rust doc comment (`/// text`).
    pub fn rust_doc(self, text: &str) -> Self {
        self.line(&format!("/// {}", text))
    }

    /// Get a reference to the current buffer content.
    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    /// Consume the builder and return the generated code.
    pub fn build(self) -> String {
        self.buffer
    }

    fn write_indent(&mut self) {
        for _ in 0..self.indent_level {
            self.buffer.push_str(self.indent.as_str());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_line() {
        let code = CodeBuilder::rust().line("let x = 1;").build();
        assert_eq!(code, "let x = 1;\n");
    }

    #[test]
    fn test_consuming_indentation() {
        let code = CodeBuilder::rust()
            .line("fn main() {")
            .indent()
            .line("run();")
            .dedent()
            .line("}")
            .build();

        assert_eq!(code, "fn main() {\n    run();\n}\n");
    }

    #[test]
    fn test_doc_comment() {
        let code = CodeBuilder::rust()
            .rust_doc("A container")
            .line("struct DiContainer {}")
            .build();

        assert_eq!(code, "/// A container\nstruct DiContainer {}\n");
    }

    #[test]
    fn test_nested_blocks_use_tabs_for_go() {
        let mut builder = CodeBuilder::go();
        builder.push_block("func (d *dicontainer) Logger() Logger {", "}", |b| {
            b.push_block("if ok {", "}", |b| {
                b.push_line("return instance");
            });
        });

        assert_eq!(
            builder.build(),
            "func (d *dicontainer) Logger() Logger {\n\tif ok {\n\t\treturn instance\n\t}\n}\n"
        );
    }

    #[test]
    fn test_blank_line_has_no_indent() {
        let mut builder = CodeBuilder::go();
        builder.push_indent().push_line("a").push_blank().push_line("b");
        assert_eq!(builder.build(), "\ta\n\n\tb\n");
    }

    #[test]
    fn test_dedent_saturates() {
        let mut builder = CodeBuilder::go();
        builder.push_dedent().push_dedent().push_line("x");
        assert_eq!(builder.as_str(), "x\n");
    }

    #[test]
    fn test_clear_resets_state() {
        let mut builder = CodeBuilder::go();
        builder.push_indent().push_line("x");
        builder.clear();
        assert_eq!(builder.as_str(), "");
        builder.push_line("y");
        assert_eq!(builder.as_str(), "y\n");
    }
}
