//! Text building blocks for code generation.
//!
//! - [`CodeBuilder`] - Fluent API for building indented code
//! - [`Indent`] - Indentation configuration

mod code_builder;
mod indent;

pub use code_builder::CodeBuilder;
pub use indent::Indent;
