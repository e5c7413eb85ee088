//! Go backend for the dicon container generator.
//!
//! [`Generator`] emits a `dicontainer` type backed by a
//! `map[string]interface{}` cache; [`GoFormatter`] checks Go source with
//! tree-sitter, resolves its imports and hands the layout to `gofmt`.

mod format;
mod generator;
mod naming;

pub use dicon_codegen::{ContainerCodegen, Formatter};
pub use format::{GoFormatter, SyntaxError};
pub use generator::Generator;
pub use naming::GO_NAMING;
