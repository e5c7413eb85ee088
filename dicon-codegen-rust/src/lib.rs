//! Rust backend for the dicon container generator.
//!
//! The generated `DiContainer` keeps one `OnceLock<Arc<T>>` slot per accessor,
//! so a cached instance always has the accessor's return type.

mod format;
mod generator;
mod naming;

pub mod ast;

pub use ast::{Field, Fn, Impl, Param, Stmt, Struct, Use, Visibility};
pub use dicon_codegen::{ContainerCodegen, Formatter};
pub use format::RustFormatter;
pub use generator::Generator;
pub use naming::RUST_NAMING;
