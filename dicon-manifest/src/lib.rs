//! Manifest parsing and validation for dicon.
//!
//! A manifest (`dicon.toml`, or the same structure as JSON) describes the
//! interface to implement, the factory methods, and output settings. It is
//! lowered to an [`InterfaceDescriptor`](dicon_ir::InterfaceDescriptor) for
//! the generators.

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod error;
mod language;
mod manifest;
mod validate;

pub use error::{Error, Result, SourceContext};
pub use language::Language;
pub use manifest::{InterfaceConfig, Manifest, MethodEntry, OutputConfig, TypeEntry};
