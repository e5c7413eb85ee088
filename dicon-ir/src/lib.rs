//! Interface descriptor types for the dicon container generator.
//!
//! These types are the hand-off point between whatever discovers an
//! interface (a manifest, a source parser) and the code generators.
//!
//! # Architecture
//!
//! ```text
//! dicon.toml → dicon-manifest (parsing) → dicon-ir (descriptor) → codegen
//! ```
//!
//! The descriptor is language-agnostic: package names and type names are plain
//! strings, and each backend decides how they are qualified and rendered.

mod descriptor;

pub use descriptor::{FactorySignature, InterfaceDescriptor, TypeRef};
