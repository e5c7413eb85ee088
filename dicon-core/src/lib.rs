//! Core utilities and types for the dicon container generator.
//!
//! This crate provides the generated-file marker, file write rules and
//! string helpers shared across the dicon crates.

mod file;
mod marker;
mod utils;

// File operations
pub use file::{File, Overwrite, WriteResult};
// Generated-code marker
pub use marker::{GENERATED_HEADER, TOOL_NAME, is_generated};
// String utilities
pub use utils::to_snake_case;
