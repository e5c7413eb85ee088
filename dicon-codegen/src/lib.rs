//! Shared code generation layer for the dicon container generator.
//!
//! This crate holds everything the language backends (`dicon-codegen-go`,
//! `dicon-codegen-rust`) have in common.
//!
//! # Module Organization
//!
//! - [`builder`] - Text building blocks (CodeBuilder, Indent)
//! - [`plan`] - Descriptor → fully-qualified accessor plan (arity check, qualification)
//! - [`analysis`] - Dependency graph diagnostics (unresolved deps, cycles)
//! - [`language`] - Backend contracts (ContainerCodegen, Formatter, NamingConvention)
//! - [`error`] - GenerateError, FormatError, OutputError
//! - [`testing`] - Descriptor fixtures and compile checkers (feature-gated)

pub mod analysis;
pub mod builder;
pub mod error;
pub mod language;
pub mod plan;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use analysis::{Diagnostic, Severity, analyze};
pub use builder::{CodeBuilder, Indent};
pub use error::{FormatError, GenerateError, OutputError};
pub use language::{ContainerCodegen, Formatter, NamingConvention};
pub use plan::{AccessorPlan, ContainerPlan, GenerateOptions, Qualifier};
