//! Backend contracts.
//!
//! - [`ContainerCodegen`] - Emits raw container source for one target language
//! - [`Formatter`] - Normalizes raw source (syntax check, imports, layout)
//! - [`NamingConvention`] - Fixed names and derivation rules of the generated API

mod naming;
mod traits;

pub use naming::NamingConvention;
pub use traits::{ContainerCodegen, Formatter};
