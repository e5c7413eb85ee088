//! Descriptor → container plan.
//!
//! A [`ContainerPlan`] is the language-agnostic shape of the generated code:
//! one [`AccessorPlan`] per factory method with every name already derived
//! and qualified. Backends only decide how the plan is spelled.

mod container;
mod qualifier;

pub use container::{AccessorPlan, ContainerPlan, GenerateOptions};
pub use qualifier::Qualifier;
