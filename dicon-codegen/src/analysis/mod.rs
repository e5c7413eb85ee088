//! Descriptor analysis.
//!
//! Generation only enforces arity (and cycles, when asked to). Everything else
//! that would make the generated code fail later is reported here so that
//! `dicon check` can surface it up front.

mod diagnostic;
mod graph;

pub use diagnostic::{Diagnostic, Severity};
use dicon_ir::InterfaceDescriptor;
pub use graph::DependencyGraph;

use crate::NamingConvention;

/// Collect diagnostics for `descriptor` under the given naming convention.
pub fn analyze(descriptor: &InterfaceDescriptor, naming: &NamingConvention) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();

    for method in &descriptor.methods {
        if method.single_return().is_none() {
            diagnostics.push(
                Diagnostic::error(
                    "arity-violation",
                    format!(
                        "'{}' must return exactly 1 instance but declares {}",
                        method.name,
                        method.return_types.len()
                    ),
                )
                .at(format!("methods.{}", method.name)),
            );
        }
    }

    let graph = DependencyGraph::new(&descriptor.methods, naming);

    for name in graph.duplicates() {
        diagnostics.push(
            Diagnostic::warning(
                "duplicate-accessor",
                format!("accessor '{}' is declared more than once", name),
            )
            .at(format!("methods.{}", name)),
        );
    }

    for (accessor, dep) in graph.unresolved() {
        diagnostics.push(
            Diagnostic::warning(
                "unresolved-dependency",
                format!(
                    "'{}' depends on '{}' but the interface has no such accessor",
                    accessor, dep
                ),
            )
            .at(format!("methods.{}", accessor)),
        );
    }

    for cycle in graph.find_cycles() {
        let location = cycle.first().map(|c| format!("methods.{}", c));
        let mut diag = Diagnostic::warning(
            "cyclic-dependency",
            format!("dependency cycle: {}", cycle.join(" -> ")),
        );
        if let Some(location) = location {
            diag = diag.at(location);
        }
        diagnostics.push(diag);
    }

    diagnostics
}
