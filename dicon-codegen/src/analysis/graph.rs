//! Accessor dependency graph.

use std::collections::HashMap;

use dicon_ir::FactorySignature;
use indexmap::IndexMap;

use crate::NamingConvention;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    Visiting,
    Done,
}

/// Which accessor calls which, as the generated code will.
///
/// Nodes are accessor names in declaration order; edges point at the
/// accessor each constructor argument resolves through.
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    edges: IndexMap<String, Vec<String>>,
    duplicates: Vec<String>,
}

impl DependencyGraph {
    pub fn new(methods: &[FactorySignature], naming: &NamingConvention) -> Self {
        let mut graph = Self::default();

        for method in methods {
            let accessor = naming.accessor_name(&method.name);
            if graph.edges.contains_key(&accessor) {
                graph.duplicates.push(accessor);
                continue;
            }
            let deps = method
                .argument_types
                .iter()
                .map(|arg| naming.accessor_for_type(&arg.ty))
                .collect();
            graph.edges.insert(accessor, deps);
        }

        graph
    }

    /// Accessor names in declaration order.
    pub fn accessors(&self) -> impl Iterator<Item = &str> {
        self.edges.keys().map(String::as_str)
    }

    /// Accessors called by `accessor`, in argument order.
    pub fn dependencies(&self, accessor: &str) -> &[String] {
        self.edges.get(accessor).map(Vec::as_slice).unwrap_or_default()
    }

    /// Accessor names declared more than once (second and later occurrences).
    pub fn duplicates(&self) -> &[String] {
        &self.duplicates
    }

    /// `(accessor, dependency)` pairs whose dependency has no accessor.
    pub fn unresolved(&self) -> Vec<(&str, &str)> {
        self.edges
            .iter()
            .flat_map(|(accessor, deps)| {
                deps.iter()
                    .filter(|dep| !self.edges.contains_key(dep.as_str()))
                    .map(move |dep| (accessor.as_str(), dep.as_str()))
            })
            .collect()
    }

    /// Dependency cycles, each as a path that starts and ends on the same accessor.
    ///
    /// Uses a depth-first search over accessors in declaration order; every
    /// back edge yields one cycle.
    pub fn find_cycles(&self) -> Vec<Vec<String>> {
        let mut marks: HashMap<&str, Mark> = HashMap::new();
        let mut path: Vec<&str> = Vec::new();
        let mut cycles = Vec::new();

        for accessor in self.accessors() {
            if !marks.contains_key(accessor) {
                self.visit(accessor, &mut marks, &mut path, &mut cycles);
            }
        }

        cycles
    }

    fn visit<'g>(
        &'g self,
        node: &'g str,
        marks: &mut HashMap<&'g str, Mark>,
        path: &mut Vec<&'g str>,
        cycles: &mut Vec<Vec<String>>,
    ) {
        marks.insert(node, Mark::Visiting);
        path.push(node);

        for dep in self.dependencies(node) {
            let dep = dep.as_str();
            if !self.edges.contains_key(dep) {
                continue;
            }
            match marks.get(dep) {
                Some(Mark::Visiting) => {
                    if let Some(start) = path.iter().position(|n| *n == dep) {
                        let mut cycle: Vec<String> =
                            path[start..].iter().map(|n| n.to_string()).collect();
                        cycle.push(dep.to_string());
                        cycles.push(cycle);
                    }
                }
                Some(Mark::Done) => {}
                None => self.visit(dep, marks, path, cycles),
            }
        }

        path.pop();
        marks.insert(node, Mark::Done);
    }
}
