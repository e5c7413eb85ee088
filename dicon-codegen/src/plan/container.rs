use dicon_ir::{FactorySignature, InterfaceDescriptor};

use crate::{GenerateError, NamingConvention, analysis::DependencyGraph};

/// Knobs for a generation run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GenerateOptions {
    /// Reject cyclic descriptors before emitting anything.
    ///
    /// Off by default: cycles otherwise surface as unbounded recursion in the
    /// generated accessors.
    pub detect_cycles: bool,
}

/// The generated container, with every name derived and qualified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerPlan {
    /// The container's own package (`package` clause in Go).
    pub package_name: String,
    /// Interface the container implements, as seen from its own package.
    pub interface_name: String,
    /// One accessor per factory method, in declaration order.
    pub accessors: Vec<AccessorPlan>,
}

/// One generated accessor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessorPlan {
    /// Method name on the container.
    pub name: String,
    /// Key of the accessor's cache slot (the factory method name).
    pub cache_key: String,
    /// Type returned (and cached), qualified.
    pub return_type: String,
    /// Constructor function, qualified by the origin package.
    pub constructor: String,
    /// Accessors resolving the constructor arguments, in argument order.
    pub dependencies: Vec<String>,
}

impl ContainerPlan {
    /// Plan the container for `descriptor` with the given method list.
    ///
    /// # Errors
    ///
    /// - [`GenerateError::ArityViolation`] for the first method (in declaration
    ///   order) that does not declare exactly one return type. Every method is
    ///   checked before any accessor is planned.
    /// - [`GenerateError::CyclicDependency`] for the first cycle found, only
    ///   when `options.detect_cycles` is set.
    pub fn build(
        descriptor: &InterfaceDescriptor,
        methods: &[FactorySignature],
        naming: &NamingConvention,
        options: GenerateOptions,
    ) -> Result<Self, GenerateError> {
        if let Some(method) = methods.iter().find(|m| m.single_return().is_none()) {
            return Err(GenerateError::ArityViolation {
                method: method.name.clone(),
                count: method.return_types.len(),
            });
        }

        if options.detect_cycles {
            let graph = DependencyGraph::new(methods, naming);
            if let Some(cycle) = graph.find_cycles().into_iter().next() {
                return Err(GenerateError::CyclicDependency { cycle });
            }
        }

        let qualifier = naming.qualifier(&descriptor.package_name);
        let mut accessors = Vec::with_capacity(methods.len());

        for method in methods {
            let Some(ret) = method.single_return() else {
                continue;
            };

            // The origin package falls back to the return type's package when unset.
            let origin = if method.package_name.is_empty() {
                ret.package_name.as_str()
            } else {
                method.package_name.as_str()
            };

            let accessor = AccessorPlan {
                name: naming.accessor_name(&method.name),
                cache_key: method.name.clone(),
                return_type: qualifier.qualify(&ret.package_name, &ret.ty),
                constructor: qualifier.qualify(origin, &naming.constructor_for_type(&ret.ty)),
                dependencies: method
                    .argument_types
                    .iter()
                    .map(|arg| naming.accessor_for_type(&arg.ty))
                    .collect(),
            };

            tracing::debug!(
                accessor = %accessor.name,
                returns = %accessor.return_type,
                dependencies = accessor.dependencies.len(),
                "planned accessor"
            );
            accessors.push(accessor);
        }

        for accessor in &accessors {
            for dep in &accessor.dependencies {
                if !accessors.iter().any(|a| &a.name == dep) {
                    tracing::warn!(
                        accessor = %accessor.name,
                        dependency = %dep,
                        "no accessor resolves this dependency; the generated code will not compile"
                    );
                }
            }
        }

        Ok(Self {
            package_name: descriptor.package_name.clone(),
            interface_name: descriptor.name.clone(),
            accessors,
        })
    }

    /// True when no accessor is generated.
    pub fn is_empty(&self) -> bool {
        self.accessors.is_empty()
    }
}
