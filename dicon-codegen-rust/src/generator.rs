use dicon_codegen::{
    AccessorPlan, CodeBuilder, ContainerCodegen, ContainerPlan, Formatter, GenerateError,
    GenerateOptions, NamingConvention,
};
use dicon_core::GENERATED_HEADER;
use dicon_ir::{FactorySignature, InterfaceDescriptor};

use crate::{
    Field, Fn, Impl, Param, RUST_NAMING, RustFormatter, Stmt, Struct, Use, Visibility,
};

/// Rust container generator.
///
/// Accessors take `&self`; each slot is filled at most once, so the container
/// is `Send + Sync` whenever the cached types are.
#[derive(Debug, Clone, Default)]
pub struct Generator {
    output: String,
    options: GenerateOptions,
    formatter: RustFormatter,
}

impl Generator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(mut self, options: GenerateOptions) -> Self {
        self.options = options;
        self
    }

    fn render(&self, plan: &ContainerPlan) -> String {
        let naming = &RUST_NAMING;

        let container = plan.accessors.iter().fold(
            Struct::new(naming.container_type)
                .doc(format!("Lazily built singletons behind [`{}`].", plan.interface_name))
                .derive("Default"),
            |s, a| s.field(Field::new(&a.name, format!("OnceLock<Arc<{}>>", a.return_type))),
        );

        let constructor = Fn::new(naming.container_constructor)
            .vis(Visibility::Public)
            .returns(format!("impl {}", plan.interface_name))
            .body_line(format!("{}::default()", naming.container_type));

        let accessors = plan.accessors.iter().fold(
            Impl::new(naming.container_type).for_trait(&plan.interface_name),
            |i, a| i.method(accessor(a)),
        );

        let builder = CodeBuilder::rust().line(GENERATED_HEADER).blank();
        let builder = Use::new("std::sync::Arc").render(builder);
        let builder = Use::new("std::sync::OnceLock").render(builder).blank();
        let builder = container.render(builder).blank();
        let builder = constructor.render(builder).blank();
        accessors.render(builder).build()
    }
}

/// `fn <name>(&self) -> Arc<T>`: return the cached instance or build it from
/// the dependencies, in argument order.
fn accessor(a: &AccessorPlan) -> Fn {
    let args = (0..a.dependencies.len())
        .map(|i| format!("dep{}", i))
        .collect::<Vec<_>>()
        .join(", ");

    Fn::new(&a.name)
        .param(Param::self_ref())
        .returns(format!("Arc<{}>", a.return_type))
        .stmt(Stmt::block(
            format!("if let Some(instance) = self.{}.get()", a.name),
            vec![Stmt::line("return Arc::clone(instance);")],
        ))
        .stmts(
            a.dependencies
                .iter()
                .enumerate()
                .map(|(i, dep)| Stmt::line(format!("let dep{} = self.{}();", i, dep))),
        )
        .body_line(format!("let instance = Arc::new({}({}));", a.constructor, args))
        .body_line(format!("Arc::clone(self.{}.get_or_init(|| instance))", a.name))
}

impl ContainerCodegen for Generator {
    fn language(&self) -> &'static str {
        "rust"
    }

    fn file_extension(&self) -> &'static str {
        "rs"
    }

    fn default_file_name(&self) -> &'static str {
        "dicon_gen.rs"
    }

    fn naming(&self) -> &'static NamingConvention {
        &RUST_NAMING
    }

    fn generate(
        &mut self,
        descriptor: &InterfaceDescriptor,
        methods: &[FactorySignature],
    ) -> Result<&str, GenerateError> {
        let plan = ContainerPlan::build(descriptor, methods, &RUST_NAMING, self.options)?;
        self.output = self.render(&plan);

        tracing::debug!(
            module = %plan.package_name,
            accessors = plan.accessors.len(),
            bytes = self.output.len(),
            "generated rust container"
        );
        Ok(&self.output)
    }

    fn raw(&self) -> &str {
        &self.output
    }

    fn formatter(&self) -> &dyn Formatter {
        &self.formatter
    }
}

#[cfg(test)]
mod tests {
    use dicon_codegen::testing::{cyclic, logger_only, rust_layered, two_returns};

    use super::*;

    fn raw(descriptor: &InterfaceDescriptor) -> String {
        Generator::new()
            .generate(descriptor, &descriptor.methods)
            .unwrap()
            .to_string()
    }

    #[test]
    fn test_typed_slots() {
        let out = raw(&rust_layered());
        assert!(out.contains("struct DiContainer {\n"));
        assert!(out.contains("    config: OnceLock<Arc<Config>>,\n"));
        assert!(out.contains("    repository: OnceLock<Arc<crate::infra::Repository>>,\n"));
    }

    #[test]
    fn test_constructor_returns_interface() {
        let out = raw(&rust_layered());
        assert!(out.contains("pub fn new_di_container() -> impl Container {\n    DiContainer::default()\n}"));
        assert!(out.contains("impl Container for DiContainer {"));
    }

    #[test]
    fn test_dependencies_resolve_in_order() {
        let out = raw(&rust_layered());
        assert!(out.contains(
            "        let dep0 = self.logger();\n        let dep1 = self.config();\n        let instance = Arc::new(crate::infra::Repository::new(dep0, dep1));\n"
        ));
    }

    #[test]
    fn test_cached_instance_is_returned() {
        let out = raw(&rust_layered());
        assert!(out.contains("if let Some(instance) = self.service.get() {"));
        assert!(out.contains("Arc::clone(self.service.get_or_init(|| instance))"));
    }

    #[test]
    fn test_go_style_descriptor_uses_method_names() {
        let out = raw(&logger_only());
        assert!(out.contains("fn Logger(&self) -> Arc<Logger> {"));
        assert!(out.contains("Arc::new(Logger::new())"));
    }

    #[test]
    fn test_arity_violation() {
        let descriptor = two_returns();
        let err = Generator::new()
            .generate(&descriptor, &descriptor.methods)
            .unwrap_err();
        assert!(matches!(err, GenerateError::ArityViolation { count: 2, .. }));
    }

    #[test]
    fn test_cycles_opt_in() {
        let descriptor = cyclic();
        let mut generator = Generator::new().with_options(GenerateOptions {
            detect_cycles: true,
        });
        assert!(generator.generate(&descriptor, &descriptor.methods).is_err());
        assert!(generator.raw().is_empty());
    }
}
