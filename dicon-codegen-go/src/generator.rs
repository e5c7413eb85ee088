use dicon_codegen::{
    AccessorPlan, CodeBuilder, ContainerCodegen, ContainerPlan, Formatter, GenerateError,
    GenerateOptions, NamingConvention,
};
use dicon_core::GENERATED_HEADER;
use dicon_ir::{FactorySignature, InterfaceDescriptor};

use crate::{GO_NAMING, GoFormatter};

const POLLUTED_MESSAGE: &str = "cached instance is polluted";

/// Go container generator.
///
/// The emitted container caches one instance per accessor in a
/// `map[string]interface{}` keyed by the factory method name. The cache is
/// not synchronized: a container is meant to be driven from one goroutine.
#[derive(Debug, Clone)]
pub struct Generator {
    buf: CodeBuilder,
    options: GenerateOptions,
    formatter: GoFormatter,
}

impl Default for Generator {
    fn default() -> Self {
        Self {
            buf: CodeBuilder::go(),
            options: GenerateOptions::default(),
            formatter: GoFormatter::default(),
        }
    }
}

impl Generator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(mut self, options: GenerateOptions) -> Self {
        self.options = options;
        self
    }

    /// Register import paths for package qualifiers used by the generated code.
    pub fn with_imports<I, K, V>(mut self, imports: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.formatter = self.formatter.with_imports(imports);
        self
    }

    /// Skip `gofmt` when normalizing; see [`GoFormatter::without_gofmt`].
    pub fn without_gofmt(mut self) -> Self {
        self.formatter = self.formatter.without_gofmt();
        self
    }

    fn append_header(&mut self, plan: &ContainerPlan) {
        self.buf
            .push_line(GENERATED_HEADER)
            .push_blank()
            .push_line(&format!("package {}", plan.package_name))
            .push_blank()
            .push_line("import \"log\"")
            .push_blank();
    }

    fn append_struct_defs(&mut self, plan: &ContainerPlan) {
        let naming = &GO_NAMING;

        self.buf
            .push_block(&format!("type {} struct {{", naming.container_type), "}", |b| {
                b.push_line("store map[string]interface{}");
            })
            .push_blank()
            .push_block(
                &format!(
                    "func {}() {} {{",
                    naming.container_constructor, plan.interface_name
                ),
                "}",
                |b| {
                    b.push_block(&format!("return &{}{{", naming.container_type), "}", |b| {
                        b.push_line("store: map[string]interface{}{},");
                    });
                },
            );
    }

    fn append_method(&mut self, accessor: &AccessorPlan) {
        let key = quote(&accessor.cache_key);
        let args = (0..accessor.dependencies.len())
            .map(|i| format!("dep{}", i))
            .collect::<Vec<_>>()
            .join(", ");

        self.buf.push_blank().push_block(
            &format!(
                "func (d *{}) {}() {} {{",
                GO_NAMING.container_type, accessor.name, accessor.return_type
            ),
            "}",
            |b| {
                b.push_block(&format!("if i, ok := d.store[{}]; ok {{", key), "}", |b| {
                    b.push_block(
                        &format!("if instance, ok := i.({}); ok {{", accessor.return_type),
                        "}",
                        |b| {
                            b.push_line("return instance");
                        },
                    )
                    .push_line(&format!("log.Fatal({})", quote(POLLUTED_MESSAGE)));
                });

                for (i, dep) in accessor.dependencies.iter().enumerate() {
                    b.push_line(&format!("dep{} := d.{}()", i, dep));
                }

                b.push_line(&format!("instance := {}({})", accessor.constructor, args))
                    .push_line(&format!("d.store[{}] = instance", key))
                    .push_line("return instance");
            },
        );
    }

    /// Warn about package qualifiers the formatter has no import path for.
    fn check_qualifiers(&self, plan: &ContainerPlan) {
        let qualifier = GO_NAMING.qualifier(&plan.package_name);

        for accessor in &plan.accessors {
            for reference in [&accessor.return_type, &accessor.constructor] {
                let Some((package, _)) = reference.split_once(GO_NAMING.package_separator) else {
                    continue;
                };
                if !qualifier.prefix(package).is_empty() && !self.formatter.knows(package) {
                    tracing::warn!(
                        package,
                        accessor = %accessor.name,
                        "no import path configured for package qualifier"
                    );
                }
            }
        }
    }
}

impl ContainerCodegen for Generator {
    fn language(&self) -> &'static str {
        "go"
    }

    fn file_extension(&self) -> &'static str {
        "go"
    }

    fn default_file_name(&self) -> &'static str {
        "dicon_gen.go"
    }

    fn naming(&self) -> &'static NamingConvention {
        &GO_NAMING
    }

    fn generate(
        &mut self,
        descriptor: &InterfaceDescriptor,
        methods: &[FactorySignature],
    ) -> Result<&str, GenerateError> {
        let plan = ContainerPlan::build(descriptor, methods, &GO_NAMING, self.options)?;
        self.check_qualifiers(&plan);

        self.buf.clear();
        self.append_header(&plan);
        self.append_struct_defs(&plan);
        for accessor in &plan.accessors {
            self.append_method(accessor);
        }

        tracing::debug!(
            package = %plan.package_name,
            accessors = plan.accessors.len(),
            bytes = self.buf.as_str().len(),
            "generated go container"
        );
        Ok(self.buf.as_str())
    }

    fn raw(&self) -> &str {
        self.buf.as_str()
    }

    fn formatter(&self) -> &dyn Formatter {
        &self.formatter
    }
}

/// Interpreted Go string literal for `s`.
fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

#[cfg(test)]
mod tests {
    use dicon_codegen::testing::{cyclic, layered, logger_only, two_returns};
    use dicon_ir::TypeRef;

    use super::*;

    fn raw(descriptor: &InterfaceDescriptor) -> String {
        let mut generator = Generator::new();
        generator
            .generate(descriptor, &descriptor.methods)
            .unwrap()
            .to_string()
    }

    #[test]
    fn test_header_and_package_clause() {
        let out = raw(&logger_only());
        assert!(out.starts_with("// Code generated by \"dicon\"; DO NOT EDIT.\n\npackage app\n"));
        assert!(out.contains("import \"log\"\n"));
    }

    #[test]
    fn test_container_type_and_constructor() {
        let out = raw(&logger_only());
        assert!(out.contains("type dicontainer struct {\n\tstore map[string]interface{}\n}\n"));
        assert!(out.contains("func NewDIContainer() Container {\n\treturn &dicontainer{\n"));
    }

    #[test]
    fn test_accessor_body() {
        let out = raw(&logger_only());
        assert!(out.contains("func (d *dicontainer) Logger() Logger {\n"));
        assert!(out.contains("\tif i, ok := d.store[\"Logger\"]; ok {\n"));
        assert!(out.contains("\t\tif instance, ok := i.(Logger); ok {\n"));
        assert!(out.contains("\t\tlog.Fatal(\"cached instance is polluted\")\n"));
        assert!(out.contains("\tinstance := NewLogger()\n"));
        assert!(out.contains("\td.store[\"Logger\"] = instance\n"));
    }

    #[test]
    fn test_dependencies_in_argument_order() {
        let out = raw(&layered());
        let repo = out
            .split("func (d *dicontainer) Repository()")
            .nth(1)
            .unwrap();

        let dep0 = repo.find("dep0 := d.Logger()").unwrap();
        let dep1 = repo.find("dep1 := d.Config()").unwrap();
        assert!(dep0 < dep1);
        assert!(repo.contains("instance := infra.NewRepository(dep0, dep1)"));
    }

    #[test]
    fn test_cross_package_return_type_is_qualified() {
        let out = raw(&layered());
        assert!(out.contains("func (d *dicontainer) Repository() infra.Repository {"));
        assert!(out.contains("i.(infra.Repository)"));
    }

    #[test]
    fn test_type_assertion_uses_return_type() {
        let descriptor = InterfaceDescriptor::new("app", "Container").method(
            FactorySignature::new("MainLogger", "app").returns(TypeRef::new("Logger", "app")),
        );
        let out = raw(&descriptor);
        assert!(out.contains("func (d *dicontainer) MainLogger() Logger {"));
        assert!(out.contains("i.(Logger)"));
        assert!(out.contains("d.store[\"MainLogger\"]"));
    }

    #[test]
    fn test_no_methods_still_emits_container() {
        let out = raw(&InterfaceDescriptor::new("app", "Container"));
        assert!(out.contains("func NewDIContainer() Container {"));
        assert!(!out.contains("func (d *dicontainer)"));
    }

    #[test]
    fn test_arity_violation_emits_nothing() {
        let mut generator = Generator::new();
        generator
            .generate(&logger_only(), &logger_only().methods)
            .unwrap();

        let descriptor = two_returns();
        let err = generator
            .generate(&descriptor, &descriptor.methods)
            .unwrap_err();

        assert!(matches!(err, GenerateError::ArityViolation { count: 2, .. }));
        // The previous buffer survives a rejected descriptor.
        assert!(generator.raw().contains("func (d *dicontainer) Logger()"));
    }

    #[test]
    fn test_generate_is_idempotent() {
        let descriptor = layered();
        let mut generator = Generator::new();
        let first = generator
            .generate(&descriptor, &descriptor.methods)
            .unwrap()
            .to_string();
        let second = generator
            .generate(&descriptor, &descriptor.methods)
            .unwrap()
            .to_string();
        assert_eq!(first, second);
    }

    #[test]
    fn test_cycle_detection_is_opt_in() {
        let descriptor = cyclic();
        assert!(Generator::new().generate(&descriptor, &descriptor.methods).is_ok());

        let mut generator = Generator::new().with_options(GenerateOptions {
            detect_cycles: true,
        });
        assert!(matches!(
            generator.generate(&descriptor, &descriptor.methods),
            Err(GenerateError::CyclicDependency { .. })
        ));
    }

    #[test]
    fn test_quote_escapes() {
        assert_eq!(quote("a\"b\\c"), "\"a\\\"b\\\\c\"");
    }
}
