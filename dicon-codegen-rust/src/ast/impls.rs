//! Rust impl block builder.

use dicon_codegen::CodeBuilder;

use super::Fn;

/// Builder for inherent and trait impl blocks.
#[derive(Debug, Clone)]
pub struct Impl {
    type_name: String,
    trait_name: Option<String>,
    methods: Vec<Fn>,
}

impl Impl {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            trait_name: None,
            methods: Vec::new(),
        }
    }

    /// Implement `trait_name` for the type.
    pub fn for_trait(mut self, trait_name: impl Into<String>) -> Self {
        self.trait_name = Some(trait_name.into());
        self
    }

    pub fn method(mut self, method: Fn) -> Self {
        self.methods.push(method);
        self
    }

    pub fn render(&self, builder: CodeBuilder) -> CodeBuilder {
        let header = match &self.trait_name {
            Some(trait_name) => format!("impl {} for {}", trait_name, self.type_name),
            None => format!("impl {}", self.type_name),
        };
        if self.methods.is_empty() {
            return builder.line(&format!("{} {{}}", header));
        }

        self.methods
            .iter()
            .enumerate()
            .fold(builder.line(&format!("{} {{", header)).indent(), |b, (i, m)| {
                m.render(if i > 0 { b.blank() } else { b })
            })
            .dedent()
            .line("}")
    }

    pub fn build(&self) -> String {
        self.render(CodeBuilder::rust()).build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Param;

    #[test]
    fn test_empty_trait_impl() {
        let i = Impl::new("DiContainer").for_trait("Container").build();
        assert_eq!(i, "impl Container for DiContainer {}\n");
    }

    #[test]
    fn test_methods_separated_by_blank_line() {
        let i = Impl::new("DiContainer")
            .method(Fn::new("a").param(Param::self_ref()))
            .method(Fn::new("b").param(Param::self_ref()))
            .build();

        assert_eq!(
            i,
            "impl DiContainer {\n    fn a(&self) {\n    }\n\n    fn b(&self) {\n    }\n}\n"
        );
    }
}
