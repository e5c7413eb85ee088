use dicon_codegen::CodeBuilder;

/// A single-name `use` declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Use {
    path: String,
}

impl Use {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    pub fn render(&self, builder: CodeBuilder) -> CodeBuilder {
        builder.line(&format!("use {};", self.path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_use() {
        let code = Use::new("std::sync::Arc").render(CodeBuilder::rust()).build();
        assert_eq!(code, "use std::sync::Arc;\n");
    }
}
