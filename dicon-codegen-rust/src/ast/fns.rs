//! Rust function builder.

use dicon_codegen::CodeBuilder;

use super::Visibility;

/// A function parameter. An empty type renders the name alone (`&self`).
#[derive(Debug, Clone)]
pub struct Param {
    pub name: String,
    pub ty: String,
}

impl Param {
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
        }
    }

    /// `&self`
    pub fn self_ref() -> Self {
        Self::new("&self", "")
    }

    fn render(&self) -> String {
        if self.ty.is_empty() {
            self.name.clone()
        } else {
            format!("{}: {}", self.name, self.ty)
        }
    }
}

/// A statement in a function body.
#[derive(Debug, Clone)]
pub enum Stmt {
    Line(String),
    /// `header {` body `}`
    Block { header: String, body: Vec<Stmt> },
}

impl Stmt {
    pub fn line(s: impl Into<String>) -> Self {
        Stmt::Line(s.into())
    }

    pub fn block(header: impl Into<String>, body: Vec<Stmt>) -> Self {
        Stmt::Block {
            header: header.into(),
            body,
        }
    }

    fn render(&self, builder: CodeBuilder) -> CodeBuilder {
        match self {
            Stmt::Line(line) => builder.line(line),
            Stmt::Block { header, body } => body
                .iter()
                .fold(builder.line(&format!("{} {{", header)).indent(), |b, s| {
                    s.render(b)
                })
                .dedent()
                .line("}"),
        }
    }
}

/// Builder for free functions and methods.
#[derive(Debug, Clone)]
pub struct Fn {
    name: String,
    doc: Option<String>,
    vis: Visibility,
    params: Vec<Param>,
    return_type: Option<String>,
    body: Vec<Stmt>,
}

impl Fn {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            doc: None,
            vis: Visibility::Private,
            params: Vec::new(),
            return_type: None,
            body: Vec::new(),
        }
    }

    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    pub fn vis(mut self, vis: Visibility) -> Self {
        self.vis = vis;
        self
    }

    pub fn param(mut self, param: Param) -> Self {
        self.params.push(param);
        self
    }

    pub fn returns(mut self, ty: impl Into<String>) -> Self {
        self.return_type = Some(ty.into());
        self
    }

    pub fn stmt(mut self, stmt: Stmt) -> Self {
        self.body.push(stmt);
        self
    }

    pub fn stmts(mut self, stmts: impl IntoIterator<Item = Stmt>) -> Self {
        self.body.extend(stmts);
        self
    }

    /// Add a line to the function body.
    pub fn body_line(self, line: impl Into<String>) -> Self {
        self.stmt(Stmt::line(line))
    }

    pub fn render(&self, builder: CodeBuilder) -> CodeBuilder {
        let builder = match &self.doc {
            Some(doc) => builder.rust_doc(doc),
            None => builder,
        };

        let params = self
            .params
            .iter()
            .map(Param::render)
            .collect::<Vec<_>>()
            .join(", ");
        let ret = self
            .return_type
            .as_ref()
            .map(|r| format!(" -> {}", r))
            .unwrap_or_default();
        let signature = format!("{}fn {}({}){} {{", self.vis.prefix(), self.name, params, ret);

        self.body
            .iter()
            .fold(builder.line(&signature).indent(), |b, s| s.render(b))
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

    #[test]
    fn test_simple_fn() {
        assert_eq!(Fn::new("run").build(), "fn run() {\n}\n");
    }

    #[test]
    fn test_public_fn_with_return() {
        let f = Fn::new("new_di_container")
            .vis(Visibility::Public)
            .returns("impl Container")
            .body_line("DiContainer::default()")
            .build();
        assert_eq!(
            f,
            "pub fn new_di_container() -> impl Container {\n    DiContainer::default()\n}\n"
        );
    }

    #[test]
    fn test_method_with_nested_block() {
        let f = Fn::new("logger")
            .param(Param::self_ref())
            .returns("Arc<Logger>")
            .stmt(Stmt::block(
                "if let Some(instance) = self.logger.get()",
                vec![Stmt::line("return Arc::clone(instance);")],
            ))
            .body_line("todo()")
            .build();

        assert_eq!(
            f,
            "fn logger(&self) -> Arc<Logger> {\n    if let Some(instance) = self.logger.get() {\n        return Arc::clone(instance);\n    }\n    todo()\n}\n"
        );
    }

    #[test]
    fn test_params() {
        let f = Fn::new("add")
            .param(Param::new("a", "i32"))
            .param(Param::new("b", "i32"))
            .build();
        assert!(f.starts_with("fn add(a: i32, b: i32) {"));
    }

    #[test]
    fn test_doc() {
        let f = Fn::new("run").doc("Runs").build();
        assert!(f.starts_with("/// Runs\n"));
    }
}
