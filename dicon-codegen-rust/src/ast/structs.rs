//! Rust struct builder.

use dicon_codegen::CodeBuilder;

use super::Visibility;

/// A named field.
#[derive(Debug, Clone)]
pub struct Field {
    pub name: String,
    pub ty: String,
    pub vis: Visibility,
}

impl Field {
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            vis: Visibility::Private,
        }
    }

    pub fn vis(mut self, vis: Visibility) -> Self {
        self.vis = vis;
        self
    }
}

/// Builder for structs with named fields.
#[derive(Debug, Clone)]
pub struct Struct {
    name: String,
    doc: Option<String>,
    derives: Vec<String>,
    fields: Vec<Field>,
    vis: Visibility,
}

impl Struct {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            doc: None,
            derives: Vec::new(),
            fields: Vec::new(),
            vis: Visibility::Private,
        }
    }

    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    pub fn derive(mut self, derive: impl Into<String>) -> Self {
        self.derives.push(derive.into());
        self
    }

    pub fn field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    pub fn vis(mut self, vis: Visibility) -> Self {
        self.vis = vis;
        self
    }

    pub fn render(&self, builder: CodeBuilder) -> CodeBuilder {
        let mut builder = match &self.doc {
            Some(doc) => builder.rust_doc(doc),
            None => builder,
        };
        if !self.derives.is_empty() {
            builder = builder.line(&format!("#[derive({})]", self.derives.join(", ")));
        }

        let head = format!("{}struct {}", self.vis.prefix(), self.name);
        if self.fields.is_empty() {
            return builder.line(&format!("{} {{}}", head));
        }

        self.fields
            .iter()
            .fold(builder.line(&format!("{} {{", head)).indent(), |b, f| {
                b.line(&format!("{}{}: {},", f.vis.prefix(), f.name, f.ty))
            })
            .dedent()
            .line("}")
    }

    pub fn build(&self) -> String {
        self.render(CodeBuilder::rust()).build()
    }
}
