//! The interface descriptor model.

use serde::{Deserialize, Serialize};

/// Description of one interface whose methods are factory accessors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterfaceDescriptor {
    /// Package (or module path) the interface and the generated container live in.
    pub package_name: String,
    /// Interface name; the generated constructor returns this type.
    pub name: String,
    /// Factory methods in declaration order.
    #[serde(default)]
    pub methods: Vec<FactorySignature>,
}

impl InterfaceDescriptor {
    pub fn new(package_name: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            package_name: package_name.into(),
            name: name.into(),
            methods: Vec::new(),
        }
    }

    pub fn method(mut self, method: FactorySignature) -> Self {
        self.methods.push(method);
        self
    }

    /// Look up a factory method by name.
    pub fn find_method(&self, name: &str) -> Option<&FactorySignature> {
        self.methods.iter().find(|m| m.name == name)
    }
}

/// One factory method: a single constructible dependency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FactorySignature {
    /// Accessor name, also the cache key.
    pub name: String,
    /// Origin package of the constructed type; qualifies the constructor call.
    pub package_name: String,
    /// Dependencies, resolved and passed positionally in this order.
    #[serde(default)]
    pub argument_types: Vec<TypeRef>,
    /// Must hold exactly one element when generating.
    #[serde(default)]
    pub return_types: Vec<TypeRef>,
}

impl FactorySignature {
    pub fn new(name: impl Into<String>, package_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            package_name: package_name.into(),
            argument_types: Vec::new(),
            return_types: Vec::new(),
        }
    }

    pub fn arg(mut self, ty: TypeRef) -> Self {
        self.argument_types.push(ty);
        self
    }

    pub fn returns(mut self, ty: TypeRef) -> Self {
        self.return_types.push(ty);
        self
    }

    /// The single return type, if the signature is well-formed.
    pub fn single_return(&self) -> Option<&TypeRef> {
        match self.return_types.as_slice() {
            [ty] => Some(ty),
            _ => None,
        }
    }
}

/// A reference to a named type and the package that declares it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeRef {
    #[serde(rename = "type")]
    pub ty: String,
    pub package_name: String,
}

impl TypeRef {
    pub fn new(ty: impl Into<String>, package_name: impl Into<String>) -> Self {
        Self {
            ty: ty.into(),
            package_name: package_name.into(),
        }
    }
}
