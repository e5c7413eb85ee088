//! Naming conventions of the generated container API.

use crate::plan::Qualifier;

/// Language-specific naming contract.
///
/// The container type and constructor names are fixed; accessor and
/// constructor names for a dependency are derived from its type name.
#[derive(Debug, Clone, Copy)]
pub struct NamingConvention {
    /// Name of the concrete container type (e.g. `dicontainer`).
    pub container_type: &'static str,
    /// Name of the function returning a fresh container (e.g. `NewDIContainer`).
    pub container_constructor: &'static str,
    /// Separator between a package qualifier and a name (`.` or `::`).
    pub package_separator: &'static str,
    /// Accessor that resolves a dependency of the given type (e.g. "Logger" -> "logger").
    pub type_to_accessor: fn(&str) -> String,
    /// User constructor for the given type (e.g. "Logger" -> "NewLogger").
    pub type_to_constructor: fn(&str) -> String,
    /// Words that cannot be used as identifiers.
    pub reserved_words: &'static [&'static str],
    /// Escape a reserved word (e.g. "type" -> "r#type" in Rust).
    pub escape_reserved: fn(&str) -> String,
}

impl NamingConvention {
    /// Check if a name is a reserved word.
    pub fn is_reserved(&self, name: &str) -> bool {
        self.reserved_words.contains(&name)
    }

    /// Get a safe name, escaping if necessary.
    pub fn safe_name(&self, name: &str) -> String {
        if self.is_reserved(name) {
            (self.escape_reserved)(name)
        } else {
            name.to_string()
        }
    }

    /// Accessor method name for a factory method name.
    pub fn accessor_name(&self, method: &str) -> String {
        self.safe_name(method)
    }

    /// Accessor method name that resolves a dependency of type `ty`.
    pub fn accessor_for_type(&self, ty: &str) -> String {
        self.safe_name(&(self.type_to_accessor)(ty))
    }

    /// Unqualified constructor name for type `ty`.
    pub fn constructor_for_type(&self, ty: &str) -> String {
        (self.type_to_constructor)(ty)
    }

    /// Qualifier for a container living in `own_package`.
    pub fn qualifier<'a>(&self, own_package: &'a str) -> Qualifier<'a> {
        Qualifier::new(own_package, self.package_separator)
    }
}
