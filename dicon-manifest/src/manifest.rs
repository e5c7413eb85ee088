use std::{
    collections::HashSet,
    path::{Path, PathBuf},
    str::FromStr,
};

use dicon_ir::{FactorySignature, InterfaceDescriptor, TypeRef};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::{
    Error, Language, Result, SourceContext,
    validate::{ParseContext, find_key_spans},
};

/// Root of a `dicon.toml` (or `dicon.json`) manifest.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    /// The interface the generated container implements.
    pub interface: InterfaceConfig,

    #[serde(default)]
    pub output: OutputConfig,

    /// Go package qualifier -> import path, for packages the formatter cannot
    /// resolve on its own.
    #[serde(default)]
    pub imports: IndexMap<String, String>,

    /// Factory methods, in declaration order.
    #[serde(default)]
    pub methods: Vec<MethodEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct InterfaceConfig {
    pub name: String,
    /// Go package or Rust module path of the interface and the generated file.
    pub package: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    #[serde(default)]
    pub language: Language,

    /// Output file, relative to the manifest. Defaults to the generator's file name.
    #[serde(default)]
    pub path: Option<PathBuf>,

    #[serde(default)]
    pub detect_cycles: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct MethodEntry {
    pub name: String,

    /// Package declaring the constructor; defaults to the first return type's package.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package: Option<String>,

    #[serde(default)]
    pub args: Vec<TypeEntry>,

    /// Exactly one entry is expected; other counts are reported by the generator.
    #[serde(default)]
    pub returns: Vec<TypeEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TypeEntry {
    #[serde(rename = "type")]
    pub ty: String,

    /// Defaults to the interface package; `""` marks a predeclared type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package: Option<String>,
}

impl FromStr for Manifest {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_toml(s, "dicon.toml")
    }
}

impl Manifest {
    /// Load a manifest; `.json` files are read as JSON, anything else as TOML.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Box::new(Error::Io {
                path: path.to_path_buf(),
                source: e,
            })
        })?;

        let filename = path.display().to_string();
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json(&content, &filename),
            _ => Self::from_toml(&content, &filename),
        }
    }

    /// Parse TOML content, naming it `filename` in diagnostics.
    pub fn from_toml(content: &str, filename: &str) -> Result<Self> {
        let source = SourceContext::new(content, filename);
        let manifest: Self = toml::from_str(content).map_err(|e| source.toml_error(e))?;
        manifest.validate(&source)?;
        Ok(manifest)
    }

    /// Parse JSON content, naming it `filename` in diagnostics.
    pub fn from_json(content: &str, filename: &str) -> Result<Self> {
        let source = SourceContext::new(content, filename);
        let manifest: Self = serde_json::from_str(content).map_err(|e| source.json_error(e))?;
        manifest.validate(&source)?;
        Ok(manifest)
    }

    pub fn language(&self) -> Language {
        self.output.language
    }

    /// Lower to the descriptor the generators consume.
    pub fn descriptor(&self) -> InterfaceDescriptor {
        let own = &self.interface.package;
        let type_ref = |entry: &TypeEntry| {
            TypeRef::new(&entry.ty, entry.package.as_deref().unwrap_or(own.as_str()))
        };

        self.methods.iter().fold(
            InterfaceDescriptor::new(own, &self.interface.name),
            |descriptor, method| {
                let returns: Vec<TypeRef> = method.returns.iter().map(type_ref).collect();
                let package = match (&method.package, returns.first()) {
                    (Some(package), _) => package.clone(),
                    (None, Some(ret)) => ret.package_name.clone(),
                    (None, None) => own.clone(),
                };

                let signature = method.args.iter().map(type_ref).fold(
                    FactorySignature::new(&method.name, package),
                    FactorySignature::arg,
                );
                descriptor.method(returns.into_iter().fold(signature, FactorySignature::returns))
            },
        )
    }

    fn validate(&self, source: &SourceContext) -> Result<()> {
        let ctx = ParseContext::new(source, self.output.language);

        let interface = ctx.push("interface");
        interface.validate_name(&self.interface.name, "interface name")?;
        interface.validate_package(&self.interface.package, "interface package")?;

        let imports = ctx.push("imports");
        for (qualifier, path) in &self.imports {
            imports.validate_name(qualifier, "import qualifier")?;
            if path.trim().is_empty() {
                return Err(source.validation_error(
                    format!("import path for '{}' cannot be empty", qualifier),
                    ctx.find_span(qualifier),
                ));
            }
        }

        let mut seen = HashSet::new();
        let methods = ctx.push("methods");
        for method in &self.methods {
            methods.validate_name(&method.name, "method name")?;

            if !seen.insert(method.name.as_str()) {
                let spans = find_key_spans(source.src(), "name", &method.name);
                let (first, second) = match spans.as_slice() {
                    [first, second, ..] => (*first, *second),
                    _ => {
                        return Err(source.validation_error(
                            format!("duplicate factory method '{}'", method.name),
                            None,
                        ));
                    }
                };
                return Err(source.duplicate_method_error(&method.name, first, second));
            }

            let method_ctx = methods.push(&method.name);
            if let Some(package) = &method.package {
                method_ctx.validate_package(package, "method package")?;
            }
            for (kind, entries) in [("argument type", &method.args), ("return type", &method.returns)] {
                for entry in entries {
                    method_ctx.validate_name(&entry.ty, kind)?;
                    if let Some(package) = entry.package.as_deref().filter(|p| !p.is_empty()) {
                        method_ctx.validate_package(package, kind)?;
                    }
                }
            }
        }

        Ok(())
    }
}
