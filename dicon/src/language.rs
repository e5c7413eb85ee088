//! Unified language dispatch.
//!
//! Centralizes backend selection so commands only deal with [`Language`].

use dicon_codegen::{ContainerCodegen, Formatter, GenerateOptions, NamingConvention};
use dicon_codegen_go::{GO_NAMING, GoFormatter, Generator as GoGenerator};
use dicon_codegen_rust::{Generator as RustGenerator, RUST_NAMING, RustFormatter};
use dicon_manifest::Language;
use indexmap::IndexMap;

/// Backend selection for a target language.
pub struct LanguageSupport {
    language: Language,
}

impl LanguageSupport {
    pub fn get(language: Language) -> Self {
        Self { language }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn naming(&self) -> &'static NamingConvention {
        match self.language {
            Language::Go => &GO_NAMING,
            Language::Rust => &RUST_NAMING,
        }
    }

    /// Create a generator. `imports` only matters for Go.
    pub fn generator(
        &self,
        options: GenerateOptions,
        imports: &IndexMap<String, String>,
    ) -> Box<dyn ContainerCodegen> {
        match self.language {
            Language::Go => Box::new(
                GoGenerator::new()
                    .with_options(options)
                    .with_imports(imports.clone()),
            ),
            Language::Rust => Box::new(RustGenerator::new().with_options(options)),
        }
    }

    /// Standalone normalizer, for files not produced in this run.
    pub fn formatter(&self, imports: &IndexMap<String, String>) -> Box<dyn Formatter> {
        match self.language {
            Language::Go => Box::new(GoFormatter::new().with_imports(imports.clone())),
            Language::Rust => Box::new(RustFormatter),
        }
    }
}
