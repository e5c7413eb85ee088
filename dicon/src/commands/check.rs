use std::collections::BTreeSet;
use std::path::PathBuf;

use clap::Args;
use dicon_codegen::{Diagnostic, analyze};
use dicon_codegen_go::GoFormatter;
use dicon_ir::InterfaceDescriptor;
use dicon_manifest::{Language, Manifest};
use eyre::{Context, Result};
use indexmap::IndexMap;

use super::UnwrapOrExit;
use crate::language::LanguageSupport;

#[derive(Args)]
pub struct CheckCommand {
    /// Path to dicon.toml (defaults to ./dicon.toml)
    #[arg(short, long, default_value = "dicon.toml")]
    pub config: PathBuf,

    /// Target language (overrides the manifest)
    #[arg(long)]
    pub language: Option<Language>,

    /// Print diagnostics as JSON
    #[arg(long)]
    pub json: bool,
}

impl CheckCommand {
    /// Run the check command
    pub fn run(&self) -> Result<()> {
        let manifest = Manifest::from_file(&self.config).unwrap_or_exit();
        let diagnostics = self.diagnostics(&manifest);
        let has_errors = diagnostics.iter().any(|d| d.severity.is_error());

        if self.json {
            let json = serde_json::to_string_pretty(&diagnostics)
                .wrap_err("Failed to serialize diagnostics")?;
            println!("{}", json);
        } else {
            self.print_report(&manifest, &diagnostics, has_errors);
        }

        if has_errors {
            std::process::exit(1);
        }
        Ok(())
    }

    fn diagnostics(&self, manifest: &Manifest) -> Vec<Diagnostic> {
        let support = LanguageSupport::get(self.language.unwrap_or(manifest.language()));
        let descriptor = manifest.descriptor();
        let mut diagnostics = analyze(&descriptor, support.naming());

        if support.language() == Language::Go {
            diagnostics.extend(unknown_imports(&descriptor, &manifest.imports));
        }
        diagnostics
    }

    fn print_report(&self, manifest: &Manifest, diagnostics: &[Diagnostic], has_errors: bool) {
        for diag in diagnostics {
            eprintln!("{}[{}]: {}", diag.severity, diag.code, diag.message);
            if let Some(loc) = &diag.location {
                eprintln!("  --> {}", loc);
            }
        }

        if has_errors {
            return;
        }
        if !diagnostics.is_empty() {
            println!();
        }

        println!("✓ {} is valid\n", self.config.display());
        println!(
            "  {} ({}, {})",
            manifest.interface.name,
            manifest.interface.package,
            self.language.unwrap_or(manifest.language())
        );

        let count = manifest.methods.len();
        println!(
            "  {} factory method{}:",
            count,
            if count == 1 { "" } else { "s" }
        );
        for method in &manifest.methods {
            let returns = method
                .returns
                .iter()
                .map(|r| r.ty.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            println!("    {} -> {}", method.name, returns);
        }
    }
}

/// Packages referenced by the Go container that no import can be added for.
///
/// Only the standard library and the manifest's `[imports]` table are known
/// to the normalizer; anything else would leave the generated file uncompilable.
fn unknown_imports(
    descriptor: &InterfaceDescriptor,
    imports: &IndexMap<String, String>,
) -> Vec<Diagnostic> {
    let formatter = GoFormatter::new().with_imports(imports.clone());
    let mut diagnostics = Vec::new();

    for method in &descriptor.methods {
        let packages: BTreeSet<&str> = std::iter::once(method.package_name.as_str())
            .chain(method.return_types.iter().map(|t| t.package_name.as_str()))
            .filter(|p| !p.is_empty() && *p != descriptor.package_name)
            .collect();

        for package in packages.into_iter().filter(|p| !formatter.knows(p)) {
            diagnostics.push(
                Diagnostic::warning(
                    "unknown-import",
                    format!(
                        "No import path for package '{}' used by {}; add it to [imports]",
                        package, method.name
                    ),
                )
                .at(format!("methods.{}", method.name)),
            );
        }
    }
    diagnostics
}
