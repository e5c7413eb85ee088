use std::{
    io::{self, Write},
    path::{Path, PathBuf},
};

use clap::Args;
use dicon_codegen::{ContainerCodegen, GenerateOptions};
use dicon_core::{File, Overwrite, WriteResult};
use dicon_ir::InterfaceDescriptor;
use dicon_manifest::{Language, Manifest};
use eyre::{Context, Result};

use super::UnwrapOrExit;
use crate::language::LanguageSupport;

#[derive(Args)]
pub struct GenerateCommand {
    /// Path to dicon.toml (defaults to ./dicon.toml)
    #[arg(short, long, default_value = "dicon.toml")]
    pub config: PathBuf,

    /// Output file, or `-` for stdout (defaults to the manifest's output path)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Target language (overrides the manifest)
    #[arg(long)]
    pub language: Option<Language>,

    /// Skip normalization and emit the generator's raw text
    #[arg(long)]
    pub raw: bool,

    /// Preview generated code without writing to disk
    #[arg(long)]
    pub dry_run: bool,

    /// Fail on dependency cycles
    #[arg(long)]
    pub detect_cycles: bool,

    /// Overwrite the output file even if it was not generated by dicon
    #[arg(long)]
    pub force: bool,
}

/// Where the generated source goes.
#[derive(Debug, PartialEq, Eq)]
enum Target {
    Stdout,
    File(PathBuf),
}

impl GenerateCommand {
    /// Run the generate command
    pub fn run(&self) -> Result<()> {
        let manifest = Manifest::from_file(&self.config).unwrap_or_exit();
        let support = LanguageSupport::get(self.language.unwrap_or(manifest.language()));
        let options = GenerateOptions {
            detect_cycles: self.detect_cycles || manifest.output.detect_cycles,
        };
        let descriptor = manifest.descriptor();
        tracing::info!(
            config = %self.config.display(),
            language = %support.language(),
            methods = descriptor.methods.len(),
            "loaded manifest"
        );

        let mut generator = support.generator(options, &manifest.imports);
        generator
            .generate(&descriptor, &descriptor.methods)
            .unwrap_or_exit();

        let target = self.target(&manifest, generator.default_file_name());
        let path_hint = match &target {
            Target::Stdout => PathBuf::from(generator.default_file_name()),
            Target::File(path) => path.clone(),
        };
        let content = self.render(generator.as_ref(), &path_hint)?;

        match target {
            Target::Stdout => {
                io::stdout()
                    .write_all(content.as_bytes())
                    .wrap_err("Failed to write to stdout")?;
                Ok(())
            }
            Target::File(path) if self.dry_run => {
                self.run_preview(&path, &content, &descriptor);
                Ok(())
            }
            Target::File(path) => self.run_generation(path, content, &descriptor, &support),
        }
    }

    /// An explicit `-o` is taken as given; the manifest's path is relative to the manifest.
    fn target(&self, manifest: &Manifest, default_file_name: &str) -> Target {
        match &self.output {
            Some(path) if path.as_os_str() == "-" => Target::Stdout,
            Some(path) => Target::File(path.clone()),
            None => {
                let base = self.config.parent().unwrap_or(Path::new(""));
                let relative = manifest
                    .output
                    .path
                    .as_deref()
                    .unwrap_or(Path::new(default_file_name));
                Target::File(base.join(relative))
            }
        }
    }

    fn render(&self, generator: &dyn ContainerCodegen, path_hint: &Path) -> Result<String> {
        if self.raw {
            return Ok(generator.raw().to_string());
        }

        let mut buf = Vec::new();
        generator.out(&mut buf, path_hint).unwrap_or_exit();
        String::from_utf8(buf).wrap_err("Normalized source is not valid UTF-8")
    }

    fn run_generation(
        &self,
        path: PathBuf,
        content: String,
        descriptor: &InterfaceDescriptor,
        support: &LanguageSupport,
    ) -> Result<()> {
        let overwrite = if self.force {
            Overwrite::Always
        } else {
            Overwrite::IfGenerated
        };
        let file = File::new(path, content).overwrite(overwrite);

        let result = file
            .write()
            .wrap_err_with(|| format!("Failed to write {}", file.path().display()))?;
        if result == WriteResult::Skipped {
            eyre::bail!(
                "{} was not generated by dicon; pass --force to overwrite it",
                file.path().display()
            );
        }

        println!(
            "{} ({}, {})",
            descriptor.name,
            descriptor.package_name,
            support.language()
        );
        println!();
        println!("Accessors ({}):", descriptor.methods.len());
        Self::print_accessors(descriptor);
        println!();
        println!("Generated: {}", file.path().display());

        Ok(())
    }

    fn run_preview(&self, path: &Path, content: &str, descriptor: &InterfaceDescriptor) {
        println!("── {} ──", path.display());
        println!("{}", content);

        println!("── Summary ──");
        println!(
            "{} accessor{} would be generated",
            descriptor.methods.len(),
            if descriptor.methods.len() == 1 { "" } else { "s" }
        );
    }

    fn print_accessors(descriptor: &InterfaceDescriptor) {
        for method in &descriptor.methods {
            let args = method
                .argument_types
                .iter()
                .map(|t| t.ty.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            let returns = method
                .return_types
                .iter()
                .map(|t| t.ty.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            println!("  {}({}) -> {}", method.name, args, returns);
        }
    }
}
