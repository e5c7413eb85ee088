use std::path::PathBuf;

use clap::Args;
use dicon_manifest::{Language, Manifest};
use eyre::{Context, Result, eyre};
use indexmap::IndexMap;

use super::UnwrapOrExit;
use crate::language::LanguageSupport;

#[derive(Args)]
pub struct FmtCommand {
    /// Go or Rust source file to normalize
    pub file: PathBuf,

    /// Source language (defaults to the file extension)
    #[arg(long)]
    pub language: Option<Language>,

    /// Manifest whose [imports] table resolves Go package qualifiers
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Check if file is normalized without making changes (exit 1 if not)
    #[arg(long)]
    pub check: bool,
}

impl FmtCommand {
    pub fn run(&self) -> Result<()> {
        let language = self.language()?;
        let imports = match &self.config {
            Some(config) => Manifest::from_file(config).unwrap_or_exit().imports,
            None => IndexMap::new(),
        };

        let content = std::fs::read_to_string(&self.file)
            .wrap_err_with(|| format!("Failed to read {}", self.file.display()))?;
        let formatted = LanguageSupport::get(language)
            .formatter(&imports)
            .normalize(&content, &self.file)
            .unwrap_or_exit();

        if self.check {
            if content != formatted {
                eprintln!("error: {} is not formatted", self.file.display());
                eprintln!("Run `dicon fmt {}` to fix.", self.file.display());
                std::process::exit(1);
            }
            println!("{} is formatted", self.file.display());
        } else if content == formatted {
            println!("{} is already formatted", self.file.display());
        } else {
            std::fs::write(&self.file, &formatted)
                .wrap_err_with(|| format!("Failed to write {}", self.file.display()))?;
            println!("Formatted {}", self.file.display());
        }

        Ok(())
    }

    fn language(&self) -> Result<Language> {
        if let Some(language) = self.language {
            return Ok(language);
        }
        self.file
            .extension()
            .and_then(|e| e.to_str())
            .and_then(Language::from_extension)
            .ok_or_else(|| {
                eyre!(
                    "Cannot infer the language of {}; pass --language",
                    self.file.display()
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use dicon_codegen::testing::tool_available;
    use tempfile::TempDir;

    use super::*;

    fn fmt(file: PathBuf) -> FmtCommand {
        FmtCommand {
            file,
            language: None,
            config: None,
            check: false,
        }
    }

    #[test]
    fn test_language_from_extension() {
        assert_eq!(fmt("gen.go".into()).language().unwrap(), Language::Go);
        assert_eq!(fmt("src/gen.rs".into()).language().unwrap(), Language::Rust);
        assert!(fmt("gen.txt".into()).language().is_err());

        let mut cmd = fmt("gen.txt".into());
        cmd.language = Some(Language::Go);
        assert_eq!(cmd.language().unwrap(), Language::Go);
    }

    #[test]
    fn test_rewrites_go_file() {
        if !tool_available("gofmt") {
            eprintln!("gofmt not found, skipping");
            return;
        }
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("gen.go");
        fs::write(&path, "package app\nimport \"log\"\nfunc f() {\nlog.Print()\n}\n").unwrap();

        fmt(path.clone()).run().unwrap();
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "package app\n\nimport \"log\"\n\nfunc f() {\n\tlog.Print()\n}\n"
        );
    }

    #[test]
    fn test_manifest_imports_are_used() {
        if !tool_available("gofmt") {
            eprintln!("gofmt not found, skipping");
            return;
        }
        let dir = TempDir::new().unwrap();
        let config = dir.path().join("dicon.toml");
        fs::write(
            &config,
            "[interface]\nname = \"Container\"\npackage = \"app\"\n\n[imports]\ninfra = \"example.com/infra\"\n",
        )
        .unwrap();
        let path = dir.path().join("gen.go");
        fs::write(&path, "package app\n\nvar x = infra.New()\n").unwrap();

        let mut cmd = fmt(path.clone());
        cmd.config = Some(config);
        cmd.run().unwrap();
        assert!(fs::read_to_string(&path).unwrap().contains("import \"example.com/infra\"\n"));
    }
}
