//! Descriptor fixtures and compile checkers for generator tests.
//!
//! This module is only available when the `testing` feature is enabled
//! or during tests.

use std::{
    path::Path,
    process::{Command, Stdio},
};

use dicon_ir::{FactorySignature, InterfaceDescriptor, TypeRef};
use eyre::{Result, eyre};

use crate::NamingConvention;

fn identity(s: &str) -> String {
    s.to_string()
}

fn go_constructor(s: &str) -> String {
    format!("New{}", s)
}

/// Go-shaped naming for tests that cannot depend on a backend crate.
pub const GO_TEST_NAMING: NamingConvention = NamingConvention {
    container_type: "dicontainer",
    container_constructor: "NewDIContainer",
    package_separator: ".",
    type_to_accessor: identity,
    type_to_constructor: go_constructor,
    reserved_words: &["func", "type"],
    escape_reserved: identity,
};

/// `Container` in package `app` with a single dependency-free `Logger()`.
pub fn logger_only() -> InterfaceDescriptor {
    InterfaceDescriptor::new("app", "Container")
        .method(FactorySignature::new("Logger", "app").returns(TypeRef::new("Logger", "app")))
}

/// Four accessors across two packages:
/// `Config`, `Logger(Config)`, `infra.Repository(Logger, Config)`,
/// `Service(Repository, Logger)`.
pub fn layered() -> InterfaceDescriptor {
    InterfaceDescriptor::new("app", "Container")
        .method(FactorySignature::new("Config", "app").returns(TypeRef::new("Config", "app")))
        .method(
            FactorySignature::new("Logger", "app")
                .arg(TypeRef::new("Config", "app"))
                .returns(TypeRef::new("Logger", "app")),
        )
        .method(
            FactorySignature::new("Repository", "infra")
                .arg(TypeRef::new("Logger", "app"))
                .arg(TypeRef::new("Config", "app"))
                .returns(TypeRef::new("Repository", "infra")),
        )
        .method(
            FactorySignature::new("Service", "app")
                .arg(TypeRef::new("Repository", "infra"))
                .arg(TypeRef::new("Logger", "app"))
                .returns(TypeRef::new("Service", "app")),
        )
}

/// Same shape as [`layered`] with Rust module paths and snake_case accessors.
pub fn rust_layered() -> InterfaceDescriptor {
    InterfaceDescriptor::new("crate::app", "Container")
        .method(
            FactorySignature::new("config", "crate::app")
                .returns(TypeRef::new("Config", "crate::app")),
        )
        .method(
            FactorySignature::new("logger", "crate::app")
                .arg(TypeRef::new("Config", "crate::app"))
                .returns(TypeRef::new("Logger", "crate::app")),
        )
        .method(
            FactorySignature::new("repository", "crate::infra")
                .arg(TypeRef::new("Logger", "crate::app"))
                .arg(TypeRef::new("Config", "crate::app"))
                .returns(TypeRef::new("Repository", "crate::infra")),
        )
        .method(
            FactorySignature::new("service", "crate::app")
                .arg(TypeRef::new("Repository", "crate::infra"))
                .arg(TypeRef::new("Logger", "crate::app"))
                .returns(TypeRef::new("Service", "crate::app")),
        )
}

/// `Logger` declaring two return types.
pub fn two_returns() -> InterfaceDescriptor {
    InterfaceDescriptor::new("app", "Container").method(
        FactorySignature::new("Logger", "app")
            .returns(TypeRef::new("Logger", "app"))
            .returns(TypeRef::new("error", "")),
    )
}

/// `A(B)` and `B(A)`.
pub fn cyclic() -> InterfaceDescriptor {
    InterfaceDescriptor::new("app", "Container")
        .method(
            FactorySignature::new("A", "app")
                .arg(TypeRef::new("B", "app"))
                .returns(TypeRef::new("A", "app")),
        )
        .method(
            FactorySignature::new("B", "app")
                .arg(TypeRef::new("A", "app"))
                .returns(TypeRef::new("B", "app")),
        )
}

/// Error from compile checking.
#[derive(Debug)]
pub struct CompileError {
    pub message: String,
    pub output: String,
}

impl std::fmt::Display for CompileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}\n\nOutput:\n{}", self.message, self.output)
    }
}

impl std::error::Error for CompileError {}

/// Builds and runs a project holding generated code.
pub trait CompileChecker {
    /// Toolchain program the checker drives.
    fn program(&self) -> &'static str;

    /// Check that the project in `dir` compiles.
    fn check(&self, dir: &Path) -> Result<(), CompileError>;

    /// Build and run the project in `dir`, returning its stdout.
    fn run(&self, dir: &Path) -> Result<String, CompileError>;
}

/// Rust checker using `cargo check` and `cargo run`.
pub struct RustChecker;

impl CompileChecker for RustChecker {
    fn program(&self) -> &'static str {
        "cargo"
    }

    fn check(&self, dir: &Path) -> Result<(), CompileError> {
        invoke("cargo", &["check", "--quiet", "--message-format=short"], dir).map(drop)
    }

    fn run(&self, dir: &Path) -> Result<String, CompileError> {
        invoke("cargo", &["run", "--quiet"], dir)
    }
}

/// Go checker using `go build` and `go run`.
pub struct GoChecker;

impl CompileChecker for GoChecker {
    fn program(&self) -> &'static str {
        "go"
    }

    fn check(&self, dir: &Path) -> Result<(), CompileError> {
        invoke("go", &["build", "./..."], dir).map(drop)
    }

    fn run(&self, dir: &Path) -> Result<String, CompileError> {
        invoke("go", &["run", "."], dir)
    }
}

fn invoke(program: &str, args: &[&str], dir: &Path) -> Result<String, CompileError> {
    let command = format!("{} {}", program, args.join(" "));
    let output = Command::new(program)
        .args(args)
        .current_dir(dir)
        .output()
        .map_err(|e| CompileError {
            message: format!("Failed to run {}: {}", command, e),
            output: String::new(),
        })?;

    let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
    if output.status.success() {
        Ok(stdout)
    } else {
        let stderr = String::from_utf8_lossy(&output.stderr);
        Err(CompileError {
            message: format!("{} failed", command),
            output: format!("stderr:\n{}\n\nstdout:\n{}", stderr, stdout),
        })
    }
}

/// True when `program` can be spawned.
pub fn tool_available(program: &str) -> bool {
    Command::new(program)
        .arg("--help")
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .is_ok()
}

/// Write `files` into a temporary project, then check and run it with `checker`.
///
/// Returns the program's stdout. The project is removed afterwards.
pub fn run_generated<C>(files: &[(&str, &str)], checker: &C) -> Result<String>
where
    C: CompileChecker,
{
    let temp_dir = tempfile::TempDir::new()?;
    for (name, content) in files {
        let path = temp_dir.path().join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, content)?;
    }

    checker
        .check(temp_dir.path())
        .and_then(|()| checker.run(temp_dir.path()))
        .map_err(|e| {
            // Print the project for debugging
            eprintln!("Generated project in {}:", temp_dir.path().display());
            for (name, content) in files {
                eprintln!("--- {}", name);
                for line in content.lines() {
                    eprintln!("  | {}", line);
                }
            }
            eyre!("Compile check failed: {}", e)
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_tool_is_unavailable() {
        assert!(!tool_available("dicon-no-such-tool"));
    }

    #[test]
    fn test_missing_toolchain_is_compile_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let err = invoke("dicon-no-such-tool", &["build"], dir.path()).unwrap_err();
        assert!(err.message.starts_with("Failed to run dicon-no-such-tool build"));
        assert!(err.output.is_empty());
    }
}
