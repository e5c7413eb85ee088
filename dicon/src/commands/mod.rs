mod check;
mod completions;
mod fmt;
mod generate;

use check::CheckCommand;
use clap::{ArgAction, Parser, Subcommand};
use completions::CompletionsCommand;
use dicon_codegen::{FormatError, GenerateError, OutputError};
use eyre::Result;
use fmt::FmtCommand;
use generate::GenerateCommand;

/// Extension trait for exiting on library errors with pretty formatting
pub(crate) trait UnwrapOrExit<T> {
    fn unwrap_or_exit(self) -> T;
}

fn exit_with(diagnostic: impl miette::Diagnostic + Send + Sync + 'static) -> ! {
    eprintln!("{:?}", miette::Report::new(diagnostic));
    std::process::exit(1);
}

impl<T> UnwrapOrExit<T> for dicon_manifest::Result<T> {
    fn unwrap_or_exit(self) -> T {
        self.unwrap_or_else(|e| exit_with(*e))
    }
}

impl<T> UnwrapOrExit<T> for Result<T, GenerateError> {
    fn unwrap_or_exit(self) -> T {
        self.unwrap_or_else(|e| exit_with(e))
    }
}

impl<T> UnwrapOrExit<T> for Result<T, FormatError> {
    fn unwrap_or_exit(self) -> T {
        self.unwrap_or_else(|e| exit_with(e))
    }
}

impl<T> UnwrapOrExit<T> for Result<T, OutputError> {
    fn unwrap_or_exit(self) -> T {
        self.unwrap_or_else(|e| exit_with(e))
    }
}

#[derive(Parser)]
#[command(name = "dicon")]
#[command(version)]
#[command(about = "Generate dependency injection containers from an interface manifest")]
pub(crate) struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn run(&self) -> Result<()> {
        match &self.command {
            Commands::Generate(cmd) => cmd.run(),
            Commands::Check(cmd) => cmd.run(),
            Commands::Fmt(cmd) => cmd.run(),
            Commands::Completions(cmd) => cmd.run(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the container from dicon.toml
    Generate(GenerateCommand),

    /// Validate dicon.toml and report dependency problems
    Check(CheckCommand),

    /// Normalize an existing Go or Rust source file
    Fmt(FmtCommand),

    /// Generate shell completions
    Completions(CompletionsCommand),
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_verbose_is_global() {
        let cli = Cli::try_parse_from(["dicon", "check", "-vv"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.command, Commands::Check(_)));
    }

    #[test]
    fn test_unknown_language_is_rejected() {
        assert!(Cli::try_parse_from(["dicon", "generate", "--language", "cobol"]).is_err());
    }
}
