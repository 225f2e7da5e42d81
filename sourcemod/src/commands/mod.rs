mod check;
mod completions;
mod delete;
mod generate;
mod modify;
mod modules;

use check::CheckCommand;
use clap::{Parser, Subcommand};
use completions::CompletionsCommand;
use delete::DeleteCommand;
use eyre::Result;
use generate::GenerateCommand;
use modify::ModifyCommand;
use modules::ModulesCommand;

/// Extension trait for exiting on manifest errors with pretty formatting
pub(crate) trait UnwrapOrExit<T> {
    fn unwrap_or_exit(self) -> T;
}

impl<T> UnwrapOrExit<T> for sourcemod_manifest::Result<T> {
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => {
                eprintln!("{:?}", miette::Report::new(*e));
                std::process::exit(1);
            }
        }
    }
}

#[derive(Parser)]
#[command(name = "sourcemod")]
#[command(version)]
#[command(about = "Transform and generate source files at build time")]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn run(&self) -> Result<()> {
        match &self.command {
            Commands::Modify(cmd) => cmd.run(),
            Commands::Generate(cmd) => cmd.run(),
            Commands::Delete(cmd) => cmd.run(),
            Commands::Check(cmd) => cmd.run(),
            Commands::Modules(cmd) => cmd.run(),
            Commands::Completions(cmd) => cmd.run(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Run transformers and rename rules over existing sources
    Modify(ModifyCommand),

    /// Run generators and write the units they create
    Generate(GenerateCommand),

    /// Delete previously emitted sources
    Delete(DeleteCommand),

    /// Validate sourcemod.toml and load every configured module
    Check(CheckCommand),

    /// List the modules available to sourcemod.toml
    Modules(ModulesCommand),

    /// Generate shell completions
    Completions(CompletionsCommand),
}
