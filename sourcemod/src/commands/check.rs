use std::path::PathBuf;

use clap::Args;
use eyre::Result;
use sourcemod_manifest::SourcemodToml;

use super::UnwrapOrExit;
use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct CheckCommand {
    /// Path to sourcemod.toml (defaults to ./sourcemod.toml)
    #[arg(short, long, default_value = "sourcemod.toml")]
    pub config: PathBuf,
}

impl CheckCommand {
    /// Run the check command
    pub fn run(&self) -> Result<()> {
        let sourcemod_toml = SourcemodToml::open(&self.config).unwrap_or_exit();

        let report = ops::check(&sourcemod_toml)?;

        report.render(&mut TerminalOutput::new());
        Ok(())
    }
}
