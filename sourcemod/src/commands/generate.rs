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
pub struct GenerateCommand {
    /// Path to sourcemod.toml (defaults to ./sourcemod.toml)
    #[arg(short, long, default_value = "sourcemod.toml")]
    pub config: PathBuf,

    /// Skip source generation
    #[arg(long)]
    pub skip: bool,
}

impl GenerateCommand {
    pub fn run(&self) -> Result<()> {
        let sourcemod_toml = SourcemodToml::open(&self.config).unwrap_or_exit();

        let report = ops::generate(&sourcemod_toml, self.skip)?;

        report.render(&mut TerminalOutput::new());
        Ok(())
    }
}
