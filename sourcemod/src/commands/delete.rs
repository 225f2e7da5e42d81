use std::path::PathBuf;

use clap::Args;
use eyre::Result;
use sourcemod_manifest::SourcemodToml;

use super::UnwrapOrExit;
use crate::{
    ops::{self, delete::DeleteOptions},
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct DeleteCommand {
    /// Path to sourcemod.toml (defaults to ./sourcemod.toml)
    #[arg(short, long, default_value = "sourcemod.toml")]
    pub config: PathBuf,

    /// Skip deletion
    #[arg(long)]
    pub skip: bool,

    /// Also remove directories the deletion leaves empty
    #[arg(long)]
    pub purge_empty: bool,
}

impl DeleteCommand {
    pub fn run(&self) -> Result<()> {
        let sourcemod_toml = SourcemodToml::open(&self.config).unwrap_or_exit();

        let report = ops::delete(
            &sourcemod_toml,
            DeleteOptions {
                skip: self.skip,
                purge_empty: self.purge_empty,
            },
        )?;

        report.render(&mut TerminalOutput::new());
        Ok(())
    }
}
