use clap::Args;
use eyre::Result;

use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct ModulesCommand {
    /// Only list modules of this library
    #[arg(short, long)]
    pub library: Option<String>,
}

impl ModulesCommand {
    pub fn run(&self) -> Result<()> {
        let report = ops::modules(self.library.as_deref());
        report.render(&mut TerminalOutput::new());
        Ok(())
    }
}
