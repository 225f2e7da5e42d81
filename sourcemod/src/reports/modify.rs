//! Modify command report data structures.

use std::path::PathBuf;

use sourcemod_pipeline::TransformOutcome;

use super::{
    display_relative,
    output::{Output, Report},
    plural,
};

/// Report data from a modify run.
#[derive(Debug)]
pub struct ModifyReport {
    pub skipped: bool,
    /// Number of discovered source files.
    pub discovered: usize,
    /// Output directory.
    pub output: PathBuf,
    pub outcome: TransformOutcome,
}

impl ModifyReport {
    pub fn skipped(output: PathBuf) -> Self {
        Self {
            skipped: true,
            discovered: 0,
            output,
            outcome: TransformOutcome::default(),
        }
    }

    pub fn empty(output: PathBuf) -> Self {
        Self {
            skipped: false,
            ..Self::skipped(output)
        }
    }
}

impl Report for ModifyReport {
    fn render(&self, out: &mut dyn Output) {
        if self.skipped {
            out.preformatted("Source modification skipped.");
            return;
        }
        if self.discovered == 0 {
            out.preformatted("No sources to modify.");
            return;
        }

        if !self.outcome.written.is_empty() {
            out.section("Written");
            for path in &self.outcome.written {
                out.added_item(&display_relative(path, &self.output));
            }
        }

        for failed in &self.outcome.failed {
            out.warning(&format!(
                "couldn't write {}: {}",
                failed.path.display(),
                failed.reason
            ));
        }

        out.newline();
        out.preformatted(&format!(
            "{}: {} transformed, {} renamed, {} copied unmodified",
            plural(self.discovered, "source", "sources"),
            self.outcome.transformed,
            self.outcome.renamed,
            self.outcome.copied.len(),
        ));
        out.key_value("Output", &self.output.display().to_string());
    }
}
