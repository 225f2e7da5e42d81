//! Generate command report data structures.

use std::path::PathBuf;

use sourcemod_pipeline::GenerateOutcome;

use super::{
    display_relative,
    output::{Output, Report},
    plural,
};

/// Report data from a generate run.
#[derive(Debug)]
pub struct GenerateReport {
    pub skipped: bool,
    pub discovered: usize,
    pub output: PathBuf,
    pub outcome: GenerateOutcome,
}

impl GenerateReport {
    pub fn skipped(output: PathBuf) -> Self {
        Self {
            skipped: true,
            discovered: 0,
            output,
            outcome: GenerateOutcome::default(),
        }
    }

    pub fn empty(output: PathBuf) -> Self {
        Self {
            skipped: false,
            ..Self::skipped(output)
        }
    }
}

impl Report for GenerateReport {
    fn render(&self, out: &mut dyn Output) {
        if self.skipped {
            out.preformatted("Source generation skipped.");
            return;
        }
        if self.discovered == 0 {
            out.preformatted("No sources to generate from.");
            return;
        }
        if self.outcome.generated.is_empty() {
            out.preformatted("Nothing generated.");
            return;
        }

        out.section("Generated");
        for path in &self.outcome.written {
            out.added_item(&display_relative(path, &self.output));
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
            "{} from {}",
            plural(self.outcome.generated.len(), "unit", "units"),
            plural(self.outcome.parsed, "parsed source", "parsed sources"),
        ));
        out.key_value("Output", &self.output.display().to_string());
    }
}
