//! Delete command report data structures.

use sourcemod_pipeline::DeleteOutcome;

use super::{
    output::{Output, Report},
    plural,
};

/// Report data from a delete run.
#[derive(Debug, Default)]
pub struct DeleteReport {
    pub skipped: bool,
    /// Whether emptied directories were purged.
    pub purge_empty: bool,
    pub outcome: DeleteOutcome,
}

impl DeleteReport {
    pub fn skipped() -> Self {
        Self {
            skipped: true,
            ..Self::default()
        }
    }
}

impl Report for DeleteReport {
    fn render(&self, out: &mut dyn Output) {
        if self.skipped {
            out.preformatted("Source deletion skipped.");
            return;
        }
        if self.outcome.deleted.is_empty() && self.outcome.failed.is_empty() {
            out.preformatted("No sources to delete.");
            return;
        }

        out.section("Deleted");
        for path in &self.outcome.deleted {
            out.removed_item(&path.display().to_string());
        }
        for failed in &self.outcome.failed {
            out.warning(&format!(
                "couldn't delete {}: {}",
                failed.path.display(),
                failed.reason
            ));
        }

        out.newline();
        out.preformatted(&format!(
            "Deleted {}",
            plural(self.outcome.deleted.len(), "source", "sources")
        ));
        if self.purge_empty {
            out.preformatted(&format!(
                "Purged {}",
                plural(self.outcome.purged, "directory", "directories")
            ));
        }
    }
}
