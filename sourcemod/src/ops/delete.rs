//! Delete operation - removal of previously emitted sources.

use eyre::Result;
use sourcemod_manifest::SourcemodToml;
use sourcemod_pipeline::delete as delete_sources;
use tracing::info;

use super::SourceSet;
use crate::reports::DeleteReport;

/// Options for the delete operation.
pub struct DeleteOptions {
    /// Skip regardless of the manifest.
    pub skip: bool,
    /// Purge emptied directories regardless of the manifest.
    pub purge_empty: bool,
}

/// Execute the delete goal.
pub fn delete(sourcemod_toml: &SourcemodToml, opts: DeleteOptions) -> Result<DeleteReport> {
    let config = &sourcemod_toml.manifest().delete;

    if opts.skip || config.skip {
        info!("Skipping source deletion");
        return Ok(DeleteReport::skipped());
    }

    let files = SourceSet {
        roots: &config.roots,
        includes: &config.includes,
        excludes: &config.excludes,
        exclude_by_default: config.exclude_by_default,
    }
    .discover(sourcemod_toml)?;
    if files.is_empty() {
        info!("No sources to delete");
        return Ok(DeleteReport::default());
    }

    let purge_empty = opts.purge_empty || config.purge_empty;
    let outcome = delete_sources(&files, purge_empty);

    Ok(DeleteReport {
        skipped: false,
        purge_empty,
        outcome,
    })
}
