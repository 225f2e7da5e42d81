//! Core operations.
//!
//! This module contains the business logic for sourcemod commands,
//! separated from CLI argument parsing and output rendering.

pub mod check;
pub mod delete;
pub mod generate;
pub mod modify;
pub mod modules;

use std::path::PathBuf;

pub use check::check;
pub use delete::delete;
use eyre::Result;
pub use generate::generate;
pub use modify::modify;
pub use modules::modules;
use sourcemod_manifest::SourcemodToml;
use sourcemod_pipeline::{DiscoveredFile, Filter, discover};

/// Root directories and glob filter of one goal.
pub(crate) struct SourceSet<'a> {
    pub roots: &'a [PathBuf],
    pub includes: &'a [String],
    pub excludes: &'a [String],
    pub exclude_by_default: bool,
}

impl SourceSet<'_> {
    /// Discover the files of this set, resolving roots against the manifest
    /// directory.
    pub fn discover(&self, sourcemod_toml: &SourcemodToml) -> Result<Vec<DiscoveredFile>> {
        let filter = Filter::new(self.includes, self.excludes, self.exclude_by_default)?;
        let roots: Vec<PathBuf> = self
            .roots
            .iter()
            .map(|root| sourcemod_toml.resolve(root))
            .collect();
        Ok(discover(&roots, &filter))
    }
}
