//! Source discovery over configured root directories.

mod filter;

use std::path::{Path, PathBuf};

pub use filter::Filter;
use tracing::{debug, warn};
use walkdir::WalkDir;

/// A regular file found under one of the roots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredFile {
    /// Absolute location of the file.
    pub path: PathBuf,
    /// Root-relative path with `/` separators.
    pub relative: String,
}

/// Find every regular file under `roots` the filter does not exclude.
///
/// Missing roots and roots that are not directories are skipped. Overlapping
/// roots yield duplicate entries. Directories are never returned.
pub fn discover(roots: &[PathBuf], filter: &Filter) -> Vec<DiscoveredFile> {
    let mut files = Vec::new();

    for root in roots {
        if !root.is_dir() {
            debug!("skipping missing source root '{}'", root.display());
            continue;
        }

        for entry in WalkDir::new(root).min_depth(1) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("skipping unreadable entry under '{}': {}", root.display(), e);
                    continue;
                }
            };
            if !entry.path().is_file() {
                continue;
            }
            let Some(relative) = relative_path(root, entry.path()) else {
                continue;
            };
            if filter.is_filtered(&relative) {
                continue;
            }
            let path = std::path::absolute(entry.path()).unwrap_or_else(|_| entry.into_path());
            files.push(DiscoveredFile { path, relative });
        }
    }

    files
}

fn relative_path(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    Some(relative.to_string_lossy().replace('\\', "/"))
}
