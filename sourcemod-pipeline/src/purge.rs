//! Deletion of previously emitted sources and purging of emptied directories.

use std::{
    collections::{HashSet, VecDeque},
    fs, io,
    path::{Path, PathBuf},
};

use tracing::{debug, error, info};

use crate::{DiscoveredFile, FailedWrite};

#[derive(Debug, Clone, Default)]
pub struct DeleteOutcome {
    pub deleted: Vec<PathBuf>,
    /// Directories removed by the purge pass.
    pub purged: usize,
    pub failed: Vec<FailedWrite>,
}

/// Delete every discovered file, then optionally remove the directories the
/// deletion left empty.
pub fn delete(files: &[DiscoveredFile], purge_empty: bool) -> DeleteOutcome {
    let mut outcome = DeleteOutcome::default();

    for file in files {
        if !file.path.exists() {
            continue;
        }
        info!("Deleting '{}'", file.relative);
        match force_delete(&file.path) {
            Ok(()) => outcome.deleted.push(file.path.clone()),
            Err(e) => {
                error!("failed to delete '{}': {}", file.path.display(), e);
                outcome.failed.push(FailedWrite {
                    path: file.path.clone(),
                    reason: e.to_string(),
                });
            }
        }
    }

    info!("Deleted {} source(s)", outcome.deleted.len());

    if purge_empty {
        outcome.purged = purge_empty_parents(&outcome.deleted);
        match outcome.purged {
            1 => info!("Purged 1 directory"),
            count => info!("Purged {} directories", count),
        }
    }

    outcome
}

/// Remove `path`, emptying directories with an explicit FIFO work list. A
/// non-empty directory is queued again behind its children. Paths that are
/// already gone count as removed.
pub fn force_delete(path: &Path) -> io::Result<()> {
    let mut queue = VecDeque::from([path.to_path_buf()]);

    while let Some(current) = queue.pop_front() {
        let metadata = match fs::symlink_metadata(&current) {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == io::ErrorKind::NotFound => continue,
            Err(e) => return Err(e),
        };

        if !metadata.is_dir() {
            remove(fs::remove_file(&current))?;
            continue;
        }

        let children = fs::read_dir(&current)?
            .map(|entry| entry.map(|entry| entry.path()))
            .collect::<io::Result<Vec<_>>>()?;
        if children.is_empty() {
            remove(fs::remove_dir(&current))?;
            continue;
        }
        queue.extend(children);
        queue.push_back(current);
    }

    Ok(())
}

fn remove(result: io::Result<()>) -> io::Result<()> {
    match result {
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        other => other,
    }
}

/// Single FIFO pass over the parents of `deleted`. Each directory is queued
/// at most once; a parent is queued only after its child was removed.
fn purge_empty_parents(deleted: &[PathBuf]) -> usize {
    let mut visited = HashSet::new();
    let mut queue = VecDeque::new();
    for path in deleted {
        if let Some(parent) = path.parent()
            && visited.insert(parent.to_path_buf())
        {
            queue.push_back(parent.to_path_buf());
        }
    }

    let mut purged = 0;
    while let Some(directory) = queue.pop_front() {
        let is_empty = match fs::read_dir(&directory) {
            Ok(mut entries) => entries.next().is_none(),
            Err(_) => false,
        };
        if !is_empty {
            continue;
        }
        if let Err(e) = fs::remove_dir(&directory) {
            debug!("couldn't purge '{}': {}", directory.display(), e);
            continue;
        }
        purged += 1;
        if let Some(parent) = directory.parent()
            && visited.insert(parent.to_path_buf())
        {
            queue.push_back(parent.to_path_buf());
        }
    }
    purged
}
