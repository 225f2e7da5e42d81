use std::path::{Path, PathBuf};

use crate::{Error, Manifest, Result, parse_manifest};

/// A sourcemod.toml file with its location and parsed manifest.
///
/// Relative paths in the manifest are resolved against the directory that
/// contains the file.
pub struct SourcemodToml {
    path: PathBuf,
    manifest: Manifest,
}

impl SourcemodToml {
    /// Open and parse a sourcemod.toml file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let content = std::fs::read_to_string(&path).map_err(|e| {
            Box::new(Error::Io {
                path: path.clone(),
                source: e,
            })
        })?;
        let filename = path.display().to_string();
        let manifest = parse_manifest(&content, &filename)?;

        Ok(Self { path, manifest })
    }

    /// Get the file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the parsed manifest.
    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    /// The directory relative manifest paths are resolved against.
    pub fn base_dir(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }

    /// Resolve a manifest path against [`Self::base_dir`].
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir().join(path)
        }
    }
}
