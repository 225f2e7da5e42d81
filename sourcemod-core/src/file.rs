use std::path::Path;

use eyre::{Context, Result};

/// Write `content` to `path`, creating missing parent directories and
/// replacing any existing file.
pub fn write_file(path: &Path, content: &str) -> Result<()> {
    create_parent(path)?;
    std::fs::write(path, content).wrap_err_with(|| format!("failed to write '{}'", path.display()))
}

/// Copy `from` to `to` byte for byte, creating missing parent directories.
pub fn copy_file(from: &Path, to: &Path) -> Result<()> {
    create_parent(to)?;
    std::fs::copy(from, to).wrap_err_with(|| {
        format!("failed to copy '{}' to '{}'", from.display(), to.display())
    })?;
    Ok(())
}

fn create_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .wrap_err_with(|| format!("failed to create '{}'", parent.display()))?;
    }
    Ok(())
}
