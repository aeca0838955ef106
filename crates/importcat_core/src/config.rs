use anyhow::{Context, Result};
use log::trace;
use path_clean::clean;
use std::{
    env,
    path::{Path, PathBuf},
};

/// Makes `path` absolute against the current directory and normalizes `.`/`..`
/// components without touching the filesystem.
pub fn absolutize(path: &Path) -> Result<PathBuf> {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        env::current_dir().context("Failed to read current directory")?.join(path)
    };
    let cleaned = clean(joined);
    trace!("Absolutized {:?} to {:?}", path, cleaned);
    Ok(cleaned)
}

/// Returns true if `path` is a direct child of `dir`, the only depth a source
/// scan looks at.
pub fn is_directly_in(path: &Path, dir: &Path) -> Result<bool> {
    let path = absolutize(path)?;
    let dir = absolutize(dir)?;
    Ok(path.parent() == Some(dir.as_path()))
}
