use anyhow::{Context, Result};
use log::debug;
use std::{fs, path::Path};

/// Writes the whole bundle at once, creating or truncating `output`.
pub fn write_output(output: &Path, text: &str) -> Result<()> {
    debug!("Writing {} bytes to {}", text.len(), output.display());
    fs::write(output, text).with_context(|| format!("Failed to write {}", output.display()))
}
