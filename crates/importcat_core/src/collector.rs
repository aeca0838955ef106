use anyhow::{Context, Result, bail};
use ignore::WalkBuilder;
use log::{debug, trace};
use std::{fs, path::PathBuf};

use crate::config::absolutize;

pub struct CollectorConfig {
    pub root: PathBuf,
    /// Merge in file-name order instead of directory listing order
    pub sort: bool,
    /// File left out of the scan, typically the output bundle
    pub exclude: Option<PathBuf>,
}

pub fn collect_sources(cfg: &CollectorConfig) -> Result<Vec<PathBuf>> {
    debug!("Collecting source files");
    let root = &cfg.root;
    let meta = fs::metadata(root)
        .with_context(|| format!("Failed to read source directory {}", root.display()))?;
    if !meta.is_dir() {
        bail!("Source path {} is not a directory", root.display());
    }

    let exclude = match &cfg.exclude {
        Some(p) => Some(absolutize(p)?),
        None => None,
    };

    debug!("Listing directory: {}", root.display());
    // No hidden/gitignore filtering: every regular file directly under root is merged
    let mut builder = WalkBuilder::new(root);
    builder.standard_filters(false).max_depth(Some(1)).follow_links(false);
    if cfg.sort {
        builder.sort_by_file_name(|a, b| a.cmp(b));
    }

    let mut files: Vec<PathBuf> = Vec::new();
    for res in builder.build() {
        let dent = res?;
        if dent.depth() == 0 {
            continue;
        }

        let p = dent.path();
        // Follows symlinks, so links to regular files are kept
        if !p.is_file() {
            trace!("Skipping non-file entry: {}", p.display());
            continue;
        }

        if let Some(excluded) = &exclude
            && absolutize(p)? == *excluded
        {
            debug!("Skipping excluded file: {}", p.display());
            continue;
        }

        trace!("Found source file: {}", p.display());
        files.push(p.to_path_buf());
    }

    debug!("Collected {} source files", files.len());
    Ok(files)
}
