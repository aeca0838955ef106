use anyhow::{Result, bail};
use clap::Parser;
use importcat_core::{DEFAULT_OUTPUT_FILE, DEFAULT_SOURCE_DIR, MatchMode, is_directly_in};
use log::debug;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "merge")]
#[command(about = "Concatenate a directory of source files, dropping repeated imports")]
pub struct Config {
    /// Directory whose regular files are merged
    #[arg(long, default_value = DEFAULT_SOURCE_DIR)]
    pub source: PathBuf,

    /// File the merged text is written to (overwritten)
    #[arg(long, default_value = DEFAULT_OUTPUT_FILE)]
    pub output: PathBuf,

    /// How lines mentioning `import` are matched
    #[arg(long, value_enum, default_value_t = MatchMode::Anywhere)]
    pub match_mode: MatchMode,

    /// Merge files in file-name order instead of directory listing order
    #[arg(long)]
    pub sort: bool,

    /// Leave the output file out of the scan if it sits inside the source directory
    #[arg(long)]
    pub skip_output: bool,

    /// Merge and report without writing the output file
    #[arg(long)]
    pub dry_run: bool,

    /// Print the run summary as JSON
    #[arg(long)]
    pub json: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source: PathBuf::from(DEFAULT_SOURCE_DIR),
            output: PathBuf::from(DEFAULT_OUTPUT_FILE),
            match_mode: MatchMode::default(),
            sort: false,
            skip_output: false,
            dry_run: false,
            json: false,
        }
    }
}

impl Config {
    /// Rejects settings that can only fail later, after the sources were read.
    pub fn validate(&self) -> Result<()> {
        if self.output.is_dir() {
            bail!("Output path {} is a directory", self.output.display());
        }
        Ok(())
    }

    /// True when the output file would be picked up by the next scan.
    pub fn output_inside_source(&self) -> Result<bool> {
        let inside = is_directly_in(&self.output, &self.source)?;
        debug!("Output {} inside source {}: {}", self.output.display(), self.source.display(), inside);
        Ok(inside)
    }
}
