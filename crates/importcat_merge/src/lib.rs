//! Import-deduplicating concatenation of a source directory.
//!
//! This crate reads every regular file of a source directory, copies each
//! line into one bundle and drops import lines that were already written.
//! The bundle is written once, after every source has been read.
//!
//! # Examples
//!
//! ## Basic Usage
//!
//! ```no_run
//! use importcat_merge::{Config, run_merge};
//! use std::io::{BufWriter, Write};
//!
//! # fn main() -> anyhow::Result<()> {
//! let cfg = Config {
//!     source: std::path::PathBuf::from("PowerAPIApp/API"),
//!     output: std::path::PathBuf::from("PowerAPI_DISTRIBUTION.swift"),
//!     ..Default::default()
//! };
//!
//! let result = run_merge(&cfg)?;
//!
//! let mut stdout = BufWriter::new(std::io::stdout());
//! importcat_merge::print_report(&mut stdout, &result)?;
//! stdout.flush()?;
//! # Ok(())
//! # }
//! ```

mod config;
mod merger;
mod reporter;
mod types;
mod writer;

// Re-export public API
pub use config::Config;
pub use merger::{merge_files, run_merge};
pub use reporter::{print_json_report, print_report};
pub use types::{DroppedImport, MergeResult, MergeStats};
pub use writer::write_output;
