//! Core utilities for importcat.
//!
//! This crate provides the building blocks for merging a directory of source
//! files into one bundle:
//! - Collecting the regular files of a source directory
//! - Classifying lines as pass-through or import candidates
//! - Accumulating output text while dropping repeated imports
//! - Path helpers (output-inside-source detection)

mod collector;
mod config;
mod constants;
mod dedup;
mod parser;
mod types;

// Re-export public API
pub use collector::{CollectorConfig, collect_sources};
pub use config::{absolutize, is_directly_in};
pub use constants::{DEFAULT_OUTPUT_FILE, DEFAULT_SOURCE_DIR};
pub use dedup::{Accumulator, ImportSet};
pub use parser::{ImportPattern, classify_line, split_lines};
pub use types::{LineKind, LineOutcome, MatchMode};
