use importcat_core::MatchMode;
use serde::Serialize;
use std::path::PathBuf;

/// An import line left out of the bundle because its key was already written.
#[derive(Debug, Clone, Serialize)]
pub struct DroppedImport {
    pub file: PathBuf,
    /// 1-based line number within `file`
    pub line: usize,
    /// The line as read, terminator stripped
    pub text: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct MergeStats {
    pub files_merged: usize,
    pub lines_read: usize,
    pub lines_written: usize,
    pub unique_imports: usize,
    pub duplicates_dropped: usize,
    /// Size of the merged text, whether or not it was written
    pub output_bytes: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct MergeResult {
    pub source: PathBuf,
    pub output: PathBuf,
    pub match_mode: MatchMode,
    /// Files in the order they were merged
    pub sources: Vec<PathBuf>,
    /// False for dry runs
    pub written: bool,
    pub stats: MergeStats,
    /// Import lines kept in the bundle, first-seen order, terminators stripped
    pub retained_imports: Vec<String>,
    pub dropped: Vec<DroppedImport>,
}
