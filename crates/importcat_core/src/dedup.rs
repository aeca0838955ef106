use log::trace;
use std::collections::HashSet;

use crate::{
    parser::{ImportPattern, classify_line},
    types::{LineKind, LineOutcome},
};

/// Insertion-ordered set of import keys already written to the output.
#[derive(Debug, Clone)]
pub struct ImportSet {
    order: Vec<String>,
    members: HashSet<String>,
}

impl ImportSet {
    /// Creates a set seeded with the empty key.
    pub fn seeded() -> Self {
        let mut set = Self { order: Vec::new(), members: HashSet::new() };
        set.insert("");
        set
    }

    /// Records `key`, returning `false` if it was already present.
    pub fn insert(&mut self, key: &str) -> bool {
        if self.members.contains(key) {
            return false;
        }
        self.members.insert(key.to_string());
        self.order.push(key.to_string());
        true
    }

    /// Keys in the order they were first written, seed excluded.
    pub fn retained(&self) -> impl Iterator<Item = &str> {
        self.order.iter().skip(1).map(String::as_str)
    }
}

impl Default for ImportSet {
    fn default() -> Self {
        Self::seeded()
    }
}

/// Append-only output buffer that drops repeated import lines.
#[derive(Debug, Default)]
pub struct Accumulator {
    pattern: ImportPattern,
    seen: ImportSet,
    buffer: String,
    lines_read: usize,
    lines_written: usize,
    duplicates: usize,
}

impl Accumulator {
    pub fn new(pattern: ImportPattern) -> Self {
        Self { pattern, ..Self::default() }
    }

    pub fn push_line(&mut self, line: &str) -> LineOutcome {
        self.lines_read += 1;

        let outcome = match classify_line(line, &self.pattern) {
            LineKind::PassThrough => LineOutcome::PassedThrough,
            LineKind::Import(key) => {
                if self.seen.insert(key) {
                    LineOutcome::Retained
                } else {
                    trace!("Dropping duplicate import: {:?}", key);
                    LineOutcome::Duplicate
                }
            }
        };

        if outcome == LineOutcome::Duplicate {
            self.duplicates += 1;
        } else {
            self.buffer.push_str(line);
            self.lines_written += 1;
        }
        outcome
    }

    pub fn seen(&self) -> &ImportSet {
        &self.seen
    }

    pub fn text(&self) -> &str {
        &self.buffer
    }

    pub fn lines_read(&self) -> usize {
        self.lines_read
    }

    pub fn lines_written(&self) -> usize {
        self.lines_written
    }

    pub fn duplicates(&self) -> usize {
        self.duplicates
    }

    /// Number of distinct imports written, not counting the seed entry.
    pub fn unique_imports(&self) -> usize {
        self.seen.retained().count()
    }

    pub fn into_text(self) -> String {
        self.buffer
    }
}
