use clap::ValueEnum;
use serde::Serialize;

/// Which pattern is applied to lines containing the import keyword.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// `import` prefix is optional; every candidate line matches
    #[default]
    Anywhere,
    /// Line must start with `import`; other mentions pass through
    Leading,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    PassThrough,
    /// Holds the whole matched span, used as the dedup key
    Import(&'a str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineOutcome {
    PassedThrough,
    Retained,
    Duplicate,
}
