use log::trace;
use regex::Regex;
use std::sync::LazyLock;

use crate::{
    constants::IMPORT_KEYWORD,
    types::{LineKind, MatchMode},
};

static ANYWHERE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:import\s*)?(.*)(?:\s*)").expect("valid import pattern"));

static LEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:import\s*)(.*)(?:\s*)").expect("valid import pattern"));

/// Compiled classifier pattern for one match mode.
#[derive(Debug, Clone, Copy)]
pub struct ImportPattern {
    mode: MatchMode,
    regex: &'static Regex,
}

impl ImportPattern {
    pub fn new(mode: MatchMode) -> Self {
        let regex = match mode {
            MatchMode::Anywhere => &*ANYWHERE,
            MatchMode::Leading => &*LEADING,
        };
        Self { mode, regex }
    }

    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    /// Returns the whole matched span, keyword and trailing whitespace included.
    pub fn extract<'a>(&self, line: &'a str) -> Option<&'a str> {
        self.regex.find(line).map(|m| m.as_str())
    }
}

impl Default for ImportPattern {
    fn default() -> Self {
        Self::new(MatchMode::default())
    }
}

/// Classifies a single line (terminator included).
///
/// Lines without the import keyword are always pass-through. Lines with it are
/// import candidates keyed by the pattern match; if the pattern does not match
/// the line is passed through rather than dropped.
pub fn classify_line<'a>(line: &'a str, pattern: &ImportPattern) -> LineKind<'a> {
    if !line.contains(IMPORT_KEYWORD) {
        return LineKind::PassThrough;
    }

    match pattern.extract(line) {
        Some(key) => LineKind::Import(key),
        None => {
            trace!("Import keyword without pattern match, passing through: {:?}", line);
            LineKind::PassThrough
        }
    }
}

/// Splits text into lines, keeping each `\n` (and any preceding `\r`) attached.
/// A trailing line without a terminator is yielded as-is.
///
/// Terminators are not translated: a lone `\r` does not end a line, and
/// `import X\r\n` and `import X\n` produce different dedup keys. A reader using
/// universal newlines would fold both to `\n` and treat them as one import.
pub fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    text.split_inclusive('\n')
}
