//! Fixed names used when the tool is invoked without arguments.

/// Directory merged when no `--source` is given
pub const DEFAULT_SOURCE_DIR: &str = "PowerAPIApp/API";

/// File written when no `--output` is given, relative to the working directory
pub const DEFAULT_OUTPUT_FILE: &str = "PowerAPI_DISTRIBUTION.swift";

/// Substring that makes a line an import candidate
pub const IMPORT_KEYWORD: &str = "import";
