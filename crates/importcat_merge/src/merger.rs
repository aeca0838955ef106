use anyhow::{Context, Result};
use importcat_core::{
    Accumulator, CollectorConfig, ImportPattern, LineOutcome, collect_sources, split_lines,
};
use log::{debug, info, trace, warn};
use std::{fs, path::PathBuf};

use crate::{
    config::Config,
    types::{DroppedImport, MergeResult, MergeStats},
    writer::write_output,
};

pub fn run_merge(cfg: &Config) -> Result<MergeResult> {
    info!("Starting merge of {}", cfg.source.display());
    cfg.validate()?;

    let inside = cfg.output_inside_source()?;
    if inside && !cfg.skip_output {
        warn!(
            "Output {} is inside {}; the next run will merge it as a source",
            cfg.output.display(),
            cfg.source.display()
        );
    }

    let collector_cfg = CollectorConfig {
        root: cfg.source.clone(),
        sort: cfg.sort,
        exclude: if cfg.skip_output { Some(cfg.output.clone()) } else { None },
    };
    let sources = collect_sources(&collector_cfg)?;
    info!("Found {} source files", sources.len());

    let pattern = ImportPattern::new(cfg.match_mode);
    debug!("Using match mode {:?}", pattern.mode());
    let (acc, dropped) = merge_files(&sources, pattern)?;

    let stats = MergeStats {
        files_merged: sources.len(),
        lines_read: acc.lines_read(),
        lines_written: acc.lines_written(),
        unique_imports: acc.unique_imports(),
        duplicates_dropped: acc.duplicates(),
        output_bytes: acc.text().len(),
    };
    let retained_imports: Vec<String> = acc
        .seen()
        .retained()
        .map(|key| key.trim_end_matches(['\r', '\n']).to_string())
        .collect();

    let text = acc.into_text();
    let written = if cfg.dry_run {
        info!("Dry run, not writing {}", cfg.output.display());
        false
    } else {
        write_output(&cfg.output, &text)?;
        true
    };

    info!(
        "Merge complete. Kept {} lines, dropped {} duplicate imports",
        stats.lines_written, stats.duplicates_dropped
    );

    Ok(MergeResult {
        source: cfg.source.clone(),
        output: cfg.output.clone(),
        match_mode: cfg.match_mode,
        sources,
        written,
        stats,
        retained_imports,
        dropped,
    })
}

/// Feeds every file, in the given order, through one accumulator.
///
/// Each file is read whole and released before the next one is opened. Any
/// read failure aborts the merge.
pub fn merge_files(
    files: &[PathBuf],
    pattern: ImportPattern,
) -> Result<(Accumulator, Vec<DroppedImport>)> {
    let mut acc = Accumulator::new(pattern);
    let mut dropped = Vec::new();

    for file in files {
        debug!("Merging {}", file.display());
        let src = fs::read_to_string(file)
            .with_context(|| format!("Failed to read {}", file.display()))?;

        for (idx, line) in split_lines(&src).enumerate() {
            if acc.push_line(line) == LineOutcome::Duplicate {
                trace!("Duplicate import at {}:{}", file.display(), idx + 1);
                dropped.push(DroppedImport {
                    file: file.clone(),
                    line: idx + 1,
                    text: line.trim_end_matches(['\r', '\n']).to_string(),
                });
            }
        }
    }

    debug!("Merged {} files, {} duplicate imports", files.len(), dropped.len());
    Ok((acc, dropped))
}

#[cfg(test)]
mod tests {
    use super::*;
    use importcat_core::MatchMode;
    use std::path::Path;
    use tempfile::TempDir;

    fn create_test_file(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, content).expect("Failed to write test file");
        path
    }

    fn config(source: &Path, output: &Path) -> Config {
        Config {
            source: source.to_path_buf(),
            output: output.to_path_buf(),
            sort: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_merge_drops_repeated_import() {
        let temp_dir = TempDir::new().unwrap();
        let src = temp_dir.path().join("API");
        fs::create_dir_all(&src).unwrap();
        create_test_file(&src, "A.swift", "import Foundation\nlet x = 1\n");
        create_test_file(&src, "B.swift", "import Foundation\nlet y = 2\n");
        let output = temp_dir.path().join("Bundle.swift");

        let result = run_merge(&config(&src, &output)).unwrap();

        assert_eq!(
            fs::read_to_string(&output).unwrap(),
            "import Foundation\nlet x = 1\nlet y = 2\n"
        );
        assert!(result.written);
        assert_eq!(result.stats.files_merged, 2);
        assert_eq!(result.stats.lines_read, 4);
        assert_eq!(result.stats.lines_written, 3);
        assert_eq!(result.stats.unique_imports, 1);
        assert_eq!(result.stats.duplicates_dropped, 1);
        assert_eq!(result.dropped.len(), 1);
        assert_eq!(result.dropped[0].file, src.join("B.swift"));
        assert_eq!(result.dropped[0].line, 1);
        assert_eq!(result.dropped[0].text, "import Foundation");
        assert_eq!(result.retained_imports, vec!["import Foundation".to_string()]);
    }

    #[test]
    fn test_default_config_merges_in_listing_order() {
        let temp_dir = TempDir::new().unwrap();
        let src = temp_dir.path().join("API");
        fs::create_dir_all(&src).unwrap();
        create_test_file(&src, "PowerAPI.swift", "import Foundation\nclass PowerAPI {}\n");
        let output = temp_dir.path().join("PowerAPI_DISTRIBUTION.swift");

        let cfg = Config { source: src.clone(), output: output.clone(), ..Default::default() };
        assert!(!cfg.sort);
        let result = run_merge(&cfg).unwrap();

        assert_eq!(
            fs::read_to_string(&output).unwrap(),
            "import Foundation\nclass PowerAPI {}\n"
        );
        assert_eq!(result.sources, vec![src.join("PowerAPI.swift")]);
        assert_eq!(result.match_mode, MatchMode::Anywhere);
    }

    #[test]
    fn test_default_config_drops_duplicates_in_any_listing_order() {
        let temp_dir = TempDir::new().unwrap();
        let src = temp_dir.path().join("API");
        fs::create_dir_all(&src).unwrap();
        create_test_file(&src, "A.swift", "import Foundation\nlet x = 1\n");
        create_test_file(&src, "B.swift", "import Foundation\nlet y = 2\n");
        let output = temp_dir.path().join("Bundle.swift");

        let cfg = Config { source: src.clone(), output: output.clone(), ..Default::default() };
        let result = run_merge(&cfg).unwrap();

        let text = fs::read_to_string(&output).unwrap();
        assert!(
            text == "import Foundation\nlet x = 1\nlet y = 2\n"
                || text == "import Foundation\nlet y = 2\nlet x = 1\n"
        );
        assert_eq!(result.stats.duplicates_dropped, 1);
    }

    #[test]
    fn test_output_in_nested_dir_is_not_reingested() {
        let temp_dir = TempDir::new().unwrap();
        let src = temp_dir.path().join("API");
        fs::create_dir_all(src.join("dist")).unwrap();
        create_test_file(&src, "A.swift", "import Foundation\nlet x = 1\n");
        let output = src.join("dist").join("Bundle.swift");

        let cfg = config(&src, &output);
        assert!(!cfg.output_inside_source().unwrap());
        run_merge(&cfg).unwrap();
        let first = fs::read_to_string(&output).unwrap();
        let result = run_merge(&cfg).unwrap();

        assert_eq!(fs::read_to_string(&output).unwrap(), first);
        assert_eq!(result.stats.files_merged, 1);
    }

    #[test]
    fn test_merge_keeps_distinct_imports() {
        let temp_dir = TempDir::new().unwrap();
        let src = temp_dir.path().join("API");
        fs::create_dir_all(&src).unwrap();
        create_test_file(&src, "View.swift", "import UIKit\nimport SwiftUI\n");
        let output = temp_dir.path().join("Bundle.swift");

        run_merge(&config(&src, &output)).unwrap();
        assert_eq!(fs::read_to_string(&output).unwrap(), "import UIKit\nimport SwiftUI\n");
    }

    #[test]
    fn test_merge_empty_directory_writes_empty_file() {
        let temp_dir = TempDir::new().unwrap();
        let src = temp_dir.path().join("API");
        fs::create_dir_all(&src).unwrap();
        let output = temp_dir.path().join("Bundle.swift");
        fs::write(&output, "stale\n").unwrap();

        let result = run_merge(&config(&src, &output)).unwrap();
        assert_eq!(fs::read_to_string(&output).unwrap(), "");
        assert_eq!(result.stats.files_merged, 0);
        assert_eq!(result.stats.output_bytes, 0);
    }

    #[test]
    fn test_merge_pass_through_order_is_preserved() {
        let temp_dir = TempDir::new().unwrap();
        let src = temp_dir.path().join("API");
        fs::create_dir_all(&src).unwrap();
        create_test_file(&src, "A.swift", "import Foundation\nstruct A {}\n}\n");
        create_test_file(&src, "B.swift", "}\nimport Foundation\nstruct B {}\n");
        let output = temp_dir.path().join("Bundle.swift");

        run_merge(&config(&src, &output)).unwrap();
        assert_eq!(
            fs::read_to_string(&output).unwrap(),
            "import Foundation\nstruct A {}\n}\n}\nstruct B {}\n"
        );
    }

    #[test]
    fn test_merge_missing_source_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let output = temp_dir.path().join("Bundle.swift");
        let result = run_merge(&config(&temp_dir.path().join("missing"), &output));
        assert!(result.is_err());
        assert!(!output.exists());
    }

    #[test]
    fn test_merge_non_utf8_source_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let src = temp_dir.path().join("API");
        fs::create_dir_all(&src).unwrap();
        fs::write(src.join("Blob.bin"), [0xff, 0xfe, 0x00, 0x80]).unwrap();
        let output = temp_dir.path().join("Bundle.swift");

        let err = run_merge(&config(&src, &output)).unwrap_err();
        assert!(format!("{:#}", err).contains("Blob.bin"));
        assert!(!output.exists());
    }

    #[test]
    fn test_dry_run_does_not_write() {
        let temp_dir = TempDir::new().unwrap();
        let src = temp_dir.path().join("API");
        fs::create_dir_all(&src).unwrap();
        create_test_file(&src, "A.swift", "import Foundation\n");
        let output = temp_dir.path().join("Bundle.swift");

        let cfg = Config { dry_run: true, ..config(&src, &output) };
        let result = run_merge(&cfg).unwrap();
        assert!(!result.written);
        assert_eq!(result.stats.output_bytes, "import Foundation\n".len());
        assert!(!output.exists());
    }

    #[test]
    fn test_rerun_with_output_inside_source_is_not_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let src = temp_dir.path().join("API");
        fs::create_dir_all(&src).unwrap();
        create_test_file(&src, "A.swift", "import Foundation\nlet x = 1\n");
        let output = src.join("Z_Bundle.swift");

        run_merge(&config(&src, &output)).unwrap();
        run_merge(&config(&src, &output)).unwrap();
        assert_eq!(
            fs::read_to_string(&output).unwrap(),
            "import Foundation\nlet x = 1\nlet x = 1\n"
        );
    }

    #[test]
    fn test_skip_output_makes_rerun_stable() {
        let temp_dir = TempDir::new().unwrap();
        let src = temp_dir.path().join("API");
        fs::create_dir_all(&src).unwrap();
        create_test_file(&src, "A.swift", "import Foundation\nlet x = 1\n");
        let output = src.join("Z_Bundle.swift");

        let cfg = Config { skip_output: true, ..config(&src, &output) };
        run_merge(&cfg).unwrap();
        let result = run_merge(&cfg).unwrap();
        assert_eq!(fs::read_to_string(&output).unwrap(), "import Foundation\nlet x = 1\n");
        assert_eq!(result.stats.files_merged, 1);
    }

    #[test]
    fn test_leading_mode_keeps_repeated_comments() {
        let temp_dir = TempDir::new().unwrap();
        let src = temp_dir.path().join("API");
        fs::create_dir_all(&src).unwrap();
        create_test_file(&src, "A.swift", "// this does not import anything\nimport UIKit\n");
        create_test_file(&src, "B.swift", "// this does not import anything\nimport UIKit\n");
        let output = temp_dir.path().join("Bundle.swift");

        let cfg = Config { match_mode: MatchMode::Leading, ..config(&src, &output) };
        let result = run_merge(&cfg).unwrap();
        assert_eq!(
            fs::read_to_string(&output).unwrap(),
            "// this does not import anything\nimport UIKit\n// this does not import anything\n"
        );
        assert_eq!(result.stats.duplicates_dropped, 1);
    }

    #[test]
    fn test_anywhere_mode_drops_repeated_comments() {
        let temp_dir = TempDir::new().unwrap();
        let src = temp_dir.path().join("API");
        fs::create_dir_all(&src).unwrap();
        create_test_file(&src, "A.swift", "// this does not import anything\n");
        create_test_file(&src, "B.swift", "// this does not import anything\n");
        let output = temp_dir.path().join("Bundle.swift");

        run_merge(&config(&src, &output)).unwrap();
        assert_eq!(fs::read_to_string(&output).unwrap(), "// this does not import anything\n");
    }
}
