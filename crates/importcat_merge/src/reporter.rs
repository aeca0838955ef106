use std::{
    collections::HashMap,
    env,
    io::{self, Write},
    path::{Path, PathBuf},
};

use colored::Colorize;
use log::{debug, trace};

use crate::types::{DroppedImport, MergeResult};

/// Relativize a path to the current working directory for clickable links
fn relativize_to_cwd(path: &Path) -> String {
    let cwd = match env::current_dir() {
        Ok(cwd) => cwd,
        Err(_) => {
            debug!("Failed to get current directory");
            return path.display().to_string();
        }
    };

    let abs_path = if path.is_absolute() { path.to_path_buf() } else { cwd.join(path) };

    match make_relative(&abs_path, &cwd) {
        Some(rel_path) => {
            let result = rel_path.to_string_lossy().to_string();
            trace!("Relativized '{}' to '{}'", path.display(), result);
            result
        }
        None => {
            trace!("Could not relativize '{}', using original", path.display());
            path.display().to_string()
        }
    }
}

/// Create a relative path from `base` to `target`
fn make_relative(target: &Path, base: &Path) -> Option<PathBuf> {
    use std::path::Component;

    let mut target_components = target.components().peekable();
    let mut base_components = base.components().peekable();

    if target_components.peek() != base_components.peek() {
        return None;
    }

    while let (Some(t), Some(b)) = (target_components.peek(), base_components.peek()) {
        if t != b {
            break;
        }
        target_components.next();
        base_components.next();
    }

    let mut result = PathBuf::new();
    for _ in base_components {
        result.push("..");
    }
    for component in target_components {
        match component {
            Component::Normal(p) => result.push(p),
            Component::ParentDir => result.push(".."),
            Component::CurDir | Component::RootDir | Component::Prefix(_) => {}
        }
    }

    if result.as_os_str().is_empty() { Some(PathBuf::from(".")) } else { Some(result) }
}

pub fn print_report<W: Write>(writer: &mut W, result: &MergeResult) -> io::Result<()> {
    debug!("Printing report for {} dropped imports", result.dropped.len());

    if result.dropped.is_empty() {
        writeln!(writer, "{} No duplicate imports found", "✓".green().bold())?;
    } else {
        print_dropped_tree(writer, &result.dropped)?;
    }

    writeln!(writer, "{}", "─".repeat(60).dimmed())?;
    writeln!(writer, "{}", "Summary".bold())?;
    writeln!(writer, "  Source: {}", relativize_to_cwd(&result.source).blue())?;
    writeln!(writer, "  Files merged: {}", result.stats.files_merged.to_string().cyan())?;
    writeln!(
        writer,
        "  Lines: {} read, {} written",
        result.stats.lines_read.to_string().cyan(),
        result.stats.lines_written.to_string().cyan()
    )?;
    writeln!(writer, "  Unique imports: {}", result.stats.unique_imports.to_string().cyan())?;
    writeln!(
        writer,
        "  Duplicates dropped: {}",
        result.stats.duplicates_dropped.to_string().yellow().bold()
    )?;

    let output = relativize_to_cwd(&result.output);
    if result.written {
        writeln!(
            writer,
            "  Output: {} ({} bytes)",
            output.blue(),
            result.stats.output_bytes.to_string().cyan()
        )?;
    } else {
        writeln!(writer, "  Output: {} {}", output.blue(), "(dry run, not written)".dimmed())?;
    }

    writer.flush()?;
    Ok(())
}

fn print_dropped_tree<W: Write>(writer: &mut W, dropped: &[DroppedImport]) -> io::Result<()> {
    // Group by file, keeping merge order
    let mut order: Vec<&PathBuf> = Vec::new();
    let mut by_file: HashMap<&PathBuf, Vec<&DroppedImport>> = HashMap::new();
    for d in dropped {
        by_file
            .entry(&d.file)
            .or_insert_with(|| {
                order.push(&d.file);
                Vec::new()
            })
            .push(d);
    }
    debug!("Grouped dropped imports into {} files", order.len());

    writeln!(
        writer,
        "{} Dropped {} duplicate import line(s)\n",
        "●".bright_blue(),
        dropped.len().to_string().yellow()
    )?;

    for file in order {
        let file_dropped = &by_file[file];
        writeln!(writer, "{}", relativize_to_cwd(file).bright_white().bold())?;

        for (idx, d) in file_dropped.iter().enumerate() {
            let prefix = if idx == file_dropped.len() - 1 { "└──" } else { "├──" };
            writeln!(writer, "{}  line {}: {}", prefix.dimmed(), d.line, d.text.trim())?;
        }

        writeln!(writer)?;
    }

    Ok(())
}

pub fn print_json_report<W: Write>(writer: &mut W, result: &MergeResult) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *writer, result)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}
