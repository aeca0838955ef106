use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use importcat_merge::Config;
use log::{debug, info};
use std::io::{BufWriter, Write};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "importcat")]
#[command(about = "Merge a directory of source files into one, dropping repeated imports", long_about = None)]
struct Cli {
    #[command(flatten)]
    config: Config,
}

fn main() -> Result<()> {
    env_logger::init();

    // stdio is blocked by LineWriter, use a BufWriter to reduce syscalls.
    // See https://github.com/rust-lang/rust/issues/60673
    let mut stdout = BufWriter::new(std::io::stdout());

    let cli = Cli::parse();
    let cfg = cli.config;
    debug!("Parsed CLI arguments: {:?}", cfg);

    let start = Instant::now();

    info!(
        "Merging {} into {} (match mode {:?})",
        cfg.source.display(),
        cfg.output.display(),
        cfg.match_mode
    );
    let result = importcat_merge::run_merge(&cfg)?;
    debug!("Dropped {} duplicate imports", result.dropped.len());

    if cfg.json {
        importcat_merge::print_json_report(&mut stdout, &result)?;
        return Ok(());
    }

    importcat_merge::print_report(&mut stdout, &result)?;
    writeln!(
        stdout,
        "\n{} Finished in {}ms on {} files.",
        "●".bright_blue(),
        start.elapsed().as_millis().to_string().cyan(),
        result.stats.files_merged.to_string().cyan()
    )?;
    stdout.flush()?;

    Ok(())
}
