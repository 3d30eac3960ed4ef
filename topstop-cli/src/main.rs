//! # TOPSTOP CLI - Circuit Topology Annotation
//!
//! Runs the topstop pipeline over every `.fa` / `.fasta` file of a folder.
//!
//! ## Usage
//!
//! ```bash
//! # Process the current directory
//! topstop
//!
//! # Process another folder with its own code table
//! topstop --folder runs/2024-05 --config codes.cfg
//!
//! # Four files at a time, no progress bars
//! topstop -f runs/2024-05 -t 4 --quiet
//! ```
//!
//! ## Options
//!
//! - `-f, --folder <DIR>`: Input folder (default: current directory)
//! - `-c, --config <FILE>`: Code table, relative to the folder (default: `_topstop_code.cfg`)
//! - `-t, --threads <N>`: Files processed concurrently (default: 1)
//! - `--log-file <FILE>`: Log destination (default: `<folder>/Log/topstop.log`)
//! - `-q, --quiet`: No progress bars or summary line (alias `--silent`)
//!
//! Results land in `<folder>/OUTPUT/`. Set `RUST_LOG` to change the log
//! level.

mod logging;
mod progress;

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use clap::{value_parser, Arg, ArgAction, Command};
use topstop_core::config::TopstopConfig;
use topstop_core::constants::DEFAULT_CONFIG_FILENAME;
use topstop_core::TopstopPipeline;
use tracing::{error, info};

use crate::logging::{human_time, init_file_logging};
use crate::progress::Display;

fn cli() -> Command {
    Command::new("topstop")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Circuit topology annotation of nucleotide sequences")
        .arg(
            Arg::new("folder")
                .short('f')
                .long("folder")
                .value_name("DIR")
                .value_parser(value_parser!(PathBuf))
                .help("Folder with the code table and sequence files (default: current directory)"),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .value_parser(value_parser!(PathBuf))
                .default_value(DEFAULT_CONFIG_FILENAME)
                .help("Code table file, relative to the folder"),
        )
        .arg(
            Arg::new("threads")
                .short('t')
                .long("threads")
                .value_name("N")
                .value_parser(value_parser!(usize))
                .help("Number of files processed concurrently"),
        )
        .arg(
            Arg::new("log-file")
                .long("log-file")
                .value_name("FILE")
                .value_parser(value_parser!(PathBuf))
                .help("Log file (default: <folder>/Log/topstop.log)"),
        )
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .visible_alias("silent")
                .action(ArgAction::SetTrue)
                .help("Quiet mode"),
        )
}

/// Main entry point for the topstop CLI.
///
/// Exits with status 0 when the run completed (individual files may still
/// have failed, see the log) and 1 when the run could not start.
fn main() -> ExitCode {
    let matches = cli().get_matches();

    let folder = matches
        .get_one::<PathBuf>("folder")
        .cloned()
        .unwrap_or_else(|| PathBuf::from("."));
    let quiet = matches.get_flag("quiet");
    let config = TopstopConfig {
        input_folder: folder.clone(),
        config_filename: matches
            .get_one::<PathBuf>("config")
            .cloned()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILENAME)),
        num_threads: matches.get_one::<usize>("threads").copied(),
        quiet,
        ..Default::default()
    };

    let log_file = matches
        .get_one::<PathBuf>("log-file")
        .cloned()
        .unwrap_or_else(|| folder.join("Log").join("topstop.log"));
    if let Err(e) = init_file_logging(&log_file) {
        eprintln!("Cannot write log file {}: {e}", log_file.display());
    }

    let started = Instant::now();
    let pipeline = TopstopPipeline::with_progress(config, Display::new(!quiet));
    let result = pipeline.run();
    let elapsed = started.elapsed();
    info!(
        "Folder {} took {} (more precisely, {:.3} sec) to process.",
        folder.display(),
        human_time(elapsed),
        elapsed.as_secs_f64()
    );

    match result {
        Ok(report) => {
            if !quiet {
                eprintln!(
                    "Processing complete! {} files, {} positions, {} failed, in {}.",
                    report.files.len(),
                    report.total_positions(),
                    report.failures.len(),
                    human_time(elapsed)
                );
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Error processing folder {}: {e}", folder.display());
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
