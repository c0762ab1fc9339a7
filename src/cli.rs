// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::types::TimeModel;

/// Command-line arguments for `npsag`.
#[derive(Debug, Clone, Default, Parser)]
#[command(
    name = "npsag",
    version,
    about = "Response-time analysis of non-preemptive fixed-priority job sets via schedule-abstraction graphs.",
    long_about = None
)]
pub struct CliArgs {
    /// Job set file (CSV, or TOML when the extension is `.toml`).
    #[arg(short = 'j', long, value_name = "PATH")]
    pub jobset: Option<PathBuf>,

    /// Precedence constraints (CSV: From TID, From JID, To TID, To JID).
    #[arg(short = 'p', long, value_name = "PATH")]
    pub precedence: Option<PathBuf>,

    /// Optional TOML config file; CLI flags take precedence over it.
    #[arg(short = 'c', long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable state merging.
    #[arg(short = 'n', long)]
    pub naive: bool,

    /// Enable partial-order reduction.
    #[arg(long)]
    pub por: bool,

    /// Stop at the first dead end or deadline miss.
    #[arg(long)]
    pub early_exit: bool,

    /// Time domain used for all values in the job set.
    #[arg(long, value_enum, value_name = "MODEL")]
    pub time_model: Option<TimeModel>,

    /// Maximum number of exploration rounds.
    #[arg(long, value_name = "ROUNDS")]
    pub max_depth: Option<usize>,

    /// Wall-clock budget in seconds.
    #[arg(long, value_name = "SECONDS")]
    pub timeout: Option<f64>,

    /// Write per-job response times as CSV.
    #[arg(short = 'o', long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Write the state graph in Graphviz DOT format.
    #[arg(long, value_name = "PATH")]
    pub dot: Option<PathBuf>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `NPSAG_LOG` or `warn` is used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

pub fn parse() -> CliArgs {
    CliArgs::parse()
}
