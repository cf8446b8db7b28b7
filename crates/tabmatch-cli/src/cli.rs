//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use tabmatch_model::AppendDirection;

#[derive(Parser)]
#[command(
    name = "tabmatch",
    version,
    about = "Append fuzzy-matched key columns from one CSV table to another",
    long_about = "Align the key columns of two CSV tables that spell the same values \
                  differently.\n\n\
                  Each key column of the target table is matched against the reference \
                  table's values and written next to it as <column>_t. Key columns form a \
                  hierarchy: a later column is only matched among reference rows that \
                  agree on the earlier ones."
)]
pub struct Cli {
    #[command(flatten)]
    pub reconcile: ReconcileArgs,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(long = "log-format", value_enum, default_value = "pretty")]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Allow cell values in log output.
    #[arg(long = "log-data")]
    pub log_data: bool,
}

#[derive(Args, Debug, Clone)]
pub struct ReconcileArgs {
    /// CSV file for the first table.
    #[arg(long = "firstcsv", value_name = "PATH")]
    pub first_csv: PathBuf,

    /// CSV file for the second table.
    #[arg(long = "secondcsv", value_name = "PATH")]
    pub second_csv: PathBuf,

    /// Destination CSV file.
    #[arg(long = "destination", value_name = "PATH", default_value = "output.csv")]
    pub destination: PathBuf,

    /// Comma-separated key columns of the first table.
    #[arg(long = "commoncolumns1", value_name = "COLUMNS")]
    pub common_columns_1: String,

    /// Comma-separated key columns of the second table, in the same order.
    #[arg(long = "commoncolumns2", value_name = "COLUMNS")]
    pub common_columns_2: String,

    /// Table that receives the matched columns.
    #[arg(long = "in", value_enum, default_value = "second")]
    pub append_in: AppendArg,

    /// Overwrite an existing destination without asking.
    #[arg(short = 'y', long = "yes")]
    pub yes: bool,

    /// Match and report without writing the destination file.
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Write a leading row-index column.
    #[arg(long = "index")]
    pub index: bool,

    /// Also write the match report as JSON.
    #[arg(long = "summary-json", value_name = "PATH")]
    pub summary_json: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum AppendArg {
    First,
    Second,
}

impl From<AppendArg> for AppendDirection {
    fn from(value: AppendArg) -> Self {
        match value {
            AppendArg::First => Self::First,
            AppendArg::Second => Self::Second,
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
