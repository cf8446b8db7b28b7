use std::fs::File;
use std::io::{BufRead, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result, bail};
use tracing::{info, info_span};

use tabmatch_ingest::{WriteOptions, check_columns, read_csv_headers};
use tabmatch_map::{MatchReport, ReconcileOptions, Reconciler};
use tabmatch_model::KeyColumns;

use crate::cli::ReconcileArgs;
use crate::prompt::confirm_overwrite;

/// Result of a completed matching run.
#[derive(Debug)]
pub struct RunResult {
    pub report: MatchReport,
    /// Where the output was written; `None` for a dry run.
    pub destination: Option<PathBuf>,
}

#[derive(Debug)]
pub enum Outcome {
    Completed(RunResult),
    /// The user declined to overwrite the destination.
    Declined,
}

/// Check both inputs and return the parsed key columns.
///
/// Fails if a file is missing, the key lists do not pair up, or a file's
/// header lacks one of its key columns.
pub fn validate_inputs(args: &ReconcileArgs) -> Result<KeyColumns> {
    for path in [&args.first_csv, &args.second_csv] {
        if !path.is_file() {
            bail!("file {} is not present", path.display());
        }
    }
    let keys = KeyColumns::parse(&args.common_columns_1, &args.common_columns_2)
        .context("invalid key column lists")?;
    require_headers(&args.first_csv, &keys.first_names())?;
    require_headers(&args.second_csv, &keys.second_names())?;
    Ok(keys)
}

fn require_headers(path: &Path, columns: &[String]) -> Result<()> {
    let headers =
        read_csv_headers(path).with_context(|| format!("read header: {}", path.display()))?;
    check_columns(path, &headers, columns)?;
    Ok(())
}

/// Validate, match, and write the augmented table.
///
/// `input` and `output` carry the overwrite confirmation dialogue.
pub fn run_reconcile<R: BufRead, W: Write>(
    args: &ReconcileArgs,
    log_data: bool,
    input: R,
    mut output: W,
) -> Result<Outcome> {
    let keys = validate_inputs(args)?;

    if !args.dry_run && !args.yes && args.destination.exists() {
        let accepted = confirm_overwrite(&args.destination, input, &mut output)
            .context("read overwrite confirmation")?;
        if !accepted {
            writeln!(
                output,
                "Please enter a different destination filename and run again."
            )?;
            return Ok(Outcome::Declined);
        }
    }

    let span = info_span!(
        "run",
        first = %args.first_csv.display(),
        second = %args.second_csv.display()
    );
    let _guard = span.enter();
    let start = Instant::now();

    let options = ReconcileOptions::default()
        .with_direction(args.append_in.into())
        .with_log_values(log_data);
    let reconciliation = Reconciler::from_csv(&args.first_csv, &args.second_csv, &keys, options)
        .context("prepare tables")?
        .run()
        .context("match key columns")?;

    let destination = if args.dry_run {
        None
    } else {
        reconciliation
            .save(
                &args.destination,
                WriteOptions {
                    include_index: args.index,
                },
            )
            .with_context(|| format!("write {}", args.destination.display()))?;
        Some(args.destination.clone())
    };

    if let Some(path) = &args.summary_json {
        write_report(&reconciliation.report, path)?;
    }

    info!(
        rows = reconciliation.report.rows,
        unresolved = reconciliation.report.total_unresolved(),
        duration_ms = start.elapsed().as_millis(),
        "reconciliation complete"
    );
    Ok(Outcome::Completed(RunResult {
        report: reconciliation.report,
        destination,
    }))
}

fn write_report(report: &MatchReport, path: &Path) -> Result<()> {
    let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, report)
        .with_context(|| format!("write {}", path.display()))?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}
