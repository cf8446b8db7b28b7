//! Hierarchical grouped matching across an ordered list of key columns.

use tracing::{debug, info, info_span, warn};

use tabmatch_model::{Column, Table, resolved_column_name};

use crate::column::{match_column, match_values};
use crate::error::{MatchError, Result};
use crate::reconcile::ReconcileOptions;
use crate::report::LevelReport;

const REDACTED_VALUE: &str = "[REDACTED]";

fn describe_partition(key: &[String], options: &ReconcileOptions) -> String {
    if options.log_values {
        key.join(" / ")
    } else {
        REDACTED_VALUE.to_string()
    }
}

/// Resolve every key column in order, adding one `<key>_t` column per key
/// to `target`.
///
/// Both tables must already use the same names for the key columns.
pub fn match_hierarchical(
    reference: &Table,
    target: &mut Table,
    keys: &[String],
    options: &ReconcileOptions,
) -> Result<Vec<LevelReport>> {
    (0..keys.len())
        .map(|level| resolve_level(reference, target, keys, level, options))
        .collect()
}

/// Resolve key column `level` and store it as `<key>_t` in `target`.
///
/// Level 0 is matched against every reference value. Later levels are
/// matched per partition: reference rows grouped by their original values
/// for keys `0..level`, target rows grouped by their resolved values for
/// the same keys. A target partition without a reference counterpart, or
/// whose counterpart has no values for this key, is left unresolved.
///
/// Levels below `level` must already be resolved.
pub fn resolve_level(
    reference: &Table,
    target: &mut Table,
    keys: &[String],
    level: usize,
    options: &ReconcileOptions,
) -> Result<LevelReport> {
    let column = keys.get(level).ok_or(MatchError::LevelOutOfRange {
        level,
        levels: keys.len(),
    })?;
    let span = info_span!("level", level, column = %column);
    let _guard = span.enter();

    let mut report = LevelReport {
        column: column.clone(),
        resolved_column: resolved_column_name(column),
        ..LevelReport::default()
    };
    let mut resolved: Vec<Option<String>> = vec![None; target.row_count()];

    if level == 0 {
        let candidates = reference.distinct_values(column)?;
        match match_column(target.values(column)?, &candidates) {
            Ok(matched) => {
                report.partitions = 1;
                report.record(matched.stats);
                resolved = matched.values;
            }
            Err(MatchError::EmptyCandidates) => {
                report.unmatched_partitions = 1;
                warn!("reference column has no values; leaving column unresolved");
            }
            Err(other) => return Err(other),
        }
    } else {
        let prefix = &keys[..level];
        let resolved_prefix: Vec<String> =
            prefix.iter().map(|k| resolved_column_name(k)).collect();
        let reference_groups = reference.group_rows(prefix)?;
        let target_groups = target.group_rows(&resolved_prefix)?;
        let values = target.values(column)?;

        for (key, rows) in &target_groups {
            let Some(reference_rows) = reference_groups.get(key) else {
                report.unmatched_partitions += 1;
                warn!(
                    partition = %describe_partition(key, options),
                    rows = rows.len(),
                    "no reference partition; leaving rows unresolved"
                );
                continue;
            };
            let candidates = reference.distinct_values_in(column, reference_rows)?;
            debug!(
                partition = %describe_partition(key, options),
                rows = rows.len(),
                candidates = candidates.len(),
                "matching partition"
            );
            let partition_values = rows.iter().map(|&row| values[row].as_deref());
            let matched = match match_values(partition_values, &candidates) {
                Ok(matched) => matched,
                Err(MatchError::EmptyCandidates) => {
                    report.unmatched_partitions += 1;
                    warn!(
                        partition = %describe_partition(key, options),
                        rows = rows.len(),
                        "reference partition has no values; leaving rows unresolved"
                    );
                    continue;
                }
                Err(other) => return Err(other),
            };
            report.partitions += 1;
            report.record(matched.stats);
            for (&row, value) in rows.iter().zip(matched.values) {
                resolved[row] = value;
            }
        }
    }

    report.unresolved = resolved.iter().filter(|v| v.is_none()).count();
    target.set_column(Column::new(report.resolved_column.clone(), resolved))?;
    info!(
        exact = report.exact,
        fuzzy = report.fuzzy,
        unresolved = report.unresolved,
        partitions = report.partitions,
        unmatched_partitions = report.unmatched_partitions,
        "key column resolved"
    );
    Ok(report)
}
