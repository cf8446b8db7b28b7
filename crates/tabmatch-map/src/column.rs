//! Matching one target column against a reference value set.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::error::Result;
use crate::resolver::{MatchKind, SimilarityResolver};

/// Per-column resolution counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MatchStats {
    pub exact: usize,
    pub fuzzy: usize,
    /// Rows left without a value.
    pub unresolved: usize,
}

/// Resolved values in input row order, with counts.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedColumn {
    pub values: Vec<Option<String>>,
    pub stats: MatchStats,
}

/// Resolve every value against `reference`.
///
/// Missing values stay missing and are counted as unresolved. Fails with
/// [`MatchError::EmptyCandidates`](crate::MatchError::EmptyCandidates) if
/// `reference` is empty.
pub fn match_values<'v, I>(values: I, reference: &BTreeSet<String>) -> Result<ResolvedColumn>
where
    I: IntoIterator<Item = Option<&'v str>>,
{
    let mut resolver = SimilarityResolver::new(reference)?;
    let mut stats = MatchStats::default();
    let values = values
        .into_iter()
        .map(|value| {
            let Some(value) = value else {
                stats.unresolved += 1;
                return None;
            };
            let resolution = resolver.resolve(value);
            match resolution.kind {
                MatchKind::Exact => stats.exact += 1,
                MatchKind::Fuzzy { .. } => stats.fuzzy += 1,
            }
            Some(resolution.value.to_string())
        })
        .collect();
    Ok(ResolvedColumn { values, stats })
}

/// Resolve a whole column against `reference`. See [`match_values`].
pub fn match_column(
    target: &[Option<String>],
    reference: &BTreeSet<String>,
) -> Result<ResolvedColumn> {
    match_values(target.iter().map(Option::as_deref), reference)
}
