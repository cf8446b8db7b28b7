use serde::Serialize;

use tabmatch_model::AppendDirection;

use crate::column::MatchStats;

/// Outcome of resolving one key column.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LevelReport {
    pub column: String,
    pub resolved_column: String,
    pub exact: usize,
    pub fuzzy: usize,
    pub unresolved: usize,
    /// Partitions matched against a reference partition.
    pub partitions: usize,
    /// Target partitions with no reference counterpart or no candidates.
    pub unmatched_partitions: usize,
}

impl LevelReport {
    pub(crate) fn record(&mut self, stats: MatchStats) {
        self.exact += stats.exact;
        self.fuzzy += stats.fuzzy;
    }
}

/// Outcome of a full reconciliation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MatchReport {
    pub direction: AppendDirection,
    pub rows: usize,
    pub levels: Vec<LevelReport>,
}

impl MatchReport {
    pub fn total_unresolved(&self) -> usize {
        self.levels.iter().map(|l| l.unresolved).sum()
    }

    /// True if every row received a value for every key column.
    pub fn fully_resolved(&self) -> bool {
        self.total_unresolved() == 0
    }
}
