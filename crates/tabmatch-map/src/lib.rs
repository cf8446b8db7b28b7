//! Fuzzy alignment of key columns between a reference and a target table.
//!
//! Matching is hierarchical: the first key column is matched against every
//! reference value, each later column only against reference rows that share
//! the target row's already-resolved values for the earlier columns.

#![deny(unsafe_code)]

pub mod column;
pub mod error;
pub mod hierarchy;
pub mod reconcile;
pub mod report;
pub mod resolver;

pub use column::{MatchStats, ResolvedColumn, match_column, match_values};
pub use error::{MatchError, Result};
pub use hierarchy::{match_hierarchical, resolve_level};
pub use reconcile::{ReconcileOptions, Reconciler, Reconciliation, TableRole};
pub use report::{LevelReport, MatchReport};
pub use resolver::{MatchKind, Resolution, SimilarityResolver, similarity};
