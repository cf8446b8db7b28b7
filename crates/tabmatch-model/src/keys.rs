//! Key-column pairing and append direction.

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};
use crate::table::normalize_column_name;

/// Suffix appended to a key column name to form its resolved column.
pub const RESOLVED_SUFFIX: &str = "_t";

/// Name of the resolved column produced for `column`.
pub fn resolved_column_name(column: &str) -> String {
    format!("{column}{RESOLVED_SUFFIX}")
}

/// Which input table receives the resolved columns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppendDirection {
    /// The first table is the target; the second is the reference.
    First,
    /// The second table is the target; the first is the reference.
    #[default]
    Second,
}

/// One semantic attribute, named per table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyColumn {
    pub first: String,
    pub second: String,
}

/// Ordered key-column hierarchy.
///
/// Position matters: column `i` is only matched among rows that already agree
/// on columns `0..i`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyColumns {
    pairs: Vec<KeyColumn>,
}

impl KeyColumns {
    /// Pair two positional column lists. Names are normalized.
    pub fn new<S: AsRef<str>>(first: &[S], second: &[S]) -> Result<Self> {
        if first.len() != second.len() {
            return Err(ModelError::KeyListLength {
                first: first.len(),
                second: second.len(),
            });
        }
        if first.is_empty() {
            return Err(ModelError::EmptyKeyList);
        }
        for side in [first, second] {
            let mut seen = std::collections::BTreeSet::new();
            for name in side {
                let name = normalize_column_name(name.as_ref());
                if !seen.insert(name.clone()) {
                    return Err(ModelError::DuplicateColumn { column: name });
                }
            }
        }
        let pairs = first
            .iter()
            .zip(second)
            .map(|(a, b)| KeyColumn {
                first: normalize_column_name(a.as_ref()),
                second: normalize_column_name(b.as_ref()),
            })
            .collect();
        Ok(Self { pairs })
    }

    /// Parse two comma-separated column lists, e.g. `"State, City"`.
    pub fn parse(first: &str, second: &str) -> Result<Self> {
        Self::new(&split_list(first), &split_list(second))
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &KeyColumn> {
        self.pairs.iter()
    }

    pub fn first_names(&self) -> Vec<String> {
        self.pairs.iter().map(|p| p.first.clone()).collect()
    }

    pub fn second_names(&self) -> Vec<String> {
        self.pairs.iter().map(|p| p.second.clone()).collect()
    }

    /// Exchange the two sides of every pair.
    #[must_use]
    pub fn swapped(&self) -> Self {
        Self {
            pairs: self
                .pairs
                .iter()
                .map(|p| KeyColumn {
                    first: p.second.clone(),
                    second: p.first.clone(),
                })
                .collect(),
        }
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',').map(normalize_column_name).collect()
}
