//! Best-match lookup of a string within a fixed candidate set.
//!
//! Scores use the normalized Indel similarity (`rapidfuzz::fuzz::ratio`)
//! scaled to 0-100. Comparison is case-sensitive.

use std::collections::{BTreeSet, HashMap};

use rapidfuzz::fuzz;

use crate::error::{MatchError, Result};

/// Similarity of two strings on a 0-100 scale.
pub fn similarity(left: &str, right: &str) -> f64 {
    fuzz::ratio(left.chars(), right.chars()) * 100.0
}

/// How a value was resolved.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MatchKind {
    /// The value is itself a candidate.
    Exact,
    /// Best-scoring candidate.
    Fuzzy { score: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolution<'a> {
    pub value: &'a str,
    pub kind: MatchKind,
}

/// Resolves strings against one candidate set, memoizing fuzzy results.
///
/// The cache lives as long as the resolver, and a resolver is bound to a
/// single candidate set, so results never leak between sets.
///
/// Candidates are scanned in sorted order and the first maximum wins.
#[derive(Debug)]
pub struct SimilarityResolver<'a> {
    candidates: &'a BTreeSet<String>,
    first: &'a str,
    cache: HashMap<String, (&'a str, f64)>,
    comparisons: usize,
}

impl<'a> SimilarityResolver<'a> {
    /// Fails with [`MatchError::EmptyCandidates`] if `candidates` is empty.
    pub fn new(candidates: &'a BTreeSet<String>) -> Result<Self> {
        let first = candidates.first().ok_or(MatchError::EmptyCandidates)?;
        Ok(Self {
            candidates,
            first: first.as_str(),
            cache: HashMap::new(),
            comparisons: 0,
        })
    }

    pub fn resolve(&mut self, value: &str) -> Resolution<'a> {
        if let Some(exact) = self.candidates.get(value) {
            return Resolution {
                value: exact.as_str(),
                kind: MatchKind::Exact,
            };
        }
        let cached = self.cache.get(value).copied();
        let (best, score) = match cached {
            Some(hit) => hit,
            None => {
                let found = self.best_match(value);
                self.cache.insert(value.to_string(), found);
                found
            }
        };
        Resolution {
            value: best,
            kind: MatchKind::Fuzzy { score },
        }
    }

    /// Number of similarity scores computed so far.
    pub fn comparisons(&self) -> usize {
        self.comparisons
    }

    pub fn candidates(&self) -> &'a BTreeSet<String> {
        self.candidates
    }

    fn best_match(&mut self, value: &str) -> (&'a str, f64) {
        let mut best = (self.first, f64::NEG_INFINITY);
        for candidate in self.candidates {
            self.comparisons += 1;
            let score = similarity(value, candidate);
            if score > best.1 {
                best = (candidate.as_str(), score);
            }
        }
        best
    }
}
