//! Staining schemes: assignment types, the backtracking search and ranking.

pub mod rank;
pub mod search;

use std::cmp::Ordering;
use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

pub use rank::{rank, score_scheme};
pub use search::{SearchLimits, SearchOutcome, generate, generate_with_limits};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StainingAssignment {
    pub antibody: String,
    pub spectrum: String,
    pub channel: String,
}

impl StainingAssignment {
    pub fn new(antibody: &str, spectrum: &str, channel: &str) -> Self {
        Self {
            antibody: antibody.to_string(),
            spectrum: spectrum.to_string(),
            channel: channel.to_string(),
        }
    }
}

/// One assignment per selected antibody. `similarity` is `None` until ranked
/// against a loaded table, and stays `None` when no pair had a known score.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scheme {
    pub assignments: Vec<StainingAssignment>,
    pub similarity: Option<f64>,
}

impl Scheme {
    pub fn new(assignments: Vec<StainingAssignment>) -> Self {
        Self {
            assignments,
            similarity: None,
        }
    }

    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    pub fn spectra(&self) -> impl Iterator<Item = &str> {
        self.assignments.iter().map(|a| a.spectrum.as_str())
    }

    pub fn has_distinct_spectra(&self) -> bool {
        let mut seen = BTreeSet::new();
        self.spectra().all(|s| seen.insert(s))
    }

    pub fn score_label(&self) -> String {
        match self.similarity {
            Some(v) => format_score(v),
            None => "unknown".to_string(),
        }
    }
}

pub fn format_score(v: f64) -> String {
    format!("{:.6}", v)
}

/// Ascending by score; an unknown score sorts after every known one.
pub fn compare_scores(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/scheme/mod.rs"]
mod tests;
