//! Symmetric spectrum-to-spectrum similarity scores.

use std::collections::BTreeMap;

use clap::ValueEnum;
use serde::Serialize;
use tracing::{debug, warn};

use crate::catalog::RowStats;
use crate::input::split_row;

/// What to do with a score field that is not a finite, non-negative number.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ScoreParsePolicy {
    /// Keep the row with a score of zero.
    #[default]
    Zero,
    /// Drop the row so the pair stays unknown.
    Unknown,
}

impl ScoreParsePolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            ScoreParsePolicy::Zero => "zero",
            ScoreParsePolicy::Unknown => "unknown",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SimilarityTable {
    scores: BTreeMap<String, BTreeMap<String, f64>>,
    loaded: bool,
}

impl SimilarityTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the table with the given rows. There is no header row.
    pub fn load<I, S>(&mut self, rows: I, policy: ScoreParsePolicy) -> RowStats
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.scores.clear();
        let mut stats = RowStats::default();

        for (idx, line) in rows.into_iter().enumerate() {
            let line_no = idx + 1;
            let fields = split_row(line.as_ref());
            if fields.len() < 3 {
                warn!(line = line_no, "similarity row is too short; skipping");
                stats.skip();
                continue;
            }
            let spectrum_a = fields[0].trim();
            let spectrum_b = fields[1].trim();
            if spectrum_a.is_empty() || spectrum_b.is_empty() {
                warn!(line = line_no, "similarity row has an empty spectrum; skipping");
                stats.skip();
                continue;
            }
            let score = match parse_score(fields[2]) {
                Some(v) => v,
                None => match policy {
                    ScoreParsePolicy::Zero => {
                        warn!(
                            line = line_no,
                            field = fields[2].trim(),
                            "unparsable similarity score; using 0"
                        );
                        0.0
                    }
                    ScoreParsePolicy::Unknown => {
                        warn!(
                            line = line_no,
                            field = fields[2].trim(),
                            "unparsable similarity score; leaving pair unknown"
                        );
                        stats.skip();
                        continue;
                    }
                },
            };

            self.insert(spectrum_a, spectrum_b, score);
            debug!(line = line_no, spectrum_a, spectrum_b, score, "similarity row loaded");
            stats.accept();
        }

        self.loaded = true;
        stats
    }

    /// Stores `score` for both orderings of the pair.
    pub fn insert(&mut self, spectrum_a: &str, spectrum_b: &str, score: f64) {
        self.scores
            .entry(spectrum_a.to_string())
            .or_default()
            .insert(spectrum_b.to_string(), score);
        self.scores
            .entry(spectrum_b.to_string())
            .or_default()
            .insert(spectrum_a.to_string(), score);
    }

    pub fn lookup(&self, spectrum_a: &str, spectrum_b: &str) -> Option<f64> {
        self.scores.get(spectrum_a)?.get(spectrum_b).copied()
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Number of distinct unordered pairs.
    pub fn len(&self) -> usize {
        self.scores
            .iter()
            .map(|(a, row)| row.keys().filter(|b| a.as_str() <= b.as_str()).count())
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}

fn parse_score(field: &str) -> Option<f64> {
    let value = field.trim().parse::<f64>().ok()?;
    if value.is_finite() && value >= 0.0 {
        Some(value)
    } else {
        None
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/similarity/tests.rs"]
mod tests;
