use serde::Serialize;

use crate::report::RunSummary;
use crate::scheme::{Scheme, StainingAssignment};

#[derive(Serialize)]
struct RankedScheme<'a> {
    rank: usize,
    similarity: Option<f64>,
    assignments: &'a [StainingAssignment],
}

pub fn render_schemes_json(schemes: &[Scheme]) -> Result<String, serde_json::Error> {
    let ranked: Vec<RankedScheme<'_>> = schemes
        .iter()
        .enumerate()
        .map(|(i, s)| RankedScheme {
            rank: i + 1,
            similarity: s.similarity,
            assignments: &s.assignments,
        })
        .collect();
    serde_json::to_string_pretty(&ranked)
}

pub fn render_summary_json(summary: &RunSummary) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(summary)
}
