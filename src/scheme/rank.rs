use tracing::debug;

use crate::scheme::{Scheme, compare_scores};
use crate::similarity::SimilarityTable;

/// Worst-case pairwise similarity of the scheme's spectra. Pairs missing
/// from the table are skipped; `None` if no pair had a score.
pub fn score_scheme(scheme: &Scheme, table: &SimilarityTable) -> Option<f64> {
    let groups = &scheme.assignments;
    let mut max_similarity: Option<f64> = None;
    for i in 0..groups.len() {
        for j in (i + 1)..groups.len() {
            let spectrum_a = groups[i].spectrum.as_str();
            let spectrum_b = groups[j].spectrum.as_str();
            match table.lookup(spectrum_a, spectrum_b) {
                Some(v) => {
                    max_similarity = Some(max_similarity.map_or(v, |m| m.max(v)));
                }
                None => {
                    debug!(spectrum_a, spectrum_b, "similarity is missing; pair skipped");
                }
            }
        }
    }
    max_similarity
}

/// Scores every scheme and stable-sorts ascending, unknown scores last.
pub fn rank(mut schemes: Vec<Scheme>, table: &SimilarityTable) -> Vec<Scheme> {
    let loaded = table.is_loaded();
    for scheme in &mut schemes {
        scheme.similarity = if loaded {
            score_scheme(scheme, table)
        } else {
            None
        };
    }
    schemes.sort_by(|a, b| compare_scores(a.similarity, b.similarity));
    schemes
}

#[cfg(test)]
#[path = "../../tests/src_inline/scheme/rank.rs"]
mod tests;
