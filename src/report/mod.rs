pub mod json;
pub mod text;

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;
use thiserror::Error;

use crate::engine::LoadOutcome;
use crate::scheme::Scheme;
use crate::similarity::ScoreParsePolicy;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub tool: String,
    pub version: String,
    pub library: LoadOutcome,
    pub similarity: Option<LoadOutcome>,
    pub unparsable_score: String,
    pub selected: Vec<String>,
    pub unknown_selections: Vec<String>,
    pub n_schemes: usize,
    pub truncated: bool,
    pub best_similarity: Option<f64>,
    pub worst_similarity: Option<f64>,
    pub unknown_similarity_schemes: usize,
}

impl RunSummary {
    pub fn new(
        library: LoadOutcome,
        similarity: Option<LoadOutcome>,
        score_policy: ScoreParsePolicy,
        selected: Vec<String>,
        unknown_selections: Vec<String>,
    ) -> Self {
        Self {
            tool: "kira-stainscheme".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            library,
            similarity,
            unparsable_score: score_policy.as_str().to_string(),
            selected,
            unknown_selections,
            n_schemes: 0,
            truncated: false,
            best_similarity: None,
            worst_similarity: None,
            unknown_similarity_schemes: 0,
        }
    }

    /// Fills the scheme statistics from a ranked list.
    pub fn with_schemes(mut self, schemes: &[Scheme], truncated: bool) -> Self {
        let known: Vec<f64> = schemes.iter().filter_map(|s| s.similarity).collect();
        self.n_schemes = schemes.len();
        self.truncated = truncated;
        self.best_similarity = known.iter().copied().reduce(f64::min);
        self.worst_similarity = known.iter().copied().reduce(f64::max);
        self.unknown_similarity_schemes = schemes.len() - known.len();
        self
    }
}

/// Writes `schemes.txt`, `schemes.json` and `summary.json` into `out_dir`.
pub fn write_reports(
    out_dir: &Path,
    schemes: &[Scheme],
    summary: &RunSummary,
) -> Result<(), ReportError> {
    fs::create_dir_all(out_dir)?;

    let text = text::render_schemes_text(schemes, None);
    write_text(&out_dir.join("schemes.txt"), &text)?;

    let json = json::render_schemes_json(schemes)?;
    write_text(&out_dir.join("schemes.json"), &json)?;

    let json = json::render_summary_json(summary)?;
    write_text(&out_dir.join("summary.json"), &json)?;

    Ok(())
}

fn write_text(path: &Path, contents: &str) -> std::io::Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    w.write_all(contents.as_bytes())?;
    if !contents.ends_with('\n') {
        w.write_all(b"\n")?;
    }
    w.flush()
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/mod.rs"]
mod tests;
