use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::json::{render_schemes_json, render_summary_json};
use super::{RunSummary, write_reports};
use crate::engine::LoadOutcome;
use crate::scheme::{Scheme, StainingAssignment};
use crate::similarity::ScoreParsePolicy;

static DIR_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn make_temp_dir() -> PathBuf {
    let mut dir = std::env::temp_dir();
    let id = DIR_COUNTER.fetch_add(1, Ordering::SeqCst);
    dir.push(format!("kira_stainscheme_report_{}_{}", std::process::id(), id));
    dir
}

fn schemes() -> Vec<Scheme> {
    let mut best = Scheme::new(vec![
        StainingAssignment::new("CD3", "PE", "FL2"),
        StainingAssignment::new("CD4", "APC", "FL3"),
    ]);
    best.similarity = Some(0.2);
    let unknown = Scheme::new(vec![
        StainingAssignment::new("CD3", "FITC", "FL1"),
        StainingAssignment::new("CD4", "APC", "FL3"),
    ]);
    vec![best, unknown]
}

fn summary() -> RunSummary {
    RunSummary::new(
        LoadOutcome {
            success: true,
            source: "lib.txt".to_string(),
            accepted_rows: 3,
            skipped_rows: 1,
        },
        None,
        ScoreParsePolicy::Zero,
        vec!["CD3".to_string(), "CD4".to_string()],
        vec![],
    )
}

#[test]
fn test_summary_scheme_statistics() {
    let s = summary().with_schemes(&schemes(), true);
    assert_eq!(s.n_schemes, 2);
    assert!(s.truncated);
    assert_eq!(s.best_similarity, Some(0.2));
    assert_eq!(s.worst_similarity, Some(0.2));
    assert_eq!(s.unknown_similarity_schemes, 1);
}

#[test]
fn test_schemes_json_structure() {
    let json = render_schemes_json(&schemes()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    let arr = value.as_array().unwrap();
    assert_eq!(arr.len(), 2);
    assert_eq!(arr[0]["rank"], 1);
    assert_eq!(arr[0]["similarity"], 0.2);
    assert!(arr[1]["similarity"].is_null());
    assert_eq!(arr[0]["assignments"][1]["spectrum"], "APC");
    assert_eq!(arr[0]["assignments"][0]["antibody"], "CD3");
}

#[test]
fn test_summary_json_fields() {
    let json = render_summary_json(&summary().with_schemes(&schemes(), false)).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["tool"], "kira-stainscheme");
    assert_eq!(value["unparsable_score"], "zero");
    assert_eq!(value["library"]["accepted_rows"], 3);
    assert_eq!(value["library"]["skipped_rows"], 1);
    assert!(value["similarity"].is_null());
    assert_eq!(value["n_schemes"], 2);
}

#[test]
fn test_write_reports_creates_files() {
    let dir = make_temp_dir().join("nested");
    let schemes = schemes();
    write_reports(&dir, &schemes, &summary().with_schemes(&schemes, false)).unwrap();

    let text = fs::read_to_string(dir.join("schemes.txt")).unwrap();
    assert!(text.starts_with("Scheme #1 (similarity: 0.200000)\n"));
    assert!(text.ends_with("Found 2 valid staining schemes\n"));

    let parsed: Vec<Scheme> = {
        let raw: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(dir.join("schemes.json")).unwrap()).unwrap();
        raw.as_array()
            .unwrap()
            .iter()
            .map(|v| Scheme {
                assignments: serde_json::from_value(v["assignments"].clone()).unwrap(),
                similarity: v["similarity"].as_f64(),
            })
            .collect()
    };
    assert_eq!(parsed, schemes);
    assert!(dir.join("summary.json").exists());
}
