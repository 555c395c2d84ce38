use super::{rank, score_scheme};
use crate::scheme::{Scheme, StainingAssignment};
use crate::similarity::{ScoreParsePolicy, SimilarityTable};

fn scheme(label: &str, spectra: &[&str]) -> Scheme {
    Scheme::new(
        spectra
            .iter()
            .enumerate()
            .map(|(i, s)| StainingAssignment::new(&format!("{label}{i}"), s, "FL"))
            .collect(),
    )
}

fn table(rows: &[&str]) -> SimilarityTable {
    let mut t = SimilarityTable::new();
    t.load(rows.iter().copied(), ScoreParsePolicy::Zero);
    t
}

fn labels(schemes: &[Scheme]) -> Vec<String> {
    schemes
        .iter()
        .map(|s| s.assignments[0].antibody.clone())
        .collect()
}

#[test]
fn test_similarity_example_orders_lower_overlap_first() {
    let fitc = Scheme::new(vec![
        StainingAssignment::new("CD3", "FITC", "FL1"),
        StainingAssignment::new("CD4", "APC", "FL3"),
    ]);
    let pe = Scheme::new(vec![
        StainingAssignment::new("CD3", "PE", "FL2"),
        StainingAssignment::new("CD4", "APC", "FL3"),
    ]);
    let ranked = rank(vec![fitc, pe], &table(&["FITC,APC,0.9", "PE,APC,0.2"]));

    assert_eq!(ranked[0].assignments[0].spectrum, "PE");
    assert_eq!(ranked[0].similarity, Some(0.2));
    assert_eq!(ranked[1].assignments[0].spectrum, "FITC");
    assert_eq!(ranked[1].similarity, Some(0.9));
}

#[test]
fn test_score_is_max_over_pairs() {
    let t = table(&["A,B,0.1", "A,C,0.7", "B,C,0.3"]);
    assert_eq!(score_scheme(&scheme("x", &["A", "B", "C"]), &t), Some(0.7));
}

#[test]
fn test_missing_pairs_are_skipped() {
    let t = table(&["A,B,0.4"]);
    assert_eq!(score_scheme(&scheme("x", &["A", "B", "C"]), &t), Some(0.4));
    assert_eq!(score_scheme(&scheme("x", &["C", "D"]), &t), None);
}

#[test]
fn test_single_and_empty_schemes_have_no_score() {
    let t = table(&["A,B,0.4"]);
    assert_eq!(score_scheme(&scheme("x", &["A"]), &t), None);
    assert_eq!(score_scheme(&Scheme::default(), &t), None);
}

#[test]
fn test_unloaded_table_keeps_enumeration_order() {
    let input = vec![scheme("a", &["A", "B"]), scheme("b", &["B", "C"]), scheme("c", &["C", "A"])];
    let ranked = rank(input, &SimilarityTable::new());
    assert_eq!(labels(&ranked), vec!["a0", "b0", "c0"]);
    assert!(ranked.iter().all(|s| s.similarity.is_none()));
}

#[test]
fn test_ties_keep_relative_order() {
    let t = table(&["A,B,0.5", "C,D,0.5", "E,F,0.1", "G,H,0.5"]);
    let input = vec![
        scheme("first", &["A", "B"]),
        scheme("second", &["C", "D"]),
        scheme("low", &["E", "F"]),
        scheme("third", &["G", "H"]),
    ];
    let ranked = rank(input, &t);
    assert_eq!(labels(&ranked), vec!["low0", "first0", "second0", "third0"]);
}

#[test]
fn test_unknown_scores_sort_last() {
    let t = table(&["A,B,5.0", "C,D,0.0"]);
    let input = vec![
        scheme("unknown1", &["X", "Y"]),
        scheme("high", &["A", "B"]),
        scheme("unknown2", &["Y", "Z"]),
        scheme("zero", &["C", "D"]),
    ];
    let ranked = rank(input, &t);
    assert_eq!(labels(&ranked), vec!["zero0", "high0", "unknown10", "unknown20"]);
    assert_eq!(ranked[2].similarity, None);
}
