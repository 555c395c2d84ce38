use std::cmp::Ordering;

use super::{Scheme, StainingAssignment, compare_scores};

#[test]
fn test_unknown_sorts_after_known() {
    assert_eq!(compare_scores(Some(10.0), None), Ordering::Less);
    assert_eq!(compare_scores(None, Some(0.0)), Ordering::Greater);
    assert_eq!(compare_scores(None, None), Ordering::Equal);
    assert_eq!(compare_scores(Some(0.2), Some(0.9)), Ordering::Less);
    assert_eq!(compare_scores(Some(0.5), Some(0.5)), Ordering::Equal);
}

#[test]
fn test_distinct_spectra_check() {
    let ok = Scheme::new(vec![
        StainingAssignment::new("CD3", "FITC", "FL1"),
        StainingAssignment::new("CD4", "PE", "FL1"),
    ]);
    let bad = Scheme::new(vec![
        StainingAssignment::new("CD3", "FITC", "FL1"),
        StainingAssignment::new("CD4", "FITC", "FL2"),
    ]);
    assert!(ok.has_distinct_spectra());
    assert!(!bad.has_distinct_spectra());
    assert!(Scheme::default().has_distinct_spectra());
}

#[test]
fn test_score_label() {
    let mut scheme = Scheme::default();
    assert_eq!(scheme.score_label(), "unknown");
    scheme.similarity = Some(0.25);
    assert_eq!(scheme.score_label(), "0.250000");
}
