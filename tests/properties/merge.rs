//! Property tests for the three-way merge engine.

use proptest::prelude::*;

use contractor::domain::services::merge;

/// Distinct, marker-free lines so every base line is uniquely alignable
fn base_lines() -> impl Strategy<Value = Vec<String>> {
    (3usize..16).prop_map(|n| (0..n).map(|i| format!("line {}", i)).collect())
}

fn join(lines: &[String]) -> String {
    lines.iter().map(|l| format!("{}\n", l)).collect()
}

fn text() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(vec!["x", "y", "z", ""]), 0..12)
        .prop_map(|lines| lines.into_iter().map(|l| format!("{}\n", l)).collect())
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: a side equal to the base yields the other side verbatim.
    #[test]
    fn property_one_sided_changes_pass_through(base in text(), other in text()) {
        let taken = merge(&base, &base, &other).unwrap();
        prop_assert!(!taken.has_conflicts);
        prop_assert_eq!(taken.text, other.clone());

        let kept = merge(&base, &other, &base).unwrap();
        prop_assert!(!kept.has_conflicts);
        prop_assert_eq!(kept.text, other);
    }

    /// PROPERTY: identical edits on both sides merge cleanly.
    #[test]
    fn property_identical_edits_are_clean(base in text(), edit in text()) {
        let merged = merge(&base, &edit, &edit).unwrap();
        prop_assert!(!merged.has_conflicts);
        prop_assert_eq!(merged.text, edit);
    }

    /// PROPERTY: the conflict count matches the opening markers in the text.
    #[test]
    fn property_conflict_count_matches_markers(base in text(), local in text(), incoming in text()) {
        let merged = merge(&base, &local, &incoming).unwrap();
        let markers = merged.text.lines().filter(|l| l.starts_with("<<<<<<< ")).count();
        prop_assert_eq!(merged.conflicts, markers);
        prop_assert_eq!(merged.has_conflicts, markers > 0);
    }

    /// PROPERTY: edits separated by an untouched line never conflict.
    #[test]
    fn property_separated_edits_merge_cleanly(
        base in base_lines(),
        picks in (0usize..100, 0usize..100),
    ) {
        let n = base.len();
        let i = picks.0 % n;
        let j = picks.1 % n;
        prop_assume!(i.abs_diff(j) >= 2);

        let mut local = base.clone();
        local[i] = "local edit".to_string();
        let mut incoming = base.clone();
        incoming[j] = "incoming edit".to_string();
        let mut expected = base.clone();
        expected[i] = "local edit".to_string();
        expected[j] = "incoming edit".to_string();

        let merged = merge(&join(&base), &join(&local), &join(&incoming)).unwrap();
        prop_assert!(!merged.has_conflicts);
        prop_assert_eq!(merged.text, join(&expected));
    }

    /// PROPERTY: different edits to the same line produce exactly one conflict.
    #[test]
    fn property_same_line_edits_conflict(base in base_lines(), pick in 0usize..100) {
        let i = pick % base.len();
        let mut local = base.clone();
        local[i] = "local edit".to_string();
        let mut incoming = base.clone();
        incoming[i] = "incoming edit".to_string();

        let merged = merge(&join(&base), &join(&local), &join(&incoming)).unwrap();
        prop_assert_eq!(merged.conflicts, 1);
        let block = "<<<<<<< LOCAL\nlocal edit\n=======\nincoming edit\n>>>>>>> INCOMING\n";
        prop_assert!(merged.text.contains(block), "{}", merged.text);
    }
}
