//! Property tests for the line diff engine.

use proptest::prelude::*;

use contractor::domain::services::{diff, stats, LineKind};

fn text() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(vec!["a", "b", "c", "d", ""]), 0..24).prop_map(
        |lines| {
            lines
                .into_iter()
                .map(|l| format!("{}\n", l))
                .collect::<String>()
        },
    )
}

fn side(hunks: &[contractor::domain::services::DiffHunk], skip: LineKind) -> Vec<String> {
    hunks
        .iter()
        .flat_map(|h| h.lines.iter())
        .filter(|l| l.kind != skip)
        .map(|l| l.text.clone())
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: identical texts never produce hunks.
    #[test]
    fn property_identical_texts_have_no_hunks(a in text(), context in 0usize..5) {
        prop_assert!(diff(&a, &a, context).is_empty());
    }

    /// PROPERTY: the net line change equals the difference in line counts.
    #[test]
    fn property_stats_account_for_every_line(a in text(), b in text(), context in 0usize..5) {
        let s = stats(&diff(&a, &b, context));
        let net = s.additions as i64 - s.deletions as i64;
        prop_assert_eq!(net, b.lines().count() as i64 - a.lines().count() as i64);
    }

    /// PROPERTY: with unlimited context one hunk reproduces both texts.
    #[test]
    fn property_full_context_reconstructs_both_sides(a in text(), b in text()) {
        let hunks = diff(&a, &b, 1000);
        if a == b {
            prop_assert!(hunks.is_empty());
        } else {
            prop_assert_eq!(hunks.len(), 1);
            let old: Vec<String> = a.lines().map(str::to_string).collect();
            let new: Vec<String> = b.lines().map(str::to_string).collect();
            prop_assert_eq!(side(&hunks, LineKind::Added), old);
            prop_assert_eq!(side(&hunks, LineKind::Removed), new);
        }
    }

    /// PROPERTY: hunks are ordered and never overlap on either side.
    #[test]
    fn property_hunks_are_disjoint_and_ordered(a in text(), b in text(), context in 0usize..4) {
        let hunks = diff(&a, &b, context);
        for pair in hunks.windows(2) {
            prop_assert!(pair[0].old_start + pair[0].old_count() < pair[1].old_start + 1);
            prop_assert!(pair[0].start_line + pair[0].new_count() < pair[1].start_line + 1);
        }
    }
}
