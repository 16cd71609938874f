//! Property tests for the conflict resolver.

use std::collections::HashSet;

use proptest::prelude::*;

use contractor::domain::services::resolve;
use contractor::domain::services::resolver::union_tokens;

fn tokens() -> impl Strategy<Value = Vec<&'static str>> {
    prop::collection::vec(
        prop::sample::select(vec![
            "inline-flex", "px-2", "py-1", "rounded-md", "shadow-sm", "hover:bg-gray-100", "text-sm",
        ]),
        1..6,
    )
}

fn plain_text() -> impl Strategy<Value = String> {
    prop::collection::vec("[a-z =;\"]{0,20}", 0..10)
        .prop_map(|lines| lines.into_iter().map(|l| format!("{}\n", l)).collect())
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: text without conflict blocks passes through untouched.
    #[test]
    fn property_marker_free_text_is_unchanged(text in plain_text()) {
        let outcome = resolve(&text);
        prop_assert_eq!(outcome.text, text);
        prop_assert!(!outcome.changed);
        prop_assert!(!outcome.still_has_conflicts);
        prop_assert_eq!(outcome.resolved, 0);
    }

    /// PROPERTY: the union keeps every token once, local tokens first.
    #[test]
    fn property_union_is_ordered_and_complete(local in tokens(), incoming in tokens()) {
        let union = union_tokens(&local.join(" "), &incoming.join(" "));
        let out: Vec<&str> = union.split(' ').collect();

        let unique: HashSet<&str> = out.iter().copied().collect();
        prop_assert_eq!(unique.len(), out.len());
        for token in local.iter().chain(incoming.iter()) {
            prop_assert!(unique.contains(token));
        }
        prop_assert_eq!(out[0], local[0]);
    }

    /// PROPERTY: class-list conflicts on the same binding always resolve.
    #[test]
    fn property_class_assignment_conflicts_resolve(
        before in plain_text(),
        local in tokens(),
        incoming in tokens(),
    ) {
        let block = format!(
            "<<<<<<< LOCAL\nconst base = \"{}\";\n=======\nconst base = \"{}\";\n>>>>>>> INCOMING 1.1.0\n",
            local.join(" "),
            incoming.join(" ")
        );
        let outcome = resolve(&format!("{}{}", before, block));

        prop_assert!(!outcome.still_has_conflicts);
        prop_assert_eq!(outcome.resolved, 1);
        let expected = format!(
            "{}const base = \"{}\";\n",
            before,
            union_tokens(&local.join(" "), &incoming.join(" "))
        );
        prop_assert_eq!(outcome.text, expected);
    }

    /// PROPERTY: conflicts between different bindings are left alone.
    #[test]
    fn property_different_bindings_stay_conflicted(local in tokens(), incoming in tokens()) {
        let text = format!(
            "<<<<<<< LOCAL\nconst base = \"{}\";\n=======\nconst extra = \"{}\";\n>>>>>>> INCOMING 1.1.0\n",
            local.join(" "),
            incoming.join(" ")
        );
        let outcome = resolve(&text);
        prop_assert!(outcome.still_has_conflicts);
        prop_assert_eq!(outcome.text, text);
    }
}
