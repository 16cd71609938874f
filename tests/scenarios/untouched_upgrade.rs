//! Scenario: Upgrading an Untouched Component
//!
//! Journey: A project never edits generated code and just upgrades.
//!
//! Success Criteria:
//! - Every upgraded file is byte-identical to a fresh install
//! - Upgrading again is a no-op

use crate::common::*;

#[test]
fn scenario_upgrade_equals_fresh_install() {
    for style in ["tailwind", "css-modules"] {
        let env = TestEnv::builder().with_button_contracts().build();
        assert_success!(env.run(&["install", "Button", "--version", "1.0.0", "--style", style]));
        assert_success!(env.run(&["upgrade", "Button", "--to", "1.1.0"]));
        assert_success!(env.run(&["upgrade", "Button"]));

        let fresh = TestEnv::builder().with_button_contracts().build();
        assert_success!(fresh.run(&["install", "Button", "--style", style]));

        for file in common_files(style) {
            assert_eq!(env.read(file), fresh.read(file), "{} ({})", file, style);
        }

        let again = env.run(&["upgrade", "Button"]);
        assert_success!(again);
        assert_output_contains!(again, "already at 2.0.0");
    }
}

fn common_files(style: &str) -> Vec<&'static str> {
    let mut files = vec![BUTTON_TSX, BUTTON_INDEX];
    if style == "css-modules" {
        files.push("src/components/Button/Button.module.css");
    }
    files
}
