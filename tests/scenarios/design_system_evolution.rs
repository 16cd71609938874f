//! Scenario: Following a Design System Across Releases
//!
//! Journey: A team customizes Button and keeps pulling upstream releases.
//!
//! Steps:
//! 1. Install Button 1.0.0
//! 2. Add a shadow class and an extra export locally
//! 3. Upgrade to 1.1.0 - the class lists are unioned automatically
//! 4. Upgrade to 2.0.0 - clean merge on top of the new baseline
//!
//! Success Criteria:
//! - Local customizations survive both upgrades
//! - Upstream changes land in the same file
//! - Status shows the latest version with a modified artifact

use crate::common::*;

#[test]
fn scenario_customizations_survive_two_upgrades() {
    let env = TestEnv::builder().with_button_contracts().build();

    // Step 1
    assert_success!(env.run(&["install", "Button", "--version", "1.0.0"]));

    // Step 2
    env.replace(
        BUTTON_TSX,
        "const base = \"inline-flex items-center\";",
        "const base = \"inline-flex items-center shadow-sm\";",
    );
    let source = env.read(BUTTON_TSX);
    env.write(BUTTON_TSX, &format!("{}\nexport const ButtonGroup = null;\n", source));

    // Step 3
    let result = env.run(&["upgrade", "Button", "--to", "1.1.0"]);
    assert_success!(result);
    let after_first = env.read(BUTTON_TSX);
    assert!(after_first.contains("const base = \"inline-flex items-center shadow-sm rounded-md\";\n"));
    assert!(after_first.contains("Button@1.1.0"));

    // Step 4
    let result = env.run(&["upgrade", "Button"]);
    assert_success!(result);
    let after_second = env.read(BUTTON_TSX);
    assert!(after_second.contains("const base = \"inline-flex items-center shadow-sm rounded-md\";\n"));
    assert!(after_second.contains(" * Primary action trigger\n"));
    assert!(after_second.ends_with("export const ButtonGroup = null;\n"));
    assert!(!after_second.contains("<<<<<<<"));

    let status = env.run(&["status"]);
    assert_success!(status);
    assert_output_contains!(status, "Button 2.0.0");
    assert_output_contains!(status, "Button.tsx modified");
    assert_output_contains!(status, "index.ts clean");
    assert!(!status.stdout.contains("upgrade available"));
}
