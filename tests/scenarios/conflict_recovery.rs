//! Scenario: Recovering from a Conflicted Upgrade
//!
//! Journey: A developer reworded the component docs locally; the design
//! system ships a new description in 2.0.0.
//!
//! Steps:
//! 1. Install Button 1.0.0 and edit the description
//! 2. Upgrade to 2.0.0 - stops with conflict markers, exit code 2
//! 3. Status shows the file as conflicted, still at 1.0.0
//! 4. Retrying with markers left in place does not commit
//! 5. Resolve by keeping the incoming text and upgrade again
//!
//! Success Criteria:
//! - The installed version only moves once no markers remain
//! - The final file equals a fresh 2.0.0 generation

use crate::common::*;

#[test]
fn scenario_conflict_then_manual_resolution() {
    let env = TestEnv::builder().with_button_contracts().build();

    // Step 1
    assert_success!(env.run(&["install", "Button", "--version", "1.0.0"]));
    env.replace(BUTTON_TSX, " * Clickable action\n", " * Clickable action (forms)\n");

    // Step 2
    let result = env.run(&["upgrade", "Button", "--to", "2.0.0"]);
    assert_eq!(result.exit_code, 2, "{}", result.combined_output());
    assert_output_contains!(result, "Resolve the conflict markers, then run the upgrade again.");
    let conflicted = env.read(BUTTON_TSX);
    assert!(conflicted.contains("<<<<<<< LOCAL\n"));
    assert!(conflicted.contains(">>>>>>> INCOMING 2.0.0\n"));

    // Step 3
    let status = env.run(&["--json", "status", "Button"]);
    assert_success!(status);
    let component = &status.json_lines().pop().unwrap()["components"][0];
    assert_eq!(component["version"], "1.0.0");
    assert_eq!(component["artifacts"][0]["path"], BUTTON_TSX);
    assert_eq!(component["artifacts"][0]["state"], "conflicted");
    assert_eq!(component["artifacts"][1]["state"], "modified");

    // Step 4
    let retry = env.run(&["upgrade", "Button", "--to", "2.0.0", "--no-write-conflicts"]);
    assert_eq!(retry.exit_code, 2, "{}", retry.combined_output());
    assert_eq!(env.read(BUTTON_TSX), conflicted);
    assert!(env.read(".contractor/state.toml").contains("version = \"1.0.0\""));

    // Step 5
    env.write(BUTTON_TSX, &take_incoming(&conflicted));
    let result = env.run(&["upgrade", "Button", "--to", "2.0.0"]);
    assert_success!(result);
    assert_output_contains!(result, "Upgraded Button to 2.0.0.");

    let fresh = TestEnv::builder().with_button_contracts().build();
    assert_success!(fresh.run(&["install", "Button", "--version", "2.0.0"]));
    assert_eq!(env.read(BUTTON_TSX), fresh.read(BUTTON_TSX));

    let status = env.run(&["--json", "status", "Button"]);
    let component = &status.json_lines().pop().unwrap()["components"][0];
    assert_eq!(component["version"], "2.0.0");
    assert_eq!(component["clean"], true);
}
