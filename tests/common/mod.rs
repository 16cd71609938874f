//! Common test utilities for Contractor CLI and scenario tests.
//!
//! This module provides:
//! - `TestEnv`: isolated project with its own user config
//! - Assertion macros: `assert_exists!`, `assert_output_contains!`
//! - Fixtures: Button contracts at several versions

#![allow(dead_code)]

#[macro_use]
pub mod assertions;
pub mod env;
pub mod fixtures;

pub use assertions::*;
pub use env::*;
pub use fixtures::*;
