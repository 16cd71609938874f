//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `fs/` - Local file system with atomic writes
//! - `repositories/` - Contract store (YAML/TOML/JSON) and TOML state store
//! - `generators/` - Component generators (Tailwind, CSS Modules)
//! - `events/` - Upgrade event sinks (NDJSON)

pub mod events;
pub mod fs;
pub mod generators;
pub mod repositories;

// Re-export for convenience
pub use events::JsonEventSink;
pub use fs::LocalFs;
pub use generators::{all_generators, get_generator, CssModulesGenerator, TailwindGenerator};
pub use repositories::{FsContractStore, TomlStateStore};
