//! Domain Value Objects
//!
//! Immutable value types that represent domain concepts.

mod component_name;
mod config_warning;
mod hash;
mod style;
mod version;

pub use component_name::ComponentName;
pub use config_warning::ConfigWarning;
pub use hash::ContentHash;
pub use style::Style;
pub use version::Version;
