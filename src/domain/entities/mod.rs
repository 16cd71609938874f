//! Domain Entities
//!
//! - `Contract` - declarative description of one component version
//! - `ComponentIr` - normalized generator input derived from a contract
//! - `Artifact` - a generated file
//! - `InstalledRecord` - what is installed, and the snapshot hashes behind it

mod artifact;
pub mod contract;
mod installed_record;
mod ir;

pub use artifact::Artifact;
pub use contract::{A11ySpec, Contract, PropSpec, PropType, PropValue, SlotSpec, StyleSpec, Tokens};
pub(crate) use installed_record::{normalize_state_path, parse_state_path};
pub use installed_record::{InstallState, InstalledRecord, TrackedArtifact};
pub use ir::{normalize_tokens, ComponentIr, IrA11y, IrProp, IrSlot, IrVariant};
