//! Domain Layer
//!
//! The core of Contractor - pure logic without I/O dependencies.
//!
//! ## Structure
//!
//! - `entities/` - Contract, ComponentIr, Artifact, InstalledRecord
//! - `value_objects/` - Version, Style, ContentHash, ComponentName
//! - `services/` - line diff, three-way merge, semantic resolver
//! - `ports/` - Interface definitions for infrastructure
//!
//! ## Design Principles
//!
//! 1. **No I/O** - This layer never touches the file system directly
//! 2. **Pure Functions** - Services are stateless and testable
//! 3. **Ports & Adapters** - All I/O goes through trait-defined ports

pub mod entities;
pub mod ports;
pub mod services;
pub mod value_objects;
