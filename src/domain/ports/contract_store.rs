//! ContractStore port - where contract versions come from

use crate::domain::entities::Contract;
use crate::domain::value_objects::{ComponentName, Version};
use crate::error::ContractorResult;

/// Read-only access to versioned contracts
///
/// Implementations must return `ContractorError::ContractNotFound` for an
/// unknown version of a known component and `UnknownComponent` when the
/// component has no contracts at all.
pub trait ContractStore {
    /// Components that have at least one contract, sorted
    fn list_components(&self) -> ContractorResult<Vec<ComponentName>>;

    /// Available versions in ascending order
    fn list_versions(&self, component: &ComponentName) -> ContractorResult<Vec<Version>>;

    /// Load and validate one contract
    fn load_contract(&self, component: &ComponentName, version: &Version)
        -> ContractorResult<Contract>;

    /// Highest available version
    fn latest_version(&self, component: &ComponentName) -> ContractorResult<Version> {
        self.list_versions(component)?.pop().ok_or_else(|| {
            crate::error::ContractorError::UnknownComponent {
                component: component.to_string(),
            }
        })
    }
}
