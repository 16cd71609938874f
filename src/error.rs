//! Error types for Contractor
//!
//! Uses `thiserror` for library errors; the binary wraps them with `anyhow`.

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::ports::file_system::FsError;
use crate::domain::value_objects::Style;
use crate::domain::ports::state_store::StateError;

/// Result type alias for Contractor operations
pub type ContractorResult<T> = Result<T, ContractorError>;

/// Main error type for Contractor operations
#[derive(Error, Debug)]
pub enum ContractorError {
    /// No contract exists for the requested component version
    #[error("contract not found: {component}@{version}")]
    ContractNotFound { component: String, version: String },

    /// No contracts exist for the component at all
    #[error("unknown component '{component}' (no contracts directory found)")]
    UnknownComponent { component: String },

    /// Contract file exists but cannot be parsed or fails validation
    #[error("invalid contract {path}: {message}")]
    InvalidContract { path: PathBuf, message: String },

    /// Config file cannot be parsed or has values of the wrong type
    #[error("invalid config {path}: {message}")]
    InvalidConfig { path: PathBuf, message: String },

    /// Component name is not a path-safe identifier
    #[error("invalid component name '{0}' (use letters, digits, '-' or '_', starting with a letter)")]
    InvalidComponentName(String),

    /// Version string is not a dotted numeric version
    #[error("invalid version '{0}'")]
    InvalidVersion(String),

    /// No generator is registered for a style
    #[error("no generator registered for style '{style}'")]
    NoGenerator { style: Style },

    /// Operation requires an installed component
    #[error("component '{component}' is not installed - run `contractor install {component}` first")]
    NotInstalled { component: String },

    /// Install refused because the component is already installed
    #[error("component '{component}' is already installed at {version} - use --force to overwrite")]
    AlreadyInstalled { component: String, version: String },

    /// The merge ancestor for an installed artifact is gone
    ///
    /// Signals a corrupted or externally modified state directory. Not
    /// retryable without a re-install.
    #[error("missing base snapshot for {artifact} ({component}@{version}) - reinstall with `contractor install --force`")]
    MissingBaseSnapshot {
        component: String,
        version: String,
        artifact: PathBuf,
    },

    /// A tracked artifact is absent on disk
    #[error("artifact {path} is missing on disk - restore it or reinstall before upgrading")]
    MissingLocalArtifact { path: PathBuf },

    /// Internal invariant violation in the diff/merge algorithms
    #[error("merge failure (this is a bug): {message}")]
    MergeFailure { message: String },

    /// State file cannot be read back
    #[error("state corrupted at {path}: {message}")]
    StateCorrupted { path: PathBuf, message: String },

    /// File system port error
    #[error(transparent)]
    Fs(#[from] FsError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<StateError> for ContractorError {
    fn from(err: StateError) -> Self {
        match err {
            StateError::Corrupted { path, message } => {
                ContractorError::StateCorrupted { path, message }
            }
            StateError::Io(err) => ContractorError::Io(err),
        }
    }
}

impl ContractorError {
    /// Whether the error signals state that only a re-install can repair
    pub fn requires_reinstall(&self) -> bool {
        matches!(
            self,
            ContractorError::MissingBaseSnapshot { .. } | ContractorError::StateCorrupted { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_contract_not_found() {
        let err = ContractorError::ContractNotFound {
            component: "Button".to_string(),
            version: "9.9.9".to_string(),
        };
        assert_eq!(err.to_string(), "contract not found: Button@9.9.9");
    }

    #[test]
    fn test_error_display_missing_local_artifact() {
        let err = ContractorError::MissingLocalArtifact {
            path: PathBuf::from("src/components/Button/Button.tsx"),
        };
        assert_eq!(
            err.to_string(),
            "artifact src/components/Button/Button.tsx is missing on disk - restore it or reinstall before upgrading"
        );
    }

    #[test]
    fn test_missing_snapshot_requires_reinstall() {
        let err = ContractorError::MissingBaseSnapshot {
            component: "Button".to_string(),
            version: "1.0.0".to_string(),
            artifact: PathBuf::from("Button/index.ts"),
        };
        assert!(err.requires_reinstall());
        assert!(!ContractorError::InvalidVersion("x".into()).requires_reinstall());
    }

    #[test]
    fn test_state_error_converts_to_corrupted() {
        let err: ContractorError = StateError::Corrupted {
            path: PathBuf::from(".contractor/state.toml"),
            message: "bad".to_string(),
        }
        .into();
        assert!(matches!(err, ContractorError::StateCorrupted { .. }));
    }
}
