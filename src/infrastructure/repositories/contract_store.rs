//! File System Contract Store
//!
//! Implements the ContractStore port over a directory tree:
//!
//! ```text
//! <contracts>/
//!   Button/
//!     1.0.0.yaml
//!     1.1.0.toml
//!     2.0.0.json
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, trace};

use crate::domain::entities::Contract;
use crate::domain::ports::ContractStore;
use crate::domain::value_objects::{ComponentName, Version};
use crate::error::{ContractorError, ContractorResult};

/// Contract file formats, by extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ContractFormat {
    Yaml,
    Toml,
    Json,
}

impl ContractFormat {
    fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()?.to_ascii_lowercase().as_str() {
            "yaml" | "yml" => Some(ContractFormat::Yaml),
            "toml" => Some(ContractFormat::Toml),
            "json" => Some(ContractFormat::Json),
            _ => None,
        }
    }

    fn parse(self, content: &str) -> Result<Contract, String> {
        match self {
            ContractFormat::Yaml => serde_yaml_ng::from_str(content).map_err(|e| e.to_string()),
            ContractFormat::Toml => toml::from_str(content).map_err(|e| e.to_string()),
            ContractFormat::Json => serde_json::from_str(content).map_err(|e| e.to_string()),
        }
    }
}

/// Contract store backed by a directory of per-component folders
#[derive(Debug, Clone)]
pub struct FsContractStore {
    root: PathBuf,
}

impl FsContractStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn component_dir(&self, component: &ComponentName) -> PathBuf {
        self.root.join(component.as_str())
    }

    /// `(version, path)` for every readable contract file, ascending
    fn contract_files(
        &self,
        component: &ComponentName,
    ) -> ContractorResult<Vec<(Version, PathBuf)>> {
        let dir = self.component_dir(component);
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(ContractorError::UnknownComponent {
                    component: component.to_string(),
                })
            }
            Err(e) => return Err(e.into()),
        };

        let mut files = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if !path.is_file() || ContractFormat::from_path(&path).is_none() {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            match Version::parse(stem) {
                Ok(version) => files.push((version, path)),
                Err(_) => trace!(path = %path.display(), "skipping non-version file"),
            }
        }
        files.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(&b.1)));
        Ok(files)
    }
}

impl ContractStore for FsContractStore {
    fn list_components(&self) -> ContractorResult<Vec<ComponentName>> {
        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut components = Vec::new();
        for entry in entries {
            let entry = entry?;
            if !entry.path().is_dir() {
                continue;
            }
            let Ok(name) = ComponentName::new(&entry.file_name().to_string_lossy()) else {
                continue;
            };
            if !self.contract_files(&name)?.is_empty() {
                components.push(name);
            }
        }
        components.sort_by(|a, b| a.as_str().cmp(b.as_str()));
        Ok(components)
    }

    fn list_versions(&self, component: &ComponentName) -> ContractorResult<Vec<Version>> {
        let mut versions: Vec<Version> = self
            .contract_files(component)?
            .into_iter()
            .map(|(version, _)| version)
            .collect();
        versions.dedup();
        Ok(versions)
    }

    fn load_contract(
        &self,
        component: &ComponentName,
        version: &Version,
    ) -> ContractorResult<Contract> {
        let path = self
            .contract_files(component)?
            .into_iter()
            .find(|(v, _)| v == version)
            .map(|(_, path)| path)
            .ok_or_else(|| ContractorError::ContractNotFound {
                component: component.to_string(),
                version: version.to_string(),
            })?;

        let content = fs::read_to_string(&path)?;
        let format = ContractFormat::from_path(&path).ok_or_else(|| {
            ContractorError::InvalidContract {
                path: path.clone(),
                message: "unsupported file extension".to_string(),
            }
        })?;
        let contract = format
            .parse(&content)
            .map_err(|message| ContractorError::InvalidContract {
                path: path.clone(),
                message,
            })?;
        contract.validate(component, version, &path)?;

        debug!(component = %component, version = %version, path = %path.display(), "loaded contract");
        Ok(contract)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const BUTTON_YAML: &str = r#"
name: Button
version: 1.0.0
element: button
props:
  - name: size
    type: enum
    values: [sm, md, lg]
    default: md
styles:
  base: inline-flex items-center
  variants:
    size:
      sm: h-8 px-3
      md: h-10 px-4
      lg: h-12 px-6
"#;

    const BUTTON_TOML: &str = r#"
name = "Button"
version = "1.1.0"
element = "button"

[styles]
base = ["inline-flex", "items-center", "gap-2"]
"#;

    const BUTTON_JSON: &str =
        r#"{"name": "Button", "version": "2.0.0", "styles": {"base": "flex"}}"#;

    fn store_with(files: &[(&str, &str)]) -> (tempfile::TempDir, FsContractStore) {
        let dir = tempdir().unwrap();
        for (path, content) in files {
            let full = dir.path().join(path);
            fs::create_dir_all(full.parent().unwrap()).unwrap();
            fs::write(full, content).unwrap();
        }
        let store = FsContractStore::new(dir.path());
        (dir, store)
    }

    fn button() -> ComponentName {
        ComponentName::new("Button").unwrap()
    }

    fn v(s: &str) -> Version {
        Version::parse(s).unwrap()
    }

    #[test]
    fn lists_versions_across_formats_in_order() {
        let (_dir, store) = store_with(&[
            ("Button/2.0.0.json", BUTTON_JSON),
            ("Button/1.0.0.yaml", BUTTON_YAML),
            ("Button/1.1.0.toml", BUTTON_TOML),
            ("Button/README.md", "notes"),
        ]);

        let versions = store.list_versions(&button()).unwrap();
        assert_eq!(versions, vec![v("1.0.0"), v("1.1.0"), v("2.0.0")]);
        assert_eq!(store.latest_version(&button()).unwrap(), v("2.0.0"));
    }

    #[test]
    fn loads_each_format() {
        let (_dir, store) = store_with(&[
            ("Button/1.0.0.yaml", BUTTON_YAML),
            ("Button/1.1.0.toml", BUTTON_TOML),
            ("Button/2.0.0.json", BUTTON_JSON),
        ]);

        let yaml = store.load_contract(&button(), &v("1.0.0")).unwrap();
        assert_eq!(yaml.props.len(), 1);
        assert_eq!(yaml.element, "button");

        let toml = store.load_contract(&button(), &v("1.1.0")).unwrap();
        assert_eq!(toml.styles.base.iter().count(), 3);

        let json = store.load_contract(&button(), &v("2.0.0")).unwrap();
        assert_eq!(json.element, "div");
    }

    #[test]
    fn unknown_version_is_contract_not_found() {
        let (_dir, store) = store_with(&[("Button/1.0.0.yaml", BUTTON_YAML)]);
        let err = store.load_contract(&button(), &v("9.0.0")).unwrap_err();
        assert!(matches!(err, ContractorError::ContractNotFound { .. }));
    }

    #[test]
    fn unknown_component_is_distinguishable() {
        let (_dir, store) = store_with(&[("Button/1.0.0.yaml", BUTTON_YAML)]);
        let card = ComponentName::new("Card").unwrap();
        let err = store.list_versions(&card).unwrap_err();
        assert!(matches!(err, ContractorError::UnknownComponent { .. }));
    }

    #[test]
    fn version_mismatch_with_file_name_is_invalid() {
        let (_dir, store) = store_with(&[("Button/3.0.0.yaml", BUTTON_YAML)]);
        let err = store.load_contract(&button(), &v("3.0.0")).unwrap_err();
        assert!(matches!(err, ContractorError::InvalidContract { .. }));
    }

    #[test]
    fn unparsable_contract_reports_path() {
        let (_dir, store) = store_with(&[("Button/1.0.0.yaml", "name: [unclosed")]);
        match store.load_contract(&button(), &v("1.0.0")).unwrap_err() {
            ContractorError::InvalidContract { path, .. } => {
                assert!(path.ends_with("Button/1.0.0.yaml"))
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn lists_components_with_contracts() {
        let (dir, store) = store_with(&[
            ("Button/1.0.0.yaml", BUTTON_YAML),
            ("Card/1.0.0.json", r#"{"name": "Card", "version": "1.0.0"}"#),
        ]);
        fs::create_dir_all(dir.path().join("Empty")).unwrap();

        let names: Vec<_> = store
            .list_components()
            .unwrap()
            .into_iter()
            .map(|n| n.to_string())
            .collect();
        assert_eq!(names, vec!["Button", "Card"]);
    }

    #[test]
    fn missing_root_lists_nothing() {
        let store = FsContractStore::new("/nonexistent/contracts");
        assert!(store.list_components().unwrap().is_empty());
    }
}
