//! Tests for the config module

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use tempfile::tempdir;

use super::loader::{apply_env_overrides, load_file, load_layered_with};
use super::types::*;
use crate::domain::value_objects::Style;
use crate::error::ContractorError;

fn no_env(_: &str) -> Option<String> {
    None
}

fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

fn write(path: &Path, content: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

#[test]
fn test_config_default() {
    let config = Config::default();

    assert_eq!(config.contracts.dir, PathBuf::from("contracts"));
    assert_eq!(config.output.dir, PathBuf::from("src/components"));
    assert_eq!(config.output.style, Style::Tailwind);
    assert!(config.upgrade.semantic_resolve);
    assert!(config.upgrade.write_conflicts);
    assert_eq!(config.upgrade.context_lines, 3);
    assert_eq!(config.ui.color, ColorMode::Auto);
    assert_eq!(config.ui.verbosity, Verbosity::Normal);
}

#[test]
fn test_config_parse_toml() {
    let toml = r#"
[contracts]
dir = "design/contracts"

[output]
dir = "app/ui"
style = "css-modules"

[upgrade]
semantic_resolve = false
context_lines = 5

[ui]
color = "never"
verbosity = "quiet"
"#;

    let config: Config = toml::from_str(toml).unwrap();

    assert_eq!(config.contracts.dir, PathBuf::from("design/contracts"));
    assert_eq!(config.output.style, Style::CssModules);
    assert!(!config.upgrade.semantic_resolve);
    assert!(config.upgrade.write_conflicts);
    assert_eq!(config.upgrade.context_lines, 5);
    assert_eq!(config.ui.color, ColorMode::Never);
    assert_eq!(config.ui.verbosity, Verbosity::Quiet);
}

#[test]
fn test_empty_file_is_defaults() {
    let config: Config = toml::from_str("").unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn test_unknown_keys_become_warnings() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("contractor.toml");
    write(
        &path,
        "[upgrade]\nsemantic_reslove = false\n\n[outptu]\ndir = \"x\"\n",
    );

    let loaded = load_file(&path).unwrap();

    assert_eq!(loaded.config, Config::default());
    assert_eq!(loaded.warnings.len(), 2);

    let by_key: HashMap<_, _> = loaded
        .warnings
        .iter()
        .map(|w| (w.key.as_str(), w))
        .collect();

    let semantic = by_key["upgrade.semantic_reslove"];
    assert_eq!(semantic.line, Some(2));
    assert_eq!(semantic.suggestion.as_deref(), Some("semantic_resolve"));
    assert_eq!(semantic.file, path);

    let output = by_key["outptu"];
    assert_eq!(output.line, Some(4));
    assert_eq!(output.suggestion.as_deref(), Some("output"));
}

#[test]
fn test_wrong_type_is_an_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("contractor.toml");
    write(&path, "[upgrade]\ncontext_lines = \"many\"\n");

    let err = load_file(&path).unwrap_err();
    assert!(matches!(err, ContractorError::InvalidConfig { .. }), "{err}");
}

#[test]
fn test_unknown_style_is_an_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("contractor.toml");
    write(&path, "[output]\nstyle = \"styled-components\"\n");

    assert!(load_file(&path).is_err());
}

#[test]
fn test_layers_merge_project_over_user() {
    let dir = tempdir().unwrap();
    let user = dir.path().join("home/contractor/config.toml");
    write(
        &user,
        "[output]\nstyle = \"css-modules\"\ndir = \"user/ui\"\n\n[ui]\ncolor = \"never\"\n",
    );
    let project = dir.path().join("project");
    write(
        &project.join("contractor.toml"),
        "[output]\ndir = \"app/components\"\n",
    );

    let loaded = load_layered_with(&project, Some(&user), no_env).unwrap();

    // project wins per key, user keys it does not set survive
    assert_eq!(loaded.config.output.dir, PathBuf::from("app/components"));
    assert_eq!(loaded.config.output.style, Style::CssModules);
    assert_eq!(loaded.config.ui.color, ColorMode::Never);
    assert_eq!(loaded.sources, vec![user, project.join("contractor.toml")]);
}

#[test]
fn test_missing_files_yield_defaults() {
    let dir = tempdir().unwrap();
    let loaded = load_layered_with(
        dir.path(),
        Some(&dir.path().join("nope/config.toml")),
        no_env,
    )
    .unwrap();

    assert_eq!(loaded.config, Config::default());
    assert!(loaded.sources.is_empty());
    assert!(loaded.warnings.is_empty());
}

#[test]
fn test_env_overrides_files() {
    let dir = tempdir().unwrap();
    write(
        &dir.path().join("contractor.toml"),
        "[output]\nstyle = \"css-modules\"\n",
    );

    let env = env_from(&[
        ("CONTRACTOR_STYLE", "tailwind"),
        ("CONTRACTOR_OUTPUT_DIR", "generated"),
        ("CONTRACTOR_WRITE_CONFLICTS", "off"),
        ("CONTRACTOR_CONTEXT_LINES", "0"),
    ]);
    let loaded = load_layered_with(dir.path(), None, env).unwrap();

    assert_eq!(loaded.config.output.style, Style::Tailwind);
    assert_eq!(loaded.config.output.dir, PathBuf::from("generated"));
    assert!(!loaded.config.upgrade.write_conflicts);
    assert_eq!(loaded.config.upgrade.context_lines, 0);
    assert!(loaded.env_warnings.is_empty());
}

#[test]
fn test_invalid_env_values_are_ignored_with_warning() {
    let env = env_from(&[
        ("CONTRACTOR_STYLE", "tailwnd"),
        ("CONTRACTOR_SEMANTIC_RESOLVE", "maybe"),
        ("CONTRACTOR_VERBOSITY", "verbose"),
    ]);
    let mut warnings = Vec::new();
    let config = apply_env_overrides(Config::default(), env, &mut warnings);

    assert_eq!(config.output.style, Style::Tailwind);
    assert!(config.upgrade.semantic_resolve);
    assert_eq!(config.ui.verbosity, Verbosity::Verbose);

    assert_eq!(warnings.len(), 2);
    assert!(warnings[0].contains("did you mean 'tailwind'"), "{}", warnings[0]);
    assert!(warnings[1].starts_with("invalid CONTRACTOR_SEMANTIC_RESOLVE value 'maybe'"));
}

#[test]
fn test_color_and_verbosity_names() {
    for name in ColorMode::NAMES {
        assert!(ColorMode::from_name(name).is_some());
    }
    for name in Verbosity::NAMES {
        assert!(Verbosity::from_name(name).is_some());
    }
    assert!(Verbosity::Quiet < Verbosity::Debug);
}
