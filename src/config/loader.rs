//! Configuration loading
//!
//! Each file is deserialized on its own first so that unknown keys can be
//! reported against the file they came from. The files are then deep-merged
//! as TOML tables, lowest priority first, and the merged table is the
//! configuration that environment overrides apply to.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::domain::value_objects::{ConfigWarning, Style};
use crate::error::{ContractorError, ContractorResult};

use super::env_validator::{closest, EnvVarValidator};
use super::types::{ColorMode, Config, Verbosity};

/// Project config file name, looked up in the project root
pub const PROJECT_CONFIG_FILE: &str = "contractor.toml";

/// Overrides the user config location (mainly for tests and CI)
pub const USER_CONFIG_ENV: &str = "CONTRACTOR_USER_CONFIG";

/// Result of loading configuration
#[derive(Debug, Clone, Default)]
pub struct LoadedConfig {
    pub config: Config,
    /// Unknown keys found in config files
    pub warnings: Vec<ConfigWarning>,
    /// Ignored `CONTRACTOR_*` values
    pub env_warnings: Vec<String>,
    /// Files that contributed, lowest priority first
    pub sources: Vec<PathBuf>,
}

/// Load one file and collect non-fatal warnings (e.g. unknown keys)
pub fn load_file(path: &Path) -> ContractorResult<LoadedConfig> {
    let (table, warnings) = read_layer(path)?;
    let config = into_config(table, path)?;
    Ok(LoadedConfig {
        config,
        warnings,
        env_warnings: Vec::new(),
        sources: vec![path.to_path_buf()],
    })
}

/// Load the full hierarchy using the process environment
pub fn load_layered(project_root: &Path) -> ContractorResult<LoadedConfig> {
    let user_config = std::env::var_os(USER_CONFIG_ENV)
        .map(PathBuf::from)
        .or_else(default_user_config);
    load_layered_with(project_root, user_config.as_deref(), |key| {
        std::env::var(key).ok()
    })
}

/// Load the full hierarchy with an explicit user config path and env lookup
pub fn load_layered_with<F>(
    project_root: &Path,
    user_config: Option<&Path>,
    env: F,
) -> ContractorResult<LoadedConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let project_config = project_root.join(PROJECT_CONFIG_FILE);
    let layers = user_config
        .into_iter()
        .chain(std::iter::once(project_config.as_path()))
        .filter(|path| path.is_file());

    let mut merged = toml::Table::new();
    let mut loaded = LoadedConfig::default();
    for path in layers {
        debug!(path = %path.display(), "loading config layer");
        let (table, warnings) = read_layer(path)?;
        merge_tables(&mut merged, table);
        loaded.warnings.extend(warnings);
        loaded.sources.push(path.to_path_buf());
    }

    let origin = loaded
        .sources
        .last()
        .cloned()
        .unwrap_or_else(|| project_config.clone());
    let config = into_config(merged, &origin)?;
    loaded.config = apply_env_overrides(config, env, &mut loaded.env_warnings);
    Ok(loaded)
}

fn read_layer(path: &Path) -> ContractorResult<(toml::Table, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path)?;

    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(&content);
    let _: Config = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| invalid(path, e))?;

    let table: toml::Table = toml::from_str(&content).map_err(|e| invalid(path, e))?;

    let warnings = unknown_paths
        .into_iter()
        .map(|key| {
            let leaf = key.rsplit('.').next().unwrap_or(key.as_str()).to_string();
            ConfigWarning {
                line: find_line_number(&content, &leaf),
                suggestion: closest(&leaf, KNOWN_KEYS).map(str::to_string),
                file: path.to_path_buf(),
                key,
            }
        })
        .collect();

    Ok((table, warnings))
}

fn into_config(table: toml::Table, origin: &Path) -> ContractorResult<Config> {
    toml::Value::Table(table)
        .try_into()
        .map_err(|e| invalid(origin, e))
}

fn invalid(path: &Path, err: impl std::fmt::Display) -> ContractorError {
    ContractorError::InvalidConfig {
        path: path.to_path_buf(),
        message: err.to_string(),
    }
}

/// Later tables win; nested tables merge key by key
fn merge_tables(base: &mut toml::Table, overlay: toml::Table) {
    for (key, value) in overlay {
        match (base.get_mut(&key), value) {
            (Some(toml::Value::Table(existing)), toml::Value::Table(incoming)) => {
                merge_tables(existing, incoming);
            }
            (_, value) => {
                base.insert(key, value);
            }
        }
    }
}

/// Apply `CONTRACTOR_*` overrides; invalid values are ignored with a warning
pub fn apply_env_overrides<F>(mut config: Config, env: F, warnings: &mut Vec<String>) -> Config
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(dir) = env("CONTRACTOR_CONTRACTS_DIR").filter(|v| !v.is_empty()) {
        config.contracts.dir = PathBuf::from(dir);
    }

    if let Some(dir) = env("CONTRACTOR_OUTPUT_DIR").filter(|v| !v.is_empty()) {
        config.output.dir = PathBuf::from(dir);
    }

    if let Some(value) = env("CONTRACTOR_STYLE") {
        let names: Vec<&str> = Style::ALL.iter().map(Style::id).collect();
        if let Some(style) =
            EnvVarValidator::new("CONTRACTOR_STYLE", &names).parse(&value, Style::from_id, warnings)
        {
            config.output.style = style;
        }
    }

    if let Some(value) = env("CONTRACTOR_SEMANTIC_RESOLVE") {
        if let Some(flag) = EnvVarValidator::new("CONTRACTOR_SEMANTIC_RESOLVE", BOOL_NAMES)
            .parse(&value, parse_bool, warnings)
        {
            config.upgrade.semantic_resolve = flag;
        }
    }

    if let Some(value) = env("CONTRACTOR_WRITE_CONFLICTS") {
        if let Some(flag) = EnvVarValidator::new("CONTRACTOR_WRITE_CONFLICTS", BOOL_NAMES)
            .parse(&value, parse_bool, warnings)
        {
            config.upgrade.write_conflicts = flag;
        }
    }

    if let Some(value) = env("CONTRACTOR_CONTEXT_LINES") {
        if let Some(lines) = EnvVarValidator::new("CONTRACTOR_CONTEXT_LINES", &["a non-negative integer"])
            .parse(&value, |s| s.trim().parse::<usize>().ok(), warnings)
        {
            config.upgrade.context_lines = lines;
        }
    }

    if let Some(value) = env("CONTRACTOR_COLOR") {
        if let Some(color) = EnvVarValidator::new("CONTRACTOR_COLOR", ColorMode::NAMES)
            .parse(&value, ColorMode::from_name, warnings)
        {
            config.ui.color = color;
        }
    }

    if let Some(value) = env("CONTRACTOR_VERBOSITY") {
        if let Some(verbosity) = EnvVarValidator::new("CONTRACTOR_VERBOSITY", Verbosity::NAMES)
            .parse(&value, Verbosity::from_name, warnings)
        {
            config.ui.verbosity = verbosity;
        }
    }

    config
}

const BOOL_NAMES: &[&str] = &["true", "false"];

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// `<config dir>/contractor/config.toml`
pub fn default_user_config() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("contractor").join("config.toml"))
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    content
        .lines()
        .position(|line| {
            let trimmed = line.trim_start();
            trimmed.starts_with(needle) || trimmed.starts_with(&format!("[{}", needle))
        })
        .map(|i| i + 1)
}

const KNOWN_KEYS: &[&str] = &[
    "contracts",
    "dir",
    "output",
    "style",
    "upgrade",
    "semantic_resolve",
    "write_conflicts",
    "context_lines",
    "ui",
    "color",
    "verbosity",
];
