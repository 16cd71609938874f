use std::path::{Path, PathBuf};

use contractor::config::PROJECT_CONFIG_FILE;
use contractor::infrastructure::repositories::STATE_DIR;

/// Find the project root by walking upward from `start`.
///
/// The nearest directory holding install state (`.contractor/`) or a
/// `contractor.toml` wins. Falls back to `start`, so a fresh project is
/// rooted wherever the first install runs.
pub(crate) fn discover_project_root(start: &Path) -> PathBuf {
    start
        .ancestors()
        .find(|dir| dir.join(STATE_DIR).is_dir() || dir.join(PROJECT_CONFIG_FILE).is_file())
        .unwrap_or(start)
        .to_path_buf()
}
