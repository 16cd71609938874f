//! Test environment builder for isolated Contractor testing.
//!
//! Every `TestEnv` owns a temp project and a temp directory for the user
//! config, and strips `CONTRACTOR_*` variables inherited from the caller.

use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use tempfile::TempDir;

/// Variables cleared before each run so the host environment cannot leak in
const CONTRACTOR_VARS: &[&str] = &[
    "CONTRACTOR_CONTRACTS_DIR",
    "CONTRACTOR_OUTPUT_DIR",
    "CONTRACTOR_STYLE",
    "CONTRACTOR_SEMANTIC_RESOLVE",
    "CONTRACTOR_WRITE_CONFLICTS",
    "CONTRACTOR_CONTEXT_LINES",
    "CONTRACTOR_COLOR",
    "CONTRACTOR_VERBOSITY",
    "CONTRACTOR_LOG",
];

/// Result of running a Contractor CLI command
#[derive(Debug)]
pub struct TestResult {
    pub success: bool,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl TestResult {
    /// Combine stdout and stderr
    pub fn combined_output(&self) -> String {
        format!("{}\n{}", self.stdout, self.stderr)
    }

    /// Parse stdout as newline-delimited JSON
    pub fn json_lines(&self) -> Vec<serde_json::Value> {
        self.stdout
            .lines()
            .filter(|l| !l.trim().is_empty())
            .map(|l| {
                serde_json::from_str(l)
                    .unwrap_or_else(|e| panic!("invalid JSON line {:?}: {}", l, e))
            })
            .collect()
    }
}

/// Isolated test environment with temp directories.
pub struct TestEnv {
    /// Temporary directory for the project
    pub project_root: TempDir,
    /// Temporary directory holding the user config
    pub user_dir: TempDir,
    bin: PathBuf,
}

impl TestEnv {
    pub fn builder() -> TestEnvBuilder {
        TestEnvBuilder::new()
    }

    /// Get path relative to project root
    pub fn project_path(&self, relative: &str) -> PathBuf {
        self.project_root.path().join(relative)
    }

    /// Path of the isolated user config file (may not exist)
    pub fn user_config_path(&self) -> PathBuf {
        self.user_dir.path().join("config.toml")
    }

    /// Run contractor from the project root
    pub fn run(&self, args: &[&str]) -> TestResult {
        self.run_from_with_env(self.project_root.path(), args, &[])
    }

    /// Run contractor from the project root with extra env vars
    pub fn run_with_env(&self, args: &[&str], env_vars: &[(&str, &str)]) -> TestResult {
        self.run_from_with_env(self.project_root.path(), args, env_vars)
    }

    /// Run contractor from a specific directory
    pub fn run_from(&self, cwd: &Path, args: &[&str]) -> TestResult {
        self.run_from_with_env(cwd, args, &[])
    }

    pub fn run_from_with_env(
        &self,
        cwd: &Path,
        args: &[&str],
        env_vars: &[(&str, &str)],
    ) -> TestResult {
        let mut cmd = Command::new(&self.bin);
        cmd.current_dir(cwd)
            .args(args)
            .stdin(Stdio::null())
            .env("CONTRACTOR_USER_CONFIG", self.user_config_path())
            .env("NO_COLOR", "1");
        for key in CONTRACTOR_VARS {
            cmd.env_remove(key);
        }
        for (key, value) in env_vars {
            cmd.env(key, value);
        }

        let output = cmd.output().expect("Failed to execute contractor");
        Self::output_to_result(output)
    }

    fn output_to_result(output: Output) -> TestResult {
        TestResult {
            success: output.status.success(),
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        }
    }

    /// Read a project file
    pub fn read(&self, relative: &str) -> String {
        std::fs::read_to_string(self.project_path(relative))
            .unwrap_or_else(|e| panic!("Failed to read {}: {}", relative, e))
    }

    /// Write a project file, creating parent directories
    pub fn write(&self, relative: &str, content: &str) {
        let path = self.project_path(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create directories");
        }
        std::fs::write(&path, content).expect("Failed to write file");
    }

    /// Replace the single occurrence of `from` in a project file
    pub fn replace(&self, relative: &str, from: &str, to: &str) {
        let content = self.read(relative);
        assert_eq!(
            content.matches(from).count(),
            1,
            "expected exactly one {:?} in {}:\n{}",
            from,
            relative,
            content
        );
        self.write(relative, &content.replacen(from, to, 1));
    }

    /// Write a contract file under `contracts/<component>/<version>.yaml`
    pub fn add_contract(&self, component: &str, version: &str, yaml: &str) {
        self.write(&format!("contracts/{}/{}.yaml", component, version), yaml);
    }

    /// Write the user-level config file
    pub fn write_user_config(&self, toml: &str) {
        std::fs::write(self.user_config_path(), toml).expect("Failed to write user config");
    }
}

/// Builder for TestEnv with fluent API
pub struct TestEnvBuilder {
    contracts: Vec<(String, String, String)>,
    project_config: Option<String>,
    user_config: Option<String>,
}

impl TestEnvBuilder {
    pub fn new() -> Self {
        Self {
            contracts: Vec::new(),
            project_config: None,
            user_config: None,
        }
    }

    /// Add a YAML contract for a component version
    pub fn with_contract(mut self, component: &str, version: &str, yaml: &str) -> Self {
        self.contracts
            .push((component.to_string(), version.to_string(), yaml.to_string()));
        self
    }

    /// Button at 1.0.0, 1.1.0 and 2.0.0
    pub fn with_button_contracts(self) -> Self {
        self.with_contract("Button", "1.0.0", super::fixtures::BUTTON_1_0_0)
            .with_contract("Button", "1.1.0", super::fixtures::BUTTON_1_1_0)
            .with_contract("Button", "2.0.0", super::fixtures::BUTTON_2_0_0)
    }

    /// Set `contractor.toml` content
    pub fn with_project_config(mut self, toml: &str) -> Self {
        self.project_config = Some(toml.to_string());
        self
    }

    /// Set the user config content
    pub fn with_user_config(mut self, toml: &str) -> Self {
        self.user_config = Some(toml.to_string());
        self
    }

    pub fn build(self) -> TestEnv {
        let env = TestEnv {
            project_root: TempDir::new().expect("Failed to create project dir"),
            user_dir: TempDir::new().expect("Failed to create user config dir"),
            bin: PathBuf::from(env!("CARGO_BIN_EXE_contractor")),
        };

        for (component, version, yaml) in &self.contracts {
            env.add_contract(component, version, yaml);
        }
        if let Some(toml) = &self.project_config {
            env.write("contractor.toml", toml);
        }
        if let Some(toml) = &self.user_config {
            env.write_user_config(toml);
        }
        env
    }
}

impl Default for TestEnvBuilder {
    fn default() -> Self {
        Self::new()
    }
}
