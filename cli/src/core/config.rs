//! # ShellOut Configuration System
//!
//! File: cli/src/core/config.rs
//!
//! ## Overview
//!
//! This module implements configuration loading for the `shellout` binary:
//! which shell runs command lines, which pipe-draining strategy the runner uses,
//! whether child output is tee'd to the terminal, and extra environment
//! variables for every invocation.
//!
//! The library itself never reads configuration. A `ProcessRunner` is built from
//! explicit values; this module only produces those values for the CLI.
//!
//! ## Architecture
//!
//! Configuration sources (in order of precedence):
//! 1. Project-specific `.shellout.toml` in the current directory or an ancestor
//!    (the search stops at the first directory containing `.git`)
//! 2. User-specific `config.toml` in the platform config directory
//! 3. Default values defined in the code
//!
//! ## Examples
//!
//! ```toml
//! [shell]
//! program = "/bin/bash"
//!
//! [runner]
//! drain = "blocking"
//! tee = true
//!
//! [environment.vars]
//! GIT_TERMINAL_PROMPT = "0"
//! ```
//!
use crate::common::process::{DrainStrategy, ProcessRunner};
use crate::core::error::{Result, ShellOutError};
use anyhow::{anyhow, Context};
use directories::ProjectDirs;
use serde::Deserialize;
use std::collections::HashMap;
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{debug, info, warn};

/// Represents the main configuration structure, loaded from TOML files.
#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub shell: ShellConfig,
    #[serde(default)]
    pub runner: RunnerConfig,
    #[serde(default)]
    pub environment: EnvironmentConfig,
}

/// Which shell executes composed command lines.
#[derive(Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct ShellConfig {
    /// Path to the shell. Invoked as `<program> -c <line>`. May start with `~`.
    #[serde(default = "default_shell_program")]
    pub program: String,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            program: default_shell_program(),
        }
    }
}

/// Runner behaviour.
#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct RunnerConfig {
    /// Pipe-draining strategy (`auto`, `readiness`, `blocking`).
    #[serde(default)]
    pub drain: DrainStrategy,
    /// Tee child output to the terminal while capturing it.
    #[serde(default)]
    pub tee: bool,
}

/// Variables overlaid onto the inherited environment of each invocation.
#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct EnvironmentConfig {
    #[serde(default)]
    pub vars: HashMap<String, String>,
}

fn default_shell_program() -> String {
    "/bin/sh".to_string()
}

impl Config {
    /// Builds a runner from the configured shell and drain strategy.
    pub fn runner(&self) -> ProcessRunner {
        ProcessRunner::new(&self.shell.program).with_strategy(self.runner.drain)
    }

    /// Returns the environment for an invocation: the inherited environment with
    /// configured and explicit overrides applied, or `None` when there is nothing
    /// to override (the child then inherits unchanged).
    pub fn environment_with(&self, overrides: &[(String, String)]) -> Option<HashMap<String, String>> {
        if self.environment.vars.is_empty() && overrides.is_empty() {
            return None;
        }
        let mut env: HashMap<String, String> = std::env::vars().collect();
        env.extend(self.environment.vars.clone());
        env.extend(overrides.iter().cloned());
        Some(env)
    }
}

const PROJECT_CONFIG_FILENAME: &str = ".shellout.toml";

/// Loads, merges, expands and validates configuration from all sources.
pub fn load_config() -> Result<Config> {
    let user_config = load_user_config()?;
    let project_config = load_project_config()?;
    let mut merged_config = merge_configs(user_config.unwrap_or_default(), project_config);
    expand_config_paths(&mut merged_config);
    validate_config(&merged_config).context("Configuration validation failed")?;
    debug!("Final loaded configuration: {:?}", merged_config);
    Ok(merged_config)
}

fn load_user_config() -> Result<Option<Config>> {
    if let Some(proj_dirs) = ProjectDirs::from("com", "ShellOut", "shellout") {
        let config_path = proj_dirs.config_dir().join("config.toml");
        if config_path.exists() {
            info!("Loading user configuration from: {}", config_path.display());
            load_config_from_path(&config_path).map(Some)
        } else {
            debug!(
                "User configuration file not found at {}",
                config_path.display()
            );
            Ok(None)
        }
    } else {
        warn!("Could not determine user config directory.");
        Ok(None)
    }
}

fn load_project_config() -> Result<Option<Config>> {
    let current_dir = std::env::current_dir().context("Failed to get current directory")?;
    if let Some(project_config_path) = find_project_config_path(&current_dir) {
        info!(
            "Loading project configuration from: {}",
            project_config_path.display()
        );
        load_config_from_path(&project_config_path).map(Some)
    } else {
        debug!("No project configuration file (.shellout.toml) found.");
        Ok(None)
    }
}

fn find_project_config_path(start: &Path) -> Option<PathBuf> {
    let mut path = start;
    loop {
        let project_config = path.join(PROJECT_CONFIG_FILENAME);
        if project_config.is_file() {
            return Some(project_config);
        }
        if path.join(".git").is_dir() {
            debug!(
                "Found .git directory at {}, stopping project config search.",
                path.display()
            );
            return None;
        }
        path = path.parent()?;
    }
}

fn load_config_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse TOML from file: {}", path.display()))
}

fn merge_configs(user: Config, project: Option<Config>) -> Config {
    let project_cfg = match project {
        Some(p) => p,
        None => return user,
    };
    let mut merged = Config::default();
    merged.shell.program = if project_cfg.shell.program != default_shell_program() {
        project_cfg.shell.program
    } else {
        user.shell.program
    };
    merged.runner.drain = if project_cfg.runner.drain != DrainStrategy::default() {
        project_cfg.runner.drain
    } else {
        user.runner.drain
    };
    merged.runner.tee = project_cfg.runner.tee || user.runner.tee;
    // Project variables win over user variables with the same name.
    merged.environment.vars = user.environment.vars;
    merged.environment.vars.extend(project_cfg.environment.vars);
    merged
}

fn expand_config_paths(config: &mut Config) {
    config.shell.program = shellexpand::tilde(&config.shell.program).into_owned();
    debug!("Expanded shell program: {}", config.shell.program);
}

fn validate_config(config: &Config) -> Result<()> {
    if config.shell.program.trim().is_empty() {
        return Err(anyhow!(ShellOutError::Config(
            "shell.program cannot be empty.".to_string()
        )));
    }
    let shell_path = Path::new(&config.shell.program);
    if shell_path.is_absolute() && !shell_path.exists() {
        warn!(
            "Configured shell '{}' does not exist; invocations will fail to spawn.",
            shell_path.display()
        );
    }
    for name in config.environment.vars.keys() {
        if name.is_empty() || name.contains('=') {
            return Err(anyhow!(ShellOutError::Config(format!(
                "Invalid environment variable name: '{}'.",
                name
            ))));
        }
    }
    Ok(())
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_deserialize_basic_toml() {
        let toml_content = r#"
            [shell]
            program = "/bin/bash"

            [runner]
            drain = "blocking"
            tee = true

            [environment.vars]
            GIT_TERMINAL_PROMPT = "0"
        "#;

        let config: Config = toml::from_str(toml_content).expect("Failed to parse TOML");

        assert_eq!(config.shell.program, "/bin/bash");
        assert_eq!(config.runner.drain, DrainStrategy::Blocking);
        assert!(config.runner.tee);
        assert_eq!(
            config.environment.vars.get("GIT_TERMINAL_PROMPT").map(String::as_str),
            Some("0")
        );
    }

    #[test]
    fn test_defaults_when_sections_missing() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.shell.program, "/bin/sh");
        assert_eq!(config.runner.drain, DrainStrategy::Auto);
        assert!(!config.runner.tee);
        assert!(config.environment.vars.is_empty());
    }

    #[test]
    fn test_unknown_fields_rejected() {
        let result: std::result::Result<Config, _> = toml::from_str("[shell]\npath = \"/bin/sh\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_path_expansion() {
        let mut config = Config {
            shell: ShellConfig {
                program: "~/bin/mysh".to_string(),
            },
            ..Default::default()
        };
        expand_config_paths(&mut config);
        let home_dir = dirs::home_dir().unwrap();
        assert_eq!(
            config.shell.program,
            home_dir.join("bin/mysh").to_string_lossy()
        );
    }

    #[test]
    fn test_merge_prefers_project_values() {
        let mut user = Config::default();
        user.shell.program = "/bin/bash".into();
        user.environment.vars.insert("A".into(), "user".into());
        user.environment.vars.insert("B".into(), "user".into());

        let mut project = Config::default();
        project.runner.drain = DrainStrategy::Blocking;
        project.environment.vars.insert("B".into(), "project".into());

        let merged = merge_configs(user, Some(project));
        assert_eq!(merged.shell.program, "/bin/bash");
        assert_eq!(merged.runner.drain, DrainStrategy::Blocking);
        assert_eq!(merged.environment.vars["A"], "user");
        assert_eq!(merged.environment.vars["B"], "project");
    }

    #[test]
    fn test_validate_config_rejects_empty_shell() {
        let config = Config {
            shell: ShellConfig {
                program: "  ".into(),
            },
            ..Default::default()
        };
        let result = validate_config(&config);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("cannot be empty"));
    }

    #[test]
    fn test_validate_config_rejects_bad_variable_name() {
        let mut config = Config::default();
        config.environment.vars.insert("A=B".into(), "x".into());
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_find_project_config_stops_at_git_boundary() {
        let root = tempdir().unwrap();
        fs::write(root.path().join(PROJECT_CONFIG_FILENAME), "").unwrap();
        let repo = root.path().join("repo");
        fs::create_dir_all(repo.join(".git")).unwrap();
        let nested = repo.join("src");
        fs::create_dir_all(&nested).unwrap();

        // The config above the repository root is not picked up.
        assert_eq!(find_project_config_path(&nested), None);

        fs::write(repo.join(PROJECT_CONFIG_FILENAME), "").unwrap();
        assert_eq!(
            find_project_config_path(&nested),
            Some(repo.join(PROJECT_CONFIG_FILENAME))
        );
    }

    #[test]
    fn test_environment_with_overrides() {
        let mut config = Config::default();
        assert!(config.environment_with(&[]).is_none());

        config.environment.vars.insert("SHELLOUT_A".into(), "1".into());
        let env = config
            .environment_with(&[("SHELLOUT_B".into(), "2".into())])
            .unwrap();
        assert_eq!(env["SHELLOUT_A"], "1");
        assert_eq!(env["SHELLOUT_B"], "2");
    }
}
