//! Configuration loading and discovery for `recolor.toml`
//!
//! Provides functions to find, load, and merge configuration.

use super::schema::RecolorConfig;
use crate::recolor::SubstitutionPolicy;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name searched for when discovering configuration
pub const CONFIG_FILE_NAME: &str = "recolor.toml";

/// Configuration loading error
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// File I/O error
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error
    #[error("Failed to parse recolor.toml: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error
    #[error("Config validation failed:\n{}", .0.iter().map(|e| format!("  - {}", e)).collect::<Vec<_>>().join("\n"))]
    Validation(Vec<String>),
}

/// CLI arguments that can override config values
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    /// Override players document
    pub teams: Option<PathBuf>,
    /// Override team colors document
    pub colors: Option<PathBuf>,
    /// Override base images directory
    pub images: Option<PathBuf>,
    /// Override output directory
    pub out: Option<PathBuf>,
    /// Override substitution policy
    pub policy: Option<SubstitutionPolicy>,
    /// Enable strict palette validation
    pub strict: Option<bool>,
    /// Override output extension
    pub extension: Option<String>,
    /// Number of parallel jobs
    pub jobs: Option<usize>,
    /// Stop after the first failed player
    pub fail_fast: Option<bool>,
}

/// Find recolor.toml by walking up from the current working directory.
///
/// # Returns
/// - `Some(path)` if a recolor.toml file is found
/// - `None` if no config file is found
pub fn find_config() -> Option<PathBuf> {
    let cwd = env::current_dir().ok()?;
    find_config_from(cwd)
}

/// Find recolor.toml by walking up from a specific directory.
///
/// This is the internal implementation that allows specifying the start directory,
/// useful for testing.
pub fn find_config_from(start: PathBuf) -> Option<PathBuf> {
    let mut current = start;

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }

        // Move to parent directory
        if !current.pop() {
            // Reached root, no config found
            return None;
        }
    }
}

/// Load configuration from a recolor.toml file.
///
/// If a path is provided, loads from that file. Otherwise, uses `find_config()`
/// to locate the config file. If no config file is found, returns the default
/// configuration, whose relative paths resolve against the working directory.
///
/// Relative paths inside a loaded file are resolved against the directory
/// containing that file.
pub fn load_config(path: Option<&Path>) -> Result<RecolorConfig, ConfigError> {
    let config_path = match path {
        Some(p) => Some(p.to_path_buf()),
        None => find_config(),
    };

    match config_path {
        Some(p) => load_config_file(&p),
        None => Ok(RecolorConfig::default()),
    }
}

/// Load configuration from a specific file path.
fn load_config_file(path: &Path) -> Result<RecolorConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    let mut config: RecolorConfig = toml::from_str(&contents)?;

    // Validate the config
    let errors = config.validate();
    if !errors.is_empty() {
        return Err(ConfigError::Validation(errors.into_iter().map(|e| e.to_string()).collect()));
    }

    if let Some(root) = project_root(path) {
        let paths = &mut config.paths;
        paths.teams = resolve_path(root, &paths.teams);
        paths.colors = resolve_path(root, &paths.colors);
        paths.images = resolve_path(root, &paths.images);
        paths.out = resolve_path(root, &paths.out);
    }

    Ok(config)
}

/// Merge CLI overrides into a configuration.
///
/// CLI arguments take precedence over config file values.
pub fn merge_cli_overrides(config: &mut RecolorConfig, overrides: &CliOverrides) {
    if let Some(ref teams) = overrides.teams {
        config.paths.teams = teams.clone();
    }
    if let Some(ref colors) = overrides.colors {
        config.paths.colors = colors.clone();
    }
    if let Some(ref images) = overrides.images {
        config.paths.images = images.clone();
    }
    if let Some(ref out) = overrides.out {
        config.paths.out = out.clone();
    }

    if let Some(policy) = overrides.policy {
        config.recolor.policy = policy;
    }
    if let Some(strict) = overrides.strict {
        config.recolor.strict = strict;
    }
    if let Some(ref extension) = overrides.extension {
        config.recolor.extension = extension.trim_start_matches('.').to_string();
    }
    if let Some(jobs) = overrides.jobs {
        config.recolor.jobs = Some(jobs.max(1));
    }
    if let Some(fail_fast) = overrides.fail_fast {
        config.recolor.fail_fast = fail_fast;
    }
}

/// Get the project root directory from a config file path.
///
/// Returns the parent directory of the recolor.toml file.
pub fn project_root(config_path: &Path) -> Option<&Path> {
    config_path.parent().filter(|p| !p.as_os_str().is_empty())
}

/// Resolve a path relative to the project root.
///
/// If the path is absolute, returns it unchanged.
/// If relative, joins it with the project root.
pub fn resolve_path(project_root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        project_root.join(path)
    }
}
