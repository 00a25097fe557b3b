//! Configuration schema types for `recolor.toml`
//!
//! Defines the structure and validation rules for recolor project configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::output::DEFAULT_EXTENSION;
use crate::recolor::SubstitutionPolicy;

/// Input and output locations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Players document (player -> primary, secondary, image)
    #[serde(default = "default_teams")]
    pub teams: PathBuf,
    /// Team colors document (team -> uniform)
    #[serde(default = "default_colors")]
    pub colors: PathBuf,
    /// Directory holding the base-colored source images
    #[serde(default = "default_images")]
    pub images: PathBuf,
    /// Directory recolored images are written to
    #[serde(default = "default_out")]
    pub out: PathBuf,
}

fn default_teams() -> PathBuf {
    PathBuf::from("sample_data/players_teams.json")
}

fn default_colors() -> PathBuf {
    PathBuf::from("sample_data/team_colors.json")
}

fn default_images() -> PathBuf {
    PathBuf::from("sample_data/player_images")
}

fn default_out() -> PathBuf {
    PathBuf::from("sample_data/outputs")
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            teams: default_teams(),
            colors: default_colors(),
            images: default_images(),
            out: default_out(),
        }
    }
}

/// Recolor behavior settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecolorSettings {
    /// How substitutions within one pass interact
    #[serde(default)]
    pub policy: SubstitutionPolicy,
    /// Reject palette channels outside 0-255 instead of clamping
    #[serde(default)]
    pub strict: bool,
    /// Output image extension (selects the encoder)
    #[serde(default = "default_extension")]
    pub extension: String,
    /// Number of parallel workers (defaults to available parallelism)
    #[serde(default)]
    pub jobs: Option<usize>,
    /// Stop starting new players after the first failure
    #[serde(default)]
    pub fail_fast: bool,
}

fn default_extension() -> String {
    DEFAULT_EXTENSION.to_string()
}

impl Default for RecolorSettings {
    fn default() -> Self {
        Self {
            policy: SubstitutionPolicy::default(),
            strict: false,
            extension: default_extension(),
            jobs: None,
            fail_fast: false,
        }
    }
}

/// Complete `recolor.toml` configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecolorConfig {
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub recolor: RecolorSettings,
}

/// Configuration validation error
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    /// Path to the invalid field (e.g., "recolor.jobs")
    pub field: String,
    /// Error message
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "recolor.toml: '{}' {}", self.field, self.message)
    }
}

impl RecolorConfig {
    /// Validate the configuration and return any errors
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut errors = Vec::new();

        let extension = &self.recolor.extension;
        if extension.is_empty() {
            errors.push(ConfigValidationError {
                field: "recolor.extension".to_string(),
                message: "must be a non-empty string".to_string(),
            });
        } else if extension.starts_with('.') {
            errors.push(ConfigValidationError {
                field: "recolor.extension".to_string(),
                message: "must not start with '.'".to_string(),
            });
        }

        if self.recolor.jobs == Some(0) {
            errors.push(ConfigValidationError {
                field: "recolor.jobs".to_string(),
                message: "must be a positive integer".to_string(),
            });
        }

        errors
    }
}
