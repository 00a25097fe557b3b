//! Team palette catalog.
//!
//! The catalog is loaded once per run and shared read-only by every recolor.

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::models::{Team, BASE_TEAM_NAME};
use crate::palette_parser::{PaletteParser, ParseMode, ParsedCatalog};

/// Errors from loading a palette document or looking up teams.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PaletteError {
    /// Document does not have the expected shape
    #[error("Malformed palette at '{path}': {message}")]
    MalformedPalette { path: String, message: String },
    /// Team name is not in the catalog
    #[error("Team '{0}' not found in palette")]
    UnknownTeam(String),
    /// Catalog has no "Base" entry to recolor from
    #[error("Palette has no \"Base\" team describing the source image colors")]
    MissingBaseTeam,
    /// Palette file could not be read
    #[error("Failed to read palette file: {0}")]
    Io(#[from] std::io::Error),
    /// Palette file is not valid JSON
    #[error("Invalid palette JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Team name -> team lookup with the distinguished "Base" entry.
#[derive(Debug, Clone, Default)]
pub struct PaletteCatalog {
    teams: HashMap<String, Team>,
}

impl PaletteCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self { teams: HashMap::new() }
    }

    /// Load a catalog from a JSON palette file.
    pub fn load(path: &Path, mode: ParseMode) -> Result<ParsedCatalog, PaletteError> {
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text, mode)
    }

    /// Parse a catalog from JSON text.
    pub fn from_json_str(text: &str, mode: ParseMode) -> Result<ParsedCatalog, PaletteError> {
        PaletteParser::new(mode).parse_str(text)
    }

    /// Add a team under a lookup key.
    ///
    /// If a team with the same key already exists, it is replaced and returned.
    pub fn insert(&mut self, key: impl Into<String>, team: Team) -> Option<Team> {
        self.teams.insert(key.into(), team)
    }

    /// Look up a team by its exact name.
    pub fn get(&self, name: &str) -> Result<&Team, PaletteError> {
        self.teams.get(name).ok_or_else(|| PaletteError::UnknownTeam(name.to_string()))
    }

    /// The team whose uniform is painted on the unmodified source images.
    pub fn base(&self) -> Result<&Team, PaletteError> {
        self.teams.get(BASE_TEAM_NAME).ok_or(PaletteError::MissingBaseTeam)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.teams.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.teams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }

    /// Team names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.teams.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Iterate over `(name, team)` pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Team)> {
        self.teams.iter().map(|(name, team)| (name.as_str(), team))
    }
}
