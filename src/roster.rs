//! Player assignment documents.
//!
//! A roster maps player ids to their team assignment:
//!
//! ```json
//! {
//!   "Pablo Sanchez": { "primary": "Cubs", "secondary": "Base", "img_filename": "pablo.png" }
//! }
//! ```
//!
//! Player order follows the document.

use serde_json::{Map, Value};
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::models::PlayerAssignment;

/// Errors from loading a roster or selecting players from it.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RosterError {
    #[error("Failed to read players file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid players JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// A player's entry has the wrong shape
    #[error("Malformed entry for player '{player}': {message}")]
    Malformed { player: String, message: String },
    /// A requested player is not in the roster
    #[error("Player '{0}' not found in players file")]
    UnknownPlayer(String),
}

/// Ordered player id -> assignment mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roster {
    players: Vec<(String, PlayerAssignment)>,
}

impl Roster {
    pub fn new() -> Self {
        Self { players: Vec::new() }
    }

    /// Load a roster from a JSON file.
    pub fn load(path: &Path) -> Result<Self, RosterError> {
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Parse a roster from JSON text.
    pub fn from_json_str(text: &str) -> Result<Self, RosterError> {
        let doc: Value = serde_json::from_str(text)?;
        let Value::Object(entries) = doc else {
            return Err(RosterError::Malformed {
                player: "<root>".to_string(),
                message: "players document must be an object".to_string(),
            });
        };
        Self::from_entries(entries)
    }

    fn from_entries(entries: Map<String, Value>) -> Result<Self, RosterError> {
        let mut roster = Self::new();
        for (player, entry) in entries {
            match serde_json::from_value::<PlayerAssignment>(entry) {
                Ok(assignment) => roster.push(player, assignment),
                Err(e) => return Err(RosterError::Malformed { player, message: e.to_string() }),
            }
        }
        Ok(roster)
    }

    /// Add a player. A repeated id replaces the earlier assignment in place.
    pub fn push(&mut self, player: impl Into<String>, assignment: PlayerAssignment) {
        let player = player.into();
        match self.players.iter_mut().find(|(id, _)| *id == player) {
            Some(existing) => existing.1 = assignment,
            None => self.players.push((player, assignment)),
        }
    }

    pub fn get(&self, player: &str) -> Option<&PlayerAssignment> {
        self.players.iter().find(|(id, _)| id == player).map(|(_, assignment)| assignment)
    }

    /// Iterate over `(player, assignment)` pairs in document order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PlayerAssignment)> {
        self.players.iter().map(|(id, assignment)| (id.as_str(), assignment))
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Pick the players to recolor.
    ///
    /// `None` selects every player in document order. Otherwise each name is
    /// looked up in the order given; unknown names are returned as
    /// [`RosterError::UnknownPlayer`] so the caller can report and skip them.
    pub fn select<'a>(
        &'a self,
        names: Option<&'a [String]>,
    ) -> Vec<Result<(&'a str, &'a PlayerAssignment), RosterError>> {
        match names {
            None => self.iter().map(Ok).collect(),
            Some(names) => names
                .iter()
                .map(|name| {
                    self.get(name)
                        .map(|assignment| (name.as_str(), assignment))
                        .ok_or_else(|| RosterError::UnknownPlayer(name.clone()))
                })
                .collect(),
        }
    }
}
