//! Palette document parsing
//!
//! Turns a team colors document into a [`PaletteCatalog`]. The document is a
//! JSON object mapping team names to team objects:
//!
//! ```json
//! {
//!   "Base": {
//!     "name": "Base",
//!     "uniform": {
//!       "hat": { "crown": { "red": 10, "green": 10, "blue": 10 } },
//!       "brim_sleeves_collar": { "trim": { "red": 30, "green": 30, "blue": 30 } },
//!       "jersey": { "body": { "red": 20, "green": 20, "blue": 20 }, "stripe": null }
//!     }
//!   }
//! }
//! ```
//!
//! Garment slot order is taken from the document, so the parser works on a
//! `serde_json::Value` built with `preserve_order`.
//!
//! # Example
//!
//! ```
//! use recolor::palette_parser::{PaletteParser, ParseMode};
//!
//! let doc = r#"{"Base": {"name": "Base", "uniform": {
//!     "hat": {"crown": {"red": 10, "green": 10, "blue": 10}},
//!     "brim_sleeves_collar": {},
//!     "jersey": {"body": null}}}}"#;
//!
//! let parsed = PaletteParser::new(ParseMode::Strict).parse_str(doc).unwrap();
//! assert!(parsed.warnings.is_empty());
//! assert_eq!(parsed.catalog.base().unwrap().uniform.jersey.len(), 1);
//! ```

use serde_json::{Map, Value};
use std::fmt;

use crate::catalog::{PaletteCatalog, PaletteError};
use crate::color::Color;
use crate::models::{GarmentColors, GarmentGroup, Team, Uniform};

/// Range checking mode for color channels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParseMode {
    /// Reject channels outside 0-255
    Strict,
    /// Clamp channels outside 0-255 and record a warning
    #[default]
    Lenient,
}

impl ParseMode {
    pub fn from_strict(strict: bool) -> Self {
        if strict {
            ParseMode::Strict
        } else {
            ParseMode::Lenient
        }
    }
}

/// Warning produced while parsing in lenient mode
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaletteWarning {
    /// Dotted location in the document, e.g. `Cubs.uniform.hat.crown.red`
    pub path: String,
    pub message: String,
}

impl fmt::Display for PaletteWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// A parsed catalog plus any lenient-mode warnings
#[derive(Debug, Clone)]
pub struct ParsedCatalog {
    pub catalog: PaletteCatalog,
    pub warnings: Vec<PaletteWarning>,
}

/// Structural validator for palette documents
#[derive(Debug, Clone, Copy, Default)]
pub struct PaletteParser {
    mode: ParseMode,
}

impl PaletteParser {
    pub fn new(mode: ParseMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> ParseMode {
        self.mode
    }

    /// Parse a palette document from JSON text.
    pub fn parse_str(&self, text: &str) -> Result<ParsedCatalog, PaletteError> {
        let doc: Value = serde_json::from_str(text)?;
        self.parse_value(&doc)
    }

    /// Parse an already-decoded palette document.
    pub fn parse_value(&self, doc: &Value) -> Result<ParsedCatalog, PaletteError> {
        let teams = expect_object(doc, "", "palette document must be an object of teams")?;

        let mut catalog = PaletteCatalog::new();
        let mut warnings = Vec::new();
        for (key, value) in teams {
            let team = self.parse_team(key, value, &mut warnings)?;
            catalog.insert(key.clone(), team);
        }

        Ok(ParsedCatalog { catalog, warnings })
    }

    fn parse_team(
        &self,
        key: &str,
        value: &Value,
        warnings: &mut Vec<PaletteWarning>,
    ) -> Result<Team, PaletteError> {
        let team = expect_object(value, key, "team must be an object")?;

        let name_path = join(key, "name");
        let name = match team.get("name") {
            Some(Value::String(name)) => name.clone(),
            Some(_) => return Err(malformed(name_path, "team name must be a string")),
            None => return Err(malformed(name_path, "missing team name")),
        };

        let uniform_path = join(key, "uniform");
        let uniform = team.get("uniform").ok_or_else(|| malformed(&uniform_path, "missing uniform"))?;
        let uniform = self.parse_uniform(&uniform_path, uniform, warnings)?;

        Ok(Team { name, uniform })
    }

    fn parse_uniform(
        &self,
        path: &str,
        value: &Value,
        warnings: &mut Vec<PaletteWarning>,
    ) -> Result<Uniform, PaletteError> {
        let fields = expect_object(value, path, "uniform must be an object")?;

        let mut uniform = Uniform::default();
        for group in GarmentGroup::ALL {
            let garment_path = join(path, group.key());
            let garment = fields
                .get(group.key())
                .ok_or_else(|| malformed(&garment_path, "missing garment group"))?;
            *uniform.garment_mut(group) = self.parse_garment(&garment_path, garment, warnings)?;
        }

        Ok(uniform)
    }

    fn parse_garment(
        &self,
        path: &str,
        value: &Value,
        warnings: &mut Vec<PaletteWarning>,
    ) -> Result<GarmentColors, PaletteError> {
        let slots = expect_object(value, path, "garment must map labels to colors")?;

        let mut colors = GarmentColors::new();
        for (label, color) in slots {
            let slot_path = join(path, label);
            let color = match color {
                Value::Null => None,
                other => Some(self.parse_color(&slot_path, other, warnings)?),
            };
            colors.push(label.clone(), color);
        }

        Ok(colors)
    }

    fn parse_color(
        &self,
        path: &str,
        value: &Value,
        warnings: &mut Vec<PaletteWarning>,
    ) -> Result<Color, PaletteError> {
        let channels = expect_object(value, path, "color must be an object with red, green, blue")?;

        let red = self.parse_channel(path, channels, "red", warnings)?;
        let green = self.parse_channel(path, channels, "green", warnings)?;
        let blue = self.parse_channel(path, channels, "blue", warnings)?;

        Ok(Color::new(red, green, blue))
    }

    fn parse_channel(
        &self,
        path: &str,
        channels: &Map<String, Value>,
        channel: &str,
        warnings: &mut Vec<PaletteWarning>,
    ) -> Result<u8, PaletteError> {
        let channel_path = join(path, channel);
        let raw = match channels.get(channel) {
            // u64 values beyond i64 are out of range either way
            Some(Value::Number(n)) => n.as_i64().or_else(|| n.as_u64().map(|_| i64::MAX)),
            Some(_) => None,
            None => return Err(malformed(channel_path, "missing color channel")),
        };
        let Some(raw) = raw else {
            return Err(malformed(channel_path, "color channel must be an integer"));
        };

        if let Ok(value) = u8::try_from(raw) {
            return Ok(value);
        }

        match self.mode {
            ParseMode::Strict => Err(malformed(
                channel_path,
                format!("channel value {} is outside 0-255", raw),
            )),
            ParseMode::Lenient => {
                let clamped = raw.clamp(0, 255) as u8;
                warnings.push(PaletteWarning {
                    path: channel_path,
                    message: format!("channel value {} is outside 0-255, clamped to {}", raw, clamped),
                });
                Ok(clamped)
            }
        }
    }
}

/// Parse a palette document with the given mode.
pub fn parse_catalog(doc: &Value, mode: ParseMode) -> Result<ParsedCatalog, PaletteError> {
    PaletteParser::new(mode).parse_value(doc)
}

fn expect_object<'a>(
    value: &'a Value,
    path: &str,
    message: &str,
) -> Result<&'a Map<String, Value>, PaletteError> {
    value.as_object().ok_or_else(|| malformed(path, message))
}

fn malformed(path: impl Into<String>, message: impl Into<String>) -> PaletteError {
    let path = path.into();
    let path = if path.is_empty() { "<root>".to_string() } else { path };
    PaletteError::MalformedPalette { path, message: message.into() }
}

fn join(path: &str, segment: &str) -> String {
    if path.is_empty() {
        segment.to_string()
    } else {
        format!("{}.{}", path, segment)
    }
}
