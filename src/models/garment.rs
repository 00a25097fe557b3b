//! Garment groups and their ordered color slots.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::color::Color;

/// One of the three fixed garment regions of a uniform.
///
/// Colors within a group are substituted together during a recolor pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GarmentGroup {
    /// The crown of the cap
    Hat,
    /// Cap brim, sleeves and collar trim
    BrimSleevesCollar,
    /// The body of the jersey
    Jersey,
}

impl GarmentGroup {
    /// Every group, in document order.
    pub const ALL: [GarmentGroup; 3] =
        [GarmentGroup::Hat, GarmentGroup::BrimSleevesCollar, GarmentGroup::Jersey];

    /// Groups painted with a player's primary team colors.
    pub const PRIMARY: [GarmentGroup; 2] = [GarmentGroup::Hat, GarmentGroup::Jersey];

    /// Groups painted with a player's secondary team colors.
    pub const SECONDARY: [GarmentGroup; 1] = [GarmentGroup::BrimSleevesCollar];

    /// The key used for this group in palette documents.
    pub fn key(self) -> &'static str {
        match self {
            GarmentGroup::Hat => "hat",
            GarmentGroup::BrimSleevesCollar => "brim_sleeves_collar",
            GarmentGroup::Jersey => "jersey",
        }
    }
}

impl fmt::Display for GarmentGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A garment group name that is not one of the three known groups.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown garment group '{0}' (expected hat, brim_sleeves_collar or jersey)")]
pub struct GarmentGroupMismatch(pub String);

impl FromStr for GarmentGroup {
    type Err = GarmentGroupMismatch;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hat" => Ok(GarmentGroup::Hat),
            "brim_sleeves_collar" | "brim-sleeves-collar" => Ok(GarmentGroup::BrimSleevesCollar),
            "jersey" => Ok(GarmentGroup::Jersey),
            other => Err(GarmentGroupMismatch(other.to_string())),
        }
    }
}

/// A labelled color slot within a garment group.
///
/// `color` is `None` when the uniform defines no color for this region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GarmentSlot {
    pub label: String,
    pub color: Option<Color>,
}

/// Ordered label -> color mapping for one garment group.
///
/// Slot order is the order of the source document. Two mappings are paired
/// positionally during a recolor, so order matters and labels do not.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GarmentColors {
    slots: Vec<GarmentSlot>,
}

impl GarmentColors {
    /// Create an empty mapping.
    pub fn new() -> Self {
        Self { slots: Vec::new() }
    }

    /// Append a slot. Order of calls is the pairing order.
    pub fn push(&mut self, label: impl Into<String>, color: Option<Color>) {
        self.slots.push(GarmentSlot { label: label.into(), color });
    }

    /// Builder-style variant of [`GarmentColors::push`].
    pub fn with(mut self, label: impl Into<String>, color: Option<Color>) -> Self {
        self.push(label, color);
        self
    }

    pub fn slots(&self) -> &[GarmentSlot] {
        &self.slots
    }

    /// Slot colors in pairing order.
    pub fn colors(&self) -> impl Iterator<Item = Option<Color>> + '_ {
        self.slots.iter().map(|slot| slot.color)
    }

    /// Look up the color of a slot by label.
    ///
    /// Returns `None` both for a missing label and for a slot without a color.
    pub fn color(&self, label: &str) -> Option<Color> {
        self.slots.iter().find(|slot| slot.label == label).and_then(|slot| slot.color)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl FromIterator<(String, Option<Color>)> for GarmentColors {
    fn from_iter<I: IntoIterator<Item = (String, Option<Color>)>>(iter: I) -> Self {
        Self {
            slots: iter.into_iter().map(|(label, color)| GarmentSlot { label, color }).collect(),
        }
    }
}

impl Serialize for GarmentColors {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.slots.len()))?;
        for slot in &self.slots {
            map.serialize_entry(&slot.label, &slot.color)?;
        }
        map.end()
    }
}
