//! Uniforms and teams.

use serde::Serialize;

use super::garment::{GarmentColors, GarmentGroup};

/// Name of the catalog entry whose uniform is painted on the source images.
pub const BASE_TEAM_NAME: &str = "Base";

/// The color scheme of one uniform: exactly three garment groups.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Uniform {
    pub hat: GarmentColors,
    pub brim_sleeves_collar: GarmentColors,
    pub jersey: GarmentColors,
}

impl Uniform {
    /// The color mapping for a garment group.
    pub fn garment(&self, group: GarmentGroup) -> &GarmentColors {
        match group {
            GarmentGroup::Hat => &self.hat,
            GarmentGroup::BrimSleevesCollar => &self.brim_sleeves_collar,
            GarmentGroup::Jersey => &self.jersey,
        }
    }

    pub fn garment_mut(&mut self, group: GarmentGroup) -> &mut GarmentColors {
        match group {
            GarmentGroup::Hat => &mut self.hat,
            GarmentGroup::BrimSleevesCollar => &mut self.brim_sleeves_collar,
            GarmentGroup::Jersey => &mut self.jersey,
        }
    }
}

/// A named team and its uniform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Team {
    pub name: String,
    pub uniform: Uniform,
}

impl Team {
    pub fn new(name: impl Into<String>, uniform: Uniform) -> Self {
        Self { name: name.into(), uniform }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;

    #[test]
    fn test_garment_access_matches_fields() {
        let mut uniform = Uniform::default();
        uniform.garment_mut(GarmentGroup::Jersey).push("body", Some(Color::new(1, 2, 3)));

        assert_eq!(uniform.jersey.color("body"), Some(Color::new(1, 2, 3)));
        assert!(uniform.garment(GarmentGroup::Hat).is_empty());
        assert!(uniform.garment(GarmentGroup::BrimSleevesCollar).is_empty());
        assert_eq!(uniform.garment(GarmentGroup::Jersey).len(), 1);
    }
}
