//! Data models for uniform palettes (garments, uniforms, teams, players)

mod garment;
mod player;
mod uniform;

// Re-export all public types
pub use garment::{GarmentColors, GarmentGroup, GarmentGroupMismatch, GarmentSlot};
pub use player::PlayerAssignment;
pub use uniform::{Team, Uniform, BASE_TEAM_NAME};
