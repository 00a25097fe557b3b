//! Player color assignments.

use serde::{Deserialize, Serialize};

/// Which teams a player wears and which source image holds their sprite.
///
/// The player id is the key of the assignment in the players document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerAssignment {
    /// Team whose colors go on the hat and jersey
    pub primary: String,
    /// Team whose colors go on the brim, sleeves and collar
    pub secondary: String,
    /// Source image file name, relative to the base images directory
    #[serde(rename = "img_filename")]
    pub image_filename: String,
}
