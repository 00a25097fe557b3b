//! RGB color values used by uniform palettes
//!
//! Palette colors carry no alpha channel. Matching and painting only ever
//! look at the red, green and blue channels of a pixel, so transparency in
//! the source sprite always survives a recolor.

use image::Rgba;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An opaque RGB color with 8 bits per channel.
///
/// Equality is exact per-channel equality; there is no tolerance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Color {
    /// Create a color from its three channels.
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// The channels as an `[r, g, b]` array.
    pub const fn channels(self) -> [u8; 3] {
        [self.red, self.green, self.blue]
    }

    /// Check whether a pixel's RGB channels equal this color exactly.
    ///
    /// The pixel's alpha channel is ignored.
    pub fn matches(self, pixel: &Rgba<u8>) -> bool {
        pixel[0] == self.red && pixel[1] == self.green && pixel[2] == self.blue
    }

    /// Overwrite a pixel's RGB channels with this color, keeping its alpha.
    pub fn paint(self, pixel: &mut Rgba<u8>) {
        pixel[0] = self.red;
        pixel[1] = self.green;
        pixel[2] = self.blue;
    }
}

impl From<[u8; 3]> for Color {
    fn from([red, green, blue]: [u8; 3]) -> Self {
        Self { red, green, blue }
    }
}

impl From<Color> for [u8; 3] {
    fn from(color: Color) -> Self {
        color.channels()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.red, self.green, self.blue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_uppercase_hex() {
        assert_eq!(Color::new(255, 0, 16).to_string(), "#FF0010");
        assert_eq!(Color::new(0, 0, 0).to_string(), "#000000");
    }

    #[test]
    fn test_matches_ignores_alpha() {
        let color = Color::new(10, 10, 10);
        assert!(color.matches(&Rgba([10, 10, 10, 255])));
        assert!(color.matches(&Rgba([10, 10, 10, 0])));
        assert!(!color.matches(&Rgba([10, 10, 11, 255])));
    }

    #[test]
    fn test_paint_keeps_alpha() {
        let mut pixel = Rgba([10, 10, 10, 128]);
        Color::new(200, 100, 50).paint(&mut pixel);
        assert_eq!(pixel, Rgba([200, 100, 50, 128]));
    }

    #[test]
    fn test_array_conversions() {
        let color: Color = [1, 2, 3].into();
        assert_eq!(color, Color::new(1, 2, 3));
        let channels: [u8; 3] = color.into();
        assert_eq!(channels, [1, 2, 3]);
    }

    #[test]
    fn test_deserialize_from_channel_object() {
        let color: Color =
            serde_json::from_str(r#"{"red": 12, "green": 34, "blue": 56}"#).unwrap();
        assert_eq!(color, Color::new(12, 34, 56));
    }
}
