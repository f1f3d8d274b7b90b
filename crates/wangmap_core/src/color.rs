//! Display colors for Wang terrain classes

use crate::InvalidAssetData;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Simple RGBA color for terrain visualization
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    pub const RED: Self = Self::rgb(1.0, 0.0, 0.0);
    pub const GREEN: Self = Self::rgb(0.0, 1.0, 0.0);
    pub const BLUE: Self = Self::rgb(0.0, 0.0, 1.0);

    /// Parse a Tiled color string: `#rrggbb` or `#aarrggbb` (leading `#` optional)
    pub fn from_hex(s: &str) -> Result<Self, InvalidAssetData> {
        let digits = s.strip_prefix('#').unwrap_or(s);
        let invalid = || InvalidAssetData::InvalidColor(s.to_string());

        if !digits.is_ascii() {
            return Err(invalid());
        }
        let channel = |i: usize| -> Result<f32, InvalidAssetData> {
            let byte = u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| invalid())?;
            Ok(byte as f32 / 255.0)
        };

        match digits.len() {
            6 => Ok(Self::rgb(channel(0)?, channel(2)?, channel(4)?)),
            8 => Ok(Self::rgba(channel(2)?, channel(4)?, channel(6)?, channel(0)?)),
            _ => Err(invalid()),
        }
    }

    /// Format as a Tiled color string, omitting alpha when fully opaque
    pub fn to_hex(&self) -> String {
        let byte = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        if byte(self.a) == 255 {
            format!("#{:02x}{:02x}{:02x}", byte(self.r), byte(self.g), byte(self.b))
        } else {
            format!(
                "#{:02x}{:02x}{:02x}{:02x}",
                byte(self.a),
                byte(self.r),
                byte(self.g),
                byte(self.b)
            )
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

impl FromStr for Color {
    type Err = InvalidAssetData;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rgb() {
        assert_eq!(Color::from_hex("#ff0000").unwrap(), Color::RED);
        assert_eq!(Color::from_hex("00ff00").unwrap(), Color::GREEN);
    }

    #[test]
    fn test_parse_argb() {
        let color = Color::from_hex("#000000ff").unwrap();
        assert_eq!(color.a, 0.0);
        assert_eq!(color.b, 1.0);
    }

    #[test]
    fn test_hex_output() {
        assert_eq!(Color::from_hex("#ff7700").unwrap().to_hex(), "#ff7700");
        assert_eq!(Color::from_hex("#8000e9ff").unwrap().to_hex(), "#8000e9ff");
    }

    #[test]
    fn test_invalid_color() {
        assert!(Color::from_hex("#ff00").is_err());
        assert!(Color::from_hex("#gg0000").is_err());
        assert!(Color::from_hex("#ééé").is_err());
    }
}
