//! PNG color types supported by the codec.

use serde::{Deserialize, Serialize};

/// Supported PNG color types (bit depth is always 8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorType {
    /// One channel per pixel.
    Grayscale,
    /// Red, green, blue.
    Rgb,
    /// Red, green, blue, alpha.
    Rgba,
}

impl ColorType {
    /// All supported color types, ordered by bytes per pixel.
    pub const ALL: [ColorType; 3] = [ColorType::Grayscale, ColorType::Rgb, ColorType::Rgba];

    /// Parses the IHDR color type code.
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(ColorType::Grayscale),
            2 => Some(ColorType::Rgb),
            6 => Some(ColorType::Rgba),
            _ => None,
        }
    }

    /// Returns the IHDR color type code.
    pub fn code(self) -> u8 {
        match self {
            ColorType::Grayscale => 0,
            ColorType::Rgb => 2,
            ColorType::Rgba => 6,
        }
    }

    /// Bytes per pixel at 8 bits per channel.
    pub fn bytes_per_pixel(self) -> usize {
        match self {
            ColorType::Grayscale => 1,
            ColorType::Rgb => 3,
            ColorType::Rgba => 4,
        }
    }

    /// Returns the string representation.
    pub fn as_str(self) -> &'static str {
        match self {
            ColorType::Grayscale => "grayscale",
            ColorType::Rgb => "rgb",
            ColorType::Rgba => "rgba",
        }
    }
}

impl std::fmt::Display for ColorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
