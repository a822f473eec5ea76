//! Label colors and their mask codes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Mask value for unlabeled cells.
pub const UNLABELED: u8 = 0;

/// Highest mask value a label can write.
pub const MAX_LABEL_CODE: u8 = 3;

/// A paint color, each mapped to a fixed mask value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LabelColor {
    /// Mask value 1
    #[default]
    Red,
    /// Mask value 2
    Green,
    /// Mask value 3
    Yellow,
}

impl LabelColor {
    /// All labels in code order.
    pub fn all() -> &'static [LabelColor] {
        &[LabelColor::Red, LabelColor::Green, LabelColor::Yellow]
    }

    /// Mask value written by this label.
    pub fn code(self) -> u8 {
        match self {
            LabelColor::Red => 1,
            LabelColor::Green => 2,
            LabelColor::Yellow => 3,
        }
    }

    /// Label for a mask value, `None` for unlabeled or unknown codes.
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(LabelColor::Red),
            2 => Some(LabelColor::Green),
            3 => Some(LabelColor::Yellow),
            _ => None,
        }
    }

    /// Lowercase name used in titles, commands and archives.
    pub fn name(self) -> &'static str {
        match self {
            LabelColor::Red => "red",
            LabelColor::Green => "green",
            LabelColor::Yellow => "yellow",
        }
    }

    /// Overlay RGB color.
    pub fn rgb(self) -> [u8; 3] {
        match self {
            LabelColor::Red => [228, 8, 34],
            LabelColor::Green => [8, 255, 8],
            LabelColor::Yellow => [255, 245, 84],
        }
    }
}

impl fmt::Display for LabelColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A color name outside the label table.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown label color '{0}' (expected red, green or yellow)")]
pub struct UnknownColor(pub String);

impl FromStr for LabelColor {
    type Err = UnknownColor;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        LabelColor::all()
            .iter()
            .copied()
            .find(|c| c.name() == lower)
            .ok_or_else(|| UnknownColor(s.to_string()))
    }
}
