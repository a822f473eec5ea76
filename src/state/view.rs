//! View state derived from the active volume.

use crate::constants::{DEFAULT_BRUSH_SIZE, MIN_BRUSH_SIZE};
use crate::model::LabelColor;

/// Direction for volume and slice navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Towards index 0
    Previous,
    /// Towards the last index
    Next,
}

/// What is shown and how pointer input paints.
///
/// Reset from collection transitions; never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    /// Active slice of the active volume
    pub slice: usize,
    /// Brush radius in pixels, at least 1
    pub brush_size: u32,
    /// Label written by paint strokes
    pub color: LabelColor,
    /// Whether pointer input paints
    pub drawing_enabled: bool,
}

impl ViewState {
    /// Create a view state with the given brush and color preferences.
    pub fn new(brush_size: u32, color: LabelColor) -> Self {
        Self {
            slice: 0,
            brush_size: brush_size.max(MIN_BRUSH_SIZE),
            color,
            drawing_enabled: false,
        }
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new(DEFAULT_BRUSH_SIZE, LabelColor::default())
    }
}
