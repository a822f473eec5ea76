//! Global constants for volmask

/// Brush radius (in pixels) for a fresh session
pub const DEFAULT_BRUSH_SIZE: u32 = 1;

/// Smallest brush radius
pub const MIN_BRUSH_SIZE: u32 = 1;

/// Opacity of label colors drawn over the scan
pub const OVERLAY_ALPHA: f32 = 0.5;

/// Text shown in place of the title when nothing is loaded
pub const NO_VOLUME_MESSAGE: &str = "No image loaded";
