//! Headless rendering of the current view.
//!
//! Produces the title line and an RGB composite of the active slice with the
//! label overlay, which a presentation layer can show or write to disk.

use std::path::Path;

use image::{Rgb, RgbImage};
use ndarray::ArrayView2;

use crate::constants::{NO_VOLUME_MESSAGE, OVERLAY_ALPHA};
use crate::model::{LabelColor, Volume};
use crate::state::VolumeStore;

/// Title line for the current view, or the placeholder when nothing is loaded.
///
/// Format: `"{name} | slice: {n}"`, followed by
/// `" | drawing: ON | color: {color}"` while drawing is enabled.
pub fn title(store: &VolumeStore) -> String {
    let Some(volume) = store.active_volume() else {
        return NO_VOLUME_MESSAGE.to_string();
    };
    let view = store.view();
    let mut title = format!("{} | slice: {}", volume.name(), view.slice);
    if view.drawing_enabled {
        title.push_str(&format!(" | drawing: ON | color: {}", view.color));
    }
    title
}

/// Map a slice's intensities to 0..=255 using the slice's own min and max.
fn grayscale(plane: ArrayView2<'_, f64>) -> impl Fn(usize, usize) -> u8 + '_ {
    let (min, max) = plane
        .iter()
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });
    let range = max - min;
    move |row, col| {
        let v = plane[[row, col]];
        if !v.is_finite() || range <= 0.0 {
            return 0;
        }
        (((v - min) / range) * 255.0).round().clamp(0.0, 255.0) as u8
    }
}

fn blend(base: u8, overlay: u8) -> u8 {
    let a = OVERLAY_ALPHA;
    (f32::from(base) * (1.0 - a) + f32::from(overlay) * a).round() as u8
}

/// Composite one slice of `volume`: grayscale scan with labeled cells tinted
/// by their label color. Image x is the column, y is the row.
pub fn compose_slice(volume: &Volume, slice: usize) -> RgbImage {
    let plane = volume.image_slice(slice);
    let mask = volume.mask_slice(slice);
    let gray = grayscale(plane);

    RgbImage::from_fn(volume.cols() as u32, volume.rows() as u32, |x, y| {
        let (row, col) = (y as usize, x as usize);
        let g = gray(row, col);
        match LabelColor::from_code(mask[[row, col]]) {
            Some(label) => {
                let [r, gr, b] = label.rgb();
                Rgb([blend(g, r), blend(g, gr), blend(g, b)])
            }
            None => Rgb([g, g, g]),
        }
    })
}

/// Composite of the active slice, `None` when nothing is loaded.
pub fn render_active(store: &VolumeStore) -> Option<RgbImage> {
    let volume = store.active_volume()?;
    let slice = store.view().slice;
    (slice < volume.depth()).then(|| compose_slice(volume, slice))
}

/// Write the active slice composite to `path` (format chosen by extension).
///
/// Returns `Ok(false)` when nothing is loaded.
pub fn save_snapshot(store: &VolumeStore, path: &Path) -> Result<bool, image::ImageError> {
    let Some(img) = render_active(store) else {
        return Ok(false);
    };
    img.save(path)?;
    log::debug!("Snapshot written to {:?}", path);
    Ok(true)
}
