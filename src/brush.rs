//! Circular brush rasterization onto a volume's label mask.
//!
//! A stroke is a sequence of discrete dabs: each pointer sample paints a
//! closed disk centred on the sampled pixel. Samples are not joined, so a fast
//! drag can leave gaps between dabs.

use crate::model::{LabelColor, Volume};

/// A pointer position in canvas space, or the sentinel for "outside the canvas".
///
/// Canvas space is continuous pixel space: pixel `(col, row)` covers
/// `[col, col + 1) x [row, row + 1)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerPos {
    /// Inside the canvas at `(x, y)`
    At { x: f64, y: f64 },
    /// Outside the canvas
    Outside,
}

impl PointerPos {
    pub fn at(x: f64, y: f64) -> Self {
        PointerPos::At { x, y }
    }

    /// Pixel `(col, row)` under the pointer, if it lies inside a `rows x cols` image.
    pub fn to_pixel(self, rows: usize, cols: usize) -> Option<(usize, usize)> {
        let PointerPos::At { x, y } = self else {
            return None;
        };
        if !x.is_finite() || !y.is_finite() || x < 0.0 || y < 0.0 {
            return None;
        }
        let (col, row) = (x.floor() as usize, y.floor() as usize);
        (col < cols && row < rows).then_some((col, row))
    }
}

/// Drawing gesture state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StrokeState {
    /// No button held.
    #[default]
    Idle,
    /// Button held inside the canvas with drawing enabled; moves paint.
    Painting,
}

impl StrokeState {
    pub fn is_painting(self) -> bool {
        self == StrokeState::Painting
    }
}

/// Half-open `[start, end)` range of the brush's bounding box along one axis,
/// clamped to `[0, extent)`.
fn clamped_span(center: i64, radius: i64, extent: usize) -> std::ops::Range<usize> {
    let extent = i64::try_from(extent).unwrap_or(i64::MAX);
    let start = center.saturating_sub(radius).clamp(0, extent);
    let end = center
        .saturating_add(radius)
        .saturating_add(1)
        .clamp(0, extent);
    start as usize..end.max(start) as usize
}

/// Squared distance from `(dc, dr)` to the origin, exact for any `i64` offsets.
fn squared_distance(dc: i64, dr: i64) -> u128 {
    let dc = u128::from(dc.unsigned_abs());
    let dr = u128::from(dr.unsigned_abs());
    dc * dc + dr * dr
}

/// Cells `(col, row)` covered by a closed disk of `radius` around
/// `(center_col, center_row)`, restricted to a `rows x cols` plane.
///
/// A cell is covered when `(col - cc)^2 + (row - cr)^2 <= radius^2`. Any
/// `u32` radius is valid; squares are computed in `u128`.
pub fn disk_cells(
    center_col: i64,
    center_row: i64,
    radius: u32,
    rows: usize,
    cols: usize,
) -> Vec<(usize, usize)> {
    let r = i64::from(radius);
    let r2 = u128::from(radius) * u128::from(radius);
    let col_span = clamped_span(center_col, r, cols);
    let row_span = clamped_span(center_row, r, rows);

    let mut cells = Vec::new();
    for col in col_span {
        let dc = (col as i64).saturating_sub(center_col);
        for row in row_span.clone() {
            let dr = (row as i64).saturating_sub(center_row);
            if squared_distance(dc, dr) <= r2 {
                cells.push((col, row));
            }
        }
    }
    cells
}

/// Paint one dab of `label` into `volume`'s mask at `slice`.
///
/// Returns the number of cells written. Out-of-range slices paint nothing.
pub fn paint_at(
    volume: &mut Volume,
    slice: usize,
    center_col: i64,
    center_row: i64,
    radius: u32,
    label: LabelColor,
) -> usize {
    if slice >= volume.depth() {
        log::warn!(
            "paint_at: slice {} out of range for depth {}",
            slice,
            volume.depth()
        );
        return 0;
    }
    let cells = disk_cells(center_col, center_row, radius, volume.rows(), volume.cols());
    let code = label.code();
    let mut plane = volume.mask_slice_mut(slice);
    for &(col, row) in &cells {
        plane[[row, col]] = code;
    }
    log::trace!(
        "paint_at: ({}, {}) r={} slice={} -> {} cells",
        center_col,
        center_row,
        radius,
        slice,
        cells.len()
    );
    cells.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array3;

    fn blank(rows: usize, cols: usize, depth: usize) -> Volume {
        Volume::new("blank", Array3::zeros((rows, cols, depth)))
    }

    #[test]
    fn test_disk_matches_closed_disk_everywhere() {
        let (rows, cols) = (9, 12);
        for radius in 1..=4u32 {
            for &(cc, cr) in &[(0i64, 0i64), (5, 4), (11, 8), (3, 7)] {
                let cells = disk_cells(cc, cr, radius, rows, cols);
                let r2 = i64::from(radius * radius);
                for col in 0..cols {
                    for row in 0..rows {
                        let dc = col as i64 - cc;
                        let dr = row as i64 - cr;
                        let inside = dc * dc + dr * dr <= r2;
                        assert_eq!(
                            cells.contains(&(col, row)),
                            inside,
                            "cell ({}, {}) radius {} center ({}, {})",
                            col,
                            row,
                            radius,
                            cc,
                            cr
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_radius_one_is_a_plus() {
        let mut cells = disk_cells(5, 5, 1, 10, 10);
        cells.sort();
        assert_eq!(cells, vec![(4, 5), (5, 4), (5, 5), (5, 6), (6, 5)]);
    }

    #[test]
    fn test_boundary_cells_included() {
        let cells = disk_cells(5, 5, 2, 10, 10);
        assert!(cells.contains(&(7, 5)));
        assert!(cells.contains(&(5, 3)));
        assert!(!cells.contains(&(7, 7)));
        assert_eq!(cells.len(), 13);
    }

    #[test]
    fn test_clamped_at_corner() {
        let cells = disk_cells(0, 0, 3, 4, 4);
        assert!(cells.iter().all(|&(c, r)| c < 4 && r < 4));
        assert!(cells.contains(&(0, 3)));
        assert!(cells.contains(&(3, 0)));
        assert!(!cells.contains(&(3, 3)));
    }

    #[test]
    fn test_center_far_outside_paints_nothing() {
        assert!(disk_cells(-10, -10, 2, 5, 5).is_empty());
        assert!(disk_cells(50, 2, 2, 5, 5).is_empty());
    }

    #[test]
    fn test_paint_at_writes_only_target_slice() {
        let mut vol = blank(10, 10, 4);
        let written = paint_at(&mut vol, 2, 5, 5, 2, LabelColor::Green);
        assert_eq!(written, 13);

        for ((row, col, slice), &v) in vol.mask().indexed_iter() {
            let dc = col as i64 - 5;
            let dr = row as i64 - 5;
            let expected = if slice == 2 && dc * dc + dr * dr <= 4 { 2 } else { 0 };
            assert_eq!(v, expected, "cell [{}, {}, {}]", row, col, slice);
        }
    }

    #[test]
    fn test_paint_uses_row_col_indexing_on_non_square() {
        let mut vol = blank(3, 8, 1);
        paint_at(&mut vol, 0, 7, 0, 1, LabelColor::Yellow);
        assert_eq!(vol.mask()[[0, 7, 0]], 3);
        assert_eq!(vol.mask()[[0, 6, 0]], 3);
        assert_eq!(vol.mask()[[1, 7, 0]], 3);
        assert_eq!(vol.mask()[[1, 6, 0]], 0);
    }

    #[test]
    fn test_paint_overwrites_existing_label() {
        let mut vol = blank(5, 5, 1);
        paint_at(&mut vol, 0, 2, 2, 1, LabelColor::Red);
        paint_at(&mut vol, 0, 2, 2, 1, LabelColor::Yellow);
        assert_eq!(vol.mask()[[2, 2, 0]], 3);
    }

    #[test]
    fn test_paint_out_of_range_slice_is_noop() {
        let mut vol = blank(5, 5, 2);
        assert_eq!(paint_at(&mut vol, 2, 2, 2, 1, LabelColor::Red), 0);
        assert!(vol.mask().iter().all(|&v| v == 0));
    }

    #[test]
    fn test_max_radius_covers_whole_plane() {
        let cells = disk_cells(1, 1, u32::MAX, 4, 4);
        assert_eq!(cells.len(), 16);

        let mut vol = blank(4, 4, 1);
        assert_eq!(paint_at(&mut vol, 0, 1, 1, u32::MAX, LabelColor::Red), 16);
        assert!(vol.mask().iter().all(|&v| v == 1));
    }

    #[test]
    fn test_extreme_centers_do_not_overflow() {
        assert!(disk_cells(i64::MAX, i64::MIN, u32::MAX, 4, 4).is_empty());
        assert_eq!(disk_cells(i64::MIN, 0, 0, 4, 4).len(), 0);
    }

    #[test]
    fn test_pointer_to_pixel() {
        assert_eq!(PointerPos::at(3.7, 1.2).to_pixel(4, 5), Some((3, 1)));
        assert_eq!(PointerPos::at(0.0, 0.0).to_pixel(4, 5), Some((0, 0)));
        assert_eq!(PointerPos::at(5.0, 1.0).to_pixel(4, 5), None);
        assert_eq!(PointerPos::at(1.0, 4.0).to_pixel(4, 5), None);
        assert_eq!(PointerPos::at(-0.1, 1.0).to_pixel(4, 5), None);
        assert_eq!(PointerPos::at(f64::NAN, 1.0).to_pixel(4, 5), None);
        assert_eq!(PointerPos::Outside.to_pixel(4, 5), None);
    }
}
