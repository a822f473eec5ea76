//! Scenario tests for the volume store.
//!
//! These tests drive the store the way the presentation layer does and check
//! the collection, view state and masks afterwards.

mod painting_tests;
mod persistence_tests;

use std::path::Path;

use ndarray::Array3;
use nifti::writer::WriterOptions;

/// Write a NIfTI scan of the given shape filled with a ramp.
fn write_scan(path: &Path, shape: (usize, usize, usize)) -> Array3<f64> {
    let image = Array3::from_shape_fn(shape, |(r, c, s)| (r * 7 + c * 3 + s) as f64);
    WriterOptions::new(path).write_nifti(&image).unwrap();
    image
}
