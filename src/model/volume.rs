//! A loaded scan and its label mask.

use std::path::Path;

use ndarray::{Array3, ArrayView2, ArrayViewMut2, Axis};

use super::label::{MAX_LABEL_CODE, UNLABELED};

/// One loaded scan with its label mask.
///
/// Image and mask always share the shape `(rows, cols, depth)`, and the mask
/// only holds values in `0..=3`.
#[derive(Debug, Clone, PartialEq)]
pub struct Volume {
    name: String,
    image: Array3<f64>,
    mask: Array3<u8>,
}

/// Why an image/mask pair was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VolumeError {
    /// Image and mask shapes differ
    #[error("image shape {image:?} does not match mask shape {mask:?}")]
    ShapeMismatch {
        /// Image shape
        image: Vec<usize>,
        /// Mask shape
        mask: Vec<usize>,
    },
    /// Mask holds a value outside the label table
    #[error("mask contains label value {0} (expected 0..=3)")]
    InvalidLabel(u8),
    /// One of the axes has length zero
    #[error("volume has an empty axis: {0:?}")]
    Empty(Vec<usize>),
}

impl Volume {
    /// Wrap a scan with a fresh, all-zero mask.
    pub fn new(name: impl Into<String>, image: Array3<f64>) -> Self {
        let mask = Array3::from_elem(image.raw_dim(), UNLABELED);
        Self {
            name: name.into(),
            image,
            mask,
        }
    }

    /// Pair a scan with an existing mask, checking shape and label values.
    pub fn with_mask(
        name: impl Into<String>,
        image: Array3<f64>,
        mask: Array3<u8>,
    ) -> Result<Self, VolumeError> {
        if image.shape() != mask.shape() {
            return Err(VolumeError::ShapeMismatch {
                image: image.shape().to_vec(),
                mask: mask.shape().to_vec(),
            });
        }
        if image.is_empty() {
            return Err(VolumeError::Empty(image.shape().to_vec()));
        }
        if let Some(&bad) = mask.iter().find(|&&v| v > MAX_LABEL_CODE) {
            return Err(VolumeError::InvalidLabel(bad));
        }
        Ok(Self {
            name: name.into(),
            image,
            mask,
        })
    }

    /// Display name taken from a file path's basename.
    pub fn name_from_path(path: &Path) -> String {
        path.file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn image(&self) -> &Array3<f64> {
        &self.image
    }

    pub fn mask(&self) -> &Array3<u8> {
        &self.mask
    }

    /// Number of rows (height).
    pub fn rows(&self) -> usize {
        self.image.shape()[0]
    }

    /// Number of columns (width).
    pub fn cols(&self) -> usize {
        self.image.shape()[1]
    }

    /// Number of slices.
    pub fn depth(&self) -> usize {
        self.image.shape()[2]
    }

    /// Slice shown when this volume becomes active.
    pub fn middle_slice(&self) -> usize {
        self.depth() / 2
    }

    /// Image plane at `slice`, indexed `[row, col]`.
    pub fn image_slice(&self, slice: usize) -> ArrayView2<'_, f64> {
        self.image.index_axis(Axis(2), slice)
    }

    /// Mask plane at `slice`, indexed `[row, col]`.
    pub fn mask_slice(&self, slice: usize) -> ArrayView2<'_, u8> {
        self.mask.index_axis(Axis(2), slice)
    }

    /// Mutable mask plane at `slice`, indexed `[row, col]`.
    pub fn mask_slice_mut(&mut self, slice: usize) -> ArrayViewMut2<'_, u8> {
        self.mask.index_axis_mut(Axis(2), slice)
    }

    /// Set every mask cell of `slice` to unlabeled. Out-of-range slices are ignored.
    pub fn clear_slice(&mut self, slice: usize) {
        if slice < self.depth() {
            self.mask_slice_mut(slice).fill(UNLABELED);
        }
    }
}
