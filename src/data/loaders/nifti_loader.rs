//! Loader for NIfTI-1 scans (`.nii`, `.nii.gz`).

use std::path::Path;

use ndarray::{ArrayD, Axis, Ix3};
use nifti::{IntoNdArray, NiftiObject, ReaderOptions};

use crate::data::loader::{LoadedVolume, VolumeLoader};
use crate::error::LoadError;
use crate::model::Volume;

/// Loader for NIfTI-1 scans.
///
/// Intensities are read as `f64` with the header's scaling applied. The volume
/// must be 3-D; a 4-D file whose trailing axes have length 1 is accepted and
/// squeezed to 3-D.
pub struct NiftiLoader;

impl NiftiLoader {
    /// Loader id, also used as the registry fallback.
    pub const ID: &'static str = "nifti";

    /// Drop trailing length-1 axes beyond the third.
    fn squeeze_trailing(mut data: ArrayD<f64>) -> ArrayD<f64> {
        while data.ndim() > 3 && data.shape()[data.ndim() - 1] == 1 {
            let last = data.ndim() - 1;
            data = data.index_axis_move(Axis(last), 0);
        }
        data
    }
}

impl VolumeLoader for NiftiLoader {
    fn id(&self) -> &'static str {
        Self::ID
    }

    fn display_name(&self) -> &'static str {
        "NIfTI-1 (.nii, .nii.gz)"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["nii", "nii.gz"]
    }

    fn load(&self, path: &Path) -> Result<LoadedVolume, LoadError> {
        let nifti_err = |source| LoadError::Nifti {
            path: path.to_path_buf(),
            source,
        };

        let obj = ReaderOptions::new().read_file(path).map_err(nifti_err)?;
        log::debug!("NiftiLoader: header dims = {:?}", obj.header().dim);

        let data = obj
            .into_volume()
            .into_ndarray::<f64>()
            .map_err(nifti_err)?;
        let data = Self::squeeze_trailing(data);

        let found = data.ndim();
        if found != 3 {
            return Err(LoadError::Dimensionality {
                path: path.to_path_buf(),
                found,
            });
        }
        let image = data
            .into_dimensionality::<Ix3>()
            .map_err(|_| LoadError::Dimensionality {
                path: path.to_path_buf(),
                found,
            })?
            .as_standard_layout()
            .into_owned();
        if image.is_empty() {
            return Err(LoadError::invalid_volume(
                path,
                format!("volume has an empty axis: {:?}", image.shape()),
            ));
        }

        log::info!(
            "NiftiLoader: loaded {:?} with shape {:?}",
            path,
            image.shape()
        );

        Ok(LoadedVolume {
            volume: Volume::new(Volume::name_from_path(path), image),
            color: None,
        })
    }
}
