//! Loader for saved annotation archives.

use std::path::Path;

use crate::data::loader::{LoadedVolume, VolumeLoader};
use crate::error::LoadError;
use crate::format::artifact::{ARTIFACT_EXTENSIONS, read_artifact};
use crate::model::Volume;

/// Loader for archives written by [`write_artifact`](crate::format::artifact::write_artifact).
///
/// Restores the image, the painted mask and the paint color that was active
/// when the archive was saved.
pub struct ArtifactLoader;

impl ArtifactLoader {
    pub const ID: &'static str = "artifact";
}

impl VolumeLoader for ArtifactLoader {
    fn id(&self) -> &'static str {
        Self::ID
    }

    fn display_name(&self) -> &'static str {
        "Annotation archive (.npz, .npy)"
    }

    fn extensions(&self) -> &'static [&'static str] {
        ARTIFACT_EXTENSIONS
    }

    fn load(&self, path: &Path) -> Result<LoadedVolume, LoadError> {
        let artifact = read_artifact(path)?;
        let volume = Volume::with_mask(Volume::name_from_path(path), artifact.image, artifact.mask)
            .map_err(|e| LoadError::invalid_volume(path, e.to_string()))?;

        log::info!(
            "ArtifactLoader: loaded {:?} with shape {:?}, color {}",
            path,
            volume.image().shape(),
            artifact.color
        );

        Ok(LoadedVolume {
            volume,
            color: Some(artifact.color),
        })
    }

    fn priority(&self) -> i32 {
        10
    }
}
