//! Built-in volume loaders.
//!
//! This module contains implementations of the `VolumeLoader` trait
//! for the supported file formats.

mod artifact_loader;
mod nifti_loader;

pub use artifact_loader::ArtifactLoader;
pub use nifti_loader::NiftiLoader;
