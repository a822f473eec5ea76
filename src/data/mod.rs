//! Volume file loading.
//!
//! This module provides:
//! - `VolumeLoader`: trait implemented by each supported file format
//! - `LoaderRegistry`: routes a path to the right loader by extension
//! - Built-in loaders for NIfTI scans and saved annotation archives
//!
//! ## Adding New Formats
//!
//! 1. Create a new loader in `loaders/` implementing `VolumeLoader`
//! 2. Register it in `LoaderRegistry::new()`

mod loader;
pub mod loaders;

pub use loader::{LoadedVolume, LoaderRegistry, VolumeLoader};
