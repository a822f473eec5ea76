//! Trait-based volume loading.
//!
//! A path is routed to a loader by file extension. Annotation archives
//! (`.npz`, `.npy`) go to the archive loader; anything else is handed to the
//! NIfTI reader, which reports an error if it cannot make sense of the file.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use volmask::data::LoaderRegistry;
//!
//! let registry = LoaderRegistry::new();
//! let loaded = registry.load(Path::new("brain.nii.gz"))?;
//! ```

use std::path::Path;

use crate::error::LoadError;
use crate::model::{LabelColor, Volume};

/// A volume produced by a loader.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedVolume {
    /// The loaded image/mask pair
    pub volume: Volume,
    /// Paint color stored alongside the volume, if the format carries one
    pub color: Option<LabelColor>,
}

/// Trait for volume file loaders.
pub trait VolumeLoader {
    /// Unique identifier for this loader (e.g., "nifti", "artifact").
    fn id(&self) -> &'static str;

    /// Human-readable name for messages.
    fn display_name(&self) -> &'static str;

    /// File extensions this loader handles (lowercase, without leading dot).
    ///
    /// Multi-part extensions such as `"nii.gz"` are allowed.
    fn extensions(&self) -> &'static [&'static str];

    /// Load a volume from `path`.
    fn load(&self, path: &Path) -> Result<LoadedVolume, LoadError>;

    /// Priority when several loaders claim the same path (higher = checked first).
    fn priority(&self) -> i32 {
        0
    }

    /// Check if `path` ends with one of this loader's extensions.
    fn handles(&self, path: &Path) -> bool {
        let lower = path.to_string_lossy().to_lowercase();
        self.extensions()
            .iter()
            .any(|ext| lower.ends_with(&format!(".{}", ext)))
    }
}

/// Registry of available volume loaders.
pub struct LoaderRegistry {
    loaders: Vec<Box<dyn VolumeLoader>>,
    fallback: &'static str,
}

impl LoaderRegistry {
    /// Create a registry with the built-in loaders.
    pub fn new() -> Self {
        let mut registry = Self {
            loaders: Vec::new(),
            fallback: super::loaders::NiftiLoader::ID,
        };

        registry.register(Box::new(super::loaders::NiftiLoader));
        registry.register(Box::new(super::loaders::ArtifactLoader));

        registry
    }

    /// Register a new loader.
    pub fn register(&mut self, loader: Box<dyn VolumeLoader>) {
        self.loaders.push(loader);
        self.loaders.sort_by(|a, b| b.priority().cmp(&a.priority()));
    }

    /// Get all supported file extensions (for file filtering).
    pub fn supported_extensions(&self) -> Vec<&'static str> {
        let mut extensions: Vec<&'static str> = self
            .loaders
            .iter()
            .flat_map(|l| l.extensions().iter().copied())
            .collect();
        extensions.sort();
        extensions.dedup();
        extensions
    }

    /// Look up a loader by id.
    pub fn get(&self, id: &str) -> Option<&dyn VolumeLoader> {
        self.loaders
            .iter()
            .find(|l| l.id() == id)
            .map(|l| l.as_ref())
    }

    /// Pick the loader for `path`: first by extension, then the raw-scan fallback.
    pub fn loader_for(&self, path: &Path) -> Option<&dyn VolumeLoader> {
        self.loaders
            .iter()
            .find(|l| l.handles(path))
            .map(|l| l.as_ref())
            .or_else(|| self.get(self.fallback))
    }

    /// Load `path` with whichever loader it routes to.
    pub fn load(&self, path: &Path) -> Result<LoadedVolume, LoadError> {
        let loader = self
            .loader_for(path)
            .ok_or_else(|| LoadError::invalid_volume(path, "no loader registered"))?;
        log::debug!("Loading {:?} with {} loader", path, loader.id());
        loader.load(path)
    }

    /// Check if a path has a supported extension.
    pub fn is_supported_file(&self, path: &Path) -> bool {
        self.loaders.iter().any(|l| l.handles(path))
    }

    /// Get all registered loaders.
    pub fn loaders(&self) -> &[Box<dyn VolumeLoader>] {
        &self.loaders
    }
}

impl Default for LoaderRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_has_loaders() {
        let registry = LoaderRegistry::new();
        assert_eq!(registry.loaders().len(), 2);
    }

    #[test]
    fn test_supported_extensions() {
        let registry = LoaderRegistry::new();
        let extensions = registry.supported_extensions();

        assert!(extensions.contains(&"nii"));
        assert!(extensions.contains(&"nii.gz"));
        assert!(extensions.contains(&"npy"));
        assert!(extensions.contains(&"npz"));
    }

    #[test]
    fn test_routing_by_extension() {
        let registry = LoaderRegistry::new();
        let id = |p: &str| registry.loader_for(Path::new(p)).map(|l| l.id());

        assert_eq!(id("scan.nii"), Some("nifti"));
        assert_eq!(id("scan.NII.GZ"), Some("nifti"));
        assert_eq!(id("saved.npy"), Some("artifact"));
        assert_eq!(id("saved.npz"), Some("artifact"));
        // unknown extensions fall back to the raw-scan reader
        assert_eq!(id("scan.img"), Some("nifti"));
    }

    #[test]
    fn test_is_supported_file() {
        let registry = LoaderRegistry::new();

        assert!(registry.is_supported_file(Path::new("brain.nii.gz")));
        assert!(registry.is_supported_file(Path::new("case.NPZ")));
        assert!(!registry.is_supported_file(Path::new("notes.txt")));
    }

    #[test]
    fn test_missing_file_is_load_error() {
        let registry = LoaderRegistry::new();
        let result = registry.load(Path::new("/definitely/not/here.nii"));
        assert!(result.is_err());
    }
}
