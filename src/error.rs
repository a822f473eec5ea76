//! Error types for volume loading and saving.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading a scan or a saved annotation archive.
///
/// A failed load never changes the volume collection.
#[derive(Error, Debug)]
pub enum LoadError {
    /// I/O error while opening or reading the file
    #[error("IO error reading {path:?}: {source}")]
    Io {
        /// File being read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The NIfTI reader rejected the file
    #[error("Unreadable NIfTI file {path:?}: {source}")]
    Nifti {
        /// File being read
        path: PathBuf,
        /// Underlying NIfTI error
        #[source]
        source: nifti::error::NiftiError,
    },

    /// The archive container could not be read
    #[error("Unreadable annotation archive {path:?}: {source}")]
    Archive {
        /// File being read
        path: PathBuf,
        /// Underlying zip error
        #[source]
        source: zip::result::ZipError,
    },

    /// An array entry inside the archive could not be decoded
    #[error("Invalid array '{entry}' in {path:?}: {source}")]
    Npy {
        /// File being read
        path: PathBuf,
        /// Archive entry name
        entry: String,
        /// Underlying npy error
        #[source]
        source: ndarray_npy::ReadNpyError,
    },

    /// Archive metadata is not valid JSON
    #[error("Invalid metadata in {path:?}: {source}")]
    Metadata {
        /// File being read
        path: PathBuf,
        /// Underlying JSON error
        #[source]
        source: serde_json::Error,
    },

    /// Required archive entry is missing
    #[error("Missing required field '{field}' in {path:?}")]
    MissingField {
        /// File being read
        path: PathBuf,
        /// Name of the missing field
        field: String,
    },

    /// Volume is not three-dimensional
    #[error("Expected a 3-D volume in {path:?}, found {found} dimensions")]
    Dimensionality {
        /// File being read
        path: PathBuf,
        /// Number of dimensions found
        found: usize,
    },

    /// Image and mask disagree, or the mask holds values outside the label table
    #[error("Invalid volume in {path:?}: {message}")]
    InvalidVolume {
        /// File being read
        path: PathBuf,
        /// Description of the inconsistency
        message: String,
    },
}

impl LoadError {
    /// Create a missing field error.
    pub fn missing_field(path: impl Into<PathBuf>, field: impl Into<String>) -> Self {
        Self::MissingField {
            path: path.into(),
            field: field.into(),
        }
    }

    /// Create an invalid volume error.
    pub fn invalid_volume(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::InvalidVolume {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Errors that can occur while writing an annotation archive.
#[derive(Error, Debug)]
pub enum SaveError {
    /// Destination could not be created or written
    #[error("Cannot write {path:?}: {source}")]
    Io {
        /// Destination path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The archive writer failed
    #[error("Archive error writing {path:?}: {source}")]
    Archive {
        /// Destination path
        path: PathBuf,
        /// Underlying zip error
        #[source]
        source: zip::result::ZipError,
    },

    /// An array could not be encoded
    #[error("Cannot encode '{entry}' for {path:?}: {source}")]
    Npy {
        /// Destination path
        path: PathBuf,
        /// Archive entry name
        entry: String,
        /// Underlying npy error
        #[source]
        source: ndarray_npy::WriteNpyError,
    },

    /// Metadata could not be serialized
    #[error("Cannot encode metadata for {path:?}: {source}")]
    Metadata {
        /// Destination path
        path: PathBuf,
        /// Underlying JSON error
        #[source]
        source: serde_json::Error,
    },
}
