//! Annotation archive: one volume's image, mask and paint color in a single file.
//!
//! The archive is a zip container with three entries:
//!
//! - `image.npy`: 3-D `f64` intensities
//! - `mask.npy`: 3-D `u8` labels, same shape as the image
//! - `meta.json`: `{"version": 1, "color": "red"}`
//!
//! `meta.json` and its `color` field are optional on read and default to red.
//! The layout matches NumPy's `.npz` convention, so `numpy.load` can open the
//! arrays directly.

use std::fs::File;
use std::path::Path;

use ndarray::{Array3, ArrayD, Ix3};
use ndarray_npy::{ReadNpyExt, ReadableElement, WriteNpyExt};
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use zip::result::ZipError;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use crate::error::{LoadError, SaveError};
use crate::model::LabelColor;

/// Archive entry holding the image array.
pub const IMAGE_ENTRY: &str = "image.npy";
/// Archive entry holding the mask array.
pub const MASK_ENTRY: &str = "mask.npy";
/// Archive entry holding metadata.
pub const META_ENTRY: &str = "meta.json";

/// Current archive format version.
pub const ARTIFACT_VERSION: u32 = 1;

/// File extensions routed to the archive reader (lowercase, without dots).
pub const ARTIFACT_EXTENSIONS: &[&str] = &["npz", "npy"];

/// Extension appended by the binary when a save path has none.
pub const DEFAULT_ARTIFACT_EXTENSION: &str = "npz";

#[derive(Debug, Serialize, Deserialize)]
struct ArtifactMeta {
    #[serde(default = "default_version")]
    version: u32,
    #[serde(default)]
    color: LabelColor,
}

fn default_version() -> u32 {
    ARTIFACT_VERSION
}

/// Decoded contents of an annotation archive.
#[derive(Debug, Clone, PartialEq)]
pub struct Artifact {
    pub image: Array3<f64>,
    pub mask: Array3<u8>,
    pub color: LabelColor,
}

/// Bytes above which a zip entry needs ZIP64 headers.
const ZIP64_THRESHOLD: u64 = u32::MAX as u64;

/// Entry options for an array of `bytes` bytes.
fn entry_options(bytes: u64) -> SimpleFileOptions {
    SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .large_file(bytes >= ZIP64_THRESHOLD)
}

fn array_bytes<T>(len: usize) -> u64 {
    (len as u64).saturating_mul(std::mem::size_of::<T>() as u64)
}

/// Write an annotation archive to `path`, replacing any existing file.
///
/// The archive is assembled in a temporary file next to `path` and renamed
/// over it only once complete, so a failed save leaves the previous file
/// intact.
pub fn write_artifact(
    path: &Path,
    image: &Array3<f64>,
    mask: &Array3<u8>,
    color: LabelColor,
) -> Result<(), SaveError> {
    let io_err = |source| SaveError::Io {
        path: path.to_path_buf(),
        source,
    };
    let archive_err = |source| SaveError::Archive {
        path: path.to_path_buf(),
        source,
    };
    let npy_err = |entry: &str, source| SaveError::Npy {
        path: path.to_path_buf(),
        entry: entry.to_string(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let tmp = NamedTempFile::new_in(dir).map_err(io_err)?;
    let mut zip = ZipWriter::new(tmp);

    zip.start_file(IMAGE_ENTRY, entry_options(array_bytes::<f64>(image.len())))
        .map_err(archive_err)?;
    image
        .write_npy(&mut zip)
        .map_err(|e| npy_err(IMAGE_ENTRY, e))?;

    zip.start_file(MASK_ENTRY, entry_options(array_bytes::<u8>(mask.len())))
        .map_err(archive_err)?;
    mask.write_npy(&mut zip)
        .map_err(|e| npy_err(MASK_ENTRY, e))?;

    zip.start_file(META_ENTRY, entry_options(0))
        .map_err(archive_err)?;
    let meta = ArtifactMeta {
        version: ARTIFACT_VERSION,
        color,
    };
    serde_json::to_writer_pretty(&mut zip, &meta).map_err(|source| SaveError::Metadata {
        path: path.to_path_buf(),
        source,
    })?;

    let tmp = zip.finish().map_err(archive_err)?;
    tmp.persist(path).map_err(|e| io_err(e.error))?;

    log::debug!(
        "Wrote archive {:?} (shape {:?}, color {})",
        path,
        image.shape(),
        color
    );
    Ok(())
}

/// Read an annotation archive from `path`.
///
/// Only the container is decoded here; image/mask consistency is checked when
/// the pair becomes a [`Volume`](crate::model::Volume).
pub fn read_artifact(path: &Path) -> Result<Artifact, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut archive = ZipArchive::new(file).map_err(|source| LoadError::Archive {
        path: path.to_path_buf(),
        source,
    })?;

    let image = into_3d(read_array::<f64>(&mut archive, path, IMAGE_ENTRY, "image")?, path)?;
    let mask = into_3d(read_array::<u8>(&mut archive, path, MASK_ENTRY, "mask")?, path)?;
    let meta = read_meta(&mut archive, path)?;

    if meta.version > ARTIFACT_VERSION {
        log::warn!(
            "Archive {:?} has version {} (newer than {}), reading anyway",
            path,
            meta.version,
            ARTIFACT_VERSION
        );
    }

    Ok(Artifact {
        image,
        mask,
        color: meta.color,
    })
}

fn read_array<T: ReadableElement>(
    archive: &mut ZipArchive<File>,
    path: &Path,
    entry: &str,
    field: &str,
) -> Result<ArrayD<T>, LoadError> {
    let file = match archive.by_name(entry) {
        Ok(file) => file,
        Err(ZipError::FileNotFound) => return Err(LoadError::missing_field(path, field)),
        Err(source) => {
            return Err(LoadError::Archive {
                path: path.to_path_buf(),
                source,
            });
        }
    };
    ArrayD::<T>::read_npy(file).map_err(|source| LoadError::Npy {
        path: path.to_path_buf(),
        entry: entry.to_string(),
        source,
    })
}

fn read_meta(archive: &mut ZipArchive<File>, path: &Path) -> Result<ArtifactMeta, LoadError> {
    match archive.by_name(META_ENTRY) {
        Ok(file) => serde_json::from_reader(file).map_err(|source| LoadError::Metadata {
            path: path.to_path_buf(),
            source,
        }),
        Err(ZipError::FileNotFound) => {
            log::debug!("Archive {:?} has no metadata, using defaults", path);
            Ok(ArtifactMeta {
                version: ARTIFACT_VERSION,
                color: LabelColor::default(),
            })
        }
        Err(source) => Err(LoadError::Archive {
            path: path.to_path_buf(),
            source,
        }),
    }
}

fn into_3d<T>(array: ArrayD<T>, path: &Path) -> Result<Array3<T>, LoadError> {
    let found = array.ndim();
    array
        .into_dimensionality::<Ix3>()
        .map_err(|_| LoadError::Dimensionality {
            path: path.to_path_buf(),
            found,
        })
}
