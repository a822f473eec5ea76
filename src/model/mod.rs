//! Data models for volmask.

mod label;
mod volume;

pub use label::{LabelColor, MAX_LABEL_CODE, UNLABELED, UnknownColor};
pub use volume::{Volume, VolumeError};
