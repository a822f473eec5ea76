//! volmask - label masks for volumetric scans
//!
//! Loads 3-D scans (NIfTI) or previously saved annotation archives, lets the
//! user paint integer labels slice by slice with a circular brush, and saves
//! image, mask and color back into one archive.
//!
//! The [`state::VolumeStore`] owns all editor state. Presentation layers feed
//! it [`command::Intent`]s through [`handlers::handle_intent`] and redraw when
//! [`state::VolumeStore::take_redraw`] says so.

pub mod brush;
pub mod command;
pub mod config;
pub mod constants;
pub mod data;
pub mod error;
pub mod format;
pub mod handlers;
pub mod model;
pub mod render;
pub mod state;

pub use command::{Intent, parse_intent};
pub use config::AppConfig;
pub use error::{LoadError, SaveError};
pub use model::{LabelColor, Volume};
pub use state::VolumeStore;
