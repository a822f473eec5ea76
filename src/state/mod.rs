//! Editor state: the volume collection, navigation and view settings.

mod store;
mod view;

#[cfg(test)]
mod tests;

pub use store::{LoadReport, VolumeStore};
pub use view::{Direction, ViewState};
