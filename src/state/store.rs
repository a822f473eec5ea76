//! The volume collection and everything that navigates, paints or persists it.

use std::path::Path;

use crate::brush::{self, PointerPos, StrokeState};
use crate::constants::MIN_BRUSH_SIZE;
use crate::data::{LoadedVolume, LoaderRegistry, VolumeLoader};
use crate::data::loaders::ArtifactLoader;
use crate::error::{LoadError, SaveError};
use crate::format::artifact::write_artifact;
use crate::model::{LabelColor, Volume};

use super::view::{Direction, ViewState};

/// Outcome of loading several paths in one request.
#[derive(Debug, Default)]
pub struct LoadReport {
    /// Number of volumes appended
    pub loaded: usize,
    /// One entry per path that failed
    pub errors: Vec<LoadError>,
}

/// Owns every loaded volume, the active index and the view state.
///
/// Operations that change what should be on screen raise a redraw request,
/// which the presentation layer consumes with [`VolumeStore::take_redraw`].
/// No-op calls leave the request untouched. A failed load or save leaves the
/// collection exactly as it was.
pub struct VolumeStore {
    volumes: Vec<Volume>,
    active: Option<usize>,
    view: ViewState,
    stroke: StrokeState,
    registry: LoaderRegistry,
    redraw_requested: bool,
}

impl VolumeStore {
    /// Create an empty store with default view settings.
    pub fn new() -> Self {
        Self::with_view(ViewState::default())
    }

    /// Create an empty store with the given initial view settings.
    pub fn with_view(view: ViewState) -> Self {
        Self {
            volumes: Vec::new(),
            active: None,
            view,
            stroke: StrokeState::Idle,
            registry: LoaderRegistry::new(),
            redraw_requested: false,
        }
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn volumes(&self) -> &[Volume] {
        &self.volumes
    }

    pub fn len(&self) -> usize {
        self.volumes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.volumes.is_empty()
    }

    /// Index of the active volume, `None` when nothing is loaded.
    pub fn active_index(&self) -> Option<usize> {
        self.active
    }

    pub fn active_volume(&self) -> Option<&Volume> {
        self.active.and_then(|i| self.volumes.get(i))
    }

    fn active_volume_mut(&mut self) -> Option<&mut Volume> {
        self.active.and_then(|i| self.volumes.get_mut(i))
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn stroke(&self) -> StrokeState {
        self.stroke
    }

    pub fn registry(&self) -> &LoaderRegistry {
        &self.registry
    }

    fn request_redraw(&mut self) {
        self.redraw_requested = true;
    }

    /// Return whether a redraw was requested since the last call, and clear it.
    pub fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.redraw_requested)
    }

    // ------------------------------------------------------------------
    // Loading and saving
    // ------------------------------------------------------------------

    /// Load one file, routed by extension: annotation archives restore their
    /// mask and color, anything else is read as a raw scan with an empty mask.
    pub fn load_image(&mut self, path: &Path) -> Result<(), LoadError> {
        let loaded = self.registry.load(path)?;
        self.push_loaded(loaded);
        Ok(())
    }

    /// Load several files in order. Each failure is recorded and the rest
    /// still load; the last successful volume ends up active.
    pub fn load_images<P: AsRef<Path>>(&mut self, paths: &[P]) -> LoadReport {
        let mut report = LoadReport::default();
        for path in paths {
            match self.load_image(path.as_ref()) {
                Ok(()) => report.loaded += 1,
                Err(e) => {
                    log::error!("Failed to load {:?}: {}", path.as_ref(), e);
                    report.errors.push(e);
                }
            }
        }
        report
    }

    /// Load a saved annotation archive regardless of its extension.
    pub fn load_saved_artifact(&mut self, path: &Path) -> Result<(), LoadError> {
        let loaded = ArtifactLoader.load(path)?;
        self.push_loaded(loaded);
        Ok(())
    }

    fn push_loaded(&mut self, loaded: LoadedVolume) {
        let LoadedVolume { volume, color } = loaded;
        if let Some(color) = color {
            self.view.color = color;
        }
        self.add_volume(volume);
    }

    /// Append an in-memory volume and make it active.
    pub fn add_volume(&mut self, volume: Volume) {
        log::info!(
            "Added '{}' ({}x{}x{})",
            volume.name(),
            volume.rows(),
            volume.cols(),
            volume.depth()
        );
        self.view.slice = volume.middle_slice();
        self.volumes.push(volume);
        self.active = Some(self.volumes.len() - 1);
        self.request_redraw();
    }

    /// Save the active volume's image, mask and current paint color.
    ///
    /// Returns `Ok(false)` without touching the filesystem when no volume is
    /// active.
    pub fn save_active_artifact(&self, path: &Path) -> Result<bool, SaveError> {
        let Some(volume) = self.active_volume() else {
            log::debug!("Save requested with no active volume");
            return Ok(false);
        };
        write_artifact(path, volume.image(), volume.mask(), self.view.color)?;
        log::info!("Saved '{}' to {:?}", volume.name(), path);
        Ok(true)
    }

    // ------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------

    /// Show slice `n` of the active volume. Ignored when out of range.
    pub fn set_active_slice(&mut self, n: usize) {
        let Some(depth) = self.active_volume().map(Volume::depth) else {
            return;
        };
        if n >= depth {
            log::debug!("Slice {} out of range (depth {})", n, depth);
            return;
        }
        self.view.slice = n;
        log::debug!("Slice -> {}", n);
        self.request_redraw();
    }

    /// Move one slice up (`Next`) or down (`Previous`), bounds-checked.
    pub fn step_slice(&mut self, direction: Direction) {
        let target = match direction {
            Direction::Previous => self.view.slice.checked_sub(1),
            Direction::Next => self.view.slice.checked_add(1),
        };
        if let Some(n) = target {
            self.set_active_slice(n);
        }
    }

    /// Zero the active volume's mask on the current slice.
    pub fn clear_active_slice(&mut self) {
        let slice = self.view.slice;
        let Some(volume) = self.active_volume_mut() else {
            return;
        };
        volume.clear_slice(slice);
        log::debug!("Cleared slice {} of '{}'", slice, volume.name());
        self.request_redraw();
    }

    /// Activate the previous or next volume. Ignored at either end.
    pub fn switch_volume(&mut self, direction: Direction) {
        let Some(index) = self.active else {
            return;
        };
        let target = match direction {
            Direction::Previous => index.checked_sub(1),
            Direction::Next => Some(index + 1).filter(|&i| i < self.volumes.len()),
        };
        let Some(target) = target else {
            log::debug!("Already at {:?} end of collection", direction);
            return;
        };
        self.active = Some(target);
        self.view.slice = self.volumes[target].middle_slice();
        log::debug!(
            "Volume -> {} '{}' (slice {})",
            target,
            self.volumes[target].name(),
            self.view.slice
        );
        self.request_redraw();
    }

    /// Choose the label written by future strokes.
    pub fn set_color(&mut self, color: LabelColor) {
        self.view.color = color;
        log::debug!("Color -> {}", color);
        self.request_redraw();
    }

    /// Grow or shrink the brush by `delta`, never below 1.
    pub fn set_brush_size(&mut self, delta: i32) {
        let next = (i64::from(self.view.brush_size) + i64::from(delta))
            .clamp(i64::from(MIN_BRUSH_SIZE), i64::from(u32::MAX)) as u32;
        if next != self.view.brush_size {
            self.view.brush_size = next;
            log::debug!("Brush size -> {}", next);
            self.request_redraw();
        }
    }

    /// Enable or disable painting with the pointer.
    pub fn toggle_drawing(&mut self) {
        self.view.drawing_enabled = !self.view.drawing_enabled;
        if !self.view.drawing_enabled {
            self.stroke = StrokeState::Idle;
        }
        log::debug!("Drawing enabled -> {}", self.view.drawing_enabled);
        self.request_redraw();
    }

    // ------------------------------------------------------------------
    // Painting
    // ------------------------------------------------------------------

    /// Paint one dab at a canvas position on the active slice.
    ///
    /// Does nothing when drawing is disabled, nothing is loaded, or the
    /// position is outside the image. Returns the number of cells written.
    pub fn paint_at_pointer(&mut self, pos: PointerPos) -> usize {
        if !self.view.drawing_enabled {
            return 0;
        }
        let ViewState {
            slice,
            brush_size,
            color,
            ..
        } = self.view.clone();
        let Some(volume) = self.active_volume_mut() else {
            return 0;
        };
        let Some((col, row)) = pos.to_pixel(volume.rows(), volume.cols()) else {
            return 0;
        };
        let written = brush::paint_at(volume, slice, col as i64, row as i64, brush_size, color);
        if written > 0 {
            self.request_redraw();
        }
        written
    }

    /// Button pressed. Starts a stroke when drawing is enabled and the
    /// pointer is over the image.
    pub fn pointer_down(&mut self, pos: PointerPos) {
        if self.paint_at_pointer(pos) > 0 {
            self.stroke = StrokeState::Painting;
        }
    }

    /// Pointer moved. Paints only while a stroke is in progress.
    pub fn pointer_move(&mut self, pos: PointerPos) {
        if self.stroke.is_painting() {
            self.paint_at_pointer(pos);
        }
    }

    /// Button released. Ends any stroke.
    pub fn pointer_up(&mut self) {
        self.stroke = StrokeState::Idle;
    }
}

impl Default for VolumeStore {
    fn default() -> Self {
        Self::new()
    }
}
