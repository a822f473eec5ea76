//! Intent handlers.
//!
//! Each handler applies one category of [`Intent`] to the store, keeping the
//! session loop free of store details. Failures are logged and reported back
//! as status text; they never leave the store half-updated.

use std::path::{Path, PathBuf};

use crate::command::{HELP_TEXT, Intent};
use crate::data::VolumeLoader;
use crate::format::artifact::DEFAULT_ARTIFACT_EXTENSION;
use crate::render;
use crate::state::VolumeStore;

/// What the session loop should do after an intent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    /// Nothing to report
    Done,
    /// Show this text to the user
    Status(String),
    /// End the session
    Quit,
}

/// Apply one intent to the store.
pub fn handle_intent(store: &mut VolumeStore, intent: Intent) -> Response {
    match intent {
        Intent::Load(paths) => handle_load(store, &paths),
        Intent::OpenSaved(path) => handle_open(store, &path),
        Intent::Save(path) => handle_save(store, &path),
        Intent::Snapshot(path) => handle_snapshot(store, &path),

        Intent::SetSlice(n) => {
            let depth = store.active_volume().map(|v| v.depth());
            store.set_active_slice(n);
            match depth {
                Some(depth) if n >= depth => Response::Status(format!(
                    "Slice {} out of range (0..={})",
                    n,
                    depth.saturating_sub(1)
                )),
                _ => Response::Done,
            }
        }
        Intent::StepSlice(direction) => {
            store.step_slice(direction);
            Response::Done
        }
        Intent::SwitchVolume(direction) => {
            store.switch_volume(direction);
            Response::Done
        }

        Intent::ToggleDrawing => {
            store.toggle_drawing();
            Response::Done
        }
        Intent::ClearSlice => {
            store.clear_active_slice();
            Response::Done
        }
        Intent::SetColor(color) => {
            store.set_color(color);
            Response::Done
        }
        Intent::BrushSize(delta) => {
            store.set_brush_size(delta);
            Response::Status(format!("Brush size: {}", store.view().brush_size))
        }

        Intent::PointerDown(pos) => {
            store.pointer_down(pos);
            Response::Done
        }
        Intent::PointerMove(pos) => {
            store.pointer_move(pos);
            Response::Done
        }
        Intent::PointerUp => {
            store.pointer_up();
            Response::Done
        }

        Intent::Status => Response::Status(status_line(store)),
        Intent::Help => Response::Status(help_text(store)),
        Intent::Quit => Response::Quit,
    }
}

fn handle_load(store: &mut VolumeStore, paths: &[PathBuf]) -> Response {
    let mut lines: Vec<String> = paths
        .iter()
        .filter(|path| !store.registry().is_supported_file(path))
        .map(|path| {
            log::warn!("{:?} has an unrecognised extension, reading it as NIfTI", path);
            format!(
                "Note: {} has an unrecognised extension, reading it as NIfTI",
                path.display()
            )
        })
        .collect();

    let report = store.load_images(paths);
    if !report.errors.is_empty() {
        lines.extend(report.errors.iter().map(|e| format!("Error: {}", e)));
        lines.push(format!(
            "Loaded {} of {} file(s)",
            report.loaded,
            paths.len()
        ));
    }

    if lines.is_empty() {
        Response::Done
    } else {
        Response::Status(lines.join("\n"))
    }
}

fn handle_open(store: &mut VolumeStore, path: &Path) -> Response {
    match store.load_saved_artifact(path) {
        Ok(()) => Response::Done,
        Err(e) => {
            log::error!("Failed to open {:?}: {}", path, e);
            Response::Status(format!("Error: {}", e))
        }
    }
}

/// Save path with the default archive extension appended when none is given.
pub fn artifact_save_path(path: &Path) -> PathBuf {
    if path.extension().is_some() {
        path.to_path_buf()
    } else {
        path.with_extension(DEFAULT_ARTIFACT_EXTENSION)
    }
}

fn handle_save(store: &mut VolumeStore, path: &Path) -> Response {
    let path = artifact_save_path(path);
    match store.save_active_artifact(&path) {
        Ok(true) => Response::Status(format!("Saved to {}", path.display())),
        Ok(false) => Response::Status("Nothing to save".to_string()),
        Err(e) => {
            log::error!("Failed to save {:?}: {}", path, e);
            Response::Status(format!("Error: {}", e))
        }
    }
}

fn handle_snapshot(store: &mut VolumeStore, path: &Path) -> Response {
    match render::save_snapshot(store, path) {
        Ok(true) => Response::Status(format!("Snapshot written to {}", path.display())),
        Ok(false) => Response::Status("Nothing to render".to_string()),
        Err(e) => {
            log::error!("Failed to write snapshot {:?}: {}", path, e);
            Response::Status(format!("Error: {}", e))
        }
    }
}

/// Command list followed by the formats the loader registry accepts.
pub fn help_text(store: &VolumeStore) -> String {
    let registry = store.registry();
    let mut text = HELP_TEXT.to_string();
    text.push_str("\nFormats:");
    for loader in registry.loaders() {
        text.push_str(&format!("\n  {}", loader.display_name()));
    }
    text.push_str(&format!(
        "\nExtensions: {}",
        registry.supported_extensions().join(", ")
    ));
    text
}

/// Title plus the settings the title does not show.
pub fn status_line(store: &VolumeStore) -> String {
    let view = store.view();
    let mut line = render::title(store);
    if let (Some(index), Some(volume)) = (store.active_index(), store.active_volume()) {
        line.push_str(&format!(
            "\nvolume {}/{} ({}x{}x{})",
            index + 1,
            store.len(),
            volume.rows(),
            volume.cols(),
            volume.depth()
        ));
    }
    line.push_str(&format!(
        "\nbrush: {} | color: {} | drawing: {} | stroke: {:?}",
        view.brush_size,
        view.color,
        if view.drawing_enabled { "on" } else { "off" },
        store.stroke()
    ));
    line
}
