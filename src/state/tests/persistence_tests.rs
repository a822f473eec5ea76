//! Save/load round-trip tests through the store.

use std::path::Path;

use super::write_scan;
use crate::brush::PointerPos;
use crate::error::SaveError;
use crate::model::LabelColor;
use crate::state::VolumeStore;

#[test]
fn test_save_without_volume_is_noop() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.npz");

    let store = VolumeStore::new();
    assert!(!store.save_active_artifact(&path).unwrap());
    assert!(!path.exists());
}

#[test]
fn test_save_then_load_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let scan = dir.path().join("knee.nii");
    let saved = dir.path().join("knee_labels.npz");
    write_scan(&scan, (8, 7, 5));

    let mut store = VolumeStore::new();
    store.load_image(&scan).unwrap();
    store.toggle_drawing();
    store.set_color(LabelColor::Yellow);
    store.pointer_down(PointerPos::at(3.0, 4.0));
    store.pointer_move(PointerPos::at(6.0, 1.0));
    store.pointer_up();
    assert!(store.save_active_artifact(&saved).unwrap());

    let original = store.active_volume().unwrap().clone();

    let mut fresh = VolumeStore::new();
    fresh.load_image(&saved).unwrap();
    let restored = fresh.active_volume().unwrap();

    assert_eq!(restored.image(), original.image());
    assert_eq!(restored.mask(), original.mask());
    assert_eq!(restored.name(), "knee_labels.npz");
    assert_eq!(fresh.view().color, LabelColor::Yellow);
    assert_eq!(fresh.view().slice, 2);
}

#[test]
fn test_loaded_artifact_is_appended_and_activated() {
    let dir = tempfile::tempdir().unwrap();
    let scan = dir.path().join("a.nii");
    let saved = dir.path().join("a.npz");
    write_scan(&scan, (4, 4, 4));

    let mut store = VolumeStore::new();
    store.load_image(&scan).unwrap();
    store.set_color(LabelColor::Green);
    store.save_active_artifact(&saved).unwrap();
    store.set_color(LabelColor::Red);

    store.load_saved_artifact(&saved).unwrap();
    assert_eq!(store.len(), 2);
    assert_eq!(store.active_index(), Some(1));
    assert_eq!(store.view().color, LabelColor::Green);
}

#[test]
fn test_save_to_unwritable_destination() {
    let dir = tempfile::tempdir().unwrap();
    let scan = dir.path().join("a.nii");
    write_scan(&scan, (2, 2, 2));

    let mut store = VolumeStore::new();
    store.load_image(&scan).unwrap();

    let result = store.save_active_artifact(Path::new("/no/such/dir/out.npz"));
    assert!(matches!(result, Err(SaveError::Io { .. })));
    assert_eq!(store.len(), 1);
}
