//! Tests for pointer-driven painting and slice clearing.

use ndarray::Array3;

use crate::brush::{PointerPos, StrokeState};
use crate::model::{LabelColor, Volume};
use crate::state::VolumeStore;

fn store_10x10x4() -> VolumeStore {
    let mut store = VolumeStore::new();
    store.add_volume(Volume::new("scan", Array3::zeros((10, 10, 4))));
    store.take_redraw();
    store
}

fn in_disk(col: usize, row: usize, cc: i64, cr: i64, r: i64) -> bool {
    let dc = col as i64 - cc;
    let dr = row as i64 - cr;
    dc * dc + dr * dr <= r * r
}

#[test]
fn test_green_radius_two_scenario() {
    let mut store = store_10x10x4();
    assert_eq!(store.view().slice, 2);

    store.set_color(LabelColor::Green);
    store.set_brush_size(1);
    assert_eq!(store.view().brush_size, 2);
    store.toggle_drawing();

    store.pointer_down(PointerPos::at(5.5, 5.5));
    store.pointer_up();

    let vol = store.active_volume().unwrap();
    for ((row, col, slice), &v) in vol.mask().indexed_iter() {
        let expected = if slice == 2 && in_disk(col, row, 5, 5, 2) {
            2
        } else {
            0
        };
        assert_eq!(v, expected, "cell [{}, {}, {}]", row, col, slice);
    }
}

#[test]
fn test_drawing_disabled_blocks_painting() {
    let mut store = store_10x10x4();
    store.pointer_down(PointerPos::at(3.0, 3.0));
    store.pointer_move(PointerPos::at(4.0, 4.0));

    assert_eq!(store.stroke(), StrokeState::Idle);
    assert!(store.active_volume().unwrap().mask().iter().all(|&v| v == 0));
    assert!(!store.take_redraw());
}

#[test]
fn test_pointer_down_outside_stays_idle() {
    let mut store = store_10x10x4();
    store.toggle_drawing();
    store.take_redraw();

    store.pointer_down(PointerPos::Outside);
    assert_eq!(store.stroke(), StrokeState::Idle);
    store.pointer_down(PointerPos::at(10.0, 2.0));
    assert_eq!(store.stroke(), StrokeState::Idle);

    store.pointer_move(PointerPos::at(2.0, 2.0));
    assert!(store.active_volume().unwrap().mask().iter().all(|&v| v == 0));
    assert!(!store.take_redraw());
}

#[test]
fn test_drag_paints_each_sample_without_interpolation() {
    let mut store = store_10x10x4();
    store.toggle_drawing();

    store.pointer_down(PointerPos::at(1.0, 1.0));
    assert_eq!(store.stroke(), StrokeState::Painting);
    store.pointer_move(PointerPos::Outside);
    assert_eq!(store.stroke(), StrokeState::Painting);
    store.pointer_move(PointerPos::at(8.0, 1.0));
    store.pointer_up();
    assert_eq!(store.stroke(), StrokeState::Idle);

    // moves after release do not paint
    store.pointer_move(PointerPos::at(5.0, 8.0));

    let plane = store.active_volume().unwrap().mask_slice(2).to_owned();
    assert_eq!(plane[[1, 1]], 1);
    assert_eq!(plane[[1, 8]], 1);
    // gap between the two dabs
    assert_eq!(plane[[1, 4]], 0);
    assert_eq!(plane[[8, 5]], 0);
}

#[test]
fn test_disabling_drawing_ends_stroke() {
    let mut store = store_10x10x4();
    store.toggle_drawing();
    store.pointer_down(PointerPos::at(1.0, 1.0));
    store.toggle_drawing();
    assert_eq!(store.stroke(), StrokeState::Idle);

    store.toggle_drawing();
    store.pointer_move(PointerPos::at(7.0, 7.0));
    assert_eq!(store.active_volume().unwrap().mask()[[7, 7, 2]], 0);
}

#[test]
fn test_paint_follows_active_slice() {
    let mut store = store_10x10x4();
    store.toggle_drawing();
    store.set_active_slice(0);
    store.pointer_down(PointerPos::at(0.0, 0.0));
    store.pointer_up();

    let mask = store.active_volume().unwrap().mask();
    assert_eq!(mask[[0, 0, 0]], 1);
    assert_eq!(mask[[0, 0, 2]], 0);
}

#[test]
fn test_clear_active_slice_only_touches_current() {
    let mut store = store_10x10x4();
    store.toggle_drawing();
    for slice in 0..4 {
        store.set_active_slice(slice);
        store.pointer_down(PointerPos::at(5.0, 5.0));
        store.pointer_up();
    }
    store.set_active_slice(1);
    store.take_redraw();

    store.clear_active_slice();
    assert!(store.take_redraw());

    let vol = store.active_volume().unwrap();
    assert!(vol.mask_slice(1).iter().all(|&v| v == 0));
    for slice in [0, 2, 3] {
        assert_eq!(vol.mask()[[5, 5, slice]], 1);
    }
}

#[test]
fn test_masks_stay_per_volume() {
    let mut store = store_10x10x4();
    store.add_volume(Volume::new("second", Array3::zeros((6, 8, 2))));
    store.toggle_drawing();
    store.pointer_down(PointerPos::at(2.0, 2.0));
    store.pointer_up();

    let second_painted = store.volumes()[1].mask().iter().filter(|&&v| v != 0).count();
    assert!(second_painted > 0);
    assert!(store.volumes()[0].mask().iter().all(|&v| v == 0));
    for vol in store.volumes() {
        assert_eq!(vol.image().shape(), vol.mask().shape());
    }
}

#[test]
fn test_largest_brush_fills_slice() {
    let mut store = store_10x10x4();
    store.set_brush_size(i32::MAX);
    store.set_brush_size(i32::MAX);
    assert_eq!(store.view().brush_size, u32::MAX);
    store.toggle_drawing();

    assert_eq!(store.paint_at_pointer(PointerPos::at(5.0, 5.0)), 100);
    store.pointer_down(PointerPos::at(5.0, 5.0));
    assert_eq!(store.stroke(), StrokeState::Painting);

    let vol = store.active_volume().unwrap();
    assert!(vol.mask_slice(2).iter().all(|&v| v == 1));
    assert!(vol.mask_slice(1).iter().all(|&v| v == 0));
}
