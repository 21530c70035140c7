use super::*;

/// `count` scanlines of `scan_length x width`, scanline `i` filled with `i + 1`.
fn solid_stack(count: usize, scan_length: usize, width: usize) -> IntegerGrid {
    let mut data = Vec::with_capacity(count * scan_length * width);
    for i in 0..count {
        data.extend(std::iter::repeat(i as i32 + 1).take(scan_length * width));
    }
    IntegerGrid::new(count * scan_length, width, data)
}

#[test]
fn test_layout_without_shifts_is_input_sized() {
    let layout = CanvasLayout::compute(&[], 8, 10);

    assert_eq!((layout.rows, layout.cols), (8, 10));
    assert_eq!(layout.origins, vec![(0, 0)]);
}

#[test]
fn test_layout_zero_shifts_stack_vertically_in_place() {
    let layout = CanvasLayout::compute(&[Shift::ZERO, Shift::ZERO], 4, 6);

    // All scanlines land on the origin; no drift means no extra canvas.
    assert_eq!((layout.rows, layout.cols), (4, 6));
    assert_eq!(layout.origins, vec![(0, 0), (0, 0), (0, 0)]);
}

#[test]
fn test_layout_right_then_back() {
    // Cumulative x is 1 then 0: span is 1.
    let layout = CanvasLayout::compute(&[Shift::new(1, 0), Shift::new(-1, 0)], 4, 10);

    assert_eq!((layout.rows, layout.cols), (4, 11));
    assert_eq!(layout.origins, vec![(0, 0), (0, 1), (0, 0)]);
}

#[test]
fn test_layout_left_excursion_offsets_origin() {
    // Cumulative x is -1 then 0: the first scanline starts one column in.
    let layout = CanvasLayout::compute(&[Shift::new(-1, 0), Shift::new(1, 0)], 4, 10);

    assert_eq!((layout.rows, layout.cols), (4, 11));
    assert_eq!(layout.origins, vec![(0, 1), (0, 0), (0, 1)]);
}

#[test]
fn test_layout_two_sided_drift() {
    // Cumulative x is 1 then -1: span of 2 columns.
    let layout = CanvasLayout::compute(&[Shift::new(1, 0), Shift::new(-2, 0)], 4, 10);

    assert_eq!((layout.rows, layout.cols), (4, 12));
    assert_eq!(layout.origins, vec![(0, 1), (0, 2), (0, 0)]);
}

#[test]
fn test_layout_vertical_drift() {
    let down = CanvasLayout::compute(&[Shift::new(0, 2)], 4, 3);
    assert_eq!((down.rows, down.cols), (6, 3));
    assert_eq!(down.origins, vec![(0, 0), (2, 0)]);

    let up = CanvasLayout::compute(&[Shift::new(0, -3)], 4, 3);
    assert_eq!((up.rows, up.cols), (7, 3));
    assert_eq!(up.origins, vec![(3, 0), (0, 0)]);
}

#[test]
fn test_stitch_single_scanline_is_identity() {
    let stack = IntegerGrid::new(2, 3, vec![1, 2, 3, 4, 5, 6]);

    assert_eq!(stitch(&stack, &[], 2, Placement::Overlay), stack);
}

#[test]
fn test_stitch_places_blocks_and_zero_background() {
    let stack = solid_stack(2, 2, 3);
    let canvas = stitch(&stack, &[Shift::new(1, 1)], 2, Placement::Overlay);

    assert_eq!(canvas.shape(), (3, 4));
    assert_eq!(canvas.row(0), &[1, 1, 1, 0]);
    assert_eq!(canvas.row(1), &[1, 2, 2, 2]);
    assert_eq!(canvas.row(2), &[0, 2, 2, 2]);
}

#[test]
fn test_stitch_later_scanline_overwrites_overlap() {
    let stack = solid_stack(3, 2, 2);
    let canvas = stitch(&stack, &[Shift::ZERO, Shift::ZERO], 2, Placement::Overlay);

    assert_eq!(canvas.shape(), (2, 2));
    assert!(canvas.data().iter().all(|&v| v == 3));
}

#[test]
#[should_panic(expected = "one shift per scanline pair")]
fn test_stitch_rejects_wrong_shift_count() {
    let stack = solid_stack(3, 2, 2);
    stitch(&stack, &[Shift::ZERO], 2, Placement::Overlay);
}

#[test]
fn test_stacked_placement_tiles_scanlines() {
    let stack = solid_stack(3, 8, 10);
    let canvas = stitch(&stack, &[Shift::ZERO, Shift::ZERO], 8, Placement::Stacked);

    assert_eq!(canvas, stack);
}

#[test]
fn test_stacked_placement_with_drift() {
    let stack = solid_stack(2, 2, 2);
    let canvas = stitch(&stack, &[Shift::new(-1, 1)], 2, Placement::Stacked);

    // Second scanline starts 3 rows down and one column left of the first.
    assert_eq!(canvas.shape(), (5, 3));
    assert_eq!(canvas.row(0), &[0, 1, 1]);
    assert_eq!(canvas.row(1), &[0, 1, 1]);
    assert_eq!(canvas.row(2), &[0, 0, 0]);
    assert_eq!(canvas.row(3), &[2, 2, 0]);
    assert_eq!(canvas.row(4), &[2, 2, 0]);
}

#[test]
fn test_advance_per_placement() {
    let shift = Shift::new(2, -1);
    assert_eq!(advance(shift, 8, Placement::Overlay), shift);
    assert_eq!(advance(shift, 8, Placement::Stacked), Shift::new(2, 7));
}
