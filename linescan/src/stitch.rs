//! Placement of registered scanlines onto a shared canvas.

#[cfg(test)]
mod tests;

use crate::config::Placement;
use crate::grid::IntegerGrid;
use crate::segment::scanline_count;
use crate::shift::Shift;

/// Canvas size and the top-left corner of every scanline on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanvasLayout {
    pub rows: usize,
    pub cols: usize,
    /// `(row, col)` of each scanline's top-left corner, in scan order.
    pub origins: Vec<(usize, usize)>,
}

impl CanvasLayout {
    /// Accumulates per-scanline advances into absolute positions and sizes the
    /// canvas to hold every `scan_length x width` scanline.
    ///
    /// The extremes start at zero, which keeps the first scanline's position
    /// inside the tracked range even when every later one drifts the same way.
    pub fn compute(advances: &[Shift], scan_length: usize, width: usize) -> Self {
        let mut total_x = 0isize;
        let mut total_y = 0isize;
        let (mut min_x, mut max_x) = (0isize, 0isize);
        let (mut min_y, mut max_y) = (0isize, 0isize);

        for shift in advances {
            total_x += shift.dx;
            total_y += shift.dy;

            max_x = max_x.max(total_x);
            min_x = min_x.min(total_x);
            max_y = max_y.max(total_y);
            min_y = min_y.min(total_y);
        }

        let rows = scan_length + (max_y - min_y) as usize;
        let cols = width + (max_x - min_x) as usize;

        let mut pos_x = -min_x;
        let mut pos_y = -min_y;
        let mut origins = Vec::with_capacity(advances.len() + 1);
        origins.push((pos_y as usize, pos_x as usize));
        for shift in advances {
            pos_x += shift.dx;
            pos_y += shift.dy;
            origins.push((pos_y as usize, pos_x as usize));
        }

        Self {
            rows,
            cols,
            origins,
        }
    }
}

/// Offset from one scanline's origin to the next under `placement`.
#[inline]
pub fn advance(shift: Shift, scan_length: usize, placement: Placement) -> Shift {
    match placement {
        Placement::Overlay => shift,
        Placement::Stacked => Shift {
            dx: shift.dx,
            dy: shift.dy + scan_length as isize,
        },
    }
}

/// Copies every scanline of `stack` onto a zeroed canvas at its accumulated position.
///
/// `shifts` holds one entry per consecutive scanline pair. Where scanlines
/// overlap, the later one wins.
pub fn stitch(
    stack: &IntegerGrid,
    shifts: &[Shift],
    scan_length: usize,
    placement: Placement,
) -> IntegerGrid {
    let count = scanline_count(stack, scan_length);
    assert_eq!(
        shifts.len() + 1,
        count,
        "expected one shift per scanline pair"
    );

    let advances: Vec<Shift> = shifts
        .iter()
        .map(|&shift| advance(shift, scan_length, placement))
        .collect();
    let layout = CanvasLayout::compute(&advances, scan_length, stack.cols());
    tracing::debug!(
        rows = layout.rows,
        cols = layout.cols,
        scanlines = count,
        "canvas layout"
    );

    let mut canvas = IntegerGrid::new_default(layout.rows, layout.cols);
    for (i, &(row, col)) in layout.origins.iter().enumerate() {
        canvas.copy_block_from(stack, i * scan_length, scan_length, row, col);
    }

    canvas
}
