//! Extraction of scanline slabs from a stacked scan.

use crate::grid::{Grid, IntegerGrid};

/// Number of whole scanlines in a stack. Callers validate divisibility first.
#[inline]
pub fn scanline_count(stack: &IntegerGrid, scan_length: usize) -> usize {
    stack.rows() / scan_length
}

/// Copies rows `start_row..start_row + scan_length` of `stack` into `dst` as `f64`.
///
/// `dst` must already be sized `(scan_length, stack.cols())`; it is reused across
/// scanlines so no allocation happens here.
pub fn extract_scanline(
    stack: &IntegerGrid,
    start_row: usize,
    scan_length: usize,
    dst: &mut Grid<f64>,
) {
    assert_eq!(
        dst.shape(),
        (scan_length, stack.cols()),
        "scanline buffer has the wrong shape"
    );
    assert!(
        start_row + scan_length <= stack.rows(),
        "scanline rows {}..{} exceed stack height {}",
        start_row,
        start_row + scan_length,
        stack.rows()
    );

    for r in 0..scan_length {
        let src = stack.row(start_row + r);
        for (d, &s) in dst.row_mut(r).iter_mut().zip(src) {
            *d = f64::from(s);
        }
    }
}
