//! Translation estimate between consecutive scanlines.
//!
//! The correlation surface is the inverse transform of `current * conj(next)`.
//! This is plain cross-correlation rather than phase correlation: the
//! cross-power spectrum is not divided by its magnitude, so the peak height
//! follows the scanlines' contrast. Relative contrast changes between scanlines
//! can bias the peak; this is a known limitation of the estimator.

#[cfg(test)]
mod tests;

use crate::grid::Grid;
use crate::spectral::{SpectralTransform, Spectrum};

/// Relative tolerance under which two surface values count as tied.
///
/// Flat scanlines produce a constant surface plus transform round-off; without a
/// tolerance the noise, not the data, would pick the peak.
pub const PEAK_TIE_TOLERANCE: f64 = 1e-9;

/// Offset of one scanline relative to the previous one, in pixels.
///
/// `next(r, c) == current(r + dy, c + dx)` for the overlapping content, so
/// placing `next` at `current`'s position plus `(dx, dy)` aligns them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Shift {
    pub dx: isize,
    pub dy: isize,
}

impl Shift {
    pub const ZERO: Shift = Shift { dx: 0, dy: 0 };

    pub fn new(dx: isize, dy: isize) -> Self {
        Self { dx, dy }
    }
}

impl std::fmt::Display for Shift {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.dx, self.dy)
    }
}

/// Maps a peak index of a length-`len` transform to a signed shift in `[-len/2, len/2]`.
///
/// Indices strictly above `len / 2` wrap to negative; `len / 2` itself stays positive.
#[inline]
pub fn wrap_shift(index: usize, len: usize) -> isize {
    debug_assert!(index < len);
    if index > len / 2 {
        index as isize - len as isize
    } else {
        index as isize
    }
}

/// Location `(row, col)` of the maximum, ties resolved to the first in row-major order.
pub fn find_peak(surface: &Grid<f64>) -> (usize, usize) {
    let (max_val, max_abs) = surface
        .data()
        .iter()
        .fold((f64::NEG_INFINITY, 0.0f64), |(max_val, max_abs), &v| {
            (max_val.max(v), max_abs.max(v.abs()))
        });

    let threshold = max_val - PEAK_TIE_TOLERANCE * max_abs;
    let idx = surface
        .data()
        .iter()
        .position(|&v| v >= threshold)
        .unwrap_or(0);

    (idx / surface.cols(), idx % surface.cols())
}

/// Working buffers for correlating scanline spectra of one shape.
#[derive(Debug, Clone)]
pub struct ShiftEstimator {
    cross_power: Spectrum,
    correlation: Grid<f64>,
}

impl ShiftEstimator {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            cross_power: Grid::new_default(rows, cols),
            correlation: Grid::new_default(rows, cols),
        }
    }

    /// Estimates how `next` is shifted relative to `current`.
    pub fn estimate(
        &mut self,
        transform: &mut SpectralTransform,
        current: &Spectrum,
        next: &Spectrum,
    ) -> Shift {
        let (rows, cols) = self.cross_power.shape();
        assert_eq!(current.shape(), (rows, cols), "current spectrum shape");
        assert_eq!(next.shape(), (rows, cols), "next spectrum shape");

        // Cancels the inverse transform's 1/(rows*cols).
        let scale = (rows * cols) as f64;
        for ((cp, a), b) in self
            .cross_power
            .data_mut()
            .iter_mut()
            .zip(current.data())
            .zip(next.data())
        {
            *cp = a * b.conj() * scale;
        }

        transform.inverse(&mut self.cross_power, &mut self.correlation);

        let (row, col) = find_peak(&self.correlation);
        Shift {
            dx: wrap_shift(col, cols),
            dy: wrap_shift(row, rows),
        }
    }

    /// Correlation surface from the last `estimate` call.
    pub fn correlation(&self) -> &Grid<f64> {
        &self.correlation
    }
}
