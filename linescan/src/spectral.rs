//! Separable 2D discrete Fourier transform over scanline-sized grids.
//!
//! The forward transform runs a 1D FFT over every row, then over every column.
//! The inverse mirrors it and divides by `rows * cols`, so `inverse(forward(x))`
//! reproduces `x`. Only the real part of the inverse is kept, which is exact
//! for conjugate-symmetric spectra (every spectrum of a real image is one).


use std::sync::Arc;

use rustfft::num_complex::Complex64;
use rustfft::{Fft, FftPlanner};

use crate::grid::Grid;

/// Complex spectrum of a scanline.
pub type Spectrum = Grid<Complex64>;

/// Planned transforms plus working buffers for one grid shape.
///
/// Cloning shares the FFT plans and duplicates the buffers, which is how each
/// rayon worker gets its own workspace.
#[derive(Clone)]
pub struct SpectralTransform {
    rows: usize,
    cols: usize,
    row_forward: Arc<dyn Fft<f64>>,
    row_inverse: Arc<dyn Fft<f64>>,
    col_forward: Arc<dyn Fft<f64>>,
    col_inverse: Arc<dyn Fft<f64>>,
    /// Column-major copy of the grid while columns are transformed.
    transposed: Vec<Complex64>,
    scratch: Vec<Complex64>,
}

impl SpectralTransform {
    pub fn new(rows: usize, cols: usize) -> Self {
        assert!(rows > 0 && cols > 0, "transform shape must be non-empty");

        let mut planner = FftPlanner::new();
        let row_forward = planner.plan_fft_forward(cols);
        let row_inverse = planner.plan_fft_inverse(cols);
        let col_forward = planner.plan_fft_forward(rows);
        let col_inverse = planner.plan_fft_inverse(rows);

        let scratch_len = [&row_forward, &row_inverse, &col_forward, &col_inverse]
            .iter()
            .map(|fft| fft.get_inplace_scratch_len())
            .max()
            .unwrap_or(0);

        Self {
            rows,
            cols,
            row_forward,
            row_inverse,
            col_forward,
            col_inverse,
            transposed: vec![Complex64::default(); rows * cols],
            scratch: vec![Complex64::default(); scratch_len],
        }
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Allocates a zeroed spectrum of this transform's shape.
    pub fn new_spectrum(&self) -> Spectrum {
        Grid::new_default(self.rows, self.cols)
    }

    /// Forward transform of a real grid into `dst`. No normalization.
    pub fn forward(&mut self, src: &Grid<f64>, dst: &mut Spectrum) {
        self.check_shape(src.shape());
        self.check_shape(dst.shape());

        for (d, &s) in dst.data_mut().iter_mut().zip(src.data()) {
            *d = Complex64::new(s, 0.0);
        }

        // Consecutive rows are consecutive FFTs of length `cols`.
        self.row_forward
            .process_with_scratch(dst.data_mut(), &mut self.scratch);

        transpose(dst.data(), self.rows, self.cols, &mut self.transposed);
        self.col_forward
            .process_with_scratch(&mut self.transposed, &mut self.scratch);
        transpose(&self.transposed, self.cols, self.rows, dst.data_mut());
    }

    /// Inverse transform of `src` into the real grid `dst`, scaled by `1 / (rows * cols)`.
    ///
    /// `src` is used as the working buffer and holds garbage afterwards.
    pub fn inverse(&mut self, src: &mut Spectrum, dst: &mut Grid<f64>) {
        self.check_shape(src.shape());
        self.check_shape(dst.shape());

        self.row_inverse
            .process_with_scratch(src.data_mut(), &mut self.scratch);

        transpose(src.data(), self.rows, self.cols, &mut self.transposed);
        self.col_inverse
            .process_with_scratch(&mut self.transposed, &mut self.scratch);

        let norm = 1.0 / (self.rows * self.cols) as f64;
        for r in 0..self.rows {
            for (c, out) in dst.row_mut(r).iter_mut().enumerate() {
                *out = self.transposed[c * self.rows + r].re * norm;
            }
        }
    }

    fn check_shape(&self, shape: (usize, usize)) {
        assert_eq!(
            shape,
            (self.rows, self.cols),
            "grid shape does not match transform"
        );
    }
}

/// Out-of-place transpose of a row-major `rows x cols` matrix into `dst` (`cols x rows`).
pub fn transpose(src: &[Complex64], rows: usize, cols: usize, dst: &mut [Complex64]) {
    debug_assert_eq!(src.len(), rows * cols);
    debug_assert_eq!(dst.len(), rows * cols);

    for r in 0..rows {
        for c in 0..cols {
            dst[c * rows + r] = src[r * cols + c];
        }
    }
}
