//! Global foreground/background binarization with Otsu's threshold.
//!
//! Samples outside `0..=255` are clamped when binned, so 16-bit rasters
//! saturate into the top bin instead of being rejected.

use crate::grid::IntegerGrid;

pub const BACKGROUND: i32 = 0;
pub const FOREGROUND: i32 = 255;

/// 256-bin intensity histogram of `grid`.
pub fn histogram(grid: &IntegerGrid) -> [u64; 256] {
    let mut hist = [0u64; 256];
    for &v in grid.data() {
        hist[v.clamp(0, 255) as usize] += 1;
    }
    hist
}

/// Bin that maximizes the between-class variance of `hist`.
///
/// The background class is every bin up to and including the returned one.
/// An empty or single-valued histogram returns 0.
pub fn otsu_threshold(hist: &[u64; 256]) -> u8 {
    let total: u64 = hist.iter().sum();
    let sum_total: f64 = hist
        .iter()
        .enumerate()
        .map(|(i, &count)| i as f64 * count as f64)
        .sum();

    let mut sum_background = 0.0;
    let mut weight_background: u64 = 0;
    let mut max_variance = 0.0;
    let mut threshold = 0u8;

    for (t, &count) in hist.iter().enumerate() {
        weight_background += count;
        if weight_background == 0 {
            continue;
        }
        let weight_foreground = total - weight_background;
        if weight_foreground == 0 {
            break;
        }

        sum_background += t as f64 * count as f64;
        let mean_background = sum_background / weight_background as f64;
        let mean_foreground = (sum_total - sum_background) / weight_foreground as f64;

        let variance = weight_background as f64
            * weight_foreground as f64
            * (mean_background - mean_foreground).powi(2);
        tracing::trace!(bin = t, variance, "between-class variance");

        if variance > max_variance {
            max_variance = variance;
            threshold = t as u8;
        }
    }

    threshold
}

/// Returns a copy of `grid` with every sample replaced by [`BACKGROUND`] or
/// [`FOREGROUND`].
pub fn binarize(grid: &IntegerGrid) -> IntegerGrid {
    let mut out = grid.clone();
    binarize_in_place(&mut out);
    out
}

pub fn binarize_in_place(grid: &mut IntegerGrid) {
    let threshold = i32::from(otsu_threshold(&histogram(grid)));
    tracing::debug!(threshold, rows = grid.rows(), cols = grid.cols(), "binarizing");

    for v in grid.data_mut() {
        *v = if *v <= threshold { BACKGROUND } else { FOREGROUND };
    }
}
