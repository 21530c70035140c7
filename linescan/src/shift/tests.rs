//! Tests for peak location and shift estimation.

use super::*;

use rand::prelude::*;

fn random_scanline(rows: usize, cols: usize, seed: u64) -> Grid<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let data = (0..rows * cols)
        .map(|_| f64::from(rng.random_range(0..=255u8)))
        .collect();
    Grid::new(rows, cols, data)
}

/// `shifted(r, c) = grid(r + dy, c + dx)` with wrap-around.
fn cyclic_shift(grid: &Grid<f64>, dx: isize, dy: isize) -> Grid<f64> {
    let (rows, cols) = grid.shape();
    let mut out = Grid::new_default(rows, cols);
    for r in 0..rows {
        for c in 0..cols {
            let sr = (r as isize + dy).rem_euclid(rows as isize) as usize;
            let sc = (c as isize + dx).rem_euclid(cols as isize) as usize;
            out[(r, c)] = grid[(sr, sc)];
        }
    }
    out
}

fn estimate_between(current: &Grid<f64>, next: &Grid<f64>) -> Shift {
    let (rows, cols) = current.shape();
    let mut transform = SpectralTransform::new(rows, cols);
    let mut current_spectrum = transform.new_spectrum();
    let mut next_spectrum = transform.new_spectrum();
    transform.forward(current, &mut current_spectrum);
    transform.forward(next, &mut next_spectrum);

    let mut estimator = ShiftEstimator::new(rows, cols);
    estimator.estimate(&mut transform, &current_spectrum, &next_spectrum)
}

#[test]
fn test_wrap_shift_even_length() {
    assert_eq!(wrap_shift(0, 8), 0);
    assert_eq!(wrap_shift(3, 8), 3);
    // Half length is not wrapped.
    assert_eq!(wrap_shift(4, 8), 4);
    assert_eq!(wrap_shift(5, 8), -3);
    assert_eq!(wrap_shift(7, 8), -1);
}

#[test]
fn test_wrap_shift_odd_length() {
    assert_eq!(wrap_shift(3, 7), 3);
    assert_eq!(wrap_shift(4, 7), -3);
    assert_eq!(wrap_shift(6, 7), -1);
}

#[test]
fn test_find_peak_first_occurrence_wins() {
    let surface = Grid::new(2, 3, vec![1.0, 5.0, 2.0, 5.0, 0.0, 5.0]);
    assert_eq!(find_peak(&surface), (0, 1));
}

#[test]
fn test_find_peak_treats_round_off_as_tie() {
    let surface = Grid::new(2, 2, vec![100.0, 100.0 + 1e-12, 99.0, 100.0]);
    assert_eq!(find_peak(&surface), (0, 0));
}

#[test]
fn test_find_peak_distinct_maximum() {
    let surface = Grid::new(3, 3, vec![0.0, 1.0, 2.0, 3.0, 4.0, 9.0, 6.0, 7.0, 8.0]);
    assert_eq!(find_peak(&surface), (1, 2));
}

#[test]
fn test_identical_scanlines_have_zero_shift() {
    let scanline = random_scanline(8, 16, 1);
    assert_eq!(estimate_between(&scanline, &scanline), Shift::ZERO);
}

#[test]
fn test_recovers_known_shift() {
    let current = random_scanline(8, 16, 2);
    let next = cyclic_shift(&current, 3, 2);

    assert_eq!(estimate_between(&current, &next), Shift::new(3, 2));
}

#[test]
fn test_recovers_negative_shift() {
    let current = random_scanline(8, 20, 3);
    let next = cyclic_shift(&current, -4, -1);

    assert_eq!(estimate_between(&current, &next), Shift::new(-4, -1));
}

#[test]
fn test_half_length_shift_stays_positive() {
    let current = random_scanline(8, 16, 4);

    let next = cyclic_shift(&current, 0, 4);
    assert_eq!(estimate_between(&current, &next), Shift::new(0, 4));

    // -4 rows is the same cyclic shift, so it is reported as +4 too.
    let next = cyclic_shift(&current, 0, -4);
    assert_eq!(estimate_between(&current, &next), Shift::new(0, 4));

    let next = cyclic_shift(&current, 8, 0);
    assert_eq!(estimate_between(&current, &next), Shift::new(8, 0));
}

#[test]
fn test_just_past_half_length_wraps_negative() {
    let current = random_scanline(8, 16, 5);
    let next = cyclic_shift(&current, 0, 5);

    assert_eq!(estimate_between(&current, &next), Shift::new(0, -3));
}

#[test]
fn test_solid_scanlines_have_zero_shift() {
    let current = Grid::new_filled(8, 10, 40.0);
    let next = Grid::new_filled(8, 10, 200.0);

    assert_eq!(estimate_between(&current, &next), Shift::ZERO);
}

#[test]
fn test_correlation_surface_peaks_at_shift() {
    let current = random_scanline(6, 12, 6);
    let next = cyclic_shift(&current, 2, 1);

    let mut transform = SpectralTransform::new(6, 12);
    let mut a = transform.new_spectrum();
    let mut b = transform.new_spectrum();
    transform.forward(&current, &mut a);
    transform.forward(&next, &mut b);

    let mut estimator = ShiftEstimator::new(6, 12);
    estimator.estimate(&mut transform, &a, &b);

    // Unnormalized: the peak is rows*cols times the scanline's sum of squares.
    let energy: f64 = current.data().iter().map(|v| v * v).sum();
    let expected = energy * (6 * 12) as f64;
    let peak = estimator.correlation()[(1, 2)];
    assert!(
        (peak - expected).abs() / expected < 1e-9,
        "peak {} expected {}",
        peak,
        expected
    );
}
