//! Line registration pipeline.
//!
//! # Stages
//!
//! 1. **Validate** - reject stacks whose height is not a whole number of scanlines
//! 2. **Spectra** - forward transform of each scanline
//! 3. **Shifts** - cross-correlate each consecutive pair and read off `(dx, dy)`
//! 4. **Stitch** - accumulate shifts, size the canvas, copy every scanline onto it
//!
//! Only validation can fail; every later stage is infallible for a valid stack.


use std::time::Instant;

use rayon::prelude::*;

use crate::config::{Config, SpectrumSchedule};
use crate::error::RegistrationError;
use crate::grid::{Grid, IntegerGrid};
use crate::segment::{extract_scanline, scanline_count};
use crate::shift::{Shift, ShiftEstimator};
use crate::spectral::{SpectralTransform, Spectrum};
use crate::stitch::stitch;

/// Output of a registration run.
#[derive(Debug, Clone)]
pub struct RegistrationResult {
    /// Stitched composite.
    pub canvas: IntegerGrid,
    /// Shift of each scanline relative to the previous one.
    pub shifts: Vec<Shift>,
    /// Processing time in milliseconds.
    pub elapsed_ms: f64,
}

/// Registers stacks of scanlines produced by one sensor.
#[derive(Debug, Clone, Default)]
pub struct LineRegistration {
    config: Config,
}

impl LineRegistration {
    pub fn new(scan_length: usize) -> Self {
        Self::from_config(Config::with_scan_length(scan_length))
    }

    pub fn from_config(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn scan_length(&self) -> usize {
        self.config.scan_length
    }

    pub fn set_scan_length(&mut self, scan_length: usize) {
        self.config.scan_length = scan_length;
    }

    /// Registers `stack` and returns the composite together with the shifts.
    ///
    /// `stack` is never modified.
    pub fn run(&self, stack: &IntegerGrid) -> Result<RegistrationResult, RegistrationError> {
        let start = Instant::now();

        let shifts = estimate_shifts(stack, &self.config)?;
        let canvas = stitch(
            stack,
            &shifts,
            self.config.scan_length,
            self.config.placement,
        );

        let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;
        tracing::info!(
            scanlines = shifts.len() + 1,
            rows = canvas.rows(),
            cols = canvas.cols(),
            elapsed_ms,
            "registered scan stack"
        );

        Ok(RegistrationResult {
            canvas,
            shifts,
            elapsed_ms,
        })
    }

    /// Replaces `stack` with its composite. On error `stack` is left untouched.
    pub fn register_in_place(&self, stack: &mut IntegerGrid) -> Result<(), RegistrationError> {
        let result = self.run(stack)?;
        *stack = result.canvas;
        Ok(())
    }
}

/// Registers `stack` with default settings and the given scan length.
///
/// The default [`Placement::Overlay`](crate::config::Placement::Overlay) puts
/// each scanline at its predecessor's position plus the measured shift, so a
/// drift-free stack collapses to one scanline's height. Use
/// [`LineRegistration::from_config`] with `Placement::Stacked` to tile the
/// scanlines top to bottom instead.
pub fn register(stack: &IntegerGrid, scan_length: usize) -> Result<IntegerGrid, RegistrationError> {
    LineRegistration::new(scan_length)
        .run(stack)
        .map(|result| result.canvas)
}

/// In-place form of [`register`]. On error `stack` is left untouched.
pub fn register_in_place(
    stack: &mut IntegerGrid,
    scan_length: usize,
) -> Result<(), RegistrationError> {
    LineRegistration::new(scan_length).register_in_place(stack)
}

/// Checks the stack against `scan_length` and returns the number of scanlines.
pub fn validate_stack(stack: &IntegerGrid, scan_length: usize) -> Result<usize, RegistrationError> {
    let result = if scan_length == 0 {
        Err(RegistrationError::ZeroScanLength)
    } else if stack.is_empty() {
        Err(RegistrationError::EmptyStack {
            rows: stack.rows(),
            cols: stack.cols(),
        })
    } else if stack.rows() % scan_length != 0 {
        Err(RegistrationError::InvalidScanGeometry {
            rows: stack.rows(),
            scan_length,
        })
    } else {
        Ok(scanline_count(stack, scan_length))
    };

    if let Err(e) = &result {
        tracing::warn!("Rejected scan stack: {}", e);
    }
    result
}

/// Shift of every scanline relative to its predecessor, in scan order.
///
/// The result has one entry fewer than there are scanlines; a single-scanline
/// stack yields an empty vector.
pub fn estimate_shifts(
    stack: &IntegerGrid,
    config: &Config,
) -> Result<Vec<Shift>, RegistrationError> {
    config.validate()?;
    let count = validate_stack(stack, config.scan_length)?;

    let shifts = match config.spectra {
        SpectrumSchedule::Sequential => shifts_sequential(stack, config.scan_length, count),
        SpectrumSchedule::Parallel => shifts_parallel(stack, config.scan_length, count),
    };

    for (i, shift) in shifts.iter().enumerate() {
        tracing::debug!(pair = i, dx = shift.dx, dy = shift.dy, "scanline shift");
    }

    Ok(shifts)
}

/// Walks the stack once, keeping the previous scanline's spectrum for the next pair.
fn shifts_sequential(stack: &IntegerGrid, scan_length: usize, count: usize) -> Vec<Shift> {
    let cols = stack.cols();
    let mut transform = SpectralTransform::new(scan_length, cols);
    let mut estimator = ShiftEstimator::new(scan_length, cols);
    let mut scanline = Grid::new_default(scan_length, cols);
    let mut current = transform.new_spectrum();
    let mut next = transform.new_spectrum();

    extract_scanline(stack, 0, scan_length, &mut scanline);
    transform.forward(&scanline, &mut current);

    let mut shifts = Vec::with_capacity(count - 1);
    for i in 1..count {
        extract_scanline(stack, i * scan_length, scan_length, &mut scanline);
        transform.forward(&scanline, &mut next);

        shifts.push(estimator.estimate(&mut transform, &current, &next));

        // The next scanline becomes the current one without recomputing its spectrum.
        std::mem::swap(&mut current, &mut next);
    }

    shifts
}

/// Transforms all scanlines, then correlates all pairs, on the rayon pool.
///
/// Holds every spectrum at once. Ordered collection keeps shifts in scan order.
fn shifts_parallel(stack: &IntegerGrid, scan_length: usize, count: usize) -> Vec<Shift> {
    let cols = stack.cols();
    let planned = SpectralTransform::new(scan_length, cols);

    let spectra: Vec<Spectrum> = (0..count)
        .into_par_iter()
        .map_init(
            || (planned.clone(), Grid::new_default(scan_length, cols)),
            |(transform, scanline), i| {
                extract_scanline(stack, i * scan_length, scan_length, scanline);
                let mut spectrum = transform.new_spectrum();
                transform.forward(scanline, &mut spectrum);
                spectrum
            },
        )
        .collect();

    spectra
        .par_windows(2)
        .map_init(
            || (planned.clone(), ShiftEstimator::new(scan_length, cols)),
            |(transform, estimator), pair| estimator.estimate(transform, &pair[0], &pair[1]),
        )
        .collect()
}
