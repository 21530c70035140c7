//! Linescan - registration and stitching of line-scan sensor strips.
//!
//! A line-scan sensor produces fixed-height strips ("scanlines") that drift
//! relative to each other. This library:
//! - Estimates the integer `(dx, dy)` drift between consecutive scanlines by
//!   FFT cross-correlation
//! - Accumulates the drift and stitches every scanline onto one canvas
//! - Reads and writes binary graymaps
//! - Binarizes images with Otsu's global threshold
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use linescan::{raster, LineRegistration};
//!
//! let stack = raster::load("scan.pgm")?;
//! let result = LineRegistration::new(8).run(&stack)?;
//! println!("{} shifts in {:.1} ms", result.shifts.len(), result.elapsed_ms);
//! raster::store("registered.pgm", &result.canvas)?;
//! ```

pub mod binarize;
pub mod config;
pub mod error;
pub mod grid;
pub mod raster;
pub mod registration;
pub mod segment;
pub mod shift;
pub mod spectral;
pub mod stitch;

// ============================================================================
// Core types
// ============================================================================

pub use error::{RasterError, RegistrationError};
pub use grid::{Grid, IntegerGrid};

// ============================================================================
// Registration
// ============================================================================

pub use config::{Config, Placement, SpectrumSchedule, DEFAULT_SCAN_LENGTH};
pub use registration::{
    estimate_shifts, register, register_in_place, validate_stack, LineRegistration,
    RegistrationResult,
};
pub use shift::{Shift, ShiftEstimator};
pub use spectral::{SpectralTransform, Spectrum};
pub use stitch::{stitch, CanvasLayout};

// ============================================================================
// Collaborators
// ============================================================================

pub use binarize::{binarize, binarize_in_place, otsu_threshold};
