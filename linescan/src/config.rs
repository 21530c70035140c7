//! Configuration for line registration.

use crate::error::RegistrationError;

/// Scan length used by the reference line-scan hardware.
pub const DEFAULT_SCAN_LENGTH: usize = 8;

/// How scanline spectra are scheduled during shift estimation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpectrumSchedule {
    /// One scanline at a time, reusing the previous spectrum for the next pair.
    #[default]
    Sequential,
    /// All spectra computed up front on the rayon pool, pairs correlated in parallel.
    /// Shifts are still reduced in scanline order, so results match `Sequential`.
    Parallel,
}

/// Where each scanline lands relative to the previous one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Placement {
    /// Previous position plus the measured shift. Scanlines without drift
    /// overlap, so the canvas is one scanline tall plus the drift span.
    #[default]
    Overlay,
    /// Previous position plus `scan_length` rows plus the measured shift.
    /// Scanlines without drift tile the canvas top to bottom.
    Stacked,
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Rows per scanline, fixed by the sensor.
    pub scan_length: usize,
    pub spectra: SpectrumSchedule,
    pub placement: Placement,
}

impl Config {
    pub fn with_scan_length(scan_length: usize) -> Self {
        Self {
            scan_length,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<(), RegistrationError> {
        if self.scan_length == 0 {
            return Err(RegistrationError::ZeroScanLength);
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            scan_length: DEFAULT_SCAN_LENGTH,
            spectra: SpectrumSchedule::default(),
            placement: Placement::default(),
        }
    }
}
