//! Antenna module - radiation patterns and antenna arrays
//!
//! Provides the element patterns, polarization handling and the array
//! geometries used on the transmit and receive side of a scene.

mod array;
mod gain;
mod pattern;

use thiserror::Error;

pub use array::{AntennaArray, PlanarArray};
pub use gain::{compute_gain, AntennaGain};
pub use pattern::{Antenna, AntennaPattern, FieldPair, Polarization, PolarizationModel};

/// Antenna and antenna array errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AntennaError {
    #[error("Unknown antenna pattern: {0}. Use 'iso', 'dipole', 'hw_dipole', or 'tr38901'")]
    UnknownPattern(String),

    #[error("Unknown polarization: {0}. Use 'V', 'H', 'VH', or 'cross'")]
    UnknownPolarization(String),

    #[error("Unknown polarization model: {0}. Use 1 or 2")]
    UnknownPolarizationModel(u8),

    #[error("Array needs at least one row and one column, got {rows}x{cols}")]
    InvalidDimensions { rows: usize, cols: usize },

    #[error("Element spacing must be positive and finite, got {0} wavelengths")]
    InvalidSpacing(f64),

    #[error("Antenna array has no elements")]
    EmptyArray,
}
