//! RIS module - reconfigurable intelligent surfaces
//!
//! A RIS is a planar surface in the local y-z plane of its radio device,
//! discretized into a grid of cells. Each re-radiation mode carries a phase
//! and an amplitude value per cell; interpolators turn these discrete
//! values into continuous profiles with spatial derivatives.

mod cell_grid;
mod interpolator;
mod profile;
mod surface;

use thiserror::Error;

pub use cell_grid::CellGrid;
pub use interpolator::{LagrangeProfileInterpolator, ProfileInterpolator, ProfileSample};
pub use profile::{DiscreteAmplitudeProfile, DiscretePhaseProfile, DiscreteProfile};
pub use surface::Ris;

/// RIS errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RisError {
    #[error("Cell grid needs at least one row and one column, got {rows}x{cols}")]
    InvalidDimensions { rows: usize, cols: usize },

    #[error("A RIS needs at least one re-radiation mode")]
    NoModes,

    #[error("Mode {mode} out of range for {num_modes} modes")]
    InvalidMode { mode: usize, num_modes: usize },

    #[error("Profile shape mismatch: expected {expected:?}, got {found:?}")]
    ShapeMismatch {
        expected: [usize; 3],
        found: Vec<usize>,
    },

    #[error("Amplitude profile values must be non-negative and finite")]
    InvalidAmplitude,

    #[error("Invalid mode powers: {0}")]
    InvalidModePowers(String),

    #[error("Wavelength must be positive and finite, got {0} m")]
    InvalidWavelength(f64),

    #[error("Surface point must be finite, got {0:?}")]
    NonFinitePoint([f64; 2]),
}
