//! Numerical and physical constants
//!
//! Provides standardized tolerance values and default parameters
//! used throughout the library.

/// Speed of light in vacuum [m/s]
pub const SPEED_OF_LIGHT: f64 = 299_792_458.0;

/// Carrier frequency of a freshly created scene [Hz]
pub const DEFAULT_FREQUENCY: f64 = 3.5e9;

/// Tolerance for detecting near-zero values in division and normalization.
pub const NEAR_ZERO: f64 = 1e-15;

/// Default transmit power of a transmitter [dBm]
pub const DEFAULT_TX_POWER_DBM: f64 = 44.0;

/// Spacing between neighbouring RIS cells [wavelengths]
pub const DEFAULT_RIS_CELL_SPACING: f64 = 0.5;

/// Number of zenith samples used when integrating antenna patterns.
pub const GAIN_THETA_SAMPLES: usize = 500;

/// Number of azimuth samples used when integrating antenna patterns.
pub const GAIN_PHI_SAMPLES: usize = 1000;

/// Maximum gain of the 3GPP TR 38.901 antenna element [dBi]
pub const TR38901_MAX_GAIN_DB: f64 = 8.0;

/// Half-power beamwidth of the 3GPP TR 38.901 antenna element [degrees]
pub const TR38901_BEAMWIDTH_DEG: f64 = 65.0;

/// Front-back ratio and side-lobe limit of the TR 38.901 element [dB]
pub const TR38901_ATTENUATION_LIMIT_DB: f64 = 30.0;
