//! Frequency module - carrier frequency of a scene
//!
//! Keeps the carrier in Hz together with the unit it is displayed in, and
//! derives the wavelength and wavenumber used by antenna arrays and RIS.

use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::constants::{DEFAULT_FREQUENCY, SPEED_OF_LIGHT};

/// Frequency errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FrequencyError {
    #[error("Frequency must be positive and finite, got {0} Hz")]
    NotPositive(f64),

    #[error("Invalid frequency unit: {0}. Use 'Hz', 'kHz', 'MHz', 'GHz', or 'THz'")]
    InvalidUnit(String),
}

/// Frequency unit enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FrequencyUnit {
    Hz,
    KHz,
    MHz,
    #[default]
    GHz,
    THz,
}

impl FrequencyUnit {
    /// Get the multiplier to convert to Hz
    pub fn multiplier(&self) -> f64 {
        match self {
            FrequencyUnit::Hz => 1.0,
            FrequencyUnit::KHz => 1e3,
            FrequencyUnit::MHz => 1e6,
            FrequencyUnit::GHz => 1e9,
            FrequencyUnit::THz => 1e12,
        }
    }

    /// Unit label as written in scene files
    pub fn as_str(&self) -> &'static str {
        match self {
            FrequencyUnit::Hz => "Hz",
            FrequencyUnit::KHz => "kHz",
            FrequencyUnit::MHz => "MHz",
            FrequencyUnit::GHz => "GHz",
            FrequencyUnit::THz => "THz",
        }
    }
}

impl FromStr for FrequencyUnit {
    type Err = FrequencyError;

    /// Parse from string (case-insensitive)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "hz" => Ok(FrequencyUnit::Hz),
            "khz" => Ok(FrequencyUnit::KHz),
            "mhz" => Ok(FrequencyUnit::MHz),
            "ghz" => Ok(FrequencyUnit::GHz),
            "thz" => Ok(FrequencyUnit::THz),
            _ => Err(FrequencyError::InvalidUnit(s.to_string())),
        }
    }
}

impl fmt::Display for FrequencyUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A carrier frequency
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frequency {
    /// Frequency in Hz
    hz: f64,
    /// Display unit
    unit: FrequencyUnit,
}

impl Frequency {
    /// Create a carrier frequency from a value in the given unit
    ///
    /// # Example
    /// ```
    /// use rtscene_core::frequency::{Frequency, FrequencyUnit};
    /// let freq = Frequency::new(28.0, FrequencyUnit::GHz).unwrap();
    /// assert!((freq.wavelength() - 0.0107).abs() < 1e-4);
    /// ```
    pub fn new(value: f64, unit: FrequencyUnit) -> Result<Self, FrequencyError> {
        let hz = value * unit.multiplier();
        if !hz.is_finite() || hz <= 0.0 {
            return Err(FrequencyError::NotPositive(hz));
        }
        Ok(Self { hz, unit })
    }

    /// Create from a value in Hz, displayed in GHz
    pub fn from_hz(hz: f64) -> Result<Self, FrequencyError> {
        Self::new(hz, FrequencyUnit::Hz).map(|f| f.with_unit(FrequencyUnit::GHz))
    }

    /// Same frequency, different display unit
    pub fn with_unit(mut self, unit: FrequencyUnit) -> Self {
        self.unit = unit;
        self
    }

    /// Get the frequency in Hz
    #[inline]
    pub fn hz(&self) -> f64 {
        self.hz
    }

    /// Get the frequency in the display unit
    pub fn scaled(&self) -> f64 {
        self.hz / self.unit.multiplier()
    }

    /// Get the display unit
    #[inline]
    pub fn unit(&self) -> FrequencyUnit {
        self.unit
    }

    /// Free-space wavelength [m]
    #[inline]
    pub fn wavelength(&self) -> f64 {
        SPEED_OF_LIGHT / self.hz
    }

    /// Free-space wavenumber 2π/λ [rad/m]
    #[inline]
    pub fn wavenumber(&self) -> f64 {
        2.0 * PI / self.wavelength()
    }
}

impl Default for Frequency {
    fn default() -> Self {
        Self {
            hz: DEFAULT_FREQUENCY,
            unit: FrequencyUnit::GHz,
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.scaled(), self.unit)
    }
}
