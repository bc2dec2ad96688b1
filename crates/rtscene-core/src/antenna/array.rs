//! Antenna arrays
//!
//! An array places copies of one antenna at positions given in units of
//! the wavelength, so that the same array description scales with the
//! carrier frequency of the scene.

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use super::pattern::{Antenna, AntennaPattern, Polarization, PolarizationModel};
use super::AntennaError;
use crate::math::{rotate, Orientation};

/// An antenna array with arbitrary element positions
#[derive(Debug, Clone, PartialEq)]
pub struct AntennaArray {
    antenna: Antenna,
    /// Element positions in the local frame [wavelengths]
    positions: Vec<Vector3<f64>>,
    /// Set when the array was built from a planar configuration
    planar: Option<PlanarArray>,
}

impl AntennaArray {
    /// Create an array from element positions in wavelengths
    pub fn new(antenna: Antenna, positions: Vec<Vector3<f64>>) -> Result<Self, AntennaError> {
        if positions.is_empty() {
            return Err(AntennaError::EmptyArray);
        }
        Ok(Self {
            antenna,
            positions,
            planar: None,
        })
    }

    /// Planar configuration the array was built from, if any
    #[inline]
    pub fn planar(&self) -> Option<&PlanarArray> {
        self.planar.as_ref()
    }

    /// Antenna used by every element
    #[inline]
    pub fn antenna(&self) -> &Antenna {
        &self.antenna
    }

    /// Number of element locations
    #[inline]
    pub fn array_size(&self) -> usize {
        self.positions.len()
    }

    /// Number of antenna ports (locations × polarization directions)
    #[inline]
    pub fn num_ant(&self) -> usize {
        self.positions.len() * self.antenna.num_directions()
    }

    /// Element positions in wavelengths
    pub fn normalized_positions(&self) -> &[Vector3<f64>] {
        &self.positions
    }

    /// Element positions in metres for the given wavelength
    pub fn positions(&self, wavelength: f64) -> Vec<Vector3<f64>> {
        self.positions.iter().map(|p| p * wavelength).collect()
    }

    /// Element positions in metres after rotating the array by `orientation`
    pub fn rotated_positions(&self, wavelength: f64, orientation: Orientation) -> Vec<Vector3<f64>> {
        self.positions
            .iter()
            .map(|p| rotate(&(p * wavelength), orientation))
            .collect()
    }

    /// Position of every antenna port in metres, rotated by `orientation`
    ///
    /// Ports are ordered by element first, then by polarization direction.
    pub fn port_positions(&self, wavelength: f64, orientation: Orientation) -> Vec<Vector3<f64>> {
        let dirs = self.antenna.num_directions();
        self.rotated_positions(wavelength, orientation)
            .into_iter()
            .flat_map(|p| std::iter::repeat(p).take(dirs))
            .collect()
    }
}

/// Configuration of a uniform planar array in the local y-z plane
///
/// Rows run down the z-axis, columns along the y-axis, and the panel is
/// centred on the origin. Spacings are in wavelengths.
///
/// # Example
/// ```
/// use rtscene_core::antenna::{AntennaPattern, PlanarArray, Polarization};
///
/// let array = PlanarArray {
///     num_rows: 2,
///     num_cols: 4,
///     pattern: AntennaPattern::Tr38901,
///     polarization: Polarization::Cross,
///     ..Default::default()
/// }
/// .build()
/// .unwrap();
/// assert_eq!(array.num_ant(), 16);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlanarArray {
    pub num_rows: usize,
    pub num_cols: usize,
    pub vertical_spacing: f64,
    pub horizontal_spacing: f64,
    pub pattern: AntennaPattern,
    pub polarization: Polarization,
    pub polarization_model: PolarizationModel,
}

impl Default for PlanarArray {
    fn default() -> Self {
        Self {
            num_rows: 1,
            num_cols: 1,
            vertical_spacing: 0.5,
            horizontal_spacing: 0.5,
            pattern: AntennaPattern::Iso,
            polarization: Polarization::V,
            polarization_model: PolarizationModel::Two,
        }
    }
}

impl PlanarArray {
    /// Build the antenna array described by this configuration
    pub fn build(&self) -> Result<AntennaArray, AntennaError> {
        if self.num_rows == 0 || self.num_cols == 0 {
            return Err(AntennaError::InvalidDimensions {
                rows: self.num_rows,
                cols: self.num_cols,
            });
        }
        for spacing in [self.vertical_spacing, self.horizontal_spacing] {
            if !spacing.is_finite() || spacing <= 0.0 {
                return Err(AntennaError::InvalidSpacing(spacing));
            }
        }

        let d_v = self.vertical_spacing;
        let d_h = self.horizontal_spacing;
        let offset = Vector3::new(
            0.0,
            -((self.num_cols - 1) as f64) * d_h / 2.0,
            ((self.num_rows - 1) as f64) * d_v / 2.0,
        );

        // Column-major ordering: element (i, j) has index i + j * num_rows
        let positions = (0..self.num_cols)
            .flat_map(|j| {
                (0..self.num_rows)
                    .map(move |i| Vector3::new(0.0, j as f64 * d_h, -(i as f64) * d_v) + offset)
            })
            .collect();

        let antenna = Antenna::new(self.pattern, self.polarization, self.polarization_model);
        let mut array = AntennaArray::new(antenna, positions)?;
        array.planar = Some(*self);
        Ok(array)
    }
}
