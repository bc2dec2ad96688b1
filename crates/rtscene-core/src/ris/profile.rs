//! Discrete phase and amplitude profiles
//!
//! A discrete profile stores one value per cell and mode in an array of
//! shape `[num_modes, num_rows, num_cols]` and delegates evaluation between
//! cell centres to a `ProfileInterpolator`.

use std::ops::Deref;
use std::sync::Arc;

use ndarray::{Array3, ArrayView2, Axis};

use super::cell_grid::CellGrid;
use super::interpolator::{LagrangeProfileInterpolator, ProfileInterpolator, ProfileSample};
use super::RisError;

/// Per-cell values of a profile for every re-radiation mode
#[derive(Debug, Clone)]
pub struct DiscreteProfile {
    grid: CellGrid,
    values: Array3<f64>,
    interpolator: Arc<dyn ProfileInterpolator>,
}

impl DiscreteProfile {
    /// Create a profile filled with `fill` using the Lagrange interpolator
    pub fn new(grid: CellGrid, num_modes: usize, fill: f64) -> Self {
        Self {
            grid,
            values: Array3::from_elem((num_modes, grid.num_rows(), grid.num_cols()), fill),
            interpolator: Arc::new(LagrangeProfileInterpolator),
        }
    }

    /// Replace the interpolator
    pub fn with_interpolator(mut self, interpolator: Arc<dyn ProfileInterpolator>) -> Self {
        self.interpolator = interpolator;
        self
    }

    #[inline]
    pub fn grid(&self) -> &CellGrid {
        &self.grid
    }

    #[inline]
    pub fn num_modes(&self) -> usize {
        self.values.shape()[0]
    }

    /// Values `[num_modes, num_rows, num_cols]`
    #[inline]
    pub fn values(&self) -> &Array3<f64> {
        &self.values
    }

    /// Values of one mode `[num_rows, num_cols]`
    pub fn mode_values(&self, mode: usize) -> Result<ArrayView2<'_, f64>, RisError> {
        self.check_mode(mode)?;
        Ok(self.values.index_axis(Axis(0), mode))
    }

    /// Replace all values; the shape must not change
    pub fn set_values(&mut self, values: Array3<f64>) -> Result<(), RisError> {
        let expected = [self.num_modes(), self.grid.num_rows(), self.grid.num_cols()];
        if values.shape() != expected {
            return Err(RisError::ShapeMismatch {
                expected,
                found: values.shape().to_vec(),
            });
        }
        self.values = values;
        Ok(())
    }

    /// Value, gradient and Hessian of `mode` at a local point `(y, z)` [m]
    pub fn sample(&self, mode: usize, spacing: f64, point: [f64; 2]) -> Result<ProfileSample, RisError> {
        let values = self.mode_values(mode)?;
        check_point(point)?;
        Ok(self.interpolator.interpolate(values, &self.grid, spacing, point))
    }

    /// Profile values of `mode` at local points
    pub fn evaluate(&self, mode: usize, spacing: f64, points: &[[f64; 2]]) -> Result<Vec<f64>, RisError> {
        let values = self.mode_values(mode)?;
        points.iter().try_for_each(|&p| check_point(p))?;
        Ok(points
            .iter()
            .map(|&p| self.interpolator.interpolate(values, &self.grid, spacing, p).value)
            .collect())
    }

    /// Spatial gradients `[∂/∂y, ∂/∂z]` of `mode` at local points
    pub fn spatial_gradient(
        &self,
        mode: usize,
        spacing: f64,
        points: &[[f64; 2]],
    ) -> Result<Vec<[f64; 2]>, RisError> {
        let values = self.mode_values(mode)?;
        points.iter().try_for_each(|&p| check_point(p))?;
        Ok(points
            .iter()
            .map(|&p| self.interpolator.interpolate(values, &self.grid, spacing, p).gradient)
            .collect())
    }

    fn check_mode(&self, mode: usize) -> Result<(), RisError> {
        if mode >= self.num_modes() {
            return Err(RisError::InvalidMode {
                mode,
                num_modes: self.num_modes(),
            });
        }
        Ok(())
    }
}

fn check_point(point: [f64; 2]) -> Result<(), RisError> {
    if point.iter().all(|c| c.is_finite()) {
        Ok(())
    } else {
        Err(RisError::NonFinitePoint(point))
    }
}

/// Phase profile [rad], zero by default
#[derive(Debug, Clone)]
pub struct DiscretePhaseProfile(DiscreteProfile);

impl DiscretePhaseProfile {
    pub fn new(grid: CellGrid, num_modes: usize) -> Self {
        Self(DiscreteProfile::new(grid, num_modes, 0.0))
    }

    pub fn with_interpolator(self, interpolator: Arc<dyn ProfileInterpolator>) -> Self {
        Self(self.0.with_interpolator(interpolator))
    }

    pub fn set_values(&mut self, values: Array3<f64>) -> Result<(), RisError> {
        self.0.set_values(values)
    }
}

impl Deref for DiscretePhaseProfile {
    type Target = DiscreteProfile;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Amplitude profile, one by default; values must be non-negative
#[derive(Debug, Clone)]
pub struct DiscreteAmplitudeProfile(DiscreteProfile);

impl DiscreteAmplitudeProfile {
    pub fn new(grid: CellGrid, num_modes: usize) -> Self {
        Self(DiscreteProfile::new(grid, num_modes, 1.0))
    }

    pub fn with_interpolator(self, interpolator: Arc<dyn ProfileInterpolator>) -> Self {
        Self(self.0.with_interpolator(interpolator))
    }

    pub fn set_values(&mut self, values: Array3<f64>) -> Result<(), RisError> {
        if values.iter().any(|v| !v.is_finite() || *v < 0.0) {
            return Err(RisError::InvalidAmplitude);
        }
        self.0.set_values(values)
    }
}

impl Deref for DiscreteAmplitudeProfile {
    type Target = DiscreteProfile;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
