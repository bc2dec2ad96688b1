//! Reconfigurable intelligent surface
//!
//! The surface lies in the local y-z plane of the device and re-radiates
//! towards its local +x half-space. Cells are spaced by half a wavelength of
//! the scene carrier, so the physical size follows the scene frequency.

use std::f64::consts::PI;

use anyhow::{bail, Result};
use log::debug;
use nalgebra::Vector3;
use ndarray::Array3;

use super::cell_grid::CellGrid;
use super::profile::{DiscreteAmplitudeProfile, DiscretePhaseProfile};
use super::RisError;
use crate::constants::{DEFAULT_FREQUENCY, DEFAULT_RIS_CELL_SPACING, NEAR_ZERO, SPEED_OF_LIGHT};
use crate::device::{Device, RadioDevice};
use crate::math::{rotate, to_local, Orientation};

/// A reconfigurable intelligent surface
#[derive(Debug, Clone)]
pub struct Ris {
    device: RadioDevice,
    grid: CellGrid,
    mode_powers: Vec<f64>,
    phase_profile: DiscretePhaseProfile,
    amplitude_profile: DiscreteAmplitudeProfile,
    wavelength: f64,
}

impl Ris {
    /// Create a RIS with zero phase, unit amplitude and equal mode powers
    ///
    /// # Example
    /// ```
    /// use nalgebra::Vector3;
    /// use rtscene_core::ris::Ris;
    ///
    /// let ris = Ris::new("ris", Vector3::new(32.0, -10.0, 3.0), [0.0; 3], 10, 20, 1).unwrap();
    /// assert_eq!(ris.cell_world_positions().len(), 200);
    /// ```
    pub fn new(
        name: impl Into<String>,
        position: Vector3<f64>,
        orientation: Orientation,
        num_rows: usize,
        num_cols: usize,
        num_modes: usize,
    ) -> Result<Self, RisError> {
        let grid = CellGrid::new(num_rows, num_cols)?;
        if num_modes == 0 {
            return Err(RisError::NoModes);
        }

        let mut device = RadioDevice::new(name, position, orientation);
        device.color = [0.678, 0.184, 0.482];

        Ok(Self {
            device,
            grid,
            mode_powers: vec![1.0 / num_modes as f64; num_modes],
            phase_profile: DiscretePhaseProfile::new(grid, num_modes),
            amplitude_profile: DiscreteAmplitudeProfile::new(grid, num_modes),
            wavelength: SPEED_OF_LIGHT / DEFAULT_FREQUENCY,
        })
    }

    #[inline]
    pub fn num_rows(&self) -> usize {
        self.grid.num_rows()
    }

    #[inline]
    pub fn num_cols(&self) -> usize {
        self.grid.num_cols()
    }

    #[inline]
    pub fn num_modes(&self) -> usize {
        self.mode_powers.len()
    }

    #[inline]
    pub fn cell_grid(&self) -> &CellGrid {
        &self.grid
    }

    /// Wavelength the cell spacing refers to [m]
    #[inline]
    pub fn wavelength(&self) -> f64 {
        self.wavelength
    }

    pub fn set_wavelength(&mut self, wavelength: f64) -> Result<(), RisError> {
        if !wavelength.is_finite() || wavelength <= 0.0 {
            return Err(RisError::InvalidWavelength(wavelength));
        }
        debug!("RIS '{}' wavelength set to {} m", self.name(), wavelength);
        self.wavelength = wavelength;
        Ok(())
    }

    /// Distance between neighbouring cell centres [m]
    #[inline]
    pub fn cell_spacing(&self) -> f64 {
        DEFAULT_RIS_CELL_SPACING * self.wavelength
    }

    /// Free-space wavenumber [rad/m]
    #[inline]
    pub fn wavenumber(&self) -> f64 {
        2.0 * PI / self.wavelength
    }

    /// Width and height of the surface [m]
    pub fn size(&self) -> (f64, f64) {
        let d = self.cell_spacing();
        (self.num_cols() as f64 * d, self.num_rows() as f64 * d)
    }

    /// Relative power of every re-radiation mode (sums to one)
    pub fn mode_powers(&self) -> &[f64] {
        &self.mode_powers
    }

    /// Set the mode powers; they are normalized to sum to one
    pub fn set_mode_powers(&mut self, powers: Vec<f64>) -> Result<(), RisError> {
        if powers.len() != self.num_modes() {
            return Err(RisError::InvalidModePowers(format!(
                "expected {} values, got {}",
                self.num_modes(),
                powers.len()
            )));
        }
        if powers.iter().any(|p| !p.is_finite() || *p < 0.0) {
            return Err(RisError::InvalidModePowers(
                "values must be non-negative and finite".to_string(),
            ));
        }
        let total: f64 = powers.iter().sum();
        if total < NEAR_ZERO {
            return Err(RisError::InvalidModePowers(
                "at least one mode needs positive power".to_string(),
            ));
        }
        self.mode_powers = powers.into_iter().map(|p| p / total).collect();
        Ok(())
    }

    pub fn phase_profile(&self) -> &DiscretePhaseProfile {
        &self.phase_profile
    }

    pub fn phase_profile_mut(&mut self) -> &mut DiscretePhaseProfile {
        &mut self.phase_profile
    }

    pub fn amplitude_profile(&self) -> &DiscreteAmplitudeProfile {
        &self.amplitude_profile
    }

    pub fn amplitude_profile_mut(&mut self) -> &mut DiscreteAmplitudeProfile {
        &mut self.amplitude_profile
    }

    /// Cell centres in the local y-z plane [m], row-major
    pub fn cell_local_positions(&self) -> Vec<[f64; 2]> {
        let d = self.cell_spacing();
        self.grid
            .cell_positions()
            .into_iter()
            .map(|[y, z]| [y * d, z * d])
            .collect()
    }

    /// Cell centres in global coordinates [m], row-major
    pub fn cell_world_positions(&self) -> Vec<Vector3<f64>> {
        let position = self.position();
        let orientation = self.orientation();
        self.cell_local_positions()
            .into_iter()
            .map(|[y, z]| rotate(&Vector3::new(0.0, y, z), orientation) + position)
            .collect()
    }

    /// Surface normal (rotated local x-axis) in global coordinates
    pub fn world_normal(&self) -> Vector3<f64> {
        rotate(&Vector3::x(), self.orientation())
    }

    /// Local `(y, z)` coordinates of a global point projected onto the surface
    pub fn to_surface_coordinates(&self, point: &Vector3<f64>) -> [f64; 2] {
        let local = to_local(&(point - self.position()), self.orientation());
        [local.y, local.z]
    }

    /// Configure every mode as an anomalous reflector
    ///
    /// Mode `m` re-radiates a plane wave coming from `sources[m]` towards
    /// `targets[m]`. Directions are taken from the surface centre (far-field
    /// assumption), so the resulting phase profile is linear. Amplitudes are
    /// set to one.
    pub fn phase_gradient_reflector(
        &mut self,
        sources: &[Vector3<f64>],
        targets: &[Vector3<f64>],
    ) -> Result<()> {
        self.check_endpoints(sources, targets)?;

        let k0 = self.wavenumber();
        let centre = self.position();
        let offsets: Vec<Vector3<f64>> = self
            .cell_world_positions()
            .into_iter()
            .map(|p| p - centre)
            .collect();

        let mut phases = Array3::<f64>::zeros(self.profile_shape());
        for (m, (source, target)) in sources.iter().zip(targets).enumerate() {
            let k_i = unit_direction(source, &centre)?;
            let k_r = unit_direction(&centre, target)?;
            let dk = (k_i - k_r) * k0;
            for (c, offset) in offsets.iter().enumerate() {
                phases[[m, c / self.num_cols(), c % self.num_cols()]] = dk.dot(offset);
            }
        }

        self.apply_synthesized(phases)
    }

    /// Configure every mode as a focusing lens
    ///
    /// Mode `m` focuses the spherical wave emitted at `sources[m]` onto
    /// `targets[m]`: the phase of each cell compensates the length of the
    /// path source → cell → target. Amplitudes are set to one.
    pub fn focusing_lens(&mut self, sources: &[Vector3<f64>], targets: &[Vector3<f64>]) -> Result<()> {
        self.check_endpoints(sources, targets)?;

        let k0 = self.wavenumber();
        let cells = self.cell_world_positions();

        let mut phases = Array3::<f64>::zeros(self.profile_shape());
        for (m, (source, target)) in sources.iter().zip(targets).enumerate() {
            for (c, cell) in cells.iter().enumerate() {
                let path = (cell - source).norm() + (target - cell).norm();
                phases[[m, c / self.num_cols(), c % self.num_cols()]] = k0 * path;
            }
        }

        self.apply_synthesized(phases)
    }

    /// Direction into which `mode` re-radiates a wave travelling along `k_i`
    /// that hits the surface at the global `point`
    ///
    /// The tangential wave vector is shifted by the phase gradient,
    /// `k_r,t = k_i,t - ∇φ / k₀`, and the normal component is reflected.
    /// Returns None when the re-radiated wave would be evanescent.
    pub fn reradiated_direction(
        &self,
        mode: usize,
        point: &Vector3<f64>,
        k_i: &Vector3<f64>,
    ) -> Result<Option<Vector3<f64>>, RisError> {
        let local = self.to_surface_coordinates(point);
        let sample = self.phase_profile.sample(mode, self.cell_spacing(), local)?;

        let n = self.world_normal();
        let k_i = k_i.normalize();
        let grad = rotate(
            &Vector3::new(0.0, sample.gradient[0], sample.gradient[1]),
            self.orientation(),
        );

        let cos_i = k_i.dot(&n);
        let k_t = (k_i - n * cos_i) - grad / self.wavenumber();
        let t2 = k_t.norm_squared();
        if t2 > 1.0 {
            return Ok(None);
        }

        // Re-radiate back into the half-space the wave came from
        let side = if cos_i > 0.0 { -1.0 } else { 1.0 };
        Ok(Some(k_t + n * (side * (1.0 - t2).sqrt())))
    }

    fn profile_shape(&self) -> (usize, usize, usize) {
        (self.num_modes(), self.num_rows(), self.num_cols())
    }

    fn check_endpoints(&self, sources: &[Vector3<f64>], targets: &[Vector3<f64>]) -> Result<()> {
        if sources.len() != self.num_modes() || targets.len() != self.num_modes() {
            bail!(
                "Expected one source and one target per mode ({}), got {} sources and {} targets",
                self.num_modes(),
                sources.len(),
                targets.len()
            );
        }
        Ok(())
    }

    fn apply_synthesized(&mut self, phases: Array3<f64>) -> Result<()> {
        let shape = self.profile_shape();
        self.phase_profile.set_values(phases)?;
        self.amplitude_profile.set_values(Array3::ones(shape))?;
        debug!(
            "RIS '{}' profiles synthesized for {} modes",
            self.name(),
            self.num_modes()
        );
        Ok(())
    }
}

impl Device for Ris {
    fn radio_device(&self) -> &RadioDevice {
        &self.device
    }

    fn radio_device_mut(&mut self) -> &mut RadioDevice {
        &mut self.device
    }
}

/// Unit vector pointing from `from` to `to`
fn unit_direction(from: &Vector3<f64>, to: &Vector3<f64>) -> Result<Vector3<f64>> {
    let d = to - from;
    let r = d.norm();
    if r < NEAR_ZERO {
        bail!("Source or target coincides with the RIS position");
    }
    Ok(d / r)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn test_ris(num_modes: usize) -> Ris {
        // Facing -y, so that sources and targets live in the y < 0 half-space
        Ris::new(
            "ris",
            Vector3::new(0.0, 0.0, 2.0),
            [-std::f64::consts::FRAC_PI_2, 0.0, 0.0],
            8,
            10,
            num_modes,
        )
        .unwrap()
    }

    #[test]
    fn test_geometry() {
        let ris = test_ris(1);
        let d = ris.cell_spacing();
        let (w, h) = ris.size();
        assert_relative_eq!(w, 10.0 * d, epsilon = 1e-12);
        assert_relative_eq!(h, 8.0 * d, epsilon = 1e-12);

        let n = ris.world_normal();
        assert_relative_eq!(n.y, -1.0, epsilon = 1e-12);

        // All cells lie in the surface plane
        for p in ris.cell_world_positions() {
            assert_relative_eq!((p - ris.position()).dot(&n), 0.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_mode_powers_normalized() {
        let mut ris = test_ris(2);
        assert_eq!(ris.mode_powers(), &[0.5, 0.5]);

        ris.set_mode_powers(vec![3.0, 1.0]).unwrap();
        assert_relative_eq!(ris.mode_powers()[0], 0.75, epsilon = 1e-12);

        assert!(ris.set_mode_powers(vec![1.0]).is_err());
        assert!(ris.set_mode_powers(vec![0.0, 0.0]).is_err());
        assert!(ris.set_mode_powers(vec![-1.0, 2.0]).is_err());
    }

    #[test]
    fn test_rejects_no_modes() {
        assert_eq!(
            Ris::new("ris", Vector3::zeros(), [0.0; 3], 2, 2, 0).unwrap_err(),
            RisError::NoModes
        );
    }

    #[test]
    fn test_phase_gradient_reflector_steers_to_target() {
        let mut ris = test_ris(1);
        let source = Vector3::new(-30.0, -40.0, 2.0);
        let target = Vector3::new(25.0, -35.0, 6.0);
        ris.phase_gradient_reflector(&[source], &[target]).unwrap();

        let centre = ris.position();
        let k_i = (centre - source).normalize();
        let k_r = ris.reradiated_direction(0, &centre, &k_i).unwrap().unwrap();
        let expected = (target - centre).normalize();
        assert_relative_eq!((k_r - expected).norm(), 0.0, epsilon = 1e-9);

        assert!(ris.amplitude_profile().values().iter().all(|&a| a == 1.0));
    }

    #[test]
    fn test_zero_phase_is_specular() {
        let ris = test_ris(1);
        let k_i = Vector3::new(0.6, -0.8, 0.0);
        let k_r = ris
            .reradiated_direction(0, &ris.position(), &(-k_i))
            .unwrap()
            .unwrap();
        // Incident travelling +y-ish into a surface facing -y reflects back
        assert_relative_eq!(k_r.x, -0.6, epsilon = 1e-12);
        assert_relative_eq!(k_r.y, -0.8, epsilon = 1e-12);
    }

    #[test]
    fn test_non_finite_hit_point() {
        let ris = test_ris(1);
        let point = Vector3::new(f64::NAN, 0.0, 2.0);
        assert!(matches!(
            ris.reradiated_direction(0, &point, &Vector3::new(0.0, 1.0, 0.0)),
            Err(RisError::NonFinitePoint(_))
        ));
    }

    #[test]
    fn test_focusing_lens_phases() {
        let mut ris = test_ris(1);
        let source = Vector3::new(-3.0, -5.0, 1.0);
        let target = Vector3::new(4.0, -6.0, 1.5);
        ris.focusing_lens(&[source], &[target]).unwrap();

        let k0 = ris.wavenumber();
        let cells = ris.cell_world_positions();
        let values = ris.phase_profile().values();
        for (c, cell) in cells.iter().enumerate() {
            let expected = k0 * ((cell - source).norm() + (target - cell).norm());
            assert_relative_eq!(values[[0, c / 10, c % 10]], expected, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_synthesis_checks_mode_count() {
        let mut ris = test_ris(2);
        let p = Vector3::new(0.0, -1.0, 0.0);
        assert!(ris.phase_gradient_reflector(&[p], &[p]).is_err());
        assert!(ris.focusing_lens(&[p, p], &[p]).is_err());
    }

    #[test]
    fn test_wavelength_scales_size() {
        let mut ris = test_ris(1);
        let (w0, _) = ris.size();
        ris.set_wavelength(ris.wavelength() / 2.0).unwrap();
        let (w1, _) = ris.size();
        assert_relative_eq!(w1, w0 / 2.0, epsilon = 1e-12);
        assert!(ris.set_wavelength(0.0).is_err());
    }
}
