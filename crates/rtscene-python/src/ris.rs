//! Python bindings for RIS

use nalgebra::Vector3;
use numpy::{PyArray3, PyReadonlyArray3, ToPyArray};
use pyo3::exceptions::PyRuntimeError;
use pyo3::prelude::*;
use rtscene_core::device::Device;
use rtscene_core::Ris;

use crate::antenna::value_error;
use crate::device::to_list;

fn to_vectors(points: Vec<[f64; 3]>) -> Vec<Vector3<f64>> {
    points.into_iter().map(Vector3::from).collect()
}

/// Python wrapper for a reconfigurable intelligent surface
#[pyclass(name = "RIS")]
#[derive(Clone)]
pub struct PyRis {
    inner: Ris,
}

#[pymethods]
impl PyRis {
    /// Create a RIS
    ///
    /// Args:
    ///     name: Unique name in the scene
    ///     position: [x, y, z] of the surface centre in metres
    ///     num_rows: Number of cell rows
    ///     num_cols: Number of cell columns
    ///     num_modes: Number of re-radiation modes (default: 1)
    ///     orientation: [alpha, beta, gamma] in radians
    ///     look_at: Optional point [x, y, z] the surface normal points to
    #[new]
    #[pyo3(signature = (name, position, num_rows, num_cols, num_modes=1, orientation=[0.0, 0.0, 0.0], look_at=None))]
    pub fn new(
        name: String,
        position: [f64; 3],
        num_rows: usize,
        num_cols: usize,
        num_modes: usize,
        orientation: [f64; 3],
        look_at: Option<[f64; 3]>,
    ) -> PyResult<Self> {
        let mut inner = Ris::new(
            name,
            Vector3::from(position),
            orientation,
            num_rows,
            num_cols,
            num_modes,
        )
        .map_err(value_error)?;
        if let Some(target) = look_at {
            inner.look_at(&Vector3::from(target));
        }
        Ok(Self { inner })
    }

    #[getter]
    pub fn name(&self) -> String {
        self.inner.name().to_string()
    }

    #[getter]
    pub fn position(&self) -> [f64; 3] {
        to_list(self.inner.position())
    }

    #[setter]
    pub fn set_position(&mut self, position: [f64; 3]) {
        self.inner.set_position(Vector3::from(position));
    }

    #[getter]
    pub fn orientation(&self) -> [f64; 3] {
        self.inner.orientation()
    }

    #[setter]
    pub fn set_orientation(&mut self, orientation: [f64; 3]) {
        self.inner.set_orientation(orientation);
    }

    #[getter]
    pub fn num_rows(&self) -> usize {
        self.inner.num_rows()
    }

    #[getter]
    pub fn num_cols(&self) -> usize {
        self.inner.num_cols()
    }

    #[getter]
    pub fn num_modes(&self) -> usize {
        self.inner.num_modes()
    }

    /// Wavelength the cell spacing refers to, set by the scene [m]
    #[getter]
    pub fn wavelength(&self) -> f64 {
        self.inner.wavelength()
    }

    /// (width, height) of the surface in metres
    #[getter]
    pub fn size(&self) -> (f64, f64) {
        self.inner.size()
    }

    /// Surface normal in global coordinates
    #[getter]
    pub fn world_normal(&self) -> [f64; 3] {
        to_list(self.inner.world_normal())
    }

    /// Relative power of each mode (sums to one)
    #[getter]
    pub fn mode_powers(&self) -> Vec<f64> {
        self.inner.mode_powers().to_vec()
    }

    #[setter]
    pub fn set_mode_powers(&mut self, powers: Vec<f64>) -> PyResult<()> {
        self.inner.set_mode_powers(powers).map_err(value_error)
    }

    /// Phase profile as numpy array [num_modes, num_rows, num_cols] in radians
    #[getter]
    pub fn phase_values<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray3<f64>> {
        self.inner.phase_profile().values().to_pyarray_bound(py)
    }

    #[setter]
    pub fn set_phase_values(&mut self, values: PyReadonlyArray3<'_, f64>) -> PyResult<()> {
        self.inner
            .phase_profile_mut()
            .set_values(values.as_array().to_owned())
            .map_err(value_error)
    }

    /// Amplitude profile as numpy array [num_modes, num_rows, num_cols]
    #[getter]
    pub fn amplitude_values<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray3<f64>> {
        self.inner.amplitude_profile().values().to_pyarray_bound(py)
    }

    #[setter]
    pub fn set_amplitude_values(&mut self, values: PyReadonlyArray3<'_, f64>) -> PyResult<()> {
        self.inner
            .amplitude_profile_mut()
            .set_values(values.as_array().to_owned())
            .map_err(value_error)
    }

    /// Cell centres in global coordinates, row-major
    pub fn cell_positions(&self) -> Vec<[f64; 3]> {
        self.inner
            .cell_world_positions()
            .into_iter()
            .map(to_list)
            .collect()
    }

    /// Configure each mode as an anomalous reflector
    ///
    /// Args:
    ///     sources: One [x, y, z] point per mode
    ///     targets: One [x, y, z] point per mode
    pub fn phase_gradient_reflector(
        &mut self,
        sources: Vec<[f64; 3]>,
        targets: Vec<[f64; 3]>,
    ) -> PyResult<()> {
        self.inner
            .phase_gradient_reflector(&to_vectors(sources), &to_vectors(targets))
            .map_err(|e| PyRuntimeError::new_err(format!("Profile synthesis failed: {}", e)))
    }

    /// Configure each mode as a focusing lens
    ///
    /// Args:
    ///     sources: One [x, y, z] point per mode
    ///     targets: One [x, y, z] point per mode
    pub fn focusing_lens(&mut self, sources: Vec<[f64; 3]>, targets: Vec<[f64; 3]>) -> PyResult<()> {
        self.inner
            .focusing_lens(&to_vectors(sources), &to_vectors(targets))
            .map_err(|e| PyRuntimeError::new_err(format!("Profile synthesis failed: {}", e)))
    }

    /// Direction of the wave re-radiated by `mode` at a global point
    ///
    /// Returns None when the re-radiated wave is evanescent.
    pub fn reradiated_direction(
        &self,
        mode: usize,
        point: [f64; 3],
        k_i: [f64; 3],
    ) -> PyResult<Option<[f64; 3]>> {
        let k_r = self
            .inner
            .reradiated_direction(mode, &Vector3::from(point), &Vector3::from(k_i))
            .map_err(value_error)?;
        Ok(k_r.map(to_list))
    }

    fn __repr__(&self) -> String {
        format!(
            "RIS('{}', {}x{} cells, {} modes)",
            self.inner.name(),
            self.inner.num_rows(),
            self.inner.num_cols(),
            self.inner.num_modes()
        )
    }
}

impl PyRis {
    pub fn inner(&self) -> &Ris {
        &self.inner
    }

    pub fn from_ris(ris: Ris) -> Self {
        Self { inner: ris }
    }
}
