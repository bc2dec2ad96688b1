//! Python bindings for PlanarArray

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use rtscene_core::antenna::{AntennaArray, PlanarArray, PolarizationModel};

/// Python wrapper for PlanarArray
#[pyclass(name = "PlanarArray")]
#[derive(Clone)]
pub struct PyPlanarArray {
    inner: AntennaArray,
}

#[pymethods]
impl PyPlanarArray {
    /// Create a planar antenna array
    ///
    /// Args:
    ///     num_rows: Number of rows
    ///     num_cols: Number of columns
    ///     vertical_spacing: Row spacing in wavelengths
    ///     horizontal_spacing: Column spacing in wavelengths
    ///     pattern: 'iso', 'dipole', 'hw_dipole' or 'tr38901'
    ///     polarization: 'V', 'H', 'VH' or 'cross'
    ///     polarization_model: 1 or 2
    #[new]
    #[pyo3(signature = (
        num_rows=1,
        num_cols=1,
        vertical_spacing=0.5,
        horizontal_spacing=0.5,
        pattern="iso",
        polarization="V",
        polarization_model=2
    ))]
    pub fn new(
        num_rows: usize,
        num_cols: usize,
        vertical_spacing: f64,
        horizontal_spacing: f64,
        pattern: &str,
        polarization: &str,
        polarization_model: u8,
    ) -> PyResult<Self> {
        let config = PlanarArray {
            num_rows,
            num_cols,
            vertical_spacing,
            horizontal_spacing,
            pattern: pattern.parse().map_err(value_error)?,
            polarization: polarization.parse().map_err(value_error)?,
            polarization_model: PolarizationModel::try_from(polarization_model)
                .map_err(value_error)?,
        };
        let inner = config.build().map_err(value_error)?;
        Ok(Self { inner })
    }

    /// Number of antenna ports (elements times polarization directions)
    #[getter]
    pub fn num_ant(&self) -> usize {
        self.inner.num_ant()
    }

    /// Number of antenna elements
    #[getter]
    pub fn array_size(&self) -> usize {
        self.inner.array_size()
    }

    /// Number of rows, None for arrays with explicit element positions
    #[getter]
    pub fn num_rows(&self) -> Option<usize> {
        self.inner.planar().map(|p| p.num_rows)
    }

    /// Number of columns, None for arrays with explicit element positions
    #[getter]
    pub fn num_cols(&self) -> Option<usize> {
        self.inner.planar().map(|p| p.num_cols)
    }

    /// Row spacing in wavelengths, None for arrays with explicit element positions
    #[getter]
    pub fn vertical_spacing(&self) -> Option<f64> {
        self.inner.planar().map(|p| p.vertical_spacing)
    }

    /// Column spacing in wavelengths, None for arrays with explicit element positions
    #[getter]
    pub fn horizontal_spacing(&self) -> Option<f64> {
        self.inner.planar().map(|p| p.horizontal_spacing)
    }

    #[getter]
    pub fn pattern(&self) -> String {
        self.inner.antenna().pattern.to_string()
    }

    #[getter]
    pub fn polarization(&self) -> String {
        self.inner.antenna().polarization.to_string()
    }

    /// Element positions in metres for the given wavelength
    pub fn positions(&self, wavelength: f64) -> Vec<[f64; 3]> {
        self.inner
            .positions(wavelength)
            .iter()
            .map(|p| [p.x, p.y, p.z])
            .collect()
    }

    fn __repr__(&self) -> String {
        let antenna = self.inner.antenna();
        match self.inner.planar() {
            Some(p) => format!(
                "PlanarArray({}x{}, pattern='{}', polarization='{}')",
                p.num_rows, p.num_cols, antenna.pattern, antenna.polarization
            ),
            None => format!(
                "PlanarArray({} elements, pattern='{}', polarization='{}')",
                self.inner.array_size(),
                antenna.pattern,
                antenna.polarization
            ),
        }
    }
}

impl PyPlanarArray {
    /// Get the inner AntennaArray reference (for internal use)
    pub fn inner(&self) -> &AntennaArray {
        &self.inner
    }

    /// Wrap an existing array
    pub fn from_array(array: AntennaArray) -> Self {
        Self { inner: array }
    }
}

/// Map any core error onto a Python ValueError
pub(crate) fn value_error(e: impl std::fmt::Display) -> PyErr {
    PyValueError::new_err(e.to_string())
}
