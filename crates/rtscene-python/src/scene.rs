//! Python bindings for Scene

use nalgebra::Vector3;
use num_complex::Complex64;
use numpy::{PyArray2, PyArray4, ToPyArray};
use pyo3::exceptions::{PyIOError, PyIndexError, PyKeyError, PyTypeError};
use pyo3::prelude::*;
use rtscene_core::device::Device;
use rtscene_core::frequency::Frequency;
use rtscene_core::scene::{LosPaths, SceneError, SceneItem};
use rtscene_core::Scene;

use crate::antenna::{value_error, PyPlanarArray};
use crate::device::{PyReceiver, PyTransmitter};
use crate::ris::PyRis;

fn scene_error(e: SceneError) -> PyErr {
    match e {
        SceneError::UnknownItem(name) => PyKeyError::new_err(name),
        SceneError::Io(e) => PyIOError::new_err(e.to_string()),
        e => value_error(e),
    }
}

/// Python wrapper for Scene
#[pyclass(name = "Scene")]
pub struct PyScene {
    inner: Scene,
}

#[pymethods]
impl PyScene {
    /// Create an empty scene
    ///
    /// Args:
    ///     frequency: Carrier frequency in Hz (default: 3.5e9)
    ///     synthetic_array: Model antenna arrays by phase shifts (default: True)
    #[new]
    #[pyo3(signature = (frequency=None, synthetic_array=true))]
    pub fn new(frequency: Option<f64>, synthetic_array: bool) -> PyResult<Self> {
        let mut inner = match frequency {
            Some(hz) => Scene::with_frequency(Frequency::from_hz(hz).map_err(value_error)?),
            None => Scene::new(),
        };
        inner.synthetic_array = synthetic_array;
        Ok(Self { inner })
    }

    /// Load a scene from a JSON description file
    #[staticmethod]
    pub fn from_file(path: &str) -> PyResult<Self> {
        Scene::from_file(path)
            .map(|inner| Self { inner })
            .map_err(scene_error)
    }

    /// Load a scene from a JSON description string
    #[staticmethod]
    pub fn from_json(content: &str) -> PyResult<Self> {
        Scene::from_json_str(content)
            .map(|inner| Self { inner })
            .map_err(scene_error)
    }

    /// Serialize the scene to a JSON description
    pub fn to_json(&self) -> PyResult<String> {
        self.inner.to_json().map_err(scene_error)
    }

    /// Carrier frequency in Hz
    #[getter]
    pub fn frequency(&self) -> f64 {
        self.inner.frequency().hz()
    }

    #[setter]
    pub fn set_frequency(&mut self, hz: f64) -> PyResult<()> {
        let frequency = Frequency::from_hz(hz).map_err(value_error)?;
        self.inner.set_frequency(frequency).map_err(scene_error)
    }

    /// Wavelength in metres
    #[getter]
    pub fn wavelength(&self) -> f64 {
        self.inner.wavelength()
    }

    #[getter]
    pub fn synthetic_array(&self) -> bool {
        self.inner.synthetic_array
    }

    #[setter]
    pub fn set_synthetic_array(&mut self, value: bool) {
        self.inner.synthetic_array = value;
    }

    #[getter]
    pub fn tx_array(&self) -> Option<PyPlanarArray> {
        self.inner.tx_array.clone().map(PyPlanarArray::from_array)
    }

    #[setter]
    pub fn set_tx_array(&mut self, array: Option<PyPlanarArray>) {
        self.inner.tx_array = array.map(|a| a.inner().clone());
    }

    #[getter]
    pub fn rx_array(&self) -> Option<PyPlanarArray> {
        self.inner.rx_array.clone().map(PyPlanarArray::from_array)
    }

    #[setter]
    pub fn set_rx_array(&mut self, array: Option<PyPlanarArray>) {
        self.inner.rx_array = array.map(|a| a.inner().clone());
    }

    /// Add a Transmitter, Receiver or RIS
    ///
    /// The scene stores a copy; the name must not be used by another item.
    pub fn add(&mut self, item: &Bound<'_, PyAny>) -> PyResult<()> {
        let item = if let Ok(tx) = item.extract::<PyRef<PyTransmitter>>() {
            SceneItem::from(tx.inner().clone())
        } else if let Ok(rx) = item.extract::<PyRef<PyReceiver>>() {
            SceneItem::from(rx.inner().clone())
        } else if let Ok(ris) = item.extract::<PyRef<PyRis>>() {
            SceneItem::from(ris.inner().clone())
        } else {
            return Err(PyTypeError::new_err(
                "Expected a Transmitter, Receiver or RIS",
            ));
        };
        self.inner.add(item).map_err(scene_error)
    }

    /// Remove the item with the given name and return it
    pub fn remove(&mut self, py: Python<'_>, name: &str) -> PyResult<PyObject> {
        let item = self.inner.remove(name).map_err(scene_error)?;
        item_to_py(py, item)
    }

    /// Return a copy of the item with the given name, or None
    pub fn get(&self, py: Python<'_>, name: &str) -> PyResult<Option<PyObject>> {
        let item = if let Some(tx) = self.inner.transmitter(name) {
            SceneItem::from(tx.clone())
        } else if let Some(rx) = self.inner.receiver(name) {
            SceneItem::from(rx.clone())
        } else if let Some(ris) = self.inner.ris_by_name(name) {
            SceneItem::from(ris.clone())
        } else {
            return Ok(None);
        };
        item_to_py(py, item).map(Some)
    }

    /// Names of all transmitters
    #[getter]
    pub fn transmitters(&self) -> Vec<String> {
        self.inner
            .transmitters()
            .iter()
            .map(|d| d.name().to_string())
            .collect()
    }

    /// Names of all receivers
    #[getter]
    pub fn receivers(&self) -> Vec<String> {
        self.inner
            .receivers()
            .iter()
            .map(|d| d.name().to_string())
            .collect()
    }

    /// Names of all RIS
    #[getter]
    pub fn ris(&self) -> Vec<String> {
        self.inner
            .ris()
            .iter()
            .map(|d| d.name().to_string())
            .collect()
    }

    /// Move the item with the given name
    pub fn set_position(&mut self, name: &str, position: [f64; 3]) -> PyResult<()> {
        let device = self
            .inner
            .get_mut(name)
            .ok_or_else(|| PyKeyError::new_err(name.to_string()))?;
        device.set_position(Vector3::from(position));
        Ok(())
    }

    /// Orient the item `name` towards the item `target`
    pub fn look_at(&mut self, name: &str, target: &str) -> PyResult<()> {
        self.inner.look_at(name, target).map_err(scene_error)
    }

    /// Compute the line-of-sight channel between all transmitters and receivers
    pub fn compute_los_paths(&self) -> PyResult<PyLosPaths> {
        self.inner
            .compute_los_paths()
            .map(|inner| PyLosPaths { inner })
            .map_err(scene_error)
    }

    fn __repr__(&self) -> String {
        format!(
            "Scene({}, {} transmitters, {} receivers, {} RIS)",
            self.inner.frequency(),
            self.inner.transmitters().len(),
            self.inner.receivers().len(),
            self.inner.ris().len()
        )
    }
}

fn item_to_py(py: Python<'_>, item: SceneItem) -> PyResult<PyObject> {
    Ok(match item {
        SceneItem::Transmitter(tx) => Py::new(py, PyTransmitter::from_transmitter(tx))?.into_any(),
        SceneItem::Receiver(rx) => Py::new(py, PyReceiver::from_receiver(rx))?.into_any(),
        SceneItem::Ris(ris) => Py::new(py, PyRis::from_ris(ris))?.into_any(),
    })
}

/// Line-of-sight channel returned by `Scene.compute_los_paths`
#[pyclass(name = "LosPaths")]
pub struct PyLosPaths {
    inner: LosPaths,
}

#[pymethods]
impl PyLosPaths {
    /// Path coefficients [num_rx, num_rx_ant, num_tx, num_tx_ant]
    #[getter]
    pub fn a<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray4<Complex64>> {
        self.inner.a.to_pyarray_bound(py)
    }

    /// Path delays in seconds [num_rx, num_rx_ant, num_tx, num_tx_ant]
    #[getter]
    pub fn tau<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray4<f64>> {
        self.inner.tau.to_pyarray_bound(py)
    }

    /// Doppler shifts in Hz [num_rx, num_tx]
    #[getter]
    pub fn doppler<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray2<f64>> {
        self.inner.doppler.to_pyarray_bound(py)
    }

    /// Link validity mask [num_rx, num_tx]
    #[getter]
    pub fn valid<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray2<bool>> {
        self.inner.valid.to_pyarray_bound(py)
    }

    #[getter]
    pub fn synthetic(&self) -> bool {
        self.inner.synthetic
    }

    /// Average path gain of a link over all antenna pairs
    pub fn path_gain(&self, rx: usize, tx: usize) -> PyResult<f64> {
        self.inner.path_gain(rx, tx).ok_or_else(|| {
            let shape = self.inner.a.shape();
            PyIndexError::new_err(format!(
                "Link ({}, {}) out of range for {} receivers and {} transmitters",
                rx, tx, shape[0], shape[2]
            ))
        })
    }
}
