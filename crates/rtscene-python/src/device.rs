//! Python bindings for Transmitter and Receiver

use nalgebra::Vector3;
use pyo3::prelude::*;
use rtscene_core::device::Device;
use rtscene_core::{Receiver, Transmitter};

pub(crate) fn to_list(v: Vector3<f64>) -> [f64; 3] {
    [v.x, v.y, v.z]
}

/// Python wrapper for Transmitter
///
/// Devices are copied into a Scene on `add`; use the scene methods to move
/// a device afterwards.
#[pyclass(name = "Transmitter")]
#[derive(Clone)]
pub struct PyTransmitter {
    inner: Transmitter,
}

#[pymethods]
impl PyTransmitter {
    /// Create a transmitter
    ///
    /// Args:
    ///     name: Unique name in the scene
    ///     position: [x, y, z] in metres
    ///     orientation: [alpha, beta, gamma] in radians
    ///     look_at: Optional point [x, y, z] to orient towards
    ///     power_dbm: Transmit power in dBm (default: 44)
    #[new]
    #[pyo3(signature = (name, position, orientation=[0.0, 0.0, 0.0], look_at=None, power_dbm=None))]
    pub fn new(
        name: String,
        position: [f64; 3],
        orientation: [f64; 3],
        look_at: Option<[f64; 3]>,
        power_dbm: Option<f64>,
    ) -> Self {
        let mut inner = Transmitter::new(name, Vector3::from(position), orientation);
        if let Some(target) = look_at {
            inner.look_at(&Vector3::from(target));
        }
        if let Some(p) = power_dbm {
            inner.power_dbm = p;
        }
        Self { inner }
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
    pub fn velocity(&self) -> [f64; 3] {
        to_list(self.inner.velocity())
    }

    #[setter]
    pub fn set_velocity(&mut self, velocity: [f64; 3]) {
        self.inner.set_velocity(Vector3::from(velocity));
    }

    /// Transmit power in dBm
    #[getter]
    pub fn power_dbm(&self) -> f64 {
        self.inner.power_dbm
    }

    #[setter]
    pub fn set_power_dbm(&mut self, power_dbm: f64) {
        self.inner.power_dbm = power_dbm;
    }

    /// Orient the transmitter towards a point
    pub fn look_at(&mut self, target: [f64; 3]) {
        self.inner.look_at(&Vector3::from(target));
    }

    fn __repr__(&self) -> String {
        format!(
            "Transmitter('{}', position={:?}, power_dbm={})",
            self.inner.name(),
            self.position(),
            self.inner.power_dbm
        )
    }
}

impl PyTransmitter {
    pub fn inner(&self) -> &Transmitter {
        &self.inner
    }

    pub fn from_transmitter(transmitter: Transmitter) -> Self {
        Self { inner: transmitter }
    }
}

/// Python wrapper for Receiver
#[pyclass(name = "Receiver")]
#[derive(Clone)]
pub struct PyReceiver {
    inner: Receiver,
}

#[pymethods]
impl PyReceiver {
    /// Create a receiver
    ///
    /// Args:
    ///     name: Unique name in the scene
    ///     position: [x, y, z] in metres
    ///     orientation: [alpha, beta, gamma] in radians
    ///     look_at: Optional point [x, y, z] to orient towards
    #[new]
    #[pyo3(signature = (name, position, orientation=[0.0, 0.0, 0.0], look_at=None))]
    pub fn new(
        name: String,
        position: [f64; 3],
        orientation: [f64; 3],
        look_at: Option<[f64; 3]>,
    ) -> Self {
        let mut inner = Receiver::new(name, Vector3::from(position), orientation);
        if let Some(target) = look_at {
            inner.look_at(&Vector3::from(target));
        }
        Self { inner }
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
    pub fn velocity(&self) -> [f64; 3] {
        to_list(self.inner.velocity())
    }

    #[setter]
    pub fn set_velocity(&mut self, velocity: [f64; 3]) {
        self.inner.set_velocity(Vector3::from(velocity));
    }

    /// Orient the receiver towards a point
    pub fn look_at(&mut self, target: [f64; 3]) {
        self.inner.look_at(&Vector3::from(target));
    }

    fn __repr__(&self) -> String {
        format!(
            "Receiver('{}', position={:?})",
            self.inner.name(),
            self.position()
        )
    }
}

impl PyReceiver {
    pub fn inner(&self) -> &Receiver {
        &self.inner
    }

    pub fn from_receiver(receiver: Receiver) -> Self {
        Self { inner: receiver }
    }
}
