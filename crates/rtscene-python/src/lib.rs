//! Python bindings for rtscene-core
//!
//! This module exposes rtscene-core functionality to Python via PyO3.
//!
//! ## Classes
//!
//! - `PlanarArray` - Planar antenna array configuration
//! - `Transmitter` / `Receiver` - Radio devices
//! - `RIS` - Reconfigurable intelligent surface with phase/amplitude profiles
//! - `Scene` - Named collection of devices with line-of-sight paths
//! - `LosPaths` - Channel coefficients and delays returned by a scene

use pyo3::prelude::*;

mod antenna;
mod device;
mod ris;
mod scene;

pub use antenna::PyPlanarArray;
pub use device::{PyReceiver, PyTransmitter};
pub use ris::PyRis;
pub use scene::{PyLosPaths, PyScene};

/// rtscene_python - Python bindings for radio scenes in Rust
///
/// Example:
///     >>> import rtscene_python as rt
///     >>> scene = rt.Scene(frequency=3.5e9)
///     >>> scene.tx_array = rt.PlanarArray(8, 2, 0.7, 0.5, "tr38901", "VH")
///     >>> scene.rx_array = rt.PlanarArray(1, 1, 0.5, 0.5, "dipole", "cross")
///     >>> scene.add(rt.Transmitter("tx", [8.5, 21.0, 27.0]))
///     >>> scene.add(rt.Receiver("rx", [45.0, 90.0, 1.5]))
///     >>> scene.look_at("tx", "rx")
///     >>> paths = scene.compute_los_paths()
#[pymodule]
fn rtscene_python(m: &Bound<'_, PyModule>) -> PyResult<()> {
    // Add classes with clean names (no Py prefix in Python)
    m.add_class::<PyPlanarArray>()?;
    m.add_class::<PyTransmitter>()?;
    m.add_class::<PyReceiver>()?;
    m.add_class::<PyRis>()?;
    m.add_class::<PyScene>()?;
    m.add_class::<PyLosPaths>()?;

    m.add("__version__", "0.1.0")?;

    Ok(())
}
