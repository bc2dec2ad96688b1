//! WASM bindings for Scene

use js_sys::{Array, Float64Array};
use nalgebra::Vector3;
use rtscene_core::constants::SPEED_OF_LIGHT;
use rtscene_core::device::Device;
use rtscene_core::frequency::Frequency;
use rtscene_core::math::power_2_db;
use rtscene_core::scene::SceneError;
use rtscene_core::{Receiver, Ris, Scene, Transmitter};
use wasm_bindgen::prelude::*;

use crate::antenna::{js_error, WasmPlanarArray};

fn to_vector(values: &[f64]) -> Result<Vector3<f64>, JsValue> {
    match values {
        [x, y, z] => Ok(Vector3::new(*x, *y, *z)),
        _ => Err(JsValue::from_str(&format!(
            "Expected 3 coordinates, got {}",
            values.len()
        ))),
    }
}

/// Radio scene for WASM
#[wasm_bindgen]
pub struct WasmScene {
    inner: Scene,
}

#[wasm_bindgen]
impl WasmScene {
    /// Create an empty scene
    ///
    /// @param frequency - Carrier frequency in Hz (default 3.5 GHz)
    #[wasm_bindgen(constructor)]
    pub fn new(frequency: Option<f64>) -> Result<WasmScene, JsValue> {
        let inner = match frequency {
            Some(hz) => Scene::with_frequency(Frequency::from_hz(hz).map_err(js_error)?),
            None => Scene::new(),
        };
        Ok(WasmScene { inner })
    }

    /// Load a scene from its JSON description
    ///
    /// Note: In WASM, we can't read files directly. Pass the file content as a string.
    #[wasm_bindgen(js_name = fromJson)]
    pub fn from_json(content: &str) -> Result<WasmScene, JsValue> {
        let inner = Scene::from_json_str(content)
            .map_err(|e| JsValue::from_str(&format!("Scene parse error: {}", e)))?;
        Ok(WasmScene { inner })
    }

    /// Serialize the scene to its JSON description
    #[wasm_bindgen(js_name = toJson)]
    pub fn to_json(&self) -> Result<String, JsValue> {
        self.inner.to_json().map_err(js_error)
    }

    /// Carrier frequency in Hz
    #[wasm_bindgen(getter)]
    pub fn frequency(&self) -> f64 {
        self.inner.frequency().hz()
    }

    #[wasm_bindgen(js_name = setFrequency)]
    pub fn set_frequency(&mut self, hz: f64) -> Result<(), JsValue> {
        let frequency = Frequency::from_hz(hz).map_err(js_error)?;
        self.inner.set_frequency(frequency).map_err(js_error)
    }

    #[wasm_bindgen(getter, js_name = syntheticArray)]
    pub fn synthetic_array(&self) -> bool {
        self.inner.synthetic_array
    }

    #[wasm_bindgen(setter, js_name = syntheticArray)]
    pub fn set_synthetic_array(&mut self, value: bool) {
        self.inner.synthetic_array = value;
    }

    #[wasm_bindgen(js_name = setTxArray)]
    pub fn set_tx_array(&mut self, array: &WasmPlanarArray) {
        self.inner.tx_array = Some(array.inner().clone());
    }

    #[wasm_bindgen(js_name = setRxArray)]
    pub fn set_rx_array(&mut self, array: &WasmPlanarArray) {
        self.inner.rx_array = Some(array.inner().clone());
    }

    /// Add a transmitter
    ///
    /// @param name - Unique name in the scene
    /// @param position - [x, y, z] in metres
    /// @param power_dbm - Transmit power in dBm (default 44)
    #[wasm_bindgen(js_name = addTransmitter)]
    pub fn add_transmitter(
        &mut self,
        name: &str,
        position: &[f64],
        power_dbm: Option<f64>,
    ) -> Result<(), JsValue> {
        let mut tx = Transmitter::new(name, to_vector(position)?, [0.0; 3]);
        if let Some(p) = power_dbm {
            tx.power_dbm = p;
        }
        self.inner.add(tx).map_err(js_error)
    }

    /// Add a receiver at [x, y, z]
    #[wasm_bindgen(js_name = addReceiver)]
    pub fn add_receiver(&mut self, name: &str, position: &[f64]) -> Result<(), JsValue> {
        let rx = Receiver::new(name, to_vector(position)?, [0.0; 3]);
        self.inner.add(rx).map_err(js_error)
    }

    /// Add a RIS centred at [x, y, z]
    #[wasm_bindgen(js_name = addRis)]
    pub fn add_ris(
        &mut self,
        name: &str,
        position: &[f64],
        num_rows: usize,
        num_cols: usize,
        num_modes: Option<usize>,
    ) -> Result<(), JsValue> {
        let ris = Ris::new(
            name,
            to_vector(position)?,
            [0.0; 3],
            num_rows,
            num_cols,
            num_modes.unwrap_or(1),
        )
        .map_err(js_error)?;
        self.inner.add(ris).map_err(js_error)
    }

    /// Remove the item with the given name
    pub fn remove(&mut self, name: &str) -> Result<(), JsValue> {
        self.inner.remove(name).map(|_| ()).map_err(js_error)
    }

    /// Whether an item with the given name exists
    pub fn contains(&self, name: &str) -> bool {
        self.inner.get(name).is_some()
    }

    /// Names of all transmitters, receivers and RIS
    pub fn names(&self) -> Array {
        let names = Array::new();
        let transmitters = self.inner.transmitters().iter().map(|d| d.name());
        let receivers = self.inner.receivers().iter().map(|d| d.name());
        let ris = self.inner.ris().iter().map(|d| d.name());
        for name in transmitters.chain(receivers).chain(ris) {
            names.push(&JsValue::from_str(name));
        }
        names
    }

    /// Move the item with the given name to [x, y, z]
    #[wasm_bindgen(js_name = setPosition)]
    pub fn set_position(&mut self, name: &str, position: &[f64]) -> Result<(), JsValue> {
        let position = to_vector(position)?;
        let device = self
            .inner
            .get_mut(name)
            .ok_or_else(|| JsValue::from_str(&format!("Unknown item: {}", name)))?;
        device.set_position(position);
        Ok(())
    }

    /// Orient the item `name` towards the item `target`
    #[wasm_bindgen(js_name = lookAt)]
    pub fn look_at(&mut self, name: &str, target: &str) -> Result<(), JsValue> {
        self.inner.look_at(name, target).map_err(js_error)
    }

    /// Line-of-sight path gains in dB as flattened Float64Array
    /// Shape: [num_rx * num_tx] in row-major order
    #[wasm_bindgen(js_name = losPathGainsDb)]
    pub fn los_path_gains_db(&self) -> Result<Float64Array, JsValue> {
        let gains = path_gains_db(&self.inner).map_err(js_error)?;
        Ok(Float64Array::from(gains.as_slice()))
    }

    /// Line-of-sight delays between device centres in seconds
    /// Shape: [num_rx * num_tx] in row-major order
    #[wasm_bindgen(js_name = losDelays)]
    pub fn los_delays(&self) -> Float64Array {
        Float64Array::from(centre_delays(&self.inner).as_slice())
    }
}

/// Average path gain of every link in dB, receivers major
fn path_gains_db(scene: &Scene) -> Result<Vec<f64>, SceneError> {
    let paths = scene.compute_los_paths()?;
    let (n_rx, n_tx) = paths.valid.dim();
    Ok((0..n_rx)
        .flat_map(|r| (0..n_tx).map(move |t| (r, t)))
        .map(|(r, t)| paths.path_gain(r, t).map_or(f64::NEG_INFINITY, power_2_db))
        .collect())
}

/// Delay between the centres of every receiver and transmitter, receivers major
fn centre_delays(scene: &Scene) -> Vec<f64> {
    let transmitters = scene.transmitters();
    scene
        .receivers()
        .iter()
        .flat_map(|rx| {
            transmitters
                .iter()
                .map(move |tx| (rx.position() - tx.position()).norm() / SPEED_OF_LIGHT)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rtscene_core::antenna::PlanarArray;

    fn two_link_scene(synthetic_array: bool) -> Scene {
        let mut scene = Scene::new();
        scene.synthetic_array = synthetic_array;
        scene.tx_array = Some(
            PlanarArray {
                num_rows: 4,
                num_cols: 4,
                ..Default::default()
            }
            .build()
            .unwrap(),
        );
        scene.rx_array = Some(PlanarArray::default().build().unwrap());
        scene
            .add(Transmitter::new("tx", Vector3::new(0.0, 0.0, 10.0), [0.0; 3]))
            .unwrap();
        scene
            .add(Receiver::new("rx-1", Vector3::new(30.0, 40.0, 10.0), [0.0; 3]))
            .unwrap();
        scene
            .add(Receiver::new("rx-2", Vector3::new(0.0, 0.0, 110.0), [0.0; 3]))
            .unwrap();
        scene
    }

    #[test]
    fn test_centre_delays_ignore_array_model() {
        for synthetic_array in [true, false] {
            let delays = centre_delays(&two_link_scene(synthetic_array));
            assert_eq!(delays.len(), 2);
            assert_relative_eq!(delays[0], 50.0 / SPEED_OF_LIGHT, max_relative = 1e-12);
            assert_relative_eq!(delays[1], 100.0 / SPEED_OF_LIGHT, max_relative = 1e-12);
        }
    }

    #[test]
    fn test_path_gains_db() {
        let scene = two_link_scene(true);
        let gains = path_gains_db(&scene).unwrap();
        let paths = scene.compute_los_paths().unwrap();

        assert_eq!(gains.len(), 2);
        assert_relative_eq!(
            gains[0],
            power_2_db(paths.path_gain(0, 0).unwrap()),
            epsilon = 1e-12
        );
        // Twice the distance: 6 dB less in free space, isotropic elements
        assert_relative_eq!(gains[0] - gains[1], power_2_db(4.0), epsilon = 1e-6);

        assert!(path_gains_db(&Scene::new()).is_err());
    }
}
