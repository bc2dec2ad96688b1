//! WASM bindings for PlanarArray

use js_sys::Float64Array;
use rtscene_core::antenna::{AntennaArray, PlanarArray, PolarizationModel};
use wasm_bindgen::prelude::*;

/// Planar antenna array for WASM
#[wasm_bindgen]
pub struct WasmPlanarArray {
    inner: AntennaArray,
}

#[wasm_bindgen]
impl WasmPlanarArray {
    /// Create a planar antenna array
    ///
    /// @param num_rows - Number of rows
    /// @param num_cols - Number of columns
    /// @param vertical_spacing - Row spacing in wavelengths
    /// @param horizontal_spacing - Column spacing in wavelengths
    /// @param pattern - 'iso', 'dipole', 'hw_dipole' or 'tr38901' (default 'iso')
    /// @param polarization - 'V', 'H', 'VH' or 'cross' (default 'V')
    /// @param polarization_model - 1 or 2 (default 2)
    #[wasm_bindgen(constructor)]
    pub fn new(
        num_rows: usize,
        num_cols: usize,
        vertical_spacing: f64,
        horizontal_spacing: f64,
        pattern: Option<String>,
        polarization: Option<String>,
        polarization_model: Option<u8>,
    ) -> Result<WasmPlanarArray, JsValue> {
        let config = PlanarArray {
            num_rows,
            num_cols,
            vertical_spacing,
            horizontal_spacing,
            pattern: pattern.as_deref().unwrap_or("iso").parse().map_err(js_error)?,
            polarization: polarization
                .as_deref()
                .unwrap_or("V")
                .parse()
                .map_err(js_error)?,
            polarization_model: PolarizationModel::try_from(polarization_model.unwrap_or(2))
                .map_err(js_error)?,
        };

        Ok(WasmPlanarArray {
            inner: config.build().map_err(js_error)?,
        })
    }

    /// Number of antenna ports (elements times polarization directions)
    #[wasm_bindgen(getter, js_name = numAnt)]
    pub fn num_ant(&self) -> usize {
        self.inner.num_ant()
    }

    /// Number of antenna elements
    #[wasm_bindgen(getter, js_name = arraySize)]
    pub fn array_size(&self) -> usize {
        self.inner.array_size()
    }

    /// Element positions in metres as flattened Float64Array
    /// Shape: [array_size * 3] as x, y, z triples
    pub fn positions(&self, wavelength: f64) -> Float64Array {
        let flat: Vec<f64> = self
            .inner
            .positions(wavelength)
            .iter()
            .flat_map(|p| [p.x, p.y, p.z])
            .collect();
        Float64Array::from(flat.as_slice())
    }
}

impl WasmPlanarArray {
    pub fn inner(&self) -> &AntennaArray {
        &self.inner
    }
}

pub(crate) fn js_error(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}
