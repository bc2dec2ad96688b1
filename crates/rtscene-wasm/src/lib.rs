//! WASM bindings for rtscene-core
//!
//! This module exposes rtscene-core functionality to JavaScript/WASM.

use wasm_bindgen::prelude::*;

mod antenna;
mod scene;

pub use antenna::WasmPlanarArray;
pub use scene::WasmScene;

/// Get the library version
#[wasm_bindgen]
pub fn version() -> String {
    "0.1.0".to_string()
}
