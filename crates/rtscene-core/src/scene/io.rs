//! Scene description files
//!
//! Scenes are stored as JSON. Vectors are written as `[x, y, z]`,
//! orientations as `[α, β, γ]` in radians, and RIS profile values as flat
//! lists in `[mode, row, col]` order.
//!
//! ```json
//! {
//!   "frequency": { "value": 28.0, "unit": "GHz" },
//!   "tx_array": { "num_rows": 1, "num_cols": 4, "pattern": "tr38901", "polarization": "V" },
//!   "rx_array": { "pattern": "dipole", "polarization": "cross" },
//!   "transmitters": [ { "name": "tx", "position": [0, 0, 10], "look_at": [50, 0, 1.5] } ],
//!   "receivers": [ { "name": "rx", "position": [50, 0, 1.5] } ]
//! }
//! ```

use std::fs;
use std::path::Path;

use nalgebra::Vector3;
use ndarray::Array3;
use serde::{Deserialize, Serialize};

use super::core::Scene;
use super::SceneError;
use crate::antenna::{Antenna, AntennaArray, PlanarArray};
use crate::device::{Device, RadioDevice, Receiver, Transmitter};
use crate::frequency::{Frequency, FrequencyUnit};
use crate::math::Orientation;
use crate::ris::Ris;

/// Carrier frequency as written in scene files
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrequencyDescription {
    pub value: f64,
    #[serde(default = "default_unit")]
    pub unit: String,
}

impl FrequencyDescription {
    /// Describe `frequency` in its display unit when that reloads to the
    /// same value in Hz, otherwise in Hz
    fn from_frequency(frequency: Frequency) -> Self {
        let unit = frequency.unit();
        let scaled = frequency.scaled();
        if scaled * unit.multiplier() == frequency.hz() {
            Self {
                value: scaled,
                unit: unit.as_str().to_string(),
            }
        } else {
            Self {
                value: frequency.hz(),
                unit: FrequencyUnit::Hz.as_str().to_string(),
            }
        }
    }
}

fn default_unit() -> String {
    FrequencyUnit::Hz.as_str().to_string()
}

fn default_true() -> bool {
    true
}

/// Antenna array given by explicit element positions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CustomArrayDescription {
    pub antenna: Antenna,
    /// Element positions [wavelengths]
    pub positions: Vec<[f64; 3]>,
}

/// Antenna array, either as a planar panel or as explicit element positions
///
/// Both forms reject unknown keys, so a misspelled entry fails to parse
/// instead of falling back to defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ArrayDescription {
    Custom(CustomArrayDescription),
    Planar(PlanarArray),
}

impl ArrayDescription {
    pub fn build(&self) -> Result<AntennaArray, SceneError> {
        let array = match self {
            ArrayDescription::Planar(planar) => planar.build()?,
            ArrayDescription::Custom(custom) => AntennaArray::new(
                custom.antenna,
                custom.positions.iter().map(|p| Vector3::from(*p)).collect(),
            )?,
        };
        Ok(array)
    }

    fn from_array(array: &AntennaArray) -> Self {
        match array.planar() {
            Some(planar) => ArrayDescription::Planar(*planar),
            None => ArrayDescription::Custom(CustomArrayDescription {
                antenna: *array.antenna(),
                positions: array
                    .normalized_positions()
                    .iter()
                    .map(|p| [p.x, p.y, p.z])
                    .collect(),
            }),
        }
    }
}

/// Transmitter or receiver entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceDescription {
    pub name: String,
    pub position: [f64; 3],
    #[serde(default)]
    pub orientation: Orientation,
    /// Overrides `orientation` when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub look_at: Option<[f64; 3]>,
    #[serde(default)]
    pub velocity: [f64; 3],
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<[f64; 3]>,
    /// Transmit power [dBm], transmitters only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub power_dbm: Option<f64>,
}

impl DeviceDescription {
    fn apply_pose(&self, device: &mut impl Device) {
        let dev = device.radio_device_mut();
        dev.velocity = Vector3::from(self.velocity);
        if let Some(color) = self.color {
            dev.color = color;
        }
        if let Some(target) = self.look_at {
            device.look_at(&Vector3::from(target));
        }
    }

    fn from_device(device: &RadioDevice) -> Self {
        Self {
            name: device.name().to_string(),
            position: device.position.into(),
            orientation: device.orientation,
            look_at: None,
            velocity: device.velocity.into(),
            color: Some(device.color),
            power_dbm: None,
        }
    }
}

/// RIS entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RisDescription {
    #[serde(flatten)]
    pub device: DeviceDescription,
    pub num_rows: usize,
    pub num_cols: usize,
    #[serde(default = "default_modes")]
    pub num_modes: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode_powers: Option<Vec<f64>>,
    /// Phase values [rad], flat `[mode, row, col]`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phase_values: Option<Vec<f64>>,
    /// Amplitude values, flat `[mode, row, col]`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amplitude_values: Option<Vec<f64>>,
}

fn default_modes() -> usize {
    1
}

/// Complete scene description
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SceneDescription {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency: Option<FrequencyDescription>,
    #[serde(default = "default_true")]
    pub synthetic_array: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tx_array: Option<ArrayDescription>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rx_array: Option<ArrayDescription>,
    #[serde(default)]
    pub transmitters: Vec<DeviceDescription>,
    #[serde(default)]
    pub receivers: Vec<DeviceDescription>,
    #[serde(default)]
    pub ris: Vec<RisDescription>,
}

fn profile_values(
    values: &[f64],
    shape: (usize, usize, usize),
    name: &str,
) -> Result<Array3<f64>, SceneError> {
    Array3::from_shape_vec(shape, values.to_vec()).map_err(|_| {
        SceneError::InvalidDescription(format!(
            "RIS '{}' expects {} profile values, got {}",
            name,
            shape.0 * shape.1 * shape.2,
            values.len()
        ))
    })
}

impl SceneDescription {
    /// Build the scene described by this description
    pub fn build(&self) -> Result<Scene, SceneError> {
        let frequency = match &self.frequency {
            Some(f) => Frequency::new(f.value, f.unit.parse::<FrequencyUnit>()?)?,
            None => Frequency::default(),
        };

        let mut scene = Scene::with_frequency(frequency);
        scene.synthetic_array = self.synthetic_array;
        scene.tx_array = self.tx_array.as_ref().map(|a| a.build()).transpose()?;
        scene.rx_array = self.rx_array.as_ref().map(|a| a.build()).transpose()?;

        for desc in &self.transmitters {
            let mut tx = Transmitter::new(&desc.name, desc.position.into(), desc.orientation);
            if let Some(power) = desc.power_dbm {
                tx.power_dbm = power;
            }
            desc.apply_pose(&mut tx);
            scene.add(tx)?;
        }

        for desc in &self.receivers {
            let mut rx = Receiver::new(&desc.name, desc.position.into(), desc.orientation);
            desc.apply_pose(&mut rx);
            scene.add(rx)?;
        }

        for desc in &self.ris {
            let dev = &desc.device;
            let mut ris = Ris::new(
                &dev.name,
                dev.position.into(),
                dev.orientation,
                desc.num_rows,
                desc.num_cols,
                desc.num_modes,
            )?;
            dev.apply_pose(&mut ris);

            let shape = (desc.num_modes, desc.num_rows, desc.num_cols);
            if let Some(powers) = &desc.mode_powers {
                ris.set_mode_powers(powers.clone())?;
            }
            if let Some(values) = &desc.phase_values {
                ris.phase_profile_mut()
                    .set_values(profile_values(values, shape, &dev.name)?)?;
            }
            if let Some(values) = &desc.amplitude_values {
                ris.amplitude_profile_mut()
                    .set_values(profile_values(values, shape, &dev.name)?)?;
            }
            scene.add(ris)?;
        }

        Ok(scene)
    }

    /// Describe an existing scene
    pub fn from_scene(scene: &Scene) -> Self {
        let frequency = scene.frequency();
        Self {
            frequency: Some(FrequencyDescription::from_frequency(frequency)),
            synthetic_array: scene.synthetic_array,
            tx_array: scene.tx_array.as_ref().map(ArrayDescription::from_array),
            rx_array: scene.rx_array.as_ref().map(ArrayDescription::from_array),
            transmitters: scene
                .transmitters()
                .iter()
                .map(|tx| DeviceDescription {
                    power_dbm: Some(tx.power_dbm),
                    ..DeviceDescription::from_device(tx.radio_device())
                })
                .collect(),
            receivers: scene
                .receivers()
                .iter()
                .map(|rx| DeviceDescription::from_device(rx.radio_device()))
                .collect(),
            ris: scene
                .ris()
                .iter()
                .map(|ris| RisDescription {
                    device: DeviceDescription::from_device(ris.radio_device()),
                    num_rows: ris.num_rows(),
                    num_cols: ris.num_cols(),
                    num_modes: ris.num_modes(),
                    mode_powers: Some(ris.mode_powers().to_vec()),
                    phase_values: Some(ris.phase_profile().values().iter().copied().collect()),
                    amplitude_values: Some(
                        ris.amplitude_profile().values().iter().copied().collect(),
                    ),
                })
                .collect(),
        }
    }
}

impl Scene {
    /// Load a scene from a JSON string
    pub fn from_json_str(content: &str) -> Result<Self, SceneError> {
        let desc: SceneDescription = serde_json::from_str(content)?;
        desc.build()
    }

    /// Load a scene from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SceneError> {
        let content = fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// Serialize the scene to pretty-printed JSON
    pub fn to_json(&self) -> Result<String, SceneError> {
        Ok(serde_json::to_string_pretty(&SceneDescription::from_scene(self))?)
    }

    /// Write the scene to a JSON file
    pub fn write_file<P: AsRef<Path>>(&self, path: P) -> Result<(), SceneError> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }
}
