//! Scene module - container of radio devices
//!
//! The scene owns the transmitters, receivers and RIS, the antenna arrays
//! shared by all transmitters and all receivers, and the carrier frequency.

mod core;
mod io;
mod paths;

use thiserror::Error;

use crate::antenna::AntennaError;
use crate::frequency::FrequencyError;
use crate::ris::RisError;

pub use self::core::{Scene, SceneItem};
pub use io::{
    ArrayDescription, CustomArrayDescription, DeviceDescription, FrequencyDescription,
    RisDescription, SceneDescription,
};
pub use paths::LosPaths;

/// Scene errors
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("Name '{0}' is already used by another item of the scene")]
    NameInUse(String),

    #[error("No item named '{0}' in the scene")]
    UnknownItem(String),

    #[error("Scene has no {0} antenna array")]
    MissingArray(&'static str),

    #[error("Invalid scene description: {0}")]
    InvalidDescription(String),

    #[error(transparent)]
    Antenna(#[from] AntennaError),

    #[error(transparent)]
    Ris(#[from] RisError),

    #[error(transparent)]
    Frequency(#[from] FrequencyError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
