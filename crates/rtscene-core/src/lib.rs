//! rtscene-core: Radio scene model for propagation studies
//!
//! Describes the radio side of a propagation scene: transmitters, receivers
//! and reconfigurable intelligent surfaces (RIS) placed in 3-D space, the
//! antenna arrays they use, and the phase/amplitude profiles that drive a RIS.
//!
//! ## Modules
//!
//! - `frequency` - Carrier frequency and wavelength
//! - `math` - Rotations, spherical unit vectors and unit conversions
//! - `antenna` - Antenna patterns, polarization and antenna arrays
//! - `device` - Transmitters, receivers and the shared radio device state
//! - `ris` - Cell grids, discrete profiles, interpolators and the RIS itself
//! - `scene` - Scene container, line-of-sight channel and JSON scene files

pub mod antenna;
pub mod constants;
pub mod device;
pub mod frequency;
pub mod math;
pub mod ris;
pub mod scene;

pub use antenna::{AntennaArray, PlanarArray};
pub use device::{Receiver, Transmitter};
pub use frequency::Frequency;
pub use ris::Ris;
pub use scene::{Scene, SceneItem};
