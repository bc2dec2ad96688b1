//! Mathematical functions module
//!
//! Provides the geometry and unit conversions shared by antennas,
//! radio devices and the scene.

pub mod conversions;
pub mod rotation;

pub use conversions::*;
pub use rotation::*;
