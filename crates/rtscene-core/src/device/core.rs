//! Shared radio device state
//!
//! Holds the pose of a device and implements the look-at logic used by
//! every device kind.

use log::warn;
use nalgebra::Vector3;

use crate::math::{look_at_angles, rotate, Orientation};

/// Name, pose and motion of a device in the scene
#[derive(Debug, Clone, PartialEq)]
pub struct RadioDevice {
    name: String,
    /// Position in global coordinates [m]
    pub position: Vector3<f64>,
    /// Orientation `[α, β, γ]` [rad]
    pub orientation: Orientation,
    /// Velocity in global coordinates [m/s]
    pub velocity: Vector3<f64>,
    /// RGB display colour in [0, 1]
    pub color: [f64; 3],
}

impl RadioDevice {
    pub fn new(name: impl Into<String>, position: Vector3<f64>, orientation: Orientation) -> Self {
        Self {
            name: name.into(),
            position,
            orientation,
            velocity: Vector3::zeros(),
            color: [0.0, 0.0, 0.0],
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Orient the device so that its local x-axis points at `target`
    ///
    /// A target at the device position leaves the orientation unchanged.
    pub fn look_at(&mut self, target: &Vector3<f64>) {
        match look_at_angles(&self.position, target) {
            Some(angles) => self.orientation = angles,
            None => warn!(
                "Device '{}' cannot look at its own position, orientation unchanged",
                self.name
            ),
        }
    }

    /// Boresight (rotated local x-axis) in global coordinates
    pub fn boresight(&self) -> Vector3<f64> {
        rotate(&Vector3::x(), self.orientation)
    }
}

/// Access to the radio device state shared by all device kinds
pub trait Device {
    fn radio_device(&self) -> &RadioDevice;

    fn radio_device_mut(&mut self) -> &mut RadioDevice;

    fn name(&self) -> &str {
        self.radio_device().name()
    }

    fn position(&self) -> Vector3<f64> {
        self.radio_device().position
    }

    fn set_position(&mut self, position: Vector3<f64>) {
        self.radio_device_mut().position = position;
    }

    fn orientation(&self) -> Orientation {
        self.radio_device().orientation
    }

    fn set_orientation(&mut self, orientation: Orientation) {
        self.radio_device_mut().orientation = orientation;
    }

    fn velocity(&self) -> Vector3<f64> {
        self.radio_device().velocity
    }

    fn set_velocity(&mut self, velocity: Vector3<f64>) {
        self.radio_device_mut().velocity = velocity;
    }

    /// Point the device at a position
    fn look_at(&mut self, target: &Vector3<f64>) {
        self.radio_device_mut().look_at(target);
    }

    /// Point the device at another device
    fn look_at_device(&mut self, other: &dyn Device) {
        let target = other.position();
        self.look_at(&target);
    }
}

impl Device for RadioDevice {
    fn radio_device(&self) -> &RadioDevice {
        self
    }

    fn radio_device_mut(&mut self) -> &mut RadioDevice {
        self
    }
}
