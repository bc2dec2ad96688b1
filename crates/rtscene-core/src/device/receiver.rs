//! Receiver

use nalgebra::Vector3;

use super::core::{Device, RadioDevice};
use crate::math::Orientation;

/// A receiving radio device
#[derive(Debug, Clone, PartialEq)]
pub struct Receiver {
    device: RadioDevice,
}

impl Receiver {
    pub fn new(name: impl Into<String>, position: Vector3<f64>, orientation: Orientation) -> Self {
        let mut device = RadioDevice::new(name, position, orientation);
        device.color = [0.153, 0.682, 0.375];
        Self { device }
    }

    /// Create a receiver pointing at `target`
    pub fn looking_at(
        name: impl Into<String>,
        position: Vector3<f64>,
        target: &Vector3<f64>,
    ) -> Self {
        let mut rx = Self::new(name, position, [0.0; 3]);
        rx.look_at(target);
        rx
    }

    pub fn with_color(mut self, color: [f64; 3]) -> Self {
        self.device.color = color;
        self
    }
}

impl Device for Receiver {
    fn radio_device(&self) -> &RadioDevice {
        &self.device
    }

    fn radio_device_mut(&mut self) -> &mut RadioDevice {
        &mut self.device
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_color() {
        let rx = Receiver::new("rx", Vector3::new(45.0, 90.0, 1.5), [0.0; 3]);
        assert_eq!(rx.radio_device().color, [0.153, 0.682, 0.375]);
        assert_eq!(rx.velocity(), Vector3::zeros());

        let rx = rx.with_color([1.0, 0.0, 0.0]);
        assert_eq!(rx.radio_device().color, [1.0, 0.0, 0.0]);
    }

    #[test]
    fn test_looking_at() {
        let position = Vector3::new(45.0, 90.0, 1.5);
        let target = Vector3::new(8.5, 21.0, 27.0);
        let rx = Receiver::looking_at("rx", position, &target);

        let expected = (target - position).normalize();
        assert_relative_eq!(
            (rx.radio_device().boresight() - expected).norm(),
            0.0,
            epsilon = 1e-12
        );
        assert_eq!(rx.name(), "rx");
    }
}
