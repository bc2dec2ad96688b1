//! Transmitter

use nalgebra::Vector3;

use super::core::{Device, RadioDevice};
use crate::constants::DEFAULT_TX_POWER_DBM;
use crate::math::{dbm_2_watt, Orientation};

/// A transmitting radio device
#[derive(Debug, Clone, PartialEq)]
pub struct Transmitter {
    device: RadioDevice,
    /// Transmit power [dBm]
    pub power_dbm: f64,
}

impl Transmitter {
    /// Create a transmitter with the default transmit power
    ///
    /// # Example
    /// ```
    /// use nalgebra::Vector3;
    /// use rtscene_core::device::{Device, Transmitter};
    ///
    /// let tx = Transmitter::new("tx", Vector3::new(8.5, 21.0, 27.0), [0.0, 0.0, 0.0]);
    /// assert_eq!(tx.name(), "tx");
    /// ```
    pub fn new(name: impl Into<String>, position: Vector3<f64>, orientation: Orientation) -> Self {
        let device = RadioDevice::new(name, position, orientation);
        Self {
            device,
            power_dbm: DEFAULT_TX_POWER_DBM,
        }
        .with_color([0.160, 0.502, 0.725])
    }

    /// Create a transmitter pointing at `target`
    pub fn looking_at(
        name: impl Into<String>,
        position: Vector3<f64>,
        target: &Vector3<f64>,
    ) -> Self {
        let mut tx = Self::new(name, position, [0.0; 3]);
        tx.look_at(target);
        tx
    }

    pub fn with_power_dbm(mut self, power_dbm: f64) -> Self {
        self.power_dbm = power_dbm;
        self
    }

    pub fn with_color(mut self, color: [f64; 3]) -> Self {
        self.device.color = color;
        self
    }

    /// Transmit power [W]
    pub fn power_w(&self) -> f64 {
        dbm_2_watt(self.power_dbm)
    }
}

impl Device for Transmitter {
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
    fn test_default_power() {
        let tx = Transmitter::new("tx", Vector3::zeros(), [0.0; 3]);
        assert_eq!(tx.power_dbm, DEFAULT_TX_POWER_DBM);

        let tx = tx.with_power_dbm(30.0);
        assert_relative_eq!(tx.power_w(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_looking_at() {
        let tx = Transmitter::looking_at("tx", Vector3::zeros(), &Vector3::new(0.0, 0.0, 5.0));
        // Pointing straight up tilts the x-axis by -90 degrees around y
        assert_relative_eq!(tx.orientation()[1], -std::f64::consts::FRAC_PI_2, epsilon = 1e-12);
    }
}
