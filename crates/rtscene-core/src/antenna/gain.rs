//! Directivity, gain and radiation efficiency of an antenna
//!
//! The radiated power is obtained by integrating the radiation intensity
//! `|c_θ|² + |c_φ|²` over the unit sphere with the midpoint rule.

use std::f64::consts::PI;

use super::pattern::Antenna;
use crate::constants::{GAIN_PHI_SAMPLES, GAIN_THETA_SAMPLES};
use crate::math::power_2_db;

/// Integrated antenna figures (linear scale)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AntennaGain {
    /// Maximum directivity
    pub directivity: f64,
    /// Maximum gain
    pub gain: f64,
    /// Radiation efficiency (gain / directivity)
    pub radiation_efficiency: f64,
}

impl AntennaGain {
    /// Directivity in dBi
    pub fn directivity_db(&self) -> f64 {
        power_2_db(self.directivity)
    }

    /// Gain in dBi
    pub fn gain_db(&self) -> f64 {
        power_2_db(self.gain)
    }
}

/// Compute directivity, gain and efficiency of the first polarization direction
pub fn compute_gain(antenna: &Antenna) -> AntennaGain {
    let d_theta = PI / GAIN_THETA_SAMPLES as f64;
    let d_phi = 2.0 * PI / GAIN_PHI_SAMPLES as f64;

    let mut radiated = 0.0;
    let mut u_max: f64 = 0.0;

    for it in 0..GAIN_THETA_SAMPLES {
        let theta = (it as f64 + 0.5) * d_theta;
        let weight = theta.sin() * d_theta * d_phi;
        for ip in 0..GAIN_PHI_SAMPLES {
            let phi = -PI + (ip as f64 + 0.5) * d_phi;
            let (ct, cp) = antenna.fields(theta, phi)[0];
            let u = ct.norm_sqr() + cp.norm_sqr();
            u_max = u_max.max(u);
            radiated += u * weight;
        }
    }

    let efficiency = radiated / (4.0 * PI);
    let directivity = if radiated > 0.0 {
        4.0 * PI * u_max / radiated
    } else {
        0.0
    };

    AntennaGain {
        directivity,
        gain: u_max,
        radiation_efficiency: efficiency,
    }
}
