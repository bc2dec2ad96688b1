//! Line-of-sight channel between transmitters and receivers
//!
//! Free-space propagation only: the coefficient of the direct path between
//! a transmit and a receive antenna is
//!
//! `a = λ/(4πd) · (F_rx · F_tx) · exp(-j2πd/λ)`
//!
//! where `F_tx` and `F_rx` are the antenna field vectors in global
//! coordinates, evaluated in the departure and arrival directions.

use std::f64::consts::PI;

use log::{debug, warn};
use nalgebra::Vector3;
use ndarray::{Array2, Array4};
use num_complex::Complex64;

use super::core::Scene;
use super::SceneError;
use crate::antenna::Antenna;
use crate::constants::{NEAR_ZERO, SPEED_OF_LIGHT};
use crate::device::Device;
use crate::math::{phi_hat, rotate, theta_hat, theta_phi_from_unit_vec, to_local, Orientation};

/// Line-of-sight channel of a scene
#[derive(Debug, Clone)]
pub struct LosPaths {
    /// Path coefficients `[num_rx, num_rx_ant, num_tx, num_tx_ant]`
    pub a: Array4<Complex64>,
    /// Path delays [s], same shape as `a`
    pub tau: Array4<f64>,
    /// Doppler shift between device centres [Hz] `[num_rx, num_tx]`
    pub doppler: Array2<f64>,
    /// False where transmitter and receiver coincide and no path exists
    pub valid: Array2<bool>,
    /// Whether the synthetic array approximation was used
    pub synthetic: bool,
}

impl LosPaths {
    /// Average path gain `E[|a|²]` over all antenna pairs of a link
    ///
    /// Returns None when `rx` or `tx` is out of range.
    pub fn path_gain(&self, rx: usize, tx: usize) -> Option<f64> {
        let (n_rx, n_rx_ant, n_tx, n_tx_ant) = self.a.dim();
        if rx >= n_rx || tx >= n_tx || n_rx_ant == 0 || n_tx_ant == 0 {
            return None;
        }
        let mut total = 0.0;
        for i in 0..n_rx_ant {
            for j in 0..n_tx_ant {
                total += self.a[[rx, i, tx, j]].norm_sqr();
            }
        }
        Some(total / (n_rx_ant * n_tx_ant) as f64)
    }
}

/// Field vectors of every polarization direction in global coordinates
///
/// `direction` is the global unit vector pointing away from the antenna.
fn global_fields(
    antenna: &Antenna,
    orientation: Orientation,
    direction: &Vector3<f64>,
) -> Vec<Vector3<Complex64>> {
    let local = to_local(direction, orientation);
    let (theta, phi) = theta_phi_from_unit_vec(&local);
    let t_hat = rotate(&theta_hat(theta, phi), orientation).map(|x| Complex64::new(x, 0.0));
    let p_hat = rotate(&phi_hat(phi), orientation).map(|x| Complex64::new(x, 0.0));

    antenna
        .fields(theta, phi)
        .into_iter()
        .map(|(ct, cp)| t_hat * ct + p_hat * cp)
        .collect()
}

/// Unpolarized part of the free-space coefficient
fn free_space(d: f64, wavelength: f64) -> Complex64 {
    let k0 = 2.0 * PI / wavelength;
    Complex64::from_polar(wavelength / (4.0 * PI * d), -k0 * d)
}

impl Scene {
    /// Compute the line-of-sight channel between every transmitter and receiver
    ///
    /// With `synthetic_array` the geometry is evaluated between device
    /// centres and antenna offsets enter as plane-wave phase shifts;
    /// otherwise every pair of antenna elements is evaluated on its own.
    pub fn compute_los_paths(&self) -> Result<LosPaths, SceneError> {
        let tx_array = self
            .tx_array
            .as_ref()
            .ok_or(SceneError::MissingArray("transmitter"))?;
        let rx_array = self
            .rx_array
            .as_ref()
            .ok_or(SceneError::MissingArray("receiver"))?;

        let wavelength = self.wavelength();
        let k0 = 2.0 * PI / wavelength;
        let n_tx = self.transmitters().len();
        let n_rx = self.receivers().len();
        let n_tx_ant = tx_array.num_ant();
        let n_rx_ant = rx_array.num_ant();
        let tx_dirs = tx_array.antenna().num_directions();
        let rx_dirs = rx_array.antenna().num_directions();

        let mut a = Array4::<Complex64>::zeros((n_rx, n_rx_ant, n_tx, n_tx_ant));
        let mut tau = Array4::<f64>::zeros((n_rx, n_rx_ant, n_tx, n_tx_ant));
        let mut doppler = Array2::<f64>::zeros((n_rx, n_tx));
        let mut valid = Array2::from_elem((n_rx, n_tx), false);

        for (t, tx) in self.transmitters().iter().enumerate() {
            let tx_ports = tx_array.port_positions(wavelength, tx.orientation());
            for (r, rx) in self.receivers().iter().enumerate() {
                let d_vec = rx.position() - tx.position();
                let d0 = d_vec.norm();
                if d0 < NEAR_ZERO {
                    warn!(
                        "Transmitter '{}' and receiver '{}' coincide, no path computed",
                        tx.name(),
                        rx.name()
                    );
                    continue;
                }
                let k = d_vec / d0;
                valid[[r, t]] = true;
                doppler[[r, t]] = (tx.velocity().dot(&k) - rx.velocity().dot(&k)) / wavelength;

                let rx_ports = rx_array.port_positions(wavelength, rx.orientation());

                if self.synthetic_array {
                    let f_tx = global_fields(tx_array.antenna(), tx.orientation(), &k);
                    let f_rx = global_fields(rx_array.antenna(), rx.orientation(), &(-k));
                    let base = free_space(d0, wavelength);

                    for (i, p_r) in rx_ports.iter().enumerate() {
                        for (j, p_t) in tx_ports.iter().enumerate() {
                            let pol = f_rx[i % rx_dirs].dot(&f_tx[j % tx_dirs]);
                            let shift = k0 * (k.dot(p_t) - k.dot(p_r));
                            a[[r, i, t, j]] = base * pol * Complex64::from_polar(1.0, shift);
                            tau[[r, i, t, j]] = d0 / SPEED_OF_LIGHT;
                        }
                    }
                } else {
                    for (i, p_r) in rx_ports.iter().enumerate() {
                        for (j, p_t) in tx_ports.iter().enumerate() {
                            let d_vec = (rx.position() + p_r) - (tx.position() + p_t);
                            let d = d_vec.norm();
                            let k = d_vec / d;
                            let f_tx = global_fields(tx_array.antenna(), tx.orientation(), &k);
                            let f_rx = global_fields(rx_array.antenna(), rx.orientation(), &(-k));
                            let pol = f_rx[i % rx_dirs].dot(&f_tx[j % tx_dirs]);
                            a[[r, i, t, j]] = free_space(d, wavelength) * pol;
                            tau[[r, i, t, j]] = d / SPEED_OF_LIGHT;
                        }
                    }
                }
            }
        }

        debug!(
            "Computed line-of-sight paths for {} transmitters and {} receivers",
            n_tx, n_rx
        );

        Ok(LosPaths {
            a,
            tau,
            doppler,
            valid,
            synthetic: self.synthetic_array,
        })
    }
}
