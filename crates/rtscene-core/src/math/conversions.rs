//! Unit conversion functions
//!
//! Provides conversions between linear and logarithmic power/amplitude
//! quantities and phase wrapping.

use std::f64::consts::PI;

/// Convert a power ratio to dB (10*log10(p))
pub fn power_2_db(p: f64) -> f64 {
    10.0 * p.log10()
}

/// Convert dB to a power ratio (10^(dB/10))
pub fn db_2_power(db: f64) -> f64 {
    10.0_f64.powf(db / 10.0)
}

/// Convert an amplitude ratio to dB (20*log10(a))
pub fn amplitude_2_db(a: f64) -> f64 {
    20.0 * a.log10()
}

/// Convert dB to an amplitude ratio (10^(dB/20))
pub fn db_2_amplitude(db: f64) -> f64 {
    10.0_f64.powf(db / 20.0)
}

/// Convert dBm to Watt
pub fn dbm_2_watt(dbm: f64) -> f64 {
    db_2_power(dbm - 30.0)
}

/// Convert Watt to dBm
pub fn watt_2_dbm(w: f64) -> f64 {
    power_2_db(w) + 30.0
}

/// Wrap a phase in radians to (-π, π]
pub fn wrap_phase(rad: f64) -> f64 {
    let wrapped = rad.rem_euclid(2.0 * PI);
    if wrapped > PI {
        wrapped - 2.0 * PI
    } else {
        wrapped
    }
}
