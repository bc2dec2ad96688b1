//! Antenna patterns and polarization
//!
//! Patterns are defined for a vertically polarized element in the local
//! coordinate system of the antenna and return the zenith field component.
//! Slanted and dual polarizations are derived from it with one of two
//! polarization models.

use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};
use std::fmt;
use std::str::FromStr;

use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use super::AntennaError;
use crate::constants::{
    NEAR_ZERO, TR38901_ATTENUATION_LIMIT_DB, TR38901_BEAMWIDTH_DEG, TR38901_MAX_GAIN_DB,
};
use crate::math::{db_2_power, wrap_phase};

/// Zenith and azimuth field components `(c_θ, c_φ)`
pub type FieldPair = (Complex64, Complex64);

/// Radiation pattern of a single vertically polarized element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AntennaPattern {
    /// Isotropic radiator
    #[default]
    Iso,
    /// Short dipole
    Dipole,
    /// Half-wavelength dipole
    HwDipole,
    /// 3GPP TR 38.901 antenna element
    Tr38901,
}

impl AntennaPattern {
    /// Zenith field component c_θ for the local angles (θ, φ)
    pub fn c_theta(&self, theta: f64, phi: f64) -> f64 {
        match self {
            AntennaPattern::Iso => 1.0,
            AntennaPattern::Dipole => 1.5_f64.sqrt() * theta.sin(),
            AntennaPattern::HwDipole => {
                let sin_theta = theta.sin();
                if sin_theta.abs() < NEAR_ZERO {
                    0.0
                } else {
                    1.643_f64.sqrt() * (FRAC_PI_2 * theta.cos()).cos() / sin_theta
                }
            }
            AntennaPattern::Tr38901 => {
                let beamwidth = TR38901_BEAMWIDTH_DEG.to_radians();
                let limit = TR38901_ATTENUATION_LIMIT_DB;
                let phi = wrap_phase(phi);

                let a_v = -(12.0 * ((theta - FRAC_PI_2) / beamwidth).powi(2)).min(limit);
                let a_h = -(12.0 * (phi / beamwidth).powi(2)).min(limit);
                let a = -(-(a_v + a_h)).min(limit);
                db_2_power(a + TR38901_MAX_GAIN_DB).sqrt()
            }
        }
    }

    /// Name as written in scene files
    pub fn as_str(&self) -> &'static str {
        match self {
            AntennaPattern::Iso => "iso",
            AntennaPattern::Dipole => "dipole",
            AntennaPattern::HwDipole => "hw_dipole",
            AntennaPattern::Tr38901 => "tr38901",
        }
    }
}

impl FromStr for AntennaPattern {
    type Err = AntennaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "iso" => Ok(AntennaPattern::Iso),
            "dipole" => Ok(AntennaPattern::Dipole),
            "hw_dipole" => Ok(AntennaPattern::HwDipole),
            "tr38901" => Ok(AntennaPattern::Tr38901),
            _ => Err(AntennaError::UnknownPattern(s.to_string())),
        }
    }
}

impl fmt::Display for AntennaPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Polarization of an antenna element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Polarization {
    /// Vertical (slant 0)
    #[default]
    #[serde(rename = "V")]
    V,
    /// Horizontal (slant π/2)
    #[serde(rename = "H")]
    H,
    /// Dual polarized, slants ±π/4
    #[serde(rename = "VH")]
    VH,
    /// Dual polarized, slants 0 and π/2
    #[serde(rename = "cross")]
    Cross,
}

impl Polarization {
    /// Slant angles of the polarization directions [rad]
    pub fn slant_angles(&self) -> &'static [f64] {
        match self {
            Polarization::V => &[0.0],
            Polarization::H => &[FRAC_PI_2],
            Polarization::VH => &[FRAC_PI_4, -FRAC_PI_4],
            Polarization::Cross => &[0.0, FRAC_PI_2],
        }
    }

    /// Number of polarization directions (1 or 2)
    pub fn num_directions(&self) -> usize {
        self.slant_angles().len()
    }

    /// Name as written in scene files
    pub fn as_str(&self) -> &'static str {
        match self {
            Polarization::V => "V",
            Polarization::H => "H",
            Polarization::VH => "VH",
            Polarization::Cross => "cross",
        }
    }
}

impl FromStr for Polarization {
    type Err = AntennaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "V" | "v" => Ok(Polarization::V),
            "H" | "h" => Ok(Polarization::H),
            "VH" | "vh" => Ok(Polarization::VH),
            "cross" | "Cross" => Ok(Polarization::Cross),
            _ => Err(AntennaError::UnknownPolarization(s.to_string())),
        }
    }
}

impl fmt::Display for Polarization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Model used to turn a vertically polarized pattern into a slanted one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum PolarizationModel {
    /// Model-1 of 3GPP TR 38.901: angle-dependent polarization rotation
    One,
    /// Model-2 of 3GPP TR 38.901: constant slant
    #[default]
    Two,
}

impl PolarizationModel {
    /// Apply the model to the vertical field `c_theta` for slant angle `slant`
    pub fn apply(&self, c_theta: f64, theta: f64, phi: f64, slant: f64) -> (f64, f64) {
        match self {
            PolarizationModel::Two => {
                let (s, c) = slant.sin_cos();
                (c_theta * c, c_theta * s)
            }
            PolarizationModel::One => {
                let (sin_z, cos_z) = slant.sin_cos();
                let (sin_t, cos_t) = theta.sin_cos();
                let (sin_p, cos_p) = phi.sin_cos();

                let norm = (1.0 - (cos_z * cos_t - sin_z * sin_p * sin_t).powi(2))
                    .max(0.0)
                    .sqrt();
                let (sin_psi, cos_psi) = if norm < NEAR_ZERO {
                    slant.sin_cos()
                } else {
                    (
                        sin_z * cos_p / norm,
                        (cos_z * sin_t + sin_z * sin_p * cos_t) / norm,
                    )
                };
                (c_theta * cos_psi, c_theta * sin_psi)
            }
        }
    }
}

impl TryFrom<u8> for PolarizationModel {
    type Error = AntennaError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(PolarizationModel::One),
            2 => Ok(PolarizationModel::Two),
            v => Err(AntennaError::UnknownPolarizationModel(v)),
        }
    }
}

impl From<PolarizationModel> for u8 {
    fn from(model: PolarizationModel) -> Self {
        match model {
            PolarizationModel::One => 1,
            PolarizationModel::Two => 2,
        }
    }
}

impl fmt::Display for PolarizationModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", u8::from(*self))
    }
}

/// An antenna: a pattern radiated in one or two polarization directions
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Antenna {
    pub pattern: AntennaPattern,
    #[serde(default)]
    pub polarization: Polarization,
    #[serde(default)]
    pub polarization_model: PolarizationModel,
}

impl Antenna {
    pub fn new(
        pattern: AntennaPattern,
        polarization: Polarization,
        polarization_model: PolarizationModel,
    ) -> Self {
        Self {
            pattern,
            polarization,
            polarization_model,
        }
    }

    /// Number of polarization directions
    #[inline]
    pub fn num_directions(&self) -> usize {
        self.polarization.num_directions()
    }

    /// Field components for every polarization direction at local (θ, φ)
    pub fn fields(&self, theta: f64, phi: f64) -> Vec<FieldPair> {
        let c = self.pattern.c_theta(theta, phi);
        self.polarization
            .slant_angles()
            .iter()
            .map(|&slant| {
                let (ct, cp) = self.polarization_model.apply(c, theta, phi, slant);
                (Complex64::new(ct, 0.0), Complex64::new(cp, 0.0))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    #[test]
    fn test_iso_pattern() {
        let ant = Antenna::default();
        let f = ant.fields(0.3, 1.2);
        assert_eq!(f.len(), 1);
        assert_relative_eq!(f[0].0.re, 1.0, epsilon = 1e-12);
        assert_relative_eq!(f[0].1.norm(), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_dipole_peak_and_null() {
        let p = AntennaPattern::Dipole;
        assert_relative_eq!(p.c_theta(FRAC_PI_2, 0.0), 1.5_f64.sqrt(), epsilon = 1e-12);
        assert_relative_eq!(p.c_theta(0.0, 0.0), 0.0, epsilon = 1e-12);

        let hw = AntennaPattern::HwDipole;
        assert_relative_eq!(hw.c_theta(FRAC_PI_2, 0.0), 1.643_f64.sqrt(), epsilon = 1e-12);
        assert_eq!(hw.c_theta(0.0, 0.0), 0.0);
    }

    #[test]
    fn test_tr38901_boresight_and_back() {
        let p = AntennaPattern::Tr38901;
        let peak = p.c_theta(FRAC_PI_2, 0.0).powi(2);
        assert_relative_eq!(peak, db_2_power(8.0), epsilon = 1e-9);

        // Half-power beamwidth: -3 dB at ±32.5 degrees
        let edge = p.c_theta(FRAC_PI_2, (32.5_f64).to_radians()).powi(2);
        assert_relative_eq!(edge / peak, db_2_power(-3.0), epsilon = 1e-9);

        // Back lobe limited by the 30 dB front-back ratio
        let back = p.c_theta(FRAC_PI_2, PI).powi(2);
        assert_relative_eq!(back / peak, db_2_power(-30.0), epsilon = 1e-9);
    }

    #[test]
    fn test_slant_model_two() {
        let ant = Antenna::new(AntennaPattern::Iso, Polarization::VH, PolarizationModel::Two);
        let f = ant.fields(FRAC_PI_2, 0.0);
        assert_eq!(f.len(), 2);
        for (ct, cp) in &f {
            assert_relative_eq!(ct.norm_sqr() + cp.norm_sqr(), 1.0, epsilon = 1e-12);
            assert_relative_eq!(ct.norm_sqr(), 0.5, epsilon = 1e-12);
        }
        assert_relative_eq!(f[1].1.re, -f[0].1.re, epsilon = 1e-12);
    }

    #[test]
    fn test_model_one_matches_vertical_and_preserves_power() {
        let v = Antenna::new(AntennaPattern::Dipole, Polarization::V, PolarizationModel::One);
        let f = v.fields(1.0, 0.4);
        assert_relative_eq!(f[0].0.re, AntennaPattern::Dipole.c_theta(1.0, 0.4), epsilon = 1e-12);
        assert_relative_eq!(f[0].1.re, 0.0, epsilon = 1e-12);

        let cross = Antenna::new(AntennaPattern::Iso, Polarization::Cross, PolarizationModel::One);
        for (ct, cp) in cross.fields(0.8, -1.3) {
            assert_relative_eq!(ct.norm_sqr() + cp.norm_sqr(), 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("hw_dipole".parse::<AntennaPattern>(), Ok(AntennaPattern::HwDipole));
        assert_eq!("TR38901".parse::<AntennaPattern>(), Ok(AntennaPattern::Tr38901));
        assert!("horn".parse::<AntennaPattern>().is_err());
        assert_eq!("cross".parse::<Polarization>(), Ok(Polarization::Cross));
        assert!("X".parse::<Polarization>().is_err());
        assert_eq!(PolarizationModel::try_from(1), Ok(PolarizationModel::One));
        assert!(PolarizationModel::try_from(3).is_err());
    }

    #[test]
    fn test_serde_names() {
        let ant = Antenna::new(AntennaPattern::HwDipole, Polarization::Cross, PolarizationModel::One);
        let json = serde_json::to_string(&ant).unwrap();
        assert_eq!(
            json,
            r#"{"pattern":"hw_dipole","polarization":"cross","polarization_model":1}"#
        );
        let back: Antenna = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ant);
    }
}
