//! Rotations and spherical unit vectors
//!
//! Orientations are given as three angles `[α, β, γ]` in radians applied as
//! `R = Rz(α)·Ry(β)·Rx(γ)`: a rotation around the x-axis by γ, followed by
//! one around the y-axis by β and finally one around the z-axis by α.

use nalgebra::{Matrix3, Vector3};

use crate::constants::NEAR_ZERO;

/// Orientation angles `[α, β, γ]` in radians
pub type Orientation = [f64; 3];

/// Build the rotation matrix for the given orientation
pub fn rotation_matrix(angles: Orientation) -> Matrix3<f64> {
    let (sa, ca) = angles[0].sin_cos();
    let (sb, cb) = angles[1].sin_cos();
    let (sg, cg) = angles[2].sin_cos();

    Matrix3::new(
        ca * cb,
        ca * sb * sg - sa * cg,
        ca * sb * cg + sa * sg,
        sa * cb,
        sa * sb * sg + ca * cg,
        sa * sb * cg - ca * sg,
        -sb,
        cb * sg,
        cb * cg,
    )
}

/// Rotate a vector from local into global coordinates
#[inline]
pub fn rotate(v: &Vector3<f64>, angles: Orientation) -> Vector3<f64> {
    rotation_matrix(angles) * v
}

/// Rotate a vector from global into local coordinates (inverse rotation)
#[inline]
pub fn to_local(v: &Vector3<f64>, angles: Orientation) -> Vector3<f64> {
    rotation_matrix(angles).transpose() * v
}

/// Orientation whose local x-axis points from `from` towards `to`
///
/// Returns None when both points coincide.
pub fn look_at_angles(from: &Vector3<f64>, to: &Vector3<f64>) -> Option<Orientation> {
    let d = to - from;
    let r = d.norm();
    if r < NEAR_ZERO {
        return None;
    }

    let (theta, phi) = theta_phi_from_unit_vec(&(d / r));
    Some([phi, theta - std::f64::consts::FRAC_PI_2, 0.0])
}

/// Zenith and azimuth angles `(θ, φ)` of a unit vector
pub fn theta_phi_from_unit_vec(v: &Vector3<f64>) -> (f64, f64) {
    let theta = v.z.clamp(-1.0, 1.0).acos();
    let phi = v.y.atan2(v.x);
    (theta, phi)
}

/// Radial unit vector r̂(θ, φ)
pub fn r_hat(theta: f64, phi: f64) -> Vector3<f64> {
    let (st, ct) = theta.sin_cos();
    let (sp, cp) = phi.sin_cos();
    Vector3::new(st * cp, st * sp, ct)
}

/// Zenith unit vector θ̂(θ, φ)
pub fn theta_hat(theta: f64, phi: f64) -> Vector3<f64> {
    let (st, ct) = theta.sin_cos();
    let (sp, cp) = phi.sin_cos();
    Vector3::new(ct * cp, ct * sp, -st)
}

/// Azimuth unit vector φ̂(φ)
pub fn phi_hat(phi: f64) -> Vector3<f64> {
    let (sp, cp) = phi.sin_cos();
    Vector3::new(-sp, cp, 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_rotation_is_orthonormal() {
        let r = rotation_matrix([0.3, -1.1, 2.4]);
        let identity = r * r.transpose();

        for i in 0..3 {
            for j in 0..3 {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert_relative_eq!(identity[(i, j)], expected, epsilon = 1e-12);
            }
        }
        assert_relative_eq!(r.determinant(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_rotation_around_z() {
        let v = rotate(&Vector3::x(), [FRAC_PI_2, 0.0, 0.0]);
        assert_relative_eq!(v.x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(v.y, 1.0, epsilon = 1e-12);
        assert_relative_eq!(v.z, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_to_local_inverts_rotate() {
        let angles = [0.7, 0.2, -0.4];
        let v = Vector3::new(1.0, -2.0, 0.5);
        let back = to_local(&rotate(&v, angles), angles);
        assert_relative_eq!((back - v).norm(), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_look_at_points_x_axis() {
        let from = Vector3::new(1.0, 2.0, 3.0);
        let to = Vector3::new(-4.0, 6.0, 10.0);
        let angles = look_at_angles(&from, &to).unwrap();

        let x_axis = rotate(&Vector3::x(), angles);
        let expected = (to - from).normalize();
        assert_relative_eq!((x_axis - expected).norm(), 0.0, epsilon = 1e-12);
        assert_eq!(angles[2], 0.0);
    }

    #[test]
    fn test_look_at_same_point() {
        let p = Vector3::new(1.0, 1.0, 1.0);
        assert!(look_at_angles(&p, &p).is_none());
    }

    #[test]
    fn test_spherical_basis() {
        let (theta, phi) = (1.1, -2.3);
        let r = r_hat(theta, phi);
        let t = theta_hat(theta, phi);
        let p = phi_hat(phi);

        assert_relative_eq!(r.dot(&t), 0.0, epsilon = 1e-12);
        assert_relative_eq!(r.dot(&p), 0.0, epsilon = 1e-12);
        assert_relative_eq!(t.dot(&p), 0.0, epsilon = 1e-12);
        // Right-handed: r × θ = φ
        assert_relative_eq!((r.cross(&t) - p).norm(), 0.0, epsilon = 1e-12);

        let (theta2, phi2) = theta_phi_from_unit_vec(&r);
        assert_relative_eq!(theta2, theta, epsilon = 1e-12);
        assert_relative_eq!(phi2, phi, epsilon = 1e-12);
    }

    #[test]
    fn test_theta_phi_poles() {
        let (theta, _) = theta_phi_from_unit_vec(&Vector3::z());
        assert_relative_eq!(theta, 0.0, epsilon = 1e-12);
        let (theta, _) = theta_phi_from_unit_vec(&(-Vector3::z()));
        assert_relative_eq!(theta, PI, epsilon = 1e-12);
    }
}
