//! Profile interpolators
//!
//! Map the discrete per-cell values of one mode to a continuous function of
//! the local surface coordinates `(y, z)` in metres, together with its first
//! and second spatial derivatives.

use std::fmt::Debug;

use ndarray::ArrayView2;

use super::cell_grid::CellGrid;

/// Value, gradient `[∂/∂y, ∂/∂z]` and Hessian of a profile at one point
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ProfileSample {
    pub value: f64,
    pub gradient: [f64; 2],
    /// `[[∂²/∂y², ∂²/∂y∂z], [∂²/∂z∂y, ∂²/∂z²]]`
    pub hessian: [[f64; 2]; 2],
}

/// Interpolates the discrete values of a profile
pub trait ProfileInterpolator: Debug + Send + Sync {
    /// Evaluate the profile at `point` (local `(y, z)` in metres)
    ///
    /// `values` has shape `[num_rows, num_cols]` and `spacing` is the cell
    /// spacing in metres. A non-finite point yields a non-finite sample.
    fn interpolate(
        &self,
        values: ArrayView2<'_, f64>,
        grid: &CellGrid,
        spacing: f64,
        point: [f64; 2],
    ) -> ProfileSample;
}

/// Interpolation with second-order Lagrange polynomials
///
/// Each axis uses the three cells closest to the point, shifted inwards at
/// the borders of the surface. Axes with only two cells fall back to
/// linear interpolation, axes with a single cell are constant.
#[derive(Debug, Clone, Copy, Default)]
pub struct LagrangeProfileInterpolator;

/// Lagrange basis along one axis, in fractional index units
struct Stencil {
    start: usize,
    len: usize,
    w: [f64; 3],
    dw: [f64; 3],
    d2w: [f64; 3],
}

impl Stencil {
    fn new(u: f64, n: usize) -> Self {
        match n {
            1 => Self {
                start: 0,
                len: 1,
                w: [1.0, 0.0, 0.0],
                dw: [0.0; 3],
                d2w: [0.0; 3],
            },
            2 => Self {
                start: 0,
                len: 2,
                w: [1.0 - u, u, 0.0],
                dw: [-1.0, 1.0, 0.0],
                d2w: [0.0; 3],
            },
            // NaN propagates through the weights instead of the index
            _ => {
                let centre = if u.is_nan() {
                    1.0
                } else {
                    u.round().clamp(1.0, (n - 2) as f64)
                };
                let t = u - centre;
                Self {
                    start: centre as usize - 1,
                    len: 3,
                    w: [0.5 * t * (t - 1.0), 1.0 - t * t, 0.5 * t * (t + 1.0)],
                    dw: [t - 0.5, -2.0 * t, t + 0.5],
                    d2w: [1.0, -2.0, 1.0],
                }
            }
        }
    }
}

impl ProfileInterpolator for LagrangeProfileInterpolator {
    fn interpolate(
        &self,
        values: ArrayView2<'_, f64>,
        grid: &CellGrid,
        spacing: f64,
        point: [f64; 2],
    ) -> ProfileSample {
        let (row_u, col_u) = grid.fractional_index(point[0] / spacing, point[1] / spacing);
        let rows = Stencil::new(row_u, grid.num_rows());
        let cols = Stencil::new(col_u, grid.num_cols());

        // Sums over the stencil: v, ∂col, ∂row, ∂col², ∂row², ∂row∂col
        let mut acc = [0.0; 6];
        for a in 0..rows.len {
            for b in 0..cols.len {
                let v = values[[rows.start + a, cols.start + b]];
                acc[0] += rows.w[a] * cols.w[b] * v;
                acc[1] += rows.w[a] * cols.dw[b] * v;
                acc[2] += rows.dw[a] * cols.w[b] * v;
                acc[3] += rows.w[a] * cols.d2w[b] * v;
                acc[4] += rows.d2w[a] * cols.w[b] * v;
                acc[5] += rows.dw[a] * cols.dw[b] * v;
            }
        }

        // Columns grow with y, rows grow against z
        let inv = 1.0 / spacing;
        let inv2 = inv * inv;
        let d_yz = -acc[5] * inv2;
        ProfileSample {
            value: acc[0],
            gradient: [acc[1] * inv, -acc[2] * inv],
            hessian: [[acc[3] * inv2, d_yz], [d_yz, acc[4] * inv2]],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::Array2;

    fn quadratic(y: f64, z: f64) -> f64 {
        0.3 + 1.2 * y - 0.7 * z + 0.5 * y * y + 0.25 * y * z - 0.8 * z * z
    }

    fn sampled_quadratic(grid: &CellGrid, spacing: f64) -> Array2<f64> {
        let ys = grid.cell_y_positions();
        let zs = grid.cell_z_positions();
        Array2::from_shape_fn((grid.num_rows(), grid.num_cols()), |(i, j)| {
            quadratic(ys[j] * spacing, zs[i] * spacing)
        })
    }

    #[test]
    fn test_reproduces_cell_values() {
        let grid = CellGrid::new(4, 5).unwrap();
        let values = Array2::from_shape_fn((4, 5), |(i, j)| (i * 7 + j * 3) as f64 % 5.0);
        let spacing = 0.02;

        for (k, [y, z]) in grid.cell_positions().into_iter().enumerate() {
            let s = LagrangeProfileInterpolator.interpolate(
                values.view(),
                &grid,
                spacing,
                [y * spacing, z * spacing],
            );
            assert_relative_eq!(s.value, values[[k / 5, k % 5]], epsilon = 1e-12);
        }
    }

    #[test]
    fn test_exact_for_quadratics() {
        let grid = CellGrid::new(6, 7).unwrap();
        let spacing = 0.05;
        let values = sampled_quadratic(&grid, spacing);

        for &(y, z) in &[(0.013, -0.041), (-0.12, 0.09), (0.16, 0.11), (0.0, 0.0)] {
            let s = LagrangeProfileInterpolator.interpolate(values.view(), &grid, spacing, [y, z]);
            assert_relative_eq!(s.value, quadratic(y, z), epsilon = 1e-10);
            assert_relative_eq!(s.gradient[0], 1.2 + y + 0.25 * z, epsilon = 1e-9);
            assert_relative_eq!(s.gradient[1], -0.7 + 0.25 * y - 1.6 * z, epsilon = 1e-9);
            assert_relative_eq!(s.hessian[0][0], 1.0, epsilon = 1e-7);
            assert_relative_eq!(s.hessian[1][1], -1.6, epsilon = 1e-7);
            assert_relative_eq!(s.hessian[0][1], 0.25, epsilon = 1e-7);
        }
    }

    #[test]
    fn test_small_grids() {
        // Single cell: constant
        let grid = CellGrid::new(1, 1).unwrap();
        let values = Array2::from_elem((1, 1), 2.5);
        let s = LagrangeProfileInterpolator.interpolate(values.view(), &grid, 0.1, [0.3, -0.2]);
        assert_eq!(s.value, 2.5);
        assert_eq!(s.gradient, [0.0, 0.0]);

        // Two columns: linear along y
        let grid = CellGrid::new(1, 2).unwrap();
        let values = Array2::from_shape_vec((1, 2), vec![1.0, 3.0]).unwrap();
        let s = LagrangeProfileInterpolator.interpolate(values.view(), &grid, 0.1, [0.0, 0.0]);
        assert_relative_eq!(s.value, 2.0, epsilon = 1e-12);
        assert_relative_eq!(s.gradient[0], 20.0, epsilon = 1e-9);
        assert_relative_eq!(s.gradient[1], 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_nan_point_gives_nan_sample() {
        let grid = CellGrid::new(4, 5).unwrap();
        let values = sampled_quadratic(&grid, 0.1);

        let s = LagrangeProfileInterpolator.interpolate(values.view(), &grid, 0.1, [f64::NAN, 0.0]);
        assert!(s.value.is_nan());
        assert!(s.gradient[0].is_nan());

        let s = LagrangeProfileInterpolator.interpolate(values.view(), &grid, 0.1, [0.0, f64::NAN]);
        assert!(s.value.is_nan());
    }
}
