//! Cell grid of a RIS
//!
//! Cell centres are expressed in units of the cell spacing in the local
//! y-z plane. Row 0 is the top row (largest z), column 0 the leftmost
//! column (smallest y), and the grid is centred on the origin.

use super::RisError;

/// Discretization of a RIS into `num_rows × num_cols` cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellGrid {
    num_rows: usize,
    num_cols: usize,
}

impl CellGrid {
    pub fn new(num_rows: usize, num_cols: usize) -> Result<Self, RisError> {
        if num_rows == 0 || num_cols == 0 {
            return Err(RisError::InvalidDimensions {
                rows: num_rows,
                cols: num_cols,
            });
        }
        Ok(Self { num_rows, num_cols })
    }

    #[inline]
    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    #[inline]
    pub fn num_cols(&self) -> usize {
        self.num_cols
    }

    #[inline]
    pub fn num_cells(&self) -> usize {
        self.num_rows * self.num_cols
    }

    /// y coordinate of every column
    pub fn cell_y_positions(&self) -> Vec<f64> {
        let offset = (self.num_cols - 1) as f64 / 2.0;
        (0..self.num_cols).map(|j| j as f64 - offset).collect()
    }

    /// z coordinate of every row
    pub fn cell_z_positions(&self) -> Vec<f64> {
        let offset = (self.num_rows - 1) as f64 / 2.0;
        (0..self.num_rows).map(|i| offset - i as f64).collect()
    }

    /// `(y, z)` centre of every cell, row-major
    pub fn cell_positions(&self) -> Vec<[f64; 2]> {
        let ys = self.cell_y_positions();
        self.cell_z_positions()
            .into_iter()
            .flat_map(|z| ys.iter().map(move |&y| [y, z]))
            .collect()
    }

    /// Fractional `(row, col)` index of a point given in cell units
    pub fn fractional_index(&self, y: f64, z: f64) -> (f64, f64) {
        let row = (self.num_rows - 1) as f64 / 2.0 - z;
        let col = y + (self.num_cols - 1) as f64 / 2.0;
        (row, col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_positions() {
        let grid = CellGrid::new(2, 3).unwrap();
        let pos = grid.cell_positions();

        assert_eq!(pos.len(), 6);
        assert_eq!(pos[0], [-1.0, 0.5]);
        assert_eq!(pos[2], [1.0, 0.5]);
        assert_eq!(pos[3], [-1.0, -0.5]);
    }

    #[test]
    fn test_fractional_index_of_cell_centres() {
        let grid = CellGrid::new(4, 5).unwrap();
        for (k, [y, z]) in grid.cell_positions().into_iter().enumerate() {
            let (row, col) = grid.fractional_index(y, z);
            assert_eq!(row, (k / 5) as f64);
            assert_eq!(col, (k % 5) as f64);
        }
    }

    #[test]
    fn test_rejects_empty_grid() {
        assert_eq!(
            CellGrid::new(0, 3),
            Err(RisError::InvalidDimensions { rows: 0, cols: 3 })
        );
    }
}
