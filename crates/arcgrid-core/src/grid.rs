//! Grid: rectangular 2D array of small values (0 = background, 1-9 = colors).
//!
//! The rectangularity invariant is enforced once, at construction (including
//! the serde boundary). Everything downstream can rely on it and stay
//! panic-free.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a raw cell matrix was rejected as a Grid.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("grid is empty")]
    Empty,
    #[error("grid row {row} has {len} cells, expected {expected}")]
    Ragged {
        row: usize,
        len: usize,
        expected: usize,
    },
}

/// A non-empty rectangular grid of cell values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<u8>>", into = "Vec<Vec<u8>>")]
pub struct Grid {
    cells: Vec<Vec<u8>>,
}

impl Grid {
    /// Validate and wrap a raw cell matrix.
    pub fn new(cells: Vec<Vec<u8>>) -> Result<Self, GridError> {
        if cells.is_empty() || cells[0].is_empty() {
            return Err(GridError::Empty);
        }
        let expected = cells[0].len();
        for (row, r) in cells.iter().enumerate() {
            if r.len() != expected {
                return Err(GridError::Ragged {
                    row,
                    len: r.len(),
                    expected,
                });
            }
        }
        Ok(Self { cells })
    }

    /// Number of rows. Always >= 1.
    pub fn rows(&self) -> usize {
        self.cells.len()
    }

    /// Number of columns. Always >= 1.
    pub fn cols(&self) -> usize {
        self.cells[0].len()
    }

    /// Total cell count.
    pub fn cell_count(&self) -> usize {
        self.rows() * self.cols()
    }

    /// Value at (row, col); out-of-range reads as background (0).
    pub fn get(&self, row: usize, col: usize) -> u8 {
        self.cells
            .get(row)
            .and_then(|r| r.get(col))
            .copied()
            .unwrap_or(0)
    }

    /// Borrow the underlying rows.
    pub fn rows_slice(&self) -> &[Vec<u8>] {
        &self.cells
    }

    /// Iterate cells in row-major order as (row, col, value).
    pub fn iter_cells(&self) -> impl Iterator<Item = (usize, usize, u8)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .flat_map(|(r, row)| row.iter().enumerate().map(move |(c, &v)| (r, c, v)))
    }

    /// Non-zero values flattened in row-major order.
    pub fn non_zero_values(&self) -> Vec<u8> {
        self.cells
            .iter()
            .flat_map(|row| row.iter().copied().filter(|&v| v != 0))
            .collect()
    }

    /// Number of distinct non-zero values present.
    pub fn distinct_colors(&self) -> usize {
        let mut seen = [false; 256];
        let mut count = 0;
        for row in &self.cells {
            for &v in row {
                if v != 0 && !seen[v as usize] {
                    seen[v as usize] = true;
                    count += 1;
                }
            }
        }
        count
    }
}

impl TryFrom<Vec<Vec<u8>>> for Grid {
    type Error = GridError;

    fn try_from(cells: Vec<Vec<u8>>) -> Result<Self, Self::Error> {
        Grid::new(cells)
    }
}

impl From<Grid> for Vec<Vec<u8>> {
    fn from(grid: Grid) -> Self {
        grid.cells
    }
}

/// One training or test pair. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Example {
    pub input: Grid,
    pub output: Grid,
}

impl Example {
    pub fn new(input: Grid, output: Grid) -> Self {
        Self { input, output }
    }
}

#[cfg(test)]
pub(crate) fn grid(cells: &[&[u8]]) -> Grid {
    Grid::new(cells.iter().map(|r| r.to_vec()).collect()).unwrap()
}
