//! Pure grid transforms: rotation, reflection, similarity, tiling.
//!
//! All functions are total over valid Grids and allocate fresh output;
//! nothing here mutates or panics.

use crate::grid::Grid;

/// Quarter-turn rotations. Degrees outside {90, 180, 270} do not exist in
/// the type; see [`rotate_degrees`] for the lenient numeric entry point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rotation {
    /// 90 degrees clockwise.
    Quarter,
    /// 180 degrees.
    Half,
    /// 270 degrees clockwise.
    ThreeQuarter,
}

impl Rotation {
    pub const ALL: [Rotation; 3] = [Rotation::Quarter, Rotation::Half, Rotation::ThreeQuarter];

    pub fn degrees(self) -> u32 {
        match self {
            Rotation::Quarter => 90,
            Rotation::Half => 180,
            Rotation::ThreeQuarter => 270,
        }
    }
}

/// Reflection axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Mirror each row (left-right flip).
    Horizontal,
    /// Mirror the row order (top-bottom flip).
    Vertical,
}

impl Axis {
    pub const ALL: [Axis; 2] = [Axis::Horizontal, Axis::Vertical];

    pub fn name(self) -> &'static str {
        match self {
            Axis::Horizontal => "horizontal",
            Axis::Vertical => "vertical",
        }
    }
}

/// Rotate a grid clockwise by a quarter-turn multiple.
pub fn rotate(grid: &Grid, rotation: Rotation) -> Grid {
    let (rows, cols) = (grid.rows(), grid.cols());
    let cells = match rotation {
        // Transpose, then reverse each row.
        Rotation::Quarter => (0..cols)
            .map(|c| (0..rows).rev().map(|r| grid.get(r, c)).collect())
            .collect(),
        // Reverse row order and each row.
        Rotation::Half => (0..rows)
            .rev()
            .map(|r| (0..cols).rev().map(|c| grid.get(r, c)).collect())
            .collect(),
        // Transpose, then reverse row order.
        Rotation::ThreeQuarter => (0..cols)
            .rev()
            .map(|c| (0..rows).map(|r| grid.get(r, c)).collect())
            .collect(),
    };
    Grid::new(cells).expect("rotation preserves rectangularity")
}

/// Numeric rotation shim kept for harness compatibility: an angle outside
/// {90, 180, 270} returns the grid unchanged.
pub fn rotate_degrees(grid: &Grid, degrees: u32) -> Grid {
    match degrees {
        90 => rotate(grid, Rotation::Quarter),
        180 => rotate(grid, Rotation::Half),
        270 => rotate(grid, Rotation::ThreeQuarter),
        _ => grid.clone(),
    }
}

/// Reflect a grid across an axis. Involution: applying twice restores the
/// original.
pub fn reflect(grid: &Grid, axis: Axis) -> Grid {
    let cells = match axis {
        Axis::Horizontal => grid
            .rows_slice()
            .iter()
            .map(|row| row.iter().rev().copied().collect())
            .collect(),
        Axis::Vertical => grid.rows_slice().iter().rev().cloned().collect(),
    };
    Grid::new(cells).expect("reflection preserves rectangularity")
}

/// Cell-wise similarity over the bounding box of both grids, reading
/// out-of-range cells as background. Symmetric; `similarity(g, g) == 1.0`.
pub fn similarity(a: &Grid, b: &Grid) -> f64 {
    let rows = a.rows().max(b.rows());
    let cols = a.cols().max(b.cols());
    let total = (rows * cols) as f64;
    let mut matches = 0usize;
    for r in 0..rows {
        for c in 0..cols {
            if a.get(r, c) == b.get(r, c) {
                matches += 1;
            }
        }
    }
    matches as f64 / total
}

/// Repeat the grid in a `factor x factor` block layout. Factor 0 returns the
/// grid unchanged.
pub fn tile(grid: &Grid, factor: usize) -> Grid {
    if factor == 0 {
        return grid.clone();
    }
    let (rows, cols) = (grid.rows(), grid.cols());
    let cells = (0..rows * factor)
        .map(|r| (0..cols * factor).map(|c| grid.get(r % rows, c % cols)).collect())
        .collect();
    Grid::new(cells).expect("tiling preserves rectangularity")
}

/// Masked deployment: every non-zero cell expands into a full copy of the
/// grid at its own block position; zero cells leave their block blank.
/// Output is `rows^2 x cols^2`.
pub fn masked_deploy(grid: &Grid) -> Grid {
    let (rows, cols) = (grid.rows(), grid.cols());
    let cells = (0..rows * rows)
        .map(|r| {
            (0..cols * cols)
                .map(|c| {
                    if grid.get(r / rows, c / cols) != 0 {
                        grid.get(r % rows, c % cols)
                    } else {
                        0
                    }
                })
                .collect()
        })
        .collect();
    Grid::new(cells).expect("deployment preserves rectangularity")
}

/// Nearest-neighbor rescale by a homothety factor. Integer factors upscale;
/// 0.5 keeps every other cell. Factors outside {0.5, 1, 2, 3, 4} return None.
pub fn scale(grid: &Grid, factor: f64) -> Option<Grid> {
    if (factor - 0.5).abs() < f64::EPSILON {
        let rows = (grid.rows() / 2).max(1);
        let cols = (grid.cols() / 2).max(1);
        let cells = (0..rows)
            .map(|r| (0..cols).map(|c| grid.get(r * 2, c * 2)).collect())
            .collect();
        return Grid::new(cells).ok();
    }
    let k = factor as usize;
    if !(1..=4).contains(&k) || (factor - k as f64).abs() > f64::EPSILON {
        return None;
    }
    let cells = (0..grid.rows() * k)
        .map(|r| (0..grid.cols() * k).map(|c| grid.get(r / k, c / k)).collect())
        .collect();
    Grid::new(cells).ok()
}
