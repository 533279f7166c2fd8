//! The concrete solving approaches: each derives a transform from the
//! training pairs, then applies it to arbitrary grids.
//!
//! Derivation and application are split so cross-validation can re-apply
//! the exact same transform to every training input.

use std::collections::{BTreeMap, BTreeSet};

use thiserror::Error;

use crate::grid::{Example, Grid};
use crate::ops;

/// Why an approach could not produce a transform or an output.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApproachError {
    #[error("approach not applicable: {0}")]
    NotApplicable(&'static str),
    #[error("inconsistent training evidence: {0}")]
    Inconsistent(&'static str),
}

/// The fixed, ordered approach list. Order matters: confidence ties break
/// by earlier position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApproachKind {
    ColorMapping,
    MarkerErasure,
    Tiling,
    MaskedDeployment,
    Identity,
}

impl ApproachKind {
    pub const ORDER: [ApproachKind; 5] = [
        ApproachKind::ColorMapping,
        ApproachKind::MarkerErasure,
        ApproachKind::Tiling,
        ApproachKind::MaskedDeployment,
        ApproachKind::Identity,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ApproachKind::ColorMapping => "color_mapping",
            ApproachKind::MarkerErasure => "marker_erasure",
            ApproachKind::Tiling => "tiling",
            ApproachKind::MaskedDeployment => "masked_deployment",
            ApproachKind::Identity => "identity",
        }
    }

    /// Heuristic bonus on top of the 0.5 base confidence.
    pub fn bonus(self) -> f64 {
        match self {
            ApproachKind::ColorMapping => 0.2,
            ApproachKind::MarkerErasure => 0.15,
            ApproachKind::Tiling => 0.2,
            ApproachKind::MaskedDeployment => 0.25,
            ApproachKind::Identity => 0.0,
        }
    }

    /// Derive this approach's transform from the training pairs.
    pub fn derive(self, train: &[Example]) -> Result<Transform, ApproachError> {
        match self {
            ApproachKind::ColorMapping => derive_color_mapping(train),
            ApproachKind::MarkerErasure => derive_marker_erasure(train),
            ApproachKind::Tiling => derive_tiling(train),
            ApproachKind::MaskedDeployment => derive_masked_deployment(train),
            ApproachKind::Identity => Ok(Transform::Identity),
        }
    }
}

impl std::fmt::Display for ApproachKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A derived transformation, re-applicable to any grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transform {
    /// Replace each non-zero value through the map; unmapped values pass.
    ColorMap(BTreeMap<u8, u8>),
    /// Erase the marker colors to background.
    EraseColors(BTreeSet<u8>),
    /// Repeat the grid in a factor x factor block layout.
    Tile(usize),
    /// Expand non-zero cells into full grid copies.
    MaskedDeploy,
    Identity,
}

impl Transform {
    /// Apply the transform to a grid.
    pub fn apply(&self, grid: &Grid) -> Result<Grid, ApproachError> {
        match self {
            Transform::ColorMap(map) => {
                let cells = grid
                    .rows_slice()
                    .iter()
                    .map(|row| {
                        row.iter()
                            .map(|&v| map.get(&v).copied().unwrap_or(v))
                            .collect()
                    })
                    .collect();
                Grid::new(cells).map_err(|_| ApproachError::NotApplicable("remap broke the grid"))
            }
            Transform::EraseColors(markers) => {
                let cells = grid
                    .rows_slice()
                    .iter()
                    .map(|row| {
                        row.iter()
                            .map(|&v| if markers.contains(&v) { 0 } else { v })
                            .collect()
                    })
                    .collect();
                Grid::new(cells).map_err(|_| ApproachError::NotApplicable("erase broke the grid"))
            }
            Transform::Tile(factor) => Ok(ops::tile(grid, *factor)),
            Transform::MaskedDeploy => Ok(ops::masked_deploy(grid)),
            Transform::Identity => Ok(grid.clone()),
        }
    }
}

/// Global color remap: every training pair must agree on a single mapping
/// over co-located non-zero cells, and the mapping must change something.
fn derive_color_mapping(train: &[Example]) -> Result<Transform, ApproachError> {
    if train.is_empty() {
        return Err(ApproachError::NotApplicable("no training examples"));
    }
    let mut map: BTreeMap<u8, u8> = BTreeMap::new();
    for example in train {
        if example.input.rows() != example.output.rows()
            || example.input.cols() != example.output.cols()
        {
            return Err(ApproachError::NotApplicable(
                "color mapping needs same-size pairs",
            ));
        }
        for (r, c, a) in example.input.iter_cells() {
            let b = example.output.get(r, c);
            if a == 0 || b == 0 {
                continue;
            }
            match map.get(&a) {
                Some(&prev) if prev != b => {
                    return Err(ApproachError::Inconsistent(
                        "input color maps to several outputs",
                    ));
                }
                _ => {
                    map.insert(a, b);
                }
            }
        }
    }
    if map.iter().all(|(a, b)| a == b) {
        return Err(ApproachError::NotApplicable("mapping is the identity"));
    }
    Ok(Transform::ColorMap(map))
}

/// Marker erasure: colors present in every training input but absent from
/// the corresponding outputs are treated as scaffolding and erased.
fn derive_marker_erasure(train: &[Example]) -> Result<Transform, ApproachError> {
    if train.is_empty() {
        return Err(ApproachError::NotApplicable("no training examples"));
    }
    let mut markers: Option<BTreeSet<u8>> = None;
    for example in train {
        let in_colors: BTreeSet<u8> = example.input.non_zero_values().into_iter().collect();
        let out_colors: BTreeSet<u8> = example.output.non_zero_values().into_iter().collect();
        let erased: BTreeSet<u8> = in_colors.difference(&out_colors).copied().collect();
        markers = Some(match markers {
            None => erased,
            Some(prev) => prev.intersection(&erased).copied().collect(),
        });
    }
    match markers {
        Some(m) if !m.is_empty() => Ok(Transform::EraseColors(m)),
        _ => Err(ApproachError::NotApplicable("no common erased color")),
    }
}

/// Tiling: every training output must be the same integer multiple (>= 2)
/// of its input on both axes.
fn derive_tiling(train: &[Example]) -> Result<Transform, ApproachError> {
    if train.is_empty() {
        return Err(ApproachError::NotApplicable("no training examples"));
    }
    let mut factor: Option<usize> = None;
    for example in train {
        let (ir, ic) = (example.input.rows(), example.input.cols());
        let (or_, oc) = (example.output.rows(), example.output.cols());
        if or_ % ir != 0 || oc % ic != 0 {
            return Err(ApproachError::NotApplicable("output is not a multiple"));
        }
        let k = or_ / ir;
        if k < 2 || oc / ic != k {
            return Err(ApproachError::NotApplicable("no uniform tiling factor"));
        }
        match factor {
            Some(prev) if prev != k => {
                return Err(ApproachError::Inconsistent("tiling factor varies"));
            }
            _ => factor = Some(k),
        }
    }
    factor
        .map(Transform::Tile)
        .ok_or(ApproachError::NotApplicable("no training examples"))
}

/// Masked deployment: every training output must have the squared
/// dimensions of its input.
fn derive_masked_deployment(train: &[Example]) -> Result<Transform, ApproachError> {
    if train.is_empty() {
        return Err(ApproachError::NotApplicable("no training examples"));
    }
    for example in train {
        let (ir, ic) = (example.input.rows(), example.input.cols());
        if example.output.rows() != ir * ir || example.output.cols() != ic * ic {
            return Err(ApproachError::NotApplicable(
                "output is not the squared expansion",
            ));
        }
    }
    Ok(Transform::MaskedDeploy)
}

/// Geometric-shape heuristic: any 2x2 block of one non-zero color.
pub fn has_uniform_block(grid: &Grid) -> bool {
    for r in 0..grid.rows().saturating_sub(1) {
        for c in 0..grid.cols().saturating_sub(1) {
            let v = grid.get(r, c);
            if v != 0
                && grid.get(r, c + 1) == v
                && grid.get(r + 1, c) == v
                && grid.get(r + 1, c + 1) == v
            {
                return true;
            }
        }
    }
    false
}
