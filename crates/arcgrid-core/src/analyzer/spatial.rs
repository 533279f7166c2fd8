//! Spatial detectors: rotation, reflection, homothety.
//!
//! Shear and fractal detection are declared in the registry but not yet
//! implemented; the catalog reports them as explicit placeholders.

use serde_json::{Map, Value};

use super::catalog::DetectorError;
use super::types::DetectorOutcome;
use crate::grid::Grid;
use crate::ops::{self, Axis, Rotation};

/// A rotation/reflection match must beat this similarity to be reported.
const ACCEPT_SIMILARITY: f64 = 0.7;

/// Homothety factors recognized by the original experiments.
const HOMOTHETY_FACTORS: [f64; 5] = [0.5, 1.0, 2.0, 3.0, 4.0];
const HOMOTHETY_TOLERANCE: f64 = 0.1;

/// Best rotation (90/180/270) of the input against the output.
pub fn detect_rotation(input: &Grid, output: &Grid) -> Result<DetectorOutcome, DetectorError> {
    let mut best: Option<(Rotation, f64)> = None;
    for rotation in Rotation::ALL {
        let sim = ops::similarity(&ops::rotate(input, rotation), output);
        if best.map_or(true, |(_, s)| sim > s) {
            best = Some((rotation, sim));
        }
    }
    match best {
        Some((rotation, sim)) if sim > ACCEPT_SIMILARITY => {
            let mut evidence = Map::new();
            evidence.insert("angle".into(), Value::from(rotation.degrees()));
            evidence.insert("similarity".into(), Value::from(sim));
            Ok(DetectorOutcome::Detected {
                score: sim,
                evidence,
            })
        }
        _ => Ok(DetectorOutcome::NoPattern),
    }
}

/// Best reflection (horizontal/vertical) of the input against the output.
pub fn detect_reflection(input: &Grid, output: &Grid) -> Result<DetectorOutcome, DetectorError> {
    let mut best: Option<(Axis, f64)> = None;
    for axis in Axis::ALL {
        let sim = ops::similarity(&ops::reflect(input, axis), output);
        if best.map_or(true, |(_, s)| sim > s) {
            best = Some((axis, sim));
        }
    }
    match best {
        Some((axis, sim)) if sim > ACCEPT_SIMILARITY => {
            let mut evidence = Map::new();
            evidence.insert("axis".into(), Value::from(axis.name()));
            evidence.insert("similarity".into(), Value::from(sim));
            Ok(DetectorOutcome::Detected {
                score: sim,
                evidence,
            })
        }
        _ => Ok(DetectorOutcome::NoPattern),
    }
}

/// Uniform scaling: the output/input dimension ratio must sit within 0.1 of
/// one of the recognized factors on both axes, and the rescaled input must
/// actually resemble the output.
pub fn detect_homothety(input: &Grid, output: &Grid) -> Result<DetectorOutcome, DetectorError> {
    let ratio_rows = output.rows() as f64 / input.rows() as f64;
    let ratio_cols = output.cols() as f64 / input.cols() as f64;

    let factor = HOMOTHETY_FACTORS.iter().copied().find(|f| {
        (ratio_rows - f).abs() <= HOMOTHETY_TOLERANCE
            && (ratio_cols - f).abs() <= HOMOTHETY_TOLERANCE
    });
    let Some(factor) = factor else {
        return Ok(DetectorOutcome::NoPattern);
    };

    let score = match ops::scale(input, factor) {
        Some(scaled) => ops::similarity(&scaled, output),
        None => return Ok(DetectorOutcome::NoPattern),
    };
    if score <= ACCEPT_SIMILARITY {
        return Ok(DetectorOutcome::NoPattern);
    }

    let mut evidence = Map::new();
    evidence.insert("factor".into(), Value::from(factor));
    evidence.insert("ratio_rows".into(), Value::from(ratio_rows));
    evidence.insert("ratio_cols".into(), Value::from(ratio_cols));
    evidence.insert("similarity".into(), Value::from(score));
    Ok(DetectorOutcome::Detected { score, evidence })
}
