//! Mathematical detectors: arithmetic progression and parity shift.

use std::collections::BTreeSet;

use serde_json::{Map, Value};

use super::catalog::DetectorError;
use super::types::DetectorOutcome;
use crate::grid::Grid;

/// Fixed score for a confirmed arithmetic progression.
const PROGRESSION_SCORE: f64 = 0.8;

/// Even/odd ratio shift required to report a parity pattern.
const PARITY_SHIFT_FLOOR: f64 = 0.7;

/// The single distinct first difference of a value sequence, if any.
/// Consecutive repeats collapse first, so `[1, 2, 2, 3]` steps by 1.
fn sole_difference(values: &[u8]) -> Option<i64> {
    let mut collapsed = values.to_vec();
    collapsed.dedup();
    if collapsed.len() < 2 {
        return None;
    }
    let diffs: BTreeSet<i64> = collapsed
        .windows(2)
        .map(|w| i64::from(w[1]) - i64::from(w[0]))
        .collect();
    if diffs.len() == 1 {
        diffs.into_iter().next()
    } else {
        None
    }
}

/// Arithmetic-progression detection over the flattened non-zero values.
///
/// Reported only when both input and output have exactly one distinct first
/// difference and the two differences are within 1 of each other.
pub fn detect_progression(input: &Grid, output: &Grid) -> Result<DetectorOutcome, DetectorError> {
    let d_in = sole_difference(&input.non_zero_values());
    let d_out = sole_difference(&output.non_zero_values());
    match (d_in, d_out) {
        (Some(a), Some(b)) if (a - b).abs() <= 1 => {
            let mut evidence = Map::new();
            evidence.insert("is_arithmetic".into(), Value::from(true));
            evidence.insert("input_difference".into(), Value::from(a));
            evidence.insert("output_difference".into(), Value::from(b));
            Ok(DetectorOutcome::Detected {
                score: PROGRESSION_SCORE,
                evidence,
            })
        }
        _ => Ok(DetectorOutcome::NoPattern),
    }
}

/// Fraction of non-zero cells holding an even value; None without non-zero
/// cells.
fn even_ratio(grid: &Grid) -> Option<f64> {
    let values = grid.non_zero_values();
    if values.is_empty() {
        return None;
    }
    let evens = values.iter().filter(|v| *v % 2 == 0).count();
    Some(evens as f64 / values.len() as f64)
}

/// Parity-pattern detection: reports when the even-cell ratio shifts by more
/// than 0.7 between input and output.
pub fn detect_parity(input: &Grid, output: &Grid) -> Result<DetectorOutcome, DetectorError> {
    let (Some(r_in), Some(r_out)) = (even_ratio(input), even_ratio(output)) else {
        return Ok(DetectorOutcome::NoPattern);
    };
    let shift = (r_in - r_out).abs();
    if shift <= PARITY_SHIFT_FLOOR {
        return Ok(DetectorOutcome::NoPattern);
    }
    let mut evidence = Map::new();
    evidence.insert("input_even_ratio".into(), Value::from(r_in));
    evidence.insert("output_even_ratio".into(), Value::from(r_out));
    evidence.insert("shift".into(), Value::from(shift));
    Ok(DetectorOutcome::Detected {
        score: shift.min(1.0),
        evidence,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::grid;

    /// Repeated values along the flattened sequence do not break the
    /// progression: `[1, 2, 2, 3]` still steps by 1.
    #[test]
    fn test_progression_unit_differences() {
        let input = grid(&[&[1, 2], &[2, 3]]);
        let output = grid(&[&[2, 3], &[3, 4]]);
        match detect_progression(&input, &output).unwrap() {
            DetectorOutcome::Detected { score, evidence } => {
                assert_eq!(score, PROGRESSION_SCORE);
                assert_eq!(evidence["is_arithmetic"], Value::from(true));
                assert_eq!(evidence["input_difference"], Value::from(1i64));
                assert_eq!(evidence["output_difference"], Value::from(1i64));
            }
            other => panic!("expected progression, got {other:?}"),
        }
    }

    #[test]
    fn test_progression_rejects_multiple_differences() {
        let input = grid(&[&[1, 2, 4]]);
        let output = grid(&[&[2, 3, 4]]);
        assert_eq!(
            detect_progression(&input, &output).unwrap(),
            DetectorOutcome::NoPattern
        );
    }

    #[test]
    fn test_progression_rejects_distant_differences() {
        // Input steps by 1, output by 3.
        let input = grid(&[&[1, 2, 3]]);
        let output = grid(&[&[1, 4, 7]]);
        assert_eq!(
            detect_progression(&input, &output).unwrap(),
            DetectorOutcome::NoPattern
        );
    }

    #[test]
    fn test_progression_constant_values_not_reported() {
        // A constant sequence collapses to a single value; there is no step.
        let g = grid(&[&[3, 3], &[3, 3]]);
        assert_eq!(detect_progression(&g, &g).unwrap(), DetectorOutcome::NoPattern);
    }

    #[test]
    fn test_progression_needs_two_values_each_side() {
        let input = grid(&[&[5, 0], &[0, 0]]);
        let output = grid(&[&[1, 2], &[3, 4]]);
        assert_eq!(
            detect_progression(&input, &output).unwrap(),
            DetectorOutcome::NoPattern
        );
    }

    #[test]
    fn test_parity_full_shift() {
        // All odd -> all even: shift 1.0.
        let input = grid(&[&[1, 3], &[5, 7]]);
        let output = grid(&[&[2, 4], &[6, 8]]);
        match detect_parity(&input, &output).unwrap() {
            DetectorOutcome::Detected { score, .. } => assert_eq!(score, 1.0),
            other => panic!("expected parity shift, got {other:?}"),
        }
    }

    #[test]
    fn test_parity_small_shift_ignored() {
        let input = grid(&[&[1, 2], &[3, 4]]);
        let output = grid(&[&[2, 2], &[3, 4]]);
        assert_eq!(
            detect_parity(&input, &output).unwrap(),
            DetectorOutcome::NoPattern
        );
    }

    #[test]
    fn test_parity_empty_side_ignored() {
        let input = grid(&[&[0, 0]]);
        let output = grid(&[&[2, 4]]);
        assert_eq!(
            detect_parity(&input, &output).unwrap(),
            DetectorOutcome::NoPattern
        );
    }
}
