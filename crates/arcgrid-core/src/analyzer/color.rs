//! Color detectors: global value remapping ("cycles").

use std::collections::{BTreeMap, BTreeSet};

use serde_json::{Map, Value};

use super::catalog::DetectorError;
use super::types::DetectorOutcome;
use crate::grid::Grid;

/// Score contribution per distinct clean cycle, capped at 1.0.
const CYCLE_SCORE_STEP: f64 = 0.3;

/// Value-remap detection over co-located non-zero cells.
///
/// A "cycle" `a -> b` is an input color whose co-located output values
/// collapse to exactly one differing color. Score scales with the number of
/// distinct cycles; zero when no remap is found.
pub fn detect_remap(input: &Grid, output: &Grid) -> Result<DetectorOutcome, DetectorError> {
    let rows = input.rows().min(output.rows());
    let cols = input.cols().min(output.cols());

    let mut mapping: BTreeMap<u8, BTreeSet<u8>> = BTreeMap::new();
    for r in 0..rows {
        for c in 0..cols {
            let (a, b) = (input.get(r, c), output.get(r, c));
            if a != 0 && b != 0 {
                mapping.entry(a).or_default().insert(b);
            }
        }
    }

    let cycles: BTreeMap<u8, u8> = mapping
        .iter()
        .filter_map(|(&a, outs)| match outs.iter().next() {
            Some(&b) if outs.len() == 1 && b != a => Some((a, b)),
            _ => None,
        })
        .collect();

    if cycles.is_empty() {
        return Ok(DetectorOutcome::NoPattern);
    }

    let score = (cycles.len() as f64 * CYCLE_SCORE_STEP).min(1.0);
    let mut evidence = Map::new();
    evidence.insert(
        "cycles".into(),
        Value::Object(
            cycles
                .iter()
                .map(|(a, b)| (a.to_string(), Value::from(*b)))
                .collect(),
        ),
    );
    evidence.insert("cycle_count".into(), Value::from(cycles.len()));
    Ok(DetectorOutcome::Detected { score, evidence })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::grid;

    #[test]
    fn test_single_cycle() {
        let input = grid(&[&[1, 1], &[0, 1]]);
        let output = grid(&[&[2, 2], &[0, 2]]);
        match detect_remap(&input, &output).unwrap() {
            DetectorOutcome::Detected { score, evidence } => {
                assert!((score - 0.3).abs() < 1e-12);
                assert_eq!(evidence["cycle_count"], Value::from(1usize));
                assert_eq!(evidence["cycles"]["1"], Value::from(2u8));
            }
            other => panic!("expected remap, got {other:?}"),
        }
    }

    #[test]
    fn test_score_scales_with_cycles_and_caps() {
        let input = grid(&[&[1, 2, 3, 4]]);
        let output = grid(&[&[5, 6, 7, 8]]);
        match detect_remap(&input, &output).unwrap() {
            DetectorOutcome::Detected { score, .. } => {
                // Four cycles at 0.3 each, capped.
                assert_eq!(score, 1.0);
            }
            other => panic!("expected remap, got {other:?}"),
        }
    }

    #[test]
    fn test_identity_mapping_is_no_cycle() {
        let g = grid(&[&[1, 2], &[3, 4]]);
        assert_eq!(detect_remap(&g, &g).unwrap(), DetectorOutcome::NoPattern);
    }

    #[test]
    fn test_ambiguous_mapping_is_no_cycle() {
        // Input color 1 maps to both 2 and 3: not a clean cycle.
        let input = grid(&[&[1, 1]]);
        let output = grid(&[&[2, 3]]);
        assert_eq!(
            detect_remap(&input, &output).unwrap(),
            DetectorOutcome::NoPattern
        );
    }

    #[test]
    fn test_background_cells_ignored() {
        // Non-zero input over zero output is not evidence of a remap.
        let input = grid(&[&[1, 1], &[1, 1]]);
        let output = grid(&[&[0, 0], &[0, 0]]);
        assert_eq!(
            detect_remap(&input, &output).unwrap(),
            DetectorOutcome::NoPattern
        );
    }
}
