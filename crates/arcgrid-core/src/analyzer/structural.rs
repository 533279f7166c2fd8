//! Structural detectors.
//!
//! Projection and folding are registered placeholders: the catalog reports
//! them as `NotImplemented`, which is distinct from "ran and found nothing".

use super::catalog::DetectorError;
use super::types::DetectorOutcome;
use crate::grid::Grid;

/// Projection detection. Not yet implemented.
pub fn detect_projection(_input: &Grid, _output: &Grid) -> Result<DetectorOutcome, DetectorError> {
    Ok(DetectorOutcome::NotImplemented)
}

/// Folding detection. Not yet implemented.
pub fn detect_folding(_input: &Grid, _output: &Grid) -> Result<DetectorOutcome, DetectorError> {
    Ok(DetectorOutcome::NotImplemented)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::grid;

    #[test]
    fn test_placeholders_report_not_implemented() {
        let g = grid(&[&[1]]);
        assert_eq!(
            detect_projection(&g, &g).unwrap(),
            DetectorOutcome::NotImplemented
        );
        assert_eq!(
            detect_folding(&g, &g).unwrap(),
            DetectorOutcome::NotImplemented
        );
    }
}
