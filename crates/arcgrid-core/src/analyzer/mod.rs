//! Puzzle analyzer orchestrator.
//!
//! Runs the full pattern catalog over one example pair, optionally enriches
//! a sparse analysis through the predictor, and applies the anti-overfitting
//! guard. The public contract: `solve` never fails — internal problems
//! degrade to a zero-confidence Solution with an explanatory marker.

pub mod catalog;
pub mod color;
pub mod mathematical;
pub mod predictor;
pub mod spatial;
pub mod structural;
pub mod types;

use tracing::debug;

use crate::config::AnalyzerConfig;
use crate::grid::Grid;
use crate::ops;
use types::Solution;

/// Unit struct analyzer — stateless, all tunables are per-call config.
pub struct PuzzleAnalyzer;

impl Default for PuzzleAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl PuzzleAnalyzer {
    /// Create a new analyzer.
    pub fn new() -> Self {
        Self
    }

    /// Analyze one example pair and consolidate into a Solution.
    pub fn solve(&self, input: &Grid, output: &Grid, config: &AnalyzerConfig) -> Solution {
        let analysis = catalog::analyze(input, output, config);
        let cx = predictor::complexity(input, output);

        // Enrich only when the analysis looks sparse relative to how
        // complex the puzzle appears.
        let sparse = analysis.detected_count < (4.0 * cx).ceil() as usize;
        let predicted = if sparse && config.prediction_blend > 0.0 {
            predictor::predict(&analysis, input, output, &config.predictor)
        } else {
            Default::default()
        };

        let mut confidence = analysis.overall_score;
        let predicted_confidences: Vec<f64> = predicted
            .values()
            .flatten()
            .map(|p| p.confidence)
            .collect();
        if !predicted_confidences.is_empty() {
            let mean =
                predicted_confidences.iter().sum::<f64>() / predicted_confidences.len() as f64;
            confidence = (confidence + mean * config.prediction_blend).min(1.0);
        }

        confidence = apply_overfitting_guard(
            confidence,
            ops::similarity(input, output),
            cx,
            config.overfitting_threshold,
        );

        debug!(
            detected = analysis.detected_count,
            overall = analysis.overall_score,
            complexity = cx,
            confidence,
            "analysis consolidated"
        );

        Solution {
            analysis,
            predicted,
            confidence,
        }
    }

    /// Lenient boundary for harnesses holding raw cell matrices: malformed
    /// grids degrade to a marker Solution instead of an error.
    pub fn solve_raw(
        &self,
        input: &[Vec<u8>],
        output: &[Vec<u8>],
        config: &AnalyzerConfig,
    ) -> Solution {
        let input = match Grid::new(input.to_vec()) {
            Ok(g) => g,
            Err(err) => return Solution::degraded(&format!("input: {err}")),
        };
        let output = match Grid::new(output.to_vec()) {
            Ok(g) => g,
            Err(err) => return Solution::degraded(&format!("output: {err}")),
        };
        self.solve(&input, &output, config)
    }
}

/// Discount confidence when the raw input/output match rate is suspiciously
/// perfect relative to complexity. Monotonic: higher raw match with lower
/// complexity means a stronger discount.
fn apply_overfitting_guard(confidence: f64, raw: f64, complexity: f64, threshold: f64) -> f64 {
    if raw <= threshold || threshold >= 1.0 {
        return confidence;
    }
    let excess = (raw - threshold) / (1.0 - threshold);
    confidence * (1.0 - excess * (1.0 - complexity))
}
