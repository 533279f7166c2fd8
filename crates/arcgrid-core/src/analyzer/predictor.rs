//! Pattern predictor: extrapolates candidate patterns for under-represented
//! categories from a historical-frequency prior, gated by the six predictor
//! thresholds.

use std::collections::BTreeMap;

use serde_json::{Map, Value};
use tracing::debug;

use super::types::{Analysis, Category, PredictedPattern};
use crate::config::PredictorConfig;
use crate::grid::Grid;

/// Complexity blend weights. Compatibility constants: existing
/// threshold-tuning experiments were calibrated against exactly this
/// 0.3 / 0.3 / 0.4 split.
const SIZE_WEIGHT: f64 = 0.3;
const COLOR_WEIGHT: f64 = 0.3;
const RATIO_WEIGHT: f64 = 0.4;

/// Historical pattern frequencies per category, ordered by frequency.
/// Fixed compatibility priors, like the complexity weights above.
const HISTORICAL: [(Category, &str, f64); 12] = [
    (Category::Spatial, "rotation", 0.35),
    (Category::Spatial, "reflection", 0.30),
    (Category::Spatial, "translation", 0.20),
    (Category::Spatial, "homothety", 0.15),
    (Category::Color, "remap", 0.50),
    (Category::Color, "fill", 0.30),
    (Category::Color, "swap", 0.20),
    (Category::Structural, "projection", 0.40),
    (Category::Structural, "folding", 0.30),
    (Category::Mathematical, "progression", 0.40),
    (Category::Mathematical, "parity", 0.35),
    (Category::Mathematical, "counting", 0.25),
];

/// Weighted puzzle-complexity estimate in [0, 1]:
/// grid size, distinct colors, and output/input size-ratio deviation.
pub fn complexity(input: &Grid, output: &Grid) -> f64 {
    let size = (input.cell_count() as f64 / 100.0).min(1.0);
    let colors = (input.distinct_colors() as f64 / 9.0).min(1.0);
    let ratio = output.cell_count() as f64 / input.cell_count() as f64;
    let deviation = (ratio - 1.0).abs().min(1.0);
    (SIZE_WEIGHT * size + COLOR_WEIGHT * colors + RATIO_WEIGHT * deviation).min(1.0)
}

/// Similarity of a historical candidate to one observed pattern: closeness
/// of confidence levels plus a same-category bonus.
fn context_similarity(
    candidate_category: Category,
    frequency: f64,
    observed: &[(Category, &str, f64)],
) -> f64 {
    observed
        .iter()
        .map(|&(cat, _, conf)| {
            let base = 1.0 - (frequency - conf).abs();
            let bonus = if cat == candidate_category { 0.2 } else { 0.0 };
            (base + bonus).min(1.0)
        })
        .fold(0.0, f64::max)
}

/// Synthesize predicted patterns for categories with too few observations.
///
/// Empty unless the puzzle complexity exceeds the configured floor. Each
/// kept prediction passed both the context-similarity gate and the final
/// confidence floor.
pub fn predict(
    analysis: &Analysis,
    input: &Grid,
    output: &Grid,
    config: &PredictorConfig,
) -> BTreeMap<Category, Vec<PredictedPattern>> {
    let mut predicted = BTreeMap::new();

    let cx = complexity(input, output);
    if cx <= config.min_complexity {
        debug!(complexity = cx, "below complexity floor, no prediction");
        return predicted;
    }

    let observed = analysis.observed();

    for category in Category::ALL {
        if analysis.detected_in(category) >= config.min_historical_frequency {
            continue;
        }

        let mut kept = Vec::new();
        for &(cat, name, frequency) in &HISTORICAL {
            if cat != category || kept.len() >= config.max_predicted_per_category {
                continue;
            }
            // Already observed patterns need no prediction.
            if analysis
                .categories
                .get(&category)
                .is_some_and(|entries| {
                    entries.get(name).is_some_and(|r| {
                        r.status == super::types::DetectorStatus::Detected
                    })
                })
            {
                continue;
            }

            let confidence = frequency * cx * config.historical_confidence_weight;
            let similarity = context_similarity(category, frequency, &observed);

            if similarity <= config.context_similarity_floor {
                debug!(
                    pattern = name,
                    similarity, "candidate rejected by context similarity"
                );
                continue;
            }
            if confidence < config.prediction_confidence_floor {
                debug!(
                    pattern = name,
                    confidence, "candidate rejected by confidence floor"
                );
                continue;
            }

            let mut basis = Map::new();
            basis.insert("historical_frequency".into(), Value::from(frequency));
            basis.insert("complexity".into(), Value::from(cx));
            basis.insert("context_similarity".into(), Value::from(similarity));
            kept.push(PredictedPattern {
                name: name.to_string(),
                category,
                confidence,
                basis,
            });
        }

        if !kept.is_empty() {
            predicted.insert(category, kept);
        }
    }

    predicted
}
