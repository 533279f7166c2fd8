//! Per-call configuration for the two orchestrators.
//!
//! Thresholds are plain immutable structs passed into every solve call;
//! nothing tunable lives on the orchestrators themselves. Serde attributes
//! accept the option keys used by existing tuning harnesses (the predictor
//! keys are historically French and are kept verbatim on the wire).

use serde::{Deserialize, Serialize};

/// Tunables for [`crate::PuzzleAnalyzer`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Detector acceptance cutoff: a detector entry counts toward the
    /// overall score when its confidence exceeds this, and toward the
    /// high-confidence set when its raw score exceeds this.
    pub confidence_threshold: f64,
    /// Raw input/output match rate above which the confidence is discounted
    /// (trivial-identity guard).
    pub overfitting_threshold: f64,
    /// Weight of the predicted-pattern contribution in the final confidence.
    /// 0 disables enrichment entirely.
    pub prediction_blend: f64,
    /// Cell-count ceiling per grid for one detector pass; beyond it the
    /// detectors report a recovered failure instead of running. The default
    /// sits far above any well-formed puzzle grid, so it only matters for
    /// batch harnesses that lower it.
    pub max_analyzed_cells: usize,
    /// Predictor gates.
    #[serde(flatten)]
    pub predictor: PredictorConfig,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            confidence_threshold: 0.3,
            overfitting_threshold: 0.8,
            prediction_blend: 0.25,
            max_analyzed_cells: 1_000_000,
            predictor: PredictorConfig::default(),
        }
    }
}

impl AnalyzerConfig {
    /// Strict profile: high acceptance bar, aggressive overfitting guard,
    /// no prediction enrichment.
    pub fn strict() -> Self {
        Self {
            confidence_threshold: 0.5,
            overfitting_threshold: 0.3,
            prediction_blend: 0.0,
            ..Self::default()
        }
    }

    /// Lenient profile: accepts weak evidence, tolerates near-identity
    /// matches. Used by batch sweeps that want recall over precision.
    pub fn lenient() -> Self {
        Self {
            confidence_threshold: 0.2,
            overfitting_threshold: 0.95,
            prediction_blend: 0.25,
            predictor: PredictorConfig::lenient(),
            ..Self::default()
        }
    }
}

/// Gates for [`crate::analyzer::predictor`]. Wire names match the harness
/// option keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PredictorConfig {
    /// Minimum final confidence for a predicted pattern to be kept.
    #[serde(rename = "seuil_confiance_prediction")]
    pub prediction_confidence_floor: f64,
    /// Minimum puzzle complexity before any prediction is attempted.
    #[serde(rename = "seuil_complexite_min")]
    pub min_complexity: f64,
    /// Minimum context similarity to an observed pattern.
    #[serde(rename = "seuil_similarite_contexte")]
    pub context_similarity_floor: f64,
    /// Discount applied to historical frequency relative to an observed
    /// same-category pattern.
    #[serde(rename = "poids_confiance_historique")]
    pub historical_confidence_weight: f64,
    /// Cap on predictions emitted per category.
    #[serde(rename = "max_patterns_predits_par_categorie")]
    pub max_predicted_per_category: usize,
    /// A category with at least this many observed patterns is never
    /// enriched.
    #[serde(rename = "min_frequence_historique")]
    pub min_historical_frequency: usize,
}

impl Default for PredictorConfig {
    fn default() -> Self {
        Self {
            prediction_confidence_floor: 0.3,
            min_complexity: 0.25,
            context_similarity_floor: 0.5,
            historical_confidence_weight: 0.6,
            max_predicted_per_category: 2,
            min_historical_frequency: 2,
        }
    }
}

impl PredictorConfig {
    /// Lenient gates for recall-oriented sweeps.
    pub fn lenient() -> Self {
        Self {
            prediction_confidence_floor: 0.15,
            min_complexity: 0.1,
            context_similarity_floor: 0.3,
            historical_confidence_weight: 0.7,
            max_predicted_per_category: 3,
            min_historical_frequency: 2,
        }
    }
}
