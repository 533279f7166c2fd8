//! Result model for pattern analysis: categories, detector results,
//! consolidated analyses and solutions.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Detector category. Each carries a fixed confidence weight.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Spatial,
    Color,
    Structural,
    Mathematical,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Spatial,
        Category::Color,
        Category::Structural,
        Category::Mathematical,
    ];

    /// Fixed per-category confidence multiplier. Compatibility constants;
    /// tuned by hand in the original experiments.
    pub fn weight(self) -> f64 {
        match self {
            Category::Spatial => 0.8,
            Category::Color => 0.9,
            Category::Structural => 0.7,
            Category::Mathematical => 0.85,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Category::Spatial => "spatial",
            Category::Color => "color",
            Category::Structural => "structural",
            Category::Mathematical => "mathematical",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// How a detector invocation ended.
///
/// `NotImplemented` is distinct from `NoPattern` so tests and reports can
/// tell a placeholder apart from a detector that ran and found nothing.
/// `Failed` records a recovered detector error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetectorStatus {
    Detected,
    NoPattern,
    NotImplemented,
    Failed,
}

/// What a detector function returns before catalog-level scoring.
#[derive(Debug, Clone, PartialEq)]
pub enum DetectorOutcome {
    Detected {
        score: f64,
        evidence: Map<String, Value>,
    },
    NoPattern,
    NotImplemented,
}

/// Scored result of one detector invocation. Created once, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectorResult {
    /// Raw detector score in [0, 1].
    pub score: f64,
    /// Score scaled by the category weight.
    pub confidence: f64,
    /// Structured evidence (detector-specific keys).
    pub evidence: Map<String, Value>,
    pub status: DetectorStatus,
}

impl DetectorResult {
    pub fn from_outcome(outcome: DetectorOutcome, category: Category) -> Self {
        match outcome {
            DetectorOutcome::Detected { score, evidence } => {
                let score = score.clamp(0.0, 1.0);
                Self {
                    score,
                    confidence: score * category.weight(),
                    evidence,
                    status: DetectorStatus::Detected,
                }
            }
            DetectorOutcome::NoPattern => Self::zero(DetectorStatus::NoPattern, Map::new()),
            DetectorOutcome::NotImplemented => {
                let mut evidence = Map::new();
                evidence.insert("note".into(), Value::from("not yet implemented"));
                Self::zero(DetectorStatus::NotImplemented, evidence)
            }
        }
    }

    /// Zero-confidence substitute for a detector that errored.
    pub fn from_failure(message: &str) -> Self {
        let mut evidence = Map::new();
        evidence.insert("error".into(), Value::from(format!("error: {message}")));
        Self::zero(DetectorStatus::Failed, evidence)
    }

    fn zero(status: DetectorStatus, evidence: Map<String, Value>) -> Self {
        Self {
            score: 0.0,
            confidence: 0.0,
            evidence,
            status,
        }
    }
}

/// Per-category map of detector-name -> result.
pub type CategoryAnalysis = BTreeMap<String, DetectorResult>;

/// Consolidated output of a full catalog pass over one example pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    pub categories: BTreeMap<Category, CategoryAnalysis>,
    /// Mean score over entries whose confidence exceeds the threshold;
    /// 0 when none qualify.
    pub overall_score: f64,
    /// Number of detectors that reported a pattern.
    pub detected_count: usize,
    /// `"category.detector"` entries whose score exceeds the threshold.
    pub high_confidence_names: BTreeSet<String>,
    /// Human-readable cross-category combination notes. Reporting only.
    pub combinations: Vec<String>,
}

impl Analysis {
    /// Empty analysis with all four category maps present.
    pub fn empty() -> Self {
        Self {
            categories: Category::ALL
                .iter()
                .map(|&c| (c, CategoryAnalysis::new()))
                .collect(),
            overall_score: 0.0,
            detected_count: 0,
            high_confidence_names: BTreeSet::new(),
            combinations: Vec::new(),
        }
    }

    /// Degraded analysis carrying an explanatory marker in every category.
    pub fn degraded(reason: &str) -> Self {
        let mut analysis = Self::empty();
        for entries in analysis.categories.values_mut() {
            entries.insert("analysis_error".into(), DetectorResult::from_failure(reason));
        }
        analysis
    }

    /// Detected entries as (category, name, confidence), in category order.
    pub fn observed(&self) -> Vec<(Category, &str, f64)> {
        self.categories
            .iter()
            .flat_map(|(&cat, entries)| {
                entries
                    .iter()
                    .filter(|(_, r)| r.status == DetectorStatus::Detected)
                    .map(move |(name, r)| (cat, name.as_str(), r.confidence))
            })
            .collect()
    }

    /// Number of detected patterns in one category.
    pub fn detected_in(&self, category: Category) -> usize {
        self.categories
            .get(&category)
            .map(|entries| {
                entries
                    .values()
                    .filter(|r| r.status == DetectorStatus::Detected)
                    .count()
            })
            .unwrap_or(0)
    }
}

/// A pattern the predictor extrapolated rather than observed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictedPattern {
    pub name: String,
    pub category: Category,
    pub confidence: f64,
    /// Why this prediction was made (frequency, complexity, similarity).
    pub basis: Map<String, Value>,
}

/// Final consolidated result of one analyzer solve call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Solution {
    pub analysis: Analysis,
    pub predicted: BTreeMap<Category, Vec<PredictedPattern>>,
    pub confidence: f64,
}

impl Solution {
    /// Fixed convention used pervasively by calling harnesses: a puzzle
    /// counts as solved above 0.5 confidence.
    pub fn is_solved(&self) -> bool {
        self.confidence > 0.5
    }

    /// Zero-confidence solution wrapping a degraded analysis.
    pub fn degraded(reason: &str) -> Self {
        Self {
            analysis: Analysis::degraded(reason),
            predicted: BTreeMap::new(),
            confidence: 0.0,
        }
    }
}
