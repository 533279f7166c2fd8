//! Core engine for analyzing "input grid -> output grid" puzzle examples
//! and proposing a transformation rule.
//!
//! Two independent orchestrators sit on top of shared grid utilities:
//!
//! - [`PuzzleAnalyzer`] runs a catalog of pattern detectors over a single
//!   example pair, scores the evidence, optionally extrapolates missing
//!   patterns, and returns a consolidated [`Solution`].
//! - [`MultiApproachSolver`] enumerates concrete solving strategies over a
//!   full task (several training pairs plus a test input), cross-validates
//!   each against the training data, and picks the best approach.
//!
//! Both are stateless; all tunables travel in explicit config structs passed
//! into each call. The engine never panics on well-formed or malformed
//! input: failures degrade to zero-confidence results which are logged at
//! the orchestration boundary.

pub mod analyzer;
pub mod approach;
pub mod config;
pub mod grid;
pub mod ops;
pub mod task;

pub use analyzer::types::{
    Analysis, Category, CategoryAnalysis, DetectorResult, DetectorStatus, PredictedPattern,
    Solution,
};
pub use analyzer::PuzzleAnalyzer;
pub use approach::{ApproachResult, MultiApproachSolver, SolveOutcome, Validation};
pub use config::{AnalyzerConfig, PredictorConfig};
pub use grid::{Example, Grid, GridError};
pub use task::Task;
