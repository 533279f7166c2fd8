//! Multi-approach solver: tries each strategy in fixed order, scores it,
//! cross-validates it against every training pair, and picks the winner.
//!
//! Selection rule: approaches that validate cleanly against the training
//! data strictly outrank approaches that do not, regardless of raw
//! heuristic confidence; inside a rank the highest confidence wins and
//! ties break by list order.

pub mod strategies;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::grid::{Example, Grid};
use crate::task::Task;
use strategies::{has_uniform_block, ApproachKind};

/// Base heuristic confidence shared by all approaches.
const BASE_CONFIDENCE: f64 = 0.5;
/// Bonus when the test input contains a detected geometric shape.
const SHAPE_BONUS: f64 = 0.1;

/// Cross-validation outcome over the training pairs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Validation {
    pub passed: bool,
    pub error_count: usize,
    pub total: usize,
}

/// One attempted approach. Only the best-scoring attempt survives
/// selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApproachResult {
    pub name: String,
    pub output_grid: Grid,
    pub confidence: f64,
    pub validation: Validation,
}

/// The solver's final answer for a task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolveOutcome {
    pub solution: Grid,
    pub confidence: f64,
    pub method: String,
    pub validation: Validation,
}

/// Unit struct solver — stateless, each call is independent.
pub struct MultiApproachSolver;

impl Default for MultiApproachSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl MultiApproachSolver {
    /// Create a new solver.
    pub fn new() -> Self {
        Self
    }

    /// Solve a task: derive each approach from the training pairs, apply it
    /// to the first test input, and select the best validated attempt.
    ///
    /// A task without test examples has nothing to transform; it comes back
    /// as a zero-confidence identity outcome rather than re-solving a
    /// training input.
    pub fn solve(&self, task: &Task) -> SolveOutcome {
        let Some(subject) = task.test.first().map(|e| &e.input) else {
            let solution = task
                .train
                .first()
                .map(|e| e.input.clone())
                .unwrap_or_else(|| Grid::new(vec![vec![0]]).expect("1x1 grid is valid"));
            return SolveOutcome {
                solution,
                confidence: 0.0,
                method: ApproachKind::Identity.name().to_string(),
                validation: Validation {
                    passed: false,
                    error_count: 0,
                    total: task.train.len(),
                },
            };
        };
        self.solve_grid(&task.train, subject)
    }

    /// Solve for an explicit test input.
    pub fn solve_grid(&self, train: &[Example], test_input: &Grid) -> SolveOutcome {
        let mut best: Option<ApproachResult> = None;

        for kind in ApproachKind::ORDER {
            let result = match self.attempt(kind, train, test_input) {
                Ok(result) => result,
                Err(err) => {
                    debug!(approach = kind.name(), %err, "approach skipped");
                    continue;
                }
            };
            debug!(
                approach = kind.name(),
                confidence = result.confidence,
                passed = result.validation.passed,
                "approach attempted"
            );
            let better = match &best {
                None => true,
                Some(current) => match (result.validation.passed, current.validation.passed) {
                    (true, false) => true,
                    (false, true) => false,
                    // Strictly greater keeps the earlier approach on ties.
                    _ => result.confidence > current.confidence,
                },
            };
            if better {
                best = Some(result);
            }
        }

        match best {
            Some(result) => SolveOutcome {
                solution: result.output_grid,
                confidence: result.confidence,
                method: result.name,
                validation: result.validation,
            },
            None => {
                // Every approach errored out; fall back to the untouched
                // test input.
                warn!("no viable approach, falling back to identity");
                SolveOutcome {
                    solution: test_input.clone(),
                    confidence: 0.0,
                    method: ApproachKind::Identity.name().to_string(),
                    validation: Validation {
                        passed: false,
                        error_count: 0,
                        total: train.len(),
                    },
                }
            }
        }
    }

    /// Derive, apply and cross-validate one approach.
    fn attempt(
        &self,
        kind: ApproachKind,
        train: &[Example],
        test_input: &Grid,
    ) -> Result<ApproachResult, strategies::ApproachError> {
        let transform = kind.derive(train)?;
        let output_grid = transform.apply(test_input)?;

        let mut confidence = BASE_CONFIDENCE + kind.bonus();
        if has_uniform_block(test_input) {
            confidence += SHAPE_BONUS;
        }
        let confidence = confidence.min(1.0);

        // Leave-one-in cross-validation: the same transform must reproduce
        // every training output exactly.
        let mut error_count = 0;
        for example in train {
            match transform.apply(&example.input) {
                Ok(produced) if produced == example.output => {}
                _ => error_count += 1,
            }
        }
        let validation = Validation {
            passed: error_count == 0,
            error_count,
            total: train.len(),
        };

        Ok(ApproachResult {
            name: kind.name().to_string(),
            output_grid,
            confidence,
            validation,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::grid;

    fn example(input: &[&[u8]], output: &[&[u8]]) -> Example {
        Example::new(grid(input), grid(output))
    }

    #[test]
    fn test_color_mapping_task() {
        let train = vec![
            example(&[&[1, 2], &[2, 1]], &[&[3, 4], &[4, 3]]),
            example(&[&[2, 2], &[1, 1]], &[&[4, 4], &[3, 3]]),
        ];
        let outcome = MultiApproachSolver::new().solve_grid(&train, &grid(&[&[1, 1], &[2, 2]]));

        assert_eq!(outcome.method, "color_mapping");
        assert!(outcome.validation.passed);
        assert_eq!(outcome.solution, grid(&[&[3, 3], &[4, 4]]));
    }

    #[test]
    fn test_tiling_task() {
        let train = vec![example(
            &[&[1, 2]],
            &[&[1, 2, 1, 2], &[1, 2, 1, 2]],
        )];
        let outcome = MultiApproachSolver::new().solve_grid(&train, &grid(&[&[3, 4]]));

        assert_eq!(outcome.method, "tiling");
        assert!(outcome.validation.passed);
        assert_eq!(
            outcome.solution,
            grid(&[&[3, 4, 3, 4], &[3, 4, 3, 4]])
        );
    }

    #[test]
    fn test_masked_deployment_task() {
        let input = grid(&[&[1, 0], &[0, 1]]);
        let output = grid(&[
            &[1, 0, 0, 0],
            &[0, 1, 0, 0],
            &[0, 0, 1, 0],
            &[0, 0, 0, 1],
        ]);
        let train = vec![Example::new(input.clone(), output)];
        let outcome = MultiApproachSolver::new().solve_grid(&train, &input);

        assert_eq!(outcome.method, "masked_deployment");
        assert!(outcome.validation.passed);
    }

    /// Cross-validation success takes precedence over raw heuristic
    /// confidence: masked deployment carries the highest bonus, but if it
    /// cannot reproduce the training outputs it must lose to a
    /// lower-confidence approach that can.
    #[test]
    fn test_validation_outranks_confidence() {
        // Output has squared dimensions, so masked deployment derives and
        // carries the top heuristic bonus, but the content is a plain tile
        // of the input (the zeros expose the difference).
        let input = grid(&[&[1, 0], &[0, 1]]);
        let tiled = grid(&[
            &[1, 0, 1, 0],
            &[0, 1, 0, 1],
            &[1, 0, 1, 0],
            &[0, 1, 0, 1],
        ]);
        let train = vec![Example::new(input.clone(), tiled.clone())];

        let solver = MultiApproachSolver::new();

        // Both approaches attempt; masked deployment has the higher raw
        // confidence but fails validation.
        let masked = solver
            .attempt(ApproachKind::MaskedDeployment, &train, &input)
            .unwrap();
        let tiling = solver.attempt(ApproachKind::Tiling, &train, &input).unwrap();
        assert!(masked.confidence > tiling.confidence);
        assert!(!masked.validation.passed);
        assert!(tiling.validation.passed);

        let outcome = solver.solve_grid(&train, &input);
        assert_eq!(outcome.method, "tiling");
        assert!(outcome.validation.passed);
        assert_eq!(outcome.solution, tiled);
    }

    #[test]
    fn test_validation_counts_errors() {
        // Color mapping conflicts across pairs (1 -> 3 and 1 -> 5), marker
        // erasure finds no common erased color, tiling and deployment see
        // unchanged dimensions. Only identity attempts, and it mismatches
        // every pair.
        let train = vec![
            example(&[&[1, 2]], &[&[3, 4]]),
            example(&[&[2, 9]], &[&[4, 9]]),
            example(&[&[1, 1]], &[&[5, 5]]),
        ];
        let outcome = MultiApproachSolver::new().solve_grid(&train, &grid(&[&[1]]));
        assert_eq!(outcome.method, "identity");
        assert!(!outcome.validation.passed);
        assert_eq!(outcome.validation.total, 3);
        assert!(outcome.validation.error_count > 0);
    }

    #[test]
    fn test_identity_fallback_when_nothing_applies() {
        // Train pairs with no consistent rule among the registered
        // approaches: different size (no remap), all input colors survive
        // (no marker), dimensions not a multiple (no tiling/deployment).
        let train = vec![example(&[&[1, 2]], &[&[1, 2, 2]])];
        let subject = grid(&[&[7, 8]]);
        let outcome = MultiApproachSolver::new().solve_grid(&train, &subject);

        assert_eq!(outcome.method, "identity");
        assert_eq!(outcome.solution, subject);
        assert!(!outcome.validation.passed);
    }

    #[test]
    fn test_solve_uses_first_test_input() {
        let task = Task {
            train: vec![example(&[&[1]], &[&[2]])],
            test: vec![example(&[&[1, 1]], &[&[2, 2]])],
        };
        let outcome = MultiApproachSolver::new().solve(&task);
        assert_eq!(outcome.method, "color_mapping");
        assert_eq!(outcome.solution, grid(&[&[2, 2]]));
    }

    #[test]
    fn test_solve_empty_task_degenerates() {
        let task = Task {
            train: vec![],
            test: vec![],
        };
        let outcome = MultiApproachSolver::new().solve(&task);
        assert_eq!(outcome.confidence, 0.0);
        assert_eq!(outcome.method, "identity");
    }

    /// A train-only task is not re-solved against a training input: with no
    /// test subject the approaches stay untried and the outcome is the
    /// zero-confidence identity.
    #[test]
    fn test_solve_train_only_task_is_identity() {
        let task = Task {
            train: vec![example(&[&[1]], &[&[2]])],
            test: vec![],
        };
        let outcome = MultiApproachSolver::new().solve(&task);
        assert_eq!(outcome.method, "identity");
        assert_eq!(outcome.confidence, 0.0);
        assert_eq!(outcome.solution, grid(&[&[1]]));
        assert!(!outcome.validation.passed);
        assert_eq!(outcome.validation.total, 1);
    }

    #[test]
    fn test_shape_bonus_applied() {
        let train = vec![example(&[&[1]], &[&[2]])];
        let solver = MultiApproachSolver::new();

        let plain = solver
            .attempt(ApproachKind::ColorMapping, &train, &grid(&[&[1, 2]]))
            .unwrap();
        let shaped = solver
            .attempt(
                ApproachKind::ColorMapping,
                &train,
                &grid(&[&[1, 1], &[1, 1]]),
            )
            .unwrap();
        assert!((shaped.confidence - plain.confidence - SHAPE_BONUS).abs() < 1e-12);
    }
}
