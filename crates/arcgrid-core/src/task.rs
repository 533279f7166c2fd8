//! Task: the puzzle-file shape consumed from the harness layer.
//!
//! A puzzle file is JSON with a `train` list of input/output pairs and an
//! optional `test` list of the same shape. Grid validation happens during
//! deserialization, so a parsed Task is always well-formed.

use serde::{Deserialize, Serialize};

use crate::grid::Example;

/// A full puzzle: training pairs plus optional test pairs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub train: Vec<Example>,
    #[serde(default)]
    pub test: Vec<Example>,
}

impl Task {
    /// Parse a puzzle file body.
    pub fn from_json(body: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(body)
    }
}
