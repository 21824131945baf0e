//! Evaluation dataset: a JSON array of benchmark questions.

use crate::EvalError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// One benchmark question with its reference answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvalCase {
    pub id: u32,
    pub question: String,
    pub ground_truth: String,
    /// The tool a good plan would pick first.
    pub expected_tool: String,
    pub category: String,
}

/// Parse a dataset from JSON text. An empty array is an error.
pub fn parse_dataset(json: &str) -> Result<Vec<EvalCase>, EvalError> {
    let cases: Vec<EvalCase> = serde_json::from_str(json)?;
    if cases.is_empty() {
        return Err(EvalError::EmptyDataset);
    }
    Ok(cases)
}

pub fn load_dataset(path: &Path) -> Result<Vec<EvalCase>, EvalError> {
    let content = std::fs::read_to_string(path).map_err(|e| EvalError::Read {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let cases = parse_dataset(&content)?;
    info!(path = %path.display(), questions = cases.len(), "Loaded evaluation dataset");
    Ok(cases)
}
