//! Benchmark harness for the PaperLens agent.
//!
//! Runs a dataset of questions through a [`ResearchAgent`] and scores each
//! answer on tool accuracy, answer relevance, faithfulness to the
//! retrieved data, and similarity to a reference answer. Latency and step
//! counts come straight from the agent result.
//!
//! [`ResearchAgent`]: paperlens_agent::ResearchAgent

pub mod dataset;
pub mod metrics;
pub mod report;
pub mod runner;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use dataset::{EvalCase, load_dataset, parse_dataset};
pub use metrics::{MetricJudge, keyword_overlap, numeric_faithfulness, tool_accuracy};
pub use report::{CategoryScores, EvalReport, EvalSummary, QuestionResult};
pub use runner::{Evaluator, QUICK_CASES};

use std::path::PathBuf;

/// Errors from the evaluation harness.
#[derive(Debug, thiserror::Error)]
pub enum EvalError {
    #[error("failed to read {path}: {reason}")]
    Read { path: PathBuf, reason: String },

    #[error("failed to write {path}: {reason}")]
    Write { path: PathBuf, reason: String },

    #[error("invalid dataset: {0}")]
    Dataset(#[from] serde_json::Error),

    #[error("dataset has no questions")]
    EmptyDataset,
}
