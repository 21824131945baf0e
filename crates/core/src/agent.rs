//! Reasoning-loop data model: decisions, steps, the thought chain, and the
//! externally visible result of answering one question.

use crate::observation::Observation;
use crate::tool::ToolArgs;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The terminal sentinel: "stop the loop and answer now".
pub const FINISH: &str = "FINISH";

/// What the planner wants to do next.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decision {
    pub thought: String,
    pub tool: String,
    #[serde(default)]
    pub args: ToolArgs,
}

impl Decision {
    pub fn new(thought: impl Into<String>, tool: impl Into<String>, args: ToolArgs) -> Self {
        Self {
            thought: thought.into(),
            tool: tool.into(),
            args,
        }
    }

    /// A terminal decision.
    pub fn finish(thought: impl Into<String>) -> Self {
        Self::new(thought, FINISH, ToolArgs::new())
    }

    pub fn is_finish(&self) -> bool {
        self.tool == FINISH
    }
}

/// One executed iteration of the loop. Immutable once appended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
    /// 1-based step index.
    pub step: usize,
    pub thought: String,
    pub action: String,
    pub args: ToolArgs,
    /// Human-readable observation summary.
    pub observation: String,
    pub raw_results: Observation,
}

/// Append-only, ordered evidence trail for one question.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ThoughtChain {
    steps: Vec<Step>,
}

impl ThoughtChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, step: Step) {
        self.steps.push(step);
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn last(&self) -> Option<&Step> {
        self.steps.last()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Step> {
        self.steps.iter()
    }
}

impl<'a> IntoIterator for &'a ThoughtChain {
    type Item = &'a Step;
    type IntoIter = std::slice::Iter<'a, Step>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}

/// The answer to one question plus its full audit trail.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentResult {
    pub question: String,
    pub answer: String,
    pub thought_chain: ThoughtChain,
    pub steps_taken: usize,
    /// Wall-clock seconds, rounded to two decimals.
    pub latency_s: f64,
    pub success: bool,
    pub started_at: DateTime<Utc>,
}
