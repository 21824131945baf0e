//! Tool executor: the failure boundary between the agent and its tools.
//!
//! `execute` always returns an [`Observation`]:
//! - an unknown tool name runs `keyword_search` with the first argument value
//! - an argument mismatch is retried once with that value passed positionally
//! - any other failure is logged and becomes an empty result
//!
//! Record lists are truncated to `max_records` before they leave.

use paperlens_core::observation::Observation;
use paperlens_core::tool::{Tool, ToolArgs, ToolInput, ToolRegistry};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, error, warn};

use crate::keyword_search;

pub struct ToolExecutor {
    registry: ToolRegistry,
    max_records: usize,
}

impl ToolExecutor {
    pub fn new(registry: ToolRegistry, max_records: usize) -> Self {
        Self {
            registry,
            max_records,
        }
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Run `tool_name` with the planner's arguments. Never fails.
    pub async fn execute(&self, tool_name: &str, args: &ToolArgs) -> Observation {
        let Some((tool, args)) = self.resolve(tool_name, args) else {
            error!(tool = tool_name, "No tool available to run");
            return Observation::empty();
        };

        let name = tool.name().to_string();
        let result = match tool.execute(ToolInput::Named(args.clone())).await {
            Err(e) if e.is_argument_mismatch() => {
                warn!(tool = %name, error = %e, "Tool argument mismatch, retrying positionally");
                tool.execute(ToolInput::Positional(first_value(&args))).await
            }
            other => other,
        };

        match result {
            Ok(mut observation) => {
                observation.truncate(self.max_records);
                debug!(tool = %name, results = observation.len(), "Tool finished");
                observation
            }
            Err(e) => {
                error!(tool = %name, error = %e, "Tool execution failed");
                Observation::empty()
            }
        }
    }

    /// Look the tool up, substituting keyword search for unknown names.
    fn resolve(&self, tool_name: &str, args: &ToolArgs) -> Option<(Arc<dyn Tool>, ToolArgs)> {
        if let Some(tool) = self.registry.get(tool_name) {
            return Some((tool, args.clone()));
        }

        warn!(tool = tool_name, "Unknown tool, using keyword_search");
        let mut query = ToolArgs::new();
        query.insert("query".into(), first_value(args));
        self.registry
            .get(keyword_search::NAME)
            .map(|tool| (tool, query))
    }
}

/// The first supplied argument value, or an empty string.
fn first_value(args: &ToolArgs) -> Value {
    args.values()
        .next()
        .cloned()
        .unwrap_or_else(|| Value::String(String::new()))
}
