//! Whole-graph counts.

use async_trait::async_trait;
use paperlens_core::error::ToolError;
use paperlens_core::graph::{GraphStore, Params};
use paperlens_core::observation::Observation;
use paperlens_core::tool::{ParameterSpec, Tool, ToolInput, bind_argument};
use paperlens_graph::{queries, statistics_from_record};
use std::sync::Arc;
use tracing::info;

pub const NAME: &str = "get_statistics";

pub struct GetStatisticsTool {
    store: Arc<dyn GraphStore>,
}

impl GetStatisticsTool {
    pub fn new(store: Arc<dyn GraphStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Tool for GetStatisticsTool {
    fn name(&self) -> &str {
        NAME
    }

    fn description(&self) -> &str {
        r#"Question asks "how many", "total", "count", "statistics", "overview""#
    }

    fn example(&self) -> Option<&str> {
        Some("get_statistics()")
    }

    fn parameter(&self) -> Option<ParameterSpec> {
        None
    }

    async fn execute(&self, input: ToolInput) -> Result<Observation, ToolError> {
        bind_argument(NAME, self.parameter(), &input)?;

        let failed = |reason: String| ToolError::ExecutionFailed {
            tool_name: NAME.into(),
            reason,
        };

        let rows = self
            .store
            .query(queries::STATISTICS, Params::new())
            .await
            .map_err(|e| failed(e.to_string()))?;

        let stats = rows
            .first()
            .and_then(statistics_from_record)
            .ok_or_else(|| failed("statistics query returned no usable row".into()))?;

        info!(
            papers = stats.total_papers,
            authors = stats.total_authors,
            topics = stats.total_topics,
            institutions = stats.total_institutions,
            "get_statistics"
        );
        Ok(Observation::Statistics(stats))
    }
}
