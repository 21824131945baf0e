//! Papers linked to a topic node.

use async_trait::async_trait;
use paperlens_core::error::ToolError;
use paperlens_core::graph::GraphStore;
use paperlens_core::observation::Observation;
use paperlens_core::tool::{ParameterSpec, Tool, ToolInput, bind_argument};
use paperlens_graph::queries;
use std::sync::Arc;
use tracing::info;

use crate::fetch_papers;

pub const NAME: &str = "topic_search";

pub struct TopicSearchTool {
    store: Arc<dyn GraphStore>,
    limit: usize,
}

impl TopicSearchTool {
    pub fn new(store: Arc<dyn GraphStore>, limit: usize) -> Self {
        Self { store, limit }
    }
}

#[async_trait]
impl Tool for TopicSearchTool {
    fn name(&self) -> &str {
        NAME
    }

    fn description(&self) -> &str {
        "Question asks about a specific research field or topic node"
    }

    fn example(&self) -> Option<&str> {
        Some(r#"topic_search("Deep Learning")"#)
    }

    fn parameter(&self) -> Option<ParameterSpec> {
        Some(ParameterSpec::required("topic"))
    }

    async fn execute(&self, input: ToolInput) -> Result<Observation, ToolError> {
        let topic = bind_argument(NAME, self.parameter(), &input)?.unwrap_or_default();
        let papers = fetch_papers(
            self.store.as_ref(),
            NAME,
            queries::TOPIC_SEARCH,
            queries::search_params("topic", &topic, self.limit),
        )
        .await?;
        info!(topic = %topic, results = papers.len(), "topic_search");
        Ok(Observation::Records(papers))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::FakeGraph;
    use serde_json::json;

    #[tokio::test]
    async fn wrong_argument_name_is_mismatch() {
        let tool = TopicSearchTool::new(Arc::new(FakeGraph::default()), 20);
        let input = ToolInput::Named(json!({"name": "Deep Learning"}).as_object().cloned().unwrap());
        let err = tool.execute(input).await.unwrap_err();
        assert!(err.is_argument_mismatch());
    }

    #[tokio::test]
    async fn topic_column_folds_into_topics() {
        let graph = Arc::new(FakeGraph::default().when(
            "Deep Learning",
            vec![json!({
                "topic": "Deep Learning",
                "title": "ImageNet Classification",
                "year": 2012,
                "citations": 120000,
                "authors": ["Alex Krizhevsky"],
                "institutions": ["University of Toronto"]
            })],
        ));
        let tool = TopicSearchTool::new(graph, 20);
        let input = ToolInput::Named(json!({"topic": "Deep Learning"}).as_object().cloned().unwrap());
        let Observation::Records(papers) = tool.execute(input).await.unwrap() else {
            panic!("expected records");
        };
        assert_eq!(papers[0].topics, vec!["Deep Learning"]);
        assert_eq!(papers[0].institutions, vec!["University of Toronto"]);
    }
}
