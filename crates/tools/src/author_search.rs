//! Papers written by a named author.

use async_trait::async_trait;
use paperlens_core::error::ToolError;
use paperlens_core::graph::GraphStore;
use paperlens_core::observation::Observation;
use paperlens_core::tool::{ParameterSpec, Tool, ToolInput, bind_argument};
use paperlens_graph::queries;
use std::sync::Arc;
use tracing::info;

use crate::fetch_papers;

pub const NAME: &str = "author_search";

pub struct AuthorSearchTool {
    store: Arc<dyn GraphStore>,
    limit: usize,
}

impl AuthorSearchTool {
    pub fn new(store: Arc<dyn GraphStore>, limit: usize) -> Self {
        Self { store, limit }
    }
}

#[async_trait]
impl Tool for AuthorSearchTool {
    fn name(&self) -> &str {
        NAME
    }

    fn description(&self) -> &str {
        "Question mentions a specific researcher or asks \"who wrote\""
    }

    fn example(&self) -> Option<&str> {
        Some(r#"author_search("Sarah Johnson")"#)
    }

    fn parameter(&self) -> Option<ParameterSpec> {
        Some(ParameterSpec::required("name"))
    }

    async fn execute(&self, input: ToolInput) -> Result<Observation, ToolError> {
        let name = bind_argument(NAME, self.parameter(), &input)?.unwrap_or_default();
        let papers = fetch_papers(
            self.store.as_ref(),
            NAME,
            queries::AUTHOR_SEARCH,
            queries::search_params("author_name", &name, self.limit),
        )
        .await?;
        info!(name = %name, results = papers.len(), "author_search");
        Ok(Observation::Records(papers))
    }
}
