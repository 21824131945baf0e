//! Papers whose authors are affiliated with a named institution.

use async_trait::async_trait;
use paperlens_core::error::ToolError;
use paperlens_core::graph::GraphStore;
use paperlens_core::observation::Observation;
use paperlens_core::tool::{ParameterSpec, Tool, ToolInput, bind_argument};
use paperlens_graph::queries;
use std::sync::Arc;
use tracing::info;

use crate::fetch_papers;

pub const NAME: &str = "institution_search";

pub struct InstitutionSearchTool {
    store: Arc<dyn GraphStore>,
    limit: usize,
}

impl InstitutionSearchTool {
    pub fn new(store: Arc<dyn GraphStore>, limit: usize) -> Self {
        Self { store, limit }
    }
}

#[async_trait]
impl Tool for InstitutionSearchTool {
    fn name(&self) -> &str {
        NAME
    }

    fn description(&self) -> &str {
        "Question mentions a university, college, or research lab"
    }

    fn example(&self) -> Option<&str> {
        Some(r#"institution_search("IIT Tirupati")"#)
    }

    fn parameter(&self) -> Option<ParameterSpec> {
        Some(ParameterSpec::required("name"))
    }

    async fn execute(&self, input: ToolInput) -> Result<Observation, ToolError> {
        let name = bind_argument(NAME, self.parameter(), &input)?.unwrap_or_default();
        let papers = fetch_papers(
            self.store.as_ref(),
            NAME,
            queries::INSTITUTION_SEARCH,
            queries::search_params("institution_name", &name, self.limit),
        )
        .await?;
        info!(name = %name, results = papers.len(), "institution_search");
        Ok(Observation::Records(papers))
    }
}
