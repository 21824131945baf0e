//! Retrieval tools for PaperLens.
//!
//! Each tool is a thin adapter from one argument to a read-only graph
//! query, returning normalized [`Observation`]s:
//! keyword, author, institution and topic search, whole-graph statistics,
//! and LLM-generated queries. The [`ToolExecutor`] sits in front of the
//! registry and makes sure no tool failure ever reaches the agent loop.

pub mod author_search;
pub mod cypher_search;
pub mod executor;
pub mod get_statistics;
pub mod institution_search;
pub mod keyword_search;
pub mod topic_search;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use author_search::AuthorSearchTool;
pub use cypher_search::CypherSearchTool;
pub use executor::ToolExecutor;
pub use get_statistics::GetStatisticsTool;
pub use institution_search::InstitutionSearchTool;
pub use keyword_search::KeywordSearchTool;
pub use topic_search::TopicSearchTool;

use paperlens_core::error::ToolError;
use paperlens_core::graph::{GraphStore, Params};
use paperlens_core::observation::PaperRecord;
use paperlens_core::query::QueryGenerator;
use paperlens_core::tool::ToolRegistry;
use std::sync::Arc;

/// Create the registry of all six retrieval tools, in catalog order.
///
/// `max_records` bounds every template query at the source; the executor
/// truncates again so generated queries are bounded too.
pub fn default_registry(
    store: Arc<dyn GraphStore>,
    generator: Arc<dyn QueryGenerator>,
    max_records: usize,
) -> ToolRegistry {
    let keyword = Arc::new(KeywordSearchTool::new(store.clone(), max_records));

    let mut registry = ToolRegistry::new();
    registry.register(keyword.clone());
    registry.register(Arc::new(AuthorSearchTool::new(store.clone(), max_records)));
    registry.register(Arc::new(InstitutionSearchTool::new(store.clone(), max_records)));
    registry.register(Arc::new(TopicSearchTool::new(store.clone(), max_records)));
    registry.register(Arc::new(CypherSearchTool::new(
        store.clone(),
        generator,
        keyword,
        max_records,
    )));
    registry.register(Arc::new(GetStatisticsTool::new(store)));
    registry
}

/// Run a template and normalize its rows.
pub(crate) async fn fetch_papers(
    store: &dyn GraphStore,
    tool_name: &str,
    statement: &str,
    params: Params,
) -> Result<Vec<PaperRecord>, ToolError> {
    let rows = store
        .query(statement, params)
        .await
        .map_err(|e| ToolError::ExecutionFailed {
            tool_name: tool_name.to_string(),
            reason: e.to_string(),
        })?;
    Ok(paperlens_graph::normalize_records(rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{FailingGenerator, FakeGraph};

    #[test]
    fn registry_lists_tools_in_catalog_order() {
        let registry = default_registry(
            Arc::new(FakeGraph::default()),
            Arc::new(FailingGenerator),
            20,
        );
        assert_eq!(
            registry.names(),
            vec![
                "keyword_search",
                "author_search",
                "institution_search",
                "topic_search",
                "cypher_search",
                "get_statistics",
            ]
        );
        assert!(registry.iter().all(|tool| tool.example().is_some()));
    }
}
