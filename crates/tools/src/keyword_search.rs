//! Keyword search over paper titles and abstracts.

use async_trait::async_trait;
use paperlens_core::error::ToolError;
use paperlens_core::graph::GraphStore;
use paperlens_core::observation::{Observation, PaperRecord};
use paperlens_core::tool::{ParameterSpec, Tool, ToolInput, bind_argument};
use paperlens_graph::queries;
use std::sync::Arc;
use tracing::{info, warn};

use crate::fetch_papers;

pub const NAME: &str = "keyword_search";

/// How many papers a blank query returns.
const BLANK_QUERY_PAPERS: usize = 10;

pub struct KeywordSearchTool {
    store: Arc<dyn GraphStore>,
    limit: usize,
}

impl KeywordSearchTool {
    pub fn new(store: Arc<dyn GraphStore>, limit: usize) -> Self {
        Self { store, limit }
    }

    /// Search for `query`.
    ///
    /// A blank query returns the most-cited papers. A multi-word query with
    /// no hits is retried once with its first word.
    pub async fn search(&self, query: &str) -> Result<Vec<PaperRecord>, ToolError> {
        let query = query.trim();
        if query.is_empty() {
            warn!("keyword_search called with empty query, returning most-cited papers");
            return fetch_papers(
                self.store.as_ref(),
                NAME,
                queries::MOST_CITED,
                queries::limit_params(BLANK_QUERY_PAPERS.min(self.limit)),
            )
            .await;
        }

        let results = self.fetch(query).await?;
        info!(query, results = results.len(), "keyword_search");

        let words: Vec<&str> = query.split_whitespace().collect();
        if results.is_empty() && words.len() > 2 {
            let short_query = words[0];
            info!(short_query, "Retrying keyword_search with first word");
            let retry = self.fetch(short_query).await?;
            info!(results = retry.len(), "keyword_search retry");
            return Ok(retry);
        }
        Ok(results)
    }

    async fn fetch(&self, keyword: &str) -> Result<Vec<PaperRecord>, ToolError> {
        fetch_papers(
            self.store.as_ref(),
            NAME,
            queries::KEYWORD_SEARCH,
            queries::search_params("keyword", keyword, self.limit),
        )
        .await
    }
}

#[async_trait]
impl Tool for KeywordSearchTool {
    fn name(&self) -> &str {
        NAME
    }

    fn description(&self) -> &str {
        "General question about a topic, concept, or theme"
    }

    fn example(&self) -> Option<&str> {
        Some(r#"keyword_search("graph neural networks")"#)
    }

    fn parameter(&self) -> Option<ParameterSpec> {
        Some(ParameterSpec::with_default("query", ""))
    }

    async fn execute(&self, input: ToolInput) -> Result<Observation, ToolError> {
        let query = bind_argument(NAME, self.parameter(), &input)?.unwrap_or_default();
        Ok(Observation::Records(self.search(&query).await?))
    }
}
