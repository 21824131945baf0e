//! Generated-query search for questions the templates cannot express:
//! numeric thresholds, date ranges, comparisons, multiple conditions.
//!
//! The question goes through a [`QueryGenerator`]. Its output is checked
//! with [`check_read_only`] again here, whatever the generator, before it
//! reaches the store. If generation, the check or execution fails, the
//! question itself is used as a keyword search.

use async_trait::async_trait;
use paperlens_core::error::ToolError;
use paperlens_core::graph::{GraphStore, Params};
use paperlens_core::observation::{Observation, PaperRecord};
use paperlens_core::query::{QueryGenerator, check_read_only};
use paperlens_core::tool::{ParameterSpec, Tool, ToolInput, bind_argument};
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::keyword_search::KeywordSearchTool;

pub const NAME: &str = "cypher_search";

pub struct CypherSearchTool {
    store: Arc<dyn GraphStore>,
    generator: Arc<dyn QueryGenerator>,
    fallback: Arc<KeywordSearchTool>,
    limit: usize,
}

impl CypherSearchTool {
    pub fn new(
        store: Arc<dyn GraphStore>,
        generator: Arc<dyn QueryGenerator>,
        fallback: Arc<KeywordSearchTool>,
        limit: usize,
    ) -> Self {
        Self {
            store,
            generator,
            fallback,
            limit,
        }
    }

    async fn search(&self, question: &str) -> Result<Vec<PaperRecord>, ToolError> {
        let generated = match self.generator.generate(question).await {
            Ok(generated) => generated,
            Err(e) => {
                warn!(error = %e, "Query generation failed, falling back to keyword search");
                return self.fallback.search(question).await;
            }
        };

        if let Err(e) = check_read_only(&generated.query) {
            error!(query = %generated.query, error = %e, "Generated query rejected, falling back to keyword search");
            return self.fallback.search(question).await;
        }

        info!(query = %generated.query, "Running generated query");

        match self.store.query(&generated.query, Params::new()).await {
            Ok(rows) => {
                let mut papers = paperlens_graph::normalize_records(rows);
                papers.truncate(self.limit);
                info!(results = papers.len(), "cypher_search");
                Ok(papers)
            }
            Err(e) => {
                error!(error = %e, "Generated query failed, falling back to keyword search");
                self.fallback.search(question).await
            }
        }
    }
}

#[async_trait]
impl Tool for CypherSearchTool {
    fn name(&self) -> &str {
        NAME
    }

    fn description(&self) -> &str {
        "Question has numeric filters (citations > X), date filters (after 2020), \
         comparisons (more than, less than), or complex multi-condition queries"
    }

    fn example(&self) -> Option<&str> {
        Some(r#"cypher_search("papers with more than 500 citations published after 2021")"#)
    }

    fn parameter(&self) -> Option<ParameterSpec> {
        Some(ParameterSpec::required("question"))
    }

    async fn execute(&self, input: ToolInput) -> Result<Observation, ToolError> {
        let question = bind_argument(NAME, self.parameter(), &input)?.unwrap_or_default();
        Ok(Observation::Records(self.search(&question).await?))
    }
}
