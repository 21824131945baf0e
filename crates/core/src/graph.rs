//! GraphStore trait: the abstraction over the research-paper graph database.
//!
//! The store answers read queries with a list of record mappings. A separate
//! write entry point exists for schema setup; the agent never calls it.

use crate::error::GraphError;
use async_trait::async_trait;

/// A single result row, keyed by the column names of the query.
pub type Record = serde_json::Map<String, serde_json::Value>;

/// Named query parameters.
pub type Params = serde_json::Map<String, serde_json::Value>;

#[async_trait]
pub trait GraphStore: Send + Sync {
    /// A human-readable name for this store (e.g., "neo4j").
    fn name(&self) -> &str;

    /// Run a read query with named parameters.
    async fn query(&self, statement: &str, params: Params) -> Result<Vec<Record>, GraphError>;

    /// Run a write statement. Only schema/ingestion code calls this.
    async fn write(&self, statement: &str, params: Params) -> Result<(), GraphError>;

    /// Health check: can we reach the store?
    async fn health_check(&self) -> Result<bool, GraphError> {
        Ok(true)
    }
}
