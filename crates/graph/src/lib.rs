//! Graph store access for PaperLens.
//!
//! - [`Neo4jHttpStore`] implements `paperlens_core::GraphStore` over the
//!   Neo4j HTTP transactional endpoint.
//! - [`queries`] holds the fixed, read-only Cypher templates the search
//!   tools run.
//! - [`normalize`] turns raw rows into `PaperRecord`s and `GraphStatistics`.
//! - [`schema`] describes the graph for LLM prompts and sets up constraints.

pub mod neo4j;
pub mod normalize;
pub mod queries;
pub mod schema;

pub use neo4j::Neo4jHttpStore;
pub use normalize::{normalize_record, normalize_records, statistics_from_record};
pub use schema::{initialize_schema, schema_description};
