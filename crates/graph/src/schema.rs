//! The graph schema: its prompt description and its constraints.

use paperlens_core::error::GraphError;
use paperlens_core::graph::{GraphStore, Params};
use tracing::{info, warn};

const SCHEMA_DESCRIPTION: &str = "
NODE TYPES:
- Paper:       paper_id, title, abstract, year (int), citation_count (int)
- Author:      author_id, name, h_index (int)
- Institution: inst_id, name, country
- Topic:       name

RELATIONSHIPS:
- (Author)-[:WROTE]->(Paper)
- (Author)-[:AFFILIATED_WITH]->(Institution)
- (Paper)-[:ABOUT]->(Topic)
- (Paper)-[:CITES]->(Paper)

EXAMPLE QUERIES:
  Papers after 2020:
    MATCH (p:Paper) WHERE p.year > 2020 RETURN p.title, p.year ORDER BY p.year DESC LIMIT 20

  Papers from IIT:
    MATCH (i:Institution)<-[:AFFILIATED_WITH]-(a:Author)-[:WROTE]->(p:Paper)
    WHERE toLower(i.name) CONTAINS 'iit'
    RETURN p.title, a.name, i.name LIMIT 20

  Most cited:
    MATCH (p:Paper) RETURN p.title, p.citation_count ORDER BY p.citation_count DESC LIMIT 10

  Papers with >500 citations about deep learning:
    MATCH (p:Paper)-[:ABOUT]->(t:Topic)
    WHERE p.citation_count > 500 AND toLower(t.name) CONTAINS 'deep learning'
    RETURN p.title, p.citation_count LIMIT 20
";

/// Constraint and index statements. All are `IF NOT EXISTS`, so running
/// them repeatedly is harmless.
pub const SCHEMA_STATEMENTS: [&str; 3] = [
    "CREATE CONSTRAINT paper_id IF NOT EXISTS FOR (p:Paper) REQUIRE p.paper_id IS UNIQUE",
    "CREATE CONSTRAINT author_id IF NOT EXISTS FOR (a:Author) REQUIRE a.author_id IS UNIQUE",
    "CREATE INDEX paper_year IF NOT EXISTS FOR (p:Paper) ON (p.year)",
];

/// Static description of node kinds, relationships and sample queries,
/// passed verbatim into query-generation prompts.
pub fn schema_description() -> &'static str {
    SCHEMA_DESCRIPTION
}

/// Apply [`SCHEMA_STATEMENTS`] through the store's write path.
///
/// A failing statement is logged and skipped; the number of statements
/// that succeeded is returned. Only a connection failure aborts.
pub async fn initialize_schema(store: &dyn GraphStore) -> Result<usize, GraphError> {
    info!("Initializing schema");
    let mut applied = 0;
    for statement in SCHEMA_STATEMENTS {
        match store.write(statement, Params::new()).await {
            Ok(()) => {
                applied += 1;
                info!(statement, "Schema statement applied");
            }
            Err(e @ GraphError::Connection(_)) => return Err(e),
            Err(e) => warn!(statement, error = %e, "Schema statement skipped"),
        }
    }
    Ok(applied)
}
