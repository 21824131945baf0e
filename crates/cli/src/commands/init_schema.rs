//! `paperlens init-schema`: Create graph constraints and indexes.

use paperlens_graph::{Neo4jHttpStore, initialize_schema};
use std::path::Path;

pub async fn run(config_path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let config = super::load_config(config_path)?;
    let store = Neo4jHttpStore::new(&config.graph);

    println!("Initializing schema at {}", store.endpoint());
    let applied = initialize_schema(&store).await?;
    println!("  {applied} of {} statements applied", paperlens_graph::schema::SCHEMA_STATEMENTS.len());
    Ok(())
}
