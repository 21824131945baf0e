pub mod ask;
pub mod config_cmd;
pub mod doctor;
pub mod eval;
pub mod init_schema;

use paperlens_config::AppConfig;
use paperlens_core::graph::GraphStore;
use paperlens_core::provider::Provider;
use paperlens_graph::Neo4jHttpStore;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

/// Load the config from `path`, or from the default location.
pub fn load_config(path: Option<&Path>) -> Result<AppConfig, Box<dyn std::error::Error>> {
    debug!(path = ?path, "Loading config");
    let config = match path {
        Some(path) => {
            let mut config = AppConfig::load_from(path)?;
            config.apply_env(|key| std::env::var(key).ok());
            config.validate()?;
            config
        }
        None => AppConfig::load()?,
    };
    Ok(config)
}

/// The two external backends described by `config`.
pub fn backends(config: &AppConfig) -> (Arc<dyn Provider>, Arc<dyn GraphStore>) {
    let provider = paperlens_providers::build_provider(&config.llm);
    let store: Arc<dyn GraphStore> = Arc::new(Neo4jHttpStore::new(&config.graph));
    (provider, store)
}
