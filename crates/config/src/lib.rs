//! Configuration loading, validation, and management for PaperLens.
//!
//! Loads configuration from `~/.paperlens/config.toml` with environment
//! variable overrides. Validates all settings at startup. Each component
//! receives the section it needs through its constructor.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// The root configuration structure.
///
/// Maps directly to `~/.paperlens/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// LLM endpoint and timeouts
    #[serde(default)]
    pub llm: LlmConfig,

    /// Graph store connection
    #[serde(default)]
    pub graph: GraphConfig,

    /// Reasoning loop tunables
    #[serde(default)]
    pub agent: AgentSettings,
}

#[derive(Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// "ollama", "openai", or any OpenAI-compatible provider name
    #[serde(default = "default_llm_provider")]
    pub provider: String,

    /// Base URL override; the provider default is used when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Timeout for planning and answer synthesis calls
    #[serde(default = "default_planning_timeout")]
    pub planning_timeout_secs: u64,

    /// Timeout for query generation calls
    #[serde(default = "default_query_timeout")]
    pub query_timeout_secs: u64,
}

fn default_llm_provider() -> String {
    "ollama".into()
}
fn default_model() -> String {
    "llama3.2".into()
}
fn default_planning_timeout() -> u64 {
    90
}
fn default_query_timeout() -> u64 {
    45
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: default_llm_provider(),
            base_url: None,
            model: default_model(),
            api_key: None,
            planning_timeout_secs: default_planning_timeout(),
            query_timeout_secs: default_query_timeout(),
        }
    }
}

#[derive(Clone, Serialize, Deserialize)]
pub struct GraphConfig {
    /// Neo4j HTTP endpoint
    #[serde(default = "default_graph_url")]
    pub url: String,

    #[serde(default = "default_database")]
    pub database: String,

    #[serde(default = "default_graph_user")]
    pub user: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,

    #[serde(default = "default_graph_timeout")]
    pub timeout_secs: u64,
}

fn default_graph_url() -> String {
    "http://localhost:7474".into()
}
fn default_database() -> String {
    "neo4j".into()
}
fn default_graph_user() -> String {
    "neo4j".into()
}
fn default_graph_timeout() -> u64 {
    30
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            url: default_graph_url(),
            database: default_database(),
            user: default_graph_user(),
            password: None,
            timeout_secs: default_graph_timeout(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentSettings {
    /// Maximum tool calls per question
    #[serde(default = "default_max_steps")]
    pub max_steps: usize,

    /// Cap on records a single tool may return
    #[serde(default = "default_max_records")]
    pub max_records: usize,

    /// Record count at which a list result counts as sufficient
    #[serde(default = "default_sufficient_records")]
    pub sufficient_records: usize,

    /// Records listed in an observation summary
    #[serde(default = "default_summary_preview")]
    pub summary_preview: usize,
}

fn default_max_steps() -> usize {
    3
}
fn default_max_records() -> usize {
    20
}
fn default_sufficient_records() -> usize {
    3
}
fn default_summary_preview() -> usize {
    5
}

impl Default for AgentSettings {
    fn default() -> Self {
        Self {
            max_steps: default_max_steps(),
            max_records: default_max_records(),
            sufficient_records: default_sufficient_records(),
            summary_preview: default_summary_preview(),
        }
    }
}

/// Redact a secret string for Debug output.
fn redact(s: &Option<String>) -> &'static str {
    match s {
        Some(_) => "[REDACTED]",
        None => "None",
    }
}

impl std::fmt::Debug for LlmConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmConfig")
            .field("provider", &self.provider)
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("api_key", &redact(&self.api_key))
            .field("planning_timeout_secs", &self.planning_timeout_secs)
            .field("query_timeout_secs", &self.query_timeout_secs)
            .finish()
    }
}

impl std::fmt::Debug for GraphConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GraphConfig")
            .field("url", &self.url)
            .field("database", &self.database)
            .field("user", &self.user)
            .field("password", &redact(&self.password))
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl AppConfig {
    /// Load configuration from the default path (~/.paperlens/config.toml),
    /// then apply environment overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_dir().join("config.toml");
        let mut config = Self::load_from(&config_path)?;
        config.apply_env(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Apply environment overrides through `lookup` (injected for tests).
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(provider) = lookup("PAPERLENS_PROVIDER") {
            self.llm.provider = provider;
        }
        if let Some(model) = lookup("PAPERLENS_MODEL") {
            self.llm.model = model;
        }
        if let Some(url) = lookup("PAPERLENS_LLM_URL") {
            self.llm.base_url = Some(url);
        }
        if self.llm.api_key.is_none() {
            self.llm.api_key = lookup("PAPERLENS_API_KEY").or_else(|| lookup("OPENAI_API_KEY"));
        }
        if let Some(uri) = lookup("NEO4J_URI") {
            self.graph.url = uri;
        }
        if let Some(user) = lookup("NEO4J_USER") {
            self.graph.user = user;
        }
        if let Some(password) = lookup("NEO4J_PASSWORD") {
            self.graph.password = Some(password);
        }
        if let Some(database) = lookup("NEO4J_DATABASE") {
            self.graph.database = database;
        }
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs_home().join(".paperlens")
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.agent.max_steps == 0 {
            return Err(ConfigError::ValidationError(
                "agent.max_steps must be at least 1".into(),
            ));
        }
        if self.agent.max_records == 0 {
            return Err(ConfigError::ValidationError(
                "agent.max_records must be at least 1".into(),
            ));
        }
        if self.agent.sufficient_records == 0 {
            return Err(ConfigError::ValidationError(
                "agent.sufficient_records must be at least 1".into(),
            ));
        }
        if self.llm.planning_timeout_secs == 0
            || self.llm.query_timeout_secs == 0
            || self.graph.timeout_secs == 0
        {
            return Err(ConfigError::ValidationError(
                "timeouts must be greater than 0".into(),
            ));
        }
        Ok(())
    }

    /// A copy with secrets masked, safe to print.
    pub fn redacted(&self) -> Self {
        let mask = |secret: &Option<String>| secret.as_ref().map(|_| "[REDACTED]".to_string());
        let mut copy = self.clone();
        copy.llm.api_key = mask(&self.llm.api_key);
        copy.graph.password = mask(&self.graph.password);
        copy
    }

    /// Generate a default config TOML string.
    pub fn default_toml() -> String {
        toml::to_string_pretty(&Self::default()).unwrap_or_default()
    }
}

/// Get the user's home directory.
fn dirs_home() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("C:\\Users\\Default"))
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/tmp"))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn default_config_is_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.llm.provider, "ollama");
        assert_eq!(config.llm.model, "llama3.2");
        assert_eq!(config.llm.planning_timeout_secs, 90);
        assert_eq!(config.llm.query_timeout_secs, 45);
        assert_eq!(config.agent.max_steps, 3);
    }

    #[test]
    fn config_roundtrip_toml() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: AppConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.graph.url, config.graph.url);
        assert_eq!(parsed.agent.max_records, config.agent.max_records);
    }

    #[test]
    fn zero_steps_rejected() {
        let mut config = AppConfig::default();
        config.agent.max_steps = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn missing_config_file_returns_defaults() {
        let config = AppConfig::load_from(Path::new("/nonexistent/config.toml")).unwrap();
        assert_eq!(config.graph.database, "neo4j");
    }

    #[test]
    fn partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[llm]\nmodel = \"qwen2.5\"\n\n[agent]\nsufficient_records = 5\n",
        )
        .unwrap();
        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.llm.model, "qwen2.5");
        assert_eq!(config.llm.provider, "ollama");
        assert_eq!(config.agent.sufficient_records, 5);
        assert_eq!(config.agent.max_steps, 3);
    }

    #[test]
    fn malformed_file_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[agent\nmax_steps = ").unwrap();
        assert!(matches!(
            AppConfig::load_from(&path),
            Err(ConfigError::ParseError { .. })
        ));
    }

    #[test]
    fn env_overrides_apply() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("PAPERLENS_MODEL", "mistral"),
            ("NEO4J_URI", "http://graph:7474"),
            ("NEO4J_PASSWORD", "s3cret"),
        ]);
        let mut config = AppConfig::default();
        config.apply_env(|k| env.get(k).map(|v| v.to_string()));
        assert_eq!(config.llm.model, "mistral");
        assert_eq!(config.graph.url, "http://graph:7474");
        assert_eq!(config.graph.password.as_deref(), Some("s3cret"));
    }

    #[test]
    fn debug_output_redacts_secrets() {
        let mut config = AppConfig::default();
        config.llm.api_key = Some("sk-live-123".into());
        config.graph.password = Some("hunter2".into());
        let debug = format!("{config:?}");
        assert!(!debug.contains("sk-live-123"));
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn default_toml_generation() {
        let toml_str = AppConfig::default_toml();
        assert!(toml_str.contains("llama3.2"));
        assert!(toml_str.contains("7474"));
    }

    #[test]
    fn redacted_masks_secrets_only() {
        let mut config = AppConfig::default();
        config.llm.api_key = Some("sk-live".into());
        config.graph.password = Some("hunter2".into());

        let shown = toml::to_string_pretty(&config.redacted()).unwrap();
        assert!(!shown.contains("sk-live"));
        assert!(!shown.contains("hunter2"));
        assert!(shown.contains("[REDACTED]"));
        assert!(shown.contains("llama3.2"));
        assert_eq!(config.llm.api_key.as_deref(), Some("sk-live"));
    }
}
