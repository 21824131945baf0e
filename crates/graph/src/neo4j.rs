//! Neo4j client over the HTTP transactional Cypher endpoint.
//!
//! Every call is a single auto-committed transaction:
//! `POST {url}/db/{database}/tx/commit` with basic auth and a body of
//! `{"statements": [{"statement": ..., "parameters": ...}]}`.
//! Rows come back as `columns` + `data[].row`, which are zipped into
//! [`Record`] maps keyed by column name.
//!
//! `query` sends `access-mode: READ`, so Neo4j itself refuses any write in
//! a read statement. Only `write` runs in the default write mode.

use async_trait::async_trait;
use paperlens_config::GraphConfig;
use paperlens_core::error::GraphError;
use paperlens_core::graph::{GraphStore, Params, Record};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

/// Transaction access mode, sent as the `access-mode` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AccessMode {
    Read,
    Write,
}

pub struct Neo4jHttpStore {
    endpoint: String,
    user: String,
    password: Option<String>,
    timeout: Duration,
    client: reqwest::Client,
}

impl Neo4jHttpStore {
    pub fn new(config: &GraphConfig) -> Self {
        Self {
            endpoint: format!(
                "{}/db/{}/tx/commit",
                http_base(&config.url),
                config.database
            ),
            user: config.user.clone(),
            password: config.password.clone(),
            timeout: Duration::from_secs(config.timeout_secs),
            client: reqwest::Client::new(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn request(&self, statement: &str, params: Params, mode: AccessMode) -> reqwest::RequestBuilder {
        let body = serde_json::json!({
            "statements": [{ "statement": statement, "parameters": params }]
        });

        let request = self
            .client
            .post(&self.endpoint)
            .timeout(self.timeout)
            .basic_auth(&self.user, self.password.as_deref())
            .header("Accept", "application/json")
            .json(&body);
        match mode {
            AccessMode::Read => request.header("access-mode", "READ"),
            AccessMode::Write => request,
        }
    }

    async fn run(
        &self,
        statement: &str,
        params: Params,
        mode: AccessMode,
    ) -> Result<Vec<Record>, GraphError> {
        debug!(statement = %one_line(statement), ?mode, "Running Cypher statement");

        let response = self
            .request(statement, params, mode)
            .send()
            .await
            .map_err(|e| GraphError::Connection(e.to_string()))?;

        let status = response.status().as_u16();
        if !response.status().is_success() {
            let message = response.text().await.unwrap_or_default();
            warn!(status, "Neo4j returned error status");
            return Err(GraphError::Http {
                status_code: status,
                message,
            });
        }

        let parsed: CommitResponse = response
            .json()
            .await
            .map_err(|e| GraphError::MalformedResponse(e.to_string()))?;

        parsed.into_records()
    }
}

#[async_trait]
impl GraphStore for Neo4jHttpStore {
    fn name(&self) -> &str {
        "neo4j"
    }

    async fn query(&self, statement: &str, params: Params) -> Result<Vec<Record>, GraphError> {
        self.run(statement, params, AccessMode::Read).await
    }

    async fn write(&self, statement: &str, params: Params) -> Result<(), GraphError> {
        self.run(statement, params, AccessMode::Write).await.map(|_| ())
    }

    async fn health_check(&self) -> Result<bool, GraphError> {
        let rows = self.run("RETURN 1 AS ok", Params::new(), AccessMode::Read).await?;
        Ok(rows.len() == 1)
    }
}

/// Map driver-style URIs (`bolt://host:7687`, `neo4j://host`) onto the
/// HTTP endpoint on port 7474. HTTP(S) URLs pass through.
fn http_base(url: &str) -> String {
    let url = url.trim_end_matches('/');
    if url.starts_with("http://") || url.starts_with("https://") {
        return url.to_string();
    }
    let host = url
        .split_once("://")
        .map(|(_, rest)| rest)
        .unwrap_or(url);
    let host = host.split(':').next().unwrap_or(host);
    format!("http://{host}:7474")
}

fn one_line(statement: &str) -> String {
    statement.split_whitespace().collect::<Vec<_>>().join(" ")
}

// ── Wire types ────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct CommitResponse {
    #[serde(default)]
    results: Vec<StatementResult>,
    #[serde(default)]
    errors: Vec<Neo4jError>,
}

#[derive(Debug, Deserialize)]
struct StatementResult {
    columns: Vec<String>,
    #[serde(default)]
    data: Vec<RowData>,
}

#[derive(Debug, Deserialize)]
struct RowData {
    row: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct Neo4jError {
    code: String,
    message: String,
}

impl CommitResponse {
    fn into_records(self) -> Result<Vec<Record>, GraphError> {
        if let Some(err) = self.errors.into_iter().next() {
            return Err(GraphError::QueryFailed {
                code: err.code,
                message: err.message,
            });
        }

        let Some(result) = self.results.into_iter().next() else {
            return Ok(Vec::new());
        };

        result
            .data
            .into_iter()
            .map(|data| {
                if data.row.len() != result.columns.len() {
                    return Err(GraphError::MalformedResponse(format!(
                        "row has {} values for {} columns",
                        data.row.len(),
                        result.columns.len()
                    )));
                }
                Ok(result.columns.iter().cloned().zip(data.row).collect())
            })
            .collect()
    }
}
