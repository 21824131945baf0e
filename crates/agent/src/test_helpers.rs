//! Scripted collaborators shared by the agent tests.

use async_trait::async_trait;
use paperlens_core::error::{GraphError, ProviderError};
use paperlens_core::graph::{GraphStore, Params, Record};
use paperlens_core::provider::{Provider, ProviderRequest, ProviderResponse};
use paperlens_providers::TextGenerator;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// A provider that replays queued replies in order and records every
/// prompt it was sent. Once the script runs out it fails, which the
/// text generator turns into an empty answer.
#[derive(Default)]
pub struct ScriptedProvider {
    replies: Mutex<VecDeque<Result<String, ProviderError>>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedProvider {
    pub fn new(replies: Vec<Result<String, ProviderError>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn texts(replies: &[&str]) -> Self {
        Self::new(replies.iter().map(|r| Ok(r.to_string())).collect())
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

#[async_trait]
impl Provider for ScriptedProvider {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn complete(&self, request: ProviderRequest) -> Result<ProviderResponse, ProviderError> {
        self.prompts.lock().unwrap().push(request.prompt);
        let reply = self
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ProviderError::NotConfigured("script exhausted".into())));
        reply.map(|text| ProviderResponse {
            text,
            model: request.model,
        })
    }
}

pub fn generator(provider: &Arc<ScriptedProvider>) -> TextGenerator {
    TextGenerator::new(provider.clone(), "test-model")
}

type Reply = Result<Vec<Record>, GraphError>;

/// A graph store answering by substring: the first rule whose needle
/// appears in the statement, or equals a string parameter, wins.
/// Unmatched queries return no rows. Every call is recorded.
#[derive(Default)]
pub struct ScriptedGraphStore {
    rules: Vec<(String, Reply)>,
    calls: Mutex<Vec<(String, Params)>>,
}

impl ScriptedGraphStore {
    pub fn when(mut self, needle: &str, rows: Vec<Value>) -> Self {
        let rows = rows
            .into_iter()
            .filter_map(|v| v.as_object().cloned())
            .collect();
        self.rules.push((needle.to_string(), Ok(rows)));
        self
    }

    pub fn failing(mut self, needle: &str, err: GraphError) -> Self {
        self.rules.push((needle.to_string(), Err(err)));
        self
    }

    pub fn calls(&self) -> Vec<(String, Params)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl GraphStore for ScriptedGraphStore {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn query(&self, statement: &str, params: Params) -> Result<Vec<Record>, GraphError> {
        self.calls
            .lock()
            .unwrap()
            .push((statement.to_string(), params.clone()));
        self.rules
            .iter()
            .find(|(needle, _)| {
                statement.contains(needle.as_str())
                    || params.values().any(|v| v.as_str() == Some(needle.as_str()))
            })
            .map(|(_, reply)| reply.clone())
            .unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn write(&self, _statement: &str, _params: Params) -> Result<(), GraphError> {
        Err(GraphError::QueryFailed {
            code: "Test.ReadOnly".into(),
            message: "scripted store is read-only".into(),
        })
    }
}

pub fn paper(title: &str, year: i64, citations: i64, author: &str) -> Value {
    serde_json::json!({
        "title": title,
        "year": year,
        "citations": citations,
        "authors": [author],
        "topics": [],
        "institutions": []
    })
}

pub fn statistics_row() -> Value {
    serde_json::json!({
        "total_papers": 5,
        "total_citations": 1250,
        "avg_citations": 250.0,
        "total_authors": 9,
        "total_topics": 4,
        "total_institutions": 3
    })
}
