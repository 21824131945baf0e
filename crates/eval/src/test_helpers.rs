//! Scripted collaborators shared by the evaluation tests.

use async_trait::async_trait;
use paperlens_core::agent::{Step, ThoughtChain};
use paperlens_core::error::{GraphError, ProviderError};
use paperlens_core::observation::Observation;
use paperlens_core::graph::{GraphStore, Params, Record};
use paperlens_core::tool::ToolArgs;
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

/// A graph store answering by substring: the first rule whose needle
/// appears in the statement wins. Unmatched queries return no rows.
#[derive(Default)]
pub struct ScriptedGraphStore {
    rules: Vec<(String, Vec<Record>)>,
}

impl ScriptedGraphStore {
    pub fn when(mut self, needle: &str, rows: Vec<Value>) -> Self {
        let rows = rows
            .into_iter()
            .filter_map(|v| v.as_object().cloned())
            .collect();
        self.rules.push((needle.to_string(), rows));
        self
    }
}

#[async_trait]
impl GraphStore for ScriptedGraphStore {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn query(&self, statement: &str, _params: Params) -> Result<Vec<Record>, GraphError> {
        Ok(self
            .rules
            .iter()
            .find(|(needle, _)| statement.contains(needle.as_str()))
            .map(|(_, rows)| rows.clone())
            .unwrap_or_default())
    }

    async fn write(&self, _statement: &str, _params: Params) -> Result<(), GraphError> {
        Err(GraphError::QueryFailed {
            code: "Test.ReadOnly".into(),
            message: "scripted store is read-only".into(),
        })
    }
}

/// A chain whose steps ran `actions` in order, each with no results.
pub fn chain_of(actions: &[&str]) -> ThoughtChain {
    let mut chain = ThoughtChain::new();
    for (i, action) in actions.iter().enumerate() {
        chain.push(Step {
            step: i + 1,
            thought: String::new(),
            action: action.to_string(),
            args: ToolArgs::new(),
            observation: "No results found.".into(),
            raw_results: Observation::empty(),
        });
    }
    chain
}
