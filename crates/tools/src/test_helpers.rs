//! Scripted collaborators for tool tests.

use async_trait::async_trait;
use paperlens_core::error::{GraphError, QueryGenerationError};
use paperlens_core::graph::{GraphStore, Params, Record};
use paperlens_core::query::{GeneratedQuery, QueryGenerator};
use serde_json::Value;
use std::sync::Mutex;

type Reply = Result<Vec<Record>, GraphError>;

/// Answers each query with the first rule whose needle appears in the
/// statement or equals one of the string parameters. Unmatched queries
/// return no rows.
#[derive(Default)]
pub struct FakeGraph {
    rules: Vec<(String, Reply)>,
    calls: Mutex<Vec<(String, Params)>>,
}

impl FakeGraph {
    pub fn when(mut self, needle: &str, rows: Vec<Value>) -> Self {
        let rows = rows
            .into_iter()
            .filter_map(|v| match v {
                Value::Object(map) => Some(map),
                _ => None,
            })
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
impl GraphStore for FakeGraph {
    fn name(&self) -> &str {
        "fake"
    }

    async fn query(&self, statement: &str, params: Params) -> Result<Vec<Record>, GraphError> {
        self.calls
            .lock()
            .unwrap()
            .push((statement.to_string(), params.clone()));
        let matched = self.rules.iter().find(|(needle, _)| {
            statement.contains(needle.as_str())
                || params.values().any(|v| v.as_str() == Some(needle.as_str()))
        });
        match matched {
            Some((_, reply)) => reply.clone(),
            None => Ok(Vec::new()),
        }
    }

    async fn write(&self, _statement: &str, _params: Params) -> Result<(), GraphError> {
        Ok(())
    }
}

/// A generator whose model never produces a usable query.
pub struct FailingGenerator;

#[async_trait]
impl QueryGenerator for FailingGenerator {
    async fn generate(&self, _question: &str) -> Result<GeneratedQuery, QueryGenerationError> {
        Err(QueryGenerationError::ParseFailed)
    }
}

/// A generator that always returns the same query.
pub struct FixedGenerator(pub &'static str);

#[async_trait]
impl QueryGenerator for FixedGenerator {
    async fn generate(&self, _question: &str) -> Result<GeneratedQuery, QueryGenerationError> {
        Ok(GeneratedQuery {
            query: self.0.to_string(),
            explanation: "fixed".into(),
        })
    }
}

pub fn paper(title: &str, citations: i64) -> Value {
    serde_json::json!({
        "title": title,
        "year": 2021,
        "citations": citations,
        "authors": ["A. Author"],
        "topics": [],
        "institutions": []
    })
}
