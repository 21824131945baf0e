//! Query generation: natural-language question to a read-only Cypher query.
//!
//! The model gets the schema and strict rules; if its reply has no usable
//! query, one retry goes out with a shorter prompt carrying a minimal
//! schema summary. Whatever comes back must pass [`check_read_only`]
//! before it is handed to anyone. Executing the query is the caller's job.

use async_trait::async_trait;
use paperlens_core::error::QueryGenerationError;
use paperlens_core::query::{GeneratedQuery, QueryGenerator, check_read_only};
use paperlens_providers::{GenerationOptions, TextGenerator};
use serde_json::{Map, Value};
use tracing::{debug, error, info, warn};

use crate::parser::parse_structured;

pub struct LlmQueryGenerator {
    generator: TextGenerator,
    schema: String,
    options: GenerationOptions,
}

impl LlmQueryGenerator {
    pub fn new(generator: TextGenerator, schema: impl Into<String>) -> Self {
        Self {
            generator,
            schema: schema.into(),
            options: GenerationOptions::query_generation(),
        }
    }

    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.options = self.options.with_timeout(timeout_secs);
        self
    }

    /// Generate against an explicit schema description.
    pub async fn generate_with_schema(
        &self,
        question: &str,
        schema: &str,
    ) -> Result<GeneratedQuery, QueryGenerationError> {
        let first = self
            .generator
            .generate(&full_prompt(question, schema), self.options)
            .await;

        let parsed = match extract_query(parse_structured(&first)) {
            Ok(parsed) => parsed,
            Err(e) => {
                warn!(error = %e, "First query attempt unusable, retrying with simpler prompt");
                let second = self
                    .generator
                    .generate(&simple_prompt(question), self.options)
                    .await;
                extract_query(parse_structured(&second))?
            }
        };

        if let Err(e) = check_read_only(&parsed.query) {
            error!(query = %parsed.query, error = %e, "Blocked unsafe generated query");
            return Err(e);
        }

        info!(query = %parsed.query, "Generated query");
        Ok(parsed)
    }
}

#[async_trait]
impl QueryGenerator for LlmQueryGenerator {
    async fn generate(&self, question: &str) -> Result<GeneratedQuery, QueryGenerationError> {
        self.generate_with_schema(question, &self.schema).await
    }
}

/// Pull the query out of a parsed reply. `cypher` is the requested key;
/// `query` is accepted too since models often rename it.
fn extract_query(
    parsed: Option<Map<String, Value>>,
) -> Result<GeneratedQuery, QueryGenerationError> {
    let parsed = parsed.ok_or(QueryGenerationError::ParseFailed)?;
    let query = ["cypher", "query"]
        .iter()
        .find_map(|key| parsed.get(*key).and_then(Value::as_str))
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .ok_or(QueryGenerationError::MissingQuery)?;

    let explanation = parsed
        .get("explanation")
        .and_then(Value::as_str)
        .unwrap_or_default();

    debug!(query, "Parsed query from model output");
    Ok(GeneratedQuery {
        query: query.to_string(),
        explanation: explanation.to_string(),
    })
}

fn full_prompt(question: &str, schema: &str) -> String {
    format!(
        r#"You are a Neo4j expert. Generate a READ-ONLY Cypher query.

GRAPH SCHEMA:
{schema}

QUESTION: {question}

Rules:
1. Only use MATCH, WHERE, RETURN, ORDER BY, LIMIT
2. NEVER use CREATE, DELETE, SET, MERGE, REMOVE, DROP
3. Always LIMIT to 20 results max
4. Use toLower() for case-insensitive string matching
5. Return meaningful property names

Respond with ONLY this JSON and nothing else:
{{"cypher": "MATCH ...", "explanation": "one sentence explaining what this does"}}"#
    )
}

fn simple_prompt(question: &str) -> String {
    format!(
        r#"Write a Neo4j Cypher MATCH query for: "{question}"

Use nodes: Paper (title, year, citation_count), Author (name), Topic (name), Institution (name)
Use relationships: WROTE, ABOUT, CITES, AFFILIATED_WITH

Return JSON only:
{{"cypher": "MATCH (p:Paper) RETURN p.title LIMIT 10", "explanation": "brief explanation"}}"#
    )
}
