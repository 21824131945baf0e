//! QueryGenerator trait: natural language to a read-only graph query.
//!
//! The generated-query tool depends on this seam; the LLM-backed
//! implementation lives in `paperlens-agent`. [`check_read_only`] is the
//! gate both sides run: the generator before returning a query, and the
//! tool again before the query reaches the store.

use crate::error::QueryGenerationError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A validated, read-only query and the model's explanation of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedQuery {
    pub query: String,
    #[serde(default)]
    pub explanation: String,
}

/// Cypher clauses that mutate the graph, or whose effect cannot be read off
/// the query text: procedure calls, CSV loads and `FOREACH` bodies.
pub const WRITE_KEYWORDS: [&str; 10] = [
    "DROP", "DELETE", "DETACH", "REMOVE", "SET", "CREATE", "MERGE", "CALL", "LOAD", "FOREACH",
];

/// Reject `query` if it contains a write keyword as a whole word,
/// case-insensitively. The first keyword in [`WRITE_KEYWORDS`] order is
/// reported.
pub fn check_read_only(query: &str) -> Result<(), QueryGenerationError> {
    let words: Vec<String> = query
        .split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|w| !w.is_empty())
        .map(str::to_uppercase)
        .collect();

    match WRITE_KEYWORDS
        .iter()
        .find(|keyword| words.iter().any(|w| w == *keyword))
    {
        Some(keyword) => Err(QueryGenerationError::Unsafe {
            keyword: keyword.to_string(),
        }),
        None => Ok(()),
    }
}

#[async_trait]
pub trait QueryGenerator: Send + Sync {
    /// Produce a query answering `question`. An `Ok` value has already
    /// passed the read-only check.
    async fn generate(&self, question: &str) -> Result<GeneratedQuery, QueryGenerationError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gate_accepts_read_clauses() {
        let query = "MATCH (p:Paper)-[:ABOUT]->(t:Topic) WHERE toLower(t.name) CONTAINS 'nlp' \
                     RETURN p.title, p.citation_count ORDER BY p.citation_count DESC LIMIT 20";
        assert!(check_read_only(query).is_ok());
    }

    #[test]
    fn gate_rejects_write_keywords() {
        let err = check_read_only("MATCH (p:Paper) DETACH DELETE p").unwrap_err();
        assert_eq!(err, QueryGenerationError::Unsafe { keyword: "DELETE".into() });

        for query in [
            "match (n) delete n",
            "MATCH (p:Paper) SET p.title = 'x'",
            "CREATE (p:Paper {title: 'x'})",
            "MERGE (a:Author {name: 'y'})",
            "MATCH (p) REMOVE p.year",
            "DROP INDEX paper_year",
        ] {
            assert!(check_read_only(query).is_err(), "{query}");
        }
    }

    #[test]
    fn gate_rejects_procedure_calls() {
        for query in [
            "CALL db.createLabel('Pwned')",
            "MATCH (a:Author) WITH collect(a) AS ns CALL apoc.refactor.mergeNodes(ns) YIELD node RETURN node",
            r"CALL apoc.cypher.runWrite('MATCH (n) \u0044ELETE n', {})",
            "LOAD CSV FROM 'file:///papers.csv' AS row RETURN row",
            "MATCH (p:Paper) WITH collect(p) AS ps FOREACH (x IN ps | SET x.seen = true)",
        ] {
            assert!(check_read_only(query).is_err(), "{query}");
        }
        let err = check_read_only("call db.labels()").unwrap_err();
        assert_eq!(err, QueryGenerationError::Unsafe { keyword: "CALL".into() });
    }

    #[test]
    fn gate_matches_whole_words_only() {
        assert!(check_read_only("MATCH (p:Paper) WHERE p.created_at > 2020 RETURN p.dataset LIMIT 5").is_ok());
        assert!(check_read_only("MATCH (p:Paper {title: 'Offset Learning'}) RETURN p").is_ok());
        assert!(check_read_only("MATCH (p:Paper) WHERE p.title CONTAINS 'recall' RETURN p LIMIT 5").is_ok());
    }
}
