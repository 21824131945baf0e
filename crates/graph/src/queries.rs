//! Read-only Cypher templates used by the search tools.
//!
//! Paper-shaped templates return the columns `title`, `year`, `citations`
//! plus author/topic/institution names, are ordered by citation count and
//! take a `$limit` parameter so results stay bounded at the source.

use paperlens_core::graph::Params;

pub const KEYWORD_SEARCH: &str = "
MATCH (p:Paper)
WHERE toLower(p.title) CONTAINS toLower($keyword)
   OR toLower(p.abstract) CONTAINS toLower($keyword)
OPTIONAL MATCH (a:Author)-[:WROTE]->(p)
OPTIONAL MATCH (p)-[:ABOUT]->(t:Topic)
OPTIONAL MATCH (a)-[:AFFILIATED_WITH]->(i:Institution)
RETURN p.title AS title,
       p.year AS year,
       p.citation_count AS citations,
       p.abstract AS abstract,
       collect(DISTINCT a.name) AS authors,
       collect(DISTINCT t.name) AS topics,
       collect(DISTINCT i.name) AS institutions
ORDER BY citations DESC
LIMIT $limit";

pub const AUTHOR_SEARCH: &str = "
MATCH (a:Author)-[:WROTE]->(p:Paper)
WHERE toLower(a.name) CONTAINS toLower($author_name)
OPTIONAL MATCH (a)-[:AFFILIATED_WITH]->(i:Institution)
OPTIONAL MATCH (p)-[:ABOUT]->(t:Topic)
RETURN a.name AS author,
       a.h_index AS h_index,
       i.name AS institution,
       p.title AS title,
       p.year AS year,
       p.citation_count AS citations,
       collect(DISTINCT t.name) AS topics
ORDER BY citations DESC
LIMIT $limit";

pub const INSTITUTION_SEARCH: &str = "
MATCH (i:Institution)<-[:AFFILIATED_WITH]-(a:Author)-[:WROTE]->(p:Paper)
WHERE toLower(i.name) CONTAINS toLower($institution_name)
OPTIONAL MATCH (p)-[:ABOUT]->(t:Topic)
RETURN i.name AS institution,
       a.name AS author,
       p.title AS title,
       p.year AS year,
       p.citation_count AS citations,
       collect(DISTINCT t.name) AS topics
ORDER BY citations DESC
LIMIT $limit";

pub const TOPIC_SEARCH: &str = "
MATCH (p:Paper)-[:ABOUT]->(t:Topic)
WHERE toLower(t.name) CONTAINS toLower($topic)
OPTIONAL MATCH (a:Author)-[:WROTE]->(p)
OPTIONAL MATCH (a)-[:AFFILIATED_WITH]->(i:Institution)
RETURN t.name AS topic,
       p.title AS title,
       p.year AS year,
       p.citation_count AS citations,
       collect(DISTINCT a.name) AS authors,
       collect(DISTINCT i.name) AS institutions
ORDER BY citations DESC
LIMIT $limit";

pub const MOST_CITED: &str = "
MATCH (p:Paper)
WHERE p.citation_count IS NOT NULL
OPTIONAL MATCH (a:Author)-[:WROTE]->(p)
OPTIONAL MATCH (p)-[:ABOUT]->(t:Topic)
OPTIONAL MATCH (a)-[:AFFILIATED_WITH]->(i:Institution)
RETURN p.title AS title,
       p.year AS year,
       p.citation_count AS citations,
       collect(DISTINCT a.name) AS authors,
       collect(DISTINCT t.name) AS topics,
       collect(DISTINCT i.name) AS institutions
ORDER BY citations DESC
LIMIT $limit";

/// One row of whole-graph counts.
pub const STATISTICS: &str = "
OPTIONAL MATCH (p:Paper)
WITH count(p) AS total_papers,
     sum(p.citation_count) AS total_citations,
     avg(p.citation_count) AS avg_citations
OPTIONAL MATCH (a:Author)
WITH total_papers, total_citations, avg_citations, count(a) AS total_authors
OPTIONAL MATCH (t:Topic)
WITH total_papers, total_citations, avg_citations, total_authors, count(t) AS total_topics
OPTIONAL MATCH (i:Institution)
RETURN total_papers, total_citations, avg_citations,
       total_authors, total_topics, count(i) AS total_institutions";

/// Parameters for a template with one string argument and a row limit.
pub fn search_params(name: &str, value: &str, limit: usize) -> Params {
    let mut params = limit_params(limit);
    params.insert(name.to_string(), serde_json::Value::from(value));
    params
}

pub fn limit_params(limit: usize) -> Params {
    let mut params = Params::new();
    params.insert("limit".into(), serde_json::Value::from(limit));
    params
}
