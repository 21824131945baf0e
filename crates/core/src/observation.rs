//! Observations: the normalized results a tool hands back to the loop.
//!
//! An observation is either a bounded list of paper records or a single
//! statistics record. Both render to the human-readable summary string
//! that the planner and the answer synthesizer read.

use serde::{Deserialize, Serialize};

/// Maximum title length shown in a summary line.
const SUMMARY_TITLE_CHARS: usize = 70;

/// One paper-shaped row from the graph. Every field is optional because
/// generated queries may return any subset of columns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PaperRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub citations: Option<i64>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub authors: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub topics: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub institutions: Vec<String>,

    #[serde(default, rename = "abstract", skip_serializing_if = "Option::is_none")]
    pub abstract_text: Option<String>,

    /// Columns that do not map onto a known field.
    #[serde(default, skip_serializing_if = "serde_json::Map::is_empty")]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Whole-graph counts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphStatistics {
    pub total_papers: u64,
    pub total_authors: u64,
    pub total_topics: u64,
    pub total_institutions: u64,
    #[serde(default)]
    pub total_citations: u64,
    #[serde(default)]
    pub avg_citations: Option<f64>,
}

/// The raw result of one tool execution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum Observation {
    Records(Vec<PaperRecord>),
    Statistics(GraphStatistics),
}

impl Observation {
    /// The empty result every failing tool degrades to.
    pub fn empty() -> Self {
        Observation::Records(Vec::new())
    }

    /// Number of records, or 1 for a statistics result.
    pub fn len(&self) -> usize {
        match self {
            Observation::Records(records) => records.len(),
            Observation::Statistics(_) => 1,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Observation::Records(records) if records.is_empty())
    }

    /// Drop records beyond `limit`. Statistics are left untouched.
    pub fn truncate(&mut self, limit: usize) {
        if let Observation::Records(records) = self {
            records.truncate(limit);
        }
    }

    /// Whether this observation alone is enough evidence to stop early:
    /// statistics always are, record lists once they reach `min_records`.
    pub fn is_sufficient(&self, min_records: usize) -> bool {
        match self {
            Observation::Statistics(_) => true,
            Observation::Records(records) => records.len() >= min_records,
        }
    }

    /// Render a readable summary, listing at most `preview` records.
    pub fn summarize(&self, preview: usize) -> String {
        match self {
            Observation::Statistics(stats) => format!(
                "Statistics: {} papers, {} authors, {} topics, {} institutions, avg citations: {:.1}",
                stats.total_papers,
                stats.total_authors,
                stats.total_topics,
                stats.total_institutions,
                stats.avg_citations.unwrap_or(0.0),
            ),
            Observation::Records(records) if records.is_empty() => "No results found.".into(),
            Observation::Records(records) => {
                let mut lines = vec![format!("Found {} results:", records.len())];
                for (i, record) in records.iter().take(preview).enumerate() {
                    lines.push(format!("  {}. {}", i + 1, record.summary_line()));
                }
                if records.len() > preview {
                    lines.push(format!("  ... and {} more", records.len() - preview));
                }
                lines.join("\n")
            }
        }
    }
}

impl PaperRecord {
    fn summary_line(&self) -> String {
        let title: String = self
            .title
            .as_deref()
            .unwrap_or("Unknown")
            .chars()
            .take(SUMMARY_TITLE_CHARS)
            .collect();
        let year = self.year.map(|y| format!(" ({y})")).unwrap_or_default();
        let authors = if self.authors.is_empty() {
            String::new()
        } else {
            format!(" — {}", self.authors.join(", "))
        };
        let citations = self
            .citations
            .map(|c| c.to_string())
            .unwrap_or_else(|| "?".into());
        format!("{title}{year}{authors} [{citations} citations]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paper(title: &str, citations: i64) -> PaperRecord {
        PaperRecord {
            title: Some(title.into()),
            year: Some(2021),
            citations: Some(citations),
            authors: vec!["Sarah Johnson".into()],
            ..Default::default()
        }
    }

    #[test]
    fn statistics_summary_reports_exact_counts() {
        let obs = Observation::Statistics(GraphStatistics {
            total_papers: 5,
            total_authors: 12,
            total_topics: 4,
            total_institutions: 3,
            total_citations: 1200,
            avg_citations: Some(240.0),
        });
        assert_eq!(
            obs.summarize(5),
            "Statistics: 5 papers, 12 authors, 4 topics, 3 institutions, avg citations: 240.0"
        );
    }

    #[test]
    fn empty_records_summary() {
        assert_eq!(Observation::empty().summarize(5), "No results found.");
    }

    #[test]
    fn records_summary_lists_preview_and_remainder() {
        let records = (0..7).map(|i| paper(&format!("Paper {i}"), 100 - i)).collect();
        let summary = Observation::Records(records).summarize(5);
        assert!(summary.starts_with("Found 7 results:"));
        assert!(summary.contains("1. Paper 0 (2021) — Sarah Johnson [100 citations]"));
        assert!(summary.contains("5. Paper 4"));
        assert!(!summary.contains("Paper 5 "));
        assert!(summary.ends_with("... and 2 more"));
    }

    #[test]
    fn missing_fields_render_placeholders() {
        let summary = Observation::Records(vec![PaperRecord::default()]).summarize(5);
        assert!(summary.contains("1. Unknown [? citations]"));
    }

    #[test]
    fn sufficiency_rules() {
        assert!(Observation::Statistics(GraphStatistics::default()).is_sufficient(3));
        let two = Observation::Records(vec![paper("a", 1), paper("b", 2)]);
        assert!(!two.is_sufficient(3));
        let three = Observation::Records(vec![paper("a", 1), paper("b", 2), paper("c", 3)]);
        assert!(three.is_sufficient(3));
    }

    #[test]
    fn truncate_caps_records() {
        let mut obs = Observation::Records((0..30).map(|i| paper("p", i)).collect());
        obs.truncate(20);
        assert_eq!(obs.len(), 20);
    }
}
