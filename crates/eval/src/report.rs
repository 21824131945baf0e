//! Evaluation report: per-question rows, per-category breakdown, and
//! summary averages.

use crate::EvalError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::path::Path;
use tracing::info;

/// Scores for one benchmark question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionResult {
    pub id: u32,
    pub question: String,
    pub category: String,
    pub expected_tool: String,
    pub answer: String,
    pub tool_accuracy: f64,
    pub answer_relevance: f64,
    pub faithfulness: f64,
    pub gt_similarity: f64,
    pub latency_s: f64,
    pub steps_taken: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryScores {
    pub count: usize,
    pub tool_accuracy: f64,
    pub answer_relevance: f64,
    pub faithfulness: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvalSummary {
    pub total_questions: usize,
    pub avg_tool_accuracy: f64,
    pub avg_answer_relevance: f64,
    pub avg_faithfulness: f64,
    pub avg_gt_similarity: f64,
    pub avg_latency_s: f64,
    pub avg_steps: f64,
    pub total_eval_time_s: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvalReport {
    pub summary: EvalSummary,
    /// Keyed by category name.
    pub by_category: BTreeMap<String, CategoryScores>,
    pub per_question: Vec<QuestionResult>,
}

impl EvalReport {
    /// Aggregate per-question results. Summary averages carry three
    /// decimals, category averages two.
    pub fn from_results(results: Vec<QuestionResult>, total_eval_time_s: f64) -> Self {
        let avg = |field: fn(&QuestionResult) -> f64| round_to(mean(results.iter().map(field)), 3);

        let summary = EvalSummary {
            total_questions: results.len(),
            avg_tool_accuracy: avg(|r| r.tool_accuracy),
            avg_answer_relevance: avg(|r| r.answer_relevance),
            avg_faithfulness: avg(|r| r.faithfulness),
            avg_gt_similarity: avg(|r| r.gt_similarity),
            avg_latency_s: avg(|r| r.latency_s),
            avg_steps: avg(|r| r.steps_taken as f64),
            total_eval_time_s: round_to(total_eval_time_s, 2),
        };

        let mut grouped: BTreeMap<String, Vec<&QuestionResult>> = BTreeMap::new();
        for r in &results {
            grouped.entry(r.category.clone()).or_default().push(r);
        }
        let by_category = grouped
            .into_iter()
            .map(|(category, items)| {
                let scores = CategoryScores {
                    count: items.len(),
                    tool_accuracy: round_to(mean(items.iter().map(|r| r.tool_accuracy)), 2),
                    answer_relevance: round_to(mean(items.iter().map(|r| r.answer_relevance)), 2),
                    faithfulness: round_to(mean(items.iter().map(|r| r.faithfulness)), 2),
                };
                (category, scores)
            })
            .collect();

        Self {
            summary,
            by_category,
            per_question: results,
        }
    }

    pub fn to_json(&self) -> Result<String, EvalError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn save(&self, path: &Path) -> Result<(), EvalError> {
        std::fs::write(path, self.to_json()?).map_err(|e| EvalError::Write {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        info!(path = %path.display(), "Evaluation report saved");
        Ok(())
    }

    /// Plain-text tables for the terminal.
    pub fn render(&self) -> String {
        let s = &self.summary;
        let rule = "-".repeat(65);
        let heavy = "=".repeat(65);
        let mut out = String::new();

        let _ = writeln!(out, "{heavy}\nEVALUATION REPORT\n{heavy}");
        let _ = writeln!(out, "{:<30} {:>10}  MEANING\n{rule}", "METRIC", "SCORE");
        let _ = writeln!(out, "{:<30} {:>10}  Did the agent pick the right tool?", "Tool Accuracy", percent(s.avg_tool_accuracy, 1));
        let _ = writeln!(out, "{:<30} {:>10}  Does the answer address the question?", "Answer Relevance", percent(s.avg_answer_relevance, 1));
        let _ = writeln!(out, "{:<30} {:>10}  Is the answer grounded in retrieved data?", "Faithfulness", percent(s.avg_faithfulness, 1));
        let _ = writeln!(out, "{:<30} {:>10}  Overlap with the reference answer", "Ground Truth Similarity", percent(s.avg_gt_similarity, 1));
        let _ = writeln!(out, "{:<30} {:>9.2}s  Response time per question", "Avg Latency", s.avg_latency_s);
        let _ = writeln!(out, "{:<30} {:>10.2}  Tool calls per question", "Avg Steps", s.avg_steps);
        let _ = writeln!(out, "{:<30} {:>10}", "Questions Evaluated", s.total_questions);

        let _ = writeln!(out, "\n{heavy}\nSCORES BY CATEGORY\n{heavy}");
        let _ = writeln!(out, "{:<18} {:>5} {:>7} {:>10} {:>10}\n{rule}", "Category", "Count", "Tool%", "Relevance", "Faithful");
        for (category, c) in &self.by_category {
            let _ = writeln!(
                out,
                "{:<18} {:>5} {:>7} {:>10} {:>10}",
                category,
                c.count,
                percent(c.tool_accuracy, 1),
                percent(c.answer_relevance, 1),
                percent(c.faithfulness, 1),
            );
        }

        let _ = writeln!(out, "\n{heavy}\nPER-QUESTION RESULTS\n{heavy}");
        let _ = writeln!(out, "{:<4} {:>5} {:>5} {:>7} {:>6}  Question\n{rule}", "ID", "Tool%", "Rel%", "Faith%", "Lat");
        for r in &self.per_question {
            let question: String = r.question.chars().take(40).collect();
            let _ = writeln!(
                out,
                "{:<4} {:>5} {:>5} {:>7} {:>5.1}s  {}",
                r.id,
                percent(r.tool_accuracy, 0),
                percent(r.answer_relevance, 0),
                percent(r.faithfulness, 0),
                r.latency_s,
                question,
            );
        }
        out
    }
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, n), v| (sum + v, n + 1));
    if count == 0 { 0.0 } else { sum / count as f64 }
}

pub(crate) fn round_to(x: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (x * factor).round() / factor
}

fn percent(ratio: f64, decimals: usize) -> String {
    format!("{:.*}%", decimals, ratio * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(id: u32, category: &str, tool: f64, relevance: f64, steps: usize) -> QuestionResult {
        QuestionResult {
            id,
            question: format!("question {id}"),
            category: category.into(),
            expected_tool: "keyword_search".into(),
            answer: "answer".into(),
            tool_accuracy: tool,
            answer_relevance: relevance,
            faithfulness: 1.0,
            gt_similarity: 0.5,
            latency_s: 1.5,
            steps_taken: steps,
        }
    }

    fn report() -> EvalReport {
        EvalReport::from_results(
            vec![
                row(1, "keyword", 1.0, 0.8, 1),
                row(2, "keyword", 0.5, 0.6, 2),
                row(3, "author", 0.0, 0.3, 3),
            ],
            12.346,
        )
    }

    #[test]
    fn summary_averages() {
        let s = report().summary;
        assert_eq!(s.total_questions, 3);
        assert_eq!(s.avg_tool_accuracy, 0.5);
        assert_eq!(s.avg_answer_relevance, 0.567);
        assert_eq!(s.avg_steps, 2.0);
        assert_eq!(s.avg_latency_s, 1.5);
        assert_eq!(s.total_eval_time_s, 12.35);
    }

    #[test]
    fn category_breakdown() {
        let r = report();
        assert_eq!(r.by_category.len(), 2);
        let keyword = &r.by_category["keyword"];
        assert_eq!(keyword.count, 2);
        assert_eq!(keyword.tool_accuracy, 0.75);
        assert_eq!(keyword.answer_relevance, 0.7);
        assert_eq!(r.by_category["author"].count, 1);
    }

    #[test]
    fn empty_results_average_to_zero() {
        let r = EvalReport::from_results(Vec::new(), 0.0);
        assert_eq!(r.summary.total_questions, 0);
        assert_eq!(r.summary.avg_faithfulness, 0.0);
        assert!(r.by_category.is_empty());
    }

    #[test]
    fn json_has_the_three_sections() {
        let json: serde_json::Value = serde_json::from_str(&report().to_json().unwrap()).unwrap();
        assert_eq!(json["summary"]["total_questions"], 3);
        assert_eq!(json["by_category"]["keyword"]["count"], 2);
        assert_eq!(json["per_question"].as_array().unwrap().len(), 3);
    }

    #[test]
    fn save_writes_readable_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("eval_report.json");
        report().save(&path).unwrap();

        let loaded: EvalReport = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(loaded.summary.total_questions, 3);
        assert_eq!(loaded.per_question[2].category, "author");
    }

    #[test]
    fn render_lists_every_section() {
        let text = report().render();
        assert!(text.contains("Tool Accuracy"));
        assert!(text.contains("50.0%"));
        assert!(text.contains("SCORES BY CATEGORY"));
        assert!(text.contains("question 3"));
        assert!(text.contains("Questions Evaluated"));
    }
}
