//! Runs benchmark questions through the agent and scores the answers.

use crate::dataset::EvalCase;
use crate::metrics::{MetricJudge, keyword_overlap, tool_accuracy};
use crate::report::{EvalReport, QuestionResult, round_to};
use paperlens_agent::ResearchAgent;
use paperlens_core::agent::ThoughtChain;
use paperlens_core::observation::Observation;
use std::time::Instant;
use tracing::info;

/// Questions evaluated by a quick run.
pub const QUICK_CASES: usize = 5;

pub struct Evaluator {
    agent: ResearchAgent,
    judge: MetricJudge,
}

impl Evaluator {
    pub fn new(agent: ResearchAgent, judge: MetricJudge) -> Self {
        Self { agent, judge }
    }

    /// Ask one question and score the result.
    pub async fn evaluate_case(&self, case: &EvalCase) -> QuestionResult {
        info!(id = case.id, question = %case.question, "Evaluating");
        let result = self.agent.answer(&case.question).await;
        let context = evidence_text(&result.thought_chain);

        let tool = tool_accuracy(&case.expected_tool, &result.thought_chain);
        let relevance = self.judge.relevance(&case.question, &result.answer).await;
        let faithfulness = self.judge.faithfulness(&result.answer, &context).await;
        let similarity = keyword_overlap(&case.ground_truth, &result.answer);

        info!(
            id = case.id,
            tool,
            relevance,
            faithfulness,
            latency_s = result.latency_s,
            "Scored"
        );

        QuestionResult {
            id: case.id,
            question: case.question.clone(),
            category: case.category.clone(),
            expected_tool: case.expected_tool.clone(),
            tool_accuracy: round_to(tool, 2),
            answer_relevance: round_to(relevance, 2),
            faithfulness: round_to(faithfulness, 2),
            gt_similarity: round_to(similarity, 2),
            latency_s: result.latency_s,
            steps_taken: result.thought_chain.len(),
            answer: result.answer,
        }
    }

    /// Evaluate `cases` in order, or only the first [`QUICK_CASES`] when
    /// `quick` is set.
    pub async fn run(&self, cases: &[EvalCase], quick: bool) -> EvalReport {
        let selected = if quick {
            &cases[..cases.len().min(QUICK_CASES)]
        } else {
            cases
        };
        info!(questions = selected.len(), quick, "Starting evaluation");

        let start = Instant::now();
        let mut results = Vec::with_capacity(selected.len());
        for case in selected {
            results.push(self.evaluate_case(case).await);
        }

        EvalReport::from_results(results, start.elapsed().as_secs_f64())
    }
}

/// The raw retrieved data of every step, one JSON document per line.
fn evidence_text(chain: &ThoughtChain) -> String {
    chain
        .iter()
        .map(|step| {
            let json = match &step.raw_results {
                Observation::Records(records) => serde_json::to_string(records),
                Observation::Statistics(stats) => serde_json::to_string(stats),
            };
            json.unwrap_or_default()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{ScriptedGraphStore, ScriptedProvider, generator};
    use paperlens_config::AppConfig;
    use serde_json::json;
    use std::sync::Arc;

    fn case(id: u32, question: &str, expected_tool: &str, category: &str) -> EvalCase {
        EvalCase {
            id,
            question: question.into(),
            ground_truth: "There are 5 papers in the database.".into(),
            expected_tool: expected_tool.into(),
            category: category.into(),
        }
    }

    fn statistics_store() -> ScriptedGraphStore {
        ScriptedGraphStore::default().when(
            "total_papers",
            vec![json!({
                "total_papers": 5, "total_citations": 1250, "avg_citations": 250.0,
                "total_authors": 9, "total_topics": 4, "total_institutions": 3
            })],
        )
    }

    fn evaluator(agent_provider: &Arc<ScriptedProvider>, judge_provider: &Arc<ScriptedProvider>) -> Evaluator {
        let agent = ResearchAgent::from_config(
            &AppConfig::default(),
            agent_provider.clone(),
            Arc::new(statistics_store()),
        );
        Evaluator::new(agent, MetricJudge::new(generator(judge_provider)))
    }

    #[tokio::test]
    async fn scores_a_statistics_question() {
        let agent_provider = Arc::new(ScriptedProvider::texts(&[
            r#"{"thought": "counts are enough", "tool": "FINISH"}"#,
            "There are 5 papers in the database.",
        ]));
        let judge_provider = Arc::new(ScriptedProvider::texts(&["9", r#"{"score": 1.0}"#]));
        let evaluator = evaluator(&agent_provider, &judge_provider);

        let result = evaluator
            .evaluate_case(&case(1, "How many papers are in the database?", "get_statistics", "statistics"))
            .await;

        assert_eq!(result.tool_accuracy, 1.0);
        assert_eq!(result.answer_relevance, 0.9);
        assert_eq!(result.faithfulness, 1.0);
        assert_eq!(result.gt_similarity, 1.0);
        assert_eq!(result.steps_taken, 1);
        assert!(judge_provider.prompts()[1].contains("\"total_papers\":5"));
    }

    #[tokio::test]
    async fn quick_run_takes_the_first_five() {
        let cases: Vec<_> = (1..=7)
            .map(|id| case(id, "hello there", "keyword_search", "misc"))
            .collect();
        // Every planner call gets FINISH; synthesis is skipped on an empty chain.
        let replies = vec![r#"{"tool": "FINISH"}"#; 7];
        let agent_provider = Arc::new(ScriptedProvider::texts(&replies));
        let judge_provider = Arc::new(ScriptedProvider::default());
        let evaluator = evaluator(&agent_provider, &judge_provider);

        let report = evaluator.run(&cases, true).await;

        assert_eq!(report.summary.total_questions, QUICK_CASES);
        assert_eq!(report.per_question.last().map(|r| r.id), Some(5));
        assert_eq!(report.summary.avg_tool_accuracy, 0.0);
        assert_eq!(report.by_category["misc"].count, 5);
    }

    #[test]
    fn evidence_is_one_line_per_step() {
        assert_eq!(evidence_text(&ThoughtChain::new()), "");
    }
}
