//! The reasoning loop.
//!
//! Each iteration plans one action, executes it, records a [`Step`], and
//! checks whether the evidence is sufficient. The loop ends when the
//! planner says `FINISH`, when the step bound is reached, or when a
//! sufficient observation arrives at step 2 or later. Every ending goes
//! through the synthesizer, and nothing inside the loop can fail it.

use chrono::Utc;
use paperlens_config::AppConfig;
use paperlens_core::agent::{AgentResult, Step, ThoughtChain};
use paperlens_core::graph::GraphStore;
use paperlens_core::provider::Provider;
use paperlens_providers::TextGenerator;
use paperlens_tools::{ToolExecutor, default_registry};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

use crate::planner::ActionPlanner;
use crate::query_gen::LlmQueryGenerator;
use crate::synthesizer::AnswerSynthesizer;

/// Marker of an apologetic answer; such answers do not count as success.
const APOLOGY_MARKER: &str = "couldn't find";

pub struct ResearchAgent {
    planner: ActionPlanner,
    executor: ToolExecutor,
    synthesizer: AnswerSynthesizer,
    sufficient_records: usize,
    summary_preview: usize,
}

impl ResearchAgent {
    pub fn new(planner: ActionPlanner, executor: ToolExecutor, synthesizer: AnswerSynthesizer) -> Self {
        Self {
            planner,
            executor,
            synthesizer,
            sufficient_records: 3,
            summary_preview: 5,
        }
    }

    /// Wire up the full agent from configuration and its two backends.
    pub fn from_config(
        config: &AppConfig,
        provider: Arc<dyn Provider>,
        store: Arc<dyn GraphStore>,
    ) -> Self {
        let text = TextGenerator::new(provider, config.llm.model.clone());
        let settings = &config.agent;

        let query_gen = LlmQueryGenerator::new(text.clone(), paperlens_graph::schema_description())
            .with_timeout(config.llm.query_timeout_secs);
        let registry = default_registry(store, Arc::new(query_gen), settings.max_records);

        let planner = ActionPlanner::new(text.clone(), &registry, settings.max_steps)
            .with_timeout(config.llm.planning_timeout_secs);
        let synthesizer =
            AnswerSynthesizer::new(text).with_timeout(config.llm.planning_timeout_secs);
        let executor = ToolExecutor::new(registry, settings.max_records);

        info!(
            model = %config.llm.model,
            tools = ?executor.registry().names(),
            max_steps = settings.max_steps,
            "ResearchAgent initialized"
        );

        Self::new(planner, executor, synthesizer)
            .with_sufficient_records(settings.sufficient_records)
            .with_summary_preview(settings.summary_preview)
    }

    /// Set the maximum number of tool calls per question. The bound lives
    /// in the planner, which also words the last-step prompt from it.
    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.planner = self.planner.with_max_steps(max_steps);
        self
    }

    /// Set how many records count as sufficient evidence.
    pub fn with_sufficient_records(mut self, count: usize) -> Self {
        self.sufficient_records = count;
        self
    }

    /// Set how many records each observation summary lists.
    pub fn with_summary_preview(mut self, count: usize) -> Self {
        self.summary_preview = count;
        self
    }

    pub fn tools(&self) -> Vec<&str> {
        self.executor.registry().names()
    }

    /// Answer one question. Each call owns its own thought chain.
    pub async fn answer(&self, question: &str) -> AgentResult {
        info!(question, "Agent question");
        let started_at = Utc::now();
        let start = Instant::now();
        let mut chain = ThoughtChain::new();

        let max_steps = self.planner.max_steps();
        for step in 1..=max_steps {
            debug!(step, max_steps, "Planning");
            let decision = self.planner.decide(question, &chain, step).await;
            info!(step, tool = %decision.tool, thought = %decision.thought, "Decision");

            if decision.is_finish() {
                info!(step, "Agent has enough information, generating answer");
                let answer = self.synthesizer.synthesize(question, &chain).await;
                return finish(question, answer, chain, start, started_at, true);
            }

            let observation = self.executor.execute(&decision.tool, &decision.args).await;
            let summary = observation.summarize(self.summary_preview);
            let sufficient = observation.is_sufficient(self.sufficient_records);
            info!(step, tool = %decision.tool, results = observation.len(), "Observation");

            chain.push(Step {
                step,
                thought: decision.thought,
                action: decision.tool,
                args: decision.args,
                observation: summary,
                raw_results: observation,
            });

            if sufficient && step >= 2 {
                info!(step, "Sufficient results found, stopping early");
                break;
            }
        }

        let answer = self.synthesizer.synthesize(question, &chain).await;
        let success = !answer.is_empty() && !answer.to_lowercase().contains(APOLOGY_MARKER);
        finish(question, answer, chain, start, started_at, success)
    }
}

fn finish(
    question: &str,
    answer: String,
    chain: ThoughtChain,
    start: Instant,
    started_at: chrono::DateTime<Utc>,
    success: bool,
) -> AgentResult {
    let latency_s = (start.elapsed().as_secs_f64() * 100.0).round() / 100.0;
    info!(
        steps = chain.len(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        success,
        "Agent done"
    );
    AgentResult {
        question: question.to_string(),
        answer,
        steps_taken: chain.len(),
        thought_chain: chain,
        latency_s,
        success,
        started_at,
    }
}
