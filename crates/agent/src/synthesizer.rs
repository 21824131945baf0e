//! Final answer synthesis, grounded strictly in the retrieved observations.

use paperlens_core::agent::ThoughtChain;
use paperlens_providers::{GenerationOptions, TextGenerator};
use serde_json::Value;
use tracing::{debug, warn};

/// Answer used when nothing was retrieved.
pub const NO_INFORMATION_ANSWER: &str =
    "I couldn't find relevant information for your question in the knowledge graph.";

/// Answer used when the model returns nothing.
pub const NO_ANSWER_GENERATED: &str = "Could not generate an answer from the retrieved data.";

pub struct AnswerSynthesizer {
    generator: TextGenerator,
    options: GenerationOptions,
}

impl AnswerSynthesizer {
    pub fn new(generator: TextGenerator) -> Self {
        Self {
            generator,
            options: GenerationOptions::synthesis(),
        }
    }

    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.options = self.options.with_timeout(timeout_secs);
        self
    }

    /// Compose the answer to `question` from every step's observation.
    pub async fn synthesize(&self, question: &str, observations: &ThoughtChain) -> String {
        if observations.is_empty() {
            return NO_INFORMATION_ANSWER.to_string();
        }

        let prompt = grounded_prompt(question, &render_context(observations));
        debug!(steps = observations.len(), "Synthesizing answer");

        let answer = self.generator.generate(&prompt, self.options).await;
        if answer.is_empty() {
            warn!("Synthesis returned no text");
            return NO_ANSWER_GENERATED.to_string();
        }
        answer
    }
}

fn render_context(observations: &ThoughtChain) -> String {
    let mut parts = Vec::with_capacity(observations.len() * 2);
    for (i, step) in observations.iter().enumerate() {
        parts.push(format!(
            "\n[Tool {}: {}({})]",
            i + 1,
            step.action,
            Value::Object(step.args.clone())
        ));
        parts.push(step.observation.clone());
    }
    parts.join("\n")
}

fn grounded_prompt(question: &str, context: &str) -> String {
    format!(
        "You are a research assistant. Answer ONLY using the exact data shown below.

STRICT RULES:
- NEVER invent or calculate numbers not present in the data
- If data shows statistics like \"5 papers\", report exactly that number
- Do not guess, assume duplicates, or add/subtract from shown numbers
- Be concise and factual, cite exact titles and numbers from data

DATA RETRIEVED:
{context}

QUESTION: {question}

ANSWER (use only numbers and titles shown in DATA above):"
    )
}
