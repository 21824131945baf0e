//! The PaperLens agent: answers questions about the research graph by
//! planning one retrieval action at a time, observing the result, and
//! finally writing an answer grounded in what was retrieved.
//!
//! Components, leaves first:
//! - [`parser`]: pulls a JSON object out of free-form model output
//! - [`query_gen`]: question to read-only Cypher, behind a write-keyword gate
//! - [`planner`]: rule shortcuts, then the model, then a keyword fallback
//! - [`synthesizer`]: final answer from the collected observations
//! - [`research_agent`]: the bounded loop tying them together

pub mod parser;
pub mod planner;
pub mod query_gen;
pub mod research_agent;
pub mod synthesizer;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use parser::parse_structured;
pub use planner::ActionPlanner;
pub use query_gen::LlmQueryGenerator;
pub use research_agent::ResearchAgent;
pub use synthesizer::AnswerSynthesizer;
