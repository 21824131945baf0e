//! Per-answer scoring.
//!
//! Tool accuracy and keyword overlap are pure functions. Relevance and
//! faithfulness ask a judge model first and fall back to a lexical
//! heuristic when the judge's reply cannot be read.

use paperlens_agent::parse_structured;
use paperlens_core::agent::ThoughtChain;
use paperlens_providers::{GenerationOptions, TextGenerator};
use regex_lite::Regex;
use serde_json::Value;
use std::collections::HashSet;
use std::sync::LazyLock;
use tracing::debug;

static SCORE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(\d+(?:\.\d+)?)\b").expect("valid score regex"));

static INTEGER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\d+\b").expect("valid integer regex"));

const STOP_WORDS: [&str; 16] = [
    "the", "a", "an", "is", "are", "in", "of", "to", "how", "many", "what", "who", "show", "me",
    "there", "about",
];

/// Phrases of an honest empty answer. Such answers cannot hallucinate.
const HONEST_EMPTY: [&str; 2] = ["couldn't find", "no results"];

const CONTEXT_CHARS: usize = 800;
const ANSWER_CHARS: usize = 400;

/// Score assumed when an answer carries no numbers to check.
const NO_NUMBERS_SCORE: f64 = 0.8;

/// 1.0 if `expected` ran at step 1, 0.5 if it ran later, 0.0 if never.
pub fn tool_accuracy(expected: &str, chain: &ThoughtChain) -> f64 {
    match chain.iter().find(|step| step.action == expected) {
        Some(step) if step.step == 1 => 1.0,
        Some(_) => 0.5,
        None => 0.0,
    }
}

/// Fraction of the reference's content words that appear in `answer`,
/// rounded to two decimals. A reference with no content words scores 0.5.
pub fn keyword_overlap(reference: &str, answer: &str) -> f64 {
    let words: HashSet<String> = reference
        .split_whitespace()
        .map(str::to_lowercase)
        .filter(|w| w.chars().count() > 2 && !STOP_WORDS.contains(&w.as_str()))
        .collect();
    if words.is_empty() {
        return 0.5;
    }

    let answer = answer.to_lowercase();
    let matched = words.iter().filter(|w| answer.contains(w.as_str())).count();
    round2(matched as f64 / words.len() as f64)
}

/// Share of the answer's integers that also appear in the context.
pub fn numeric_faithfulness(answer: &str, context: &str) -> f64 {
    let in_context: HashSet<&str> = INTEGER.find_iter(context).map(|m| m.as_str()).collect();
    let in_answer: HashSet<&str> = INTEGER.find_iter(answer).map(|m| m.as_str()).collect();
    if in_answer.is_empty() {
        return NO_NUMBERS_SCORE;
    }

    let invented = in_answer.difference(&in_context).count();
    round2((1.0 - invented as f64 / in_answer.len() as f64).max(0.0))
}

/// LLM-backed relevance and faithfulness scoring.
pub struct MetricJudge {
    generator: TextGenerator,
    timeout_secs: u64,
}

impl MetricJudge {
    pub fn new(generator: TextGenerator) -> Self {
        Self {
            generator,
            timeout_secs: 60,
        }
    }

    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// How well `answer` addresses `question`, in `[0, 1]`.
    pub async fn relevance(&self, question: &str, answer: &str) -> f64 {
        if answer.trim().chars().count() < 5 {
            return 0.0;
        }

        let reply = self
            .generator
            .generate(
                &relevance_prompt(question, answer),
                GenerationOptions::new(0.0, 5, self.timeout_secs),
            )
            .await;

        match SCORE
            .captures(&reply)
            .and_then(|c| c.get(1))
            .and_then(|m| m.as_str().parse::<f64>().ok())
        {
            Some(score) => (score / 10.0).min(1.0),
            None => {
                debug!("Relevance judge unreadable, using keyword overlap");
                keyword_overlap(question, answer)
            }
        }
    }

    /// Share of the answer's claims supported by `context`, in `[0, 1]`.
    pub async fn faithfulness(&self, answer: &str, context: &str) -> f64 {
        if answer.is_empty() || context.is_empty() {
            return 0.0;
        }
        let lowered = answer.to_lowercase();
        if HONEST_EMPTY.iter().any(|p| lowered.contains(p)) {
            return 1.0;
        }

        let reply = self
            .generator
            .generate(
                &faithfulness_prompt(answer, context),
                GenerationOptions::new(0.0, 100, self.timeout_secs),
            )
            .await;

        match parse_structured(&reply).and_then(|obj| judge_score(obj.get("score"))) {
            Some(score) => score.clamp(0.0, 1.0),
            None => {
                debug!("Faithfulness judge unreadable, using numeric check");
                numeric_faithfulness(answer, context)
            }
        }
    }
}

/// A missing score reads as 0; a score that is neither a number nor a
/// numeric string is unreadable.
fn judge_score(value: Option<&Value>) -> Option<f64> {
    match value {
        None => Some(0.0),
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse().ok(),
        Some(_) => None,
    }
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

fn relevance_prompt(question: &str, answer: &str) -> String {
    format!(
        "Rate how well this answer addresses the question on a scale of 0 to 10.

QUESTION: {question}
ANSWER: {answer}

Scoring guide:
  10 = Perfectly answers the question with specific details
   7 = Mostly answers the question
   5 = Partially answers the question
   3 = Barely relevant
   0 = Completely irrelevant or says \"I couldn't find\"

Reply with ONLY a single number (0-10), nothing else."
    )
}

fn faithfulness_prompt(answer: &str, context: &str) -> String {
    format!(
        "Check if the ANSWER is supported by the CONTEXT data. Count claims that are supported vs not supported.

CONTEXT (retrieved data):
{}

ANSWER to check:
{}

For each factual claim in the answer (numbers, names, titles, dates):
- Is it present in or directly derivable from the context?

Reply with ONLY this JSON:
{{\"supported\": <count of supported claims>, \"total\": <total claims>, \"score\": <supported/total>}}",
        truncate_chars(context, CONTEXT_CHARS),
        truncate_chars(answer, ANSWER_CHARS),
    )
}
