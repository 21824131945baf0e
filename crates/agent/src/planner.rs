//! Action planning: which tool to run next.
//!
//! Resolution order, first hit wins:
//! 1. Step 1 rule shortcuts: count phrasing goes to `get_statistics`,
//!    institution phrasing goes to `institution_search`. No model call.
//! 2. From step 2, if the previous step found results, `FINISH`.
//! 3. Ask the model, showing the tool catalog and the steps so far.
//! 4. If the reply cannot be parsed, keyword search on the question's
//!    content words.
//!
//! The planner never fails; every path ends in a usable [`Decision`].

use paperlens_core::agent::{Decision, FINISH, ThoughtChain};
use paperlens_core::tool::{ToolArgs, ToolRegistry, scalar_text};
use paperlens_providers::{GenerationOptions, TextGenerator};
use paperlens_tools::{get_statistics, institution_search, keyword_search};
use regex_lite::Regex;
use serde_json::{Map, Value};
use std::sync::LazyLock;
use tracing::{debug, info, warn};

use crate::parser::parse_structured;

/// Phrases that make a question a pure count/aggregate lookup.
const STATISTICS_PHRASES: [&str; 5] = ["how many", "total", "count", "statistics", "overview"];

/// Generic institution words, matched anywhere in the question.
const INSTITUTION_WORDS: [&str; 3] = ["university", "institution", "college"];

/// Institution names, matched as whole words.
const INSTITUTION_NAMES: [&str; 3] = ["iit", "mit", "stanford"];

/// Used when no institution name can be extracted.
const FALLBACK_INSTITUTION: &str = "IIT";

static INSTITUTION_AFTER_FROM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)from ([A-Za-z ]+?)(?:\s+(?:paper|author|research)|$)")
        .expect("institution pattern is valid")
});

const RESPONSE_FORMAT: &str = r#"Respond with ONLY this JSON:
{
  "thought": "I need to ... because ...",
  "tool": "tool_name_here",
  "args": {"arg_name": "arg_value"}
}

For get_statistics, use: "args": {}
For FINISH, use: "args": {"answer": "brief summary"}"#;

pub struct ActionPlanner {
    generator: TextGenerator,
    options: GenerationOptions,
    catalog: String,
    tool_names: Vec<String>,
    max_steps: usize,
}

impl ActionPlanner {
    pub fn new(generator: TextGenerator, registry: &ToolRegistry, max_steps: usize) -> Self {
        Self {
            generator,
            options: GenerationOptions::planning(),
            catalog: render_catalog(registry),
            tool_names: registry.names().into_iter().map(String::from).collect(),
            max_steps,
        }
    }

    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.options = self.options.with_timeout(timeout_secs);
        self
    }

    /// Set the step bound. The last allowed step forces `FINISH` in the prompt.
    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = max_steps;
        self
    }

    pub fn max_steps(&self) -> usize {
        self.max_steps
    }

    /// Decide the next action for `question` at 1-based `step`.
    pub async fn decide(&self, question: &str, chain: &ThoughtChain, step: usize) -> Decision {
        if step == 1 {
            if let Some(decision) = rule_shortcut(question) {
                debug!(tool = %decision.tool, "Rule shortcut");
                return decision;
            }
        }

        if step >= 2 && chain.last().is_some_and(|last| found_results(&last.observation)) {
            return Decision::finish("I already have sufficient results from the previous step.");
        }

        let prompt = self.prompt(question, chain, step);
        let raw = self.generator.generate(&prompt, self.options).await;

        match parse_structured(&raw) {
            Some(parsed) => self.normalize(parsed),
            None => {
                warn!("Action parsing failed, using keyword_search as fallback");
                fallback_decision(question)
            }
        }
    }

    fn prompt(&self, question: &str, chain: &ThoughtChain, step: usize) -> String {
        let history = render_history(chain);
        let last_step = if step >= self.max_steps {
            "IMPORTANT: This is your last step. You MUST use FINISH now."
        } else {
            ""
        };

        format!(
            "You are a research assistant agent. Your job is to find information about research papers.\n\n\
             {catalog}\n{history}\n\n\
             QUESTION: {question}\n\
             STEP: {step} of {max_steps}\n\n\
             {last_step}\n\n\
             Think about what information you need, then choose ONE tool.\n\
             If you already have enough information from previous steps, use FINISH.\n\n\
             {RESPONSE_FORMAT}\n",
            catalog = self.catalog,
            max_steps = self.max_steps,
        )
    }

    /// Turn a parsed model reply into a decision naming a registered tool
    /// or `FINISH`. Unknown tools become a keyword search on the first
    /// argument value.
    fn normalize(&self, parsed: Map<String, Value>) -> Decision {
        let thought = parsed
            .get("thought")
            .map(scalar_text)
            .unwrap_or_default();
        let tool = parsed
            .get("tool")
            .and_then(Value::as_str)
            .map(str::trim)
            .unwrap_or(keyword_search::NAME);
        let args = match parsed.get("args") {
            Some(Value::Object(args)) => args.clone(),
            Some(Value::Null) | None => ToolArgs::new(),
            Some(other) => {
                let mut args = ToolArgs::new();
                args.insert("value".into(), other.clone());
                args
            }
        };

        if tool.eq_ignore_ascii_case(FINISH) {
            return Decision::new(thought, FINISH, args);
        }
        if self.tool_names.iter().any(|name| name == tool) {
            return Decision::new(thought, tool, args);
        }

        warn!(tool, "Model chose an unknown tool, using keyword_search");
        let query = args.values().next().cloned().unwrap_or_else(|| Value::from(""));
        Decision::new(thought, keyword_search::NAME, single_arg("query", query))
    }
}

fn rule_shortcut(question: &str) -> Option<Decision> {
    let lowered = question.to_lowercase();

    if STATISTICS_PHRASES.iter().any(|p| lowered.contains(p)) {
        info!("Question asks for counts, using get_statistics");
        return Some(Decision::new(
            "Question asks for counts/statistics, using get_statistics directly.",
            get_statistics::NAME,
            ToolArgs::new(),
        ));
    }

    let named = lowered
        .split(|c: char| !c.is_alphanumeric())
        .any(|word| INSTITUTION_NAMES.contains(&word));
    if named || INSTITUTION_WORDS.iter().any(|w| lowered.contains(w)) {
        let name = extract_institution(question);
        info!(institution = %name, "Question names an institution, using institution_search");
        return Some(Decision::new(
            "Question asks about an institution, using institution_search.",
            institution_search::NAME,
            single_arg("name", Value::String(name)),
        ));
    }

    None
}

/// The words after "from", up to "paper"/"author"/"research" or the end.
fn extract_institution(question: &str) -> String {
    let trimmed = question.trim().trim_end_matches(['?', '.', '!']);
    INSTITUTION_AFTER_FROM
        .captures(trimmed)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| FALLBACK_INSTITUTION.to_string())
}

/// Whether an observation summary reports a non-empty result list.
fn found_results(summary: &str) -> bool {
    summary.contains("Found") && !summary.contains(" 0 results")
}

fn fallback_decision(question: &str) -> Decision {
    let words: Vec<&str> = question
        .split_whitespace()
        .filter(|w| w.chars().count() > 3)
        .take(4)
        .collect();
    let query = if words.is_empty() {
        question.to_string()
    } else {
        words.join(" ")
    };
    Decision::new(
        "Falling back to keyword search",
        keyword_search::NAME,
        single_arg("query", Value::String(query)),
    )
}

fn single_arg(name: &str, value: Value) -> ToolArgs {
    let mut args = ToolArgs::new();
    args.insert(name.to_string(), value);
    args
}

fn render_catalog(registry: &ToolRegistry) -> String {
    let mut catalog =
        String::from("You have access to these tools to search a research paper knowledge graph:\n");
    let mut index = 0;
    for tool in registry.iter() {
        index += 1;
        catalog.push_str(&format!(
            "\n{index}. {}\n   Use when: {}\n",
            tool.signature(),
            tool.description()
        ));
        if let Some(example) = tool.example() {
            catalog.push_str(&format!("   Example: {example}\n"));
        }
    }
    catalog.push_str(&format!(
        "\n{}. {FINISH}(answer: str)\n   Use when: You have enough information to answer the question completely\n   \
         Example: {FINISH}(\"Based on the results, the top papers are...\")\n",
        index + 1
    ));
    catalog
}

fn render_history(chain: &ThoughtChain) -> String {
    if chain.is_empty() {
        return String::new();
    }
    let mut history = String::from("\n\nPREVIOUS STEPS:\n");
    for step in chain {
        history.push_str(&format!(
            "Step {}:\n  Thought: {}\n  Action : {}({})\n  Result : {}\n",
            step.step,
            step.thought,
            step.action,
            Value::Object(step.args.clone()),
            step.observation
        ));
    }
    history
}
