//! `paperlens ask`: Single-question or interactive mode.

use paperlens_agent::ResearchAgent;
use paperlens_core::agent::AgentResult;
use serde_json::Value;
use std::io::Write;
use std::path::Path;
use tokio::io::{self, AsyncBufReadExt, BufReader};

pub async fn run(
    config_path: Option<&Path>,
    question: Option<String>,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = super::load_config(config_path)?;
    let (provider, store) = super::backends(&config);
    let agent = ResearchAgent::from_config(&config, provider, store);

    if let Some(question) = question {
        eprint!("  Thinking...");
        let result = agent.answer(&question).await;
        eprint!("\r              \r");
        print_result(&result, json)?;
        return Ok(());
    }

    println!();
    println!("  PaperLens — Interactive Mode");
    println!();
    println!("  Model:     {}", config.llm.model);
    println!("  Graph:     {}", config.graph.url);
    println!("  Tools:     {}", agent.tools().join(", "));
    println!();
    println!("  Type a question and press Enter.");
    println!("  Type 'exit' or Ctrl+C to quit.");
    println!();

    let mut lines = BufReader::new(io::stdin()).lines();
    loop {
        print!("  You > ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if matches!(line, "exit" | "quit" | "/exit" | "/quit" | ":q") {
            break;
        }

        eprint!("  ...");
        let result = agent.answer(line).await;
        eprint!("\r     \r");
        print_result(&result, json)?;
    }

    println!();
    println!("  Goodbye!");
    Ok(())
}

fn print_result(result: &AgentResult, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    if json {
        println!("{}", serde_json::to_string_pretty(result)?);
    } else {
        println!("{}", render(result));
    }
    Ok(())
}

/// Thought chain, then the answer and run statistics.
pub fn render(result: &AgentResult) -> String {
    let mut out = String::new();
    for step in &result.thought_chain {
        out.push_str(&format!(
            "\n  Step {}: {}({})\n    Thought: {}\n",
            step.step,
            step.action,
            Value::Object(step.args.clone()),
            step.thought
        ));
        for line in step.observation.lines() {
            out.push_str(&format!("    {line}\n"));
        }
    }

    out.push('\n');
    for line in result.answer.lines() {
        out.push_str(&format!("  Answer > {line}\n"));
    }
    out.push_str(&format!(
        "\n  Latency: {:.2}s | Steps: {} | Success: {}\n",
        result.latency_s,
        result.steps_taken,
        if result.success { "yes" } else { "no" }
    ));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use paperlens_core::agent::{Step, ThoughtChain};
    use paperlens_core::observation::Observation;
    use paperlens_core::tool::ToolArgs;

    #[test]
    fn render_shows_chain_and_answer() {
        let mut args = ToolArgs::new();
        args.insert("query".into(), Value::from("graph neural networks"));
        let mut chain = ThoughtChain::new();
        chain.push(Step {
            step: 1,
            thought: "keyword lookup".into(),
            action: "keyword_search".into(),
            args,
            observation: "No results found.".into(),
            raw_results: Observation::empty(),
        });
        let result = AgentResult {
            question: "gnn papers".into(),
            answer: "Nothing matched.".into(),
            thought_chain: chain,
            steps_taken: 1,
            latency_s: 1.234,
            success: false,
            started_at: chrono::Utc::now(),
        };

        let text = render(&result);
        assert!(text.contains(r#"Step 1: keyword_search({"query":"graph neural networks"})"#));
        assert!(text.contains("Thought: keyword lookup"));
        assert!(text.contains("Answer > Nothing matched."));
        assert!(text.contains("Latency: 1.23s | Steps: 1 | Success: no"));
    }
}
