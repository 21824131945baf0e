//! PaperLens CLI: the main entry point.
//!
//! Commands:
//! - `ask`: Answer one question, or chat interactively
//! - `eval`: Score the agent against a benchmark dataset
//! - `init-schema`: Create graph constraints and indexes
//! - `doctor`: Check the LLM and graph connections
//! - `config`: Show the effective or default configuration

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

#[derive(Parser)]
#[command(
    name = "paperlens",
    about = "PaperLens — question answering over a research-paper knowledge graph",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    json_logs: bool,

    /// Config file to use instead of ~/.paperlens/config.toml
    #[arg(long, global = true, env = "PAPERLENS_CONFIG")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Ask a question about the research graph
    Ask {
        /// Ask a single question instead of entering interactive mode
        #[arg(short, long)]
        question: Option<String>,

        /// Print the full result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Evaluate the agent on a benchmark dataset
    Eval {
        /// JSON array of benchmark questions
        #[arg(short, long, default_value = "eval_dataset.json")]
        dataset: PathBuf,

        /// Only run the first five questions
        #[arg(long)]
        quick: bool,

        /// Save the report as JSON
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Create graph constraints and indexes (idempotent)
    InitSchema,

    /// Diagnose LLM and graph connectivity
    Doctor,

    /// Show configuration
    Config {
        /// Print the built-in defaults instead of the effective config
        #[arg(long)]
        default: bool,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "info" };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr);
    if cli.json_logs {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    let config_path = cli.config.as_deref();
    match cli.command {
        Commands::Ask { question, json } => commands::ask::run(config_path, question, json).await?,
        Commands::Eval {
            dataset,
            quick,
            output,
        } => commands::eval::run(config_path, &dataset, quick, output.as_deref()).await?,
        Commands::InitSchema => commands::init_schema::run(config_path).await?,
        Commands::Doctor => commands::doctor::run(config_path).await?,
        Commands::Config { default } => commands::config_cmd::show(config_path, default)?,
    }

    Ok(())
}
