//! `paperlens eval`: Score the agent on a benchmark dataset.

use paperlens_agent::ResearchAgent;
use paperlens_eval::{Evaluator, MetricJudge, load_dataset};
use paperlens_providers::TextGenerator;
use std::path::Path;

pub async fn run(
    config_path: Option<&Path>,
    dataset: &Path,
    quick: bool,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = super::load_config(config_path)?;
    let cases = load_dataset(dataset)?;

    let (provider, store) = super::backends(&config);
    let judge = MetricJudge::new(TextGenerator::new(provider.clone(), config.llm.model.clone()));
    let agent = ResearchAgent::from_config(&config, provider, store);
    let evaluator = Evaluator::new(agent, judge);

    let report = evaluator.run(&cases, quick).await;
    println!("{}", report.render());

    if let Some(path) = output {
        report.save(path)?;
        println!("Report saved to {}", path.display());
    }
    Ok(())
}
