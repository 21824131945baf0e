//! `paperlens doctor`: Diagnose LLM and graph connectivity.

use paperlens_config::AppConfig;
use std::path::Path;

pub async fn run(config_path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    println!("PaperLens Doctor — System Diagnostics");
    println!("=====================================\n");

    let mut issues = 0;

    let default_path = AppConfig::config_dir().join("config.toml");
    let path = config_path.unwrap_or(&default_path);
    if path.exists() {
        println!("  [ok]   Config file found at {}", path.display());
    } else {
        println!("  [info] No config file at {}, using defaults", path.display());
    }

    let config = match super::load_config(config_path) {
        Ok(config) => {
            println!("  [ok]   Config valid");
            config
        }
        Err(e) => {
            println!("  [fail] Config invalid: {e}");
            return Err(e);
        }
    };

    let (provider, store) = super::backends(&config);

    match provider.health_check().await {
        Ok(true) => println!("  [ok]   LLM reachable ({}, model {})", provider.name(), config.llm.model),
        Ok(false) => {
            println!("  [fail] LLM endpoint answered but is not healthy ({})", provider.name());
            issues += 1;
        }
        Err(e) => {
            println!("  [fail] LLM unreachable: {e}");
            issues += 1;
        }
    }

    match store.health_check().await {
        Ok(true) => println!("  [ok]   Graph reachable ({})", config.graph.url),
        Ok(false) => {
            println!("  [fail] Graph answered but is not healthy ({})", config.graph.url);
            issues += 1;
        }
        Err(e) => {
            println!("  [fail] Graph unreachable: {e}");
            issues += 1;
        }
    }

    println!();
    if issues == 0 {
        println!("  All checks passed!");
    } else {
        println!("  {issues} issue(s) found. See above for details.");
    }

    Ok(())
}
