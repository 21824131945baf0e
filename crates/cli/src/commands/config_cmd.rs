//! `paperlens config`: Show configuration.

use paperlens_config::AppConfig;
use std::path::Path;

pub fn show(config_path: Option<&Path>, default: bool) -> Result<(), Box<dyn std::error::Error>> {
    if default {
        println!("{}", AppConfig::default_toml());
        return Ok(());
    }

    let config = super::load_config(config_path)?;
    let path = match config_path {
        Some(path) => path.to_path_buf(),
        None => AppConfig::config_dir().join("config.toml"),
    };
    println!("# {}", path.display());
    println!("{}", toml::to_string_pretty(&config.redacted())?);
    Ok(())
}
