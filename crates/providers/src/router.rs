//! Provider selection from configuration.

use paperlens_config::LlmConfig;
use paperlens_core::provider::Provider;
use std::sync::Arc;
use tracing::info;

use crate::ollama::OllamaProvider;
use crate::openai_compat::OpenAiCompatProvider;

/// Build the configured provider.
///
/// `"ollama"` uses the native generate endpoint; every other name is treated
/// as an OpenAI-compatible backend.
pub fn build_provider(config: &LlmConfig) -> Arc<dyn Provider> {
    let base_url = config
        .base_url
        .clone()
        .unwrap_or_else(|| default_base_url(&config.provider));

    info!(provider = %config.provider, url = %base_url, model = %config.model, "Using LLM provider");

    match config.provider.as_str() {
        "ollama" => Arc::new(OllamaProvider::new(base_url)),
        name => Arc::new(OpenAiCompatProvider::new(
            name,
            base_url,
            config.api_key.clone().unwrap_or_default(),
        )),
    }
}

/// Get the default base URL for well-known providers.
pub fn default_base_url(provider_name: &str) -> String {
    match provider_name {
        "ollama" => crate::ollama::DEFAULT_OLLAMA_URL.into(),
        "openai" => "https://api.openai.com/v1".into(),
        "openrouter" => "https://openrouter.ai/api/v1".into(),
        "groq" => "https://api.groq.com/openai/v1".into(),
        "together" => "https://api.together.xyz/v1".into(),
        "vllm" => "http://localhost:8000/v1".into(),
        "llamacpp" | "llama.cpp" => "http://localhost:8080/v1".into(),
        _ => "http://localhost:8080/v1".into(),
    }
}
