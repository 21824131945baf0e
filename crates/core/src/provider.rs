//! Provider trait: the abstraction over LLM backends.
//!
//! A Provider turns a single prompt into generated text. The agent only
//! ever needs one-shot generation, so there is no conversation state here.
//!
//! Implementations: Ollama (native `/api/generate`), OpenAI-compatible endpoints.

use crate::error::ProviderError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Configuration for a provider request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderRequest {
    /// The model to use (e.g., "llama3.2", "gpt-4o-mini")
    pub model: String,

    /// The full prompt text
    pub prompt: String,

    /// Temperature (0.0 = deterministic, 1.0 = creative)
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Maximum tokens to generate
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_temperature() -> f32 {
    0.3
}

fn default_timeout_secs() -> u64 {
    90
}

/// A complete response from a provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderResponse {
    /// The generated text
    pub text: String,

    /// Which model actually responded (may differ from requested)
    pub model: String,
}

/// The core Provider trait.
///
/// The agent calls `complete()` without knowing which backend answers.
/// Every failure mode (connection refused, non-200, timeout) is an `Err`;
/// turning those into empty text is the job of the caller's adapter.
#[async_trait]
pub trait Provider: Send + Sync {
    /// A human-readable name for this provider (e.g., "ollama", "openai").
    fn name(&self) -> &str;

    /// Send a request and get a complete response.
    async fn complete(
        &self,
        request: ProviderRequest,
    ) -> std::result::Result<ProviderResponse, ProviderError>;

    /// Health check: can we reach the provider?
    async fn health_check(&self) -> std::result::Result<bool, ProviderError> {
        Ok(true)
    }
}
