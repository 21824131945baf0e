//! Text generation boundary used by the agent.
//!
//! [`TextGenerator`] wraps a [`Provider`] and a model name. It never fails:
//! connection errors, non-200 statuses and timeouts are logged and turned
//! into an empty string, which downstream parsers treat as "no answer".

use paperlens_core::provider::{Provider, ProviderRequest};
use std::sync::Arc;
use tracing::{debug, warn};

/// Sampling settings for one generation call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationOptions {
    pub temperature: f32,
    pub max_tokens: u32,
    pub timeout_secs: u64,
}

impl GenerationOptions {
    pub const fn new(temperature: f32, max_tokens: u32, timeout_secs: u64) -> Self {
        Self {
            temperature,
            max_tokens,
            timeout_secs,
        }
    }

    /// Tool selection: near-deterministic, short output.
    pub const fn planning() -> Self {
        Self::new(0.2, 250, 90)
    }

    /// Final answer composition.
    pub const fn synthesis() -> Self {
        Self::new(0.4, 500, 90)
    }

    /// Natural language to Cypher translation.
    pub const fn query_generation() -> Self {
        Self::new(0.1, 300, 45)
    }

    pub const fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }
}

/// A provider bound to a model, with errors degraded to empty text.
#[derive(Clone)]
pub struct TextGenerator {
    provider: Arc<dyn Provider>,
    model: String,
}

impl TextGenerator {
    pub fn new(provider: Arc<dyn Provider>, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn provider(&self) -> &Arc<dyn Provider> {
        &self.provider
    }

    /// Generate text for `prompt`. Returns `""` on any provider failure.
    pub async fn generate(&self, prompt: &str, opts: GenerationOptions) -> String {
        let request = ProviderRequest {
            model: self.model.clone(),
            prompt: prompt.to_string(),
            temperature: opts.temperature,
            max_tokens: Some(opts.max_tokens),
            timeout_secs: opts.timeout_secs,
        };

        match self.provider.complete(request).await {
            Ok(response) => {
                debug!(
                    provider = self.provider.name(),
                    chars = response.text.len(),
                    "Generation complete"
                );
                response.text.trim().to_string()
            }
            Err(e) => {
                warn!(provider = self.provider.name(), error = %e, "LLM generation failed");
                String::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use paperlens_core::error::ProviderError;
    use paperlens_core::provider::ProviderResponse;
    use std::sync::Mutex;

    struct FixedProvider {
        reply: Result<String, ProviderError>,
        seen: Mutex<Vec<ProviderRequest>>,
    }

    #[async_trait]
    impl Provider for FixedProvider {
        fn name(&self) -> &str {
            "fixed"
        }

        async fn complete(
            &self,
            request: ProviderRequest,
        ) -> std::result::Result<ProviderResponse, ProviderError> {
            let model = request.model.clone();
            self.seen.lock().unwrap().push(request);
            self.reply.clone().map(|text| ProviderResponse { text, model })
        }
    }

    #[tokio::test]
    async fn passes_options_and_trims_output() {
        let provider = Arc::new(FixedProvider {
            reply: Ok("  answer \n".into()),
            seen: Mutex::new(Vec::new()),
        });
        let generator = TextGenerator::new(provider.clone(), "llama3.2");

        let text = generator.generate("prompt", GenerationOptions::synthesis()).await;
        assert_eq!(text, "answer");

        let seen = provider.seen.lock().unwrap();
        assert_eq!(seen[0].model, "llama3.2");
        assert_eq!(seen[0].max_tokens, Some(500));
        assert_eq!(seen[0].timeout_secs, 90);
    }

    #[tokio::test]
    async fn timeout_degrades_to_empty() {
        let provider = Arc::new(FixedProvider {
            reply: Err(ProviderError::Timeout(45)),
            seen: Mutex::new(Vec::new()),
        });
        let generator = TextGenerator::new(provider, "llama3.2");
        let text = generator
            .generate("prompt", GenerationOptions::query_generation())
            .await;
        assert!(text.is_empty());
    }

    #[test]
    fn presets() {
        assert_eq!(GenerationOptions::planning(), GenerationOptions::new(0.2, 250, 90));
        assert_eq!(GenerationOptions::query_generation().timeout_secs, 45);
        assert_eq!(GenerationOptions::planning().with_timeout(10).timeout_secs, 10);
    }
}
