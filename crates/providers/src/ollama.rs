//! Native Ollama provider using the `/api/generate` endpoint.
//!
//! Sends one prompt with `stream: false` and reads the `response` field.
//! Sampling options map to Ollama's `temperature` and `num_predict`.

use async_trait::async_trait;
use paperlens_core::error::ProviderError;
use paperlens_core::provider::{Provider, ProviderRequest, ProviderResponse};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

use crate::transport_error;

pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";

pub struct OllamaProvider {
    base_url: String,
    client: reqwest::Client,
}

impl OllamaProvider {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    /// Build the `/api/generate` request body.
    fn request_body(request: &ProviderRequest) -> serde_json::Value {
        let mut options = serde_json::json!({ "temperature": request.temperature });
        if let Some(max_tokens) = request.max_tokens {
            options["num_predict"] = serde_json::json!(max_tokens);
        }
        serde_json::json!({
            "model": request.model,
            "prompt": request.prompt,
            "stream": false,
            "options": options,
        })
    }
}

impl Default for OllamaProvider {
    fn default() -> Self {
        Self::new(DEFAULT_OLLAMA_URL)
    }
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    model: Option<String>,
    response: String,
}

#[async_trait]
impl Provider for OllamaProvider {
    fn name(&self) -> &str {
        "ollama"
    }

    async fn complete(
        &self,
        request: ProviderRequest,
    ) -> std::result::Result<ProviderResponse, ProviderError> {
        let url = format!("{}/api/generate", self.base_url);
        let body = Self::request_body(&request);

        debug!(model = %request.model, timeout_secs = request.timeout_secs, "Sending Ollama generate request");

        let response = self
            .client
            .post(&url)
            .timeout(Duration::from_secs(request.timeout_secs))
            .json(&body)
            .send()
            .await
            .map_err(|e| transport_error(e, request.timeout_secs))?;

        let status = response.status().as_u16();
        if status != 200 {
            let error_body = response.text().await.unwrap_or_default();
            warn!(status, body = %error_body, "Ollama returned error");
            return Err(ProviderError::ApiError {
                status_code: status,
                message: error_body,
            });
        }

        let parsed: GenerateResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::MalformedResponse(e.to_string()))?;

        Ok(ProviderResponse {
            text: parsed.response,
            model: parsed.model.unwrap_or(request.model),
        })
    }

    async fn health_check(&self) -> std::result::Result<bool, ProviderError> {
        let url = format!("{}/api/tags", self.base_url);
        let response = self
            .client
            .get(&url)
            .timeout(Duration::from_secs(5))
            .send()
            .await
            .map_err(|e| transport_error(e, 5))?;
        Ok(response.status().is_success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(max_tokens: Option<u32>) -> ProviderRequest {
        ProviderRequest {
            model: "llama3.2".into(),
            prompt: "Which tool?".into(),
            temperature: 0.2,
            max_tokens,
            timeout_secs: 90,
        }
    }

    #[test]
    fn default_points_at_local_server() {
        let provider = OllamaProvider::default();
        assert_eq!(provider.base_url, "http://localhost:11434");
        assert_eq!(provider.name(), "ollama");
    }

    #[test]
    fn trailing_slash_trimmed() {
        let provider = OllamaProvider::new("http://gpu-box:11434/");
        assert_eq!(provider.base_url, "http://gpu-box:11434");
    }

    #[test]
    fn body_maps_sampling_options() {
        let body = OllamaProvider::request_body(&request(Some(250)));
        assert_eq!(body["stream"], false);
        assert_eq!(body["prompt"], "Which tool?");
        assert_eq!(body["options"]["num_predict"], 250);
        assert!((body["options"]["temperature"].as_f64().unwrap() - 0.2).abs() < 1e-6);
    }

    #[test]
    fn body_omits_num_predict_when_unbounded() {
        let body = OllamaProvider::request_body(&request(None));
        assert!(body["options"].get("num_predict").is_none());
    }

    #[test]
    fn parse_generate_response() {
        let parsed: GenerateResponse =
            serde_json::from_str(r#"{"model":"llama3.2","response":"{\"tool\":\"FINISH\"}","done":true}"#)
                .unwrap();
        assert_eq!(parsed.response, r#"{"tool":"FINISH"}"#);
    }

    #[tokio::test]
    async fn unreachable_server_is_an_error() {
        let provider = OllamaProvider::new("http://127.0.0.1:9");
        let err = provider.complete(request(None)).await.unwrap_err();
        assert!(matches!(err, ProviderError::Network(_) | ProviderError::Timeout(_)));
    }
}
