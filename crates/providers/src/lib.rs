//! LLM Provider implementations for PaperLens.
//!
//! All providers implement the `paperlens_core::Provider` trait.
//! [`build_provider`] selects the backend from configuration, and
//! [`TextGenerator`] is the boundary where every provider failure
//! degrades to empty text.

pub mod generator;
pub mod ollama;
pub mod openai_compat;
pub mod router;

pub use generator::{GenerationOptions, TextGenerator};
pub use ollama::OllamaProvider;
pub use openai_compat::OpenAiCompatProvider;
pub use router::build_provider;

use paperlens_core::error::ProviderError;

/// Classify a reqwest send/read failure.
pub(crate) fn transport_error(err: reqwest::Error, timeout_secs: u64) -> ProviderError {
    if err.is_timeout() {
        ProviderError::Timeout(timeout_secs)
    } else {
        ProviderError::Network(err.to_string())
    }
}
