// src/provider/resolver.rs — Provider discovery from env and config

use std::sync::Arc;

use super::openai_compat::OpenAICompatProvider;
use super::ModelProvider;
use crate::infra::config::ProviderConfig;
use crate::infra::errors::DistillError;

const GROQ_BASE_URL: &str = "https://api.groq.com/openai/v1";
const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

/// Resolve the active provider.
///
/// Priority: a custom endpoint from config.toml, then GROQ_API_KEY,
/// then OPENAI_API_KEY. Exactly one provider is active per process.
pub fn discover(config: &ProviderConfig) -> Result<Arc<dyn ModelProvider>, DistillError> {
    discover_with(config, |name| std::env::var(name).ok())
}

/// Testable core of `discover`: env access goes through `lookup`.
pub(crate) fn discover_with(
    config: &ProviderConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<Arc<dyn ModelProvider>, DistillError> {
    if let Some(base_url) = config.base_url.as_deref().filter(|s| !s.is_empty()) {
        let api_key = config
            .api_key_env
            .as_deref()
            .and_then(&lookup)
            .unwrap_or_default();
        tracing::info!("Using custom endpoint {base_url}");
        return Ok(Arc::new(OpenAICompatProvider::new(
            "custom",
            "Custom endpoint",
            api_key,
            base_url.trim_end_matches('/').to_string(),
        )));
    }

    if let Some(key) = lookup("GROQ_API_KEY") {
        return Ok(Arc::new(OpenAICompatProvider::new(
            "groq",
            "Groq",
            key,
            GROQ_BASE_URL.into(),
        )));
    }

    if let Some(key) = lookup("OPENAI_API_KEY") {
        return Ok(Arc::new(OpenAICompatProvider::new(
            "openai",
            "OpenAI",
            key,
            OPENAI_BASE_URL.into(),
        )));
    }

    Err(DistillError::NoProvider)
}
