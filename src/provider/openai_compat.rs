// src/provider/openai_compat.rs — Generic OpenAI-compatible provider
//
// Covers Groq (the default), OpenAI, and custom endpoints exposing the
// /chat/completions shape.

use async_trait::async_trait;

use super::{ChatRequest, ChatResponse, ModelProvider, Role, TokenUsage};
use crate::infra::errors::DistillError;

/// Backstop timeout on each chat request. The controller's step timeout
/// is the configured mechanism; this just keeps a wedged connection from
/// hanging a finalization step that runs outside it.
const REQUEST_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(120);

/// Provider for any OpenAI-compatible API endpoint.
pub struct OpenAICompatProvider {
    id_str: String,
    name_str: String,
    api_key: String,
    base_url: String,
    client: reqwest::Client,
}

impl OpenAICompatProvider {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        api_key: String,
        base_url: String,
    ) -> Self {
        Self {
            id_str: id.into(),
            name_str: name.into(),
            api_key,
            base_url,
            client: reqwest::Client::new(),
        }
    }

    fn provider_error(&self, message: impl Into<String>) -> DistillError {
        DistillError::Provider {
            provider: self.id_str.clone(),
            message: message.into(),
        }
    }
}

/// Shape a ChatRequest into the /chat/completions JSON body.
fn build_chat_body(request: &ChatRequest) -> serde_json::Value {
    let mut messages = Vec::new();
    if let Some(system) = &request.system {
        messages.push(serde_json::json!({"role": "system", "content": system}));
    }
    for m in &request.messages {
        messages.push(serde_json::json!({
            "role": match m.role {
                Role::System => "system",
                Role::User => "user",
                Role::Assistant => "assistant",
            },
            "content": m.content,
        }));
    }

    let mut body = serde_json::json!({
        "model": request.model,
        "messages": messages,
    });
    if let Some(max_tokens) = request.max_tokens {
        body["max_tokens"] = serde_json::json!(max_tokens);
    }
    if let Some(temp) = request.temperature {
        body["temperature"] = serde_json::json!(temp);
    }
    body
}

#[async_trait]
impl ModelProvider for OpenAICompatProvider {
    fn id(&self) -> &str {
        &self.id_str
    }

    fn name(&self) -> &str {
        &self.name_str
    }

    async fn chat(&self, request: ChatRequest) -> Result<ChatResponse, DistillError> {
        let body = build_chat_body(&request);

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header(
                "User-Agent",
                format!("distill/{}", env!("CARGO_PKG_VERSION")),
            )
            .timeout(REQUEST_TIMEOUT)
            .json(&body)
            .send()
            .await
            .map_err(|e| self.provider_error(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_body = response.text().await.unwrap_or_default();
            return Err(self.provider_error(format!("HTTP {status}: {error_body}")));
        }

        let resp: serde_json::Value = response
            .json()
            .await
            .map_err(|e| self.provider_error(format!("Failed to parse response: {e}")))?;

        let content = resp["choices"][0]["message"]["content"]
            .as_str()
            .unwrap_or("")
            .to_string();

        let usage = TokenUsage {
            input_tokens: resp["usage"]["prompt_tokens"].as_u64().unwrap_or(0) as u32,
            output_tokens: resp["usage"]["completion_tokens"].as_u64().unwrap_or(0) as u32,
        };

        tracing::debug!(
            provider = %self.id_str,
            model = %request.model,
            input_tokens = usage.input_tokens,
            output_tokens = usage.output_tokens,
            "chat completed",
        );

        Ok(ChatResponse { content, usage })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::Message;

    #[test]
    fn test_body_includes_model_and_messages() {
        let request = ChatRequest {
            model: "llama-3.3-70b-versatile".into(),
            messages: vec![Message::user("hello")],
            ..Default::default()
        };
        let body = build_chat_body(&request);
        assert_eq!(body["model"], "llama-3.3-70b-versatile");
        assert_eq!(body["messages"][0]["role"], "user");
        assert_eq!(body["messages"][0]["content"], "hello");
        assert!(body.get("max_tokens").is_none());
        assert!(body.get("temperature").is_none());
    }

    #[test]
    fn test_body_system_message_comes_first() {
        let request = ChatRequest {
            model: "m".into(),
            messages: vec![Message::user("question")],
            system: Some("You are a researcher.".into()),
            ..Default::default()
        };
        let body = build_chat_body(&request);
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][0]["content"], "You are a researcher.");
        assert_eq!(body["messages"][1]["role"], "user");
    }

    #[test]
    fn test_body_optional_knobs() {
        let request = ChatRequest {
            model: "m".into(),
            messages: vec![Message::user("q")],
            max_tokens: Some(512),
            temperature: Some(0.2),
            ..Default::default()
        };
        let body = build_chat_body(&request);
        assert_eq!(body["max_tokens"], 512);
        assert!((body["temperature"].as_f64().unwrap() - 0.2).abs() < 1e-6);
    }
}
