// src/agents/writer.rs — Finalizer step backed by the writer model

use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;

use super::decode::decode_reply;
use crate::core::steps::Finalizer;
use crate::core::types::SessionRecord;
use crate::infra::errors::DistillError;
use crate::provider::{ChatRequest, Message, ModelProvider, ModelRef};

const WRITER_SYSTEM: &str = "You structure and finalize research outputs. You \
have no tools and no memory; the system handles persistence. You reply with a \
single JSON object and nothing else.";

/// Decoding target for the writer's reply.
#[derive(Debug, Deserialize)]
struct FinalNote {
    final_note: String,
}

/// The finalizer: consolidates the accumulated notes into one final
/// note. Failures here are absorbed upstream by the controller's
/// fallback, so this step just reports them honestly.
pub struct Writer {
    provider: Arc<dyn ModelProvider>,
    model: ModelRef,
}

impl Writer {
    pub fn new(provider: Arc<dyn ModelProvider>, model: ModelRef) -> Self {
        Self { provider, model }
    }
}

fn writer_prompt(record: &SessionRecord) -> String {
    let mut prompt = format!(
        "Consolidate the research notes below into one clean final note \
answering: {}\n\n",
        record.query
    );

    if record.notes.is_empty() {
        prompt.push_str("No notes were collected. Say so briefly in the final note.\n");
    } else {
        prompt.push_str("Research notes:\n");
        for (i, note) in record.notes.iter().enumerate() {
            prompt.push_str(&format!("{}. {}\n", i + 1, note));
        }
    }

    prompt.push_str("\nReply with exactly this JSON shape:\n{\"final_note\": \"...\"}");
    prompt
}

#[async_trait]
impl Finalizer for Writer {
    async fn finalize(&self, record: &SessionRecord) -> Result<String, DistillError> {
        let request = ChatRequest {
            model: self.model.model.clone(),
            messages: vec![Message::user(writer_prompt(record))],
            system: Some(WRITER_SYSTEM.into()),
            ..Default::default()
        };

        let response = self
            .provider
            .chat(request)
            .await
            .map_err(|e| DistillError::finalizer(format!("writer model call failed: {e}")))?;

        tracing::debug!(tokens = response.usage.total(), "writer replied");

        let parsed: FinalNote =
            decode_reply(&response.content).map_err(DistillError::finalizer)?;
        Ok(parsed.final_note)
    }
}
