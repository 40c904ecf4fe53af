// src/agents/researcher.rs — Producer step backed by the research model

use async_trait::async_trait;
use std::sync::Arc;

use super::decode::decode_reply;
use crate::core::steps::{Producer, ProducerOutput};
use crate::core::types::SessionRecord;
use crate::infra::errors::DistillError;
use crate::provider::{ChatRequest, Message, ModelProvider, ModelRef};

const RESEARCHER_SYSTEM: &str = "You are a research agent. You investigate the \
given question and produce compact, factual research notes. You never write \
essays. You reply with a single JSON object and nothing else.";

/// The producer: one model call per step, yielding a notes delta and a
/// needs_more verdict. Any provider or decoding failure is a producer
/// failure that aborts the run.
pub struct Researcher {
    provider: Arc<dyn ModelProvider>,
    model: ModelRef,
}

impl Researcher {
    pub fn new(provider: Arc<dyn ModelProvider>, model: ModelRef) -> Self {
        Self { provider, model }
    }
}

fn research_prompt(record: &SessionRecord) -> String {
    let mut prompt = format!(
        "Research question: {}\n\nThis is research pass {} of at most {}.\n",
        record.query,
        record.iteration + 1,
        record.max_iterations,
    );

    if record.notes.is_empty() {
        prompt.push_str("\nNo notes have been collected yet.\n");
    } else {
        prompt.push_str("\nNotes collected so far (do not repeat them):\n");
        for note in &record.notes {
            prompt.push_str("- ");
            prompt.push_str(note);
            prompt.push('\n');
        }
    }

    prompt.push_str(
        "\nProduce 1-3 new factual notes of one or two sentences each. Set \
\"needs_more\" to true only when the question is not yet adequately covered.\n\
Reply with exactly this JSON shape:\n\
{\"notes\": [\"...\"], \"needs_more\": true}",
    );
    prompt
}

#[async_trait]
impl Producer for Researcher {
    async fn produce(&self, record: &SessionRecord) -> Result<ProducerOutput, DistillError> {
        let request = ChatRequest {
            model: self.model.model.clone(),
            messages: vec![Message::user(research_prompt(record))],
            system: Some(RESEARCHER_SYSTEM.into()),
            temperature: Some(0.2),
            ..Default::default()
        };

        let response = self
            .provider
            .chat(request)
            .await
            .map_err(|e| DistillError::producer(format!("research model call failed: {e}")))?;

        tracing::debug!(
            iteration = record.iteration,
            tokens = response.usage.total(),
            "researcher replied",
        );

        decode_reply::<ProducerOutput>(&response.content).map_err(DistillError::producer)
    }
}
