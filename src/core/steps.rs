// src/core/steps.rs — Step traits the controller drives

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::types::SessionRecord;
use crate::infra::errors::DistillError;

/// Typed result of one producer step. This is also the strict decoding
/// target at the model boundary: a reply either parses into this shape
/// or the step fails.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProducerOutput {
    /// Notes delta to append to the record.
    pub notes: Vec<String>,
    /// Whether the producer believes another pass is warranted.
    #[serde(default)]
    pub needs_more: bool,
}

/// The unit of work that generates new notes and proposes whether more
/// work is needed. A pure function of the current record; must not
/// mutate it.
#[async_trait]
pub trait Producer: Send + Sync {
    async fn produce(&self, record: &SessionRecord) -> Result<ProducerOutput, DistillError>;
}

/// Decides whether another producer step is warranted. Optional: when
/// absent, the controller consults the record's needs_more flag directly.
pub trait Evaluator: Send + Sync {
    fn assess(&self, record: &SessionRecord) -> bool;
}

/// Converts accumulated notes into a single final output. Runs exactly
/// once per session and must tolerate an empty notes sequence.
#[async_trait]
pub trait Finalizer: Send + Sync {
    async fn finalize(&self, record: &SessionRecord) -> Result<String, DistillError>;
}
