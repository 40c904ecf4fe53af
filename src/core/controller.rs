// src/core/controller.rs — Bounded refinement controller
//
// Drives the producer -> evaluator -> finalizer loop over a session
// record. The iteration cap is absolute: the loop performs at most
// max_iterations producer steps regardless of what any step asks for.

use std::sync::Arc;

use super::steps::{Evaluator, Finalizer, Producer, ProducerOutput};
use super::types::{
    CapPolicy, ControllerConfig, MemoryValue, ProgressEvent, RunReport, SessionRecord,
};
use crate::infra::errors::DistillError;
use crate::memory::notepad::NotesSink;
use crate::memory::store::SnapshotStore;
use crate::util::preview;

/// Substituted for the final output when finalization fails. The run has
/// already produced useful notes at that point, so it completes with this
/// deterministic note instead of raising.
pub const FALLBACK_FINAL_NOTE: &str =
    "Consolidation unavailable; the collected research notes were kept as-is.";

const QUERY_PREVIEW_CHARS: usize = 60;

/// The controller that runs one bounded refinement session.
pub struct Controller {
    config: ControllerConfig,
    /// Optional persisted snapshot store, written once at finalization.
    store: Option<Arc<dyn SnapshotStore>>,
    /// Optional notes sink; best-effort, caller opt-in.
    sink: Option<Arc<dyn NotesSink>>,
    /// Optional callback for real-time progress events.
    on_progress: Option<Box<dyn Fn(ProgressEvent) + Send>>,
}

impl Controller {
    pub fn new(config: ControllerConfig) -> Self {
        Self {
            config,
            store: None,
            sink: None,
            on_progress: None,
        }
    }

    /// Attach a memory store. The record's snapshot is merged and saved
    /// wholesale after finalization.
    pub fn with_store(mut self, store: Arc<dyn SnapshotStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Attach a notes sink the final output is appended to.
    pub fn with_sink(mut self, sink: Arc<dyn NotesSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Set a callback for real-time progress events.
    pub fn with_progress(mut self, cb: impl Fn(ProgressEvent) + Send + 'static) -> Self {
        self.on_progress = Some(Box::new(cb));
        self
    }

    fn emit(&self, event: ProgressEvent) {
        if let Some(ref cb) = self.on_progress {
            cb(event);
        }
    }

    /// Run the full refinement loop for a session.
    ///
    /// The record is mutated in place: notes accumulate, the iteration
    /// counter advances once per committed producer step, and
    /// final_output is set during finalization. On producer failure the
    /// run aborts with the error and the failed step leaves no partial
    /// state behind.
    pub async fn run(
        &self,
        record: &mut SessionRecord,
        producer: &dyn Producer,
        evaluator: Option<&dyn Evaluator>,
        finalizer: &dyn Finalizer,
    ) -> Result<RunReport, DistillError> {
        if record.max_iterations < 1 {
            return Err(DistillError::InvalidConfiguration {
                max_iterations: record.max_iterations,
            });
        }

        self.emit(ProgressEvent::SessionStart {
            query_preview: preview(&record.query, QUERY_PREVIEW_CHARS),
            max_iterations: record.max_iterations,
        });

        let notes_before = record.notes.len();

        while record.iteration < record.max_iterations {
            // The first step is unconditional: there are no notes to
            // assess yet. After that the evaluator (or the folded
            // needs_more flag) gates each pass.
            if record.iteration > 0 {
                let wants_more = match evaluator {
                    Some(e) => e.assess(record),
                    None => record.needs_more,
                };
                if !wants_more {
                    break;
                }
            }

            self.emit(ProgressEvent::StepStart {
                iteration: record.iteration + 1,
                max_iterations: record.max_iterations,
            });

            let output = self.produce_step(producer, record).await?;
            let notes_added = output.notes.len();
            record.notes.extend(output.notes);
            record.needs_more = output.needs_more;
            record.iteration += 1;

            self.emit(ProgressEvent::StepEnd {
                iteration: record.iteration,
                notes_added,
                needs_more: record.needs_more,
            });
        }

        if record.iteration >= record.max_iterations && record.needs_more {
            self.emit(ProgressEvent::CapReached {
                max_iterations: record.max_iterations,
            });
            if self.config.cap_policy == CapPolicy::ForceFalse {
                record.needs_more = false;
            }
        }

        // Finalization runs exactly once, whatever stopped the loop.
        let (final_output, fallback_used) = match finalizer.finalize(record).await {
            Ok(output) => (output, false),
            Err(e) => {
                tracing::warn!("Finalization failed: {e}; substituting fallback note");
                self.emit(ProgressEvent::FallbackUsed);
                (FALLBACK_FINAL_NOTE.to_string(), true)
            }
        };
        record.final_output = Some(final_output.clone());

        // Persist the snapshot: merge this session's update, then
        // overwrite the whole document.
        if let Some(ref store) = self.store {
            for (key, value) in snapshot_update(record, &final_output) {
                record.memory.insert(key, value);
            }
            store.save(&record.memory)?;
        }

        // Notes sink is best-effort: a failed write never aborts the run.
        if let Some(ref sink) = self.sink {
            if let Err(e) = sink.append(&final_output) {
                tracing::warn!("Notes sink write failed (ignored): {e}");
            }
        }

        self.emit(ProgressEvent::Complete {
            iterations: record.iteration,
            notes_total: record.notes.len(),
            fallback_used,
        });

        Ok(RunReport {
            final_output,
            iterations: record.iteration,
            notes_appended: record.notes.len() - notes_before,
            fallback_used,
        })
    }

    /// Invoke the producer under the caller-supplied step timeout.
    async fn produce_step(
        &self,
        producer: &dyn Producer,
        record: &SessionRecord,
    ) -> Result<ProducerOutput, DistillError> {
        match self.config.step_timeout {
            Some(limit) => tokio::time::timeout(limit, producer.produce(record))
                .await
                .map_err(|_| DistillError::Producer {
                    message: format!("step timed out after {}s", limit.as_secs()),
                })?,
            None => producer.produce(record).await,
        }
    }
}

/// Session fields persisted into the memory snapshot at finalization.
fn snapshot_update(record: &SessionRecord, final_output: &str) -> [(String, MemoryValue); 4] {
    [
        (
            "last_query".into(),
            MemoryValue::Text(record.query.clone()),
        ),
        (
            "last_notes".into(),
            MemoryValue::List(record.notes.clone()),
        ),
        (
            "iterations".into(),
            MemoryValue::Text(record.iteration.to_string()),
        ),
        (
            "final_note".into(),
            MemoryValue::Text(final_output.to_string()),
        ),
    ]
}
