// src/core/types.rs — Core domain types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

/// Whole-document memory snapshot: string keys mapped to strings or
/// lists of strings. BTreeMap keeps serialization order deterministic,
/// so an untouched load/save cycle is byte-stable.
pub type MemorySnapshot = BTreeMap<String, MemoryValue>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MemoryValue {
    Text(String),
    List(Vec<String>),
}

/// The mutable state threaded through one refinement session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionRecord {
    pub id: String,
    /// Immutable for the life of a run.
    pub query: String,
    /// Append-only within a run; grows by one delta per producer step.
    pub notes: Vec<String>,
    /// Number of committed producer steps.
    pub iteration: u32,
    /// Iteration cap, fixed at session start. Must be >= 1.
    pub max_iterations: u32,
    pub needs_more: bool,
    /// Set exactly once, during finalization.
    pub final_output: Option<String>,
    /// Persisted snapshot, seeded from the store and updated at finalization.
    pub memory: MemorySnapshot,
    pub created_at: DateTime<Utc>,
}

impl SessionRecord {
    pub fn new(query: impl Into<String>, max_iterations: u32) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            query: query.into(),
            notes: Vec::new(),
            iteration: 0,
            max_iterations,
            needs_more: false,
            final_output: None,
            memory: MemorySnapshot::new(),
            created_at: Utc::now(),
        }
    }

    /// Seed the persisted snapshot (builder form for the initial-record path).
    pub fn with_memory(mut self, memory: MemorySnapshot) -> Self {
        self.memory = memory;
        self
    }
}

/// What happens to the needs_more flag when the iteration cap, rather
/// than the evaluator, stops the loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CapPolicy {
    /// The cap is absolute: force needs_more to false.
    ForceFalse,
    /// Stop looping but leave the flag as the producer set it.
    Preserve,
}

/// Configuration for the refinement controller.
#[derive(Debug, Clone)]
pub struct ControllerConfig {
    pub cap_policy: CapPolicy,
    /// Caller-supplied timeout around each producer step. Timeout is
    /// treated as a producer failure. None disables the wrapper.
    pub step_timeout: Option<Duration>,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            cap_policy: CapPolicy::ForceFalse,
            step_timeout: Some(Duration::from_secs(120)),
        }
    }
}

impl From<&crate::infra::config::SessionConfig> for ControllerConfig {
    fn from(cfg: &crate::infra::config::SessionConfig) -> Self {
        Self {
            cap_policy: cfg.cap_policy,
            step_timeout: match cfg.step_timeout_seconds {
                0 => None,
                secs => Some(Duration::from_secs(secs)),
            },
        }
    }
}

/// Summary returned to the caller after a completed run.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub final_output: String,
    pub iterations: u32,
    pub notes_appended: usize,
    pub fallback_used: bool,
}

/// Lifecycle events for real-time progress rendering.
#[derive(Debug, Clone)]
pub enum ProgressEvent {
    SessionStart {
        query_preview: String,
        max_iterations: u32,
    },
    StepStart {
        iteration: u32,
        max_iterations: u32,
    },
    StepEnd {
        iteration: u32,
        notes_added: usize,
        needs_more: bool,
    },
    CapReached {
        max_iterations: u32,
    },
    FallbackUsed,
    Complete {
        iterations: u32,
        notes_total: usize,
        fallback_used: bool,
    },
}
