// src/infra/errors.rs — Error types for distill

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DistillError {
    // Configuration errors (fatal, surfaced before any step runs)
    #[error("Invalid configuration: max_iterations must be >= 1 (got {max_iterations})")]
    InvalidConfiguration { max_iterations: u32 },

    // Step errors
    #[error("Producer step failed: {message}")]
    Producer { message: String },

    #[error("Finalizer step failed: {message}")]
    Finalizer { message: String },

    // Collaborators
    #[error("Provider '{provider}' error: {message}")]
    Provider { provider: String, message: String },

    #[error("No provider configured. Set GROQ_API_KEY or OPENAI_API_KEY, or add a [provider] section to config.toml.")]
    NoProvider,

    // Infra
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DistillError {
    /// Wrap any failure inside a producer step.
    pub fn producer(message: impl Into<String>) -> Self {
        Self::Producer {
            message: message.into(),
        }
    }

    /// Wrap any failure inside a finalizer step.
    pub fn finalizer(message: impl Into<String>) -> Self {
        Self::Finalizer {
            message: message.into(),
        }
    }
}
