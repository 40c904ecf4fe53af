// src/infra/config.rs — Configuration loading (TOML)

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::core::types::CapPolicy;
use crate::infra::paths;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub session: SessionConfig,

    #[serde(default)]
    pub models: ModelsConfig,

    #[serde(default)]
    pub provider: ProviderConfig,

    #[serde(default)]
    pub memory: MemoryConfig,

    #[serde(default)]
    pub notes: NotesConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Iteration cap for a refinement session. The CLI `-i` flag overrides it.
    pub max_iterations: u32,
    /// What happens to the needs_more flag when the cap stops the loop.
    pub cap_policy: CapPolicy,
    /// Per-producer-step timeout. 0 disables the wrapper.
    pub step_timeout_seconds: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_iterations: 3,
            cap_policy: CapPolicy::ForceFalse,
            step_timeout_seconds: 120,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelsConfig {
    /// Model running the research steps (provider/model format).
    pub researcher: String,
    /// Model consolidating notes into the final note.
    pub writer: String,
}

impl Default for ModelsConfig {
    fn default() -> Self {
        Self {
            researcher: "groq/llama-3.3-70b-versatile".into(),
            writer: "groq/llama-3.1-8b-instant".into(),
        }
    }
}

/// Optional custom OpenAI-compatible endpoint. When base_url is unset,
/// the provider is discovered from well-known environment variables.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub base_url: Option<String>,
    /// Environment variable holding the API key for the custom endpoint.
    pub api_key_env: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemoryConfig {
    /// Override for the memory snapshot location (defaults to the data dir).
    pub path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotesConfig {
    /// Notepad file the final note is appended to when saving is enabled.
    pub path: String,
}

impl Default for NotesConfig {
    fn default() -> Self {
        Self {
            path: "research-notes.txt".into(),
        }
    }
}

impl Config {
    /// Load config from file, falling back to defaults.
    pub fn load() -> anyhow::Result<Self> {
        let path = paths::config_file_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}
