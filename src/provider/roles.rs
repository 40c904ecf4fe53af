// src/provider/roles.rs — Role-based model assignment

use super::ModelRef;
use crate::infra::config::ModelsConfig;

/// Assigns models to the two roles in the refinement pipeline. The
/// researcher carries the heavy lifting; the writer can be a smaller,
/// faster model.
#[derive(Debug, Clone)]
pub struct RoleModels {
    pub researcher: ModelRef,
    pub writer: ModelRef,
}

impl RoleModels {
    /// Use the same model for both roles (the `-m` override path).
    pub fn from_single(model: ModelRef) -> Self {
        Self {
            researcher: model.clone(),
            writer: model,
        }
    }

    /// Build from config, treating a bare model name as a Groq model.
    pub fn from_config(cfg: &ModelsConfig) -> Self {
        Self {
            researcher: parse_or_groq(&cfg.researcher),
            writer: parse_or_groq(&cfg.writer),
        }
    }

    /// Resolve the effective roles: an explicit override wins over config.
    pub fn resolve(cfg: &ModelsConfig, override_model: Option<&str>) -> Self {
        match override_model {
            Some(m) => Self::from_single(parse_or_groq(m)),
            None => Self::from_config(cfg),
        }
    }
}

fn parse_or_groq(s: &str) -> ModelRef {
    ModelRef::parse(s).unwrap_or_else(|| ModelRef::new("groq", s))
}
