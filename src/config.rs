use std::path::Path;

use crate::error::ConfigError;

/// Whether the search may immediately undo the move that produced a state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReversalPolicy {
    /// Skip the direction opposite to the previous move.
    #[default]
    Forbid,
    /// Generate all in-bounds directions.
    Allow,
}

/// Solver configuration loaded from TOML.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct SolverConfig {
    /// Maximum number of state expansions before giving up.
    #[serde(default = "default_max_steps")]
    pub max_steps: u32,

    /// Pruning applied during neighbour generation.
    #[serde(default)]
    pub reversal_policy: ReversalPolicy,
}

fn default_max_steps() -> u32 {
    200_000
}

impl SolverConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&contents)?;
        tracing::info!(path = %path.display(), max_steps = config.max_steps, "Loaded solver config");
        Ok(config)
    }

    /// Log a warning for settings that make every search fail.
    pub fn validate(&self) {
        if self.max_steps == 0 {
            tracing::warn!("max_steps = 0; only boards that are already solved will be reported as solved");
        }
    }
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_steps: default_max_steps(),
            reversal_policy: ReversalPolicy::default(),
        }
    }
}
