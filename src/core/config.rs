//! Typed configuration for agents and training runs.
//!
//! - `AgentConfig`: learning rate, RNG seed and weight-file paths
//! - `TrainConfig`: episode count, reporting block, game variant and the
//!   n-tuple layout
//!
//! Both follow the same builder style and are checked with `validate()`
//! before use.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

use super::board::Variant;

/// Default TD(0) learning rate.
pub const DEFAULT_ALPHA: f32 = 0.0025;

/// Default number of distinct ranks a weight table can address.
pub const DEFAULT_ALPHABET: usize = 16;

/// Configuration shared by the player and environment agents.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// RNG seed. `None` seeds from entropy.
    pub seed: Option<u64>,

    /// TD(0) learning rate.
    pub alpha: f32,

    /// Weight file read at construction.
    pub load: Option<PathBuf>,

    /// Weight file written at teardown.
    pub save: Option<PathBuf>,

    /// Start from zero tables when `load` names a file that does not exist.
    /// Any other load failure is still an error.
    pub init_if_missing: bool,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            seed: None,
            alpha: DEFAULT_ALPHA,
            load: None,
            save: None,
            init_if_missing: false,
        }
    }
}

impl AgentConfig {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    #[must_use]
    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.alpha = alpha;
        self
    }

    #[must_use]
    pub fn with_load(mut self, path: impl Into<PathBuf>) -> Self {
        self.load = Some(path.into());
        self
    }

    #[must_use]
    pub fn with_save(mut self, path: impl Into<PathBuf>) -> Self {
        self.save = Some(path.into());
        self
    }

    #[must_use]
    pub fn init_if_missing(mut self) -> Self {
        self.init_if_missing = true;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.alpha.is_finite() && self.alpha > 0.0) {
            return Err(ConfigError::Validation(format!(
                "alpha must be a positive number, got {}",
                self.alpha
            )));
        }
        Ok(())
    }
}

/// Which set of tuple shapes the network samples.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlanPreset {
    /// Outer and inner rows under 4 rotations (8 samples).
    #[default]
    Rows,
    /// Rows plus outer/inner axes under all 8 symmetries (24 samples).
    RowsAndAxes,
    /// Rows plus outer and inner six-cell rectangles (20 samples).
    RowsAndSixes,
    /// Rows, axes and rectangles (36 samples).
    Full,
}

/// Configuration for a multi-episode training run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainConfig {
    /// Episodes to play.
    pub episodes: usize,

    /// Episodes per logged summary block.
    pub block: usize,

    /// Game rules.
    pub variant: Variant,

    /// Distinct ranks addressable by each weight table.
    pub alphabet: usize,

    /// Tuple layout.
    pub plan: PlanPreset,

    /// Player / environment settings.
    pub agent: AgentConfig,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            episodes: 1000,
            block: 1000,
            variant: Variant::Fibonacci,
            alphabet: DEFAULT_ALPHABET,
            plan: PlanPreset::Rows,
            agent: AgentConfig::default(),
        }
    }
}

impl TrainConfig {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_episodes(mut self, episodes: usize) -> Self {
        self.episodes = episodes;
        self
    }

    #[must_use]
    pub fn with_block(mut self, block: usize) -> Self {
        self.block = block;
        self
    }

    #[must_use]
    pub fn with_variant(mut self, variant: Variant) -> Self {
        self.variant = variant;
        self
    }

    #[must_use]
    pub fn with_alphabet(mut self, alphabet: usize) -> Self {
        self.alphabet = alphabet;
        self
    }

    #[must_use]
    pub fn with_plan(mut self, plan: PlanPreset) -> Self {
        self.plan = plan;
        self
    }

    #[must_use]
    pub fn with_agent(mut self, agent: AgentConfig) -> Self {
        self.agent = agent;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.block == 0 {
            return Err(ConfigError::Validation("block must be > 0".into()));
        }
        if self.alphabet < 2 {
            return Err(ConfigError::Validation(format!(
                "alphabet must be at least 2, got {}",
                self.alphabet
            )));
        }
        // Largest table is alphabet^6 entries.
        if self.alphabet.checked_pow(6).is_none() {
            return Err(ConfigError::Validation(format!(
                "alphabet {} is too large to address six-cell tables",
                self.alphabet
            )));
        }
        self.agent.validate()
    }
}
