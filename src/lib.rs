//! # rust-2584
//!
//! A 2048 / Fibonacci-2584 board engine with an n-tuple network value
//! function trained online by backward TD(0).
//!
//! ## Design Principles
//!
//! 1. **Explicit Rules**: The merge rule and tile sequence come from a
//!    `Variant` passed to every move. Nothing assumes one game.
//!
//! 2. **Value Types**: A `Board` is a 16-byte `Copy` value. Candidate moves are
//!    simulated on copies.
//!
//! 3. **Owned State**: Each agent owns its RNG or its network. There are no
//!    global tables beyond the compile-time codecs.
//!
//! ## Architecture
//!
//! - **Afterstate Learning**: The player values the board after its slide and
//!   before the random tile. One record per ply, replayed backward at the end
//!   of the episode.
//!
//! - **Symmetric Sampling**: Each tuple shape is read under several board
//!   symmetries into one shared weight table.
//!
//! ## Modules
//!
//! - `core`: Board engine, tile codecs, actions, RNG, configuration
//! - `ntuple`: Tuple shapes, sampling plans, the network and its weight files
//! - `agents`: Agent trait, random environment, TD player, heuristic player
//! - `training`: Trajectories, the TD(0) pass, episode driver and trainer
//! - `error`: Error types

pub mod core;
pub mod error;
pub mod ntuple;
pub mod agents;
pub mod training;

// Re-export commonly used types
pub use crate::core::{
    Action, AgentConfig, Board, Codec, Direction, GameRng, GameRngState, MergeRule, PlanPreset,
    Symmetry, TrainConfig, Variant,
};

pub use crate::ntuple::{NTupleNetwork, SamplingPlan, TupleShape, WeightTable};

pub use crate::agents::{Agent, HeuristicPlayer, RandomEnvironment, TdPlayer};

pub use crate::training::{
    backward_td0, play_episode, train, Afterstate, BlockStats, EpisodeSummary, Trainer, Trajectory,
};

pub use crate::error::{ConfigError, Error, PersistError, Result};
