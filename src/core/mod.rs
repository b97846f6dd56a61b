//! Core game types: tile codec, board engine, actions, RNG, configuration.
//!
//! Nothing here knows about n-tuple networks or learning; the `ntuple` and
//! `agents` modules build on top of it.

pub mod tile;
pub mod board;
pub mod action;
pub mod rng;
pub mod config;

pub use tile::{Codec, MAX_RANK};
pub use board::{Board, BoardView, Direction, MergeRule, Symmetry, Variant, CELLS, ILLEGAL_REWARD};
pub use action::Action;
pub use rng::{GameRng, GameRngState};
pub use config::{AgentConfig, PlanPreset, TrainConfig, DEFAULT_ALPHA, DEFAULT_ALPHABET};
