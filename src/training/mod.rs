//! Learning and episode infrastructure.
//!
//! ## Overview
//!
//! - **Trajectory**: the afterstates a player chose during one episode
//! - **TD(0)**: the backward pass that turns a trajectory into weight updates
//! - **Episode**: the player/environment loop, and a `Trainer` that runs many
//!   episodes and logs block statistics
//!
//! ## Usage
//!
//! ```no_run
//! use rust_2584::core::{AgentConfig, TrainConfig};
//! use rust_2584::training::train;
//!
//! let config = TrainConfig::default()
//!     .with_episodes(10_000)
//!     .with_agent(AgentConfig::default().with_save("weights.bin"));
//!
//! let blocks = train(&config)?;
//! println!("{}", blocks.last().map(|b| b.mean_score()).unwrap_or(0.0));
//! # Ok::<(), rust_2584::error::Error>(())
//! ```

pub mod episode;
pub mod td;
pub mod trajectory;

pub use episode::{play_episode, train, BlockStats, EpisodeSummary, Trainer, INITIAL_TILES};
pub use td::backward_td0;
pub use trajectory::{Afterstate, Trajectory};
