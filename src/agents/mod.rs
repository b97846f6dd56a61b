//! Agents that act on a board.
//!
//! ## Overview
//!
//! - **Agent**: the trait every participant implements
//! - **RandomEnvironment**: places a random tile after each slide
//! - **TdPlayer**: greedy over network value, learns by backward TD(0)
//! - **HeuristicPlayer**: greedy over a hand-written board score
//!
//! ## Usage
//!
//! ```
//! use rust_2584::agents::{Agent, RandomEnvironment};
//! use rust_2584::core::{Action, Board};
//!
//! let mut env = RandomEnvironment::new(42);
//! let action = env.take_action(&Board::default());
//! assert!(matches!(action, Action::Place { .. }));
//! ```

pub mod environment;
pub mod heuristic;
pub mod td_player;

pub use environment::RandomEnvironment;
pub use heuristic::{HeuristicPlayer, DEFAULT_COEFFICIENTS};
pub use td_player::TdPlayer;

use crate::core::{Action, Board};

/// A participant in an episode.
///
/// The episode driver calls `open_episode` once, then `take_action` for
/// every ply the agent owns, then `close_episode` once.
pub trait Agent {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Called before the first ply of an episode.
    fn open_episode(&mut self) {}

    /// Called after the last ply of an episode.
    fn close_episode(&mut self) {}

    /// Decide what to do on `board`.
    ///
    /// Returns [`Action::None`] when nothing legal is possible.
    fn take_action(&mut self, board: &Board) -> Action;
}
