//! Actions returned by agents.
//!
//! The player slides, the environment places a tile, and either may have
//! nothing to do:
//! - `Slide(direction)`: the player's move
//! - `Place { cell, rank }`: the environment's new tile
//! - `None`: no legal action (the episode ends)

use serde::{Deserialize, Serialize};

use super::board::{Board, Direction, Variant};

/// An agent's decision for one ply.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Slide every tile in a direction.
    Slide(Direction),
    /// Put a tile of `rank` on the empty `cell`.
    Place { cell: usize, rank: u8 },
    /// Nothing legal to do.
    #[default]
    None,
}

impl Action {
    #[must_use]
    pub fn is_none(&self) -> bool {
        matches!(self, Action::None)
    }

    /// Apply to `board`.
    ///
    /// Returns the reward, or `None` when the action is not legal on this
    /// board (an illegal slide, an occupied cell, or `Action::None`).
    pub fn apply(&self, board: &mut Board, variant: Variant) -> Option<u64> {
        match *self {
            Action::Slide(direction) => board.slide(direction, variant),
            Action::Place { cell, rank } => {
                if cell >= 16 || board.get(cell) != 0 || rank == 0 {
                    return None;
                }
                board.set(cell, rank);
                Some(0)
            }
            Action::None => None,
        }
    }
}
