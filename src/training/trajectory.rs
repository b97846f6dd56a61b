//! Afterstate trajectory of one episode.
//!
//! The player records one entry per decision:
//! - The afterstate it chose (board after the slide, before the new tile)
//! - The reward the slide earned
//! - The network's value of that afterstate when it was chosen
//!
//! When the player had no legal move the entry is [`Afterstate::terminal`].

use serde::{Deserialize, Serialize};

use crate::core::Board;

/// A single recorded decision.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Afterstate {
    /// Board after the slide.
    pub after: Board,

    /// Score earned by the slide.
    pub reward: u64,

    /// Value estimate; refreshed during the backward pass.
    pub value: f32,
}

impl Afterstate {
    pub fn new(after: Board, reward: u64, value: f32) -> Self {
        Self { after, reward, value }
    }

    /// The zero record written when no move was possible.
    pub fn terminal() -> Self {
        Self::default()
    }
}

/// All decisions of one episode, oldest first.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Trajectory {
    steps: Vec<Afterstate>,
}

impl Trajectory {
    /// Typical episodes run to a few thousand plies.
    const INITIAL_CAPACITY: usize = 4096;

    pub fn new() -> Self {
        Self {
            steps: Vec::with_capacity(Self::INITIAL_CAPACITY),
        }
    }

    pub fn push(&mut self, step: Afterstate) {
        self.steps.push(step);
    }

    pub fn clear(&mut self) {
        self.steps.clear();
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn steps(&self) -> &[Afterstate] {
        &self.steps
    }

    pub fn steps_mut(&mut self) -> &mut [Afterstate] {
        &mut self.steps
    }

    pub fn last(&self) -> Option<&Afterstate> {
        self.steps.last()
    }

    /// Sum of all rewards, i.e. the episode score.
    pub fn total_reward(&self) -> u64 {
        self.steps.iter().map(|s| s.reward).sum()
    }
}

impl FromIterator<Afterstate> for Trajectory {
    fn from_iter<I: IntoIterator<Item = Afterstate>>(iter: I) -> Self {
        Self {
            steps: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_with(rank: u8) -> Board {
        Board::from_ranks([[rank, 0, 0, 0], [0; 4], [0; 4], [0; 4]])
    }

    #[test]
    fn test_trajectory_push() {
        let mut traj = Trajectory::new();
        assert!(traj.is_empty());

        traj.push(Afterstate::new(board_with(1), 0, 0.5));
        traj.push(Afterstate::new(board_with(2), 2, 0.25));

        assert_eq!(traj.len(), 2);
        assert_eq!(traj.total_reward(), 2);
        assert_eq!(traj.last().unwrap().after, board_with(2));
    }

    #[test]
    fn test_terminal_record_is_zero() {
        let terminal = Afterstate::terminal();
        assert_eq!(terminal.after, Board::default());
        assert_eq!(terminal.reward, 0);
        assert_eq!(terminal.value, 0.0);
    }

    #[test]
    fn test_clear() {
        let mut traj: Trajectory = (0..3).map(|r| Afterstate::new(board_with(r), 1, 0.0)).collect();
        assert_eq!(traj.len(), 3);

        traj.clear();
        assert!(traj.is_empty());
        assert_eq!(traj.total_reward(), 0);
    }

    #[test]
    fn test_steps_mut() {
        let mut traj: Trajectory = std::iter::once(Afterstate::new(board_with(1), 0, 1.0)).collect();
        traj.steps_mut()[0].value += 2.0;
        assert_eq!(traj.steps()[0].value, 3.0);
    }

    #[test]
    fn test_trajectory_serialization() {
        let traj: Trajectory = (1..3).map(|r| Afterstate::new(board_with(r), 3, 0.5)).collect();

        let json = serde_json::to_string(&traj).unwrap();
        let deserialized: Trajectory = serde_json::from_str(&json).unwrap();

        assert_eq!(deserialized.steps(), traj.steps());
    }
}
