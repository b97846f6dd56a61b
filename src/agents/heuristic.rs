//! Greedy player over a hand-written board score.
//!
//! Each legal slide is judged by looking one more slide ahead. Every peek
//! board is scored in all four rotations as
//!
//! ```text
//! sum(coef[r + c] * rank[r][c]) + 10 * peek_reward + 15 * empty_cells
//! ```
//!
//! and the slide's estimate is the best of those scores. The coefficients
//! favor large ranks gathered in one corner. A peek that is itself illegal
//! is scored on the unchanged board with the illegal-move reward of `-1`.

use crate::core::{Action, Board, Direction, Variant};

use super::Agent;

/// Corner-gradient coefficients indexed by `row + col`.
pub const DEFAULT_COEFFICIENTS: [i64; 7] = [64, 32, 16, 8, 4, 2, 1];

const REWARD_WEIGHT: i64 = 10;
const EMPTY_WEIGHT: i64 = 15;

/// One-ply greedy player with a one-ply peek.
#[derive(Clone, Debug)]
pub struct HeuristicPlayer {
    coefficients: [i64; 7],
    variant: Variant,
}

impl HeuristicPlayer {
    pub fn new(variant: Variant) -> Self {
        Self {
            coefficients: DEFAULT_COEFFICIENTS,
            variant,
        }
    }

    #[must_use]
    pub fn with_coefficients(mut self, coefficients: [i64; 7]) -> Self {
        self.coefficients = coefficients;
        self
    }

    #[must_use]
    pub fn coefficients(&self) -> &[i64; 7] {
        &self.coefficients
    }

    /// Static score of `board` in its current orientation.
    #[must_use]
    pub fn board_score(&self, board: &Board) -> i64 {
        let mut score = 0;
        for (r, row) in board.ranks().iter().enumerate() {
            for (c, &rank) in row.iter().enumerate() {
                score += self.coefficients[r + c] * i64::from(rank);
            }
        }
        score + EMPTY_WEIGHT * board.count_empty() as i64
    }

    /// Estimate for sliding `board` in `direction`, or `None` if illegal.
    #[must_use]
    pub fn estimate(&self, board: &Board, direction: Direction) -> Option<i64> {
        let (after, _) = board.after(direction, self.variant)?;

        let mut best = i64::MIN;
        for peek in Direction::ALL {
            let mut peeked = after;
            let reward = peeked.slide_signed(peek, self.variant);
            for turns in 0..4 {
                let mut rotated = peeked;
                rotated.rotate(turns);
                best = best.max(self.board_score(&rotated) + REWARD_WEIGHT * reward);
            }
        }
        Some(best)
    }
}

impl Default for HeuristicPlayer {
    fn default() -> Self {
        Self::new(Variant::default())
    }
}

impl Agent for HeuristicPlayer {
    fn name(&self) -> &str {
        "heuristic"
    }

    fn take_action(&mut self, board: &Board) -> Action {
        let mut best: Option<(Direction, i64)> = None;
        for direction in Direction::ALL {
            let Some(estimate) = self.estimate(board, direction) else {
                continue;
            };
            if best.map_or(true, |(_, score)| estimate > score) {
                best = Some((direction, estimate));
            }
        }
        best.map_or(Action::None, |(direction, _)| Action::Slide(direction))
    }
}
