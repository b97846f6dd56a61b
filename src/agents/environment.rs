//! The stochastic side of the game: new tiles.

use crate::core::{Action, AgentConfig, Board, GameRng, CELLS};

use super::Agent;

/// Probability that a new tile has rank 1 rather than rank 2.
pub const RANK_ONE_PROBABILITY: f64 = 0.9;

/// Places one tile on a uniformly chosen empty cell.
#[derive(Clone, Debug)]
pub struct RandomEnvironment {
    rng: GameRng,
}

impl RandomEnvironment {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: GameRng::new(seed),
        }
    }

    /// Seeded from `config.seed`, or from entropy when unset.
    pub fn from_config(config: &AgentConfig) -> Self {
        Self::with_rng(GameRng::from_seed_option(config.seed))
    }

    pub fn with_rng(rng: GameRng) -> Self {
        Self { rng }
    }

    #[must_use]
    pub fn rng(&self) -> &GameRng {
        &self.rng
    }

    /// Choose a cell and rank for a new tile, or `None` if the board is full.
    ///
    /// The cell is the first empty one in a fresh shuffle of all 16
    /// positions. The board itself is not modified.
    pub fn place_random_tile(&mut self, board: &Board) -> Option<(usize, u8)> {
        let mut cells: [usize; CELLS] = std::array::from_fn(|i| i);
        self.rng.shuffle(&mut cells);

        let cell = cells.into_iter().find(|&cell| board.get(cell) == 0)?;
        let rank = if self.rng.gen_bool(RANK_ONE_PROBABILITY) { 1 } else { 2 };
        Some((cell, rank))
    }
}

impl Agent for RandomEnvironment {
    fn name(&self) -> &str {
        "random"
    }

    fn take_action(&mut self, board: &Board) -> Action {
        match self.place_random_tile(board) {
            Some((cell, rank)) => Action::Place { cell, rank },
            None => Action::None,
        }
    }
}
