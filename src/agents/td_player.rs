//! Afterstate TD(0) player.
//!
//! On each ply the player simulates the four slides, scores each legal
//! afterstate as `reward + value(afterstate)`, plays the best one and records
//! it. When the episode closes, the recorded afterstates are replayed
//! backward through [`backward_td0`] and forgotten.

use std::path::{Path, PathBuf};

use crate::core::{Action, AgentConfig, Board, Direction, Variant};
use crate::error::{PersistError, Result};
use crate::ntuple::{NTupleNetwork, SamplingPlan};
use crate::training::{backward_td0, Afterstate, Trajectory};

use super::Agent;

/// Learning player backed by an n-tuple network.
#[derive(Debug)]
pub struct TdPlayer {
    network: NTupleNetwork,
    trajectory: Trajectory,
    alpha: f32,
    variant: Variant,
    save: Option<PathBuf>,
}

impl TdPlayer {
    /// A player with the given network and no weight file.
    pub fn new(network: NTupleNetwork, alpha: f32, variant: Variant) -> Self {
        Self {
            network,
            trajectory: Trajectory::new(),
            alpha,
            variant,
            save: None,
        }
    }

    /// Build the network for `plan` and apply `config`.
    ///
    /// Loads weights when `config.load` is set. Fails on an invalid config
    /// or an unreadable weight file.
    pub fn from_config(
        config: &AgentConfig,
        plan: SamplingPlan,
        alphabet: usize,
        variant: Variant,
    ) -> Result<Self> {
        config.validate()?;

        let mut network = NTupleNetwork::try_new(plan, alphabet)?;
        if let Some(path) = &config.load {
            network = network.with_weights_from(path, config.init_if_missing)?;
        }
        log::debug!(
            "td player: {} tables, {} samples, alphabet {alphabet}, alpha {}",
            network.table_count(),
            network.plan().len(),
            config.alpha
        );

        let mut player = Self::new(network, config.alpha, variant);
        player.save = config.save.clone();
        Ok(player)
    }

    /// Write weights to `path` when the player is dropped.
    #[must_use]
    pub fn with_save_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.save = Some(path.into());
        self
    }

    #[must_use]
    pub fn network(&self) -> &NTupleNetwork {
        &self.network
    }

    pub fn network_mut(&mut self) -> &mut NTupleNetwork {
        &mut self.network
    }

    #[must_use]
    pub fn trajectory(&self) -> &Trajectory {
        &self.trajectory
    }

    #[must_use]
    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    #[must_use]
    pub fn variant(&self) -> Variant {
        self.variant
    }

    #[must_use]
    pub fn save_path(&self) -> Option<&Path> {
        self.save.as_deref()
    }

    /// Write the weights to the configured save path, if any.
    pub fn save_weights(&self) -> std::result::Result<(), PersistError> {
        match &self.save {
            Some(path) => self.network.save(path),
            None => Ok(()),
        }
    }

    /// Save to the configured path now and stop saving on drop.
    ///
    /// The path is released even when the save fails, so the error is
    /// reported here once and not logged again on drop.
    pub fn commit_weights(&mut self) -> std::result::Result<(), PersistError> {
        match self.save.take() {
            Some(path) => self.network.save(path),
            None => Ok(()),
        }
    }

    /// Best legal slide on `board` as `(direction, afterstate)`.
    ///
    /// Ties keep the earliest direction in Up, Right, Down, Left order.
    #[must_use]
    pub fn best_move(&self, board: &Board) -> Option<(Direction, Afterstate)> {
        let mut best: Option<(Direction, Afterstate, f32)> = None;
        for direction in Direction::ALL {
            let Some((after, reward)) = board.after(direction, self.variant) else {
                continue;
            };
            let value = self.network.value(&after);
            let candidate = value + reward as f32;
            if best.as_ref().map_or(true, |&(_, _, score)| candidate > score) {
                best = Some((direction, Afterstate::new(after, reward, value), candidate));
            }
        }
        best.map(|(direction, step, _)| (direction, step))
    }
}

impl Agent for TdPlayer {
    fn name(&self) -> &str {
        "td"
    }

    fn open_episode(&mut self) {
        self.trajectory.clear();
    }

    fn close_episode(&mut self) {
        backward_td0(&mut self.network, &mut self.trajectory, self.alpha);
        self.trajectory.clear();
    }

    fn take_action(&mut self, board: &Board) -> Action {
        match self.best_move(board) {
            Some((direction, step)) => {
                self.trajectory.push(step);
                Action::Slide(direction)
            }
            None => {
                self.trajectory.push(Afterstate::terminal());
                Action::None
            }
        }
    }
}

impl Drop for TdPlayer {
    fn drop(&mut self) {
        if let Err(err) = self.save_weights() {
            log::error!("could not save weights: {err}");
        }
    }
}
