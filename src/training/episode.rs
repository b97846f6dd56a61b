//! Episode driver and multi-episode trainer.
//!
//! An episode starts from an empty board. The environment places two tiles,
//! then the player and the environment alternate until the player has no
//! legal slide.
//!
//! [`Trainer`] plays episodes back to back and logs a [`BlockStats`] summary
//! every `block` episodes:
//!
//! ```text
//! 1000    avg = 1523, max = 4807, ops = 412385
//!         89      100%    (0.4%)
//!         144     99.6%   (11.2%)
//!         233     88.4%   (52.1%)
//!         377     36.3%   (36.3%)
//! ```
//!
//! Each rank line gives the tile value, the share of episodes that reached
//! it, and the share that ended with it as their largest tile.

use std::fmt;
use std::time::{Duration, Instant};

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::agents::{Agent, RandomEnvironment, TdPlayer};
use crate::core::{Action, Board, Codec, TrainConfig, Variant};
use crate::error::Result;
use crate::ntuple::SamplingPlan;

/// Tiles the environment places before the first slide.
pub const INITIAL_TILES: usize = 2;

/// Outcome of one episode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpisodeSummary {
    /// Sum of slide rewards.
    pub score: u64,
    /// Slides played.
    pub moves: usize,
    /// Largest rank on the final board.
    pub max_rank: u8,
    /// Final board.
    pub board: Board,
}

/// Play one episode to completion.
///
/// Both agents see `open_episode` before the first ply and
/// `close_episode` after the last.
pub fn play_episode<P, E>(player: &mut P, env: &mut E, variant: Variant) -> EpisodeSummary
where
    P: Agent + ?Sized,
    E: Agent + ?Sized,
{
    let mut board = Board::default();
    let mut summary = EpisodeSummary::default();

    player.open_episode();
    env.open_episode();

    for _ in 0..INITIAL_TILES {
        place(env, &mut board, variant);
    }

    loop {
        let action = player.take_action(&board);
        if action.is_none() {
            break;
        }
        let Some(reward) = action.apply(&mut board, variant) else {
            log::warn!("{} returned an illegal action {action:?}; ending episode", player.name());
            break;
        };
        summary.score += reward;
        summary.moves += 1;

        if !place(env, &mut board, variant) {
            break;
        }
    }

    player.close_episode();
    env.close_episode();

    summary.max_rank = board.max_rank();
    summary.board = board;
    log::debug!(
        "episode finished: score {}, {} moves, max rank {}",
        summary.score,
        summary.moves,
        summary.max_rank
    );
    summary
}

/// Let `env` act once. Returns whether a tile was placed.
fn place<E: Agent + ?Sized>(env: &mut E, board: &mut Board, variant: Variant) -> bool {
    match env.take_action(board) {
        Action::None => false,
        action => action.apply(board, variant).is_some(),
    }
}

/// Aggregate results over a block of episodes.
#[derive(Clone, Debug)]
pub struct BlockStats {
    /// Episodes completed before this block ended, including it.
    pub completed: usize,
    pub episodes: usize,
    pub total_score: u64,
    pub max_score: u64,
    pub total_moves: usize,
    pub elapsed: Duration,
    /// Episodes by the largest rank on their final board.
    pub final_ranks: FxHashMap<u8, usize>,
    codec: Codec,
}

impl BlockStats {
    pub fn new(codec: Codec) -> Self {
        Self {
            completed: 0,
            episodes: 0,
            total_score: 0,
            max_score: 0,
            total_moves: 0,
            elapsed: Duration::ZERO,
            final_ranks: FxHashMap::default(),
            codec,
        }
    }

    pub fn record(&mut self, summary: &EpisodeSummary) {
        self.episodes += 1;
        self.total_score += summary.score;
        self.max_score = self.max_score.max(summary.score);
        self.total_moves += summary.moves;
        *self.final_ranks.entry(summary.max_rank).or_insert(0) += 1;
    }

    #[must_use]
    pub fn mean_score(&self) -> f64 {
        if self.episodes == 0 {
            return 0.0;
        }
        self.total_score as f64 / self.episodes as f64
    }

    /// Share of episodes whose largest tile was at least `rank`.
    #[must_use]
    pub fn reach_rate(&self, rank: u8) -> f64 {
        if self.episodes == 0 {
            return 0.0;
        }
        let reached: usize = self
            .final_ranks
            .iter()
            .filter(|(&r, _)| r >= rank)
            .map(|(_, &count)| count)
            .sum();
        reached as f64 / self.episodes as f64
    }

    /// Share of episodes whose largest tile was exactly `rank`.
    #[must_use]
    pub fn end_rate(&self, rank: u8) -> f64 {
        if self.episodes == 0 {
            return 0.0;
        }
        self.final_ranks.get(&rank).copied().unwrap_or(0) as f64 / self.episodes as f64
    }

    /// Slides per second.
    #[must_use]
    pub fn ops(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.total_moves as f64 / secs
        } else {
            0.0
        }
    }
}

impl fmt::Display for BlockStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\tavg = {:.0}, max = {}, ops = {:.0}",
            self.completed,
            self.mean_score(),
            self.max_score,
            self.ops()
        )?;

        let mut ranks: Vec<u8> = self.final_ranks.keys().copied().collect();
        ranks.sort_unstable();
        for rank in ranks {
            write!(
                f,
                "\n\t{}\t{}%\t({}%)",
                self.codec.displayed_value(rank),
                round1(self.reach_rate(rank) * 100.0),
                round1(self.end_rate(rank) * 100.0)
            )?;
        }
        Ok(())
    }
}

fn round1(percent: f64) -> f64 {
    (percent * 10.0).round() / 10.0
}

/// Plays episodes and reports block statistics.
#[derive(Debug)]
pub struct Trainer {
    variant: Variant,
    block: usize,
    completed: usize,
    current: BlockStats,
    started: Instant,
}

impl Trainer {
    /// `block` is clamped to at least 1.
    pub fn new(variant: Variant, block: usize) -> Self {
        Self {
            variant,
            block: block.max(1),
            completed: 0,
            current: BlockStats::new(variant.codec()),
            started: Instant::now(),
        }
    }

    pub fn from_config(config: &TrainConfig) -> Self {
        Self::new(config.variant, config.block)
    }

    #[must_use]
    pub fn completed(&self) -> usize {
        self.completed
    }

    /// Play one episode. Returns the block summary when this episode
    /// completed a block.
    pub fn run_episode<P, E>(&mut self, player: &mut P, env: &mut E) -> (EpisodeSummary, Option<BlockStats>)
    where
        P: Agent + ?Sized,
        E: Agent + ?Sized,
    {
        let summary = play_episode(player, env, self.variant);
        self.completed += 1;
        self.current.record(&summary);

        if self.current.episodes < self.block {
            return (summary, None);
        }

        let mut stats = std::mem::replace(&mut self.current, BlockStats::new(self.variant.codec()));
        stats.completed = self.completed;
        stats.elapsed = self.started.elapsed();
        self.started = Instant::now();
        log::info!("{stats}");
        (summary, Some(stats))
    }

    /// Play `episodes` episodes and return every completed block.
    pub fn run<P, E>(&mut self, player: &mut P, env: &mut E, episodes: usize) -> Vec<BlockStats>
    where
        P: Agent + ?Sized,
        E: Agent + ?Sized,
    {
        (0..episodes)
            .filter_map(|_| self.run_episode(player, env).1)
            .collect()
    }
}

/// Run a full training session described by `config`.
///
/// Builds the player and the environment from `config.agent`, plays every
/// episode, and returns the block summaries. When a save path is configured
/// the weights are written at the end, and a failed write is returned as
/// [`Error::Persist`](crate::Error::Persist).
pub fn train(config: &TrainConfig) -> Result<Vec<BlockStats>> {
    config.validate()?;

    let plan = SamplingPlan::from_preset(config.plan);
    let mut player = TdPlayer::from_config(&config.agent, plan, config.alphabet, config.variant)?;
    let mut env = RandomEnvironment::from_config(&config.agent);

    log::info!(
        "training {} episodes ({:?}, {:?} tables, alphabet {})",
        config.episodes,
        config.variant,
        config.plan,
        config.alphabet
    );
    let mut trainer = Trainer::from_config(config);
    let blocks = trainer.run(&mut player, &mut env, config.episodes);

    player.commit_weights()?;
    Ok(blocks)
}
