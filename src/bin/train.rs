//! Train an n-tuple network by self-play, or benchmark the heuristic player.
//!
//! ```text
//! train --episodes 100000 --block 1000 --save weights.bin --load weights.bin --init-if-missing
//! train --heuristic --episodes 1000 --variant classic
//! ```
//!
//! Block summaries are logged at `info`; set `RUST_LOG` to change the level.

use std::error::Error;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use flexi_logger::{Duplicate, FileSpec, Logger};

use rust_2584::agents::{HeuristicPlayer, RandomEnvironment};
use rust_2584::core::{AgentConfig, PlanPreset, TrainConfig, Variant, DEFAULT_ALPHA, DEFAULT_ALPHABET};
use rust_2584::training::{train, Trainer};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum VariantArg {
    /// Adjacent Fibonacci ranks merge
    Fibonacci,
    /// Equal powers of two merge
    Classic,
}

impl From<VariantArg> for Variant {
    fn from(arg: VariantArg) -> Self {
        match arg {
            VariantArg::Fibonacci => Variant::Fibonacci,
            VariantArg::Classic => Variant::Classic,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum PlanArg {
    Rows,
    RowsAndAxes,
    RowsAndSixes,
    Full,
}

impl From<PlanArg> for PlanPreset {
    fn from(arg: PlanArg) -> Self {
        match arg {
            PlanArg::Rows => PlanPreset::Rows,
            PlanArg::RowsAndAxes => PlanPreset::RowsAndAxes,
            PlanArg::RowsAndSixes => PlanPreset::RowsAndSixes,
            PlanArg::Full => PlanPreset::Full,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "train", about = "Train a 2584 n-tuple network with TD(0)")]
struct Args {
    /// Episodes to play
    #[arg(short = 'n', long, default_value_t = 1000)]
    episodes: usize,

    /// Episodes per summary block
    #[arg(short, long, default_value_t = 1000)]
    block: usize,

    /// TD(0) learning rate
    #[arg(short, long, default_value_t = DEFAULT_ALPHA)]
    alpha: f32,

    /// Environment RNG seed (entropy when omitted)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Weight file to load before training
    #[arg(long)]
    load: Option<PathBuf>,

    /// Weight file to write after training
    #[arg(long)]
    save: Option<PathBuf>,

    /// Start from zero weights when the load file does not exist
    #[arg(long)]
    init_if_missing: bool,

    #[arg(long, value_enum, default_value = "fibonacci")]
    variant: VariantArg,

    /// Tuple layout
    #[arg(long, value_enum, default_value = "rows")]
    plan: PlanArg,

    /// Distinct ranks per table cell
    #[arg(long, default_value_t = DEFAULT_ALPHABET)]
    alphabet: usize,

    /// Play the heuristic player instead of training
    #[arg(long)]
    heuristic: bool,

    /// Also write logs to files in this directory
    #[arg(long)]
    log_dir: Option<PathBuf>,
}

impl Args {
    fn train_config(&self) -> TrainConfig {
        let mut agent = AgentConfig::default().with_alpha(self.alpha);
        agent.seed = self.seed;
        agent.load = self.load.clone();
        agent.save = self.save.clone();
        agent.init_if_missing = self.init_if_missing;

        TrainConfig::default()
            .with_episodes(self.episodes)
            .with_block(self.block)
            .with_variant(self.variant.into())
            .with_plan(self.plan.into())
            .with_alphabet(self.alphabet)
            .with_agent(agent)
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let logger = Logger::try_with_env_or_str("info")?;
    let _logger = match &args.log_dir {
        Some(dir) => logger
            .log_to_file(FileSpec::default().directory(dir))
            .duplicate_to_stderr(Duplicate::Info)
            .start()?,
        None => logger.start()?,
    };

    let config = args.train_config();
    config.validate()?;

    if args.heuristic {
        let mut player = HeuristicPlayer::new(config.variant);
        let mut env = RandomEnvironment::from_config(&config.agent);
        Trainer::from_config(&config).run(&mut player, &mut env, config.episodes);
    } else {
        train(&config)?;
    }

    Ok(())
}
