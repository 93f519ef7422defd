use std::path::PathBuf;

use clap::Args;

use super::compare::CompareSettings;
use super::genetic::OptimizerSettings;
use crate::othello::prelude::*;

fn default_threads() -> usize {
    std::thread::available_parallelism().map_or(1, |v| v.into())
}

/// Options for the genetic trainer.
#[derive(Clone, Debug, Args)]
pub struct TrainOptions {
    /// Identifies the run; stats land under runs/<name>/.
    #[arg(short, long)]
    pub name: String,

    /// Generations to evolve.
    #[arg(short, long, default_value_t = 30)]
    pub generations: u32,

    /// Population size, fixed for the whole run.
    #[arg(short, long, default_value_t = 16)]
    pub population: usize,

    /// Openings per model evaluation (two matches each).
    #[arg(long, default_value_t = 8)]
    pub games: usize,

    /// Search depth used in every match.
    #[arg(short, long, default_value_t = 5)]
    pub depth: u32,

    /// Empties threshold for the exact endgame solve.
    #[arg(long, default_value_t = MATE_DEPTH)]
    pub mate_depth: u32,

    /// Worker threads; defaults to the machine's CPU count.
    #[arg(short, long)]
    pub threads: Option<usize>,

    /// Coefficient baseline used as seed and as the fixed reference.
    #[arg(short, long, default_value = "v1")]
    pub base: String,

    /// RNG seed for reproducible runs.
    #[arg(long, default_value_t = 1)]
    pub seed: u64,

    /// Output directory; defaults to runs/<name>.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl TrainOptions {
    /// Resolves defaults into a full optimizer configuration.
    pub fn resolve(&self) -> OptimizerSettings {
        OptimizerSettings {
            name: self.name.clone(),
            generations: self.generations,
            population: self.population,
            games: self.games,
            depth: self.depth,
            mate_depth: self.mate_depth,
            threads: self.threads.unwrap_or_else(default_threads),
            seed: self.seed,
            base: self.base.clone(),
            output_dir: self
                .output
                .clone()
                .unwrap_or_else(|| PathBuf::from("runs").join(&self.name)),
        }
    }
}

/// Options for an offline A-versus-B comparison.
#[derive(Clone, Debug, Args)]
pub struct CompareOptions {
    /// Baseline name for contestant A.
    #[arg(long)]
    pub base_a: String,

    /// Baseline name for contestant B.
    #[arg(long)]
    pub base_b: String,

    /// Openings to draw (two matches each).
    #[arg(long, default_value_t = 8)]
    pub games: usize,

    /// Search depth used in every match.
    #[arg(short, long, default_value_t = 5)]
    pub depth: u32,

    /// Empties threshold for the exact endgame solve.
    #[arg(long, default_value_t = MATE_DEPTH)]
    pub mate_depth: u32,

    /// Worker threads; defaults to the machine's CPU count.
    #[arg(short, long)]
    pub threads: Option<usize>,

    /// RNG seed for the opening draw.
    #[arg(long, default_value_t = 1)]
    pub seed: u64,
}

impl CompareOptions {
    /// Resolves defaults into comparison settings.
    pub fn settings(&self) -> CompareSettings {
        CompareSettings {
            games: self.games,
            depth: self.depth,
            mate_depth: self.mate_depth,
            threads: self.threads.unwrap_or_else(default_threads),
        }
    }
}
