//! # qtrace
//!
//! Trains a Q-network on the pixel corridor with n-step returns drawn from a
//! replay memory, then optionally plays one greedy episode with the result.

mod app;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

/// Command-line overrides on top of the JSON configuration.
#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Args {
    /// JSON training configuration; missing keys take their defaults.
    #[arg(long)]
    pub config: Option<PathBuf>,
    #[arg(long)]
    pub epochs: Option<usize>,
    #[arg(long)]
    pub n_step: Option<usize>,
    #[arg(long)]
    pub batch_size: Option<usize>,
    #[arg(long)]
    pub gamma: Option<f32>,
    #[arg(long)]
    pub seed: Option<u64>,
    /// Number of cells in the corridor, start and goal included.
    #[arg(long, default_value_t = 8)]
    pub corridor_length: usize,
    /// Step limit of a single episode.
    #[arg(long, default_value_t = 100)]
    pub max_steps: usize,
    /// Play one greedy episode after training and report its action counts.
    #[arg(long)]
    pub eval: bool,
}

fn main() -> Result<()> {
    app::run(Args::parse())
}
