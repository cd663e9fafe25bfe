//! # Training run
//!
//! [`run`] wires the corridor, the Q-network and the softmax body into a
//! [`Trainer`], logs every epoch report and finishes with an optional greedy
//! evaluation episode.

use std::fs;

use anyhow::{ensure, Context, Result};
use ml::QNetwork;
use rl::{evaluate, Corridor, Env, Preprocess, SoftmaxBody, TrainConfig, Trainer};

use crate::Args;

/// Maps pixel intensities into `[0, 1]`.
const PIXEL_SCALE: f32 = 1.0 / 255.0;

/// Resolves the configuration from `args`, trains, and evaluates if asked to.
///
/// # Errors
///
/// Returns configuration and I/O errors, and any error raised while training.
pub fn run(args: Args) -> Result<()> {
    tracing_subscriber::fmt::init();

    let config = load_config(&args)?;
    ensure!(args.corridor_length >= 2, "corridor length must be at least 2");
    ensure!(args.max_steps >= 1, "max steps must be positive");
    tracing::info!(?config, "starting training");

    let env = corridor(&args);
    let q = QNetwork::mlp(
        env.obs_size(),
        config.hidden,
        env.action_size(),
        config.learning_rate,
        config.seed,
    );
    let policy = SoftmaxBody::new(config.temperature, config.seed);
    let mut trainer = Trainer::new(env, policy, q, config).context("invalid training setup")?;

    let reports = trainer
        .train(|report| match report.average_reward {
            Some(reward) => println!("Epoch: {}, Average Reward: {reward}", report.epoch),
            None => println!("Epoch: {}, Average Reward: n/a", report.epoch),
        })
        .context("training failed")?;
    tracing::info!(
        epochs = reports.len(),
        final_reward = ?reports.last().and_then(|r| r.average_reward),
        "training finished"
    );

    if args.eval {
        let mut env = corridor(&args);
        let result = evaluate(&mut env, trainer.q(), args.max_steps).context("evaluation failed")?;
        tracing::info!(
            reward = result.total_reward,
            steps = result.steps,
            finished = result.finished,
            "greedy episode"
        );
        println!("Action counts: {:?}", result.action_counts);
        println!("Total reward: {}", result.total_reward);
    }
    Ok(())
}

fn load_config(args: &Args) -> Result<TrainConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            TrainConfig::from_json(&json)
                .with_context(|| format!("parsing config {}", path.display()))?
        }
        None => TrainConfig::default(),
    };
    if let Some(epochs) = args.epochs {
        config.epochs = epochs;
    }
    if let Some(n_step) = args.n_step {
        config.n_step = n_step;
    }
    if let Some(batch_size) = args.batch_size {
        config.batch_size = batch_size;
    }
    if let Some(gamma) = args.gamma {
        config.gamma = gamma;
    }
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    config.validate().context("invalid configuration")?;
    Ok(config)
}

fn corridor(args: &Args) -> Preprocess<Corridor> {
    Preprocess::new(Corridor::new(args.corridor_length, args.max_steps)).with_scale(PIXEL_SCALE)
}
