use ml::QFunction;
use tracing::{info, trace};

use crate::config::TrainConfig;
use crate::env::Env;
use crate::moving_average::MovingAverage;
use crate::policy::{Greedy, Policy};
use crate::replay::ReplayMemory;
use crate::targets::build_targets;
use crate::trajectory::NStepProgress;
use crate::RlError;

/// Summary of one training epoch.
#[derive(Debug, Clone, PartialEq)]
pub struct EpochReport {
    pub epoch: usize,
    /// Moving average of completed episode rewards, `None` before the first
    /// episode has finished.
    pub average_reward: Option<f32>,
    /// Mean regression loss over the epoch's minibatches.
    pub mean_loss: Option<f32>,
    pub batches: usize,
    /// Episodes completed during this epoch.
    pub episodes: usize,
    pub buffer_len: usize,
}

/// Owns every piece of mutable training state: replay memory (and through it
/// the experience generator), the approximator and the reward tracker.
pub struct Trainer<E, P, Q> {
    memory: ReplayMemory<NStepProgress<E, P>>,
    q: Q,
    rewards: MovingAverage,
    config: TrainConfig,
}

impl<E: Env, P: Policy, Q: QFunction> Trainer<E, P, Q> {
    pub fn new(env: E, policy: P, q: Q, config: TrainConfig) -> Result<Self, RlError> {
        config.validate()?;
        if env.action_size() != q.num_actions() {
            return Err(RlError::config(format!(
                "environment has {} actions but the approximator scores {}",
                env.action_size(),
                q.num_actions()
            )));
        }
        let progress = NStepProgress::new(env, policy, config.n_step)?;
        let memory = ReplayMemory::with_seed(progress, config.capacity, config.seed)?;
        Ok(Self {
            memory,
            q,
            rewards: MovingAverage::new(config.reward_window),
            config,
        })
    }

    pub fn config(&self) -> &TrainConfig {
        &self.config
    }

    pub fn q(&self) -> &Q {
        &self.q
    }

    pub fn memory(&self) -> &ReplayMemory<NStepProgress<E, P>> {
        &self.memory
    }

    pub fn into_q(self) -> Q {
        self.q
    }

    /// Refills the replay memory, takes one optimizer step per minibatch and
    /// folds the rewards of finished episodes into the moving average.
    pub fn run_epoch(&mut self, epoch: usize) -> Result<EpochReport, RlError> {
        self.memory.collect(self.config.samples_per_epoch, &self.q)?;

        let mut loss_sum = 0.0;
        let mut batches = 0;
        for batch in self.memory.sample_batches(self.config.batch_size)? {
            let (inputs, targets) = build_targets(&batch, &self.q, self.config.gamma)?;
            let loss = self.q.train_step(&inputs, &targets)?;
            trace!(epoch, batch = batches, loss, "minibatch");
            loss_sum += loss;
            batches += 1;
        }

        let completed = self.memory.source_mut().drain_episode_rewards();
        let episodes = completed.len();
        self.rewards.add_all(completed);

        let report = EpochReport {
            epoch,
            average_reward: self.rewards.average(),
            mean_loss: (batches > 0).then(|| loss_sum / batches as f32),
            batches,
            episodes,
            buffer_len: self.memory.len(),
        };
        info!(
            epoch,
            average_reward = ?report.average_reward,
            mean_loss = ?report.mean_loss,
            episodes,
            buffer = report.buffer_len,
            "epoch complete"
        );
        Ok(report)
    }

    /// Runs `config.epochs` epochs, handing every report to `on_epoch`.
    ///
    /// The first error aborts the run.
    pub fn train(&mut self, mut on_epoch: impl FnMut(&EpochReport)) -> Result<Vec<EpochReport>, RlError> {
        let mut reports = Vec::with_capacity(self.config.epochs);
        for epoch in 1..=self.config.epochs {
            let report = self.run_epoch(epoch)?;
            on_epoch(&report);
            reports.push(report);
        }
        Ok(reports)
    }
}

/// Result of a greedy evaluation episode.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub total_reward: f32,
    pub steps: usize,
    /// How often each action was chosen.
    pub action_counts: Vec<usize>,
    /// Whether the episode terminated on its own before `max_steps`.
    pub finished: bool,
}

/// Plays one episode always taking the highest scoring action.
pub fn evaluate<E: Env, Q: QFunction + ?Sized>(
    env: &mut E,
    q: &Q,
    max_steps: usize,
) -> Result<Evaluation, RlError> {
    let num_actions = env.action_size();
    let mut eval = Evaluation {
        total_reward: 0.0,
        steps: 0,
        action_counts: vec![0; num_actions],
        finished: false,
    };
    let mut obs = env.reset();
    while eval.steps < max_steps {
        let scores = q.forward(&ml::Tensor::from_vec(vec![1, obs.len()], obs))?;
        let action = Greedy.select(&scores)[0];
        if action >= num_actions {
            return Err(RlError::InvalidAction { action, num_actions });
        }
        eval.action_counts[action] += 1;
        let (next, reward, done) = env.step(action);
        eval.total_reward += reward;
        eval.steps += 1;
        if done {
            eval.finished = true;
            break;
        }
        obs = next;
    }
    Ok(eval)
}
