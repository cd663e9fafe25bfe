use serde::{Deserialize, Serialize};

use crate::replay::DEFAULT_CAPACITY;
use crate::RlError;

/// Hyper-parameters of a training run.
///
/// Missing keys in a JSON document fall back to [`TrainConfig::default`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainConfig {
    /// Rewards folded into each return before bootstrapping.
    pub n_step: usize,
    pub gamma: f32,
    /// Maximum number of windows kept in replay memory.
    pub capacity: usize,
    /// Windows collected before the minibatch pass of every epoch.
    pub samples_per_epoch: usize,
    pub batch_size: usize,
    pub epochs: usize,
    pub learning_rate: f32,
    /// Number of recent episodes averaged in the reward report.
    pub reward_window: usize,
    /// Inverse temperature of the softmax action selection.
    pub temperature: f32,
    /// Hidden width of the Q-network.
    pub hidden: usize,
    pub seed: u64,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            n_step: 10,
            gamma: 0.99,
            capacity: DEFAULT_CAPACITY,
            samples_per_epoch: 200,
            batch_size: 128,
            epochs: 20,
            learning_rate: 0.001,
            reward_window: 100,
            temperature: 1.0,
            hidden: 40,
            seed: 0,
        }
    }
}

impl TrainConfig {
    pub fn from_json(json: &str) -> Result<Self, RlError> {
        serde_json::from_str(json).map_err(|e| RlError::config(e.to_string()))
    }

    pub fn validate(&self) -> Result<(), RlError> {
        if self.n_step < 1 {
            return Err(RlError::config("n_step must be at least 1"));
        }
        if !(0.0..1.0).contains(&self.gamma) {
            return Err(RlError::config(format!("gamma {} outside [0, 1)", self.gamma)));
        }
        if self.capacity == 0 {
            return Err(RlError::config("capacity must be positive"));
        }
        if self.batch_size == 0 || self.batch_size > self.capacity {
            return Err(RlError::config(format!(
                "batch size {} must be in [1, {}]",
                self.batch_size, self.capacity
            )));
        }
        if self.samples_per_epoch == 0 {
            return Err(RlError::config("samples_per_epoch must be positive"));
        }
        if self.epochs == 0 {
            return Err(RlError::config("epochs must be positive"));
        }
        if self.learning_rate.is_nan() || self.learning_rate <= 0.0 {
            return Err(RlError::config("learning_rate must be positive"));
        }
        if self.reward_window == 0 {
            return Err(RlError::config("reward_window must be positive"));
        }
        if self.temperature.is_nan() || self.temperature <= 0.0 {
            return Err(RlError::config("temperature must be positive"));
        }
        if self.hidden == 0 {
            return Err(RlError::config("hidden width must be positive"));
        }
        Ok(())
    }
}
