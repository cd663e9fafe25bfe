use crate::loss::mse;
use crate::nn::{Dense, Relu, Sequential};
use crate::optim::Adam;
use crate::{MlError, Tensor};

/// Action-value function approximator.
///
/// Maps a batch of observations `[batch, obs_dim]` to one score per action
/// `[batch, num_actions]`, and can be fitted towards regression targets of the
/// same shape.
pub trait QFunction {
    fn num_actions(&self) -> usize;

    fn forward(&self, states: &Tensor) -> Result<Tensor, MlError>;

    /// Regresses the output on `inputs` towards `targets` with one gradient
    /// step and returns the loss measured before the update.
    fn train_step(&mut self, inputs: &Tensor, targets: &Tensor) -> Result<f32, MlError>;
}

/// Multilayer perceptron Q-function trained with Adam on mean squared error.
pub struct QNetwork {
    net: Sequential,
    optimizer: Adam,
    obs_dim: usize,
    num_actions: usize,
}

impl QNetwork {
    #[must_use]
    pub fn new(net: Sequential, obs_dim: usize, num_actions: usize, lr: f32) -> Self {
        Self { net, optimizer: Adam::new(lr), obs_dim, num_actions }
    }

    /// `Dense(obs_dim, hidden) -> ReLU -> Dense(hidden, num_actions)`.
    pub fn mlp(obs_dim: usize, hidden: usize, num_actions: usize, lr: f32, seed: u64) -> Self {
        let rng = fastrand::Rng::with_seed(seed);
        let mut net = Sequential::new();
        net.push(Dense::xavier(obs_dim, hidden, &rng));
        net.push(Relu);
        net.push(Dense::xavier(hidden, num_actions, &rng));
        Self::new(net, obs_dim, num_actions, lr)
    }

    fn check_input(&self, states: &Tensor) -> Result<(), MlError> {
        if states.cols() == self.obs_dim {
            Ok(())
        } else {
            Err(MlError::shape(&[states.rows(), self.obs_dim], &states.shape))
        }
    }
}

impl QFunction for QNetwork {
    fn num_actions(&self) -> usize {
        self.num_actions
    }

    fn forward(&self, states: &Tensor) -> Result<Tensor, MlError> {
        self.check_input(states)?;
        let out = self.net.predict(states)?;
        if !out.all_finite() {
            return Err(MlError::NonFinite("q-values"));
        }
        Ok(out)
    }

    fn train_step(&mut self, inputs: &Tensor, targets: &Tensor) -> Result<f32, MlError> {
        self.check_input(inputs)?;
        let (pred, activations) = self.net.forward(inputs)?;
        let (loss, grad) = mse(&pred, targets)?;
        if !loss.is_finite() {
            return Err(MlError::NonFinite("loss"));
        }
        let (_, grads) = self.net.backward(&activations, &grad);
        let mut params: Vec<(&mut Tensor, &Tensor)> =
            self.net.params_mut().into_iter().zip(grads.iter()).collect();
        self.optimizer.step(&mut params);
        tracing::trace!(loss, step = self.optimizer.steps(), "q-network update");
        Ok(loss)
    }
}
