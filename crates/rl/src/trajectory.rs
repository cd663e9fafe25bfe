//! Multi-step experience generation.
//!
//! [`NStepProgress`] plays one live environment session and cuts the stream of
//! transitions into overlapping windows of `n_step + 1` consecutive steps. It
//! is an explicit state machine: every call to [`NStepProgress::next_window`]
//! performs at most one environment step, or emits one of the shrinking
//! windows queued up by the end of an episode.
//!
//! When an episode terminates, the remaining history is replayed as windows of
//! decreasing length (`n_step + 1` down to `1`) so every step close to the
//! terminal state still starts a window. If the history was already full at
//! termination, the full window is emitted twice: once by the sliding pass
//! and once as the first shrinking window.

use std::collections::VecDeque;
use std::sync::Arc;

use ml::{QFunction, Tensor};
use tracing::debug;

use crate::env::Env;
use crate::policy::Policy;
use crate::step::{Step, Window};
use crate::RlError;

/// Outcome of advancing the generator by one transition.
#[derive(Debug, Clone, PartialEq)]
pub enum Advance {
    Window(Window),
    /// The step was taken but the history is not long enough to form a window yet.
    Pending,
}

/// A stream of windows that [`crate::ReplayMemory`] can drain.
pub trait WindowSource {
    /// Pulls the next window, querying `q` for any actions that must be taken.
    ///
    /// `Ok(None)` means the stream has ended.
    fn pull<Q: QFunction + ?Sized>(&mut self, q: &Q) -> Result<Option<Window>, RlError>;
}

pub struct NStepProgress<E, P> {
    env: E,
    policy: P,
    n_step: usize,
    state: Option<Arc<[f32]>>,
    history: VecDeque<Step>,
    flushing: bool,
    episode_reward: f32,
    episode_len: usize,
    rewards: Vec<f32>,
    total_steps: u64,
    episodes: u64,
}

impl<E: Env, P: Policy> NStepProgress<E, P> {
    pub fn new(env: E, policy: P, n_step: usize) -> Result<Self, RlError> {
        if n_step < 1 {
            return Err(RlError::config("n_step must be at least 1"));
        }
        Ok(Self {
            env,
            policy,
            n_step,
            state: None,
            history: VecDeque::with_capacity(n_step + 2),
            flushing: false,
            episode_reward: 0.0,
            episode_len: 0,
            rewards: Vec::new(),
            total_steps: 0,
            episodes: 0,
        })
    }

    pub fn n_step(&self) -> usize {
        self.n_step
    }

    /// Length of a full window.
    pub fn window_len(&self) -> usize {
        self.n_step + 1
    }

    /// Environment steps taken since construction.
    pub fn total_steps(&self) -> u64 {
        self.total_steps
    }

    /// Episodes completed since construction.
    pub fn episodes(&self) -> u64 {
        self.episodes
    }

    pub fn env(&self) -> &E {
        &self.env
    }

    /// Returns the total reward of every episode completed since the last call
    /// and forgets them.
    pub fn drain_episode_rewards(&mut self) -> Vec<f32> {
        std::mem::take(&mut self.rewards)
    }

    /// Advances the machine by one environment step, or by one shrinking
    /// window while an episode end is being flushed.
    pub fn next_window<Q: QFunction + ?Sized>(&mut self, q: &Q) -> Result<Advance, RlError> {
        if self.flushing {
            return Ok(Advance::Window(self.flush_one()));
        }

        let state = match &self.state {
            Some(state) => Arc::clone(state),
            None => {
                let state: Arc<[f32]> = self.env.reset().into();
                self.state = Some(Arc::clone(&state));
                state
            }
        };
        let action = self.act(q, &state)?;
        let (next_state, reward, done) = self.env.step(action);
        self.total_steps += 1;
        self.episode_reward += reward;
        self.episode_len += 1;

        self.history.push_back(Step { state, action, reward, done });
        while self.history.len() > self.window_len() {
            self.history.pop_front();
        }

        if done {
            self.flushing = true;
            self.state = None;
        } else {
            self.state = Some(next_state.into());
        }

        if self.history.len() == self.window_len() {
            Ok(Advance::Window(self.snapshot()))
        } else if done {
            Ok(Advance::Window(self.flush_one()))
        } else {
            Ok(Advance::Pending)
        }
    }

    fn act<Q: QFunction + ?Sized>(&mut self, q: &Q, state: &[f32]) -> Result<usize, RlError> {
        let obs = Tensor::from_vec(vec![1, state.len()], state.to_vec());
        let scores = q.forward(&obs)?;
        let num_actions = self.env.action_size();
        match self.policy.select(&scores).first() {
            Some(&action) if action < num_actions => Ok(action),
            Some(&action) => Err(RlError::InvalidAction { action, num_actions }),
            None => Err(RlError::InvalidAction { action: usize::MAX, num_actions }),
        }
    }

    fn snapshot(&self) -> Window {
        Window::new(self.history.iter().cloned().collect())
    }

    fn flush_one(&mut self) -> Window {
        let window = self.snapshot();
        self.history.pop_front();
        if self.history.is_empty() {
            self.finish_episode();
        }
        window
    }

    fn finish_episode(&mut self) {
        self.episodes += 1;
        debug!(
            episode = self.episodes,
            reward = self.episode_reward,
            length = self.episode_len,
            "episode finished"
        );
        self.rewards.push(self.episode_reward);
        self.episode_reward = 0.0;
        self.episode_len = 0;
        self.flushing = false;
    }
}

impl<E: Env, P: Policy> WindowSource for NStepProgress<E, P> {
    fn pull<Q: QFunction + ?Sized>(&mut self, q: &Q) -> Result<Option<Window>, RlError> {
        loop {
            if let Advance::Window(window) = self.next_window(q)? {
                return Ok(Some(window));
            }
        }
    }
}
