#![allow(dead_code)]

use std::cell::Cell;
use std::collections::VecDeque;
use std::sync::Arc;

use ml::{MlError, QFunction, Tensor};
use rl::{Env, RlError, Step, Window, WindowSource};

/// Plays episodes of scripted lengths, cycling through `lengths`.
///
/// Observations are `[episode, t]`; the reward of the `t`-th step (1-based)
/// is `t`, so an episode of length `k` is worth `k (k + 1) / 2`.
pub struct ScriptedEnv {
    lengths: Vec<usize>,
    actions: usize,
    episode: Option<usize>,
    t: usize,
    pub resets: usize,
}

impl ScriptedEnv {
    pub fn new(lengths: Vec<usize>) -> Self {
        Self::with_actions(lengths, 2)
    }

    pub fn with_actions(lengths: Vec<usize>, actions: usize) -> Self {
        Self { lengths, actions, episode: None, t: 0, resets: 0 }
    }

    fn episode(&self) -> usize {
        self.episode.unwrap_or(0)
    }
}

impl Env for ScriptedEnv {
    fn step(&mut self, action: usize) -> (Vec<f32>, f32, bool) {
        assert!(action < self.actions);
        self.t += 1;
        let len = self.lengths[self.episode() % self.lengths.len()];
        (vec![self.episode() as f32, self.t as f32], self.t as f32, self.t >= len)
    }

    fn reset(&mut self) -> Vec<f32> {
        self.resets += 1;
        self.episode = Some(self.episode.map_or(0, |e| e + 1));
        self.t = 0;
        vec![self.episode() as f32, 0.0]
    }

    fn obs_size(&self) -> usize {
        2
    }

    fn action_size(&self) -> usize {
        self.actions
    }
}

/// Approximator double whose scores are a fixed function of each state row.
pub struct FnQ<F> {
    f: F,
    num_actions: usize,
    pub forward_calls: Cell<usize>,
    pub train_calls: usize,
    pub last_batch: Option<(Tensor, Tensor)>,
}

impl<F: Fn(&[f32]) -> Vec<f32>> FnQ<F> {
    pub fn new(num_actions: usize, f: F) -> Self {
        Self { f, num_actions, forward_calls: Cell::new(0), train_calls: 0, last_batch: None }
    }
}

impl<F: Fn(&[f32]) -> Vec<f32>> QFunction for FnQ<F> {
    fn num_actions(&self) -> usize {
        self.num_actions
    }

    fn forward(&self, states: &Tensor) -> Result<Tensor, MlError> {
        self.forward_calls.set(self.forward_calls.get() + 1);
        let rows: Vec<Vec<f32>> = states.iter_rows().map(|row| (self.f)(row)).collect();
        Tensor::stack(&rows)
    }

    fn train_step(&mut self, inputs: &Tensor, targets: &Tensor) -> Result<f32, MlError> {
        self.train_calls += 1;
        self.last_batch = Some((inputs.clone(), targets.clone()));
        Ok(0.5)
    }
}

/// Scores every state `[0.0; num_actions]`.
pub fn flat_q(num_actions: usize) -> FnQ<impl Fn(&[f32]) -> Vec<f32>> {
    FnQ::new(num_actions, move |_: &[f32]| vec![0.0; num_actions])
}

/// Policy that always answers `action`.
pub fn always(action: usize) -> impl FnMut(&Tensor) -> Vec<usize> {
    move |scores: &Tensor| vec![action; scores.rows()]
}

/// A finite stream of prepared windows.
pub struct VecSource {
    pub windows: VecDeque<Window>,
}

impl VecSource {
    /// `n` single-step windows whose reward is their index.
    pub fn tagged(n: usize) -> Self {
        Self { windows: (0..n).map(|i| tagged_window(i as f32)).collect() }
    }
}

impl WindowSource for VecSource {
    fn pull<Q: QFunction + ?Sized>(&mut self, _q: &Q) -> Result<Option<Window>, RlError> {
        Ok(self.windows.pop_front())
    }
}

pub fn step(state: &[f32], action: usize, reward: f32, done: bool) -> Step {
    Step { state: Arc::from(state), action, reward, done }
}

pub fn tagged_window(tag: f32) -> Window {
    Window::new(vec![step(&[tag], 0, tag, false)])
}

pub fn tag(window: &Window) -> f32 {
    window.head().reward
}
