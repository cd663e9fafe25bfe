use std::sync::Arc;

/// One environment transition as seen from the state it started in.
///
/// Observations are reference counted so overlapping windows share them.
#[derive(Clone, Debug, PartialEq)]
pub struct Step {
    pub state: Arc<[f32]>,
    pub action: usize,
    pub reward: f32,
    pub done: bool,
}

/// Consecutive steps of a single episode, oldest first. Never empty.
#[derive(Clone, Debug, PartialEq)]
pub struct Window {
    steps: Vec<Step>,
}

impl Window {
    pub fn new(steps: Vec<Step>) -> Self {
        assert!(!steps.is_empty(), "a window holds at least one step");
        Self { steps }
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    /// The step whose action is being evaluated.
    pub fn head(&self) -> &Step {
        &self.steps[0]
    }

    /// The horizon step; only its state and `done` flag are used for bootstrapping.
    pub fn tail(&self) -> &Step {
        &self.steps[self.steps.len() - 1]
    }

    /// Folds the rewards of every step except the tail, newest first, on top of
    /// `bootstrap`: `g = r + gamma * g`.
    pub fn discounted_return(&self, gamma: f32, bootstrap: f32) -> f32 {
        self.steps[..self.steps.len() - 1]
            .iter()
            .rev()
            .fold(bootstrap, |cumul, step| step.reward + gamma * cumul)
    }
}
