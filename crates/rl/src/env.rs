use std::ops::Range;

/// Reinforcement learning environment with a discrete action space.
///
/// Inspired by classic frameworks like OpenAI Gym, this trait defines the core
/// interface an environment must provide. Each call to [`step`] advances the
/// simulation by one action and returns the new observation vector, a reward
/// signal, and whether the episode has terminated. Environments must accept
/// any number of resets.
///
/// [`step`]: Env::step
pub trait Env {
    /// Advance the environment by one action in `[0, action_size())`.
    ///
    /// Returns `(obs, reward, done)`.
    fn step(&mut self, action: usize) -> (Vec<f32>, f32, bool);

    /// Reset the environment to its starting state and return the initial
    /// observation vector.
    fn reset(&mut self) -> Vec<f32>;

    /// Size of the observation vector.
    fn obs_size(&self) -> usize;

    /// Number of discrete actions.
    fn action_size(&self) -> usize;
}

/// Applies a fixed observation transform to a wrapped environment:
/// crop to an index range, then multiply by `scale`.
///
/// Observations are already flat intensity vectors, so resizing and
/// grayscale conversion are left to the wrapped environment.
pub struct Preprocess<E> {
    env: E,
    crop: Option<Range<usize>>,
    scale: f32,
}

impl<E: Env> Preprocess<E> {
    pub fn new(env: E) -> Self {
        Self { env, crop: None, scale: 1.0 }
    }

    /// Keep only `range` of every observation.
    ///
    /// # Panics
    ///
    /// If the range is empty or reaches past the wrapped observation.
    #[must_use]
    pub fn with_crop(mut self, range: Range<usize>) -> Self {
        assert!(
            range.start < range.end && range.end <= self.env.obs_size(),
            "crop {range:?} outside observation of size {}",
            self.env.obs_size()
        );
        self.crop = Some(range);
        self
    }

    #[must_use]
    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    pub fn transform(&self, obs: &[f32]) -> Vec<f32> {
        let obs = match &self.crop {
            Some(range) => &obs[range.clone()],
            None => obs,
        };
        obs.iter().map(|v| v * self.scale).collect()
    }
}

impl<E: Env> Env for Preprocess<E> {
    fn step(&mut self, action: usize) -> (Vec<f32>, f32, bool) {
        let (obs, reward, done) = self.env.step(action);
        (self.transform(&obs), reward, done)
    }

    fn reset(&mut self) -> Vec<f32> {
        let obs = self.env.reset();
        self.transform(&obs)
    }

    fn obs_size(&self) -> usize {
        self.crop.as_ref().map_or(self.env.obs_size(), |r| r.len())
    }

    fn action_size(&self) -> usize {
        self.env.action_size()
    }
}
