use ml::Tensor;

/// Turns a `[batch, num_actions]` block of action scores into one action per row.
pub trait Policy {
    fn select(&mut self, scores: &Tensor) -> Vec<usize>;
}

impl<F> Policy for F
where
    F: FnMut(&Tensor) -> Vec<usize>,
{
    fn select(&mut self, scores: &Tensor) -> Vec<usize> {
        self(scores)
    }
}

/// Picks the highest scoring action.
#[derive(Default, Clone, Copy)]
pub struct Greedy;

impl Policy for Greedy {
    fn select(&mut self, scores: &Tensor) -> Vec<usize> {
        scores.argmax_rows()
    }
}

/// Samples actions from `softmax(scores * temperature)`.
///
/// Higher temperatures sharpen the distribution towards the greedy action.
pub struct SoftmaxBody {
    temperature: f32,
    rng: fastrand::Rng,
}

impl SoftmaxBody {
    pub fn new(temperature: f32, seed: u64) -> Self {
        assert!(temperature > 0.0, "temperature must be positive");
        Self { temperature, rng: fastrand::Rng::with_seed(seed) }
    }

    pub fn temperature(&self) -> f32 {
        self.temperature
    }

    /// Action probabilities for a single row of scores.
    ///
    /// Scores that overflow once scaled yield NaN entries; [`Policy::select`]
    /// falls back to the greedy action for such rows.
    pub fn probabilities(&self, scores: &[f32]) -> Vec<f32> {
        let scaled: Vec<f32> = scores.iter().map(|s| s * self.temperature).collect();
        let m = scaled.iter().copied().fold(f32::NEG_INFINITY, f32::max);
        let exp: Vec<f32> = scaled.iter().map(|&v| (v - m).exp()).collect();
        let sum: f32 = exp.iter().sum();
        exp.iter().map(|e| e / sum).collect()
    }

    fn sample(&self, probs: &[f32]) -> usize {
        let u = self.rng.f32();
        let mut acc = 0.0;
        for (i, p) in probs.iter().enumerate() {
            acc += p;
            if u < acc {
                return i;
            }
        }
        probs.len() - 1
    }
}

impl Policy for SoftmaxBody {
    fn select(&mut self, scores: &Tensor) -> Vec<usize> {
        scores
            .iter_rows()
            .map(|row| {
                let probs = self.probabilities(row);
                if probs.iter().all(|p| p.is_finite()) {
                    self.sample(&probs)
                } else {
                    greedy(row)
                }
            })
            .collect()
    }
}

fn greedy(row: &[f32]) -> usize {
    row.iter()
        .enumerate()
        .fold((0, f32::NEG_INFINITY), |best, (i, &v)| if v > best.1 { (i, v) } else { best })
        .0
}
