use std::collections::VecDeque;

/// Mean of the most recent `size` values.
#[derive(Debug, Clone)]
pub struct MovingAverage {
    values: VecDeque<f32>,
    size: usize,
}

impl MovingAverage {
    #[must_use]
    pub fn new(size: usize) -> Self {
        assert!(size > 0, "moving average window must be positive");
        Self { values: VecDeque::with_capacity(size), size }
    }

    pub fn add(&mut self, value: f32) {
        self.values.push_back(value);
        self.trim();
    }

    pub fn add_all(&mut self, values: impl IntoIterator<Item = f32>) {
        self.values.extend(values);
        self.trim();
    }

    fn trim(&mut self) {
        while self.values.len() > self.size {
            self.values.pop_front();
        }
    }

    /// `None` until at least one value has been added.
    pub fn average(&self) -> Option<f32> {
        if self.values.is_empty() {
            None
        } else {
            Some(self.values.iter().sum::<f32>() / self.values.len() as f32)
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl Extend<f32> for MovingAverage {
    fn extend<I: IntoIterator<Item = f32>>(&mut self, iter: I) {
        self.add_all(iter);
    }
}
