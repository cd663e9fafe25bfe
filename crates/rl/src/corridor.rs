use crate::env::Env;

const FLOOR: f32 = 0.0;
const GOAL: f32 = 128.0;
const AGENT: f32 = 255.0;

pub const LEFT: usize = 0;
pub const STAY: usize = 1;
pub const RIGHT: usize = 2;

/// A one-dimensional corridor rendered as a strip of pixel intensities.
///
/// The agent starts in the leftmost cell and must walk to the goal in the
/// rightmost cell. Every step costs `STEP_COST`; reaching the goal pays `1.0`
/// and ends the episode. Episodes are also cut off after `max_steps`.
pub struct Corridor {
    length: usize,
    max_steps: usize,
    position: usize,
    steps: usize,
}

impl Corridor {
    pub const STEP_COST: f32 = -0.01;

    #[must_use]
    pub fn new(length: usize, max_steps: usize) -> Self {
        assert!(length >= 2, "corridor needs a start and a goal cell");
        assert!(max_steps >= 1);
        Self { length, max_steps, position: 0, steps: 0 }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    fn goal(&self) -> usize {
        self.length - 1
    }

    fn frame(&self) -> Vec<f32> {
        let mut frame = vec![FLOOR; self.length];
        frame[self.goal()] = GOAL;
        frame[self.position] = AGENT;
        frame
    }
}

impl Env for Corridor {
    fn step(&mut self, action: usize) -> (Vec<f32>, f32, bool) {
        self.position = match action {
            LEFT => self.position.saturating_sub(1),
            RIGHT => (self.position + 1).min(self.goal()),
            _ => self.position,
        };
        self.steps += 1;
        let reached = self.position == self.goal();
        let reward = if reached { 1.0 } else { Self::STEP_COST };
        (self.frame(), reward, reached || self.steps >= self.max_steps)
    }

    fn reset(&mut self) -> Vec<f32> {
        self.position = 0;
        self.steps = 0;
        self.frame()
    }

    fn obs_size(&self) -> usize {
        self.length
    }

    fn action_size(&self) -> usize {
        3
    }
}
