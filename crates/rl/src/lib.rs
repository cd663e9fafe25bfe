//! Multi-step Q-learning from a bounded replay memory.
//!
//! Experience flows through the crate in one direction:
//!
//! 1. [`NStepProgress`] plays the environment with a [`Policy`] on top of the
//!    approximator's scores and cuts the transitions into overlapping
//!    [`Window`]s of `n_step + 1` steps.
//! 2. [`ReplayMemory`] keeps the most recent windows and hands them out as
//!    shuffled minibatches.
//! 3. [`build_targets`] turns a minibatch into inputs and sparse regression
//!    targets using n-step returns.
//! 4. [`Trainer`] ties the loop together epoch by epoch and tracks the
//!    moving average of episode rewards.

#![deny(clippy::all)]

pub mod config;
pub mod corridor;
pub mod env;
pub mod error;
pub mod moving_average;
pub mod policy;
pub mod replay;
pub mod step;
pub mod targets;
pub mod trainer;
pub mod trajectory;

pub use config::TrainConfig;
pub use corridor::Corridor;
pub use env::{Env, Preprocess};
pub use error::RlError;
pub use moving_average::MovingAverage;
pub use policy::{Greedy, Policy, SoftmaxBody};
pub use replay::{Batches, ReplayMemory, DEFAULT_CAPACITY};
pub use step::{Step, Window};
pub use targets::build_targets;
pub use trainer::{evaluate, EpochReport, Evaluation, Trainer};
pub use trajectory::{Advance, NStepProgress, WindowSource};
