//! # qtrace
//!
//! Documentation entry point for the workspace.
//!
//! - [`ml`] holds tensors, dense layers, losses, optimizers and the
//!   [`ml::QNetwork`] approximator.
//! - [`rl`] holds the n-step experience generator, the replay memory, the
//!   return target builder and the epoch-based [`rl::Trainer`].
//!
//! The `qtrace` binary trains on [`rl::Corridor`] and can finish with a greedy
//! evaluation episode (`--eval`).

pub use ml;
pub use rl;
