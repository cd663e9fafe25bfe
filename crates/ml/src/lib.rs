//! Tensors, dense layers and optimizers backing the action-value approximator.
//!
//! Everything runs on the CPU over row-major `[batch, features]` tensors.
//! Gradients are propagated layer by layer: [`nn::Sequential::forward`]
//! records the activations that [`nn::Sequential::backward`] consumes.

pub mod error;
pub mod loss;
pub mod nn;
pub mod optim;
pub mod q;
pub mod tensor;

pub use error::MlError;
pub use nn::{Dense, Layer, Relu, Sequential};
pub use optim::Adam;
pub use q::{QFunction, QNetwork};
pub use tensor::Tensor;
