//! # snnf-nn
//!
//! Network layers for snnf, each with an explicit, hand-derived backward
//! pass (there is no autograd graph):
//!
//! 1. **Layer trait** — `forward()`, `backward()`, `parameters()`, `zero_grad()`
//! 2. **Linear** — fully connected: `y = xW + b`
//! 3. **Activations** — ReLU, Sigmoid, Tanh
//! 4. **Sequential** — chains layers, runs backward in reverse
//! 5. **Loss** — `mse_loss` returning value and gradient
//!
//! Layers own their parameters and gradient buffers and hand out
//! non-owning [`snnf_core::ParamRef`] handles to optimizers.

pub mod activation;
pub mod layer;
pub mod linear;
pub mod loss;
pub mod sequential;

pub use activation::{ReLU, Sigmoid, Tanh};
pub use layer::Layer;
pub use linear::{Linear, LinearConfig};
pub use loss::mse_loss;
pub use sequential::Sequential;
