//! # snnf
//!
//! A small neural-network numeric engine: tensors with shape-checked linear
//! algebra, layers with hand-written backward passes, and optimizers that
//! update parameters in place.
//!
//! This is the facade crate that re-exports everything you need.
//!
//! ## Usage
//!
//! ```rust
//! use snnf::prelude::*;
//!
//! # fn main() -> snnf::Result<()> {
//! let mut layer = Linear::<f32>::new(3, 2)?;
//! let mut sgd = SGD::<f32>::new(0.1)?;
//! sgd.add_parameters(layer.parameters())?;
//!
//! let x = Tensor::ones((4, 3))?;
//! let y = layer.forward(&x)?;
//! assert_eq!(y.dims(), &[4, 2]);
//!
//! layer.backward(&Tensor::ones((4, 2))?)?;
//! sgd.step()?;
//! sgd.zero_grad()?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! | Crate | Purpose |
//! |-------|----------|
//! | `snnf-core` | Tensor, Shape, DType, Error, Parameter/ParamRef handles, Init, RNG |
//! | `snnf-nn` | Layer trait, Linear, ReLU/Sigmoid/Tanh, Sequential, mse_loss |
//! | `snnf-optim` | Optimizer trait, SGD, Adam, gradient clipping |

/// Re-export core types.
pub use snnf_core::{
    init::DEFAULT_UNIFORM_RANGE, rng, DType, Error, Init, ParamId, ParamRef, Parameter, Result,
    Shape, Tensor, WithDType,
};

/// Re-export neural network layers.
pub mod nn {
    pub use snnf_nn::*;
}

/// Re-export optimizers.
pub mod optim {
    pub use snnf_optim::*;
}

/// Prelude: import this for the most common types.
pub mod prelude {
    pub use crate::nn::{mse_loss, Layer, Linear, LinearConfig, ReLU, Sequential, Sigmoid, Tanh};
    pub use crate::optim::{clip_grad_norm, clip_grad_value, grad_norm};
    pub use crate::optim::{Adam, AdamConfig, Optimizer, SgdConfig, SGD};
    pub use crate::{DType, Error, Init, ParamRef, Parameter, Result, Shape, Tensor, WithDType};
}
