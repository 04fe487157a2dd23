//! # snnf-optim
//!
//! Optimizers that update registered parameters in place from their
//! gradient buffers.
//!
//! - [`Optimizer`] — registration (`add_parameters`, `add_layer`),
//!   `zero_grad`, and the abstract `step`
//! - [`SGD`] — plain, momentum, weight decay
//! - [`Adam`] — adaptive moment estimation
//! - [`clip`] — gradient norm and value clipping
//!
//! ```ignore
//! let mut opt = SGD::new(0.1)?;
//! opt.add_parameters(model.parameters())?;
//! for _ in 0..epochs {
//!     let y = model.forward(&x)?;
//!     let (loss, dy) = mse_loss(&y, &target)?;
//!     model.backward(&dy)?;
//!     opt.step()?;
//!     opt.zero_grad()?;
//! }
//! ```

pub mod adam;
pub mod clip;
pub mod optimizer;
pub mod sgd;

pub use adam::{Adam, AdamConfig};
pub use clip::{clip_grad_norm, clip_grad_value, grad_norm};
pub use optimizer::{Optimizer, ParamPair, ParamRegistry};
pub use sgd::{SgdConfig, SGD};
