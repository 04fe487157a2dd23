//! # snnf-core
//!
//! Core numeric primitives for snnf.
//!
//! This crate provides:
//! - [`Tensor`] — owned, row-major n-dimensional array with shape-checked
//!   linear algebra (matmul, transpose, broadcast, sum, reshape)
//! - [`Shape`] — dimension list, strides and broadcasting rules
//! - [`DType`] / [`WithDType`] — supported element types (f16, bf16, f32, f64)
//! - [`Parameter`] / [`ParamRef`] — owning and non-owning handles to
//!   learnable tensors, shared between layers and optimizers
//! - [`Init`] and [`rng`] — random initialization and seeding
//! - [`Error`] / [`Result`] — the error type used by every snnf crate

pub mod dtype;
pub mod error;
pub mod init;
pub mod param;
pub mod rng;
pub mod shape;
pub mod tensor;

pub use dtype::{DType, WithDType};
pub use error::{Error, Result};
pub use init::Init;
pub use param::{ParamId, ParamRef, Parameter};
pub use shape::Shape;
pub use tensor::Tensor;
