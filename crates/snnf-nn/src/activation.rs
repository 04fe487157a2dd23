// Activation layers — parameter-free, elementwise
//
// Each activation caches the one tensor its derivative needs:
//
//   ReLU     caches the input    dx = dy * [x > 0]
//   Sigmoid  caches the output   dx = dy * y * (1 - y)
//   Tanh     caches the output   dx = dy * (1 - y²)
//
// They compose with Linear inside a Sequential:
//
//   let model = Sequential::new()
//       .add(Linear::new(2, 8)?)
//       .add(Tanh::new())
//       .add(Linear::new(8, 1)?);

use snnf_core::{Error, Result, Tensor, WithDType};

use crate::layer::Layer;

fn cached<'a, T: WithDType>(
    cache: &'a Option<Tensor<T>>,
    layer: &'static str,
    grad_output: &Tensor<T>,
) -> Result<&'a Tensor<T>> {
    let cache = cache
        .as_ref()
        .ok_or(Error::BackwardBeforeForward { layer })?;
    if !cache.same_shape(grad_output) {
        return Err(Error::ShapeMismatch {
            expected: cache.shape().clone(),
            got: grad_output.shape().clone(),
        });
    }
    Ok(cache)
}

/// ReLU activation: max(0, x)
#[derive(Debug, Clone, Default)]
pub struct ReLU<T: WithDType> {
    input: Option<Tensor<T>>,
}

impl<T: WithDType> ReLU<T> {
    pub fn new() -> Self {
        ReLU { input: None }
    }
}

impl<T: WithDType> Layer<T> for ReLU<T> {
    fn name(&self) -> &'static str {
        "ReLU"
    }

    fn forward(&mut self, input: &Tensor<T>) -> Result<Tensor<T>> {
        let out = input.map(|v| if v > T::zero() { v } else { T::zero() });
        self.input = Some(input.clone());
        Ok(out)
    }

    fn backward(&mut self, grad_output: &Tensor<T>) -> Result<Tensor<T>> {
        let x = cached(&self.input, "ReLU", grad_output)?;
        grad_output.zip_map(x, |g, x| if x > T::zero() { g } else { T::zero() })
    }
}

/// Sigmoid activation: 1 / (1 + e^(-x))
#[derive(Debug, Clone, Default)]
pub struct Sigmoid<T: WithDType> {
    output: Option<Tensor<T>>,
}

impl<T: WithDType> Sigmoid<T> {
    pub fn new() -> Self {
        Sigmoid { output: None }
    }
}

impl<T: WithDType> Layer<T> for Sigmoid<T> {
    fn name(&self) -> &'static str {
        "Sigmoid"
    }

    fn forward(&mut self, input: &Tensor<T>) -> Result<Tensor<T>> {
        let out = input.map(|v| T::one() / (T::one() + (-v).exp()));
        self.output = Some(out.clone());
        Ok(out)
    }

    fn backward(&mut self, grad_output: &Tensor<T>) -> Result<Tensor<T>> {
        let y = cached(&self.output, "Sigmoid", grad_output)?;
        grad_output.zip_map(y, |g, y| g * y * (T::one() - y))
    }
}

/// Tanh activation
#[derive(Debug, Clone, Default)]
pub struct Tanh<T: WithDType> {
    output: Option<Tensor<T>>,
}

impl<T: WithDType> Tanh<T> {
    pub fn new() -> Self {
        Tanh { output: None }
    }
}

impl<T: WithDType> Layer<T> for Tanh<T> {
    fn name(&self) -> &'static str {
        "Tanh"
    }

    fn forward(&mut self, input: &Tensor<T>) -> Result<Tensor<T>> {
        let out = input.map(|v| v.tanh());
        self.output = Some(out.clone());
        Ok(out)
    }

    fn backward(&mut self, grad_output: &Tensor<T>) -> Result<Tensor<T>> {
        let y = cached(&self.output, "Tanh", grad_output)?;
        grad_output.zip_map(y, |g, y| g * (T::one() - y * y))
    }
}
