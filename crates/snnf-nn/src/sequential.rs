// Sequential — A chain of layers applied one after another
//
// Example:
//   let mut model = Sequential::new()
//       .add(linear1)
//       .add(ReLU::new())
//       .add(linear2);
//
//   let y = model.forward(&x)?;
//   let dx = model.backward(&dy)?;
//
// forward() runs the layers in order; backward() runs them in reverse,
// feeding each layer's input gradient to the layer before it.
//
// A failure stops the chain at the failing layer. Layers before it keep
// what they cached (forward) or wrote (backward) during the failed call,
// so run forward again before the next backward.

use snnf_core::{ParamRef, Result, Tensor, WithDType};

use crate::layer::Layer;

/// A container that chains layers sequentially.
///
/// Sequential itself implements Layer, so it can be nested.
pub struct Sequential<T: WithDType> {
    layers: Vec<Box<dyn Layer<T>>>,
}

impl<T: WithDType> Sequential<T> {
    /// Create an empty Sequential.
    pub fn new() -> Self {
        Sequential { layers: Vec::new() }
    }

    /// Add a layer to the end of the sequence. Returns self for chaining.
    #[allow(clippy::should_implement_trait)]
    pub fn add<L: Layer<T> + 'static>(mut self, layer: L) -> Self {
        self.layers.push(Box::new(layer));
        self
    }

    /// Append a boxed layer.
    pub fn push(&mut self, layer: Box<dyn Layer<T>>) {
        self.layers.push(layer);
    }

    /// Number of layers.
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Whether the sequential is empty.
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Names of the contained layers, in order.
    pub fn layer_names(&self) -> Vec<&'static str> {
        self.layers.iter().map(|l| l.name()).collect()
    }
}

impl<T: WithDType> Default for Sequential<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: WithDType> Layer<T> for Sequential<T> {
    fn name(&self) -> &'static str {
        "Sequential"
    }

    fn forward(&mut self, input: &Tensor<T>) -> Result<Tensor<T>> {
        let mut out = input.clone();
        for layer in &mut self.layers {
            out = layer.forward(&out)?;
        }
        Ok(out)
    }

    fn backward(&mut self, grad_output: &Tensor<T>) -> Result<Tensor<T>> {
        let mut grad = grad_output.clone();
        for layer in self.layers.iter_mut().rev() {
            grad = layer.backward(&grad)?;
        }
        Ok(grad)
    }

    fn param_pairs(&self) -> Vec<(ParamRef<T>, ParamRef<T>)> {
        self.layers.iter().flat_map(|l| l.param_pairs()).collect()
    }

    fn zero_grad(&mut self) -> Result<()> {
        for layer in &mut self.layers {
            layer.zero_grad()?;
        }
        Ok(())
    }
}
