// Layer trait — The interface every network layer implements
//
// There is no autograd graph in snnf. Each layer derives its own gradients
// by hand:
//
//   forward(x)    computes the output and caches whatever backward needs
//   backward(dy)  writes the parameter gradients into the layer's gradient
//                 buffers and returns dx for the previous layer
//
// PARAMETER ORDER:
//
// `param_pairs()` lists (parameter, gradient) handles, one pair per
// learnable tensor. `parameters()` flattens them into the layout the
// optimizers expect: every parameter first, then every gradient, in the
// same order. For Linear that is
//
//   [weight, bias, grad_weight, grad_bias]
//
// The handles are `ParamRef`s, so an optimizer can hold them across
// training steps without owning the layer's buffers.

use snnf_core::{ParamRef, Result, Tensor, WithDType};

/// A network layer with hand-written forward and backward passes.
///
/// # Example
/// ```ignore
/// let mut layer = Linear::<f32>::new(3, 2)?;
/// let y = layer.forward(&x)?;          // [batch, 2]
/// let dx = layer.backward(&dy)?;       // [batch, 3]; gradients filled
/// ```
pub trait Layer<T: WithDType> {
    /// Short name used in logs and error messages.
    fn name(&self) -> &'static str;

    /// Compute the output for `input`, caching what backward needs.
    fn forward(&mut self, input: &Tensor<T>) -> Result<Tensor<T>>;

    /// Propagate `grad_output` (dLoss/dOutput) back through the layer.
    ///
    /// Overwrites the layer's gradient buffers and returns dLoss/dInput.
    /// Fails with `Error::BackwardBeforeForward` if forward has not run.
    fn backward(&mut self, grad_output: &Tensor<T>) -> Result<Tensor<T>>;

    /// (parameter, gradient) handle pairs. Parameter-free layers return none.
    fn param_pairs(&self) -> Vec<(ParamRef<T>, ParamRef<T>)> {
        Vec::new()
    }

    /// All parameters followed by all gradients, in matching order.
    fn parameters(&self) -> Vec<ParamRef<T>> {
        let pairs = self.param_pairs();
        let mut out = Vec::with_capacity(pairs.len() * 2);
        out.extend(pairs.iter().map(|(p, _)| p.clone()));
        out.extend(pairs.into_iter().map(|(_, g)| g));
        out
    }

    /// Reset every gradient buffer to zero. Parameters are not touched.
    fn zero_grad(&mut self) -> Result<()> {
        for (_, grad) in self.param_pairs() {
            grad.fill(T::zero())?;
        }
        Ok(())
    }

    /// Total number of scalar parameters (gradients not counted).
    fn num_parameters(&self) -> Result<usize> {
        let mut n = 0;
        for (param, _) in self.param_pairs() {
            n += param.shape()?.elem_count();
        }
        Ok(n)
    }
}
