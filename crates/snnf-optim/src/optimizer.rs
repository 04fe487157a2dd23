// Optimizer trait — registration, zero_grad, and the update rule
//
// An optimizer keeps an ordered list of (parameter, gradient) pairs. The
// pairs are `ParamRef` handles: the optimizer reads gradients and writes
// parameter values in place, but the layer keeps ownership. If a layer is
// dropped while an optimizer still references it, the next step() or
// zero_grad() returns Error::ParameterDropped.
//
// REGISTRATION CONVENTION:
//
// add_parameters() takes the flat list a Layer exposes through
// `Layer::parameters()`: all parameters, then all gradients, same order.
// The list is split in half and the i-th parameter is paired with the
// i-th gradient. Each call is validated as a whole before anything is
// appended:
//
//   - odd length                           → Error::Registration
//   - a parameter paired with itself       → Error::Registration
//   - a handle already registered          → Error::Registration
//
// Parameter/gradient shape agreement is checked by step(), before any
// parameter is written.

use std::collections::HashSet;

use snnf_core::{Error, ParamId, ParamRef, Result, Shape, WithDType};
use snnf_nn::Layer;

/// One learnable tensor and the buffer holding its gradient.
#[derive(Debug, Clone)]
pub struct ParamPair<T: WithDType> {
    pub param: ParamRef<T>,
    pub grad: ParamRef<T>,
}

impl<T: WithDType> ParamPair<T> {
    /// Check that both ends are alive and agree on shape.
    pub fn check(&self) -> Result<Shape> {
        let param_shape = self.param.shape()?;
        let grad_shape = self.grad.shape()?;
        if param_shape != grad_shape {
            return Err(Error::ShapeMismatch {
                expected: param_shape,
                got: grad_shape,
            });
        }
        Ok(param_shape)
    }
}

/// The ordered set of pairs an optimizer manages.
#[derive(Debug, Clone)]
pub struct ParamRegistry<T: WithDType> {
    pairs: Vec<ParamPair<T>>,
    ids: HashSet<ParamId>,
}

impl<T: WithDType> Default for ParamRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: WithDType> ParamRegistry<T> {
    pub fn new() -> Self {
        ParamRegistry {
            pairs: Vec::new(),
            ids: HashSet::new(),
        }
    }

    /// Registered pairs, in registration order.
    pub fn pairs(&self) -> &[ParamPair<T>] {
        &self.pairs
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Whether `id` is registered as a parameter or a gradient.
    pub fn contains(&self, id: ParamId) -> bool {
        self.ids.contains(&id)
    }

    /// Register a flat [params..., grads...] list.
    pub fn add_parameters(&mut self, params: Vec<ParamRef<T>>) -> Result<()> {
        if params.len() % 2 != 0 {
            return Err(Error::registration(format!(
                "expected parameters followed by their gradients (an even count), got {} handles",
                params.len()
            )));
        }
        let mut params = params;
        let grads = params.split_off(params.len() / 2);
        let pairs = params
            .into_iter()
            .zip(grads)
            .map(|(param, grad)| ParamPair { param, grad })
            .collect();
        self.add_pairs(pairs)
    }

    /// Register explicit pairs.
    pub fn add_pairs(&mut self, pairs: Vec<ParamPair<T>>) -> Result<()> {
        let mut seen = HashSet::new();
        for pair in &pairs {
            if pair.param.id() == pair.grad.id() {
                return Err(Error::registration(format!(
                    "parameter '{}' ({}) is registered as its own gradient",
                    pair.param.name(),
                    pair.param.id()
                )));
            }
            for handle in [&pair.param, &pair.grad] {
                if self.ids.contains(&handle.id()) || !seen.insert(handle.id()) {
                    return Err(Error::registration(format!(
                        "'{}' ({}) is already registered",
                        handle.name(),
                        handle.id()
                    )));
                }
            }
        }

        self.ids.extend(seen);
        tracing::debug!(
            pairs = pairs.len(),
            total = self.pairs.len() + pairs.len(),
            "registered parameters"
        );
        self.pairs.extend(pairs);
        Ok(())
    }

    /// Fill every registered gradient with zero.
    pub fn zero_grad(&self) -> Result<()> {
        for pair in &self.pairs {
            if !pair.grad.is_alive() {
                return Err(Error::ParameterDropped {
                    id: pair.grad.id().as_u64(),
                });
            }
        }
        for pair in &self.pairs {
            pair.grad.fill(T::zero())?;
        }
        Ok(())
    }

    /// Validate every pair before an update. Returns the parameter shapes.
    pub fn check_all(&self) -> Result<Vec<Shape>> {
        self.pairs.iter().map(ParamPair::check).collect()
    }
}

/// Common interface of all optimizers.
///
/// Implementors provide access to their [`ParamRegistry`] and the update
/// rule in [`step`](Optimizer::step); registration and `zero_grad` are shared.
pub trait Optimizer<T: WithDType> {
    fn registry(&self) -> &ParamRegistry<T>;

    fn registry_mut(&mut self) -> &mut ParamRegistry<T>;

    /// Apply one update to every registered parameter using its gradient.
    /// Gradients are read, never written.
    fn step(&mut self) -> Result<()>;

    fn learning_rate(&self) -> f64;

    /// Replace the learning rate. Values the constructor would reject leave
    /// the current rate in place and return an error.
    fn set_learning_rate(&mut self, lr: f64) -> Result<()>;

    /// Register a flat [params..., grads...] list, as returned by
    /// `Layer::parameters()`.
    fn add_parameters(&mut self, params: Vec<ParamRef<T>>) -> Result<()> {
        self.registry_mut().add_parameters(params)
    }

    /// Register one (parameter, gradient) pair.
    fn add_pair(&mut self, param: ParamRef<T>, grad: ParamRef<T>) -> Result<()> {
        self.registry_mut().add_pairs(vec![ParamPair { param, grad }])
    }

    /// Register every (parameter, gradient) pair of `layer`.
    fn add_layer(&mut self, layer: &dyn Layer<T>) -> Result<()> {
        let pairs = layer
            .param_pairs()
            .into_iter()
            .map(|(param, grad)| ParamPair { param, grad })
            .collect();
        self.registry_mut().add_pairs(pairs)
    }

    /// Reset every registered gradient to zero. Parameters are not touched.
    fn zero_grad(&mut self) -> Result<()> {
        self.registry().zero_grad()
    }

    /// Number of registered (parameter, gradient) pairs.
    fn num_pairs(&self) -> usize {
        self.registry().len()
    }
}
