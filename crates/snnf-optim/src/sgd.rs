// SGD — Stochastic Gradient Descent
//
// The simplest optimizer:
//
//   θ ← θ - lr · ∇θ
//
// With momentum μ, a velocity buffer is kept per parameter:
//
//   v ← μ · v + ∇θ
//   θ ← θ - lr · v
//
// Weight decay λ adds λ·θ to the gradient before either rule. Both default
// to zero, giving the plain update above.
//
// Each step first checks every registered pair (owner alive, parameter and
// gradient shapes equal) and only then writes parameters, so a failing
// step leaves every parameter unchanged.

use std::collections::HashMap;

use snnf_core::{bail, ParamId, Result, Tensor, WithDType};

use crate::optimizer::{Optimizer, ParamRegistry};

/// Hyperparameters for [`SGD`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SgdConfig {
    pub lr: f64,
    pub momentum: f64,
    pub weight_decay: f64,
}

impl Default for SgdConfig {
    fn default() -> Self {
        SgdConfig {
            lr: 0.01,
            momentum: 0.0,
            weight_decay: 0.0,
        }
    }
}

impl SgdConfig {
    pub fn lr(mut self, lr: f64) -> Self {
        self.lr = lr;
        self
    }

    pub fn momentum(mut self, momentum: f64) -> Self {
        self.momentum = momentum;
        self
    }

    pub fn weight_decay(mut self, weight_decay: f64) -> Self {
        self.weight_decay = weight_decay;
        self
    }

    fn validate(&self) -> Result<()> {
        if !self.lr.is_finite() || self.lr < 0.0 {
            bail!("SGD: invalid learning rate {}", self.lr);
        }
        if !(0.0..1.0).contains(&self.momentum) {
            bail!("SGD: momentum must be in [0, 1), got {}", self.momentum);
        }
        if !self.weight_decay.is_finite() || self.weight_decay < 0.0 {
            bail!("SGD: invalid weight decay {}", self.weight_decay);
        }
        Ok(())
    }
}

/// Stochastic Gradient Descent optimizer.
///
/// # Example
/// ```ignore
/// let mut sgd = SGD::new(0.1)?;
/// sgd.add_parameters(layer.parameters())?;
/// // forward, loss, backward...
/// sgd.step()?;
/// sgd.zero_grad()?;
/// ```
#[derive(Debug)]
pub struct SGD<T: WithDType> {
    registry: ParamRegistry<T>,
    config: SgdConfig,
    velocities: HashMap<ParamId, Tensor<T>>,
    steps: u64,
}

impl<T: WithDType> SGD<T> {
    /// Plain SGD with learning rate `lr`.
    pub fn new(lr: f64) -> Result<Self> {
        Self::with_config(SgdConfig::default().lr(lr))
    }

    pub fn with_config(config: SgdConfig) -> Result<Self> {
        config.validate()?;
        Ok(SGD {
            registry: ParamRegistry::new(),
            config,
            velocities: HashMap::new(),
            steps: 0,
        })
    }

    pub fn config(&self) -> &SgdConfig {
        &self.config
    }

    /// Number of completed steps.
    pub fn steps(&self) -> u64 {
        self.steps
    }
}

impl<T: WithDType> Optimizer<T> for SGD<T> {
    fn registry(&self) -> &ParamRegistry<T> {
        &self.registry
    }

    fn registry_mut(&mut self) -> &mut ParamRegistry<T> {
        &mut self.registry
    }

    fn step(&mut self) -> Result<()> {
        self.registry.check_all()?;

        let neg_lr = T::from_f64(-self.config.lr);
        let momentum = T::from_f64(self.config.momentum);
        let weight_decay = T::from_f64(self.config.weight_decay);

        for pair in self.registry.pairs() {
            // Snapshot the gradient so no read lock is held while the
            // parameter is written.
            let mut update = pair.grad.to_tensor()?;
            if self.config.weight_decay != 0.0 {
                let theta = pair.param.to_tensor()?;
                update.axpy(weight_decay, &theta)?;
            }
            if self.config.momentum != 0.0 {
                let v = self
                    .velocities
                    .entry(pair.param.id())
                    .or_insert_with(|| Tensor::zeros_like(&update));
                v.scale_assign(momentum);
                v.add_assign(&update)?;
                update = v.clone();
            }
            pair.param.with_mut(|p| p.axpy(neg_lr, &update))??;
        }

        self.steps += 1;
        tracing::debug!(
            step = self.steps,
            pairs = self.registry.len(),
            lr = self.config.lr,
            "SGD step"
        );
        Ok(())
    }

    fn learning_rate(&self) -> f64 {
        self.config.lr
    }

    fn set_learning_rate(&mut self, lr: f64) -> Result<()> {
        SgdConfig { lr, ..self.config }.validate()?;
        self.config.lr = lr;
        Ok(())
    }
}
