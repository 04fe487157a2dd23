// Adam — Adaptive Moment Estimation
//
// Keeps running estimates of the gradient's first moment (mean) and second
// moment (uncentered variance) per parameter:
//
//   m ← β₁·m + (1-β₁)·g
//   v ← β₂·v + (1-β₂)·g²
//   m̂ = m / (1-β₁ᵗ)
//   v̂ = v / (1-β₂ᵗ)
//   θ ← θ - lr · m̂ / (√v̂ + ε)
//
// Weight decay λ is applied as L2 regularization (g ← g + λθ) before the
// moment updates.

use std::collections::HashMap;

use snnf_core::{bail, ParamId, Result, Tensor, WithDType};

use crate::optimizer::{Optimizer, ParamRegistry};

/// Hyperparameters for [`Adam`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdamConfig {
    pub lr: f64,
    pub beta1: f64,
    pub beta2: f64,
    pub eps: f64,
    pub weight_decay: f64,
}

impl Default for AdamConfig {
    fn default() -> Self {
        AdamConfig {
            lr: 1e-3,
            beta1: 0.9,
            beta2: 0.999,
            eps: 1e-8,
            weight_decay: 0.0,
        }
    }
}

impl AdamConfig {
    pub fn lr(mut self, lr: f64) -> Self {
        self.lr = lr;
        self
    }

    pub fn betas(mut self, beta1: f64, beta2: f64) -> Self {
        self.beta1 = beta1;
        self.beta2 = beta2;
        self
    }

    pub fn eps(mut self, eps: f64) -> Self {
        self.eps = eps;
        self
    }

    pub fn weight_decay(mut self, weight_decay: f64) -> Self {
        self.weight_decay = weight_decay;
        self
    }

    fn validate(&self) -> Result<()> {
        if !self.lr.is_finite() || self.lr < 0.0 {
            bail!("Adam: invalid learning rate {}", self.lr);
        }
        for (name, beta) in [("beta1", self.beta1), ("beta2", self.beta2)] {
            if !(0.0..1.0).contains(&beta) {
                bail!("Adam: {name} must be in [0, 1), got {beta}");
            }
        }
        if self.eps.is_nan() || self.eps <= 0.0 {
            bail!("Adam: eps must be positive, got {}", self.eps);
        }
        if !self.weight_decay.is_finite() || self.weight_decay < 0.0 {
            bail!("Adam: invalid weight decay {}", self.weight_decay);
        }
        Ok(())
    }
}

/// Per-parameter moment buffers.
#[derive(Debug)]
struct Moments<T: WithDType> {
    m: Tensor<T>,
    v: Tensor<T>,
}

/// The Adam optimizer.
#[derive(Debug)]
pub struct Adam<T: WithDType> {
    registry: ParamRegistry<T>,
    config: AdamConfig,
    moments: HashMap<ParamId, Moments<T>>,
    t: u64,
}

impl<T: WithDType> Adam<T> {
    /// Adam with default betas and epsilon.
    pub fn new(lr: f64) -> Result<Self> {
        Self::with_config(AdamConfig::default().lr(lr))
    }

    pub fn with_config(config: AdamConfig) -> Result<Self> {
        config.validate()?;
        Ok(Adam {
            registry: ParamRegistry::new(),
            config,
            moments: HashMap::new(),
            t: 0,
        })
    }

    pub fn config(&self) -> &AdamConfig {
        &self.config
    }

    /// Number of completed steps.
    pub fn steps(&self) -> u64 {
        self.t
    }
}

impl<T: WithDType> Optimizer<T> for Adam<T> {
    fn registry(&self) -> &ParamRegistry<T> {
        &self.registry
    }

    fn registry_mut(&mut self) -> &mut ParamRegistry<T> {
        &mut self.registry
    }

    fn step(&mut self) -> Result<()> {
        self.registry.check_all()?;

        let t = self.t + 1;
        let AdamConfig {
            lr,
            beta1,
            beta2,
            eps,
            weight_decay,
        } = self.config;
        // beta^t is already 0 long before t leaves i32 range
        let exp = i32::try_from(t).unwrap_or(i32::MAX);
        let bias_correction1 = 1.0 - beta1.powi(exp);
        let bias_correction2 = 1.0 - beta2.powi(exp);

        let (b1, b2) = (T::from_f64(beta1), T::from_f64(beta2));
        let (one_minus_b1, one_minus_b2) = (T::from_f64(1.0 - beta1), T::from_f64(1.0 - beta2));
        let (bc1, bc2) = (T::from_f64(bias_correction1), T::from_f64(bias_correction2));
        let (lr_t, eps_t, wd) = (T::from_f64(lr), T::from_f64(eps), T::from_f64(weight_decay));

        for pair in self.registry.pairs() {
            let mut grad = pair.grad.to_tensor()?;
            if weight_decay != 0.0 {
                let theta = pair.param.to_tensor()?;
                grad.axpy(wd, &theta)?;
            }

            let state = self.moments.entry(pair.param.id()).or_insert_with(|| Moments {
                m: Tensor::zeros_like(&grad),
                v: Tensor::zeros_like(&grad),
            });
            let step_dir: Vec<T> = state
                .m
                .as_mut_slice()
                .iter_mut()
                .zip(state.v.as_mut_slice().iter_mut())
                .zip(grad.as_slice())
                .map(|((m, v), &g)| {
                    *m = b1 * *m + one_minus_b1 * g;
                    *v = b2 * *v + one_minus_b2 * g * g;
                    let m_hat = *m / bc1;
                    let v_hat = *v / bc2;
                    lr_t * m_hat / (v_hat.sqrt() + eps_t)
                })
                .collect();
            let step_dir = Tensor::from_vec(step_dir, grad.shape().clone())?;

            pair.param.with_mut(|p| p.sub_assign(&step_dir))??;
        }

        self.t = t;
        tracing::debug!(step = self.t, pairs = self.registry.len(), lr, "Adam step");
        Ok(())
    }

    fn learning_rate(&self) -> f64 {
        self.config.lr
    }

    fn set_learning_rate(&mut self, lr: f64) -> Result<()> {
        AdamConfig { lr, ..self.config }.validate()?;
        self.config.lr = lr;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use snnf_core::{Error, Parameter};

    // eps shifts each step by up to lr·eps/|g|
    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-7
    }

    #[test]
    fn test_first_step_moves_by_lr() -> Result<()> {
        // With bias correction, the first step is lr · g/|g| (up to eps).
        let p = Parameter::new("p", Tensor::<f64>::from_f64_slice(&[1.0, 1.0], 2)?);
        let g = Parameter::new("g", Tensor::from_f64_slice(&[0.3, -4.0], 2)?);
        let mut adam = Adam::new(0.1)?;
        adam.add_parameters(vec![p.downgrade(), g.downgrade()])?;
        adam.step()?;
        let got = p.to_tensor()?.to_vec();
        assert!(approx(got[0], 0.9), "got {got:?}");
        assert!(approx(got[1], 1.1), "got {got:?}");
        assert_eq!(adam.steps(), 1);
        Ok(())
    }

    #[test]
    fn test_minimizes_quadratic() -> Result<()> {
        // f(x) = x², grad = 2x
        let x = Parameter::new("x", Tensor::<f64>::from_f64_slice(&[3.0], 1)?);
        let g = Parameter::new("g", Tensor::zeros(1)?);
        let mut adam = Adam::new(0.1)?;
        adam.add_parameters(vec![x.downgrade(), g.downgrade()])?;
        for _ in 0..500 {
            let grad = x.to_tensor()?.scale(2.0);
            g.assign(&grad)?;
            adam.step()?;
        }
        let final_x = x.to_tensor()?.as_slice()[0];
        assert!(final_x.abs() < 0.1, "x = {final_x}");
        Ok(())
    }

    #[test]
    fn test_step_after_drop() -> Result<()> {
        let p = Parameter::new("p", Tensor::<f32>::zeros(1)?);
        let g = Parameter::new("g", Tensor::zeros(1)?);
        let mut adam = Adam::new(0.1)?;
        adam.add_parameters(vec![p.downgrade(), g.downgrade()])?;
        drop(p);
        assert!(matches!(adam.step(), Err(Error::ParameterDropped { .. })));
        Ok(())
    }

    #[test]
    fn test_bias_correction_past_i32_steps() -> Result<()> {
        // Once beta^t underflows, m̂ = m and v̂ = v: the step is lr·0.1/√0.001.
        let p = Parameter::new("p", Tensor::<f64>::from_f64_slice(&[1.0], 1)?);
        let g = Parameter::new("g", Tensor::from_f64_slice(&[1.0], 1)?);
        let mut adam = Adam::with_config(AdamConfig::default().lr(0.1).eps(1e-12))?;
        adam.add_parameters(vec![p.downgrade(), g.downgrade()])?;
        adam.t = u64::from(u32::MAX) + 4;
        adam.step()?;
        let got = p.to_tensor()?.as_slice()[0];
        assert!(approx(got, 1.0 - 0.1 * 0.1 / 0.001f64.sqrt()), "got {got}");
        Ok(())
    }

    #[test]
    fn test_set_learning_rate_validates() -> Result<()> {
        let mut adam = Adam::<f32>::new(0.1)?;
        adam.set_learning_rate(0.05)?;
        assert_eq!(adam.learning_rate(), 0.05);
        assert!(adam.set_learning_rate(f64::INFINITY).is_err());
        assert_eq!(adam.learning_rate(), 0.05);
        Ok(())
    }

    #[test]
    fn test_invalid_config() {
        assert!(Adam::<f32>::with_config(AdamConfig::default().betas(1.0, 0.999)).is_err());
        assert!(Adam::<f32>::with_config(AdamConfig::default().eps(0.0)).is_err());
    }
}
