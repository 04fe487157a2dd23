// Init — Distributions for filling tensors with random values
//
// Mirrors the handful of initializers a small engine needs:
//
//   Uniform { low, high }  — U(low, high)
//   Normal { mean, std }   — N(mean, std), via rand_distr
//   Constant(v)            — every element = v
//
// `Init::default()` is U(-1, 1); that is what Tensor::random() uses.
// Values are sampled in f64 and converted to the element type.

use rand::Rng;
use rand_distr::{Distribution, Normal};

use crate::error::{Error, Result};

/// Bounds of `Init::default()`.
pub const DEFAULT_UNIFORM_RANGE: (f64, f64) = (-1.0, 1.0);

/// A value distribution for tensor initialization.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Init {
    /// Uniform on the half-open interval [low, high).
    Uniform { low: f64, high: f64 },
    /// Normal with the given mean and standard deviation.
    Normal { mean: f64, std: f64 },
    /// Every element set to the same value.
    Constant(f64),
}

impl Default for Init {
    fn default() -> Self {
        let (low, high) = DEFAULT_UNIFORM_RANGE;
        Init::Uniform { low, high }
    }
}

impl Init {
    /// Kaiming-style uniform bound for a layer with `fan_in` inputs:
    /// U(-k, k) with k = sqrt(1 / fan_in).
    pub fn kaiming_uniform(fan_in: usize) -> Self {
        let k = (1.0 / fan_in.max(1) as f64).sqrt();
        Init::Uniform { low: -k, high: k }
    }

    /// Xavier/Glorot uniform bound: U(-a, a) with a = sqrt(6 / (fan_in + fan_out)).
    pub fn xavier_uniform(fan_in: usize, fan_out: usize) -> Self {
        let a = (6.0 / (fan_in + fan_out).max(1) as f64).sqrt();
        Init::Uniform { low: -a, high: a }
    }

    /// Check the distribution parameters.
    pub fn validate(&self) -> Result<()> {
        match *self {
            Init::Uniform { low, high } if !(low < high) => Err(Error::msg(format!(
                "uniform init requires low < high, got [{low}, {high})"
            ))),
            Init::Normal { std, .. } if !(std.is_finite() && std >= 0.0) => Err(Error::msg(
                format!("normal init requires a finite, non-negative std, got {std}"),
            )),
            _ => Ok(()),
        }
    }

    /// Draw `n` values from this distribution.
    pub fn sample_n<R: Rng + ?Sized>(&self, n: usize, rng: &mut R) -> Result<Vec<f64>> {
        self.validate()?;
        let values = match *self {
            Init::Uniform { low, high } => (0..n).map(|_| rng.gen_range(low..high)).collect(),
            Init::Normal { mean, std } => {
                let dist = Normal::new(mean, std).map_err(|e| Error::msg(e.to_string()))?;
                (0..n).map(|_| dist.sample(rng)).collect()
            }
            Init::Constant(v) => vec![v; n],
        };
        Ok(values)
    }
}
