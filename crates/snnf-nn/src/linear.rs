// Linear — Fully-connected (dense) layer
//
// y = x @ W + b
//
// Linear(in_features, out_features) maps an input of shape
// [batch, in_features] to [batch, out_features].
//
// PARAMETER SHAPES:
//
//   weight:      [in_features, out_features]   — random init
//   bias:        [1, out_features]             — zeros
//   grad_weight: same as weight
//   grad_bias:   same as bias
//
// BIAS BROADCAST:
//
//   When the output shape equals the bias shape (batch of 1) the bias is
//   added directly. Otherwise the bias is broadcast to the output shape
//   and an info-level event is emitted. A bias that cannot be broadcast
//   is a shape error, never silently skipped.
//
// GRADIENTS (dy = grad_output, shape [batch, out_features]):
//
//   dW = x^T @ dy                    [in_features, out_features]
//   db = sum(dy, axis 0)             [1, out_features]
//   dx = dy @ W^T                    [batch, in_features]
//
// Gradients are overwritten on every backward call, not accumulated.

use rand::rngs::StdRng;
use rand::SeedableRng;

use snnf_core::{rng, Error, Init, ParamRef, Parameter, Result, Shape, Tensor, WithDType};

use crate::layer::Layer;

/// Configuration for [`Linear::with_config`].
#[derive(Debug, Clone, PartialEq)]
pub struct LinearConfig {
    /// Distribution for the initial weights.
    pub init: Init,
    /// Seed for a reproducible weight draw. `None` uses this thread's
    /// generator (see `snnf_core::rng`).
    pub seed: Option<u64>,
}

impl Default for LinearConfig {
    fn default() -> Self {
        Self {
            init: Init::default(),
            seed: None,
        }
    }
}

impl LinearConfig {
    pub fn init(mut self, init: Init) -> Self {
        self.init = init;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// A fully-connected layer: y = x @ W + b.
///
/// # Examples
/// ```ignore
/// let mut linear = Linear::<f32>::new(784, 128)?;
/// let y = linear.forward(&x)?;        // x: [32, 784] → y: [32, 128]
/// let dx = linear.backward(&dy)?;     // dy: [32, 128] → dx: [32, 784]
/// ```
pub struct Linear<T: WithDType> {
    in_features: usize,
    out_features: usize,
    weight: Parameter<T>,
    bias: Parameter<T>,
    grad_weight: Parameter<T>,
    grad_bias: Parameter<T>,
    /// Input of the most recent forward call.
    input: Option<Tensor<T>>,
}

impl<T: WithDType> Linear<T> {
    /// Create a layer with weights drawn from U(-1, 1) and a zero bias.
    pub fn new(in_features: usize, out_features: usize) -> Result<Self> {
        Self::with_config(in_features, out_features, LinearConfig::default())
    }

    /// Create a layer whose weights are drawn according to `config`.
    pub fn with_config(
        in_features: usize,
        out_features: usize,
        config: LinearConfig,
    ) -> Result<Self> {
        let mut weight = Tensor::new((in_features, out_features))?;
        match config.seed {
            Some(seed) => weight.init_with(config.init, &mut StdRng::seed_from_u64(seed))?,
            None => rng::with_rng(|r| weight.init_with(config.init, r))?,
        }
        let bias = Tensor::zeros((1, out_features))?;
        Self::from_tensors(weight, bias)
    }

    /// Create a layer from existing weight [in, out] and bias [1, out] tensors.
    pub fn from_tensors(weight: Tensor<T>, bias: Tensor<T>) -> Result<Self> {
        let (in_features, out_features) = match weight.dims() {
            &[i, o] => (i, o),
            _ => {
                return Err(Error::RankMismatch {
                    expected: 2,
                    got: weight.rank(),
                })
            }
        };
        let bias_shape = Shape::from((1, out_features));
        if bias.shape() != &bias_shape {
            return Err(Error::ShapeMismatch {
                expected: bias_shape,
                got: bias.shape().clone(),
            });
        }
        let grad_weight = Tensor::zeros_like(&weight);
        let grad_bias = Tensor::zeros_like(&bias);
        Ok(Linear {
            in_features,
            out_features,
            weight: Parameter::new("weight", weight),
            bias: Parameter::new("bias", bias),
            grad_weight: Parameter::new("grad_weight", grad_weight),
            grad_bias: Parameter::new("grad_bias", grad_bias),
            input: None,
        })
    }

    /// The input feature dimension.
    pub fn in_features(&self) -> usize {
        self.in_features
    }

    /// The output feature dimension.
    pub fn out_features(&self) -> usize {
        self.out_features
    }

    pub fn weight(&self) -> &Parameter<T> {
        &self.weight
    }

    pub fn bias(&self) -> &Parameter<T> {
        &self.bias
    }

    pub fn grad_weight(&self) -> &Parameter<T> {
        &self.grad_weight
    }

    pub fn grad_bias(&self) -> &Parameter<T> {
        &self.grad_bias
    }

    /// The input cached by the last forward call, if any.
    pub fn cached_input(&self) -> Option<&Tensor<T>> {
        self.input.as_ref()
    }
}

impl<T: WithDType> Layer<T> for Linear<T> {
    fn name(&self) -> &'static str {
        "Linear"
    }

    fn forward(&mut self, input: &Tensor<T>) -> Result<Tensor<T>> {
        if input.rank() != 2 {
            return Err(Error::RankMismatch {
                expected: 2,
                got: input.rank(),
            });
        }
        if input.dims()[1] != self.in_features {
            return Err(Error::ShapeMismatch {
                expected: Shape::from((input.dims()[0], self.in_features)),
                got: input.shape().clone(),
            });
        }

        let weight = self.weight.read()?;
        let output = input.matmul(&weight)?;
        let output = {
            let bias = self.bias.read()?;
            if output.same_shape(&bias) {
                output.add(&bias)?
            } else {
                tracing::info!(
                    from = %bias.shape(),
                    to = %output.shape(),
                    "Linear::forward: broadcasting bias to output shape"
                );
                output.add(&bias.broadcast_to(output.shape())?)?
            }
        };

        self.input = Some(input.clone());
        Ok(output)
    }

    fn backward(&mut self, grad_output: &Tensor<T>) -> Result<Tensor<T>> {
        let input = self
            .input
            .as_ref()
            .ok_or(Error::BackwardBeforeForward { layer: "Linear" })?;

        let expected = Shape::from((input.dims()[0], self.out_features));
        if grad_output.shape() != &expected {
            return Err(Error::ShapeMismatch {
                expected,
                got: grad_output.shape().clone(),
            });
        }

        let grad_weight = input.transpose()?.matmul(grad_output)?;
        let mut grad_bias = grad_output.sum(0)?;
        grad_bias.reshape((1, self.out_features))?;
        let grad_input = grad_output.matmul(&self.weight.read()?.transpose()?)?;

        self.grad_weight.assign(&grad_weight)?;
        self.grad_bias.assign(&grad_bias)?;
        Ok(grad_input)
    }

    fn param_pairs(&self) -> Vec<(ParamRef<T>, ParamRef<T>)> {
        vec![
            (self.weight.downgrade(), self.grad_weight.downgrade()),
            (self.bias.downgrade(), self.grad_bias.downgrade()),
        ]
    }

    fn zero_grad(&mut self) -> Result<()> {
        self.grad_weight.fill(T::zero())?;
        self.grad_bias.fill(T::zero())
    }
}
