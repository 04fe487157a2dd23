// Loss functions — value and gradient, computed together
//
// Without autograd, a loss has to hand back both its value (for logging
// and convergence checks) and dLoss/dPrediction (to start backward).
//
//   mse_loss(pred, target)       mean((pred - target)²)
//   gradient                     2 * (pred - target) / N

use snnf_core::{Result, Tensor, WithDType};

/// Mean Squared Error: returns (loss, dLoss/dPrediction).
///
/// Both tensors must have the same shape.
///
/// # Example
/// ```ignore
/// let (loss, grad) = mse_loss(&y_pred, &y_true)?;
/// model.backward(&grad)?;
/// ```
pub fn mse_loss<T: WithDType>(
    prediction: &Tensor<T>,
    target: &Tensor<T>,
) -> Result<(T, Tensor<T>)> {
    let diff = prediction.sub(target)?;
    let loss = diff.mul(&diff)?.mean_all();
    let n = T::from_f64(diff.elem_count() as f64);
    let two = T::one() + T::one();
    let grad = diff.scale(two / n);
    Ok((loss, grad))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mse_value_and_grad() -> Result<()> {
        let pred = Tensor::<f64>::from_f64_slice(&[1.0, 2.0, 3.0, 4.0], (2, 2))?;
        let target = Tensor::from_f64_slice(&[1.0, 0.0, 3.0, 2.0], (2, 2))?;
        let (loss, grad) = mse_loss(&pred, &target)?;
        assert_eq!(loss, 2.0);
        assert_eq!(grad.as_slice(), &[0.0, 1.0, 0.0, 1.0]);
        Ok(())
    }

    #[test]
    fn test_mse_shape_mismatch() -> Result<()> {
        let pred = Tensor::<f32>::zeros((2, 2))?;
        let target = Tensor::zeros((1, 2))?;
        assert!(mse_loss(&pred, &target).unwrap_err().is_shape_error());
        Ok(())
    }
}
