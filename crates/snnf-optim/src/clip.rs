// Gradient clipping — rescale registered gradients in place
//
//   grad_norm(reg)                 √(Σ g²) over every registered gradient
//   clip_grad_norm(reg, max)       if norm > max, scale all gradients by max/norm
//   clip_grad_value(reg, limit)    clamp every element to [-limit, limit]
//
// Call between backward() and step(). Unlike step(), these do write to
// the gradient buffers.

use snnf_core::{bail, Result, WithDType};

use crate::optimizer::ParamRegistry;

/// Global L2 norm of all registered gradients.
pub fn grad_norm<T: WithDType>(registry: &ParamRegistry<T>) -> Result<f64> {
    let mut total = 0.0f64;
    for pair in registry.pairs() {
        total += pair.grad.with(|g| {
            g.as_slice()
                .iter()
                .map(|&v| {
                    let v = WithDType::to_f64(v);
                    v * v
                })
                .sum::<f64>()
        })?;
    }
    Ok(total.sqrt())
}

/// Rescale gradients so their global norm is at most `max_norm`.
///
/// Returns the norm measured before clipping.
pub fn clip_grad_norm<T: WithDType>(registry: &ParamRegistry<T>, max_norm: f64) -> Result<f64> {
    if max_norm.is_nan() || max_norm <= 0.0 {
        bail!("clip_grad_norm: max_norm must be positive, got {max_norm}");
    }
    let norm = grad_norm(registry)?;
    if norm > max_norm {
        let factor = T::from_f64(max_norm / norm);
        for pair in registry.pairs() {
            pair.grad.with_mut(|g| g.scale_assign(factor))?;
        }
        tracing::debug!(norm, max_norm, "clipped gradients");
    }
    Ok(norm)
}

/// Clamp every gradient element to `[-limit, limit]`.
pub fn clip_grad_value<T: WithDType>(registry: &ParamRegistry<T>, limit: f64) -> Result<()> {
    if limit.is_nan() || limit < 0.0 {
        bail!("clip_grad_value: limit must be non-negative, got {limit}");
    }
    let (lo, hi) = (T::from_f64(-limit), T::from_f64(limit));
    for pair in registry.pairs() {
        pair.grad.with_mut(|g| {
            g.as_mut_slice().iter_mut().for_each(|v| *v = (*v).max(lo).min(hi));
        })?;
    }
    Ok(())
}
