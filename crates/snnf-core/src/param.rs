// Parameter / ParamRef — Owning and non-owning handles to learnable tensors
//
// A layer owns its weights, biases and gradient buffers as `Parameter<T>`.
// An optimizer must be able to reach those same buffers between calls
// without owning them and without borrowing the layer for its whole
// lifetime (the layer still has to run forward/backward in between).
//
//   Parameter<T>  — owner. Arc<RwLock<Tensor<T>>>, not Clone,
//                   so the layer is the only strong holder.
//   ParamRef<T>   — handle. A Weak pointer to the same cell plus the id.
//                   Reaching a dropped parameter is Error::ParameterDropped.
//
// Writes through either handle copy values into the existing buffer and
// refuse any shape change, so a registered tensor is never reallocated
// or reshaped behind an optimizer's back.

use std::fmt;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard, Weak};

use crate::dtype::WithDType;
use crate::error::{Error, Result};
use crate::shape::Shape;
use crate::tensor::Tensor;

/// Unique identifier of a parameter cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ParamId(u64);

impl Default for ParamId {
    fn default() -> Self {
        Self::new()
    }
}

impl ParamId {
    /// Generate a new unique id (uses a global atomic counter).
    pub fn new() -> Self {
        use std::sync::atomic::{AtomicU64, Ordering};
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        ParamId(COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ParamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A named tensor owned by a layer.
pub struct Parameter<T: WithDType> {
    id: ParamId,
    name: String,
    cell: Arc<RwLock<Tensor<T>>>,
}

impl<T: WithDType> fmt::Debug for Parameter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Parameter")
            .field("id", &self.id)
            .field("name", &self.name)
            .finish()
    }
}

impl<T: WithDType> Parameter<T> {
    /// Wrap `tensor` as a parameter called `name`.
    pub fn new(name: impl Into<String>, tensor: Tensor<T>) -> Self {
        Parameter {
            id: ParamId::new(),
            name: name.into(),
            cell: Arc::new(RwLock::new(tensor)),
        }
    }

    pub fn id(&self) -> ParamId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Read lock on the tensor.
    pub fn read(&self) -> Result<RwLockReadGuard<'_, Tensor<T>>> {
        self.cell.read().map_err(|_| Error::LockPoisoned)
    }

    /// Write lock on the tensor. Callers must not change its shape.
    pub fn write(&self) -> Result<RwLockWriteGuard<'_, Tensor<T>>> {
        self.cell.write().map_err(|_| Error::LockPoisoned)
    }

    /// Current shape.
    pub fn shape(&self) -> Result<Shape> {
        Ok(self.read()?.shape().clone())
    }

    /// A copy of the current value.
    pub fn to_tensor(&self) -> Result<Tensor<T>> {
        Ok(self.read()?.clone())
    }

    /// Overwrite the values with those of `src`, which must have the same shape.
    pub fn assign(&self, src: &Tensor<T>) -> Result<()> {
        let mut guard = self.write()?;
        copy_into(&mut *guard, src)
    }

    /// Set every element to `value`.
    pub fn fill(&self, value: T) -> Result<()> {
        self.write()?.fill(value);
        Ok(())
    }

    /// A non-owning handle to this parameter.
    pub fn downgrade(&self) -> ParamRef<T> {
        ParamRef {
            id: self.id,
            name: self.name.clone(),
            cell: Arc::downgrade(&self.cell),
        }
    }
}

/// A non-owning handle to a [`Parameter`].
///
/// Holds no strong reference: once the owning layer is dropped every
/// access returns [`Error::ParameterDropped`].
pub struct ParamRef<T: WithDType> {
    id: ParamId,
    name: String,
    cell: Weak<RwLock<Tensor<T>>>,
}

impl<T: WithDType> Clone for ParamRef<T> {
    fn clone(&self) -> Self {
        ParamRef {
            id: self.id,
            name: self.name.clone(),
            cell: Weak::clone(&self.cell),
        }
    }
}

impl<T: WithDType> fmt::Debug for ParamRef<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParamRef")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("alive", &self.is_alive())
            .finish()
    }
}

impl<T: WithDType> ParamRef<T> {
    pub fn id(&self) -> ParamId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the owning parameter still exists.
    pub fn is_alive(&self) -> bool {
        self.cell.strong_count() > 0
    }

    fn upgrade(&self) -> Result<Arc<RwLock<Tensor<T>>>> {
        self.cell.upgrade().ok_or(Error::ParameterDropped {
            id: self.id.as_u64(),
        })
    }

    /// Run `f` with shared access to the tensor.
    pub fn with<R>(&self, f: impl FnOnce(&Tensor<T>) -> R) -> Result<R> {
        let cell = self.upgrade()?;
        let guard = cell.read().map_err(|_| Error::LockPoisoned)?;
        Ok(f(&*guard))
    }

    /// Run `f` with exclusive access to the tensor's values.
    ///
    /// The shape is checked afterwards; a closure that reshapes the tensor
    /// gets `Error::ShapeMismatch` and the shape is restored.
    pub fn with_mut<R>(&self, f: impl FnOnce(&mut Tensor<T>) -> R) -> Result<R> {
        let cell = self.upgrade()?;
        let mut guard = cell.write().map_err(|_| Error::LockPoisoned)?;
        let before = guard.shape().clone();
        let out = f(&mut *guard);
        if guard.shape() != &before {
            let got = guard.shape().clone();
            guard.reshape(before.clone())?;
            return Err(Error::ShapeMismatch {
                expected: before,
                got,
            });
        }
        Ok(out)
    }

    /// Current shape.
    pub fn shape(&self) -> Result<Shape> {
        self.with(|t| t.shape().clone())
    }

    /// A copy of the current value.
    pub fn to_tensor(&self) -> Result<Tensor<T>> {
        self.with(|t| t.clone())
    }

    /// Set every element to `value`.
    pub fn fill(&self, value: T) -> Result<()> {
        self.with_mut(|t| t.fill(value))
    }
}

fn copy_into<T: WithDType>(dst: &mut Tensor<T>, src: &Tensor<T>) -> Result<()> {
    if !dst.same_shape(src) {
        return Err(Error::ShapeMismatch {
            expected: dst.shape().clone(),
            got: src.shape().clone(),
        });
    }
    dst.as_mut_slice().copy_from_slice(src.as_slice());
    Ok(())
}
