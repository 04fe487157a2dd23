use std::fmt;

use crate::error::{Error, Result};

// Shape — dimension sizes of a tensor, outermost first
//
//   Shape([5])        a vector of 5 elements
//   Shape([3, 4])     3 rows of 4 columns
//   Shape([2, 3, 4])  2 stacked 3x4 matrices
//
// Tensors in snnf always have at least one dimension and no zero-sized
// dimension. `Shape` itself can hold anything (it is also used to report
// bad shapes in errors); `validate()` enforces the tensor rule and every
// tensor constructor calls it.
//
// Besides the element count, a shape gives the row-major strides used to
// address the flat buffer and decides whether one tensor can be
// broadcast to another's shape.

/// Dimension sizes of a tensor.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Shape(Vec<usize>);

impl Shape {
    pub fn new(dims: Vec<usize>) -> Self {
        Shape(dims)
    }

    pub fn dims(&self) -> &[usize] {
        &self.0
    }

    /// Number of dimensions (1 for vector, 2 for matrix, etc.).
    pub fn rank(&self) -> usize {
        self.0.len()
    }

    /// Number of elements a tensor of this shape holds.
    pub fn elem_count(&self) -> usize {
        self.0.iter().product::<usize>()
    }

    /// Check that this shape is usable for a tensor: at least one
    /// dimension, and every dimension non-zero.
    pub fn validate(&self) -> Result<()> {
        if self.0.is_empty() {
            return Err(Error::EmptyShape);
        }
        if let Some(dim) = self.0.iter().position(|&d| d == 0) {
            return Err(Error::ZeroDim {
                dim,
                shape: self.clone(),
            });
        }
        Ok(())
    }

    /// Row-major strides: the last dimension is contiguous.
    ///
    /// [2, 3, 4] → [12, 4, 1]
    pub fn stride_contiguous(&self) -> Vec<usize> {
        let mut strides = Vec::with_capacity(self.rank());
        let mut step = 1;
        for &d in self.0.iter().rev() {
            strides.push(step);
            step *= d;
        }
        strides.reverse();
        strides
    }

    /// Size of dimension `d`.
    pub fn dim(&self, d: usize) -> Result<usize> {
        self.0.get(d).copied().ok_or(Error::DimOutOfRange {
            dim: d,
            rank: self.rank(),
        })
    }

    // Broadcasting

    /// Whether a tensor of this shape can be broadcast to `target`.
    ///
    /// Shapes are aligned from the trailing dimension. Every source
    /// dimension must equal the target dimension or be 1, and the source
    /// rank must not exceed the target rank. Missing leading dimensions
    /// are treated as 1.
    ///
    /// Examples:
    ///   [1, 4] → [3, 4]     ok
    ///   [4]    → [2, 3, 4]  ok
    ///   [2, 4] → [3, 4]     not ok (2 ≠ 3 and 2 ≠ 1)
    ///   [2, 3] → [3]        not ok (source rank too large)
    pub fn broadcastable_to(&self, target: &Shape) -> bool {
        let s = self.dims();
        let t = target.dims();
        if s.len() > t.len() {
            return false;
        }
        s.iter()
            .rev()
            .zip(t.iter().rev())
            .all(|(&sd, &td)| sd == td || sd == 1)
    }

    /// Strides that read this shape's buffer as if it had the `target`
    /// shape. Broadcast dimensions (size 1 here, or missing on the left)
    /// get stride 0, so the same element is read repeatedly.
    ///
    /// The caller must have checked `broadcastable_to(target)`.
    pub fn broadcast_strides(&self, target: &Shape) -> Vec<usize> {
        let lead = target.rank() - self.rank();
        let own = self.stride_contiguous();
        let mut strides = vec![0usize; lead];
        strides.extend(
            self.0
                .iter()
                .zip(&target.0[lead..])
                .zip(own)
                .map(|((&sd, &td), st)| if sd == td { st } else { 0 }),
        );
        strides
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.0)
    }
}

impl From<usize> for Shape {
    fn from(d: usize) -> Self {
        Shape(vec![d])
    }
}

macro_rules! shape_from_tuple {
    ($($name:ident),+) => {
        impl From<($(shape_from_tuple!(@usize $name),)+)> for Shape {
            fn from(($($name,)+): ($(shape_from_tuple!(@usize $name),)+)) -> Self {
                Shape(vec![$($name),+])
            }
        }
    };
    (@usize $name:ident) => { usize };
}

shape_from_tuple!(a);
shape_from_tuple!(a, b);
shape_from_tuple!(a, b, c);
shape_from_tuple!(a, b, c, d);

impl From<Vec<usize>> for Shape {
    fn from(dims: Vec<usize>) -> Self {
        Shape(dims)
    }
}

impl From<&[usize]> for Shape {
    fn from(dims: &[usize]) -> Self {
        Shape(dims.to_vec())
    }
}

impl<const N: usize> From<[usize; N]> for Shape {
    fn from(dims: [usize; N]) -> Self {
        Shape(dims.to_vec())
    }
}

impl From<&Shape> for Shape {
    fn from(s: &Shape) -> Self {
        s.clone()
    }
}
