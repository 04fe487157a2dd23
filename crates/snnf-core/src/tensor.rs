// Tensor — The fundamental data structure
//
// A Tensor<T> is an n-dimensional array of T stored as one contiguous,
// row-major Vec<T>. It is the only numeric container in snnf: layers keep
// their weights, biases, cached inputs and gradients in tensors, and the
// optimizers update tensors in place.
//
// MEMORY MODEL:
//
//   A Tensor exclusively owns its buffer. Clone is a deep copy. There are
//   no views: transpose() and broadcast_to() materialize a new buffer, and
//   reshape() only swaps the shape over the same buffer.
//
//   The invariant `data.len() == shape.elem_count()` holds at all times.
//   Every fallible operation checks shapes *before* touching a buffer, so
//   on error both operands are exactly as they were.
//
// RANK POLICY:
//
//   matmul() and transpose() are defined for rank-2 tensors only and
//   return Error::RankMismatch otherwise. Everything else (elementwise
//   ops, sum, reshape, broadcast_to) works for any rank ≥ 1.

use std::fmt;

use rand::Rng;

use crate::dtype::{DType, WithDType};
use crate::error::{Error, Result};
use crate::init::{Init, DEFAULT_UNIFORM_RANGE};
use crate::rng;
use crate::shape::Shape;

/// An n-dimensional, row-major array that owns its storage.
///
/// # Example
/// ```
/// use snnf_core::Tensor;
///
/// let a = Tensor::<f64>::from_vec(vec![1.0, 2.0, 3.0, 4.0], (2, 2))?;
/// let b = Tensor::<f64>::ones((2, 2))?;
/// let c = a.matmul(&b)?;
/// assert_eq!(c.as_slice(), &[3.0, 3.0, 7.0, 7.0]);
/// # Ok::<(), snnf_core::Error>(())
/// ```
#[derive(Clone, PartialEq)]
pub struct Tensor<T: WithDType> {
    shape: Shape,
    data: Vec<T>,
}

impl<T: WithDType> fmt::Debug for Tensor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Tensor(shape={}, dtype={}, data={:?})",
            self.shape,
            T::DTYPE,
            self.data
        )
    }
}

impl<T: WithDType> Tensor<T> {
    // Creation methods

    /// Allocate a zero-filled tensor of the given shape.
    ///
    /// Fails with `EmptyShape` for a rank-0 shape and `ZeroDim` if any
    /// dimension is zero.
    pub fn new(shape: impl Into<Shape>) -> Result<Self> {
        Self::zeros(shape)
    }

    /// Create a tensor filled with zeros.
    pub fn zeros(shape: impl Into<Shape>) -> Result<Self> {
        Self::full(shape, T::zero())
    }

    /// Create a tensor filled with ones.
    pub fn ones(shape: impl Into<Shape>) -> Result<Self> {
        Self::full(shape, T::one())
    }

    /// Create a tensor with every element set to `value`.
    pub fn full(shape: impl Into<Shape>, value: T) -> Result<Self> {
        let shape = shape.into();
        shape.validate()?;
        let data = vec![value; shape.elem_count()];
        Ok(Tensor { shape, data })
    }

    /// Create a tensor from a row-major buffer.
    pub fn from_vec(data: Vec<T>, shape: impl Into<Shape>) -> Result<Self> {
        let shape = shape.into();
        shape.validate()?;
        if data.len() != shape.elem_count() {
            return Err(Error::ElementCountMismatch {
                expected: shape.elem_count(),
                got: data.len(),
                shape,
            });
        }
        Ok(Tensor { shape, data })
    }

    /// Create a tensor from f64 values, converting to T.
    pub fn from_f64_slice(data: &[f64], shape: impl Into<Shape>) -> Result<Self> {
        Self::from_vec(data.iter().map(|&v| T::from_f64(v)).collect(), shape)
    }

    /// A zero tensor with the same shape as `other`.
    pub fn zeros_like(other: &Self) -> Self {
        Tensor {
            shape: other.shape.clone(),
            data: vec![T::zero(); other.data.len()],
        }
    }

    // Accessors

    /// The shape of this tensor.
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// The dimensions as a slice (shortcut for shape().dims()).
    pub fn dims(&self) -> &[usize] {
        self.shape.dims()
    }

    /// Number of dimensions.
    pub fn rank(&self) -> usize {
        self.shape.rank()
    }

    /// Total number of elements.
    pub fn elem_count(&self) -> usize {
        self.data.len()
    }

    /// Runtime tag of the element type.
    pub fn dtype(&self) -> DType {
        T::DTYPE
    }

    /// Whether `other` has exactly the same shape.
    pub fn same_shape(&self, other: &Self) -> bool {
        self.shape == other.shape
    }

    /// The row-major buffer.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// The row-major buffer, mutably. Its length cannot change.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Copy the buffer out.
    pub fn to_vec(&self) -> Vec<T> {
        self.data.clone()
    }

    /// Copy the buffer out as f64 values.
    pub fn to_f64_vec(&self) -> Vec<f64> {
        self.data.iter().map(|&v| WithDType::to_f64(v)).collect()
    }

    /// Consume the tensor and return its buffer.
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    /// Read one element by its multi-dimensional index.
    pub fn get(&self, index: &[usize]) -> Result<T> {
        if index.len() != self.rank() {
            return Err(Error::RankMismatch {
                expected: self.rank(),
                got: index.len(),
            });
        }
        let mut offset = 0;
        for (d, (&i, stride)) in index
            .iter()
            .zip(self.shape.stride_contiguous())
            .enumerate()
        {
            if i >= self.dims()[d] {
                return Err(Error::msg(format!(
                    "index {} out of bounds for dim {} of size {}",
                    i,
                    d,
                    self.dims()[d]
                )));
            }
            offset += i * stride;
        }
        Ok(self.data[offset])
    }

    // In-place fills

    /// Set every element to `value`.
    pub fn fill(&mut self, value: T) {
        self.data.iter_mut().for_each(|v| *v = value);
    }

    /// Fill with values from `Init::default()` (U(-1, 1)) drawn from this
    /// thread's generator (see [`crate::rng`]).
    pub fn random(&mut self) {
        let values = rng::with_rng(|r| uniform_default(self.data.len(), r));
        self.assign_f64(&values);
    }

    /// Fill with values from `Init::default()` drawn from a caller-supplied generator.
    pub fn random_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let values = uniform_default(self.data.len(), rng);
        self.assign_f64(&values);
    }

    /// Fill with values drawn from `init` using `rng`.
    pub fn init_with<R: Rng + ?Sized>(&mut self, init: Init, rng: &mut R) -> Result<()> {
        let values = init.sample_n(self.data.len(), rng)?;
        self.assign_f64(&values);
        Ok(())
    }

    fn assign_f64(&mut self, values: &[f64]) {
        for (d, &v) in self.data.iter_mut().zip(values) {
            *d = T::from_f64(v);
        }
    }

    // Shape manipulation

    /// Reinterpret the buffer under `new_shape`, in place.
    ///
    /// The element order is unchanged; only the shape is replaced. Fails
    /// with `ReshapeElementMismatch` if the element counts differ.
    pub fn reshape(&mut self, new_shape: impl Into<Shape>) -> Result<()> {
        let new_shape = new_shape.into();
        new_shape.validate()?;
        if new_shape.elem_count() != self.data.len() {
            return Err(Error::ReshapeElementMismatch {
                src: self.data.len(),
                dst: new_shape.elem_count(),
                dst_shape: new_shape,
            });
        }
        self.shape = new_shape;
        Ok(())
    }

    /// Swap the two axes of a rank-2 tensor, returning a new tensor.
    pub fn transpose(&self) -> Result<Self> {
        let (m, n) = self.matrix_dims()?;
        let mut data = Vec::with_capacity(self.data.len());
        for j in 0..n {
            for i in 0..m {
                data.push(self.data[i * n + j]);
            }
        }
        Ok(Tensor {
            shape: Shape::from((n, m)),
            data,
        })
    }

    /// Materialize this tensor at a larger shape by repeating values along
    /// size-1 (or missing leading) dimensions.
    ///
    /// Shapes are aligned from the trailing dimension; each source dim
    /// must be 1 or equal to the target dim. `[1, n] → [m, n]` yields m
    /// copies of the row.
    pub fn broadcast_to(&self, target: impl Into<Shape>) -> Result<Self> {
        let target = target.into();
        target.validate()?;
        if !self.shape.broadcastable_to(&target) {
            return Err(Error::BroadcastIncompatible {
                src: self.shape.clone(),
                dst: target,
            });
        }

        let strides = self.shape.broadcast_strides(&target);
        let dims = target.dims();
        let n = target.elem_count();
        let mut index = vec![0usize; dims.len()];
        let mut data = Vec::with_capacity(n);
        for _ in 0..n {
            let offset: usize = index.iter().zip(&strides).map(|(i, s)| i * s).sum();
            data.push(self.data[offset]);
            // Row-major increment of the multi-index.
            for d in (0..dims.len()).rev() {
                index[d] += 1;
                if index[d] < dims[d] {
                    break;
                }
                index[d] = 0;
            }
        }
        Ok(Tensor {
            shape: target,
            data,
        })
    }

    // Linear algebra

    /// Matrix multiplication: [m, k] @ [k, n] → [m, n].
    ///
    /// Both operands must be rank 2. Products are accumulated in
    /// `T::Accum` and rounded to T once per output element.
    pub fn matmul(&self, rhs: &Self) -> Result<Self> {
        let (m, k1) = self.matrix_dims()?;
        let (k2, n) = rhs.matrix_dims()?;
        if k1 != k2 {
            return Err(Error::MatmulShapeMismatch { m, k1, k2, n });
        }

        let mut data = Vec::with_capacity(m * n);
        let mut row = vec![<T::Accum as num_traits::Zero>::zero(); n];
        for i in 0..m {
            row.iter_mut()
                .for_each(|v| *v = <T::Accum as num_traits::Zero>::zero());
            for p in 0..k1 {
                let a = self.data[i * k1 + p].to_accum();
                let rhs_row = &rhs.data[p * n..(p + 1) * n];
                for (acc, &b) in row.iter_mut().zip(rhs_row) {
                    *acc = *acc + a * b.to_accum();
                }
            }
            data.extend(row.iter().map(|&v| T::from_accum(v)));
        }
        Ok(Tensor {
            shape: Shape::from((m, n)),
            data,
        })
    }

    fn matrix_dims(&self) -> Result<(usize, usize)> {
        match self.dims() {
            &[m, n] => Ok((m, n)),
            _ => Err(Error::RankMismatch {
                expected: 2,
                got: self.rank(),
            }),
        }
    }

    // Elementwise binary ops (identical shapes required)

    /// Elementwise addition. Shapes must be identical; use
    /// [`broadcast_to`](Self::broadcast_to) first to combine different shapes.
    pub fn add(&self, rhs: &Self) -> Result<Self> {
        self.zip_map(rhs, |a, b| a + b)
    }

    /// Elementwise subtraction.
    pub fn sub(&self, rhs: &Self) -> Result<Self> {
        self.zip_map(rhs, |a, b| a - b)
    }

    /// Elementwise (Hadamard) product.
    pub fn mul(&self, rhs: &Self) -> Result<Self> {
        self.zip_map(rhs, |a, b| a * b)
    }

    /// Combine two same-shaped tensors element by element.
    pub fn zip_map(&self, rhs: &Self, f: impl Fn(T, T) -> T) -> Result<Self> {
        self.check_same_shape(rhs)?;
        let data = self
            .data
            .iter()
            .zip(&rhs.data)
            .map(|(&a, &b)| f(a, b))
            .collect();
        Ok(Tensor {
            shape: self.shape.clone(),
            data,
        })
    }

    /// Apply `f` to every element, returning a new tensor.
    pub fn map(&self, f: impl Fn(T) -> T) -> Self {
        Tensor {
            shape: self.shape.clone(),
            data: self.data.iter().map(|&v| f(v)).collect(),
        }
    }

    /// Multiply every element by `factor`.
    pub fn scale(&self, factor: T) -> Self {
        self.map(|v| v * factor)
    }

    fn check_same_shape(&self, rhs: &Self) -> Result<()> {
        if self.shape != rhs.shape {
            return Err(Error::ShapeMismatch {
                expected: self.shape.clone(),
                got: rhs.shape.clone(),
            });
        }
        Ok(())
    }

    // In-place arithmetic assignment

    /// self += rhs
    pub fn add_assign(&mut self, rhs: &Self) -> Result<()> {
        self.axpy(T::one(), rhs)
    }

    /// self -= rhs
    pub fn sub_assign(&mut self, rhs: &Self) -> Result<()> {
        self.axpy(-T::one(), rhs)
    }

    /// self *= factor
    pub fn scale_assign(&mut self, factor: T) {
        self.data.iter_mut().for_each(|v| *v = *v * factor);
    }

    /// self += alpha * x
    pub fn axpy(&mut self, alpha: T, x: &Self) -> Result<()> {
        self.check_same_shape(x)?;
        for (d, &v) in self.data.iter_mut().zip(&x.data) {
            *d = *d + alpha * v;
        }
        Ok(())
    }

    // Reductions

    /// Sum along `axis`, keeping it as a size-1 dimension.
    ///
    /// [b, n].sum(0) → [1, n]; [b, n].sum(1) → [b, 1].
    pub fn sum(&self, axis: usize) -> Result<Self> {
        let dims = self.dims();
        if axis >= dims.len() {
            return Err(Error::DimOutOfRange {
                dim: axis,
                rank: dims.len(),
            });
        }
        let outer: usize = dims[..axis].iter().product();
        let len = dims[axis];
        let inner: usize = dims[axis + 1..].iter().product();

        let mut data = Vec::with_capacity(outer * inner);
        for o in 0..outer {
            for i in 0..inner {
                let mut acc = <T::Accum as num_traits::Zero>::zero();
                for k in 0..len {
                    acc = acc + self.data[(o * len + k) * inner + i].to_accum();
                }
                data.push(T::from_accum(acc));
            }
        }

        let mut out_dims = dims.to_vec();
        out_dims[axis] = 1;
        Ok(Tensor {
            shape: Shape::new(out_dims),
            data,
        })
    }

    /// Sum of all elements.
    pub fn sum_all(&self) -> T {
        let acc = self
            .data
            .iter()
            .fold(<T::Accum as num_traits::Zero>::zero(), |acc, &v| {
                acc + v.to_accum()
            });
        T::from_accum(acc)
    }

    /// Mean of all elements.
    pub fn mean_all(&self) -> T {
        let n = T::from_f64(self.data.len() as f64);
        self.sum_all() / n
    }
}

fn uniform_default<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Vec<f64> {
    let (low, high) = DEFAULT_UNIFORM_RANGE;
    (0..n).map(|_| rng.gen_range(low..high)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn t(data: &[f64], shape: impl Into<Shape>) -> Tensor<f64> {
        Tensor::from_f64_slice(data, shape).unwrap()
    }

    #[test]
    fn test_new_is_zeroed() {
        let x = Tensor::<f32>::new((2, 3)).unwrap();
        assert_eq!(x.dims(), &[2, 3]);
        assert_eq!(x.elem_count(), 6);
        assert!(x.as_slice().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_construct_rejects_bad_shapes() {
        assert!(matches!(
            Tensor::<f32>::new(Vec::<usize>::new()),
            Err(Error::EmptyShape)
        ));
        assert!(matches!(
            Tensor::<f32>::new((3, 0)),
            Err(Error::ZeroDim { dim: 1, .. })
        ));
        assert!(matches!(
            Tensor::<f32>::from_vec(vec![1.0, 2.0, 3.0], (2, 2)),
            Err(Error::ElementCountMismatch {
                expected: 4,
                got: 3,
                ..
            })
        ));
    }

    #[test]
    fn test_fill_and_get() {
        let mut x = Tensor::<f64>::new((2, 2)).unwrap();
        x.fill(3.5);
        assert_eq!(x.as_slice(), &[3.5; 4]);
        assert_eq!(x.get(&[1, 0]).unwrap(), 3.5);
        assert!(x.get(&[2, 0]).is_err());
        assert!(x.get(&[0]).is_err());
    }

    #[test]
    fn test_random_is_seedable() {
        let mut a = Tensor::<f64>::new((4, 4)).unwrap();
        let mut b = Tensor::<f64>::new((4, 4)).unwrap();
        a.random_with(&mut StdRng::seed_from_u64(42));
        b.random_with(&mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
        assert!(a.as_slice().iter().all(|&v| (-1.0..1.0).contains(&v)));
        assert!(a.as_slice().iter().any(|&v| v != 0.0));

        rng::manual_seed(3);
        a.random();
        rng::manual_seed(3);
        b.random();
        assert_eq!(a, b);
    }

    #[test]
    fn test_init_with_normal() {
        let mut x = Tensor::<f32>::new((64, 64)).unwrap();
        x.init_with(Init::Normal { mean: 0.0, std: 0.1 }, &mut StdRng::seed_from_u64(1))
            .unwrap();
        let mean = x.mean_all();
        assert!(mean.abs() < 0.02, "mean {}", mean);
    }

    #[test]
    fn test_reshape_round_trip() {
        let mut x = t(&[1., 2., 3., 4., 5., 6.], (2, 3));
        let original = x.to_vec();
        x.reshape((3, 2)).unwrap();
        assert_eq!(x.dims(), &[3, 2]);
        x.reshape(6).unwrap();
        x.reshape((2, 3)).unwrap();
        assert_eq!(x.dims(), &[2, 3]);
        assert_eq!(x.to_vec(), original);
    }

    #[test]
    fn test_reshape_mismatch_leaves_tensor() {
        let mut x = t(&[1., 2., 3., 4., 5., 6.], (2, 3));
        let err = x.reshape((4, 2)).unwrap_err();
        assert!(matches!(
            err,
            Error::ReshapeElementMismatch { src: 6, dst: 8, .. }
        ));
        assert_eq!(x.dims(), &[2, 3]);
    }

    #[test]
    fn test_transpose() {
        let x = t(&[1., 2., 3., 4., 5., 6.], (2, 3));
        let xt = x.transpose().unwrap();
        assert_eq!(xt.dims(), &[3, 2]);
        assert_eq!(xt.as_slice(), &[1., 4., 2., 5., 3., 6.]);
        assert_eq!(xt.transpose().unwrap(), x);
    }

    #[test]
    fn test_transpose_requires_rank2() {
        let x = t(&[1., 2., 3.], 3);
        assert!(matches!(
            x.transpose(),
            Err(Error::RankMismatch {
                expected: 2,
                got: 1
            })
        ));
    }

    #[test]
    fn test_matmul() {
        // [1 2 3]   [1 0]   [ 4  5]
        // [4 5 6] @ [0 1] = [10 11]
        //           [1 1]
        let a = t(&[1., 2., 3., 4., 5., 6.], (2, 3));
        let b = t(&[1., 0., 0., 1., 1., 1.], (3, 2));
        let c = a.matmul(&b).unwrap();
        assert_eq!(c.dims(), &[2, 2]);
        assert_eq!(c.as_slice(), &[4., 5., 10., 11.]);
    }

    #[test]
    fn test_matmul_shape_mismatch() {
        let a = t(&[0.5; 6], (2, 3));
        let b = t(&[0.25; 20], (4, 5));
        let err = a.matmul(&b).unwrap_err();
        assert!(matches!(
            err,
            Error::MatmulShapeMismatch {
                m: 2,
                k1: 3,
                k2: 4,
                n: 5
            }
        ));
        assert!(err.is_shape_error());
        assert_eq!(a.as_slice(), &[0.5; 6]);
        assert_eq!(b.as_slice(), &[0.25; 20]);
    }

    #[test]
    fn test_matmul_half_precision() {
        let a = Tensor::<half::f16>::from_f64_slice(&[1.0, 2.0], (1, 2)).unwrap();
        let b = Tensor::<half::f16>::from_f64_slice(&[3.0, 4.0], (2, 1)).unwrap();
        let c = a.matmul(&b).unwrap();
        assert_eq!(c.to_f64_vec(), vec![11.0]);
    }

    #[test]
    fn test_add_same_shape() {
        let a = t(&[1., 2., 3., 4.], (2, 2));
        let b = t(&[10., 20., 30., 40.], (2, 2));
        assert_eq!(a.add(&b).unwrap().as_slice(), &[11., 22., 33., 44.]);
        assert_eq!(b.sub(&a).unwrap().as_slice(), &[9., 18., 27., 36.]);
        assert_eq!(a.mul(&a).unwrap().as_slice(), &[1., 4., 9., 16.]);
    }

    #[test]
    fn test_add_shape_mismatch() {
        let a = t(&[1., 2., 3., 4.], (2, 2));
        let b = t(&[1., 2.], (1, 2));
        assert!(matches!(a.add(&b), Err(Error::ShapeMismatch { .. })));
        let b = b.broadcast_to(a.shape()).unwrap();
        assert_eq!(a.add(&b).unwrap().as_slice(), &[2., 4., 4., 6.]);
    }

    #[test]
    fn test_in_place_arithmetic() {
        let mut p = t(&[1.0, 2.0], 2);
        let g = t(&[0.5, 0.5], 2);
        p.axpy(-0.1, &g).unwrap();
        assert_eq!(p.as_slice(), &[0.95, 1.95]);

        let mut q = t(&[1.0, 2.0], 2);
        q.add_assign(&t(&[3.0, 4.0], 2)).unwrap();
        assert_eq!(q.as_slice(), &[4.0, 6.0]);
        q.sub_assign(&t(&[1.0, 1.0], 2)).unwrap();
        q.scale_assign(2.0);
        assert_eq!(q.as_slice(), &[6.0, 10.0]);

        let wrong = t(&[1.0, 2.0, 3.0], 3);
        assert!(q.axpy(1.0, &wrong).is_err());
        assert_eq!(q.as_slice(), &[6.0, 10.0]);
    }

    #[test]
    fn test_sum_keeps_rank() {
        let x = t(&[1., 2., 3., 4., 5., 6.], (2, 3));
        let s0 = x.sum(0).unwrap();
        assert_eq!(s0.dims(), &[1, 3]);
        assert_eq!(s0.as_slice(), &[5., 7., 9.]);
        let s1 = x.sum(1).unwrap();
        assert_eq!(s1.dims(), &[2, 1]);
        assert_eq!(s1.as_slice(), &[6., 15.]);
        assert!(matches!(
            x.sum(2),
            Err(Error::DimOutOfRange { dim: 2, rank: 2 })
        ));
    }

    #[test]
    fn test_sum_3d_middle_axis() {
        let x = t(&(0..12).map(|v| v as f64).collect::<Vec<_>>(), (2, 3, 2));
        let s = x.sum(1).unwrap();
        assert_eq!(s.dims(), &[2, 1, 2]);
        assert_eq!(s.as_slice(), &[6., 9., 24., 27.]);
        assert_eq!(x.sum_all(), 66.0);
        assert_eq!(x.mean_all(), 5.5);
    }

    #[test]
    fn test_broadcast_row() {
        let row = t(&[1., 2., 3.], (1, 3));
        let b = row.broadcast_to((4, 3)).unwrap();
        assert_eq!(b.dims(), &[4, 3]);
        for r in 0..4 {
            assert_eq!(&b.as_slice()[r * 3..(r + 1) * 3], row.as_slice());
        }
    }

    #[test]
    fn test_broadcast_column_and_rank_promotion() {
        let col = t(&[1., 2.], (2, 1));
        assert_eq!(
            col.broadcast_to((2, 3)).unwrap().as_slice(),
            &[1., 1., 1., 2., 2., 2.]
        );
        let v = t(&[7., 8.], 2);
        let b = v.broadcast_to((2, 2, 2)).unwrap();
        assert_eq!(b.as_slice(), &[7., 8., 7., 8., 7., 8., 7., 8.]);
    }

    #[test]
    fn test_broadcast_incompatible() {
        let x = t(&[1., 2., 3., 4.], (2, 2));
        assert!(matches!(
            x.broadcast_to((3, 2)),
            Err(Error::BroadcastIncompatible { .. })
        ));
        assert!(x.broadcast_to(2).is_err());
    }

    #[test]
    fn test_clone_is_deep() {
        let a = t(&[1., 2.], 2);
        let mut b = a.clone();
        b.fill(0.0);
        assert_eq!(a.as_slice(), &[1., 2.]);
    }

    #[test]
    fn test_debug_format() {
        let a = Tensor::<f32>::ones(2).unwrap();
        assert_eq!(
            format!("{:?}", a),
            "Tensor(shape=[2], dtype=f32, data=[1.0, 1.0])"
        );
    }
}
