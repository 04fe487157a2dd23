use std::fmt;

// DType — Supported element types
//
// A Tensor<T> is generic over its element type; DType is the runtime tag
// for T, used in Debug output and error messages. We support the floating
// types that make sense for a training engine:
//
//   F16  — 16-bit IEEE half float
//   BF16 — 16-bit brain float
//   F32  — 32-bit float, used by most layers
//   F64  — 64-bit float, for high-precision work and exact tests
//
// ACCUMULATION:
//
// Reductions (matmul inner products, sum along an axis) accumulate in
// `WithDType::Accum` and round once at the end: f32 for f16/bf16/f32,
// f64 for f64. Half types would otherwise lose most of their mantissa
// summing long rows.

/// Element type of a tensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DType {
    F16,
    BF16,
    F32,
    F64,
}

impl DType {
    pub fn size_in_bytes(&self) -> usize {
        match self {
            DType::F16 => 2,
            DType::BF16 => 2,
            DType::F32 => 4,
            DType::F64 => 8,
        }
    }

    /// F16 or BF16. Both accumulate in f32.
    pub fn is_half(&self) -> bool {
        matches!(self, DType::F16 | DType::BF16)
    }
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DType::F16 => "f16",
            DType::BF16 => "bf16",
            DType::F32 => "f32",
            DType::F64 => "f64",
        };
        write!(f, "{}", s)
    }
}

// WithDType — maps a Rust scalar type onto its DType
//
// Implemented for f32, f64, half::f16 and half::bf16. Generic code only
// needs `T: WithDType`:
//
//   fn relu<T: WithDType>(x: T) -> T { if x > T::zero() { x } else { T::zero() } }

/// A scalar type a `Tensor` can hold.
///
/// Besides its `DType` tag it names the accumulator used by reductions and
/// converts to and from f64.
pub trait WithDType:
    num_traits::Float + Send + Sync + 'static + fmt::Debug + fmt::Display + Default
{
    /// Tag reported by `Tensor::dtype`.
    const DTYPE: DType;

    /// Accumulator used for inner products and reductions.
    type Accum: num_traits::Float;

    /// Widen to the accumulator type.
    fn to_accum(self) -> Self::Accum;

    /// Round an accumulated value back to the element type.
    fn from_accum(v: Self::Accum) -> Self;

    /// Widen to f64. Call as `WithDType::to_f64(v)` in generic code.
    fn to_f64(self) -> f64;

    /// Narrow from f64, rounding to nearest.
    fn from_f64(v: f64) -> Self;
}

impl WithDType for f32 {
    const DTYPE: DType = DType::F32;
    type Accum = f32;
    fn to_accum(self) -> f32 {
        self
    }
    fn from_accum(v: f32) -> Self {
        v
    }
    fn to_f64(self) -> f64 {
        self as f64
    }
    fn from_f64(v: f64) -> Self {
        v as f32
    }
}

impl WithDType for f64 {
    const DTYPE: DType = DType::F64;
    type Accum = f64;
    fn to_accum(self) -> f64 {
        self
    }
    fn from_accum(v: f64) -> Self {
        v
    }
    fn to_f64(self) -> f64 {
        self
    }
    fn from_f64(v: f64) -> Self {
        v
    }
}

impl WithDType for half::f16 {
    const DTYPE: DType = DType::F16;
    type Accum = f32;
    fn to_accum(self) -> f32 {
        self.to_f32()
    }
    fn from_accum(v: f32) -> Self {
        half::f16::from_f32(v)
    }
    fn to_f64(self) -> f64 {
        self.to_f64()
    }
    fn from_f64(v: f64) -> Self {
        half::f16::from_f64(v)
    }
}

impl WithDType for half::bf16 {
    const DTYPE: DType = DType::BF16;
    type Accum = f32;
    fn to_accum(self) -> f32 {
        self.to_f32()
    }
    fn from_accum(v: f32) -> Self {
        half::bf16::from_f32(v)
    }
    fn to_f64(self) -> f64 {
        self.to_f64()
    }
    fn from_f64(v: f64) -> Self {
        half::bf16::from_f64(v)
    }
}
