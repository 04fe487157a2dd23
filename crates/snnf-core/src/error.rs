use crate::shape::Shape;

/// All errors that can occur within snnf.
///
/// The variants fall into three families:
/// - shape errors: operand shapes are structurally incompatible
/// - state errors: an operation was called out of order, or a registered
///   parameter no longer exists
/// - registration errors: an optimizer was handed an invalid parameter list
///
/// Every failing operation validates before mutating anything, so the
/// operands are unchanged when one of these is returned.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Two shapes that had to be equal differ.
    #[error("shape mismatch: expected {expected}, got {got}")]
    ShapeMismatch { expected: Shape, got: Shape },

    /// Wrong number of dimensions (matmul and transpose need 2).
    #[error("rank mismatch: expected rank {expected}, got {got}")]
    RankMismatch { expected: usize, got: usize },

    /// Axis index out of range for the tensor's rank.
    #[error("dimension out of range: dim {dim} for tensor with {rank} dimensions")]
    DimOutOfRange { dim: usize, rank: usize },

    /// Inner dimensions of a matmul differ.
    #[error("matmul shape mismatch: [{m}x{k1}] @ [{k2}x{n}], inner dims must match")]
    MatmulShapeMismatch {
        m: usize,
        k1: usize,
        k2: usize,
        n: usize,
    },

    /// Reshape target holds a different number of elements.
    #[error(
        "cannot reshape: source has {src} elements, target shape {dst_shape} has {dst} elements"
    )]
    ReshapeElementMismatch {
        src: usize,
        dst: usize,
        dst_shape: Shape,
    },

    /// Source shape cannot be broadcast to the target shape.
    #[error("cannot broadcast {src} to {dst}")]
    BroadcastIncompatible { src: Shape, dst: Shape },

    /// Buffer length does not match the requested shape.
    #[error("element count mismatch: shape {shape} requires {expected} elements, got {got}")]
    ElementCountMismatch {
        shape: Shape,
        expected: usize,
        got: usize,
    },

    /// Tensors need at least one dimension.
    #[error("tensor shape must have at least one dimension")]
    EmptyShape,

    /// Zero-sized dimensions are not supported.
    #[error("zero-sized dimension {dim} in shape {shape}")]
    ZeroDim { dim: usize, shape: Shape },

    /// backward() was called before any forward() on the layer.
    #[error("{layer}: backward called before forward")]
    BackwardBeforeForward { layer: &'static str },

    /// An optimizer still references a parameter whose owner was dropped.
    #[error("parameter {id} is no longer alive (its layer was dropped)")]
    ParameterDropped { id: u64 },

    /// A parameter lock was poisoned by a panic in another scope.
    #[error("parameter lock poisoned")]
    LockPoisoned,

    /// Invalid optimizer registration (odd pairing, duplicate parameter, ...).
    #[error("registration error: {0}")]
    Registration(String),

    /// Anything else, e.g. an invalid optimizer hyperparameter.
    #[error("{0}")]
    Msg(String),
}

impl Error {
    /// Build an `Error::Msg`.
    pub fn msg(s: impl Into<String>) -> Self {
        Error::Msg(s.into())
    }

    /// Create a registration error from any string message.
    pub fn registration(s: impl Into<String>) -> Self {
        Error::Registration(s.into())
    }

    /// Whether this error reports structurally incompatible shapes.
    pub fn is_shape_error(&self) -> bool {
        matches!(
            self,
            Error::ShapeMismatch { .. }
                | Error::RankMismatch { .. }
                | Error::DimOutOfRange { .. }
                | Error::MatmulShapeMismatch { .. }
                | Error::ReshapeElementMismatch { .. }
                | Error::BroadcastIncompatible { .. }
                | Error::ElementCountMismatch { .. }
                | Error::EmptyShape
                | Error::ZeroDim { .. }
        )
    }

    /// Whether this error reports an operation called in an invalid state.
    pub fn is_state_error(&self) -> bool {
        matches!(
            self,
            Error::BackwardBeforeForward { .. }
                | Error::ParameterDropped { .. }
                | Error::LockPoisoned
        )
    }
}

/// Convenience Result type used throughout snnf.
pub type Result<T> = std::result::Result<T, Error>;

/// Return early with an `Error::Msg` built from format arguments:
/// `bail!("invalid learning rate {}", lr)`
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return Err($crate::Error::Msg(format!($($arg)*)))
    };
}
