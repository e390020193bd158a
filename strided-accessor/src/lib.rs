//! Element access shared across the strided-kernels ecosystem.
//!
//! This crate provides the accessor traits that kernels read and write
//! through, so that external crates can implement them for their own buffer
//! types without orphan rule violations.
//!
//! # Core Types
//!
//! - [`Accessor`] / [`AccessorMut`]: get/set protocol over a buffer, implemented
//!   for slices, vectors and arrays, and by any accessor-protocol object
//! - [`Interleaved`]: complex view over a paired-component real buffer
//!   (logical element `i` lives in physical slots `2i` and `2i+1`)
//! - [`DType`]: data type tags for runtime dispatch
//! - [`DynArray`] / [`DynArrayMut`]: dtype-tagged views resolved into
//!   monomorphic getter/setter closures once per kernel call
//!
//! # Example
//!
//! ```rust
//! use strided_accessor::{Accessor, AccessorMut, Interleaved};
//! use num_complex::Complex32;
//!
//! let mut buf = vec![1.0f32, 2.0, 3.0, 4.0];
//! let mut z = Interleaved::new(&mut buf[..]);
//! assert_eq!(Accessor::<Complex32>::len(&z), 2);
//! assert_eq!(z.get(1), Complex32::new(3.0, 4.0));
//!
//! z.set(0, Complex32::new(-1.0, -2.0));
//! assert_eq!(buf, vec![-1.0, -2.0, 3.0, 4.0]);
//! ```

pub mod accessor;
pub mod complex;
pub mod dtype;
pub mod dyn_array;

pub use accessor::{resolve_getter, resolve_setter, Accessor, AccessorMut};
pub use complex::{as_complex, as_complex_mut, as_interleaved, Interleaved};
pub use dtype::DType;
pub use dyn_array::{
    resolve_complex_getter, resolve_complex_setter, resolve_dyn_getter, resolve_dyn_setter,
    ComplexGetter, ComplexSetter, DynArray, DynArrayMut, Getter, Setter,
};

// ============================================================================
// Error types
// ============================================================================

/// Errors raised by the validation layer and by dtype resolution.
///
/// Kernel cores never produce these; they assume well-formed descriptors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StridedError {
    /// A strided traversal would reach outside the buffer.
    #[error("index {index} out of bounds for buffer of length {len}")]
    OutOfBounds { index: isize, len: usize },

    /// Two buffers that must have the same logical length do not.
    #[error("length mismatch: {0} vs {1}")]
    LengthMismatch(usize, usize),

    /// Zero stride where the operation requires a nonzero one.
    #[error("invalid stride 0")]
    ZeroStride,

    /// A dtype name that is not recognized.
    #[error("unknown dtype: {0}")]
    UnknownDType(String),

    /// A buffer does not have the dtype the accessor was resolved for.
    #[error("dtype mismatch: expected {expected}, found {found}")]
    DTypeMismatch { expected: &'static str, found: DType },

    /// Raw bytes cannot be viewed as the requested dtype.
    #[error("cannot view {len} bytes as {dtype}")]
    InvalidByteLength { dtype: DType, len: usize },

    /// No kernel is registered for the given dtype signature.
    #[error("unsupported dtype signature: {0:?}")]
    UnsupportedSignature(Vec<DType>),

    /// A generator state has the wrong shape.
    #[error("invalid state: expected length {expected}, found {found}")]
    InvalidState { expected: usize, found: usize },

    /// A generator seed is outside the supported range.
    #[error("invalid seed")]
    InvalidSeed,
}

/// Result type for strided operations.
pub type Result<T> = std::result::Result<T, StridedError>;
