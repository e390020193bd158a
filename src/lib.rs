//! Strided buffer kernels with explicit (length, stride, offset) traversal.
//!
//! Every kernel in this crate walks one or more buffers with independent
//! strides and offsets, applies an elementwise or reduction operation, and
//! writes into a caller-owned destination. Kernels never allocate, never
//! retain a buffer after returning, and hand back a reference to the
//! destination so calls can be chained.
//!
//! # Calling conventions
//!
//! Each kernel comes in two forms:
//!
//! - **ndarray** (`*_ndarray`): the general form, taking an explicit offset for
//!   every buffer: `kernel(n, x, stride_x, offset_x, ..., y, stride_y, offset_y, f)`
//! - **simple**: offsets are derived from the strides with [`stride2offset`],
//!   so a negative stride starts at the far end of the buffer:
//!   `kernel(n, x, stride_x, ..., y, stride_y, f)`
//!
//! `n == 0` is a no-op that returns the destination untouched.
//!
//! # Kernel families
//!
//! - **Elementwise** ([`nullary`], [`unary`], [`binary`], [`ternary`],
//!   [`quaternary`]): exactly `n` applications of `f`, in logical order
//! - **Callback** ([`unary_by`], [`binary_by`]): a per-element callback sees the
//!   value and its positions before `f`, and may skip the element
//! - **Masked** ([`mask_unary`], [`mask_binary`]): writes are skipped where the
//!   parallel mask element is nonzero
//! - **Cumulative sums** ([`cusumpw`], [`cusumkbn`], [`cusumors`]) and
//!   **reductions** ([`sumpw`], [`variancepn`], [`meanvarpn`], ...)
//! - **BLAS level 1** ([`blas`]): `axpy`, `scal`, `copy`, `swap`, `dot`, ...
//! - **dtype dispatch** ([`dispatch`]): kernels over dtype-tagged buffers
//!
//! # Example
//!
//! ```rust
//! use strided_kernels::{binary, cusumpw};
//!
//! let x = [1.0, 2.0, 3.0, 4.0, 5.0];
//! let y = [1.0, 1.0, 1.0, 1.0, 1.0];
//! let mut z = [0.0; 5];
//! binary(5, &x, 1, &y, 1, &mut z, 1, |a: f64, b: f64| a + b);
//! assert_eq!(z, [2.0, 3.0, 4.0, 5.0, 6.0]);
//!
//! let mut out = [0.0; 5];
//! cusumpw(5, 10.0, &x, 1, &mut out, 1);
//! assert_eq!(out, [11.0, 13.0, 16.0, 20.0, 25.0]);
//! ```
//!
//! # Element access
//!
//! Buffers are read and written only through the [`Accessor`] and
//! [`AccessorMut`] traits, so slices, vectors, interleaved complex buffers
//! ([`Interleaved`]) and user-defined accessor objects are interchangeable.
//! The kernels do not validate traversals; use [`check_bounds`] up front
//! when the descriptors come from untrusted input.

pub mod blas;
mod cusum;
pub mod dispatch;
pub mod dists;
mod index;
mod map;
mod map_by;
mod mask;
mod predicate;
mod reduce;

// ============================================================================
// Element access
// ============================================================================
pub use strided_accessor::{
    as_complex, as_complex_mut, as_interleaved, resolve_getter, resolve_setter, Accessor,
    AccessorMut, DType, DynArray, DynArrayMut, Interleaved, Result, StridedError,
};

// ============================================================================
// Index generation and validation
// ============================================================================
pub use index::{check_bounds, check_nonzero_stride, min_max_index, stride2offset, StridedIndex};

// ============================================================================
// Elementwise kernels
// ============================================================================
pub use map::{
    binary, binary_in_place, binary_in_place_ndarray, binary_ndarray, cmap, cmap_ndarray, dmap,
    dmap2, dmap2_ndarray, dmap_ndarray, nullary, nullary_ndarray, quaternary, quaternary_ndarray,
    smap, smap2, smap2_ndarray, smap_ndarray, ternary, ternary_ndarray, unary, unary_in_place,
    unary_in_place_ndarray, unary_ndarray, zmap, zmap_ndarray,
};
pub use map_by::{binary_by, binary_by_ndarray, unary_by, unary_by_ndarray};
pub use mask::{
    dmskmap, dmskmap2, dmskmap2_ndarray, dmskmap_ndarray, mask_binary, mask_binary_ndarray,
    mask_unary, mask_unary_ndarray, smskmap, smskmap_ndarray, MaskValue,
};

// ============================================================================
// Reductions
// ============================================================================
pub use cusum::{
    cusumkbn, cusumkbn_ndarray, cusumors, cusumors_ndarray, cusumpw, cusumpw_in_place,
    cusumpw_in_place_ndarray, cusumpw_ndarray, BLOCKSIZE,
};
pub use reduce::{
    meanvarpn, meanvarpn_ndarray, sumkbn, sumkbn_ndarray, sumors, sumors_ndarray, sumpw,
    sumpw_ndarray, variancepn, variancepn_ndarray,
};

// ============================================================================
// Dtype dispatch
// ============================================================================
pub use dispatch::{binary_dyn, unary_dyn, UnaryDispatch, UnaryKernel};

// ============================================================================
// Predicates
// ============================================================================
pub use predicate::{is_gzip_buffer, GZIP_MIN_LENGTH};
