//! Complex paired-component buffers.
//!
//! A complex buffer of logical length `n` is stored as `2n` real components,
//! `[re0, im0, re1, im1, ...]`. [`Interleaved`] exposes such a real buffer as
//! an accessor of `Complex<F>` without copying; [`as_complex`] and
//! [`as_interleaved`] reinterpret slices in place via `bytemuck`.

use crate::accessor::{Accessor, AccessorMut};
use crate::dtype::DType;
use crate::{Result, StridedError};
use bytemuck::Pod;
use num_complex::Complex;

/// Real component types that can back a complex buffer.
pub trait Component: Copy + Pod + 'static {
    /// Dtype of the complex buffer built from this component.
    const COMPLEX_DTYPE: DType;
}

impl Component for f32 {
    const COMPLEX_DTYPE: DType = DType::Complex64;
}

impl Component for f64 {
    const COMPLEX_DTYPE: DType = DType::Complex128;
}

/// Complex view over an interleaved real buffer.
///
/// Logical index `i` reads physical slots `2i` (real) and `2i+1` (imaginary).
#[derive(Debug, Clone, Copy)]
pub struct Interleaved<B> {
    buf: B,
}

impl<B> Interleaved<B> {
    /// Wraps an interleaved real buffer.
    pub fn new(buf: B) -> Self {
        Self { buf }
    }

    /// Returns the wrapped buffer.
    pub fn into_inner(self) -> B {
        self.buf
    }

    /// Returns a reference to the wrapped buffer.
    pub fn inner(&self) -> &B {
        &self.buf
    }
}

impl<F, B: Accessor<F>> Accessor<Complex<F>> for Interleaved<B> {
    #[inline(always)]
    fn get(&self, index: usize) -> Complex<F> {
        let j = 2 * index;
        Complex::new(self.buf.get(j), self.buf.get(j + 1))
    }

    #[inline(always)]
    fn len(&self) -> usize {
        self.buf.len() / 2
    }
}

impl<F, B: AccessorMut<F>> AccessorMut<Complex<F>> for Interleaved<B> {
    #[inline(always)]
    fn set(&mut self, index: usize, value: Complex<F>) {
        let j = 2 * index;
        self.buf.set(j, value.re);
        self.buf.set(j + 1, value.im);
    }
}

/// Reinterprets an interleaved real slice as complex elements.
///
/// Fails if the slice has an odd number of components.
pub fn as_complex<F: Component>(buf: &[F]) -> Result<&[Complex<F>]> {
    bytemuck::try_cast_slice(buf).map_err(|_| StridedError::InvalidByteLength {
        dtype: F::COMPLEX_DTYPE,
        len: std::mem::size_of_val(buf),
    })
}

/// Mutable variant of [`as_complex`].
pub fn as_complex_mut<F: Component>(buf: &mut [F]) -> Result<&mut [Complex<F>]> {
    let len = std::mem::size_of_val(buf);
    bytemuck::try_cast_slice_mut(buf).map_err(|_| StridedError::InvalidByteLength {
        dtype: F::COMPLEX_DTYPE,
        len,
    })
}

/// Views complex elements as their interleaved real components.
pub fn as_interleaved<F: Component>(buf: &[Complex<F>]) -> &[F] {
    bytemuck::cast_slice(buf)
}
