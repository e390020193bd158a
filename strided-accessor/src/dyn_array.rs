//! Dtype-tagged buffer views and runtime accessor resolution.
//!
//! [`DynArray`] and [`DynArrayMut`] tag a borrowed buffer with its [`DType`].
//! A kernel working on tagged buffers resolves a getter for each input and a
//! setter for the output once, up front, and then runs its loop through
//! those closures without further dtype branching.
//!
//! Real dtypes resolve into the `f64` value domain and complex dtypes into
//! `Complex<f64>`. Asking for the wrong domain is an error rather than a
//! best-effort reinterpretation.

use crate::accessor::{Accessor, AccessorMut};
use crate::dtype::DType;
use crate::{Result, StridedError};
use num_complex::{Complex32, Complex64};

/// Getter in the real value domain.
pub type Getter<'a> = Box<dyn Fn(usize) -> f64 + 'a>;

/// Setter in the real value domain.
pub type Setter<'a> = Box<dyn FnMut(usize, f64) + 'a>;

/// Getter in the complex value domain.
pub type ComplexGetter<'a> = Box<dyn Fn(usize) -> Complex64 + 'a>;

/// Setter in the complex value domain.
pub type ComplexSetter<'a> = Box<dyn FnMut(usize, Complex64) + 'a>;

/// Immutable dtype-tagged buffer view.
#[derive(Clone, Copy)]
pub enum DynArray<'a> {
    Float64(&'a [f64]),
    Float32(&'a [f32]),
    Int32(&'a [i32]),
    Int16(&'a [i16]),
    Int8(&'a [i8]),
    Uint32(&'a [u32]),
    Uint16(&'a [u16]),
    Uint8(&'a [u8]),
    Uint8c(&'a [u8]),
    Bool(&'a [bool]),
    Complex128(&'a [Complex64]),
    Complex64(&'a [Complex32]),
    Generic(&'a dyn Accessor<f64>),
}

/// Mutable dtype-tagged buffer view.
pub enum DynArrayMut<'a> {
    Float64(&'a mut [f64]),
    Float32(&'a mut [f32]),
    Int32(&'a mut [i32]),
    Int16(&'a mut [i16]),
    Int8(&'a mut [i8]),
    Uint32(&'a mut [u32]),
    Uint16(&'a mut [u16]),
    Uint8(&'a mut [u8]),
    Uint8c(&'a mut [u8]),
    Bool(&'a mut [bool]),
    Complex128(&'a mut [Complex64]),
    Complex64(&'a mut [Complex32]),
    Generic(&'a mut dyn AccessorMut<f64>),
}

macro_rules! cast_bytes {
    ($bytes:expr, $dtype:expr, $variant:ident) => {
        bytemuck::try_cast_slice($bytes)
            .map(Self::$variant)
            .map_err(|_| StridedError::InvalidByteLength {
                dtype: $dtype,
                len: $bytes.len(),
            })
    };
}

impl<'a> DynArray<'a> {
    /// Views raw bytes as a buffer of `dtype`.
    ///
    /// Fails fast when the byte length is not a multiple of the element size,
    /// when the bytes are misaligned for the element type, or when the dtype
    /// has no fixed byte layout (`bool`, `generic`).
    pub fn from_bytes(dtype: DType, bytes: &'a [u8]) -> Result<Self> {
        match dtype {
            DType::Float64 => cast_bytes!(bytes, dtype, Float64),
            DType::Float32 => cast_bytes!(bytes, dtype, Float32),
            DType::Int32 => cast_bytes!(bytes, dtype, Int32),
            DType::Int16 => cast_bytes!(bytes, dtype, Int16),
            DType::Int8 => cast_bytes!(bytes, dtype, Int8),
            DType::Uint32 => cast_bytes!(bytes, dtype, Uint32),
            DType::Uint16 => cast_bytes!(bytes, dtype, Uint16),
            DType::Uint8 => Ok(DynArray::Uint8(bytes)),
            DType::Uint8c => Ok(DynArray::Uint8c(bytes)),
            DType::Complex128 => cast_bytes!(bytes, dtype, Complex128),
            DType::Complex64 => cast_bytes!(bytes, dtype, Complex64),
            DType::Bool | DType::Generic => Err(StridedError::DTypeMismatch {
                expected: "fixed-layout dtype",
                found: dtype,
            }),
        }
    }

    /// Data type tag of this view.
    pub fn dtype(&self) -> DType {
        match self {
            DynArray::Float64(_) => DType::Float64,
            DynArray::Float32(_) => DType::Float32,
            DynArray::Int32(_) => DType::Int32,
            DynArray::Int16(_) => DType::Int16,
            DynArray::Int8(_) => DType::Int8,
            DynArray::Uint32(_) => DType::Uint32,
            DynArray::Uint16(_) => DType::Uint16,
            DynArray::Uint8(_) => DType::Uint8,
            DynArray::Uint8c(_) => DType::Uint8c,
            DynArray::Bool(_) => DType::Bool,
            DynArray::Complex128(_) => DType::Complex128,
            DynArray::Complex64(_) => DType::Complex64,
            DynArray::Generic(_) => DType::Generic,
        }
    }

    /// Number of logical elements.
    pub fn len(&self) -> usize {
        match self {
            DynArray::Float64(x) => x.len(),
            DynArray::Float32(x) => x.len(),
            DynArray::Int32(x) => x.len(),
            DynArray::Int16(x) => x.len(),
            DynArray::Int8(x) => x.len(),
            DynArray::Uint32(x) => x.len(),
            DynArray::Uint16(x) => x.len(),
            DynArray::Uint8(x) | DynArray::Uint8c(x) => x.len(),
            DynArray::Bool(x) => x.len(),
            DynArray::Complex128(x) => x.len(),
            DynArray::Complex64(x) => x.len(),
            DynArray::Generic(x) => x.len(),
        }
    }

    /// Returns true if the view has no elements.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<'a> DynArrayMut<'a> {
    /// Data type tag of this view.
    pub fn dtype(&self) -> DType {
        match self {
            DynArrayMut::Float64(_) => DType::Float64,
            DynArrayMut::Float32(_) => DType::Float32,
            DynArrayMut::Int32(_) => DType::Int32,
            DynArrayMut::Int16(_) => DType::Int16,
            DynArrayMut::Int8(_) => DType::Int8,
            DynArrayMut::Uint32(_) => DType::Uint32,
            DynArrayMut::Uint16(_) => DType::Uint16,
            DynArrayMut::Uint8(_) => DType::Uint8,
            DynArrayMut::Uint8c(_) => DType::Uint8c,
            DynArrayMut::Bool(_) => DType::Bool,
            DynArrayMut::Complex128(_) => DType::Complex128,
            DynArrayMut::Complex64(_) => DType::Complex64,
            DynArrayMut::Generic(_) => DType::Generic,
        }
    }

    /// Number of logical elements.
    pub fn len(&self) -> usize {
        match self {
            DynArrayMut::Float64(x) => x.len(),
            DynArrayMut::Float32(x) => x.len(),
            DynArrayMut::Int32(x) => x.len(),
            DynArrayMut::Int16(x) => x.len(),
            DynArrayMut::Int8(x) => x.len(),
            DynArrayMut::Uint32(x) => x.len(),
            DynArrayMut::Uint16(x) => x.len(),
            DynArrayMut::Uint8(x) | DynArrayMut::Uint8c(x) => x.len(),
            DynArrayMut::Bool(x) => x.len(),
            DynArrayMut::Complex128(x) => x.len(),
            DynArrayMut::Complex64(x) => x.len(),
            DynArrayMut::Generic(x) => x.len(),
        }
    }

    /// Returns true if the view has no elements.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// ============================================================================
// Write coercion (typed-array semantics)
// ============================================================================

/// Truncates toward zero and wraps modulo 2^32; non-finite values map to 0.
#[inline(always)]
fn wrap32(v: f64) -> i64 {
    if v.is_finite() {
        (v.trunc() % 4_294_967_296.0) as i64
    } else {
        0
    }
}

/// Clamps to `[0, 255]` and rounds half to even; NaN maps to 0.
#[inline(always)]
fn clamp_u8(v: f64) -> u8 {
    if v.is_nan() {
        0
    } else {
        v.clamp(0.0, 255.0).round_ties_even() as u8
    }
}

#[inline(always)]
fn to_bool(v: f64) -> bool {
    v != 0.0 && !v.is_nan()
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolves a real-domain getter for `arr`.
///
/// Fails with [`StridedError::DTypeMismatch`] for complex dtypes.
pub fn resolve_dyn_getter<'a>(arr: DynArray<'a>) -> Result<Getter<'a>> {
    tracing::debug!(dtype = %arr.dtype(), "resolving real getter");
    let getter: Getter<'a> = match arr {
        DynArray::Float64(x) => Box::new(move |i: usize| x[i]),
        DynArray::Float32(x) => Box::new(move |i: usize| f64::from(x[i])),
        DynArray::Int32(x) => Box::new(move |i: usize| f64::from(x[i])),
        DynArray::Int16(x) => Box::new(move |i: usize| f64::from(x[i])),
        DynArray::Int8(x) => Box::new(move |i: usize| f64::from(x[i])),
        DynArray::Uint32(x) => Box::new(move |i: usize| f64::from(x[i])),
        DynArray::Uint16(x) => Box::new(move |i: usize| f64::from(x[i])),
        DynArray::Uint8(x) | DynArray::Uint8c(x) => Box::new(move |i: usize| f64::from(x[i])),
        DynArray::Bool(x) => Box::new(move |i: usize| if x[i] { 1.0 } else { 0.0 }),
        DynArray::Generic(x) => Box::new(move |i: usize| x.get(i)),
        DynArray::Complex128(_) | DynArray::Complex64(_) => {
            return Err(StridedError::DTypeMismatch {
                expected: "real dtype",
                found: arr.dtype(),
            })
        }
    };
    Ok(getter)
}

/// Resolves a real-domain setter for `arr`, consuming the mutable borrow.
///
/// Values are coerced to the buffer's dtype the way typed arrays coerce:
/// integers truncate and wrap, `uint8c` clamps, `bool` stores `v != 0`.
pub fn resolve_dyn_setter<'a>(arr: DynArrayMut<'a>) -> Result<Setter<'a>> {
    let dtype = arr.dtype();
    tracing::debug!(dtype = %dtype, "resolving real setter");
    let setter: Setter<'a> = match arr {
        DynArrayMut::Float64(y) => Box::new(move |i: usize, v: f64| y[i] = v),
        DynArrayMut::Float32(y) => Box::new(move |i: usize, v: f64| y[i] = v as f32),
        DynArrayMut::Int32(y) => Box::new(move |i: usize, v: f64| y[i] = wrap32(v) as i32),
        DynArrayMut::Int16(y) => Box::new(move |i: usize, v: f64| y[i] = wrap32(v) as i16),
        DynArrayMut::Int8(y) => Box::new(move |i: usize, v: f64| y[i] = wrap32(v) as i8),
        DynArrayMut::Uint32(y) => Box::new(move |i: usize, v: f64| y[i] = wrap32(v) as u32),
        DynArrayMut::Uint16(y) => Box::new(move |i: usize, v: f64| y[i] = wrap32(v) as u16),
        DynArrayMut::Uint8(y) => Box::new(move |i: usize, v: f64| y[i] = wrap32(v) as u8),
        DynArrayMut::Uint8c(y) => Box::new(move |i: usize, v: f64| y[i] = clamp_u8(v)),
        DynArrayMut::Bool(y) => Box::new(move |i: usize, v: f64| y[i] = to_bool(v)),
        DynArrayMut::Generic(y) => Box::new(move |i: usize, v: f64| y.set(i, v)),
        DynArrayMut::Complex128(_) | DynArrayMut::Complex64(_) => {
            return Err(StridedError::DTypeMismatch {
                expected: "real dtype",
                found: dtype,
            })
        }
    };
    Ok(setter)
}

/// Resolves a complex-domain getter for `arr`.
pub fn resolve_complex_getter<'a>(arr: DynArray<'a>) -> Result<ComplexGetter<'a>> {
    tracing::debug!(dtype = %arr.dtype(), "resolving complex getter");
    match arr {
        DynArray::Complex128(x) => Ok(Box::new(move |i: usize| x[i])),
        DynArray::Complex64(x) => Ok(Box::new(move |i: usize| {
            let z = x[i];
            Complex64::new(f64::from(z.re), f64::from(z.im))
        })),
        _ => Err(StridedError::DTypeMismatch {
            expected: "complex dtype",
            found: arr.dtype(),
        }),
    }
}

/// Resolves a complex-domain setter for `arr`, consuming the mutable borrow.
pub fn resolve_complex_setter<'a>(arr: DynArrayMut<'a>) -> Result<ComplexSetter<'a>> {
    let dtype = arr.dtype();
    tracing::debug!(dtype = %dtype, "resolving complex setter");
    match arr {
        DynArrayMut::Complex128(y) => Ok(Box::new(move |i: usize, v: Complex64| y[i] = v)),
        DynArrayMut::Complex64(y) => Ok(Box::new(move |i: usize, v: Complex64| {
            y[i] = Complex32::new(v.re as f32, v.im as f32)
        })),
        _ => Err(StridedError::DTypeMismatch {
            expected: "complex dtype",
            found: dtype,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_getter_widens_integers() {
        let x = [-3i8, 4, 127];
        let get = resolve_dyn_getter(DynArray::Int8(&x)).unwrap();
        assert_eq!(get(0), -3.0);
        assert_eq!(get(2), 127.0);
    }

    #[test]
    fn test_getter_bool() {
        let x = [true, false];
        let get = resolve_dyn_getter(DynArray::Bool(&x)).unwrap();
        assert_eq!(get(0), 1.0);
        assert_eq!(get(1), 0.0);
    }

    #[test]
    fn test_getter_rejects_complex() {
        let x = [Complex64::new(1.0, 2.0)];
        let err = resolve_dyn_getter(DynArray::Complex128(&x)).err().unwrap();
        assert_eq!(
            err,
            StridedError::DTypeMismatch {
                expected: "real dtype",
                found: DType::Complex128
            }
        );
    }

    #[test]
    fn test_setter_integer_wraps() {
        let mut y = [0i8; 3];
        {
            let mut set = resolve_dyn_setter(DynArrayMut::Int8(&mut y)).unwrap();
            set(0, 300.7);
            set(1, -129.0);
            set(2, f64::NAN);
        }
        assert_eq!(y, [44, 127, 0]);
    }

    #[test]
    fn test_setter_uint32_wraps_negative() {
        let mut y = [0u32; 2];
        {
            let mut set = resolve_dyn_setter(DynArrayMut::Uint32(&mut y)).unwrap();
            set(0, -1.0);
            set(1, f64::INFINITY);
        }
        assert_eq!(y, [4_294_967_295, 0]);
    }

    #[test]
    fn test_setter_uint8c_clamps_and_rounds_half_even() {
        let mut y = [0u8; 5];
        {
            let mut set = resolve_dyn_setter(DynArrayMut::Uint8c(&mut y)).unwrap();
            set(0, 300.0);
            set(1, -5.0);
            set(2, 2.5);
            set(3, 3.5);
            set(4, f64::NAN);
        }
        assert_eq!(y, [255, 0, 2, 4, 0]);
    }

    #[test]
    fn test_setter_bool() {
        let mut y = [true; 3];
        {
            let mut set = resolve_dyn_setter(DynArrayMut::Bool(&mut y)).unwrap();
            set(0, 0.0);
            set(1, f64::NAN);
            set(2, -2.0);
        }
        assert_eq!(y, [false, false, true]);
    }

    #[test]
    fn test_generic_accessor_roundtrip() {
        let mut backing = vec![1.0f64, 2.0];
        {
            let mut set = resolve_dyn_setter(DynArrayMut::Generic(&mut backing)).unwrap();
            set(1, 5.0);
        }
        let get = resolve_dyn_getter(DynArray::Generic(&backing)).unwrap();
        assert_eq!(get(1), 5.0);
    }

    #[test]
    fn test_complex_getter_setter() {
        let x = [Complex32::new(1.0, -1.0)];
        let mut y = [Complex64::new(0.0, 0.0)];
        {
            let get = resolve_complex_getter(DynArray::Complex64(&x)).unwrap();
            let mut set = resolve_complex_setter(DynArrayMut::Complex128(&mut y)).unwrap();
            set(0, get(0) * 2.0);
        }
        assert_eq!(y[0], Complex64::new(2.0, -2.0));
    }

    #[test]
    fn test_complex_getter_rejects_real() {
        let x = [1.0f64];
        assert!(resolve_complex_getter(DynArray::Float64(&x)).is_err());
    }

    #[test]
    fn test_from_bytes() {
        let values = [1.5f64, -2.0];
        let bytes: &[u8] = bytemuck::cast_slice(&values);
        let arr = DynArray::from_bytes(DType::Float64, bytes).unwrap();
        assert_eq!(arr.dtype(), DType::Float64);
        assert_eq!(arr.len(), 2);
        let get = resolve_dyn_getter(arr).unwrap();
        assert_eq!(get(1), -2.0);
    }

    #[test]
    fn test_from_bytes_bad_length_fails_fast() {
        let values = [0u16; 3];
        let bytes: &[u8] = bytemuck::cast_slice(&values);
        let err = DynArray::from_bytes(DType::Float32, bytes).err().unwrap();
        assert_eq!(
            err,
            StridedError::InvalidByteLength {
                dtype: DType::Float32,
                len: 6
            }
        );
    }

    #[test]
    fn test_from_bytes_rejects_layoutless_dtypes() {
        let bytes = [0u8, 1];
        assert!(DynArray::from_bytes(DType::Bool, &bytes).is_err());
        assert!(DynArray::from_bytes(DType::Generic, &bytes).is_err());
    }
}
