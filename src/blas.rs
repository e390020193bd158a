//! BLAS level 1 routines over strided buffers.
//!
//! Every routine follows the reference BLAS argument order, with each buffer
//! described by its own stride and offset. These are plain loops over the
//! accessor protocol, so they work on any buffer type, including
//! accessor-protocol objects and interleaved complex views.

use crate::{stride2offset, Accessor, AccessorMut, StridedIndex};
use num_traits::{Float, Zero};
use std::ops::{Add, Mul};

// ============================================================================
// Vector updates
// ============================================================================

/// `y = alpha * x + y` (ndarray form).
///
/// When `alpha` is zero, `y` is returned untouched.
#[allow(clippy::too_many_arguments)]
pub fn axpy_ndarray<'y, T, X, Y>(
    n: usize,
    alpha: T,
    x: &X,
    stride_x: isize,
    offset_x: usize,
    y: &'y mut Y,
    stride_y: isize,
    offset_y: usize,
) -> &'y mut Y
where
    T: Copy + Zero + Add<Output = T> + Mul<Output = T>,
    X: Accessor<T> + ?Sized,
    Y: AccessorMut<T> + ?Sized,
{
    if alpha.is_zero() {
        return y;
    }
    let xs = StridedIndex::new(n, stride_x, offset_x);
    let ys = StridedIndex::new(n, stride_y, offset_y);
    for (ix, iy) in xs.zip(ys) {
        let v = alpha * x.get(ix) + y.get(iy);
        y.set(iy, v);
    }
    y
}

/// `y = alpha * x + y`.
pub fn axpy<'y, T, X, Y>(
    n: usize,
    alpha: T,
    x: &X,
    stride_x: isize,
    y: &'y mut Y,
    stride_y: isize,
) -> &'y mut Y
where
    T: Copy + Zero + Add<Output = T> + Mul<Output = T>,
    X: Accessor<T> + ?Sized,
    Y: AccessorMut<T> + ?Sized,
{
    axpy_ndarray(
        n,
        alpha,
        x,
        stride_x,
        stride2offset(n, stride_x),
        y,
        stride_y,
        stride2offset(n, stride_y),
    )
}

/// `x = alpha * x` (ndarray form).
pub fn scal_ndarray<'x, T, X>(
    n: usize,
    alpha: T,
    x: &'x mut X,
    stride_x: isize,
    offset_x: usize,
) -> &'x mut X
where
    T: Copy + Mul<Output = T>,
    X: AccessorMut<T> + ?Sized,
{
    for ix in StridedIndex::new(n, stride_x, offset_x) {
        let v = alpha * x.get(ix);
        x.set(ix, v);
    }
    x
}

/// `x = alpha * x`.
///
/// # Example
///
/// ```rust
/// use strided_kernels::blas::scal;
///
/// let mut x = [1.0, 2.0, 3.0, 4.0];
/// scal(2, 10.0, &mut x, 2);
/// assert_eq!(x, [10.0, 2.0, 30.0, 4.0]);
/// ```
pub fn scal<'x, T, X>(n: usize, alpha: T, x: &'x mut X, stride_x: isize) -> &'x mut X
where
    T: Copy + Mul<Output = T>,
    X: AccessorMut<T> + ?Sized,
{
    scal_ndarray(n, alpha, x, stride_x, stride2offset(n, stride_x))
}

/// Copies `x` into `y` (ndarray form).
pub fn copy_ndarray<'y, T, X, Y>(
    n: usize,
    x: &X,
    stride_x: isize,
    offset_x: usize,
    y: &'y mut Y,
    stride_y: isize,
    offset_y: usize,
) -> &'y mut Y
where
    X: Accessor<T> + ?Sized,
    Y: AccessorMut<T> + ?Sized,
{
    let xs = StridedIndex::new(n, stride_x, offset_x);
    let ys = StridedIndex::new(n, stride_y, offset_y);
    for (ix, iy) in xs.zip(ys) {
        y.set(iy, x.get(ix));
    }
    y
}

/// Copies `x` into `y`.
pub fn copy<'y, T, X, Y>(
    n: usize,
    x: &X,
    stride_x: isize,
    y: &'y mut Y,
    stride_y: isize,
) -> &'y mut Y
where
    X: Accessor<T> + ?Sized,
    Y: AccessorMut<T> + ?Sized,
{
    copy_ndarray(
        n,
        x,
        stride_x,
        stride2offset(n, stride_x),
        y,
        stride_y,
        stride2offset(n, stride_y),
    )
}

/// Exchanges the elements of `x` and `y` (ndarray form).
pub fn swap_ndarray<T, X, Y>(
    n: usize,
    x: &mut X,
    stride_x: isize,
    offset_x: usize,
    y: &mut Y,
    stride_y: isize,
    offset_y: usize,
) where
    X: AccessorMut<T> + ?Sized,
    Y: AccessorMut<T> + ?Sized,
{
    let xs = StridedIndex::new(n, stride_x, offset_x);
    let ys = StridedIndex::new(n, stride_y, offset_y);
    for (ix, iy) in xs.zip(ys) {
        let t = x.get(ix);
        x.set(ix, y.get(iy));
        y.set(iy, t);
    }
}

/// Exchanges the elements of `x` and `y`.
pub fn swap<T, X, Y>(n: usize, x: &mut X, stride_x: isize, y: &mut Y, stride_y: isize)
where
    X: AccessorMut<T> + ?Sized,
    Y: AccessorMut<T> + ?Sized,
{
    let offset_x = stride2offset(n, stride_x);
    swap_ndarray(n, x, stride_x, offset_x, y, stride_y, stride2offset(n, stride_y))
}

/// Applies a plane rotation to `(x, y)` (ndarray form):
/// `x' = c*x + s*y`, `y' = c*y - s*x`.
#[allow(clippy::too_many_arguments)]
pub fn rot_ndarray<T, X, Y>(
    n: usize,
    x: &mut X,
    stride_x: isize,
    offset_x: usize,
    y: &mut Y,
    stride_y: isize,
    offset_y: usize,
    c: T,
    s: T,
) where
    T: Float,
    X: AccessorMut<T> + ?Sized,
    Y: AccessorMut<T> + ?Sized,
{
    let xs = StridedIndex::new(n, stride_x, offset_x);
    let ys = StridedIndex::new(n, stride_y, offset_y);
    for (ix, iy) in xs.zip(ys) {
        let a = x.get(ix);
        let b = y.get(iy);
        x.set(ix, c * a + s * b);
        y.set(iy, c * b - s * a);
    }
}

/// Applies a plane rotation to `(x, y)`.
#[allow(clippy::too_many_arguments)]
pub fn rot<T, X, Y>(
    n: usize,
    x: &mut X,
    stride_x: isize,
    y: &mut Y,
    stride_y: isize,
    c: T,
    s: T,
) where
    T: Float,
    X: AccessorMut<T> + ?Sized,
    Y: AccessorMut<T> + ?Sized,
{
    let offset_x = stride2offset(n, stride_x);
    let offset_y = stride2offset(n, stride_y);
    rot_ndarray(n, x, stride_x, offset_x, y, stride_y, offset_y, c, s)
}

// ============================================================================
// Reductions
// ============================================================================

/// Dot product `x · y` (ndarray form).
pub fn dot_ndarray<T, X, Y>(
    n: usize,
    x: &X,
    stride_x: isize,
    offset_x: usize,
    y: &Y,
    stride_y: isize,
    offset_y: usize,
) -> T
where
    T: Copy + Zero + Add<Output = T> + Mul<Output = T>,
    X: Accessor<T> + ?Sized,
    Y: Accessor<T> + ?Sized,
{
    let xs = StridedIndex::new(n, stride_x, offset_x);
    let ys = StridedIndex::new(n, stride_y, offset_y);
    xs.zip(ys)
        .fold(T::zero(), |acc, (ix, iy)| acc + x.get(ix) * y.get(iy))
}

/// Dot product `x · y`.
pub fn dot<T, X, Y>(n: usize, x: &X, stride_x: isize, y: &Y, stride_y: isize) -> T
where
    T: Copy + Zero + Add<Output = T> + Mul<Output = T>,
    X: Accessor<T> + ?Sized,
    Y: Accessor<T> + ?Sized,
{
    let offset_x = stride2offset(n, stride_x);
    dot_ndarray(n, x, stride_x, offset_x, y, stride_y, stride2offset(n, stride_y))
}

/// Sum of absolute values (ndarray form).
pub fn asum_ndarray<T, X>(n: usize, x: &X, stride_x: isize, offset_x: usize) -> T
where
    T: Float,
    X: Accessor<T> + ?Sized,
{
    StridedIndex::new(n, stride_x, offset_x).fold(T::zero(), |acc, ix| acc + x.get(ix).abs())
}

/// Sum of absolute values.
pub fn asum<T, X>(n: usize, x: &X, stride_x: isize) -> T
where
    T: Float,
    X: Accessor<T> + ?Sized,
{
    asum_ndarray(n, x, stride_x, stride2offset(n, stride_x))
}

/// Euclidean norm (ndarray form).
///
/// Accumulates a scaled sum of squares so that intermediate values neither
/// overflow nor underflow.
pub fn nrm2_ndarray<T, X>(n: usize, x: &X, stride_x: isize, offset_x: usize) -> T
where
    T: Float,
    X: Accessor<T> + ?Sized,
{
    let mut scale = T::zero();
    let mut ssq = T::one();
    for ix in StridedIndex::new(n, stride_x, offset_x) {
        let v = x.get(ix);
        if v.is_nan() {
            return v;
        }
        if v.is_zero() {
            continue;
        }
        let a = v.abs();
        if a.is_infinite() {
            return a;
        }
        if scale < a {
            let r = scale / a;
            ssq = T::one() + ssq * r * r;
            scale = a;
        } else {
            let r = a / scale;
            ssq = ssq + r * r;
        }
    }
    scale * ssq.sqrt()
}

/// Euclidean norm.
pub fn nrm2<T, X>(n: usize, x: &X, stride_x: isize) -> T
where
    T: Float,
    X: Accessor<T> + ?Sized,
{
    nrm2_ndarray(n, x, stride_x, stride2offset(n, stride_x))
}

/// Logical index of the first element with the largest absolute value
/// (ndarray form). `None` when `n == 0`.
pub fn iamax_ndarray<T, X>(n: usize, x: &X, stride_x: isize, offset_x: usize) -> Option<usize>
where
    T: Float,
    X: Accessor<T> + ?Sized,
{
    let mut best: Option<(usize, T)> = None;
    for (i, ix) in StridedIndex::new(n, stride_x, offset_x).enumerate() {
        let a = x.get(ix).abs();
        match best {
            Some((_, m)) if a <= m || a.is_nan() => {}
            _ => best = Some((i, a)),
        }
    }
    best.map(|(i, _)| i)
}

/// Logical index of the first element with the largest absolute value.
pub fn iamax<T, X>(n: usize, x: &X, stride_x: isize) -> Option<usize>
where
    T: Float,
    X: Accessor<T> + ?Sized,
{
    iamax_ndarray(n, x, stride_x, stride2offset(n, stride_x))
}
