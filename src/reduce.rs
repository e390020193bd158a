//! Strided reductions: sums, mean and variance.

use crate::cusum::BLOCKSIZE;
use crate::{stride2offset, Accessor, AccessorMut, StridedIndex};
use num_traits::Float;

#[inline(always)]
fn from_usize<T: Float>(n: usize) -> T {
    T::from(n).unwrap_or_else(T::nan)
}

// ============================================================================
// Sums
// ============================================================================

/// Sums `x` using pairwise summation (ndarray form).
///
/// A zero stride sums `n` copies of the element at `offset_x`.
pub fn sumpw_ndarray<T, X>(n: usize, x: &X, stride_x: isize, offset_x: usize) -> T
where
    T: Float,
    X: Accessor<T> + ?Sized,
{
    if n == 0 {
        return T::zero();
    }
    if stride_x == 0 {
        return from_usize::<T>(n) * x.get(offset_x);
    }
    pairwise_sum(n, x, stride_x, offset_x as isize)
}

/// Sums `x` using pairwise summation.
pub fn sumpw<T, X>(n: usize, x: &X, stride_x: isize) -> T
where
    T: Float,
    X: Accessor<T> + ?Sized,
{
    sumpw_ndarray(n, x, stride_x, stride2offset(n, stride_x))
}

fn pairwise_sum<T, X>(n: usize, x: &X, stride: isize, ix: isize) -> T
where
    T: Float,
    X: Accessor<T> + ?Sized,
{
    if n < 8 {
        return StridedIndex::new(n, stride, ix as usize).fold(T::zero(), |s, i| s + x.get(i));
    }
    if n <= BLOCKSIZE {
        let at = |k: isize| x.get((ix + k * stride) as usize);
        let mut acc = [at(0), at(1), at(2), at(3), at(4), at(5), at(6), at(7)];
        let m = n % 8;
        let mut base = 8;
        while base < n - m {
            for (j, a) in acc.iter_mut().enumerate() {
                *a = *a + at((base + j) as isize);
            }
            base += 8;
        }
        let mut sum =
            ((acc[0] + acc[1]) + (acc[2] + acc[3])) + ((acc[4] + acc[5]) + (acc[6] + acc[7]));
        for k in base..n {
            sum = sum + at(k as isize);
        }
        return sum;
    }
    let mut half = n / 2;
    half -= half % 8;
    pairwise_sum(half, x, stride, ix)
        + pairwise_sum(n - half, x, stride, ix + half as isize * stride)
}

/// Sums `x` using compensated summation (ndarray form).
pub fn sumkbn_ndarray<T, X>(n: usize, x: &X, stride_x: isize, offset_x: usize) -> T
where
    T: Float,
    X: Accessor<T> + ?Sized,
{
    let mut sum = T::zero();
    let mut c = T::zero();
    for ix in StridedIndex::new(n, stride_x, offset_x) {
        let v = x.get(ix);
        let t = sum + v;
        if sum.abs() >= v.abs() {
            c = c + ((sum - t) + v);
        } else {
            c = c + ((v - t) + sum);
        }
        sum = t;
    }
    sum + c
}

/// Sums `x` using compensated summation.
pub fn sumkbn<T, X>(n: usize, x: &X, stride_x: isize) -> T
where
    T: Float,
    X: Accessor<T> + ?Sized,
{
    sumkbn_ndarray(n, x, stride_x, stride2offset(n, stride_x))
}

/// Sums `x` with a single running total (ndarray form).
pub fn sumors_ndarray<T, X>(n: usize, x: &X, stride_x: isize, offset_x: usize) -> T
where
    T: Float,
    X: Accessor<T> + ?Sized,
{
    StridedIndex::new(n, stride_x, offset_x).fold(T::zero(), |s, ix| s + x.get(ix))
}

/// Sums `x` with a single running total.
pub fn sumors<T, X>(n: usize, x: &X, stride_x: isize) -> T
where
    T: Float,
    X: Accessor<T> + ?Sized,
{
    sumors_ndarray(n, x, stride_x, stride2offset(n, stride_x))
}

// ============================================================================
// Mean / variance
// ============================================================================

/// Two-pass mean and variance.
///
/// The mean is computed by pairwise summation, then the variance from the
/// deviations about it with a correction term for the rounding error in the
/// mean.
fn mean_variance<T, X>(
    n: usize,
    correction: T,
    x: &X,
    stride_x: isize,
    offset_x: usize,
) -> (T, T)
where
    T: Float,
    X: Accessor<T> + ?Sized,
{
    if n == 0 {
        return (T::nan(), T::nan());
    }
    let big_n = from_usize::<T>(n);
    let dof = big_n - correction;
    if n == 1 || stride_x == 0 {
        let mean = x.get(offset_x);
        let var = if dof > T::zero() { T::zero() } else { T::nan() };
        return (mean, var);
    }
    let mean = sumpw_ndarray(n, x, stride_x, offset_x) / big_n;
    if mean.is_nan() || dof <= T::zero() {
        return (mean, T::nan());
    }
    let mut m2 = T::zero();
    let mut m = T::zero();
    for ix in StridedIndex::new(n, stride_x, offset_x) {
        let d = x.get(ix) - mean;
        m2 = m2 + d * d;
        m = m + d;
    }
    (mean, (m2 / dof) - ((m / big_n) * (m / dof)))
}

/// Computes the mean and variance of `x` and writes them to `out`
/// (ndarray form).
///
/// The mean lands at `out[offset_out]` and the variance at
/// `out[offset_out + stride_out]`. `correction` is subtracted from `n` in
/// the denominator (`1.0` for the sample variance).
///
/// `n == 0` writes NaN twice, and the variance is NaN whenever
/// `n - correction <= 0`.
#[allow(clippy::too_many_arguments)]
pub fn meanvarpn_ndarray<'o, T, X, O>(
    n: usize,
    correction: T,
    x: &X,
    stride_x: isize,
    offset_x: usize,
    out: &'o mut O,
    stride_out: isize,
    offset_out: usize,
) -> &'o mut O
where
    T: Float,
    X: Accessor<T> + ?Sized,
    O: AccessorMut<T> + ?Sized,
{
    let (mean, var) = mean_variance(n, correction, x, stride_x, offset_x);
    let mut slots = StridedIndex::new(2, stride_out, offset_out);
    if let (Some(im), Some(iv)) = (slots.next(), slots.next()) {
        out.set(im, mean);
        out.set(iv, var);
    }
    out
}

/// Computes the mean and variance of `x` and writes them to `out`.
///
/// # Example
///
/// ```rust
/// use strided_kernels::meanvarpn;
///
/// let x = [1.0, -2.0, 4.0, -1.0, 3.0];
/// let mut out = [0.0; 2];
/// meanvarpn(5, 1.0, &x, 1, &mut out, 1);
/// assert_eq!(out, [1.0, 6.5]);
/// ```
pub fn meanvarpn<'o, T, X, O>(
    n: usize,
    correction: T,
    x: &X,
    stride_x: isize,
    out: &'o mut O,
    stride_out: isize,
) -> &'o mut O
where
    T: Float,
    X: Accessor<T> + ?Sized,
    O: AccessorMut<T> + ?Sized,
{
    meanvarpn_ndarray(
        n,
        correction,
        x,
        stride_x,
        stride2offset(n, stride_x),
        out,
        stride_out,
        stride2offset(2, stride_out),
    )
}

/// Computes the variance of `x` with a two-pass algorithm (ndarray form).
pub fn variancepn_ndarray<T, X>(
    n: usize,
    correction: T,
    x: &X,
    stride_x: isize,
    offset_x: usize,
) -> T
where
    T: Float,
    X: Accessor<T> + ?Sized,
{
    mean_variance(n, correction, x, stride_x, offset_x).1
}

/// Computes the variance of `x` with a two-pass algorithm.
///
/// # Example
///
/// ```rust
/// use strided_kernels::variancepn;
///
/// let x = [1.0, -2.0, 2.0];
/// let var: f64 = variancepn(3, 1.0, &x, 1);
/// assert!((var - 13.0 / 3.0).abs() < 1e-12);
/// ```
pub fn variancepn<T, X>(n: usize, correction: T, x: &X, stride_x: isize) -> T
where
    T: Float,
    X: Accessor<T> + ?Sized,
{
    variancepn_ndarray(n, correction, x, stride_x, stride2offset(n, stride_x))
}
