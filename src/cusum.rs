//! Cumulative sums over strided buffers.
//!
//! All variants compute `y[i] = sum + x[0] + ... + x[i]` for a seed `sum`.
//! They differ in how the running total is accumulated:
//!
//! - [`cusumpw`]: pairwise summation in blocks of [`BLOCKSIZE`] elements
//! - [`cusumkbn`]: Kahan-Babuska-Neumaier compensated summation
//! - [`cusumors`]: ordinary recursive summation

use crate::{stride2offset, Accessor, AccessorMut, StridedIndex};
use num_traits::Float;

/// Block size below which pairwise routines fall back to a plain loop.
pub const BLOCKSIZE: usize = 128;

// ============================================================================
// Pairwise
// ============================================================================

/// Computes the cumulative sum of `x` into `y` using pairwise summation
/// (ndarray form).
///
/// Traversals longer than [`BLOCKSIZE`] are split in half. The second half
/// is seeded from the last output written by the first, so once a NaN has
/// been written every later output is NaN.
#[allow(clippy::too_many_arguments)]
pub fn cusumpw_ndarray<'y, T, X, Y>(
    n: usize,
    sum: T,
    x: &X,
    stride_x: isize,
    offset_x: usize,
    y: &'y mut Y,
    stride_y: isize,
    offset_y: usize,
) -> &'y mut Y
where
    T: Float,
    X: Accessor<T> + ?Sized,
    Y: AccessorMut<T> + ?Sized,
{
    if n == 0 {
        return y;
    }
    pairwise(n, sum, x, stride_x, offset_x as isize, y, stride_y, offset_y as isize);
    y
}

/// Computes the cumulative sum of `x` into `y` using pairwise summation.
pub fn cusumpw<'y, T, X, Y>(
    n: usize,
    sum: T,
    x: &X,
    stride_x: isize,
    y: &'y mut Y,
    stride_y: isize,
) -> &'y mut Y
where
    T: Float,
    X: Accessor<T> + ?Sized,
    Y: AccessorMut<T> + ?Sized,
{
    cusumpw_ndarray(
        n,
        sum,
        x,
        stride_x,
        stride2offset(n, stride_x),
        y,
        stride_y,
        stride2offset(n, stride_y),
    )
}

#[allow(clippy::too_many_arguments)]
fn pairwise<T, X, Y>(
    n: usize,
    sum: T,
    x: &X,
    stride_x: isize,
    ix: isize,
    y: &mut Y,
    stride_y: isize,
    iy: isize,
) where
    T: Float,
    X: Accessor<T> + ?Sized,
    Y: AccessorMut<T> + ?Sized,
{
    if n <= BLOCKSIZE {
        let mut s = T::zero();
        let xs = StridedIndex::new(n, stride_x, ix as usize);
        let ys = StridedIndex::new(n, stride_y, iy as usize);
        for (jx, jy) in xs.zip(ys) {
            s = s + x.get(jx);
            y.set(jy, sum + s);
        }
        return;
    }
    let half = n / 2;
    pairwise(half, sum, x, stride_x, ix, y, stride_y, iy);
    let last = iy + (half as isize - 1) * stride_y;
    let seed = y.get(last as usize);
    pairwise(
        n - half,
        seed,
        x,
        stride_x,
        ix + half as isize * stride_x,
        y,
        stride_y,
        last + stride_y,
    );
}

/// In-place pairwise cumulative sum: `x` is both input and output
/// (ndarray form).
///
/// Each position is read before it is overwritten, so the result matches
/// [`cusumpw_ndarray`] with a separate output buffer.
pub fn cusumpw_in_place_ndarray<'x, T, X>(
    n: usize,
    sum: T,
    x: &'x mut X,
    stride_x: isize,
    offset_x: usize,
) -> &'x mut X
where
    T: Float,
    X: AccessorMut<T> + ?Sized,
{
    if n == 0 {
        return x;
    }
    pairwise_in_place(n, sum, x, stride_x, offset_x as isize);
    x
}

/// In-place pairwise cumulative sum.
pub fn cusumpw_in_place<'x, T, X>(n: usize, sum: T, x: &'x mut X, stride_x: isize) -> &'x mut X
where
    T: Float,
    X: AccessorMut<T> + ?Sized,
{
    cusumpw_in_place_ndarray(n, sum, x, stride_x, stride2offset(n, stride_x))
}

fn pairwise_in_place<T, X>(n: usize, sum: T, x: &mut X, stride: isize, ix: isize)
where
    T: Float,
    X: AccessorMut<T> + ?Sized,
{
    if n <= BLOCKSIZE {
        let mut s = T::zero();
        for j in StridedIndex::new(n, stride, ix as usize) {
            s = s + x.get(j);
            x.set(j, sum + s);
        }
        return;
    }
    let half = n / 2;
    pairwise_in_place(half, sum, x, stride, ix);
    let last = ix + (half as isize - 1) * stride;
    let seed = x.get(last as usize);
    pairwise_in_place(n - half, seed, x, stride, last + stride);
}

// ============================================================================
// Compensated / ordinary
// ============================================================================

/// Computes the cumulative sum of `x` into `y` using compensated summation
/// (ndarray form).
#[allow(clippy::too_many_arguments)]
pub fn cusumkbn_ndarray<'y, T, X, Y>(
    n: usize,
    sum: T,
    x: &X,
    stride_x: isize,
    offset_x: usize,
    y: &'y mut Y,
    stride_y: isize,
    offset_y: usize,
) -> &'y mut Y
where
    T: Float,
    X: Accessor<T> + ?Sized,
    Y: AccessorMut<T> + ?Sized,
{
    let mut s = sum;
    let mut c = T::zero();
    let xs = StridedIndex::new(n, stride_x, offset_x);
    let ys = StridedIndex::new(n, stride_y, offset_y);
    for (ix, iy) in xs.zip(ys) {
        let v = x.get(ix);
        let t = s + v;
        if s.abs() >= v.abs() {
            c = c + ((s - t) + v);
        } else {
            c = c + ((v - t) + s);
        }
        s = t;
        y.set(iy, s + c);
    }
    y
}

/// Computes the cumulative sum of `x` into `y` using compensated summation.
pub fn cusumkbn<'y, T, X, Y>(
    n: usize,
    sum: T,
    x: &X,
    stride_x: isize,
    y: &'y mut Y,
    stride_y: isize,
) -> &'y mut Y
where
    T: Float,
    X: Accessor<T> + ?Sized,
    Y: AccessorMut<T> + ?Sized,
{
    cusumkbn_ndarray(
        n,
        sum,
        x,
        stride_x,
        stride2offset(n, stride_x),
        y,
        stride_y,
        stride2offset(n, stride_y),
    )
}

/// Computes the cumulative sum of `x` into `y` with a single running total
/// (ndarray form).
#[allow(clippy::too_many_arguments)]
pub fn cusumors_ndarray<'y, T, X, Y>(
    n: usize,
    sum: T,
    x: &X,
    stride_x: isize,
    offset_x: usize,
    y: &'y mut Y,
    stride_y: isize,
    offset_y: usize,
) -> &'y mut Y
where
    T: Float,
    X: Accessor<T> + ?Sized,
    Y: AccessorMut<T> + ?Sized,
{
    let mut s = sum;
    let xs = StridedIndex::new(n, stride_x, offset_x);
    let ys = StridedIndex::new(n, stride_y, offset_y);
    for (ix, iy) in xs.zip(ys) {
        s = s + x.get(ix);
        y.set(iy, s);
    }
    y
}

/// Computes the cumulative sum of `x` into `y` with a single running total.
pub fn cusumors<'y, T, X, Y>(
    n: usize,
    sum: T,
    x: &X,
    stride_x: isize,
    y: &'y mut Y,
    stride_y: isize,
) -> &'y mut Y
where
    T: Float,
    X: Accessor<T> + ?Sized,
    Y: AccessorMut<T> + ?Sized,
{
    cusumors_ndarray(
        n,
        sum,
        x,
        stride_x,
        stride2offset(n, stride_x),
        y,
        stride_y,
        stride2offset(n, stride_y),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_cusumpw_basic() {
        let x = [1.0, 2.0, 3.0, 4.0, 5.0];
        let mut y = [0.0; 5];
        cusumpw(5, 0.0, &x, 1, &mut y, 1);
        assert_eq!(y, [1.0, 3.0, 6.0, 10.0, 15.0]);
    }

    #[test]
    fn test_cusumpw_seed() {
        let x = [1.0, 2.0, 3.0, 4.0, 5.0];
        let mut y = [0.0; 5];
        cusumpw(5, 10.0, &x, 1, &mut y, 1);
        assert_eq!(y, [11.0, 13.0, 16.0, 20.0, 25.0]);
    }

    #[test]
    fn test_cusumpw_nan_propagates() {
        let x = [1.0, f64::NAN, 3.0, f64::NAN];
        let mut y = [0.0; 4];
        cusumpw(4, 0.0, &x, 1, &mut y, 1);
        assert_eq!(y[0], 1.0);
        assert!(y[1..].iter().all(|v| v.is_nan()));
    }

    #[test]
    fn test_cusumpw_nan_across_block_boundary() {
        let n = BLOCKSIZE * 3 + 7;
        let mut x = vec![1.0; n];
        x[10] = f64::NAN;
        let mut y = vec![0.0; n];
        cusumpw(n, 0.0, &x[..], 1, &mut y[..], 1);
        assert!(y[..10].iter().all(|v| !v.is_nan()));
        assert!(y[10..].iter().all(|v| v.is_nan()));

        // NaN in the second half leaves the whole first half finite.
        let mut x = vec![1.0; n];
        x[200] = f64::NAN;
        cusumpw(n, 0.0, &x[..], 1, &mut y[..], 1);
        assert!(y[..200].iter().all(|v| v.is_finite()));
        assert_eq!(y[199], 200.0);
        assert!(y[200..].iter().all(|v| v.is_nan()));
    }

    #[test]
    fn test_cusumpw_large_matches_ordinary() {
        let n = 1000;
        let x: Vec<f64> = (1..=n).map(|i| i as f64).collect();
        let mut pw = vec![0.0; n];
        let mut ors = vec![0.0; n];
        cusumpw(n, 0.5, &x[..], 1, &mut pw[..], 1);
        cusumors(n, 0.5, &x[..], 1, &mut ors[..], 1);
        for i in 0..n {
            assert_relative_eq!(pw[i], ors[i]);
        }
        assert_eq!(pw[n - 1], 500500.5);
    }

    #[test]
    fn test_cusumpw_negative_strides() {
        let x = [1.0, 2.0, 3.0];
        let mut y = [0.0; 3];
        cusumpw(3, 0.0, &x, -1, &mut y, -1);
        assert_eq!(y, [6.0, 5.0, 3.0]);
    }

    #[test]
    fn test_cusumpw_ndarray_offsets() {
        let x = [0.0, 1.0, 0.0, 2.0, 0.0, 3.0];
        let mut y = [0.0; 4];
        cusumpw_ndarray(3, 0.0, &x, 2, 1, &mut y, 1, 1);
        assert_eq!(y, [0.0, 1.0, 3.0, 6.0]);
    }

    #[test]
    fn test_cusumpw_in_place_matches_out_of_place() {
        let n = 300;
        let x: Vec<f64> = (0..n).map(|i| (i as f64 * 0.37).sin()).collect();
        let mut y = vec![0.0; n];
        cusumpw(n, 1.5, &x[..], 1, &mut y[..], 1);
        let mut z = x.clone();
        cusumpw_in_place(n, 1.5, &mut z[..], 1);
        assert_eq!(y, z);
    }

    #[test]
    fn test_cusumpw_zero_length() {
        let x: [f64; 0] = [];
        let mut y = [4.0];
        cusumpw(0, 1.0, &x, 1, &mut y, 1);
        assert_eq!(y, [4.0]);
    }

    #[test]
    fn test_cusumkbn_compensates() {
        let x = [1.0, 1e100, 1.0, -1e100];
        let mut y = [0.0; 4];
        cusumkbn(4, 0.0, &x, 1, &mut y, 1);
        assert_eq!(y[3], 2.0);

        let mut naive = [0.0; 4];
        cusumors(4, 0.0, &x, 1, &mut naive, 1);
        assert_eq!(naive[3], 0.0);
    }

    #[test]
    fn test_cusumors_preserves_negative_zero() {
        let x = [-0.0f64];
        let mut y = [1.0];
        cusumors(1, -0.0, &x, 1, &mut y, 1);
        assert_eq!(y[0], 0.0);
        assert!(y[0].is_sign_negative());
    }

    #[test]
    fn test_cusum_f32() {
        let x = [0.5f32, 0.25, 0.125];
        let mut y = [0.0f32; 3];
        cusumkbn(3, 0.0, &x, 1, &mut y, 1);
        assert_eq!(y, [0.5, 0.75, 0.875]);
    }
}
