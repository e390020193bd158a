//! Elementwise map kernels over strided buffers.
//!
//! The N-ary families all share one loop shape: walk every input and the
//! output in lockstep, apply `f` exactly `n` times in increasing logical
//! order, and write each result before reading the next element. Outputs are
//! returned so calls can be chained.

use crate::{stride2offset, Accessor, AccessorMut, StridedIndex};
use num_complex::{Complex32, Complex64};

// ============================================================================
// Nullary
// ============================================================================

/// Fills `y` with successive values produced by `f` (ndarray form).
pub fn nullary_ndarray<'y, B, Y, F>(
    n: usize,
    y: &'y mut Y,
    stride_y: isize,
    offset_y: usize,
    mut f: F,
) -> &'y mut Y
where
    Y: AccessorMut<B> + ?Sized,
    F: FnMut() -> B,
{
    for iy in StridedIndex::new(n, stride_y, offset_y) {
        y.set(iy, f());
    }
    y
}

/// Fills `y` with successive values produced by `f`.
pub fn nullary<'y, B, Y, F>(n: usize, y: &'y mut Y, stride_y: isize, f: F) -> &'y mut Y
where
    Y: AccessorMut<B> + ?Sized,
    F: FnMut() -> B,
{
    nullary_ndarray(n, y, stride_y, stride2offset(n, stride_y), f)
}

// ============================================================================
// Unary
// ============================================================================

/// Applies `f` to each element of `x` and writes the result to `y` (ndarray form).
#[allow(clippy::too_many_arguments)]
pub fn unary_ndarray<'y, A, B, X, Y, F>(
    n: usize,
    x: &X,
    stride_x: isize,
    offset_x: usize,
    y: &'y mut Y,
    stride_y: isize,
    offset_y: usize,
    mut f: F,
) -> &'y mut Y
where
    X: Accessor<A> + ?Sized,
    Y: AccessorMut<B> + ?Sized,
    F: FnMut(A) -> B,
{
    let xs = StridedIndex::new(n, stride_x, offset_x);
    let ys = StridedIndex::new(n, stride_y, offset_y);
    for (ix, iy) in xs.zip(ys) {
        y.set(iy, f(x.get(ix)));
    }
    y
}

/// Applies `f` to each element of `x` and writes the result to `y`.
///
/// # Example
///
/// ```rust
/// use strided_kernels::unary;
///
/// let x = [1.0, -2.0, 3.0, -4.0];
/// let mut y = [0.0; 4];
/// unary(4, &x, -1, &mut y, 1, f64::abs);
/// assert_eq!(y, [4.0, 3.0, 2.0, 1.0]);
/// ```
pub fn unary<'y, A, B, X, Y, F>(
    n: usize,
    x: &X,
    stride_x: isize,
    y: &'y mut Y,
    stride_y: isize,
    f: F,
) -> &'y mut Y
where
    X: Accessor<A> + ?Sized,
    Y: AccessorMut<B> + ?Sized,
    F: FnMut(A) -> B,
{
    unary_ndarray(
        n,
        x,
        stride_x,
        stride2offset(n, stride_x),
        y,
        stride_y,
        stride2offset(n, stride_y),
        f,
    )
}

/// Applies `f` to each element of `x` in place (ndarray form).
///
/// Each element is read and then overwritten before the next is read, so a
/// zero stride feeds every result back into the following application.
pub fn unary_in_place_ndarray<'x, A, X, F>(
    n: usize,
    x: &'x mut X,
    stride_x: isize,
    offset_x: usize,
    mut f: F,
) -> &'x mut X
where
    X: AccessorMut<A> + ?Sized,
    F: FnMut(A) -> A,
{
    for ix in StridedIndex::new(n, stride_x, offset_x) {
        let v = f(x.get(ix));
        x.set(ix, v);
    }
    x
}

/// Applies `f` to each element of `x` in place.
pub fn unary_in_place<'x, A, X, F>(n: usize, x: &'x mut X, stride_x: isize, f: F) -> &'x mut X
where
    X: AccessorMut<A> + ?Sized,
    F: FnMut(A) -> A,
{
    unary_in_place_ndarray(n, x, stride_x, stride2offset(n, stride_x), f)
}

// ============================================================================
// Binary
// ============================================================================

/// Applies `f` to paired elements of `x` and `y`, writing to `z` (ndarray form).
#[allow(clippy::too_many_arguments)]
pub fn binary_ndarray<'z, A, B, C, X, Y, Z, F>(
    n: usize,
    x: &X,
    stride_x: isize,
    offset_x: usize,
    y: &Y,
    stride_y: isize,
    offset_y: usize,
    z: &'z mut Z,
    stride_z: isize,
    offset_z: usize,
    mut f: F,
) -> &'z mut Z
where
    X: Accessor<A> + ?Sized,
    Y: Accessor<B> + ?Sized,
    Z: AccessorMut<C> + ?Sized,
    F: FnMut(A, B) -> C,
{
    let xs = StridedIndex::new(n, stride_x, offset_x);
    let ys = StridedIndex::new(n, stride_y, offset_y);
    let zs = StridedIndex::new(n, stride_z, offset_z);
    for ((ix, iy), iz) in xs.zip(ys).zip(zs) {
        z.set(iz, f(x.get(ix), y.get(iy)));
    }
    z
}

/// Applies `f` to paired elements of `x` and `y`, writing to `z`.
#[allow(clippy::too_many_arguments)]
pub fn binary<'z, A, B, C, X, Y, Z, F>(
    n: usize,
    x: &X,
    stride_x: isize,
    y: &Y,
    stride_y: isize,
    z: &'z mut Z,
    stride_z: isize,
    f: F,
) -> &'z mut Z
where
    X: Accessor<A> + ?Sized,
    Y: Accessor<B> + ?Sized,
    Z: AccessorMut<C> + ?Sized,
    F: FnMut(A, B) -> C,
{
    binary_ndarray(
        n,
        x,
        stride_x,
        stride2offset(n, stride_x),
        y,
        stride_y,
        stride2offset(n, stride_y),
        z,
        stride_z,
        stride2offset(n, stride_z),
        f,
    )
}

/// Combines `y` into `x` in place: `x[i] = f(x[i], y[i])` (ndarray form).
#[allow(clippy::too_many_arguments)]
pub fn binary_in_place_ndarray<'x, A, B, X, Y, F>(
    n: usize,
    x: &'x mut X,
    stride_x: isize,
    offset_x: usize,
    y: &Y,
    stride_y: isize,
    offset_y: usize,
    mut f: F,
) -> &'x mut X
where
    X: AccessorMut<A> + ?Sized,
    Y: Accessor<B> + ?Sized,
    F: FnMut(A, B) -> A,
{
    let xs = StridedIndex::new(n, stride_x, offset_x);
    let ys = StridedIndex::new(n, stride_y, offset_y);
    for (ix, iy) in xs.zip(ys) {
        let v = f(x.get(ix), y.get(iy));
        x.set(ix, v);
    }
    x
}

/// Combines `y` into `x` in place: `x[i] = f(x[i], y[i])`.
pub fn binary_in_place<'x, A, B, X, Y, F>(
    n: usize,
    x: &'x mut X,
    stride_x: isize,
    y: &Y,
    stride_y: isize,
    f: F,
) -> &'x mut X
where
    X: AccessorMut<A> + ?Sized,
    Y: Accessor<B> + ?Sized,
    F: FnMut(A, B) -> A,
{
    let offset_x = stride2offset(n, stride_x);
    binary_in_place_ndarray(n, x, stride_x, offset_x, y, stride_y, stride2offset(n, stride_y), f)
}

// ============================================================================
// Ternary / Quaternary
// ============================================================================

/// Applies `f` to element triples of `x`, `y`, `z`, writing to `w` (ndarray form).
#[allow(clippy::too_many_arguments)]
pub fn ternary_ndarray<'w, A, B, C, D, X, Y, Z, W, F>(
    n: usize,
    x: &X,
    stride_x: isize,
    offset_x: usize,
    y: &Y,
    stride_y: isize,
    offset_y: usize,
    z: &Z,
    stride_z: isize,
    offset_z: usize,
    w: &'w mut W,
    stride_w: isize,
    offset_w: usize,
    mut f: F,
) -> &'w mut W
where
    X: Accessor<A> + ?Sized,
    Y: Accessor<B> + ?Sized,
    Z: Accessor<C> + ?Sized,
    W: AccessorMut<D> + ?Sized,
    F: FnMut(A, B, C) -> D,
{
    let xs = StridedIndex::new(n, stride_x, offset_x);
    let ys = StridedIndex::new(n, stride_y, offset_y);
    let zs = StridedIndex::new(n, stride_z, offset_z);
    let ws = StridedIndex::new(n, stride_w, offset_w);
    for (((ix, iy), iz), iw) in xs.zip(ys).zip(zs).zip(ws) {
        w.set(iw, f(x.get(ix), y.get(iy), z.get(iz)));
    }
    w
}

/// Applies `f` to element triples of `x`, `y`, `z`, writing to `w`.
#[allow(clippy::too_many_arguments)]
pub fn ternary<'w, A, B, C, D, X, Y, Z, W, F>(
    n: usize,
    x: &X,
    stride_x: isize,
    y: &Y,
    stride_y: isize,
    z: &Z,
    stride_z: isize,
    w: &'w mut W,
    stride_w: isize,
    f: F,
) -> &'w mut W
where
    X: Accessor<A> + ?Sized,
    Y: Accessor<B> + ?Sized,
    Z: Accessor<C> + ?Sized,
    W: AccessorMut<D> + ?Sized,
    F: FnMut(A, B, C) -> D,
{
    ternary_ndarray(
        n,
        x,
        stride_x,
        stride2offset(n, stride_x),
        y,
        stride_y,
        stride2offset(n, stride_y),
        z,
        stride_z,
        stride2offset(n, stride_z),
        w,
        stride_w,
        stride2offset(n, stride_w),
        f,
    )
}

/// Applies `f` to element quadruples of `x`, `y`, `z`, `w`, writing to `u`
/// (ndarray form).
#[allow(clippy::too_many_arguments)]
pub fn quaternary_ndarray<'u, A, B, C, D, E, X, Y, Z, W, U, F>(
    n: usize,
    x: &X,
    stride_x: isize,
    offset_x: usize,
    y: &Y,
    stride_y: isize,
    offset_y: usize,
    z: &Z,
    stride_z: isize,
    offset_z: usize,
    w: &W,
    stride_w: isize,
    offset_w: usize,
    u: &'u mut U,
    stride_u: isize,
    offset_u: usize,
    mut f: F,
) -> &'u mut U
where
    X: Accessor<A> + ?Sized,
    Y: Accessor<B> + ?Sized,
    Z: Accessor<C> + ?Sized,
    W: Accessor<D> + ?Sized,
    U: AccessorMut<E> + ?Sized,
    F: FnMut(A, B, C, D) -> E,
{
    let xs = StridedIndex::new(n, stride_x, offset_x);
    let ys = StridedIndex::new(n, stride_y, offset_y);
    let zs = StridedIndex::new(n, stride_z, offset_z);
    let ws = StridedIndex::new(n, stride_w, offset_w);
    let us = StridedIndex::new(n, stride_u, offset_u);
    for ((((ix, iy), iz), iw), iu) in xs.zip(ys).zip(zs).zip(ws).zip(us) {
        u.set(iu, f(x.get(ix), y.get(iy), z.get(iz), w.get(iw)));
    }
    u
}

/// Applies `f` to element quadruples of `x`, `y`, `z`, `w`, writing to `u`.
#[allow(clippy::too_many_arguments)]
pub fn quaternary<'u, A, B, C, D, E, X, Y, Z, W, U, F>(
    n: usize,
    x: &X,
    stride_x: isize,
    y: &Y,
    stride_y: isize,
    z: &Z,
    stride_z: isize,
    w: &W,
    stride_w: isize,
    u: &'u mut U,
    stride_u: isize,
    f: F,
) -> &'u mut U
where
    X: Accessor<A> + ?Sized,
    Y: Accessor<B> + ?Sized,
    Z: Accessor<C> + ?Sized,
    W: Accessor<D> + ?Sized,
    U: AccessorMut<E> + ?Sized,
    F: FnMut(A, B, C, D) -> E,
{
    quaternary_ndarray(
        n,
        x,
        stride_x,
        stride2offset(n, stride_x),
        y,
        stride_y,
        stride2offset(n, stride_y),
        z,
        stride_z,
        stride2offset(n, stride_z),
        w,
        stride_w,
        stride2offset(n, stride_w),
        u,
        stride_u,
        stride2offset(n, stride_u),
        f,
    )
}

// ============================================================================
// Typed specializations
// ============================================================================

macro_rules! typed_unary {
    ($(#[$doc:meta])* $simple:ident, $nd:ident, $t:ty) => {
        $(#[$doc])*
        pub fn $simple<'y>(
            n: usize,
            x: &[$t],
            stride_x: isize,
            y: &'y mut [$t],
            stride_y: isize,
            f: impl FnMut($t) -> $t,
        ) -> &'y mut [$t] {
            unary(n, x, stride_x, y, stride_y, f)
        }

        $(#[$doc])*
        #[allow(clippy::too_many_arguments)]
        pub fn $nd<'y>(
            n: usize,
            x: &[$t],
            stride_x: isize,
            offset_x: usize,
            y: &'y mut [$t],
            stride_y: isize,
            offset_y: usize,
            f: impl FnMut($t) -> $t,
        ) -> &'y mut [$t] {
            unary_ndarray(n, x, stride_x, offset_x, y, stride_y, offset_y, f)
        }
    };
}

macro_rules! typed_binary {
    ($(#[$doc:meta])* $simple:ident, $nd:ident, $t:ty) => {
        $(#[$doc])*
        #[allow(clippy::too_many_arguments)]
        pub fn $simple<'z>(
            n: usize,
            x: &[$t],
            stride_x: isize,
            y: &[$t],
            stride_y: isize,
            z: &'z mut [$t],
            stride_z: isize,
            f: impl FnMut($t, $t) -> $t,
        ) -> &'z mut [$t] {
            binary(n, x, stride_x, y, stride_y, z, stride_z, f)
        }

        $(#[$doc])*
        #[allow(clippy::too_many_arguments)]
        pub fn $nd<'z>(
            n: usize,
            x: &[$t],
            stride_x: isize,
            offset_x: usize,
            y: &[$t],
            stride_y: isize,
            offset_y: usize,
            z: &'z mut [$t],
            stride_z: isize,
            offset_z: usize,
            f: impl FnMut($t, $t) -> $t,
        ) -> &'z mut [$t] {
            binary_ndarray(
                n, x, stride_x, offset_x, y, stride_y, offset_y, z, stride_z, offset_z, f,
            )
        }
    };
}

typed_unary!(
    /// Unary map over `f64` slices.
    dmap, dmap_ndarray, f64
);
typed_unary!(
    /// Unary map over `f32` slices.
    smap, smap_ndarray, f32
);
typed_unary!(
    /// Unary map over `Complex32` slices.
    cmap, cmap_ndarray, Complex32
);
typed_unary!(
    /// Unary map over `Complex64` slices.
    zmap, zmap_ndarray, Complex64
);
typed_binary!(
    /// Binary map over `f64` slices.
    dmap2, dmap2_ndarray, f64
);
typed_binary!(
    /// Binary map over `f32` slices.
    smap2, smap2_ndarray, f32
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Interleaved;

    #[test]
    fn test_unary_contiguous() {
        let x = vec![1.0, -2.0, 3.0, -4.0, 5.0];
        let mut y = vec![0.0; 5];
        unary(5, &x[..], 1, &mut y[..], 1, f64::abs);
        assert_eq!(y, vec![1.0, 2.0, 3.0, 4.0, 5.0]);
    }

    #[test]
    fn test_unary_zero_length_is_noop() {
        let x = [1.0, 2.0];
        let mut y = [7.0, 7.0];
        let mut calls = 0;
        unary(0, &x, 1, &mut y, 1, |v: f64| {
            calls += 1;
            v
        });
        assert_eq!(calls, 0);
        assert_eq!(y, [7.0, 7.0]);
    }

    #[test]
    fn test_unary_ndarray_offsets() {
        let x = [0.0, 1.0, 0.0, 2.0, 0.0, 3.0];
        let mut y = [0.0; 4];
        unary_ndarray(3, &x, 2, 1, &mut y, 1, 1, |v: f64| v * 10.0);
        assert_eq!(y, [0.0, 10.0, 20.0, 30.0]);
    }

    #[test]
    fn test_unary_negative_stride_simple() {
        let x = [1.0, 2.0, 3.0];
        let mut y = [0.0; 3];
        unary(3, &x, 1, &mut y, -1, |v: f64| v);
        assert_eq!(y, [3.0, 2.0, 1.0]);
    }

    #[test]
    fn test_unary_mixed_types() {
        let x = [1i32, -2, 3];
        let mut y = [0.0f64; 3];
        unary(3, &x, 1, &mut y, 1, |v: i32| v as f64 * 0.5);
        assert_eq!(y, [0.5, -1.0, 1.5]);
    }

    #[test]
    fn test_unary_call_order() {
        let x = [10, 20, 30];
        let mut y = [0; 3];
        let mut seen = Vec::new();
        unary(3, &x, -1, &mut y, 1, |v: i32| {
            seen.push(v);
            v
        });
        assert_eq!(seen, vec![30, 20, 10]);
    }

    #[test]
    fn test_unary_in_place_zero_stride_accumulates() {
        let mut x = [1.0];
        unary_in_place_ndarray(4, &mut x[..], 0, 0, |v: f64| v * 2.0);
        assert_eq!(x, [16.0]);
    }

    #[test]
    fn test_nullary_fill() {
        let mut y = [0.0; 4];
        let mut k = 0.0;
        nullary(4, &mut y, -1, || {
            k += 1.0;
            k
        });
        assert_eq!(y, [4.0, 3.0, 2.0, 1.0]);
    }

    #[test]
    fn test_binary_strided() {
        let x = [1.0, 2.0, 3.0, 4.0];
        let y = [10.0, 20.0];
        let mut z = [0.0; 2];
        binary(2, &x, 2, &y, 1, &mut z, 1, |a: f64, b: f64| a + b);
        assert_eq!(z, [11.0, 23.0]);
    }

    #[test]
    fn test_binary_in_place() {
        let mut x = [1.0, 2.0, 3.0];
        let y = [1.0, 1.0, 1.0];
        binary_in_place(3, &mut x[..], 1, &y[..], 1, |a: f64, b: f64| a - b);
        assert_eq!(x, [0.0, 1.0, 2.0]);
    }

    #[test]
    fn test_ternary_fma() {
        let x = [1.0, 2.0];
        let y = [3.0, 4.0];
        let z = [5.0, 6.0];
        let mut w = [0.0; 2];
        ternary(2, &x, 1, &y, 1, &z, 1, &mut w, 1, |a: f64, b: f64, c: f64| {
            a.mul_add(b, c)
        });
        assert_eq!(w, [8.0, 14.0]);
    }

    #[test]
    fn test_quaternary_broadcast_params() {
        let x = [1.0, 2.0, 3.0];
        let a = [1.0];
        let b = [2.0];
        let c = [3.0];
        let mut out = [0.0; 3];
        quaternary_ndarray(
            3,
            &x,
            1,
            0,
            &a,
            0,
            0,
            &b,
            0,
            0,
            &c,
            0,
            0,
            &mut out,
            1,
            0,
            |x: f64, a: f64, b: f64, c: f64| x * a + b * c,
        );
        assert_eq!(out, [7.0, 8.0, 9.0]);
    }

    #[test]
    fn test_zmap_and_interleaved_agree() {
        let z = [Complex64::new(1.0, 2.0), Complex64::new(3.0, -4.0)];
        let mut out = [Complex64::new(0.0, 0.0); 2];
        zmap(2, &z, 1, &mut out, 1, |v| v.conj());
        assert_eq!(out[1], Complex64::new(3.0, 4.0));

        let raw = [1.0, 2.0, 3.0, -4.0];
        let mut raw_out = [0.0; 4];
        let src = Interleaved::new(&raw[..]);
        let mut dst = Interleaved::new(&mut raw_out[..]);
        unary(2, &src, 1, &mut dst, 1, |v: Complex64| v.conj());
        assert_eq!(raw_out, [1.0, -2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_smap2() {
        let x = [1.0f32, 2.0];
        let y = [3.0f32, 4.0];
        let mut z = [0.0f32; 2];
        smap2(2, &x, 1, &y, 1, &mut z, 1, |a, b| a * b);
        assert_eq!(z, [3.0, 8.0]);
    }

    #[test]
    fn test_returns_output_for_chaining() {
        let x = [1.0, 2.0];
        let mut y = [0.0; 2];
        let out = dmap(2, &x, 1, &mut y, 1, |v| v + 1.0);
        out[0] = 5.0;
        assert_eq!(y, [5.0, 3.0]);
    }
}
