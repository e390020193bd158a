//! Map kernels with a per-element callback.
//!
//! Before `f` runs, the callback receives the input value(s), the logical
//! index and the physical positions of every buffer involved. It returns the
//! value(s) to hand to `f`, or `None` to leave the output element untouched.

use crate::{stride2offset, Accessor, AccessorMut, StridedIndex};

/// Unary map through a callback (ndarray form).
///
/// The callback is called as `clbk(value, i, [ix, iy])`.
#[allow(clippy::too_many_arguments)]
pub fn unary_by_ndarray<'y, A, B, X, Y, F, C>(
    n: usize,
    x: &X,
    stride_x: isize,
    offset_x: usize,
    y: &'y mut Y,
    stride_y: isize,
    offset_y: usize,
    mut f: F,
    mut clbk: C,
) -> &'y mut Y
where
    X: Accessor<A> + ?Sized,
    Y: AccessorMut<B> + ?Sized,
    F: FnMut(A) -> B,
    C: FnMut(A, usize, [usize; 2]) -> Option<A>,
{
    let xs = StridedIndex::new(n, stride_x, offset_x);
    let ys = StridedIndex::new(n, stride_y, offset_y);
    for (i, (ix, iy)) in xs.zip(ys).enumerate() {
        if let Some(v) = clbk(x.get(ix), i, [ix, iy]) {
            y.set(iy, f(v));
        }
    }
    y
}

/// Unary map through a callback.
///
/// # Example
///
/// ```rust
/// use strided_kernels::unary_by;
///
/// let x = [1.0, 2.0, 3.0];
/// let mut y = [0.0; 3];
/// unary_by(3, &x, 1, &mut y, 1, |v: f64| v * v, |v, i, _| {
///     (i != 1).then_some(v * 2.0)
/// });
/// assert_eq!(y, [4.0, 0.0, 36.0]);
/// ```
#[allow(clippy::too_many_arguments)]
pub fn unary_by<'y, A, B, X, Y, F, C>(
    n: usize,
    x: &X,
    stride_x: isize,
    y: &'y mut Y,
    stride_y: isize,
    f: F,
    clbk: C,
) -> &'y mut Y
where
    X: Accessor<A> + ?Sized,
    Y: AccessorMut<B> + ?Sized,
    F: FnMut(A) -> B,
    C: FnMut(A, usize, [usize; 2]) -> Option<A>,
{
    unary_by_ndarray(
        n,
        x,
        stride_x,
        stride2offset(n, stride_x),
        y,
        stride_y,
        stride2offset(n, stride_y),
        f,
        clbk,
    )
}

/// Binary map through a callback (ndarray form).
///
/// The callback is called as `clbk((a, b), i, [ix, iy, iz])`.
#[allow(clippy::too_many_arguments)]
pub fn binary_by_ndarray<'z, A, B, C, X, Y, Z, F, K>(
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
    mut clbk: K,
) -> &'z mut Z
where
    X: Accessor<A> + ?Sized,
    Y: Accessor<B> + ?Sized,
    Z: AccessorMut<C> + ?Sized,
    F: FnMut(A, B) -> C,
    K: FnMut((A, B), usize, [usize; 3]) -> Option<(A, B)>,
{
    let xs = StridedIndex::new(n, stride_x, offset_x);
    let ys = StridedIndex::new(n, stride_y, offset_y);
    let zs = StridedIndex::new(n, stride_z, offset_z);
    for (i, ((ix, iy), iz)) in xs.zip(ys).zip(zs).enumerate() {
        if let Some((a, b)) = clbk((x.get(ix), y.get(iy)), i, [ix, iy, iz]) {
            z.set(iz, f(a, b));
        }
    }
    z
}

/// Binary map through a callback.
#[allow(clippy::too_many_arguments)]
pub fn binary_by<'z, A, B, C, X, Y, Z, F, K>(
    n: usize,
    x: &X,
    stride_x: isize,
    y: &Y,
    stride_y: isize,
    z: &'z mut Z,
    stride_z: isize,
    f: F,
    clbk: K,
) -> &'z mut Z
where
    X: Accessor<A> + ?Sized,
    Y: Accessor<B> + ?Sized,
    Z: AccessorMut<C> + ?Sized,
    F: FnMut(A, B) -> C,
    K: FnMut((A, B), usize, [usize; 3]) -> Option<(A, B)>,
{
    binary_by_ndarray(
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
        clbk,
    )
}
