//! Masked map kernels.
//!
//! A mask buffer runs alongside the inputs with its own stride and offset.
//! Where the mask element is zero the element is computed and written; where
//! it is nonzero the output slot is left as it was.

use crate::{stride2offset, Accessor, AccessorMut, StridedIndex};

/// Mask element types.
pub trait MaskValue: Copy {
    /// Returns true if the element is masked out (nonzero).
    fn is_masked(self) -> bool;
}

macro_rules! impl_mask_int {
    ($($t:ty),*) => {
        $(
            impl MaskValue for $t {
                #[inline(always)]
                fn is_masked(self) -> bool {
                    self != 0
                }
            }
        )*
    };
}

impl_mask_int!(u8, i8, u16, i16, u32, i32);

impl MaskValue for bool {
    #[inline(always)]
    fn is_masked(self) -> bool {
        self
    }
}

impl MaskValue for f64 {
    /// NaN compares unequal to zero and therefore masks.
    #[inline(always)]
    fn is_masked(self) -> bool {
        self != 0.0
    }
}

/// Applies `f` to `x` where `mask` is zero, writing to `y` (ndarray form).
#[allow(clippy::too_many_arguments)]
pub fn mask_unary_ndarray<'y, A, B, M, X, K, Y, F>(
    n: usize,
    x: &X,
    stride_x: isize,
    offset_x: usize,
    mask: &K,
    stride_mask: isize,
    offset_mask: usize,
    y: &'y mut Y,
    stride_y: isize,
    offset_y: usize,
    mut f: F,
) -> &'y mut Y
where
    M: MaskValue,
    X: Accessor<A> + ?Sized,
    K: Accessor<M> + ?Sized,
    Y: AccessorMut<B> + ?Sized,
    F: FnMut(A) -> B,
{
    let xs = StridedIndex::new(n, stride_x, offset_x);
    let ms = StridedIndex::new(n, stride_mask, offset_mask);
    let ys = StridedIndex::new(n, stride_y, offset_y);
    for ((ix, im), iy) in xs.zip(ms).zip(ys) {
        if !mask.get(im).is_masked() {
            y.set(iy, f(x.get(ix)));
        }
    }
    y
}

/// Applies `f` to `x` where `mask` is zero, writing to `y`.
///
/// # Example
///
/// ```rust
/// use strided_kernels::mask_unary;
///
/// let x = [-1.0, -2.0, -3.0, -4.0, -5.0];
/// let m = [0u8, 0, 1, 0, 0];
/// let mut y = [0.0; 5];
/// mask_unary(5, &x, 1, &m, 1, &mut y, 1, f64::abs);
/// assert_eq!(y, [1.0, 2.0, 0.0, 4.0, 5.0]);
/// ```
#[allow(clippy::too_many_arguments)]
pub fn mask_unary<'y, A, B, M, X, K, Y, F>(
    n: usize,
    x: &X,
    stride_x: isize,
    mask: &K,
    stride_mask: isize,
    y: &'y mut Y,
    stride_y: isize,
    f: F,
) -> &'y mut Y
where
    M: MaskValue,
    X: Accessor<A> + ?Sized,
    K: Accessor<M> + ?Sized,
    Y: AccessorMut<B> + ?Sized,
    F: FnMut(A) -> B,
{
    mask_unary_ndarray(
        n,
        x,
        stride_x,
        stride2offset(n, stride_x),
        mask,
        stride_mask,
        stride2offset(n, stride_mask),
        y,
        stride_y,
        stride2offset(n, stride_y),
        f,
    )
}

/// Applies `f` to paired `x`, `y` where `mask` is zero, writing to `z`
/// (ndarray form).
#[allow(clippy::too_many_arguments)]
pub fn mask_binary_ndarray<'z, A, B, C, M, X, Y, K, Z, F>(
    n: usize,
    x: &X,
    stride_x: isize,
    offset_x: usize,
    y: &Y,
    stride_y: isize,
    offset_y: usize,
    mask: &K,
    stride_mask: isize,
    offset_mask: usize,
    z: &'z mut Z,
    stride_z: isize,
    offset_z: usize,
    mut f: F,
) -> &'z mut Z
where
    M: MaskValue,
    X: Accessor<A> + ?Sized,
    Y: Accessor<B> + ?Sized,
    K: Accessor<M> + ?Sized,
    Z: AccessorMut<C> + ?Sized,
    F: FnMut(A, B) -> C,
{
    let xs = StridedIndex::new(n, stride_x, offset_x);
    let ys = StridedIndex::new(n, stride_y, offset_y);
    let ms = StridedIndex::new(n, stride_mask, offset_mask);
    let zs = StridedIndex::new(n, stride_z, offset_z);
    for (((ix, iy), im), iz) in xs.zip(ys).zip(ms).zip(zs) {
        if !mask.get(im).is_masked() {
            z.set(iz, f(x.get(ix), y.get(iy)));
        }
    }
    z
}

/// Applies `f` to paired `x`, `y` where `mask` is zero, writing to `z`.
#[allow(clippy::too_many_arguments)]
pub fn mask_binary<'z, A, B, C, M, X, Y, K, Z, F>(
    n: usize,
    x: &X,
    stride_x: isize,
    y: &Y,
    stride_y: isize,
    mask: &K,
    stride_mask: isize,
    z: &'z mut Z,
    stride_z: isize,
    f: F,
) -> &'z mut Z
where
    M: MaskValue,
    X: Accessor<A> + ?Sized,
    Y: Accessor<B> + ?Sized,
    K: Accessor<M> + ?Sized,
    Z: AccessorMut<C> + ?Sized,
    F: FnMut(A, B) -> C,
{
    mask_binary_ndarray(
        n,
        x,
        stride_x,
        stride2offset(n, stride_x),
        y,
        stride_y,
        stride2offset(n, stride_y),
        mask,
        stride_mask,
        stride2offset(n, stride_mask),
        z,
        stride_z,
        stride2offset(n, stride_z),
        f,
    )
}

// ============================================================================
// Typed specializations (uint8 masks)
// ============================================================================

macro_rules! typed_mask_unary {
    ($(#[$doc:meta])* $simple:ident, $nd:ident, $t:ty) => {
        $(#[$doc])*
        #[allow(clippy::too_many_arguments)]
        pub fn $simple<'y>(
            n: usize,
            x: &[$t],
            stride_x: isize,
            mask: &[u8],
            stride_mask: isize,
            y: &'y mut [$t],
            stride_y: isize,
            f: impl FnMut($t) -> $t,
        ) -> &'y mut [$t] {
            mask_unary(n, x, stride_x, mask, stride_mask, y, stride_y, f)
        }

        $(#[$doc])*
        #[allow(clippy::too_many_arguments)]
        pub fn $nd<'y>(
            n: usize,
            x: &[$t],
            stride_x: isize,
            offset_x: usize,
            mask: &[u8],
            stride_mask: isize,
            offset_mask: usize,
            y: &'y mut [$t],
            stride_y: isize,
            offset_y: usize,
            f: impl FnMut($t) -> $t,
        ) -> &'y mut [$t] {
            mask_unary_ndarray(
                n, x, stride_x, offset_x, mask, stride_mask, offset_mask, y, stride_y, offset_y,
                f,
            )
        }
    };
}

typed_mask_unary!(
    /// Masked unary map over `f64` slices with a `u8` mask.
    dmskmap, dmskmap_ndarray, f64
);
typed_mask_unary!(
    /// Masked unary map over `f32` slices with a `u8` mask.
    smskmap, smskmap_ndarray, f32
);

/// Masked binary map over `f64` slices with a `u8` mask.
#[allow(clippy::too_many_arguments)]
pub fn dmskmap2<'z>(
    n: usize,
    x: &[f64],
    stride_x: isize,
    y: &[f64],
    stride_y: isize,
    mask: &[u8],
    stride_mask: isize,
    z: &'z mut [f64],
    stride_z: isize,
    f: impl FnMut(f64, f64) -> f64,
) -> &'z mut [f64] {
    mask_binary(n, x, stride_x, y, stride_y, mask, stride_mask, z, stride_z, f)
}

/// Masked binary map over `f64` slices with a `u8` mask (ndarray form).
#[allow(clippy::too_many_arguments)]
pub fn dmskmap2_ndarray<'z>(
    n: usize,
    x: &[f64],
    stride_x: isize,
    offset_x: usize,
    y: &[f64],
    stride_y: isize,
    offset_y: usize,
    mask: &[u8],
    stride_mask: isize,
    offset_mask: usize,
    z: &'z mut [f64],
    stride_z: isize,
    offset_z: usize,
    f: impl FnMut(f64, f64) -> f64,
) -> &'z mut [f64] {
    mask_binary_ndarray(
        n,
        x,
        stride_x,
        offset_x,
        y,
        stride_y,
        offset_y,
        mask,
        stride_mask,
        offset_mask,
        z,
        stride_z,
        offset_z,
        f,
    )
}
