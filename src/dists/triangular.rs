//! Triangular distribution with lower limit `a`, upper limit `b` and mode `c`.
//!
//! Parameters are valid when `a <= c <= b` and `a < b`. Any NaN argument or
//! invalid parameter triple yields NaN.

use crate::{quaternary, Accessor, AccessorMut};

#[inline]
fn valid(a: f64, b: f64, c: f64) -> bool {
    a <= c && c <= b && a < b
}

/// Probability density function.
pub fn pdf(x: f64, a: f64, b: f64, c: f64) -> f64 {
    if x.is_nan() || !valid(a, b, c) {
        return f64::NAN;
    }
    if x < a || x > b {
        0.0
    } else if x < c {
        2.0 * (x - a) / ((b - a) * (c - a))
    } else if x == c {
        2.0 / (b - a)
    } else {
        2.0 * (b - x) / ((b - a) * (b - c))
    }
}

/// Cumulative distribution function.
pub fn cdf(x: f64, a: f64, b: f64, c: f64) -> f64 {
    if x.is_nan() || !valid(a, b, c) {
        return f64::NAN;
    }
    if x <= a {
        0.0
    } else if x <= c {
        (x - a).powi(2) / ((b - a) * (c - a))
    } else if x < b {
        1.0 - (b - x).powi(2) / ((b - a) * (b - c))
    } else {
        1.0
    }
}

/// Quantile function (inverse CDF) for `p` in `[0, 1]`.
pub fn quantile(p: f64, a: f64, b: f64, c: f64) -> f64 {
    if !(0.0..=1.0).contains(&p) || !valid(a, b, c) {
        return f64::NAN;
    }
    let pc = (c - a) / (b - a);
    if p < pc {
        a + ((b - a) * (c - a) * p).sqrt()
    } else {
        b - ((b - a) * (b - c) * (1.0 - p)).sqrt()
    }
}

/// Mean `(a + b + c) / 3`.
pub fn mean(a: f64, b: f64, c: f64) -> f64 {
    if !valid(a, b, c) {
        return f64::NAN;
    }
    (a + b + c) / 3.0
}

/// Variance.
pub fn variance(a: f64, b: f64, c: f64) -> f64 {
    if !valid(a, b, c) {
        return f64::NAN;
    }
    (a * a + b * b + c * c - a * b - a * c - b * c) / 18.0
}

/// Evaluates the PDF elementwise over strided `x` and parameter buffers.
///
/// Each parameter buffer has its own stride, so a zero stride broadcasts a
/// single parameter across every position.
#[allow(clippy::too_many_arguments)]
pub fn strided_pdf<'o, X, A, B, C, O>(
    n: usize,
    x: &X,
    stride_x: isize,
    a: &A,
    stride_a: isize,
    b: &B,
    stride_b: isize,
    c: &C,
    stride_c: isize,
    out: &'o mut O,
    stride_out: isize,
) -> &'o mut O
where
    X: Accessor<f64> + ?Sized,
    A: Accessor<f64> + ?Sized,
    B: Accessor<f64> + ?Sized,
    C: Accessor<f64> + ?Sized,
    O: AccessorMut<f64> + ?Sized,
{
    quaternary(
        n, x, stride_x, a, stride_a, b, stride_b, c, stride_c, out, stride_out, pdf,
    )
}

/// Evaluates the CDF elementwise over strided `x` and parameter buffers.
#[allow(clippy::too_many_arguments)]
pub fn strided_cdf<'o, X, A, B, C, O>(
    n: usize,
    x: &X,
    stride_x: isize,
    a: &A,
    stride_a: isize,
    b: &B,
    stride_b: isize,
    c: &C,
    stride_c: isize,
    out: &'o mut O,
    stride_out: isize,
) -> &'o mut O
where
    X: Accessor<f64> + ?Sized,
    A: Accessor<f64> + ?Sized,
    B: Accessor<f64> + ?Sized,
    C: Accessor<f64> + ?Sized,
    O: AccessorMut<f64> + ?Sized,
{
    quaternary(
        n, x, stride_x, a, stride_a, b, stride_b, c, stride_c, out, stride_out, cdf,
    )
}
