//! Distributions sampled with per-position parameters.
//!
//! A [`Sampler<K>`] takes `K` parameters for every draw, so a fill kernel
//! can vary them across positions. Invalid parameters produce NaN and
//! consume no randomness.

use crate::prng::UniformSource;
use rand::distr::Distribution;

/// Distribution drawn with `K` parameters.
pub trait Sampler<const K: usize> {
    /// Draws one value.
    fn sample<R: UniformSource + ?Sized>(&self, rng: &mut R, params: [f64; K]) -> f64;
}

/// Uniform on `[0, 1)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Randu;

impl Sampler<0> for Randu {
    fn sample<R: UniformSource + ?Sized>(&self, rng: &mut R, _: [f64; 0]) -> f64 {
        rng.next_uniform()
    }
}

/// Exponential with rate `lambda > 0`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Exponential;

impl Sampler<1> for Exponential {
    fn sample<R: UniformSource + ?Sized>(&self, rng: &mut R, [lambda]: [f64; 1]) -> f64 {
        if !(lambda > 0.0) {
            return f64::NAN;
        }
        rand_distr::Exp::new(lambda).map_or(f64::NAN, |d| d.sample(rng))
    }
}

/// Uniform on `[a, b)` with `a < b`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Uniform;

impl Sampler<2> for Uniform {
    fn sample<R: UniformSource + ?Sized>(&self, rng: &mut R, [a, b]: [f64; 2]) -> f64 {
        if !(a < b) {
            return f64::NAN;
        }
        a + (b - a) * rng.next_uniform()
    }
}

/// Normal with mean `mu` and standard deviation `sigma > 0`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Normal;

impl Sampler<2> for Normal {
    fn sample<R: UniformSource + ?Sized>(&self, rng: &mut R, [mu, sigma]: [f64; 2]) -> f64 {
        if mu.is_nan() || !(sigma > 0.0) {
            return f64::NAN;
        }
        rand_distr::Normal::new(mu, sigma).map_or(f64::NAN, |d| d.sample(rng))
    }
}

/// Log-normal whose logarithm has mean `mu` and standard deviation `sigma > 0`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNormal;

impl Sampler<2> for LogNormal {
    fn sample<R: UniformSource + ?Sized>(&self, rng: &mut R, [mu, sigma]: [f64; 2]) -> f64 {
        if mu.is_nan() || !(sigma > 0.0) {
            return f64::NAN;
        }
        rand_distr::LogNormal::new(mu, sigma).map_or(f64::NAN, |d| d.sample(rng))
    }
}

/// Triangular on `[a, b]` with mode `c`, `a <= c <= b` and `a < b`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Triangular;

impl Sampler<3> for Triangular {
    fn sample<R: UniformSource + ?Sized>(&self, rng: &mut R, [a, b, c]: [f64; 3]) -> f64 {
        if !(a <= c && c <= b && a < b) {
            return f64::NAN;
        }
        rand_distr::Triangular::new(a, b, c).map_or(f64::NAN, |d| d.sample(rng))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MinstdShuffle, StatefulPrng};
    use approx::assert_abs_diff_eq;

    fn rng() -> MinstdShuffle {
        MinstdShuffle::with_seed(2024).unwrap()
    }

    #[test]
    fn test_randu_range() {
        let mut r = rng();
        for _ in 0..1000 {
            let v = Randu.sample(&mut r, []);
            assert!((0.0..1.0).contains(&v));
        }
    }

    #[test]
    fn test_uniform_bounds() {
        let mut r = rng();
        for _ in 0..1000 {
            let v = Uniform.sample(&mut r, [-3.0, 2.0]);
            assert!((-3.0..2.0).contains(&v));
        }
    }

    #[test]
    fn test_triangular_bounds() {
        let mut r = rng();
        for _ in 0..1000 {
            let v = Triangular.sample(&mut r, [1.0, 4.0, 2.0]);
            assert!((1.0..=4.0).contains(&v));
        }
    }

    #[test]
    fn test_invalid_params_are_nan_without_draws() {
        let mut r = rng();
        let before = r.state();
        assert!(Uniform.sample(&mut r, [1.0, 1.0]).is_nan());
        assert!(Normal.sample(&mut r, [0.0, -1.0]).is_nan());
        assert!(LogNormal.sample(&mut r, [f64::NAN, 1.0]).is_nan());
        assert!(Exponential.sample(&mut r, [0.0]).is_nan());
        assert!(Triangular.sample(&mut r, [0.0, 1.0, 2.0]).is_nan());
        assert_eq!(r.state(), before);
    }

    #[test]
    fn test_exponential_positive_mean() {
        let mut r = rng();
        let n = 20_000;
        let mean = (0..n).map(|_| Exponential.sample(&mut r, [4.0])).sum::<f64>() / n as f64;
        assert_abs_diff_eq!(mean, 0.25, epsilon = 0.02);
    }
}
