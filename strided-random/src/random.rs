//! Strided random-fill kernels.
//!
//! [`StridedRandom`] pairs a [`Sampler`] with a PRNG and fills a strided
//! output with exactly one draw per logical position, in logical order. The
//! distribution parameters come from their own strided buffers; a zero stride
//! broadcasts one parameter across the whole output.

use crate::prng::{MinstdShuffle, StatefulPrng, UniformSource, MINSTD_MAX};
use crate::sampler::Sampler;
use crate::{RandomError, Result};
use rand::{Rng, RngCore};
use strided_accessor::{Accessor, AccessorMut};
use strided_kernels as kernels;
use tracing::{debug, warn};

/// Construction options for a seeded kernel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RandomOptions {
    /// PRNG seed. A random seed is chosen when absent.
    pub seed: Option<i32>,
    /// PRNG state to restore after seeding.
    pub state: Option<Vec<u32>>,
}

/// Random-fill kernel over a sampler `S` and a PRNG `P`.
#[derive(Debug, Clone)]
pub struct StridedRandom<S, P = MinstdShuffle> {
    sampler: S,
    rng: P,
    owned: bool,
}

impl<S, P: StatefulPrng> StridedRandom<S, P> {
    /// Creates a kernel that owns a freshly seeded PRNG.
    pub fn new(sampler: S, options: RandomOptions) -> Result<Self> {
        let seed = options
            .seed
            .unwrap_or_else(|| rand::rng().random_range(1..MINSTD_MAX as i32));
        let mut rng = P::with_seed(seed)?;
        if let Some(state) = options.state {
            rng.set_state(&state).inspect_err(|e| {
                warn!(prng = rng.name(), error = %e, "rejected PRNG state");
            })?;
        }
        debug!(prng = rng.name(), seed, "created seeded random-fill kernel");
        Ok(Self {
            sampler,
            rng,
            owned: true,
        })
    }

    /// Normalized seed, or `None` for an external PRNG.
    pub fn seed(&self) -> Option<&[u32]> {
        self.owned.then(|| self.rng.seed())
    }

    /// Number of seed elements, or `None` for an external PRNG.
    pub fn seed_length(&self) -> Option<usize> {
        self.owned.then(|| self.rng.seed_length())
    }

    /// Copy of the PRNG state, or `None` for an external PRNG.
    pub fn state(&self) -> Option<Vec<u32>> {
        self.owned.then(|| self.rng.state())
    }

    /// Restores a PRNG state.
    pub fn set_state(&mut self, state: &[u32]) -> Result<()> {
        if !self.owned {
            return Err(RandomError::ExternalPrng);
        }
        self.rng.set_state(state).inspect_err(|e| {
            warn!(prng = self.rng.name(), error = %e, "rejected PRNG state");
        })
    }

    /// Number of state elements, or `None` for an external PRNG.
    pub fn state_length(&self) -> Option<usize> {
        self.owned.then(|| self.rng.state_length())
    }

    /// Size of the state in bytes, or `None` for an external PRNG.
    pub fn byte_length(&self) -> Option<usize> {
        self.owned.then(|| self.rng.byte_length())
    }

    /// PRNG name, or `None` for an external PRNG.
    pub fn prng_name(&self) -> Option<&'static str> {
        self.owned.then(|| self.rng.name())
    }

    /// Fills `y` with raw generator integers, one step per position (ndarray form).
    pub fn ints_ndarray<'y, Y>(
        &mut self,
        n: usize,
        y: &'y mut Y,
        stride_y: isize,
        offset_y: usize,
    ) -> &'y mut Y
    where
        Y: AccessorMut<u32> + ?Sized,
    {
        let rng = &mut self.rng;
        kernels::nullary_ndarray(n, y, stride_y, offset_y, || rng.next_int())
    }

    /// Fills `y` with raw generator integers, one step per position.
    pub fn ints<'y, Y>(&mut self, n: usize, y: &'y mut Y, stride_y: isize) -> &'y mut Y
    where
        Y: AccessorMut<u32> + ?Sized,
    {
        let offset_y = kernels::stride2offset(n, stride_y);
        self.ints_ndarray(n, y, stride_y, offset_y)
    }
}

impl<S, P: RngCore> StridedRandom<S, P> {
    /// Creates a kernel over a caller-supplied PRNG.
    ///
    /// The kernel does not own the generator's state, so seed and state
    /// introspection return `None`.
    pub fn with_prng(sampler: S, rng: P) -> Self {
        debug!("created random-fill kernel over an external PRNG");
        Self {
            sampler,
            rng,
            owned: false,
        }
    }

    /// The sampler.
    pub fn sampler(&self) -> &S {
        &self.sampler
    }

    /// Consumes the kernel and returns its PRNG.
    pub fn into_prng(self) -> P {
        self.rng
    }
}

impl<S: Sampler<0>, P: UniformSource> StridedRandom<S, P> {
    /// Fills `y` with parameter-free draws (ndarray form).
    pub fn nullary_ndarray<'y, Y>(
        &mut self,
        n: usize,
        y: &'y mut Y,
        stride_y: isize,
        offset_y: usize,
    ) -> &'y mut Y
    where
        Y: AccessorMut<f64> + ?Sized,
    {
        let (sampler, rng) = (&self.sampler, &mut self.rng);
        kernels::nullary_ndarray(n, y, stride_y, offset_y, || sampler.sample(rng, []))
    }

    /// Fills `y` with parameter-free draws.
    pub fn nullary<'y, Y>(&mut self, n: usize, y: &'y mut Y, stride_y: isize) -> &'y mut Y
    where
        Y: AccessorMut<f64> + ?Sized,
    {
        let offset_y = kernels::stride2offset(n, stride_y);
        self.nullary_ndarray(n, y, stride_y, offset_y)
    }
}

impl<S: Sampler<1>, P: UniformSource> StridedRandom<S, P> {
    /// Fills `y` with draws parameterized by `a` (ndarray form).
    #[allow(clippy::too_many_arguments)]
    pub fn unary_ndarray<'y, A, Y>(
        &mut self,
        n: usize,
        a: &A,
        stride_a: isize,
        offset_a: usize,
        y: &'y mut Y,
        stride_y: isize,
        offset_y: usize,
    ) -> &'y mut Y
    where
        A: Accessor<f64> + ?Sized,
        Y: AccessorMut<f64> + ?Sized,
    {
        let (sampler, rng) = (&self.sampler, &mut self.rng);
        kernels::unary_ndarray(n, a, stride_a, offset_a, y, stride_y, offset_y, |p: f64| {
            sampler.sample(rng, [p])
        })
    }

    /// Fills `y` with draws parameterized by `a`.
    pub fn unary<'y, A, Y>(
        &mut self,
        n: usize,
        a: &A,
        stride_a: isize,
        y: &'y mut Y,
        stride_y: isize,
    ) -> &'y mut Y
    where
        A: Accessor<f64> + ?Sized,
        Y: AccessorMut<f64> + ?Sized,
    {
        let offset_a = kernels::stride2offset(n, stride_a);
        let offset_y = kernels::stride2offset(n, stride_y);
        self.unary_ndarray(n, a, stride_a, offset_a, y, stride_y, offset_y)
    }
}

impl<S: Sampler<2>, P: UniformSource> StridedRandom<S, P> {
    /// Fills `y` with draws parameterized by `a` and `b` (ndarray form).
    #[allow(clippy::too_many_arguments)]
    pub fn binary_ndarray<'y, A, B, Y>(
        &mut self,
        n: usize,
        a: &A,
        stride_a: isize,
        offset_a: usize,
        b: &B,
        stride_b: isize,
        offset_b: usize,
        y: &'y mut Y,
        stride_y: isize,
        offset_y: usize,
    ) -> &'y mut Y
    where
        A: Accessor<f64> + ?Sized,
        B: Accessor<f64> + ?Sized,
        Y: AccessorMut<f64> + ?Sized,
    {
        let (sampler, rng) = (&self.sampler, &mut self.rng);
        kernels::binary_ndarray(
            n,
            a,
            stride_a,
            offset_a,
            b,
            stride_b,
            offset_b,
            y,
            stride_y,
            offset_y,
            |p: f64, q: f64| sampler.sample(rng, [p, q]),
        )
    }

    /// Fills `y` with draws parameterized by `a` and `b`.
    #[allow(clippy::too_many_arguments)]
    pub fn binary<'y, A, B, Y>(
        &mut self,
        n: usize,
        a: &A,
        stride_a: isize,
        b: &B,
        stride_b: isize,
        y: &'y mut Y,
        stride_y: isize,
    ) -> &'y mut Y
    where
        A: Accessor<f64> + ?Sized,
        B: Accessor<f64> + ?Sized,
        Y: AccessorMut<f64> + ?Sized,
    {
        let offset_a = kernels::stride2offset(n, stride_a);
        let offset_b = kernels::stride2offset(n, stride_b);
        let offset_y = kernels::stride2offset(n, stride_y);
        self.binary_ndarray(
            n, a, stride_a, offset_a, b, stride_b, offset_b, y, stride_y, offset_y,
        )
    }
}

impl<S: Sampler<3>, P: UniformSource> StridedRandom<S, P> {
    /// Fills `y` with draws parameterized by `a`, `b` and `c` (ndarray form).
    #[allow(clippy::too_many_arguments)]
    pub fn ternary_ndarray<'y, A, B, C, Y>(
        &mut self,
        n: usize,
        a: &A,
        stride_a: isize,
        offset_a: usize,
        b: &B,
        stride_b: isize,
        offset_b: usize,
        c: &C,
        stride_c: isize,
        offset_c: usize,
        y: &'y mut Y,
        stride_y: isize,
        offset_y: usize,
    ) -> &'y mut Y
    where
        A: Accessor<f64> + ?Sized,
        B: Accessor<f64> + ?Sized,
        C: Accessor<f64> + ?Sized,
        Y: AccessorMut<f64> + ?Sized,
    {
        let (sampler, rng) = (&self.sampler, &mut self.rng);
        kernels::ternary_ndarray(
            n,
            a,
            stride_a,
            offset_a,
            b,
            stride_b,
            offset_b,
            c,
            stride_c,
            offset_c,
            y,
            stride_y,
            offset_y,
            |p: f64, q: f64, r: f64| sampler.sample(rng, [p, q, r]),
        )
    }

    /// Fills `y` with draws parameterized by `a`, `b` and `c`.
    #[allow(clippy::too_many_arguments)]
    pub fn ternary<'y, A, B, C, Y>(
        &mut self,
        n: usize,
        a: &A,
        stride_a: isize,
        b: &B,
        stride_b: isize,
        c: &C,
        stride_c: isize,
        y: &'y mut Y,
        stride_y: isize,
    ) -> &'y mut Y
    where
        A: Accessor<f64> + ?Sized,
        B: Accessor<f64> + ?Sized,
        C: Accessor<f64> + ?Sized,
        Y: AccessorMut<f64> + ?Sized,
    {
        let offset_a = kernels::stride2offset(n, stride_a);
        let offset_b = kernels::stride2offset(n, stride_b);
        let offset_c = kernels::stride2offset(n, stride_c);
        let offset_y = kernels::stride2offset(n, stride_y);
        self.ternary_ndarray(
            n, a, stride_a, offset_a, b, stride_b, offset_b, c, stride_c, offset_c, y, stride_y,
            offset_y,
        )
    }
}
