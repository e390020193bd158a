//! MINSTD pseudorandom number generators.
//!
//! Both generators iterate `s = 16807 * s mod (2^31 - 1)` and produce
//! integers on `[1, 2^31 - 2]`. [`MinstdShuffle`] passes the output through a
//! 32-entry Bays-Durham shuffle table to break up serial correlation.

use crate::{RandomError, Result};
use rand::distr::{Distribution, StandardUniform};
use rand::rand_core::{impls, RngCore, SeedableRng};
use rand::rngs::StdRng;
use strided_accessor::StridedError;

/// Modulus `2^31 - 1`.
pub const MINSTD_MAX: u32 = 0x7fff_ffff;

const A: u64 = 16807;
const NORMALIZATION_CONSTANT: f64 = 2_147_483_646.0;
const SHUFFLE_TABLE_SIZE: usize = 32;
const NUM_WARMUPS: usize = 8;

/// Maps a user seed onto `[1, MINSTD_MAX - 1]`.
///
/// Zero becomes 1, `MINSTD_MAX` becomes `MINSTD_MAX - 1` and negative seeds
/// use their absolute value. `i32::MIN` has no representable absolute value
/// and is rejected.
fn normalize_seed(seed: i32) -> Result<u32> {
    match seed {
        0 => Ok(1),
        i32::MAX => Ok(MINSTD_MAX - 1),
        i32::MIN => Err(StridedError::InvalidSeed.into()),
        s => Ok(s.unsigned_abs()),
    }
}

#[inline(always)]
fn lcg(s: u32) -> u32 {
    ((A * s as u64) % MINSTD_MAX as u64) as u32
}

#[inline(always)]
fn normalize(v: u32) -> f64 {
    (v as f64 - 1.0) / NORMALIZATION_CONSTANT
}

/// Combines the high 16 bits of two 31-bit draws.
#[inline(always)]
fn combine(hi: u32, lo: u32) -> u32 {
    ((hi >> 15) << 16) | (lo >> 15)
}

fn check_state(state: &[u32], expected: usize) -> Result<()> {
    if state.len() != expected {
        return Err(StridedError::InvalidState {
            expected,
            found: state.len(),
        }
        .into());
    }
    match state.iter().position(|&v| v == 0 || v >= MINSTD_MAX) {
        Some(index) => Err(RandomError::StateValue {
            index,
            value: state[index],
        }),
        None => Ok(()),
    }
}

/// Generators whose seed and state can be inspected and restored.
pub trait StatefulPrng: RngCore {
    /// Creates a generator from a user seed.
    fn with_seed(seed: i32) -> Result<Self>
    where
        Self: Sized;

    /// Generator name.
    fn name(&self) -> &'static str;

    /// Normalized seed.
    fn seed(&self) -> &[u32];

    /// Number of seed elements.
    fn seed_length(&self) -> usize {
        self.seed().len()
    }

    /// Copy of the current state.
    fn state(&self) -> Vec<u32>;

    /// Restores a state previously returned by [`StatefulPrng::state`].
    fn set_state(&mut self, state: &[u32]) -> Result<()>;

    /// Number of state elements.
    fn state_length(&self) -> usize;

    /// Size of the state in bytes.
    fn byte_length(&self) -> usize {
        self.state_length() * std::mem::size_of::<u32>()
    }

    /// Next raw integer on `[1, MINSTD_MAX - 1]`.
    fn next_int(&mut self) -> u32;

    /// Next value on `[0, 1)`.
    fn normalized(&mut self) -> f64 {
        normalize(self.next_int())
    }
}

// ============================================================================
// Uniform sources
// ============================================================================

/// Generators that supply uniform variates on `[0, 1)`.
///
/// The default draws `StandardUniform` through [`RngCore`]. The MINSTD
/// generators override it with [`StatefulPrng::normalized`], which advances
/// the generator by exactly one step.
pub trait UniformSource: RngCore {
    /// Next value on `[0, 1)`.
    fn next_uniform(&mut self) -> f64 {
        StandardUniform.sample(self)
    }
}

impl UniformSource for StdRng {}

impl<R: UniformSource + ?Sized> UniformSource for &mut R {
    fn next_uniform(&mut self) -> f64 {
        (**self).next_uniform()
    }
}

/// Adapter that lets any [`RngCore`] act as a [`UniformSource`].
#[derive(Debug, Clone)]
pub struct ExternalRng<R>(pub R);

impl<R: RngCore> RngCore for ExternalRng<R> {
    fn next_u32(&mut self) -> u32 {
        self.0.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.0.next_u64()
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        self.0.fill_bytes(dst)
    }
}

impl<R: RngCore> UniformSource for ExternalRng<R> {}

// ============================================================================
// Minstd
// ============================================================================

/// Park-Miller minimal standard generator.
///
/// ```rust
/// use strided_random::{Minstd, StatefulPrng};
///
/// let mut rng = Minstd::with_seed(1).unwrap();
/// assert_eq!(rng.next_int(), 16807);
/// assert_eq!(rng.next_int(), 282475249);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Minstd {
    seed: u32,
    state: u32,
}

impl Minstd {
    fn from_normalized(seed: u32) -> Self {
        Self { seed, state: seed }
    }
}

impl StatefulPrng for Minstd {
    fn with_seed(seed: i32) -> Result<Self> {
        Ok(Self::from_normalized(normalize_seed(seed)?))
    }

    fn name(&self) -> &'static str {
        "minstd"
    }

    fn seed(&self) -> &[u32] {
        std::slice::from_ref(&self.seed)
    }

    fn state(&self) -> Vec<u32> {
        vec![self.state]
    }

    fn set_state(&mut self, state: &[u32]) -> Result<()> {
        check_state(state, 1)?;
        self.state = state[0];
        Ok(())
    }

    fn state_length(&self) -> usize {
        1
    }

    #[inline]
    fn next_int(&mut self) -> u32 {
        self.state = lcg(self.state);
        self.state
    }
}

impl RngCore for Minstd {
    fn next_u32(&mut self) -> u32 {
        let hi = self.next_int();
        combine(hi, self.next_int())
    }

    fn next_u64(&mut self) -> u64 {
        impls::next_u64_via_u32(self)
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        impls::fill_bytes_via_next(self, dst)
    }
}

impl UniformSource for Minstd {
    #[inline]
    fn next_uniform(&mut self) -> f64 {
        self.normalized()
    }
}

impl SeedableRng for Minstd {
    type Seed = [u8; 4];

    /// Seeds are reduced onto `[1, MINSTD_MAX - 1]`.
    fn from_seed(seed: Self::Seed) -> Self {
        Self::from_normalized(u32::from_le_bytes(seed) % (MINSTD_MAX - 1) + 1)
    }
}

// ============================================================================
// MinstdShuffle
// ============================================================================

/// MINSTD generator with a shuffled output sequence.
///
/// State layout: the 32 shuffle-table entries followed by the last output and
/// the underlying generator state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MinstdShuffle {
    seed: u32,
    table: [u32; SHUFFLE_TABLE_SIZE],
    state: [u32; 2],
}

impl MinstdShuffle {
    const STATE_LENGTH: usize = SHUFFLE_TABLE_SIZE + 2;

    fn from_normalized(seed: u32) -> Self {
        let mut minstd = Minstd::from_normalized(seed);
        for _ in 0..NUM_WARMUPS {
            minstd.next_int();
        }
        let mut table = [0u32; SHUFFLE_TABLE_SIZE];
        for slot in table.iter_mut().rev() {
            *slot = minstd.next_int();
        }
        Self {
            seed,
            table,
            state: [table[0], table[0]],
        }
    }
}

impl StatefulPrng for MinstdShuffle {
    fn with_seed(seed: i32) -> Result<Self> {
        Ok(Self::from_normalized(normalize_seed(seed)?))
    }

    fn name(&self) -> &'static str {
        "minstd-shuffle"
    }

    fn seed(&self) -> &[u32] {
        std::slice::from_ref(&self.seed)
    }

    fn state(&self) -> Vec<u32> {
        let mut out = Vec::with_capacity(Self::STATE_LENGTH);
        out.extend_from_slice(&self.table);
        out.extend_from_slice(&self.state);
        out
    }

    fn set_state(&mut self, state: &[u32]) -> Result<()> {
        check_state(state, Self::STATE_LENGTH)?;
        let (table, rest) = state.split_at(SHUFFLE_TABLE_SIZE);
        self.table.copy_from_slice(table);
        self.state.copy_from_slice(rest);
        Ok(())
    }

    fn state_length(&self) -> usize {
        Self::STATE_LENGTH
    }

    #[inline]
    fn next_int(&mut self) -> u32 {
        let ratio = self.state[0] as f64 / MINSTD_MAX as f64;
        let i = (SHUFFLE_TABLE_SIZE as f64 * ratio) as usize;
        self.state[0] = self.table[i];
        self.state[1] = lcg(self.state[1]);
        self.table[i] = self.state[1];
        self.state[0]
    }
}

impl RngCore for MinstdShuffle {
    fn next_u32(&mut self) -> u32 {
        let hi = self.next_int();
        combine(hi, self.next_int())
    }

    fn next_u64(&mut self) -> u64 {
        impls::next_u64_via_u32(self)
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        impls::fill_bytes_via_next(self, dst)
    }
}

impl UniformSource for MinstdShuffle {
    #[inline]
    fn next_uniform(&mut self) -> f64 {
        self.normalized()
    }
}

impl SeedableRng for MinstdShuffle {
    type Seed = [u8; 4];

    fn from_seed(seed: Self::Seed) -> Self {
        Self::from_normalized(u32::from_le_bytes(seed) % (MINSTD_MAX - 1) + 1)
    }
}
