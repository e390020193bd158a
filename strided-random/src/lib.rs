//! Seedable PRNGs and strided random-fill kernels.
//!
//! # Core Types
//!
//! - [`Minstd`] / [`MinstdShuffle`]: Park-Miller linear congruential
//!   generators with seed and state introspection ([`StatefulPrng`])
//! - [`UniformSource`]: `[0, 1)` variates, one generator step each for the
//!   MINSTD generators
//! - [`Sampler`]: a distribution drawn with `K` per-position parameters
//!   ([`Randu`], [`Exponential`], [`Uniform`], [`Normal`], [`LogNormal`],
//!   [`Triangular`])
//! - [`StridedRandom`]: fills a strided output with one draw per logical
//!   position, reading distribution parameters from strided buffers
//!
//! # Example
//!
//! ```rust
//! use strided_random::{RandomOptions, StridedRandom, Uniform};
//!
//! let options = RandomOptions { seed: Some(1234), ..Default::default() };
//! let mut rand: StridedRandom<Uniform> = StridedRandom::new(Uniform, options).unwrap();
//!
//! let low = [0.0];
//! let high = [10.0, 20.0, 30.0];
//! let mut out = [0.0; 3];
//! rand.binary_ndarray(3, &low, 0, 0, &high, 1, 0, &mut out, 1, 0);
//! assert!(out.iter().zip(high).all(|(v, h)| (0.0..h).contains(v)));
//! ```

pub mod prng;
pub mod random;
pub mod sampler;

pub use prng::{ExternalRng, Minstd, MinstdShuffle, StatefulPrng, UniformSource, MINSTD_MAX};
pub use random::{RandomOptions, StridedRandom};
pub use sampler::{Exponential, LogNormal, Normal, Randu, Sampler, Triangular, Uniform};

use strided_accessor::StridedError;

/// Errors raised by PRNG construction and state manipulation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RandomError {
    #[error(transparent)]
    Strided(#[from] StridedError),

    /// A state element lies outside the generator's valid range.
    #[error("state element {index} out of range: {value}")]
    StateValue { index: usize, value: u32 },

    /// The kernel wraps a caller-supplied PRNG whose state it does not own.
    #[error("PRNG state is not owned by this kernel")]
    ExternalPrng,
}

/// Result type for PRNG operations.
pub type Result<T> = std::result::Result<T, RandomError>;
