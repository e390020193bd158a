//! Index generation for strided traversal.
//!
//! A traversal of `n` logical elements with stride `s` starting at offset
//! `o` visits positions `o + i*s` for `i = 0..n`, in increasing `i`. Memory
//! order is decreasing when `s < 0`; a zero stride visits the same slot `n`
//! times.

use crate::{Result, StridedError};
use std::iter::FusedIterator;

/// Returns the starting offset for simple (offset-free) indexing.
///
/// Non-negative strides start at `0`; negative strides start at the last
/// reachable position, `(1 - n) * stride`, so that the traversal stays in
/// bounds.
#[inline]
pub fn stride2offset(n: usize, stride: isize) -> usize {
    if stride >= 0 || n == 0 {
        0
    } else {
        (1 - n as isize).wrapping_mul(stride) as usize
    }
}

/// Iterator over the positions of a strided traversal.
#[derive(Debug, Clone)]
pub struct StridedIndex {
    next: isize,
    stride: isize,
    remaining: usize,
}

impl StridedIndex {
    /// Creates a traversal of `n` positions starting at `offset`.
    #[inline]
    pub fn new(n: usize, stride: isize, offset: usize) -> Self {
        Self {
            next: offset as isize,
            stride,
            remaining: n,
        }
    }
}

impl Iterator for StridedIndex {
    type Item = usize;

    #[inline(always)]
    fn next(&mut self) -> Option<usize> {
        if self.remaining == 0 {
            return None;
        }
        let pos = self.next;
        self.next = self.next.wrapping_add(self.stride);
        self.remaining -= 1;
        Some(pos as usize)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for StridedIndex {}

impl FusedIterator for StridedIndex {}

/// Returns the smallest and largest positions a traversal touches.
///
/// For `n == 0` both are `offset`.
pub fn min_max_index(n: usize, stride: isize, offset: usize) -> Result<(isize, isize)> {
    let first = isize::try_from(offset).map_err(|_| StridedError::OutOfBounds {
        index: isize::MAX,
        len: 0,
    })?;
    if n == 0 {
        return Ok((first, first));
    }
    let last = (n as isize - 1)
        .checked_mul(stride)
        .and_then(|d| d.checked_add(first))
        .ok_or(StridedError::OutOfBounds {
            index: isize::MAX,
            len: 0,
        })?;
    Ok((first.min(last), first.max(last)))
}

/// Checks that a traversal stays within a buffer of length `len`.
///
/// This is the validation layer: kernels assume it has passed and do not
/// check positions themselves.
pub fn check_bounds(len: usize, n: usize, stride: isize, offset: usize) -> Result<()> {
    if n == 0 {
        return Ok(());
    }
    let (min, max) = min_max_index(n, stride, offset).map_err(|_| StridedError::OutOfBounds {
        index: isize::MAX,
        len,
    })?;
    if min < 0 {
        return Err(StridedError::OutOfBounds { index: min, len });
    }
    if max as usize >= len {
        return Err(StridedError::OutOfBounds { index: max, len });
    }
    Ok(())
}

/// Rejects zero strides for operations that do not support broadcasting.
pub fn check_nonzero_stride(stride: isize) -> Result<()> {
    if stride == 0 {
        return Err(StridedError::ZeroStride);
    }
    Ok(())
}
