//! Buffer predicates.

use crate::Accessor;

/// Minimum length of a buffer recognized as gzip data.
pub const GZIP_MIN_LENGTH: usize = 19;

const GZIP_MAGIC: [u8; 3] = [0x1f, 0x8b, 0x08];

/// Returns true if `buf` looks like gzip-compressed data.
///
/// Checks the two magic bytes and the deflate compression method, and that
/// the buffer is long enough to hold a header and trailer. Works with any
/// byte accessor.
///
/// ```rust
/// use strided_kernels::is_gzip_buffer;
///
/// let mut buf = vec![0u8; 20];
/// buf[..3].copy_from_slice(&[0x1f, 0x8b, 0x08]);
/// assert!(is_gzip_buffer(&buf[..]));
/// assert!(!is_gzip_buffer(&buf[..18]));
/// ```
pub fn is_gzip_buffer<B: Accessor<u8> + ?Sized>(buf: &B) -> bool {
    buf.len() >= GZIP_MIN_LENGTH
        && GZIP_MAGIC
            .iter()
            .enumerate()
            .all(|(i, &b)| buf.get(i) == b)
}
