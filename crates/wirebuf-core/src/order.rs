//! Byte-order transforms.
//!
//! Scalars are turned into their little-endian byte image first, which is
//! the same on every host, and then reversed. The reversal therefore always
//! runs and always yields most-significant-byte-first output, whatever the
//! native endianness is.

use crate::error::{BufferOverflow, Result};

/// Reverse the order of `N` bytes.
#[inline]
pub const fn reverse<const N: usize>(bytes: [u8; N]) -> [u8; N] {
    let mut out = [0u8; N];
    let mut i = 0;
    while i < N {
        out[i] = bytes[N - 1 - i];
        i += 1;
    }
    out
}

/// Turn a little-endian byte image into network byte order.
#[inline]
pub const fn to_network<const N: usize>(le: [u8; N]) -> [u8; N] {
    reverse(le)
}

/// Turn network-order bytes back into a little-endian byte image.
#[inline]
pub const fn from_network<const N: usize>(be: [u8; N]) -> [u8; N] {
    reverse(be)
}

/// Copy the first `N` bytes out of `src`.
#[inline]
pub(crate) fn take<const N: usize>(src: &[u8]) -> Result<[u8; N]> {
    let prefix = src.get(..N).ok_or(BufferOverflow)?;
    let mut out = [0u8; N];
    out.copy_from_slice(prefix);
    Ok(out)
}
