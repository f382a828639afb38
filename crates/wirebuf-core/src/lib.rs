//! Mutable byte buffer with network-byte-order scalar encoding.
//!
//! This is the substrate wire-protocol codecs build on. A [`Buffer`] owns a
//! single growable byte sequence and offers:
//! - positional access: `append_*` at the tail, `read_*` at any offset
//! - consuming access: `consume_*` decodes and removes from the head
//! - buffer surgery: `merge`, `discard`, `slice`, `shift`, `flush`
//!
//! Multi-byte values are always stored most-significant byte first,
//! independent of the host. Out-of-range access fails with
//! [`BufferOverflow`] and never partially applies.

pub mod buffer;
pub mod error;
pub mod order;
pub mod scalar;

pub use buffer::Buffer;
pub use error::{BufferOverflow, Result};
pub use scalar::Scalar;
