//! Network-byte-order buffer for building and parsing binary payloads.
//!
//! # Crate Structure
//!
//! - [`buffer`] — the buffer engine, its scalar codec and byte-order helpers
//!
//! The `cli` feature additionally builds the `wirebuf` binary, which encodes
//! and decodes typed values from the command line.

/// Re-export buffer engine types.
pub mod buffer {
    pub use wirebuf_core::*;
}

pub use wirebuf_core::{Buffer, BufferOverflow, Scalar};
