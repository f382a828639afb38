//! Fixed-width scalar types the buffer knows how to encode.

use bytes::BytesMut;

use crate::error::Result;
use crate::order::{from_network, take, to_network};

mod sealed {
    pub trait Sealed {}
}

/// A fixed-width value with a big-endian wire representation.
///
/// Implemented for `bool`, the 8/16/32/64-bit signed and unsigned integers,
/// `f32` and `f64`. The trait is sealed; the wire layout of each type is
/// part of the buffer's contract.
pub trait Scalar: Copy + sealed::Sealed {
    /// Number of bytes the value occupies on the wire.
    const WIDTH: usize;

    /// Short type name, as used in diagnostics.
    const NAME: &'static str;

    /// Append the network-order encoding of `self` to `dst`.
    fn encode(self, dst: &mut BytesMut);

    /// Decode a value from the first [`WIDTH`](Scalar::WIDTH) bytes of `src`.
    ///
    /// Fails with [`BufferOverflow`](crate::BufferOverflow) if `src` is
    /// shorter than `WIDTH`; extra bytes are ignored.
    fn decode(src: &[u8]) -> Result<Self>;
}

macro_rules! int_scalar {
    ($($ty:ty => $width:literal),* $(,)?) => {$(
        impl sealed::Sealed for $ty {}

        impl Scalar for $ty {
            const WIDTH: usize = $width;
            const NAME: &'static str = stringify!($ty);

            #[inline]
            fn encode(self, dst: &mut BytesMut) {
                dst.extend_from_slice(&to_network(self.to_le_bytes()));
            }

            #[inline]
            fn decode(src: &[u8]) -> Result<Self> {
                Ok(<$ty>::from_le_bytes(from_network(take::<$width>(src)?)))
            }
        }
    )*};
}

int_scalar! {
    u8 => 1,
    i8 => 1,
    u16 => 2,
    i16 => 2,
    u32 => 4,
    i32 => 4,
    u64 => 8,
    i64 => 8,
}

// Floats travel as the unsigned integer sharing their bit pattern.
macro_rules! float_scalar {
    ($($ty:ty => $bits:ty),* $(,)?) => {$(
        impl sealed::Sealed for $ty {}

        impl Scalar for $ty {
            const WIDTH: usize = <$bits as Scalar>::WIDTH;
            const NAME: &'static str = stringify!($ty);

            #[inline]
            fn encode(self, dst: &mut BytesMut) {
                self.to_bits().encode(dst);
            }

            #[inline]
            fn decode(src: &[u8]) -> Result<Self> {
                <$bits>::decode(src).map(<$ty>::from_bits)
            }
        }
    )*};
}

float_scalar! {
    f32 => u32,
    f64 => u64,
}

impl sealed::Sealed for bool {}

impl Scalar for bool {
    const WIDTH: usize = 1;
    const NAME: &'static str = "bool";

    #[inline]
    fn encode(self, dst: &mut BytesMut) {
        u8::from(self).encode(dst);
    }

    /// Any non-zero byte decodes as `true`.
    #[inline]
    fn decode(src: &[u8]) -> Result<Self> {
        u8::decode(src).map(|byte| byte != 0)
    }
}
