use std::fmt;
use std::ops::Range;

use bytes::{Buf, Bytes, BytesMut};

use crate::error::{BufferOverflow, Result};
use crate::scalar::Scalar;

/// A growable byte buffer with big-endian scalar accessors.
///
/// Bytes are appended at the tail and removed from the head. Three access
/// styles share the same storage:
///
/// - `append_*` writes a value at the tail,
/// - `read_*` decodes a value at an explicit offset and leaves the buffer
///   untouched,
/// - `consume_*` decodes a value at the head and removes its bytes.
///
/// Any operation that would touch bytes past the end fails with
/// [`BufferOverflow`] and leaves the buffer unchanged.
///
/// ```
/// use wirebuf_core::Buffer;
///
/// let mut buf = Buffer::new();
/// buf.append_u16(0x1234);
/// buf.append_i8(-1);
/// assert_eq!(buf.as_slice(), &[0x12, 0x34, 0xFF]);
///
/// assert_eq!(buf.consume_u16().unwrap(), 0x1234);
/// assert_eq!(buf.as_slice(), &[0xFF]);
/// ```
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct Buffer {
    storage: BytesMut,
}

impl Buffer {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty buffer that can hold `capacity` bytes without
    /// reallocating.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            storage: BytesMut::with_capacity(capacity),
        }
    }

    /// Number of bytes currently held.
    pub fn size(&self) -> usize {
        self.storage.len()
    }

    /// Returns true if the buffer holds no bytes.
    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }

    /// Drop every byte.
    pub fn clear(&mut self) {
        self.storage.clear();
    }

    /// Append all of `other`'s bytes, in order. `other` is left as is.
    pub fn merge(&mut self, other: &Buffer) {
        self.storage.extend_from_slice(&other.storage);
    }

    /// Remove the first `n` bytes.
    pub fn discard(&mut self, n: usize) -> Result<()> {
        self.range(0, n)?;
        self.storage.advance(n);
        Ok(())
    }

    /// Copy of the full contents.
    pub fn bytes(&self) -> Bytes {
        Bytes::copy_from_slice(&self.storage)
    }

    /// Take the full contents, leaving the buffer empty.
    ///
    /// The returned bytes keep the old allocation; later appends go to a
    /// fresh one.
    pub fn flush(&mut self) -> Bytes {
        self.storage.split().freeze()
    }

    /// Borrow the contents without copying.
    pub fn as_slice(&self) -> &[u8] {
        &self.storage
    }

    /// Unwrap the underlying storage.
    pub fn into_inner(self) -> BytesMut {
        self.storage
    }

    // --- generic scalar access ---

    /// Append `value` in network byte order.
    #[inline]
    pub fn append<T: Scalar>(&mut self, value: T) {
        value.encode(&mut self.storage);
    }

    /// Decode a `T` starting at `offset` without modifying the buffer.
    #[inline]
    pub fn read<T: Scalar>(&self, offset: usize) -> Result<T> {
        let range = self.range(offset, T::WIDTH)?;
        T::decode(&self.storage[range])
    }

    /// Decode a `T` from the head of the buffer and remove its bytes.
    #[inline]
    pub fn consume<T: Scalar>(&mut self) -> Result<T> {
        let value = self.read::<T>(0)?;
        self.storage.advance(T::WIDTH);
        Ok(value)
    }

    // --- raw bytes ---

    /// Append raw bytes as-is: no length prefix, no transformation.
    pub fn append_string(&mut self, value: impl AsRef<[u8]>) {
        self.storage.extend_from_slice(value.as_ref());
    }

    /// Copy `len` raw bytes starting at `offset`.
    pub fn read_string(&self, len: usize, offset: usize) -> Result<Bytes> {
        let range = self.range(offset, len)?;
        Ok(Bytes::copy_from_slice(&self.storage[range]))
    }

    /// Remove the first `len` bytes and return a copy of them.
    pub fn consume_string(&mut self, len: usize) -> Result<Bytes> {
        let value = self.read_string(len, 0)?;
        self.storage.advance(len);
        Ok(value)
    }

    // --- derived buffers ---

    /// New buffer holding a copy of `len` bytes at `offset`.
    pub fn slice(&self, len: usize, offset: usize) -> Result<Buffer> {
        let range = self.range(offset, len)?;
        Ok(Buffer::from(&self.storage[range]))
    }

    /// New buffer holding a copy of the first `len` bytes, which are removed
    /// from `self`.
    pub fn shift(&mut self, len: usize) -> Result<Buffer> {
        let shifted = self.slice(len, 0)?;
        self.storage.advance(len);
        Ok(shifted)
    }

    // --- little-endian u32 ---

    /// Append a `u32` least-significant byte first.
    pub fn append_u32_le(&mut self, value: u32) {
        self.storage.extend_from_slice(&value.to_le_bytes());
    }

    /// Decode a little-endian `u32` at `offset`.
    pub fn read_u32_le(&self, offset: usize) -> Result<u32> {
        let range = self.range(offset, 4)?;
        let mut raw = [0u8; 4];
        raw.copy_from_slice(&self.storage[range]);
        Ok(u32::from_le_bytes(raw))
    }

    /// Decode a little-endian `u32` from the head and remove its bytes.
    pub fn consume_u32_le(&mut self) -> Result<u32> {
        let value = self.read_u32_le(0)?;
        self.storage.advance(4);
        Ok(value)
    }

    /// Byte range `offset..offset + len`, provided it lies inside the buffer.
    fn range(&self, offset: usize, len: usize) -> Result<Range<usize>> {
        let end = offset.checked_add(len).ok_or(BufferOverflow)?;
        if end > self.storage.len() {
            return Err(BufferOverflow);
        }
        Ok(offset..end)
    }
}

macro_rules! typed_accessors {
    ($($ty:ty => $append:ident, $read:ident, $consume:ident;)*) => {
        impl Buffer {$(
            #[doc = concat!("Append a `", stringify!($ty), "` in network byte order.")]
            #[inline]
            pub fn $append(&mut self, value: $ty) {
                self.append::<$ty>(value);
            }

            #[doc = concat!("Decode a `", stringify!($ty), "` at `offset`.")]
            #[inline]
            pub fn $read(&self, offset: usize) -> Result<$ty> {
                self.read::<$ty>(offset)
            }

            #[doc = concat!("Decode a `", stringify!($ty), "` from the head and remove its bytes.")]
            #[inline]
            pub fn $consume(&mut self) -> Result<$ty> {
                self.consume::<$ty>()
            }
        )*}
    };
}

typed_accessors! {
    bool => append_bool, read_bool, consume_bool;
    i8 => append_i8, read_i8, consume_i8;
    u8 => append_u8, read_u8, consume_u8;
    i16 => append_i16, read_i16, consume_i16;
    u16 => append_u16, read_u16, consume_u16;
    i32 => append_i32, read_i32, consume_i32;
    u32 => append_u32, read_u32, consume_u32;
    i64 => append_i64, read_i64, consume_i64;
    u64 => append_u64, read_u64, consume_u64;
    f32 => append_f32, read_f32, consume_f32;
    f64 => append_f64, read_f64, consume_f64;
}

impl From<&[u8]> for Buffer {
    fn from(bytes: &[u8]) -> Self {
        Self {
            storage: BytesMut::from(bytes),
        }
    }
}

impl<const N: usize> From<&[u8; N]> for Buffer {
    fn from(bytes: &[u8; N]) -> Self {
        Self::from(&bytes[..])
    }
}

impl From<Vec<u8>> for Buffer {
    fn from(bytes: Vec<u8>) -> Self {
        Self {
            storage: BytesMut::from(&bytes[..]),
        }
    }
}

impl From<Bytes> for Buffer {
    fn from(bytes: Bytes) -> Self {
        Self::from(bytes.as_ref())
    }
}

impl From<BytesMut> for Buffer {
    fn from(storage: BytesMut) -> Self {
        Self { storage }
    }
}

impl AsRef<[u8]> for Buffer {
    fn as_ref(&self) -> &[u8] {
        &self.storage
    }
}

impl fmt::Debug for Buffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Buffer")
            .field("size", &self.size())
            .field("bytes", &format_args!("{:x}", self))
            .finish()
    }
}

/// Lowercase hex dump of the contents, two digits per byte.
impl fmt::LowerHex for Buffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.storage.iter() {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}
