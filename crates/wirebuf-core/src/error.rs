/// A byte range requested by a buffer operation lies past the end of the
/// buffer.
///
/// Every failing operation leaves the buffer exactly as it was before the
/// call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
#[error("buffer overflow")]
pub struct BufferOverflow;

pub type Result<T> = std::result::Result<T, BufferOverflow>;
