//! Errors produced while encoding a PNG.

/// Result alias for the encode path.
pub type Result<T> = std::result::Result<T, EncodeError>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EncodeError {
    /// Width or height is non-positive, does not fit the PNG header fields, or
    /// needs a scanline buffer larger than `isize::MAX` bytes.
    #[error("invalid image dimensions: {width}x{height}")]
    InvalidDimensions { width: i64, height: i64 },
    #[error("failed to encode image: {0}")]
    EncodingFailure(#[from] EncodingFailure),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EncodingFailure {
    #[error("pixel buffer holds {actual} bytes, expected {expected}")]
    BufferSizeMismatch { expected: usize, actual: usize },
    #[error("could not allocate {requested} bytes of scanline data")]
    OutOfMemory { requested: usize },
    #[error("{kind} chunk payload of {len} bytes exceeds the 4-byte length field")]
    ChunkTooLarge { kind: String, len: usize },
}
