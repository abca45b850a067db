//! Error types for the cache library
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for cache operations.
///
/// Note that `load` never returns these: malformed stored documents and
/// corrupt compressed payloads are treated as cache misses. Only payload
/// serialization in `save` surfaces an error; decompress failures stay
/// behind [`CodecError`] on the codec's own interface.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Payload could not be serialized to JSON
    #[error("Failed to serialize payload: {0}")]
    Serialize(#[from] serde_json::Error),
}

// == Codec Error Enum ==
/// Error produced by a [`Codec`](crate::codec::Codec) when decompression
/// fails on malformed input.
#[derive(Error, Debug)]
pub enum CodecError {
    /// Input is not valid base64
    #[error("Invalid base64 payload: {0}")]
    Encoding(#[from] base64::DecodeError),

    /// Decoded bytes are not a valid compressed stream
    #[error("Corrupt compressed stream: {0}")]
    Corrupt(#[from] std::io::Error),

    /// Decompressed bytes are not valid UTF-8
    #[error("Decompressed payload is not UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

// == Result Type Alias ==
/// Convenience Result type for cache operations.
pub type Result<T> = std::result::Result<T, CacheError>;
