//! Compression Codec Module
//!
//! Pluggable text compression for cached payloads. Any reversible,
//! deterministic scheme satisfies the contract as long as
//! `decompress(compress(x)) == x` and malformed input is reported as an
//! error value rather than a panic.

use std::io::Write;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use flate2::write::{ZlibDecoder, ZlibEncoder};
use flate2::Compression;

use crate::error::CodecError;

// == Codec Trait ==
/// Text compression codec.
pub trait Codec {
    /// Compresses `text` into an opaque string.
    fn compress(&self, text: &str) -> String;

    /// Reverses [`compress`](Codec::compress). Malformed input yields an
    /// error, never a panic.
    fn decompress(&self, text: &str) -> Result<String, CodecError>;
}

// == Deflate Codec ==
/// Default codec: zlib-compressed, base64-armored.
///
/// The base64 layer keeps the output a plain string, safe to embed in a
/// JSON document stored in a string-keyed slot.
#[derive(Debug, Clone, Default)]
pub struct DeflateCodec;

impl Codec for DeflateCodec {
    fn compress(&self, text: &str) -> String {
        let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
        // Writing to a Vec cannot fail
        encoder
            .write_all(text.as_bytes())
            .and_then(|_| encoder.finish())
            .map(|bytes| BASE64.encode(bytes))
            .unwrap_or_default()
    }

    fn decompress(&self, text: &str) -> Result<String, CodecError> {
        let bytes = BASE64.decode(text)?;

        let mut decoder = ZlibDecoder::new(Vec::new());
        decoder.write_all(&bytes)?;
        let decoded = decoder.finish()?;

        Ok(String::from_utf8(decoded)?)
    }
}
