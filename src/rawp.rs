//! RAWP module
//!
//! A raw pixel container: a 24-byte little-endian header, an optionally
//! Snappy-compressed payload and a CRC-32 of the payload as stored.

pub mod codec;
pub mod header;
pub mod pix_decoder;
pub mod pix_encoder;
pub mod types;

#[cfg(test)]
mod tests;

pub use codec::{
    container_layout, decode, decode_bytes, decode_config, encode, encode_to_vec, format,
};
pub use header::Header;
pub use pix_decoder::PixDecoder;
pub use pix_encoder::PixEncoder;
pub use types::{
    DataType, HEADER_SIZE, MAGIC, MAGIC_PATTERN, RawpOptions, RawpOptionsBuilder, SIGNATURE,
};
