use thiserror::Error;

use crate::color::SampleKind;

#[derive(Error, Debug)]
pub enum ImageError {
    #[error("Unknown image format")]
    UnknownFormat,

    #[error("Bad header field {field}: {detail}")]
    BadHeader { field: &'static str, detail: String },

    #[error("Bad data size: expected {expected} bytes, got {actual}")]
    BadDataSize { expected: usize, actual: usize },

    #[error("Bad checksum: expected {expected:#010x}, got {actual:#010x}")]
    BadChecksum { expected: u32, actual: u32 },

    #[error("Bad compression: {0}")]
    BadCompression(String),

    #[error("Unsupported format: channels={channels}, depth={kind:?}")]
    UnsupportedFormat { channels: usize, kind: SampleKind },

    #[error("Invalid image dimensions: width={0}, height={1}")]
    InvalidDimensions(usize, usize),

    #[error("Invalid image layout: {0}")]
    InvalidLayout(String),

    #[error("Failed to decode image: {0}")]
    DecodeError(String),

    #[error("Failed to encode image: {0}")]
    EncodeError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl ImageError {
    pub(crate) fn bad_header(field: &'static str, detail: impl Into<String>) -> Self {
        ImageError::BadHeader {
            field,
            detail: detail.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ImageError>;
