//! The fixed 24-byte RAWP header.

use std::fmt;

use crate::color::{ColorModel, SampleKind};
use crate::common::bytes::{self, Endian};
use crate::common::{ImageError, Result};
use crate::rawp::types::{DataType, HEADER_SIZE, MAGIC, SIGNATURE};

/// Parsed and validated header fields. All multi-byte fields are
/// little-endian on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub width: u16,
    pub height: u16,
    pub channels: u8,
    pub depth: u8,
    pub data_type: DataType,
    pub use_snappy: bool,
    /// Length of the payload as stored.
    pub data_size: u32,
    /// CRC-32 (IEEE) of the payload as stored.
    pub checksum: u32,
}

impl Header {
    /// Parses the first [`HEADER_SIZE`] bytes of `b`, checking every field
    /// that can be checked without the payload.
    pub fn parse(b: &[u8]) -> Result<Header> {
        if b.len() < HEADER_SIZE {
            return Err(ImageError::bad_header(
                "Sig",
                format!("need {} header bytes, got {}", HEADER_SIZE, b.len()),
            ));
        }
        if &b[0..4] != SIGNATURE {
            return Err(ImageError::bad_header("Sig", format!("{:?}", &b[0..4])));
        }
        let magic = bytes::get_u32(&b[4..], Endian::Little);
        if magic != MAGIC {
            return Err(ImageError::bad_header("Magic", format!("{:#x}", magic)));
        }
        let width = bytes::get_u16(&b[8..], Endian::Little);
        let height = bytes::get_u16(&b[10..], Endian::Little);
        if width == 0 || height == 0 {
            return Err(ImageError::bad_header("Width/Height", format!("{}x{}", width, height)));
        }
        let channels = b[12];
        if !(1..=4).contains(&channels) {
            return Err(ImageError::bad_header("Channels", channels.to_string()));
        }
        let depth = b[13];
        if ![8, 16, 32, 64].contains(&depth) {
            return Err(ImageError::bad_header("Depth", depth.to_string()));
        }
        let data_type = DataType::from_u8(b[14])
            .filter(|t| t.sample_kind(depth).is_some())
            .ok_or_else(|| {
                ImageError::bad_header("DataType", format!("{} at depth {}", b[14], depth))
            })?;
        let use_snappy = match b[15] {
            0 => false,
            1 => true,
            v => return Err(ImageError::bad_header("UseSnappy", v.to_string())),
        };
        let data_size = bytes::get_u32(&b[16..], Endian::Little);
        if data_size == 0 {
            return Err(ImageError::bad_header("DataSize", "0".to_string()));
        }
        Ok(Header {
            width,
            height,
            channels,
            depth,
            data_type,
            use_snappy,
            data_size,
            checksum: bytes::get_u32(&b[20..], Endian::Little),
        })
    }

    /// Checks the stored payload against the declared size and checksum.
    pub fn verify_payload(&self, payload: &[u8]) -> Result<()> {
        if payload.len() != self.data_size as usize {
            return Err(ImageError::BadDataSize {
                expected: self.data_size as usize,
                actual: payload.len(),
            });
        }
        let actual = crc32fast::hash(payload);
        if actual != self.checksum {
            return Err(ImageError::BadChecksum {
                expected: self.checksum,
                actual,
            });
        }
        if !self.use_snappy && payload.len() != self.pixel_len() {
            return Err(ImageError::bad_header(
                "DataSize",
                format!("{} bytes stored, {} expected", payload.len(), self.pixel_len()),
            ));
        }
        Ok(())
    }

    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        let mut b = [0u8; HEADER_SIZE];
        b[0..4].copy_from_slice(SIGNATURE);
        bytes::put_u32(&mut b[4..], MAGIC, Endian::Little);
        bytes::put_u16(&mut b[8..], self.width, Endian::Little);
        bytes::put_u16(&mut b[10..], self.height, Endian::Little);
        b[12] = self.channels;
        b[13] = self.depth;
        b[14] = self.data_type as u8;
        b[15] = u8::from(self.use_snappy);
        bytes::put_u32(&mut b[16..], self.data_size, Endian::Little);
        bytes::put_u32(&mut b[20..], self.checksum, Endian::Little);
        b
    }

    pub fn sample_kind(&self) -> SampleKind {
        // parse() only accepts consistent (data_type, depth) pairs
        self.data_type
            .sample_kind(self.depth)
            .unwrap_or(SampleKind::U8)
    }

    pub fn color_model(&self) -> ColorModel {
        ColorModel::of(self.channels as usize, self.sample_kind())
    }

    /// Uncompressed payload length: `width * height * channels * depth / 8`.
    pub fn pixel_len(&self) -> usize {
        self.width as usize * self.height as usize * self.channels as usize * self.depth as usize
            / 8
    }
}

impl fmt::Display for Header {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}x{} {} ({} ch, {} bit, {:?}), snappy={}, {} bytes, crc={:#010x}",
            self.width,
            self.height,
            self.color_model(),
            self.channels,
            self.depth,
            self.data_type,
            self.use_snappy,
            self.data_size,
            self.checksum
        )
    }
}
