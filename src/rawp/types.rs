//! RAWP container constants and codec options

use std::any::Any;

use crate::color::{ColorModel, SampleKind};
use crate::format::Options;

pub const SIGNATURE: &[u8; 4] = b"RAWP";
pub const MAGIC: u32 = 0x1BF2_380A;
pub const HEADER_SIZE: usize = 24;

/// Sniffing pattern: the signature followed by the little-endian magic.
pub const MAGIC_PATTERN: &[u8] = b"RAWP\x0A\x38\xF2\x1B";

/// How the samples of a RAWP payload are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum DataType {
    UInt = 1,
    Int = 2,
    Float = 3,
}

impl DataType {
    pub fn from_u8(v: u8) -> Option<DataType> {
        match v {
            1 => Some(DataType::UInt),
            2 => Some(DataType::Int),
            3 => Some(DataType::Float),
            _ => None,
        }
    }

    /// The sample kind this data type takes at `depth` bits, if the pair is valid.
    pub fn sample_kind(self, depth: u8) -> Option<SampleKind> {
        match (self, depth) {
            (DataType::UInt, 8) => Some(SampleKind::U8),
            (DataType::UInt, 16) => Some(SampleKind::U16),
            (DataType::Int, 32) => Some(SampleKind::I32),
            (DataType::Int, 64) => Some(SampleKind::I64),
            (DataType::Float, 32) => Some(SampleKind::F32),
            (DataType::Float, 64) => Some(SampleKind::F64),
            _ => None,
        }
    }

    pub fn of(kind: SampleKind) -> DataType {
        match kind {
            SampleKind::U8 | SampleKind::U16 => DataType::UInt,
            SampleKind::I32 | SampleKind::I64 => DataType::Int,
            SampleKind::F32 | SampleKind::F64 => DataType::Float,
        }
    }
}

/// Options for the RAWP codec
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawpOptions {
    /// Convert to this model before encoding, or after decoding.
    pub color_model: Option<ColorModel>,
    /// Snappy-compress the payload when encoding.
    pub use_snappy: bool,
}

impl RawpOptions {
    pub fn builder() -> RawpOptionsBuilder {
        RawpOptionsBuilder::default()
    }
}

impl Options for RawpOptions {
    fn color_model(&self) -> Option<ColorModel> {
        self.color_model
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Builder for RawpOptions
#[derive(Default)]
pub struct RawpOptionsBuilder {
    color_model: Option<ColorModel>,
    use_snappy: Option<bool>,
}

impl RawpOptionsBuilder {
    pub fn color_model(mut self, model: ColorModel) -> Self {
        self.color_model = Some(model);
        self
    }

    pub fn use_snappy(mut self, enable: bool) -> Self {
        self.use_snappy = Some(enable);
        self
    }

    pub fn build(self) -> RawpOptions {
        let default = RawpOptions::default();
        RawpOptions {
            color_model: self.color_model.or(default.color_model),
            use_snappy: self.use_snappy.unwrap_or(default.use_snappy),
        }
    }
}
