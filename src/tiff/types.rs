//! TIFF codec configuration types

use std::any::Any;

use crate::color::ColorModel;
use crate::format::Options;

/// TIFF compression methods
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TiffCompression {
    /// No compression (fastest, largest file)
    #[default]
    None,
    /// LZW compression (slow, good compression)
    Lzw,
    /// Deflate compression - fast level (good speed/size balance)
    DeflateFast,
    /// Deflate compression - best compression (slower)
    DeflateBest,
    /// Deflate compression - balanced
    DeflateBalanced,
}

/// Options for the TIFF codec
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TiffOptions {
    /// Compression method to use
    pub compression: TiffCompression,
    /// Predictor value for compression (2 for horizontal differencing).
    /// Only applied to integer samples.
    pub predictor: Option<u16>,
    /// Convert to this model before encoding, or after decoding.
    pub color_model: Option<ColorModel>,
}

impl TiffOptions {
    pub fn builder() -> TiffOptionsBuilder {
        TiffOptionsBuilder::default()
    }
}

impl Options for TiffOptions {
    fn color_model(&self) -> Option<ColorModel> {
        self.color_model
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Builder for TiffOptions
#[derive(Default)]
pub struct TiffOptionsBuilder {
    compression: Option<TiffCompression>,
    predictor: Option<Option<u16>>,
    color_model: Option<ColorModel>,
}

impl TiffOptionsBuilder {
    pub fn compression(mut self, compression: TiffCompression) -> Self {
        self.compression = Some(compression);
        self
    }

    pub fn predictor(mut self, predictor: Option<u16>) -> Self {
        self.predictor = Some(predictor);
        self
    }

    pub fn color_model(mut self, model: ColorModel) -> Self {
        self.color_model = Some(model);
        self
    }

    pub fn build(self) -> TiffOptions {
        let default = TiffOptions::default();
        TiffOptions {
            compression: self.compression.unwrap_or(default.compression),
            predictor: self.predictor.unwrap_or(default.predictor),
            color_model: self.color_model.or(default.color_model),
        }
    }
}
