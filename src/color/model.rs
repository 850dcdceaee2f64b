//! The color-model hub.
//!
//! One [`ColorModel`] per named color type. [`ColorModel::convert`] maps any
//! [`Color`] into the model's type, in this order:
//!
//! 1. same type: returned as-is;
//! 2. samples are cast into the target kind (see [`crate::color::sample`]);
//! 3. channels are remapped: RGB gains an opaque alpha, RGBA drops it,
//!    anything with color collapses to gray through [`Sample::luminance`],
//!    gray broadcasts to R, G and B keeping its own alpha if it has one.
//!
//! Colors outside the matrix (YCbCr) enter through canonical 16-bit RGBA.

use crate::color::sample::{Sample, SampleKind};
use crate::color::value::{Color, Samples};
use crate::color::ycbcr::YCbCr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorModel {
    Gray,
    Gray16,
    Gray32i,
    Gray32f,
    Gray64i,
    Gray64f,
    GrayA,
    GrayA32,
    GrayA64i,
    GrayA64f,
    GrayA128i,
    GrayA128f,
    Rgb,
    Rgb48,
    Rgb96i,
    Rgb96f,
    Rgb192i,
    Rgb192f,
    Rgba,
    Rgba64,
    Rgba128i,
    Rgba128f,
    Rgba256i,
    Rgba256f,
    YCbCr,
}

const KIND_ORDER: [SampleKind; 6] = SampleKind::ALL;

impl ColorModel {
    /// The 24 models of the channels × sample-kind matrix, ordered by
    /// channel count then by [`SampleKind::ALL`].
    pub const MATRIX: [ColorModel; 24] = [
        ColorModel::Gray,
        ColorModel::Gray16,
        ColorModel::Gray32i,
        ColorModel::Gray64i,
        ColorModel::Gray32f,
        ColorModel::Gray64f,
        ColorModel::GrayA,
        ColorModel::GrayA32,
        ColorModel::GrayA64i,
        ColorModel::GrayA128i,
        ColorModel::GrayA64f,
        ColorModel::GrayA128f,
        ColorModel::Rgb,
        ColorModel::Rgb48,
        ColorModel::Rgb96i,
        ColorModel::Rgb192i,
        ColorModel::Rgb96f,
        ColorModel::Rgb192f,
        ColorModel::Rgba,
        ColorModel::Rgba64,
        ColorModel::Rgba128i,
        ColorModel::Rgba256i,
        ColorModel::Rgba128f,
        ColorModel::Rgba256f,
    ];

    /// Matrix model for `channels` (clamped into `1..=4`) and `kind`.
    pub const fn of(channels: usize, kind: SampleKind) -> ColorModel {
        let row = match channels {
            0 | 1 => 0,
            2 => 1,
            3 => 2,
            _ => 3,
        };
        let col = match kind {
            SampleKind::U8 => 0,
            SampleKind::U16 => 1,
            SampleKind::I32 => 2,
            SampleKind::I64 => 3,
            SampleKind::F32 => 4,
            SampleKind::F64 => 5,
        };
        Self::MATRIX[row * 6 + col]
    }

    /// Like [`ColorModel::of`] but rejects channel counts outside `1..=4`.
    pub fn from_layout(channels: usize, kind: SampleKind) -> Option<ColorModel> {
        (1..=4).contains(&channels).then(|| Self::of(channels, kind))
    }

    /// `(channels, kind)` of a matrix model; `None` for YCbCr.
    pub fn layout(self) -> Option<(usize, SampleKind)> {
        let i = Self::MATRIX.iter().position(|m| *m == self)?;
        Some((i / 6 + 1, KIND_ORDER[i % 6]))
    }

    pub fn channels(self) -> usize {
        self.layout().map_or(3, |(c, _)| c)
    }

    pub fn name(self) -> &'static str {
        match self {
            ColorModel::Gray => "Gray",
            ColorModel::Gray16 => "Gray16",
            ColorModel::Gray32i => "Gray32i",
            ColorModel::Gray32f => "Gray32f",
            ColorModel::Gray64i => "Gray64i",
            ColorModel::Gray64f => "Gray64f",
            ColorModel::GrayA => "GrayA",
            ColorModel::GrayA32 => "GrayA32",
            ColorModel::GrayA64i => "GrayA64i",
            ColorModel::GrayA64f => "GrayA64f",
            ColorModel::GrayA128i => "GrayA128i",
            ColorModel::GrayA128f => "GrayA128f",
            ColorModel::Rgb => "RGB",
            ColorModel::Rgb48 => "RGB48",
            ColorModel::Rgb96i => "RGB96i",
            ColorModel::Rgb96f => "RGB96f",
            ColorModel::Rgb192i => "RGB192i",
            ColorModel::Rgb192f => "RGB192f",
            ColorModel::Rgba => "RGBA",
            ColorModel::Rgba64 => "RGBA64",
            ColorModel::Rgba128i => "RGBA128i",
            ColorModel::Rgba128f => "RGBA128f",
            ColorModel::Rgba256i => "RGBA256i",
            ColorModel::Rgba256f => "RGBA256f",
            ColorModel::YCbCr => "YCbCr",
        }
    }

    /// Maps `c` into this model's color type. Never fails; values that do
    /// not fit are cast per the sample rules.
    pub fn convert(self, c: Color) -> Color {
        let Some((channels, kind)) = self.layout() else {
            return Color::YCbCr(to_ycbcr(c));
        };

        let (src_channels, src_samples) = match c {
            Color::Matrix { channels, samples } => (channels as usize, samples),
            Color::YCbCr(_) => {
                let (r, g, b, a) = c.rgba16();
                (4, Samples::U16([r as u16, g as u16, b as u16, a as u16]))
            }
        };
        if matches!(c, Color::Matrix { .. })
            && src_channels == channels
            && src_samples.kind() == kind
        {
            return c;
        }

        let samples = match src_samples.cast(kind) {
            Samples::U8(v) => Samples::U8(remap(v, src_channels, channels)),
            Samples::U16(v) => Samples::U16(remap(v, src_channels, channels)),
            Samples::I32(v) => Samples::I32(remap(v, src_channels, channels)),
            Samples::I64(v) => Samples::I64(remap(v, src_channels, channels)),
            Samples::F32(v) => Samples::F32(remap(v, src_channels, channels)),
            Samples::F64(v) => Samples::F64(remap(v, src_channels, channels)),
        };
        Color::Matrix {
            channels: channels as u8,
            samples,
        }
    }
}

impl std::fmt::Display for ColorModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

fn to_ycbcr(c: Color) -> YCbCr {
    match c {
        Color::YCbCr(v) => v,
        other => {
            let (r, g, b, _) = other.rgba16();
            YCbCr::from_rgb((r >> 8) as u8, (g >> 8) as u8, (b >> 8) as u8)
        }
    }
}

fn remap<T: Sample>(v: [T; 4], from: usize, to: usize) -> [T; 4] {
    let z = T::default();
    if from == to {
        return v;
    }
    match (from, to) {
        (1, 2) => [v[0], T::OPAQUE, z, z],
        (1, 3) | (2, 3) => [v[0], v[0], v[0], z],
        (1, _) => [v[0], v[0], v[0], T::OPAQUE],
        (2, 1) => [v[0], z, z, z],
        (2, _) => [v[0], v[0], v[0], v[1]],
        (3, 1) => [T::luminance(v[0], v[1], v[2]), z, z, z],
        (3, 2) => [T::luminance(v[0], v[1], v[2]), T::OPAQUE, z, z],
        (3, _) => [v[0], v[1], v[2], T::OPAQUE],
        (_, 1) => [T::luminance(v[0], v[1], v[2]), z, z, z],
        (_, 2) => [T::luminance(v[0], v[1], v[2]), v[3], z, z],
        _ => [v[0], v[1], v[2], z],
    }
}
