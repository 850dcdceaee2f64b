//! The dynamic color value: any point of the matrix, or a YCbCr triple.

use crate::color::model::ColorModel;
use crate::color::sample::{Sample, SampleKind};
use crate::color::ycbcr::YCbCr;

/// Up to four samples of one kind. Channels past the color's channel count
/// are zero and carry no meaning.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Samples {
    U8([u8; 4]),
    U16([u16; 4]),
    I32([i32; 4]),
    I64([i64; 4]),
    F32([f32; 4]),
    F64([f64; 4]),
}

impl Samples {
    pub fn kind(&self) -> SampleKind {
        match self {
            Samples::U8(_) => SampleKind::U8,
            Samples::U16(_) => SampleKind::U16,
            Samples::I32(_) => SampleKind::I32,
            Samples::I64(_) => SampleKind::I64,
            Samples::F32(_) => SampleKind::F32,
            Samples::F64(_) => SampleKind::F64,
        }
    }

    /// Casts every sample into `T` with the rules of [`Sample::from_scalar`].
    pub fn map_cast<T: Sample>(self) -> [T; 4] {
        match self {
            Samples::U8(v) => v.map(|s| T::cast(s)),
            Samples::U16(v) => v.map(|s| T::cast(s)),
            Samples::I32(v) => v.map(|s| T::cast(s)),
            Samples::I64(v) => v.map(|s| T::cast(s)),
            Samples::F32(v) => v.map(|s| T::cast(s)),
            Samples::F64(v) => v.map(|s| T::cast(s)),
        }
    }

    pub fn cast(self, kind: SampleKind) -> Samples {
        if self.kind() == kind {
            return self;
        }
        match kind {
            SampleKind::U8 => Samples::U8(self.map_cast()),
            SampleKind::U16 => Samples::U16(self.map_cast()),
            SampleKind::I32 => Samples::I32(self.map_cast()),
            SampleKind::I64 => Samples::I64(self.map_cast()),
            SampleKind::F32 => Samples::F32(self.map_cast()),
            SampleKind::F64 => Samples::F64(self.map_cast()),
        }
    }
}

/// Any color value the library knows about.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Color {
    /// `channels` (1 Gray, 2 GrayA, 3 RGB, 4 RGBA) samples of one kind.
    Matrix { channels: u8, samples: Samples },
    YCbCr(YCbCr),
}

impl Color {
    /// Builds a matrix color. `channels` is clamped into `1..=4`.
    pub fn new(channels: usize, samples: Samples) -> Self {
        Color::Matrix {
            channels: channels.clamp(1, 4) as u8,
            samples,
        }
    }

    pub fn model(&self) -> ColorModel {
        match self {
            Color::Matrix { channels, samples } => {
                ColorModel::of(*channels as usize, samples.kind())
            }
            Color::YCbCr(_) => ColorModel::YCbCr,
        }
    }

    /// Canonical `(r, g, b, a)`, each in `0..=0xFFFF`. Alpha-less colors
    /// report `a = 0xFFFF`.
    pub fn rgba16(&self) -> (u32, u32, u32, u32) {
        match *self {
            Color::Matrix { channels, samples } => match samples {
                Samples::U8(v) => canonical(v, channels),
                Samples::U16(v) => canonical(v, channels),
                Samples::I32(v) => canonical(v, channels),
                Samples::I64(v) => canonical(v, channels),
                Samples::F32(v) => canonical(v, channels),
                Samples::F64(v) => canonical(v, channels),
            },
            Color::YCbCr(c) => c.rgba16(),
        }
    }
}

impl From<YCbCr> for Color {
    fn from(c: YCbCr) -> Self {
        Color::YCbCr(c)
    }
}

fn canonical<T: Sample>(v: [T; 4], channels: u8) -> (u32, u32, u32, u32) {
    let c = v.map(T::to_canonical16);
    match channels {
        1 => (c[0], c[0], c[0], 0xFFFF),
        2 => (c[0], c[0], c[0], c[1]),
        3 => (c[0], c[1], c[2], 0xFFFF),
        _ => (c[0], c[1], c[2], c[3]),
    }
}
