//! Sample kind descriptor and the per-kind numeric rules.
//!
//! A sample is one channel value. Six kinds exist: `u8`, `u16`, `i32`,
//! `i64`, `f32` and `f64`. Every cast between kinds goes through
//! [`Sample::from_scalar`], which is the single place the casting rules live:
//!
//! - `u8 -> u16` expands by `0x0101`, `u16 -> u8` keeps the high byte;
//! - any other widening keeps the numeric value;
//! - any other integer narrowing truncates to the low bits;
//! - float to integer truncates toward zero and saturates at the bounds.

use std::fmt::Debug;

use crate::color::value::Samples;
use crate::common::bytes::{self, Endian};

/// Numeric family of a sample kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SampleFamily {
    Unsigned,
    Signed,
    Float,
}

/// The closed set of per-channel numeric types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SampleKind {
    U8,
    U16,
    I32,
    I64,
    F32,
    F64,
}

impl SampleKind {
    pub const ALL: [SampleKind; 6] = [
        SampleKind::U8,
        SampleKind::U16,
        SampleKind::I32,
        SampleKind::I64,
        SampleKind::F32,
        SampleKind::F64,
    ];

    /// Width of one sample in bytes: 1, 2, 4 or 8.
    pub const fn byte_width(self) -> usize {
        match self {
            SampleKind::U8 => 1,
            SampleKind::U16 => 2,
            SampleKind::I32 | SampleKind::F32 => 4,
            SampleKind::I64 | SampleKind::F64 => 8,
        }
    }

    pub const fn bits(self) -> usize {
        self.byte_width() * 8
    }

    pub const fn family(self) -> SampleFamily {
        match self {
            SampleKind::U8 | SampleKind::U16 => SampleFamily::Unsigned,
            SampleKind::I32 | SampleKind::I64 => SampleFamily::Signed,
            SampleKind::F32 | SampleKind::F64 => SampleFamily::Float,
        }
    }

    pub const fn is_float(self) -> bool {
        matches!(self.family(), SampleFamily::Float)
    }
}

/// A single sample of any kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scalar {
    U8(u8),
    U16(u16),
    I32(i32),
    I64(i64),
    F32(f32),
    F64(f64),
}

/// A channel value type. Implemented for exactly the six sample kinds.
pub trait Sample: Copy + Default + PartialEq + Debug + Send + Sync + 'static {
    const KIND: SampleKind;

    /// Alpha value written when a source without alpha is widened to a
    /// color with alpha. Kinds wider than 16 bits use the literal `0xFFFF`.
    const OPAQUE: Self;

    fn to_scalar(self) -> Scalar;

    fn from_scalar(s: Scalar) -> Self;

    fn cast<S: Sample>(s: S) -> Self {
        Self::from_scalar(s.to_scalar())
    }

    /// Projection into the 16-bit canonical space. Kinds wider than 16 bits
    /// are narrowed to `u16` first, so out-of-range values wrap or clip.
    fn to_canonical16(self) -> u32;

    /// `(299·r + 587·g + 114·b + 500) / 1000` for integer kinds, rounding
    /// half up; plain `(299·r + 587·g + 114·b) / 1000` for float kinds.
    fn luminance(r: Self, g: Self, b: Self) -> Self;

    fn get(b: &[u8], order: Endian) -> Self;

    fn put(self, b: &mut [u8], order: Endian);

    fn pack(v: [Self; 4]) -> Samples;

    fn unpack(s: Samples) -> [Self; 4];
}

// Floor division keeps the +500 bias a round-half-up for negative sums too.
#[inline]
fn int_luminance(r: i128, g: i128, b: i128) -> i128 {
    (299 * r + 587 * g + 114 * b + 500).div_euclid(1000)
}

// Equal inputs short-circuit so gray stays exactly gray under repeated
// conversion.
#[inline]
fn float_luminance(r: f64, g: f64, b: f64) -> f64 {
    if r == g && g == b {
        return r;
    }
    (299.0 * r + 587.0 * g + 114.0 * b) / 1000.0
}

impl Sample for u8 {
    const KIND: SampleKind = SampleKind::U8;
    const OPAQUE: Self = 0xFF;

    fn to_scalar(self) -> Scalar {
        Scalar::U8(self)
    }

    fn from_scalar(s: Scalar) -> Self {
        match s {
            Scalar::U8(v) => v,
            Scalar::U16(v) => (v >> 8) as u8,
            Scalar::I32(v) => v as u8,
            Scalar::I64(v) => v as u8,
            Scalar::F32(v) => v as u8,
            Scalar::F64(v) => v as u8,
        }
    }

    fn to_canonical16(self) -> u32 {
        self as u32 * 0x0101
    }

    fn luminance(r: Self, g: Self, b: Self) -> Self {
        int_luminance(r as i128, g as i128, b as i128) as u8
    }

    fn get(b: &[u8], _order: Endian) -> Self {
        b[0]
    }

    fn put(self, b: &mut [u8], _order: Endian) {
        b[0] = self;
    }

    fn pack(v: [Self; 4]) -> Samples {
        Samples::U8(v)
    }

    fn unpack(s: Samples) -> [Self; 4] {
        match s {
            Samples::U8(v) => v,
            other => other.map_cast(),
        }
    }
}

impl Sample for u16 {
    const KIND: SampleKind = SampleKind::U16;
    const OPAQUE: Self = 0xFFFF;

    fn to_scalar(self) -> Scalar {
        Scalar::U16(self)
    }

    fn from_scalar(s: Scalar) -> Self {
        match s {
            Scalar::U8(v) => v as u16 * 0x0101,
            Scalar::U16(v) => v,
            Scalar::I32(v) => v as u16,
            Scalar::I64(v) => v as u16,
            Scalar::F32(v) => v as u16,
            Scalar::F64(v) => v as u16,
        }
    }

    fn to_canonical16(self) -> u32 {
        self as u32
    }

    fn luminance(r: Self, g: Self, b: Self) -> Self {
        int_luminance(r as i128, g as i128, b as i128) as u16
    }

    fn get(b: &[u8], order: Endian) -> Self {
        bytes::get_u16(b, order)
    }

    fn put(self, b: &mut [u8], order: Endian) {
        bytes::put_u16(b, self, order)
    }

    fn pack(v: [Self; 4]) -> Samples {
        Samples::U16(v)
    }

    fn unpack(s: Samples) -> [Self; 4] {
        match s {
            Samples::U16(v) => v,
            other => other.map_cast(),
        }
    }
}

impl Sample for i32 {
    const KIND: SampleKind = SampleKind::I32;
    const OPAQUE: Self = 0xFFFF;

    fn to_scalar(self) -> Scalar {
        Scalar::I32(self)
    }

    fn from_scalar(s: Scalar) -> Self {
        match s {
            Scalar::U8(v) => v as i32,
            Scalar::U16(v) => v as i32,
            Scalar::I32(v) => v,
            Scalar::I64(v) => v as i32,
            Scalar::F32(v) => v as i32,
            Scalar::F64(v) => v as i32,
        }
    }

    fn to_canonical16(self) -> u32 {
        self as u16 as u32
    }

    fn luminance(r: Self, g: Self, b: Self) -> Self {
        int_luminance(r as i128, g as i128, b as i128) as i32
    }

    fn get(b: &[u8], order: Endian) -> Self {
        bytes::get_i32(b, order)
    }

    fn put(self, b: &mut [u8], order: Endian) {
        bytes::put_i32(b, self, order)
    }

    fn pack(v: [Self; 4]) -> Samples {
        Samples::I32(v)
    }

    fn unpack(s: Samples) -> [Self; 4] {
        match s {
            Samples::I32(v) => v,
            other => other.map_cast(),
        }
    }
}

impl Sample for i64 {
    const KIND: SampleKind = SampleKind::I64;
    const OPAQUE: Self = 0xFFFF;

    fn to_scalar(self) -> Scalar {
        Scalar::I64(self)
    }

    fn from_scalar(s: Scalar) -> Self {
        match s {
            Scalar::U8(v) => v as i64,
            Scalar::U16(v) => v as i64,
            Scalar::I32(v) => v as i64,
            Scalar::I64(v) => v,
            Scalar::F32(v) => v as i64,
            Scalar::F64(v) => v as i64,
        }
    }

    fn to_canonical16(self) -> u32 {
        self as u16 as u32
    }

    fn luminance(r: Self, g: Self, b: Self) -> Self {
        int_luminance(r as i128, g as i128, b as i128) as i64
    }

    fn get(b: &[u8], order: Endian) -> Self {
        bytes::get_i64(b, order)
    }

    fn put(self, b: &mut [u8], order: Endian) {
        bytes::put_i64(b, self, order)
    }

    fn pack(v: [Self; 4]) -> Samples {
        Samples::I64(v)
    }

    fn unpack(s: Samples) -> [Self; 4] {
        match s {
            Samples::I64(v) => v,
            other => other.map_cast(),
        }
    }
}

impl Sample for f32 {
    const KIND: SampleKind = SampleKind::F32;
    const OPAQUE: Self = 65535.0;

    fn to_scalar(self) -> Scalar {
        Scalar::F32(self)
    }

    fn from_scalar(s: Scalar) -> Self {
        match s {
            Scalar::U8(v) => v as f32,
            Scalar::U16(v) => v as f32,
            Scalar::I32(v) => v as f32,
            Scalar::I64(v) => v as f32,
            Scalar::F32(v) => v,
            Scalar::F64(v) => v as f32,
        }
    }

    fn to_canonical16(self) -> u32 {
        self as u16 as u32
    }

    fn luminance(r: Self, g: Self, b: Self) -> Self {
        float_luminance(r as f64, g as f64, b as f64) as f32
    }

    fn get(b: &[u8], order: Endian) -> Self {
        bytes::get_f32(b, order)
    }

    fn put(self, b: &mut [u8], order: Endian) {
        bytes::put_f32(b, self, order)
    }

    fn pack(v: [Self; 4]) -> Samples {
        Samples::F32(v)
    }

    fn unpack(s: Samples) -> [Self; 4] {
        match s {
            Samples::F32(v) => v,
            other => other.map_cast(),
        }
    }
}

impl Sample for f64 {
    const KIND: SampleKind = SampleKind::F64;
    const OPAQUE: Self = 65535.0;

    fn to_scalar(self) -> Scalar {
        Scalar::F64(self)
    }

    fn from_scalar(s: Scalar) -> Self {
        match s {
            Scalar::U8(v) => v as f64,
            Scalar::U16(v) => v as f64,
            Scalar::I32(v) => v as f64,
            Scalar::I64(v) => v as f64,
            Scalar::F32(v) => v as f64,
            Scalar::F64(v) => v,
        }
    }

    fn to_canonical16(self) -> u32 {
        self as u16 as u32
    }

    fn luminance(r: Self, g: Self, b: Self) -> Self {
        float_luminance(r, g, b)
    }

    fn get(b: &[u8], order: Endian) -> Self {
        bytes::get_f64(b, order)
    }

    fn put(self, b: &mut [u8], order: Endian) {
        bytes::put_f64(b, self, order)
    }

    fn pack(v: [Self; 4]) -> Samples {
        Samples::F64(v)
    }

    fn unpack(s: Samples) -> [Self; 4] {
        match s {
            Samples::F64(v) => v,
            other => other.map_cast(),
        }
    }
}
