//! Typed color values.
//!
//! Four generic shapes (gray, gray+alpha, RGB, RGBA) over the six sample
//! kinds give the 24 color types. Each type parameter defaults to `u8`, so
//! `Gray`, `GrayA`, `Rgb` and `Rgba` name the 8-bit variants directly; the
//! other 20 are aliases named after their total bit count.

use std::fmt::Debug;

use crate::color::model::ColorModel;
use crate::color::sample::Sample;
use crate::color::value::Color;
use crate::common::bytes::Endian;

/// A color type of the matrix with a fixed channel count and sample kind.
pub trait Pixel: Copy + Default + PartialEq + Debug + Send + Sync + 'static {
    type Sample: Sample;

    const CHANNELS: usize;
    const MODEL: ColorModel;
    /// Bytes one pixel occupies in a pixel plane.
    const BYTES: usize = Self::CHANNELS * <Self::Sample as Sample>::KIND.byte_width();

    /// Builds the pixel from the first `CHANNELS` entries.
    fn from_array(v: [Self::Sample; 4]) -> Self;

    /// Samples in declaration order, zero-padded to four.
    fn to_array(self) -> [Self::Sample; 4];

    fn to_color(self) -> Color {
        Color::new(Self::CHANNELS, Self::Sample::pack(self.to_array()))
    }

    /// Converts any color into this type through the color-model hub.
    fn from_color(c: Color) -> Self {
        match Self::MODEL.convert(c) {
            Color::Matrix { samples, .. } => Self::from_array(Self::Sample::unpack(samples)),
            Color::YCbCr(_) => Self::default(),
        }
    }

    /// Canonical 16-bit RGBA.
    fn rgba16(self) -> (u32, u32, u32, u32) {
        self.to_color().rgba16()
    }

    /// True when the alpha sample equals [`Sample::OPAQUE`]; always true
    /// for alpha-less types.
    fn is_opaque(self) -> bool {
        match Self::CHANNELS {
            2 => self.to_array()[1] == Self::Sample::OPAQUE,
            4 => self.to_array()[3] == Self::Sample::OPAQUE,
            _ => true,
        }
    }

    fn read(b: &[u8], order: Endian) -> Self {
        let w = <Self::Sample as Sample>::KIND.byte_width();
        let mut v = [Self::Sample::default(); 4];
        for (i, s) in v.iter_mut().take(Self::CHANNELS).enumerate() {
            *s = Self::Sample::get(&b[i * w..], order);
        }
        Self::from_array(v)
    }

    fn write(self, b: &mut [u8], order: Endian) {
        let w = <Self::Sample as Sample>::KIND.byte_width();
        for (i, s) in self.to_array().into_iter().take(Self::CHANNELS).enumerate() {
            s.put(&mut b[i * w..], order);
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Gray<T = u8> {
    pub y: T,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GrayA<T = u8> {
    pub y: T,
    pub a: T,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rgb<T = u8> {
    pub r: T,
    pub g: T,
    pub b: T,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rgba<T = u8> {
    pub r: T,
    pub g: T,
    pub b: T,
    pub a: T,
}

pub type Gray16 = Gray<u16>;
pub type Gray32i = Gray<i32>;
pub type Gray32f = Gray<f32>;
pub type Gray64i = Gray<i64>;
pub type Gray64f = Gray<f64>;

pub type GrayA32 = GrayA<u16>;
pub type GrayA64i = GrayA<i32>;
pub type GrayA64f = GrayA<f32>;
pub type GrayA128i = GrayA<i64>;
pub type GrayA128f = GrayA<f64>;

pub type Rgb48 = Rgb<u16>;
pub type Rgb96i = Rgb<i32>;
pub type Rgb96f = Rgb<f32>;
pub type Rgb192i = Rgb<i64>;
pub type Rgb192f = Rgb<f64>;

pub type Rgba64 = Rgba<u16>;
pub type Rgba128i = Rgba<i32>;
pub type Rgba128f = Rgba<f32>;
pub type Rgba256i = Rgba<i64>;
pub type Rgba256f = Rgba<f64>;

impl<T: Sample> Pixel for Gray<T> {
    type Sample = T;
    const CHANNELS: usize = 1;
    const MODEL: ColorModel = ColorModel::of(1, T::KIND);

    fn from_array(v: [T; 4]) -> Self {
        Self { y: v[0] }
    }

    fn to_array(self) -> [T; 4] {
        let z = T::default();
        [self.y, z, z, z]
    }
}

impl<T: Sample> Pixel for GrayA<T> {
    type Sample = T;
    const CHANNELS: usize = 2;
    const MODEL: ColorModel = ColorModel::of(2, T::KIND);

    fn from_array(v: [T; 4]) -> Self {
        Self { y: v[0], a: v[1] }
    }

    fn to_array(self) -> [T; 4] {
        let z = T::default();
        [self.y, self.a, z, z]
    }
}

impl<T: Sample> Pixel for Rgb<T> {
    type Sample = T;
    const CHANNELS: usize = 3;
    const MODEL: ColorModel = ColorModel::of(3, T::KIND);

    fn from_array(v: [T; 4]) -> Self {
        Self {
            r: v[0],
            g: v[1],
            b: v[2],
        }
    }

    fn to_array(self) -> [T; 4] {
        [self.r, self.g, self.b, T::default()]
    }
}

impl<T: Sample> Pixel for Rgba<T> {
    type Sample = T;
    const CHANNELS: usize = 4;
    const MODEL: ColorModel = ColorModel::of(4, T::KIND);

    fn from_array(v: [T; 4]) -> Self {
        Self {
            r: v[0],
            g: v[1],
            b: v[2],
            a: v[3],
        }
    }

    fn to_array(self) -> [T; 4] {
        [self.r, self.g, self.b, self.a]
    }
}
