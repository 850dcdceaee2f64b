//! Packs an image into the RAWP payload layout: rows top to bottom, no
//! padding, every sample little-endian.

use crate::color::{
    Gray, Gray16, Gray32f, Pixel, Rgb, Rgb48, Rgb96f, Rgba, Rgba64, Rgba128f, Sample, SampleKind,
};
use crate::common::bytes::{self, Endian};
use crate::common::{ImageError, Result};
use crate::image::{Image, ImageBuf, Rect, YCbCrImage};

/// Encoder for one of the nine container layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixEncoder {
    pub channels: usize,
    pub kind: SampleKind,
}

/// True for the `(channels, kind)` pairs the pixel codec can carry.
pub fn is_supported(channels: usize, kind: SampleKind) -> bool {
    matches!(channels, 1 | 3 | 4)
        && matches!(kind, SampleKind::U8 | SampleKind::U16 | SampleKind::F32)
}

impl PixEncoder {
    pub fn new(channels: usize, kind: SampleKind) -> Result<Self> {
        if !is_supported(channels, kind) {
            return Err(ImageError::UnsupportedFormat { channels, kind });
        }
        Ok(Self { channels, kind })
    }

    /// Encodes `m` over its bounds, reusing `buf`'s allocation if given.
    /// The result holds `width * height * channels * kind.byte_width()` bytes.
    pub fn encode(&self, m: &dyn Image, buf: Option<Vec<u8>>) -> Result<Vec<u8>> {
        let out = buf.unwrap_or_default();
        let data = match (self.channels, self.kind) {
            (1, SampleKind::U8) => encode_as::<Gray>(m, out),
            (1, SampleKind::U16) => encode_as::<Gray16>(m, out),
            (1, SampleKind::F32) => encode_as::<Gray32f>(m, out),
            (3, SampleKind::U8) => encode_as::<Rgb>(m, out),
            (3, SampleKind::U16) => encode_as::<Rgb48>(m, out),
            (3, SampleKind::F32) => encode_as::<Rgb96f>(m, out),
            (4, SampleKind::U8) => encode_as::<Rgba>(m, out),
            (4, SampleKind::U16) => encode_as::<Rgba64>(m, out),
            (4, SampleKind::F32) => encode_as::<Rgba128f>(m, out),
            (channels, kind) => return Err(ImageError::UnsupportedFormat { channels, kind }),
        };
        Ok(data)
    }
}

fn encode_as<D: Pixel>(m: &dyn Image, mut out: Vec<u8>) -> Vec<u8> {
    let r = m.bounds();
    let (w, h) = r.size();
    out.clear();
    out.resize(w * h * D::BYTES, 0);
    if out.is_empty() {
        return out;
    }

    if let Some(src) = m.as_any().downcast_ref::<ImageBuf<D>>() {
        let row_len = w * D::BYTES;
        let width = <D::Sample as Sample>::KIND.byte_width();
        let stride = src.stride();
        let pix = src.pix();
        for (y, dst) in out.chunks_exact_mut(row_len).enumerate() {
            bytes::swap_copy(dst, &pix[y * stride..y * stride + row_len], width);
        }
        return out;
    }

    let handled = convert_from::<Gray, D>(m, &mut out)
        || convert_from::<Gray16, D>(m, &mut out)
        || convert_from::<Gray32f, D>(m, &mut out)
        || convert_from::<Rgb, D>(m, &mut out)
        || convert_from::<Rgb48, D>(m, &mut out)
        || convert_from::<Rgb96f, D>(m, &mut out)
        || convert_from::<Rgba, D>(m, &mut out)
        || convert_from::<Rgba64, D>(m, &mut out)
        || convert_from::<Rgba128f, D>(m, &mut out);
    if handled {
        return out;
    }

    if let Some(src) = m.as_any().downcast_ref::<YCbCrImage>() {
        fill(&mut out, r, |x, y| {
            let c = src.ycbcr_at(x, y);
            if D::CHANNELS == 1 {
                D::from_color(Gray { y: c.y }.to_color())
            } else {
                let (r, g, b) = c.to_rgb();
                D::from_color(Rgb { r, g, b }.to_color())
            }
        });
        return out;
    }

    fill(&mut out, r, |x, y| {
        let (r, g, b, a) = m.at(x, y).rgba16();
        let c = Rgba64 {
            r: r as u16,
            g: g as u16,
            b: b as u16,
            a: a as u16,
        };
        D::from_color(c.to_color())
    });
    out
}

/// Converts from a concrete `ImageBuf<S>`; false if `m` is not one.
fn convert_from<S: Pixel, D: Pixel>(m: &dyn Image, out: &mut [u8]) -> bool {
    let Some(src) = m.as_any().downcast_ref::<ImageBuf<S>>() else {
        return false;
    };
    let (w, h) = src.rect().size();
    let stride = src.stride();
    let pix = src.pix();
    let mut dst = out.chunks_exact_mut(D::BYTES);
    for y in 0..h {
        let row = &pix[y * stride..y * stride + w * S::BYTES];
        for (s, d) in row.chunks_exact(S::BYTES).zip(&mut dst) {
            payload_pixel::<S, D>(S::read(s, Endian::Big)).write(d, Endian::Little);
        }
    }
    true
}

fn payload_pixel<S: Pixel, D: Pixel>(p: S) -> D {
    // Float gray takes the weighted sum without the integer rounding bias.
    if D::CHANNELS == 1 && S::CHANNELS >= 3 && <D::Sample as Sample>::KIND.is_float() {
        let [r, g, b, _] = p.to_array().map(|v| f64::cast(D::Sample::cast(v)));
        let y = D::Sample::cast(0.299 * r + 0.587 * g + 0.114 * b);
        return D::from_array([y; 4]);
    }
    D::from_color(p.to_color())
}

fn fill<D: Pixel>(out: &mut [u8], r: Rect, mut pixel: impl FnMut(i32, i32) -> D) {
    let mut dst = out.chunks_exact_mut(D::BYTES);
    for y in r.min.y..r.max.y {
        for x in r.min.x..r.max.x {
            if let Some(d) = dst.next() {
                pixel(x, y).write(d, Endian::Little);
            }
        }
    }
}
