//! Unpacks a RAWP payload into a typed image buffer.

use crate::color::{
    Gray, Gray16, Gray32f, Pixel, Rgb, Rgb48, Rgb96f, Rgba, Rgba64, Rgba128f, Sample, SampleKind,
};
use crate::common::bytes;
use crate::common::{ImageError, Result};
use crate::image::{ImageBuf, Raster, Rect};
use crate::rawp::header::Header;
use crate::rawp::pix_encoder::is_supported;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixDecoder {
    pub channels: usize,
    pub kind: SampleKind,
    pub width: usize,
    pub height: usize,
}

impl PixDecoder {
    pub fn new(channels: usize, kind: SampleKind, width: usize, height: usize) -> Result<Self> {
        if !is_supported(channels, kind) {
            return Err(ImageError::UnsupportedFormat { channels, kind });
        }
        Ok(Self {
            channels,
            kind,
            width,
            height,
        })
    }

    pub fn for_header(hdr: &Header) -> Result<Self> {
        Self::new(
            hdr.channels as usize,
            hdr.sample_kind(),
            hdr.width as usize,
            hdr.height as usize,
        )
    }

    /// Payload length this decoder expects.
    pub fn data_len(&self) -> usize {
        self.width * self.height * self.channels * self.kind.byte_width()
    }

    /// Decodes `data` into an image covering `[0, width) × [0, height)`.
    ///
    /// If `buf` is an image of the same concrete type whose rect covers the
    /// target, the result is a sub-image sharing its storage.
    pub fn decode(&self, data: &[u8], buf: Option<&dyn Raster>) -> Result<Box<dyn Raster>> {
        if data.len() != self.data_len() {
            return Err(ImageError::BadDataSize {
                expected: self.data_len(),
                actual: data.len(),
            });
        }
        let (w, h) = (self.width, self.height);
        let img = match (self.channels, self.kind) {
            (1, SampleKind::U8) => decode_as::<Gray>(data, w, h, buf),
            (1, SampleKind::U16) => decode_as::<Gray16>(data, w, h, buf),
            (1, SampleKind::F32) => decode_as::<Gray32f>(data, w, h, buf),
            (3, SampleKind::U8) => decode_as::<Rgb>(data, w, h, buf),
            (3, SampleKind::U16) => decode_as::<Rgb48>(data, w, h, buf),
            (3, SampleKind::F32) => decode_as::<Rgb96f>(data, w, h, buf),
            (4, SampleKind::U8) => decode_as::<Rgba>(data, w, h, buf),
            (4, SampleKind::U16) => decode_as::<Rgba64>(data, w, h, buf),
            (4, SampleKind::F32) => decode_as::<Rgba128f>(data, w, h, buf),
            (channels, kind) => return Err(ImageError::UnsupportedFormat { channels, kind }),
        };
        Ok(img)
    }
}

fn decode_as<P: Pixel>(
    data: &[u8],
    width: usize,
    height: usize,
    buf: Option<&dyn Raster>,
) -> Box<dyn Raster> {
    let rect = Rect::from_size(width, height);
    let img = match buf.and_then(|b| b.as_any().downcast_ref::<ImageBuf<P>>()) {
        Some(b) if rect.is_within(&b.rect()) => b.sub_image(rect),
        _ => ImageBuf::<P>::new(rect),
    };
    let row_len = width * P::BYTES;
    if row_len > 0 {
        let sample_width = <P::Sample as Sample>::KIND.byte_width();
        let stride = img.stride();
        let mut pix = img.pix_mut();
        for (y, src) in data.chunks_exact(row_len).enumerate() {
            bytes::swap_copy(&mut pix[y * stride..y * stride + row_len], src, sample_width);
        }
    }
    Box::new(img)
}
