//! Typed image buffers.
//!
//! [`ImageBuf<P>`] stores pixels of type `P` interleaved and big-endian.
//! Pixel `(x, y)` starts at byte `(y - min.y) * stride + (x - min.x) * P::BYTES`
//! of the plane, and the stride may exceed the bytes a row uses.

use std::any::Any;
use std::fmt;
use std::marker::PhantomData;

use crate::color::{
    Color, ColorModel, Gray, Gray16, Gray32f, Gray32i, Gray64f, Gray64i, GrayA, GrayA32,
    GrayA64f, GrayA64i, GrayA128f, GrayA128i, Pixel, Rgb, Rgb48, Rgb96f, Rgb96i, Rgb192f,
    Rgb192i, Rgba, Rgba64, Rgba128f, Rgba128i, Rgba256f, Rgba256i, Sample, SampleKind,
};
use crate::common::{Endian, ImageError, Result};
use crate::image::rect::Rect;
use crate::image::storage::{PixMut, PixRef, SharedPix};
use crate::image::traits::{Image, Raster};

pub struct ImageBuf<P: Pixel> {
    pix: SharedPix,
    stride: usize,
    rect: Rect,
    _pixel: PhantomData<P>,
}

pub type GrayImage = ImageBuf<Gray>;
pub type Gray16Image = ImageBuf<Gray16>;
pub type Gray32iImage = ImageBuf<Gray32i>;
pub type Gray32fImage = ImageBuf<Gray32f>;
pub type Gray64iImage = ImageBuf<Gray64i>;
pub type Gray64fImage = ImageBuf<Gray64f>;

pub type GrayAImage = ImageBuf<GrayA>;
pub type GrayA32Image = ImageBuf<GrayA32>;
pub type GrayA64iImage = ImageBuf<GrayA64i>;
pub type GrayA64fImage = ImageBuf<GrayA64f>;
pub type GrayA128iImage = ImageBuf<GrayA128i>;
pub type GrayA128fImage = ImageBuf<GrayA128f>;

pub type RgbImage = ImageBuf<Rgb>;
pub type Rgb48Image = ImageBuf<Rgb48>;
pub type Rgb96iImage = ImageBuf<Rgb96i>;
pub type Rgb96fImage = ImageBuf<Rgb96f>;
pub type Rgb192iImage = ImageBuf<Rgb192i>;
pub type Rgb192fImage = ImageBuf<Rgb192f>;

pub type RgbaImage = ImageBuf<Rgba>;
pub type Rgba64Image = ImageBuf<Rgba64>;
pub type Rgba128iImage = ImageBuf<Rgba128i>;
pub type Rgba128fImage = ImageBuf<Rgba128f>;
pub type Rgba256iImage = ImageBuf<Rgba256i>;
pub type Rgba256fImage = ImageBuf<Rgba256f>;

impl<P: Pixel> ImageBuf<P> {
    /// A zeroed image covering `rect` with a tightly packed stride.
    pub fn new(rect: Rect) -> Self {
        let (w, h) = rect.size();
        let stride = w * P::BYTES;
        Self {
            pix: SharedPix::zeroed(stride * h),
            stride,
            rect,
            _pixel: PhantomData,
        }
    }

    /// Wraps an existing big-endian pixel plane.
    pub fn init(pix: Vec<u8>, stride: usize, rect: Rect) -> Result<Self> {
        let (w, h) = rect.size();
        if stride < w * P::BYTES {
            return Err(ImageError::InvalidLayout(format!(
                "stride {} is shorter than a row of {} {} pixels",
                stride,
                w,
                P::MODEL
            )));
        }
        if w > 0 && h > 0 {
            let needed = (h - 1) * stride + w * P::BYTES;
            if pix.len() < needed {
                return Err(ImageError::InvalidLayout(format!(
                    "{} bytes cannot hold a {}x{} image with stride {} ({} needed)",
                    pix.len(),
                    w,
                    h,
                    stride,
                    needed
                )));
            }
        }
        Ok(Self {
            pix: SharedPix::from_vec(pix),
            stride,
            rect,
            _pixel: PhantomData,
        })
    }

    fn empty() -> Self {
        Self {
            pix: SharedPix::empty(),
            stride: 0,
            rect: Rect::default(),
            _pixel: PhantomData,
        }
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Byte offset of `(x, y)` into the plane. Only meaningful inside the rect.
    pub fn pix_offset(&self, x: i32, y: i32) -> usize {
        let dy = (i64::from(y) - i64::from(self.rect.min.y)) as usize;
        let dx = (i64::from(x) - i64::from(self.rect.min.x)) as usize;
        dy * self.stride + dx * P::BYTES
    }

    pub fn pix(&self) -> PixRef<'_> {
        self.pix.read()
    }

    pub fn pix_mut(&self) -> PixMut<'_> {
        self.pix.write()
    }

    /// True when both buffers view the same pixel storage.
    pub fn shares_pix(&self, other: &ImageBuf<P>) -> bool {
        self.pix.shares_storage(&other.pix)
    }

    /// The pixel at `(x, y)`, or the zero pixel outside the rect.
    pub fn pixel_at(&self, x: i32, y: i32) -> P {
        if !self.rect.contains(x, y) {
            return P::default();
        }
        self.typed_at(x, y)
    }

    /// Writes `p` at `(x, y)`; ignored outside the rect.
    pub fn set_pixel(&mut self, x: i32, y: i32, p: P) {
        if !self.rect.contains(x, y) {
            return;
        }
        self.typed_set(x, y, p);
    }

    /// Reads without checking the rect. Panics if `(x, y)` lies outside the plane.
    pub fn typed_at(&self, x: i32, y: i32) -> P {
        let i = self.pix_offset(x, y);
        P::read(&self.pix.read()[i..i + P::BYTES], Endian::Big)
    }

    /// Writes without checking the rect. Panics if `(x, y)` lies outside the plane.
    pub fn typed_set(&mut self, x: i32, y: i32, p: P) {
        let i = self.pix_offset(x, y);
        p.write(&mut self.pix.write()[i..i + P::BYTES], Endian::Big);
    }

    /// A view over `r ∩ rect` sharing this buffer's storage. An empty
    /// intersection yields an empty buffer.
    pub fn sub_image(&self, r: Rect) -> ImageBuf<P> {
        let r = r.intersect(&self.rect);
        if r.is_empty() {
            return Self::empty();
        }
        let i = self.pix_offset(r.min.x, r.min.y);
        Self {
            pix: self.pix.tail(i),
            stride: self.stride,
            rect: r,
            _pixel: PhantomData,
        }
    }

    /// True when every alpha sample in the rect is the opaque sentinel.
    pub fn is_opaque(&self) -> bool {
        if P::CHANNELS % 2 == 1 || self.rect.is_empty() {
            return true;
        }
        let (w, h) = self.rect.size();
        let pix = self.pix.read();
        (0..h).all(|y| {
            let row = &pix[y * self.stride..y * self.stride + w * P::BYTES];
            row.chunks_exact(P::BYTES)
                .all(|b| P::read(b, Endian::Big).is_opaque())
        })
    }

    /// A deep copy with the same stride and rect.
    pub fn deep_copy(&self) -> ImageBuf<P> {
        Self {
            pix: SharedPix::from_vec(self.pix.to_vec()),
            stride: self.stride,
            rect: self.rect,
            _pixel: PhantomData,
        }
    }

    /// Sets every pixel in the rect to `p`.
    pub fn fill(&mut self, p: P) {
        let mut one = vec![0u8; P::BYTES];
        p.write(&mut one, Endian::Big);
        let (w, h) = self.rect.size();
        let stride = self.stride;
        let mut pix = self.pix.write();
        for y in 0..h {
            for px in pix[y * stride..y * stride + w * P::BYTES].chunks_exact_mut(P::BYTES) {
                px.copy_from_slice(&one);
            }
        }
    }
}

impl<P: Pixel> fmt::Debug for ImageBuf<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageBuf")
            .field("model", &P::MODEL)
            .field("rect", &self.rect)
            .field("stride", &self.stride)
            .field("len", &self.pix.len())
            .finish()
    }
}

impl<P: Pixel> Image for ImageBuf<P> {
    fn color_model(&self) -> ColorModel {
        P::MODEL
    }

    fn bounds(&self) -> Rect {
        self.rect
    }

    fn at(&self, x: i32, y: i32) -> Color {
        self.pixel_at(x, y).to_color()
    }

    fn opaque(&self) -> bool {
        self.is_opaque()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl<P: Pixel> Raster for ImageBuf<P> {
    fn channels(&self) -> usize {
        P::CHANNELS
    }

    fn depth(&self) -> SampleKind {
        <P::Sample as Sample>::KIND
    }

    fn pix(&self) -> PixRef<'_> {
        self.pix.read()
    }

    fn stride(&self) -> usize {
        self.stride
    }

    fn set(&mut self, x: i32, y: i32, c: Color) {
        if !self.rect.contains(x, y) {
            return;
        }
        self.typed_set(x, y, P::from_color(c));
    }

    fn sub_raster(&self, r: Rect) -> Box<dyn Raster> {
        Box::new(self.sub_image(r))
    }

    fn duplicate(&self) -> Box<dyn Raster> {
        Box::new(self.deep_copy())
    }

    fn as_image(&self) -> &dyn Image {
        self
    }
}
