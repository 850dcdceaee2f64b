use std::any::Any;

use crate::color::{Color, ColorModel, SampleKind};
use crate::image::rect::Rect;
use crate::image::storage::PixRef;

/// A finite rectangular grid of colors.
pub trait Image: Send + Sync {
    fn color_model(&self) -> ColorModel;

    fn bounds(&self) -> Rect;

    /// The color at `(x, y)`; the zero color outside [`Image::bounds`].
    fn at(&self, x: i32, y: i32) -> Color;

    /// True when every pixel in bounds is fully opaque.
    fn opaque(&self) -> bool;

    fn as_any(&self) -> &dyn Any;
}

/// An [`Image`] backed by an interleaved, big-endian byte plane.
pub trait Raster: Image {
    fn channels(&self) -> usize;

    fn depth(&self) -> SampleKind;

    /// Bytes per pixel.
    fn pixel_bytes(&self) -> usize {
        self.channels() * self.depth().byte_width()
    }

    /// The pixel plane starting at the pixel of `rect().min`.
    fn pix(&self) -> PixRef<'_>;

    fn stride(&self) -> usize;

    fn rect(&self) -> Rect {
        self.bounds()
    }

    /// Writes `c`, converted to this raster's model. Ignored outside bounds.
    fn set(&mut self, x: i32, y: i32, c: Color);

    /// A view over `r ∩ rect()` sharing this raster's pixel storage.
    fn sub_raster(&self, r: Rect) -> Box<dyn Raster>;

    /// A deep copy with the same stride and rect.
    fn duplicate(&self) -> Box<dyn Raster>;

    fn as_image(&self) -> &dyn Image;
}
