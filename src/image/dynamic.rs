//! Constructors that pick the concrete buffer type at run time.

use crate::color::{
    ColorModel, Gray, Gray16, Gray32f, Gray32i, Gray64f, Gray64i, GrayA, GrayA32, GrayA64f,
    GrayA64i, GrayA128f, GrayA128i, Pixel, Rgb, Rgb48, Rgb96f, Rgb96i, Rgb192f, Rgb192i, Rgba,
    Rgba64, Rgba128f, Rgba128i, Rgba256f, Rgba256i, SampleKind,
};
use crate::common::{ImageError, Result};
use crate::image::buffer::ImageBuf;
use crate::image::rect::Rect;
use crate::image::traits::{Image, Raster};

fn boxed<P: Pixel>(rect: Rect) -> Box<dyn Raster> {
    Box::new(ImageBuf::<P>::new(rect))
}

/// A zeroed raster of the given layout.
pub fn new_image(rect: Rect, channels: usize, kind: SampleKind) -> Result<Box<dyn Raster>> {
    let model = ColorModel::from_layout(channels, kind)
        .ok_or(ImageError::UnsupportedFormat { channels, kind })?;
    new_raster(model, rect)
}

/// A zeroed raster of `model`. Fails for models without an interleaved layout.
pub fn new_raster(model: ColorModel, rect: Rect) -> Result<Box<dyn Raster>> {
    use ColorModel as M;
    let raster = match model {
        M::Gray => boxed::<Gray>(rect),
        M::Gray16 => boxed::<Gray16>(rect),
        M::Gray32i => boxed::<Gray32i>(rect),
        M::Gray32f => boxed::<Gray32f>(rect),
        M::Gray64i => boxed::<Gray64i>(rect),
        M::Gray64f => boxed::<Gray64f>(rect),
        M::GrayA => boxed::<GrayA>(rect),
        M::GrayA32 => boxed::<GrayA32>(rect),
        M::GrayA64i => boxed::<GrayA64i>(rect),
        M::GrayA64f => boxed::<GrayA64f>(rect),
        M::GrayA128i => boxed::<GrayA128i>(rect),
        M::GrayA128f => boxed::<GrayA128f>(rect),
        M::Rgb => boxed::<Rgb>(rect),
        M::Rgb48 => boxed::<Rgb48>(rect),
        M::Rgb96i => boxed::<Rgb96i>(rect),
        M::Rgb96f => boxed::<Rgb96f>(rect),
        M::Rgb192i => boxed::<Rgb192i>(rect),
        M::Rgb192f => boxed::<Rgb192f>(rect),
        M::Rgba => boxed::<Rgba>(rect),
        M::Rgba64 => boxed::<Rgba64>(rect),
        M::Rgba128i => boxed::<Rgba128i>(rect),
        M::Rgba128f => boxed::<Rgba128f>(rect),
        M::Rgba256i => boxed::<Rgba256i>(rect),
        M::Rgba256f => boxed::<Rgba256f>(rect),
        M::YCbCr => {
            return Err(ImageError::UnsupportedFormat {
                channels: 3,
                kind: SampleKind::U8,
            });
        }
    };
    Ok(raster)
}

/// A deep copy preserving stride and rect.
pub fn clone_image(m: &dyn Raster) -> Box<dyn Raster> {
    m.duplicate()
}

/// Converts every pixel of `m` into a new raster of `model`.
pub fn convert_image(m: &dyn Image, model: ColorModel) -> Result<Box<dyn Raster>> {
    let r = m.bounds();
    let mut dst = new_raster(model, r)?;
    for y in r.min.y..r.max.y {
        for x in r.min.x..r.max.x {
            dst.set(x, y, m.at(x, y));
        }
    }
    Ok(dst)
}
