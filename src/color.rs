//! Color module
//!
//! Sample kinds, the 24 typed color values, the dynamic [`Color`] value and
//! the color-model hub that converts between all of them.

pub mod model;
pub mod pixel;
pub mod sample;
pub mod value;
pub mod ycbcr;


pub use model::ColorModel;
pub use pixel::{
    Gray, Gray16, Gray32f, Gray32i, Gray64f, Gray64i, GrayA, GrayA32, GrayA64f, GrayA64i,
    GrayA128f, GrayA128i, Pixel, Rgb, Rgb48, Rgb96f, Rgb96i, Rgb192f, Rgb192i, Rgba, Rgba64,
    Rgba128f, Rgba128i, Rgba256f, Rgba256i,
};
pub use sample::{Sample, SampleFamily, SampleKind, Scalar};
pub use value::{Color, Samples};
pub use ycbcr::YCbCr;
