//! Multi-depth image buffers and the RAWP raw pixel container.
//!
//! The library covers 24 color and image types (gray, gray+alpha, RGB and
//! RGBA over u8, u16, i32, i64, f32 and f64 samples), a color-model hub that
//! converts between them, and a format registry with RAWP and TIFF codecs.

pub mod color;
pub mod common;
pub mod format;
pub mod image;
pub mod logger;
pub mod rawp;
pub mod tiff;

pub use color::{Color, ColorModel, Pixel, Sample, SampleKind};
pub use common::{ImageError, Result};
pub use format::{Config, Format, Options, Registry, decode, decode_config, encode, load, save};
pub use image::{Image, ImageBuf, Point, Raster, Rect};
pub use rawp::RawpOptions;
pub use tiff::{TiffCompression, TiffOptions};
