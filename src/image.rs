//! Image module
//!
//! Rectangles, the shared pixel storage, the 24 typed image buffers, the
//! planar YCbCr image and the operations that work across all of them.

pub mod buffer;
pub mod draw;
pub mod dynamic;
pub mod rect;
pub mod storage;
pub mod traits;
pub mod ycbcr;


pub use buffer::{
    Gray16Image, Gray32fImage, Gray32iImage, Gray64fImage, Gray64iImage, GrayA32Image,
    GrayA64fImage, GrayA64iImage, GrayA128fImage, GrayA128iImage, GrayAImage, GrayImage, ImageBuf,
    Rgb48Image, Rgb96fImage, Rgb96iImage, Rgb192fImage, Rgb192iImage, RgbImage, Rgba64Image,
    Rgba128fImage, Rgba128iImage, Rgba256fImage, Rgba256iImage, RgbaImage,
};
pub use draw::draw;
pub use dynamic::{clone_image, convert_image, new_image, new_raster};
pub use rect::{Point, Rect};
pub use storage::{PixMut, PixRef, SharedPix};
pub use traits::{Image, Raster};
pub use ycbcr::{SubsampleRatio, YCbCrImage};
