//! Planar Y'CbCr images with optional chroma subsampling.

use std::any::Any;

use crate::color::{Color, ColorModel, YCbCr};
use crate::image::rect::Rect;
use crate::image::traits::Image;

/// How many luma samples share one chroma sample.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SubsampleRatio {
    #[default]
    Ratio444,
    /// Chroma halved horizontally.
    Ratio422,
    /// Chroma halved horizontally and vertically.
    Ratio420,
}

/// One full-resolution luma plane and two chroma planes.
#[derive(Debug, Clone, PartialEq)]
pub struct YCbCrImage {
    pub y: Vec<u8>,
    pub cb: Vec<u8>,
    pub cr: Vec<u8>,
    pub y_stride: usize,
    pub c_stride: usize,
    pub ratio: SubsampleRatio,
    pub rect: Rect,
}

fn half(v: i32) -> i32 {
    v.div_euclid(2)
}

impl YCbCrImage {
    pub fn new(rect: Rect, ratio: SubsampleRatio) -> Self {
        let (w, h) = rect.size();
        let (cw, ch) = if rect.is_empty() {
            (0, 0)
        } else {
            match ratio {
                SubsampleRatio::Ratio444 => (w, h),
                SubsampleRatio::Ratio422 => ((half(rect.max.x + 1) - half(rect.min.x)) as usize, h),
                SubsampleRatio::Ratio420 => (
                    (half(rect.max.x + 1) - half(rect.min.x)) as usize,
                    (half(rect.max.y + 1) - half(rect.min.y)) as usize,
                ),
            }
        };
        Self {
            y: vec![0; w * h],
            cb: vec![0; cw * ch],
            cr: vec![0; cw * ch],
            y_stride: w,
            c_stride: cw,
            ratio,
            rect,
        }
    }

    pub fn y_offset(&self, x: i32, y: i32) -> usize {
        (y - self.rect.min.y) as usize * self.y_stride + (x - self.rect.min.x) as usize
    }

    pub fn c_offset(&self, x: i32, y: i32) -> usize {
        let r = self.rect;
        match self.ratio {
            SubsampleRatio::Ratio444 => {
                (y - r.min.y) as usize * self.c_stride + (x - r.min.x) as usize
            }
            SubsampleRatio::Ratio422 => {
                (y - r.min.y) as usize * self.c_stride + (half(x) - half(r.min.x)) as usize
            }
            SubsampleRatio::Ratio420 => {
                (half(y) - half(r.min.y)) as usize * self.c_stride
                    + (half(x) - half(r.min.x)) as usize
            }
        }
    }

    /// The color at `(x, y)`; zero outside the rect.
    pub fn ycbcr_at(&self, x: i32, y: i32) -> YCbCr {
        if !self.rect.contains(x, y) {
            return YCbCr::default();
        }
        let yi = self.y_offset(x, y);
        let ci = self.c_offset(x, y);
        YCbCr::new(self.y[yi], self.cb[ci], self.cr[ci])
    }

    /// Writes luma at `(x, y)` and the chroma sample it shares with its
    /// neighbours. Ignored outside the rect.
    pub fn set_ycbcr(&mut self, x: i32, y: i32, c: YCbCr) {
        if !self.rect.contains(x, y) {
            return;
        }
        let yi = self.y_offset(x, y);
        let ci = self.c_offset(x, y);
        self.y[yi] = c.y;
        self.cb[ci] = c.cb;
        self.cr[ci] = c.cr;
    }
}

impl Image for YCbCrImage {
    fn color_model(&self) -> ColorModel {
        ColorModel::YCbCr
    }

    fn bounds(&self) -> Rect {
        self.rect
    }

    fn at(&self, x: i32, y: i32) -> Color {
        Color::YCbCr(self.ycbcr_at(x, y))
    }

    fn opaque(&self) -> bool {
        true
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
