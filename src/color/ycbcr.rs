//! 8-bit Y'CbCr color with the JFIF integer conversions.

/// A fully opaque Y'CbCr color, one byte per component.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct YCbCr {
    pub y: u8,
    pub cb: u8,
    pub cr: u8,
}

#[inline]
fn clamp_shift(v: i32, shift: u32) -> i32 {
    // Values outside 0..=0xFF_FFFF saturate to 0 or to the all-ones mask.
    if (v as u32) & 0xff00_0000 == 0 {
        v >> shift
    } else {
        !(v >> 31) & ((1 << (24 - shift)) - 1)
    }
}

impl YCbCr {
    pub fn new(y: u8, cb: u8, cr: u8) -> Self {
        Self { y, cb, cr }
    }

    /// Converts an RGB triple to Y'CbCr.
    pub fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        let (r1, g1, b1) = (r as i32, g as i32, b as i32);
        let yy = (19595 * r1 + 38470 * g1 + 7471 * b1 + (1 << 15)) >> 16;
        let cb = -11056 * r1 - 21712 * g1 + 32768 * b1 + (257 << 15);
        let cr = 32768 * r1 - 27440 * g1 - 5328 * b1 + (257 << 15);
        Self {
            y: yy as u8,
            cb: clamp_shift(cb, 16) as u8,
            cr: clamp_shift(cr, 16) as u8,
        }
    }

    /// Converts to an 8-bit RGB triple.
    pub fn to_rgb(self) -> (u8, u8, u8) {
        let (yy1, cb1, cr1) = self.expand();
        let r = clamp_shift(yy1 + 91881 * cr1, 16);
        let g = clamp_shift(yy1 - 22554 * cb1 - 46802 * cr1, 16);
        let b = clamp_shift(yy1 + 116130 * cb1, 16);
        (r as u8, g as u8, b as u8)
    }

    /// Canonical 16-bit RGBA; always opaque.
    pub fn rgba16(self) -> (u32, u32, u32, u32) {
        let (yy1, cb1, cr1) = self.expand();
        let r = clamp_shift(yy1 + 91881 * cr1, 8);
        let g = clamp_shift(yy1 - 22554 * cb1 - 46802 * cr1, 8);
        let b = clamp_shift(yy1 + 116130 * cb1, 8);
        (r as u32, g as u32, b as u32, 0xFFFF)
    }

    fn expand(self) -> (i32, i32, i32) {
        (
            self.y as i32 * 0x10101,
            self.cb as i32 - 128,
            self.cr as i32 - 128,
        )
    }
}
