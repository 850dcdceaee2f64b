//! Fixed-width get/put helpers for every sample kind.
//!
//! Image buffers keep their samples big-endian; the RAWP payload is
//! little-endian. Every helper reads or writes exactly the leading
//! `size_of::<T>()` bytes of the slice and panics if the slice is shorter.

/// Byte order of a serialized sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endian {
    Big,
    Little,
}

#[inline]
fn take<const N: usize>(b: &[u8]) -> [u8; N] {
    let mut a = [0u8; N];
    a.copy_from_slice(&b[..N]);
    a
}

#[inline]
pub fn get_u16(b: &[u8], order: Endian) -> u16 {
    match order {
        Endian::Big => u16::from_be_bytes(take(b)),
        Endian::Little => u16::from_le_bytes(take(b)),
    }
}

#[inline]
pub fn put_u16(b: &mut [u8], v: u16, order: Endian) {
    let a = match order {
        Endian::Big => v.to_be_bytes(),
        Endian::Little => v.to_le_bytes(),
    };
    b[..2].copy_from_slice(&a);
}

#[inline]
pub fn get_u32(b: &[u8], order: Endian) -> u32 {
    match order {
        Endian::Big => u32::from_be_bytes(take(b)),
        Endian::Little => u32::from_le_bytes(take(b)),
    }
}

#[inline]
pub fn put_u32(b: &mut [u8], v: u32, order: Endian) {
    let a = match order {
        Endian::Big => v.to_be_bytes(),
        Endian::Little => v.to_le_bytes(),
    };
    b[..4].copy_from_slice(&a);
}

#[inline]
pub fn get_i32(b: &[u8], order: Endian) -> i32 {
    get_u32(b, order) as i32
}

#[inline]
pub fn put_i32(b: &mut [u8], v: i32, order: Endian) {
    put_u32(b, v as u32, order)
}

#[inline]
pub fn get_u64(b: &[u8], order: Endian) -> u64 {
    match order {
        Endian::Big => u64::from_be_bytes(take(b)),
        Endian::Little => u64::from_le_bytes(take(b)),
    }
}

#[inline]
pub fn put_u64(b: &mut [u8], v: u64, order: Endian) {
    let a = match order {
        Endian::Big => v.to_be_bytes(),
        Endian::Little => v.to_le_bytes(),
    };
    b[..8].copy_from_slice(&a);
}

#[inline]
pub fn get_i64(b: &[u8], order: Endian) -> i64 {
    get_u64(b, order) as i64
}

#[inline]
pub fn put_i64(b: &mut [u8], v: i64, order: Endian) {
    put_u64(b, v as u64, order)
}

#[inline]
pub fn get_f32(b: &[u8], order: Endian) -> f32 {
    f32::from_bits(get_u32(b, order))
}

#[inline]
pub fn put_f32(b: &mut [u8], v: f32, order: Endian) {
    put_u32(b, v.to_bits(), order)
}

#[inline]
pub fn get_f64(b: &[u8], order: Endian) -> f64 {
    f64::from_bits(get_u64(b, order))
}

#[inline]
pub fn put_f64(b: &mut [u8], v: f64, order: Endian) {
    put_u64(b, v.to_bits(), order)
}

/// Copies `src` into `dst` while reversing the byte order of every
/// `width`-byte sample. With `width == 1` this is a plain copy.
pub fn swap_copy(dst: &mut [u8], src: &[u8], width: usize) {
    if width == 1 {
        dst[..src.len()].copy_from_slice(src);
        return;
    }
    for (d, s) in dst.chunks_exact_mut(width).zip(src.chunks_exact(width)) {
        for i in 0..width {
            d[i] = s[width - 1 - i];
        }
    }
}
