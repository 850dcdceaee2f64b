use crate::image::rect::{Point, Rect};
use crate::image::traits::{Image, Raster};

/// Copies `src` into `dst` over `r`, converting each color to the
/// destination's model. Source point `sp` lines up with `r.min`; the copy is
/// clipped to both images' bounds.
pub fn draw(dst: &mut dyn Raster, r: Rect, src: &dyn Image, sp: Point) {
    let origin = r.min;
    let dx = i64::from(origin.x) - i64::from(sp.x);
    let dy = i64::from(origin.y) - i64::from(sp.y);
    let r = r
        .intersect(&dst.bounds())
        .intersect(&src.bounds().translate(dx, dy));
    if r.is_empty() {
        return;
    }
    // Every point of `r` maps into the source bounds, so these fit in i32.
    let sx = (i64::from(r.min.x) - dx) as i32;
    let sy = (i64::from(r.min.y) - dy) as i32;

    // Sources may share storage with the destination; read everything first.
    let (w, h) = (r.width(), r.height());
    let colors: Vec<_> = (0..h)
        .flat_map(|y| (0..w).map(move |x| (x, y)))
        .map(|(x, y)| src.at(sx + x, sy + y))
        .collect();
    for (i, c) in colors.into_iter().enumerate() {
        let (x, y) = (i as i32 % w, i as i32 / w);
        dst.set(r.min.x + x, r.min.y + y, c);
    }
}
