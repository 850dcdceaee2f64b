//! Integer points and half-open rectangles.

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// The box `[min.x, max.x) × [min.y, max.y)`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Rect {
    pub min: Point,
    pub max: Point,
}

impl Rect {
    /// Builds a well-formed rectangle, swapping coordinates if needed.
    pub fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self {
            min: Point::new(x0.min(x1), y0.min(y1)),
            max: Point::new(x0.max(x1), y0.max(y1)),
        }
    }

    /// `[0, width) × [0, height)`.
    pub fn from_size(width: usize, height: usize) -> Self {
        Self::new(0, 0, width as i32, height as i32)
    }

    /// Saturates at `i32::MAX` for rectangles wider than that.
    pub fn width(&self) -> i32 {
        self.max.x.saturating_sub(self.min.x)
    }

    pub fn height(&self) -> i32 {
        self.max.y.saturating_sub(self.min.y)
    }

    /// Width and height clamped at zero.
    pub fn size(&self) -> (usize, usize) {
        let span = |lo: i32, hi: i32| (i64::from(hi) - i64::from(lo)).max(0) as usize;
        (span(self.min.x, self.max.x), span(self.min.y, self.max.y))
    }

    pub fn is_empty(&self) -> bool {
        self.min.x >= self.max.x || self.min.y >= self.max.y
    }

    /// The largest rectangle inside both; the zero rectangle when they do
    /// not overlap.
    pub fn intersect(&self, s: &Rect) -> Rect {
        let r = Rect {
            min: Point::new(self.min.x.max(s.min.x), self.min.y.max(s.min.y)),
            max: Point::new(self.max.x.min(s.max.x), self.max.y.min(s.max.y)),
        };
        if r.is_empty() { Rect::default() } else { r }
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        self.min.x <= x && x < self.max.x && self.min.y <= y && y < self.max.y
    }

    /// True when every point of `self` is in `s`. An empty rectangle is
    /// within everything.
    pub fn is_within(&self, s: &Rect) -> bool {
        if self.is_empty() {
            return true;
        }
        s.min.x <= self.min.x
            && self.max.x <= s.max.x
            && s.min.y <= self.min.y
            && self.max.y <= s.max.y
    }

    /// Shifts by `(dx, dy)`, clamping each edge to the `i32` range.
    pub fn translate(&self, dx: i64, dy: i64) -> Rect {
        let shift = |v: i32, d: i64| {
            (i64::from(v) + d).clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
        };
        Rect {
            min: Point::new(shift(self.min.x, dx), shift(self.min.y, dy)),
            max: Point::new(shift(self.max.x, dx), shift(self.max.y, dy)),
        }
    }
}
