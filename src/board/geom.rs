//! Integer geometry for the unbounded board: offsets, rectangles and the camera

use std::fmt;
use std::ops::{Add, Neg, Sub};

/// A cell coordinate (or a displacement between cells).
///
/// `y` grows downward, matching screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct Offset {
    pub x: i32,
    pub y: i32,
}

impl Offset {
    pub const ZERO: Offset = Offset { x: 0, y: 0 };

    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn scale(self, c: i32) -> Self {
        Self::new(self.x * c, self.y * c)
    }

    #[inline]
    pub fn is_zero(self) -> bool {
        self.x == 0 && self.y == 0
    }

    /// Whether the offset lies in the disk of the given radius.
    ///
    /// The disk is padded by one so that radius 1 already covers the
    /// diagonal neighbours.
    #[inline]
    pub fn is_inside_circle(self, radius: i32) -> bool {
        let r = radius + 1;
        self.x * self.x + self.y * self.y <= r * r
    }

    #[inline]
    pub fn is_inside_rect(self, r: Rect) -> bool {
        r.x <= self.x && self.x < r.x + r.w && r.y <= self.y && self.y < r.y + r.h
    }

    /// Clamp the offset to the nearest cell inside `r`.
    pub fn snap_into_rect(self, r: Rect) -> Self {
        Self {
            x: self.x.clamp(r.x, r.x + r.w - 1),
            y: self.y.clamp(r.y, r.y + r.h - 1),
        }
    }

    /// Chebyshev distance between two cells
    #[inline]
    pub fn chebyshev(self, other: Offset) -> i32 {
        (self.x - other.x).abs().max((self.y - other.y).abs())
    }
}

impl Add for Offset {
    type Output = Offset;

    #[inline]
    fn add(self, rhs: Offset) -> Offset {
        Offset::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Offset {
    type Output = Offset;

    #[inline]
    fn sub(self, rhs: Offset) -> Offset {
        Offset::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Neg for Offset {
    type Output = Offset;

    #[inline]
    fn neg(self) -> Offset {
        Offset::new(-self.x, -self.y)
    }
}

impl fmt::Display for Offset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({};{})", self.x, self.y)
    }
}

/// Axis-aligned rectangle of cells, `x..x+w` by `y..y+h`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    #[inline]
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    #[inline]
    pub fn from_offsets(pos: Offset, size: Offset) -> Self {
        Self::new(pos.x, pos.y, size.x, size.y)
    }

    #[inline]
    pub fn top_left(&self) -> Offset {
        Offset::new(self.x, self.y)
    }

    #[inline]
    pub fn dimensions(&self) -> Offset {
        Offset::new(self.w, self.h)
    }

    #[inline]
    pub fn area(&self) -> i32 {
        self.w * self.h
    }

    #[inline]
    pub fn contains(&self, pos: Offset) -> bool {
        pos.is_inside_rect(*self)
    }

    #[inline]
    pub fn center(&self) -> Offset {
        Offset::new(self.x + self.w / 2, self.y + self.h / 2)
    }

    /// Same size, centered on `pos`
    pub fn center_on(&self, pos: Offset) -> Self {
        Self::new(pos.x - self.w / 2, pos.y - self.h / 2, self.w, self.h)
    }

    pub fn translate(&self, ds: Offset) -> Self {
        Self::new(self.x + ds.x, self.y + ds.y, self.w, self.h)
    }

    /// Whether `self` lies entirely within `other`
    pub fn is_inside_rect(&self, other: Rect) -> bool {
        other.x <= self.x
            && self.x + self.w <= other.x + other.w
            && other.y <= self.y
            && self.y + self.h <= other.y + other.h
    }

    pub fn grow_to_contain_offset(&self, pos: Offset) -> Self {
        self.grow_to_contain_rect(Rect::new(pos.x, pos.y, 1, 1))
    }

    pub fn grow_to_contain_rect(&self, other: Rect) -> Self {
        let x0 = self.x.min(other.x);
        let y0 = self.y.min(other.y);
        let x1 = (self.x + self.w).max(other.x + other.w);
        let y1 = (self.y + self.h).max(other.y + other.h);
        Self::new(x0, y0, x1 - x0, y1 - y0)
    }

    /// Move the rectangle the least amount needed to fit inside `bound`.
    ///
    /// Along an axis where the rectangle is at least as large as the bound,
    /// it is centered on the bound instead.
    pub fn snap_into(&self, bound: Rect) -> Self {
        fn snap_axis(pos: i32, len: i32, bpos: i32, blen: i32) -> i32 {
            if len >= blen {
                bpos + blen / 2 - len / 2
            } else if pos < bpos {
                bpos
            } else if pos + len > bpos + blen {
                bpos + blen - len
            } else {
                pos
            }
        }

        Self::new(
            snap_axis(self.x, self.w, bound.x, bound.w),
            snap_axis(self.y, self.h, bound.y, bound.h),
            self.w,
            self.h,
        )
    }

    /// Shrink by `depth` on every side.
    ///
    /// Collapses to the middle column/row when the rect is too narrow for
    /// the depth.
    pub fn inner(&self, depth: i32) -> Rect {
        let mut inner = Rect::new(self.x + depth, self.y + depth, self.w - 2 * depth, self.h - 2 * depth);

        if self.w <= 2 * depth {
            inner.x = self.x + (self.w - 1) / 2;
            inner.w = 1;
        }
        if self.h <= 2 * depth {
            inner.y = self.y + (self.h - 1) / 2;
            inner.h = 1;
        }

        inner
    }

    pub fn to_world(&self, local: Offset) -> Offset {
        self.top_left() + local
    }

    pub fn to_local(&self, world: Offset) -> Offset {
        world - self.top_left()
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({};{}) - ({};{})", self.x, self.y, self.x + self.w, self.y + self.h)
    }
}

/// Viewport over the board that follows moves once they come within
/// `track_depth` cells of its edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Camera {
    pub view: Rect,
    pub track_depth: i32,
}

impl Camera {
    /// Camera of the given size centered on the origin
    pub fn new(size: Offset, track_depth: i32) -> Self {
        Self {
            view: Rect::from_offsets(Offset::new(-size.x / 2, -size.y / 2), size),
            track_depth,
        }
    }

    /// The part of the view a tracked position must stay in.
    #[inline]
    pub fn inner_view(&self) -> Rect {
        self.view.inner(self.track_depth)
    }

    /// Shift the view by the least amount that puts `pos` in the inner view.
    pub fn nudge_to(&self, pos: Offset) -> Self {
        let inner = self.inner_view();
        let dx = if pos.x < inner.x {
            pos.x - inner.x
        } else if pos.x >= inner.x + inner.w {
            pos.x - (inner.x + inner.w - 1)
        } else {
            0
        };
        let dy = if pos.y < inner.y {
            pos.y - inner.y
        } else if pos.y >= inner.y + inner.h {
            pos.y - (inner.y + inner.h - 1)
        } else {
            0
        };

        Self {
            view: self.view.translate(Offset::new(dx, dy)),
            track_depth: self.track_depth,
        }
    }

    pub fn translate(&self, ds: Offset) -> Self {
        Self {
            view: self.view.translate(ds),
            track_depth: self.track_depth,
        }
    }

    pub fn snap_into(&self, bound: Rect) -> Self {
        Self {
            view: self.view.snap_into(bound),
            track_depth: self.track_depth,
        }
    }

    pub fn center_on(&self, pos: Offset) -> Self {
        Self {
            view: self.view.center_on(pos),
            track_depth: self.track_depth,
        }
    }

    /// Resize around the current center
    pub fn resize(&self, size: Offset) -> Self {
        let center = self.view.center();
        Self {
            view: Rect::from_offsets(Offset::ZERO, size).center_on(center),
            track_depth: self.track_depth,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_ops() {
        let a = Offset::new(1, -2);
        let b = Offset::new(3, 4);
        assert_eq!(a + b, Offset::new(4, 2));
        assert_eq!(a - b, Offset::new(-2, -6));
        assert_eq!(-a, Offset::new(-1, 2));
        assert_eq!(a.scale(3), Offset::new(3, -6));
        assert_eq!(a.to_string(), "(1;-2)");
    }

    #[test]
    fn test_circle_is_padded() {
        assert!(Offset::new(1, 1).is_inside_circle(1));
        assert!(Offset::new(2, 0).is_inside_circle(1));
        assert!(!Offset::new(2, 1).is_inside_circle(1));
        assert!(Offset::ZERO.is_inside_circle(0));
    }

    #[test]
    fn test_snap_offset_into_rect() {
        let r = Rect::new(-2, -2, 5, 5);
        assert_eq!(Offset::new(10, 0).snap_into_rect(r), Offset::new(2, 0));
        assert_eq!(Offset::new(-10, -10).snap_into_rect(r), Offset::new(-2, -2));
        assert_eq!(Offset::new(1, 1).snap_into_rect(r), Offset::new(1, 1));
    }

    #[test]
    fn test_grow_to_contain() {
        let r = Rect::new(0, 0, 2, 2);
        assert_eq!(r.grow_to_contain_offset(Offset::new(-1, 3)), Rect::new(-1, 0, 3, 4));
        assert_eq!(r.grow_to_contain_rect(Rect::new(1, 1, 1, 1)), r);
        assert_eq!(r.grow_to_contain_rect(Rect::new(5, -5, 1, 1)), Rect::new(0, -5, 6, 7));
    }

    #[test]
    fn test_rect_snap_into() {
        let bound = Rect::new(0, 0, 10, 10);
        // Poking out on the left and bottom
        assert_eq!(Rect::new(-3, 8, 4, 4).snap_into(bound), Rect::new(0, 6, 4, 4));
        // Already inside
        assert_eq!(Rect::new(2, 2, 4, 4).snap_into(bound), Rect::new(2, 2, 4, 4));
        // Larger than bound gets centered
        assert_eq!(Rect::new(100, 0, 14, 4).snap_into(bound), Rect::new(-2, 0, 14, 4));
    }

    #[test]
    fn test_rect_inner() {
        assert_eq!(Rect::new(-5, -5, 11, 11).inner(3), Rect::new(-2, -2, 5, 5));
        assert_eq!(Rect::new(0, 0, 6, 9).inner(3), Rect::new(2, 3, 1, 3));
        assert_eq!(Rect::new(0, 0, 4, 4).inner(0), Rect::new(0, 0, 4, 4));
    }

    #[test]
    fn test_camera_inner_view() {
        let cam = Camera {
            view: Rect::new(0, 0, 10, 6),
            track_depth: 2,
        };
        assert_eq!(cam.inner_view(), Rect::new(2, 2, 6, 2));

        let narrow = Camera {
            view: Rect::new(0, 0, 4, 5),
            track_depth: 2,
        };
        assert_eq!(narrow.inner_view(), Rect::new(1, 2, 1, 1));
    }

    #[test]
    fn test_camera_nudge() {
        let cam = Camera {
            view: Rect::new(0, 0, 10, 10),
            track_depth: 2,
        };
        // Inside the inner view: no movement
        assert_eq!(cam.nudge_to(Offset::new(5, 5)), cam);

        // One past the right edge of the inner view
        let moved = cam.nudge_to(Offset::new(8, 5));
        assert_eq!(moved.view, Rect::new(1, 0, 10, 10));
        assert!(moved.inner_view().contains(Offset::new(8, 5)));

        let moved = cam.nudge_to(Offset::new(-4, -1));
        assert_eq!(moved.view, Rect::new(-6, -3, 10, 10));
        assert!(moved.inner_view().contains(Offset::new(-4, -1)));
    }

    #[test]
    fn test_camera_new_is_centered() {
        let cam = Camera::new(Offset::new(20, 10), 3);
        assert_eq!(cam.view, Rect::new(-10, -5, 20, 10));
        assert!(cam.view.contains(Offset::ZERO));
    }
}
