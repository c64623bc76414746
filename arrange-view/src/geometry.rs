//! Geometry primitives in view coordinates (pixels, y grows downwards).

use std::ops::{Add, Sub};

/// A position in view coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// An axis-aligned bounding box, as reported by a view for one item.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub const fn origin(&self) -> Point {
        Point::new(self.left, self.top)
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Half-open containment: the right and bottom edges belong to the
    /// neighbouring box.
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.left
            && point.x < self.right()
            && point.y >= self.top
            && point.y < self.bottom()
    }

    /// Vertical midpoint, used to decide whether a drop lands before or
    /// after this box.
    pub fn mid_y(&self) -> f64 {
        self.top + self.height / 2.0
    }

    pub fn center(&self) -> Point {
        Point::new(self.left + self.width / 2.0, self.mid_y())
    }

    /// Same size, moved so that its origin is `origin`.
    pub fn moved_to(self, origin: Point) -> Self {
        Self {
            left: origin.x,
            top: origin.y,
            ..self
        }
    }
}
