// SPDX-License-Identifier: MIT OR Apache-2.0
//! Points, extents and rectangles in editor space.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Sub};

/// A point in two dimensional space
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    /// X coordinate
    pub x: f32,
    /// Y coordinate
    pub y: f32,
}

impl Point {
    /// The origin
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// Create a new point
    pub const fn new(x: f32, y: f32) -> Self {
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

/// The size of something with two axes
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Extent {
    /// Width
    pub width: f32,
    /// Height
    pub height: f32,
}

impl Extent {
    /// Zero sized extent
    pub const ZERO: Self = Self { width: 0.0, height: 0.0 };

    /// Create a new extent
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// An axis aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Top left corner
    pub origin: Point,
    /// Size
    pub size: Extent,
}

impl Rect {
    /// Create a rect from an origin and a size
    pub const fn new(origin: Point, size: Extent) -> Self {
        Self { origin, size }
    }

    /// Create a rect from raw numbers
    pub const fn numbers(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self::new(Point::new(x, y), Extent::new(width, height))
    }

    /// Right edge
    pub fn max_x(&self) -> f32 {
        self.origin.x + self.size.width
    }

    /// Bottom edge
    pub fn max_y(&self) -> f32 {
        self.origin.y + self.size.height
    }

    /// Same size, different origin
    pub fn move_to(&self, origin: Point) -> Self {
        Self::new(origin, self.size)
    }

    /// Same origin, different size
    pub fn resize(&self, size: Extent) -> Self {
        Self::new(self.origin, size)
    }

    /// Whether a point lies inside the rect (edges on the min side included)
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.origin.x
            && point.x < self.max_x()
            && point.y >= self.origin.y
            && point.y < self.max_y()
    }

    /// The smallest rect containing both rects
    pub fn union(&self, other: &Rect) -> Rect {
        let origin = Point::new(
            self.origin.x.min(other.origin.x),
            self.origin.y.min(other.origin.y),
        );
        let max_x = self.max_x().max(other.max_x());
        let max_y = self.max_y().max(other.max_y());

        Rect::new(origin, Extent::new(max_x - origin.x, max_y - origin.y))
    }

    /// The overlapping area of two rects.
    ///
    /// Rects that only touch along an edge do not intersect.
    pub fn intersect(&self, other: &Rect) -> Option<Rect> {
        let x1 = self.origin.x.max(other.origin.x);
        let x2 = self.max_x().min(other.max_x());
        if x2 <= x1 {
            return None;
        }

        let y1 = self.origin.y.max(other.origin.y);
        let y2 = self.max_y().min(other.max_y());
        if y2 <= y1 {
            return None;
        }

        Some(Rect::numbers(x1, y1, x2 - x1, y2 - y1))
    }
}
