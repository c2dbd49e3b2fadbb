use super::Point;

use std::cmp;

/// A half-open integer rectangle
///
/// Pixels with `left <= x < right` and `top <= y < bottom` are inside the rectangle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rectangle {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Rectangle {
    #[inline]
    #[must_use]
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    #[must_use]
    pub const fn from_corners(top_left: Point, bottom_right: Point) -> Self {
        Self::new(top_left.x, top_left.y, bottom_right.x, bottom_right.y)
    }

    #[must_use]
    pub const fn from_position_and_size(top_left: Point, width: i32, height: i32) -> Self {
        Self::new(
            top_left.x,
            top_left.y,
            top_left.x + width,
            top_left.y + height,
        )
    }

    pub const fn top_left(&self) -> Point {
        Point::new(self.left, self.top)
    }

    pub const fn bottom_right(&self) -> Point {
        Point::new(self.right, self.bottom)
    }

    pub const fn width(&self) -> i32 {
        self.right - self.left
    }

    pub const fn height(&self) -> i32 {
        self.bottom - self.top
    }

    /// A rectangle is empty if it does not contain a single pixel
    pub const fn is_empty(&self) -> bool {
        self.left >= self.right || self.top >= self.bottom
    }

    #[must_use]
    pub const fn offset_by(&self, offset: Point) -> Self {
        Self::new(
            self.left + offset.x,
            self.top + offset.y,
            self.right + offset.x,
            self.bottom + offset.y,
        )
    }

    /// Swap edges as necessary so that `left <= right` and `top <= bottom`
    #[must_use]
    pub fn normalized(&self) -> Self {
        Self::new(
            cmp::min(self.left, self.right),
            cmp::min(self.top, self.bottom),
            cmp::max(self.left, self.right),
            cmp::max(self.top, self.bottom),
        )
    }

    /// The overlapping area of two rectangles, or `None` if they do not overlap
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Option<Self> {
        let intersection = Self::new(
            cmp::max(self.left, other.left),
            cmp::max(self.top, other.top),
            cmp::min(self.right, other.right),
            cmp::min(self.bottom, other.bottom),
        );

        (!intersection.is_empty()).then_some(intersection)
    }

    #[inline]
    #[must_use]
    pub fn contains(&self, other: &Self) -> bool {
        self.left <= other.left
            && self.top <= other.top
            && other.right <= self.right
            && other.bottom <= self.bottom
    }

    #[inline]
    #[must_use]
    pub fn contains_point(&self, point: Point) -> bool {
        (self.left..self.right).contains(&point.x) && (self.top..self.bottom).contains(&point.y)
    }

    /// Grow `self` until it covers `other` too
    ///
    /// Empty rectangles never contribute anything.
    #[inline]
    pub fn grow_to_contain(&mut self, other: &Self) {
        if other.is_empty() {
            return;
        }
        if self.is_empty() {
            *self = *other;
            return;
        }

        self.left = cmp::min(self.left, other.left);
        self.top = cmp::min(self.top, other.top);
        self.right = cmp::max(self.right, other.right);
        self.bottom = cmp::max(self.bottom, other.bottom);
    }
}
