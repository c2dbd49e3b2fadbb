//! Integer line rasterization with exact clipping
//!
//! Clipping a line never changes which pixels it covers: the clipped line lights
//! exactly the pixels of the unclipped line that lie inside the clip rectangle.

use crate::{Point, Rectangle};

/// Deltas larger than this are scaled down before computing error terms,
/// so that the products in [clip_line] fit into 64 bits
const MAX_DELTA: i64 = 1 << 28;

/// One of the eight octants a line can point into
///
/// Octants are numbered counter-clockwise starting at the positive x axis
/// (with y pointing down). Internally the octant is stored as a single bit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Octant(u8);

impl Octant {
    #[must_use]
    pub fn from_delta(dx: i64, dy: i64) -> Self {
        let number = if dy > 0 {
            if dx > 0 {
                if dx > dy {
                    1
                } else {
                    2
                }
            } else if -dx > dy {
                4
            } else {
                3
            }
        } else if dx < 0 {
            if -dx > -dy {
                5
            } else {
                6
            }
        } else if dx > -dy {
            8
        } else {
            7
        };

        Self::from_number(number)
    }

    /// # Panics
    /// Panics if `number` is not within `1..=8`
    #[must_use]
    pub fn from_number(number: u8) -> Self {
        assert!((1..=8).contains(&number), "There are only 8 octants");
        Self(1 << (number - 1))
    }

    #[must_use]
    pub fn number(self) -> u8 {
        self.0.trailing_zeros() as u8 + 1
    }

    /// Lines in some octants round the other way at exact midpoints,
    /// so that a line covers the same pixels in both directions
    #[must_use]
    pub fn bias(self) -> i64 {
        i64::from(self.0 & 0xb4 != 0)
    }

    #[must_use]
    pub fn is_x_major(self) -> bool {
        self.0 & (1 | 8 | 16 | 128) != 0
    }

    #[must_use]
    pub fn is_positive_slope(self) -> bool {
        self.0 & (1 | 2 | 16 | 32) != 0
    }

    /// `1` if x grows along the line, `-1` otherwise
    #[must_use]
    pub fn x_increment(self) -> i32 {
        if self.0 & (1 | 2 | 64 | 128) != 0 {
            1
        } else {
            -1
        }
    }

    /// `1` if y grows along the line, `-1` otherwise
    #[must_use]
    pub fn y_increment(self) -> i32 {
        if self.0 & (1 | 2 | 4 | 8) != 0 {
            1
        } else {
            -1
        }
    }
}

/// The Bresenham parameters of a line
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LineParams {
    /// Absolute x delta
    pub dx: i64,

    /// Absolute y delta
    pub dy: i64,

    pub octant: Octant,
    pub bias: i64,
    pub err_start: i64,
    pub err_add_1: i64,
    pub err_add_2: i64,
}

impl LineParams {
    /// Compute the parameters for a line from `start` to `end`
    ///
    /// `err_start` describes the unclipped start point.
    #[must_use]
    pub fn new(start: Point, end: Point) -> Self {
        let mut dx = i64::from(end.x) - i64::from(start.x);
        let mut dy = i64::from(end.y) - i64::from(start.y);
        let octant = Octant::from_delta(dx, dy);

        while dx.abs() > MAX_DELTA || dy.abs() > MAX_DELTA {
            dx /= 8;
            dy /= 8;
        }

        let (dx, dy) = (dx.abs(), dy.abs());
        let (major, minor) = if octant.is_x_major() {
            (dx, dy)
        } else {
            (dy, dx)
        };

        Self {
            dx,
            dy,
            octant,
            bias: octant.bias(),
            err_start: 2 * minor - major,
            err_add_1: 2 * minor - 2 * major,
            err_add_2: 2 * minor,
        }
    }
}

/// The outcome of [clip_line]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineClip {
    /// No part of the line is visible
    Rejected,

    /// Some part of the line is visible, the endpoints had to be moved
    Clipped { start: Point, end: Point },

    /// The line lies entirely within the clip rectangle
    Unclipped,
}

const OUT_LEFT: u8 = 1;
const OUT_RIGHT: u8 = 2;
const OUT_TOP: u8 = 4;
const OUT_BOTTOM: u8 = 8;

fn outcode(point: Point, clip: &Rectangle) -> u8 {
    let mut code = 0;

    if point.x < clip.left {
        code |= OUT_LEFT;
    } else if point.x >= clip.right {
        code |= OUT_RIGHT;
    }

    if point.y < clip.top {
        code |= OUT_TOP;
    } else if point.y >= clip.bottom {
        code |= OUT_BOTTOM;
    }

    code
}

/// Clip a line against a rectangle
///
/// Unlike a geometric clip, endpoints are moved onto the pixel that the Bresenham walk
/// from the original start point would have produced at the clip boundary.
/// Every adjustment is computed relative to the original endpoints.
#[must_use]
pub fn clip_line(start: Point, end: Point, clip: &Rectangle, params: &LineParams) -> LineClip {
    let two_dx = params.dx * 2;
    let two_dy = params.dy * 2;
    let bias = params.bias;
    let (dx, dy) = (params.dx, params.dy);
    let x_major = params.octant.is_x_major();
    let negative_slope = !params.octant.is_positive_slope();

    let (left, top) = (i64::from(clip.left), i64::from(clip.top));
    let (right, bottom) = (i64::from(clip.right), i64::from(clip.bottom));
    let (sx, sy) = (i64::from(start.x), i64::from(start.y));
    let (ex, ey) = (i64::from(end.x), i64::from(end.y));

    let mut clipped_start = start;
    let mut clipped_end = end;
    let mut start_code = outcode(start, clip);
    let mut end_code = outcode(end, clip);
    let mut clipped = false;

    let sign = |value: i64| if negative_slope { -value } else { value };

    loop {
        if start_code == 0 && end_code == 0 {
            if clipped {
                return LineClip::Clipped {
                    start: clipped_start,
                    end: clipped_end,
                };
            }
            return LineClip::Unclipped;
        }
        if start_code & end_code != 0 {
            return LineClip::Rejected;
        }

        clipped = true;

        if start_code & OUT_LEFT != 0 {
            let m = left - sx;
            let n = if x_major {
                (m * two_dy + bias + dx - 1) / two_dx
            } else {
                (m * two_dy - bias - dy) / two_dx + 1
            };
            clipped_start = Point::new(clip.left, (sy + sign(n)) as i32);
            start_code = outcode(clipped_start, clip);
        } else if start_code & OUT_RIGHT != 0 {
            let m = sx - right + 1;
            let n = if x_major {
                (m * two_dy + bias + dx - 1) / two_dx
            } else {
                (m * two_dy - bias - dy) / two_dx + 1
            };
            clipped_start = Point::new(clip.right - 1, (sy - sign(n)) as i32);
            start_code = outcode(clipped_start, clip);
        } else if start_code & OUT_TOP != 0 {
            let n = top - sy;
            let m = if x_major {
                (n * two_dx - bias - dx) / two_dy + 1
            } else {
                (n * two_dx + bias + dy - 1) / two_dy
            };
            clipped_start = Point::new((sx + sign(m)) as i32, clip.top);
            start_code = outcode(clipped_start, clip);
        } else if start_code & OUT_BOTTOM != 0 {
            let n = sy - bottom + 1;
            let m = if x_major {
                (n * two_dx - bias - dx) / two_dy + 1
            } else {
                (n * two_dx + bias + dy - 1) / two_dy
            };
            clipped_start = Point::new((sx - sign(m)) as i32, clip.bottom - 1);
            start_code = outcode(clipped_start, clip);
        } else if end_code & OUT_LEFT != 0 {
            let m = left - ex;
            let n = if x_major {
                (m * two_dy - bias + dx) / two_dx
            } else {
                (m * two_dy + bias - dy - 1) / two_dx + 1
            };
            clipped_end = Point::new(clip.left, (ey + sign(n)) as i32);
            end_code = outcode(clipped_end, clip);
        } else if end_code & OUT_RIGHT != 0 {
            let m = ex - right + 1;
            let n = if x_major {
                (m * two_dy - bias + dx) / two_dx
            } else {
                (m * two_dy + bias - dy - 1) / two_dx + 1
            };
            clipped_end = Point::new(clip.right - 1, (ey - sign(n)) as i32);
            end_code = outcode(clipped_end, clip);
        } else if end_code & OUT_TOP != 0 {
            let n = top - ey;
            let m = if x_major {
                (n * two_dx + bias - dx - 1) / two_dy + 1
            } else {
                (n * two_dx - bias + dy) / two_dy
            };
            clipped_end = Point::new((ex + sign(m)) as i32, clip.top);
            end_code = outcode(clipped_end, clip);
        } else if end_code & OUT_BOTTOM != 0 {
            let n = ey - bottom + 1;
            let m = if x_major {
                (n * two_dx + bias - dx - 1) / two_dy + 1
            } else {
                (n * two_dx - bias + dy) / two_dy
            };
            clipped_end = Point::new((ex - sign(m)) as i32, clip.bottom - 1);
            end_code = outcode(clipped_end, clip);
        }
    }
}

/// The visible part of a line, ready to be walked pixel by pixel
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LineSegment {
    pub start: Point,

    /// Number of pixels along the major axis
    pub length: i32,

    /// Parameters with `err_start` adjusted for the (possibly clipped) start point
    pub params: LineParams,
}

/// Clip a line from `start` to `end` and compute where the visible part begins
///
/// Like all lines, the end point itself is not drawn. Returns `None` if nothing is visible.
#[must_use]
pub fn clip_segment(start: Point, end: Point, clip: &Rectangle) -> Option<LineSegment> {
    let mut params = LineParams::new(start, end);

    let (clipped_start, clipped_end, was_clipped) = match clip_line(start, end, clip, &params) {
        LineClip::Rejected => return None,
        LineClip::Clipped { start, end } => (start, end, true),
        LineClip::Unclipped => (start, end, false),
    };

    if clipped_start == end {
        return None;
    }

    // If the end point was clipped, the new end point is part of the line
    let last_point = i32::from(was_clipped && clipped_end != end);
    let m = i64::from((clipped_start.x - start.x).abs());
    let n = i64::from((clipped_start.y - start.y).abs());
    let (dx, dy) = (params.dx, params.dy);

    let length = if params.octant.is_x_major() {
        params.err_start = 2 * dy - dx + 2 * m * dy - 2 * n * dx;
        (clipped_end.x - clipped_start.x).abs() + last_point
    } else {
        params.err_start = 2 * dx - dy + 2 * n * dx - 2 * m * dy;
        (clipped_end.y - clipped_start.y).abs() + last_point
    };

    Some(LineSegment {
        start: clipped_start,
        length,
        params,
    })
}

impl LineSegment {
    #[must_use]
    pub fn points(&self) -> LinePoints {
        LinePoints {
            current: self.start,
            remaining: self.length,
            err: self.params.err_start,
            params: self.params,
        }
    }
}

/// Iterator over the pixels of a [LineSegment]
#[derive(Clone, Debug)]
pub struct LinePoints {
    current: Point,
    remaining: i32,
    err: i64,
    params: LineParams,
}

impl Iterator for LinePoints {
    type Item = Point;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining <= 0 {
            return None;
        }
        self.remaining -= 1;

        let point = self.current;
        let octant = self.params.octant;
        let x_major = octant.is_x_major();

        if self.err + self.params.bias > 0 {
            if x_major {
                self.current.y += octant.y_increment();
            } else {
                self.current.x += octant.x_increment();
            }
            self.err += self.params.err_add_1;
        } else {
            self.err += self.params.err_add_2;
        }

        if x_major {
            self.current.x += octant.x_increment();
        } else {
            self.current.y += octant.y_increment();
        }

        Some(point)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining.max(0) as usize;
        (remaining, Some(remaining))
    }
}
