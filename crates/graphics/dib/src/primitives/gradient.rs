//! Linear gradients over rectangles and triangles
//!
//! Colors are interpolated with 16 bits per channel and handed to the
//! format's [gradient_pixel](super::Primitives::gradient_pixel), which decides
//! how to quantize (and possibly dither) them.

use math::{Point, Rectangle};

use crate::DibInfo;

/// A gradient vertex with 16 bit color channels
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TriVertex {
    pub x: i32,
    pub y: i32,
    pub red: u16,
    pub green: u16,
    pub blue: u16,
    pub alpha: u16,
}

impl TriVertex {
    #[must_use]
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    fn channels(&self) -> [i64; 4] {
        [self.red, self.green, self.blue, self.alpha].map(i64::from)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GradientMode {
    /// Interpolate between the left and the right edge of a rectangle
    RectH,

    /// Interpolate between the top and the bottom edge of a rectangle
    RectV,

    Triangle,
}

impl GradientMode {
    #[must_use]
    pub fn from_u32(value: u32) -> Option<Self> {
        match value {
            0 => Some(Self::RectH),
            1 => Some(Self::RectV),
            2 => Some(Self::Triangle),
            _ => None,
        }
    }
}

/// Interpolate between the first two vertices, `position` steps out of `length`
fn interpolate_linear(vertices: &[TriVertex], position: i64, length: i64) -> [u32; 4] {
    let start = vertices[0].channels();
    let end = vertices[1].channels();

    [0, 1, 2, 3].map(|index| {
        let value = (start[index] * (length - position) + end[index] * position) / length;
        value.clamp(0, 0xffff) as u32
    })
}

/// The x coordinate of an edge at row `y`
///
/// Edges are always followed from right to left so that rounding is the same for both
/// sides of a triangle.
fn edge_coord(y: i32, (x1, y1): (i32, i32), (x2, y2): (i32, i32)) -> i32 {
    if y1 == y2 {
        return x1.min(x2);
    }

    let (y, x1, y1, x2, y2) = (
        i64::from(y),
        i64::from(x1),
        i64::from(y1),
        i64::from(x2),
        i64::from(y2),
    );

    let x = if x2 > x1 {
        x2 + (y - y2) * (x2 - x1) / (y2 - y1)
    } else {
        x1 + (y - y1) * (x2 - x1) / (y2 - y1)
    };
    x as i32
}

/// Horizontal extent of a y sorted triangle at row `y`, limited to `rect`
fn triangle_span(vertices: &[TriVertex; 3], rect: &Rectangle, y: i32) -> (i32, i32) {
    let [v0, v1, v2] = vertices.map(|vertex| (vertex.x, vertex.y));

    let x1 = if y < v1.1 {
        edge_coord(y, v0, v1)
    } else {
        edge_coord(y, v1, v2)
    };
    let x2 = edge_coord(y, v0, v2);

    (rect.left.max(x1.min(x2)), rect.right.min(x1.max(x2)))
}

/// The barycentric determinant, which is constant across the triangle
#[must_use]
pub(crate) fn triangle_det(vertices: &[TriVertex; 3]) -> i64 {
    let [v0, v1, v2] = vertices.map(|vertex| (i64::from(vertex.x), i64::from(vertex.y)));
    (v2.1 - v1.1) * (v2.0 - v0.0) - (v2.0 - v1.0) * (v2.1 - v0.1)
}

fn interpolate_triangle(vertices: &[TriVertex; 3], x: i32, y: i32, det: i64) -> [u32; 4] {
    let [v0, v1, v2] = vertices.map(|vertex| (i64::from(vertex.x), i64::from(vertex.y)));
    let (x, y) = (i64::from(x), i64::from(y));

    let l1 = (v1.1 - v2.1) * (x - v2.0) - (v1.0 - v2.0) * (y - v2.1);
    let l2 = (v2.1 - v0.1) * (x - v2.0) - (v2.0 - v0.0) * (y - v2.1);

    let [c0, c1, c2] = vertices.map(|vertex| vertex.channels());
    [0, 1, 2, 3].map(|index| {
        let value = (c0[index] * l1 + c1[index] * l2 + c2[index] * (det - l1 - l2)) / det;
        value.clamp(0, 0xffff) as u32
    })
}

/// Fill `rect` with a gradient
///
/// Rectangle gradients interpolate between the first two vertices, which must be ordered
/// along the gradient axis. Triangles use the first three vertices in any order.
/// Returns `false` if the vertices do not span an area.
pub(crate) fn gradient_rect(
    dib: &mut DibInfo<'_>,
    rect: &Rectangle,
    vertices: &[TriVertex],
    mode: GradientMode,
) -> bool {
    let funcs = dib.funcs();

    match mode {
        GradientMode::RectH | GradientMode::RectV => {
            let [first, second, ..] = vertices else {
                return false;
            };
            let length = match mode {
                GradientMode::RectH => i64::from(second.x) - i64::from(first.x),
                _ => i64::from(second.y) - i64::from(first.y),
            };
            if length <= 0 {
                return false;
            }

            for y in rect.top..rect.bottom {
                for x in rect.left..rect.right {
                    let position = match mode {
                        GradientMode::RectH => i64::from(x) - i64::from(first.x),
                        _ => i64::from(y) - i64::from(first.y),
                    };
                    let color = interpolate_linear(vertices, position, length);
                    let pixel = funcs.gradient_pixel(dib, x, y, color);
                    dib.write_pixel(x, y, pixel);
                }
            }
        },
        GradientMode::Triangle => {
            let [a, b, c, ..] = vertices else {
                return false;
            };
            let mut triangle = [*a, *b, *c];
            triangle.sort_by_key(|vertex| vertex.y);

            let det = triangle_det(&triangle);
            if det == 0 {
                return false;
            }

            for y in rect.top..rect.bottom {
                let (left, right) = triangle_span(&triangle, rect, y);
                for x in left..right {
                    let color = interpolate_triangle(&triangle, x, y, det);
                    let pixel = funcs.gradient_pixel(dib, x, y, color);
                    dib.write_pixel(x, y, pixel);
                }
            }
        },
    }
    true
}
