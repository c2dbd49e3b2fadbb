//! Integer geometry shared by the rasterizer crates
//!
//! Everything in here works on device pixels, rectangles are half-open
//! (`right` and `bottom` are not part of the rectangle).

mod bresenham;
mod ellipse;
mod point;
mod polygon;
mod rect;
mod stretch;

pub use bresenham::{clip_line, clip_segment, LineClip, LineParams, LineSegment, Octant};
pub use ellipse::{arc_points, ellipse_first_quadrant, ellipse_points, ArcDirection};
pub use point::Point;
pub use polygon::{fill_polygon_spans, FillMode};
pub use rect::Rectangle;
pub use stretch::{calc_1d_stretch_params, StretchParams};
