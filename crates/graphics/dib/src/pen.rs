//! Lines drawn with the selected pen
//!
//! Cosmetic pens walk each segment with the Bresenham kernels, one clip rectangle at a
//! time. Wide pens are turned into polygons first and filled as one shape, so that a
//! pixel covered by two segments is still only drawn once.

use math::{clip_segment, ellipse_points, fill_polygon_spans, FillMode, Point, Rectangle};

use crate::{
    clip::{get_clipped_rects, ClippedRects, Region},
    BlitError, ColorRef, DibInfo, Rop2,
};

const DASH: [u32; 2] = [18, 6];
const DOT: [u32; 2] = [3, 3];
const DASH_DOT: [u32; 4] = [9, 6, 3, 6];
const DASH_DOT_DOT: [u32; 6] = [9, 3, 3, 3, 3, 3];

const GEOMETRIC_DASH: [u32; 2] = [3, 1];
const GEOMETRIC_DOT: [u32; 2] = [1, 1];
const GEOMETRIC_DASH_DOT: [u32; 4] = [3, 1, 1, 1];
const GEOMETRIC_DASH_DOT_DOT: [u32; 6] = [3, 1, 1, 1, 1, 1];

const ALTERNATE: [u32; 2] = [1, 1];

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PenStyle {
    #[default]
    Solid,
    Dash,
    Dot,
    DashDot,
    DashDotDot,

    /// Every other pixel
    Alternate,

    Null,

    /// Like [Solid](Self::Solid), but closed shapes are shrunk so the pen stays inside them
    InsideFrame,
}

impl PenStyle {
    #[must_use]
    pub fn from_u32(value: u32) -> Option<Self> {
        match value {
            0 => Some(Self::Solid),
            1 => Some(Self::Dash),
            2 => Some(Self::Dot),
            3 => Some(Self::DashDot),
            4 => Some(Self::DashDotDot),
            5 => Some(Self::Null),
            6 => Some(Self::InsideFrame),
            8 => Some(Self::Alternate),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EndCap {
    #[default]
    Round,
    Square,
    Flat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pen {
    pub style: PenStyle,

    /// Pens with a width of zero or one are cosmetic
    pub width: u32,
    pub color: ColorRef,
    pub end_cap: EndCap,

    /// Geometric pens scale their dashes with the width
    pub geometric: bool,
}

impl Default for Pen {
    fn default() -> Self {
        Self::new(PenStyle::Solid, 0, ColorRef::BLACK)
    }
}

impl Pen {
    #[must_use]
    pub fn new(style: PenStyle, width: u32, color: ColorRef) -> Self {
        Self {
            style,
            width,
            color,
            end_cap: EndCap::default(),
            geometric: width > 1,
        }
    }

    #[must_use]
    pub fn is_wide(&self) -> bool {
        self.width > 1
    }

    fn dashes(&self) -> Option<Vec<u32>> {
        let (cosmetic, geometric): (&[u32], &[u32]) = match self.style {
            PenStyle::Solid | PenStyle::InsideFrame | PenStyle::Null => return None,
            PenStyle::Alternate => return Some(ALTERNATE.to_vec()),
            PenStyle::Dash => (&DASH, &GEOMETRIC_DASH),
            PenStyle::Dot => (&DOT, &GEOMETRIC_DOT),
            PenStyle::DashDot => (&DASH_DOT, &GEOMETRIC_DASH_DOT),
            PenStyle::DashDotDot => (&DASH_DOT_DOT, &GEOMETRIC_DASH_DOT_DOT),
        };

        if self.geometric {
            let scale = self.width.max(1);
            Some(geometric.iter().map(|dash| dash * scale).collect())
        } else {
            Some(cosmetic.to_vec())
        }
    }
}

/// Where along the dash pattern the next pixel falls
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct DashPos {
    index: usize,

    /// Pixels left in the current dash
    left: u32,

    /// Whether the current dash is drawn or a gap
    mark: bool,
}

impl DashPos {
    fn start(dashes: &[u32]) -> Self {
        Self {
            index: 0,
            left: dashes[0],
            mark: true,
        }
    }

    fn skip(&mut self, dashes: &[u32], skip: u32) {
        let total: u32 = dashes.iter().sum();
        let mut skip = skip % total;

        while skip > 0 {
            if self.left > skip {
                self.left -= skip;
                return;
            }

            skip -= self.left;
            self.index = (self.index + 1) % dashes.len();
            self.left = dashes[self.index];
            self.mark = !self.mark;
        }
    }
}

/// Polygons collected for a single fill
#[derive(Debug, Default)]
struct Outline {
    points: Vec<Point>,
    counts: Vec<usize>,
}

impl Outline {
    /// Add a polygon, turned clockwise so that overlapping parts add up under the winding rule
    fn push(&mut self, mut polygon: Vec<Point>) {
        if polygon.len() < 3 {
            return;
        }

        let area: i64 = polygon
            .iter()
            .zip(polygon.iter().cycle().skip(1))
            .map(|(a, b)| i64::from(a.x) * i64::from(b.y) - i64::from(b.x) * i64::from(a.y))
            .sum();
        if area < 0 {
            polygon.reverse();
        }

        self.counts.push(polygon.len());
        self.points.extend(polygon);
    }

    fn spans(&self) -> Vec<Rectangle> {
        fill_polygon_spans(&self.points, &self.counts, FillMode::Winding)
    }
}

fn round(x: f64, y: f64) -> Point {
    Point::new(x.round() as i32, y.round() as i32)
}

/// The pen that lines are currently drawn with, plus the dash position within a call
#[derive(Debug, Default)]
pub struct PenState {
    pen: Pen,
    dashes: Option<Vec<u32>>,
    dash_pos: Option<DashPos>,
}

impl PenState {
    #[must_use]
    pub fn new(pen: Pen) -> Self {
        let mut state = Self::default();
        state.select(pen);
        state
    }

    pub fn select(&mut self, pen: Pen) {
        self.dashes = pen.dashes();
        self.dash_pos = None;
        self.pen = pen;
    }

    #[must_use]
    pub fn pen(&self) -> &Pen {
        &self.pen
    }

    #[must_use]
    pub fn is_null(&self) -> bool {
        self.pen.style == PenStyle::Null
    }

    fn reset_dash(&mut self) {
        self.dash_pos = self.dashes.as_deref().map(DashPos::start);
    }

    /// Draw a connected series of lines, closing the figure if `closed` is set
    ///
    /// Gaps between dashes are drawn in `background` if it is given. The dash pattern
    /// continues from one segment into the next and starts over with every call.
    pub fn draw_polyline(
        &mut self,
        dib: &mut DibInfo<'_>,
        points: &[Point],
        closed: bool,
        clip: Option<&Region>,
        rop2: Rop2,
        background: Option<ColorRef>,
    ) -> Result<(), BlitError> {
        if self.is_null() || points.is_empty() {
            return Ok(());
        }

        self.reset_dash();

        if self.pen.is_wide() {
            return self.draw_wide(dib, points, closed, clip, rop2, background);
        }

        let clip_rects = get_clipped_rects(dib, None, clip);
        let funcs = dib.funcs();
        let codes = rop2.codes();
        let pen = codes.and_xor(funcs.colorref_to_pixel(dib, self.pen.color));
        let gap = background.map(|color| codes.and_xor(funcs.colorref_to_pixel(dib, color)));

        let mut segments: Vec<(Point, Point)> = points.windows(2).map(|w| (w[0], w[1])).collect();
        if closed && points.len() > 2 {
            segments.push((points[points.len() - 1], points[0]));
        }

        for (start, end) in segments {
            if start == end {
                continue;
            }

            match self.dashes.as_deref() {
                None => {
                    for rect in &clip_rects {
                        if let Some(segment) = clip_segment(start, end, rect) {
                            funcs.solid_line(dib, &segment, pen.0, pen.1);
                        }
                    }
                },
                Some(dashes) => {
                    let Some(dash_pos) = self.dash_pos.as_mut() else {
                        continue;
                    };
                    draw_dashed_line(dib, start, end, &clip_rects, dashes, dash_pos, pen, gap);
                },
            }
        }

        Ok(())
    }

    fn draw_wide(
        &mut self,
        dib: &mut DibInfo<'_>,
        points: &[Point],
        closed: bool,
        clip: Option<&Region>,
        rop2: Rop2,
        background: Option<ColorRef>,
    ) -> Result<(), BlitError> {
        let half = f64::from(self.pen.width) / 2.;
        let mut lines = Outline::default();
        let mut gaps = Outline::default();

        let mut vertices = points.to_vec();
        vertices.dedup();
        if closed && vertices.len() > 2 {
            vertices.push(vertices[0]);
        }

        for pair in vertices.windows(2) {
            let (start, end) = (pair[0], pair[1]);
            match (self.dashes.as_deref(), self.dash_pos.as_mut()) {
                (Some(dashes), Some(dash_pos)) => {
                    let length = (end.x - start.x).abs().max((end.y - start.y).abs()) as u32;
                    let mut position = 0;
                    while position < length {
                        let run = dash_pos.left.min(length - position);
                        let from = f64::from(position) / f64::from(length);
                        let to = f64::from(position + run) / f64::from(length);

                        if dash_pos.mark {
                            lines.push(sub_segment_quad(start, end, from, to, half));
                        } else if background.is_some() {
                            gaps.push(sub_segment_quad(start, end, from, to, half));
                        }

                        dash_pos.skip(dashes, run);
                        position += run;
                    }
                },
                _ => lines.push(sub_segment_quad(start, end, 0., 1., half)),
            }
        }

        // Solid pens are joined round at every vertex and capped at the ends
        if self.dashes.is_none() && vertices.len() > 1 {
            let joins = if closed {
                &vertices[..]
            } else {
                &vertices[1..vertices.len() - 1]
            };
            for &vertex in joins {
                lines.push(ellipse_points(&round_cap(vertex, self.pen.width)));
            }

            if !closed {
                let first = vertices[0];
                let last = vertices[vertices.len() - 1];
                let before_last = vertices[vertices.len() - 2];
                lines.push(self.cap(first, vertices[1], half));
                lines.push(self.cap(last, before_last, half));
            }
        }

        let funcs = dib.funcs();
        let codes = rop2.codes();
        let mut fill = |outline: &Outline, color: ColorRef| {
            let mut rects = ClippedRects::new();
            for span in outline.spans() {
                rects.extend(get_clipped_rects(dib, Some(&span), clip));
            }
            let (and, xor) = codes.and_xor(funcs.colorref_to_pixel(dib, color));
            funcs.solid_rects(dib, &rects, and, xor);
        };

        if let Some(background) = background {
            fill(&gaps, background);
        }
        fill(&lines, self.pen.color);
        Ok(())
    }

    /// The cap at `at`, for a line that continues towards `towards`
    fn cap(&self, at: Point, towards: Point, half: f64) -> Vec<Point> {
        match self.pen.end_cap {
            EndCap::Flat => vec![],
            EndCap::Round => ellipse_points(&round_cap(at, self.pen.width)),
            EndCap::Square => {
                let (dx, dy) = (f64::from(towards.x - at.x), f64::from(towards.y - at.y));
                let length = dx.hypot(dy);
                if length == 0. {
                    return vec![];
                }
                let (ux, uy) = (dx / length * half, dy / length * half);
                let (x, y) = (f64::from(at.x), f64::from(at.y));
                vec![
                    round(x - ux - uy, y - uy + ux),
                    round(x + ux - uy, y + uy + ux),
                    round(x + ux + uy, y + uy - ux),
                    round(x - ux + uy, y - uy - ux),
                ]
            },
        }
    }
}

fn round_cap(center: Point, width: u32) -> Rectangle {
    let width = width as i32;
    let top_left = Point::new(center.x - width / 2, center.y - width / 2);
    Rectangle::from_position_and_size(top_left, width, width)
}

/// The quadrilateral covering the part of a wide line between two fractions of its length
fn sub_segment_quad(start: Point, end: Point, from: f64, to: f64, half: f64) -> Vec<Point> {
    let (dx, dy) = (f64::from(end.x - start.x), f64::from(end.y - start.y));
    let length = dx.hypot(dy);
    if length == 0. {
        return vec![];
    }

    let (nx, ny) = (-dy / length * half, dx / length * half);
    let (x0, y0) = (f64::from(start.x) + dx * from, f64::from(start.y) + dy * from);
    let (x1, y1) = (f64::from(start.x) + dx * to, f64::from(start.y) + dy * to);

    vec![
        round(x0 + nx, y0 + ny),
        round(x1 + nx, y1 + ny),
        round(x1 - nx, y1 - ny),
        round(x0 - nx, y0 - ny),
    ]
}

fn draw_dashed_line(
    dib: &mut DibInfo<'_>,
    start: Point,
    end: Point,
    clip_rects: &[Rectangle],
    dashes: &[u32],
    dash_pos: &mut DashPos,
    pen: (u32, u32),
    gap: Option<(u32, u32)>,
) {
    let x_major = (end.x - start.x).abs() >= (end.y - start.y).abs();
    let major_distance = |a: Point, b: Point| {
        if x_major {
            (b.x - a.x).unsigned_abs()
        } else {
            (b.y - a.y).unsigned_abs()
        }
    };

    let initial = *dash_pos;
    for rect in clip_rects {
        let Some(segment) = clip_segment(start, end, rect) else {
            continue;
        };

        // Every clip rectangle sees the pattern as if the line started at `start`
        *dash_pos = initial;
        dash_pos.skip(dashes, major_distance(start, segment.start));

        for point in segment.points() {
            let masks = if dash_pos.mark { Some(pen) } else { gap };
            if let Some((and, xor)) = masks {
                dib.rop_pixel(point.x, point.y, and, xor);
            }
            dash_pos.skip(dashes, 1);
        }
    }

    *dash_pos = initial;
    dash_pos.skip(dashes, major_distance(start, end));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BitmapInfo;

    fn dib(bit_count: u16) -> DibInfo<'static> {
        DibInfo::allocate(&BitmapInfo::new(16, 16, bit_count)).unwrap()
    }

    fn row(dib: &DibInfo<'_>, y: i32, len: i32) -> Vec<u32> {
        (0..len).map(|x| dib.read_pixel(x, y)).collect()
    }

    #[test]
    fn solid_line_excludes_the_end_point() {
        let mut target = dib(8);
        let mut pen = PenState::new(Pen::new(PenStyle::Solid, 1, ColorRef::WHITE));
        let points = [Point::new(0, 0), Point::new(5, 0)];
        pen.draw_polyline(&mut target, &points, false, None, Rop2::CopyPen, None)
            .unwrap();

        assert_eq!(row(&target, 0, 6), [0xff, 0xff, 0xff, 0xff, 0xff, 0]);
    }

    #[test]
    fn dotted_line_with_opaque_gaps() {
        let mut target = dib(32);
        let blue = ColorRef::rgb(0, 0, 0xff);
        let mut pen = PenState::new(Pen::new(PenStyle::Dot, 0, ColorRef::WHITE));
        let points = [Point::new(0, 0), Point::new(9, 0)];

        pen.draw_polyline(&mut target, &points, false, None, Rop2::CopyPen, None)
            .unwrap();
        assert_eq!(
            row(&target, 0, 9),
            [0xffffff, 0xffffff, 0xffffff, 0, 0, 0, 0xffffff, 0xffffff, 0xffffff]
        );

        pen.draw_polyline(&mut target, &points, false, None, Rop2::CopyPen, Some(blue))
            .unwrap();
        assert_eq!(target.read_pixel(4, 0), 0x0000ff);
    }

    #[test]
    fn dashes_continue_across_segments() {
        let mut target = dib(8);
        let mut pen = PenState::new(Pen::new(PenStyle::Dot, 0, ColorRef::WHITE));
        let points = [Point::new(0, 0), Point::new(2, 0), Point::new(8, 0)];
        pen.draw_polyline(&mut target, &points, false, None, Rop2::CopyPen, None)
            .unwrap();

        assert_eq!(row(&target, 0, 8), [0xff, 0xff, 0xff, 0, 0, 0, 0xff, 0xff]);
    }

    #[test]
    fn clipping_keeps_the_dash_phase() {
        let mut target = dib(8);
        let mut pen = PenState::new(Pen::new(PenStyle::Dot, 0, ColorRef::WHITE));
        let region = Region::from_rect(Rectangle::new(4, 0, 16, 16));
        let points = [Point::new(0, 0), Point::new(12, 0)];
        pen.draw_polyline(&mut target, &points, false, Some(&region), Rop2::CopyPen, None)
            .unwrap();

        assert_eq!(
            row(&target, 0, 12),
            [0, 0, 0, 0, 0, 0, 0xff, 0xff, 0xff, 0, 0, 0]
        );
    }

    #[test]
    fn wide_line_covers_its_width() {
        let mut target = dib(8);
        let mut pen = Pen::new(PenStyle::Solid, 3, ColorRef::WHITE);
        pen.end_cap = EndCap::Flat;
        let mut pen = PenState::new(pen);
        let points = [Point::new(2, 5), Point::new(8, 5)];
        pen.draw_polyline(&mut target, &points, false, None, Rop2::CopyPen, None)
            .unwrap();

        for y in 4..7 {
            assert_eq!(row(&target, y, 9), [0, 0, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0]);
        }
        assert!(row(&target, 3, 16).iter().all(|&pixel| pixel == 0));
        assert!(row(&target, 7, 16).iter().all(|&pixel| pixel == 0));
    }

    #[test]
    fn wide_joins_are_drawn_once() {
        let mut target = dib(8);
        let mut pen = PenState::new(Pen::new(PenStyle::Solid, 3, ColorRef::WHITE));
        let points = [Point::new(2, 5), Point::new(8, 5), Point::new(8, 10)];
        pen.draw_polyline(&mut target, &points, false, None, Rop2::XorPen, None)
            .unwrap();

        assert_eq!(target.read_pixel(8, 5), 0xff);
        assert_eq!(target.read_pixel(7, 5), 0xff);
        assert_eq!(target.read_pixel(8, 8), 0xff);
    }

    #[test]
    fn null_pen_draws_nothing() {
        let mut target = dib(8);
        let mut pen = PenState::new(Pen::new(PenStyle::Null, 1, ColorRef::WHITE));
        let points = [Point::new(0, 0), Point::new(15, 15)];
        pen.draw_polyline(&mut target, &points, true, None, Rop2::CopyPen, None)
            .unwrap();

        assert!(target.bits().iter().all(|&byte| byte == 0));
    }

    #[test]
    fn geometric_dashes_scale_with_the_width() {
        let pen = Pen::new(PenStyle::DashDot, 4, ColorRef::BLACK);
        assert_eq!(pen.dashes(), Some(vec![12, 4, 4, 4]));

        let cosmetic = Pen::new(PenStyle::DashDot, 1, ColorRef::BLACK);
        assert_eq!(cosmetic.dashes(), Some(vec![9, 6, 3, 6]));
    }
}
