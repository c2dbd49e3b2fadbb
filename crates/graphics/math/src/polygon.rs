use crate::{Point, Rectangle};

/// How overlapping parts of a polygon are filled
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FillMode {
    /// A pixel is inside if a ray from it crosses an odd number of edges
    #[default]
    Alternate,

    /// A pixel is inside if the edges wind around it at least once
    Winding,
}

#[derive(Clone, Copy, Debug)]
struct Edge {
    top: Point,
    bottom: Point,

    /// `1` for edges pointing down, `-1` for edges pointing up
    direction: i32,
}

impl Edge {
    /// The x coordinate where the edge crosses the center line of row `y`
    fn x_at(&self, y: i32) -> f64 {
        let center = f64::from(y) + 0.5;
        let dy = f64::from(self.bottom.y - self.top.y);
        let dx = f64::from(self.bottom.x - self.top.x);
        f64::from(self.top.x) + (center - f64::from(self.top.y)) * dx / dy
    }
}

/// Scan-convert a set of closed polygons into one pixel high spans
///
/// `counts` holds the number of vertices of each polygon, the vertices of all
/// polygons are stored back to back in `points`. A pixel is filled if its center
/// lies inside, pixels exactly on a right or bottom edge are not.
#[must_use]
pub fn fill_polygon_spans(points: &[Point], counts: &[usize], mode: FillMode) -> Vec<Rectangle> {
    let mut edges = vec![];
    let mut offset = 0;

    for &count in counts {
        let Some(polygon) = points.get(offset..offset + count) else {
            log::warn!("Polygon vertex counts exceed the number of points");
            break;
        };
        offset += count;

        if count < 3 {
            continue;
        }

        for (index, &from) in polygon.iter().enumerate() {
            let to = polygon[(index + 1) % count];
            if from.y == to.y {
                continue;
            }

            let (top, bottom, direction) = if from.y < to.y {
                (from, to, 1)
            } else {
                (to, from, -1)
            };
            edges.push(Edge {
                top,
                bottom,
                direction,
            });
        }
    }

    let Some(min_y) = edges.iter().map(|edge| edge.top.y).min() else {
        return vec![];
    };
    let max_y = edges.iter().map(|edge| edge.bottom.y).max().unwrap_or(min_y);

    let mut spans = vec![];
    let mut crossings: Vec<(f64, i32)> = vec![];

    for y in min_y..max_y {
        crossings.clear();
        crossings.extend(
            edges
                .iter()
                .filter(|edge| edge.top.y <= y && y < edge.bottom.y)
                .map(|edge| (edge.x_at(y), edge.direction)),
        );
        crossings.sort_by(|a, b| a.0.total_cmp(&b.0));

        let mut winding = 0;
        let mut span_start = None;

        for &(x, direction) in &crossings {
            let was_inside = is_inside(winding, mode);
            winding += match mode {
                FillMode::Alternate => 1,
                FillMode::Winding => direction,
            };
            let inside = is_inside(winding, mode);

            if !was_inside && inside {
                span_start = Some(x);
            } else if was_inside && !inside {
                if let Some(start) = span_start.take() {
                    push_span(&mut spans, y, start, x);
                }
            }
        }
    }

    spans
}

fn is_inside(winding: i32, mode: FillMode) -> bool {
    match mode {
        FillMode::Alternate => winding % 2 != 0,
        FillMode::Winding => winding != 0,
    }
}

/// Add the pixels whose centers lie within `[start, end)` on row `y`
fn push_span(spans: &mut Vec<Rectangle>, y: i32, start: f64, end: f64) {
    let left = (start - 0.5).ceil() as i32;
    let right = (end - 0.5).ceil() as i32;
    if left >= right {
        return;
    }

    // Merge with a touching span on the same row
    if let Some(last) = spans.last_mut() {
        if last.top == y && last.right >= left {
            last.right = last.right.max(right);
            return;
        }
    }

    spans.push(Rectangle::new(left, y, right, y + 1));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn area(spans: &[Rectangle]) -> i32 {
        spans.iter().map(|span| span.width() * span.height()).sum()
    }

    #[test]
    fn square() {
        let points = [
            Point::new(0, 0),
            Point::new(4, 0),
            Point::new(4, 4),
            Point::new(0, 4),
        ];
        let spans = fill_polygon_spans(&points, &[4], FillMode::Alternate);

        assert_eq!(spans.len(), 4);
        assert!(spans
            .iter()
            .enumerate()
            .all(|(y, span)| *span == Rectangle::new(0, y as i32, 4, y as i32 + 1)));
    }

    #[test]
    fn fill_modes_differ_for_overlapping_polygons() {
        // Two squares with the same orientation, the second one inside the first
        let points = [
            Point::new(0, 0),
            Point::new(10, 0),
            Point::new(10, 10),
            Point::new(0, 10),
            Point::new(2, 2),
            Point::new(8, 2),
            Point::new(8, 8),
            Point::new(2, 8),
        ];

        let alternate = fill_polygon_spans(&points, &[4, 4], FillMode::Alternate);
        let winding = fill_polygon_spans(&points, &[4, 4], FillMode::Winding);

        assert_eq!(area(&alternate), 100 - 36);
        assert_eq!(area(&winding), 100);
    }

    #[test]
    fn degenerate_polygons() {
        let line = [Point::new(0, 0), Point::new(5, 5)];
        assert!(fill_polygon_spans(&line, &[2], FillMode::Winding).is_empty());

        let flat = [Point::new(0, 3), Point::new(5, 3), Point::new(9, 3)];
        assert!(fill_polygon_spans(&flat, &[3], FillMode::Alternate).is_empty());
    }
}
