//! Ellipse outlines without trigonometry
//!
//! Only one quadrant is ever computed, the others are reflections of it.

use crate::{Point, Rectangle};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ArcDirection {
    #[default]
    CounterClockwise,
    Clockwise,
}

/// Compute the boundary of the quadrant of an ellipse that lies right of and below the center
///
/// The ellipse fills a `width` x `height` box whose top left corner is the origin.
/// Points start at the right end of the horizontal axis and move towards the bottom.
#[must_use]
pub fn ellipse_first_quadrant(width: i32, height: i32) -> Vec<Point> {
    // Midpoint algorithm by Alois Zingl, scaled by 8 so that it works for even sizes
    let a = i64::from(width - 1);
    let b = i64::from(height - 1);
    let a_squared = 8 * a * a;
    let b_squared = 8 * b * b;
    let mut dx = 4 * b * b * (1 - a);
    let mut dy = 4 * a * a * (1 + (b % 2));
    let mut err = dx + dy + a * a * (b % 2);

    let mut point = Point::new(width - 1, height / 2);
    let mut points = vec![];

    while point.x >= width / 2 {
        let e2 = 2 * err;
        points.push(point);

        if e2 >= dx {
            point.x -= 1;
            dx += b_squared;
            err += dx;
        }
        if e2 <= dy {
            point.y += 1;
            dy += a_squared;
            err += dy;
        }
    }

    points
}

/// Map a position on the ring of four reflected quadrants to a device pixel
fn ring_point(
    quadrant_points: &[Point],
    rect: &Rectangle,
    position: usize,
    direction: ArcDirection,
) -> Point {
    let count = quadrant_points.len();
    let width = rect.width();
    let height = rect.height();

    let left = rect.left + width / 2;
    let right = rect.right - 1 - width / 2;
    let top = rect.top + height / 2;
    let bottom = rect.bottom - 1 - height / 2;

    let forward = quadrant_points[position % count];
    let backward = quadrant_points[count - 1 - position % count];

    let quadrant = (position / count) % 4;
    let (x, y) = match quadrant {
        0 => (left + forward.x, forward.y),
        1 => (right - backward.x, backward.y),
        2 => (right - forward.x, forward.y),
        _ => (left + backward.x, backward.y),
    };

    // Counter-clockwise arcs walk the ring mirrored along the horizontal axis
    let below = (quadrant < 2) == (direction == ArcDirection::Clockwise);

    if below {
        Point::new(x, top + y)
    } else {
        Point::new(x, bottom - y)
    }
}

fn centered_quadrant(width: i32, height: i32) -> Vec<Point> {
    let mut points = ellipse_first_quadrant(width, height);
    for point in &mut points {
        point.x -= width / 2;
        point.y -= height / 2;
    }
    points
}

/// The complete outline of the ellipse inscribed in `rect`, clockwise
/// starting at the right end of the horizontal axis
#[must_use]
pub fn ellipse_points(rect: &Rectangle) -> Vec<Point> {
    let rect = rect.normalized();
    if rect.is_empty() {
        return vec![];
    }

    let points = centered_quadrant(rect.width(), rect.height());
    (0..4 * points.len())
        .map(|position| ring_point(&points, &rect, position, ArcDirection::Clockwise))
        .collect()
}

/// Find where a ray from the center through `(x, y)` crosses the ring of quadrant points
fn find_intersection(points: &[Point], x: i64, y: i64) -> usize {
    let count = points.len();
    let px = |i: usize| i64::from(points[i].x);
    let py = |i: usize| i64::from(points[i].y);

    if y >= 0 {
        if x >= 0 {
            let i = (0..count)
                .find(|&i| px(i) * y <= py(i) * x)
                .unwrap_or(count);
            return i;
        }
        let i = (0..count)
            .find(|&i| px(i) * y < py(i) * -x)
            .unwrap_or(count);
        return 2 * count - i;
    }

    if x >= 0 {
        let i = (0..count)
            .find(|&i| px(i) * -y <= py(i) * x)
            .unwrap_or(count);
        return 4 * count - i;
    }

    let i = (0..count)
        .find(|&i| px(i) * -y < py(i) * -x)
        .unwrap_or(count);
    2 * count + i
}

/// The points of the arc of the ellipse inscribed in `rect` between two radials
///
/// `start` and `end` are relative to the center of `rect`. The arc runs from `start`
/// to `end` in the given direction. If both radials meet the ellipse in the same
/// point, the arc is the whole ellipse.
#[must_use]
pub fn arc_points(
    rect: &Rectangle,
    mut start: Point,
    mut end: Point,
    direction: ArcDirection,
) -> Vec<Point> {
    let rect = rect.normalized();
    if rect.is_empty() {
        return vec![];
    }

    let points = centered_quadrant(rect.width(), rect.height());
    let count = points.len();

    if direction == ArcDirection::CounterClockwise {
        start.y = -start.y;
        end.y = -end.y;
    }

    let start_position = find_intersection(&points, start.x.into(), start.y.into());
    let mut end_position = find_intersection(&points, end.x.into(), end.y.into());
    if end_position <= start_position {
        end_position += 4 * count;
    }

    (start_position..end_position)
        .map(|position| ring_point(&points, &rect, position, direction))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn circle_quadrant() {
        let points = ellipse_first_quadrant(9, 9);
        let expected: Vec<Point> = [(8, 4), (8, 5), (7, 6), (7, 7), (6, 7), (5, 8), (4, 8)]
            .into_iter()
            .map(Point::from)
            .collect();
        assert_eq!(points, expected);
    }

    #[test]
    fn outline_is_symmetric() {
        let rect = Rectangle::new(10, 20, 19, 29);
        let outline = ellipse_points(&rect);
        assert_eq!(outline.len(), 4 * 7);

        for point in &outline {
            assert!(rect.contains_point(*point), "{point:?} lies outside");
            let mirrored = Point::new(rect.left + rect.right - 1 - point.x, point.y);
            assert!(outline.contains(&mirrored), "{mirrored:?} is missing");
        }
    }

    #[test]
    fn full_arc_when_radials_coincide() {
        let rect = Rectangle::new(0, 0, 9, 9);
        let arc = arc_points(
            &rect,
            Point::new(10, 0),
            Point::new(10, 0),
            ArcDirection::Clockwise,
        );
        assert_eq!(arc.len(), 4 * 7);
    }

    #[test]
    fn quarter_arc() {
        let rect = Rectangle::new(0, 0, 9, 9);

        // From the right end of the axis clockwise (downwards) to the bottom
        let arc = arc_points(
            &rect,
            Point::new(10, 0),
            Point::new(0, 10),
            ArcDirection::Clockwise,
        );
        assert_eq!(arc.first(), Some(&Point::new(8, 4)));
        assert!(arc.iter().all(|point| point.x >= 4 && point.y >= 4));

        // The same radials counter-clockwise cover the other three quadrants
        let rest = arc_points(
            &rect,
            Point::new(10, 0),
            Point::new(0, 10),
            ArcDirection::CounterClockwise,
        );
        assert!(rest.len() > arc.len());
    }
}
