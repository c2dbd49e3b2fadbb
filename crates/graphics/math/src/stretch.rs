use std::ops::Range;

use crate::{clip_line, LineClip, LineParams, Octant, Point, Rectangle};

/// Bresenham parameters for resampling one axis of an image
///
/// The same parameters drive both directions: when `is_stretch` is set, every step
/// produces one destination pixel and the source advances on overflow, otherwise
/// every step consumes one source pixel and the destination advances on overflow.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StretchParams {
    pub err_start: i64,
    pub err_add_1: i64,
    pub err_add_2: i64,

    /// Number of steps
    pub length: i32,

    pub src_start: i32,
    pub dst_start: i32,

    /// Exclusive end of the touched source range, in the direction of `src_inc`
    pub src_end: i32,

    /// Exclusive end of the touched destination range, in the direction of `dst_inc`
    pub dst_end: i32,

    pub src_inc: i32,
    pub dst_inc: i32,
    pub is_stretch: bool,
}

/// Compute the resampling parameters for one axis
///
/// The source extent is treated as the x axis and the destination extent as the
/// y axis of a line, which is then clipped to the visible ranges of both.
/// Negative lengths mirror the image along this axis.
///
/// Returns `None` if nothing is visible.
#[must_use]
pub fn calc_1d_stretch_params(
    dst_start: i32,
    dst_length: i32,
    dst_visible: Range<i32>,
    src_start: i32,
    src_length: i32,
    src_visible: Range<i32>,
) -> Option<StretchParams> {
    let dx = i64::from(src_length.abs());
    let dy = i64::from(dst_length.abs());
    let mut src_inc = 1;
    let mut dst_inc = 1;

    let mut octant = if dx > dy { 1 } else { 2 };
    if src_length < 0 {
        octant = 5 - octant;
        src_inc = -1;
    }
    if dst_length < 0 {
        octant = 9 - octant;
        dst_inc = -1;
    }
    let octant = Octant::from_number(octant);

    let start = Point::new(src_start, dst_start);
    let end = Point::new(src_start + src_length, dst_start + dst_length);
    let clip = Rectangle::new(
        src_visible.start,
        dst_visible.start,
        src_visible.end,
        dst_visible.end,
    );

    let params = LineParams {
        dx,
        dy,
        octant,
        bias: octant.bias(),
        err_start: 0,
        err_add_1: 0,
        err_add_2: 0,
    };

    let (clipped_start, mut clipped_end) = match clip_line(start, end, &clip, &params) {
        LineClip::Rejected => return None,
        LineClip::Clipped { start, end } => (start, end),
        LineClip::Unclipped => (start, end),
    };

    let m = i64::from((clipped_start.x - start.x).abs());
    let n = i64::from((clipped_start.y - start.y).abs());

    let is_stretch = dx <= dy;
    let (err_start, err_add_1, err_add_2, mut length) = if is_stretch {
        (
            2 * dx - dy + 2 * n * dx - 2 * m * dy,
            2 * dx - 2 * dy,
            2 * dx,
            (clipped_end.y - clipped_start.y).abs(),
        )
    } else {
        (
            2 * dy - dx + 2 * m * dy - 2 * n * dx,
            2 * dy - 2 * dx,
            2 * dy,
            (clipped_end.x - clipped_start.x).abs(),
        )
    };

    // A clipped end point is still part of the run
    if clipped_end != end {
        clipped_end.x += src_inc;
        clipped_end.y += dst_inc;
        length += 1;
    }

    Some(StretchParams {
        err_start,
        err_add_1,
        err_add_2,
        length,
        src_start: clipped_start.x,
        dst_start: clipped_start.y,
        src_end: clipped_end.x,
        dst_end: clipped_end.y,
        src_inc,
        dst_inc,
        is_stretch,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Resample `src` into `dst`, keeping the last source pixel per destination pixel
    fn resample(src: &[i32], params: &StretchParams, dst: &mut [Option<i32>]) {
        let mut err = params.err_start;
        let mut src_index = params.src_start;
        let mut dst_index = params.dst_start;

        for _ in 0..params.length {
            dst[dst_index as usize] = Some(src[src_index as usize]);
            let overflow = err > 0;
            if overflow {
                err += params.err_add_1;
            } else {
                err += params.err_add_2;
            }

            if params.is_stretch {
                dst_index += params.dst_inc;
                if overflow {
                    src_index += params.src_inc;
                }
            } else {
                src_index += params.src_inc;
                if overflow {
                    dst_index += params.dst_inc;
                }
            }
        }
    }

    #[test]
    fn stretch_by_two_duplicates_pixels() {
        let params = calc_1d_stretch_params(0, 16, 0..16, 0, 8, 0..8).unwrap();
        assert!(params.is_stretch);
        assert_eq!(params.length, 16);

        let src: Vec<i32> = (10..18).collect();
        let mut dst = vec![None; 16];
        resample(&src, &params, &mut dst);

        let expected: Vec<_> = (10..18).flat_map(|v| [Some(v), Some(v)]).collect();
        assert_eq!(dst, expected);
    }

    #[test]
    fn shrinking_keeps_every_nth_pixel() {
        for (factor, offset) in [(2, 1), (3, 1), (4, 2)] {
            let width = 8;
            let src: Vec<i32> = (0..width * factor).collect();
            let params =
                calc_1d_stretch_params(0, width, 0..width, 0, width * factor, 0..width * factor)
                    .unwrap();
            assert!(!params.is_stretch);

            let mut dst = vec![None; width as usize];
            resample(&src, &params, &mut dst);

            let expected: Vec<_> = (0..width).map(|x| Some(x * factor + offset)).collect();
            assert_eq!(dst, expected, "shrink by {factor}");
        }
    }

    #[test]
    fn clipped_destination() {
        let params = calc_1d_stretch_params(0, 16, 4..12, 0, 8, 0..8).unwrap();
        assert_eq!(params.dst_start, 4);
        assert_eq!(params.src_start, 2);
        assert_eq!(params.length, 8);
    }

    #[test]
    fn mirrored_source() {
        let params = calc_1d_stretch_params(0, 4, 0..4, 3, -4, 0..4).unwrap();
        assert_eq!(params.src_inc, -1);

        let src = [1, 2, 3, 4];
        let mut dst = vec![None; 4];
        resample(&src, &params, &mut dst);
        assert_eq!(dst, vec![Some(4), Some(3), Some(2), Some(1)]);
    }

    #[test]
    fn invisible() {
        assert!(calc_1d_stretch_params(0, 8, 10..20, 0, 8, 0..8).is_none());
    }
}
