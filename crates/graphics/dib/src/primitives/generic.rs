//! Format independent kernels on top of raw pixel access
//!
//! Formats with whole bytes per pixel use the `*_aligned` variants, which work on
//! rows of bytes instead of single pixels wherever the operation allows it.

use math::{LineSegment, Point, Rectangle, StretchParams};

use super::{Overlap, RopMasks, StretchMode};
use crate::{ColorRef, DibInfo, Rop2};

/// Visit the offsets of a `width` x `height` block in an order that is safe for `overlap`
fn for_each_offset(width: i32, height: i32, overlap: Overlap, mut f: impl FnMut(i32, i32)) {
    for i in 0..height {
        let y = if overlap.contains(Overlap::BELOW) {
            height - 1 - i
        } else {
            i
        };

        for j in 0..width {
            let x = if overlap.contains(Overlap::RIGHT) {
                width - 1 - j
            } else {
                j
            };
            f(x, y);
        }
    }
}

pub(crate) fn solid_rects(dib: &mut DibInfo<'_>, rects: &[Rectangle], and: u32, xor: u32) {
    for rect in rects {
        for y in rect.top..rect.bottom {
            for x in rect.left..rect.right {
                dib.rop_pixel(x, y, and, xor);
            }
        }
    }
}

/// Solid fill for formats with `BYTES` bytes per pixel
pub(crate) fn solid_rects_aligned<const BYTES: usize>(
    dib: &mut DibInfo<'_>,
    rects: &[Rectangle],
    and: u32,
    xor: u32,
) {
    if and != 0 {
        solid_rects(dib, rects, and, xor);
        return;
    }

    let mut pattern = [0; BYTES];
    pattern.copy_from_slice(&xor.to_le_bytes()[..BYTES]);

    for rect in rects {
        let start = dib.column(rect.left) * BYTES;
        let end = dib.column(rect.right) * BYTES;

        for y in rect.top..rect.bottom {
            let row = &mut dib.row_mut(y)[start..end];
            if BYTES == 1 {
                row.fill(pattern[0]);
            } else {
                for pixel in row.chunks_exact_mut(BYTES) {
                    pixel.copy_from_slice(&pattern);
                }
            }
        }
    }
}

pub(crate) fn solid_line(dib: &mut DibInfo<'_>, segment: &LineSegment, and: u32, xor: u32) {
    for point in segment.points() {
        dib.rop_pixel(point.x, point.y, and, xor);
    }
}

pub(crate) fn pattern_rects(
    dib: &mut DibInfo<'_>,
    rects: &[Rectangle],
    origin: Point,
    masks: &RopMasks,
) {
    for rect in rects {
        for y in rect.top..rect.bottom {
            for x in rect.left..rect.right {
                let index = masks.index(x - origin.x, y - origin.y);
                match &masks.and {
                    Some(and) => dib.rop_pixel(x, y, and[index], masks.xor[index]),
                    None => dib.write_pixel(x, y, masks.xor[index]),
                }
            }
        }
    }
}

pub(crate) fn copy_rect(
    dst: &mut DibInfo<'_>,
    rect: &Rectangle,
    src: Option<&DibInfo<'_>>,
    origin: Point,
    rop2: Rop2,
    overlap: Overlap,
) {
    let codes = rop2.codes();

    for_each_offset(rect.width(), rect.height(), overlap, |x, y| {
        let pixel = match src {
            Some(src) => src.read_pixel(origin.x + x, origin.y + y),
            None => dst.read_pixel(origin.x + x, origin.y + y),
        };
        let (and, xor) = codes.and_xor(pixel);
        dst.rop_pixel(rect.left + x, rect.top + y, and, xor);
    });
}

/// Copies for formats with `BYTES` bytes per pixel, moving whole rows for [Rop2::CopyPen]
pub(crate) fn copy_rect_aligned<const BYTES: usize>(
    dst: &mut DibInfo<'_>,
    rect: &Rectangle,
    src: Option<&DibInfo<'_>>,
    origin: Point,
    rop2: Rop2,
    overlap: Overlap,
) {
    if rop2 != Rop2::CopyPen {
        copy_rect(dst, rect, src, origin, rop2, overlap);
        return;
    }

    let len = rect.width() as usize * BYTES;
    let height = rect.height();

    for i in 0..height {
        let y = if overlap.contains(Overlap::BELOW) {
            height - 1 - i
        } else {
            i
        };
        let dst_offset = dst.byte_offset(rect.left, rect.top + y);

        match src {
            Some(src) => {
                let src_offset = src.byte_offset(origin.x, origin.y + y);
                dst.bits_mut()[dst_offset..dst_offset + len]
                    .copy_from_slice(&src.bits()[src_offset..src_offset + len]);
            },
            None => {
                let src_offset = dst.byte_offset(origin.x, origin.y + y);
                dst.bits_mut()
                    .copy_within(src_offset..src_offset + len, dst_offset);
            },
        }
    }
}

pub(crate) fn mask_rect(
    dst: &mut DibInfo<'_>,
    rect: &Rectangle,
    src: &DibInfo<'_>,
    origin: Point,
    rop2: Rop2,
) {
    let funcs = dst.funcs();
    let src_table = src.color_table();
    let colors = [0, 1].map(|index| {
        let color = src_table
            .get(index)
            .map_or(ColorRef::BLACK, |entry| entry.to_colorref());
        funcs.colorref_to_pixel(dst, color)
    });
    let codes = rop2.codes();

    for y in 0..rect.height() {
        for x in 0..rect.width() {
            let bit = src.read_pixel(origin.x + x, origin.y + y);
            let (and, xor) = codes.and_xor(colors[bit as usize & 1]);
            dst.rop_pixel(rect.left + x, rect.top + y, and, xor);
        }
    }
}

pub(crate) fn convert_to(
    dst: &mut DibInfo<'_>,
    src: &DibInfo<'_>,
    src_rect: &Rectangle,
    _dither: bool,
) {
    let width = src_rect.width();
    let height = src_rect.height();

    if dst.same_format(src) {
        if dst.bit_count() >= 8 {
            let len = width as usize * dst.bit_count() as usize / 8;
            for y in 0..height {
                let dst_offset = dst.byte_offset(0, y);
                let src_offset = src.byte_offset(src_rect.left, src_rect.top + y);
                dst.bits_mut()[dst_offset..dst_offset + len]
                    .copy_from_slice(&src.bits()[src_offset..src_offset + len]);
            }
        } else {
            for y in 0..height {
                for x in 0..width {
                    let pixel = src.read_pixel(src_rect.left + x, src_rect.top + y);
                    dst.write_pixel(x, y, pixel);
                }
            }
        }
        return;
    }

    let src_funcs = src.funcs();
    let dst_funcs = dst.funcs();
    for y in 0..height {
        for x in 0..width {
            let pixel = src.read_pixel(src_rect.left + x, src_rect.top + y);
            let color = src_funcs.pixel_to_colorref(src, pixel);
            let pixel = dst_funcs.colorref_to_pixel(dst, color);
            dst.write_pixel(x, y, pixel);
        }
    }
}

pub(crate) fn create_rop_masks(pattern: &DibInfo<'_>, rop2: Rop2) -> RopMasks {
    let bounds = pattern.bounds();
    let codes = rop2.codes();
    let count = (bounds.width() * bounds.height()) as usize;

    let mut and = Vec::with_capacity(count);
    let mut xor = Vec::with_capacity(count);
    for y in 0..bounds.height() {
        for x in 0..bounds.width() {
            let (pixel_and, pixel_xor) = codes.and_xor(pattern.read_pixel(x, y));
            and.push(pixel_and);
            xor.push(pixel_xor);
        }
    }

    RopMasks {
        width: bounds.width(),
        height: bounds.height(),
        and: rop2.uses_dst().then_some(and),
        xor,
    }
}

pub(crate) fn stretch_row(
    dst: &mut DibInfo<'_>,
    dst_start: Point,
    src: &DibInfo<'_>,
    src_start: Point,
    params: &StretchParams,
    mode: StretchMode,
    keep_dst: bool,
) {
    let mut dst_x = dst_start.x;
    let mut src_x = src_start.x;
    let mut err = params.err_start;
    let codes = (mode != StretchMode::DeleteScans && keep_dst).then(|| mode.rop2().codes());

    for _ in 0..params.length {
        let pixel = src.read_pixel(src_x, src_start.y);
        match codes {
            Some(codes) => {
                let (and, xor) = codes.and_xor(pixel);
                dst.rop_pixel(dst_x, dst_start.y, and, xor);
            },
            None => dst.write_pixel(dst_x, dst_start.y, pixel),
        }

        dst_x += params.dst_inc;
        if err > 0 {
            src_x += params.src_inc;
            err += params.err_add_1;
        } else {
            err += params.err_add_2;
        }
    }
}

pub(crate) fn shrink_row(
    dst: &mut DibInfo<'_>,
    dst_start: Point,
    src: &DibInfo<'_>,
    src_start: Point,
    params: &StretchParams,
    mode: StretchMode,
    keep_dst: bool,
) {
    let mut dst_x = dst_start.x;
    let mut src_x = src_start.x;
    let mut err = params.err_start;

    if mode == StretchMode::DeleteScans {
        for _ in 0..params.length {
            dst.write_pixel(dst_x, dst_start.y, src.read_pixel(src_x, src_start.y));

            src_x += params.src_inc;
            if err > 0 {
                dst_x += params.dst_inc;
                err += params.err_add_1;
            } else {
                err += params.err_add_2;
            }
        }
        return;
    }

    let codes = mode.rop2().codes();
    let init_value = if mode == StretchMode::AndScans { !0 } else { 0 };
    let mut new_pixel = true;

    for _ in 0..params.length {
        if new_pixel && !keep_dst {
            dst.write_pixel(dst_x, dst_start.y, init_value);
        }
        let (and, xor) = codes.and_xor(src.read_pixel(src_x, src_start.y));
        dst.rop_pixel(dst_x, dst_start.y, and, xor);
        new_pixel = false;

        src_x += params.src_inc;
        if err > 0 {
            dst_x += params.dst_inc;
            new_pixel = true;
            err += params.err_add_1;
        } else {
            err += params.err_add_2;
        }
    }
}

#[inline]
fn linear_interpolate(start: u8, end: u8, delta: f32) -> u8 {
    (f32::from(start) + (f32::from(end) - f32::from(start)) * delta + 0.5) as u8
}

/// Positions along one axis of a resampling, with the fraction towards the next sample
struct Axis {
    dst_origin: i32,
    dst_extent: i32,
    src_origin: i32,
    src_extent: i32,
    src_min: i32,
    src_max: i32,
}

impl Axis {
    fn sample(&self, position: i32) -> (i32, i32, f32) {
        // Both extents may be negative, which mirrors the axis
        let t = (position as f32 + 0.5 - self.dst_origin as f32) / self.dst_extent as f32;
        let coordinate = self.src_origin as f32 + t * self.src_extent as f32 - 0.5;

        let floor = coordinate.floor();
        let first = (floor as i32).clamp(self.src_min, self.src_max - 1);
        let second = (first + 1).min(self.src_max - 1);
        let delta = if floor as i32 == first {
            (coordinate - floor).clamp(0., 1.)
        } else {
            0.
        };
        (first, second, delta)
    }
}

/// Bilinear resampling, the rectangles may have negative extents to mirror the image
///
/// Only the part of `dst_rect` within the bounds of `dst` is written.
pub(crate) fn halftone(
    dst: &mut DibInfo<'_>,
    dst_rect: &Rectangle,
    src: &DibInfo<'_>,
    src_rect: &Rectangle,
) {
    let Some(src_area) = src_rect.normalized().intersection(&src.bounds()) else {
        return;
    };
    if dst_rect.width() == 0 || dst_rect.height() == 0 {
        return;
    }

    let horizontal = Axis {
        dst_origin: dst_rect.left,
        dst_extent: dst_rect.width(),
        src_origin: src_rect.left,
        src_extent: src_rect.width(),
        src_min: src_area.left,
        src_max: src_area.right,
    };
    let vertical = Axis {
        dst_origin: dst_rect.top,
        dst_extent: dst_rect.height(),
        src_origin: src_rect.top,
        src_extent: src_rect.height(),
        src_min: src_area.top,
        src_max: src_area.bottom,
    };

    let src_funcs = src.funcs();
    let dst_funcs = dst.funcs();
    let color_at = |x, y| src_funcs.pixel_to_colorref(src, src.read_pixel(x, y));
    let Some(area) = dst_rect.normalized().intersection(&dst.bounds()) else {
        return;
    };

    for y in area.top..area.bottom {
        let (y0, y1, dy) = vertical.sample(y);

        for x in area.left..area.right {
            let (x0, x1, dx) = horizontal.sample(x);

            let top_left = color_at(x0, y0);
            let top_right = color_at(x1, y0);
            let bottom_left = color_at(x0, y1);
            let bottom_right = color_at(x1, y1);

            let channel = |get: fn(ColorRef) -> u8| {
                linear_interpolate(
                    linear_interpolate(get(top_left), get(top_right), dx),
                    linear_interpolate(get(bottom_left), get(bottom_right), dx),
                    dy,
                )
            };

            let color = ColorRef::rgb(
                channel(ColorRef::red),
                channel(ColorRef::green),
                channel(ColorRef::blue),
            );
            let pixel = dst_funcs.colorref_to_pixel(dst, color);
            dst.write_pixel(x, y, pixel);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BitmapInfo;

    fn dib(width: i32, height: i32, bit_count: u16) -> DibInfo<'static> {
        DibInfo::allocate(&BitmapInfo::new(width, height, bit_count)).unwrap()
    }

    #[test]
    fn aligned_fill_matches_pixel_fill() {
        let rects = [Rectangle::new(1, 1, 4, 3), Rectangle::new(0, 3, 2, 4)];

        for bit_count in [8, 16, 24, 32] {
            let mut fast = dib(5, 5, bit_count);
            let mut slow = dib(5, 5, bit_count);
            match bit_count {
                8 => solid_rects_aligned::<1>(&mut fast, &rects, 0, 0x12345678),
                16 => solid_rects_aligned::<2>(&mut fast, &rects, 0, 0x12345678),
                24 => solid_rects_aligned::<3>(&mut fast, &rects, 0, 0x12345678),
                _ => solid_rects_aligned::<4>(&mut fast, &rects, 0, 0x12345678),
            }
            solid_rects(&mut slow, &rects, 0, 0x12345678);
            assert_eq!(fast.bits(), slow.bits(), "{bit_count} bpp");
        }
    }

    #[test]
    fn overlapping_copy_moves_rows_once() {
        let mut dst = dib(4, 4, 8);
        for y in 0..4 {
            for x in 0..4 {
                dst.write_pixel(x, y, (y * 4 + x) as u32);
            }
        }

        // Shift everything one pixel down and to the right
        let rect = Rectangle::new(1, 1, 4, 4);
        copy_rect_aligned::<1>(
            &mut dst,
            &rect,
            None,
            Point::new(0, 0),
            Rop2::CopyPen,
            Overlap::BELOW | Overlap::RIGHT,
        );
        assert_eq!(dst.read_pixel(1, 1), 0);
        assert_eq!(dst.read_pixel(3, 3), 10);

        let mut reference = dib(4, 4, 8);
        for y in 0..4 {
            for x in 0..4 {
                reference.write_pixel(x, y, (y * 4 + x) as u32);
            }
        }
        copy_rect(
            &mut reference,
            &rect,
            None,
            Point::new(0, 0),
            Rop2::XorPen,
            Overlap::BELOW | Overlap::RIGHT,
        );
        // (5 ^ 0), (15 ^ 10)
        assert_eq!(reference.read_pixel(1, 1), 5);
        assert_eq!(reference.read_pixel(3, 3), 5);
    }

    #[test]
    fn shrink_with_and_scans_keeps_black() {
        let mut src = dib(4, 1, 8);
        for (x, value) in [0xff, 0x00, 0xff, 0xff].into_iter().enumerate() {
            src.write_pixel(x as i32, 0, value);
        }

        let params = math::calc_1d_stretch_params(0, 2, 0..2, 0, 4, 0..4).unwrap();
        let mut dst = dib(2, 1, 8);
        shrink_row(
            &mut dst,
            Point::new(params.dst_start, 0),
            &src,
            Point::new(params.src_start, 0),
            &params,
            StretchMode::AndScans,
            false,
        );
        assert_eq!([dst.read_pixel(0, 0), dst.read_pixel(1, 0)], [0x00, 0xff]);
    }

    #[test]
    fn halftone_of_a_single_color_is_that_color() {
        let mut src = dib(3, 3, 32);
        let bounds = src.bounds();
        solid_rects(&mut src, &[bounds], 0, 0x00406080);

        let mut dst = dib(7, 5, 32);
        halftone(
            &mut dst,
            &Rectangle::new(0, 0, 7, 5),
            &src,
            &Rectangle::new(0, 0, 3, 3),
        );
        assert!((0..5).all(|y| (0..7).all(|x| dst.read_pixel(x, y) == 0x00406080)));
    }

    #[test]
    fn halftone_interpolates() {
        let mut src = dib(2, 1, 32);
        src.write_pixel(1, 0, 0x00ffffff);

        let mut dst = dib(4, 1, 32);
        halftone(
            &mut dst,
            &Rectangle::new(0, 0, 4, 1),
            &src,
            &Rectangle::new(0, 0, 2, 1),
        );

        let row: Vec<_> = (0..4).map(|x| dst.read_pixel(x, 0) & 0xff).collect();
        assert_eq!(row[0], 0);
        assert_eq!(row[3], 0xff);
        assert!(row[1] > 0 && row[1] < row[2] && row[2] < 0xff);
    }
}
