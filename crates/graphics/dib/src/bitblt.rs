//! Blit orchestration
//!
//! These functions sit between the drawing device and the kernels: they validate
//! formats, clip, pick the copy direction for overlapping blits and decide whether
//! a raster operation needs the full [execute_rop] machinery.

use math::{calc_1d_stretch_params, Point, Rectangle};

use crate::{
    clip::{get_clipped_rects, ClippedRects, Region},
    format::MASKS_888,
    primitives::{BlendFunction, GradientMode, Overlap, StretchMode, TriVertex},
    rop::{execute_rop, PatternSource, Rop3},
    BitmapInfo, BlitError, Bits, DibInfo, Rop2,
};

/// Where the source pixels of a blit come from
#[derive(Clone, Copy, Debug)]
pub enum BlitSource<'s, 'a> {
    /// The operation does not read a source
    None,

    /// A rectangle of another bitmap
    Dib(&'s DibInfo<'a>, Rectangle),

    /// A rectangle of the destination itself
    Dst(Rectangle),
}

/// The direction in which a copy within one bitmap must proceed
///
/// Returns an empty set if the rectangles do not overlap.
#[must_use]
pub fn get_overlap(dst_rect: &Rectangle, src_rect: &Rectangle) -> Overlap {
    if dst_rect.intersection(src_rect).is_none() {
        return Overlap::empty();
    }

    let mut overlap = Overlap::empty();
    if dst_rect.top < src_rect.top {
        overlap |= Overlap::ABOVE;
    } else if dst_rect.top > src_rect.top {
        overlap |= Overlap::BELOW;
    }

    if dst_rect.left < src_rect.left {
        overlap |= Overlap::LEFT;
    } else if dst_rect.left > src_rect.left {
        overlap |= Overlap::RIGHT;
    }
    overlap
}

/// Order banded clip rectangles so that no rectangle overwrites the source of a later one
fn order_for_overlap(rects: &mut ClippedRects, overlap: Overlap) {
    let below = overlap.contains(Overlap::BELOW);
    let right = overlap.contains(Overlap::RIGHT);

    if below {
        rects.reverse();

        // Bottom to top, but still left to right within a band
        if !right {
            for band in rects.chunk_by_mut(|a, b| a.top == b.top) {
                band.reverse();
            }
        }
    } else if right {
        for band in rects.chunk_by_mut(|a, b| a.top == b.top) {
            band.reverse();
        }
    }
}

/// Intersect a same-sized pair of rectangles with the bounds of their bitmaps
///
/// Both rectangles shrink by the same amount. Returns `None` if nothing is left.
#[must_use]
pub fn intersect_vis_rectangles(
    dst_bounds: &Rectangle,
    dst_rect: &Rectangle,
    src_bounds: &Rectangle,
    src_rect: &Rectangle,
) -> Option<(Rectangle, Rectangle)> {
    let offset = dst_rect.top_left() - src_rect.top_left();

    let dst = dst_rect
        .intersection(dst_bounds)?
        .intersection(&src_rect.offset_by(offset))?
        .intersection(&src_bounds.offset_by(offset))?;
    Some((dst, dst.offset_by(-offset)))
}

/// Copy a rectangle with a binary raster operation
///
/// A 1 bpp source drawn onto a deeper destination selects between the two colors of
/// its color table. Other sources must have the same format as `dst`.
pub fn copy_rect(
    dst: &mut DibInfo<'_>,
    dst_rect: &Rectangle,
    src: BlitSource<'_, '_>,
    clip: Option<&Region>,
    rop2: Rop2,
) -> Result<(), BlitError> {
    let funcs = dst.funcs();

    let (and, xor) = match rop2 {
        Rop2::Nop => return Ok(()),
        Rop2::Black => (0, 0),
        Rop2::White => (0, !0),
        Rop2::Not => (!0, !0),
        _ => {
            return match src {
                BlitSource::None => {
                    log::warn!("{rop2:?} needs a source");
                    Err(BlitError::InvalidParameter)
                },
                BlitSource::Dib(src, src_rect) => {
                    copy_from(dst, dst_rect, src, &src_rect, clip, rop2)
                },
                BlitSource::Dst(src_rect) => {
                    let overlap = get_overlap(dst_rect, &src_rect);
                    let mut rects = get_clipped_rects(dst, Some(dst_rect), clip);
                    order_for_overlap(&mut rects, overlap);

                    for rect in &rects {
                        let origin = src_rect.top_left() + (rect.top_left() - dst_rect.top_left());
                        funcs.copy_rect(dst, rect, None, origin, rop2, overlap);
                    }
                    Ok(())
                },
            };
        },
    };

    let rects = get_clipped_rects(dst, Some(dst_rect), clip);
    funcs.solid_rects(dst, &rects, and, xor);
    Ok(())
}

fn copy_from(
    dst: &mut DibInfo<'_>,
    dst_rect: &Rectangle,
    src: &DibInfo<'_>,
    src_rect: &Rectangle,
    clip: Option<&Region>,
    rop2: Rop2,
) -> Result<(), BlitError> {
    let funcs = dst.funcs();
    let use_mask = src.bit_count() == 1 && dst.bit_count() != 1;

    if !use_mask && !dst.same_format(src) {
        log::debug!(
            "Cannot copy {} bpp into {} bpp without conversion",
            src.bit_count(),
            dst.bit_count()
        );
        return Err(BlitError::FormatMismatch);
    }

    for rect in get_clipped_rects(dst, Some(dst_rect), clip) {
        let origin = src_rect.top_left() + (rect.top_left() - dst_rect.top_left());
        if use_mask {
            funcs.mask_rect(dst, &rect, src, origin, rop2);
        } else {
            funcs.copy_rect(dst, &rect, Some(src), origin, rop2, Overlap::empty());
        }
    }
    Ok(())
}

/// Run any ternary raster operation
///
/// Operations without a pattern go straight to [copy_rect], everything else goes
/// through [execute_rop]. Rectangles must already be clipped to their bitmaps.
pub fn blit(
    dst: &mut DibInfo<'_>,
    dst_rect: &Rectangle,
    src: BlitSource<'_, '_>,
    clip: Option<&Region>,
    rop: Rop3,
    pattern: &mut dyn PatternSource,
    brush_origin: Point,
) -> Result<(), BlitError> {
    if !rop.uses_pat() {
        return copy_rect(dst, dst_rect, src, clip, rop.src_rop2());
    }

    let rects = get_clipped_rects(dst, Some(dst_rect), clip);
    if rects.is_empty() {
        return Ok(());
    }

    match src {
        BlitSource::None => execute_rop(dst, dst_rect, &rects, None, pattern, brush_origin, rop),
        BlitSource::Dib(src, src_rect) => {
            if !dst.same_format(src) {
                return Err(BlitError::FormatMismatch);
            }
            execute_rop(
                dst,
                dst_rect,
                &rects,
                Some((src, src_rect)),
                pattern,
                brush_origin,
                rop,
            )
        },
        BlitSource::Dst(src_rect) => {
            // The interpreter needs the source separate from the destination
            let (width, height) = (src_rect.width(), src_rect.height());
            let mut copy = dst.allocate_like(width, height)?;
            copy.funcs().copy_rect(
                &mut copy,
                &Rectangle::new(0, 0, width, height),
                Some(&*dst),
                src_rect.top_left(),
                Rop2::CopyPen,
                Overlap::empty(),
            );
            let copy_rect = copy.bounds();
            execute_rop(
                dst,
                dst_rect,
                &rects,
                Some((&copy, copy_rect)),
                pattern,
                brush_origin,
                rop,
            )
        },
    }
}

/// Draw an image supplied by the caller
///
/// The image must already be in the format of `dst`, otherwise the caller is asked
/// to convert it. `src_rect` and `dst_rect` must have the same size.
pub fn put_image(
    dst: &mut DibInfo<'_>,
    dst_rect: &Rectangle,
    info: &BitmapInfo,
    bits: &[u8],
    src_rect: &Rectangle,
    clip: Option<&Region>,
    rop: Rop3,
    pattern: &mut dyn PatternSource,
    brush_origin: Point,
) -> Result<(), BlitError> {
    if !dst.matches_bitmap_info(info) {
        log::debug!(
            "Image with {} bpp does not match the {} destination",
            info.bit_count,
            dst.funcs().name()
        );
        return Err(BlitError::FormatMismatch);
    }

    if src_rect.width() != dst_rect.width() || src_rect.height() != dst_rect.height() {
        return Err(BlitError::TransformNotSupported);
    }

    let mut src = DibInfo::new(info, Bits::ReadOnly(bits))?;
    if info.color_table.is_empty() && dst.bit_count() <= 8 {
        src.set_color_table(dst.color_table().to_vec());
    }

    let Some((dst_rect, src_rect)) =
        intersect_vis_rectangles(&dst.bounds(), dst_rect, &src.bounds(), src_rect)
    else {
        return Ok(());
    };

    blit(
        dst,
        &dst_rect,
        BlitSource::Dib(&src, src_rect),
        clip,
        rop,
        pattern,
        brush_origin,
    )
}

/// Convert part of a bitmap into a newly allocated one
///
/// The size of `dst_info` is replaced by the size of `src_rect`.
pub fn convert_bits(
    src: &DibInfo<'_>,
    src_rect: &Rectangle,
    dst_info: &BitmapInfo,
    dither: bool,
) -> Result<DibInfo<'static>, BlitError> {
    let src_rect = src_rect
        .intersection(&src.bounds())
        .ok_or(BlitError::InvalidParameter)?;

    let mut info = dst_info.clone();
    info.width = src_rect.width();
    info.height = -src_rect.height();

    let mut dst = DibInfo::allocate(&info)?;
    dst.funcs().convert_to(&mut dst, src, &src_rect, dither);
    Ok(dst)
}

/// Start and signed length of one axis of a rectangle
///
/// A rectangle with a negative extent covers the same pixels as its normalized form,
/// in reverse order.
fn axis(start: i32, end: i32) -> (i32, i32) {
    if end < start {
        (start - 1, end - start)
    } else {
        (start, end - start)
    }
}

/// Resample `src_rect` of `src` into `dst_rect` of `dst`
///
/// Negative extents mirror the image. Only the part of `dst_rect` within the bounds
/// of `dst` is written. Apart from [StretchMode::Halftone], both bitmaps must share
/// their format.
pub fn stretch_bits(
    dst: &mut DibInfo<'_>,
    dst_rect: &Rectangle,
    src: &DibInfo<'_>,
    src_rect: &Rectangle,
    mode: StretchMode,
) -> Result<(), BlitError> {
    let funcs = dst.funcs();

    if mode == StretchMode::Halftone {
        funcs.halftone(dst, dst_rect, src, src_rect);
        return Ok(());
    }

    if !dst.same_format(src) {
        return Err(BlitError::FormatMismatch);
    }

    let dst_bounds = dst.bounds();
    let src_bounds = src.bounds();

    let (dst_y, dst_height) = axis(dst_rect.top, dst_rect.bottom);
    let (src_y, src_height) = axis(src_rect.top, src_rect.bottom);
    let (dst_x, dst_width) = axis(dst_rect.left, dst_rect.right);
    let (src_x, src_width) = axis(src_rect.left, src_rect.right);

    let Some(vertical) = calc_1d_stretch_params(
        dst_y,
        dst_height,
        dst_bounds.top..dst_bounds.bottom,
        src_y,
        src_height,
        src_bounds.top..src_bounds.bottom,
    ) else {
        return Ok(());
    };
    let Some(horizontal) = calc_1d_stretch_params(
        dst_x,
        dst_width,
        dst_bounds.left..dst_bounds.right,
        src_x,
        src_width,
        src_bounds.left..src_bounds.right,
    ) else {
        return Ok(());
    };

    let draw_row = |dst: &mut DibInfo<'_>, dst_y: i32, src_y: i32, keep_dst: bool| {
        let dst_start = Point::new(horizontal.dst_start, dst_y);
        let src_start = Point::new(horizontal.src_start, src_y);
        if horizontal.is_stretch {
            funcs.stretch_row(dst, dst_start, src, src_start, &horizontal, mode, keep_dst);
        } else {
            funcs.shrink_row(dst, dst_start, src, src_start, &horizontal, mode, keep_dst);
        }
    };

    // The destination pixels touched by a single row
    let (row_left, row_right) = if horizontal.dst_inc > 0 {
        (horizontal.dst_start, horizontal.dst_end)
    } else {
        (horizontal.dst_end + 1, horizontal.dst_start + 1)
    };

    let mut err = vertical.err_start;
    let mut dst_y = vertical.dst_start;
    let mut src_y = vertical.src_start;

    if vertical.is_stretch {
        let mut last_row: Option<(i32, i32)> = None;

        for _ in 0..vertical.length {
            match last_row {
                Some((last_dst_y, last_src_y)) if last_src_y == src_y => {
                    let row = Rectangle::new(row_left, dst_y, row_right, dst_y + 1);
                    let origin = Point::new(row_left, last_dst_y);
                    funcs.copy_rect(dst, &row, None, origin, Rop2::CopyPen, Overlap::empty());
                },
                _ => {
                    draw_row(dst, dst_y, src_y, false);
                    last_row = Some((dst_y, src_y));
                },
            }

            dst_y += vertical.dst_inc;
            if err > 0 {
                src_y += vertical.src_inc;
                err += vertical.err_add_1;
            } else {
                err += vertical.err_add_2;
            }
        }
    } else {
        let mut merged_rows = 0;

        for _ in 0..vertical.length {
            let keep_dst = merged_rows > 0 && mode != StretchMode::DeleteScans;
            draw_row(dst, dst_y, src_y, keep_dst);
            merged_rows += 1;

            src_y += vertical.src_inc;
            if err > 0 {
                dst_y += vertical.dst_inc;
                merged_rows = 0;
                err += vertical.err_add_1;
            } else {
                err += vertical.err_add_2;
            }
        }
    }

    Ok(())
}

/// Alpha blend `src_rect` of `src` into `dst_rect`
///
/// Sources that are not 32 bpp are converted first, which is only allowed if the
/// blend does not use per-pixel alpha.
pub fn blend_bits(
    dst: &mut DibInfo<'_>,
    dst_rect: &Rectangle,
    src: &DibInfo<'_>,
    src_rect: &Rectangle,
    clip: Option<&Region>,
    blend: BlendFunction,
) -> Result<(), BlitError> {
    if blend.has_src_alpha && src.bit_count() != 32 {
        log::warn!("Per-pixel alpha needs a 32 bpp source, not {} bpp", src.bit_count());
        return Err(BlitError::InvalidParameter);
    }

    if src_rect.width() != dst_rect.width() || src_rect.height() != dst_rect.height() {
        return Err(BlitError::TransformNotSupported);
    }

    let Some((dst_rect, src_rect)) =
        intersect_vis_rectangles(&dst.bounds(), dst_rect, &src.bounds(), src_rect)
    else {
        return Ok(());
    };

    let converted;
    let (src, src_rect) = if src.bit_count() == 32 && src.masks() == MASKS_888 {
        (src, src_rect)
    } else {
        let info = BitmapInfo::new(src_rect.width(), -src_rect.height(), 32);
        converted = convert_bits(src, &src_rect, &info, false)?;
        (&converted, converted.bounds())
    };

    let funcs = dst.funcs();
    for rect in get_clipped_rects(dst, Some(&dst_rect), clip) {
        let origin = src_rect.top_left() + (rect.top_left() - dst_rect.top_left());
        funcs.blend_rect(dst, &rect, src, origin, blend);
    }
    Ok(())
}

/// Fill rectangles or triangles with gradients
///
/// `mesh` holds two vertex indices per rectangle or three per triangle. Shapes without
/// an area are skipped, the return value tells whether anything was drawn.
pub fn gradient_fill(
    dst: &mut DibInfo<'_>,
    vertices: &[TriVertex],
    mesh: &[usize],
    mode: GradientMode,
    clip: Option<&Region>,
) -> Result<bool, BlitError> {
    let funcs = dst.funcs();
    let per_shape = if mode == GradientMode::Triangle { 3 } else { 2 };

    let lookup = |index: usize| {
        vertices.get(index).copied().ok_or_else(|| {
            log::warn!("Gradient vertex {index} does not exist");
            BlitError::InvalidParameter
        })
    };

    let mut drawn = false;
    for shape in mesh.chunks_exact(per_shape) {
        let shape = shape
            .iter()
            .map(|&index| lookup(index))
            .collect::<Result<Vec<_>, _>>()?;

        let mut bounds = Rectangle::new(shape[0].x, shape[0].y, shape[0].x, shape[0].y);
        for vertex in &shape[1..] {
            bounds.left = bounds.left.min(vertex.x);
            bounds.top = bounds.top.min(vertex.y);
            bounds.right = bounds.right.max(vertex.x);
            bounds.bottom = bounds.bottom.max(vertex.y);
        }

        let mut ordered = shape;
        match mode {
            GradientMode::RectH => ordered.sort_by_key(|vertex| vertex.x),
            GradientMode::RectV => ordered.sort_by_key(|vertex| vertex.y),
            GradientMode::Triangle => {},
        }

        for rect in get_clipped_rects(dst, Some(&bounds), clip) {
            if funcs.gradient_rect(dst, &rect, &ordered, mode) {
                drawn = true;
            } else {
                log::debug!("Nothing drawn for the gradient at {bounds:?}");
                break;
            }
        }
    }
    Ok(drawn)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ColorRef;

    fn numbered(width: i32, height: i32) -> DibInfo<'static> {
        let mut dib = DibInfo::allocate(&BitmapInfo::new(width, height, 8)).unwrap();
        for y in 0..height {
            for x in 0..width {
                dib.write_pixel(x, y, (y * width + x) as u32);
            }
        }
        dib
    }

    #[test]
    fn overlap_directions() {
        let src = Rectangle::new(2, 2, 6, 6);
        assert_eq!(get_overlap(&Rectangle::new(1, 1, 5, 5), &src), Overlap::ABOVE | Overlap::LEFT);
        assert_eq!(get_overlap(&Rectangle::new(3, 3, 7, 7), &src), Overlap::BELOW | Overlap::RIGHT);
        assert_eq!(get_overlap(&Rectangle::new(2, 3, 6, 7), &src), Overlap::BELOW);
        assert_eq!(get_overlap(&Rectangle::new(10, 10, 14, 14), &src), Overlap::empty());
    }

    #[test]
    fn clip_order_follows_overlap() {
        let rects: ClippedRects = [
            Rectangle::new(0, 0, 1, 1),
            Rectangle::new(2, 0, 3, 1),
            Rectangle::new(0, 1, 1, 2),
            Rectangle::new(2, 1, 3, 2),
        ]
        .into_iter()
        .collect();

        let mut below = rects.clone();
        order_for_overlap(&mut below, Overlap::BELOW);
        assert_eq!(
            below.as_slice(),
            &[rects[2], rects[3], rects[0], rects[1]]
        );

        let mut right = rects.clone();
        order_for_overlap(&mut right, Overlap::RIGHT);
        assert_eq!(
            right.as_slice(),
            &[rects[1], rects[0], rects[3], rects[2]]
        );

        let mut both = rects.clone();
        order_for_overlap(&mut both, Overlap::BELOW | Overlap::RIGHT);
        assert_eq!(both.as_slice(), &[rects[3], rects[2], rects[1], rects[0]]);
    }

    #[test]
    fn visible_rectangles_shrink_together() {
        let bounds = Rectangle::new(0, 0, 10, 10);
        let result = intersect_vis_rectangles(
            &bounds,
            &Rectangle::new(-2, 0, 4, 4),
            &bounds,
            &Rectangle::new(5, 5, 11, 9),
        );
        assert_eq!(
            result,
            Some((Rectangle::new(0, 0, 3, 4), Rectangle::new(7, 5, 10, 9)))
        );
    }

    #[test]
    fn format_mismatch_is_reported() {
        let mut dst = DibInfo::allocate(&BitmapInfo::new(4, 4, 32)).unwrap();
        let src = DibInfo::allocate(&BitmapInfo::new(4, 4, 24)).unwrap();
        let rect = Rectangle::new(0, 0, 4, 4);

        assert_eq!(
            copy_rect(&mut dst, &rect, BlitSource::Dib(&src, rect), None, Rop2::CopyPen),
            Err(BlitError::FormatMismatch)
        );

        // Operations that ignore the source never look at its format
        assert_eq!(
            copy_rect(&mut dst, &rect, BlitSource::Dib(&src, rect), None, Rop2::White),
            Ok(())
        );
        assert_eq!(dst.read_pixel(3, 3), 0xffffffff);
    }

    #[test]
    fn put_image_validates_the_header() {
        let mut dst = DibInfo::allocate(&BitmapInfo::new(4, 4, 32)).unwrap();
        let bits = vec![0xff; 64];
        let rect = Rectangle::new(0, 0, 4, 4);
        let mut brush = crate::brush::BrushState::default();

        let mut put = |dst: &mut DibInfo<'_>, info: &BitmapInfo, src_rect: &Rectangle| {
            put_image(
                dst,
                &rect,
                info,
                &bits,
                src_rect,
                None,
                Rop3::SRCCOPY,
                &mut brush,
                Point::ORIGIN,
            )
        };

        assert_eq!(
            put(&mut dst, &BitmapInfo::new(4, 4, 24), &rect),
            Err(BlitError::FormatMismatch)
        );

        let info = BitmapInfo::new(4, 4, 32);
        assert_eq!(
            put(&mut dst, &info, &Rectangle::new(0, 0, 2, 2)),
            Err(BlitError::TransformNotSupported)
        );

        put(&mut dst, &info, &rect).unwrap();
        assert_eq!(dst.read_pixel(2, 1), 0xffffffff);
    }

    #[test]
    fn self_copy_scrolls_up() {
        let mut dib = numbered(4, 4);
        let dst_rect = Rectangle::new(0, 0, 4, 3);
        let src_rect = Rectangle::new(0, 1, 4, 4);
        copy_rect(&mut dib, &dst_rect, BlitSource::Dst(src_rect), None, Rop2::CopyPen).unwrap();

        for y in 0..3 {
            for x in 0..4 {
                assert_eq!(dib.read_pixel(x, y), ((y + 1) * 4 + x) as u32);
            }
        }
    }

    #[test]
    fn stretch_doubles_pixels() {
        let src = numbered(2, 2);
        let mut dst = src.allocate_like(4, 4).unwrap();
        stretch_bits(
            &mut dst,
            &Rectangle::new(0, 0, 4, 4),
            &src,
            &Rectangle::new(0, 0, 2, 2),
            StretchMode::DeleteScans,
        )
        .unwrap();

        for y in 0..4 {
            for x in 0..4 {
                assert_eq!(dst.read_pixel(x, y), ((y / 2) * 2 + x / 2) as u32);
            }
        }
    }

    #[test]
    fn mirrored_stretch() {
        let src = numbered(3, 1);
        let mut dst = src.allocate_like(3, 1).unwrap();
        stretch_bits(
            &mut dst,
            &Rectangle::new(3, 0, 0, 1),
            &src,
            &Rectangle::new(0, 0, 3, 1),
            StretchMode::DeleteScans,
        )
        .unwrap();

        assert_eq!([0, 1, 2].map(|x| dst.read_pixel(x, 0)), [2, 1, 0]);
    }

    #[test]
    fn and_scans_keep_black() {
        let mut src = DibInfo::allocate(&BitmapInfo::new(2, 2, 1)).unwrap();
        src.write_pixel(1, 1, 0);
        src.write_pixel(0, 0, 1);
        src.write_pixel(1, 0, 1);
        src.write_pixel(0, 1, 1);

        let mut dst = src.allocate_like(1, 1).unwrap();
        stretch_bits(
            &mut dst,
            &Rectangle::new(0, 0, 1, 1),
            &src,
            &Rectangle::new(0, 0, 2, 2),
            StretchMode::AndScans,
        )
        .unwrap();
        assert_eq!(dst.read_pixel(0, 0), 0);

        stretch_bits(
            &mut dst,
            &Rectangle::new(0, 0, 1, 1),
            &src,
            &Rectangle::new(0, 0, 2, 2),
            StretchMode::OrScans,
        )
        .unwrap();
        assert_eq!(dst.read_pixel(0, 0), 1);
    }

    #[test]
    fn blend_converts_the_source() {
        let mut dst = DibInfo::allocate(&BitmapInfo::new(2, 2, 32)).unwrap();
        let mut src = DibInfo::allocate(&BitmapInfo::new(2, 2, 24)).unwrap();
        let white = src.funcs().colorref_to_pixel(&src, ColorRef::WHITE);
        for y in 0..2 {
            for x in 0..2 {
                src.write_pixel(x, y, white);
            }
        }

        let rect = Rectangle::new(0, 0, 2, 2);
        let blend = BlendFunction {
            source_constant_alpha: 0xff,
            has_src_alpha: true,
        };
        assert_eq!(
            blend_bits(&mut dst, &rect, &src, &rect, None, blend),
            Err(BlitError::InvalidParameter)
        );

        let blend = BlendFunction {
            source_constant_alpha: 0xff,
            has_src_alpha: false,
        };
        blend_bits(&mut dst, &rect, &src, &rect, None, blend).unwrap();
        assert_eq!(dst.read_pixel(1, 1) & 0x00ffffff, 0x00ffffff);
    }

    #[test]
    fn gradients_skip_degenerate_shapes() {
        let mut dst = DibInfo::allocate(&BitmapInfo::new(8, 8, 32)).unwrap();
        let vertex = |x, y| TriVertex {
            x,
            y,
            red: 0xff00,
            ..Default::default()
        };
        let vertices = [vertex(0, 0), vertex(4, 4), vertex(8, 8)];

        let mut fill = |mesh: &[usize], mode| gradient_fill(&mut dst, &vertices, mesh, mode, None);
        assert_eq!(fill(&[0, 1, 2], GradientMode::Triangle), Ok(false));
        assert_eq!(fill(&[0, 3], GradientMode::RectH), Err(BlitError::InvalidParameter));
        assert_eq!(fill(&[1, 0], GradientMode::RectH), Ok(true));
        assert_eq!(dst.read_pixel(3, 3) & 0xff0000, 0xff0000);
        assert_eq!(dst.read_pixel(5, 5), 0);
    }

    #[test]
    fn gradients_on_layouts_without_kernels() {
        let mut dst = DibInfo::allocate(&BitmapInfo::new(8, 8, 2)).unwrap();
        assert_eq!(dst.funcs().name(), "null");

        let vertices = [
            TriVertex::default(),
            TriVertex {
                x: 4,
                y: 4,
                ..Default::default()
            },
        ];
        let drawn = gradient_fill(&mut dst, &vertices, &[0, 1], GradientMode::RectH, None);
        assert_eq!(drawn, Ok(false));
        assert!(dst.bits().iter().all(|&byte| byte == 0));
    }
}
