//! The drawing state of one device context on top of a [DibInfo]
//!
//! A [DibDevice] owns the target bitmap together with everything that influences how
//! drawing calls end up in it: the clip region, the selected brush, pen and font, the
//! binary raster operation and the various colors and modes. Every operation clips,
//! updates the bounds accumulator and hands the actual pixel work to the orchestration
//! functions in [bitblt](crate::bitblt), [brush](crate::brush), [pen](crate::pen) and
//! [text](crate::text).

use font::FontHandle;
use math::{
    arc_points, ellipse_points, fill_polygon_spans, ArcDirection, FillMode, Point, Rectangle,
};

use crate::{
    bitblt::{self, BlitSource},
    brush::{BackgroundMode, BrushState, BrushStyle},
    clip::{get_clipped_rects, BoundsTracker, Region},
    pen::{Pen, PenState, PenStyle},
    primitives::{BlendFunction, GradientMode, Overlap, StretchMode, TriVertex},
    rop::Rop3,
    text::{self, TextOptions},
    BitmapInfo, BlitError, ColorRef, DibInfo, Rop2,
};

#[derive(Debug)]
pub struct DibDevice<'a> {
    dib: DibInfo<'a>,
    clip: Option<Region>,
    brush: BrushState,
    pen: PenState,
    font: Option<FontHandle>,
    rop2: Rop2,
    background_mode: BackgroundMode,
    background_color: ColorRef,
    text_color: ColorRef,
    brush_origin: Point,
    stretch_mode: StretchMode,
    arc_direction: ArcDirection,
    fill_mode: FillMode,
    current_position: Point,
    bounds: BoundsTracker,
}

/// The bounding box of `points`, grown by `margin` on every side
fn point_bounds(points: &[Point], margin: i32) -> Option<Rectangle> {
    let first = points.first()?;
    let mut bounds = Rectangle::new(first.x, first.y, first.x, first.y);
    for point in &points[1..] {
        bounds.left = bounds.left.min(point.x);
        bounds.top = bounds.top.min(point.y);
        bounds.right = bounds.right.max(point.x);
        bounds.bottom = bounds.bottom.max(point.y);
    }

    Some(Rectangle::new(
        bounds.left - margin,
        bounds.top - margin,
        bounds.right + margin + 1,
        bounds.bottom + margin + 1,
    ))
}

/// Turn a point into coordinates relative to the center of `rect`, doubled to stay exact
fn relative_to_center(rect: &Rectangle, point: Point) -> Point {
    Point::new(
        2 * point.x - (rect.left + rect.right - 1),
        2 * point.y - (rect.top + rect.bottom - 1),
    )
}

impl<'a> DibDevice<'a> {
    /// A device with the default state: white solid brush, black cosmetic pen, [Rop2::CopyPen]
    #[must_use]
    pub fn new(dib: DibInfo<'a>) -> Self {
        Self {
            dib,
            clip: None,
            brush: BrushState::default(),
            pen: PenState::default(),
            font: None,
            rop2: Rop2::CopyPen,
            background_mode: BackgroundMode::Opaque,
            background_color: ColorRef::WHITE,
            text_color: ColorRef::BLACK,
            brush_origin: Point::ORIGIN,
            stretch_mode: StretchMode::default(),
            arc_direction: ArcDirection::default(),
            fill_mode: FillMode::default(),
            current_position: Point::ORIGIN,
            bounds: BoundsTracker::default(),
        }
    }

    #[must_use]
    pub fn dib(&self) -> &DibInfo<'a> {
        &self.dib
    }

    #[must_use]
    pub fn dib_mut(&mut self) -> &mut DibInfo<'a> {
        &mut self.dib
    }

    #[must_use]
    pub fn into_dib(self) -> DibInfo<'a> {
        self.dib
    }

    /// Restrict drawing to `clip`, `None` allows the whole bitmap
    pub fn set_clip(&mut self, clip: Option<Region>) {
        self.clip = clip;
    }

    #[must_use]
    pub fn clip(&self) -> Option<&Region> {
        self.clip.as_ref()
    }

    pub fn select_brush(&mut self, style: BrushStyle) {
        self.brush.select(style);
    }

    pub fn select_pen(&mut self, pen: Pen) {
        self.pen.select(pen);
    }

    #[must_use]
    pub fn pen(&self) -> &Pen {
        self.pen.pen()
    }

    /// Select the font for [ext_text_out](Self::ext_text_out), returning the previous one
    pub fn select_font(&mut self, font: Option<FontHandle>) -> Option<FontHandle> {
        std::mem::replace(&mut self.font, font)
    }

    pub fn set_rop2(&mut self, rop2: Rop2) {
        self.rop2 = rop2;
    }

    #[must_use]
    pub fn rop2(&self) -> Rop2 {
        self.rop2
    }

    pub fn set_background_mode(&mut self, mode: BackgroundMode) {
        self.background_mode = mode;
    }

    pub fn set_background_color(&mut self, color: ColorRef) {
        self.background_color = color;
    }

    pub fn set_text_color(&mut self, color: ColorRef) {
        self.text_color = color;
    }

    pub fn set_brush_origin(&mut self, origin: Point) {
        self.brush_origin = origin;
    }

    pub fn set_stretch_mode(&mut self, mode: StretchMode) {
        self.stretch_mode = mode;
    }

    pub fn set_arc_direction(&mut self, direction: ArcDirection) {
        self.arc_direction = direction;
    }

    pub fn set_fill_mode(&mut self, mode: FillMode) {
        self.fill_mode = mode;
    }

    #[must_use]
    pub fn current_position(&self) -> Point {
        self.current_position
    }

    pub fn move_to(&mut self, point: Point) {
        self.current_position = point;
    }

    #[must_use]
    pub fn bounds(&self) -> &BoundsTracker {
        &self.bounds
    }

    #[must_use]
    pub fn bounds_mut(&mut self) -> &mut BoundsTracker {
        &mut self.bounds
    }

    /// The color that fills gaps in dashes, hatches and text, if any
    fn gap_color(&self) -> Option<ColorRef> {
        match self.background_mode {
            BackgroundMode::Opaque => Some(self.background_color),
            BackgroundMode::Transparent => None,
        }
    }

    fn sync_brush(&mut self) {
        self.brush
            .set_colors(self.text_color, self.background_color, self.background_mode);
    }

    fn add_bounds(&mut self, rect: &Rectangle) {
        self.bounds.add_clipped_bounds(rect, self.clip.as_ref());
    }

    /// Half the pen width, rounded up, which is how far a line may extend past its points
    fn pen_margin(&self) -> i32 {
        let width = self.pen.pen().width.max(1) as i32;
        width / 2 + 1
    }

    /// Fill `rect` with the brush, combined with the destination through `rop`
    ///
    /// Operations that read a source are rejected.
    pub fn pat_blt(&mut self, rect: &Rectangle, rop: Rop3) -> Result<(), BlitError> {
        if rop.uses_src() {
            log::warn!("{rop:?} needs a source, which a pattern blit does not have");
            return Err(BlitError::InvalidParameter);
        }

        let rect = rect.normalized();
        self.add_bounds(&rect);
        self.sync_brush();
        bitblt::blit(
            &mut self.dib,
            &rect,
            BlitSource::None,
            self.clip.as_ref(),
            rop,
            &mut self.brush,
            self.brush_origin,
        )
    }

    /// Fill rectangles with the brush and the current binary raster operation
    pub fn fill_rects(&mut self, rects: &[Rectangle]) -> Result<(), BlitError> {
        let rects: Vec<Rectangle> = rects.iter().map(Rectangle::normalized).collect();
        for rect in &rects {
            self.add_bounds(rect);
        }

        self.sync_brush();
        self.brush.fill_rects(
            &mut self.dib,
            &rects,
            self.clip.as_ref(),
            self.rop2,
            self.brush_origin,
        )
    }

    /// Fill a region with the brush
    pub fn paint_rgn(&mut self, region: &Region) -> Result<(), BlitError> {
        self.fill_rects(region.rects())
    }

    /// Combine `color` into one pixel, returning the color that the pixel format can hold
    ///
    /// Returns `None` if the pixel is clipped away.
    pub fn set_pixel(&mut self, x: i32, y: i32, color: ColorRef) -> Option<ColorRef> {
        let rect = Rectangle::new(x, y, x + 1, y + 1);
        let funcs = self.dib.funcs();
        let pixel = funcs.colorref_to_pixel(&self.dib, color);

        let rects = get_clipped_rects(&self.dib, Some(&rect), self.clip.as_ref());
        if rects.is_empty() {
            return None;
        }

        self.add_bounds(&rect);
        let (and, xor) = self.rop2.codes().and_xor(pixel);
        funcs.solid_rects(&mut self.dib, &rects, and, xor);
        Some(funcs.pixel_to_colorref(&self.dib, pixel))
    }

    /// The color of a pixel, `None` outside of the bitmap
    #[must_use]
    pub fn get_pixel(&self, x: i32, y: i32) -> Option<ColorRef> {
        if !self.dib.bounds().contains_point(Point::new(x, y)) {
            return None;
        }

        let funcs = self.dib.funcs();
        let pixel = funcs.get_pixel(&self.dib, x, y);
        Some(funcs.pixel_to_colorref(&self.dib, pixel))
    }

    /// Draw a line from the current position to `point`, which becomes the new current position
    ///
    /// `point` itself is not drawn.
    pub fn line_to(&mut self, point: Point) -> Result<(), BlitError> {
        let start = self.current_position;
        self.current_position = point;
        self.polyline(&[start, point])
    }

    fn draw_outline(&mut self, points: &[Point], closed: bool) -> Result<(), BlitError> {
        if self.pen.is_null() || points.is_empty() {
            return Ok(());
        }

        if let Some(bounds) = point_bounds(points, self.pen_margin()) {
            self.add_bounds(&bounds);
        }

        let background = self.gap_color();
        self.pen.draw_polyline(
            &mut self.dib,
            points,
            closed,
            self.clip.as_ref(),
            self.rop2,
            background,
        )
    }

    fn fill_spans(&mut self, spans: &[Rectangle]) -> Result<(), BlitError> {
        if self.brush.is_null() || spans.is_empty() {
            return Ok(());
        }

        for span in spans {
            self.add_bounds(span);
        }

        self.sync_brush();
        self.brush.fill_rects(
            &mut self.dib,
            spans,
            self.clip.as_ref(),
            self.rop2,
            self.brush_origin,
        )
    }

    pub fn polyline(&mut self, points: &[Point]) -> Result<(), BlitError> {
        if points.len() < 2 {
            return Ok(());
        }
        self.draw_outline(points, false)
    }

    pub fn polygon(&mut self, points: &[Point]) -> Result<(), BlitError> {
        self.poly_polygon(points, &[points.len()])
    }

    /// Fill several polygons at once with the current fill mode, then outline each of them
    pub fn poly_polygon(&mut self, points: &[Point], counts: &[usize]) -> Result<(), BlitError> {
        let spans = fill_polygon_spans(points, counts, self.fill_mode);
        self.fill_spans(&spans)?;

        let mut offset = 0;
        for &count in counts {
            let Some(polygon) = points.get(offset..offset + count) else {
                break;
            };
            self.draw_outline(polygon, true)?;
            offset += count;
        }
        Ok(())
    }

    /// The rectangle that a shape is inscribed in, shrunk for inside-frame pens
    fn frame_rect(&self, rect: &Rectangle) -> Rectangle {
        let rect = rect.normalized();
        let pen = self.pen.pen();
        if pen.style != PenStyle::InsideFrame || !pen.is_wide() {
            return rect;
        }

        let inset = pen.width as i32 / 2;
        Rectangle::new(
            rect.left + inset,
            rect.top + inset,
            (rect.right - inset).max(rect.left + inset),
            (rect.bottom - inset).max(rect.top + inset),
        )
    }

    pub fn rectangle(&mut self, rect: &Rectangle) -> Result<(), BlitError> {
        let rect = self.frame_rect(rect);
        if rect.is_empty() {
            return Ok(());
        }

        let interior = if self.pen.is_null() {
            rect
        } else {
            Rectangle::new(rect.left + 1, rect.top + 1, rect.right - 1, rect.bottom - 1)
        };
        if !interior.is_empty() {
            self.fill_spans(&[interior])?;
        }

        let (right, bottom) = (rect.right - 1, rect.bottom - 1);
        let corners = [
            Point::new(rect.left, rect.top),
            Point::new(right, rect.top),
            Point::new(right, bottom),
            Point::new(rect.left, bottom),
        ];
        self.draw_outline(&corners, true)
    }

    pub fn ellipse(&mut self, rect: &Rectangle) -> Result<(), BlitError> {
        let rect = self.frame_rect(rect);
        let outline = ellipse_points(&rect);
        if outline.is_empty() {
            return Ok(());
        }

        // Each row runs between the leftmost and the rightmost outline point on it
        let mut rows: Vec<(i32, i32)> = vec![(i32::MAX, i32::MIN); rect.height() as usize];
        for point in &outline {
            let row = &mut rows[(point.y - rect.top) as usize];
            row.0 = row.0.min(point.x);
            row.1 = row.1.max(point.x);
        }

        let inset = i32::from(!self.pen.is_null());
        let spans: Vec<Rectangle> = rows
            .iter()
            .zip(rect.top..)
            .filter(|((left, right), _)| left <= right)
            .map(|(&(left, right), y)| Rectangle::new(left + inset, y, right + 1 - inset, y + 1))
            .filter(|span| !span.is_empty())
            .collect();

        self.fill_spans(&spans)?;
        self.draw_outline(&outline, true)
    }

    fn fill_and_outline(&mut self, outline: &[Point]) -> Result<(), BlitError> {
        if outline.len() < 3 {
            return self.draw_outline(outline, false);
        }

        let spans = fill_polygon_spans(outline, &[outline.len()], FillMode::Winding);
        self.fill_spans(&spans)?;
        self.draw_outline(outline, true)
    }

    fn arc_outline(&self, rect: &Rectangle, start: Point, end: Point) -> (Rectangle, Vec<Point>) {
        let rect = self.frame_rect(rect);
        let points = arc_points(
            &rect,
            relative_to_center(&rect, start),
            relative_to_center(&rect, end),
            self.arc_direction,
        );
        (rect, points)
    }

    /// Draw the part of the ellipse in `rect` between the radials through `start` and `end`
    pub fn arc(&mut self, rect: &Rectangle, start: Point, end: Point) -> Result<(), BlitError> {
        let (_, points) = self.arc_outline(rect, start, end);
        self.draw_outline(&points, false)
    }

    /// An arc closed by a straight line between its ends
    pub fn chord(&mut self, rect: &Rectangle, start: Point, end: Point) -> Result<(), BlitError> {
        let (_, points) = self.arc_outline(rect, start, end);
        self.fill_and_outline(&points)
    }

    /// An arc closed by lines from its ends to the center of the ellipse
    pub fn pie(&mut self, rect: &Rectangle, start: Point, end: Point) -> Result<(), BlitError> {
        let (rect, mut points) = self.arc_outline(rect, start, end);
        if points.is_empty() {
            return Ok(());
        }

        points.push(Point::new(
            (rect.left + rect.right) / 2,
            (rect.top + rect.bottom) / 2,
        ));
        self.fill_and_outline(&points)
    }

    /// Bring a source into the format of the destination if a raster operation needs that
    fn matching_source(
        &self,
        src: &DibInfo<'_>,
        src_rect: &Rectangle,
        rop: Rop3,
    ) -> Result<Option<DibInfo<'static>>, BlitError> {
        let mask_copy = src.bit_count() == 1 && self.dib.bit_count() != 1 && !rop.uses_pat();
        if !rop.uses_src() || mask_copy || self.dib.same_format(src) {
            return Ok(None);
        }

        log::debug!(
            "Converting {} source to {} for {rop:?}",
            src.funcs().name(),
            self.dib.funcs().name()
        );
        bitblt::convert_bits(src, src_rect, &self.dib.bitmap_info(), false).map(Some)
    }

    /// Combine source, brush and destination with a ternary raster operation
    ///
    /// The source is converted into the destination format if necessary.
    pub fn bit_blt(
        &mut self,
        dst_rect: &Rectangle,
        src: &DibInfo<'_>,
        src_origin: Point,
        rop: Rop3,
    ) -> Result<(), BlitError> {
        if !rop.uses_src() {
            return self.pat_blt(dst_rect, rop);
        }

        let dst_rect = dst_rect.normalized();
        let src_rect =
            Rectangle::from_position_and_size(src_origin, dst_rect.width(), dst_rect.height());
        let Some((dst_rect, src_rect)) =
            bitblt::intersect_vis_rectangles(&self.dib.bounds(), &dst_rect, &src.bounds(), &src_rect)
        else {
            return Ok(());
        };

        let converted = self.matching_source(src, &src_rect, rop)?;
        let (src, src_rect) = match &converted {
            Some(converted) => (converted, converted.bounds()),
            None => (src, src_rect),
        };

        self.add_bounds(&dst_rect);
        self.sync_brush();
        bitblt::blit(
            &mut self.dib,
            &dst_rect,
            BlitSource::Dib(src, src_rect),
            self.clip.as_ref(),
            rop,
            &mut self.brush,
            self.brush_origin,
        )
    }

    /// Like [bit_blt](Self::bit_blt), with the destination bitmap as its own source
    pub fn bit_blt_self(
        &mut self,
        dst_rect: &Rectangle,
        src_origin: Point,
        rop: Rop3,
    ) -> Result<(), BlitError> {
        if !rop.uses_src() {
            return self.pat_blt(dst_rect, rop);
        }

        let dst_rect = dst_rect.normalized();
        let src_rect =
            Rectangle::from_position_and_size(src_origin, dst_rect.width(), dst_rect.height());
        let bounds = self.dib.bounds();
        let Some((dst_rect, src_rect)) =
            bitblt::intersect_vis_rectangles(&bounds, &dst_rect, &bounds, &src_rect)
        else {
            return Ok(());
        };

        self.add_bounds(&dst_rect);
        self.sync_brush();
        bitblt::blit(
            &mut self.dib,
            &dst_rect,
            BlitSource::Dst(src_rect),
            self.clip.as_ref(),
            rop,
            &mut self.brush,
            self.brush_origin,
        )
    }

    /// Resample `src_rect` of `src` into `dst_rect`, then combine it with a raster operation
    ///
    /// Negative extents mirror the image along that axis.
    pub fn stretch_blt(
        &mut self,
        dst_rect: &Rectangle,
        src: &DibInfo<'_>,
        src_rect: &Rectangle,
        rop: Rop3,
    ) -> Result<(), BlitError> {
        if !rop.uses_src() {
            return self.pat_blt(dst_rect, rop);
        }

        let same_size = dst_rect.width() == src_rect.width()
            && dst_rect.height() == src_rect.height()
            && dst_rect.width() > 0
            && dst_rect.height() > 0;
        if same_size {
            return self.bit_blt(dst_rect, src, src_rect.top_left(), rop);
        }

        let target = dst_rect.normalized();
        if target.is_empty() || src_rect.normalized().is_empty() {
            return Ok(());
        }

        // Resample into a scratch bitmap in the destination format first
        let mut scratch = self.dib.allocate_like(target.width(), target.height())?;
        let keep_dst = matches!(self.stretch_mode, StretchMode::AndScans | StretchMode::OrScans);
        if keep_dst {
            if let Some(visible) = target.intersection(&self.dib.bounds()) {
                let offset = -target.top_left();
                scratch.funcs().copy_rect(
                    &mut scratch,
                    &visible.offset_by(offset),
                    Some(&self.dib),
                    visible.top_left(),
                    Rop2::CopyPen,
                    Overlap::empty(),
                );
            }
        }

        let converted;
        let (src, src_rect) =
            if self.stretch_mode == StretchMode::Halftone || self.dib.same_format(src) {
                (src, *src_rect)
            } else {
                converted = bitblt::convert_bits(
                    src,
                    &src_rect.normalized(),
                    &self.dib.bitmap_info(),
                    false,
                )?;
                let bounds = converted.bounds();
                let rect = Rectangle {
                    left: if src_rect.right < src_rect.left { bounds.right } else { 0 },
                    right: if src_rect.right < src_rect.left { 0 } else { bounds.right },
                    top: if src_rect.bottom < src_rect.top { bounds.bottom } else { 0 },
                    bottom: if src_rect.bottom < src_rect.top { 0 } else { bounds.bottom },
                };
                (&converted, rect)
            };

        let (width, height) = (target.width(), target.height());
        let scratch_rect = Rectangle {
            left: if dst_rect.right < dst_rect.left { width } else { 0 },
            right: if dst_rect.right < dst_rect.left { 0 } else { width },
            top: if dst_rect.bottom < dst_rect.top { height } else { 0 },
            bottom: if dst_rect.bottom < dst_rect.top { 0 } else { height },
        };
        bitblt::stretch_bits(&mut scratch, &scratch_rect, src, &src_rect, self.stretch_mode)?;

        self.bit_blt(&target, &scratch, Point::ORIGIN, rop)
    }

    /// Blend `src_rect` of `src` over `dst_rect`, stretching it if the sizes differ
    pub fn alpha_blend(
        &mut self,
        dst_rect: &Rectangle,
        src: &DibInfo<'_>,
        src_rect: &Rectangle,
        blend: BlendFunction,
    ) -> Result<(), BlitError> {
        let dst_rect = dst_rect.normalized();
        let src_rect = src_rect.normalized();
        if dst_rect.is_empty() || src_rect.is_empty() {
            return Ok(());
        }

        if dst_rect.width() == src_rect.width() && dst_rect.height() == src_rect.height() {
            self.add_bounds(&dst_rect);
            return bitblt::blend_bits(
                &mut self.dib,
                &dst_rect,
                src,
                &src_rect,
                self.clip.as_ref(),
                blend,
            );
        }

        let info = BitmapInfo::new(dst_rect.width(), -dst_rect.height(), 32);
        let mut scratch = DibInfo::allocate(&info)?;
        let converted;
        let (src, src_rect) = if src.bit_count() == 32 {
            (src, src_rect)
        } else {
            converted = bitblt::convert_bits(src, &src_rect, &info, false)?;
            (&converted, converted.bounds())
        };

        let mode = match self.stretch_mode {
            StretchMode::Halftone => StretchMode::Halftone,
            _ => StretchMode::DeleteScans,
        };
        let scratch_bounds = scratch.bounds();
        bitblt::stretch_bits(&mut scratch, &scratch_bounds, src, &src_rect, mode)?;

        self.add_bounds(&dst_rect);
        bitblt::blend_bits(
            &mut self.dib,
            &dst_rect,
            &scratch,
            &scratch_bounds,
            self.clip.as_ref(),
            blend,
        )
    }

    /// Returns whether anything was drawn
    pub fn gradient_fill(
        &mut self,
        vertices: &[TriVertex],
        mesh: &[usize],
        mode: GradientMode,
    ) -> Result<bool, BlitError> {
        let points: Vec<Point> = vertices.iter().map(TriVertex::position).collect();
        if let Some(bounds) = point_bounds(&points, 0) {
            self.add_bounds(&bounds);
        }

        bitblt::gradient_fill(&mut self.dib, vertices, mesh, mode, self.clip.as_ref())
    }

    /// Draw text with the selected font in the text color
    ///
    /// Does nothing if no font is selected.
    pub fn ext_text_out(&mut self, origin: Point, text: &[u16], options: &TextOptions<'_>) {
        let Some(font) = &self.font else {
            log::warn!("Drawing text without a selected font");
            return;
        };

        let painted = text::ext_text_out(
            &mut self.dib,
            font,
            origin,
            text,
            options,
            self.clip.as_ref(),
            self.text_color,
        );

        if let Some(painted) = painted {
            self.add_bounds(&painted);
        }
    }

    /// Draw a caller supplied image that is already in the destination format
    pub fn put_image(
        &mut self,
        dst_rect: &Rectangle,
        info: &BitmapInfo,
        bits: &[u8],
        src_rect: &Rectangle,
        rop: Rop3,
    ) -> Result<(), BlitError> {
        self.add_bounds(dst_rect);
        self.sync_brush();
        bitblt::put_image(
            &mut self.dib,
            dst_rect,
            info,
            bits,
            src_rect,
            self.clip.as_ref(),
            rop,
            &mut self.brush,
            self.brush_origin,
        )
    }

    /// Copy the visible part of `rect` into a new top-down bitmap of the same format
    pub fn get_image(&self, rect: &Rectangle) -> Result<DibInfo<'static>, BlitError> {
        let rect = rect
            .normalized()
            .intersection(&self.dib.bounds())
            .ok_or(BlitError::InvalidParameter)?;

        let mut image = self.dib.allocate_like(rect.width(), rect.height())?;
        let image_bounds = image.bounds();
        image.funcs().copy_rect(
            &mut image,
            &image_bounds,
            Some(&self.dib),
            rect.top_left(),
            Rop2::CopyPen,
            Overlap::empty(),
        );
        Ok(image)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brush::HatchStyle;

    fn device(bit_count: u16) -> DibDevice<'static> {
        let dib = DibInfo::allocate(&BitmapInfo::new(16, 16, bit_count)).unwrap();
        DibDevice::new(dib)
    }

    fn color_at(device: &DibDevice<'_>, x: i32, y: i32) -> ColorRef {
        device.get_pixel(x, y).unwrap()
    }

    #[test]
    fn rectangle_fills_inside_its_frame() {
        let mut device = device(32);
        device.pat_blt(&Rectangle::new(0, 0, 16, 16), Rop3::WHITENESS).unwrap();
        device.select_brush(BrushStyle::Solid(ColorRef::rgb(0, 0, 0xff)));
        device.rectangle(&Rectangle::new(2, 2, 8, 6)).unwrap();

        assert_eq!(color_at(&device, 2, 2), ColorRef::BLACK);
        assert_eq!(color_at(&device, 7, 5), ColorRef::BLACK);
        assert_eq!(color_at(&device, 4, 5), ColorRef::BLACK);
        assert_eq!(color_at(&device, 3, 3), ColorRef::rgb(0, 0, 0xff));
        assert_eq!(color_at(&device, 6, 4), ColorRef::rgb(0, 0, 0xff));
        assert_eq!(color_at(&device, 8, 2), ColorRef::WHITE);
        assert_eq!(color_at(&device, 2, 6), ColorRef::WHITE);
        assert_eq!(device.get_pixel(1, 1), Some(ColorRef::WHITE));
        assert_eq!(device.get_pixel(16, 0), None);
    }

    #[test]
    fn line_to_moves_the_current_position() {
        let mut device = device(8);
        device.select_pen(Pen::new(PenStyle::Solid, 0, ColorRef::WHITE));
        device.move_to(Point::new(1, 1));
        device.line_to(Point::new(5, 1)).unwrap();
        device.line_to(Point::new(5, 4)).unwrap();

        assert_eq!(device.current_position(), Point::new(5, 4));
        for x in 1..5 {
            assert_eq!(color_at(&device, x, 1), ColorRef::WHITE);
        }
        assert_eq!(color_at(&device, 5, 3), ColorRef::WHITE);
        assert_eq!(color_at(&device, 5, 4), ColorRef::BLACK);
    }

    #[test]
    fn set_pixel_uses_the_raster_operation() {
        let mut device = device(32);
        device.set_rop2(Rop2::XorPen);

        let color = ColorRef::rgb(0x12, 0x34, 0x56);
        assert_eq!(device.set_pixel(3, 3, color), Some(color));
        assert_eq!(color_at(&device, 3, 3), color);
        device.set_pixel(3, 3, color);
        assert_eq!(color_at(&device, 3, 3), ColorRef::BLACK);

        device.set_clip(Some(Region::from_rect(Rectangle::new(0, 0, 2, 2))));
        assert_eq!(device.set_pixel(3, 3, color), None);
        assert_eq!(device.set_pixel(20, 20, color), None);
    }

    #[test]
    fn polygon_with_a_null_pen() {
        let mut device = device(8);
        device.select_pen(Pen::new(PenStyle::Null, 0, ColorRef::BLACK));
        device
            .polygon(&[Point::new(0, 0), Point::new(4, 0), Point::new(4, 4), Point::new(0, 4)])
            .unwrap();

        assert_eq!(color_at(&device, 0, 0), ColorRef::WHITE);
        assert_eq!(color_at(&device, 3, 3), ColorRef::WHITE);
        assert_eq!(color_at(&device, 4, 3), ColorRef::BLACK);
        assert_eq!(color_at(&device, 3, 4), ColorRef::BLACK);
    }

    #[test]
    fn ellipse_is_symmetric() {
        let mut device = device(8);
        device.select_pen(Pen::new(PenStyle::Null, 0, ColorRef::BLACK));
        device.ellipse(&Rectangle::new(0, 0, 9, 9)).unwrap();

        for y in 0..9 {
            for x in 0..9 {
                assert_eq!(
                    color_at(&device, x, y),
                    color_at(&device, 8 - x, y),
                    "({x}, {y}) differs from its mirror image"
                );
            }
        }
        assert_eq!(color_at(&device, 4, 4), ColorRef::WHITE);
        assert_eq!(color_at(&device, 0, 0), ColorRef::BLACK);
    }

    #[test]
    fn pattern_blit_honors_the_clip_region() {
        let mut device = device(8);
        device.set_clip(Some(Region::from_rect(Rectangle::new(0, 0, 4, 4))));
        device.bounds_mut().set_enabled(true);
        device.pat_blt(&Rectangle::new(2, 2, 10, 10), Rop3::PATCOPY).unwrap();

        assert_eq!(color_at(&device, 3, 3), ColorRef::WHITE);
        assert_eq!(color_at(&device, 4, 4), ColorRef::BLACK);
        assert_eq!(device.bounds().bounds(), Some(Rectangle::new(2, 2, 4, 4)));

        assert_eq!(
            device.pat_blt(&Rectangle::new(0, 0, 4, 4), Rop3::SRCCOPY),
            Err(BlitError::InvalidParameter)
        );
    }

    #[test]
    fn hatched_brush_with_a_transparent_background() {
        let mut device = device(8);
        device.set_background_mode(BackgroundMode::Transparent);
        device.select_brush(BrushStyle::Hatched(HatchStyle::Horizontal, ColorRef::WHITE));
        device.fill_rects(&[Rectangle::new(0, 0, 8, 8)]).unwrap();

        let white_rows = (0..8)
            .filter(|&y| color_at(&device, 0, y) == ColorRef::WHITE)
            .count();
        assert_eq!(white_rows, 1);
    }

    #[test]
    fn blit_converts_the_source() {
        let mut src = DibInfo::allocate(&BitmapInfo::new(4, 4, 24)).unwrap();
        src.write_pixel(1, 1, 0x00ff_00);

        let mut device = device(32);
        device
            .bit_blt(&Rectangle::new(8, 8, 12, 12), &src, Point::ORIGIN, Rop3::SRCCOPY)
            .unwrap();
        assert_eq!(color_at(&device, 9, 9), ColorRef::rgb(0, 0xff, 0));
        assert_eq!(color_at(&device, 8, 8), ColorRef::BLACK);
    }

    #[test]
    fn self_blit_scrolls() {
        let mut device = device(8);
        device.pat_blt(&Rectangle::new(0, 0, 16, 1), Rop3::PATCOPY).unwrap();
        device
            .bit_blt_self(&Rectangle::new(0, 1, 16, 16), Point::new(0, 0), Rop3::SRCCOPY)
            .unwrap();

        // Rows are copied bottom up, so only the first row moves down
        assert_eq!(color_at(&device, 5, 0), ColorRef::WHITE);
        assert_eq!(color_at(&device, 5, 1), ColorRef::WHITE);
        assert_eq!(color_at(&device, 5, 2), ColorRef::BLACK);
    }

    #[test]
    fn stretch_doubles_pixels() {
        let mut src = DibInfo::allocate(&BitmapInfo::new(2, 1, 32)).unwrap();
        src.write_pixel(0, 0, 0xff_0000);
        src.write_pixel(1, 0, 0x00_00ff);

        let mut device = device(32);
        device
            .stretch_blt(
                &Rectangle::new(0, 0, 4, 2),
                &src,
                &Rectangle::new(0, 0, 2, 1),
                Rop3::SRCCOPY,
            )
            .unwrap();

        let red = ColorRef::rgb(0xff, 0, 0);
        let blue = ColorRef::rgb(0, 0, 0xff);
        for y in 0..2 {
            assert_eq!(color_at(&device, 0, y), red);
            assert_eq!(color_at(&device, 1, y), red);
            assert_eq!(color_at(&device, 2, y), blue);
            assert_eq!(color_at(&device, 3, y), blue);
        }

        // Mirrored horizontally
        device
            .stretch_blt(
                &Rectangle::new(4, 4, 0, 6),
                &src,
                &Rectangle::new(0, 0, 2, 1),
                Rop3::SRCCOPY,
            )
            .unwrap();
        assert_eq!(color_at(&device, 0, 4), blue);
        assert_eq!(color_at(&device, 3, 5), red);
    }

    #[test]
    fn get_image_copies_the_visible_part() {
        let mut device = device(8);
        device.set_pixel(15, 15, ColorRef::WHITE);

        let image = device.get_image(&Rectangle::new(14, 14, 20, 20)).unwrap();
        assert_eq!((image.width(), image.height()), (2, 2));
        assert_eq!(image.read_pixel(1, 1), device.dib().read_pixel(15, 15));
        assert_eq!(
            device.get_image(&Rectangle::new(20, 20, 30, 30)).unwrap_err(),
            BlitError::InvalidParameter
        );
    }
}
