use math::{Point, Rectangle};

use super::{generic, glyph, indexed, AaRanges, GammaRamp, Overlap, Primitives, RopMasks};
use crate::{ColorRef, DibInfo, Rop2};

/// One byte palette indices
#[derive(Debug)]
pub struct Indexed8;

impl Primitives for Indexed8 {
    fn name(&self) -> &'static str {
        "8"
    }

    fn colorref_to_pixel(&self, dib: &DibInfo<'_>, color: ColorRef) -> u32 {
        indexed::colorref_to_index(dib, color)
    }

    fn pixel_to_colorref(&self, dib: &DibInfo<'_>, pixel: u32) -> ColorRef {
        indexed::index_to_colorref(dib, pixel)
    }

    fn solid_rects(&self, dib: &mut DibInfo<'_>, rects: &[Rectangle], and: u32, xor: u32) {
        generic::solid_rects_aligned::<1>(dib, rects, and, xor);
    }

    fn copy_rect(
        &self,
        dst: &mut DibInfo<'_>,
        rect: &Rectangle,
        src: Option<&DibInfo<'_>>,
        origin: Point,
        rop2: Rop2,
        overlap: Overlap,
    ) {
        generic::copy_rect_aligned::<1>(dst, rect, src, origin, rop2, overlap);
    }

    fn gradient_pixel(&self, dib: &DibInfo<'_>, x: i32, y: i32, color: [u32; 4]) -> u32 {
        indexed::gradient_index(dib, x, y, color)
    }

    fn draw_glyph(
        &self,
        dst: &mut DibInfo<'_>,
        rect: &Rectangle,
        glyph: &DibInfo<'_>,
        origin: Point,
        text_pixel: u32,
        _ranges: &AaRanges,
    ) {
        glyph::draw_glyph_bilevel(dst, rect, glyph, origin, text_pixel);
    }

    fn draw_subpixel_glyph(
        &self,
        _dst: &mut DibInfo<'_>,
        _rect: &Rectangle,
        _glyph: &DibInfo<'_>,
        _origin: Point,
        _text_pixel: u32,
        _gamma: Option<&GammaRamp>,
    ) {
    }

    fn create_dither_masks(&self, dib: &DibInfo<'_>, rop2: Rop2, color: ColorRef) -> RopMasks {
        indexed::dither_masks(dib, rop2, color)
    }
}
