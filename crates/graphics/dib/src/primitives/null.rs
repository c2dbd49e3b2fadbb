use math::{LineSegment, Point, Rectangle, StretchParams};

use super::{
    AaRanges, BlendFunction, GammaRamp, GradientMode, Overlap, Primitives, RopMasks, StretchMode,
    TriVertex,
};
use crate::{ColorRef, DibInfo, Rop2};

/// Kernels for layouts that cannot be drawn to, every operation does nothing
#[derive(Debug)]
pub struct Null;

impl Primitives for Null {
    fn name(&self) -> &'static str {
        "null"
    }

    fn colorref_to_pixel(&self, _dib: &DibInfo<'_>, _color: ColorRef) -> u32 {
        0
    }

    fn pixel_to_colorref(&self, _dib: &DibInfo<'_>, _pixel: u32) -> ColorRef {
        ColorRef::BLACK
    }

    fn get_pixel(&self, _dib: &DibInfo<'_>, _x: i32, _y: i32) -> u32 {
        0
    }

    fn solid_rects(&self, _dib: &mut DibInfo<'_>, _rects: &[Rectangle], _and: u32, _xor: u32) {}

    fn solid_line(&self, _dib: &mut DibInfo<'_>, _segment: &LineSegment, _and: u32, _xor: u32) {}

    fn pattern_rects(
        &self,
        _dib: &mut DibInfo<'_>,
        _rects: &[Rectangle],
        _origin: Point,
        _masks: &RopMasks,
    ) {
    }

    fn copy_rect(
        &self,
        _dst: &mut DibInfo<'_>,
        _rect: &Rectangle,
        _src: Option<&DibInfo<'_>>,
        _origin: Point,
        _rop2: Rop2,
        _overlap: Overlap,
    ) {
    }

    fn blend_rect(
        &self,
        _dst: &mut DibInfo<'_>,
        _rect: &Rectangle,
        _src: &DibInfo<'_>,
        _origin: Point,
        _blend: BlendFunction,
    ) {
    }

    fn gradient_rect(
        &self,
        _dib: &mut DibInfo<'_>,
        _rect: &Rectangle,
        _vertices: &[TriVertex],
        _mode: GradientMode,
    ) -> bool {
        false
    }

    fn mask_rect(
        &self,
        _dst: &mut DibInfo<'_>,
        _rect: &Rectangle,
        _src: &DibInfo<'_>,
        _origin: Point,
        _rop2: Rop2,
    ) {
    }

    fn draw_glyph(
        &self,
        _dst: &mut DibInfo<'_>,
        _rect: &Rectangle,
        _glyph: &DibInfo<'_>,
        _origin: Point,
        _text_pixel: u32,
        _ranges: &AaRanges,
    ) {
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

    fn convert_to(
        &self,
        _dst: &mut DibInfo<'_>,
        _src: &DibInfo<'_>,
        _src_rect: &Rectangle,
        _dither: bool,
    ) {
    }

    fn create_rop_masks(&self, _pattern: &DibInfo<'_>, rop2: Rop2) -> RopMasks {
        RopMasks::solid(rop2, 0)
    }

    fn create_dither_masks(&self, _dib: &DibInfo<'_>, rop2: Rop2, _color: ColorRef) -> RopMasks {
        RopMasks::solid(rop2, 0)
    }

    fn stretch_row(
        &self,
        _dst: &mut DibInfo<'_>,
        _dst_start: Point,
        _src: &DibInfo<'_>,
        _src_start: Point,
        _params: &StretchParams,
        _mode: StretchMode,
        _keep_dst: bool,
    ) {
    }

    fn shrink_row(
        &self,
        _dst: &mut DibInfo<'_>,
        _dst_start: Point,
        _src: &DibInfo<'_>,
        _src_start: Point,
        _params: &StretchParams,
        _mode: StretchMode,
        _keep_dst: bool,
    ) {
    }

    fn halftone(
        &self,
        _dst: &mut DibInfo<'_>,
        _dst_rect: &Rectangle,
        _src: &DibInfo<'_>,
        _src_rect: &Rectangle,
    ) {
    }
}
