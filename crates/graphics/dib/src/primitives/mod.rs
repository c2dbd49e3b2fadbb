//! The per-format pixel kernels
//!
//! Every [DibInfo] binds one [Primitives] implementation when it is created.
//! The default methods are written against raw pixel access and color conversion,
//! the individual formats override whatever they can do faster or differently.

mod argb8888;
pub(crate) mod blend;
pub(crate) mod generic;
pub(crate) mod glyph;
pub(crate) mod gradient;
mod indexed;
mod indexed4;
mod indexed8;
mod masked16;
mod masked32;
mod mono;
mod null;
pub(crate) mod packed;
mod rgb24;
mod rgb555;

use std::fmt;

use math::{LineSegment, Point, Rectangle, StretchParams};

pub use blend::BlendFunction;
pub use glyph::{AaRanges, GammaRamp, IntensityRange};
pub use gradient::{GradientMode, TriVertex};

use crate::{
    format::{MASKS_555, MASKS_888},
    ColorRef, DibInfo, Rop2,
};

bitflags::bitflags! {
    /// How the destination of a copy lies relative to an overlapping source
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct Overlap: u8 {
        /// The destination starts above the source, rows are copied top to bottom
        const ABOVE = 1 << 0;

        /// The destination starts below the source, rows are copied bottom to top
        const BELOW = 1 << 1;

        /// The destination starts left of the source, pixels are copied left to right
        const LEFT = 1 << 2;

        /// The destination starts right of the source, pixels are copied right to left
        const RIGHT = 1 << 3;
    }
}

/// How several source pixels are merged into one when shrinking
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StretchMode {
    /// Combine with AND, preserving black pixels on white
    AndScans,

    /// Combine with OR, preserving white pixels on black
    OrScans,

    /// Keep one source pixel and drop the rest
    #[default]
    DeleteScans,

    /// Bilinear resampling
    Halftone,
}

impl StretchMode {
    #[must_use]
    pub fn from_u32(value: u32) -> Option<Self> {
        match value {
            1 => Some(Self::AndScans),
            2 => Some(Self::OrScans),
            3 => Some(Self::DeleteScans),
            4 => Some(Self::Halftone),
            _ => None,
        }
    }

    pub(crate) fn rop2(self) -> Rop2 {
        match self {
            Self::AndScans => Rop2::MaskPen,
            Self::OrScans => Rop2::MergePen,
            Self::DeleteScans | Self::Halftone => Rop2::CopyPen,
        }
    }
}

/// AND/XOR pixel masks of a tiled brush, precomputed for one raster operation
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RopMasks {
    pub width: i32,
    pub height: i32,

    /// `None` if the operation does not depend on the destination
    pub and: Option<Vec<u32>>,
    pub xor: Vec<u32>,
}

impl RopMasks {
    /// Masks of a single pixel
    #[must_use]
    pub fn solid(rop2: Rop2, pixel: u32) -> Self {
        let (and, xor) = crate::calc_and_xor_masks(rop2, pixel);
        Self {
            width: 1,
            height: 1,
            and: rop2.uses_dst().then(|| vec![and]),
            xor: vec![xor],
        }
    }

    #[inline]
    pub(crate) fn index(&self, x: i32, y: i32) -> usize {
        (y.rem_euclid(self.height) * self.width + x.rem_euclid(self.width)) as usize
    }
}

/// The kernel set of one pixel layout
///
/// Coordinates are relative to the visible rectangle of the bitmap and always lie
/// within it, clipping is the caller's responsibility.
pub trait Primitives: fmt::Debug + Send + Sync {
    fn name(&self) -> &'static str;

    fn colorref_to_pixel(&self, dib: &DibInfo<'_>, color: ColorRef) -> u32;

    fn pixel_to_colorref(&self, dib: &DibInfo<'_>, pixel: u32) -> ColorRef;

    fn get_pixel(&self, dib: &DibInfo<'_>, x: i32, y: i32) -> u32 {
        dib.read_pixel(x, y)
    }

    /// Apply `pixel = (pixel & and) ^ xor` to every pixel in `rects`
    fn solid_rects(&self, dib: &mut DibInfo<'_>, rects: &[Rectangle], and: u32, xor: u32) {
        generic::solid_rects(dib, rects, and, xor);
    }

    fn solid_line(&self, dib: &mut DibInfo<'_>, segment: &LineSegment, and: u32, xor: u32) {
        generic::solid_line(dib, segment, and, xor);
    }

    /// Tile a brush over `rects`, the brush is anchored at `origin`
    fn pattern_rects(
        &self,
        dib: &mut DibInfo<'_>,
        rects: &[Rectangle],
        origin: Point,
        masks: &RopMasks,
    ) {
        generic::pattern_rects(dib, rects, origin, masks);
    }

    /// Combine `src` (or `dst` itself, if `src` is `None`) into `rect`
    ///
    /// `origin` is the position in the source that maps to the top left corner of `rect`.
    /// Both bitmaps must share the same format.
    fn copy_rect(
        &self,
        dst: &mut DibInfo<'_>,
        rect: &Rectangle,
        src: Option<&DibInfo<'_>>,
        origin: Point,
        rop2: Rop2,
        overlap: Overlap,
    ) {
        generic::copy_rect(dst, rect, src, origin, rop2, overlap);
    }

    /// Alpha blend a 32 bpp source into `rect`
    fn blend_rect(
        &self,
        dst: &mut DibInfo<'_>,
        rect: &Rectangle,
        src: &DibInfo<'_>,
        origin: Point,
        blend: BlendFunction,
    ) {
        blend::blend_rect_rgb(dst, rect, src, origin, blend);
    }

    /// The pixel for an interpolated gradient color at a given position
    ///
    /// Channels are 16 bit values as in [TriVertex].
    fn gradient_pixel(&self, dib: &DibInfo<'_>, x: i32, y: i32, color: [u32; 4]) -> u32 {
        let _ = (x, y);
        let [red, green, blue, _] = color.map(|channel| (channel >> 8) as u8);
        self.colorref_to_pixel(dib, ColorRef::rgb(red, green, blue))
    }

    /// Returns `false` if nothing could be drawn
    fn gradient_rect(
        &self,
        dib: &mut DibInfo<'_>,
        rect: &Rectangle,
        vertices: &[TriVertex],
        mode: GradientMode,
    ) -> bool {
        gradient::gradient_rect(dib, rect, vertices, mode)
    }

    /// Use a 1 bpp source to select between the two colors of its color table
    fn mask_rect(
        &self,
        dst: &mut DibInfo<'_>,
        rect: &Rectangle,
        src: &DibInfo<'_>,
        origin: Point,
        rop2: Rop2,
    ) {
        generic::mask_rect(dst, rect, src, origin, rop2);
    }

    /// Draw an 8 bpp glyph with coverage levels `0..=16`
    fn draw_glyph(
        &self,
        dst: &mut DibInfo<'_>,
        rect: &Rectangle,
        glyph: &DibInfo<'_>,
        origin: Point,
        text_pixel: u32,
        ranges: &AaRanges,
    ) {
        glyph::draw_glyph_rgb(dst, rect, glyph, origin, text_pixel, ranges);
    }

    /// Draw a 32 bpp glyph with separate coverage for each color channel
    fn draw_subpixel_glyph(
        &self,
        dst: &mut DibInfo<'_>,
        rect: &Rectangle,
        glyph: &DibInfo<'_>,
        origin: Point,
        text_pixel: u32,
        gamma: Option<&GammaRamp>,
    ) {
        glyph::draw_subpixel_glyph_rgb(dst, rect, glyph, origin, text_pixel, gamma);
    }

    /// Convert `src_rect` of `src` into `dst`, which has this format
    ///
    /// The converted pixels start at the top left corner of `dst`.
    fn convert_to(
        &self,
        dst: &mut DibInfo<'_>,
        src: &DibInfo<'_>,
        src_rect: &Rectangle,
        dither: bool,
    ) {
        generic::convert_to(dst, src, src_rect, dither);
    }

    /// Masks for a brush pattern that is already in this format
    fn create_rop_masks(&self, pattern: &DibInfo<'_>, rop2: Rop2) -> RopMasks {
        generic::create_rop_masks(pattern, rop2)
    }

    /// Masks for a solid brush, dithered on formats that cannot represent `color`
    fn create_dither_masks(&self, dib: &DibInfo<'_>, rop2: Rop2, color: ColorRef) -> RopMasks {
        RopMasks::solid(rop2, self.colorref_to_pixel(dib, color))
    }

    /// Resample one row to a wider destination
    fn stretch_row(
        &self,
        dst: &mut DibInfo<'_>,
        dst_start: Point,
        src: &DibInfo<'_>,
        src_start: Point,
        params: &StretchParams,
        mode: StretchMode,
        keep_dst: bool,
    ) {
        generic::stretch_row(dst, dst_start, src, src_start, params, mode, keep_dst);
    }

    /// Resample one row to a narrower destination
    fn shrink_row(
        &self,
        dst: &mut DibInfo<'_>,
        dst_start: Point,
        src: &DibInfo<'_>,
        src_start: Point,
        params: &StretchParams,
        mode: StretchMode,
        keep_dst: bool,
    ) {
        generic::shrink_row(dst, dst_start, src, src_start, params, mode, keep_dst);
    }

    /// Bilinear resampling of `src_rect` into `dst_rect`
    fn halftone(
        &self,
        dst: &mut DibInfo<'_>,
        dst_rect: &Rectangle,
        src: &DibInfo<'_>,
        src_rect: &Rectangle,
    ) {
        generic::halftone(dst, dst_rect, src, src_rect);
    }
}

pub static FUNCS_8888: argb8888::Argb8888 = argb8888::Argb8888;
pub static FUNCS_32: masked32::Masked32 = masked32::Masked32;
pub static FUNCS_24: rgb24::Rgb24 = rgb24::Rgb24;
pub static FUNCS_555: rgb555::Rgb555 = rgb555::Rgb555;
pub static FUNCS_16: masked16::Masked16 = masked16::Masked16;
pub static FUNCS_8: indexed8::Indexed8 = indexed8::Indexed8;
pub static FUNCS_4: indexed4::Indexed4 = indexed4::Indexed4;
pub static FUNCS_1: mono::Mono = mono::Mono;
pub static FUNCS_NULL: null::Null = null::Null;

/// Pick the kernel set for a pixel layout
pub(crate) fn select(bit_count: u32, masks: [u32; 3]) -> &'static dyn Primitives {
    match bit_count {
        32 if masks == MASKS_888 => &FUNCS_8888,
        32 if masks.iter().all(|&mask| mask != 0) => &FUNCS_32,
        24 => &FUNCS_24,
        16 if masks == MASKS_555 => &FUNCS_555,
        16 if masks.iter().all(|&mask| mask != 0) => &FUNCS_16,
        8 => &FUNCS_8,
        4 => &FUNCS_4,
        1 => &FUNCS_1,
        _ => {
            log::warn!("No kernels for {bit_count} bpp with masks {masks:x?}, drawing is disabled");
            &FUNCS_NULL
        },
    }
}

/// Shared color conversion for formats with channel masks
#[inline]
pub(crate) fn put_field(field: u32, shift: u32, len: u32) -> u32 {
    let shift = shift as i32 - (8 - len as i32);
    let field = if len <= 8 {
        field & (((1 << len) - 1) << (8 - len))
    } else {
        field
    };

    if shift < 0 {
        field >> -shift
    } else {
        field << shift
    }
}

const FIELD_MASKS: [u32; 33] = {
    let mut masks = [0xff; 33];
    let mut len = 0;
    while len < 8 {
        masks[len] = (0xff00 >> len) & 0xff;
        len += 1;
    }
    masks
};

#[inline]
pub(crate) fn get_field(pixel: u32, shift: u32, len: u32) -> u8 {
    let shift = shift as i32 - (8 - len as i32);
    let mut pixel = if shift < 0 {
        pixel << -shift
    } else {
        pixel >> shift
    };
    pixel &= FIELD_MASKS[len as usize];
    pixel |= pixel >> len.min(31);
    pixel as u8
}

pub(crate) fn rgb_to_pixel_masks(dib: &DibInfo<'_>, red: u8, green: u8, blue: u8) -> u32 {
    put_field(red.into(), dib.red.shift, dib.red.len)
        | put_field(green.into(), dib.green.shift, dib.green.len)
        | put_field(blue.into(), dib.blue.shift, dib.blue.len)
}

pub(crate) fn pixel_to_rgb_masks(dib: &DibInfo<'_>, pixel: u32) -> ColorRef {
    ColorRef::rgb(
        get_field(pixel, dib.red.shift, dib.red.len),
        get_field(pixel, dib.green.shift, dib.green.len),
        get_field(pixel, dib.blue.shift, dib.blue.len),
    )
}
