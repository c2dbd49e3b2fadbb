//! Alpha blending of 32 bpp sources

use math::{Point, Rectangle};

use crate::{ColorRef, Compression, DibInfo};

/// Parameters of an alpha blend
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlendFunction {
    /// Applied on top of the per-pixel alpha, `255` is fully opaque
    pub source_constant_alpha: u8,

    /// The source carries premultiplied alpha in its top byte
    pub has_src_alpha: bool,
}

impl Default for BlendFunction {
    fn default() -> Self {
        Self {
            source_constant_alpha: 0xff,
            has_src_alpha: false,
        }
    }
}

#[inline]
fn channel(value: u32, index: u32) -> u32 {
    (value >> (8 * index)) & 0xff
}

#[inline]
#[must_use]
pub(crate) fn blend_color(dst: u32, src: u32, alpha: u32) -> u32 {
    (src * alpha + dst * (255 - alpha) + 127) / 255
}

#[inline]
fn scale(value: u32, alpha: u32) -> u32 {
    (value * alpha + 127) / 255
}

/// Premultiplied source over the destination, the source alpha is in its top byte
#[inline]
fn over(dst: u32, src: [u32; 4], alpha: u32) -> u32 {
    (0..4).fold(0, |result, index| {
        let value = src[index as usize] + scale(channel(dst, index), 255 - alpha);
        result | value.min(0xff) << (8 * index)
    })
}

#[must_use]
pub(crate) fn blend_argb(dst: u32, src: u32) -> u32 {
    let src = [0, 1, 2, 3].map(|index| channel(src, index));
    over(dst, src, src[3])
}

#[must_use]
pub(crate) fn blend_argb_alpha(dst: u32, src: u32, alpha: u32) -> u32 {
    let src = [0, 1, 2, 3].map(|index| scale(channel(src, index), alpha));
    over(dst, src, src[3])
}

/// Sources without an alpha channel are blended with the constant alpha only,
/// the destination keeps its alpha byte
#[must_use]
pub(crate) fn blend_argb_constant_alpha(dst: u32, src: u32, alpha: u32) -> u32 {
    (0..3).fold(dst & 0xff00_0000, |result, index| {
        result | blend_color(channel(dst, index), channel(src, index), alpha) << (8 * index)
    })
}

/// Like [blend_argb_alpha], but the top byte of the source is not an alpha value
#[must_use]
pub(crate) fn blend_argb_no_src_alpha(dst: u32, src: u32, alpha: u32) -> u32 {
    let mut src = [0, 1, 2, 3].map(|index| scale(channel(src, index), alpha));
    src[3] = alpha;
    over(dst, src, alpha)
}

/// Blend onto a destination without an alpha channel, the result has no alpha either
#[must_use]
pub(crate) fn blend_rgb(dst: ColorRef, src: u32, blend: BlendFunction) -> ColorRef {
    let alpha = u32::from(blend.source_constant_alpha);
    let dst = [dst.blue(), dst.green(), dst.red()].map(u32::from);

    let [blue, green, red] = if blend.has_src_alpha {
        let src_alpha = scale(channel(src, 3), alpha);
        [0, 1, 2].map(|index| {
            let value = scale(channel(src, index), alpha)
                + scale(dst[index as usize], 255 - src_alpha);
            value.min(0xff)
        })
    } else {
        [0, 1, 2].map(|index| blend_color(dst[index as usize], channel(src, index), alpha))
    };

    ColorRef::rgb(red as u8, green as u8, blue as u8)
}

/// Blend through color conversion, for every destination without an alpha channel
pub(crate) fn blend_rect_rgb(
    dst: &mut DibInfo<'_>,
    rect: &Rectangle,
    src: &DibInfo<'_>,
    origin: Point,
    blend: BlendFunction,
) {
    let funcs = dst.funcs();

    for y in 0..rect.height() {
        for x in 0..rect.width() {
            let (dst_x, dst_y) = (rect.left + x, rect.top + y);
            let current = funcs.pixel_to_colorref(dst, dst.read_pixel(dst_x, dst_y));
            let source = src.read_pixel(origin.x + x, origin.y + y);

            let color = blend_rgb(current, source, blend);
            let pixel = funcs.colorref_to_pixel(dst, color);
            dst.write_pixel(dst_x, dst_y, pixel);
        }
    }
}

/// Blend onto an 8888 destination, which keeps its alpha channel
pub(crate) fn blend_rect_8888(
    dst: &mut DibInfo<'_>,
    rect: &Rectangle,
    src: &DibInfo<'_>,
    origin: Point,
    blend: BlendFunction,
) {
    let alpha = u32::from(blend.source_constant_alpha);
    let formula: fn(u32, u32, u32) -> u32 = match (blend.has_src_alpha, alpha) {
        (true, 0xff) => |dst, src, _| blend_argb(dst, src),
        (true, _) => blend_argb_alpha,
        (false, _) if src.compression() == Compression::Rgb => blend_argb_constant_alpha,
        (false, _) => blend_argb_no_src_alpha,
    };

    for y in 0..rect.height() {
        for x in 0..rect.width() {
            let (dst_x, dst_y) = (rect.left + x, rect.top + y);
            let source = src.read_pixel(origin.x + x, origin.y + y);
            let value = formula(dst.read_pixel(dst_x, dst_y), source, alpha);
            dst.write_pixel(dst_x, dst_y, value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constant_alpha_rounding() {
        assert_eq!(blend_color(0xff, 0, 128), 0x7f);
        assert_eq!(blend_color(0, 0xff, 128), 0x80);
        assert_eq!(blend_color(0x12, 0x34, 0), 0x12);
        assert_eq!(blend_color(0x12, 0x34, 255), 0x34);
    }

    #[test]
    fn constant_alpha_keeps_destination_alpha() {
        assert_eq!(blend_argb_constant_alpha(0x00ff_ffff, 0xff00_0000, 128), 0x007f_7f7f);
        assert_eq!(blend_argb_constant_alpha(0x4000_0000, 0xffff_ffff, 255), 0x40ff_ffff);
        assert_eq!(blend_argb_constant_alpha(0x1234_5678, 0xff00_0000, 0), 0x1234_5678);
    }

    #[test]
    fn premultiplied_over() {
        // Fully opaque sources replace the destination
        assert_eq!(blend_argb(0x11223344, 0xff010203), 0xff010203);

        // Transparent sources leave it alone
        assert_eq!(blend_argb(0x11223344, 0x00000000), 0x11223344);

        // Half covered white over black
        assert_eq!(blend_argb(0xff000000, 0x80808080), 0xff808080);
    }

    #[test]
    fn constant_alpha_on_top_of_source_alpha() {
        assert_eq!(blend_argb_alpha(0, 0xffffffff, 0), 0);
        assert_eq!(blend_argb_alpha(0, 0xffffffff, 0xff), 0xffffffff);
        assert_eq!(blend_argb_no_src_alpha(0, 0x00ffffff, 0x80), 0x80808080);
    }

    #[test]
    fn destinations_without_alpha() {
        let white = ColorRef::WHITE;
        let blend = BlendFunction {
            source_constant_alpha: 128,
            has_src_alpha: false,
        };
        assert_eq!(blend_rgb(white, 0xff000000, blend), ColorRef::rgb(0x7f, 0x7f, 0x7f));

        let blend = BlendFunction {
            source_constant_alpha: 255,
            has_src_alpha: true,
        };
        assert_eq!(blend_rgb(white, 0x00000000, blend), white);
        assert_eq!(blend_rgb(white, 0xff000000, blend), ColorRef::BLACK);
    }
}
