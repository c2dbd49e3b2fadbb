//! Drawing strings of cached glyphs

use font::{FontHandle, GlyphBitmap, GlyphFormat, GlyphId};
use math::{Point, Rectangle};

use crate::{
    clip::{get_clipped_rects, Region},
    primitives::{AaRanges, GammaRamp},
    BitmapInfo, Bits, ColorRef, DibInfo,
};

#[derive(Clone, Copy, Debug, Default)]
pub struct TextOptions<'a> {
    /// A rectangle that is filled with a color before any glyph is drawn
    pub opaque: Option<(Rectangle, ColorRef)>,

    /// Glyphs are only drawn inside this rectangle
    pub clip_rect: Option<Rectangle>,

    /// Horizontal distance from each glyph to the next, instead of the glyph advances
    pub spacing: Option<&'a [i32]>,

    /// The string holds glyph indices instead of UTF-16 code units
    pub glyph_indices: bool,
}

/// Describe the bits of a cached glyph
fn glyph_dib(glyph: &GlyphBitmap) -> Option<DibInfo<'_>> {
    let info = BitmapInfo::new(glyph.width, glyph.height, glyph.format.bit_count());
    match DibInfo::with_stride(&info, Bits::ReadOnly(&glyph.bits), glyph.stride as isize) {
        Ok(dib) => Some(dib),
        Err(error) => {
            log::warn!(
                "Unusable {}x{} glyph: {error}",
                glyph.width,
                glyph.height
            );
            None
        },
    }
}

/// Draw `text` with its first glyph's baseline origin at `origin`
///
/// Returns the area that was painted, if any.
pub fn ext_text_out(
    dib: &mut DibInfo<'_>,
    font: &FontHandle,
    origin: Point,
    text: &[u16],
    options: &TextOptions<'_>,
    clip: Option<&Region>,
    text_color: ColorRef,
) -> Option<Rectangle> {
    let funcs = dib.funcs();
    let mut painted = Rectangle::default();

    if let Some((rect, color)) = options.opaque {
        let rects = get_clipped_rects(dib, Some(&rect), clip);
        let pixel = funcs.colorref_to_pixel(dib, color);
        funcs.solid_rects(dib, &rects, 0, pixel);
        rects.iter().for_each(|rect| painted.grow_to_contain(rect));
    }

    let text_pixel = funcs.colorref_to_pixel(dib, text_color);
    let ranges = AaRanges::new(funcs.pixel_to_colorref(dib, text_pixel));
    let gamma = GammaRamp::new(settings::get().font_gamma);

    let mut pen = origin;
    for (position, &value) in text.iter().enumerate() {
        let id = if options.glyph_indices {
            GlyphId::Index(value)
        } else {
            GlyphId::CodeUnit(value)
        };

        let glyph = match font.glyph(id) {
            Ok(glyph) => Some(glyph),
            Err(error) => {
                log::debug!("Skipping {id:?}: {error}");
                None
            },
        };

        if let Some(glyph) = glyph.as_deref().filter(|glyph| !glyph.is_empty()) {
            let top_left = Point::new(pen.x + glyph.metrics.left, pen.y - glyph.metrics.top);
            let rect = Rectangle::from_position_and_size(top_left, glyph.width, glyph.height);

            if let Some(bits) = glyph_dib(glyph) {
                for visible in get_clipped_rects(dib, Some(&rect), clip) {
                    let visible = match options.clip_rect {
                        Some(clip_rect) => visible.intersection(&clip_rect),
                        None => Some(visible),
                    };
                    let Some(visible) = visible else {
                        continue;
                    };

                    let offset = visible.top_left() - rect.top_left();
                    match glyph.format {
                        GlyphFormat::Subpixel => funcs.draw_subpixel_glyph(
                            dib,
                            &visible,
                            &bits,
                            offset,
                            text_pixel,
                            Some(&gamma),
                        ),
                        GlyphFormat::Gray | GlyphFormat::Bilevel => {
                            funcs.draw_glyph(dib, &visible, &bits, offset, text_pixel, &ranges);
                        },
                    }
                    painted.grow_to_contain(&visible);
                }
            }
        }

        match (options.spacing.and_then(|spacing| spacing.get(position)), &glyph) {
            (Some(distance), _) => pen.x += distance,
            (None, Some(glyph)) => {
                pen.x += glyph.metrics.advance_x;
                pen.y += glyph.metrics.advance_y;
            },
            (None, None) => {},
        }
    }

    (!painted.is_empty()).then_some(painted)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use font::{AntialiasMode, FontAttributes, FontCache, FontError, GlyphMetrics, OutlineSource};

    use super::*;

    /// Every character is a 2x2 block at the given coverage level, `0` does not exist
    struct BlockSource;

    impl OutlineSource for BlockSource {
        fn render(
            &self,
            _attributes: &FontAttributes,
            glyph: GlyphId,
            _mode: AntialiasMode,
        ) -> Result<GlyphBitmap, FontError> {
            let level = match glyph.value() {
                0 => return Err(FontError::NoSuchGlyph),
                0x20 => 0,
                value => (value % 17) as u8,
            };

            Ok(GlyphBitmap {
                format: GlyphFormat::Gray,
                width: 2,
                height: 2,
                stride: 4,
                bits: vec![level, level, 0, 0, level, level, 0, 0],
                metrics: GlyphMetrics {
                    left: 0,
                    top: 2,
                    advance_x: 3,
                    advance_y: 0,
                },
            })
        }
    }

    /// Character that maps to full coverage
    const FULL: u16 = 16;

    fn setup() -> (DibInfo<'static>, FontHandle) {
        let mut dib = DibInfo::allocate(&BitmapInfo::new(16, 8, 32)).unwrap();
        dib.bits_mut().fill(0xff);

        let cache = FontCache::with_limits(Arc::new(BlockSource), 5, 64);
        let font = cache.acquire(&FontAttributes::new("Block", 2));
        (dib, font)
    }

    #[test]
    fn glyphs_follow_their_advances() {
        let (mut dib, font) = setup();
        let options = TextOptions::default();
        let painted = ext_text_out(
            &mut dib,
            &font,
            Point::new(1, 4),
            &[FULL, FULL],
            &options,
            None,
            ColorRef::BLACK,
        );

        assert_eq!(painted, Some(Rectangle::new(1, 2, 6, 4)));
        assert_eq!(dib.read_pixel(1, 2) & 0xffffff, 0);
        assert_eq!(dib.read_pixel(2, 3) & 0xffffff, 0);
        assert_eq!(dib.read_pixel(3, 2) & 0xffffff, 0xffffff);
        assert_eq!(dib.read_pixel(4, 2) & 0xffffff, 0);
        assert_eq!(dib.read_pixel(1, 4) & 0xffffff, 0xffffff);
    }

    #[test]
    fn opaque_rectangle_and_spacing() {
        let (mut dib, font) = setup();
        let options = TextOptions {
            opaque: Some((Rectangle::new(0, 0, 16, 8), ColorRef::rgb(0xff, 0, 0))),
            spacing: Some(&[6]),
            ..TextOptions::default()
        };
        ext_text_out(
            &mut dib,
            &font,
            Point::new(0, 2),
            &[FULL, FULL],
            &options,
            None,
            ColorRef::BLACK,
        );

        assert_eq!(dib.read_pixel(0, 0) & 0xffffff, 0);
        assert_eq!(dib.read_pixel(3, 0) & 0xffffff, 0xff0000);
        assert_eq!(dib.read_pixel(6, 1) & 0xffffff, 0);
    }

    #[test]
    fn partial_coverage_blends() {
        let (mut dib, font) = setup();
        ext_text_out(
            &mut dib,
            &font,
            Point::new(0, 2),
            &[8],
            &TextOptions::default(),
            None,
            ColorRef::BLACK,
        );

        // Black at level 8 on white keeps the top of that level's range
        assert_eq!(dib.read_pixel(0, 0) & 0xffffff, 0xbdbdbd);
    }

    #[test]
    fn clip_rectangle_limits_glyphs() {
        let (mut dib, font) = setup();
        let options = TextOptions {
            clip_rect: Some(Rectangle::new(0, 0, 1, 8)),
            ..TextOptions::default()
        };
        let painted = ext_text_out(
            &mut dib,
            &font,
            Point::new(0, 2),
            &[FULL],
            &options,
            None,
            ColorRef::BLACK,
        );

        assert_eq!(painted, Some(Rectangle::new(0, 0, 1, 2)));
        assert_eq!(dib.read_pixel(0, 0) & 0xffffff, 0);
        assert_eq!(dib.read_pixel(1, 0) & 0xffffff, 0xffffff);
    }
}
