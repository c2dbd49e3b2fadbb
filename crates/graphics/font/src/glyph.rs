//! Rendered glyphs and the sparse table they are cached in

use std::sync::{Arc, OnceLock};

const PAGE_SIZE: usize = 256;

/// Identifies a glyph either by its index in the font or by the character it represents
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GlyphId {
    Index(u16),
    CodeUnit(u16),
}

impl GlyphId {
    /// The same kind of id with a different value
    #[must_use]
    pub fn with_value(self, value: u16) -> Self {
        match self {
            Self::Index(_) => Self::Index(value),
            Self::CodeUnit(_) => Self::CodeUnit(value),
        }
    }

    #[must_use]
    pub fn value(self) -> u16 {
        match self {
            Self::Index(value) | Self::CodeUnit(value) => value,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GlyphFormat {
    /// One bit per pixel, the most significant bit is leftmost
    Bilevel,

    /// One byte per pixel with coverage levels `0..=16`
    Gray,

    /// Four bytes per pixel holding blue, green and red coverage in `0..=255`
    Subpixel,
}

impl GlyphFormat {
    #[must_use]
    pub fn bit_count(self) -> u16 {
        match self {
            Self::Bilevel => 1,
            Self::Gray => 8,
            Self::Subpixel => 32,
        }
    }
}

/// Placement of a glyph relative to the pen position on the baseline
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GlyphMetrics {
    /// Offset from the pen position to the left edge of the bitmap
    pub left: i32,

    /// Offset from the baseline up to the top edge of the bitmap
    pub top: i32,

    /// How far the pen moves after the glyph
    pub advance_x: i32,
    pub advance_y: i32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GlyphBitmap {
    pub format: GlyphFormat,
    pub width: i32,
    pub height: i32,

    /// Bytes per row, a multiple of four
    pub stride: usize,
    pub bits: Vec<u8>,
    pub metrics: GlyphMetrics,
}

impl GlyphBitmap {
    #[must_use]
    pub fn stride_for(format: GlyphFormat, width: i32) -> usize {
        let bits = width.max(0) as usize * usize::from(format.bit_count());
        bits.div_ceil(32) * 4
    }

    /// A glyph without any pixels, like the one for a space
    #[must_use]
    pub fn empty(format: GlyphFormat, metrics: GlyphMetrics) -> Self {
        Self {
            format,
            width: 0,
            height: 0,
            stride: 0,
            bits: vec![],
            metrics,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Expand a bilevel glyph into the gray format, set bits become full coverage
    #[must_use]
    pub fn bilevel_to_gray(&self) -> Self {
        if self.format != GlyphFormat::Bilevel {
            return self.clone();
        }

        let stride = Self::stride_for(GlyphFormat::Gray, self.width);
        let mut bits = vec![0; stride * self.height.max(0) as usize];

        for y in 0..self.height.max(0) as usize {
            let source = &self.bits[y * self.stride..];
            let target = &mut bits[y * stride..];
            for x in 0..self.width as usize {
                if source[x / 8] & (0x80 >> (x % 8)) != 0 {
                    target[x] = 16;
                }
            }
        }

        Self {
            format: GlyphFormat::Gray,
            width: self.width,
            height: self.height,
            stride,
            bits,
            metrics: self.metrics,
        }
    }
}

type Page = Box<[OnceLock<Arc<GlyphBitmap>>; PAGE_SIZE]>;

/// A sparse table of glyphs, split into pages of 256 entries that are allocated on demand
///
/// Entries are written once and never replaced, so lookups need no lock.
pub(crate) struct GlyphPages {
    pages: Box<[OnceLock<Page>; PAGE_SIZE]>,
}

impl GlyphPages {
    pub(crate) fn new() -> Self {
        Self {
            pages: Box::new(std::array::from_fn(|_| OnceLock::new())),
        }
    }

    fn slot(&self, value: u16) -> &OnceLock<Arc<GlyphBitmap>> {
        let page = self.pages[usize::from(value >> 8)]
            .get_or_init(|| Box::new(std::array::from_fn(|_| OnceLock::new())));
        &page[usize::from(value & 0xff)]
    }

    pub(crate) fn get(&self, value: u16) -> Option<Arc<GlyphBitmap>> {
        let page = self.pages[usize::from(value >> 8)].get()?;
        page[usize::from(value & 0xff)].get().cloned()
    }

    /// Store a glyph unless another thread was faster, returns whichever glyph was kept
    pub(crate) fn insert(&self, value: u16, glyph: GlyphBitmap) -> Arc<GlyphBitmap> {
        let glyph = Arc::new(glyph);
        let kept = self.slot(value).get_or_init(|| glyph.clone());

        if !Arc::ptr_eq(kept, &glyph) {
            log::debug!("Discarding glyph {value:#x}, it was cached concurrently");
        }
        kept.clone()
    }

    pub(crate) fn len(&self) -> usize {
        self.pages
            .iter()
            .filter_map(OnceLock::get)
            .map(|page| page.iter().filter(|slot| slot.get().is_some()).count())
            .sum()
    }
}

impl std::fmt::Debug for GlyphPages {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GlyphPages")
            .field("glyphs", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bilevel_glyphs_become_gray() {
        let glyph = GlyphBitmap {
            format: GlyphFormat::Bilevel,
            width: 10,
            height: 1,
            stride: 4,
            bits: vec![0b1010_0000, 0b0100_0000, 0, 0],
            metrics: GlyphMetrics::default(),
        };

        let gray = glyph.bilevel_to_gray();
        assert_eq!(gray.format, GlyphFormat::Gray);
        assert_eq!(gray.stride, 12);
        assert_eq!(&gray.bits[..10], &[16, 0, 16, 0, 0, 0, 0, 0, 0, 16]);
    }

    #[test]
    fn pages_keep_the_first_insertion() {
        let pages = GlyphPages::new();
        assert!(pages.get(0x1234).is_none());

        let first = GlyphBitmap::empty(GlyphFormat::Gray, GlyphMetrics::default());
        let mut second = first.clone();
        second.metrics.advance_x = 7;

        pages.insert(0x1234, first.clone());
        let kept = pages.insert(0x1234, second);
        assert_eq!(*kept, first);
        assert_eq!(pages.get(0x1234).as_deref(), Some(&first));
        assert_eq!(pages.len(), 1);
    }
}
