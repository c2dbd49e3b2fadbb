//! Fonts and glyphs for text drawing
//!
//! Outlines are rendered by an external [OutlineSource]. This crate only keeps
//! track of realized fonts and caches the glyph bitmaps that were rendered for them.

mod attributes;
mod cache;
mod glyph;

pub use attributes::{AntialiasMode, FontAttributes, Style, Weight};
pub use cache::{FontCache, FontHandle};
pub use glyph::{GlyphBitmap, GlyphFormat, GlyphId, GlyphMetrics};

use error_derive::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum FontError {
    #[msg = "no such glyph"]
    NoSuchGlyph,
}

/// Renders the outlines of a font
pub trait OutlineSource: Send + Sync {
    /// Render a single glyph
    ///
    /// Sources may return [Bilevel](GlyphFormat::Bilevel) glyphs for any mode except the
    /// subpixel ones, the cache expands those to gray levels.
    fn render(
        &self,
        attributes: &FontAttributes,
        glyph: GlyphId,
        mode: AntialiasMode,
    ) -> Result<GlyphBitmap, FontError>;
}
