//! The process-wide cache of realized fonts
//!
//! Fonts without users are not freed right away. The most recently used ones stay
//! around so that a device that keeps selecting the same few fonts does not have to
//! render their glyphs again. Eviction only ever happens when a lookup misses.

use std::{
    collections::hash_map::DefaultHasher,
    fmt,
    hash::{Hash, Hasher},
    sync::{Arc, Mutex, MutexGuard, OnceLock},
};

use crate::{
    glyph::GlyphPages, FontAttributes, FontError, GlyphBitmap, GlyphFormat, GlyphId,
    OutlineSource,
};

static GLOBAL: OnceLock<FontCache> = OnceLock::new();

/// Glyph values that are tried when a glyph does not exist
const FALLBACK_GLYPHS: [u16; 2] = [0, 0x20];

/// A realized font and the glyphs rendered for it so far
pub(crate) struct CachedFont {
    attributes: FontAttributes,
    by_index: GlyphPages,
    by_code_unit: GlyphPages,
}

impl CachedFont {
    fn pages(&self, id: GlyphId) -> &GlyphPages {
        match id {
            GlyphId::Index(_) => &self.by_index,
            GlyphId::CodeUnit(_) => &self.by_code_unit,
        }
    }
}

struct Entry {
    hash: u64,
    users: usize,
    font: Arc<CachedFont>,
}

struct CacheState {
    /// Most recently used first
    entries: Vec<Entry>,
}

struct Shared {
    source: Arc<dyn OutlineSource>,
    retained_unused: usize,
    capacity: usize,
    state: Mutex<CacheState>,
}

impl Shared {
    fn state(&self) -> MutexGuard<'_, CacheState> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[derive(Clone)]
pub struct FontCache {
    shared: Arc<Shared>,
}

impl fmt::Debug for FontCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FontCache")
            .field("retained_unused", &self.shared.retained_unused)
            .field("capacity", &self.shared.capacity)
            .field("fonts", &self.len())
            .finish()
    }
}

fn hash_attributes(attributes: &FontAttributes) -> u64 {
    let mut hasher = DefaultHasher::new();
    attributes.hash(&mut hasher);
    hasher.finish()
}

impl FontCache {
    /// A cache sized by the global settings
    #[must_use]
    pub fn new(source: Arc<dyn OutlineSource>) -> Self {
        let settings = settings::get();
        Self::with_limits(
            source,
            settings.retained_unused_fonts,
            settings.font_cache_capacity,
        )
    }

    /// A cache that keeps `retained_unused` fonts without users, and evicts one of those
    /// whenever a miss finds `capacity` fonts cached already
    #[must_use]
    pub fn with_limits(
        source: Arc<dyn OutlineSource>,
        retained_unused: usize,
        capacity: usize,
    ) -> Self {
        Self {
            shared: Arc::new(Shared {
                source,
                retained_unused,
                capacity,
                state: Mutex::new(CacheState {
                    entries: Vec::with_capacity(capacity),
                }),
            }),
        }
    }

    /// Make `cache` the one returned by [FontCache::global]
    ///
    /// Fails if a global cache was installed before, handing `cache` back.
    pub fn install_global(cache: Self) -> Result<(), Self> {
        GLOBAL.set(cache)
    }

    #[must_use]
    pub fn global() -> Option<&'static Self> {
        GLOBAL.get()
    }

    /// Number of cached fonts, with or without users
    #[must_use]
    pub fn len(&self) -> usize {
        self.shared.state().entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Find or create the font for `attributes`
    pub fn acquire(&self, attributes: &FontAttributes) -> FontHandle {
        let hash = hash_attributes(attributes);
        let mut state = self.shared.state();

        let hit = state
            .entries
            .iter()
            .position(|entry| entry.hash == hash && entry.font.attributes == *attributes);

        if let Some(position) = hit {
            let mut entry = state.entries.remove(position);
            entry.users += 1;
            let font = entry.font.clone();
            state.entries.insert(0, entry);
            return FontHandle {
                shared: self.shared.clone(),
                font,
            };
        }

        let unused = state.entries.iter().filter(|entry| entry.users == 0).count();
        let over_capacity = state.entries.len() >= self.shared.capacity;
        if unused > self.shared.retained_unused || (over_capacity && unused > 0) {
            if let Some(position) = state.entries.iter().rposition(|entry| entry.users == 0) {
                let evicted = state.entries.remove(position);
                log::debug!(
                    "Evicting font {:?} with {} cached glyphs",
                    evicted.font.attributes.face,
                    evicted.font.by_index.len() + evicted.font.by_code_unit.len()
                );
            }
        }

        let font = Arc::new(CachedFont {
            attributes: attributes.clone(),
            by_index: GlyphPages::new(),
            by_code_unit: GlyphPages::new(),
        });
        state.entries.insert(
            0,
            Entry {
                hash,
                users: 1,
                font: font.clone(),
            },
        );

        FontHandle {
            shared: self.shared.clone(),
            font,
        }
    }
}

/// A font in use, the cache entry loses its user once the handle is dropped
pub struct FontHandle {
    shared: Arc<Shared>,
    font: Arc<CachedFont>,
}

impl fmt::Debug for FontHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FontHandle")
            .field("attributes", &self.font.attributes)
            .finish_non_exhaustive()
    }
}

impl FontHandle {
    #[must_use]
    pub fn attributes(&self) -> &FontAttributes {
        &self.font.attributes
    }

    /// The rendered glyph for `id`
    ///
    /// Glyphs that do not exist are replaced by glyph `0`, then by a space. The glyph
    /// is rendered without holding any lock, if two threads render the same glyph at once
    /// only the first result is kept.
    pub fn glyph(&self, id: GlyphId) -> Result<Arc<GlyphBitmap>, FontError> {
        let pages = self.font.pages(id);
        if let Some(glyph) = pages.get(id.value()) {
            return Ok(glyph);
        }

        let attributes = &self.font.attributes;
        let fallbacks = FALLBACK_GLYPHS.map(|value| id.with_value(value));
        let candidates = std::iter::once(id).chain(fallbacks);

        let mut rendered = Err(FontError::NoSuchGlyph);
        for candidate in candidates {
            rendered = self
                .shared
                .source
                .render(attributes, candidate, attributes.antialias);
            match &rendered {
                Ok(_) => break,
                Err(error) => {
                    log::debug!("{candidate:?} in {:?}: {error}", attributes.face);
                },
            }
        }

        let mut glyph = rendered?;
        if glyph.format == GlyphFormat::Bilevel {
            glyph = glyph.bilevel_to_gray();
        }
        Ok(pages.insert(id.value(), glyph))
    }
}

impl Clone for FontHandle {
    fn clone(&self) -> Self {
        let mut state = self.shared.state();
        if let Some(entry) = state
            .entries
            .iter_mut()
            .find(|entry| Arc::ptr_eq(&entry.font, &self.font))
        {
            entry.users += 1;
        }

        Self {
            shared: self.shared.clone(),
            font: self.font.clone(),
        }
    }
}

impl Drop for FontHandle {
    fn drop(&mut self) {
        let mut state = self.shared.state();
        if let Some(entry) = state
            .entries
            .iter_mut()
            .find(|entry| Arc::ptr_eq(&entry.font, &self.font))
        {
            entry.users = entry.users.saturating_sub(1);
        }
    }
}
