//! Clip regions and the rectangle lists derived from them

use math::Rectangle;
use smallvec::SmallVec;

use crate::DibInfo;

/// The rectangles of a blit that are actually visible
///
/// Most blits are clipped to a handful of rectangles, those never touch the heap.
pub type ClippedRects = SmallVec<[Rectangle; 32]>;

/// A set of non-overlapping rectangles, sorted top to bottom and left to right within a band
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Region {
    rects: Vec<Rectangle>,
    bounds: Rectangle,
}

impl Region {
    #[must_use]
    pub fn from_rect(rect: Rectangle) -> Self {
        Self::from_rects(vec![rect])
    }

    /// Build a region from rectangles that do not overlap each other
    ///
    /// Empty rectangles are dropped and the rest is brought into band order.
    #[must_use]
    pub fn from_rects(mut rects: Vec<Rectangle>) -> Self {
        rects.retain(|rect| !rect.normalized().is_empty());
        rects.iter_mut().for_each(|rect| *rect = rect.normalized());
        rects.sort_by_key(|rect| (rect.top, rect.left));

        let mut bounds = rects.first().copied().unwrap_or_default();
        for rect in &rects {
            bounds.grow_to_contain(rect);
        }

        Self { rects, bounds }
    }

    #[must_use]
    pub fn rects(&self) -> &[Rectangle] {
        &self.rects
    }

    /// The smallest rectangle containing the whole region
    #[must_use]
    pub fn bounds(&self) -> Rectangle {
        self.bounds
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }
}

/// Intersect `rect` (or the whole visible area) with the bitmap and an optional region
///
/// The result keeps the band order of the region.
#[must_use]
pub fn get_clipped_rects(
    dib: &DibInfo<'_>,
    rect: Option<&Rectangle>,
    clip: Option<&Region>,
) -> ClippedRects {
    let mut clipped = ClippedRects::new();

    let area = match rect {
        Some(rect) => rect.normalized().intersection(&dib.bounds()),
        None => Some(dib.bounds()),
    };
    let Some(area) = area else {
        return clipped;
    };

    match clip {
        Some(region) => {
            if area.intersection(&region.bounds()).is_none() {
                return clipped;
            }

            clipped.extend(
                region
                    .rects()
                    .iter()
                    .filter_map(|clip_rect| clip_rect.intersection(&area)),
            );
        },
        None => clipped.push(area),
    }
    clipped
}

/// Accumulates the area touched by drawing operations
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BoundsTracker {
    enabled: bool,
    bounds: Option<Rectangle>,
}

impl BoundsTracker {
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Everything drawn since the last [reset](Self::reset)
    #[must_use]
    pub fn bounds(&self) -> Option<Rectangle> {
        self.bounds
    }

    pub fn reset(&mut self) {
        self.bounds = None;
    }

    /// Add the visible part of `rect`, does nothing while tracking is disabled
    pub fn add_clipped_bounds(&mut self, rect: &Rectangle, clip: Option<&Region>) {
        if !self.enabled {
            return;
        }

        let rect = rect.normalized();
        let visible = match clip {
            Some(region) => rect.intersection(&region.bounds()),
            None => (!rect.is_empty()).then_some(rect),
        };

        if let Some(visible) = visible {
            match &mut self.bounds {
                Some(bounds) => bounds.grow_to_contain(&visible),
                None => self.bounds = Some(visible),
            }
        }
    }
}
