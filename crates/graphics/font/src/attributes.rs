use std::hash::{Hash, Hasher};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Style {
    #[default]
    Normal,
    Italic,

    /// Font is slanted by the specified number of degrees
    Oblique(i8),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Weight(pub u16);

impl Weight {
    pub const THIN: Self = Self(100);
    pub const EXTRA_LIGHT: Self = Self(200);
    pub const LIGHT: Self = Self(300);
    pub const NORMAL: Self = Self(400);
    pub const MEDIUM: Self = Self(500);
    pub const SEMI_BOLD: Self = Self(600);
    pub const BOLD: Self = Self(700);
    pub const EXTRA_BOLD: Self = Self(800);
    pub const BLACK: Self = Self(900);
}

impl Default for Weight {
    fn default() -> Self {
        Self::NORMAL
    }
}

/// How glyphs of a font are rendered
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum AntialiasMode {
    /// One bit per pixel, stored with the two gray levels `0` and `16`
    Bilevel,

    /// 17 levels of gray
    #[default]
    Gray,

    /// Separate coverage per color channel, for LCD screens with a horizontal RGB layout
    SubpixelRgb,

    /// Like [SubpixelRgb](Self::SubpixelRgb), with the blue subpixel on the left
    SubpixelBgr,
}

impl AntialiasMode {
    #[must_use]
    pub fn is_subpixel(self) -> bool {
        matches!(self, Self::SubpixelRgb | Self::SubpixelBgr)
    }
}

/// Everything that distinguishes one realized font from another
///
/// Face names are compared without regard to ASCII case.
#[derive(Clone, Debug, Default)]
pub struct FontAttributes {
    pub face: String,

    /// Character height in pixels
    pub height: i32,

    /// Average character width in pixels, `0` picks one that matches the height
    pub width: i32,

    /// Angle of the baseline, in tenths of a degree
    pub escapement: i32,

    /// Angle of each glyph, in tenths of a degree
    pub orientation: i32,

    pub weight: Weight,
    pub style: Style,
    pub underline: bool,
    pub strikeout: bool,
    pub antialias: AntialiasMode,
}

impl FontAttributes {
    #[must_use]
    pub fn new(face: &str, height: i32) -> Self {
        Self {
            face: face.to_owned(),
            height,
            ..Default::default()
        }
    }
}

impl PartialEq for FontAttributes {
    fn eq(&self, other: &Self) -> bool {
        self.face.eq_ignore_ascii_case(&other.face)
            && self.height == other.height
            && self.width == other.width
            && self.escapement == other.escapement
            && self.orientation == other.orientation
            && self.weight == other.weight
            && self.style == other.style
            && self.underline == other.underline
            && self.strikeout == other.strikeout
            && self.antialias == other.antialias
    }
}

impl Eq for FontAttributes {}

impl Hash for FontAttributes {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for byte in self.face.bytes() {
            state.write_u8(byte.to_ascii_lowercase());
        }
        self.height.hash(state);
        self.width.hash(state);
        self.escapement.hash(state);
        self.orientation.hash(state);
        self.weight.hash(state);
        self.style.hash(state);
        self.underline.hash(state);
        self.strikeout.hash(state);
        self.antialias.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use std::collections::hash_map::DefaultHasher;

    use super::*;

    fn hash(attributes: &FontAttributes) -> u64 {
        let mut hasher = DefaultHasher::new();
        attributes.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn face_names_ignore_case() {
        let a = FontAttributes::new("Tahoma", 12);
        let b = FontAttributes::new("TAHOMA", 12);
        assert_eq!(a, b);
        assert_eq!(hash(&a), hash(&b));

        let mut bold = b.clone();
        bold.weight = Weight::BOLD;
        assert_ne!(a, bold);
    }
}
