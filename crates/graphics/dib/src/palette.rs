//! Default color tables and nearest color search

use crate::Rgbquad;

pub(crate) const DEFAULT_COLOR_TABLE_1: [Rgbquad; 2] =
    [Rgbquad::new(0x00, 0x00, 0x00), Rgbquad::new(0xff, 0xff, 0xff)];

pub(crate) const DEFAULT_COLOR_TABLE_4: [Rgbquad; 16] = [
    Rgbquad::new(0x00, 0x00, 0x00),
    Rgbquad::new(0x80, 0x00, 0x00),
    Rgbquad::new(0x00, 0x80, 0x00),
    Rgbquad::new(0x80, 0x80, 0x00),
    Rgbquad::new(0x00, 0x00, 0x80),
    Rgbquad::new(0x80, 0x00, 0x80),
    Rgbquad::new(0x00, 0x80, 0x80),
    Rgbquad::new(0x80, 0x80, 0x80),
    Rgbquad::new(0xc0, 0xc0, 0xc0),
    Rgbquad::new(0xff, 0x00, 0x00),
    Rgbquad::new(0x00, 0xff, 0x00),
    Rgbquad::new(0xff, 0xff, 0x00),
    Rgbquad::new(0x00, 0x00, 0xff),
    Rgbquad::new(0xff, 0x00, 0xff),
    Rgbquad::new(0x00, 0xff, 0xff),
    Rgbquad::new(0xff, 0xff, 0xff),
];

/// The twenty static system colors, the first ten and the last ten of every 256 color palette
const SYSTEM_COLORS: [Rgbquad; 20] = [
    Rgbquad::new(0x00, 0x00, 0x00),
    Rgbquad::new(0x80, 0x00, 0x00),
    Rgbquad::new(0x00, 0x80, 0x00),
    Rgbquad::new(0x80, 0x80, 0x00),
    Rgbquad::new(0x00, 0x00, 0x80),
    Rgbquad::new(0x80, 0x00, 0x80),
    Rgbquad::new(0x00, 0x80, 0x80),
    Rgbquad::new(0xc0, 0xc0, 0xc0),
    Rgbquad::new(0xc0, 0xdc, 0xc0),
    Rgbquad::new(0xa6, 0xca, 0xf0),
    Rgbquad::new(0xff, 0xfb, 0xf0),
    Rgbquad::new(0xa0, 0xa0, 0xa4),
    Rgbquad::new(0x80, 0x80, 0x80),
    Rgbquad::new(0xff, 0x00, 0x00),
    Rgbquad::new(0x00, 0xff, 0x00),
    Rgbquad::new(0xff, 0xff, 0x00),
    Rgbquad::new(0x00, 0x00, 0xff),
    Rgbquad::new(0xff, 0x00, 0xff),
    Rgbquad::new(0x00, 0xff, 0xff),
    Rgbquad::new(0xff, 0xff, 0xff),
];

const fn build_default_color_table_8() -> [Rgbquad; 256] {
    let mut table = [Rgbquad::new(0, 0, 0); 256];

    // A 8x8x4 color cube
    let mut index = 0;
    while index < 256 {
        table[index] = Rgbquad::new(
            (index & 7) as u8 * 0x20,
            ((index >> 3) & 7) as u8 * 0x20,
            ((index >> 6) & 3) as u8 * 0x40,
        );
        index += 1;
    }

    let mut index = 0;
    while index < 10 {
        table[index] = SYSTEM_COLORS[index];
        table[246 + index] = SYSTEM_COLORS[10 + index];
        index += 1;
    }

    table
}

pub(crate) const DEFAULT_COLOR_TABLE_8: [Rgbquad; 256] = build_default_color_table_8();

/// The color table used by indexed bitmaps that do not carry their own
#[must_use]
pub fn default_color_table(bit_count: u32) -> &'static [Rgbquad] {
    match bit_count {
        1 => &DEFAULT_COLOR_TABLE_1,
        4 => &DEFAULT_COLOR_TABLE_4,
        8 => &DEFAULT_COLOR_TABLE_8,
        _ => &[],
    }
}

/// Find the palette entry closest to the given color
///
/// Distance is the squared euclidean distance in RGB space, ties go to the lower index.
#[must_use]
pub(crate) fn nearest_index(table: &[Rgbquad], red: u8, green: u8, blue: u8) -> usize {
    let mut best_index = 0;
    let mut best_distance = u32::MAX;

    for (index, entry) in table.iter().enumerate() {
        let dr = u32::from(red.abs_diff(entry.red));
        let dg = u32::from(green.abs_diff(entry.green));
        let db = u32::from(blue.abs_diff(entry.blue));
        let distance = dr * dr + dg * dg + db * db;

        if distance == 0 {
            return index;
        }
        if distance < best_distance {
            best_distance = distance;
            best_index = index;
        }
    }

    best_index
}

/// Index into a 5 bit per channel lookup table
#[inline]
#[must_use]
pub(crate) fn lookup_key(red: u8, green: u8, blue: u8) -> usize {
    (usize::from(red & 0xf8) << 7) | (usize::from(green & 0xf8) << 2) | usize::from(blue >> 3)
}

/// Colors are matched at the center of their 5 bit cell
#[inline]
#[must_use]
pub(crate) fn cell_center(value: u8) -> u8 {
    (value & 0xf8) | 4
}

pub(crate) const LOOKUP_SIZE: usize = 1 << 15;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_table_8() {
        assert_eq!(DEFAULT_COLOR_TABLE_8[0], Rgbquad::new(0, 0, 0));
        assert_eq!(DEFAULT_COLOR_TABLE_8[9], Rgbquad::new(0xa6, 0xca, 0xf0));
        assert_eq!(DEFAULT_COLOR_TABLE_8[10], Rgbquad::new(0x40, 0x20, 0x00));
        assert_eq!(DEFAULT_COLOR_TABLE_8[255], Rgbquad::new(0xff, 0xff, 0xff));
    }

    #[test]
    fn nearest_color_prefers_lower_index() {
        let table = [
            Rgbquad::new(0, 0, 0),
            Rgbquad::new(10, 0, 0),
            Rgbquad::new(0, 10, 0),
        ];
        assert_eq!(nearest_index(&table, 5, 5, 0), 0);
        assert_eq!(nearest_index(&table, 6, 5, 0), 1);
        assert_eq!(nearest_index(&table, 0, 10, 0), 2);
        assert_eq!(lookup_key(0xff, 0xff, 0xff), LOOKUP_SIZE - 1);
    }
}
