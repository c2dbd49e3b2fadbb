//! Ordered dithering matrices
//!
//! All matrices are recursive Bayer matrices and index as `[y % N][x % N]`.

const BAYER_2X2: [[u8; 2]; 2] = [[0, 2], [3, 1]];

const fn build_bayer<const N: usize>() -> [[u8; N]; N] {
    let mut matrix = [[0; N]; N];

    let mut y = 0;
    while y < N {
        let mut x = 0;
        while x < N {
            let mut value = 0;
            let mut scale = 1;
            while scale < N {
                value = value * 4 + BAYER_2X2[(y / scale) % 2][(x / scale) % 2] as usize;
                scale *= 2;
            }
            matrix[y][x] = value as u8;
            x += 1;
        }
        y += 1;
    }

    matrix
}

/// Values `0..16`
pub const BAYER_4X4: [[u8; 4]; 4] = build_bayer::<4>();

/// Values `0..64`
pub const BAYER_8X8: [[u8; 8]; 8] = build_bayer::<8>();

/// Values `0..256`
pub const BAYER_16X16: [[u8; 16]; 16] = build_bayer::<16>();

#[inline]
#[must_use]
pub(crate) fn bayer_4x4(x: i32, y: i32) -> u32 {
    BAYER_4X4[y.rem_euclid(4) as usize][x.rem_euclid(4) as usize].into()
}

#[inline]
#[must_use]
pub(crate) fn bayer_8x8(x: i32, y: i32) -> u32 {
    BAYER_8X8[y.rem_euclid(8) as usize][x.rem_euclid(8) as usize].into()
}

#[inline]
#[must_use]
pub(crate) fn bayer_16x16(x: i32, y: i32) -> u32 {
    BAYER_16X16[y.rem_euclid(16) as usize][x.rem_euclid(16) as usize].into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn four_by_four() {
        assert_eq!(
            BAYER_4X4,
            [[0, 8, 2, 10], [12, 4, 14, 6], [3, 11, 1, 9], [15, 7, 13, 5]]
        );
    }

    #[test]
    fn sixteen_by_sixteen() {
        assert_eq!(&BAYER_16X16[0][..4], &[0, 128, 32, 160]);

        let mut seen = [false; 256];
        for value in BAYER_16X16.iter().flatten() {
            seen[usize::from(*value)] = true;
        }
        assert!(seen.iter().all(|&seen| seen));
    }
}
