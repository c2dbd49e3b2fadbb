//! Runs every ternary raster operation on real bitmaps and compares the result with
//! the truth table encoded in the operation code

use dib::{
    rop::{execute_rop, PatternSource, Rop3},
    BitmapInfo, BlitError, DibInfo, Rop2,
};
use math::{Point, Rectangle};

/// A pattern whose pixels are set for columns 4 to 7 of every group of eight
struct HalfPattern {
    on: u32,
}

impl PatternSource for HalfPattern {
    fn prepare(&mut self, _dib: &DibInfo<'_>) -> Result<(), BlitError> {
        Ok(())
    }

    fn fill(&mut self, dib: &mut DibInfo<'_>, rects: &[Rectangle], origin: Point, rop2: Rop2) {
        let codes = rop2.codes();
        for rect in rects {
            for y in rect.top..rect.bottom {
                for x in rect.left..rect.right {
                    let pattern = if (x - origin.x).rem_euclid(8) >= 4 { self.on } else { 0 };
                    let (and, xor) = codes.and_xor(pattern);
                    dib.rop_pixel(x, y, and, xor);
                }
            }
        }
    }
}

fn ones(bit_count: u16) -> u32 {
    match bit_count {
        32 => !0,
        bits => (1 << bits) - 1,
    }
}

/// Column `x` holds the destination bit `x & 1` and the source bit `x & 2`
fn operands(bit_count: u16) -> (DibInfo<'static>, DibInfo<'static>) {
    let info = BitmapInfo::new(8, 1, bit_count);
    let mut dst = DibInfo::allocate(&info).unwrap();
    let mut src = DibInfo::allocate(&info).unwrap();

    let on = ones(bit_count);
    for x in 0..8 {
        dst.write_pixel(x, 0, if x & 1 != 0 { on } else { 0 });
        src.write_pixel(x, 0, if x & 2 != 0 { on } else { 0 });
    }
    (dst, src)
}

fn check_all_operations(bit_count: u16) {
    let on = ones(bit_count);
    let rect = Rectangle::new(0, 0, 8, 1);

    for index in 0..=255 {
        let rop = Rop3::from_index(index);
        let (mut dst, src) = operands(bit_count);

        execute_rop(
            &mut dst,
            &rect,
            &[rect],
            Some((&src, rect)),
            &mut HalfPattern { on },
            Point::ORIGIN,
            rop,
        )
        .unwrap();

        for x in 0..8 {
            let (dst_bit, src_bit, pat_bit) = (x & 1 != 0, x & 2 != 0, x & 4 != 0);
            let expected = if rop.evaluate(src_bit, dst_bit, pat_bit) { on } else { 0 };
            assert_eq!(
                dst.read_pixel(x, 0) & on,
                expected,
                "rop {index:#04x} at {bit_count} bpp with S={src_bit} D={dst_bit} P={pat_bit}"
            );
        }

        // The caller's source is never modified
        assert_eq!(src.bits(), operands(bit_count).1.bits(), "rop {index:#04x}");
    }
}

#[test]
fn monochrome() {
    check_all_operations(1);
}

#[test]
fn indexed() {
    check_all_operations(8);
}

#[test]
fn true_color() {
    check_all_operations(32);
}

#[test]
fn missing_source_is_rejected() {
    let (mut dst, _) = operands(8);
    let rect = Rectangle::new(0, 0, 8, 1);
    let before = dst.bits().to_vec();

    let result = execute_rop(
        &mut dst,
        &rect,
        &[rect],
        None,
        &mut HalfPattern { on: 0xff },
        Point::ORIGIN,
        Rop3::SRCCOPY,
    );
    assert_eq!(result, Err(BlitError::InvalidParameter));
    assert_eq!(dst.bits(), before.as_slice());
}
