use super::{step, Operand::*, RopStep};
use crate::Rop2::*;

// Generated table, one entry per ternary raster operation index.
// The result is left in the destination if any step writes to it, otherwise in the source.

pub(super) static ROP_TABLE: [&[RopStep]; 256] = [
    /* 0x00 */ &[step(Pat, Dst, Black)],
    /* 0x01 */ &[step(Pat, Dst, NotMergePen), step(Src, Dst, MaskNotPen)],
    /* 0x02 */ &[step(Pat, Dst, MaskNotPen), step(Src, Dst, MaskNotPen)],
    /* 0x03 */ &[step(Pat, Src, NotMergePen)],
    /* 0x04 */ &[step(Pat, Dst, NotMergePen), step(Src, Dst, MaskPen)],
    /* 0x05 */ &[step(Pat, Dst, NotMergePen)],
    /* 0x06 */ &[step(Src, Dst, XorPen), step(Pat, Dst, MaskNotPen)],
    /* 0x07 */ &[step(Src, Dst, NotMaskPen), step(Pat, Dst, MaskNotPen)],
    /* 0x08 */ &[step(Pat, Dst, MaskNotPen), step(Src, Dst, MaskPen)],
    /* 0x09 */ &[step(Src, Dst, XorPen), step(Pat, Dst, NotMergePen)],
    /* 0x0a */ &[step(Pat, Dst, MaskNotPen)],
    /* 0x0b */ &[step(Src, Dst, MaskPenNot), step(Pat, Dst, NotMergePen)],
    /* 0x0c */ &[step(Pat, Src, MaskNotPen)],
    /* 0x0d */ &[step(Src, Dst, MaskNotPen), step(Pat, Dst, NotMergePen)],
    /* 0x0e */ &[step(Src, Dst, NotMergePen), step(Pat, Dst, NotMergePen)],
    /* 0x0f */ &[step(Pat, Dst, NotCopyPen)],
    /* 0x10 */ &[step(Pat, Dst, MaskPenNot), step(Src, Dst, MaskNotPen)],
    /* 0x11 */ &[step(Src, Dst, NotMergePen)],
    /* 0x12 */ &[step(Pat, Dst, XorPen), step(Src, Dst, MaskNotPen)],
    /* 0x13 */ &[step(Pat, Dst, NotMaskPen), step(Src, Dst, MaskNotPen)],
    /* 0x14 */ &[step(Pat, Src, XorPen), step(Src, Dst, MaskPenNot)],
    /* 0x15 */ &[step(Pat, Src, NotMaskPen), step(Src, Dst, MaskPenNot)],
    /* 0x16 */ &[step(Pat, Dst, XorPen), step(Src, Dst, XorPen), step(Pat, Src, NotMaskPen), step(Src, Dst, MaskPen)],
    /* 0x17 */ &[step(Pat, Dst, XorPen), step(Pat, Src, XorPen), step(Src, Dst, NotMaskPen), step(Pat, Dst, XorPen)],
    /* 0x18 */ &[step(Pat, Dst, XorPen), step(Pat, Src, XorPen), step(Src, Dst, MaskPen)],
    /* 0x19 */ &[step(Src, Dst, XorPen), step(Pat, Src, NotMaskPen), step(Src, Dst, MaskPenNot)],
    /* 0x1a */ &[step(Pat, Dst, XorPen), step(Pat, Src, NotMaskPen), step(Src, Dst, MaskPen)],
    /* 0x1b */ &[step(Pat, Src, XorPen), step(Src, Dst, MaskPenNot), step(Pat, Dst, NotXorPen)],
    /* 0x1c */ &[step(Pat, Dst, NotMaskPen), step(Src, Dst, MaskNotPen), step(Pat, Dst, NotXorPen)],
    /* 0x1d */ &[step(Pat, Dst, XorPen), step(Src, Dst, MaskNotPen), step(Pat, Dst, NotXorPen)],
    /* 0x1e */ &[step(Src, Dst, NotMergePen), step(Pat, Dst, NotXorPen)],
    /* 0x1f */ &[step(Src, Dst, NotMergePen), step(Pat, Dst, MergeNotPen)],
    /* 0x20 */ &[step(Pat, Dst, NotMaskPen), step(Src, Dst, NotMergePen)],
    /* 0x21 */ &[step(Pat, Dst, XorPen), step(Src, Dst, NotMergePen)],
    /* 0x22 */ &[step(Src, Dst, MaskNotPen)],
    /* 0x23 */ &[step(Pat, Dst, MaskPenNot), step(Src, Dst, NotMergePen)],
    /* 0x24 */ &[step(Pat, Dst, XorPen), step(Pat, Src, XorPen), step(Src, Dst, MaskPenNot)],
    /* 0x25 */ &[step(Pat, Dst, XorPen), step(Pat, Src, NotMaskPen), step(Src, Dst, MaskPenNot)],
    /* 0x26 */ &[step(Src, Dst, XorPen), step(Pat, Src, NotMaskPen), step(Src, Dst, MaskPen)],
    /* 0x27 */ &[step(Pat, Src, XorPen), step(Src, Dst, NotMaskPen), step(Pat, Dst, XorPen)],
    /* 0x28 */ &[step(Pat, Src, XorPen), step(Src, Dst, MaskPen)],
    /* 0x29 */ &[step(Pat, Dst, XorPen), step(Src, Dst, XorPen), step(Pat, Src, NotMaskPen), step(Src, Dst, MaskPenNot)],
    /* 0x2a */ &[step(Pat, Src, NotMaskPen), step(Src, Dst, MaskPen)],
    /* 0x2b */ &[step(Pat, Dst, XorPen), step(Pat, Src, XorPen), step(Src, Dst, MaskPenNot), step(Pat, Dst, NotXorPen)],
    /* 0x2c */ &[step(Pat, Dst, MaskPenNot), step(Src, Dst, NotMergePen), step(Pat, Dst, NotXorPen)],
    /* 0x2d */ &[step(Src, Dst, MaskNotPen), step(Pat, Dst, NotXorPen)],
    /* 0x2e */ &[step(Pat, Dst, XorPen), step(Src, Dst, NotMergePen), step(Pat, Dst, NotXorPen)],
    /* 0x2f */ &[step(Src, Dst, MaskNotPen), step(Pat, Dst, MergeNotPen)],
    /* 0x30 */ &[step(Pat, Src, MaskPenNot)],
    /* 0x31 */ &[step(Pat, Dst, MaskNotPen), step(Src, Dst, NotMergePen)],
    /* 0x32 */ &[step(Pat, Dst, NotMergePen), step(Src, Dst, NotMergePen)],
    /* 0x33 */ &[step(Src, Dst, NotCopyPen)],
    /* 0x34 */ &[step(Pat, Dst, MaskNotPen), step(Src, Dst, MaskPenNot), step(Pat, Dst, XorPen)],
    /* 0x35 */ &[step(Pat, Dst, NotMergePen), step(Pat, Src, MaskPenNot), step(Src, Dst, XorPen)],
    /* 0x36 */ &[step(Pat, Dst, NotMergePen), step(Src, Dst, NotXorPen)],
    /* 0x37 */ &[step(Pat, Dst, NotMergePen), step(Src, Dst, MergeNotPen)],
    /* 0x38 */ &[step(Pat, Dst, NotMergePen), step(Src, Dst, MaskPenNot), step(Pat, Dst, XorPen)],
    /* 0x39 */ &[step(Pat, Dst, MaskNotPen), step(Src, Dst, NotXorPen)],
    /* 0x3a */ &[step(Pat, Dst, NotMergePen), step(Pat, Src, NotMaskPen), step(Src, Dst, MaskPenNot)],
    /* 0x3b */ &[step(Pat, Dst, MaskNotPen), step(Src, Dst, MergeNotPen)],
    /* 0x3c */ &[step(Pat, Src, XorPen)],
    /* 0x3d */ &[step(Pat, Dst, NotMergePen), step(Src, Dst, NotMergePen), step(Pat, Dst, NotXorPen)],
    /* 0x3e */ &[step(Pat, Dst, MaskNotPen), step(Src, Dst, NotMergePen), step(Pat, Dst, NotXorPen)],
    /* 0x3f */ &[step(Pat, Src, NotMaskPen)],
    /* 0x40 */ &[step(Pat, Dst, MaskPenNot), step(Src, Dst, MaskPen)],
    /* 0x41 */ &[step(Pat, Src, XorPen), step(Src, Dst, NotMergePen)],
    /* 0x42 */ &[step(Pat, Dst, XorPen), step(Pat, Src, XorPen), step(Src, Dst, MaskNotPen)],
    /* 0x43 */ &[step(Pat, Dst, NotMaskPen), step(Src, Dst, NotMaskPen), step(Pat, Dst, XorPen)],
    /* 0x44 */ &[step(Src, Dst, MaskPenNot)],
    /* 0x45 */ &[step(Pat, Src, MaskPenNot), step(Src, Dst, NotMergePen)],
    /* 0x46 */ &[step(Src, Dst, XorPen), step(Pat, Src, MaskPenNot), step(Src, Dst, MaskNotPen)],
    /* 0x47 */ &[step(Pat, Dst, XorPen), step(Src, Dst, NotMaskPen), step(Pat, Dst, XorPen)],
    /* 0x48 */ &[step(Pat, Dst, XorPen), step(Src, Dst, MaskPen)],
    /* 0x49 */ &[step(Pat, Dst, XorPen), step(Src, Dst, XorPen), step(Pat, Src, MaskPenNot), step(Src, Dst, NotMergePen)],
    /* 0x4a */ &[step(Pat, Dst, XorPen), step(Pat, Src, MaskPenNot), step(Src, Dst, MaskNotPen)],
    /* 0x4b */ &[step(Src, Dst, MaskPenNot), step(Pat, Dst, NotXorPen)],
    /* 0x4c */ &[step(Pat, Dst, NotMaskPen), step(Src, Dst, MaskPen)],
    /* 0x4d */ &[step(Pat, Dst, XorPen), step(Pat, Src, XorPen), step(Src, Dst, MaskNotPen), step(Pat, Dst, NotXorPen)],
    /* 0x4e */ &[step(Pat, Src, XorPen), step(Src, Dst, NotMergePen), step(Pat, Dst, NotXorPen)],
    /* 0x4f */ &[step(Src, Dst, MaskPenNot), step(Pat, Dst, MergeNotPen)],
    /* 0x50 */ &[step(Pat, Dst, MaskPenNot)],
    /* 0x51 */ &[step(Pat, Src, MaskNotPen), step(Src, Dst, NotMergePen)],
    /* 0x52 */ &[step(Pat, Dst, XorPen), step(Pat, Src, MaskNotPen), step(Src, Dst, MaskNotPen)],
    /* 0x53 */ &[step(Pat, Dst, MaskPenNot), step(Pat, Src, NotMergePen), step(Src, Dst, XorPen)],
    /* 0x54 */ &[step(Pat, Src, NotMergePen), step(Src, Dst, NotMergePen)],
    /* 0x55 */ &[step(Pat, Dst, Not)],
    /* 0x56 */ &[step(Pat, Src, NotMergePen), step(Src, Dst, NotXorPen)],
    /* 0x57 */ &[step(Pat, Src, NotMergePen), step(Src, Dst, MergePenNot)],
    /* 0x58 */ &[step(Pat, Dst, XorPen), step(Pat, Src, NotMergePen), step(Src, Dst, MaskNotPen)],
    /* 0x59 */ &[step(Pat, Src, MaskNotPen), step(Src, Dst, NotXorPen)],
    /* 0x5a */ &[step(Pat, Dst, XorPen)],
    /* 0x5b */ &[step(Pat, Dst, XorPen), step(Pat, Src, NotMergePen), step(Src, Dst, MergePen)],
    /* 0x5c */ &[step(Pat, Dst, MaskPenNot), step(Pat, Src, MaskNotPen), step(Src, Dst, XorPen)],
    /* 0x5d */ &[step(Pat, Src, MaskNotPen), step(Src, Dst, MergePenNot)],
    /* 0x5e */ &[step(Pat, Dst, XorPen), step(Pat, Src, MaskNotPen), step(Src, Dst, MergePen)],
    /* 0x5f */ &[step(Pat, Dst, NotMaskPen)],
    /* 0x60 */ &[step(Src, Dst, XorPen), step(Pat, Dst, MaskPen)],
    /* 0x61 */ &[step(Pat, Dst, XorPen), step(Src, Dst, XorPen), step(Pat, Src, MaskNotPen), step(Src, Dst, NotMergePen)],
    /* 0x62 */ &[step(Src, Dst, XorPen), step(Pat, Src, MaskNotPen), step(Src, Dst, MaskNotPen)],
    /* 0x63 */ &[step(Pat, Dst, MaskPenNot), step(Src, Dst, NotXorPen)],
    /* 0x64 */ &[step(Src, Dst, XorPen), step(Pat, Src, NotMergePen), step(Src, Dst, MaskNotPen)],
    /* 0x65 */ &[step(Pat, Src, MaskPenNot), step(Src, Dst, NotXorPen)],
    /* 0x66 */ &[step(Src, Dst, XorPen)],
    /* 0x67 */ &[step(Src, Dst, XorPen), step(Pat, Src, NotMergePen), step(Src, Dst, MergePen)],
    /* 0x68 */ &[step(Pat, Dst, XorPen), step(Src, Dst, XorPen), step(Pat, Src, NotMergePen), step(Src, Dst, NotMergePen)],
    /* 0x69 */ &[step(Pat, Dst, XorPen), step(Src, Dst, NotXorPen)],
    /* 0x6a */ &[step(Pat, Src, NotMaskPen), step(Src, Dst, NotXorPen)],
    /* 0x6b */ &[step(Pat, Dst, XorPen), step(Src, Dst, XorPen), step(Pat, Src, NotMergePen), step(Src, Dst, MergePenNot)],
    /* 0x6c */ &[step(Pat, Dst, NotMaskPen), step(Src, Dst, NotXorPen)],
    /* 0x6d */ &[step(Pat, Dst, XorPen), step(Src, Dst, XorPen), step(Pat, Src, MaskNotPen), step(Src, Dst, MergePenNot)],
    /* 0x6e */ &[step(Src, Dst, XorPen), step(Pat, Src, MaskNotPen), step(Src, Dst, MergePen)],
    /* 0x6f */ &[step(Src, Dst, XorPen), step(Pat, Dst, MergeNotPen)],
    /* 0x70 */ &[step(Src, Dst, NotMaskPen), step(Pat, Dst, MaskPen)],
    /* 0x71 */ &[step(Pat, Dst, XorPen), step(Pat, Src, XorPen), step(Src, Dst, NotMergePen), step(Pat, Dst, XorPen)],
    /* 0x72 */ &[step(Pat, Src, XorPen), step(Src, Dst, MaskNotPen), step(Pat, Dst, XorPen)],
    /* 0x73 */ &[step(Pat, Dst, MaskPenNot), step(Src, Dst, MergeNotPen)],
    /* 0x74 */ &[step(Pat, Dst, XorPen), step(Src, Dst, MaskPenNot), step(Pat, Dst, XorPen)],
    /* 0x75 */ &[step(Pat, Src, MaskPenNot), step(Src, Dst, MergePenNot)],
    /* 0x76 */ &[step(Src, Dst, XorPen), step(Pat, Src, MaskPenNot), step(Src, Dst, MergePen)],
    /* 0x77 */ &[step(Src, Dst, NotMaskPen)],
    /* 0x78 */ &[step(Src, Dst, NotMaskPen), step(Pat, Dst, NotXorPen)],
    /* 0x79 */ &[step(Pat, Dst, XorPen), step(Src, Dst, XorPen), step(Pat, Src, MaskPenNot), step(Src, Dst, MergePenNot)],
    /* 0x7a */ &[step(Pat, Dst, XorPen), step(Pat, Src, MaskPenNot), step(Src, Dst, MergePen)],
    /* 0x7b */ &[step(Pat, Dst, XorPen), step(Src, Dst, MergeNotPen)],
    /* 0x7c */ &[step(Pat, Dst, MaskPenNot), step(Src, Dst, MaskPenNot), step(Pat, Dst, XorPen)],
    /* 0x7d */ &[step(Pat, Src, XorPen), step(Src, Dst, MergePenNot)],
    /* 0x7e */ &[step(Pat, Dst, XorPen), step(Pat, Src, XorPen), step(Src, Dst, MergePen)],
    /* 0x7f */ &[step(Pat, Dst, NotMaskPen), step(Src, Dst, MergeNotPen)],
    /* 0x80 */ &[step(Pat, Dst, NotMaskPen), step(Src, Dst, MaskPenNot)],
    /* 0x81 */ &[step(Pat, Dst, XorPen), step(Pat, Src, XorPen), step(Src, Dst, NotMergePen)],
    /* 0x82 */ &[step(Pat, Src, XorPen), step(Src, Dst, MaskNotPen)],
    /* 0x83 */ &[step(Pat, Dst, MaskPenNot), step(Src, Dst, MaskPenNot), step(Pat, Dst, NotXorPen)],
    /* 0x84 */ &[step(Pat, Dst, XorPen), step(Src, Dst, MaskPenNot)],
    /* 0x85 */ &[step(Pat, Dst, XorPen), step(Pat, Src, MaskPenNot), step(Src, Dst, NotMergePen)],
    /* 0x86 */ &[step(Pat, Dst, XorPen), step(Src, Dst, XorPen), step(Pat, Src, MaskPenNot), step(Src, Dst, MaskNotPen)],
    /* 0x87 */ &[step(Src, Dst, NotMaskPen), step(Pat, Dst, XorPen)],
    /* 0x88 */ &[step(Src, Dst, MaskPen)],
    /* 0x89 */ &[step(Src, Dst, XorPen), step(Pat, Src, MaskPenNot), step(Src, Dst, NotMergePen)],
    /* 0x8a */ &[step(Pat, Src, MaskPenNot), step(Src, Dst, MaskNotPen)],
    /* 0x8b */ &[step(Pat, Dst, XorPen), step(Src, Dst, MaskPenNot), step(Pat, Dst, NotXorPen)],
    /* 0x8c */ &[step(Pat, Dst, MaskPenNot), step(Src, Dst, MaskPenNot)],
    /* 0x8d */ &[step(Pat, Src, XorPen), step(Src, Dst, MaskNotPen), step(Pat, Dst, NotXorPen)],
    /* 0x8e */ &[step(Pat, Dst, XorPen), step(Pat, Src, XorPen), step(Src, Dst, NotMergePen), step(Pat, Dst, NotXorPen)],
    /* 0x8f */ &[step(Src, Dst, NotMaskPen), step(Pat, Dst, NotMaskPen)],
    /* 0x90 */ &[step(Src, Dst, XorPen), step(Pat, Dst, MaskPenNot)],
    /* 0x91 */ &[step(Src, Dst, XorPen), step(Pat, Src, MaskNotPen), step(Src, Dst, NotMergePen)],
    /* 0x92 */ &[step(Pat, Dst, XorPen), step(Src, Dst, XorPen), step(Pat, Src, MaskNotPen), step(Src, Dst, MaskNotPen)],
    /* 0x93 */ &[step(Pat, Dst, NotMaskPen), step(Src, Dst, XorPen)],
    /* 0x94 */ &[step(Pat, Dst, XorPen), step(Src, Dst, XorPen), step(Pat, Src, NotMergePen), step(Src, Dst, MaskNotPen)],
    /* 0x95 */ &[step(Pat, Src, NotMaskPen), step(Src, Dst, XorPen)],
    /* 0x96 */ &[step(Pat, Dst, XorPen), step(Src, Dst, XorPen)],
    /* 0x97 */ &[step(Pat, Dst, XorPen), step(Src, Dst, XorPen), step(Pat, Src, NotMergePen), step(Src, Dst, MergePen)],
    /* 0x98 */ &[step(Src, Dst, XorPen), step(Pat, Src, NotMergePen), step(Src, Dst, NotMergePen)],
    /* 0x99 */ &[step(Src, Dst, NotXorPen)],
    /* 0x9a */ &[step(Pat, Src, MaskPenNot), step(Src, Dst, XorPen)],
    /* 0x9b */ &[step(Src, Dst, XorPen), step(Pat, Src, NotMergePen), step(Src, Dst, MergePenNot)],
    /* 0x9c */ &[step(Pat, Dst, MaskPenNot), step(Src, Dst, XorPen)],
    /* 0x9d */ &[step(Src, Dst, XorPen), step(Pat, Src, MaskNotPen), step(Src, Dst, MergePenNot)],
    /* 0x9e */ &[step(Pat, Dst, XorPen), step(Src, Dst, XorPen), step(Pat, Src, MaskNotPen), step(Src, Dst, MergePen)],
    /* 0x9f */ &[step(Src, Dst, XorPen), step(Pat, Dst, NotMaskPen)],
    /* 0xa0 */ &[step(Pat, Dst, MaskPen)],
    /* 0xa1 */ &[step(Pat, Dst, XorPen), step(Pat, Src, MaskNotPen), step(Src, Dst, NotMergePen)],
    /* 0xa2 */ &[step(Pat, Src, MaskNotPen), step(Src, Dst, MaskNotPen)],
    /* 0xa3 */ &[step(Pat, Dst, MaskPenNot), step(Pat, Src, MaskNotPen), step(Src, Dst, NotMergePen)],
    /* 0xa4 */ &[step(Pat, Dst, XorPen), step(Pat, Src, NotMergePen), step(Src, Dst, NotMergePen)],
    /* 0xa5 */ &[step(Pat, Dst, NotXorPen)],
    /* 0xa6 */ &[step(Pat, Src, MaskNotPen), step(Src, Dst, XorPen)],
    /* 0xa7 */ &[step(Pat, Dst, XorPen), step(Pat, Src, NotMergePen), step(Src, Dst, MergePenNot)],
    /* 0xa8 */ &[step(Pat, Src, NotMergePen), step(Src, Dst, MaskNotPen)],
    /* 0xa9 */ &[step(Pat, Src, NotMergePen), step(Src, Dst, XorPen)],
    /* 0xaa */ &[step(Pat, Dst, Nop)],
    /* 0xab */ &[step(Pat, Src, NotMergePen), step(Src, Dst, MergePen)],
    /* 0xac */ &[step(Pat, Dst, MaskPenNot), step(Pat, Src, NotMergePen), step(Src, Dst, NotMergePen)],
    /* 0xad */ &[step(Pat, Dst, XorPen), step(Pat, Src, MaskNotPen), step(Src, Dst, MergePenNot)],
    /* 0xae */ &[step(Pat, Src, MaskNotPen), step(Src, Dst, MergePen)],
    /* 0xaf */ &[step(Pat, Dst, MergeNotPen)],
    /* 0xb0 */ &[step(Src, Dst, MaskPenNot), step(Pat, Dst, MaskPenNot)],
    /* 0xb1 */ &[step(Pat, Src, XorPen), step(Src, Dst, NotMergePen), step(Pat, Dst, XorPen)],
    /* 0xb2 */ &[step(Pat, Dst, XorPen), step(Pat, Src, XorPen), step(Src, Dst, MaskNotPen), step(Pat, Dst, XorPen)],
    /* 0xb3 */ &[step(Pat, Dst, NotMaskPen), step(Src, Dst, NotMaskPen)],
    /* 0xb4 */ &[step(Src, Dst, MaskPenNot), step(Pat, Dst, XorPen)],
    /* 0xb5 */ &[step(Pat, Dst, XorPen), step(Pat, Src, MaskPenNot), step(Src, Dst, MergePenNot)],
    /* 0xb6 */ &[step(Pat, Dst, XorPen), step(Src, Dst, XorPen), step(Pat, Src, MaskPenNot), step(Src, Dst, MergePen)],
    /* 0xb7 */ &[step(Pat, Dst, XorPen), step(Src, Dst, NotMaskPen)],
    /* 0xb8 */ &[step(Pat, Dst, XorPen), step(Src, Dst, NotMaskPen), step(Pat, Dst, NotXorPen)],
    /* 0xb9 */ &[step(Src, Dst, XorPen), step(Pat, Src, MaskPenNot), step(Src, Dst, MergePenNot)],
    /* 0xba */ &[step(Pat, Src, MaskPenNot), step(Src, Dst, MergePen)],
    /* 0xbb */ &[step(Src, Dst, MergeNotPen)],
    /* 0xbc */ &[step(Pat, Dst, NotMaskPen), step(Src, Dst, NotMaskPen), step(Pat, Dst, NotXorPen)],
    /* 0xbd */ &[step(Pat, Dst, XorPen), step(Pat, Src, XorPen), step(Src, Dst, MergePenNot)],
    /* 0xbe */ &[step(Pat, Src, XorPen), step(Src, Dst, MergePen)],
    /* 0xbf */ &[step(Pat, Dst, MaskPenNot), step(Src, Dst, NotMaskPen)],
    /* 0xc0 */ &[step(Pat, Src, MaskPen)],
    /* 0xc1 */ &[step(Pat, Dst, MaskNotPen), step(Src, Dst, NotMergePen), step(Pat, Dst, XorPen)],
    /* 0xc2 */ &[step(Pat, Dst, NotMergePen), step(Src, Dst, NotMergePen), step(Pat, Dst, XorPen)],
    /* 0xc3 */ &[step(Pat, Src, NotXorPen)],
    /* 0xc4 */ &[step(Pat, Dst, MaskNotPen), step(Src, Dst, MaskPenNot)],
    /* 0xc5 */ &[step(Pat, Dst, NotMergePen), step(Pat, Src, NotMaskPen), step(Src, Dst, NotXorPen)],
    /* 0xc6 */ &[step(Pat, Dst, MaskNotPen), step(Src, Dst, XorPen)],
    /* 0xc7 */ &[step(Pat, Dst, NotMergePen), step(Src, Dst, MaskPenNot), step(Pat, Dst, NotXorPen)],
    /* 0xc8 */ &[step(Pat, Dst, NotMergePen), step(Src, Dst, MaskPenNot)],
    /* 0xc9 */ &[step(Pat, Dst, NotMergePen), step(Src, Dst, XorPen)],
    /* 0xca */ &[step(Pat, Dst, NotMergePen), step(Pat, Src, MaskPenNot), step(Src, Dst, NotMergePen)],
    /* 0xcb */ &[step(Pat, Dst, MaskNotPen), step(Src, Dst, MaskPenNot), step(Pat, Dst, NotXorPen)],
    /* 0xcc */ &[],
    /* 0xcd */ &[step(Pat, Dst, NotMergePen), step(Src, Dst, MergePen)],
    /* 0xce */ &[step(Pat, Dst, MaskNotPen), step(Src, Dst, MergePen)],
    /* 0xcf */ &[step(Pat, Src, MergeNotPen)],
    /* 0xd0 */ &[step(Src, Dst, MaskNotPen), step(Pat, Dst, MaskPenNot)],
    /* 0xd1 */ &[step(Pat, Dst, XorPen), step(Src, Dst, NotMergePen), step(Pat, Dst, XorPen)],
    /* 0xd2 */ &[step(Src, Dst, MaskNotPen), step(Pat, Dst, XorPen)],
    /* 0xd3 */ &[step(Pat, Dst, MaskPenNot), step(Src, Dst, NotMergePen), step(Pat, Dst, XorPen)],
    /* 0xd4 */ &[step(Pat, Dst, XorPen), step(Pat, Src, XorPen), step(Src, Dst, MaskPenNot), step(Pat, Dst, XorPen)],
    /* 0xd5 */ &[step(Pat, Src, NotMaskPen), step(Src, Dst, NotMaskPen)],
    /* 0xd6 */ &[step(Pat, Dst, XorPen), step(Src, Dst, XorPen), step(Pat, Src, NotMaskPen), step(Src, Dst, MergeNotPen)],
    /* 0xd7 */ &[step(Pat, Src, XorPen), step(Src, Dst, NotMaskPen)],
    /* 0xd8 */ &[step(Pat, Src, XorPen), step(Src, Dst, NotMaskPen), step(Pat, Dst, NotXorPen)],
    /* 0xd9 */ &[step(Src, Dst, XorPen), step(Pat, Src, NotMaskPen), step(Src, Dst, NotMaskPen)],
    /* 0xda */ &[step(Pat, Dst, XorPen), step(Pat, Src, NotMaskPen), step(Src, Dst, MergeNotPen)],
    /* 0xdb */ &[step(Pat, Dst, XorPen), step(Pat, Src, XorPen), step(Src, Dst, MergeNotPen)],
    /* 0xdc */ &[step(Pat, Dst, MaskPenNot), step(Src, Dst, MergePen)],
    /* 0xdd */ &[step(Src, Dst, MergePenNot)],
    /* 0xde */ &[step(Pat, Dst, XorPen), step(Src, Dst, MergePen)],
    /* 0xdf */ &[step(Pat, Dst, NotMaskPen), step(Src, Dst, MergePen)],
    /* 0xe0 */ &[step(Src, Dst, NotMergePen), step(Pat, Dst, MaskPenNot)],
    /* 0xe1 */ &[step(Src, Dst, NotMergePen), step(Pat, Dst, XorPen)],
    /* 0xe2 */ &[step(Pat, Dst, XorPen), step(Src, Dst, MaskNotPen), step(Pat, Dst, XorPen)],
    /* 0xe3 */ &[step(Pat, Dst, NotMaskPen), step(Src, Dst, MaskNotPen), step(Pat, Dst, XorPen)],
    /* 0xe4 */ &[step(Pat, Src, XorPen), step(Src, Dst, MaskPenNot), step(Pat, Dst, XorPen)],
    /* 0xe5 */ &[step(Pat, Dst, XorPen), step(Pat, Src, NotMaskPen), step(Src, Dst, NotMaskPen)],
    /* 0xe6 */ &[step(Src, Dst, XorPen), step(Pat, Src, NotMaskPen), step(Src, Dst, MergeNotPen)],
    /* 0xe7 */ &[step(Pat, Dst, XorPen), step(Pat, Src, XorPen), step(Src, Dst, NotMaskPen)],
    /* 0xe8 */ &[step(Pat, Dst, XorPen), step(Pat, Src, XorPen), step(Src, Dst, NotMaskPen), step(Pat, Dst, NotXorPen)],
    /* 0xe9 */ &[step(Pat, Dst, XorPen), step(Src, Dst, XorPen), step(Pat, Src, NotMaskPen), step(Src, Dst, NotMaskPen)],
    /* 0xea */ &[step(Pat, Src, NotMaskPen), step(Src, Dst, MergeNotPen)],
    /* 0xeb */ &[step(Pat, Src, XorPen), step(Src, Dst, MergeNotPen)],
    /* 0xec */ &[step(Pat, Dst, NotMaskPen), step(Src, Dst, MergePenNot)],
    /* 0xed */ &[step(Pat, Dst, XorPen), step(Src, Dst, MergePenNot)],
    /* 0xee */ &[step(Src, Dst, MergePen)],
    /* 0xef */ &[step(Pat, Dst, MaskPenNot), step(Src, Dst, MergePenNot)],
    /* 0xf0 */ &[step(Pat, Dst, CopyPen)],
    /* 0xf1 */ &[step(Src, Dst, NotMergePen), step(Pat, Dst, MergePen)],
    /* 0xf2 */ &[step(Src, Dst, MaskNotPen), step(Pat, Dst, MergePen)],
    /* 0xf3 */ &[step(Pat, Src, MergePenNot)],
    /* 0xf4 */ &[step(Src, Dst, MaskPenNot), step(Pat, Dst, MergePen)],
    /* 0xf5 */ &[step(Pat, Dst, MergePenNot)],
    /* 0xf6 */ &[step(Src, Dst, XorPen), step(Pat, Dst, MergePen)],
    /* 0xf7 */ &[step(Pat, Dst, MaskNotPen), step(Src, Dst, NotMaskPen)],
    /* 0xf8 */ &[step(Src, Dst, NotMaskPen), step(Pat, Dst, MergePenNot)],
    /* 0xf9 */ &[step(Src, Dst, XorPen), step(Pat, Dst, MergePenNot)],
    /* 0xfa */ &[step(Pat, Dst, MergePen)],
    /* 0xfb */ &[step(Pat, Dst, NotMergePen), step(Src, Dst, NotMaskPen)],
    /* 0xfc */ &[step(Pat, Src, MergePen)],
    /* 0xfd */ &[step(Pat, Dst, MaskNotPen), step(Src, Dst, MergePenNot)],
    /* 0xfe */ &[step(Pat, Dst, NotMergePen), step(Src, Dst, MergePenNot)],
    /* 0xff */ &[step(Pat, Dst, White)],
];
