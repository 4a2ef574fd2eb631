//! Bit-field assembly helper shared by every instruction format encoder.

use std::ops::Range;

/// Merges `bitfields` into a single 32-bit value. Each entry is a tuple of
/// `(dst_range, src_value, src_range)`; the bits of `src_value` selected by
/// `src_range` are copied into `dst_range` of the result.
///
/// Panics if any two destination ranges overlap, if a destination range
/// crosses the 32-bit boundary, or if a source/destination range pair has
/// mismatched lengths — all are programming errors in a format encoder, never
/// caller-triggerable.
#[inline]
pub(crate) const fn merge_bitfields<const N: usize>(
    bitfields: &[(Range<u32>, u32, Range<u32>); N],
) -> u32 {
    let mut dst_bits_visited: u32 = 0;
    let mut dst: u32 = 0;
    let mut i = 0;
    while i < bitfields.len() {
        let (dst_range, src, src_range) = &bitfields[i];
        assert!(dst_range.end <= 32, "bit field range crosses 32-bit boundary");
        assert!(
            dst_range.end - dst_range.start == src_range.end - src_range.start,
            "bit range lengths do not match"
        );

        let src_mask = shl(0xFFFF_FFFF, src_range.end) ^ shl(0xFFFF_FFFF, src_range.start);
        dst |= shl(shr(*src & src_mask, src_range.start), dst_range.start);

        let dst_mask = shl(0xFFFF_FFFF, dst_range.end) ^ shl(0xFFFF_FFFF, dst_range.start);
        assert!(
            dst_bits_visited & dst_mask == 0,
            "bit field overlap detected"
        );
        dst_bits_visited |= dst_mask;

        i += 1;
    }
    dst
}

/// Shift left, saturating to zero for a shift amount of 32 or more (unlike
/// `<<`, which panics in debug builds for out-of-range shifts).
const fn shl(value: u32, nbits: u32) -> u32 {
    if nbits >= 32 {
        0
    } else {
        value << nbits
    }
}

/// Shift right, saturating to zero for a shift amount of 32 or more.
const fn shr(value: u32, nbits: u32) -> u32 {
    if nbits >= 32 {
        0
    } else {
        value >> nbits
    }
}
