//! Block representation helpers.
//!
//! A block is a single fixed-width integer; transforms operate on its
//! decomposition into sub-block digits in base `2^width`, most significant
//! digit first. Decomposition drops leading zeros, so the digit count of a
//! block depends on its magnitude; zero decomposes to a single `0` digit.

/// One plaintext or ciphertext unit, at most 64 bits wide.
pub type Block = u64;

/// Digits of a block in base `2^width`, most significant first.
pub type SubBlocks = Vec<u64>;

/// Shared additive constant seeding the shift and swap factor tables.
pub(crate) const MIX_SALT: u64 = 30805;

/// Bit mask selecting the low `width` bits.
///
/// `width` must be below 64.
#[inline]
pub(crate) fn width_mask(width: u32) -> u64 {
    debug_assert!(width < 64);
    (1u64 << width) - 1
}

/// Combines a key element with its shifted images at the given width.
///
/// `shift` must already be reduced modulo `width`. The left image is masked
/// to `width` bits; the right image only discards bits, so high bits of an
/// oversized key element survive through the plain XOR term.
#[inline]
pub(crate) fn mix_key(k: u64, shift: u32, width: u32, mask: u64) -> u64 {
    debug_assert!(shift < width);
    k ^ ((k << shift) & mask) ^ (k >> (width - shift))
}

/// Decomposes a value into base-`2^width` digits, most significant first.
///
/// Zero yields `[0]`; leading zero digits are never produced otherwise.
pub fn to_digits(value: u64, width: u32) -> SubBlocks {
    if value == 0 {
        return vec![0];
    }
    let mask = width_mask(width);
    let mut digits = Vec::new();
    let mut rest = value;
    while rest > 0 {
        digits.push(rest & mask);
        rest >>= width;
    }
    digits.reverse();
    digits
}

/// Folds base-`2^width` digits back into a value, most significant first.
///
/// Inverse of [`to_digits`] for well-formed digit lists. Oversized digits
/// are folded in additively; overflow past 64 bits wraps.
pub fn from_digits(digits: &[u64], width: u32) -> u64 {
    let mut value = 0u64;
    for &digit in digits {
        value = (value << width).wrapping_add(digit);
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_decomposes_to_single_digit() {
        assert_eq!(to_digits(0, 8), vec![0]);
        assert_eq!(from_digits(&[0], 8), 0);
    }

    #[test]
    fn digits_drop_leading_zeros() {
        assert_eq!(to_digits(0x48656c6c6f01, 8), vec![0x48, 0x65, 0x6c, 0x6c, 0x6f, 0x01]);
        assert_eq!(to_digits(5, 8), vec![5]);
        assert_eq!(to_digits(0x0105, 8), vec![1, 5]);
    }

    #[test]
    fn digits_round_trip() {
        for width in [1u32, 2, 4, 7, 8, 12, 16, 32] {
            for value in [0u64, 1, 5, 255, 256, 0xdead_beef, u32::MAX as u64, 1 << 47] {
                assert_eq!(from_digits(&to_digits(value, width), width), value);
            }
        }
    }

    #[test]
    fn odd_width_splits_correctly() {
        // 0b11_010 at width 3 is digits [3, 2]
        assert_eq!(to_digits(0b11_010, 3), vec![3, 2]);
        assert_eq!(from_digits(&[3, 2], 3), 0b11_010);
    }
}
