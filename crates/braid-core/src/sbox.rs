//! Substitution transform over sub-block lists.
//!
//! Digits pass through a keyed substitution box spanning the whole
//! sub-block value space, after a row-rotation step that rotates each
//! complete group of four digits by its group index. Trailing digits past
//! the last complete group are not rotated.

use crate::block::SubBlocks;
use crate::permbox::PermBox;

const GROUP: usize = 4;

fn rotate_groups_right(digits: &mut [u64]) {
    let groups = digits.len() / GROUP;
    for g in 0..groups {
        let start = g * GROUP;
        digits[start..start + GROUP].rotate_right(g % GROUP);
    }
}

fn rotate_groups_left(digits: &mut [u64]) {
    let groups = digits.len() / GROUP;
    for g in 0..groups {
        let start = g * GROUP;
        digits[start..start + GROUP].rotate_left(g % GROUP);
    }
}

/// Rotates digit groups, then maps every digit through the keyed box.
///
/// `key` must be non-empty and every digit must be below `2^width`.
pub fn sbox_forward(state: &mut [SubBlocks], key: &[u64], width: u32) {
    let sbox = PermBox::new(key, 1usize << width);
    for digits in state.iter_mut() {
        rotate_groups_right(digits);
        for digit in digits.iter_mut() {
            *digit = sbox.apply(*digit);
        }
    }
}

/// Undoes [`sbox_forward`]: inverse map first, then the groups rotate back.
pub fn sbox_backward(state: &mut [SubBlocks], key: &[u64], width: u32) {
    let inverse = PermBox::new(key, 1usize << width).inverted();
    for digits in state.iter_mut() {
        for digit in digits.iter_mut() {
            *digit = inverse.apply(*digit);
        }
        rotate_groups_left(digits);
    }
}
