//! Permutation transform over sub-block lists.
//!
//! Every key element selects a pair of positions to exchange. The pair
//! derivation reads the current content of the position just below the
//! first target, with a tie-break that keeps that read position itself
//! out of every exchange, so replaying the exchanges in reverse key order
//! undoes the transform exactly.

use crate::block::{mix_key, width_mask, SubBlocks, MIX_SALT};

/// Precomputes one factor per key element, folding the key over a salted
/// running mix the same way the diffusion transform does.
fn swap_factors(key: &[u64], width: u32, mask: u64) -> Vec<u64> {
    let mut mix = MIX_SALT & mask;
    let mut factors = vec![mix; key.len()];
    for (idx, &k) in key.iter().enumerate() {
        let shift = (idx % width as usize) as u32;
        mix = (mix ^ mix_key(k, shift, width, mask)) & mask;
        factors[idx] ^= mix;
    }
    factors
}

/// Derives the exchange pair for one key element.
///
/// The second position may be nudged by the content of the slot below the
/// first; the nudge is rejected when it would land exactly on that slot,
/// so the slot it read from is never moved by the exchange.
#[inline]
fn exchange_pair(digits: &[u64], k: u64, shift: u32, factor: u64, width: u32, mask: u64) -> (usize, usize) {
    let n = digits.len() as u64;
    let a = (mix_key(k, shift, width, mask) % n) as usize;
    let mut b = ((k ^ factor) % n) as usize;
    if a != 0 && b != a - 1 {
        let nudged = ((b as u64 ^ digits[a - 1]) % n) as usize;
        if nudged != a - 1 {
            b = nudged;
        }
    }
    (a, b)
}

/// Applies the keyed position exchanges to every sub-block list in place.
///
/// `key` must be non-empty; empty lists are left untouched.
pub fn swap_forward(state: &mut [SubBlocks], key: &[u64], width: u32) {
    debug_assert!(!key.is_empty());
    let mask = width_mask(width);
    let factors = swap_factors(key, width, mask);
    for digits in state.iter_mut() {
        if digits.is_empty() {
            continue;
        }
        for (idx, &k) in key.iter().enumerate() {
            let shift = (idx % width as usize) as u32;
            let (a, b) = exchange_pair(digits, k, shift, factors[idx], width, mask);
            if a != b {
                digits.swap(a, b);
            }
        }
    }
}

/// Undoes [`swap_forward`] by replaying the exchanges in reverse key order.
pub fn swap_backward(state: &mut [SubBlocks], key: &[u64], width: u32) {
    debug_assert!(!key.is_empty());
    let mask = width_mask(width);
    let factors = swap_factors(key, width, mask);
    for digits in state.iter_mut() {
        if digits.is_empty() {
            continue;
        }
        for (idx, &k) in key.iter().enumerate().rev() {
            let shift = (idx % width as usize) as u32;
            let (a, b) = exchange_pair(digits, k, shift, factors[idx], width, mask);
            if a != b {
                digits.swap(a, b);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha20Rng;

    fn sorted(digits: &[u64]) -> Vec<u64> {
        let mut copy = digits.to_vec();
        copy.sort_unstable();
        copy
    }

    #[test]
    fn backward_undoes_forward() {
        let mut rng = ChaCha20Rng::from_seed([42u8; 32]);
        for width in [4u32, 8, 16, 32] {
            let mask = width_mask(width);
            for _ in 0..30 {
                let original: Vec<SubBlocks> = (0..rng.gen_range(1..5))
                    .map(|_| {
                        (0..rng.gen_range(1..10))
                            .map(|_| rng.gen::<u64>() & mask)
                            .collect()
                    })
                    .collect();
                let key: Vec<u64> =
                    (0..rng.gen_range(1..9)).map(|_| rng.gen_range(0..1 << 16)).collect();
                let mut state = original.clone();
                swap_forward(&mut state, &key, width);
                swap_backward(&mut state, &key, width);
                assert_eq!(state, original);
            }
        }
    }

    #[test]
    fn exchanges_only_rearrange_digits() {
        let mut rng = ChaCha20Rng::from_seed([43u8; 32]);
        let original: SubBlocks = (0..12).map(|_| rng.gen_range(0..256)).collect();
        let mut state = vec![original.clone()];
        swap_forward(&mut state, &[6295, 28348, 12071, 35661], 8);
        assert_eq!(sorted(&state[0]), sorted(&original));
    }

    #[test]
    fn single_digit_lists_are_fixed_points() {
        // With one position every exchange pair collapses to (0, 0).
        let mut state = vec![vec![9]];
        swap_forward(&mut state, &[404, 50, 1302], 8);
        assert_eq!(state, vec![vec![9]]);
    }

    #[test]
    fn empty_lists_are_skipped() {
        let mut state = vec![vec![], vec![7, 8]];
        let mut copy = state.clone();
        swap_forward(&mut state, &[15088], 8);
        swap_backward(&mut state, &[15088], 8);
        assert_eq!(state[0], Vec::<u64>::new());
        swap_forward(&mut copy, &[15088], 8);
        assert_eq!(copy[0], Vec::<u64>::new());
    }
}
