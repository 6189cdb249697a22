//! Diffusion transform over sub-block lists.
//!
//! Each sub-block absorbs a keyed factor XOR the circularly previous
//! sub-block value. The factor table is shared across every list in one
//! call and grows lazily to the longest list seen so far, so list order
//! matters: the same lists presented in a different order produce
//! different output. Inversion replays positions in exact reverse order,
//! which restores the "previous sub-block" reads one by one.

use crate::block::{mix_key, width_mask, SubBlocks, MIX_SALT};

/// Keyed factor accumulator shared across all lists of one call.
///
/// Every new entry is seeded from [`MIX_SALT`] rotated by a
/// length-dependent amount, then the whole key is folded over the entries
/// grown so far. The running mix value carries across growth steps.
struct FactorTable {
    width: u32,
    mask: u64,
    frag: u32,
    factors: Vec<u64>,
    mix: u64,
}

impl FactorTable {
    fn new(width: u32) -> Self {
        Self {
            width,
            mask: width_mask(width),
            frag: width / 3.max(width / 16),
            factors: Vec::new(),
            mix: 0,
        }
    }

    /// Extends the table to `target` entries, folding `key` once per new
    /// entry. Entries already present keep accumulating key material but
    /// are never re-seeded.
    fn grow(&mut self, target: usize, key: &[u64]) {
        debug_assert!(!key.is_empty());
        let width = self.width as usize;
        while self.factors.len() < target {
            let j = self.factors.len();
            let left = (self.frag as usize * j) % width;
            let right = width - left;
            let seeded =
                (MIX_SALT ^ (MIX_SALT << left) ^ (MIX_SALT >> right) ^ (j as u64 + 2)) & self.mask;
            self.factors.push(seeded);

            let repeats = target / key.len() + 1;
            for index in 0..repeats * key.len() {
                let k = key[index % key.len()];
                let shift = (index % width) as u32;
                self.mix = (self.mix ^ mix_key(k, shift, self.width, self.mask)) & self.mask;
                let pos = index % (j + 1);
                self.factors[pos] = (self.factors[pos] ^ self.mix) & self.mask;
            }
        }
    }

    #[inline]
    fn factor(&self, idx: usize) -> u64 {
        self.factors[idx]
    }
}

/// Applies the keyed diffusion to every sub-block list in place.
///
/// `key` must be non-empty; `width` is the sub-block width in bits.
pub fn shift_forward(state: &mut [SubBlocks], key: &[u64], width: u32) {
    let mask = width_mask(width);
    let mut table = FactorTable::new(width);
    for digits in state.iter_mut() {
        let m = digits.len();
        table.grow(m, key);
        for j in 0..m {
            let prev = if m > 1 { digits[(j + m - 1) % m] } else { 0 };
            digits[j] = (digits[j] ^ table.factor(j) ^ prev) & mask;
        }
    }
}

/// Undoes [`shift_forward`] for the same key and width.
pub fn shift_backward(state: &mut [SubBlocks], key: &[u64], width: u32) {
    let mask = width_mask(width);
    let mut table = FactorTable::new(width);
    for digits in state.iter_mut() {
        let m = digits.len();
        table.grow(m, key);
        for j in (0..m).rev() {
            let prev = if m > 1 { digits[(j + m - 1) % m] } else { 0 };
            digits[j] = (digits[j] ^ table.factor(j) ^ prev) & mask;
        }
    }
}
