//! Keyed permutation boxes.

/// A keyed bijection over `0..len`, built by a deterministic key-driven
/// shuffle. The same construction serves as substitution box over the
/// sub-block value space and as ordering for the round scheduler; it is
/// the only source of pseudo-randomness in the engine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PermBox {
    table: Vec<u64>,
}

impl PermBox {
    /// Builds the permutation of `0..size` selected by `key`.
    ///
    /// Walks the identity table from the top down, swapping each position
    /// `i` with `(key[i % key.len()] + i) % size`. `key` must be non-empty.
    pub fn new(key: &[u64], size: usize) -> Self {
        debug_assert!(!key.is_empty());
        let mut table: Vec<u64> = (0..size as u64).collect();
        for i in (1..size).rev() {
            let j = (key[i % key.len()].wrapping_add(i as u64) % size as u64) as usize;
            table.swap(i, j);
        }
        Self { table }
    }

    /// Number of entries in the permutation.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// True when the permutation has no entries.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Maps one value through the permutation. `value` must be below
    /// [`len()`](Self::len).
    #[inline]
    pub fn apply(&self, value: u64) -> u64 {
        self.table[value as usize]
    }

    /// Returns the inverse permutation, so that
    /// `inverted.apply(self.apply(x)) == x`.
    pub fn inverted(&self) -> Self {
        let mut table = vec![0u64; self.table.len()];
        for (i, &v) in self.table.iter().enumerate() {
            table[v as usize] = i as u64;
        }
        Self { table }
    }

    /// The raw permutation table.
    pub fn as_slice(&self) -> &[u64] {
        &self.table
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha20Rng;

    fn is_bijection(pbox: &PermBox) -> bool {
        let mut seen = vec![false; pbox.len()];
        for &v in pbox.as_slice() {
            let idx = v as usize;
            if idx >= seen.len() || seen[idx] {
                return false;
            }
            seen[idx] = true;
        }
        true
    }

    #[test]
    fn identity_sizes() {
        assert_eq!(PermBox::new(&[7], 0).len(), 0);
        assert_eq!(PermBox::new(&[7], 1).as_slice(), &[0u64][..]);
    }

    #[test]
    fn small_shuffle_matches_hand_computation() {
        // size 4, key [5]: swaps (3,0), (2,3), (1,2) applied to the identity
        assert_eq!(PermBox::new(&[5], 4).as_slice(), &[3, 0, 1, 2][..]);
    }

    #[test]
    fn keyed_shuffle_is_bijective() {
        let mut rng = ChaCha20Rng::from_seed([11u8; 32]);
        for _ in 0..50 {
            let key: Vec<u64> = (0..rng.gen_range(1..8)).map(|_| rng.gen_range(0..1 << 16)).collect();
            let size = rng.gen_range(1..300);
            let pbox = PermBox::new(&key, size);
            assert!(is_bijection(&pbox));
        }
    }

    #[test]
    fn deterministic_for_fixed_inputs() {
        let a = PermBox::new(&[50524, 15702, 39651], 256);
        let b = PermBox::new(&[50524, 15702, 39651], 256);
        assert_eq!(a, b);
    }

    #[test]
    fn inverse_undoes_forward() {
        let pbox = PermBox::new(&[5, 9, 1781], 64);
        let inv = pbox.inverted();
        for x in 0..64u64 {
            assert_eq!(inv.apply(pbox.apply(x)), x);
            assert_eq!(pbox.apply(inv.apply(x)), x);
        }
    }

    #[test]
    fn different_keys_give_different_tables() {
        let a = PermBox::new(&[1, 2, 3], 256);
        let b = PermBox::new(&[1, 2, 4], 256);
        assert_ne!(a, b);
    }
}
