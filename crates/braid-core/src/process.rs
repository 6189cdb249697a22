//! Round process selectors.

use crate::block::SubBlocks;
use crate::sbox::{sbox_backward, sbox_forward};
use crate::shift::{shift_backward, shift_forward};
use crate::swap::{swap_backward, swap_forward};

/// Reverses the digit order of every list.
fn mirror(state: &mut [SubBlocks]) {
    for digits in state.iter_mut() {
        digits.reverse();
    }
}

/// One round step: which transform to apply, and whether the digit order
/// is mirrored first. Code 4 is reserved and has no selector.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Process {
    /// Diffusion only (code 0).
    Shift,
    /// Mirror the digits, then diffusion (code 1).
    MirrorShift,
    /// Substitution, then position exchanges (code 2).
    SubSwap,
    /// Mirror the digits, then substitution and position exchanges (code 3).
    MirrorSubSwap,
    /// Position exchanges without a matching inverse (code 5); reserved,
    /// never emitted by the default pool.
    SwapOnly,
}

impl Process {
    /// The numeric code mixed into round key derivation.
    pub fn code(self) -> u64 {
        match self {
            Process::Shift => 0,
            Process::MirrorShift => 1,
            Process::SubSwap => 2,
            Process::MirrorSubSwap => 3,
            Process::SwapOnly => 5,
        }
    }

    /// Looks up the selector for a numeric code. Codes 4 and above 5 have
    /// no selector.
    pub fn from_code(code: u64) -> Option<Self> {
        match code {
            0 => Some(Process::Shift),
            1 => Some(Process::MirrorShift),
            2 => Some(Process::SubSwap),
            3 => Some(Process::MirrorSubSwap),
            5 => Some(Process::SwapOnly),
            _ => None,
        }
    }

    /// Applies the round step in encryption direction.
    pub fn apply_forward(self, state: &mut [SubBlocks], key: &[u64], width: u32) {
        match self {
            Process::Shift => shift_forward(state, key, width),
            Process::MirrorShift => {
                mirror(state);
                shift_forward(state, key, width);
            }
            Process::SubSwap => {
                sbox_forward(state, key, width);
                swap_forward(state, key, width);
            }
            Process::MirrorSubSwap => {
                mirror(state);
                sbox_forward(state, key, width);
                swap_forward(state, key, width);
            }
            Process::SwapOnly => swap_forward(state, key, width),
        }
    }

    /// Undoes [`apply_forward`], inverting the inner steps in reverse
    /// order. [`SwapOnly`](Process::SwapOnly) deliberately does nothing
    /// here: the selector is reserved, and pipelines that never emit it
    /// stay invertible.
    pub fn apply_backward(self, state: &mut [SubBlocks], key: &[u64], width: u32) {
        match self {
            Process::Shift => shift_backward(state, key, width),
            Process::MirrorShift => {
                shift_backward(state, key, width);
                mirror(state);
            }
            Process::SubSwap => {
                swap_backward(state, key, width);
                sbox_backward(state, key, width);
            }
            Process::MirrorSubSwap => {
                swap_backward(state, key, width);
                sbox_backward(state, key, width);
                mirror(state);
            }
            Process::SwapOnly => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha20Rng;

    #[test]
    fn codes_round_trip() {
        for process in [
            Process::Shift,
            Process::MirrorShift,
            Process::SubSwap,
            Process::MirrorSubSwap,
            Process::SwapOnly,
        ] {
            assert_eq!(Process::from_code(process.code()), Some(process));
        }
        assert_eq!(Process::from_code(4), None);
        assert_eq!(Process::from_code(6), None);
    }

    #[test]
    fn invertible_selectors_round_trip() {
        let mut rng = ChaCha20Rng::from_seed([3u8; 32]);
        let selectors = [
            Process::Shift,
            Process::MirrorShift,
            Process::SubSwap,
            Process::MirrorSubSwap,
        ];
        for process in selectors {
            for _ in 0..10 {
                let original: Vec<SubBlocks> = (0..rng.gen_range(1..4))
                    .map(|_| (0..rng.gen_range(1..8)).map(|_| rng.gen_range(0..256)).collect())
                    .collect();
                let key: Vec<u64> =
                    (0..rng.gen_range(1..5)).map(|_| rng.gen_range(0..1 << 16)).collect();
                let mut state = original.clone();
                process.apply_forward(&mut state, &key, 8);
                process.apply_backward(&mut state, &key, 8);
                assert_eq!(state, original);
            }
        }
    }

    #[test]
    fn reserved_selector_backward_is_identity() {
        let mut state = vec![vec![1u64, 2, 3, 4]];
        Process::SwapOnly.apply_backward(&mut state, &[27290, 6457], 8);
        assert_eq!(state, vec![vec![1, 2, 3, 4]]);
    }
}
