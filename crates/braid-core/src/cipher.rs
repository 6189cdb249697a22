//! Cipher pipeline: meta-key derivation, round key chain, and the
//! forward/backward application of the scheduled round processes.

use crate::block::{from_digits, to_digits, Block, SubBlocks};
use crate::key::expand_key;
use crate::process::Process;
use crate::sbox::sbox_forward;
use crate::scheduler::{schedule, DEFAULT_POOL, PROCESS_PREFIX};
use crate::shift::shift_forward;
use crate::swap::swap_forward;

/// Built-in table seeding the meta-key derivation. Truncated per cipher
/// width; the caller key never replaces it, it only keys the transforms
/// that mix it.
const SEED_KEY: [u64; 64] = [
    50524, 15702, 39651, 6295, 28348, 12071, 35661, 24141,
    668, 55643, 52851, 62390, 27290, 6457, 47093, 44059,
    43598, 34032, 50543, 5357, 14609, 24947, 28090, 1781,
    50795, 30647, 35077, 56306, 37512, 41124, 19279, 43475,
    52403, 730, 43513, 33090, 58988, 20101, 65008, 14513,
    38901, 20626, 62788, 13864, 44670, 12842, 6564, 26644,
    42699, 31359, 31127, 15088, 45717, 57093, 63113, 30010,
    15897, 13744, 405, 50, 1302, 15370, 4377, 8190,
];

/// Fixed tail appended to the key of the second derivation stage.
const SWAP_TAIL: [u64; 6] = [35, 215, 221, 84, 79, 144];

/// Expansion rounds applied to the caller key.
const EXPANSION_ROUNDS: usize = 3;

/// Smallest accepted sub-block width. Below this the quarter-width
/// derivation stage would collapse to zero-bit digits.
pub const MIN_SUB_BLOCK_SIZE: u32 = 4;

/// Largest accepted sub-block width, bounded by the `2^width` substitution
/// box.
pub const MAX_SUB_BLOCK_SIZE: u32 = 16;

/// The block cipher engine, fixed to one sub-block width.
///
/// Encryption and decryption re-derive every round key from the caller
/// key on each call; the engine itself holds no secret state and is free
/// to be shared across threads.
#[derive(Clone, Copy, Debug)]
pub struct Cipher {
    sub_block_size: u32,
}

impl Cipher {
    /// Creates an engine for the given sub-block width in bits, or `None`
    /// when the width lies outside
    /// [`MIN_SUB_BLOCK_SIZE`]`..=`[`MAX_SUB_BLOCK_SIZE`].
    pub fn new(sub_block_size: u32) -> Option<Self> {
        if (MIN_SUB_BLOCK_SIZE..=MAX_SUB_BLOCK_SIZE).contains(&sub_block_size) {
            Some(Self { sub_block_size })
        } else {
            None
        }
    }

    /// The configured sub-block width in bits.
    pub fn sub_block_size(&self) -> u32 {
        self.sub_block_size
    }

    /// Encrypts a list of blocks under `key`, returning one sub-block list
    /// per input block. `key` must be non-empty.
    pub fn encrypt(&self, blocks: &[Block], key: &[u64]) -> Vec<SubBlocks> {
        let width = self.sub_block_size;
        let (processes, round_keys) = self.derive_rounds(key);
        let mut state: Vec<SubBlocks> =
            blocks.iter().map(|&block| to_digits(block, width)).collect();
        for (process, round_key) in processes.iter().zip(round_keys.iter().skip(1)) {
            process.apply_forward(&mut state, round_key, width);
        }
        state
    }

    /// Decrypts sub-block lists produced by [`encrypt`](Self::encrypt)
    /// under the same key. Digit values must be below `2^sub_block_size`;
    /// `key` must be non-empty.
    pub fn decrypt(&self, mut state: Vec<SubBlocks>, key: &[u64]) -> Vec<Block> {
        let width = self.sub_block_size;
        let (processes, round_keys) = self.derive_rounds(key);
        for (process, round_key) in processes.iter().zip(round_keys.iter().skip(1)).rev() {
            process.apply_backward(&mut state, round_key, width);
        }
        state.iter().map(|digits| from_digits(digits, width)).collect()
    }

    /// Derives the process sequence and the round key chain from the
    /// caller key. Both are pure functions of the key, so encryption and
    /// decryption reconstruct identical schedules independently.
    fn derive_rounds(&self, key: &[u64]) -> (Vec<Process>, Vec<Vec<u64>>) {
        let width = self.sub_block_size;
        let key0 = expand_key(key, EXPANSION_ROUNDS);
        let seed_len = (256 / width as usize).clamp(16, SEED_KEY.len());
        let seed = &SEED_KEY[..seed_len];

        // Stage 1: diffuse the seed table at double width, keep the top
        // digit of every entry.
        let mut stage: Vec<SubBlocks> =
            seed.iter().map(|&value| to_digits(value, 2 * width)).collect();
        shift_forward(&mut stage, &key0, 2 * width);
        let key1: Vec<u64> = stage.iter().map(|digits| digits[0]).collect();

        // Stage 2: exchange positions at half width, keyed by stage 1 plus
        // a fixed tail; refold the leading four digits.
        let mut swap_key = key1.clone();
        swap_key.extend_from_slice(&SWAP_TAIL);
        let half = width / 2;
        let mut stage: Vec<SubBlocks> =
            key1.iter().map(|&value| to_digits(value, half)).collect();
        swap_forward(&mut stage, &swap_key, half);
        let key2: Vec<u64> = stage
            .iter()
            .map(|digits| from_digits(&digits[..digits.len().min(4)], half))
            .collect();

        // Stage 3: substitute at full width, keyed by stage 1; keep the
        // top digit.
        let mut stage: Vec<SubBlocks> =
            key2.iter().map(|&value| to_digits(value, width)).collect();
        sbox_forward(&mut stage, &key1, width);
        let key3: Vec<u64> = stage.iter().map(|digits| digits[0]).collect();

        // Scheduler seed: exchange positions at quarter width keyed by
        // stage 2, folding whole digit lists at full width.
        let quarter = width / 4;
        let mut stage: Vec<SubBlocks> =
            key3.iter().map(|&value| to_digits(value, quarter)).collect();
        swap_forward(&mut stage, &key2, quarter);
        let scheduler_seed: Vec<u64> =
            stage.iter().map(|digits| from_digits(digits, width)).collect();

        let mut processes: Vec<Process> = PROCESS_PREFIX.to_vec();
        processes.extend(schedule(&scheduler_seed, &DEFAULT_POOL));

        // Round keys: each one is the previous key diffused under itself
        // extended with the round's process code.
        let mut round_keys: Vec<Vec<u64>> = Vec::with_capacity(processes.len() + 1);
        round_keys.push(key3);
        for &process in &processes {
            let prev = &round_keys[round_keys.len() - 1];
            let mut chain_key = prev.clone();
            chain_key.push(process.code());
            let mut stage: Vec<SubBlocks> =
                prev.iter().map(|&value| to_digits(value, width)).collect();
            shift_forward(&mut stage, &chain_key, width);
            round_keys.push(stage.iter().map(|digits| from_digits(digits, width)).collect());
        }

        (processes, round_keys)
    }
}
