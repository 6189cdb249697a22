//! Keyed block-transform engine for braidcipher.
//!
//! The engine turns a caller key into a data-dependent sequence of round
//! processes plus a matching round key chain, then applies three families
//! of invertible transforms (diffusion, position exchange, substitution)
//! over lists of sub-block digits:
//! - Arbitrary-base digit conversion and keyed permutation boxes as leaf
//!   utilities.
//! - Forward/backward transform pairs that are exact inverses under the
//!   same key.
//! - A scheduler that permutes a weighted process pool by the key, so the
//!   round order itself is key-dependent.
//!
//! Everything is deterministic; the keyed permutation box is the only
//! source of pseudo-randomness. The implementation aims for clarity and
//! exact invertibility rather than constant-time guarantees; it should
//! not be treated as side-channel hardened, and no security level is
//! claimed for the construction itself.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod block;
mod cipher;
mod key;
mod permbox;
mod process;
mod sbox;
mod scheduler;
mod shift;
mod swap;

pub use crate::block::{from_digits, to_digits, Block, SubBlocks};
pub use crate::cipher::{Cipher, MAX_SUB_BLOCK_SIZE, MIN_SUB_BLOCK_SIZE};
pub use crate::key::expand_key;
pub use crate::permbox::PermBox;
pub use crate::process::Process;
pub use crate::sbox::{sbox_backward, sbox_forward};
pub use crate::scheduler::{schedule, DEFAULT_POOL, PROCESS_PREFIX};
pub use crate::shift::{shift_backward, shift_forward};
pub use crate::swap::{swap_backward, swap_forward};
