//! Ciphertext wire format.
//!
//! Each block is its sub-block digits as lowercase unpadded hex joined
//! by `-`, and blocks are joined by `.`. Digit values keep whatever
//! magnitude they carry, so widths never appear on the wire.

use braid_core::SubBlocks;

use crate::error::{Error, Result};

/// Renders digit lists as dash-and-dot separated hex.
pub fn format_blocks(blocks: &[SubBlocks]) -> String {
    blocks
        .iter()
        .map(|digits| {
            digits
                .iter()
                .map(|digit| format!("{digit:x}"))
                .collect::<Vec<_>>()
                .join("-")
        })
        .collect::<Vec<_>>()
        .join(".")
}

/// Parses the wire format back into digit lists.
///
/// Empty hex groups are skipped. Anything that is not a hexadecimal
/// number is reported as [`Error::InvalidHex`].
pub fn parse_blocks(text: &str) -> Result<Vec<SubBlocks>> {
    text.split('.')
        .map(|group| {
            group
                .split('-')
                .filter(|digits| !digits.is_empty())
                .map(|digits| {
                    u64::from_str_radix(digits, 16)
                        .map_err(|_| Error::InvalidHex(digits.to_owned()))
                })
                .collect()
        })
        .collect()
}
