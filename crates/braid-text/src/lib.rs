//! Text-level interface for the braid cipher.
//!
//! Wraps the `braid-core` engine with everything a caller working in
//! strings needs: framing text and keys into block values, the
//! dash-and-dot hex ciphertext format, and [`encrypt_text`] and
//! [`decrypt_text`] tying them together. Passing no key skips the
//! engine entirely and exposes the framed digits on the wire, which is
//! useful for inspecting the framing but offers no protection.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod error;
mod framing;
mod utf8;
mod wire;

pub use error::{Error, Result};
pub use framing::{blocks_to_text, text_to_blocks, Framing, PRINTABLE_ASCII};
pub use utf8::{decode_utf8, encode_utf8};
pub use wire::{format_blocks, parse_blocks};

use braid_core::{from_digits, to_digits, Block, Cipher, SubBlocks};

/// Configuration shared by [`encrypt_text`] and [`decrypt_text`].
///
/// Both sides of a conversation must agree on every field; none of it
/// is carried in the ciphertext.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CipherOptions {
    /// Plaintext block width in bits.
    pub block_size: u32,
    /// Digit width in bits handed to the engine.
    pub sub_block_size: u32,
    /// How plaintext maps onto blocks.
    pub text_framing: Framing,
    /// How the key maps onto blocks. Alphabet framings run with the
    /// blank slot forced on here.
    pub key_framing: Framing,
}

impl Default for CipherOptions {
    fn default() -> Self {
        Self {
            block_size: 48,
            sub_block_size: 8,
            text_framing: Framing::Utf8,
            key_framing: Framing::Utf8,
        }
    }
}

/// Encrypts `text` under `key` into the hex wire format.
///
/// With a key the framed blocks run through the engine. Without one
/// the framed blocks are split into digits and formatted as is.
pub fn encrypt_text(text: &str, key: Option<&str>, options: &CipherOptions) -> Result<String> {
    let cipher = engine(options)?;
    let blocks = text_to_blocks(text, options.block_size, &options.text_framing)?;
    let sealed = match key {
        Some(key_text) => cipher.encrypt(&blocks, &frame_key(key_text, options)?),
        None => blocks
            .iter()
            .map(|&block| to_digits(block, options.sub_block_size))
            .collect(),
    };
    Ok(format_blocks(&sealed))
}

/// Decrypts the hex wire format back into text.
///
/// Fails with a typed [`Error`] when the ciphertext is malformed or
/// when a wrong key surfaces as bad padding or invalid bytes. A wrong
/// key can also produce well-formed garbage text; the format carries
/// no authentication.
pub fn decrypt_text(ciphertext: &str, key: Option<&str>, options: &CipherOptions) -> Result<String> {
    let cipher = engine(options)?;
    let parsed = parse_blocks(ciphertext)?;
    let blocks: Vec<Block> = match key {
        Some(key_text) => {
            let key_blocks = frame_key(key_text, options)?;
            let state: Vec<SubBlocks> = parsed
                .iter()
                .map(|digits| {
                    digits
                        .iter()
                        .flat_map(|&digit| to_digits(digit, options.sub_block_size))
                        .collect()
                })
                .collect();
            cipher.decrypt(state, &key_blocks)
        }
        None => parsed
            .iter()
            .map(|digits| from_digits(digits, options.sub_block_size))
            .collect(),
    };
    blocks_to_text(&blocks, options.block_size, &options.text_framing)
}

fn engine(options: &CipherOptions) -> Result<Cipher> {
    Cipher::new(options.sub_block_size).ok_or(Error::InvalidSubBlockSize(options.sub_block_size))
}

/// Frames the key at the key block width, 16 bits at most. Alphabet
/// key framings run with the blank slot forced on, and a key that
/// frames to zero blocks is rejected.
fn frame_key(key_text: &str, options: &CipherOptions) -> Result<Vec<Block>> {
    let key_block_size = options.block_size.min(16);
    let framing = match &options.key_framing {
        Framing::Utf8 => Framing::Utf8,
        Framing::Alphabet { chars, .. } => Framing::Alphabet {
            chars: chars.clone(),
            blank: true,
        },
    };
    let key_blocks = text_to_blocks(key_text, key_block_size, &framing)?;
    if key_blocks.is_empty() {
        return Err(Error::EmptyKey);
    }
    Ok(key_blocks)
}
