//! Text framing, turning strings into block values and back.
//!
//! Two framings are supported. Byte framing encodes the text as UTF-8,
//! pads it PKCS#7 style to a whole number of blocks and packs the bytes
//! big endian. Alphabet framing treats each character as a digit of a
//! base-N number, where N is the alphabet length plus one when the
//! blank slot is enabled. The blank slot shifts every character value
//! up by one so that absent leading digits are distinguishable from the
//! first alphabet character, which makes round trips exact for texts of
//! any length. Without it, texts only survive a round trip when their
//! length is a multiple of the characters-per-block count.

use std::collections::HashMap;

use braid_core::Block;

use crate::error::{Error, Result};
use crate::utf8::{decode_utf8, encode_utf8};

/// The 95 printable ASCII characters, space through tilde.
pub const PRINTABLE_ASCII: &str = " !\"#$%&'()*+,-./0123456789:;<=>?@ABCDEFGHIJKLMNOPQRSTUVWXYZ[\\]^_`abcdefghijklmnopqrstuvwxyz{|}~";

/// How text maps onto block values.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Framing {
    /// UTF-8 bytes packed big endian with length padding.
    Utf8,
    /// Characters of `chars` read as digits of a base-N number.
    Alphabet {
        /// Permitted characters, in digit-value order.
        chars: String,
        /// Reserve digit zero as a non-character so short chunks
        /// round-trip exactly.
        blank: bool,
    },
}

impl Framing {
    /// Alphabet framing over [`PRINTABLE_ASCII`] with the blank slot on.
    pub fn printable_ascii() -> Self {
        Framing::Alphabet {
            chars: PRINTABLE_ASCII.to_owned(),
            blank: true,
        }
    }
}

/// Frames `text` into block values of `block_size` bits.
pub fn text_to_blocks(text: &str, block_size: u32, framing: &Framing) -> Result<Vec<Block>> {
    match framing {
        Framing::Utf8 => bytes_to_blocks(text, block_size),
        Framing::Alphabet { chars, blank } => {
            Alphabet::new(chars, *blank, block_size)?.pack(text)
        }
    }
}

/// Recovers text from block values of `block_size` bits.
pub fn blocks_to_text(blocks: &[Block], block_size: u32, framing: &Framing) -> Result<String> {
    match framing {
        Framing::Utf8 => blocks_to_bytes(blocks, block_size),
        Framing::Alphabet { chars, blank } => {
            Alphabet::new(chars, *blank, block_size)?.unpack(blocks)
        }
    }
}

fn byte_width(block_size: u32) -> Result<usize> {
    if block_size % 8 != 0 || !(8..=64).contains(&block_size) {
        return Err(Error::InvalidBlockSize(block_size));
    }
    Ok((block_size / 8) as usize)
}

fn bytes_to_blocks(text: &str, block_size: u32) -> Result<Vec<Block>> {
    let width = byte_width(block_size)?;
    let mut bytes = encode_utf8(text);
    // Padding always runs, so an aligned message grows a full pad block.
    let pad = width - bytes.len() % width;
    bytes.extend(std::iter::repeat(pad as u8).take(pad));
    Ok(bytes
        .chunks(width)
        .map(|chunk| chunk.iter().fold(0u64, |acc, &b| (acc << 8) | u64::from(b)))
        .collect())
}

fn blocks_to_bytes(blocks: &[Block], block_size: u32) -> Result<String> {
    let width = byte_width(block_size)?;
    let limit = 1u128 << block_size;
    let mut bytes = Vec::with_capacity(blocks.len() * width);
    for &block in blocks {
        if u128::from(block) >= limit {
            return Err(Error::BlockOutOfRange(block));
        }
        for shift in (0..width).rev() {
            bytes.push((block >> (8 * shift)) as u8);
        }
    }
    let pad = match bytes.last() {
        Some(&last) => last as usize,
        None => return Err(Error::InvalidPadding),
    };
    if pad == 0 || pad > width {
        return Err(Error::InvalidPadding);
    }
    if bytes[bytes.len() - pad..].iter().any(|&b| b as usize != pad) {
        return Err(Error::InvalidPadding);
    }
    bytes.truncate(bytes.len() - pad);
    decode_utf8(&bytes)
}

/// A validated alphabet with its derived packing parameters.
struct Alphabet {
    symbols: Vec<char>,
    index: HashMap<char, u64>,
    base: u64,
    blank: bool,
    per_block: usize,
}

impl Alphabet {
    fn new(chars: &str, blank: bool, block_size: u32) -> Result<Self> {
        if !(1..=64).contains(&block_size) {
            return Err(Error::InvalidBlockSize(block_size));
        }
        let symbols: Vec<char> = chars.chars().collect();
        let base = symbols.len() as u64 + u64::from(blank);
        if base < 2 {
            return Err(Error::AlphabetTooSmall);
        }
        // The epsilon keeps exact power-of-two bases from flooring one low.
        let per_block = (f64::from(block_size) * std::f64::consts::LN_2
            / (base as f64).ln()
            + 1e-15)
            .floor() as usize;
        if per_block < 1 {
            return Err(Error::AlphabetTooLarge(symbols.len()));
        }
        let offset = u64::from(blank);
        let index = symbols
            .iter()
            .enumerate()
            .map(|(i, &c)| (c, i as u64 + offset))
            .collect();
        Ok(Self {
            symbols,
            index,
            base,
            blank,
            per_block,
        })
    }

    fn pack(&self, text: &str) -> Result<Vec<Block>> {
        let mut offenders: Vec<char> = Vec::new();
        for c in text.chars() {
            if !self.index.contains_key(&c) && !offenders.contains(&c) {
                offenders.push(c);
            }
        }
        if !offenders.is_empty() {
            let listed = offenders
                .iter()
                .map(|c| c.to_string())
                .collect::<Vec<_>>()
                .join(",");
            return Err(Error::InvalidCharacters(listed));
        }
        let chars: Vec<char> = text.chars().collect();
        Ok(chars
            .chunks(self.per_block)
            .map(|chunk| {
                chunk
                    .iter()
                    .fold(0u128, |acc, c| {
                        acc * u128::from(self.base) + u128::from(self.index[c])
                    }) as u64
            })
            .collect())
    }

    fn unpack(&self, blocks: &[Block]) -> Result<String> {
        let mut powers = Vec::with_capacity(self.per_block);
        let mut power = 1u128;
        for _ in 0..self.per_block {
            powers.push(power);
            power *= u128::from(self.base);
        }
        powers.reverse();
        let mut text = String::new();
        for &block in blocks {
            let mut remaining = u128::from(block);
            let mut piece: Vec<char> = Vec::new();
            for &place in &powers {
                if remaining == 0 {
                    break;
                }
                let digit = remaining / place;
                remaining %= place;
                if digit >= u128::from(self.base) {
                    return Err(Error::BlockOutOfRange(block));
                }
                if self.blank {
                    if digit == 0 {
                        continue;
                    }
                    piece.push(self.symbols[(digit - 1) as usize]);
                } else {
                    piece.push(self.symbols[digit as usize]);
                }
            }
            if !self.blank {
                while piece.len() < self.per_block {
                    piece.push(self.symbols[0]);
                }
            }
            text.extend(piece);
        }
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn utf8_hello_framing() {
        let blocks = text_to_blocks("Hello", 48, &Framing::Utf8).unwrap();
        assert_eq!(blocks, vec![0x4865_6c6c_6f01]);
        assert_eq!(blocks_to_text(&blocks, 48, &Framing::Utf8).unwrap(), "Hello");
    }

    #[test]
    fn utf8_empty_text_is_one_pad_block() {
        let blocks = text_to_blocks("", 48, &Framing::Utf8).unwrap();
        assert_eq!(blocks, vec![0x0606_0606_0606]);
        assert_eq!(blocks_to_text(&blocks, 48, &Framing::Utf8).unwrap(), "");
    }

    #[test]
    fn utf8_aligned_text_grows_pad_block() {
        let blocks = text_to_blocks("ABCDEFGH", 64, &Framing::Utf8).unwrap();
        assert_eq!(
            blocks,
            vec![0x4142_4344_4546_4748, 0x0808_0808_0808_0808]
        );
        assert_eq!(blocks_to_text(&blocks, 64, &Framing::Utf8).unwrap(), "ABCDEFGH");
    }

    #[test]
    fn utf8_round_trip_across_block_sizes() {
        let text = "caf\u{e9} \u{1f980} \u{65e5}\u{672c}";
        for block_size in [8, 16, 24, 32, 48, 64] {
            let blocks = text_to_blocks(text, block_size, &Framing::Utf8).unwrap();
            assert_eq!(
                blocks_to_text(&blocks, block_size, &Framing::Utf8).unwrap(),
                text
            );
        }
    }

    #[test]
    fn utf8_rejects_unaligned_block_size() {
        for block_size in [0, 4, 12, 42, 72] {
            assert_eq!(
                text_to_blocks("x", block_size, &Framing::Utf8),
                Err(Error::InvalidBlockSize(block_size))
            );
        }
    }

    #[test]
    fn utf8_rejects_out_of_range_block() {
        assert_eq!(
            blocks_to_text(&[0x1_0000], 16, &Framing::Utf8),
            Err(Error::BlockOutOfRange(0x1_0000))
        );
    }

    #[test]
    fn utf8_rejects_bad_padding() {
        assert_eq!(
            blocks_to_text(&[0], 48, &Framing::Utf8),
            Err(Error::InvalidPadding)
        );
        assert_eq!(
            blocks_to_text(&[], 48, &Framing::Utf8),
            Err(Error::InvalidPadding)
        );
        // Pad byte larger than the block width.
        assert_eq!(
            blocks_to_text(&[0x0000_0000_0009], 48, &Framing::Utf8),
            Err(Error::InvalidPadding)
        );
    }

    #[test]
    fn alphabet_without_blank_packs_dense() {
        let framing = Framing::Alphabet {
            chars: "AB".to_owned(),
            blank: false,
        };
        // Four base-2 digits per 4-bit block, so "ABBA" is 0b0110.
        let blocks = text_to_blocks("ABBA", 4, &framing).unwrap();
        assert_eq!(blocks, vec![6]);
        assert_eq!(blocks_to_text(&blocks, 4, &framing).unwrap(), "ABBA");
    }

    #[test]
    fn alphabet_blank_round_trips_any_length() {
        let framing = Framing::printable_ascii();
        for text in ["", "a", "Hello, World!", "x y z ~ !", "0123456789"] {
            let blocks = text_to_blocks(text, 48, &framing).unwrap();
            assert_eq!(blocks_to_text(&blocks, 48, &framing).unwrap(), text);
        }
    }

    #[test]
    fn alphabet_blank_digit_values() {
        let framing = Framing::Alphabet {
            chars: "AB".to_owned(),
            blank: true,
        };
        // Base 3 with digits A=1 B=2, five digits per 8-bit block.
        let blocks = text_to_blocks("ABAB", 8, &framing).unwrap();
        assert_eq!(blocks, vec![50]);
        assert_eq!(blocks_to_text(&blocks, 8, &framing).unwrap(), "ABAB");
    }

    #[test]
    fn alphabet_empty_text_is_empty() {
        let framing = Framing::printable_ascii();
        assert_eq!(text_to_blocks("", 48, &framing).unwrap(), Vec::<Block>::new());
        assert_eq!(blocks_to_text(&[], 48, &framing).unwrap(), "");
    }

    #[test]
    fn alphabet_names_offending_characters_once() {
        let framing = Framing::Alphabet {
            chars: "x!".to_owned(),
            blank: false,
        };
        assert_eq!(
            text_to_blocks("x\u{e9}x!z\u{e9}", 48, &framing),
            Err(Error::InvalidCharacters("\u{e9},z".to_owned()))
        );
    }

    #[test]
    fn alphabet_rejects_out_of_range_block() {
        let framing = Framing::Alphabet {
            chars: "AB".to_owned(),
            blank: false,
        };
        // 4-bit capacity at base 2 is 16 values.
        assert_eq!(
            blocks_to_text(&[16], 4, &framing),
            Err(Error::BlockOutOfRange(16))
        );
    }

    #[test]
    fn alphabet_size_limits() {
        assert_eq!(
            text_to_blocks(
                "",
                8,
                &Framing::Alphabet { chars: String::new(), blank: true }
            ),
            Err(Error::AlphabetTooSmall)
        );
        assert_eq!(
            text_to_blocks(
                "",
                8,
                &Framing::Alphabet { chars: "a".to_owned(), blank: false }
            ),
            Err(Error::AlphabetTooSmall)
        );
        assert_eq!(
            text_to_blocks(
                "",
                1,
                &Framing::Alphabet { chars: "abc".to_owned(), blank: false }
            ),
            Err(Error::AlphabetTooLarge(3))
        );
    }
}
