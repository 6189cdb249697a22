//! Minimal UTF-8 codec.
//!
//! Encoding matches [`str::as_bytes`] byte for byte; it exists so the
//! byte framing can state its wire layout without leaning on string
//! internals. Decoding validates leads, continuations, overlong forms
//! and scalar range, and reports a typed error instead of panicking on
//! bytes a wrong key produced.

use crate::error::{Error, Result};

/// Encodes text as UTF-8 bytes.
pub fn encode_utf8(text: &str) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(text.len());
    for c in text.chars() {
        let cp = c as u32;
        if cp < 0x80 {
            bytes.push(cp as u8);
        } else if cp < 0x800 {
            bytes.push(0xC0 | (cp >> 6) as u8);
            bytes.push(0x80 | (cp & 0x3F) as u8);
        } else if cp < 0x10000 {
            bytes.push(0xE0 | (cp >> 12) as u8);
            bytes.push(0x80 | ((cp >> 6) & 0x3F) as u8);
            bytes.push(0x80 | (cp & 0x3F) as u8);
        } else {
            bytes.push(0xF0 | (cp >> 18) as u8);
            bytes.push(0x80 | ((cp >> 12) & 0x3F) as u8);
            bytes.push(0x80 | ((cp >> 6) & 0x3F) as u8);
            bytes.push(0x80 | (cp & 0x3F) as u8);
        }
    }
    bytes
}

/// Decodes UTF-8 bytes back into text.
///
/// Rejects stray continuation bytes, truncated sequences, overlong
/// encodings and surrogate code points with [`Error::InvalidUtf8`].
pub fn decode_utf8(bytes: &[u8]) -> Result<String> {
    let mut text = String::new();
    let mut i = 0;
    while i < bytes.len() {
        let lead = bytes[i];
        let (len, init) = match lead {
            0x00..=0x7F => (1, u32::from(lead)),
            0xC0..=0xDF => (2, u32::from(lead & 0x1F)),
            0xE0..=0xEF => (3, u32::from(lead & 0x0F)),
            0xF0..=0xF7 => (4, u32::from(lead & 0x07)),
            _ => return Err(Error::InvalidUtf8),
        };
        if i + len > bytes.len() {
            return Err(Error::InvalidUtf8);
        }
        let mut cp = init;
        for &b in &bytes[i + 1..i + len] {
            if b & 0xC0 != 0x80 {
                return Err(Error::InvalidUtf8);
            }
            cp = (cp << 6) | u32::from(b & 0x3F);
        }
        let min = match len {
            2 => 0x80,
            3 => 0x800,
            4 => 0x10000,
            _ => 0,
        };
        if cp < min {
            return Err(Error::InvalidUtf8);
        }
        match char::from_u32(cp) {
            Some(c) => text.push(c),
            None => return Err(Error::InvalidUtf8),
        }
        i += len;
    }
    Ok(text)
}
