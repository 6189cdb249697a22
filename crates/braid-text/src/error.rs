//! Error types for the text boundary.

/// Failures raised while framing text, parsing ciphertext, or validating
/// options. The cipher engine itself is total over well-formed input;
/// everything that can go wrong surfaces here at the boundary.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Input characters outside the configured alphabet, comma separated
    /// in first-seen order.
    #[error("invalid characters for the configured alphabet: {0}")]
    InvalidCharacters(String),
    /// A block value no alphabet or byte sequence of the configured
    /// width can represent.
    #[error("block value {0} not representable at the configured block size")]
    BlockOutOfRange(u64),
    /// Decrypted bytes end in an invalid padding run, usually from a
    /// wrong key or tampered ciphertext.
    #[error("invalid padding in decrypted data")]
    InvalidPadding,
    /// A ciphertext segment that is not a hexadecimal number.
    #[error("invalid hex group {0:?} in ciphertext")]
    InvalidHex(String),
    /// Decrypted bytes are not a well-formed UTF-8 sequence.
    #[error("decrypted bytes are not valid UTF-8")]
    InvalidUtf8,
    /// Block size unusable with the selected framing. Byte framing needs
    /// a multiple of 8 between 8 and 64; alphabet framing accepts 1 to 64.
    #[error("unusable block size {0} for the selected framing")]
    InvalidBlockSize(u32),
    /// Sub-block width outside the range the engine accepts.
    #[error("sub-block size {0} outside the supported range")]
    InvalidSubBlockSize(u32),
    /// Alphabet with fewer than two representable symbol values.
    #[error("alphabet must provide at least two symbol values")]
    AlphabetTooSmall,
    /// Alphabet so large that not even one character fits a block.
    #[error("alphabet with {0} symbol values does not fit one block")]
    AlphabetTooLarge(usize),
    /// Key that frames to zero blocks and therefore cannot key anything.
    #[error("key frames to zero blocks")]
    EmptyKey,
}

/// Boundary result alias.
pub type Result<T> = std::result::Result<T, Error>;
