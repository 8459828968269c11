//! Errors raised at the checked API boundary
//!
//! The hashing core itself is total. Only decoding raw memory, parsing hex
//! and loading configuration can fail.

use thiserror::Error;

/// Result type used throughout slotdigest
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// A read would run past the end of the memory arena
    #[error("read of {len} bytes at offset {offset} exceeds arena of {available} bytes")]
    OutOfBounds {
        offset: usize,
        len: usize,
        available: usize,
    },

    /// A length or pointer word does not fit in `usize`
    #[error("word at offset {offset} does not fit in a machine-sized length or pointer")]
    WordOverflow { offset: usize },

    /// A byte view offered as a word sequence is not a whole number of words
    #[error("{len} bytes is not a whole number of 32-byte words")]
    NotWordMultiple { len: usize },

    /// Pointer chain deeper than the configured limit (usually a cycle)
    #[error("pointer chain exceeds depth limit of {limit}")]
    DepthExceeded { limit: usize },

    #[error("invalid hex digest: {0}")]
    InvalidHex(String),

    #[error("invalid configuration: {0}")]
    Config(String),
}
