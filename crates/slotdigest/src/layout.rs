//! Borrowed views over the memory shapes the protocol recognizes
//!
//! A view never owns or copies its data. Its extent is exactly the slice it
//! wraps, so a word sequence can only ever cover whole elements and a byte
//! string can only ever cover its true length. Allocator padding after the
//! last byte is unreachable by construction.

use crate::error::{Error, Result};

/// Size of one slot in bytes
pub const WORD_SIZE: usize = 32;

/// One fixed-size slot
pub type Word = [u8; WORD_SIZE];

/// Run-time length list of 32-byte elements.
///
/// The element count lives in the view's length and is never hashed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WordSeq<'a> {
    bytes: &'a [u8],
}

impl<'a> WordSeq<'a> {
    pub const EMPTY: WordSeq<'static> = WordSeq { bytes: &[] };

    pub fn new(words: &'a [Word]) -> Self {
        Self {
            bytes: words.as_flattened(),
        }
    }

    /// View a raw byte run as whole words
    pub fn from_bytes(bytes: &'a [u8]) -> Result<Self> {
        if bytes.len() % WORD_SIZE != 0 {
            return Err(Error::NotWordMultiple { len: bytes.len() });
        }
        Ok(Self { bytes })
    }

    /// Number of elements
    pub fn len(&self) -> usize {
        self.bytes.len() / WORD_SIZE
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Element bytes, concatenated, without any count
    pub fn as_bytes(&self) -> &'a [u8] {
        self.bytes
    }

    pub fn get(&self, index: usize) -> Option<&'a [u8]> {
        let start = index.checked_mul(WORD_SIZE)?;
        self.bytes.get(start..start.checked_add(WORD_SIZE)?)
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = &'a [u8]> + 'a {
        self.bytes.chunks_exact(WORD_SIZE)
    }
}

impl<'a> From<&'a [Word]> for WordSeq<'a> {
    fn from(words: &'a [Word]) -> Self {
        Self::new(words)
    }
}

impl<'a, const N: usize> From<&'a [Word; N]> for WordSeq<'a> {
    fn from(words: &'a [Word; N]) -> Self {
        Self::new(words.as_slice())
    }
}

/// Run-time length string of raw bytes, at its true length
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteStr<'a>(&'a [u8]);

impl<'a> ByteStr<'a> {
    pub const EMPTY: ByteStr<'static> = ByteStr(&[]);

    pub const fn new(bytes: &'a [u8]) -> Self {
        Self(bytes)
    }

    pub const fn len(&self) -> usize {
        self.0.len()
    }

    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub const fn as_bytes(&self) -> &'a [u8] {
        self.0
    }

    /// Bytes the string would occupy once rounded up to whole words.
    ///
    /// Informational only: hashing never reads past `len()`.
    pub const fn padded_len(&self) -> usize {
        self.0.len().div_ceil(WORD_SIZE) * WORD_SIZE
    }
}

impl<'a> From<&'a [u8]> for ByteStr<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        Self(bytes)
    }
}

impl<'a> From<&'a str> for ByteStr<'a> {
    fn from(s: &'a str) -> Self {
        Self(s.as_bytes())
    }
}

/// Left-pad an unsigned integer into a big-endian slot
pub fn word_from_u64(value: u64) -> Word {
    let mut word = [0u8; WORD_SIZE];
    word[WORD_SIZE - 8..].copy_from_slice(&value.to_be_bytes());
    word
}
