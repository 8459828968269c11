//! The 32-byte digest value shared by every hash primitive

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Size in bytes of every digest produced by this crate
pub const DIGEST_SIZE: usize = 32;

/// BLAKE3 of the empty input.
///
/// This is the digest of an empty byte string, an empty word sequence and an
/// absent child under the default primitive.
pub const NIL_DIGEST: Digest =
    Digest::from_hex_const("af1349b9f5f9a1a6a0404dea36dcc9499bcb25c9adc112b7cc9a93cae41f3262");

/// Opaque output of a hash primitive
///
/// Substitutable anywhere a raw 32-byte slot value could appear, which is
/// what lets a pointer slot be replaced by the digest of its target.
#[derive(Copy, Clone, Hash, Eq, PartialEq, Ord, PartialOrd, Default, Serialize, Deserialize)]
pub struct Digest([u8; DIGEST_SIZE]);

impl Digest {
    /// Create a digest from raw bytes
    pub const fn from_bytes(bytes: [u8; DIGEST_SIZE]) -> Self {
        Self(bytes)
    }

    /// Get the digest as a byte array
    pub const fn as_bytes(&self) -> &[u8; DIGEST_SIZE] {
        &self.0
    }

    /// Consume the digest and return the byte array
    pub const fn into_bytes(self) -> [u8; DIGEST_SIZE] {
        self.0
    }

    /// Convert to lowercase hex string
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse from a 64-character hex string
    pub fn from_hex(s: &str) -> Result<Self> {
        if s.len() != DIGEST_SIZE * 2 {
            return Err(Error::InvalidHex(format!(
                "expected {} characters, got {}",
                DIGEST_SIZE * 2,
                s.len()
            )));
        }
        let mut bytes = [0u8; DIGEST_SIZE];
        hex::decode_to_slice(s, &mut bytes).map_err(|e| Error::InvalidHex(e.to_string()))?;
        Ok(Self(bytes))
    }

    /// Compile-time hex decoding for digest constants.
    ///
    /// Malformed input fails const evaluation, so it can only be used in
    /// `const` items.
    pub(crate) const fn from_hex_const(s: &str) -> Self {
        let src = s.as_bytes();
        assert!(src.len() == DIGEST_SIZE * 2, "digest constant must be 64 hex characters");
        let mut bytes = [0u8; DIGEST_SIZE];
        let mut i = 0;
        while i < DIGEST_SIZE {
            bytes[i] = (nibble(src[i * 2]) << 4) | nibble(src[i * 2 + 1]);
            i += 1;
        }
        Self(bytes)
    }
}

const fn nibble(c: u8) -> u8 {
    match c {
        b'0'..=b'9' => c - b'0',
        b'a'..=b'f' => c - b'a' + 10,
        b'A'..=b'F' => c - b'A' + 10,
        _ => panic!("invalid hex character in digest constant"),
    }
}

impl AsRef<[u8]> for Digest {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; DIGEST_SIZE]> for Digest {
    fn from(bytes: [u8; DIGEST_SIZE]) -> Self {
        Self(bytes)
    }
}

impl From<Digest> for [u8; DIGEST_SIZE] {
    fn from(digest: Digest) -> Self {
        digest.0
    }
}

impl std::str::FromStr for Digest {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

impl std::fmt::Debug for Digest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Digest({})", self.to_hex())
    }
}

impl std::fmt::Display for Digest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}
