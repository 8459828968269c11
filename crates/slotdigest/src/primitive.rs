//! Pluggable fixed-output hash primitives
//!
//! The protocol treats the primitive as an opaque, collision-resistant oracle
//! with a 32-byte output. Anything implementing [`HashPrimitive`] can back the
//! core operations; three backends ship with the crate:
//!
//! - [`Blake3`] (default)
//! - [`Sha256`]
//! - [`Keccak256`]

use crate::digest::{Digest, DIGEST_SIZE, NIL_DIGEST};
use sha2::Digest as _;

/// Regions at least this large are hashed with BLAKE3's multithreaded
/// `update_rayon`. Below it the thread handoff costs more than it saves.
pub const PARALLEL_THRESHOLD: usize = 128 * 1024;

/// Streaming interface implemented by every hash backend
pub trait HashPrimitive: Sized {
    /// Digest of the zero-length input.
    ///
    /// Must equal `Self::digest(&[])`. The empty-input operations hash
    /// through the primitive, but [`combine_all`](crate::combine::combine_all)
    /// of no digests and absent composite slots use this constant directly.
    const NIL: Digest;

    /// Short lowercase name, as used in configuration files
    const NAME: &'static str;

    /// Create a fresh hashing state
    fn new() -> Self;

    /// Absorb more bytes
    fn update(&mut self, data: &[u8]);

    /// Finish and return the digest
    fn finalize(self) -> Digest;

    /// One-shot hash of a byte slice
    fn digest(data: &[u8]) -> Digest {
        let mut state = Self::new();
        state.update(data);
        state.finalize()
    }
}

/// BLAKE3
#[derive(Clone, Default)]
pub struct Blake3(blake3::Hasher);

impl HashPrimitive for Blake3 {
    const NIL: Digest = NIL_DIGEST;
    const NAME: &'static str = "blake3";

    fn new() -> Self {
        Self(blake3::Hasher::new())
    }

    fn update(&mut self, data: &[u8]) {
        if data.len() >= PARALLEL_THRESHOLD {
            self.0.update_rayon(data);
        } else {
            self.0.update(data);
        }
    }

    fn finalize(self) -> Digest {
        Digest::from_bytes(*self.0.finalize().as_bytes())
    }

    fn digest(data: &[u8]) -> Digest {
        if data.len() >= PARALLEL_THRESHOLD {
            let mut state = Self::new();
            state.update(data);
            return state.finalize();
        }
        Digest::from_bytes(*blake3::hash(data).as_bytes())
    }
}

/// SHA-256
#[derive(Clone, Default)]
pub struct Sha256(sha2::Sha256);

impl HashPrimitive for Sha256 {
    const NIL: Digest =
        Digest::from_hex_const("e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855");
    const NAME: &'static str = "sha256";

    fn new() -> Self {
        Self(sha2::Sha256::new())
    }

    fn update(&mut self, data: &[u8]) {
        self.0.update(data);
    }

    fn finalize(self) -> Digest {
        let bytes: [u8; DIGEST_SIZE] = self.0.finalize().into();
        Digest::from_bytes(bytes)
    }
}

/// Keccak-256 (the pre-standard padding used by Ethereum, not SHA3-256)
#[derive(Clone)]
pub struct Keccak256(tiny_keccak::Keccak);

impl HashPrimitive for Keccak256 {
    const NIL: Digest =
        Digest::from_hex_const("c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470");
    const NAME: &'static str = "keccak256";

    fn new() -> Self {
        Self(tiny_keccak::Keccak::v256())
    }

    fn update(&mut self, data: &[u8]) {
        tiny_keccak::Hasher::update(&mut self.0, data);
    }

    fn finalize(self) -> Digest {
        let mut out = [0u8; DIGEST_SIZE];
        tiny_keccak::Hasher::finalize(self.0, &mut out);
        Digest::from_bytes(out)
    }
}

/// Incremental hasher for building a digest across multiple pieces
///
/// Absorbing pieces one after another is byte-for-byte the same as hashing
/// their concatenation, which is what the sequential composite strategy
/// relies on.
pub struct IncrementalHasher<H: HashPrimitive = Blake3> {
    inner: H,
    absorbed: u64,
}

impl<H: HashPrimitive> IncrementalHasher<H> {
    /// Create a new incremental hasher
    pub fn new() -> Self {
        Self {
            inner: H::new(),
            absorbed: 0,
        }
    }

    /// Update the hash with more data
    pub fn update(&mut self, data: &[u8]) {
        self.inner.update(data);
        self.absorbed += data.len() as u64;
    }

    /// Absorb a child digest in place of the slot that pointed to it
    pub fn update_digest(&mut self, digest: &Digest) {
        self.update(digest.as_bytes());
    }

    /// Number of bytes absorbed so far
    pub fn absorbed(&self) -> u64 {
        self.absorbed
    }

    /// Finalize and return the digest
    pub fn finalize(self) -> Digest {
        self.inner.finalize()
    }
}

impl<H: HashPrimitive> Default for IncrementalHasher<H> {
    fn default() -> Self {
        Self::new()
    }
}
