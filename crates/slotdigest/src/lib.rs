//! slotdigest - hashing structured in-memory data without serializing it
//!
//! This crate provides:
//! - Primitive hash operations over fixed regions, word sequences and byte strings
//! - An order-sensitive combinator for child digests
//! - The composition protocol for struct-like values with pointer slots
//! - A bounds-checked reader for raw `(length, data...)` arenas
//! - Pluggable primitives (BLAKE3 by default, SHA-256, Keccak-256)
//!
//! Values are hashed where they already live. A pointer slot contributes the
//! digest of its target instead of its own bytes, so a parent's hashed region
//! is always fixed-width however much data it reaches.

pub mod combine;
pub mod compose;
pub mod config;
pub mod digest;
pub mod engine;
pub mod error;
pub mod hash;
pub mod layout;
pub mod memory;
pub mod primitive;

// Re-export main types for convenience
pub use combine::{combine, combine_all, combine_all_with, combine_with};
pub use compose::{
    hash_composite, hash_composite_with, Composite, CompositeHasher, Slot, SlotSink, Strategy,
    StructHash,
};
pub use config::{Backend, HashConfig};
pub use digest::{Digest, DIGEST_SIZE, NIL_DIGEST};
pub use engine::Engine;
pub use error::{Error, Result};
pub use hash::{
    hash_byte_string, hash_byte_string_with, hash_contiguous, hash_contiguous_with,
    hash_word_digests, hash_word_digests_with, hash_word_sequence, hash_word_sequence_with,
};
pub use layout::{word_from_u64, ByteStr, Word, WordSeq, WORD_SIZE};
pub use memory::{Field, Memory, Shape};
pub use primitive::{Blake3, HashPrimitive, IncrementalHasher, Keccak256, Sha256};
