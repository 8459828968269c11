//! Runtime-configured entry point
//!
//! The free functions pick their primitive at compile time. [`Engine`] picks
//! it from a [`HashConfig`] instead, for callers that load the choice from a
//! file. An engine holds no hashing state, so one instance can be shared by
//! any number of threads.

use crate::combine::{combine_all_with, combine_with};
use crate::compose::{Composite, StructHash};
use crate::config::{Backend, HashConfig};
use crate::digest::Digest;
use crate::error::Result;
use crate::hash::{
    hash_byte_string_with, hash_contiguous_with, hash_word_digests_with, hash_word_sequence_with,
};
use crate::layout::{ByteStr, WordSeq};
use crate::memory::{Memory, Shape};
use crate::primitive::{Blake3, HashPrimitive, Keccak256, Sha256};
use tracing::debug;

/// Run `$body` with `$h` bound to the primitive type selected by `$backend`
macro_rules! with_backend {
    ($backend:expr, $h:ident => $body:expr) => {
        match $backend {
            Backend::Blake3 => {
                type $h = Blake3;
                $body
            }
            Backend::Sha256 => {
                type $h = Sha256;
                $body
            }
            Backend::Keccak256 => {
                type $h = Keccak256;
                $body
            }
        }
    };
}

/// Hashing front end bound to one [`HashConfig`]
#[derive(Debug, Clone, Default)]
pub struct Engine {
    config: HashConfig,
}

impl Engine {
    /// Validate `config` and build an engine around it
    pub fn new(config: HashConfig) -> Result<Self> {
        config.validate()?;
        debug!(backend = %config.backend, strategy = ?config.strategy, "hash engine ready");
        Ok(Self { config })
    }

    /// Configuration in force
    pub fn config(&self) -> &HashConfig {
        &self.config
    }

    /// Digest of the empty input under the configured backend
    pub fn nil(&self) -> Digest {
        with_backend!(self.config.backend, H => H::NIL)
    }

    /// Hash a fixed-width region
    pub fn hash_contiguous(&self, region: &[u8]) -> Digest {
        with_backend!(self.config.backend, H => hash_contiguous_with::<H>(region))
    }

    /// Hash a word sequence, count excluded
    pub fn hash_word_sequence(&self, seq: WordSeq<'_>) -> Digest {
        with_backend!(self.config.backend, H => hash_word_sequence_with::<H>(seq))
    }

    /// Hash a byte string at its true length
    pub fn hash_byte_string(&self, bytes: ByteStr<'_>) -> Digest {
        with_backend!(self.config.backend, H => hash_byte_string_with::<H>(bytes))
    }

    /// Hash a word sequence of child digests
    pub fn hash_word_digests(&self, digests: &[Digest]) -> Digest {
        with_backend!(self.config.backend, H => hash_word_digests_with::<H>(digests))
    }

    /// `H(a || b)`
    pub fn combine(&self, a: &Digest, b: &Digest) -> Digest {
        with_backend!(self.config.backend, H => combine_with::<H>(a, b))
    }

    /// Left fold of `combine` over `digests`
    pub fn combine_all(&self, digests: &[Digest]) -> Digest {
        with_backend!(self.config.backend, H => combine_all_with::<H>(digests))
    }

    /// Hash a composite with the configured strategy
    pub fn hash_composite(&self, composite: &Composite<'_>) -> Digest {
        self.struct_digest(composite)
    }

    /// Hash an application struct with the configured strategy
    pub fn struct_digest<T: StructHash + ?Sized>(&self, value: &T) -> Digest {
        let strategy = self.config.strategy;
        with_backend!(self.config.backend, H => value.struct_digest_with::<H>(strategy))
    }

    /// Hash a value laid out in a raw arena, with the configured depth limit
    pub fn hash_in_memory(&self, arena: &[u8], ptr: usize, shape: &Shape<'_>) -> Result<Digest> {
        let memory = Memory::new(arena).with_max_depth(self.config.max_depth);
        let strategy = self.config.strategy;
        with_backend!(self.config.backend, H => memory.hash_at::<H>(ptr, shape, strategy))
    }
}
