//! Shared fixtures for slotdigest integration tests

#![allow(dead_code)]

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use slotdigest::{word_from_u64, Word, WORD_SIZE};

/// Route library logs to the test harness output
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing_subscriber::filter::LevelFilter::TRACE)
        .try_init();
}

/// Deterministic RNG so failures reproduce
pub fn seeded_rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

pub fn random_words(rng: &mut ChaCha8Rng, count: usize) -> Vec<Word> {
    (0..count).map(|_| rng.gen::<Word>()).collect()
}

pub fn random_bytes(rng: &mut ChaCha8Rng, len: usize) -> Vec<u8> {
    (0..len).map(|_| rng.gen::<u8>()).collect()
}

/// Append-only arena following the host layout: word slots, big-endian
/// lengths and pointers, byte strings padded to whole words.
#[derive(Default)]
pub struct Arena {
    bytes: Vec<u8>,
}

impl Arena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn here(&self) -> usize {
        self.bytes.len()
    }

    pub fn word(&mut self, word: Word) -> usize {
        let at = self.here();
        self.bytes.extend_from_slice(&word);
        at
    }

    pub fn uint(&mut self, value: usize) -> usize {
        self.word(word_from_u64(value as u64))
    }

    /// `[len][bytes][zero padding]`, returns the address of the length slot
    pub fn byte_string(&mut self, data: &[u8]) -> usize {
        let at = self.uint(data.len());
        self.bytes.extend_from_slice(data);
        let padded = data.len().div_ceil(WORD_SIZE) * WORD_SIZE;
        self.bytes.resize(self.bytes.len() + padded - data.len(), 0);
        at
    }

    /// Same as `byte_string` but padding with the given filler byte
    pub fn byte_string_padded_with(&mut self, data: &[u8], filler: u8) -> usize {
        let at = self.uint(data.len());
        self.bytes.extend_from_slice(data);
        let padded = data.len().div_ceil(WORD_SIZE) * WORD_SIZE;
        self.bytes.resize(self.bytes.len() + padded - data.len(), filler);
        at
    }

    /// `[count][element slots]`
    pub fn word_sequence(&mut self, words: &[Word]) -> usize {
        let at = self.uint(words.len());
        for word in words {
            self.word(*word);
        }
        at
    }
}
