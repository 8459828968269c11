//! Primitive hash operations over the three memory shapes
//!
//! Each operation reads bytes where they already live and hands them to the
//! primitive unchanged. Nothing is copied, no length is prefixed, and the
//! only state is the primitive's own fixed-size context.
//!
//! The unsuffixed functions use the default [`Blake3`] primitive; the
//! `*_with` forms take any [`HashPrimitive`].

use crate::digest::Digest;
use crate::layout::{ByteStr, WordSeq};
use crate::primitive::{Blake3, HashPrimitive};

/// Hash a fixed-width region, exactly its bytes
pub fn hash_contiguous(region: &[u8]) -> Digest {
    hash_contiguous_with::<Blake3>(region)
}

/// Hash a word sequence: the concatenated elements, count excluded
pub fn hash_word_sequence(seq: WordSeq<'_>) -> Digest {
    hash_word_sequence_with::<Blake3>(seq)
}

/// Hash a byte string at its true length
pub fn hash_byte_string(bytes: ByteStr<'_>) -> Digest {
    hash_byte_string_with::<Blake3>(bytes)
}

/// Hash a word sequence whose elements are child digests
pub fn hash_word_digests(digests: &[Digest]) -> Digest {
    hash_word_digests_with::<Blake3>(digests)
}

/// [`hash_contiguous`] under the primitive `H`
pub fn hash_contiguous_with<H: HashPrimitive>(region: &[u8]) -> Digest {
    H::digest(region)
}

/// [`hash_word_sequence`] under the primitive `H`
pub fn hash_word_sequence_with<H: HashPrimitive>(seq: WordSeq<'_>) -> Digest {
    hash_contiguous_with::<H>(seq.as_bytes())
}

/// [`hash_byte_string`] under the primitive `H`
pub fn hash_byte_string_with<H: HashPrimitive>(bytes: ByteStr<'_>) -> Digest {
    hash_contiguous_with::<H>(bytes.as_bytes())
}

/// Same digest as a [`WordSeq`] holding these digests as its elements.
///
/// The digests are streamed into the primitive one at a time rather than
/// gathered into a word buffer first.
pub fn hash_word_digests_with<H: HashPrimitive>(digests: &[Digest]) -> Digest {
    let mut state = H::new();
    for digest in digests {
        state.update(digest.as_bytes());
    }
    state.finalize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::digest::NIL_DIGEST;
    use crate::layout::{word_from_u64, Word};
    use crate::primitive::{Keccak256, Sha256};

    #[test]
    fn test_empty_inputs_are_nil() {
        assert_eq!(hash_contiguous(&[]), NIL_DIGEST);
        assert_eq!(hash_byte_string(ByteStr::EMPTY), NIL_DIGEST);
        assert_eq!(hash_word_sequence(WordSeq::EMPTY), NIL_DIGEST);
        assert_eq!(hash_word_digests(&[]), NIL_DIGEST);
        assert_eq!(NIL_DIGEST, Blake3::digest(&[]));
    }

    #[test]
    fn test_empty_inputs_are_nil_for_every_backend() {
        assert_eq!(hash_byte_string_with::<Sha256>(ByteStr::EMPTY), Sha256::NIL);
        assert_eq!(hash_word_sequence_with::<Keccak256>(WordSeq::EMPTY), Keccak256::NIL);
    }

    /// SHA-256 with a deliberately wrong `NIL`
    struct WrongNil(Sha256);

    impl HashPrimitive for WrongNil {
        const NIL: Digest = Digest::from_bytes([0; 32]);
        const NAME: &'static str = "wrong-nil";

        fn new() -> Self {
            Self(Sha256::new())
        }

        fn update(&mut self, data: &[u8]) {
            self.0.update(data);
        }

        fn finalize(self) -> Digest {
            self.0.finalize()
        }
    }

    #[test]
    fn test_empty_inputs_go_through_the_primitive() {
        assert_eq!(hash_contiguous_with::<WrongNil>(&[]), Sha256::NIL);
        assert_eq!(hash_byte_string_with::<WrongNil>(ByteStr::EMPTY), Sha256::NIL);
        assert_eq!(hash_word_sequence_with::<WrongNil>(WordSeq::EMPTY), Sha256::NIL);
        assert_eq!(hash_word_digests_with::<WrongNil>(&[]), Sha256::NIL);
    }

    #[test]
    fn test_byte_string_matches_reference() {
        let data = b"the quick brown fox";
        assert_eq!(hash_byte_string(ByteStr::new(data)), Blake3::digest(data));
    }

    #[test]
    fn test_byte_string_true_length() {
        // Both strings fit in a single padded word; hashing the padded
        // footprint would make them collide.
        let one = hash_byte_string(ByteStr::new(&[0x01]));
        let two = hash_byte_string(ByteStr::new(&[0x01, 0x00]));
        assert_ne!(one, two);
    }

    #[test]
    fn test_word_sequence_excludes_count() {
        let words: Vec<Word> = (0..4).map(word_from_u64).collect();
        let mut reference = Vec::new();
        for word in &words {
            reference.extend_from_slice(word);
        }
        assert_eq!(hash_word_sequence(WordSeq::new(&words)), Blake3::digest(&reference));

        let mut with_count = word_from_u64(4).to_vec();
        with_count.extend_from_slice(&reference);
        assert_ne!(hash_word_sequence(WordSeq::new(&words)), Blake3::digest(&with_count));
    }

    #[test]
    fn test_word_sequence_length_zero_vs_twenty() {
        let words = vec![[7u8; 32]; 20];
        let empty = hash_word_sequence(WordSeq::new(&words[..0]));
        let full = hash_word_sequence(WordSeq::new(&words));
        assert_eq!(empty, NIL_DIGEST);
        assert_ne!(empty, full);
    }

    #[test]
    fn test_word_digests_match_word_sequence() {
        let digests = [hash_contiguous(b"a"), hash_contiguous(b"b")];
        let words: Vec<Word> = digests.iter().map(|d| d.into_bytes()).collect();
        assert_eq!(hash_word_digests(&digests), hash_word_sequence(WordSeq::new(&words)));
    }
}
