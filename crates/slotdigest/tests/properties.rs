//! Property tests for the hashing protocol

use proptest::prelude::*;
use slotdigest::{
    combine, combine_all, hash_byte_string, hash_composite_with, hash_contiguous,
    hash_word_sequence, Blake3, ByteStr, Composite, Digest, HashPrimitive, Keccak256, Sha256,
    Slot, Strategy as Traversal, Word, WordSeq, NIL_DIGEST,
};

fn word() -> impl Strategy<Value = Word> {
    any::<[u8; 32]>()
}

/// Slot description that owns its data, so proptest can generate it
#[derive(Debug, Clone)]
enum OwnedSlot {
    Fixed(Word),
    Bytes(Vec<u8>),
    Words(Vec<Word>),
    Absent,
}

impl OwnedSlot {
    fn borrow(&self) -> Slot<'_> {
        match self {
            OwnedSlot::Fixed(word) => Slot::Fixed(word),
            OwnedSlot::Bytes(bytes) => Slot::Bytes(ByteStr::new(bytes)),
            OwnedSlot::Words(words) => Slot::Words(WordSeq::new(words)),
            OwnedSlot::Absent => Slot::Absent,
        }
    }

    /// What the slot contributes to a patched region, computed the slow way
    fn reference_bytes(&self) -> Vec<u8> {
        match self {
            OwnedSlot::Fixed(word) => word.to_vec(),
            OwnedSlot::Bytes(bytes) => Blake3::digest(bytes).as_bytes().to_vec(),
            OwnedSlot::Words(words) => Blake3::digest(&words.concat()).as_bytes().to_vec(),
            OwnedSlot::Absent => NIL_DIGEST.as_bytes().to_vec(),
        }
    }
}

fn owned_slot() -> impl Strategy<Value = OwnedSlot> {
    prop_oneof![
        word().prop_map(OwnedSlot::Fixed),
        prop::collection::vec(any::<u8>(), 0..80).prop_map(OwnedSlot::Bytes),
        prop::collection::vec(word(), 0..6).prop_map(OwnedSlot::Words),
        Just(OwnedSlot::Absent),
    ]
}

proptest! {
    #[test]
    fn prop_byte_string_equals_reference(bytes in prop::collection::vec(any::<u8>(), 0..512)) {
        prop_assert_eq!(hash_byte_string(ByteStr::new(&bytes)), Blake3::digest(&bytes));
    }

    #[test]
    fn prop_word_sequence_equals_reference(words in prop::collection::vec(word(), 0..24)) {
        let reference = words.concat();
        prop_assert_eq!(hash_word_sequence(WordSeq::new(&words)), Blake3::digest(&reference));
    }

    #[test]
    fn prop_contiguous_equals_reference(bytes in prop::collection::vec(any::<u8>(), 0..256)) {
        prop_assert_eq!(hash_contiguous(&bytes), Blake3::digest(&bytes));
    }

    #[test]
    fn prop_combine_is_hash_of_pair(a in any::<[u8; 32]>(), b in any::<[u8; 32]>()) {
        let (a, b) = (Digest::from_bytes(a), Digest::from_bytes(b));
        let mut pair = a.as_bytes().to_vec();
        pair.extend_from_slice(b.as_bytes());
        prop_assert_eq!(combine(&a, &b), Blake3::digest(&pair));
        if a != b {
            prop_assert_ne!(combine(&a, &b), combine(&b, &a));
        }
    }

    #[test]
    fn prop_combine_all_folds_left(raw in prop::collection::vec(any::<[u8; 32]>(), 1..8)) {
        let digests: Vec<Digest> = raw.into_iter().map(Digest::from_bytes).collect();
        let expected = digests[1..].iter().fold(digests[0], |acc, d| combine(&acc, d));
        prop_assert_eq!(combine_all(&digests), expected);
    }

    #[test]
    fn prop_strategies_agree(slots in prop::collection::vec(owned_slot(), 0..10)) {
        let borrowed: Vec<Slot<'_>> = slots.iter().map(OwnedSlot::borrow).collect();
        let composite = Composite::new(&borrowed);

        let sequential = hash_composite_with::<Blake3>(&composite, Traversal::Sequential);
        let patched = hash_composite_with::<Blake3>(&composite, Traversal::Patched);
        prop_assert_eq!(sequential, patched);

        let region: Vec<u8> = slots.iter().flat_map(OwnedSlot::reference_bytes).collect();
        prop_assert_eq!(sequential, Blake3::digest(&region));

        prop_assert_eq!(
            hash_composite_with::<Sha256>(&composite, Traversal::Sequential),
            hash_composite_with::<Sha256>(&composite, Traversal::Patched)
        );
        prop_assert_eq!(
            hash_composite_with::<Keccak256>(&composite, Traversal::Sequential),
            hash_composite_with::<Keccak256>(&composite, Traversal::Patched)
        );
    }

    #[test]
    fn prop_single_field_change_is_detected(
        prefix in word(),
        a in prop::collection::vec(any::<u8>(), 0..64),
        b in prop::collection::vec(any::<u8>(), 0..64),
    ) {
        prop_assume!(a != b);
        let left = [Slot::Fixed(&prefix), Slot::Bytes(ByteStr::new(&a))];
        let right = [Slot::Fixed(&prefix), Slot::Bytes(ByteStr::new(&b))];
        for strategy in [Traversal::Sequential, Traversal::Patched] {
            prop_assert_ne!(
                hash_composite_with::<Blake3>(&Composite::new(&left), strategy),
                hash_composite_with::<Blake3>(&Composite::new(&right), strategy)
            );
        }
    }
}
