//! Composition protocol for struct-like values
//!
//! A composite is a fixed, ordered list of slots. Its digest is the
//! primitive applied to the slots in declaration order, where each slot that
//! points at non-contiguous data contributes the 32-byte digest of that data
//! instead of its own bytes. Children are hashed with the same rules, so the
//! protocol recurses through any depth of nesting while the parent always
//! sees a fixed-width value.
//!
//! Two strategies compute the same digest:
//!
//! - [`Strategy::Patched`] copies the slot values into a small scratch region
//!   with child digests written over the pointer slots, then hashes the
//!   region in one call.
//! - [`Strategy::Sequential`] keeps one running hash state and absorbs fixed
//!   values straight from where they live, then each child digest, in
//!   declaration order. It needs no scratch copy at all.
//!
//! Both feed the primitive the identical byte stream. Folding with
//! [`combine`](crate::combine::combine) is a different construction
//! (`H(H(prefix) || d)` rather than `H(prefix || d)`) and must not be used
//! to hash a slot layout.

use crate::digest::Digest;
use crate::hash::{hash_byte_string_with, hash_word_digests_with, hash_word_sequence_with};
use crate::layout::{ByteStr, WordSeq, WORD_SIZE};
use crate::primitive::{Blake3, HashPrimitive, IncrementalHasher};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Scratch bytes kept on the stack by the patched strategy (eight slots)
pub const PATCH_INLINE: usize = 8 * WORD_SIZE;

/// Traversal used to hash a composite. Never changes the digest.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Patch child digests into a scratch copy, hash as one region
    Patched,
    /// Absorb fixed values and child digests into one running state
    #[default]
    Sequential,
}

/// One slot of a composite, in declaration order
#[derive(Debug, Clone, Copy)]
pub enum Slot<'a> {
    /// Raw fixed-width value, hashed as is
    Fixed(&'a [u8]),
    /// Pointer to a byte string
    Bytes(ByteStr<'a>),
    /// Pointer to a word sequence of inline elements
    Words(WordSeq<'a>),
    /// Pointer to a word sequence whose elements are child digests
    Digests(&'a [Digest]),
    /// Pointer to another composite
    Nested(&'a Composite<'a>),
    /// Child digest computed earlier
    Digest(Digest),
    /// Pointer to nothing; contributes the nil digest
    Absent,
}

impl Slot<'_> {
    /// Whether the slot is replaced by a child digest when hashing
    pub fn is_pointer(&self) -> bool {
        !matches!(self, Slot::Fixed(_))
    }

    /// Bytes this slot contributes to the parent's hashed region
    pub fn hashed_width(&self) -> usize {
        match self {
            Slot::Fixed(bytes) => bytes.len(),
            _ => WORD_SIZE,
        }
    }
}

/// Run-time description of a composite value
#[derive(Debug, Clone, Copy)]
pub struct Composite<'a> {
    slots: &'a [Slot<'a>],
}

impl<'a> Composite<'a> {
    pub const fn new(slots: &'a [Slot<'a>]) -> Self {
        Self { slots }
    }

    pub fn slots(&self) -> &'a [Slot<'a>] {
        self.slots
    }

    /// Size of the patched region, independent of how much data the
    /// pointer slots reach
    pub fn hashed_width(&self) -> usize {
        self.slots.iter().map(Slot::hashed_width).sum()
    }
}

impl StructHash for Composite<'_> {
    fn visit_slots<S: SlotSink>(&self, sink: &mut S) {
        for slot in self.slots {
            sink.slot(*slot);
        }
    }
}

/// Receiver of slots, driven by [`StructHash::visit_slots`]
pub trait SlotSink {
    fn slot(&mut self, slot: Slot<'_>);

    /// Pointer slot whose target is itself a [`StructHash`] value
    fn nested<T: StructHash + ?Sized>(&mut self, child: &T);

    /// Pointer slot to a word sequence whose elements point at
    /// [`StructHash`] values
    fn nested_seq<T: StructHash>(&mut self, children: &[T]);
}

/// Glue for application structs.
///
/// Implementors only list their slots in declaration order:
///
/// ```
/// use slotdigest::{Slot, SlotSink, StructHash, ByteStr, Word};
///
/// struct Account {
///     balance: Word,
///     owner: String,
/// }
///
/// impl StructHash for Account {
///     fn visit_slots<S: SlotSink>(&self, sink: &mut S) {
///         sink.slot(Slot::Fixed(&self.balance));
///         sink.slot(Slot::Bytes(ByteStr::from(self.owner.as_str())));
///     }
/// }
///
/// let account = Account { balance: [0; 32], owner: "alice".into() };
/// let _digest = account.struct_digest();
/// ```
pub trait StructHash {
    fn visit_slots<S: SlotSink>(&self, sink: &mut S);

    /// Digest under the default primitive and strategy
    fn struct_digest(&self) -> Digest {
        self.struct_digest_with::<Blake3>(Strategy::default())
    }

    fn struct_digest_with<H: HashPrimitive>(&self, strategy: Strategy) -> Digest {
        let mut hasher = CompositeHasher::<H>::new(strategy);
        self.visit_slots(&mut hasher);
        hasher.finish()
    }
}

impl<T: StructHash + ?Sized> StructHash for &T {
    fn visit_slots<S: SlotSink>(&self, sink: &mut S) {
        (**self).visit_slots(sink);
    }
}

/// Hash a composite with the default primitive and strategy
pub fn hash_composite(composite: &Composite<'_>) -> Digest {
    composite.struct_digest()
}

pub fn hash_composite_with<H: HashPrimitive>(composite: &Composite<'_>, strategy: Strategy) -> Digest {
    composite.struct_digest_with::<H>(strategy)
}

enum State<H: HashPrimitive> {
    Sequential(IncrementalHasher<H>),
    Patched(SmallVec<[u8; PATCH_INLINE]>),
}

/// [`SlotSink`] that produces the composite digest under either strategy
pub struct CompositeHasher<H: HashPrimitive = Blake3> {
    strategy: Strategy,
    state: State<H>,
}

impl<H: HashPrimitive> CompositeHasher<H> {
    pub fn new(strategy: Strategy) -> Self {
        let state = match strategy {
            Strategy::Sequential => State::Sequential(IncrementalHasher::new()),
            Strategy::Patched => State::Patched(SmallVec::new()),
        };
        Self { strategy, state }
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Append a fixed value, or a child digest standing in for a pointer
    pub fn absorb(&mut self, bytes: &[u8]) {
        match &mut self.state {
            State::Sequential(hasher) => hasher.update(bytes),
            State::Patched(scratch) => scratch.extend_from_slice(bytes),
        }
    }

    pub fn absorb_digest(&mut self, digest: &Digest) {
        self.absorb(digest.as_bytes());
    }

    pub fn finish(self) -> Digest {
        match self.state {
            State::Sequential(hasher) => hasher.finalize(),
            State::Patched(scratch) => H::digest(&scratch),
        }
    }
}

impl<H: HashPrimitive> SlotSink for CompositeHasher<H> {
    fn slot(&mut self, slot: Slot<'_>) {
        let child = match slot {
            Slot::Fixed(bytes) => {
                self.absorb(bytes);
                return;
            }
            Slot::Bytes(bytes) => hash_byte_string_with::<H>(bytes),
            Slot::Words(words) => hash_word_sequence_with::<H>(words),
            Slot::Digests(digests) => hash_word_digests_with::<H>(digests),
            Slot::Nested(composite) => composite.struct_digest_with::<H>(self.strategy),
            Slot::Digest(digest) => digest,
            Slot::Absent => H::NIL,
        };
        self.absorb_digest(&child);
    }

    fn nested<T: StructHash + ?Sized>(&mut self, child: &T) {
        let digest = child.struct_digest_with::<H>(self.strategy);
        self.absorb_digest(&digest);
    }

    fn nested_seq<T: StructHash>(&mut self, children: &[T]) {
        // Streams the element digests, same result as `Slot::Digests`.
        let mut elements = IncrementalHasher::<H>::new();
        for child in children {
            elements.update_digest(&child.struct_digest_with::<H>(self.strategy));
        }
        let digest = elements.finalize();
        self.absorb_digest(&digest);
    }
}
