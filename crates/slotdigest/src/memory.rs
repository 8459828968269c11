//! Checked reader for the host memory layout contract
//!
//! The layout consumed here:
//!
//! - every field occupies one 32-byte slot
//! - lengths and pointers are big-endian unsigned integers filling a slot
//! - a byte string is `[length in bytes][bytes...]`
//! - a word sequence is `[length in elements][element slots...]`
//! - a struct is its field slots back to back, with no header
//!
//! Every read is bounds checked against the arena, which turns a lying
//! length into [`Error::OutOfBounds`] instead of an over-read. Hashing still
//! happens in place: views returned here borrow the arena.

use crate::compose::{CompositeHasher, Strategy};
use crate::digest::Digest;
use crate::error::{Error, Result};
use crate::hash::{hash_byte_string_with, hash_word_sequence_with};
use crate::layout::{ByteStr, Word, WordSeq, WORD_SIZE};
use crate::primitive::{HashPrimitive, IncrementalHasher};
use std::collections::HashMap;
use tracing::{trace, warn};

/// Default limit on pointer hops followed from the root value
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Values already hashed during one `hash_at` call, keyed by address and
/// shape identity, with the pointer height of each
type Seen = HashMap<(usize, usize), (Digest, usize)>;

/// Layout of a value reachable in the arena
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape<'s> {
    /// Byte string
    Bytes,
    /// Word sequence of inline elements
    Words,
    /// Word sequence whose elements point at values of the inner shape
    Pointers(&'s Shape<'s>),
    /// Struct with the given fields
    Struct(&'s [Field<'s>]),
}

/// One struct field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field<'s> {
    /// Fixed-width value stored in the slot
    Value,
    /// Slot holds the address of a value with this shape
    Pointer(&'s Shape<'s>),
}

/// Read-only view of a caller-owned arena
#[derive(Debug, Clone, Copy)]
pub struct Memory<'a> {
    bytes: &'a [u8],
    max_depth: usize,
}

impl<'a> Memory<'a> {
    /// View `bytes` with the default depth limit
    pub fn new(bytes: &'a [u8]) -> Self {
        Self {
            bytes,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Replace the limit on pointer hops
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Arena size in bytes
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Limit on pointer hops from the root value
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Borrow `len` bytes at `offset`
    pub fn read(&self, offset: usize, len: usize) -> Result<&'a [u8]> {
        let out_of_bounds = || {
            warn!(offset, len, available = self.bytes.len(), "read outside arena");
            Error::OutOfBounds {
                offset,
                len,
                available: self.bytes.len(),
            }
        };
        let end = offset.checked_add(len).ok_or_else(out_of_bounds)?;
        self.bytes.get(offset..end).ok_or_else(out_of_bounds)
    }

    /// Borrow the slot at `offset`
    pub fn word_at(&self, offset: usize) -> Result<&'a Word> {
        let slice = self.read(offset, WORD_SIZE)?;
        slice.try_into().map_err(|_| Error::OutOfBounds {
            offset,
            len: WORD_SIZE,
            available: self.bytes.len(),
        })
    }

    /// Decode the big-endian integer stored in the slot at `offset`
    pub fn uint_at(&self, offset: usize) -> Result<usize> {
        let word = self.word_at(offset)?;
        let (high, low) = word.split_at(WORD_SIZE - 8);
        if high.iter().any(|&b| b != 0) {
            warn!(offset, "slot value does not fit in 64 bits");
            return Err(Error::WordOverflow { offset });
        }
        let mut low_bytes = [0u8; 8];
        low_bytes.copy_from_slice(low);
        usize::try_from(u64::from_be_bytes(low_bytes)).map_err(|_| Error::WordOverflow { offset })
    }

    /// Address stored in a pointer slot
    pub fn pointer_at(&self, offset: usize) -> Result<usize> {
        self.uint_at(offset)
    }

    /// Byte string whose length slot is at `ptr`
    pub fn byte_string_at(&self, ptr: usize) -> Result<ByteStr<'a>> {
        let len = self.uint_at(ptr)?;
        let data = self.read(self.payload_offset(ptr)?, len)?;
        trace!(ptr, len, "byte string");
        Ok(ByteStr::new(data))
    }

    /// Word sequence whose length slot is at `ptr`
    pub fn word_sequence_at(&self, ptr: usize) -> Result<WordSeq<'a>> {
        let count = self.uint_at(ptr)?;
        let len = count
            .checked_mul(WORD_SIZE)
            .ok_or(Error::WordOverflow { offset: ptr })?;
        let data = self.read(self.payload_offset(ptr)?, len)?;
        trace!(ptr, count, "word sequence");
        WordSeq::from_bytes(data)
    }

    /// Slots of a struct with `fields` fields starting at `addr`
    pub fn struct_at(&self, addr: usize, fields: usize) -> Result<&'a [u8]> {
        let len = fields
            .checked_mul(WORD_SIZE)
            .ok_or(Error::WordOverflow { offset: addr })?;
        self.read(addr, len)
    }

    /// Hash the value of the given shape at `ptr`, following pointers.
    ///
    /// A value reached through several pointers is hashed once per call, so
    /// arenas that share children cost time linear in the distinct values
    /// they hold rather than in the number of paths to them.
    pub fn hash_at<H: HashPrimitive>(
        &self,
        ptr: usize,
        shape: &Shape<'_>,
        strategy: Strategy,
    ) -> Result<Digest> {
        let mut seen = Seen::new();
        let (digest, _) = self.hash_shape::<H>(ptr, shape, strategy, 0, &mut seen)?;
        Ok(digest)
    }

    fn payload_offset(&self, ptr: usize) -> Result<usize> {
        ptr.checked_add(WORD_SIZE).ok_or(Error::OutOfBounds {
            offset: ptr,
            len: WORD_SIZE,
            available: self.bytes.len(),
        })
    }

    fn depth_exceeded(&self, ptr: usize) -> Error {
        warn!(ptr, limit = self.max_depth, "pointer chain too deep");
        Error::DepthExceeded {
            limit: self.max_depth,
        }
    }

    /// Digest of the value at `ptr` and the number of pointer hops below it
    fn hash_shape<H: HashPrimitive>(
        &self,
        ptr: usize,
        shape: &Shape<'_>,
        strategy: Strategy,
        depth: usize,
        seen: &mut Seen,
    ) -> Result<(Digest, usize)> {
        if depth > self.max_depth {
            return Err(self.depth_exceeded(ptr));
        }
        let key = (ptr, shape as *const Shape<'_> as usize);
        if let Some(&(digest, height)) = seen.get(&key) {
            // A cached value still has to fit below the depth it is reached at.
            if depth + height > self.max_depth {
                return Err(self.depth_exceeded(ptr));
            }
            trace!(ptr, depth, "shared value");
            return Ok((digest, height));
        }
        let (digest, height) = match shape {
            Shape::Bytes => (hash_byte_string_with::<H>(self.byte_string_at(ptr)?), 0),
            Shape::Words => (hash_word_sequence_with::<H>(self.word_sequence_at(ptr)?), 0),
            Shape::Pointers(inner) => {
                let elements = self.word_sequence_at(ptr)?;
                let base = self.payload_offset(ptr)?;
                let mut hasher = IncrementalHasher::<H>::new();
                let mut height = 0;
                for index in 0..elements.len() {
                    let child = self.pointer_at(base + index * WORD_SIZE)?;
                    let (digest, below) =
                        self.hash_shape::<H>(child, inner, strategy, depth + 1, seen)?;
                    height = height.max(below + 1);
                    hasher.update_digest(&digest);
                }
                (hasher.finalize(), height)
            }
            Shape::Struct(fields) => self.hash_struct::<H>(ptr, fields, strategy, depth, seen)?,
        };
        seen.insert(key, (digest, height));
        Ok((digest, height))
    }

    fn hash_struct<H: HashPrimitive>(
        &self,
        addr: usize,
        fields: &[Field<'_>],
        strategy: Strategy,
        depth: usize,
        seen: &mut Seen,
    ) -> Result<(Digest, usize)> {
        let region = self.struct_at(addr, fields.len())?;
        let mut hasher = CompositeHasher::<H>::new(strategy);
        let mut height = 0;
        // Runs of value fields go in as one contiguous slice.
        let mut run_start = 0;
        for (index, field) in fields.iter().enumerate() {
            if let Field::Pointer(shape) = field {
                hasher.absorb(&region[run_start * WORD_SIZE..index * WORD_SIZE]);
                let child = self.pointer_at(addr + index * WORD_SIZE)?;
                let (digest, below) =
                    self.hash_shape::<H>(child, shape, strategy, depth + 1, seen)?;
                height = height.max(below + 1);
                hasher.absorb_digest(&digest);
                run_start = index + 1;
            }
        }
        hasher.absorb(&region[run_start * WORD_SIZE..]);
        Ok((hasher.finish(), height))
    }
}
