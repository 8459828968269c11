//! Combinator for folding child digests into a parent digest

use crate::digest::{Digest, DIGEST_SIZE};
use crate::primitive::{Blake3, HashPrimitive};

/// `H(a || b)`. Order sensitive.
pub fn combine(a: &Digest, b: &Digest) -> Digest {
    combine_with::<Blake3>(a, b)
}

/// [`combine`] under the primitive `H`
pub fn combine_with<H: HashPrimitive>(a: &Digest, b: &Digest) -> Digest {
    let mut scratch = [0u8; DIGEST_SIZE * 2];
    scratch[..DIGEST_SIZE].copy_from_slice(a.as_bytes());
    scratch[DIGEST_SIZE..].copy_from_slice(b.as_bytes());
    H::digest(&scratch)
}

/// Left-associative fold of an ordered digest list.
///
/// `[] -> NIL`, `[d0] -> d0`, `[d0, .., dn] -> combine(fold(d0..dn-1), dn)`.
/// The order is part of the digest: reordering children changes the result.
pub fn combine_all(digests: &[Digest]) -> Digest {
    combine_all_with::<Blake3>(digests)
}

/// [`combine_all`] under the primitive `H`
pub fn combine_all_with<H: HashPrimitive>(digests: &[Digest]) -> Digest {
    match digests.split_first() {
        None => H::NIL,
        Some((first, rest)) => rest
            .iter()
            .fold(*first, |acc, next| combine_with::<H>(&acc, next)),
    }
}
