//! One-shot hashing entry points.
//!
//! Every function builds its own [`Hasher`], so concurrent calls from
//! independent threads share nothing but the read-only constant tables.

use super::{permute, Domain, Hasher, BYTES_PER_ELEMENT, WIDTH};
use crate::error::Poseidon2Result;
use crate::field::Fr;
use crate::policy::InputPolicy;

/// Hash a sequence of field elements.
///
/// The empty sequence hashes to word 0 of the permuted all-zero state.
pub fn hash(elements: &[Fr]) -> Fr {
    if elements.is_empty() {
        let mut state = [Fr::ZERO; WIDTH];
        permute(&mut state);
        return state[0];
    }

    let mut hasher = Hasher::new();
    hasher.absorb_many(elements);
    hasher.finalize()
}

/// Two-to-one compression for Merkle trees.
///
/// Not commutative: `a` is the left child, `b` the right.
pub fn compress2(a: Fr, b: Fr) -> Fr {
    let mut hasher = Hasher::new();
    hasher.absorb(a);
    hasher.absorb(b);
    hasher.finalize()
}

/// Hash field elements under a domain tag.
pub fn hash_many(domain: Domain, elements: &[Fr]) -> Fr {
    let mut hasher = Hasher::new();
    hasher.absorb(domain.to_fr());
    hasher.absorb_many(elements);
    hasher.finalize()
}

/// Encode byte chunks as field elements.
///
/// Each chunk is split into 31-byte groups; each group is right-aligned in a
/// zero-padded 32-byte buffer and read big-endian. Empty chunks contribute
/// nothing.
pub fn bytes_to_elements<C: AsRef<[u8]>>(chunks: &[C]) -> Vec<Fr> {
    let total: usize = chunks.iter().map(|c| c.as_ref().len()).sum();
    let mut elements = Vec::with_capacity(total.div_ceil(BYTES_PER_ELEMENT));

    for chunk in chunks {
        for group in chunk.as_ref().chunks(BYTES_PER_ELEMENT) {
            let mut padded = [0u8; 32];
            padded[32 - group.len()..].copy_from_slice(group);
            elements.push(Fr::from_bytes_be(&padded));
        }
    }

    elements
}

/// Hash byte chunks under a domain tag, returning the 32-byte big-endian digest.
///
/// Infallible for input of any length; size and complexity policy is left to
/// [`hash_bytes_checked`] or to the caller.
pub fn hash_bytes<C: AsRef<[u8]>>(domain: Domain, chunks: &[C]) -> [u8; 32] {
    let mut hasher = Hasher::new();
    hasher.absorb(domain.to_fr());
    hasher.absorb_many(&bytes_to_elements(chunks));
    hasher.finalize().to_bytes_be()
}

/// [`hash_bytes`] preceded by an input policy check over the whole payload.
///
/// The total length is checked before the chunks are concatenated, so an
/// oversized payload is rejected without being copied.
pub fn hash_bytes_checked<C: AsRef<[u8]>, P: InputPolicy + ?Sized>(
    domain: Domain,
    chunks: &[C],
    policy: &P,
) -> Poseidon2Result<[u8; 32]> {
    let total: usize = chunks.iter().map(|c| c.as_ref().len()).sum();
    policy.check_len(total)?;

    let mut payload = Vec::with_capacity(total);
    for chunk in chunks {
        payload.extend_from_slice(chunk.as_ref());
    }
    policy.check(&payload)?;
    Ok(hash_bytes(domain, chunks))
}

/// Compress two 32-byte node values into a parent node.
///
/// Inputs at or above the modulus are reduced before compression.
pub fn hash_pair(left: &[u8; 32], right: &[u8; 32]) -> [u8; 32] {
    compress2(Fr::from_bytes_be(left), Fr::from_bytes_be(right)).to_bytes_be()
}
