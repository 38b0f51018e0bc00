//! Poseidon2 permutation and sponge over BN256 Fr.
//!
//! Parameters: width t=3 (rate 2, capacity 1), S-box x^5, 8 full rounds
//! split 4 before and 4 after 56 partial rounds. Every round, full or
//! partial, ends with the dense 3x3 mixing layer.
//!
//! Round constants and the mixing matrix are derived once from fixed seeds
//! with SHA-256 and cached for the lifetime of the process.

mod api;
mod constants;
mod domain;
mod permute;
mod sponge;

pub use api::{
    bytes_to_elements, compress2, hash, hash_bytes, hash_bytes_checked, hash_many, hash_pair,
};
pub use constants::{mds_matrix, round_constants, RoundConstants};
pub use domain::Domain;
pub use permute::{is_full_round, permute, permute_with_trace};
pub use sponge::Hasher;

/// State width t.
pub const WIDTH: usize = 3;

/// Sponge rate (elements absorbed per permutation).
pub const RATE: usize = 2;

/// Sponge capacity.
pub const CAPACITY: usize = 1;

/// S-box exponent.
pub const SBOX_ALPHA: usize = 5;

/// Number of full rounds, split evenly around the partial rounds.
pub const FULL_ROUNDS: usize = 8;

/// Number of partial rounds.
pub const PARTIAL_ROUNDS: usize = 56;

/// Number of round functions applied by one permutation.
pub const TOTAL_ROUNDS: usize = FULL_ROUNDS + PARTIAL_ROUNDS;

/// Seed for the round constants.
pub const ROUND_CONSTANTS_SEED: &[u8] = b"Poseidon2_bn256_r_t3_d5_F8_P56";

/// Seed for the mixing matrix.
pub const MDS_SEED: &[u8] = b"Poseidon2_MDS_bn256_r_t3";

/// Bytes packed into one field element by [`hash_bytes`].
///
/// 31 bytes is at most 248 bits, safely below the 254-bit modulus.
pub const BYTES_PER_ELEMENT: usize = 31;

/// A full permutation state.
pub type State = [crate::field::Fr; WIDTH];
