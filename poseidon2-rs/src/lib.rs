//! Poseidon2 over the BN256 scalar field.
//!
//! This crate provides the field arithmetic, permutation and sponge used for
//! general hashing, two-to-one Merkle compression and domain-separated byte
//! hashing, with outputs that match the published known-answer tests
//! bit-for-bit.
//!
//! # Architecture
//!
//! - [`field`] - BN256 scalar field arithmetic (Fr), Montgomery form, branch-free
//! - [`poseidon`] - Poseidon2 permutation, sponge and hashing entry points
//! - [`policy`] - Optional input pre-validation for untrusted byte payloads
//! - [`conformance`] - Known-answer-test generation and replay
//! - [`error`] - Error type for parsing, policy and tooling
//!
//! # Example
//!
//! ```
//! use bn256_poseidon2::poseidon::{compress2, hash_bytes, Domain};
//! use bn256_poseidon2::Fr;
//!
//! let parent = compress2(Fr::from_u64(1), Fr::from_u64(2));
//! assert_ne!(parent, compress2(Fr::from_u64(2), Fr::from_u64(1)));
//!
//! let digest = hash_bytes(Domain::GENERIC, &[b"hello"]);
//! assert_eq!(digest.len(), 32);
//! ```

// Hashing code must avoid unwrap/expect/panic in library code.
// Tests are checked separately with `cargo test`.
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(missing_docs)]

pub mod conformance;
pub mod error;
pub mod field;
pub mod policy;
pub mod poseidon;

// Re-export commonly used types
pub use error::{Poseidon2Error, Poseidon2Result};
pub use field::Fr;
pub use poseidon::{compress2, hash, hash_bytes, hash_many, permute, Domain, Hasher};
