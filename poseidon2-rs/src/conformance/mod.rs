//! Known-answer-test conformance tooling.
//!
//! The KAT file is the compatibility contract with other implementations:
//! [`generate`] reproduces it from this crate and [`KatRunner`] replays any
//! copy of it, reporting per-vector results.

mod kat;
mod runner;

pub use kat::{
    domain_to_hex, generate, generate_json, BytesHashVector, Compress2Vector, HashVector, KatFile,
    KatParameters, KatVectors, PermutationVector,
};
pub use runner::{KatResults, KatRunner, TestResult};
