//! Error handling for the Poseidon2 crate.
//!
//! The hashing core is total over field elements and never returns an
//! error. Everything here belongs to the surrounding layers: hex parsing,
//! the input policy, and the known-answer-test tooling.

use thiserror::Error;

/// Result alias used by every fallible operation in the crate.
pub type Poseidon2Result<T> = Result<T, Poseidon2Error>;

/// Errors surfaced by parsing, policy checks and KAT tooling.
#[derive(Debug, Error)]
pub enum Poseidon2Error {
    /// A hex string contained non-hex characters.
    #[error("invalid hex string '{0}'")]
    InvalidHex(String),

    /// A hex string encodes more than 32 bytes.
    #[error("hex string too long: expected at most {expected} digits, got {actual}")]
    WrongLength {
        /// Maximum number of hex digits accepted.
        expected: usize,
        /// Number of hex digits supplied.
        actual: usize,
    },

    /// Input exceeds the configured maximum size.
    #[error("input too large: {size} bytes (max {limit})")]
    InputTooLarge {
        /// Size of the rejected input.
        size: usize,
        /// Configured maximum.
        limit: usize,
    },

    /// Input is empty and the policy does not allow it.
    #[error("input data cannot be empty")]
    EmptyInput,

    /// Heuristic complexity score exceeded the configured threshold.
    #[error("input complexity too high ({score} > {limit})")]
    ComplexityTooHigh {
        /// Computed score.
        score: u64,
        /// Configured threshold.
        limit: u64,
    },

    /// Domain name or tag could not be resolved.
    #[error("unknown domain '{0}'")]
    UnknownDomain(String),

    /// Reading or writing a KAT or limits file failed.
    #[error("i/o error on {path}: {source}")]
    Io {
        /// File involved.
        path: String,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// A KAT or limits file was not valid JSON for the expected schema.
    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
}
