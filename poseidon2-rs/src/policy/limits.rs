//! Tunable thresholds for the input pre-validator.
//!
//! These are policy, not hash semantics: changing them never changes a
//! digest, only which inputs reach the hasher.

use crate::error::{Poseidon2Error, Poseidon2Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Default maximum payload size (64 KiB).
pub const DEFAULT_MAX_INPUT_SIZE: usize = 64 * 1024;

/// Default maximum heuristic complexity score.
pub const DEFAULT_MAX_COMPLEXITY_SCORE: u64 = 1000;

/// Input limits for [`super::ComplexityFilter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Limits {
    /// Maximum payload size in bytes
    pub max_input_size: usize,
    /// Maximum heuristic complexity score
    pub max_complexity_score: u64,
    /// Whether an empty payload is acceptable
    pub allow_empty: bool,
}

impl Limits {
    /// Defaults for untrusted input.
    pub const fn strict() -> Self {
        Self {
            max_input_size: DEFAULT_MAX_INPUT_SIZE,
            max_complexity_score: DEFAULT_MAX_COMPLEXITY_SCORE,
            allow_empty: false,
        }
    }

    /// Relaxed limits for trusted callers and tooling.
    pub const fn lenient() -> Self {
        Self {
            max_input_size: 16 * 1024 * 1024, // 16 MiB
            max_complexity_score: u64::MAX,
            allow_empty: true,
        }
    }

    /// Parse limits from JSON. Missing fields take their strict defaults.
    pub fn from_json(json: &str) -> Poseidon2Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load limits from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Poseidon2Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| Poseidon2Error::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&content)
    }
}

impl Default for Limits {
    fn default() -> Self {
        Self::strict()
    }
}
