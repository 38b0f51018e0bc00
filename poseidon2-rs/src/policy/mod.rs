//! Input pre-validation for byte hashing.
//!
//! Optional DoS filter that runs before untrusted bytes reach
//! [`crate::poseidon::hash_bytes`]. The hashing core never consults it; it is
//! wired in only through [`crate::poseidon::hash_bytes_checked`] or by callers
//! invoking a policy directly.

mod complexity;
mod limits;

pub use complexity::{edge_score, entropy_score, estimate_complexity, pattern_score};
pub use limits::{Limits, DEFAULT_MAX_COMPLEXITY_SCORE, DEFAULT_MAX_INPUT_SIZE};

use crate::error::{Poseidon2Error, Poseidon2Result};
use tracing::warn;

/// A swappable acceptance check over raw input bytes.
pub trait InputPolicy {
    /// Accept or reject `data`.
    fn check(&self, data: &[u8]) -> Poseidon2Result<()>;

    /// Reject a payload on its total length alone, before it is assembled.
    fn check_len(&self, _len: usize) -> Poseidon2Result<()> {
        Ok(())
    }
}

/// Policy that accepts everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptAll;

impl InputPolicy for AcceptAll {
    fn check(&self, _data: &[u8]) -> Poseidon2Result<()> {
        Ok(())
    }
}

/// Size limit plus heuristic complexity scoring.
#[derive(Debug, Clone, Copy, Default)]
pub struct ComplexityFilter {
    limits: Limits,
}

impl ComplexityFilter {
    /// Create a filter enforcing `limits`.
    pub fn new(limits: Limits) -> Self {
        Self { limits }
    }

    /// The limits in force.
    pub fn limits(&self) -> &Limits {
        &self.limits
    }
}

impl InputPolicy for ComplexityFilter {
    fn check(&self, data: &[u8]) -> Poseidon2Result<()> {
        self.check_len(data.len())?;

        if data.is_empty() {
            if self.limits.allow_empty {
                return Ok(());
            }
            return Err(Poseidon2Error::EmptyInput);
        }

        let score = estimate_complexity(data);
        if score > self.limits.max_complexity_score {
            warn!(
                score,
                limit = self.limits.max_complexity_score,
                "input complexity above threshold"
            );
            return Err(Poseidon2Error::ComplexityTooHigh {
                score,
                limit: self.limits.max_complexity_score,
            });
        }

        Ok(())
    }

    fn check_len(&self, len: usize) -> Poseidon2Result<()> {
        if len > self.limits.max_input_size {
            warn!(size = len, limit = self.limits.max_input_size, "input too large");
            return Err(Poseidon2Error::InputTooLarge {
                size: len,
                limit: self.limits.max_input_size,
            });
        }
        Ok(())
    }
}

impl<P: InputPolicy + ?Sized> InputPolicy for &P {
    fn check(&self, data: &[u8]) -> Poseidon2Result<()> {
        (**self).check(data)
    }

    fn check_len(&self, len: usize) -> Poseidon2Result<()> {
        (**self).check_len(len)
    }
}

impl<P: InputPolicy + ?Sized> InputPolicy for Box<P> {
    fn check(&self, data: &[u8]) -> Poseidon2Result<()> {
        (**self).check(data)
    }

    fn check_len(&self, len: usize) -> Poseidon2Result<()> {
        (**self).check_len(len)
    }
}
