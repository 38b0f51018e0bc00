//! Poseidon2 sponge.
//!
//! Rate-2, capacity-1 sponge over the permutation. Elements are added into
//! the rate portion one at a time; the permutation runs whenever the rate is
//! full. Squeezing flushes a partially filled block and returns word 0.

use super::{permute, State, RATE, WIDTH};
use crate::field::Fr;

/// Sponge state for incremental hashing.
///
/// Created fresh per logical hash operation and not meant to be shared.
#[derive(Debug, Clone)]
pub struct Hasher {
    /// Internal state (width elements)
    state: State,
    /// Elements absorbed into the current block, always below `RATE`
    absorbed: usize,
}

impl Hasher {
    /// Create a new hasher with an all-zero state.
    pub fn new() -> Self {
        Self {
            state: [Fr::ZERO; WIDTH],
            absorbed: 0,
        }
    }

    /// Absorb a single field element.
    ///
    /// 1. state[absorbed] += x; absorbed += 1
    /// 2. if absorbed == rate: permute(); absorbed = 0
    pub fn absorb(&mut self, element: Fr) {
        self.state[self.absorbed] += element;
        self.absorbed += 1;

        if self.absorbed == RATE {
            permute(&mut self.state);
            self.absorbed = 0;
        }
    }

    /// Absorb elements in order.
    pub fn absorb_many(&mut self, elements: &[Fr]) {
        for &x in elements {
            self.absorb(x);
        }
    }

    /// Flush any pending partial block and return word 0 of the state.
    ///
    /// A second call with no absorb in between returns the same value
    /// without permuting again: one output word per input block.
    pub fn squeeze(&mut self) -> Fr {
        if self.absorbed > 0 {
            permute(&mut self.state);
            self.absorbed = 0;
        }
        self.state[0]
    }

    /// Complete absorption and return the digest. Same contract as
    /// [`Hasher::squeeze`].
    pub fn finalize(&mut self) -> Fr {
        self.squeeze()
    }

    /// Restore the freshly constructed state.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Number of elements waiting in the current block.
    pub fn pending(&self) -> usize {
        self.absorbed
    }
}

impl Default for Hasher {
    fn default() -> Self {
        Self::new()
    }
}
