//! Poseidon2 permutation.
//!
//! The permutation applies 64 rounds:
//! - 4 full rounds (all elements get the S-box)
//! - 56 partial rounds (only the first element gets the S-box)
//! - 4 full rounds
//!
//! Each round consists of:
//! 1. Round constant addition
//! 2. S-box (x^5)
//! 3. Mixing matrix multiplication (never skipped, including partial rounds)

use super::constants::{mds_matrix, round_constants};
use super::{State, FULL_ROUNDS, PARTIAL_ROUNDS, TOTAL_ROUNDS, WIDTH};
use crate::field::Fr;

/// Whether `round` is one of the outer full rounds.
pub const fn is_full_round(round: usize) -> bool {
    round < FULL_ROUNDS / 2 || round >= FULL_ROUNDS / 2 + PARTIAL_ROUNDS
}

/// Apply the mixing layer: state' = M * state
fn apply_mds(state: &mut State) {
    let mds = mds_matrix();
    let mut result = [Fr::ZERO; WIDTH];

    for (out, row) in result.iter_mut().zip(mds.iter()) {
        let mut sum = Fr::ZERO;
        for (m, s) in row.iter().zip(state.iter()) {
            sum += *m * *s;
        }
        *out = sum;
    }

    *state = result;
}

/// Full round: constants and S-box on all elements, then mixing.
fn full_round(state: &mut State, round: usize) {
    let constants = &round_constants()[round];
    for (s, c) in state.iter_mut().zip(constants.iter()) {
        *s = (*s + *c).pow5();
    }
    apply_mds(state);
}

/// Partial round: constant and S-box on the first element only, then mixing.
fn partial_round(state: &mut State, round: usize) {
    state[0] = (state[0] + round_constants()[round][0]).pow5();
    apply_mds(state);
}

fn round(state: &mut State, index: usize) {
    if is_full_round(index) {
        full_round(state, index);
    } else {
        partial_round(state, index);
    }
}

/// Apply the Poseidon2 permutation in place.
///
/// Pure function of the input state and the fixed tables.
pub fn permute(state: &mut State) {
    for index in 0..TOTAL_ROUNDS {
        round(state, index);
    }
}

/// Permutation with the state recorded after every round.
///
/// Returns (final_state, round_traces); useful for localising a divergence
/// against another implementation.
pub fn permute_with_trace(state: &State) -> (State, Vec<State>) {
    let mut st = *state;
    let mut traces = Vec::with_capacity(TOTAL_ROUNDS);

    for index in 0..TOTAL_ROUNDS {
        round(&mut st, index);
        traces.push(st);
    }

    (st, traces)
}
