//! Seed-derived round constants and mixing matrix.
//!
//! Each entry is `SHA-256(seed || be32(a) || be32(b))` read as a big-endian
//! integer and reduced mod r. Round constants use `(round, position)`;
//! partial rounds only fill position 0. Matrix entries use the matrix seed
//! extended with the raw `(row, col)` bytes, hashed with `(row, col)`, plus
//! one so no entry is zero.

use super::{is_full_round, MDS_SEED, ROUND_CONSTANTS_SEED, TOTAL_ROUNDS, WIDTH};
use crate::field::Fr;
use sha2::{Digest, Sha256};
use std::sync::OnceLock;
use tracing::debug;

/// Per-round additive constants, one row of `WIDTH` per round.
pub type RoundConstants = [[Fr; WIDTH]; TOTAL_ROUNDS];

/// Mixing matrix.
pub type MdsMatrix = [[Fr; WIDTH]; WIDTH];

struct Tables {
    round_constants: RoundConstants,
    mds: MdsMatrix,
}

impl Tables {
    fn generate() -> Self {
        let tables = Self {
            round_constants: generate_round_constants(),
            mds: generate_mds_matrix(),
        };
        debug!(
            rounds = TOTAL_ROUNDS,
            width = WIDTH,
            "generated poseidon2 round constants and mixing matrix"
        );
        tables
    }
}

fn tables() -> &'static Tables {
    static TABLES: OnceLock<Tables> = OnceLock::new();
    TABLES.get_or_init(Tables::generate)
}

/// Round constants, generated on first use.
pub fn round_constants() -> &'static RoundConstants {
    &tables().round_constants
}

/// Mixing matrix, generated on first use.
pub fn mds_matrix() -> &'static MdsMatrix {
    &tables().mds
}

fn generate_round_constants() -> RoundConstants {
    let mut constants = [[Fr::ZERO; WIDTH]; TOTAL_ROUNDS];
    for (round, row) in constants.iter_mut().enumerate() {
        let positions = if is_full_round(round) { WIDTH } else { 1 };
        for (pos, slot) in row.iter_mut().take(positions).enumerate() {
            *slot = derive_element(ROUND_CONSTANTS_SEED, round as u32, pos as u32);
        }
    }
    constants
}

fn generate_mds_matrix() -> MdsMatrix {
    let mut mds = [[Fr::ZERO; WIDTH]; WIDTH];
    for (i, row) in mds.iter_mut().enumerate() {
        for (j, entry) in row.iter_mut().enumerate() {
            let mut seed = MDS_SEED.to_vec();
            seed.extend_from_slice(&[i as u8, j as u8]);
            *entry = derive_element(&seed, i as u32, j as u32) + Fr::ONE;
        }
    }
    mds
}

fn derive_element(seed: &[u8], a: u32, b: u32) -> Fr {
    let digest = Sha256::new()
        .chain_update(seed)
        .chain_update(a.to_be_bytes())
        .chain_update(b.to_be_bytes())
        .finalize();
    let mut bytes = [0u8; 32];
    bytes.copy_from_slice(&digest);
    Fr::from_bytes_be(&bytes)
}
