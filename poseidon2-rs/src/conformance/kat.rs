//! Known-answer-test file model and generator.
//!
//! The JSON layout is the cross-implementation contract: a single
//! `poseidon2_test_vectors` object holding the modulus, the parameter set and
//! one array per operation. Field elements are `0x`-prefixed and padded to 64
//! hex digits; byte payloads are bare hex.

use crate::field::{Fr, MODULUS_HEX};
use crate::poseidon::{
    compress2, hash, hash_bytes, permute, Domain, CAPACITY, FULL_ROUNDS, PARTIAL_ROUNDS, RATE,
    SBOX_ALPHA, WIDTH,
};
use serde::{Deserialize, Serialize};

/// Top-level KAT document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KatFile {
    /// The vector set.
    pub poseidon2_test_vectors: KatVectors,
}

/// Modulus, parameters and vectors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KatVectors {
    /// Field modulus in hex.
    pub field_modulus: String,
    /// Hash parameter set.
    pub parameters: KatParameters,
    /// Raw permutation vectors.
    pub permutation_tests: Vec<PermutationVector>,
    /// `hash` vectors.
    pub hash_tests: Vec<HashVector>,
    /// `compress2` vectors.
    pub compress2_tests: Vec<Compress2Vector>,
    /// `hash_bytes` vectors.
    pub bytes_hash_tests: Vec<BytesHashVector>,
}

/// Parameter set `{t, d, F, P, rate, capacity}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KatParameters {
    /// State width.
    pub t: usize,
    /// S-box degree.
    pub d: usize,
    /// Full rounds.
    #[serde(rename = "F")]
    pub full_rounds: usize,
    /// Partial rounds.
    #[serde(rename = "P")]
    pub partial_rounds: usize,
    /// Sponge rate.
    pub rate: usize,
    /// Sponge capacity.
    pub capacity: usize,
}

impl KatParameters {
    /// Parameters of this implementation.
    pub const fn current() -> Self {
        Self {
            t: WIDTH,
            d: SBOX_ALPHA,
            full_rounds: FULL_ROUNDS,
            partial_rounds: PARTIAL_ROUNDS,
            rate: RATE,
            capacity: CAPACITY,
        }
    }
}

/// Permutation input state and expected output state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermutationVector {
    /// Human-readable label.
    pub description: String,
    /// Input state.
    pub input: Vec<String>,
    /// Expected output state.
    pub expected: Vec<String>,
}

/// `hash` input sequence and digest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HashVector {
    /// Human-readable label.
    pub description: String,
    /// Input elements.
    pub input: Vec<String>,
    /// Expected digest.
    pub expected: String,
}

/// `compress2` operands and digest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Compress2Vector {
    /// Human-readable label.
    pub description: String,
    /// Left operand.
    pub a: String,
    /// Right operand.
    pub b: String,
    /// Expected digest.
    pub expected: String,
}

/// `hash_bytes` domain, payload and digest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BytesHashVector {
    /// Human-readable label.
    pub description: String,
    /// Domain tag, `0x` + 8 hex digits.
    pub domain: String,
    /// Payload as bare hex.
    pub data: String,
    /// Expected 32-byte digest.
    pub expected: String,
}

/// Format a domain tag the way the KAT file records it.
pub fn domain_to_hex(domain: Domain) -> String {
    format!("0x{:08x}", domain.value())
}

fn hex_all(elements: &[Fr]) -> Vec<String> {
    elements.iter().map(Fr::to_hex).collect()
}

fn permutation_vector(description: &str, input: [u64; WIDTH]) -> PermutationVector {
    let input = input.map(Fr::from_u64);
    let mut state = input;
    permute(&mut state);
    PermutationVector {
        description: description.to_string(),
        input: hex_all(&input),
        expected: hex_all(&state),
    }
}

fn hash_vector(description: &str, input: &[u64]) -> HashVector {
    let input: Vec<Fr> = input.iter().copied().map(Fr::from_u64).collect();
    HashVector {
        description: description.to_string(),
        input: hex_all(&input),
        expected: hash(&input).to_hex(),
    }
}

fn compress2_vector(description: &str, a: u64, b: u64) -> Compress2Vector {
    let (a, b) = (Fr::from_u64(a), Fr::from_u64(b));
    Compress2Vector {
        description: description.to_string(),
        a: a.to_hex(),
        b: b.to_hex(),
        expected: compress2(a, b).to_hex(),
    }
}

fn bytes_hash_vector(description: &str, domain: Domain, data: &[u8]) -> BytesHashVector {
    BytesHashVector {
        description: description.to_string(),
        domain: domain_to_hex(domain),
        data: hex::encode(data),
        expected: format!("0x{}", hex::encode(hash_bytes(domain, &[data]))),
    }
}

/// Produce the published vector set from this implementation.
pub fn generate() -> KatFile {
    let sequential: Vec<u8> = (0..62).collect();

    KatFile {
        poseidon2_test_vectors: KatVectors {
            field_modulus: MODULUS_HEX.to_string(),
            parameters: KatParameters::current(),
            permutation_tests: vec![
                permutation_vector("Zero state permutation", [0, 0, 0]),
                permutation_vector("All ones permutation", [1, 1, 1]),
                permutation_vector("Sequential elements [1, 2, 3]", [1, 2, 3]),
                permutation_vector(
                    "Large values permutation",
                    [0xFFFF_FFFF_FFFF_FFFF, 0x1234_5678_9ABC_DEF0, 0xFEDC_BA09_8765_4321],
                ),
            ],
            hash_tests: vec![
                hash_vector("Hash empty input", &[]),
                hash_vector("Hash single element [1]", &[1]),
                hash_vector("Hash two elements [1, 2]", &[1, 2]),
                hash_vector("Hash multiple elements [1, 2, 3, 4, 5]", &[1, 2, 3, 4, 5]),
            ],
            compress2_tests: vec![
                compress2_vector("Compress2 zero inputs", 0, 0),
                compress2_vector("Compress2 one and two", 1, 2),
                compress2_vector(
                    "Compress2 large values",
                    0x1234_5678_9ABC_DEF0,
                    0xFEDC_BA09_8765_4321,
                ),
            ],
            bytes_hash_tests: vec![
                bytes_hash_vector("Hash empty bytes with generic domain", Domain::GENERIC, b""),
                bytes_hash_vector("Hash 'hello' with generic domain", Domain::GENERIC, b"hello"),
                bytes_hash_vector("Hash 'hello' with POET domain", Domain::POET_NODE, b"hello"),
                bytes_hash_vector(
                    "Hash 62 sequential bytes with generic domain",
                    Domain::GENERIC,
                    &sequential,
                ),
            ],
        },
    }
}

/// Generated vector set as pretty-printed JSON.
pub fn generate_json() -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&generate())
}
