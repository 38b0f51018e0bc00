//! Poseidon2 conformance tests.
//!
//! Pins the parameter set, the permutation, the sponge and every hashing
//! entry point to published known-answer values, and cross-checks the
//! permutation against a straightforward big-integer model.

use bn256_poseidon2::field::MODULUS_DECIMAL;
use bn256_poseidon2::poseidon::{
    bytes_to_elements, compress2, hash, hash_bytes, hash_many, hash_pair, is_full_round,
    mds_matrix, permute, permute_with_trace, round_constants, Domain, Hasher, State, CAPACITY,
    FULL_ROUNDS, MDS_SEED, PARTIAL_ROUNDS, RATE, ROUND_CONSTANTS_SEED, SBOX_ALPHA, TOTAL_ROUNDS,
    WIDTH,
};
use bn256_poseidon2::Fr;
use num_bigint::BigUint;
use proptest::prelude::*;
use sha2::{Digest, Sha256};

const PERM_ZERO: [&str; 3] = [
    "0x151e92826ab6c8f53c69d8abce416c14d87cea2e26235418fe8c98f60270f087",
    "0x0fc1acbde038fb13f07cd76f990ee75aea3614ca2a1b31e5116b7285958a105d",
    "0x1b06d08e819d069efefa27873b1921be43e861d55998c4dce1598541e2c7fe15",
];

const PERM_ONES: [&str; 3] = [
    "0x2a2ad796833fdadf6b898f6244033db6b3a3f3d8a1bb4a2e164caa84ae0adae5",
    "0x003d5c5e35efbd4f6843808c5fb659768653b9d1c5fbb3d92e0c6ba006433b17",
    "0x2039deaa7e51129b28668adaef60d356b5660e61d9effca02ed1ab09dd25c3ae",
];

const HASH_ONE_TWO: &str = "0x07439c5dec177f98b72bfa1c517bd70cdc80fb0c190769114fe2c96f9a7cab8b";

fn fr(n: u64) -> Fr {
    Fr::from_u64(n)
}

fn hex_state(state: &State) -> [String; 3] {
    state.map(|x| x.to_hex())
}

// =============================================================================
// Parameters
// =============================================================================

#[test]
fn parameter_set() {
    assert_eq!(WIDTH, 3, "state width");
    assert_eq!(RATE, 2, "sponge rate");
    assert_eq!(CAPACITY, 1, "sponge capacity");
    assert_eq!(RATE + CAPACITY, WIDTH);
    assert_eq!(SBOX_ALPHA, 5, "S-box exponent");
    assert_eq!(FULL_ROUNDS, 8);
    assert_eq!(PARTIAL_ROUNDS, 56);
    assert_eq!(TOTAL_ROUNDS, 64, "4 full + 56 partial + 4 full");
}

#[test]
fn round_schedule_is_symmetric() {
    let full = (0..TOTAL_ROUNDS).filter(|&r| is_full_round(r)).count();
    assert_eq!(full, FULL_ROUNDS);
    for r in 0..TOTAL_ROUNDS {
        assert_eq!(
            is_full_round(r),
            is_full_round(TOTAL_ROUNDS - 1 - r),
            "round {} and its mirror must agree",
            r
        );
    }
    assert!(is_full_round(3));
    assert!(!is_full_round(4));
    assert!(!is_full_round(59));
    assert!(is_full_round(60));
}

#[test]
fn partial_round_constants_only_fill_slot_zero() {
    let constants = round_constants();
    for (round, row) in constants.iter().enumerate() {
        if is_full_round(round) {
            assert!(row.iter().all(|c| !c.is_zero()), "round {}", round);
        } else {
            assert!(!row[0].is_zero(), "round {}", round);
            assert!(row[1].is_zero() && row[2].is_zero(), "round {}", round);
        }
    }
}

#[test]
fn matrix_has_no_zero_entries() {
    for row in mds_matrix() {
        for entry in row {
            assert!(!entry.is_zero());
        }
    }
}

// =============================================================================
// Permutation
// =============================================================================

#[test]
fn permute_zero_state() {
    let mut state = [Fr::ZERO; WIDTH];
    permute(&mut state);
    assert_eq!(hex_state(&state), PERM_ZERO.map(String::from));
}

#[test]
fn permute_all_ones() {
    let mut state = [Fr::ONE; WIDTH];
    permute(&mut state);
    assert_eq!(hex_state(&state), PERM_ONES.map(String::from));
}

#[test]
fn trace_ends_at_permutation_output() {
    let input = [fr(1), fr(2), fr(3)];
    let (out, trace) = permute_with_trace(&input);

    let mut expected = input;
    permute(&mut expected);

    assert_eq!(out, expected);
    assert_eq!(trace.len(), TOTAL_ROUNDS);
    assert_eq!(trace[TOTAL_ROUNDS - 1], out);
    assert_ne!(trace[0], input, "every round must change the state");
}

/// Big-integer model of the permutation, built from the seeds alone.
struct Reference {
    r: BigUint,
    round_constants: Vec<[BigUint; 3]>,
    mds: [[BigUint; 3]; 3],
}

impl Reference {
    fn new() -> Self {
        let r: BigUint = MODULUS_DECIMAL.parse().unwrap();
        let derive = |seed: &[u8], a: u32, b: u32| {
            let digest = Sha256::new()
                .chain_update(seed)
                .chain_update(a.to_be_bytes())
                .chain_update(b.to_be_bytes())
                .finalize();
            BigUint::from_bytes_be(&digest) % &r
        };

        let round_constants = (0..TOTAL_ROUNDS as u32)
            .map(|round| {
                let full = is_full_round(round as usize);
                std::array::from_fn(|pos| {
                    if full || pos == 0 {
                        derive(ROUND_CONSTANTS_SEED, round, pos as u32)
                    } else {
                        BigUint::default()
                    }
                })
            })
            .collect();

        let mds = std::array::from_fn(|i| {
            std::array::from_fn(|j| {
                let mut seed = MDS_SEED.to_vec();
                seed.extend_from_slice(&[i as u8, j as u8]);
                (derive(seed.as_slice(), i as u32, j as u32) + 1u32) % &r
            })
        });

        Self {
            r,
            round_constants,
            mds,
        }
    }

    fn permute(&self, state: [BigUint; 3]) -> [BigUint; 3] {
        let five = BigUint::from(5u32);
        let mut s = state;
        for (round, rc) in self.round_constants.iter().enumerate() {
            for (x, c) in s.iter_mut().zip(rc) {
                *x = (&*x + c) % &self.r;
            }
            let sbox_slots = if is_full_round(round) { 3 } else { 1 };
            for x in s.iter_mut().take(sbox_slots) {
                *x = x.modpow(&five, &self.r);
            }
            s = std::array::from_fn(|i| {
                self.mds[i]
                    .iter()
                    .zip(&s)
                    .fold(BigUint::default(), |acc, (m, x)| (acc + m * x) % &self.r)
            });
        }
        s
    }
}

fn to_big(x: &Fr) -> BigUint {
    BigUint::from_bytes_be(&x.to_bytes_be())
}

#[test]
fn reference_model_matches_zero_state_vector() {
    let model = Reference::new();
    let out = model.permute(std::array::from_fn(|_| BigUint::default()));
    let expected: Vec<BigUint> = PERM_ZERO
        .iter()
        .map(|h| to_big(&Fr::from_hex(h).unwrap()))
        .collect();
    assert_eq!(out.to_vec(), expected);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn permute_matches_reference_model(bytes in any::<[[u8; 32]; 3]>()) {
        let model = Reference::new();
        let mut state: State = bytes.map(|b| Fr::from_bytes_be(&b));
        let input = state.map(|x| to_big(&x));
        permute(&mut state);
        prop_assert_eq!(state.map(|x| to_big(&x)), model.permute(input));
    }
}

// =============================================================================
// Sponge and hashing
// =============================================================================

#[test]
fn hash_empty_is_word_zero_of_permuted_zero_state() {
    assert_eq!(hash(&[]).to_hex(), PERM_ZERO[0]);
}

#[test]
fn hash_known_answers() {
    assert_eq!(
        hash(&[fr(1)]).to_hex(),
        "0x1b57ede2db252135726698f6aa7afb089bb4ef317a40a61494550dc31bb32dec"
    );
    assert_eq!(hash(&[fr(1), fr(2)]).to_hex(), HASH_ONE_TWO);
    assert_eq!(
        hash(&[fr(1), fr(2), fr(3), fr(4), fr(5)]).to_hex(),
        "0x131d2f6df70a63128819595c0d28214b6faee34e724ceea51dceced598ec0eb8"
    );
}

#[test]
fn compress2_equals_two_element_hash() {
    assert_eq!(compress2(fr(1), fr(2)).to_hex(), HASH_ONE_TWO);
    assert_eq!(compress2(fr(1), fr(2)), hash(&[fr(1), fr(2)]));
}

#[test]
fn compress2_is_not_commutative() {
    assert_eq!(
        compress2(fr(2), fr(1)).to_hex(),
        "0x123a7b843961d1cf4d9edebc902dea05ab020f2a482eb55805c8796c800293b9"
    );
    assert_ne!(compress2(fr(1), fr(2)), compress2(fr(2), fr(1)));
}

#[test]
fn hasher_matches_one_shot_hash() {
    let inputs: Vec<Fr> = (1..=7).map(fr).collect();
    let mut hasher = Hasher::new();
    for &x in &inputs {
        hasher.absorb(x);
    }
    assert_eq!(hasher.pending(), 1);
    assert_eq!(hasher.finalize(), hash(&inputs));
    assert_eq!(hasher.pending(), 0);
}

#[test]
fn hash_is_deterministic_across_threads() {
    let inputs: Vec<Fr> = (0..10).map(fr).collect();
    let expected = hash(&inputs);
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let inputs = inputs.clone();
            std::thread::spawn(move || hash(&inputs))
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}

#[test]
fn hash_pair_matches_compress2() {
    let left = fr(1).to_bytes_be();
    let right = fr(2).to_bytes_be();
    assert_eq!(hash_pair(&left, &right), compress2(fr(1), fr(2)).to_bytes_be());
}

// =============================================================================
// Domain separation
// =============================================================================

#[test]
fn domain_tags() {
    assert_eq!(Domain::GENERIC.value(), 0x5349_4742);
    assert_eq!(Domain::GENERIC, Domain::from_ascii(*b"SIGB"));
    assert_eq!(Domain::POET_NODE, Domain::from_ascii(*b"SGPN"));
    assert_eq!(Domain::POLICY_ROOT, Domain::from_ascii(*b"SGPR"));
    assert_eq!(Domain::FS_CHALLENGE, Domain::from_ascii(*b"SGFS"));
    assert_eq!(Domain::TAP_TWEAK, Domain::from_ascii(*b"SGTT"));
}

#[test]
fn hash_many_known_answers() {
    assert_eq!(
        hash_many(Domain::GENERIC, &[fr(1), fr(2)]).to_hex(),
        "0x2c0b6e0814bdb85423bd95beb552a919aa5e8589f1ef4d3ef942b9a5c68177ad"
    );
    assert_eq!(
        hash_many(Domain::POET_NODE, &[fr(1), fr(2)]).to_hex(),
        "0x02f3b50a043b0081d87c486e27cd0d4a0c2f97a3c0e5c4548b889142cac57f42"
    );
}

#[test]
fn distinct_domains_give_distinct_digests() {
    let digests: Vec<[u8; 32]> = Domain::ALL
        .iter()
        .map(|&d| hash_bytes(d, &[b"hello"]))
        .collect();
    for i in 0..digests.len() {
        for j in i + 1..digests.len() {
            assert_ne!(digests[i], digests[j], "{} vs {}", Domain::ALL[i], Domain::ALL[j]);
        }
    }
}

#[test]
fn hash_bytes_known_answers() {
    assert_eq!(
        hex::encode(hash_bytes(Domain::GENERIC, &[b"hello"])),
        "22b83f612606e7ec43eab3cc0caed038575710fc1bd1c4ff8fe7a9ec166facf1"
    );
    assert_eq!(
        hex::encode(hash_bytes(Domain::POET_NODE, &[b"hello"])),
        "0698fd33b77f74138fdbaad0051e1b17ff7e420cfe6e5a5288304e95acf35d20"
    );

    let sequential: Vec<u8> = (0..62).collect();
    assert_eq!(
        hex::encode(hash_bytes(Domain::GENERIC, &[&sequential])),
        "2e7618e7d840cc0743af0547ac2c7c02c8ad30cfa6a845ffb848c2eeea87457d"
    );

    assert_eq!(
        hex::encode(hash_bytes(Domain::GENERIC, &[[0xffu8; 31]])),
        "01f3b04df7bba2c9007d63ddddd9b40d456eadec560d64b6bdefcb877bf560c5"
    );
}

#[test]
fn empty_bytes_hash_only_the_domain() {
    let empty: [&[u8]; 0] = [];
    let digest = hash_bytes(Domain::GENERIC, &empty);
    assert_eq!(
        hex::encode(digest),
        "1fde141f39f0c43ac051c992bd5fb4894684db3bcc8089e64d1922d804d3f2ac"
    );
    assert_eq!(digest, hash_bytes(Domain::GENERIC, &[b""]));
    assert_eq!(digest, hash_many(Domain::GENERIC, &[]).to_bytes_be());
}

#[test]
fn chunk_boundaries_change_the_digest() {
    let split = hash_bytes(Domain::GENERIC, &[&b"hel"[..], &b"lo"[..]]);
    assert_eq!(
        hex::encode(split),
        "2d10b42e670bb642e78faed69d0153c967bd81ca01e6bc49fa710dc4a1791e34"
    );
    assert_ne!(split, hash_bytes(Domain::GENERIC, &[b"hello"]));
}

#[test]
fn bytes_encode_below_the_modulus() {
    let elements = bytes_to_elements(&[[0xffu8; 31]]);
    assert_eq!(elements.len(), 1);
    let mut expected = [0u8; 32];
    expected[1..].fill(0xff);
    assert_eq!(elements[0].to_bytes_be(), expected, "31-byte groups never reduce");
}
