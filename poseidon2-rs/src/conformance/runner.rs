//! KAT runner: loads a vector file and replays it against this implementation.

use super::kat::{
    BytesHashVector, Compress2Vector, HashVector, KatFile, KatParameters, PermutationVector,
};
use crate::error::{Poseidon2Error, Poseidon2Result};
use crate::field::{Fr, MODULUS_HEX};
use crate::poseidon::{compress2, hash, hash_bytes, permute, Domain, State, WIDTH};
use std::fs;
use std::path::Path;
use tracing::{trace, warn};

/// Result of running a single vector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TestResult {
    /// Output matched.
    Pass,
    /// Output differed.
    Fail {
        /// Expected value from the file.
        expected: String,
        /// Value computed here.
        actual: String,
    },
    /// The vector itself could not be decoded.
    Error {
        /// What went wrong.
        message: String,
    },
}

impl TestResult {
    /// Returns true if this is a passing result.
    pub fn is_pass(&self) -> bool {
        matches!(self, Self::Pass)
    }

    /// Returns true if this is a failing result.
    pub fn is_fail(&self) -> bool {
        matches!(self, Self::Fail { .. })
    }

    fn compare(expected: &str, actual: String) -> Self {
        if expected.eq_ignore_ascii_case(&actual) {
            Self::Pass
        } else {
            Self::Fail {
                expected: expected.to_string(),
                actual,
            }
        }
    }
}

impl From<Poseidon2Error> for TestResult {
    fn from(err: Poseidon2Error) -> Self {
        Self::Error {
            message: err.to_string(),
        }
    }
}

/// Results from running a KAT file.
#[derive(Debug, Default)]
pub struct KatResults {
    /// Number of vectors that passed.
    pub passed: usize,
    /// Number of vectors that failed.
    pub failed: usize,
    /// Number of vectors that could not be decoded.
    pub errors: usize,
    /// Detailed results, keyed by "<section>/<description>".
    pub details: Vec<(String, TestResult)>,
}

impl KatResults {
    /// Create a new empty results container.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a test result.
    pub fn record(&mut self, id: String, result: TestResult) {
        match &result {
            TestResult::Pass => self.passed += 1,
            TestResult::Fail { .. } => {
                warn!(vector = %id, ?result, "known-answer mismatch");
                self.failed += 1;
            }
            TestResult::Error { .. } => self.errors += 1,
        }
        trace!(vector = %id, pass = result.is_pass(), "kat vector");
        self.details.push((id, result));
    }

    /// Total number of vectors run.
    pub fn total(&self) -> usize {
        self.passed + self.failed + self.errors
    }

    /// Returns true if nothing failed or errored.
    pub fn all_passed(&self) -> bool {
        self.failed == 0 && self.errors == 0
    }

    /// One-line summary.
    pub fn summary(&self) -> String {
        format!(
            "{} passed, {} failed, {} errors (total: {})",
            self.passed,
            self.failed,
            self.errors,
            self.total()
        )
    }

    /// Non-passing entries.
    pub fn failures(&self) -> Vec<&(String, TestResult)> {
        self.details.iter().filter(|(_, r)| !r.is_pass()).collect()
    }
}

/// Runner that replays a KAT file.
pub struct KatRunner {
    kat: KatFile,
}

impl KatRunner {
    /// Wrap an in-memory KAT document.
    pub fn new(kat: KatFile) -> Self {
        Self { kat }
    }

    /// Parse a KAT document from JSON.
    pub fn from_json(json: &str) -> Poseidon2Result<Self> {
        Ok(Self::new(serde_json::from_str(json)?))
    }

    /// Load a KAT document from a file path.
    pub fn load<P: AsRef<Path>>(path: P) -> Poseidon2Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| Poseidon2Error::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&content)
    }

    /// The loaded document.
    pub fn kat(&self) -> &KatFile {
        &self.kat
    }

    /// Number of vectors across all sections.
    pub fn vector_count(&self) -> usize {
        let v = &self.kat.poseidon2_test_vectors;
        v.permutation_tests.len()
            + v.hash_tests.len()
            + v.compress2_tests.len()
            + v.bytes_hash_tests.len()
    }

    /// Check the header and run every vector.
    pub fn run_all(&self) -> KatResults {
        let v = &self.kat.poseidon2_test_vectors;
        let mut results = KatResults::new();

        results.record(
            "header/field_modulus".to_string(),
            TestResult::compare(MODULUS_HEX, normalize_hex(&v.field_modulus)),
        );
        results.record(
            "header/parameters".to_string(),
            TestResult::compare(
                &format!("{:?}", KatParameters::current()),
                format!("{:?}", v.parameters),
            ),
        );

        for tv in &v.permutation_tests {
            results.record(format!("permutation/{}", tv.description), run_permutation(tv));
        }
        for tv in &v.hash_tests {
            results.record(format!("hash/{}", tv.description), run_hash(tv));
        }
        for tv in &v.compress2_tests {
            results.record(format!("compress2/{}", tv.description), run_compress2(tv));
        }
        for tv in &v.bytes_hash_tests {
            results.record(format!("bytes_hash/{}", tv.description), run_bytes_hash(tv));
        }

        results
    }
}

fn normalize_hex(s: &str) -> String {
    let digits = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")).unwrap_or(s);
    format!("0x{:0>64}", digits.to_ascii_lowercase())
}

fn parse_all(values: &[String]) -> Poseidon2Result<Vec<Fr>> {
    values.iter().map(|s| Fr::from_hex(s)).collect()
}

fn run_permutation(tv: &PermutationVector) -> TestResult {
    let parsed = parse_all(&tv.input).and_then(|input| {
        State::try_from(input.as_slice()).map_err(|_| Poseidon2Error::WrongLength {
            expected: WIDTH,
            actual: input.len(),
        })
    });
    let mut state = match parsed {
        Ok(state) => state,
        Err(e) => return e.into(),
    };

    permute(&mut state);
    let expected: Vec<String> = tv.expected.iter().map(|s| normalize_hex(s)).collect();
    let actual: Vec<String> = state.iter().map(Fr::to_hex).collect();
    TestResult::compare(&expected.join(","), actual.join(","))
}

fn run_hash(tv: &HashVector) -> TestResult {
    match parse_all(&tv.input) {
        Ok(input) => TestResult::compare(&normalize_hex(&tv.expected), hash(&input).to_hex()),
        Err(e) => e.into(),
    }
}

fn run_compress2(tv: &Compress2Vector) -> TestResult {
    match (Fr::from_hex(&tv.a), Fr::from_hex(&tv.b)) {
        (Ok(a), Ok(b)) => {
            TestResult::compare(&normalize_hex(&tv.expected), compress2(a, b).to_hex())
        }
        (Err(e), _) | (_, Err(e)) => e.into(),
    }
}

fn run_bytes_hash(tv: &BytesHashVector) -> TestResult {
    let domain = match Domain::parse(&tv.domain) {
        Ok(domain) => domain,
        Err(e) => return e.into(),
    };
    let data = match hex::decode(&tv.data) {
        Ok(data) => data,
        Err(_) => return Poseidon2Error::InvalidHex(tv.data.clone()).into(),
    };

    let actual = format!("0x{}", hex::encode(hash_bytes(domain, &[data])));
    TestResult::compare(&normalize_hex(&tv.expected), actual)
}
