//! Heuristic complexity scoring of byte payloads.
//!
//! The score is the sum of four independent terms: size, repeated 4-byte
//! windows, low byte diversity, and concentrations of 0x00 / 0xFF bytes.

use std::collections::HashMap;

/// Bytes per size point.
const BYTES_PER_POINT: usize = 100;

/// Window length for repetition analysis.
const PATTERN_LEN: usize = 4;

/// Occurrences of one window tolerated before it is penalised.
const PATTERN_TOLERANCE: u64 = 10;

/// Minimum length before the diversity terms apply.
const ENTROPY_MIN_LEN: usize = 16;

/// Penalty for fewer than four distinct byte values.
const LOW_DIVERSITY_PENALTY: u64 = 50;

/// Penalty for one byte value filling more than half of an input longer
/// than [`ENTROPY_MIN_LEN`].
const DOMINANT_BYTE_PENALTY: u64 = 30;

/// Penalty for each of 0x00 / 0xFF filling more than a third of the input.
const EDGE_BYTE_PENALTY: u64 = 20;

/// Total heuristic score of `data`.
pub fn estimate_complexity(data: &[u8]) -> u64 {
    if data.is_empty() {
        return 0;
    }

    (data.len() / BYTES_PER_POINT) as u64
        + pattern_score(data)
        + entropy_score(data)
        + edge_score(data)
}

/// Penalty for 4-byte windows that repeat more than the tolerance.
pub fn pattern_score(data: &[u8]) -> u64 {
    if data.len() < PATTERN_LEN {
        return 0;
    }

    let mut counts: HashMap<&[u8], u64> = HashMap::new();
    for window in data.windows(PATTERN_LEN) {
        *counts.entry(window).or_insert(0) += 1;
    }

    counts
        .values()
        .filter(|&&count| count > PATTERN_TOLERANCE)
        .map(|&count| count - PATTERN_TOLERANCE)
        .sum()
}

/// Penalty for skewed byte distributions.
pub fn entropy_score(data: &[u8]) -> u64 {
    if data.len() < ENTROPY_MIN_LEN {
        return 0;
    }

    let mut frequency = [0usize; 256];
    for &b in data {
        frequency[b as usize] += 1;
    }

    let distinct = frequency.iter().filter(|&&f| f > 0).count();
    let max_freq = frequency.iter().copied().max().unwrap_or(0);

    let mut score = 0;
    if distinct < 4 && data.len() > 32 {
        score += LOW_DIVERSITY_PENALTY;
    }
    if max_freq > data.len() / 2 && data.len() > ENTROPY_MIN_LEN {
        score += DOMINANT_BYTE_PENALTY;
    }
    score
}

/// Penalty for inputs dominated by null or all-ones bytes.
pub fn edge_score(data: &[u8]) -> u64 {
    let nulls = data.iter().filter(|&&b| b == 0x00).count();
    let maxes = data.iter().filter(|&&b| b == 0xff).count();
    let third = data.len() / 3;

    let mut score = 0;
    if nulls > third {
        score += EDGE_BYTE_PENALTY;
    }
    if maxes > third {
        score += EDGE_BYTE_PENALTY;
    }
    score
}
