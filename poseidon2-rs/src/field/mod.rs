//! BN256 scalar field (Fr) arithmetic.
//!
//! `r = 21888242871839275222246405745257275088548364400416034343698204186575808495617`
//!
//! Elements live in Montgomery form with `R = 2^256`. Construction from
//! integers or bytes always yields a canonical value strictly below `r`;
//! out-of-range byte strings are reduced rather than rejected.

mod fr;
mod limbs;

pub use fr::Fr;

/// Field modulus as little-endian 64-bit limbs.
pub const MODULUS: [u64; 4] = [
    0x43e1_f593_f000_0001,
    0x2833_e848_79b9_7091,
    0xb850_45b6_8181_585d,
    0x3064_4e72_e131_a029,
];

/// Field modulus as a `0x`-prefixed, 64-digit hex string.
pub const MODULUS_HEX: &str =
    "0x30644e72e131a029b85045b68181585d2833e84879b9709143e1f593f0000001";

/// Field modulus in decimal.
pub const MODULUS_DECIMAL: &str =
    "21888242871839275222246405745257275088548364400416034343698204186575808495617";

/// Bit length of the modulus.
pub const MODULUS_BITS: u32 = 254;
