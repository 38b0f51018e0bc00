//! BN256 scalar field element (Fr) in Montgomery form.
//!
//! Elements are four little-endian 64-bit limbs holding `a * R mod r` with
//! `R = 2^256`. Every constructor and every operation leaves the limbs fully
//! reduced, so two elements are equal exactly when their limbs are equal.
//!
//! Arithmetic is branch-free with respect to the operand values: corrections
//! go through [`limbs::select`] and the reduction loop runs a fixed number of
//! word passes.

use super::limbs::{self, adc, mac, Limbs, LIMBS};
use super::MODULUS;
use crate::error::{Poseidon2Error, Poseidon2Result};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

/// `-(r^-1) mod 2^64`.
const INV: u64 = 0xc2e1_f593_efff_ffff;

/// `R = 2^256 mod r`, i.e. one in Montgomery form.
const R: Limbs = [
    0xac96_341c_4fff_fffb,
    0x36fc_7695_9f60_cd29,
    0x666e_a36f_7879_462e,
    0x0e0a_77c1_9a07_df2f,
];

/// `R^2 = 2^512 mod r`, used to move values into Montgomery form.
const R2: Limbs = [
    0x1bb8_e645_ae21_6da7,
    0x53fe_3ab1_e35c_59e3,
    0x8c49_833d_53bb_8085,
    0x0216_d0b1_7f4e_44a5,
];

/// Number of hex digits in a canonical encoding.
const HEX_DIGITS: usize = 64;

/// A BN256 scalar field element.
#[derive(Clone, Copy)]
pub struct Fr(Limbs);

impl Fr {
    /// The additive identity (zero).
    pub const ZERO: Fr = Fr([0; LIMBS]);

    /// The multiplicative identity (one).
    pub const ONE: Fr = Fr(R);

    /// Create an Fr from a u64 value.
    pub fn from_u64(val: u64) -> Fr {
        Fr(mont_mul(&[val, 0, 0, 0], &R2))
    }

    /// Create an Fr from 32 big-endian bytes.
    ///
    /// Values at or above the modulus are reduced, not rejected. Callers that
    /// need strict range checking must compare against [`super::MODULUS`]
    /// themselves.
    pub fn from_bytes_be(bytes: &[u8; 32]) -> Fr {
        let mut raw = [0u64; LIMBS];
        for (i, limb) in raw.iter_mut().enumerate() {
            let start = 24 - i * 8;
            let mut word = [0u8; 8];
            word.copy_from_slice(&bytes[start..start + 8]);
            *limb = u64::from_be_bytes(word);
        }
        // mont_mul tolerates any 256-bit left operand and still returns a
        // canonical result, so no pre-reduction is needed.
        Fr(mont_mul(&raw, &R2))
    }

    /// Convert to the canonical 32-byte big-endian representation.
    pub fn to_bytes_be(&self) -> [u8; 32] {
        let canonical = self.to_canonical();
        let mut out = [0u8; 32];
        for (i, limb) in canonical.iter().rev().enumerate() {
            out[i * 8..(i + 1) * 8].copy_from_slice(&limb.to_be_bytes());
        }
        out
    }

    /// Parse a hex string, with or without a `0x` prefix.
    ///
    /// Short strings are left-padded with zeros; values at or above the
    /// modulus are reduced like [`Fr::from_bytes_be`].
    pub fn from_hex(hex_str: &str) -> Poseidon2Result<Fr> {
        let digits = hex_str
            .strip_prefix("0x")
            .or_else(|| hex_str.strip_prefix("0X"))
            .unwrap_or(hex_str);

        if digits.len() > HEX_DIGITS {
            return Err(Poseidon2Error::WrongLength {
                expected: HEX_DIGITS,
                actual: digits.len(),
            });
        }

        let padded = format!("{:0>width$}", digits, width = HEX_DIGITS);
        let mut arr = [0u8; 32];
        hex::decode_to_slice(&padded, &mut arr)
            .map_err(|_| Poseidon2Error::InvalidHex(hex_str.to_string()))?;
        Ok(Self::from_bytes_be(&arr))
    }

    /// Convert to a `0x`-prefixed, 64-digit lowercase hex string.
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.to_bytes_be()))
    }

    /// Returns true if this is the additive identity.
    pub fn is_zero(&self) -> bool {
        limbs::ct_is_zero(&self.0) == 1
    }

    /// Square the field element.
    pub fn square(&self) -> Fr {
        Fr(mont_mul(&self.0, &self.0))
    }

    /// Double the field element.
    pub fn double(&self) -> Fr {
        *self + *self
    }

    /// Compute x^5 as `x * (x^2)^2` (used in the Poseidon2 S-box).
    pub fn pow5(&self) -> Fr {
        let x2 = self.square();
        let x4 = x2.square();
        x4 * *self
    }

    /// Convert to canonical decimal string representation.
    pub fn to_decimal(&self) -> String {
        let mut value = self.to_canonical();
        if value == [0; LIMBS] {
            return "0".to_string();
        }

        let mut digits = Vec::new();
        while value != [0; LIMBS] {
            let remainder = div_by_10(&mut value);
            digits.push(b'0' + remainder);
        }
        digits.iter().rev().map(|&d| d as char).collect()
    }

    /// Leave Montgomery form: `a * R * R^-1`.
    fn to_canonical(self) -> Limbs {
        let [a0, a1, a2, a3] = self.0;
        mont_reduce([a0, a1, a2, a3, 0, 0, 0, 0])
    }
}

/// Montgomery multiplication `a * b * R^-1 mod r`.
///
/// Schoolbook double-width product followed by word-wise reduction. `b` must
/// be below the modulus; `a` may be any 256-bit value.
#[inline]
fn mont_mul(a: &Limbs, b: &Limbs) -> Limbs {
    let mut t = [0u64; 2 * LIMBS];
    for i in 0..LIMBS {
        let mut carry = 0;
        for j in 0..LIMBS {
            let (lo, hi) = mac(t[i + j], a[i], b[j], carry);
            t[i + j] = lo;
            carry = hi;
        }
        t[i + LIMBS] = carry;
    }
    mont_reduce(t)
}

/// Reduce a double-width value `t < 2^256 * r` to `t * R^-1 mod r`.
///
/// Exactly four passes, one per limb, regardless of the value.
#[inline]
fn mont_reduce(mut t: [u64; 2 * LIMBS]) -> Limbs {
    let mut carry2 = 0;
    for i in 0..LIMBS {
        let k = t[i].wrapping_mul(INV);
        let mut carry = 0;
        for j in 0..LIMBS {
            let (lo, hi) = mac(t[i + j], k, MODULUS[j], carry);
            t[i + j] = lo;
            carry = hi;
        }
        let (lo, hi) = adc(t[i + LIMBS], carry2, carry);
        t[i + LIMBS] = lo;
        carry2 = hi;
    }
    // t / 2^256 < 2r, one conditional subtraction makes it canonical
    reduce_once(&[t[4], t[5], t[6], t[7]])
}

/// Subtract the modulus once if `x >= r`.
#[inline(always)]
fn reduce_once(x: &Limbs) -> Limbs {
    let (diff, borrow) = limbs::sub(x, &MODULUS);
    limbs::select(&diff, x, borrow)
}

/// Divide a 256-bit number (little-endian limbs) by 10 in place.
/// Returns the remainder.
fn div_by_10(limbs: &mut Limbs) -> u8 {
    let mut rem: u128 = 0;
    for limb in limbs.iter_mut().rev() {
        let cur = (rem << 64) | (*limb as u128);
        *limb = (cur / 10) as u64;
        rem = cur % 10;
    }
    rem as u8
}

impl PartialEq for Fr {
    fn eq(&self, other: &Fr) -> bool {
        limbs::ct_eq(&self.0, &other.0) == 1
    }
}

impl Eq for Fr {}

impl Default for Fr {
    fn default() -> Self {
        Self::ZERO
    }
}

impl From<u64> for Fr {
    fn from(val: u64) -> Self {
        Fr::from_u64(val)
    }
}

impl Add for Fr {
    type Output = Fr;
    fn add(self, rhs: Fr) -> Fr {
        let (sum, carry) = limbs::add(&self.0, &rhs.0);
        let (diff, borrow) = limbs::sub(&sum, &MODULUS);
        // take the difference on overflow or when sum >= r
        Fr(limbs::select(&sum, &diff, carry | (1 ^ borrow)))
    }
}

impl Sub for Fr {
    type Output = Fr;
    fn sub(self, rhs: Fr) -> Fr {
        let (diff, borrow) = limbs::sub(&self.0, &rhs.0);
        let (wrapped, _) = limbs::add(&diff, &MODULUS);
        Fr(limbs::select(&diff, &wrapped, borrow))
    }
}

impl Mul for Fr {
    type Output = Fr;
    fn mul(self, rhs: Fr) -> Fr {
        Fr(mont_mul(&self.0, &rhs.0))
    }
}

impl Neg for Fr {
    type Output = Fr;
    fn neg(self) -> Fr {
        Fr::ZERO - self
    }
}

impl AddAssign for Fr {
    fn add_assign(&mut self, rhs: Fr) {
        *self = *self + rhs;
    }
}

impl SubAssign for Fr {
    fn sub_assign(&mut self, rhs: Fr) {
        *self = *self - rhs;
    }
}

impl MulAssign for Fr {
    fn mul_assign(&mut self, rhs: Fr) {
        *self = *self * rhs;
    }
}

impl fmt::Display for Fr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_decimal())
    }
}

impl fmt::Debug for Fr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fr({})", self.to_hex())
    }
}
