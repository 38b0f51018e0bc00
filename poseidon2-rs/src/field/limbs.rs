//! Fixed-width 4x64-bit limb primitives.
//!
//! All helpers are branch-free. Carries and borrows are plain 0/1 words and
//! selection goes through a mask, never through `if`.

/// Number of 64-bit limbs in a field element.
pub(crate) const LIMBS: usize = 4;

/// Little-endian limb vector.
pub(crate) type Limbs = [u64; LIMBS];

/// Compute `a + b + carry`, returning the sum and the outgoing carry (0 or 1).
#[inline(always)]
pub(crate) const fn adc(a: u64, b: u64, carry: u64) -> (u64, u64) {
    let ret = (a as u128) + (b as u128) + (carry as u128);
    (ret as u64, (ret >> 64) as u64)
}

/// Compute `a - b - borrow`, returning the difference and the outgoing borrow (0 or 1).
#[inline(always)]
pub(crate) const fn sbb(a: u64, b: u64, borrow: u64) -> (u64, u64) {
    let ret = (a as u128).wrapping_sub((b as u128) + (borrow as u128));
    (ret as u64, (ret >> 127) as u64)
}

/// Compute `a + b * c + carry`, returning the low word and the high word.
#[inline(always)]
pub(crate) const fn mac(a: u64, b: u64, c: u64, carry: u64) -> (u64, u64) {
    let ret = (a as u128) + ((b as u128) * (c as u128)) + (carry as u128);
    (ret as u64, (ret >> 64) as u64)
}

/// Full-width addition. Returns the sum and the carry out of the top limb.
#[inline(always)]
pub(crate) const fn add(x: &Limbs, y: &Limbs) -> (Limbs, u64) {
    let (d0, c) = adc(x[0], y[0], 0);
    let (d1, c) = adc(x[1], y[1], c);
    let (d2, c) = adc(x[2], y[2], c);
    let (d3, c) = adc(x[3], y[3], c);
    ([d0, d1, d2, d3], c)
}

/// Full-width subtraction. Returns the difference and the borrow out of the top limb.
#[inline(always)]
pub(crate) const fn sub(x: &Limbs, y: &Limbs) -> (Limbs, u64) {
    let (d0, b) = sbb(x[0], y[0], 0);
    let (d1, b) = sbb(x[1], y[1], b);
    let (d2, b) = sbb(x[2], y[2], b);
    let (d3, b) = sbb(x[3], y[3], b);
    ([d0, d1, d2, d3], b)
}

/// Return `b` when `choice == 1` and `a` when `choice == 0`.
///
/// `choice` must be 0 or 1.
#[inline(always)]
pub(crate) const fn select(a: &Limbs, b: &Limbs, choice: u64) -> Limbs {
    let mask = 0u64.wrapping_sub(choice);
    [
        a[0] ^ ((a[0] ^ b[0]) & mask),
        a[1] ^ ((a[1] ^ b[1]) & mask),
        a[2] ^ ((a[2] ^ b[2]) & mask),
        a[3] ^ ((a[3] ^ b[3]) & mask),
    ]
}

/// Branch-free equality: 1 if every limb matches, 0 otherwise.
#[inline(always)]
pub(crate) const fn ct_eq(a: &Limbs, b: &Limbs) -> u64 {
    let diff = (a[0] ^ b[0]) | (a[1] ^ b[1]) | (a[2] ^ b[2]) | (a[3] ^ b[3]);
    // diff | -diff has its top bit set iff diff != 0
    1 ^ ((diff | diff.wrapping_neg()) >> 63)
}

/// Branch-free zero test: 1 if all limbs are zero.
#[inline(always)]
pub(crate) const fn ct_is_zero(a: &Limbs) -> u64 {
    ct_eq(a, &[0; LIMBS])
}
