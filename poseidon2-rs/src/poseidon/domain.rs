//! Domain separation tags.
//!
//! A tag is absorbed as the first element of a domain-separated hash so that
//! identical payloads in different namespaces never collide. The named tags
//! are four ASCII bytes read as a big-endian 32-bit integer and widened to 64
//! bits.

use crate::error::{Poseidon2Error, Poseidon2Result};
use crate::field::Fr;
use std::fmt;

/// A 64-bit domain separation tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Domain(pub u64);

impl Domain {
    /// General-purpose hashing ("SIGB").
    pub const GENERIC: Domain = Domain(0x5349_4742);
    /// Proof-of-elapsed-time tree nodes ("SGPN").
    pub const POET_NODE: Domain = Domain(0x5347_504e);
    /// Policy tree roots ("SGPR").
    pub const POLICY_ROOT: Domain = Domain(0x5347_5052);
    /// Fiat-Shamir challenges ("SGFS").
    pub const FS_CHALLENGE: Domain = Domain(0x5347_4653);
    /// Taproot-style key tweaks ("SGTT").
    pub const TAP_TWEAK: Domain = Domain(0x5347_5454);

    /// Every named domain, in declaration order.
    pub const ALL: [Domain; 5] = [
        Domain::GENERIC,
        Domain::POET_NODE,
        Domain::POLICY_ROOT,
        Domain::FS_CHALLENGE,
        Domain::TAP_TWEAK,
    ];

    /// Build a tag from four ASCII bytes.
    pub const fn from_ascii(tag: [u8; 4]) -> Domain {
        Domain(u32::from_be_bytes(tag) as u64)
    }

    /// Raw tag value.
    pub const fn value(self) -> u64 {
        self.0
    }

    /// The tag as a field element, as absorbed by the sponge.
    pub fn to_fr(self) -> Fr {
        Fr::from_u64(self.0)
    }

    /// Symbolic name for the named domains.
    pub fn name(self) -> Option<&'static str> {
        match self {
            Domain::GENERIC => Some("generic"),
            Domain::POET_NODE => Some("poet-node"),
            Domain::POLICY_ROOT => Some("policy-root"),
            Domain::FS_CHALLENGE => Some("fs-challenge"),
            Domain::TAP_TWEAK => Some("tap-tweak"),
            _ => None,
        }
    }

    /// The four ASCII characters of a 32-bit printable tag, if it is one.
    pub fn ascii(self) -> Option<String> {
        let value = u32::try_from(self.0).ok()?;
        let bytes = value.to_be_bytes();
        if bytes.iter().all(|b| b.is_ascii_graphic()) {
            Some(bytes.iter().map(|&b| b as char).collect())
        } else {
            None
        }
    }

    /// Resolve a domain from a name (`generic`), a four-character tag
    /// (`SIGB`), or a hex value (`0x53494742`).
    pub fn parse(s: &str) -> Poseidon2Result<Domain> {
        if let Some(domain) = Domain::ALL.iter().find(|d| d.name() == Some(s)) {
            return Ok(*domain);
        }
        if let Some(hex_digits) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
            return u64::from_str_radix(hex_digits, 16)
                .map(Domain)
                .map_err(|_| Poseidon2Error::UnknownDomain(s.to_string()));
        }
        if let Ok(tag) = <[u8; 4]>::try_from(s.as_bytes()) {
            if tag.iter().all(|b| b.is_ascii_graphic()) {
                return Ok(Domain::from_ascii(tag));
            }
        }
        Err(Poseidon2Error::UnknownDomain(s.to_string()))
    }
}

impl From<u64> for Domain {
    fn from(value: u64) -> Self {
        Domain(value)
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "{} (0x{:08x})", name, self.0),
            None => write!(f, "0x{:08x}", self.0),
        }
    }
}
