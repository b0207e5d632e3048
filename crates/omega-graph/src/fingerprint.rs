//! 64-bit vertex fingerprints for canonicalized exploration state.
//!
//! When exploration state is tracked per equivalence class of vertices
//! (state-space reduction), vertices are projected to a stable 64-bit key
//! before any lookup. The stock projection hashes the vertex with FNV-1a;
//! reductions that identify structurally distinct vertices fingerprint a
//! canonical representative instead.
//!
//! # Algorithm
//!
//! FNV-1a, 64-bit variant: xor each input byte into the state, then
//! multiply by the FNV prime. Not cryptographic; chosen for determinism
//! across platforms and processes, which `std`'s default hasher does not
//! guarantee.
//!
//! # Reference
//!
//! - Fowler, Noll, Vo. "The FNV Non-Cryptographic Hash Algorithm."

use std::fmt;
use std::hash::{Hash, Hasher};

/// FNV-1a 64-bit offset basis.
const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
/// FNV-1a 64-bit prime.
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// A 64-bit key standing in for a vertex wherever exploration state is
/// kept per equivalence class rather than per vertex.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Fingerprint(pub u64);

impl Fingerprint {
    /// Fingerprint any hashable value.
    #[inline]
    pub fn of<T: Hash + ?Sized>(value: &T) -> Self {
        let mut hasher = Fnv1a::new();
        value.hash(&mut hasher);
        Fingerprint(hasher.finish())
    }
}

impl fmt::Debug for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FP({:016x})", self.0)
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

/// Streaming FNV-1a hasher.
#[derive(Clone, Debug)]
pub struct Fnv1a {
    state: u64,
}

impl Fnv1a {
    #[inline]
    pub fn new() -> Self {
        Self { state: FNV_OFFSET }
    }
}

impl Default for Fnv1a {
    fn default() -> Self {
        Self::new()
    }
}

impl Hasher for Fnv1a {
    #[inline]
    fn finish(&self) -> u64 {
        self.state
    }

    #[inline]
    fn write(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.state ^= u64::from(byte);
            self.state = self.state.wrapping_mul(FNV_PRIME);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fingerprint_deterministic() {
        let a = Fingerprint::of(&(17u64, "label"));
        let b = Fingerprint::of(&(17u64, "label"));
        assert_eq!(a, b);
    }

    #[test]
    fn test_fingerprint_distinguishes_values() {
        assert_ne!(Fingerprint::of(&1u64), Fingerprint::of(&2u64));
        assert_ne!(Fingerprint::of("ab"), Fingerprint::of("ba"));
    }

    #[test]
    fn test_known_fnv_vector() {
        // FNV-1a of the empty input is the offset basis.
        let mut hasher = Fnv1a::new();
        hasher.write(&[]);
        assert_eq!(hasher.finish(), FNV_OFFSET);

        // Published vector: fnv1a_64("a") = 0xaf63dc4c8601ec8c.
        let mut hasher = Fnv1a::new();
        hasher.write(b"a");
        assert_eq!(hasher.finish(), 0xaf63_dc4c_8601_ec8c);
    }

    #[test]
    fn test_debug_format() {
        let fp = Fingerprint(0xdead_beef);
        assert_eq!(format!("{fp:?}"), "FP(00000000deadbeef)");
    }
}
