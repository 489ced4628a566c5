//! Grid-state fingerprints used for cycle detection.

use sha2::{Digest, Sha256};
use std::fmt::Debug;
use std::hash::Hash;

/// Deterministic digest of a byte sequence, usable as a map key.
///
/// Equal inputs must give equal digests and distinct inputs should collide
/// only with negligible probability for the grid sizes in use.
pub trait Fingerprinter {
    type Digest: Eq + Hash + Clone + Debug;

    fn fingerprint(&self, bytes: &[u8]) -> Self::Digest;
}

/// SHA-256 over the raw cell bytes
#[derive(Debug, Clone, Copy, Default)]
pub struct Sha256Fingerprinter;

impl Fingerprinter for Sha256Fingerprinter {
    type Digest = [u8; 32];

    fn fingerprint(&self, bytes: &[u8]) -> Self::Digest {
        Sha256::digest(bytes).into()
    }
}
