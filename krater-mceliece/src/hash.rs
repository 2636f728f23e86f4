//! Digest selection and dispatch.
//!
//! The cryptosystem treats hash functions as opaque: everything it needs is
//! the [`Digest`] seam from `krater-core`. [`Hasher`] backs that seam with
//! the RustCrypto digest crates; which one is in play is a parameter-set
//! choice, dispatched once here.

use krater_core::Digest as _;
use krater_core::{Error, Result};

use blake2::{Blake2b512, Blake2s256};
use sha2::digest::consts::{U128, U32, U64};
use sha2::digest::Digest as _;
use sha2::{Sha256, Sha512};
use sha3::{Keccak256, Keccak512};
use skein::{Skein1024, Skein256, Skein512};

/// Selector for the digest used by the CCA2 conversions and signing.
///
/// Blake256/Blake512 are BLAKE2s-256 and BLAKE2b-512.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DigestKind {
    /// BLAKE2s with 256-bit output.
    Blake256,
    /// BLAKE2b with 512-bit output.
    Blake512,
    /// Keccak with 256-bit output.
    Keccak256,
    /// Keccak with 512-bit output.
    Keccak512,
    /// SHA-256.
    Sha256,
    /// SHA-512.
    Sha512,
    /// Skein-256.
    Skein256,
    /// Skein-512.
    Skein512,
    /// Skein-1024.
    Skein1024,
}

impl DigestKind {
    /// Wire ordinal of this selector.
    pub fn ordinal(self) -> u32 {
        match self {
            DigestKind::Blake256 => 1,
            DigestKind::Blake512 => 2,
            DigestKind::Keccak256 => 3,
            DigestKind::Keccak512 => 4,
            DigestKind::Sha256 => 5,
            DigestKind::Sha512 => 6,
            DigestKind::Skein256 => 7,
            DigestKind::Skein512 => 8,
            DigestKind::Skein1024 => 9,
        }
    }

    /// Parse a wire ordinal.
    pub fn from_ordinal(v: u32) -> Result<Self> {
        Ok(match v {
            1 => DigestKind::Blake256,
            2 => DigestKind::Blake512,
            3 => DigestKind::Keccak256,
            4 => DigestKind::Keccak512,
            5 => DigestKind::Sha256,
            6 => DigestKind::Sha512,
            7 => DigestKind::Skein256,
            8 => DigestKind::Skein512,
            9 => DigestKind::Skein1024,
            _ => return Err(Error::InvalidParameter),
        })
    }

    /// Output size in bytes.
    pub fn digest_size(self) -> usize {
        match self {
            DigestKind::Blake256 | DigestKind::Keccak256 | DigestKind::Sha256 => 32,
            DigestKind::Blake512
            | DigestKind::Keccak512
            | DigestKind::Sha512
            | DigestKind::Skein512 => 64,
            DigestKind::Skein256 => 32,
            DigestKind::Skein1024 => 128,
        }
    }

    /// Internal block (or rate) size in bytes.
    pub fn block_size(self) -> usize {
        match self {
            DigestKind::Blake256 | DigestKind::Sha256 | DigestKind::Skein512 => 64,
            DigestKind::Blake512 | DigestKind::Sha512 | DigestKind::Skein1024 => 128,
            DigestKind::Keccak256 => 136,
            DigestKind::Keccak512 => 72,
            DigestKind::Skein256 => 32,
        }
    }
}

/// A streaming hasher dispatching to the selected digest.
pub enum Hasher {
    /// BLAKE2s-256 state.
    Blake256(Blake2s256),
    /// BLAKE2b-512 state.
    Blake512(Blake2b512),
    /// Keccak-256 state.
    Keccak256(Keccak256),
    /// Keccak-512 state.
    Keccak512(Keccak512),
    /// SHA-256 state.
    Sha256(Sha256),
    /// SHA-512 state.
    Sha512(Sha512),
    /// Skein-256 state.
    Skein256(Skein256<U32>),
    /// Skein-512 state.
    Skein512(Skein512<U64>),
    /// Skein-1024 state.
    Skein1024(Skein1024<U128>),
}

impl Hasher {
    /// Fresh hasher for the selected digest.
    pub fn new(kind: DigestKind) -> Self {
        match kind {
            DigestKind::Blake256 => Hasher::Blake256(Blake2s256::new()),
            DigestKind::Blake512 => Hasher::Blake512(Blake2b512::new()),
            DigestKind::Keccak256 => Hasher::Keccak256(Keccak256::new()),
            DigestKind::Keccak512 => Hasher::Keccak512(Keccak512::new()),
            DigestKind::Sha256 => Hasher::Sha256(Sha256::new()),
            DigestKind::Sha512 => Hasher::Sha512(Sha512::new()),
            DigestKind::Skein256 => Hasher::Skein256(Skein256::new()),
            DigestKind::Skein512 => Hasher::Skein512(Skein512::new()),
            DigestKind::Skein1024 => Hasher::Skein1024(Skein1024::new()),
        }
    }

    /// The selector this hasher was built from.
    pub fn kind(&self) -> DigestKind {
        match self {
            Hasher::Blake256(_) => DigestKind::Blake256,
            Hasher::Blake512(_) => DigestKind::Blake512,
            Hasher::Keccak256(_) => DigestKind::Keccak256,
            Hasher::Keccak512(_) => DigestKind::Keccak512,
            Hasher::Sha256(_) => DigestKind::Sha256,
            Hasher::Sha512(_) => DigestKind::Sha512,
            Hasher::Skein256(_) => DigestKind::Skein256,
            Hasher::Skein512(_) => DigestKind::Skein512,
            Hasher::Skein1024(_) => DigestKind::Skein1024,
        }
    }
}

impl krater_core::Digest for Hasher {
    fn block_size(&self) -> usize {
        self.kind().block_size()
    }

    fn digest_size(&self) -> usize {
        self.kind().digest_size()
    }

    fn update(&mut self, data: &[u8]) {
        match self {
            Hasher::Blake256(h) => h.update(data),
            Hasher::Blake512(h) => h.update(data),
            Hasher::Keccak256(h) => h.update(data),
            Hasher::Keccak512(h) => h.update(data),
            Hasher::Sha256(h) => h.update(data),
            Hasher::Sha512(h) => h.update(data),
            Hasher::Skein256(h) => h.update(data),
            Hasher::Skein512(h) => h.update(data),
            Hasher::Skein1024(h) => h.update(data),
        }
    }

    fn finalize(&mut self, out: &mut [u8]) {
        debug_assert_eq!(out.len(), self.digest_size());
        let kind = self.kind();
        let prev = core::mem::replace(self, Hasher::new(kind));
        match prev {
            Hasher::Blake256(h) => out.copy_from_slice(&h.finalize()),
            Hasher::Blake512(h) => out.copy_from_slice(&h.finalize()),
            Hasher::Keccak256(h) => out.copy_from_slice(&h.finalize()),
            Hasher::Keccak512(h) => out.copy_from_slice(&h.finalize()),
            Hasher::Sha256(h) => out.copy_from_slice(&h.finalize()),
            Hasher::Sha512(h) => out.copy_from_slice(&h.finalize()),
            Hasher::Skein256(h) => out.copy_from_slice(&h.finalize()),
            Hasher::Skein512(h) => out.copy_from_slice(&h.finalize()),
            Hasher::Skein1024(h) => out.copy_from_slice(&h.finalize()),
        }
    }

    fn reset(&mut self) {
        let kind = self.kind();
        *self = Hasher::new(kind);
    }
}

/// One-shot hash of `data` under the selected digest.
pub fn digest(kind: DigestKind, data: &[u8]) -> Vec<u8> {
    let mut h = Hasher::new(kind);
    h.update(data);
    let mut out = vec![0u8; kind.digest_size()];
    h.finalize(&mut out);
    out
}

/// One-shot hash of a concatenation, without materializing it.
pub fn digest_parts(kind: DigestKind, parts: &[&[u8]]) -> Vec<u8> {
    let mut h = Hasher::new(kind);
    for part in parts {
        h.update(part);
    }
    let mut out = vec![0u8; kind.digest_size()];
    h.finalize(&mut out);
    out
}

/// Every digest in the catalog, in wire order.
pub const ALL_DIGESTS: [DigestKind; 9] = [
    DigestKind::Blake256,
    DigestKind::Blake512,
    DigestKind::Keccak256,
    DigestKind::Keccak512,
    DigestKind::Sha256,
    DigestKind::Sha512,
    DigestKind::Skein256,
    DigestKind::Skein512,
    DigestKind::Skein1024,
];

#[cfg(test)]
mod tests {
    use super::*;
    use krater_core::Digest as _;

    #[test]
    fn sha256_known_answer() {
        // SHA-256("abc")
        let d = digest(DigestKind::Sha256, b"abc");
        assert_eq!(
            d[..8],
            [0xba, 0x78, 0x16, 0xbf, 0x8f, 0x01, 0xcf, 0xea]
        );
    }

    #[test]
    fn sha512_known_answer() {
        // SHA-512("abc")
        let d = digest(DigestKind::Sha512, b"abc");
        assert_eq!(
            d[..8],
            [0xdd, 0xaf, 0x35, 0xa1, 0x93, 0x61, 0x7a, 0xba]
        );
    }

    #[test]
    fn output_sizes() {
        for kind in ALL_DIGESTS {
            assert_eq!(digest(kind, b"x").len(), kind.digest_size());
        }
    }

    #[test]
    fn streaming_matches_oneshot() {
        for kind in ALL_DIGESTS {
            let mut h = Hasher::new(kind);
            h.update(b"hello ");
            h.update(b"world");
            let mut out = vec![0u8; kind.digest_size()];
            h.finalize(&mut out);
            assert_eq!(out, digest(kind, b"hello world"), "{kind:?}");
        }
    }

    #[test]
    fn finalize_resets() {
        let mut h = Hasher::new(DigestKind::Keccak512);
        h.update(b"first");
        let mut a = vec![0u8; 64];
        h.finalize(&mut a);
        h.update(b"second");
        let mut b = vec![0u8; 64];
        h.finalize(&mut b);
        assert_eq!(b, digest(DigestKind::Keccak512, b"second"));
    }

    #[test]
    fn reset_discards_input() {
        let mut h = Hasher::new(DigestKind::Blake512);
        h.update(b"garbage");
        h.reset();
        h.update(b"data");
        let mut out = vec![0u8; 64];
        h.finalize(&mut out);
        assert_eq!(out, digest(DigestKind::Blake512, b"data"));
    }

    #[test]
    fn digests_are_distinct() {
        let outs: Vec<_> = ALL_DIGESTS
            .iter()
            .map(|&k| digest(k, b"same input"))
            .collect();
        for i in 0..outs.len() {
            for j in (i + 1)..outs.len() {
                assert_ne!(outs[i], outs[j]);
            }
        }
    }

    #[test]
    fn ordinals_roundtrip() {
        for kind in ALL_DIGESTS {
            assert_eq!(DigestKind::from_ordinal(kind.ordinal()).unwrap(), kind);
        }
        assert!(DigestKind::from_ordinal(0).is_err());
        assert!(DigestKind::from_ordinal(10).is_err());
    }

    #[test]
    fn digest_parts_matches_concatenation() {
        let a = digest_parts(DigestKind::Skein512, &[b"ab", b"cd", b""]);
        let b = digest(DigestKind::Skein512, b"abcd");
        assert_eq!(a, b);
    }
}
