//! MGF1/KDF2 mask expansion over the selected digest.

use krater_core::Digest as _;

use crate::hash::{DigestKind, Hasher};

/// Expand `seed` into `len` bytes: the concatenation of
/// `H(seed || counter_be32)` for counter = 0, 1, 2, ..., truncated to `len`.
pub fn mgf1(kind: DigestKind, seed: &[u8], len: usize) -> Vec<u8> {
    let mut out = Vec::with_capacity(len);
    let mut h = Hasher::new(kind);
    let mut block = vec![0u8; kind.digest_size()];
    let mut counter: u32 = 0;
    while out.len() < len {
        h.update(seed);
        h.update(&counter.to_be_bytes());
        h.finalize(&mut block);
        let take = block.len().min(len - out.len());
        out.extend_from_slice(&block[..take]);
        counter += 1;
    }
    out
}

/// XOR `data` with the expansion of `seed` (stream-cipher style masking).
pub fn mask(kind: DigestKind, seed: &[u8], data: &[u8]) -> Vec<u8> {
    let stream = mgf1(kind, seed, data.len());
    stream.iter().zip(data).map(|(s, d)| s ^ d).collect()
}
