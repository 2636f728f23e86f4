//! Interfaces the cryptosystem consumes.
//!
//! The core algorithms never talk to a concrete hash function or random
//! source; they go through these two seams. Implementations live with the
//! algorithm crate, external backends can be supplied by downstream users.

/// Message digest interface.
///
/// A streaming hash with a fixed output size. [`Digest::finalize`] writes the
/// digest and resets the state, so one instance can be reused for a sequence
/// of independent hashes.
///
/// # Example
///
/// ```ignore
/// let mut h = Hasher::new(DigestKind::Sha256);
/// h.update(b"first part");
/// h.update(b"second part");
/// let mut out = vec![0u8; h.digest_size()];
/// h.finalize(&mut out);
/// ```
pub trait Digest {
    /// Internal block size in bytes.
    fn block_size(&self) -> usize;

    /// Output size in bytes.
    fn digest_size(&self) -> usize;

    /// Absorb `data` into the hash state.
    fn update(&mut self, data: &[u8]);

    /// Write the digest into `out` and reset the state.
    ///
    /// `out` must be exactly [`digest_size`](Digest::digest_size) bytes.
    fn finalize(&mut self, out: &mut [u8]);

    /// Reset the state, discarding any absorbed input.
    fn reset(&mut self);
}

/// Byte-oriented random source.
///
/// Every random draw made by key generation and encryption goes through this
/// interface, so a caller can swap the operating-system source for a seeded
/// deterministic one (reproducible key generation, test vectors) without
/// touching the algorithms.
///
/// Implementations holding seed material must zeroize it on drop.
pub trait Prng {
    /// Fill `out` with random bytes.
    fn get_bytes(&mut self, out: &mut [u8]);

    /// Next 32-bit value, little-endian from [`get_bytes`](Prng::get_bytes).
    fn next_u32(&mut self) -> u32 {
        let mut buf = [0u8; 4];
        self.get_bytes(&mut buf);
        u32::from_le_bytes(buf)
    }

    /// Uniform value in `[0, max)`.
    ///
    /// Draws `ceil(log2(max))` bits and rejects out-of-range values, so the
    /// result carries no modulo bias. `max <= 1` returns 0 without consuming
    /// randomness.
    fn next_range(&mut self, max: u64) -> u64 {
        if max <= 1 {
            return 0;
        }
        let bits = 64 - (max - 1).leading_zeros();
        let nbytes = bits.div_ceil(8) as usize;
        let mask = if bits == 64 {
            u64::MAX
        } else {
            (1u64 << bits) - 1
        };
        // Unwritten tail of `buf` stays zero; `nbytes` is fixed per call.
        let mut buf = [0u8; 8];
        loop {
            self.get_bytes(&mut buf[..nbytes]);
            let v = u64::from_le_bytes(buf) & mask;
            if v < max {
                return v;
            }
        }
    }
}
