//! Constant-weight encoding.
//!
//! A bijection between bit strings of `floor(log2 C(n,t))` bits and
//! weight-t vectors of length n, by combinatorial number system ranking:
//! walk the positions in order, and at each one compare the remaining index
//! against the count of vectors that leave the position clear. The running
//! binomial coefficient is updated incrementally (exact big-integer
//! multiply/divide), never recomputed.
//!
//! This is how hash output becomes an error vector and back.

use krater_core::{Error, Result};
use num_bigint::BigUint;

use crate::vector::BitVector;

/// C(n, t).
pub fn binomial(n: usize, t: usize) -> BigUint {
    if t > n {
        return BigUint::from(0u32);
    }
    let mut b = BigUint::from(1u32);
    for i in 0..t {
        b = b * (n - i) / (i + 1);
    }
    b
}

/// The codec's capacity in bits: `floor(log2 C(n, t))`.
pub fn capacity_bits(n: usize, t: usize) -> usize {
    let c = binomial(n, t);
    (c.bits() as usize).saturating_sub(1)
}

/// Encode a byte string into a weight-`t` vector of length `n`.
///
/// The bytes are read as a big-endian integer and truncated to the low
/// `capacity_bits(n, t)` bits, so any hash output is accepted; on the valid
/// domain (inputs of at most that many bits) the truncation is the identity
/// and [`decode`] inverts exactly.
pub fn encode(n: usize, t: usize, bytes: &[u8]) -> Result<BitVector> {
    if t == 0 || t > n {
        return Err(Error::InvalidParameter);
    }
    let d = capacity_bits(n, t);
    let mut index = BigUint::from_bytes_be(bytes);
    index &= (BigUint::from(1u32) << d) - 1u32;

    let mut v = BitVector::zero(n);
    let mut r = t;
    // invariant at position p: b == C(n - p - 1, r)
    let mut b = binomial(n - 1, t);
    for p in 0..n {
        if r == 0 {
            break;
        }
        let nn = n - p - 1;
        // C(nn, r) == 0 exactly when too few positions remain, which forces
        // a one here; index >= 0 == b covers that case.
        let set_here = index >= b;
        if set_here {
            index -= &b;
            v.set(p, true);
        }
        if nn == 0 {
            break;
        }
        if set_here {
            b = b * r / nn;
            r -= 1;
        } else {
            b = b * (nn - r) / nn;
        }
    }
    debug_assert_eq!(v.weight(), t);
    Ok(v)
}

/// Rank a weight-`t` vector back into `out_len` big-endian bytes.
///
/// Inverse of [`encode`]. Fails with `InvalidCiphertext` when the vector's
/// weight is not `t` or its rank does not fit in `out_len` bytes (both can
/// only happen for vectors that no valid encryption produced).
pub fn decode(v: &BitVector, t: usize, out_len: usize) -> Result<Vec<u8>> {
    let n = v.len();
    if t == 0 || t > n {
        return Err(Error::InvalidParameter);
    }
    if v.weight() != t {
        return Err(Error::InvalidCiphertext);
    }

    let mut index = BigUint::from(0u32);
    let mut r = t;
    let mut b = binomial(n - 1, t);
    for p in 0..n {
        if r == 0 {
            break;
        }
        let nn = n - p - 1;
        let set_here = v.get(p);
        if set_here {
            index += &b;
        }
        if nn == 0 {
            break;
        }
        if set_here {
            b = b * r / nn;
            r -= 1;
        } else {
            // weight t with r ones left among nn positions implies nn >= r
            b = b * (nn - r) / nn;
        }
    }

    let bytes = index.to_bytes_be();
    if bytes.len() > out_len {
        return Err(Error::InvalidCiphertext);
    }
    let mut out = vec![0u8; out_len];
    out[out_len - bytes.len()..].copy_from_slice(&bytes);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::SeededPrng;
    use krater_core::Prng;

    #[test]
    fn binomial_known_values() {
        assert_eq!(binomial(4, 2), BigUint::from(6u32));
        assert_eq!(binomial(10, 0), BigUint::from(1u32));
        assert_eq!(binomial(10, 10), BigUint::from(1u32));
        assert_eq!(binomial(5, 7), BigUint::from(0u32));
        assert_eq!(binomial(52, 5), BigUint::from(2_598_960u32));
    }

    #[test]
    fn capacity_for_catalog_sizes() {
        // log2 C(2048, 40) is a little over 280
        assert!((275..=285).contains(&capacity_bits(2048, 40)));
        // log2 C(1024, 50) is a little over 282
        assert!((275..=290).contains(&capacity_bits(1024, 50)));
        // exact small case: C(8, 3) = 56, 5 usable bits
        assert_eq!(capacity_bits(8, 3), 5);
    }

    #[test]
    fn zero_input_gives_weight_t() {
        // the S6 shape: all-zero input over the full capacity
        let n = 2048;
        let t = 40;
        let len = capacity_bits(n, t) / 8;
        let v = encode(n, t, &vec![0u8; len]).unwrap();
        assert_eq!(v.len(), n);
        assert_eq!(v.weight(), t);
        assert_eq!(decode(&v, t, len).unwrap(), vec![0u8; len]);
    }

    #[test]
    fn exhaustive_bijection_small() {
        // n=8, t=3: C = 56, capacity 5 bits; every index must roundtrip
        // into a distinct vector
        let mut seen = Vec::new();
        for idx in 0u8..32 {
            let v = encode(8, 3, &[idx]).unwrap();
            assert_eq!(v.weight(), 3);
            assert!(!seen.contains(&v.support()), "collision at {idx}");
            seen.push(v.support());
            assert_eq!(decode(&v, 3, 1).unwrap(), vec![idx]);
        }
    }

    #[test]
    fn random_roundtrips() {
        let mut rng = SeededPrng::from_seed([31u8; 32]);
        for (n, t) in [(64usize, 6usize), (256, 16), (1024, 50)] {
            let len = capacity_bits(n, t) / 8;
            for _ in 0..8 {
                let mut bytes = vec![0u8; len];
                rng.get_bytes(&mut bytes);
                let v = encode(n, t, &bytes).unwrap();
                assert_eq!(v.weight(), t);
                assert_eq!(decode(&v, t, len).unwrap(), bytes);
            }
        }
    }

    #[test]
    fn oversized_input_is_truncated_consistently() {
        // 64 hash bytes against a ~49-bit capacity: encode must still give
        // weight t, and re-encoding the decoded rank must agree
        let mut rng = SeededPrng::from_seed([32u8; 32]);
        let mut long = vec![0u8; 64];
        rng.get_bytes(&mut long);
        let v = encode(256, 8, &long).unwrap();
        assert_eq!(v.weight(), 8);
        let short = decode(&v, 8, capacity_bits(256, 8).div_ceil(8)).unwrap();
        assert_eq!(encode(256, 8, &short).unwrap(), v);
    }

    #[test]
    fn weight_mismatch_rejected() {
        let v = BitVector::from_support(64, &[1, 5, 9]);
        assert!(decode(&v, 4, 8).is_err());
    }

    #[test]
    fn overly_tight_output_rejected() {
        // a vector whose rank needs more bytes than requested
        let n = 64;
        let t = 6;
        // the lexicographically last vector has the maximum rank
        let v = BitVector::from_support(n, &[0, 1, 2, 3, 4, 5]);
        assert!(decode(&v, t, 8).is_ok());
        assert!(decode(&v, t, 1).is_err());
        // rank zero sits at the tail positions and roundtrips through a
        // minimal buffer
        let last = BitVector::from_support(n, &[58, 59, 60, 61, 62, 63]);
        assert_eq!(decode(&last, t, 1).unwrap(), vec![0u8]);
        assert_eq!(encode(n, t, &[0u8]).unwrap(), last);
    }

    #[test]
    fn all_weight_t_vectors_rank_distinctly_tiny() {
        // n=6, t=2: 15 vectors, ranks 0..14 each used once
        let mut ranks = vec![false; 15];
        for a in 0..6usize {
            for b in (a + 1)..6 {
                let v = BitVector::from_support(6, &[a, b]);
                let bytes = decode(&v, 2, 1).unwrap();
                let rank = bytes[0] as usize;
                assert!(rank < 15);
                assert!(!ranks[rank]);
                ranks[rank] = true;
            }
        }
        assert!(ranks.iter().all(|&r| r));
    }
}
