//! The one-way trapdoor primitive the CCA2 conversions wrap.
//!
//! Encryption is `m_vec * G + z` over the systematic generator
//! `G = [G_short | I_k]` of the permuted code. Decryption maps the word back
//! into the Goppa code's coordinates, runs syndrome decoding, strips the
//! error, and reads the message out of the systematic tail.

use krater_core::{Error, Result};

use crate::goppa;
use crate::keys::{systematic_part, PrivateKey, PublicKey};
use crate::vector::BitVector;

/// `encrypt_raw(pk, m_vec, z) = m_vec * G + z`.
///
/// `m_vec` must have k bits, `z` must have n bits and weight t.
pub fn encrypt_raw(pk: &PublicKey, m_vec: &BitVector, z: &BitVector) -> Result<BitVector> {
    if m_vec.len() != pk.k() || z.len() != pk.n() {
        return Err(Error::InvalidKey);
    }
    if z.weight() != pk.t() {
        return Err(Error::InvalidCiphertext);
    }
    let parity = pk.generator().mul_left(m_vec);
    Ok(parity.concat(m_vec).xor(z))
}

/// Invert the primitive: recover `(m_vec, z)` from a ciphertext word.
///
/// Fails with `InvalidCiphertext` unless syndrome decoding lands on a
/// codeword at distance exactly t. On success `(m_vec, z)` re-encrypts to
/// the input: the permuted code is systematic, so the codeword is determined
/// by its tail.
pub fn decrypt_raw(sk: &PrivateKey, c: &BitVector) -> Result<(BitVector, BitVector)> {
    if c.len() != sk.n() {
        return Err(Error::InvalidCiphertext);
    }

    // into Goppa coordinates: bit j of the ciphertext sits at support
    // position perm[j]
    let word = sk.perm().inverse().apply(c);
    let error_g = goppa::decode_error(sk.field(), sk.goppa(), sk.qinv(), sk.h(), &word)?;
    if error_g.weight() != sk.t() {
        return Err(Error::InvalidCiphertext);
    }

    // back into ciphertext coordinates
    let z = sk.perm().apply(&error_g);
    let codeword = c.xor(&z);
    let m_vec = systematic_part(&codeword, sk.k());
    Ok((m_vec, z))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Engine;
    use crate::hash::DigestKind;
    use crate::keygen;
    use crate::keys::KeyPair;
    use crate::params::Parameters;
    use crate::rng::{PrngKind, SeededPrng};
    use krater_core::Prng;

    fn params() -> Parameters {
        Parameters::new(
            8,
            6,
            0x11D,
            Engine::Fujisaki,
            DigestKind::Sha256,
            PrngKind::OsEntropy,
            [1, 9, 9],
        )
        .unwrap()
    }

    fn pair(seed: u8) -> KeyPair {
        let mut rng = SeededPrng::from_seed([seed; 32]);
        keygen::generate(&params(), &mut rng).unwrap()
    }

    fn random_weight_t(n: usize, t: usize, rng: &mut SeededPrng) -> BitVector {
        let mut support = Vec::new();
        while support.len() < t {
            let p = rng.next_range(n as u64) as usize;
            if !support.contains(&p) {
                support.push(p);
            }
        }
        BitVector::from_support(n, &support)
    }

    #[test]
    fn raw_roundtrip() {
        let kp = pair(61);
        let pk = kp.public().unwrap();
        let sk = kp.private().unwrap();
        let mut rng = SeededPrng::from_seed([62u8; 32]);
        for _ in 0..5 {
            let m_vec = BitVector::random(pk.k(), &mut rng);
            let z = random_weight_t(pk.n(), pk.t(), &mut rng);
            let c = encrypt_raw(pk, &m_vec, &z).unwrap();
            let (m_back, z_back) = decrypt_raw(sk, &c).unwrap();
            assert_eq!(m_back, m_vec);
            assert_eq!(z_back, z);
        }
    }

    #[test]
    fn wrong_weight_rejected_on_encrypt() {
        let kp = pair(63);
        let pk = kp.public().unwrap();
        let mut rng = SeededPrng::from_seed([64u8; 32]);
        let m_vec = BitVector::random(pk.k(), &mut rng);
        let thin = random_weight_t(pk.n(), pk.t() - 1, &mut rng);
        assert_eq!(
            encrypt_raw(pk, &m_vec, &thin),
            Err(Error::InvalidCiphertext)
        );
    }

    #[test]
    fn dimension_mismatch_rejected() {
        let kp = pair(65);
        let pk = kp.public().unwrap();
        let sk = kp.private().unwrap();
        let mut rng = SeededPrng::from_seed([66u8; 32]);
        let short = BitVector::random(pk.k() - 1, &mut rng);
        let z = random_weight_t(pk.n(), pk.t(), &mut rng);
        assert_eq!(encrypt_raw(pk, &short, &z), Err(Error::InvalidKey));
        assert!(decrypt_raw(sk, &BitVector::zero(10)).is_err());
    }

    #[test]
    fn flipped_bit_fails_decryption() {
        let kp = pair(67);
        let pk = kp.public().unwrap();
        let sk = kp.private().unwrap();
        let mut rng = SeededPrng::from_seed([68u8; 32]);
        let m_vec = BitVector::random(pk.k(), &mut rng);
        let z = random_weight_t(pk.n(), pk.t(), &mut rng);
        let mut c = encrypt_raw(pk, &m_vec, &z).unwrap();
        c.flip(0);
        // one extra flip puts the word at distance t+1 or t-1 from the code
        assert!(decrypt_raw(sk, &c).is_err());
    }

    #[test]
    fn zero_error_is_not_a_valid_ciphertext() {
        let kp = pair(69);
        let pk = kp.public().unwrap();
        let sk = kp.private().unwrap();
        let mut rng = SeededPrng::from_seed([70u8; 32]);
        let m_vec = BitVector::random(pk.k(), &mut rng);
        // a bare codeword decodes to a zero error vector, which the
        // primitive rejects as weight-mismatched
        let parity = pk.generator().mul_left(&m_vec);
        let word = parity.concat(&m_vec);
        assert_eq!(decrypt_raw(sk, &word), Err(Error::InvalidCiphertext));
    }
}
