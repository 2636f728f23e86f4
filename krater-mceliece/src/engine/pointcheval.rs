//! Pointcheval conversion.
//!
//! Two random values: a byte-string r hashed with the message to fix the
//! error vector, and a session vector r' carried by the primitive. The
//! masked stream carries `m || r`, so decryption can recompute the hash and
//! re-check the error vector.

use krater_core::{Error, Prng, Result};

use crate::cw;
use crate::hash::digest_parts;
use crate::kdf;
use crate::keys::{PrivateKey, PublicKey};
use crate::params::Parameters;
use crate::pke;
use crate::vector::BitVector;

pub(super) fn encrypt<R: Prng + ?Sized>(
    params: &Parameters,
    pk: &PublicKey,
    msg: &[u8],
    rng: &mut R,
) -> Result<Vec<u8>> {
    let mut r = vec![0u8; params.k8()];
    rng.get_bytes(&mut r);
    let r_prime = BitVector::random(params.k(), rng);

    let h = digest_parts(params.digest(), &[msg, &r]);
    let z = cw::encode(params.n(), params.t() as usize, &h)?;

    let c1 = pke::encrypt_raw(pk, &r_prime, &z)?.to_bytes();

    let mut m_r = msg.to_vec();
    m_r.extend_from_slice(&r);
    let c2 = kdf::mask(params.digest(), &r_prime.to_bytes(), &m_r);

    let mut out = c1;
    out.extend_from_slice(&c2);
    Ok(out)
}

pub(super) fn decrypt(params: &Parameters, sk: &PrivateKey, ciphertext: &[u8]) -> Result<Vec<u8>> {
    let n8 = params.n8();
    let k8 = params.k8();
    if ciphertext.len() < n8 + k8 || ciphertext.len() - n8 - k8 > k8 {
        return Err(Error::InvalidCiphertext);
    }
    let (c1, c2) = ciphertext.split_at(n8);

    let c1 = BitVector::from_bytes(c1, params.n()).map_err(|_| Error::InvalidCiphertext)?;
    let (r_prime, z) = pke::decrypt_raw(sk, &c1)?;

    let m_r = kdf::mask(params.digest(), &r_prime.to_bytes(), c2);
    let msg_len = m_r.len() - k8;
    let (msg, r) = m_r.split_at(msg_len);

    let h = digest_parts(params.digest(), &[msg, r]);
    let expected_z = cw::encode(params.n(), params.t() as usize, &h)?;
    if expected_z != z {
        return Err(Error::InvalidCiphertext);
    }
    Ok(msg.to_vec())
}
