//! Fujisaki–Okamoto conversion.
//!
//! The random session vector r is the primitive's plaintext; the error
//! vector is derived from `H(r || m)`, and the message rides in a masked
//! stream keyed by r. Decryption re-derives the error vector and rejects on
//! any mismatch.

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
    let r = BitVector::random(params.k(), rng);
    let r_bytes = r.to_bytes();

    let hrm = digest_parts(params.digest(), &[&r_bytes, msg]);
    let z = cw::encode(params.n(), params.t() as usize, &hrm)?;

    let c1 = pke::encrypt_raw(pk, &r, &z)?.to_bytes();
    let c2 = kdf::mask(params.digest(), &r_bytes, msg);

    let mut out = c1;
    out.extend_from_slice(&c2);
    Ok(out)
}

pub(super) fn decrypt(params: &Parameters, sk: &PrivateKey, ciphertext: &[u8]) -> Result<Vec<u8>> {
    let n8 = params.n8();
    if ciphertext.len() < n8 || ciphertext.len() - n8 > params.k8() {
        return Err(Error::InvalidCiphertext);
    }
    let (c1, c2) = ciphertext.split_at(n8);

    let c1 = BitVector::from_bytes(c1, params.n()).map_err(|_| Error::InvalidCiphertext)?;
    let (r, z) = pke::decrypt_raw(sk, &c1)?;
    let r_bytes = r.to_bytes();

    let msg = kdf::mask(params.digest(), &r_bytes, c2);

    let hrm = digest_parts(params.digest(), &[&r_bytes, &msg]);
    let expected_z = cw::encode(params.n(), params.t() as usize, &hrm)?;
    if expected_z != z {
        return Err(Error::InvalidCiphertext);
    }
    Ok(msg)
}
