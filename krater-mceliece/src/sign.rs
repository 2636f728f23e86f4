//! One-time signing on top of the encryption engines.
//!
//! A signature is the encryption of the message digest under the pair's
//! public key; verification decrypts it with the private key and compares in
//! constant time. The trapdoor runs in the opposite direction from a real
//! signature scheme, so both operations live on the key pair, and a pair
//! used for signing must not also encrypt and should sign only once.

use krater_core::{Error, Prng, Result};
use subtle::ConstantTimeEq;

use crate::engine;
use crate::hash::digest;
use crate::keys::KeyPair;
use crate::params::Parameters;

pub(crate) fn sign<R: Prng + ?Sized>(
    params: &Parameters,
    domain_sep: &[u8],
    keypair: &KeyPair,
    msg: &[u8],
    rng: &mut R,
) -> Result<Vec<u8>> {
    let h = digest(params.digest(), msg);
    if h.len() > params.k8() {
        return Err(Error::InputTooLong {
            limit: params.k8(),
            actual: h.len(),
        });
    }
    engine::encrypt(params, domain_sep, keypair.public()?, &h, rng)
}

pub(crate) fn verify(
    params: &Parameters,
    domain_sep: &[u8],
    keypair: &KeyPair,
    msg: &[u8],
    signature: &[u8],
) -> Result<bool> {
    let h = digest(params.digest(), msg);
    let expected_len = engine::ciphertext_len(params, domain_sep, h.len());
    if signature.len() != expected_len {
        return Err(Error::InputTooLong {
            limit: expected_len,
            actual: signature.len(),
        });
    }
    match engine::decrypt(params, domain_sep, keypair.private()?, signature) {
        Ok(recovered) => {
            if recovered.len() != h.len() {
                return Ok(false);
            }
            Ok(recovered.ct_eq(&h).into())
        }
        Err(Error::InvalidCiphertext) => Ok(false),
        Err(e) => Err(e),
    }
}
