//! The CCA2 conversion engines.
//!
//! Three interchangeable message encodings wrap the one-way primitive; which
//! one runs is a parameter-set choice, dispatched once here. All three share
//! the pattern of deriving the error vector from a hash through the
//! constant-weight codec and re-deriving it on decryption for the
//! consistency check.

mod fujisaki;
mod kobara_imai;
mod pointcheval;

use krater_core::{Error, Prng, Result};

use crate::keys::{PrivateKey, PublicKey};
use crate::params::Parameters;

pub(crate) use kobara_imai::lengths as kobara_imai_lengths;

/// CCA2 conversion selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Engine {
    /// Fujisaki–Okamoto conversion.
    Fujisaki,
    /// Kobara–Imai gamma conversion.
    KobaraImai,
    /// Pointcheval conversion.
    Pointcheval,
}

impl Engine {
    /// Wire ordinal of this selector.
    pub fn ordinal(self) -> u32 {
        match self {
            Engine::Fujisaki => 1,
            Engine::KobaraImai => 2,
            Engine::Pointcheval => 3,
        }
    }

    /// Parse a wire ordinal.
    pub fn from_ordinal(v: u32) -> Result<Self> {
        match v {
            1 => Ok(Engine::Fujisaki),
            2 => Ok(Engine::KobaraImai),
            3 => Ok(Engine::Pointcheval),
            _ => Err(Error::InvalidParameter),
        }
    }
}

/// Encrypt `msg` under the parameter set's engine.
pub(crate) fn encrypt<R: Prng + ?Sized>(
    params: &Parameters,
    domain_sep: &[u8],
    pk: &PublicKey,
    msg: &[u8],
    rng: &mut R,
) -> Result<Vec<u8>> {
    check_public(params, pk)?;
    if msg.len() > params.k8() {
        return Err(Error::InputTooLong {
            limit: params.k8(),
            actual: msg.len(),
        });
    }
    match params.engine() {
        Engine::Fujisaki => fujisaki::encrypt(params, pk, msg, rng),
        Engine::KobaraImai => kobara_imai::encrypt(params, domain_sep, pk, msg, rng),
        Engine::Pointcheval => pointcheval::encrypt(params, pk, msg, rng),
    }
}

/// Decrypt a ciphertext under the parameter set's engine.
pub(crate) fn decrypt(
    params: &Parameters,
    domain_sep: &[u8],
    sk: &PrivateKey,
    ciphertext: &[u8],
) -> Result<Vec<u8>> {
    check_private(params, sk)?;
    match params.engine() {
        Engine::Fujisaki => fujisaki::decrypt(params, sk, ciphertext),
        Engine::KobaraImai => kobara_imai::decrypt(params, domain_sep, sk, ciphertext),
        Engine::Pointcheval => pointcheval::decrypt(params, sk, ciphertext),
    }
}

/// Ciphertext length for a message of `msg_len` bytes.
pub(crate) fn ciphertext_len(params: &Parameters, domain_sep: &[u8], msg_len: usize) -> usize {
    match params.engine() {
        Engine::Fujisaki => params.n8() + msg_len,
        Engine::Pointcheval => params.n8() + msg_len + params.k8(),
        Engine::KobaraImai => {
            let l = kobara_imai_lengths(params, domain_sep.len(), msg_len);
            l.c6 + params.n8()
        }
    }
}

fn check_public(params: &Parameters, pk: &PublicKey) -> Result<()> {
    if pk.n() != params.n() || pk.t() != params.t() as usize || pk.k() != params.k() {
        return Err(Error::InvalidKey);
    }
    Ok(())
}

fn check_private(params: &Parameters, sk: &PrivateKey) -> Result<()> {
    if sk.n() != params.n() || sk.t() != params.t() as usize || sk.k() != params.k() {
        return Err(Error::InvalidKey);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordinals_roundtrip() {
        for e in [Engine::Fujisaki, Engine::KobaraImai, Engine::Pointcheval] {
            assert_eq!(Engine::from_ordinal(e.ordinal()).unwrap(), e);
        }
        assert!(Engine::from_ordinal(0).is_err());
        assert!(Engine::from_ordinal(4).is_err());
    }
}
