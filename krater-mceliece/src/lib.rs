//! # McEliece CCA2
//!
//! A CCA2-secure public-key cryptosystem over binary irreducible Goppa
//! codes: the classical McEliece trapdoor wrapped in one of three
//! interchangeable CCA2 conversions (Fujisaki–Okamoto, Kobara–Imai gamma,
//! Pointcheval), plus one-time signing on the same key material.
//!
//! ## Parameter Sets
//!
//! | Parameter Set | n | k | t | Plaintext cap | Block |
//! |---------------|------|------|----|---------------|-------|
//! | m=10, t=50 | 1024 | 524 | 50 | 65 bytes | 128 bytes |
//! | m=11, t=40 | 2048 | 1608 | 40 | 201 bytes | 256 bytes |
//! | m=11, t=48 | 2048 | 1520 | 48 | 190 bytes | 256 bytes |
//! | m=12, t=41 | 4096 | 3604 | 41 | 450 bytes | 512 bytes |
//! | m=12, t=48 | 4096 | 3520 | 48 | 440 bytes | 512 bytes |
//! | m=13, t=44 | 8192 | 7620 | 44 | 952 bytes | 1024 bytes |
//!
//! ## Example
//!
//! ```ignore
//! use krater_mceliece::{McEliece, Parameters};
//!
//! let cipher = McEliece::new(Parameters::named("mceliece-m11t40-fujisaki-sha256")?);
//! let mut rng = cipher.default_prng();
//! let keypair = cipher.generate_keypair(rng.as_mut())?;
//!
//! let ciphertext = cipher.encrypt(&keypair, b"attack at dawn", rng.as_mut())?;
//! let plaintext = cipher.decrypt(&keypair, &ciphertext)?;
//! assert_eq!(plaintext, b"attack at dawn");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod binpoly;
pub mod cw;
mod engine;
pub mod gf;
pub mod gfpoly;
pub mod goppa;
pub mod hash;
pub mod kdf;
mod keygen;
pub mod keys;
pub mod matrix;
pub mod params;
pub mod permutation;
pub mod pke;
pub mod rng;
mod sign;
pub mod vector;

pub use engine::Engine;
pub use hash::DigestKind;
pub use keys::{KeyPair, PrivateKey, PublicKey};
pub use krater_core::{Digest, Error, Prng, Result};
pub use params::{catalog_names, Parameters};
pub use rng::PrngKind;

/// Default Kobara–Imai domain separator.
pub const DEFAULT_DOMAIN_SEP: &[u8] = b"krater/ki/v1";

/// A configured instance of the cryptosystem.
///
/// Carries the parameter set and the Kobara–Imai domain separator; all key
/// and message operations hang off it. The instance itself holds no key
/// material and can be shared freely.
#[derive(Debug, Clone)]
pub struct McEliece {
    params: Parameters,
    domain_sep: Vec<u8>,
}

impl McEliece {
    /// Instance with the default domain separator.
    pub fn new(params: Parameters) -> Self {
        Self {
            params,
            domain_sep: DEFAULT_DOMAIN_SEP.to_vec(),
        }
    }

    /// Instance with a caller-chosen Kobara–Imai domain separator.
    ///
    /// Both ends must agree on the separator; it is public, but a mismatch
    /// makes every Kobara–Imai ciphertext undecryptable.
    pub fn with_domain_separator(params: Parameters, domain_sep: &[u8]) -> Self {
        Self {
            params,
            domain_sep: domain_sep.to_vec(),
        }
    }

    /// The parameter set.
    pub fn params(&self) -> &Parameters {
        &self.params
    }

    /// Instantiate the parameter set's default random source.
    pub fn default_prng(&self) -> Box<dyn Prng> {
        self.params.prng().instantiate()
    }

    /// Generate a key pair.
    pub fn generate_keypair<R: Prng + ?Sized>(&self, rng: &mut R) -> Result<KeyPair> {
        keygen::generate(&self.params, rng)
    }

    /// Encrypt `msg` with the pair's public half.
    ///
    /// Fails with `InputTooLong` beyond
    /// [`max_plaintext_len`](Self::max_plaintext_len) bytes.
    pub fn encrypt<R: Prng + ?Sized>(
        &self,
        keypair: &KeyPair,
        msg: &[u8],
        rng: &mut R,
    ) -> Result<Vec<u8>> {
        engine::encrypt(&self.params, &self.domain_sep, keypair.public()?, msg, rng)
    }

    /// Decrypt a ciphertext with the pair's private half.
    pub fn decrypt(&self, keypair: &KeyPair, ciphertext: &[u8]) -> Result<Vec<u8>> {
        engine::decrypt(&self.params, &self.domain_sep, keypair.private()?, ciphertext)
    }

    /// One-time signature of `msg`: the encrypted message digest.
    ///
    /// Do not reuse a pair across signing and encryption, and sign at most
    /// one message per pair.
    pub fn sign<R: Prng + ?Sized>(
        &self,
        keypair: &KeyPair,
        msg: &[u8],
        rng: &mut R,
    ) -> Result<Vec<u8>> {
        sign::sign(&self.params, &self.domain_sep, keypair, msg, rng)
    }

    /// Verify a one-time signature. Needs the private half.
    pub fn verify(&self, keypair: &KeyPair, msg: &[u8], signature: &[u8]) -> Result<bool> {
        sign::verify(&self.params, &self.domain_sep, keypair, msg, signature)
    }

    /// Ciphertext size for a `msg_len`-byte message.
    pub fn ciphertext_len(&self, msg_len: usize) -> usize {
        engine::ciphertext_len(&self.params, &self.domain_sep, msg_len)
    }

    /// Largest accepted plaintext, `floor(k/8)` bytes.
    pub fn max_plaintext_len(&self) -> usize {
        self.params.k8()
    }
}
