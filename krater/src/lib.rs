//! # Krater
//!
//! Code-based public-key cryptography over binary irreducible Goppa codes.
//!
//! ## Supported Schemes
//!
//! - **McEliece CCA2**: the classical trapdoor behind one of three CCA2
//!   conversions (Fujisaki–Okamoto, Kobara–Imai gamma, Pointcheval), with
//!   one-time signing on the same key material.
//!
//! ## Example
//!
//! ```ignore
//! use krater::mceliece::{McEliece, Parameters};
//!
//! let cipher = McEliece::new(Parameters::named("mceliece-m11t40-fujisaki-sha256")?);
//! let mut rng = cipher.default_prng();
//! let keypair = cipher.generate_keypair(rng.as_mut())?;
//!
//! let ct = cipher.encrypt(&keypair, b"hello", rng.as_mut())?;
//! assert_eq!(cipher.decrypt(&keypair, &ct)?, b"hello");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub use krater_core::{Digest, Error, Prng, Result};

/// Core traits for external hash and randomness backends.
pub mod traits {
    pub use krater_core::{Digest, Prng};
}

/// The McEliece CCA2 cryptosystem.
pub mod mceliece {
    pub use krater_mceliece::*;
}
