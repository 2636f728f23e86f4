//! # Krater Core
//!
//! Core error types and trait seams for the Krater code-based cryptography
//! library.
//!
//! This crate provides:
//! - Common error types
//! - The [`Digest`] and [`Prng`] interfaces the cryptosystem consumes
//! - Secure memory handling with zeroize integration

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

mod error;
mod traits;

pub use error::{Error, Result};
pub use traits::{Digest, Prng};

/// Re-export zeroize for convenience.
pub use zeroize::{Zeroize, ZeroizeOnDrop};

/// Re-export subtle for constant-time operations.
pub use subtle;
