//! Error types for Krater cryptographic operations.

use core::fmt;

/// Result type alias using [`Error`].
pub type Result<T> = core::result::Result<T, Error>;

/// Errors that can occur during cryptographic operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// A parameter set was rejected: extension degree out of range, error
    /// capacity out of range, unrecognized engine/digest/PRNG selector, or a
    /// reducible field polynomial.
    InvalidParameter,

    /// Key material is inconsistent: wrong key half for the operation, or
    /// dimensions that disagree with the parameter set.
    InvalidKey,

    /// A ciphertext was rejected. Decoding failures, padding-consistency
    /// failures, and error-weight mismatches are deliberately not
    /// distinguished.
    InvalidCiphertext,

    /// Input exceeds what the parameter set can carry.
    InputTooLong {
        /// Maximum length in bytes.
        limit: usize,
        /// Actual length provided.
        actual: usize,
    },

    /// Serialization read or write failure (truncated or malformed buffer).
    Io,

    /// Operation invoked before the required key material was set.
    Uninitialized,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidParameter => write!(f, "invalid parameter set"),
            Error::InvalidKey => write!(f, "invalid key material"),
            Error::InvalidCiphertext => write!(f, "invalid ciphertext"),
            Error::InputTooLong { limit, actual } => {
                write!(f, "input too long: limit {limit}, got {actual}")
            }
            Error::Io => write!(f, "serialization failure"),
            Error::Uninitialized => write!(f, "key material not set"),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_stable() {
        assert_eq!(Error::InvalidCiphertext.to_string(), "invalid ciphertext");
        assert_eq!(
            Error::InputTooLong { limit: 8, actual: 9 }.to_string(),
            "input too long: limit 8, got 9"
        );
    }

    #[test]
    fn errors_are_comparable() {
        assert_eq!(Error::Io, Error::Io);
        assert_ne!(Error::InvalidKey, Error::InvalidParameter);
    }
}
