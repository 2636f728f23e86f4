//! Random-source implementations behind the [`Prng`] seam.
//!
//! Key generation and encryption only ever see the byte-oriented [`Prng`]
//! interface; which source backs it is a parameter-set choice (or a caller
//! override, e.g. a seeded source for reproducible key generation).

use krater_core::{Error, Prng, Result};
use rand_chacha::ChaCha20Rng;
use rand_core::{RngCore, SeedableRng};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Selector for the default random source of a parameter set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrngKind {
    /// Operating-system-backed CSPRNG.
    OsEntropy,
    /// ChaCha20 stream generator, seeded from the OS unless a seed is given.
    ChaCha20,
}

impl PrngKind {
    /// Wire ordinal of this selector.
    pub fn ordinal(self) -> u32 {
        match self {
            PrngKind::OsEntropy => 1,
            PrngKind::ChaCha20 => 2,
        }
    }

    /// Parse a wire ordinal.
    pub fn from_ordinal(v: u32) -> Result<Self> {
        match v {
            1 => Ok(PrngKind::OsEntropy),
            2 => Ok(PrngKind::ChaCha20),
            _ => Err(Error::InvalidParameter),
        }
    }

    /// Instantiate the selected source, seeded from the OS where one is
    /// needed.
    pub fn instantiate(self) -> Box<dyn Prng> {
        match self {
            PrngKind::OsEntropy => Box::new(OsEntropy::new()),
            PrngKind::ChaCha20 => {
                let mut seed = [0u8; 32];
                OsEntropy::new().get_bytes(&mut seed);
                let prng = SeededPrng::from_seed(seed);
                seed.zeroize();
                Box::new(prng)
            }
        }
    }
}

/// Operating-system entropy via the process CSPRNG.
pub struct OsEntropy {
    rng: rand::rngs::ThreadRng,
}

impl OsEntropy {
    /// Handle to the process CSPRNG.
    pub fn new() -> Self {
        Self { rng: rand::rng() }
    }
}

impl Default for OsEntropy {
    fn default() -> Self {
        Self::new()
    }
}

impl Prng for OsEntropy {
    fn get_bytes(&mut self, out: &mut [u8]) {
        self.rng.fill_bytes(out);
    }
}

/// Deterministic ChaCha20 generator from a 32-byte seed.
///
/// The retained seed copy is wiped on drop, along with everything the
/// generator derived from it that we control.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct SeededPrng {
    seed: [u8; 32],
    #[zeroize(skip)]
    rng: ChaCha20Rng,
}

impl SeededPrng {
    /// Build from a 32-byte seed. Identical seeds give identical output
    /// streams.
    pub fn from_seed(seed: [u8; 32]) -> Self {
        Self {
            seed,
            rng: ChaCha20Rng::from_seed(seed),
        }
    }

    /// Restart the stream from the stored seed.
    pub fn reset(&mut self) {
        self.rng = ChaCha20Rng::from_seed(self.seed);
    }

    /// Replace the seed and restart.
    pub fn reseed(&mut self, seed: [u8; 32]) {
        self.seed.zeroize();
        self.seed = seed;
        self.reset();
    }
}

impl Prng for SeededPrng {
    fn get_bytes(&mut self, out: &mut [u8]) {
        self.rng.fill_bytes(out);
    }
}

/// Adapter exposing any `rand_core` CSPRNG through the [`Prng`] seam.
pub struct RngAdapter<R>(
    /// The wrapped generator.
    pub R,
);

impl<R: RngCore + rand_core::CryptoRng> Prng for RngAdapter<R> {
    fn get_bytes(&mut self, out: &mut [u8]) {
        self.0.fill_bytes(out);
    }
}
