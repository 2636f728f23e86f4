//! Permutations of `{0, ..., n-1}`.

use krater_core::{Error, Prng, Result};
use zeroize::Zeroize;

use crate::vector::BitVector;

/// A permutation stored as its image table: `i -> map[i]`.
#[derive(Clone, Debug, PartialEq, Eq, Zeroize)]
pub struct Permutation {
    map: Vec<u32>,
}

impl Permutation {
    /// The identity permutation on `n` points.
    pub fn identity(n: usize) -> Self {
        Self {
            map: (0..n as u32).collect(),
        }
    }

    /// Uniformly random permutation (Fisher-Yates over rejection-sampled
    /// indices, so every permutation is equally likely).
    pub fn random<R: Prng + ?Sized>(n: usize, rng: &mut R) -> Self {
        let mut p = Self::identity(n);
        for i in (1..n).rev() {
            let j = rng.next_range(i as u64 + 1) as usize;
            p.map.swap(i, j);
        }
        p
    }

    /// Build from an image table, verifying it is a bijection.
    pub fn from_map(map: Vec<u32>) -> Result<Self> {
        let n = map.len();
        let mut seen = vec![false; n];
        for &v in &map {
            let v = v as usize;
            if v >= n || seen[v] {
                return Err(Error::Io);
            }
            seen[v] = true;
        }
        Ok(Self { map })
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Whether the permutation acts on zero points.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Image of `i`.
    #[inline]
    pub fn image(&self, i: usize) -> usize {
        self.map[i] as usize
    }

    /// The image table.
    pub fn as_slice(&self) -> &[u32] {
        &self.map
    }

    /// Swap the images of two points.
    pub(crate) fn swap(&mut self, a: usize, b: usize) {
        self.map.swap(a, b);
    }

    /// Inverse permutation.
    pub fn inverse(&self) -> Self {
        let mut inv = vec![0u32; self.map.len()];
        for (i, &v) in self.map.iter().enumerate() {
            inv[v as usize] = i as u32;
        }
        Self { map: inv }
    }

    /// Composition: `(self ∘ other)(i) = self(other(i))`.
    pub fn compose(&self, other: &Self) -> Self {
        debug_assert_eq!(self.len(), other.len());
        Self {
            map: (0..self.len())
                .map(|i| self.map[other.image(i)])
                .collect(),
        }
    }

    /// Apply to a vector: output bit i = input bit `map[i]`.
    pub fn apply(&self, v: &BitVector) -> BitVector {
        debug_assert_eq!(self.len(), v.len());
        let mut out = BitVector::zero(v.len());
        for i in 0..v.len() {
            if v.get(self.image(i)) {
                out.set(i, true);
            }
        }
        out
    }
}
