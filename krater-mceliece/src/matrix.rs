//! Dense matrices over GF(2), row-major with packed `u64` rows.
//!
//! Bit order matches [`BitVector`]: within a row, column j lives at word
//! j/64, bit j%64. Bits past `cols` in each row are kept zero. The byte
//! codec is the wire layout used by public and private keys: `rows` and
//! `cols` as little-endian i32, then `ceil(cols/8)` LSB-first bytes per row.

use krater_core::{Error, Result};
use zeroize::Zeroize;

use crate::permutation::Permutation;
use crate::vector::BitVector;

/// A dense GF(2) matrix.
#[derive(Clone, Debug, PartialEq, Eq, Zeroize)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    row_words: usize,
    words: Vec<u64>,
}

impl Matrix {
    /// All-zero matrix.
    pub fn zero(rows: usize, cols: usize) -> Self {
        let row_words = cols.div_ceil(64);
        Self {
            rows,
            cols,
            row_words,
            words: vec![0u64; rows * row_words],
        }
    }

    /// Identity matrix.
    pub fn identity(n: usize) -> Self {
        let mut m = Self::zero(n, n);
        for i in 0..n {
            m.set(i, i, true);
        }
        m
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Bit at `(r, c)`.
    #[inline]
    pub fn get(&self, r: usize, c: usize) -> bool {
        debug_assert!(r < self.rows && c < self.cols);
        (self.words[r * self.row_words + c / 64] >> (c % 64)) & 1 != 0
    }

    /// Set bit `(r, c)`.
    #[inline]
    pub fn set(&mut self, r: usize, c: usize, value: bool) {
        debug_assert!(r < self.rows && c < self.cols);
        let idx = r * self.row_words + c / 64;
        let mask = 1u64 << (c % 64);
        if value {
            self.words[idx] |= mask;
        } else {
            self.words[idx] &= !mask;
        }
    }

    /// XOR row `src` into row `dst`.
    pub fn xor_rows(&mut self, dst: usize, src: usize) {
        debug_assert!(dst != src);
        let (d, s) = (dst * self.row_words, src * self.row_words);
        for i in 0..self.row_words {
            let v = self.words[s + i];
            self.words[d + i] ^= v;
        }
    }

    /// Swap two rows.
    pub fn swap_rows(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        for i in 0..self.row_words {
            self.words.swap(a * self.row_words + i, b * self.row_words + i);
        }
    }

    /// Swap two columns.
    pub fn swap_cols(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        for r in 0..self.rows {
            let (va, vb) = (self.get(r, a), self.get(r, b));
            self.set(r, a, vb);
            self.set(r, b, va);
        }
    }

    /// Row `r` as a vector.
    pub fn row(&self, r: usize) -> BitVector {
        let mut v = BitVector::zero(self.cols);
        for c in 0..self.cols {
            if self.get(r, c) {
                v.set(c, true);
            }
        }
        v
    }

    /// Row-vector product `v * M` (v has `rows` bits, result `cols` bits).
    ///
    /// XOR of the rows selected by the set bits of `v`.
    pub fn mul_left(&self, v: &BitVector) -> BitVector {
        debug_assert_eq!(v.len(), self.rows);
        let mut acc = vec![0u64; self.row_words];
        for r in v.support() {
            let base = r * self.row_words;
            for (a, w) in acc.iter_mut().zip(&self.words[base..base + self.row_words]) {
                *a ^= w;
            }
        }
        let mut out = BitVector::zero(self.cols);
        for (i, w) in acc.into_iter().enumerate() {
            for b in 0..64 {
                let c = i * 64 + b;
                if c < self.cols && (w >> b) & 1 != 0 {
                    out.set(c, true);
                }
            }
        }
        out
    }

    /// Matrix-vector product `M * v` (v has `cols` bits, result `rows` bits).
    ///
    /// Each output bit is the parity of a row AND the vector.
    pub fn mul_right(&self, v: &BitVector) -> BitVector {
        debug_assert_eq!(v.len(), self.cols);
        let vw = v.words();
        let mut out = BitVector::zero(self.rows);
        for r in 0..self.rows {
            let base = r * self.row_words;
            let mut parity = 0u32;
            for (w, x) in self.words[base..base + self.row_words].iter().zip(vw) {
                parity ^= (w & x).count_ones();
            }
            if parity & 1 != 0 {
                out.set(r, true);
            }
        }
        out
    }

    /// Transpose.
    pub fn transpose(&self) -> Self {
        let mut t = Self::zero(self.cols, self.rows);
        for r in 0..self.rows {
            for c in 0..self.cols {
                if self.get(r, c) {
                    t.set(c, r, true);
                }
            }
        }
        t
    }

    /// Apply a column permutation: result column j = self column `perm[j]`.
    pub fn permute_cols(&self, perm: &Permutation) -> Self {
        debug_assert_eq!(perm.len(), self.cols);
        let mut out = Self::zero(self.rows, self.cols);
        for r in 0..self.rows {
            for c in 0..self.cols {
                if self.get(r, perm.image(c)) {
                    out.set(r, c, true);
                }
            }
        }
        out
    }

    /// Gaussian elimination to systematic form with column swaps.
    ///
    /// Finds a column permutation pi such that permuting this matrix's
    /// columns by pi gives `[I_rows | R]`, and returns `(R, pi)` where `R`
    /// is `rows x (cols - rows)`. Fails when the matrix has rank below
    /// `rows` (the caller retries key generation with fresh material).
    pub fn systematic_reduce(&self) -> Result<(Self, Permutation)> {
        if self.rows > self.cols {
            return Err(Error::InvalidParameter);
        }
        let mut work = self.clone();
        let mut perm = Permutation::identity(self.cols);

        for r in 0..work.rows {
            // pivot search: first column (from r) with a one in rows >= r
            let mut pivot = None;
            'search: for c in r..work.cols {
                for i in r..work.rows {
                    if work.get(i, c) {
                        pivot = Some((i, c));
                        break 'search;
                    }
                }
            }
            let Some((pr, pc)) = pivot else {
                return Err(Error::InvalidKey);
            };
            if pc != r {
                work.swap_cols(r, pc);
                perm.swap(r, pc);
            }
            work.swap_rows(r, pr);
            for i in 0..work.rows {
                if i != r && work.get(i, r) {
                    work.xor_rows(i, r);
                }
            }
        }

        let k = work.cols - work.rows;
        let mut right = Self::zero(work.rows, k);
        for r in 0..work.rows {
            for c in 0..k {
                if work.get(r, work.rows + c) {
                    right.set(r, c, true);
                }
            }
        }
        Ok((right, perm))
    }

    /// Wire encoding: `rows` (i32 LE) || `cols` (i32 LE) || row bytes.
    pub fn encode(&self) -> Vec<u8> {
        let row_bytes = self.cols.div_ceil(8);
        let mut out = Vec::with_capacity(8 + self.rows * row_bytes);
        out.extend_from_slice(&(self.rows as i32).to_le_bytes());
        out.extend_from_slice(&(self.cols as i32).to_le_bytes());
        for r in 0..self.rows {
            out.extend_from_slice(&self.row(r).to_bytes());
        }
        out
    }

    /// Parse the wire encoding, consuming exactly its own bytes.
    pub fn decode(buf: &[u8]) -> Result<(Self, usize)> {
        if buf.len() < 8 {
            return Err(Error::Io);
        }
        let rows = i32::from_le_bytes(buf[0..4].try_into().expect("sized")) as i64;
        let cols = i32::from_le_bytes(buf[4..8].try_into().expect("sized")) as i64;
        if rows < 0 || cols <= 0 {
            return Err(Error::Io);
        }
        let (rows, cols) = (rows as usize, cols as usize);
        let row_bytes = cols.div_ceil(8);
        let total = 8 + rows * row_bytes;
        if buf.len() < total {
            return Err(Error::Io);
        }
        let mut m = Self::zero(rows, cols);
        for r in 0..rows {
            let start = 8 + r * row_bytes;
            let row = BitVector::from_bytes(&buf[start..start + row_bytes], cols)?;
            for c in row.support() {
                m.set(r, c, true);
            }
        }
        Ok((m, total))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::SeededPrng;
    use krater_core::Prng;

    fn random_matrix(rows: usize, cols: usize, rng: &mut SeededPrng) -> Matrix {
        let mut m = Matrix::zero(rows, cols);
        for r in 0..rows {
            for c in 0..cols {
                if rng.next_range(2) == 1 {
                    m.set(r, c, true);
                }
            }
        }
        m
    }

    #[test]
    fn identity_row_ops() {
        let mut m = Matrix::identity(4);
        m.xor_rows(0, 1);
        assert!(m.get(0, 0) && m.get(0, 1));
        m.swap_rows(0, 3);
        assert!(m.get(3, 1));
        m.swap_cols(0, 2);
        assert!(m.get(2, 0));
    }

    #[test]
    fn transpose_is_involutive() {
        let mut rng = SeededPrng::from_seed([11u8; 32]);
        let m = random_matrix(13, 37, &mut rng);
        assert_eq!(m.transpose().transpose(), m);
        assert!(m.transpose().get(5, 3) == m.get(3, 5));
    }

    #[test]
    fn mul_left_matches_bitwise_definition() {
        let mut rng = SeededPrng::from_seed([12u8; 32]);
        let m = random_matrix(10, 20, &mut rng);
        let v = BitVector::random(10, &mut rng);
        let out = m.mul_left(&v);
        for c in 0..20 {
            let mut bit = false;
            for r in 0..10 {
                bit ^= v.get(r) & m.get(r, c);
            }
            assert_eq!(out.get(c), bit);
        }
    }

    #[test]
    fn mul_right_matches_transposed_mul_left() {
        let mut rng = SeededPrng::from_seed([13u8; 32]);
        let m = random_matrix(9, 30, &mut rng);
        let v = BitVector::random(30, &mut rng);
        assert_eq!(m.mul_right(&v), m.transpose().mul_left(&v));
    }

    #[test]
    fn systematic_reduce_identity_block() {
        let mut rng = SeededPrng::from_seed([14u8; 32]);
        // a wide random matrix is full-rank with overwhelming probability
        let m = random_matrix(20, 60, &mut rng);
        let (right, perm) = m.systematic_reduce().unwrap();
        assert_eq!(right.rows(), 20);
        assert_eq!(right.cols(), 40);

        // permuting the original by pi and eliminating must give [I | R];
        // check by verifying every original row is in the row space: the
        // reduced form shares the row space, so H_perm * G^T = 0 where
        // G = [R^T | I].
        let permuted = m.permute_cols(&perm);
        let k = 40;
        let gt = {
            // G^T: (rows+k) x k, top block R, bottom identity
            let mut gt = Matrix::zero(60, k);
            for r in 0..20 {
                for c in 0..k {
                    if right.get(r, c) {
                        gt.set(r, c, true);
                    }
                }
            }
            for c in 0..k {
                gt.set(20 + c, c, true);
            }
            gt
        };
        for c in 0..k {
            let mut col = BitVector::zero(60);
            for r in 0..60 {
                if gt.get(r, c) {
                    col.set(r, true);
                }
            }
            assert_eq!(permuted.mul_right(&col).weight(), 0, "column {c}");
        }
    }

    #[test]
    fn systematic_reduce_rejects_singular() {
        // two identical rows can never reach rank 2
        let mut m = Matrix::zero(2, 4);
        m.set(0, 1, true);
        m.set(1, 1, true);
        assert!(m.systematic_reduce().is_err());
    }

    #[test]
    fn encode_decode_roundtrip() {
        let mut rng = SeededPrng::from_seed([15u8; 32]);
        for (r, c) in [(1usize, 1usize), (5, 9), (20, 60), (7, 64)] {
            let m = random_matrix(r, c, &mut rng);
            let enc = m.encode();
            let (dec, used) = Matrix::decode(&enc).unwrap();
            assert_eq!(used, enc.len());
            assert_eq!(dec, m);
        }
    }

    #[test]
    fn decode_rejects_truncation() {
        let m = Matrix::identity(9);
        let enc = m.encode();
        assert!(Matrix::decode(&enc[..enc.len() - 1]).is_err());
        assert!(Matrix::decode(&enc[..4]).is_err());
    }
}
