//! Key material and its wire formats.
//!
//! The public key is only the short systematic generator; the private key
//! retains the whole Goppa structure (field, Goppa polynomial, column
//! permutation, canonical parity check, square-root table). Private keys are
//! wiped on drop; public keys are not secret and are not.

use krater_core::{Error, Result};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::gf::Gf2m;
use crate::gfpoly::GfPoly;
use crate::matrix::Matrix;
use crate::permutation::Permutation;
use crate::vector::BitVector;

/// Public encryption key: `(n, t, G_short)` with `G_short` the k x (m*t)
/// block of the systematic generator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicKey {
    n: usize,
    t: usize,
    g_short: Matrix,
}

impl PublicKey {
    pub(crate) fn from_parts(n: usize, t: usize, g_short: Matrix) -> Result<Self> {
        let key = Self { n, t, g_short };
        key.check()?;
        Ok(key)
    }

    fn check(&self) -> Result<()> {
        if !self.n.is_power_of_two() || self.n < 2 {
            return Err(Error::InvalidKey);
        }
        let m = self.n.trailing_zeros() as usize;
        let mt = m * self.t;
        if mt >= self.n
            || self.g_short.rows() != self.n - mt
            || self.g_short.cols() != mt
        {
            return Err(Error::InvalidKey);
        }
        Ok(())
    }

    /// Code length n.
    pub fn n(&self) -> usize {
        self.n
    }

    /// Error weight t.
    pub fn t(&self) -> usize {
        self.t
    }

    /// Code dimension k.
    pub fn k(&self) -> usize {
        self.g_short.rows()
    }

    /// The short generator block.
    pub(crate) fn generator(&self) -> &Matrix {
        &self.g_short
    }

    /// Wire encoding: `n` (i32 LE) || `t` (i32 LE) || matrix.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::new();
        out.extend_from_slice(&(self.n as i32).to_le_bytes());
        out.extend_from_slice(&(self.t as i32).to_le_bytes());
        out.extend_from_slice(&self.g_short.encode());
        out
    }

    /// Parse the wire encoding.
    pub fn from_bytes(buf: &[u8]) -> Result<Self> {
        let mut r = Reader::new(buf);
        let n = r.take_i32()?;
        let t = r.take_i32()?;
        let (g_short, used) = Matrix::decode(r.rest())?;
        r.advance(used)?;
        r.finish()?;
        Self::from_parts(n, t, g_short)
    }
}

/// Private decryption key.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct PrivateKey {
    n: usize,
    k: usize,
    field: Gf2m,
    goppa: GfPoly,
    perm: Permutation,
    h: Matrix,
    qinv: Vec<GfPoly>,
}

impl PrivateKey {
    pub(crate) fn from_parts(
        n: usize,
        k: usize,
        field: Gf2m,
        goppa: GfPoly,
        perm: Permutation,
        h: Matrix,
        qinv: Vec<GfPoly>,
    ) -> Result<Self> {
        let key = Self {
            n,
            k,
            field,
            goppa,
            perm,
            h,
            qinv,
        };
        key.check()?;
        Ok(key)
    }

    fn check(&self) -> Result<()> {
        let t = self.goppa.degree();
        if t < 2 {
            return Err(Error::InvalidKey);
        }
        let t = t as usize;
        let m = self.field.degree() as usize;
        if self.n != self.field.size() as usize
            || self.k + m * t != self.n
            || self.perm.len() != self.n
            || self.h.rows() != m * t
            || self.h.cols() != self.n
            || self.qinv.len() != t
            || self.goppa.lead() != 1
        {
            return Err(Error::InvalidKey);
        }
        Ok(())
    }

    /// Code length n.
    pub fn n(&self) -> usize {
        self.n
    }

    /// Code dimension k.
    pub fn k(&self) -> usize {
        self.k
    }

    /// Error weight t.
    pub fn t(&self) -> usize {
        self.goppa.degree() as usize
    }

    pub(crate) fn field(&self) -> &Gf2m {
        &self.field
    }

    pub(crate) fn goppa(&self) -> &GfPoly {
        &self.goppa
    }

    pub(crate) fn perm(&self) -> &Permutation {
        &self.perm
    }

    pub(crate) fn h(&self) -> &Matrix {
        &self.h
    }

    pub(crate) fn qinv(&self) -> &[GfPoly] {
        &self.qinv
    }

    /// Wire encoding:
    /// `n || k || field_poly(4) || len(gp) || gp || len(p) || p || len(h) || h
    ///  || qcount || (len(q_i) || q_i)*`, all integers little-endian 32-bit.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::new();
        out.extend_from_slice(&(self.n as i32).to_le_bytes());
        out.extend_from_slice(&(self.k as i32).to_le_bytes());
        out.extend_from_slice(&self.field.field_poly().to_le_bytes());

        let gp = poly_bytes(&self.goppa);
        out.extend_from_slice(&(gp.len() as u32).to_le_bytes());
        out.extend_from_slice(&gp);

        let p: Vec<u8> = self
            .perm
            .as_slice()
            .iter()
            .flat_map(|&v| v.to_le_bytes())
            .collect();
        out.extend_from_slice(&(p.len() as u32).to_le_bytes());
        out.extend_from_slice(&p);

        let h = self.h.encode();
        out.extend_from_slice(&(h.len() as u32).to_le_bytes());
        out.extend_from_slice(&h);

        out.extend_from_slice(&(self.qinv.len() as u32).to_le_bytes());
        for q in &self.qinv {
            let qb = poly_bytes(q);
            out.extend_from_slice(&(qb.len() as u32).to_le_bytes());
            out.extend_from_slice(&qb);
        }
        out
    }

    /// Parse the wire encoding, rebuilding the field tables from the stored
    /// polynomial.
    pub fn from_bytes(buf: &[u8]) -> Result<Self> {
        let mut r = Reader::new(buf);
        let n = r.take_i32()?;
        let k = r.take_i32()?;
        let field_poly = r.take_u32()?;
        if !n.is_power_of_two() || n < 2 {
            return Err(Error::InvalidKey);
        }
        let m = n.trailing_zeros();
        let field = Gf2m::new(m, field_poly).map_err(|_| Error::InvalidKey)?;

        let gp_len = r.take_u32()? as usize;
        let goppa = poly_from_bytes(r.take(gp_len)?)?;

        let p_len = r.take_u32()? as usize;
        let p_bytes = r.take(p_len)?;
        if p_len % 4 != 0 {
            return Err(Error::Io);
        }
        let map: Vec<u32> = p_bytes
            .chunks_exact(4)
            .map(|c| u32::from_le_bytes(c.try_into().expect("sized")))
            .collect();
        let perm = Permutation::from_map(map)?;

        let h_len = r.take_u32()? as usize;
        let h_bytes = r.take(h_len)?;
        let (h, used) = Matrix::decode(h_bytes)?;
        if used != h_len {
            return Err(Error::Io);
        }

        let q_count = r.take_u32()? as usize;
        if q_count > n {
            return Err(Error::Io);
        }
        let mut qinv = Vec::with_capacity(q_count);
        for _ in 0..q_count {
            let q_len = r.take_u32()? as usize;
            qinv.push(poly_from_bytes(r.take(q_len)?)?);
        }
        r.finish()?;

        Self::from_parts(n, k, field, goppa, perm, h, qinv)
    }
}

impl core::fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PrivateKey")
            .field("n", &self.n)
            .field("k", &self.k)
            .field("t", &self.t())
            .finish_non_exhaustive()
    }
}

/// A key pair, either half optional.
///
/// Encryption and signing need the public half, decryption and verification
/// the private one; asking for a missing half fails with `Uninitialized`.
#[derive(Debug)]
pub struct KeyPair {
    public: Option<PublicKey>,
    private: Option<PrivateKey>,
}

impl KeyPair {
    /// Pair both halves.
    pub fn new(public: PublicKey, private: PrivateKey) -> Self {
        Self {
            public: Some(public),
            private: Some(private),
        }
    }

    /// Public half only (encrypt / sign).
    pub fn from_public(public: PublicKey) -> Self {
        Self {
            public: Some(public),
            private: None,
        }
    }

    /// Private half only (decrypt / verify).
    pub fn from_private(private: PrivateKey) -> Self {
        Self {
            public: None,
            private: Some(private),
        }
    }

    /// The public half.
    pub fn public(&self) -> Result<&PublicKey> {
        self.public.as_ref().ok_or(Error::Uninitialized)
    }

    /// The private half.
    pub fn private(&self) -> Result<&PrivateKey> {
        self.private.as_ref().ok_or(Error::Uninitialized)
    }
}

/// Recover the message block embedded in the systematic part of a raw
/// codeword (the last k bits).
pub(crate) fn systematic_part(word: &BitVector, k: usize) -> BitVector {
    word.slice(word.len() - k, k)
}

fn poly_bytes(p: &GfPoly) -> Vec<u8> {
    p.coeffs().iter().flat_map(|&c| c.to_le_bytes()).collect()
}

fn poly_from_bytes(bytes: &[u8]) -> Result<GfPoly> {
    if bytes.len() % 2 != 0 {
        return Err(Error::Io);
    }
    Ok(GfPoly::from_coeffs(
        bytes
            .chunks_exact(2)
            .map(|c| u16::from_le_bytes(c.try_into().expect("sized")))
            .collect(),
    ))
}

/// Little cursor over a wire buffer.
struct Reader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    fn take(&mut self, len: usize) -> Result<&'a [u8]> {
        if self.buf.len() - self.pos < len {
            return Err(Error::Io);
        }
        let out = &self.buf[self.pos..self.pos + len];
        self.pos += len;
        Ok(out)
    }

    fn take_u32(&mut self) -> Result<u32> {
        Ok(u32::from_le_bytes(self.take(4)?.try_into().expect("sized")))
    }

    fn take_i32(&mut self) -> Result<usize> {
        let v = self.take_u32()? as i32;
        if v < 0 {
            return Err(Error::Io);
        }
        Ok(v as usize)
    }

    fn rest(&self) -> &'a [u8] {
        &self.buf[self.pos..]
    }

    fn advance(&mut self, len: usize) -> Result<()> {
        self.take(len).map(|_| ())
    }

    fn finish(&self) -> Result<()> {
        if self.pos == self.buf.len() {
            Ok(())
        } else {
            Err(Error::Io)
        }
    }
}
