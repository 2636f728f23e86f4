//! Polynomials over GF(2^m).
//!
//! Coefficients are field elements indexed by degree, kept canonical (no
//! trailing zeros; the zero polynomial has no coefficients). The field is
//! passed into each operation rather than stored, so polynomials stay plain
//! data and can live inside keys.

use krater_core::{Error, Prng, Result};
use zeroize::Zeroize;

use crate::gf::Gf2m;

/// A polynomial over GF(2^m).
#[derive(Clone, Debug, PartialEq, Eq, Zeroize)]
pub struct GfPoly {
    coeffs: Vec<u16>,
}

impl GfPoly {
    /// The zero polynomial.
    pub fn zero() -> Self {
        Self { coeffs: Vec::new() }
    }

    /// The constant polynomial 1.
    pub fn one() -> Self {
        Self { coeffs: vec![1] }
    }

    /// The monomial x.
    pub fn x() -> Self {
        Self { coeffs: vec![0, 1] }
    }

    /// Build from coefficients (index = degree), normalizing trailing zeros.
    pub fn from_coeffs(mut coeffs: Vec<u16>) -> Self {
        while coeffs.last() == Some(&0) {
            coeffs.pop();
        }
        Self { coeffs }
    }

    /// Degree, or -1 for the zero polynomial.
    pub fn degree(&self) -> i32 {
        self.coeffs.len() as i32 - 1
    }

    /// Whether this is the zero polynomial.
    pub fn is_zero(&self) -> bool {
        self.coeffs.is_empty()
    }

    /// Coefficient of x^i (0 beyond the stored degree).
    pub fn coeff(&self, i: usize) -> u16 {
        self.coeffs.get(i).copied().unwrap_or(0)
    }

    /// Leading coefficient (0 for the zero polynomial).
    pub fn lead(&self) -> u16 {
        self.coeffs.last().copied().unwrap_or(0)
    }

    /// Coefficients, index = degree.
    pub fn coeffs(&self) -> &[u16] {
        &self.coeffs
    }

    /// Sum (XOR of matching coefficients).
    pub fn add(&self, other: &Self) -> Self {
        let n = self.coeffs.len().max(other.coeffs.len());
        let mut out = vec![0u16; n];
        for (i, c) in out.iter_mut().enumerate() {
            *c = self.coeff(i) ^ other.coeff(i);
        }
        Self::from_coeffs(out)
    }

    /// Product.
    pub fn mul(&self, other: &Self, f: &Gf2m) -> Self {
        if self.is_zero() || other.is_zero() {
            return Self::zero();
        }
        let mut out = vec![0u16; self.coeffs.len() + other.coeffs.len() - 1];
        for (i, &a) in self.coeffs.iter().enumerate() {
            if a == 0 {
                continue;
            }
            for (j, &b) in other.coeffs.iter().enumerate() {
                out[i + j] ^= f.mul(a, b);
            }
        }
        Self::from_coeffs(out)
    }

    /// Square. In characteristic 2 this just squares each coefficient and
    /// spreads it to the doubled degree.
    pub fn square(&self, f: &Gf2m) -> Self {
        if self.is_zero() {
            return Self::zero();
        }
        let mut out = vec![0u16; 2 * self.coeffs.len() - 1];
        for (i, &a) in self.coeffs.iter().enumerate() {
            out[2 * i] = f.mul(a, a);
        }
        Self::from_coeffs(out)
    }

    /// Scale by a field element.
    pub fn scale(&self, c: u16, f: &Gf2m) -> Self {
        Self::from_coeffs(self.coeffs.iter().map(|&a| f.mul(a, c)).collect())
    }

    /// Multiply by x^k.
    pub fn shift(&self, k: usize) -> Self {
        if self.is_zero() {
            return Self::zero();
        }
        let mut out = vec![0u16; self.coeffs.len() + k];
        out[k..].copy_from_slice(&self.coeffs);
        Self { coeffs: out }
    }

    /// Quotient and remainder by a nonzero divisor.
    pub fn divmod(&self, divisor: &Self, f: &Gf2m) -> (Self, Self) {
        debug_assert!(!divisor.is_zero(), "division by zero polynomial");
        let dd = divisor.degree();
        if self.degree() < dd {
            return (Self::zero(), self.clone());
        }
        let inv_lead = f.inv(divisor.lead());
        let mut rem = self.coeffs.clone();
        let mut quot = vec![0u16; (self.degree() - dd + 1) as usize];
        let mut dr = self.degree();
        while dr >= dd {
            let c = f.mul(rem[dr as usize], inv_lead);
            let sh = (dr - dd) as usize;
            quot[sh] = c;
            for (j, &dcoef) in divisor.coeffs.iter().enumerate() {
                rem[sh + j] ^= f.mul(c, dcoef);
            }
            while dr >= 0 && rem[dr as usize] == 0 {
                dr -= 1;
            }
        }
        rem.truncate((dr + 1) as usize);
        (Self::from_coeffs(quot), Self { coeffs: rem })
    }

    /// Remainder modulo `modulus`.
    pub fn rem(&self, modulus: &Self, f: &Gf2m) -> Self {
        self.divmod(modulus, f).1
    }

    /// Product reduced modulo `modulus`.
    pub fn mul_mod(&self, other: &Self, modulus: &Self, f: &Gf2m) -> Self {
        self.mul(other, f).rem(modulus, f)
    }

    /// Scale so the leading coefficient is 1.
    pub fn monic(&self, f: &Gf2m) -> Self {
        if self.is_zero() {
            return Self::zero();
        }
        self.scale(f.inv(self.lead()), f)
    }

    /// Euclidean greatest common divisor (monic).
    pub fn gcd(a: &Self, b: &Self, f: &Gf2m) -> Self {
        let mut r0 = a.clone();
        let mut r1 = b.clone();
        while !r1.is_zero() {
            let r = r0.rem(&r1, f);
            r0 = r1;
            r1 = r;
        }
        r0.monic(f)
    }

    /// Extended Euclidean algorithm.
    ///
    /// Returns `(d, u, v)` with `u*a + v*b = d`. `d` is not normalized; the
    /// caller scales as needed.
    pub fn ext_gcd(a: &Self, b: &Self, f: &Gf2m) -> (Self, Self, Self) {
        let (mut r0, mut r1) = (a.clone(), b.clone());
        let (mut u0, mut u1) = (Self::one(), Self::zero());
        let (mut v0, mut v1) = (Self::zero(), Self::one());
        while !r1.is_zero() {
            let (q, r) = r0.divmod(&r1, f);
            r0 = r1;
            r1 = r;
            let u = u0.add(&q.mul(&u1, f));
            u0 = u1;
            u1 = u;
            let v = v0.add(&q.mul(&v1, f));
            v0 = v1;
            v1 = v;
        }
        (r0, u0, v0)
    }

    /// Inverse modulo an irreducible `modulus`. Fails on zero input.
    pub fn inv_mod(&self, modulus: &Self, f: &Gf2m) -> Result<Self> {
        let red = self.rem(modulus, f);
        if red.is_zero() {
            return Err(Error::InvalidCiphertext);
        }
        let (d, u, _) = Self::ext_gcd(&red, modulus, f);
        if d.degree() != 0 {
            // modulus was not irreducible or shared a factor
            return Err(Error::InvalidCiphertext);
        }
        Ok(u.scale(f.inv(d.coeff(0)), f).rem(modulus, f))
    }

    /// Partial extended Euclid with a degree cutoff, as syndrome decoding
    /// needs it: returns `(a, b)` with `a = b*r mod g`, `deg a <= dbreak`,
    /// `deg b <= deg g - dbreak - 1`.
    pub fn eea_bounded(g: &Self, r: &Self, dbreak: i32, f: &Gf2m) -> (Self, Self) {
        let (mut r0, mut r1) = (g.clone(), r.clone());
        let (mut b0, mut b1) = (Self::zero(), Self::one());
        while r1.degree() > dbreak {
            let (q, rr) = r0.divmod(&r1, f);
            r0 = r1;
            r1 = rr;
            let b = b0.add(&q.mul(&b1, f));
            b0 = b1;
            b1 = b;
        }
        (r1, b1)
    }

    /// Evaluate at a field element (Horner).
    pub fn eval(&self, x: u16, f: &Gf2m) -> u16 {
        let mut acc = 0u16;
        for &c in self.coeffs.iter().rev() {
            acc = f.mul(acc, x) ^ c;
        }
        acc
    }

    /// Frobenius power: `self^(2^m) mod modulus`, i.e. one application of the
    /// field's q-power map, by m modular squarings.
    fn frobenius(&self, modulus: &Self, f: &Gf2m) -> Self {
        let mut h = self.clone();
        for _ in 0..f.degree() {
            h = h.square(f).rem(modulus, f);
        }
        h
    }

    /// Irreducibility over GF(2^m).
    ///
    /// A degree-t polynomial is reducible iff it has an irreducible factor of
    /// degree at most t/2, and `x^(q^i) - x` is the product of all monic
    /// irreducibles of degree dividing i.
    pub fn is_irreducible(&self, f: &Gf2m) -> bool {
        let t = self.degree();
        if t <= 0 {
            return false;
        }
        if t == 1 {
            return true;
        }
        let x = Self::x();
        let mut h = x.clone();
        for _ in 1..=(t / 2) {
            h = h.frobenius(self, f);
            let g = Self::gcd(&h.add(&x), self, f);
            if g.degree() != 0 {
                return false;
            }
        }
        true
    }

    /// Draw a uniformly random monic irreducible polynomial of degree `t`.
    pub fn random_irreducible<R: Prng + ?Sized>(t: u32, f: &Gf2m, rng: &mut R) -> Self {
        debug_assert!(t >= 1);
        loop {
            let mut coeffs = vec![0u16; t as usize + 1];
            for c in coeffs.iter_mut().take(t as usize) {
                *c = rng.next_range(f.size() as u64) as u16;
            }
            coeffs[t as usize] = 1;
            let candidate = Self { coeffs };
            if candidate.is_irreducible(f) {
                return candidate;
            }
        }
    }

    /// Square-root table for the residue field GF(2^m)[x]/g.
    ///
    /// Entry i is `sqrt(x^i) mod g`. Since the residue ring is a field of
    /// 2^(m*t) elements, `x^(2^(m*t - 1))` is the square root of x; the rest
    /// of the table is its powers.
    pub fn sqrt_table(g: &Self, f: &Gf2m) -> Vec<Self> {
        let t = g.degree() as usize;
        let mut sqrt_x = Self::x();
        for _ in 0..(f.degree() as usize * t - 1) {
            sqrt_x = sqrt_x.square(f).rem(g, f);
        }
        let mut table = Vec::with_capacity(t);
        table.push(Self::one());
        for i in 1..t {
            let prev = &table[i - 1];
            table.push(prev.mul_mod(&sqrt_x, g, f));
        }
        table
    }

    /// Square root modulo g using a precomputed [`sqrt_table`](Self::sqrt_table).
    ///
    /// `sqrt(sum p_i x^i) = sum sqrt(p_i) * sqrt(x^i)`, since squaring is a
    /// field automorphism in characteristic 2.
    pub fn sqrt_mod(&self, table: &[Self], f: &Gf2m) -> Self {
        let mut acc = Self::zero();
        for (i, &c) in self.coeffs.iter().enumerate() {
            if c != 0 {
                acc = acc.add(&table[i].scale(f.sqrt(c), f));
            }
        }
        acc
    }
}
