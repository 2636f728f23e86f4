//! GF(2^m) arithmetic over a runtime-selected field polynomial.
//!
//! Elements are integers in `[0, 2^m)`; addition is XOR; multiplication and
//! inversion run over exp/log tables built at construction from the smallest
//! primitive element of the chosen field. The tables are private-key material
//! and are wiped on drop.

use krater_core::{Error, Result};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::binpoly;

/// A binary extension field GF(2^m), 1 <= m <= 16.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct Gf2m {
    m: u32,
    field_poly: u32,
    /// exp[i] = alpha^i for i in 0..2^m - 1.
    exp: Vec<u16>,
    /// log[x] = i with exp[i] = x, for x != 0. log[0] is a sentinel 0.
    log: Vec<u16>,
}

impl Gf2m {
    /// Build the field from its extension degree and field polynomial.
    ///
    /// The polynomial must be irreducible of degree exactly `m`; the
    /// generator used for the tables is the smallest primitive element under
    /// that polynomial, so the same `(m, field_poly)` pair always produces
    /// the same tables.
    pub fn new(m: u32, field_poly: u32) -> Result<Self> {
        if !(1..=16).contains(&m)
            || binpoly::deg(field_poly) != m as i32
            || !binpoly::is_irreducible(field_poly)
        {
            return Err(Error::InvalidParameter);
        }

        let order = (1u32 << m) - 1;
        let mut exp = vec![0u16; order as usize];
        let mut log = vec![0u16; 1 << m];

        if m == 1 {
            exp[0] = 1;
            return Ok(Self {
                m,
                field_poly,
                exp,
                log,
            });
        }

        // Smallest primitive element: its powers must walk every nonzero
        // element before returning to 1.
        let mut generator = 0;
        'candidates: for g in 2..(1u32 << m) {
            let mut x = 1u32;
            for i in 0..order {
                exp[i as usize] = x as u16;
                x = mul_noalloc(x, g, field_poly, m);
                if x == 1 && i + 1 < order {
                    continue 'candidates;
                }
            }
            if x == 1 {
                generator = g;
                break;
            }
        }
        if generator == 0 {
            // every GF(2^m) has a primitive element
            return Err(Error::InvalidParameter);
        }
        for (i, &e) in exp.iter().enumerate() {
            log[e as usize] = i as u16;
        }

        Ok(Self {
            m,
            field_poly,
            exp,
            log,
        })
    }

    /// Build the field with the canonical (first) irreducible of degree `m`.
    pub fn with_degree(m: u32) -> Result<Self> {
        if !(1..=16).contains(&m) {
            return Err(Error::InvalidParameter);
        }
        Self::new(m, binpoly::irreducible(m))
    }

    /// Extension degree m.
    pub fn degree(&self) -> u32 {
        self.m
    }

    /// Field polynomial bit pattern.
    pub fn field_poly(&self) -> u32 {
        self.field_poly
    }

    /// Number of elements, 2^m.
    pub fn size(&self) -> u32 {
        1 << self.m
    }

    /// Order of the multiplicative group, 2^m - 1.
    pub fn order(&self) -> u32 {
        (1 << self.m) - 1
    }

    /// Whether `a` is a valid element encoding.
    pub fn contains(&self, a: u16) -> bool {
        (a as u32) < self.size()
    }

    /// Addition (XOR).
    #[inline]
    pub fn add(&self, a: u16, b: u16) -> u16 {
        a ^ b
    }

    /// Multiplication via the log/exp tables, with zero guards.
    #[inline]
    pub fn mul(&self, a: u16, b: u16) -> u16 {
        if a == 0 || b == 0 {
            return 0;
        }
        let idx = (self.log[a as usize] as u32 + self.log[b as usize] as u32) % self.order();
        self.exp[idx as usize]
    }

    /// Multiplicative inverse of a nonzero element. `inv(0)` returns 0.
    #[inline]
    pub fn inv(&self, a: u16) -> u16 {
        if a == 0 {
            return 0;
        }
        let idx = (self.order() - self.log[a as usize] as u32) % self.order();
        self.exp[idx as usize]
    }

    /// `a^e`, with the exponent reduced modulo 2^m - 1.
    pub fn pow(&self, a: u16, e: u64) -> u16 {
        if a == 0 {
            return if e == 0 { 1 } else { 0 };
        }
        let idx = (self.log[a as usize] as u64 * (e % self.order() as u64)) % self.order() as u64;
        self.exp[idx as usize]
    }

    /// Square root; in characteristic 2 every element has exactly one.
    pub fn sqrt(&self, a: u16) -> u16 {
        self.pow(a, 1u64 << (self.m - 1))
    }

    /// `alpha^i` for any i (reduced modulo the group order).
    pub fn exp_at(&self, i: u32) -> u16 {
        self.exp[(i % self.order()) as usize]
    }

    /// Discrete log of a nonzero element.
    pub fn log_of(&self, a: u16) -> u16 {
        debug_assert!(a != 0);
        self.log[a as usize]
    }
}

impl core::fmt::Debug for Gf2m {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Gf2m")
            .field("m", &self.m)
            .field("field_poly", &self.field_poly)
            .finish()
    }
}

/// Carry-less multiply-and-reduce, used only while the tables are built.
fn mul_noalloc(a: u32, b: u32, field_poly: u32, m: u32) -> u32 {
    let mut acc = 0u32;
    let mut a = a;
    let mut b = b;
    while b != 0 {
        if b & 1 != 0 {
            acc ^= a;
        }
        a <<= 1;
        if a >> m != 0 {
            a ^= field_poly;
        }
        b >>= 1;
    }
    acc
}
