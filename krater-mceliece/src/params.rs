//! Parameter sets: the tuple that fixes a concrete instantiation of the
//! cryptosystem, its wire encoding, and the named catalog.

use krater_core::{Error, Result};

use crate::binpoly;
use crate::engine::Engine;
use crate::hash::DigestKind;
use crate::rng::PrngKind;

/// A validated parameter set.
///
/// `n = 2^m` and `k = n - m*t` are derived. Construction rejects anything the
/// key generator could not realize: m outside `[1, 16]`, `t < 2`, a code
/// dimension below one byte, or a field polynomial that is not irreducible of
/// degree exactly m.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameters {
    m: u16,
    t: u16,
    field_poly: u32,
    engine: Engine,
    digest: DigestKind,
    prng: PrngKind,
    oid: [u8; 3],
}

impl Parameters {
    /// Build and validate a parameter set.
    pub fn new(
        m: u16,
        t: u16,
        field_poly: u32,
        engine: Engine,
        digest: DigestKind,
        prng: PrngKind,
        oid: [u8; 3],
    ) -> Result<Self> {
        if !(1..=16).contains(&m) || t < 2 {
            return Err(Error::InvalidParameter);
        }
        let n = 1usize << m;
        let redundancy = m as usize * t as usize;
        if redundancy + 8 > n {
            return Err(Error::InvalidParameter);
        }
        if binpoly::deg(field_poly) != m as i32 || !binpoly::is_irreducible(field_poly) {
            return Err(Error::InvalidParameter);
        }
        Ok(Self {
            m,
            t,
            field_poly,
            engine,
            digest,
            prng,
            oid,
        })
    }

    /// Look up a named catalog entry.
    pub fn named(name: &str) -> Result<Self> {
        CATALOG
            .iter()
            .find(|e| e.name == name)
            .map(|e| e.build())
            .ok_or(Error::InvalidParameter)?
    }

    /// Look up a catalog entry by its 3-byte OID.
    pub fn by_oid(oid: [u8; 3]) -> Result<Self> {
        CATALOG
            .iter()
            .find(|e| e.oid == oid)
            .map(|e| e.build())
            .ok_or(Error::InvalidParameter)?
    }

    /// Extension degree m.
    pub fn m(&self) -> u16 {
        self.m
    }

    /// Error-correction capacity t.
    pub fn t(&self) -> u16 {
        self.t
    }

    /// Field polynomial bit pattern.
    pub fn field_poly(&self) -> u32 {
        self.field_poly
    }

    /// CCA2 conversion engine.
    pub fn engine(&self) -> Engine {
        self.engine
    }

    /// Digest backing hashing and the KDF.
    pub fn digest(&self) -> DigestKind {
        self.digest
    }

    /// Default random source.
    pub fn prng(&self) -> PrngKind {
        self.prng
    }

    /// Parameter-set OID.
    pub fn oid(&self) -> [u8; 3] {
        self.oid
    }

    /// Code length n = 2^m.
    pub fn n(&self) -> usize {
        1 << self.m
    }

    /// Code redundancy m*t (rows of the parity-check matrix).
    pub fn mt(&self) -> usize {
        self.m as usize * self.t as usize
    }

    /// Code dimension k = n - m*t.
    pub fn k(&self) -> usize {
        self.n() - self.mt()
    }

    /// Ciphertext block bytes, `ceil(n/8)`.
    pub fn n8(&self) -> usize {
        self.n().div_ceil(8)
    }

    /// Whole message bytes the code dimension carries, `floor(k/8)`.
    pub fn k8(&self) -> usize {
        self.k() / 8
    }

    /// Wire encoding: engine, digest, prng, m, t, field polynomial as
    /// little-endian u32, then the 3 OID bytes.
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(27);
        for v in [
            self.engine.ordinal(),
            self.digest.ordinal(),
            self.prng.ordinal(),
            self.m as u32,
            self.t as u32,
            self.field_poly,
        ] {
            out.extend_from_slice(&v.to_le_bytes());
        }
        out.extend_from_slice(&self.oid);
        out
    }

    /// Parse and validate the wire encoding.
    pub fn decode(buf: &[u8]) -> Result<Self> {
        if buf.len() != 27 {
            return Err(Error::Io);
        }
        let word = |i: usize| -> u32 {
            u32::from_le_bytes(buf[4 * i..4 * i + 4].try_into().expect("sized"))
        };
        let engine = Engine::from_ordinal(word(0))?;
        let digest = DigestKind::from_ordinal(word(1))?;
        let prng = PrngKind::from_ordinal(word(2))?;
        let m = word(3);
        let t = word(4);
        if m > u16::MAX as u32 || t > u16::MAX as u32 {
            return Err(Error::InvalidParameter);
        }
        let field_poly = word(5);
        let oid = [buf[24], buf[25], buf[26]];
        Self::new(m as u16, t as u16, field_poly, engine, digest, prng, oid)
    }
}

struct CatalogEntry {
    name: &'static str,
    m: u16,
    t: u16,
    field_poly: u32,
    engine: Engine,
    digest: DigestKind,
    oid: [u8; 3],
}

impl CatalogEntry {
    fn build(&self) -> Result<Parameters> {
        Parameters::new(
            self.m,
            self.t,
            self.field_poly,
            self.engine,
            self.digest,
            PrngKind::OsEntropy,
            self.oid,
        )
    }
}

/// Named parameter sets kept for compatibility.
///
/// OID layout: first byte 1, second byte the m-family ordinal (m = 10..13),
/// third byte the ordinal within the family. Security levels on the larger
/// sets are inherited from the original tables and unverified.
const CATALOG: &[CatalogEntry] = &[
    CatalogEntry {
        name: "mceliece-m10t50-pointcheval-sha512",
        m: 10,
        t: 50,
        field_poly: 0x409, // x^10 + x^3 + 1
        engine: Engine::Pointcheval,
        digest: DigestKind::Sha512,
        oid: [1, 1, 1],
    },
    CatalogEntry {
        name: "mceliece-m11t40-fujisaki-sha256",
        m: 11,
        t: 40,
        field_poly: 0x805, // x^11 + x^2 + 1
        engine: Engine::Fujisaki,
        digest: DigestKind::Sha256,
        oid: [1, 2, 1],
    },
    CatalogEntry {
        name: "mceliece-m11t40-kobaraimai-sha256",
        m: 11,
        t: 40,
        field_poly: 0x805,
        engine: Engine::KobaraImai,
        digest: DigestKind::Sha256,
        oid: [1, 2, 2],
    },
    // security 131?
    CatalogEntry {
        name: "mceliece-m11t48-fujisaki-sha256",
        m: 11,
        t: 48,
        field_poly: 0x805,
        engine: Engine::Fujisaki,
        digest: DigestKind::Sha256,
        oid: [1, 2, 3],
    },
    // security 133?
    CatalogEntry {
        name: "mceliece-m12t41-fujisaki-sha256",
        m: 12,
        t: 41,
        field_poly: 0x1053, // x^12 + x^6 + x^4 + x + 1
        engine: Engine::Fujisaki,
        digest: DigestKind::Sha256,
        oid: [1, 3, 1],
    },
    // security 148?
    CatalogEntry {
        name: "mceliece-m12t48-kobaraimai-sha256",
        m: 12,
        t: 48,
        field_poly: 0x1053,
        engine: Engine::KobaraImai,
        digest: DigestKind::Sha256,
        oid: [1, 3, 2],
    },
    // security 190?
    CatalogEntry {
        name: "mceliece-m13t44-kobaraimai-sha512",
        m: 13,
        t: 44,
        field_poly: 0x201B, // x^13 + x^4 + x^3 + x + 1
        engine: Engine::KobaraImai,
        digest: DigestKind::Sha512,
        oid: [1, 4, 1],
    },
];

/// Names of every catalog entry.
pub fn catalog_names() -> Vec<&'static str> {
    CATALOG.iter().map(|e| e.name).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_entries_validate() {
        for name in catalog_names() {
            let p = Parameters::named(name).unwrap();
            assert_eq!(p.n(), 1 << p.m());
            assert_eq!(p.k(), p.n() - p.mt());
            assert!(p.k8() > 0);
            assert_eq!(p.oid()[0], 1);
        }
    }

    #[test]
    fn catalog_oids_are_unique_and_resolve() {
        let names = catalog_names();
        for name in &names {
            let p = Parameters::named(name).unwrap();
            let q = Parameters::by_oid(p.oid()).unwrap();
            assert_eq!(p, q);
        }
        let mut oids: Vec<_> = names
            .iter()
            .map(|n| Parameters::named(n).unwrap().oid())
            .collect();
        oids.sort();
        oids.dedup();
        assert_eq!(oids.len(), names.len());
    }

    #[test]
    fn unknown_names_and_oids_rejected() {
        assert_eq!(Parameters::named("nope"), Err(Error::InvalidParameter));
        assert_eq!(Parameters::by_oid([9, 9, 9]), Err(Error::InvalidParameter));
    }

    #[test]
    fn derived_sizes_m11t40() {
        let p = Parameters::named("mceliece-m11t40-fujisaki-sha256").unwrap();
        assert_eq!(p.n(), 2048);
        assert_eq!(p.mt(), 440);
        assert_eq!(p.k(), 1608);
        assert_eq!(p.n8(), 256);
        assert_eq!(p.k8(), 201);
    }

    #[test]
    fn validation_rejects_bad_shapes() {
        let ok = |m, t, fp| {
            Parameters::new(
                m,
                t,
                fp,
                Engine::Fujisaki,
                DigestKind::Sha256,
                PrngKind::OsEntropy,
                [1, 1, 1],
            )
        };
        assert!(ok(0, 4, 1).is_err());
        assert!(ok(17, 4, 0x2000F).is_err());
        assert!(ok(8, 1, 0x11D).is_err()); // t too small
        assert!(ok(8, 40, 0x11D).is_err()); // m*t >= n
        assert!(ok(8, 6, 0x11B ^ 1).is_err()); // reducible polynomial
        assert!(ok(8, 6, 0x11D).is_ok());
    }

    #[test]
    fn wire_roundtrip() {
        for name in catalog_names() {
            let p = Parameters::named(name).unwrap();
            let enc = p.encode();
            assert_eq!(enc.len(), 27);
            assert_eq!(Parameters::decode(&enc).unwrap(), p);
        }
    }

    #[test]
    fn wire_rejects_garbage() {
        let p = Parameters::named("mceliece-m11t40-fujisaki-sha256").unwrap();
        let mut enc = p.encode();
        assert!(Parameters::decode(&enc[..26]).is_err());
        enc[0] = 99; // unknown engine ordinal
        assert!(Parameters::decode(&enc).is_err());
    }

    #[test]
    fn wire_layout_is_stable() {
        let p = Parameters::named("mceliece-m11t40-fujisaki-sha256").unwrap();
        let enc = p.encode();
        assert_eq!(&enc[0..4], &1u32.to_le_bytes()); // Fujisaki
        assert_eq!(&enc[12..16], &11u32.to_le_bytes()); // m
        assert_eq!(&enc[16..20], &40u32.to_le_bytes()); // t
        assert_eq!(&enc[20..24], &0x805u32.to_le_bytes());
        assert_eq!(&enc[24..], &[1, 2, 1]);
    }
}
