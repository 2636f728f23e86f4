//! Key-pair generation.
//!
//! Field, then a random monic irreducible Goppa polynomial, then the
//! canonical parity check, then systematic reduction. A rank-deficient
//! reduction restarts from a fresh polynomial; everything else is
//! deterministic in the supplied random source, so a seeded source yields a
//! reproducible pair.

use krater_core::{Prng, Result};

use crate::gf::Gf2m;
use crate::gfpoly::GfPoly;
use crate::goppa;
use crate::keys::{KeyPair, PrivateKey, PublicKey};
use crate::params::Parameters;

/// Generate a key pair under `params`, drawing from `rng`.
pub fn generate<R: Prng + ?Sized>(params: &Parameters, rng: &mut R) -> Result<KeyPair> {
    let field = Gf2m::new(params.m() as u32, params.field_poly())?;
    loop {
        let goppa_poly = GfPoly::random_irreducible(params.t() as u32, &field, rng);
        let h = match goppa::canonical_check_matrix(&field, &goppa_poly) {
            Ok(h) => h,
            Err(_) => continue,
        };
        let (h_short, perm) = match h.systematic_reduce() {
            Ok(v) => v,
            Err(_) => continue,
        };

        let qinv = GfPoly::sqrt_table(&goppa_poly, &field);
        let g_short = h_short.transpose();
        let k = g_short.rows();

        let public = PublicKey::from_parts(params.n(), params.t() as usize, g_short)?;
        let private =
            PrivateKey::from_parts(params.n(), k, field.clone(), goppa_poly, perm, h, qinv)?;
        return Ok(KeyPair::new(public, private));
    }
}
