//! Binary irreducible Goppa codes: parity-check construction and syndrome
//! decoding.
//!
//! The code support is every element of GF(2^m) in integer order, so the
//! length is n = 2^m. The canonical parity-check matrix H has one column per
//! support element: the coefficients of `1/(x + alpha_j) mod g`, each field
//! coefficient expanded into an m-bit stack. Decoding is Patterson's
//! algorithm with the Huber halting rule for the extended Euclidean step.

use krater_core::{Error, Result};

use crate::gf::Gf2m;
use crate::gfpoly::GfPoly;
use crate::matrix::Matrix;
use crate::vector::BitVector;

/// Canonical (m·t) x n parity-check matrix of the Goppa code defined by
/// `(field, g)`.
///
/// `1/(x + a) mod g = g(a)^-1 * (g(x) + g(a)) / (x + a)`, and the division is
/// synthetic: with q_{t-1} = g_t and q_{i-1} = g_i + a*q_i the quotient
/// coefficients come out in one backward sweep. Fails if g has a root in the
/// support (impossible for an irreducible g of degree >= 2).
pub fn canonical_check_matrix(field: &Gf2m, g: &GfPoly) -> Result<Matrix> {
    let m = field.degree() as usize;
    let t = g.degree() as i32;
    if t < 2 {
        return Err(Error::InvalidParameter);
    }
    let t = t as usize;
    let n = field.size() as usize;

    let mut h = Matrix::zero(m * t, n);
    let mut quot = vec![0u16; t];
    for j in 0..n {
        let a = j as u16;
        let ga = g.eval(a, field);
        if ga == 0 {
            return Err(Error::InvalidParameter);
        }
        let inv_ga = field.inv(ga);

        quot[t - 1] = g.coeff(t);
        for i in (1..t).rev() {
            quot[i - 1] = g.coeff(i) ^ field.mul(a, quot[i]);
        }

        for (i, &q) in quot.iter().enumerate() {
            let coeff = field.mul(inv_ga, q);
            for u in 0..m {
                if (coeff >> u) & 1 != 0 {
                    h.set(i * m + u, j, true);
                }
            }
        }
    }
    Ok(h)
}

/// Syndrome polynomial of a received word: `sum_{j in supp(r)} 1/(x + alpha_j) mod g`,
/// assembled from the bit syndrome `H * r`.
pub fn syndrome_poly(field: &Gf2m, h: &Matrix, word: &BitVector) -> GfPoly {
    let m = field.degree() as usize;
    let t = h.rows() / m;
    let bits = h.mul_right(word);
    let mut coeffs = vec![0u16; t];
    for (i, c) in coeffs.iter_mut().enumerate() {
        for u in 0..m {
            if bits.get(i * m + u) {
                *c |= 1 << u;
            }
        }
    }
    GfPoly::from_coeffs(coeffs)
}

/// Patterson syndrome decoding.
///
/// Recovers the error vector of weight <= t from a received word, or fails
/// when the word is farther than t from the code. A zero syndrome yields the
/// zero error vector; whether that is acceptable is the caller's business.
///
/// Steps: T = S^-1 mod g; R = sqrt(T + x) via the precomputed table;
/// extended Euclid on (g, R) halted at degree floor(t/2) giving (a, b);
/// sigma = a^2 + x*b^2; the roots of sigma over the support are the error
/// positions, and their count must match its degree.
pub fn decode_error(
    field: &Gf2m,
    g: &GfPoly,
    sqrt_table: &[GfPoly],
    h: &Matrix,
    word: &BitVector,
) -> Result<BitVector> {
    let n = field.size() as usize;
    let t = g.degree();
    debug_assert_eq!(word.len(), n);

    let s = syndrome_poly(field, h, word);
    if s.is_zero() {
        return Ok(BitVector::zero(n));
    }

    let t_poly = s.inv_mod(g, field)?;
    let t_plus_x = t_poly.add(&GfPoly::x());

    let sigma = if t_plus_x.is_zero() {
        // T = x means the locator is x itself: a single error at alpha = 0
        GfPoly::x()
    } else {
        let r = t_plus_x.sqrt_mod(sqrt_table, field);
        let (a, b) = GfPoly::eea_bounded(g, &r, t / 2, field);
        a.square(field).add(&b.square(field).shift(1))
    };

    if sigma.degree() > t {
        return Err(Error::InvalidCiphertext);
    }

    let mut error = BitVector::zero(n);
    let mut roots = 0i32;
    for j in 0..n {
        if sigma.eval(j as u16, field) == 0 {
            error.set(j, true);
            roots += 1;
        }
    }
    if roots != sigma.degree() {
        return Err(Error::InvalidCiphertext);
    }
    // the corrected word must actually be a codeword
    if h.mul_right(&word.xor(&error)).weight() != 0 {
        return Err(Error::InvalidCiphertext);
    }
    Ok(error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::permutation::Permutation;
    use crate::rng::SeededPrng;
    use krater_core::Prng;

    /// Small code used throughout: GF(2^8), t = 6, n = 256, k = 208.
    fn setup() -> (Gf2m, GfPoly, Vec<GfPoly>, Matrix) {
        let field = Gf2m::new(8, 0x11D).unwrap();
        let mut rng = SeededPrng::from_seed([41u8; 32]);
        let g = GfPoly::random_irreducible(6, &field, &mut rng);
        let table = GfPoly::sqrt_table(&g, &field);
        let h = canonical_check_matrix(&field, &g).unwrap();
        (field, g, table, h)
    }

    /// A random codeword in the *unpermuted* coordinates, built through the
    /// systematic form.
    fn random_codeword(
        h: &Matrix,
        rng: &mut SeededPrng,
    ) -> (BitVector, Matrix, Permutation) {
        let (right, perm) = h.systematic_reduce().unwrap();
        let k = h.cols() - h.rows();
        let msg = BitVector::random(k, rng);
        let parity = right.transpose().mul_left(&msg);
        let word_permuted = parity.concat(&msg);
        let word = perm.inverse().apply(&word_permuted);
        (word, right, perm)
    }

    #[test]
    fn check_matrix_shape() {
        let (_, _, _, h) = setup();
        assert_eq!(h.rows(), 48);
        assert_eq!(h.cols(), 256);
    }

    #[test]
    fn codewords_have_zero_syndrome() {
        let (field, _, _, h) = setup();
        let mut rng = SeededPrng::from_seed([42u8; 32]);
        for _ in 0..4 {
            let (word, _, _) = random_codeword(&h, &mut rng);
            assert_eq!(h.mul_right(&word).weight(), 0);
            assert!(syndrome_poly(&field, &h, &word).is_zero());
        }
    }

    #[test]
    fn decodes_up_to_t_errors() {
        let (field, g, table, h) = setup();
        let mut rng = SeededPrng::from_seed([43u8; 32]);
        for weight in 1..=6usize {
            let (word, _, _) = random_codeword(&h, &mut rng);
            let mut support = Vec::new();
            while support.len() < weight {
                let p = rng.next_range(256) as usize;
                if !support.contains(&p) {
                    support.push(p);
                }
            }
            let error = BitVector::from_support(256, &support);
            let received = word.xor(&error);
            let decoded = decode_error(&field, &g, &table, &h, &received).unwrap();
            assert_eq!(decoded, error, "weight {weight}");
        }
    }

    #[test]
    fn error_at_position_zero_decodes() {
        // alpha = 0 exercises the T + x == 0 corner and the sigma root at 0
        let (field, g, table, h) = setup();
        let mut rng = SeededPrng::from_seed([44u8; 32]);
        let (word, _, _) = random_codeword(&h, &mut rng);
        let error = BitVector::from_support(256, &[0, 17, 200]);
        let received = word.xor(&error);
        let decoded = decode_error(&field, &g, &table, &h, &received).unwrap();
        assert_eq!(decoded, error);
    }

    #[test]
    fn single_error_at_zero() {
        let (field, g, table, h) = setup();
        let mut rng = SeededPrng::from_seed([45u8; 32]);
        let (word, _, _) = random_codeword(&h, &mut rng);
        let error = BitVector::from_support(256, &[0]);
        let received = word.xor(&error);
        let decoded = decode_error(&field, &g, &table, &h, &received).unwrap();
        assert_eq!(decoded, error);
    }

    #[test]
    fn clean_word_decodes_to_zero() {
        let (field, g, table, h) = setup();
        let mut rng = SeededPrng::from_seed([46u8; 32]);
        let (word, _, _) = random_codeword(&h, &mut rng);
        let decoded = decode_error(&field, &g, &table, &h, &word).unwrap();
        assert_eq!(decoded.weight(), 0);
    }

    #[test]
    fn too_many_errors_fail_or_misdecode() {
        // beyond-t noise must never be returned as a weight <= t "success"
        // that still matches: decoding either errors out or lands on some
        // other codeword, never on the original error pattern
        let (field, g, table, h) = setup();
        let mut rng = SeededPrng::from_seed([47u8; 32]);
        let (word, _, _) = random_codeword(&h, &mut rng);
        let mut support = Vec::new();
        while support.len() < 14 {
            let p = rng.next_range(256) as usize;
            if !support.contains(&p) {
                support.push(p);
            }
        }
        let error = BitVector::from_support(256, &support);
        let received = word.xor(&error);
        match decode_error(&field, &g, &table, &h, &received) {
            Err(_) => {}
            Ok(decoded) => assert_ne!(decoded, error),
        }
    }

    #[test]
    fn rejects_degree_one_goppa() {
        let field = Gf2m::new(8, 0x11D).unwrap();
        let g = GfPoly::from_coeffs(vec![3, 1]); // x + 3, root in the support
        assert!(canonical_check_matrix(&field, &g).is_err());
    }
}
