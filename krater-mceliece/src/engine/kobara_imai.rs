//! Kobara–Imai gamma conversion.
//!
//! The most bandwidth-efficient of the three: the message, a public domain
//! separator, and the randomness are whitened into one buffer, and as much
//! of it as possible is pushed through the primitive itself. The error
//! vector carries data through the constant-weight codec, the primitive's
//! plaintext carries more, and only the overflow (`c6`) travels in the
//! clear. Messages are padded `m || 0x80 || 0x00.. || INFO` so the padded
//! block has a fixed minimum size and strips back unambiguously.

use krater_core::{Error, Prng, Result};

use crate::cw;
use crate::hash::digest;
use crate::kdf;
use crate::keys::{PrivateKey, PublicKey};
use crate::params::Parameters;
use crate::pke;
use crate::vector::BitVector;

/// Section lengths of the conversion for a given message size.
pub(crate) struct Lengths {
    /// Whitened payload block.
    pub c1: usize,
    /// Randomness block (one digest).
    pub c2: usize,
    /// Bytes carried by the primitive's plaintext.
    pub c4: usize,
    /// Bytes carried by the error vector.
    pub c5: usize,
    /// Cleartext overflow prefix.
    pub c6: usize,
}

/// Compute the section lengths.
///
/// The payload block never goes below `c4 + c5 - c2` bytes (plus the
/// separator), so short messages still fill the primitive's full capacity;
/// the `+ 1` reserves room for the padding marker.
pub(crate) fn lengths(params: &Parameters, sep_len: usize, msg_len: usize) -> Lengths {
    let c2 = params.digest().digest_size();
    let c4 = params.k8();
    let c5 = cw::capacity_bits(params.n(), params.t() as usize) / 8;
    let base = (c4 + c5) as i64 - c2 as i64 - sep_len as i64;
    let c1 = (msg_len as i64 + 1).max(base) as usize + sep_len;
    let c6 = c1 + c2 - c4 - c5;
    Lengths { c1, c2, c4, c5, c6 }
}

pub(super) fn encrypt<R: Prng + ?Sized>(
    params: &Parameters,
    domain_sep: &[u8],
    pk: &PublicKey,
    msg: &[u8],
    rng: &mut R,
) -> Result<Vec<u8>> {
    let l = lengths(params, domain_sep.len(), msg.len());

    // m || 0x80 || 0x00.. || INFO
    let mut m_const = vec![0u8; l.c1];
    m_const[..msg.len()].copy_from_slice(msg);
    m_const[msg.len()] = 0x80;
    m_const[l.c1 - domain_sep.len()..].copy_from_slice(domain_sep);

    let mut r = vec![0u8; l.c2];
    rng.get_bytes(&mut r);

    let c1_buf = kdf::mask(params.digest(), &r, &m_const);
    let c2_buf: Vec<u8> = digest(params.digest(), &c1_buf)
        .iter()
        .zip(&r)
        .map(|(h, r)| h ^ r)
        .collect();

    // split c2 || c1 into (c6, c5, c4)
    let mut joined = c2_buf;
    joined.extend_from_slice(&c1_buf);
    let c6 = &joined[..l.c6];
    let c5 = &joined[l.c6..l.c6 + l.c5];
    let c4 = &joined[l.c6 + l.c5..];
    debug_assert_eq!(c4.len(), l.c4);

    let z = cw::encode(params.n(), params.t() as usize, c5)?;
    let mut c4_padded = c4.to_vec();
    c4_padded.resize(params.k().div_ceil(8), 0);
    let c4_vec =
        BitVector::from_bytes(&c4_padded, params.k()).map_err(|_| Error::InvalidCiphertext)?;
    let enc = pke::encrypt_raw(pk, &c4_vec, &z)?.to_bytes();

    let mut out = c6.to_vec();
    out.extend_from_slice(&enc);
    Ok(out)
}

pub(super) fn decrypt(
    params: &Parameters,
    domain_sep: &[u8],
    sk: &PrivateKey,
    ciphertext: &[u8],
) -> Result<Vec<u8>> {
    let n8 = params.n8();
    if ciphertext.len() < n8 {
        return Err(Error::InvalidCiphertext);
    }
    let (c6, enc) = ciphertext.split_at(ciphertext.len() - n8);

    let enc = BitVector::from_bytes(enc, params.n()).map_err(|_| Error::InvalidCiphertext)?;
    let (c4_vec, z) = pke::decrypt_raw(sk, &enc)?;

    let c2_len = params.digest().digest_size();
    let c4_len = params.k8();
    let c5_len = cw::capacity_bits(params.n(), params.t() as usize) / 8;

    // the primitive's plaintext only ever carries whole bytes; spare high
    // bits must be clear
    let c4_full = c4_vec.to_bytes();
    if c4_full[c4_len..].iter().any(|&b| b != 0) {
        return Err(Error::InvalidCiphertext);
    }
    let c5 = cw::decode(&z, params.t() as usize, c5_len)?;

    // reassemble c2 || c1
    let total = c6.len() + c5_len + c4_len;
    if total < c2_len + domain_sep.len() + 1 {
        return Err(Error::InvalidCiphertext);
    }
    let mut joined = c6.to_vec();
    joined.extend_from_slice(&c5);
    joined.extend_from_slice(&c4_full[..c4_len]);
    let (c2_buf, c1_buf) = joined.split_at(c2_len);

    let r: Vec<u8> = digest(params.digest(), c1_buf)
        .iter()
        .zip(c2_buf)
        .map(|(h, c)| h ^ c)
        .collect();
    let m_const = kdf::mask(params.digest(), &r, c1_buf);

    // verify the separator tail, then strip the zero pad and its marker
    let body_len = m_const.len() - domain_sep.len();
    if &m_const[body_len..] != domain_sep {
        return Err(Error::InvalidCiphertext);
    }
    let mut end = body_len;
    while end > 0 && m_const[end - 1] == 0 {
        end -= 1;
    }
    if end == 0 || m_const[end - 1] != 0x80 {
        return Err(Error::InvalidCiphertext);
    }
    Ok(m_const[..end - 1].to_vec())
}
