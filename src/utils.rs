// Copyright 2024 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

use std::ops::Neg;
use std::sync::OnceLock;

use bls12_381::hash_to_curve::{ExpandMsgXof, HashToCurve};
use bls12_381::{
    multi_miller_loop, G1Affine, G1Projective, G2Affine, G2Prepared, G2Projective, Scalar,
};
use digest::{ExtendableOutput, Update, XofReader};
use ff::Field;
use group::Group;
use rand_core::{CryptoRng, RngCore};
use sha3::Shake256;

use crate::error::{OberonError, Result};

// https://datatracker.ietf.org/doc/html/rfc9380#section-8.8.1 with a
// SHAKE-256 expander instead of the SHA-256 one
const G1_HASH_DOMAIN: &[u8] = b"OBERON_BLS12381G1_XOF:SHAKE-256_SSWU_RO_";

const SCALAR_HASH_DOMAIN: &[u8] = b"OBERON_BLS12381FQ_XOF:SHAKE-256_";

/// Hashes the concatenation of `chunks` into a scalar with a raw
/// domain-separated SHAKE-256: 48 squeezed bytes reduced mod r.
pub fn hash_to_scalar(chunks: &[&[u8]]) -> Scalar {
    let mut hasher = Shake256::default();
    hasher.update(SCALAR_HASH_DOMAIN);
    for chunk in chunks {
        hasher.update(chunk);
    }
    let mut reader = hasher.finalize_xof();
    let mut okm = [0u8; 48];
    reader.read(&mut okm);
    scalar_from_okm(&okm)
}

/// Fills `output` with scalars squeezed from a single SHAKE-256 instance,
/// one 48-byte block per scalar.
pub fn hash_to_scalars(chunks: &[&[u8]], output: &mut [Scalar]) {
    let mut hasher = Shake256::default();
    hasher.update(SCALAR_HASH_DOMAIN);
    for chunk in chunks {
        hasher.update(chunk);
    }
    let mut reader = hasher.finalize_xof();
    let mut okm = [0u8; 48];
    for scalar in output {
        reader.read(&mut okm);
        *scalar = scalar_from_okm(&okm);
    }
}

pub fn hash_g1<M: AsRef<[u8]>>(msg: M) -> G1Projective {
    <G1Projective as HashToCurve<ExpandMsgXof<Shake256>>>::hash_to_curve(msg, G1_HASH_DOMAIN)
}

// The OKM is a big-endian 384-bit integer; `from_bytes_wide` wants a
// little-endian 512-bit buffer, so reverse and zero-pad before reducing.
fn scalar_from_okm(okm: &[u8; 48]) -> Scalar {
    let mut wide = [0u8; 64];
    for (out, okm_byte) in wide.iter_mut().zip(okm.iter().rev()) {
        *out = *okm_byte;
    }
    Scalar::from_bytes_wide(&wide)
}

/// Draws a uniform scalar from 64 bytes of caller-provided randomness.
pub(crate) fn try_random_scalar(rng: &mut (impl RngCore + CryptoRng)) -> Result<Scalar> {
    let mut wide = [0u8; 64];
    rng.try_fill_bytes(&mut wide)
        .map_err(|_| OberonError::RngFailure)?;
    Ok(Scalar::from_bytes_wide(&wide))
}

/// Draws a uniform non-zero scalar, re-drawing on the (negligible) zero case.
pub(crate) fn try_nonzero_random_scalar(rng: &mut (impl RngCore + CryptoRng)) -> Result<Scalar> {
    loop {
        let scalar = try_random_scalar(rng)?;
        if !bool::from(scalar.is_zero()) {
            return Ok(scalar);
        }
    }
}

pub(crate) fn try_deserialize_nonzero_scalar(bytes: &[u8; 32]) -> Result<Scalar> {
    let scalar = Into::<Option<Scalar>>::into(Scalar::from_bytes(bytes))
        .ok_or(OberonError::InvalidEncoding("scalar"))?;
    if bool::from(scalar.is_zero()) {
        return Err(OberonError::InvalidScalar);
    }
    Ok(scalar)
}

pub(crate) fn try_deserialize_g1_projective(bytes: &[u8; 48]) -> Result<G1Projective> {
    let point = Into::<Option<G1Affine>>::into(G1Affine::from_compressed(bytes))
        .map(G1Projective::from)
        .ok_or(OberonError::InvalidEncoding("compressed G1 point"))?;
    if bool::from(point.is_identity()) {
        return Err(OberonError::InvalidPoint);
    }
    Ok(point)
}

pub(crate) fn try_deserialize_g2_projective(bytes: &[u8; 96]) -> Result<G2Projective> {
    let point = Into::<Option<G2Affine>>::into(G2Affine::from_compressed(bytes))
        .map(G2Projective::from)
        .ok_or(OberonError::InvalidEncoding("compressed G2 point"))?;
    if bool::from(point.is_identity()) {
        return Err(OberonError::InvalidPoint);
    }
    Ok(point)
}

/// Checks whether e(P, Q) * e(-R, S) == id
pub(crate) fn check_bilinear_pairing(
    p: &G1Affine,
    q: &G2Prepared,
    r: &G1Affine,
    s: &G2Prepared,
) -> bool {
    // equivalent to checking e(P, Q) == e(R, S), with a single final
    // exponentiation over the combined Miller loop
    let multi_miller = multi_miller_loop(&[(p, q), (&r.neg(), s)]);
    multi_miller.final_exponentiation().is_identity().into()
}

/// The G2 generator shows up on the right-hand side of every pairing
/// check, so its Miller-loop preparation is computed once per process.
pub(crate) fn prepared_miller_g2() -> &'static G2Prepared {
    static PREPARED_G2: OnceLock<G2Prepared> = OnceLock::new();
    PREPARED_G2.get_or_init(|| G2Prepared::from(G2Affine::generator()))
}
