// Copyright 2024 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

use bls12_381::{G2Prepared, G2Projective};
use group::Curve;

use crate::error::{OberonError, Result};
use crate::scheme::issuance::Token;
use crate::scheme::keygen::PublicKey;
use crate::scheme::{derive_from_id, IdDerivation};
use crate::utils::{check_bilinear_pairing, prepared_miller_g2};

/// The public-key aggregate a valid token pairs against:
/// w * m' + x + y * m, all in G2.
pub(crate) fn pairing_rhs(pk: &PublicKey, derived: &IdDerivation) -> G2Projective {
    pk.w * derived.m_tick + pk.x + pk.y * derived.m
}

pub(crate) fn verify_token(pk: &PublicKey, token: &Token, id: &[u8]) -> Result<()> {
    if !pk.is_valid() {
        return Err(OberonError::InvalidKey);
    }

    let derived = derive_from_id(id)?;
    let rhs = pairing_rhs(pk, &derived);

    // e(U, w*m' + x + y*m) == e(sigma, G2)
    if check_bilinear_pairing(
        &derived.u.to_affine(),
        &G2Prepared::from(rhs.to_affine()),
        &token.0.to_affine(),
        prepared_miller_g2(),
    ) {
        Ok(())
    } else {
        Err(OberonError::InvalidToken)
    }
}
