// Copyright 2024 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

use bls12_381::{G1Projective, Scalar};
use ff::Field;
use group::Group;

use crate::error::{OberonError, Result};
use crate::utils::{hash_g1, hash_to_scalar};

pub mod blinding;
pub mod issuance;
pub mod keygen;
pub mod verification;

/// The values derived from an identifier, shared by issuance, token
/// verification and proof creation/opening:
///
/// m  = H_s(id)
/// m' = H_s(m)
/// U  = H_G1(m')
///
/// with scalars fed back into the hash in their 32-byte little-endian form.
pub(crate) struct IdDerivation {
    pub(crate) m: Scalar,
    pub(crate) m_tick: Scalar,
    pub(crate) u: G1Projective,
}

pub(crate) fn derive_from_id(id: &[u8]) -> Result<IdDerivation> {
    let m = hash_to_scalar(&[id]);
    if bool::from(m.is_zero()) {
        return Err(OberonError::DerivationFailure);
    }

    let m_tick = hash_to_scalar(&[&m.to_bytes()[..]]);
    if bool::from(m_tick.is_zero()) {
        return Err(OberonError::DerivationFailure);
    }

    let u = hash_g1(m_tick.to_bytes());
    if bool::from(u.is_identity()) {
        return Err(OberonError::DerivationFailure);
    }

    Ok(IdDerivation { m, m_tick, u })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derivation_is_deterministic_and_id_bound() {
        let first = derive_from_id(b"alice@example.com").unwrap();
        let second = derive_from_id(b"alice@example.com").unwrap();
        let other = derive_from_id(b"bob@example.com").unwrap();

        assert_eq!(first.m, second.m);
        assert_eq!(first.m_tick, second.m_tick);
        assert_eq!(first.u, second.u);

        assert_ne!(first.m, other.m);
        assert_ne!(first.m_tick, other.m_tick);
        assert_ne!(first.u, other.u);
    }

    #[test]
    fn derivation_accepts_empty_id() {
        // an empty identifier is allowed, it simply hashes the bare domain tag
        let derived = derive_from_id(b"").unwrap();
        assert!(!bool::from(derived.u.is_identity()));
    }
}
