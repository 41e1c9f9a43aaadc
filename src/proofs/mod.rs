// Copyright 2024 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

use std::convert::TryFrom;

use bls12_381::{multi_miller_loop, G1Projective, G2Prepared, Scalar};
use ff::Field;
use group::{Curve, Group};
use rand_core::{CryptoRng, RngCore};

use crate::error::{OberonError, Result};
use crate::scheme::blinding::Blinding;
use crate::scheme::derive_from_id;
use crate::scheme::issuance::Token;
use crate::scheme::keygen::PublicKey;
use crate::scheme::verification::pairing_rhs;
use crate::traits::{Base58, Bytable};
use crate::utils::{
    hash_to_scalar, prepared_miller_g2, try_deserialize_g1_projective, try_random_scalar,
};

/// A non-interactive proof of possession of a valid token:
///
/// U' = r * U                                  for random r
/// t  = H_s(compressed(U') || nonce)
/// Z  = -((r + t) * (T + sum of blindings))
///
/// where T is the holder's (possibly blinded) token. The verifier checks
///
/// e(U' + t*U, w*m' + x + y*m) * e(Z, G2) == 1
///
/// which holds exactly when T plus the presented blindings equals the
/// token originally issued over the identifier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Proof {
    u_tick: G1Projective,
    z: G1Projective,
}

impl Proof {
    /// The number of bytes in the binary encoding of a proof.
    pub const BYTES: usize = 96;

    /// Creates a proof over `token` for the verifier-chosen `nonce`.
    ///
    /// `blindings` must be exactly the factors currently applied to
    /// `token`; they are added back in so the pairing sees the unblinded
    /// value. A mismatched set produces a proof that fails to open.
    pub fn create<M: AsRef<[u8]>, N: AsRef<[u8]>>(
        token: &Token,
        blindings: &[Blinding],
        id: M,
        nonce: N,
        mut rng: impl RngCore + CryptoRng,
    ) -> Result<Proof> {
        let derived = derive_from_id(id.as_ref())?;

        let r = random_proof_scalar(&mut rng)?;
        let u_tick = derived.u * r;
        let t = hash_to_scalar(&[&u_tick.to_affine().to_compressed(), nonce.as_ref()]);

        let unblinded = token.0 + blindings.iter().map(|b| b.0).sum::<G1Projective>();
        let z = -(unblinded * (r + t));

        Ok(Proof { u_tick, z })
    }

    /// Verifies the proof against the issuer's public key.
    ///
    /// Every internal failure collapses into `InvalidProof` so callers
    /// cannot distinguish a wrong identifier from a wrong nonce, a wrong
    /// blinding set, or a forgery.
    pub fn open<M: AsRef<[u8]>, N: AsRef<[u8]>>(
        &self,
        pk: &PublicKey,
        id: M,
        nonce: N,
    ) -> Result<()> {
        if bool::from(self.u_tick.is_identity() | self.z.is_identity()) || !pk.is_valid() {
            return Err(OberonError::InvalidProof);
        }

        let derived =
            derive_from_id(id.as_ref()).map_err(|_| OberonError::InvalidProof)?;

        let t = hash_to_scalar(&[&self.u_tick.to_affine().to_compressed(), nonce.as_ref()]);
        let lhs = self.u_tick + derived.u * t;
        let rhs = pairing_rhs(pk, &derived);

        // Z already carries the negation, so the product of the two
        // pairings lands on the identity for a valid proof
        let accepted: bool = multi_miller_loop(&[
            (&lhs.to_affine(), &G2Prepared::from(rhs.to_affine())),
            (&self.z.to_affine(), prepared_miller_g2()),
        ])
        .final_exponentiation()
        .is_identity()
        .into();

        if accepted {
            Ok(())
        } else {
            Err(OberonError::InvalidProof)
        }
    }

    /// compressed(U') || compressed(Z)
    pub fn to_bytes(&self) -> [u8; Self::BYTES] {
        let mut bytes = [0u8; Self::BYTES];
        bytes[..48].copy_from_slice(&self.u_tick.to_affine().to_compressed());
        bytes[48..].copy_from_slice(&self.z.to_affine().to_compressed());
        bytes
    }
}

impl TryFrom<&[u8]> for Proof {
    type Error = OberonError;

    fn try_from(bytes: &[u8]) -> Result<Proof> {
        if bytes.len() != Self::BYTES {
            return Err(OberonError::InvalidLength {
                expected: Self::BYTES,
                actual: bytes.len(),
            });
        }

        // safety: we just checked the length and slice with constant offsets
        #[allow(clippy::unwrap_used)]
        let u_tick = try_deserialize_g1_projective(&bytes[..48].try_into().unwrap())?;
        #[allow(clippy::unwrap_used)]
        let z = try_deserialize_g1_projective(&bytes[48..].try_into().unwrap())?;

        Ok(Proof { u_tick, z })
    }
}

impl Bytable for Proof {
    fn to_byte_vec(&self) -> Vec<u8> {
        self.to_bytes().to_vec()
    }

    fn try_from_byte_slice(slice: &[u8]) -> Result<Self> {
        Proof::try_from(slice)
    }
}

impl Base58 for Proof {}

// The Fiat-Shamir blinding scalar must be invertible and must not fix
// U' = U, hence neither zero nor one.
fn random_proof_scalar(rng: &mut (impl RngCore + CryptoRng)) -> Result<Scalar> {
    loop {
        let scalar = try_random_scalar(rng)?;
        if !bool::from(scalar.is_zero()) && scalar != Scalar::one() {
            return Ok(scalar);
        }
    }
}
