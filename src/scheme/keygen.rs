// Copyright 2024 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

use std::convert::TryFrom;

use bls12_381::{G2Projective, Scalar};
use group::{Curve, Group};
use rand_core::{CryptoRng, RngCore};
use subtle::{Choice, ConstantTimeEq};
use zeroize::Zeroize;

use crate::error::{OberonError, Result};
use crate::scheme::issuance::Token;
use crate::traits::{Base58, Bytable};
use crate::utils::{
    hash_to_scalars, try_deserialize_g2_projective, try_deserialize_nonzero_scalar,
    try_nonzero_random_scalar,
};

/// The issuing key: three scalars (w, x, y). `Display` is deliberately not
/// implemented so the scalars cannot leak through casual formatting.
#[derive(Debug, Clone)]
pub struct SecretKey {
    pub(crate) w: Scalar,
    pub(crate) x: Scalar,
    pub(crate) y: Scalar,
}

impl PartialEq for SecretKey {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl ConstantTimeEq for SecretKey {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.w.ct_eq(&other.w) & self.x.ct_eq(&other.x) & self.y.ct_eq(&other.y)
    }
}

impl Zeroize for SecretKey {
    fn zeroize(&mut self) {
        self.w = Scalar::zero();
        self.x = Scalar::zero();
        self.y = Scalar::zero();
    }
}

impl Drop for SecretKey {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl SecretKey {
    /// The number of bytes in the binary encoding of a secret key.
    pub const BYTES: usize = 96;

    /// Generates a fresh signing key from the supplied randomness source.
    ///
    /// Zero scalars are re-drawn; every downstream operation relies on the
    /// three values being non-zero.
    pub fn new(mut rng: impl RngCore + CryptoRng) -> Result<SecretKey> {
        Ok(SecretKey {
            w: try_nonzero_random_scalar(&mut rng)?,
            x: try_nonzero_random_scalar(&mut rng)?,
            y: try_nonzero_random_scalar(&mut rng)?,
        })
    }

    /// Derives a signing key deterministically from a seed with SHAKE-256,
    /// one 48-byte squeeze per scalar in (w, x, y) order.
    pub fn hash_from_seed<M: AsRef<[u8]>>(seed: M) -> SecretKey {
        let mut scalars = [Scalar::zero(); 3];
        hash_to_scalars(&[seed.as_ref()], &mut scalars);
        SecretKey {
            w: scalars[0],
            x: scalars[1],
            y: scalars[2],
        }
    }

    pub fn public_key(&self) -> PublicKey {
        PublicKey::from(self)
    }

    /// Issues a token bound to `id`.
    pub fn sign<M: AsRef<[u8]>>(&self, id: M) -> Result<Token> {
        Token::issue(self, id)
    }

    /// w || x || y, each scalar in 32-byte little-endian form.
    pub fn to_bytes(&self) -> [u8; Self::BYTES] {
        let mut bytes = [0u8; Self::BYTES];
        bytes[..32].copy_from_slice(&self.w.to_bytes());
        bytes[32..64].copy_from_slice(&self.x.to_bytes());
        bytes[64..].copy_from_slice(&self.y.to_bytes());
        bytes
    }
}

impl TryFrom<&[u8]> for SecretKey {
    type Error = OberonError;

    fn try_from(bytes: &[u8]) -> Result<SecretKey> {
        if bytes.len() != Self::BYTES {
            return Err(OberonError::InvalidLength {
                expected: Self::BYTES,
                actual: bytes.len(),
            });
        }

        // safety: we just checked the length and slice with constant offsets
        #[allow(clippy::unwrap_used)]
        let w = try_deserialize_nonzero_scalar(&bytes[..32].try_into().unwrap())?;
        #[allow(clippy::unwrap_used)]
        let x = try_deserialize_nonzero_scalar(&bytes[32..64].try_into().unwrap())?;
        #[allow(clippy::unwrap_used)]
        let y = try_deserialize_nonzero_scalar(&bytes[64..].try_into().unwrap())?;

        Ok(SecretKey { w, x, y })
    }
}

impl Bytable for SecretKey {
    fn to_byte_vec(&self) -> Vec<u8> {
        self.to_bytes().to_vec()
    }

    fn try_from_byte_slice(slice: &[u8]) -> Result<Self> {
        SecretKey::try_from(slice)
    }
}

impl Base58 for SecretKey {}

/// The verifying key: the three secret scalars lifted to G2.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PublicKey {
    pub(crate) w: G2Projective,
    pub(crate) x: G2Projective,
    pub(crate) y: G2Projective,
}

impl From<&SecretKey> for PublicKey {
    fn from(sk: &SecretKey) -> Self {
        PublicKey {
            w: G2Projective::generator() * sk.w,
            x: G2Projective::generator() * sk.x,
            y: G2Projective::generator() * sk.y,
        }
    }
}

impl PublicKey {
    /// The number of bytes in the binary encoding of a public key.
    pub const BYTES: usize = 288;

    pub fn from_secret(sk: &SecretKey) -> PublicKey {
        PublicKey::from(sk)
    }

    /// Checks that `token` was issued over `id` by the holder of the
    /// matching secret key. Any failure reports as an invalid token.
    pub fn verify<M: AsRef<[u8]>>(&self, id: M, token: &Token) -> Result<()> {
        token.verify(self, id)
    }

    /// compressed(w) || compressed(x) || compressed(y)
    pub fn to_bytes(&self) -> [u8; Self::BYTES] {
        let mut bytes = [0u8; Self::BYTES];
        bytes[..96].copy_from_slice(&self.w.to_affine().to_compressed());
        bytes[96..192].copy_from_slice(&self.x.to_affine().to_compressed());
        bytes[192..].copy_from_slice(&self.y.to_affine().to_compressed());
        bytes
    }

    pub(crate) fn is_valid(&self) -> bool {
        !bool::from(
            self.w.is_identity() | self.x.is_identity() | self.y.is_identity(),
        )
    }
}

impl TryFrom<&[u8]> for PublicKey {
    type Error = OberonError;

    fn try_from(bytes: &[u8]) -> Result<PublicKey> {
        if bytes.len() != Self::BYTES {
            return Err(OberonError::InvalidLength {
                expected: Self::BYTES,
                actual: bytes.len(),
            });
        }

        // safety: we just checked the length and slice with constant offsets
        #[allow(clippy::unwrap_used)]
        let w = try_deserialize_g2_projective(&bytes[..96].try_into().unwrap())?;
        #[allow(clippy::unwrap_used)]
        let x = try_deserialize_g2_projective(&bytes[96..192].try_into().unwrap())?;
        #[allow(clippy::unwrap_used)]
        let y = try_deserialize_g2_projective(&bytes[192..].try_into().unwrap())?;

        Ok(PublicKey { w, x, y })
    }
}

impl Bytable for PublicKey {
    fn to_byte_vec(&self) -> Vec<u8> {
        self.to_bytes().to_vec()
    }

    fn try_from_byte_slice(slice: &[u8]) -> Result<Self> {
        PublicKey::try_from(slice)
    }
}

impl Base58 for PublicKey {}
