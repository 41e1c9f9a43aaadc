// Copyright 2024 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

use std::convert::TryFrom;
use std::ops::{Add, Sub};

use bls12_381::G1Projective;
use group::{Curve, Group};
use subtle::{Choice, ConstantTimeEq};
use zeroize::Zeroize;

use crate::error::{OberonError, Result};
use crate::scheme::blinding::Blinding;
use crate::scheme::keygen::{PublicKey, SecretKey};
use crate::scheme::{derive_from_id, verification};
use crate::traits::{Base58, Bytable};
use crate::utils::try_deserialize_g1_projective;

/// An issued authentication token: a single G1 point
///
/// sigma = U * (x + w * m' + y * m)
///
/// over the values derived from the holder's identifier. `Display` is not
/// implemented so the token cannot leak through casual formatting.
#[derive(Debug, Clone)]
pub struct Token(pub(crate) G1Projective);

impl PartialEq for Token {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl ConstantTimeEq for Token {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.0.ct_eq(&other.0)
    }
}

impl Zeroize for Token {
    fn zeroize(&mut self) {
        self.0 = G1Projective::identity();
    }
}

impl Drop for Token {
    fn drop(&mut self) {
        self.zeroize();
    }
}

/// Applying a blinding is subtraction; `Proof::create` adds the presented
/// blindings back, so the two must not be mixed up.
impl Sub<&Blinding> for &Token {
    type Output = Token;

    fn sub(self, rhs: &Blinding) -> Token {
        Token(self.0 - rhs.0)
    }
}

impl Sub<&Blinding> for Token {
    type Output = Token;

    fn sub(self, rhs: &Blinding) -> Token {
        &self - rhs
    }
}

impl Add<&Blinding> for &Token {
    type Output = Token;

    fn add(self, rhs: &Blinding) -> Token {
        Token(self.0 + rhs.0)
    }
}

impl Add<&Blinding> for Token {
    type Output = Token;

    fn add(self, rhs: &Blinding) -> Token {
        &self + rhs
    }
}

impl Token {
    /// The number of bytes in the binary encoding of a token.
    pub const BYTES: usize = 48;

    /// Issues a token over `id` under the given secret key.
    pub fn issue<M: AsRef<[u8]>>(sk: &SecretKey, id: M) -> Result<Token> {
        let derived = derive_from_id(id.as_ref())?;

        // fused into a single scalar so only one G1 multiplication runs
        let exponent = sk.x + sk.w * derived.m_tick + sk.y * derived.m;
        let sigma = derived.u * exponent;
        if bool::from(sigma.is_identity()) {
            return Err(OberonError::InvalidToken);
        }

        Ok(Token(sigma))
    }

    /// Checks the pairing equation e(U, w*m' + x + y*m) == e(sigma, G2).
    ///
    /// Every internal failure collapses into `InvalidToken` so callers
    /// cannot be used as a decoding oracle.
    pub fn verify<M: AsRef<[u8]>>(&self, pk: &PublicKey, id: M) -> Result<()> {
        verification::verify_token(pk, self, id.as_ref()).map_err(|_| OberonError::InvalidToken)
    }

    /// Subtracts a blinding factor, hiding the raw token.
    pub fn apply_blinding(&self, blinding: &Blinding) -> Token {
        self - blinding
    }

    /// Adds a previously applied blinding factor back.
    pub fn remove_blinding(&self, blinding: &Blinding) -> Token {
        self + blinding
    }

    pub fn to_bytes(&self) -> [u8; Self::BYTES] {
        self.0.to_affine().to_compressed()
    }
}

impl TryFrom<&[u8]> for Token {
    type Error = OberonError;

    fn try_from(bytes: &[u8]) -> Result<Token> {
        if bytes.len() != Self::BYTES {
            return Err(OberonError::InvalidLength {
                expected: Self::BYTES,
                actual: bytes.len(),
            });
        }

        // safety: we just checked the length
        #[allow(clippy::unwrap_used)]
        let sigma = try_deserialize_g1_projective(&bytes.try_into().unwrap())?;
        Ok(Token(sigma))
    }
}

impl Bytable for Token {
    fn to_byte_vec(&self) -> Vec<u8> {
        self.to_bytes().to_vec()
    }

    fn try_from_byte_slice(slice: &[u8]) -> Result<Self> {
        Token::try_from(slice)
    }
}

impl Base58 for Token {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issued_token_verifies() {
        let sk = SecretKey::new(rand::thread_rng()).unwrap();
        let pk = sk.public_key();
        let token = sk.sign(b"issued_token_verifies").unwrap();

        assert!(token.verify(&pk, b"issued_token_verifies").is_ok());
        assert!(matches!(
            token.verify(&pk, b"some other identity"),
            Err(OberonError::InvalidToken)
        ));
    }

    #[test]
    fn token_rejects_foreign_key() {
        let sk = SecretKey::new(rand::thread_rng()).unwrap();
        let other = SecretKey::new(rand::thread_rng()).unwrap();
        let token = sk.sign(b"token_rejects_foreign_key").unwrap();

        assert!(token
            .verify(&other.public_key(), b"token_rejects_foreign_key")
            .is_err());
    }

    #[test]
    fn blinding_commutes() {
        let sk = SecretKey::new(rand::thread_rng()).unwrap();
        let token = sk.sign(b"blinding_commutes").unwrap();
        let pin = Blinding::new(b"1234").unwrap();
        let device = Blinding::new(b"device secret").unwrap();

        assert_eq!(
            token.apply_blinding(&pin).apply_blinding(&device),
            token.apply_blinding(&device).apply_blinding(&pin),
        );
    }

    #[test]
    fn blinding_inverts() {
        let sk = SecretKey::new(rand::thread_rng()).unwrap();
        let token = sk.sign(b"blinding_inverts").unwrap();
        let pin = Blinding::new(b"1234").unwrap();

        let blinded = token.apply_blinding(&pin);
        assert_ne!(blinded, token);
        assert_eq!(blinded.remove_blinding(&pin), token);
    }

    #[test]
    fn blinded_token_does_not_verify() {
        let sk = SecretKey::new(rand::thread_rng()).unwrap();
        let pk = sk.public_key();
        let token = sk.sign(b"blinded_token_does_not_verify").unwrap();
        let blinded = token.apply_blinding(&Blinding::new(b"1234").unwrap());

        assert!(blinded.verify(&pk, b"blinded_token_does_not_verify").is_err());
    }

    #[test]
    fn token_bytes_roundtrip() {
        let sk = SecretKey::new(rand::thread_rng()).unwrap();
        let token = sk.sign(b"token_bytes_roundtrip").unwrap();
        let bytes = token.to_bytes();

        assert_eq!(bytes.len(), Token::BYTES);
        assert_eq!(Token::try_from(&bytes[..]).unwrap(), token);
    }

    #[test]
    fn token_rejects_identity() {
        let identity = bls12_381::G1Affine::identity().to_compressed();

        assert!(matches!(
            Token::try_from(&identity[..]),
            Err(OberonError::InvalidPoint)
        ));
    }
}
