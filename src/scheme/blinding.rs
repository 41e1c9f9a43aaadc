// Copyright 2024 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

use std::convert::TryFrom;

use bls12_381::G1Projective;
use group::{Curve, Group};

use crate::error::{OberonError, Result};
use crate::traits::{Base58, Bytable};
use crate::utils::{hash_g1, try_deserialize_g1_projective};

/// An extra authentication factor: a G1 point derived from holder-local
/// secret bytes (a PIN, a device secret, a biometric template). The bytes
/// themselves never travel; both sides only ever exchange the point.
///
/// Subtracting a blinding from a token hides the token; the same blinding
/// must be presented at proving time for the proof to open.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Blinding(pub(crate) G1Projective);

impl Blinding {
    /// The number of bytes in the binary encoding of a blinding factor.
    pub const BYTES: usize = 48;

    /// Derives a blinding factor by hashing `data` to G1.
    pub fn new<M: AsRef<[u8]>>(data: M) -> Result<Blinding> {
        let point = hash_g1(data);
        if bool::from(point.is_identity()) {
            return Err(OberonError::InvalidPoint);
        }
        Ok(Blinding(point))
    }

    pub fn to_bytes(&self) -> [u8; Self::BYTES] {
        self.0.to_affine().to_compressed()
    }
}

impl TryFrom<&[u8]> for Blinding {
    type Error = OberonError;

    fn try_from(bytes: &[u8]) -> Result<Blinding> {
        if bytes.len() != Self::BYTES {
            return Err(OberonError::InvalidLength {
                expected: Self::BYTES,
                actual: bytes.len(),
            });
        }

        // safety: we just checked the length
        #[allow(clippy::unwrap_used)]
        let point = try_deserialize_g1_projective(&bytes.try_into().unwrap())?;
        Ok(Blinding(point))
    }
}

impl Bytable for Blinding {
    fn to_byte_vec(&self) -> Vec<u8> {
        self.to_bytes().to_vec()
    }

    fn try_from_byte_slice(slice: &[u8]) -> Result<Self> {
        Blinding::try_from(slice)
    }
}

impl Base58 for Blinding {}
