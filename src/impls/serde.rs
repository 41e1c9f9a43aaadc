// Copyright 2024 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

// The text wire format: every object is a JSON value whose byte content is
// the binary encoding, spelled as arrays of byte integers. Keys and proofs
// are maps ({"w":[..],"x":[..],"y":[..]} / {"u_tick":[..],"z":[..]});
// tokens and blindings are bare arrays.

use serde::de::Error;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::OberonError;
use crate::proofs::Proof;
use crate::scheme::blinding::Blinding;
use crate::scheme::issuance::Token;
use crate::scheme::keygen::{PublicKey, SecretKey};
use crate::traits::Bytable;

fn require_field<E: Error>(
    field: Option<Vec<u8>>,
    name: &'static str,
) -> Result<Vec<u8>, E> {
    field.ok_or_else(|| E::custom(OberonError::MissingField(name)))
}

fn fixed_width<E: Error, const N: usize>(bytes: Vec<u8>) -> Result<[u8; N], E> {
    let actual = bytes.len();
    bytes.try_into().map_err(|_| {
        E::custom(OberonError::InvalidLength {
            expected: N,
            actual,
        })
    })
}

impl Serialize for SecretKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("SecretKey", 3)?;
        state.serialize_field("w", &self.w.to_bytes()[..])?;
        state.serialize_field("x", &self.x.to_bytes()[..])?;
        state.serialize_field("y", &self.y.to_bytes()[..])?;
        state.end()
    }
}

impl<'de> Deserialize<'de> for SecretKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<SecretKey, D::Error> {
        #[derive(Deserialize)]
        struct Fields {
            w: Option<Vec<u8>>,
            x: Option<Vec<u8>>,
            y: Option<Vec<u8>>,
        }

        let fields = Fields::deserialize(deserializer)?;
        let w = require_field::<D::Error>(fields.w, "w")?;
        let x = require_field::<D::Error>(fields.x, "x")?;
        let y = require_field::<D::Error>(fields.y, "y")?;

        let mut bytes = Vec::with_capacity(SecretKey::BYTES);
        bytes.extend_from_slice(&fixed_width::<D::Error, 32>(w)?);
        bytes.extend_from_slice(&fixed_width::<D::Error, 32>(x)?);
        bytes.extend_from_slice(&fixed_width::<D::Error, 32>(y)?);

        SecretKey::try_from_byte_slice(&bytes).map_err(D::Error::custom)
    }
}

impl Serialize for PublicKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let bytes = self.to_bytes();
        let mut state = serializer.serialize_struct("PublicKey", 3)?;
        state.serialize_field("w", &bytes[..96])?;
        state.serialize_field("x", &bytes[96..192])?;
        state.serialize_field("y", &bytes[192..])?;
        state.end()
    }
}

impl<'de> Deserialize<'de> for PublicKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<PublicKey, D::Error> {
        #[derive(Deserialize)]
        struct Fields {
            w: Option<Vec<u8>>,
            x: Option<Vec<u8>>,
            y: Option<Vec<u8>>,
        }

        let fields = Fields::deserialize(deserializer)?;
        let w = require_field::<D::Error>(fields.w, "w")?;
        let x = require_field::<D::Error>(fields.x, "x")?;
        let y = require_field::<D::Error>(fields.y, "y")?;

        let mut bytes = Vec::with_capacity(PublicKey::BYTES);
        bytes.extend_from_slice(&fixed_width::<D::Error, 96>(w)?);
        bytes.extend_from_slice(&fixed_width::<D::Error, 96>(x)?);
        bytes.extend_from_slice(&fixed_width::<D::Error, 96>(y)?);

        PublicKey::try_from_byte_slice(&bytes).map_err(D::Error::custom)
    }
}

impl Serialize for Proof {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let bytes = self.to_bytes();
        let mut state = serializer.serialize_struct("Proof", 2)?;
        state.serialize_field("u_tick", &bytes[..48])?;
        state.serialize_field("z", &bytes[48..])?;
        state.end()
    }
}

impl<'de> Deserialize<'de> for Proof {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Proof, D::Error> {
        #[derive(Deserialize)]
        struct Fields {
            u_tick: Option<Vec<u8>>,
            z: Option<Vec<u8>>,
        }

        let fields = Fields::deserialize(deserializer)?;
        let u_tick = require_field::<D::Error>(fields.u_tick, "u_tick")?;
        let z = require_field::<D::Error>(fields.z, "z")?;

        let mut bytes = Vec::with_capacity(Proof::BYTES);
        bytes.extend_from_slice(&fixed_width::<D::Error, 48>(u_tick)?);
        bytes.extend_from_slice(&fixed_width::<D::Error, 48>(z)?);

        Proof::try_from_byte_slice(&bytes).map_err(D::Error::custom)
    }
}

macro_rules! impl_byte_array_serde {
    ($struct:ident) => {
        impl Serialize for $struct {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                self.to_bytes()[..].serialize(serializer)
            }
        }

        impl<'de> Deserialize<'de> for $struct {
            fn deserialize<D: Deserializer<'de>>(
                deserializer: D,
            ) -> Result<$struct, D::Error> {
                let bytes = Vec::<u8>::deserialize(deserializer)?;
                $struct::try_from_byte_slice(&bytes).map_err(D::Error::custom)
            }
        }
    };
}

impl_byte_array_serde!(Token);
impl_byte_array_serde!(Blinding);
