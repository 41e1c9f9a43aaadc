// Copyright 2024 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

//! Oberon: short, single-use, blindable authentication tokens over BLS12-381.
//!
//! An issuer signs an identifier into a 48-byte token. The holder can hide
//! the token behind any number of extra factors (a PIN, a device secret) by
//! subtracting [`Blinding`] points, and later convince a verifier that it
//! possesses a valid token for the identifier - without ever revealing the
//! token - through a 96-byte zero-knowledge [`Proof`] bound to a
//! verifier-chosen nonce. Verifiers only need the 288-byte public key; there
//! is no token database to protect on the server side.
//!
//! ```
//! use oberon::{Blinding, Proof, SecretKey};
//!
//! # fn main() -> Result<(), oberon::OberonError> {
//! let sk = SecretKey::new(rand::thread_rng())?;
//! let pk = sk.public_key();
//!
//! let id = b"alice@example.com";
//! let token = sk.sign(id)?;
//!
//! // lock the token behind a PIN
//! let pin = Blinding::new(b"1234")?;
//! let blinded = token.apply_blinding(&pin);
//!
//! // the verifier picks a fresh nonce per session
//! let nonce = b"a fresh session nonce";
//!
//! let proof = Proof::create(&blinded, &[pin], id, nonce, rand::thread_rng())?;
//! assert!(proof.open(&pk, id, nonce).is_ok());
//! # Ok(())
//! # }
//! ```
//!
//! The nonce is the only replay defence: proofs for the same token and nonce
//! are linkable, so verifiers must choose a fresh, unpredictable nonce for
//! every session.

#![warn(clippy::expect_used)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::todo)]
#![warn(clippy::dbg_macro)]

pub use crate::error::{OberonError, Result};
pub use crate::proofs::Proof;
pub use crate::scheme::blinding::Blinding;
pub use crate::scheme::issuance::Token;
pub use crate::scheme::keygen::{PublicKey, SecretKey};
pub use crate::traits::{Base58, Bytable};
pub use crate::utils::{hash_g1, hash_to_scalar, hash_to_scalars};

mod error;
mod impls;
mod proofs;
mod scheme;
#[cfg(test)]
mod tests;
mod traits;
mod utils;
