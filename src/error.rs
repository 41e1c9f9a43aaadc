// Copyright 2024 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

use thiserror::Error;

/// A `Result` alias where the `Err` case is `oberon::OberonError`.
pub type Result<T> = std::result::Result<T, OberonError>;

/// All the ways an Oberon operation can fail. Every variant is recoverable
/// by the caller; the library never retries and never panics.
#[derive(Error, Debug)]
pub enum OberonError {
    #[error("invalid length, expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("bytes do not decode to a {0}")]
    InvalidEncoding(&'static str),

    #[error("point is the identity, off the curve, or outside the prime-order subgroup")]
    InvalidPoint,

    #[error("scalar is zero where a non-zero value is required")]
    InvalidScalar,

    #[error("key invariants not satisfied")]
    InvalidKey,

    #[error("token failed the validity check")]
    InvalidToken,

    #[error("proof failed to verify")]
    InvalidProof,

    #[error("the randomness source failed")]
    RngFailure,

    #[error("identifier derivation produced a degenerate value")]
    DerivationFailure,

    #[error("missing expected map key '{0}'")]
    MissingField(&'static str),

    #[error("could not decode base 58 string - {0}")]
    MalformedString(#[from] bs58::decode::Error),
}
