// Copyright 2024 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

// Interoperability anchors: fixed values that every conforming
// implementation of the scheme must reproduce byte for byte.

use crate::{Blinding, Proof, SecretKey, Token};

const TEST_ID: &[u8] = b"oberon test identity";

const NONCE: [u8; 16] = [
    138, 162, 3, 91, 76, 34, 240, 157, 149, 94, 93, 228, 214, 51, 50, 136,
];

const SECRET_KEY: [u8; 96] = [
    180, 92, 239, 44, 240, 143, 149, 163, 45, 177, 22, 179, 146, 120, 129, 229, 78, 56, 70, 205,
    251, 160, 140, 79, 159, 138, 6, 56, 250, 236, 176, 11, 70, 53, 138, 199, 245, 180, 223, 213,
    128, 166, 122, 225, 67, 58, 138, 201, 19, 114, 57, 149, 70, 141, 31, 45, 180, 30, 208, 222,
    234, 112, 21, 34, 37, 5, 163, 172, 96, 40, 81, 27, 89, 86, 163, 93, 15, 201, 200, 183, 157,
    18, 134, 140, 156, 43, 79, 231, 42, 234, 198, 139, 130, 52, 176, 106,
];

#[test]
fn seeded_key_derivation() {
    let sk = SecretKey::hash_from_seed([0u8; 32]);

    assert_eq!(
        sk.to_bytes(),
        [
            6, 129, 143, 106, 175, 152, 144, 81, 239, 218, 36, 33, 224, 247, 166, 82, 231, 107,
            54, 34, 63, 0, 42, 216, 230, 25, 194, 104, 39, 52, 134, 132, 86, 100, 67, 124, 53,
            144, 206, 125, 91, 24, 39, 39, 207, 81, 87, 32, 72, 141, 111, 179, 210, 81, 177, 208,
            135, 247, 119, 255, 97, 119, 192, 122, 37, 67, 118, 118, 48, 31, 164, 95, 215, 216,
            235, 243, 165, 81, 54, 235, 56, 136, 107, 174, 131, 82, 7, 0, 211, 145, 6, 83, 14,
            135, 124, 107
        ]
    );
}

#[test]
fn token_issuance() {
    let sk = SecretKey::try_from(&SECRET_KEY[..]).unwrap();
    let token = sk.sign(TEST_ID).unwrap();

    assert_eq!(
        token.to_bytes(),
        [
            174, 221, 77, 7, 147, 66, 236, 180, 112, 106, 14, 104, 35, 123, 13, 189, 211, 158,
            32, 194, 24, 50, 49, 93, 87, 126, 102, 20, 192, 132, 157, 221, 83, 98, 81, 93, 155,
            137, 134, 9, 58, 108, 30, 237, 108, 13, 40, 242
        ]
    );
}

#[test]
fn token_verification() {
    let sk = SecretKey::try_from(&SECRET_KEY[..]).unwrap();
    let pk = sk.public_key();
    let token = sk.sign(TEST_ID).unwrap();

    assert!(token.verify(&pk, TEST_ID).is_ok());
    assert!(token.verify(&pk, b"wrong identity").is_err());
}

#[test]
fn proof_round_trip() {
    let sk = SecretKey::try_from(&SECRET_KEY[..]).unwrap();
    let pk = sk.public_key();
    let token = sk.sign(TEST_ID).unwrap();
    let blinding = Blinding::new(b"1234").unwrap();
    let blinded = token.apply_blinding(&blinding);

    let proof =
        Proof::create(&blinded, &[blinding], TEST_ID, NONCE, rand::thread_rng()).unwrap();
    assert!(proof.open(&pk, TEST_ID, NONCE).is_ok());
    assert!(proof.open(&pk, b"wrong id", NONCE).is_err());
    assert!(proof.open(&pk, TEST_ID, b"wrong nonce").is_err());

    // the blinding has to be declared even though the token carries it
    let proof = Proof::create(&blinded, &[], TEST_ID, NONCE, rand::thread_rng()).unwrap();
    assert!(proof.open(&pk, TEST_ID, NONCE).is_err());
}

#[test]
fn proof_verification() {
    let sk = SecretKey::try_from(&SECRET_KEY[..]).unwrap();
    let pk = sk.public_key();
    let id = [0xaau8];

    // the holder's stored (blinded) token decodes, but plays no part in
    // opening the proof
    let _token = Token::try_from(
        &[
            143, 76, 71, 184, 181, 108, 255, 176, 145, 87, 159, 178, 222, 214, 185, 70, 198, 89,
            178, 123, 151, 184, 209, 113, 152, 151, 239, 189, 117, 44, 74, 10, 240, 143, 71, 26,
            254, 241, 103, 106, 219, 119, 78, 99, 30, 156, 220, 52
        ][..],
    )
    .unwrap();

    let proof = Proof::try_from(
        &[
            169, 151, 72, 189, 126, 2, 128, 40, 39, 174, 163, 164, 41, 139, 114, 31, 45, 46, 138,
            93, 53, 150, 85, 222, 173, 203, 65, 109, 78, 81, 92, 169, 205, 146, 145, 184, 63,
            142, 74, 21, 154, 170, 19, 42, 229, 127, 37, 26, 128, 146, 80, 33, 53, 27, 127, 227,
            166, 75, 103, 68, 50, 78, 177, 173, 25, 64, 249, 171, 109, 118, 202, 32, 85, 197, 95,
            168, 212, 169, 199, 68, 139, 229, 4, 154, 60, 133, 107, 147, 11, 58, 28, 86, 51, 215,
            193, 236
        ][..],
    )
    .unwrap();

    assert!(proof.open(&pk, id, NONCE).is_ok());
}
