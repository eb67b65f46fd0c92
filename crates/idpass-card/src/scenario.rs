// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// End-to-end card lifecycle with the production face engine: issue, print,
// scan, then verify by PIN and by face.

use std::io::Cursor;

use idpass_biometrics::LumaFaceEngine;
use idpass_core::error::IdPassError;
use idpass_core::outcome::{PublicOutcome, public_outcome};
use idpass_security::KeyContext;
use image::{DynamicImage, GrayImage, ImageFormat, Luma};

use crate::service::CardService;
use crate::test_support::{TestKeys, fast_config, manny};

fn png(image: GrayImage) -> Vec<u8> {
    let mut buf = Cursor::new(Vec::new());
    DynamicImage::ImageLuma8(image)
        .write_to(&mut buf, ImageFormat::Png)
        .expect("png encode");
    buf.into_inner()
}

/// Portrait with a bright centre band, lit at `exposure`.
fn manny_photo(exposure: u8) -> Vec<u8> {
    png(GrayImage::from_fn(96, 128, |x, y| {
        let base = 40 + (x as i32 - 48).unsigned_abs() as u8 + (y / 4) as u8;
        Luma([base.saturating_add(exposure)])
    }))
}

/// A different face: dark centre, brighter towards the top.
fn stranger_photo() -> Vec<u8> {
    png(GrayImage::from_fn(96, 128, |x, y| {
        Luma([140 - (x as i32 - 48).unsigned_abs() as u8 - (y / 4) as u8])
    }))
}

#[test]
fn manny_pacquiao_card_lifecycle() {
    let keys = TestKeys::generate();
    let service = CardService::new(LumaFaceEngine::default(), fast_config()).unwrap();

    let card = service
        .create_card(&keys.issuer, manny(), &manny_photo(0), "12345")
        .expect("issuance failed");

    let bitmap = service.encode_to_barcode(&card).expect("barcode encode failed");
    let scanned = service
        .decode_from_barcode(bitmap.bits(), bitmap.side())
        .expect("barcode decode failed");

    let terminal = keys.verifier();

    let by_pin = service
        .verify_with_pin(&terminal, &scanned, "12345")
        .expect("PIN verification failed");
    assert_eq!(by_pin.surname(), "Pacquiao");
    assert_eq!(by_pin.given_name(), "Manny");
    assert_eq!(by_pin.date_of_birth(), "1978/12/17");
    assert_eq!(by_pin.place_of_birth(), "Kibawe, Bukidnon");

    let wrong_pin = service.verify_with_pin(&terminal, &scanned, "00000");
    let err = wrong_pin.expect_err("wrong PIN accepted");
    assert!(matches!(err, IdPassError::PinMismatch));
    assert_eq!(public_outcome(&err).outcome, PublicOutcome::CredentialRejected);

    let stranger = service
        .verify_with_face(&terminal, &scanned, &stranger_photo())
        .expect("stranger photo should not be an error");
    assert!(stranger.is_none());

    let second_photo = service
        .verify_with_face(&terminal, &scanned, &manny_photo(25))
        .expect("face verification failed")
        .expect("second photo of the cardholder rejected");
    assert_eq!(second_photo.surname(), by_pin.surname());
    assert_eq!(second_photo.given_name(), by_pin.given_name());
}

#[test]
fn forged_and_misconfigured_cards_look_the_same_publicly() {
    let keys = TestKeys::generate();
    let service = CardService::new(LumaFaceEngine::default(), fast_config()).unwrap();
    let card = service
        .create_card(&keys.issuer, manny(), &manny_photo(0), "12345")
        .unwrap();

    let stranger_keys = TestKeys::generate();
    let forged = service
        .verify_with_pin(&stranger_keys.issuer, &card, "12345")
        .expect_err("foreign signature accepted");

    let wrong_encryption =
        KeyContext::verification_only(stranger_keys.encryption_key(), &keys.public_key).unwrap();
    let undecryptable = service
        .verify_with_pin(&wrong_encryption, &card, "12345")
        .expect_err("wrong encryption key accepted");

    assert!(matches!(forged, IdPassError::InvalidSignature));
    assert!(matches!(undecryptable, IdPassError::DecryptionFailed));
    assert_eq!(public_outcome(&forged).outcome, PublicOutcome::CardInvalid);
    assert_eq!(
        public_outcome(&forged).message,
        public_outcome(&undecryptable).message
    );
}
