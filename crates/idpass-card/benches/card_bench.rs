// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Criterion benchmarks for card issuance and verification in the idpass-card
// crate.

use std::io::Cursor;

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use image::{DynamicImage, GrayImage, ImageFormat, Luma};

use idpass_biometrics::LumaFaceEngine;
use idpass_card::CardService;
use idpass_core::{CardConfig, Identity};
use idpass_security::{KeyContext, generate_encryption_key, generate_signature_keypair};

fn context() -> KeyContext {
    let enc = generate_encryption_key().expect("keygen failed");
    let pair = generate_signature_keypair().expect("keygen failed");
    KeyContext::new(&enc[..], &pair.secret_key[..], &pair.public_key).expect("context failed")
}

fn portrait() -> Vec<u8> {
    let image = GrayImage::from_fn(240, 320, |x, y| {
        Luma([30 + ((x as i32 - 120).unsigned_abs() / 2) as u8 + (y / 8) as u8])
    });
    let mut buf = Cursor::new(Vec::new());
    DynamicImage::ImageLuma8(image)
        .write_to(&mut buf, ImageFormat::Png)
        .expect("png encode failed");
    buf.into_inner()
}

fn identity() -> Identity {
    Identity {
        surname: "Pacquiao".into(),
        given_name: "Manny".into(),
        date_of_birth: "1978/12/17".into(),
        place_of_birth: "Kibawe, Bukidnon".into(),
        attributes: "gender:male, sports:boxing, children:5, height:1.66m".into(),
    }
}

// ---------------------------------------------------------------------------
// Benchmarks
// ---------------------------------------------------------------------------

/// Full issuance with a reduced PIN cost, so the envelope work is visible
/// next to the face extraction.
fn bench_issuance(c: &mut Criterion) {
    let keys = context();
    let config = CardConfig {
        pin_kdf_iterations: 1_000,
        ..CardConfig::default()
    };
    let service = CardService::new(LumaFaceEngine::default(), config).expect("config rejected");
    let photo = portrait();

    c.bench_function("create_card", |b| {
        b.iter(|| {
            black_box(
                service
                    .create_card(&keys, identity(), black_box(&photo), "12345")
                    .expect("issuance failed"),
            )
        });
    });
}

/// Opening a card without a credential check: signature, decryption and
/// record decoding only.
fn bench_open(c: &mut Criterion) {
    let keys = context();
    let service = CardService::new(LumaFaceEngine::default(), CardConfig::default())
        .expect("config rejected");
    let card = service
        .create_card(&keys, identity(), &portrait(), "12345")
        .expect("issuance failed");

    c.bench_function("open_card", |b| {
        b.iter(|| black_box(service.open_card(&keys, black_box(&card)).expect("open failed")));
    });
}

fn bench_face_verification(c: &mut Criterion) {
    let keys = context();
    let service = CardService::new(LumaFaceEngine::default(), CardConfig::default())
        .expect("config rejected");
    let photo = portrait();
    let card = service
        .create_card(&keys, identity(), &photo, "12345")
        .expect("issuance failed");

    c.bench_function("verify_with_face", |b| {
        b.iter(|| {
            black_box(
                service
                    .verify_with_face(&keys, &card, black_box(&photo))
                    .expect("verification failed"),
            )
        });
    });
}

criterion_group!(benches, bench_issuance, bench_open, bench_face_verification);
criterion_main!(benches);
