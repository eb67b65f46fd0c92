// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Shared fixtures for the card pipeline tests.

use idpass_biometrics::{FaceEngine, cosine_similarity};
use idpass_core::config::CardConfig;
use idpass_core::error::{IdPassError, Result};
use idpass_core::types::{
    CardDetails, CardKeys, FaceTemplate, Identity, PIN_HASH_LEN, PIN_SALT_LEN, PinCredential,
    PUBLIC_KEY_LEN, SEED_LEN, TEMPLATE_DIM,
};
use idpass_security::{
    CardCipher, ChaChaCipher, KeyContext, SIGNING_SECRET_KEY_LEN, generate_encryption_key,
    generate_signature_keypair,
};
use zeroize::Zeroizing;

use crate::service::CardService;

pub const MANNY_PHOTO: &[u8] = b"manny-1";
pub const MANNY_SECOND_PHOTO: &[u8] = b"manny-2";
pub const STRANGER_PHOTO: &[u8] = b"brad";
pub const FACELESS_PHOTO: &[u8] = b"no-face";

/// A full system key set plus the issuing context built from it.
pub struct TestKeys {
    pub issuer: KeyContext,
    pub secret_key: Zeroizing<[u8; SIGNING_SECRET_KEY_LEN]>,
    pub public_key: [u8; PUBLIC_KEY_LEN],
}

impl TestKeys {
    pub fn generate() -> Self {
        let encryption = generate_encryption_key().expect("keygen failed");
        let pair = generate_signature_keypair().expect("keygen failed");
        let issuer = KeyContext::new(&encryption[..], &pair.secret_key[..], &pair.public_key)
            .expect("context failed");
        Self {
            issuer,
            secret_key: pair.secret_key,
            public_key: pair.public_key,
        }
    }

    pub fn encryption_key(&self) -> &[u8] {
        self.issuer.encryption_key()
    }

    /// A context sharing these keys that can open cards but not issue them.
    pub fn verifier(&self) -> KeyContext {
        KeyContext::verification_only(self.encryption_key(), &self.public_key)
            .expect("context failed")
    }
}

pub fn manny() -> Identity {
    Identity {
        surname: "Pacquiao".into(),
        given_name: "Manny".into(),
        date_of_birth: "1978/12/17".into(),
        place_of_birth: "Kibawe, Bukidnon".into(),
        attributes: "gender:male, sports:boxing, children:5, height:1.66m".into(),
    }
}

/// A fixed record built without randomness, for codec and envelope tests.
pub fn manny_details() -> CardDetails {
    CardDetails::new(
        manny(),
        PinCredential::Pbkdf2 {
            iterations: 1_000,
            salt: [0x5A; PIN_SALT_LEN],
            hash: [0xC3; PIN_HASH_LEN],
        },
        subject_template(1.0, 0.0),
        CardKeys::Ed25519 {
            seed: [0x42; SEED_LEN],
            public_key: [0x24; PUBLIC_KEY_LEN],
        },
    )
}

/// Config with cheap PIN hashing so tests stay fast.
pub fn fast_config() -> CardConfig {
    CardConfig {
        pin_kdf_iterations: 1_000,
        ..CardConfig::default()
    }
}

pub fn stub_service() -> CardService<StubFaceEngine> {
    CardService::new(StubFaceEngine, fast_config()).expect("config rejected")
}

/// A template following `sin(frequency * i) + offset`.
fn subject_template(frequency: f32, offset: f32) -> FaceTemplate {
    let values = (0..TEMPLATE_DIM)
        .map(|i| (frequency * 0.3 * i as f32).sin() + offset)
        .collect();
    FaceTemplate::new(values).expect("template rejected")
}

/// Face engine keyed on photo bytes: two photos of Manny that match each
/// other, one stranger, and one photo with no face.
#[derive(Debug, Clone, Copy)]
pub struct StubFaceEngine;

impl FaceEngine for StubFaceEngine {
    fn extract_template(&self, photo: &[u8]) -> Result<FaceTemplate> {
        match photo {
            MANNY_PHOTO => Ok(subject_template(1.0, 0.0)),
            MANNY_SECOND_PHOTO => Ok(subject_template(1.0, 0.05)),
            STRANGER_PHOTO => Ok(subject_template(2.7, 0.0)),
            _ => Err(IdPassError::NoFaceDetected),
        }
    }

    fn compare(&self, enrolled: &FaceTemplate, presented: &FaceTemplate) -> f32 {
        cosine_similarity(enrolled.as_slice(), presented.as_slice())
    }
}

/// Seals like the production cipher but panics if asked to decrypt, so a
/// test can prove a card was rejected before decryption was attempted.
#[derive(Debug, Clone, Copy)]
pub struct MustNotDecrypt;

impl CardCipher for MustNotDecrypt {
    fn seal(&self, keys: &KeyContext, plaintext: &[u8]) -> Result<Vec<u8>> {
        ChaChaCipher.seal(keys, plaintext)
    }

    fn open(&self, _keys: &KeyContext, _sealed: &[u8]) -> Result<Zeroizing<Vec<u8>>> {
        panic!("decryption reached for a card that should have been rejected");
    }
}
