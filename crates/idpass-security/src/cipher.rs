// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Card encryption: ChaCha20-Poly1305 (IETF) under the system encryption key.
//
// Sealed layout: nonce (12 bytes) || ciphertext || tag (16 bytes). The nonce
// travels with the ciphertext so opening needs nothing but the key.

use idpass_core::error::{IdPassError, Result};
use ring::aead::{Aad, CHACHA20_POLY1305, LessSafeKey, NONCE_LEN, Nonce, UnboundKey};
use ring::rand::{SecureRandom, SystemRandom};
use tracing::{debug, instrument};
use zeroize::Zeroizing;

use crate::keys::KeyContext;

/// Authenticated encryption of serialized card records.
///
/// Pipelines are generic over this trait so tests can substitute a cipher
/// that records or forbids calls.
pub trait CardCipher {
    /// Encrypt `plaintext` under the context's encryption key with a fresh
    /// nonce.
    fn seal(&self, keys: &KeyContext, plaintext: &[u8]) -> Result<Vec<u8>>;

    /// Authenticate and decrypt `sealed`. Fails with `DecryptionFailed` on
    /// any tag mismatch, truncation or wrong key.
    fn open(&self, keys: &KeyContext, sealed: &[u8]) -> Result<Zeroizing<Vec<u8>>>;
}

/// The production cipher, backed by `ring`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChaChaCipher;

fn aead_key(keys: &KeyContext) -> Result<LessSafeKey> {
    let unbound = UnboundKey::new(&CHACHA20_POLY1305, keys.encryption_key())
        .map_err(|e| IdPassError::InvalidKey(format!("encryption key: {e}")))?;
    Ok(LessSafeKey::new(unbound))
}

impl CardCipher for ChaChaCipher {
    #[instrument(skip_all, fields(plaintext_len = plaintext.len()))]
    fn seal(&self, keys: &KeyContext, plaintext: &[u8]) -> Result<Vec<u8>> {
        let key = aead_key(keys)?;

        let mut nonce = [0u8; NONCE_LEN];
        SystemRandom::new()
            .fill(&mut nonce)
            .map_err(|e| IdPassError::Encryption(format!("nonce generation failed: {e}")))?;

        // Reserve room for the tag up front so the plaintext copy is never
        // reallocated and left behind unwiped.
        let tag_len = CHACHA20_POLY1305.tag_len();
        let mut body = Zeroizing::new(Vec::with_capacity(plaintext.len() + tag_len));
        body.extend_from_slice(plaintext);
        key.seal_in_place_append_tag(
            Nonce::assume_unique_for_key(nonce),
            Aad::empty(),
            &mut *body,
        )
        .map_err(|e| IdPassError::Encryption(format!("sealing failed: {e}")))?;

        let mut sealed = Vec::with_capacity(NONCE_LEN + body.len());
        sealed.extend_from_slice(&nonce);
        sealed.extend_from_slice(&body);

        debug!(sealed_len = sealed.len(), "card sealed");
        Ok(sealed)
    }

    #[instrument(skip_all, fields(sealed_len = sealed.len()))]
    fn open(&self, keys: &KeyContext, sealed: &[u8]) -> Result<Zeroizing<Vec<u8>>> {
        if sealed.len() < NONCE_LEN + CHACHA20_POLY1305.tag_len() {
            return Err(IdPassError::DecryptionFailed);
        }
        let key = aead_key(keys)?;

        let (nonce, ciphertext) = sealed.split_at(NONCE_LEN);
        let nonce =
            Nonce::try_assume_unique_for_key(nonce).map_err(|_| IdPassError::DecryptionFailed)?;

        let mut plaintext = Zeroizing::new(ciphertext.to_vec());
        let len = key
            .open_in_place(nonce, Aad::empty(), plaintext.as_mut_slice())
            .map_err(|_| IdPassError::DecryptionFailed)?
            .len();
        plaintext.truncate(len);

        debug!(plaintext_len = len, "card opened");
        Ok(plaintext)
    }
}
