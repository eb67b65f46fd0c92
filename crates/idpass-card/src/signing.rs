// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Signing on the cardholder's behalf with the keypair sealed in the card.
//
// No credential is checked here. Callers that need the bearer to prove
// themselves run a PIN or face verification first.

use idpass_biometrics::FaceEngine;
use idpass_core::error::{IdPassError, Result};
use idpass_core::types::{CardKeys, PUBLIC_KEY_LEN, SIGNATURE_LEN};
use idpass_security::{CardCipher, KeyContext, sign_with_seed, verify_signature};
use tracing::{debug, instrument};

use crate::codec::RecordCodec;
use crate::service::CardService;

impl<F, R, C> CardService<F, R, C>
where
    F: FaceEngine,
    R: RecordCodec,
    C: CardCipher,
{
    /// Sign `message` with the card's own secret key.
    #[instrument(skip_all, fields(message_len = message.len()))]
    pub fn sign_with_card(
        &self,
        keys: &KeyContext,
        envelope: &[u8],
        message: &[u8],
    ) -> Result<[u8; SIGNATURE_LEN]> {
        let details = self.open_card(keys, envelope)?;
        match details.card_keys() {
            CardKeys::Ed25519 { seed, public_key } => {
                let signature = sign_with_seed(seed, public_key, message)?;
                debug!("message signed with card key");
                Ok(signature)
            }
            CardKeys::Absent => Err(IdPassError::CardKeyAbsent),
        }
    }

    /// The card's public key, for relying parties checking
    /// [`sign_with_card`](Self::sign_with_card) output.
    pub fn card_public_key(
        &self,
        keys: &KeyContext,
        envelope: &[u8],
    ) -> Result<[u8; PUBLIC_KEY_LEN]> {
        let details = self.open_card(keys, envelope)?;
        details
            .card_keys()
            .public_key()
            .copied()
            .ok_or(IdPassError::CardKeyAbsent)
    }
}

/// Check a signature made by [`CardService::sign_with_card`].
pub fn verify_card_signature(public_key: &[u8], message: &[u8], signature: &[u8]) -> Result<()> {
    verify_signature(public_key, message, signature)
}
