// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Card issuance.

use idpass_biometrics::FaceEngine;
use idpass_core::error::{IdPassError, Result};
use idpass_core::types::{CardDetails, Identity};
use idpass_security::{CardCipher, KeyContext, fingerprint, generate_card_keys, hash_pin};
use tracing::{info, instrument};

use crate::codec::RecordCodec;
use crate::service::CardService;

impl<F, R, C> CardService<F, R, C>
where
    F: FaceEngine,
    R: RecordCodec,
    C: CardCipher,
{
    /// Issue a card for `identity`, enrolled with `enrollment_photo` and
    /// protected by `pin` (empty for a card with no PIN).
    ///
    /// Returns the envelope bytes. They are all a verifier needs later;
    /// nothing about the issuance is kept.
    #[instrument(skip_all)]
    pub fn create_card(
        &self,
        keys: &KeyContext,
        identity: Identity,
        enrollment_photo: &[u8],
        pin: &str,
    ) -> Result<Vec<u8>> {
        if !keys.can_sign() {
            return Err(IdPassError::SigningKeyUnavailable);
        }
        identity.validate()?;

        let face_template = self.face.extract_template(enrollment_photo)?;
        let card_keys = generate_card_keys()?;
        let pin = hash_pin(pin, self.config.pin_kdf_iterations)?;
        let details = CardDetails::new(identity, pin, face_template, card_keys);

        let envelope = self.seal_card(keys, &details)?;
        let bytes = self.encode_envelope(&envelope)?;

        info!(
            card = %fingerprint(&envelope.encrypted_card),
            envelope_len = bytes.len(),
            "card issued"
        );
        Ok(bytes)
    }
}
