// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Card verification: PIN-gated and face-gated.
//
// Both pipelines open the card first (signature, then decryption) and only
// then look at the credential. A wrong PIN is an error; a face that is not
// the cardholder's is a successful call with no details.

use idpass_biometrics::FaceEngine;
use idpass_core::error::{IdPassError, Result};
use idpass_core::types::CardDetails;
use idpass_security::{CardCipher, KeyContext, verify_pin};
use tracing::{debug, info, instrument, warn};

use crate::codec::RecordCodec;
use crate::service::CardService;

impl<F, R, C> CardService<F, R, C>
where
    F: FaceEngine,
    R: RecordCodec,
    C: CardCipher,
{
    /// Open the card and release its details only if `pin` matches.
    #[instrument(skip_all)]
    pub fn verify_with_pin(
        &self,
        keys: &KeyContext,
        envelope: &[u8],
        pin: &str,
    ) -> Result<CardDetails> {
        let details = self.open_card(keys, envelope)?;
        if !verify_pin(details.pin(), pin) {
            warn!("PIN rejected");
            return Err(IdPassError::PinMismatch);
        }
        info!("card verified by PIN");
        Ok(details)
    }

    /// Open the card and compare its enrolled face with `presented_photo`.
    ///
    /// `Ok(None)` means the card is genuine but the photo is someone else.
    #[instrument(skip_all)]
    pub fn verify_with_face(
        &self,
        keys: &KeyContext,
        envelope: &[u8],
        presented_photo: &[u8],
    ) -> Result<Option<CardDetails>> {
        let details = self.open_card(keys, envelope)?;
        let presented = self.face.extract_template(presented_photo)?;

        let similarity = self.face.compare(details.face_template(), &presented);
        let threshold = self.config.face_match_threshold;
        debug!(similarity, threshold, "face compared");

        if similarity >= threshold {
            info!("card verified by face");
            Ok(Some(details))
        } else {
            info!("face does not match cardholder");
            Ok(None)
        }
    }
}
