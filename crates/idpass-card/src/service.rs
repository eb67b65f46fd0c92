// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Card service: binds the face engine, record codec and cipher to a
// validated configuration. Issuance, verification and card signing are
// implemented on it in their own modules.

use idpass_barcode::{QrBitmap, QrCodec};
use idpass_biometrics::FaceEngine;
use idpass_core::config::CardConfig;
use idpass_core::error::Result;
use idpass_core::types::CardDetails;
use idpass_security::{CardCipher, ChaChaCipher, KeyContext};
use tracing::debug;

use crate::codec::{BincodeCodec, RecordCodec};
use crate::envelope::{self, Envelope};

/// Entry point for every card operation.
///
/// Holds no key material and no per-card state: a single service can be
/// shared across threads and used with any number of `KeyContext`s.
#[derive(Debug, Clone)]
pub struct CardService<F, R = BincodeCodec, C = ChaChaCipher> {
    pub(crate) face: F,
    pub(crate) codec: R,
    pub(crate) cipher: C,
    pub(crate) config: CardConfig,
}

impl<F: FaceEngine> CardService<F> {
    /// A service using the production codec and cipher.
    pub fn new(face: F, config: CardConfig) -> Result<Self> {
        let codec = BincodeCodec::new(config.max_record_len);
        Self::with_collaborators(face, codec, ChaChaCipher, config)
    }
}

impl<F, R, C> CardService<F, R, C>
where
    F: FaceEngine,
    R: RecordCodec,
    C: CardCipher,
{
    /// A service with every collaborator supplied by the caller.
    pub fn with_collaborators(face: F, codec: R, cipher: C, config: CardConfig) -> Result<Self> {
        config.validate()?;
        debug!(
            threshold = config.face_match_threshold,
            pin_kdf_iterations = config.pin_kdf_iterations,
            "card service configured"
        );
        Ok(Self {
            face,
            codec,
            cipher,
            config,
        })
    }

    pub fn config(&self) -> &CardConfig {
        &self.config
    }

    /// Encrypt and sign `details` into an envelope.
    pub fn seal_card(&self, keys: &KeyContext, details: &CardDetails) -> Result<Envelope> {
        envelope::seal_card(keys, &self.codec, &self.cipher, details)
    }

    /// Serialize an envelope into the bytes printed on a card.
    pub fn encode_envelope(&self, envelope: &Envelope) -> Result<Vec<u8>> {
        self.codec.encode_envelope(envelope)
    }

    /// Authenticate and decrypt card bytes. No credential is checked.
    pub fn open_card(&self, keys: &KeyContext, envelope: &[u8]) -> Result<CardDetails> {
        envelope::open_card(keys, &self.codec, &self.cipher, envelope)
    }

    fn qr(&self) -> QrCodec {
        QrCodec::new(self.config.qr_error_correction)
    }

    /// Encode card bytes as a QR bit matrix at the configured error
    /// correction level.
    pub fn encode_to_barcode(&self, envelope: &[u8]) -> Result<QrBitmap> {
        self.qr().encode(envelope)
    }

    /// Recover card bytes from a scanned QR bit matrix.
    pub fn decode_from_barcode(&self, bits: &[u8], side: usize) -> Result<Vec<u8>> {
        let bitmap = QrBitmap::from_parts(side, bits.to_vec())?;
        self.qr().decode(&bitmap)
    }

    /// Card bytes as a printable SVG QR code.
    pub fn render_barcode_svg(&self, envelope: &[u8]) -> Result<String> {
        self.qr().render_svg(envelope)
    }
}
