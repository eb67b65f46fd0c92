// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Public-facing verification outcomes.
//
// Terminals shown to card bearers must not reveal which check rejected a
// card: a forged signature, a wrong system key and a corrupt record all read
// as "card invalid". Internal callers keep the precise `IdPassError`.

use crate::error::IdPassError;

/// Coarse outcome class suitable for display at a verification terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublicOutcome {
    /// The card could not be authenticated. Never says why.
    CardInvalid,
    /// The card is genuine but the PIN was wrong.
    CredentialRejected,
    /// No face was found in the presented photo.
    NoFace,
    /// The barcode could not be read.
    Unreadable,
    /// The issuance request itself was refused.
    IssuanceRejected,
    /// The terminal or issuer is set up incorrectly.
    Misconfigured,
}

/// A plain-language message paired with its outcome class.
#[derive(Debug, Clone)]
pub struct PublicMessage {
    pub outcome: PublicOutcome,
    pub message: String,
    /// Whether presenting the card again (or recapturing) may help.
    pub retriable: bool,
}

/// Collapse an internal error into what a public verifier may show.
pub fn public_outcome(err: &IdPassError) -> PublicMessage {
    match err {
        IdPassError::MalformedEnvelope(_)
        | IdPassError::InvalidSignature
        | IdPassError::DecryptionFailed
        | IdPassError::CorruptRecord(_)
        | IdPassError::CardKeyAbsent => PublicMessage {
            outcome: PublicOutcome::CardInvalid,
            message: "This card could not be verified.".into(),
            retriable: false,
        },

        IdPassError::PinMismatch => PublicMessage {
            outcome: PublicOutcome::CredentialRejected,
            message: "The PIN entered is not correct.".into(),
            retriable: true,
        },

        IdPassError::NoFaceDetected | IdPassError::Biometric(_) => PublicMessage {
            outcome: PublicOutcome::NoFace,
            message: "We could not see a face. Look at the camera and try again.".into(),
            retriable: true,
        },

        IdPassError::UnreadableCode(_) => PublicMessage {
            outcome: PublicOutcome::Unreadable,
            message: "The card's code could not be read. Hold it flat and scan again.".into(),
            retriable: true,
        },

        IdPassError::InvalidField { field, .. } => PublicMessage {
            outcome: PublicOutcome::IssuanceRejected,
            message: format!("The {} entered is not valid.", field.replace('_', " ")),
            retriable: true,
        },

        IdPassError::PayloadTooLarge { .. } => PublicMessage {
            outcome: PublicOutcome::IssuanceRejected,
            message: "The card holds too much data to print.".into(),
            retriable: false,
        },

        IdPassError::InvalidKeyLength { .. }
        | IdPassError::InvalidKey(_)
        | IdPassError::SigningKeyUnavailable
        | IdPassError::Encryption(_)
        | IdPassError::Config(_)
        | IdPassError::Serialization(_) => PublicMessage {
            outcome: PublicOutcome::Misconfigured,
            message: "This terminal is not set up correctly. Contact the operator.".into(),
            retriable: false,
        },
    }
}
