// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for IDPass.

use thiserror::Error;

/// Top-level error type for all IDPass operations.
///
/// Every pipeline fails closed: an error means no card details were
/// returned, partially verified or otherwise.
#[derive(Debug, Error)]
pub enum IdPassError {
    // -- Key context --
    #[error("invalid {key} length: expected {expected} bytes, got {actual}")]
    InvalidKeyLength {
        key: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("key material rejected: {0}")]
    InvalidKey(String),

    #[error("this key context holds no signing key")]
    SigningKeyUnavailable,

    // -- Issuance --
    #[error("invalid {field}: {reason}")]
    InvalidField { field: &'static str, reason: String },

    #[error("encryption failed: {0}")]
    Encryption(String),

    // -- Biometrics --
    #[error("no face detected in photo")]
    NoFaceDetected,

    #[error("face engine error: {0}")]
    Biometric(String),

    // -- Envelope verification, in the order the checks run --
    #[error("malformed card envelope: {0}")]
    MalformedEnvelope(String),

    #[error("card signature is not valid for any trusted key")]
    InvalidSignature,

    #[error("card decryption failed")]
    DecryptionFailed,

    #[error("corrupt card record: {0}")]
    CorruptRecord(String),

    // -- Credentials --
    #[error("PIN does not match")]
    PinMismatch,

    #[error("card carries no signing key")]
    CardKeyAbsent,

    // -- Barcode --
    #[error("payload of {len} bytes exceeds barcode capacity of {max} bytes")]
    PayloadTooLarge { len: usize, max: usize },

    #[error("barcode unreadable: {0}")]
    UnreadableCode(String),

    // -- Configuration --
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, IdPassError>;
