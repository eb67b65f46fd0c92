// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Deployment configuration.

use serde::{Deserialize, Serialize};

use crate::error::{IdPassError, Result};

/// QR error-correction level, weakest to strongest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum QrErrorCorrection {
    /// Recovers ~7% damaged modules.
    Low,
    /// Recovers ~15% damaged modules.
    Medium,
    /// Recovers ~25% damaged modules.
    Quartile,
    /// Recovers ~30% damaged modules.
    High,
}

impl QrErrorCorrection {
    /// This level followed by every weaker one, strongest first.
    pub fn fallbacks(self) -> impl Iterator<Item = QrErrorCorrection> {
        [Self::High, Self::Quartile, Self::Medium, Self::Low]
            .into_iter()
            .filter(move |level| *level <= self)
    }
}

/// Tunable parameters for issuing and verifying cards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CardConfig {
    /// Minimum face similarity (0.0–1.0) accepted as the cardholder.
    pub face_match_threshold: f32,
    /// PBKDF2-HMAC-SHA256 rounds applied to PINs at issuance.
    pub pin_kdf_iterations: u32,
    /// Strongest QR error correction tried when encoding; weaker levels are
    /// used only when the payload does not fit.
    pub qr_error_correction: QrErrorCorrection,
    /// Upper bound on a decoded card record or envelope, in bytes.
    pub max_record_len: u64,
}

impl Default for CardConfig {
    fn default() -> Self {
        Self {
            // 128-d face embeddings are usually cut at Euclidean distance 0.42.
            face_match_threshold: 0.58,
            pin_kdf_iterations: 100_000,
            qr_error_correction: QrErrorCorrection::Medium,
            max_record_len: 64 * 1024,
        }
    }
}

impl CardConfig {
    /// Parse and validate a JSON configuration document. Missing fields take
    /// their default values.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values no deployment could sensibly run with.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.face_match_threshold) {
            return Err(IdPassError::Config(format!(
                "face_match_threshold must be within 0.0..=1.0, got {}",
                self.face_match_threshold
            )));
        }
        if self.pin_kdf_iterations == 0 {
            return Err(IdPassError::Config(
                "pin_kdf_iterations must be at least 1".into(),
            ));
        }
        if self.max_record_len < 1024 {
            return Err(IdPassError::Config(format!(
                "max_record_len must be at least 1024, got {}",
                self.max_record_len
            )));
        }
        Ok(())
    }
}
