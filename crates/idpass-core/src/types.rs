// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for IDPass cards.
//
// `CardDetails` is the plaintext record sealed inside every card. It is built
// once at issuance and only ever read afterwards; all secret-bearing types
// wipe themselves on drop.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{IdPassError, Result};

/// Number of values in a face template.
pub const TEMPLATE_DIM: usize = 128;
/// Textual format of `Identity::date_of_birth`.
pub const DATE_FORMAT: &str = "%Y/%m/%d";
/// PBKDF2 salt length for stored PINs.
pub const PIN_SALT_LEN: usize = 16;
/// PBKDF2 output length for stored PINs.
pub const PIN_HASH_LEN: usize = 32;
/// Ed25519 seed length.
pub const SEED_LEN: usize = 32;
/// Ed25519 public key length.
pub const PUBLIC_KEY_LEN: usize = 32;
/// Ed25519 signature length.
pub const SIGNATURE_LEN: usize = 64;

/// Biographical details supplied at issuance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Zeroize)]
pub struct Identity {
    pub surname: String,
    pub given_name: String,
    /// `YYYY/MM/DD`, or empty when unknown.
    pub date_of_birth: String,
    pub place_of_birth: String,
    /// Free-form `key:value, key:value` notes.
    pub attributes: String,
}

impl Identity {
    /// Check the fields a card cannot be issued without.
    pub fn validate(&self) -> Result<()> {
        if self.surname.trim().is_empty() && self.given_name.trim().is_empty() {
            return Err(IdPassError::InvalidField {
                field: "name",
                reason: "surname and given name are both empty".into(),
            });
        }
        if !self.date_of_birth.is_empty() {
            NaiveDate::parse_from_str(&self.date_of_birth, DATE_FORMAT).map_err(|e| {
                IdPassError::InvalidField {
                    field: "date_of_birth",
                    reason: format!("expected YYYY/MM/DD: {e}"),
                }
            })?;
        }
        Ok(())
    }
}

/// Fixed-size face embedding produced by a face engine.
#[derive(Clone, PartialEq, Zeroize, ZeroizeOnDrop)]
pub struct FaceTemplate(Vec<f32>);

impl FaceTemplate {
    /// Wrap `values`, which must hold exactly [`TEMPLATE_DIM`] finite numbers.
    pub fn new(values: Vec<f32>) -> Result<Self> {
        if values.len() != TEMPLATE_DIM {
            return Err(IdPassError::Biometric(format!(
                "template must have {TEMPLATE_DIM} values, got {}",
                values.len()
            )));
        }
        if values.iter().any(|v| !v.is_finite()) {
            return Err(IdPassError::Biometric(
                "template contains non-finite values".into(),
            ));
        }
        Ok(Self(values))
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }
}

impl fmt::Debug for FaceTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FaceTemplate([{} values])", self.0.len())
    }
}

impl Serialize for FaceTemplate {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for FaceTemplate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let values = Vec::<f32>::deserialize(deserializer)?;
        FaceTemplate::new(values).map_err(serde::de::Error::custom)
    }
}

/// How the card's PIN is stored.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
pub enum PinCredential {
    /// Issued without a PIN; no PIN ever matches.
    Absent,
    /// PBKDF2-HMAC-SHA256 of the PIN.
    Pbkdf2 {
        iterations: u32,
        salt: [u8; PIN_SALT_LEN],
        hash: [u8; PIN_HASH_LEN],
    },
}

impl fmt::Debug for PinCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Absent => f.write_str("PinCredential::Absent"),
            Self::Pbkdf2 { iterations, .. } => {
                write!(f, "PinCredential::Pbkdf2 {{ iterations: {iterations}, .. }}")
            }
        }
    }
}

/// The card's own signing keypair, independent of the system keys.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
pub enum CardKeys {
    Absent,
    Ed25519 {
        seed: [u8; SEED_LEN],
        public_key: [u8; PUBLIC_KEY_LEN],
    },
}

impl CardKeys {
    /// The public half, if a keypair is present.
    pub fn public_key(&self) -> Option<&[u8; PUBLIC_KEY_LEN]> {
        match self {
            Self::Absent => None,
            Self::Ed25519 { public_key, .. } => Some(public_key),
        }
    }
}

impl fmt::Debug for CardKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Absent => f.write_str("CardKeys::Absent"),
            Self::Ed25519 { public_key, .. } => f
                .debug_struct("CardKeys::Ed25519")
                .field("public_key", &hex_prefix(public_key))
                .finish_non_exhaustive(),
        }
    }
}

fn hex_prefix(bytes: &[u8]) -> String {
    hex::encode(&bytes[..bytes.len().min(8)])
}

/// The plaintext record sealed inside a card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
pub struct CardDetails {
    identity: Identity,
    pin: PinCredential,
    face_template: FaceTemplate,
    card_keys: CardKeys,
}

impl CardDetails {
    pub fn new(
        identity: Identity,
        pin: PinCredential,
        face_template: FaceTemplate,
        card_keys: CardKeys,
    ) -> Self {
        Self {
            identity,
            pin,
            face_template,
            card_keys,
        }
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    pub fn surname(&self) -> &str {
        &self.identity.surname
    }

    pub fn given_name(&self) -> &str {
        &self.identity.given_name
    }

    pub fn date_of_birth(&self) -> &str {
        &self.identity.date_of_birth
    }

    pub fn place_of_birth(&self) -> &str {
        &self.identity.place_of_birth
    }

    pub fn attributes(&self) -> &str {
        &self.identity.attributes
    }

    pub fn pin(&self) -> &PinCredential {
        &self.pin
    }

    pub fn face_template(&self) -> &FaceTemplate {
        &self.face_template
    }

    pub fn card_keys(&self) -> &CardKeys {
        &self.card_keys
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manny() -> Identity {
        Identity {
            surname: "Pacquiao".into(),
            given_name: "Manny".into(),
            date_of_birth: "1978/12/17".into(),
            place_of_birth: "Kibawe, Bukidnon".into(),
            attributes: "gender:male, sports:boxing, children:5, height:1.66m".into(),
        }
    }

    #[test]
    fn valid_identity_passes() {
        assert!(manny().validate().is_ok());
    }

    #[test]
    fn empty_date_is_allowed() {
        let identity = Identity {
            date_of_birth: String::new(),
            ..manny()
        };
        assert!(identity.validate().is_ok());
    }

    #[test]
    fn bad_date_rejected() {
        let identity = Identity {
            date_of_birth: "17-12-1978".into(),
            ..manny()
        };
        match identity.validate() {
            Err(IdPassError::InvalidField { field, .. }) => assert_eq!(field, "date_of_birth"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn nameless_identity_rejected() {
        let identity = Identity {
            surname: " ".into(),
            given_name: String::new(),
            ..manny()
        };
        assert!(identity.validate().is_err());
    }

    #[test]
    fn template_dimension_enforced() {
        assert!(FaceTemplate::new(vec![0.0; TEMPLATE_DIM]).is_ok());
        assert!(FaceTemplate::new(vec![0.0; TEMPLATE_DIM - 1]).is_err());
        let mut values = vec![0.0; TEMPLATE_DIM];
        values[3] = f32::NAN;
        assert!(FaceTemplate::new(values).is_err());
    }

    #[test]
    fn template_deserialization_validates_length() {
        let short = serde_json::to_string(&vec![0.5f32; 4]).unwrap();
        assert!(serde_json::from_str::<FaceTemplate>(&short).is_err());

        let full = serde_json::to_string(&vec![0.5f32; TEMPLATE_DIM]).unwrap();
        let template: FaceTemplate = serde_json::from_str(&full).unwrap();
        assert_eq!(template.as_slice().len(), TEMPLATE_DIM);
    }

    #[test]
    fn debug_output_redacts_secrets() {
        let details = CardDetails::new(
            manny(),
            PinCredential::Pbkdf2 {
                iterations: 10,
                salt: [7; PIN_SALT_LEN],
                hash: [0xAB; PIN_HASH_LEN],
            },
            FaceTemplate::new(vec![0.25; TEMPLATE_DIM]).unwrap(),
            CardKeys::Ed25519 {
                seed: [0xCD; SEED_LEN],
                public_key: [0x11; PUBLIC_KEY_LEN],
            },
        );
        let rendered = format!("{details:?}");
        assert!(rendered.contains("Pacquiao"));
        assert!(!rendered.contains("abab"), "PIN hash leaked: {rendered}");
        assert!(!rendered.contains("cdcd"), "card seed leaked: {rendered}");
        assert!(!rendered.contains("0.25"), "template leaked: {rendered}");
    }

    #[test]
    fn card_keys_debug_shows_public_key_prefix() {
        let keys = CardKeys::Ed25519 {
            seed: [0xCD; SEED_LEN],
            public_key: [0x1F; PUBLIC_KEY_LEN],
        };
        let rendered = format!("{keys:?}");
        assert!(rendered.contains(&"1f".repeat(8)), "{rendered}");
        assert!(!rendered.contains(&"1f".repeat(9)), "{rendered}");
    }

    #[test]
    fn absent_keys_have_no_public_key() {
        assert!(CardKeys::Absent.public_key().is_none());
    }
}
