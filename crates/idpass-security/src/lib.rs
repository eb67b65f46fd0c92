// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>

//! idpass-security: Cryptographic foundation for IDPass cards.
//!
//! Holds the process-wide system keys (`KeyContext`), the authenticated
//! encryption used to seal card records, Ed25519 signatures for both the
//! issuing system and individual cards, and salted PIN hashing.
//!
//! Secret material lives in `zeroize` wrappers and is wiped when it goes out
//! of scope, on success and error paths alike.

pub mod cipher;
pub mod fingerprint;
pub mod keys;
pub mod pin;
pub mod signing;

// PUBLIC API: Re-export core security primitives
pub use cipher::{CardCipher, ChaChaCipher};
pub use fingerprint::{fingerprint, sha256_hex};
pub use keys::{ENCRYPTION_KEY_LEN, KeyContext, SIGNING_SECRET_KEY_LEN};
pub use pin::{hash_pin, verify_pin};
pub use signing::{
    SystemKeypair, generate_card_keys, generate_encryption_key, generate_signature_keypair,
    sign_with_seed, verify_signature,
};
