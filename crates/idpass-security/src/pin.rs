// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PIN protection: salted PBKDF2-HMAC-SHA256. The raw PIN is never stored,
// and comparison happens inside `ring::pbkdf2::verify`, which is constant
// time with respect to the stored hash.

use std::num::NonZeroU32;

use idpass_core::error::{IdPassError, Result};
use idpass_core::types::{PIN_HASH_LEN, PIN_SALT_LEN, PinCredential};
use ring::pbkdf2::{self, PBKDF2_HMAC_SHA256};
use zeroize::Zeroizing;

use crate::signing::random_secret;

/// Derive the stored credential for `pin`. An empty PIN yields
/// `PinCredential::Absent`.
pub fn hash_pin(pin: &str, iterations: u32) -> Result<PinCredential> {
    if pin.is_empty() {
        return Ok(PinCredential::Absent);
    }
    let rounds = NonZeroU32::new(iterations)
        .ok_or_else(|| IdPassError::Config("PIN hashing needs at least one iteration".into()))?;

    let salt = random_secret::<PIN_SALT_LEN>()?;
    let mut hash = Zeroizing::new([0u8; PIN_HASH_LEN]);
    pbkdf2::derive(PBKDF2_HMAC_SHA256, rounds, &salt[..], pin.as_bytes(), &mut hash[..]);

    Ok(PinCredential::Pbkdf2 {
        iterations,
        salt: *salt,
        hash: *hash,
    })
}

/// Whether `pin` matches `credential`. `Absent` never matches.
pub fn verify_pin(credential: &PinCredential, pin: &str) -> bool {
    match credential {
        PinCredential::Absent => false,
        PinCredential::Pbkdf2 {
            iterations,
            salt,
            hash,
        } => match NonZeroU32::new(*iterations) {
            Some(rounds) => {
                pbkdf2::verify(PBKDF2_HMAC_SHA256, rounds, salt, pin.as_bytes(), hash).is_ok()
            }
            None => false,
        },
    }
}
