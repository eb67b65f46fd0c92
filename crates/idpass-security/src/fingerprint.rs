// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Envelope fingerprints: SHA-256 digests used to identify cards in logs
// without logging their contents.

use sha2::{Digest, Sha256};

/// Number of hex characters kept by [`fingerprint`].
const FINGERPRINT_HEX_LEN: usize = 16;

/// Compute the SHA-256 hash of `data` and return it as a lowercase hex string.
pub fn sha256_hex(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

/// Short, log-friendly identifier for a card envelope or key.
pub fn fingerprint(data: &[u8]) -> String {
    let mut full = sha256_hex(data);
    full.truncate(FINGERPRINT_HEX_LEN);
    full
}
