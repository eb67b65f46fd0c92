// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Structured-record serialization for card records and envelopes.

use bincode::Options;
use idpass_core::error::{IdPassError, Result};
use idpass_core::types::CardDetails;
use zeroize::Zeroizing;

use crate::envelope::Envelope;

/// Deterministic byte encoding of card records and envelopes.
///
/// Encoding the same value twice must give the same bytes, and decoding must
/// reject anything that is not exactly one encoded value.
pub trait RecordCodec {
    /// Encode a plaintext card record. The buffer is wiped on drop.
    fn encode_details(&self, details: &CardDetails) -> Result<Zeroizing<Vec<u8>>>;

    /// Decode a plaintext card record, failing with `CorruptRecord`.
    fn decode_details(&self, bytes: &[u8]) -> Result<CardDetails>;

    fn encode_envelope(&self, envelope: &Envelope) -> Result<Vec<u8>>;

    /// Decode envelope bytes, failing with `MalformedEnvelope`.
    fn decode_envelope(&self, bytes: &[u8]) -> Result<Envelope>;
}

/// `bincode` with a size cap and trailing bytes rejected.
#[derive(Debug, Clone, Copy)]
pub struct BincodeCodec {
    limit: u64,
}

impl BincodeCodec {
    /// A codec refusing to decode or produce values larger than `limit` bytes.
    pub fn new(limit: u64) -> Self {
        Self { limit }
    }

    fn options(&self) -> impl Options {
        bincode::DefaultOptions::new()
            .with_limit(self.limit)
            .reject_trailing_bytes()
    }
}

impl Default for BincodeCodec {
    fn default() -> Self {
        Self::new(64 * 1024)
    }
}

impl RecordCodec for BincodeCodec {
    fn encode_details(&self, details: &CardDetails) -> Result<Zeroizing<Vec<u8>>> {
        self.options()
            .serialize(details)
            .map(Zeroizing::new)
            .map_err(|e| IdPassError::CorruptRecord(format!("record encoding failed: {e}")))
    }

    fn decode_details(&self, bytes: &[u8]) -> Result<CardDetails> {
        self.options()
            .deserialize(bytes)
            .map_err(|e| IdPassError::CorruptRecord(e.to_string()))
    }

    fn encode_envelope(&self, envelope: &Envelope) -> Result<Vec<u8>> {
        self.options()
            .serialize(envelope)
            .map_err(|e| IdPassError::MalformedEnvelope(format!("envelope encoding failed: {e}")))
    }

    fn decode_envelope(&self, bytes: &[u8]) -> Result<Envelope> {
        self.options()
            .deserialize(bytes)
            .map_err(|e| IdPassError::MalformedEnvelope(e.to_string()))
    }
}
