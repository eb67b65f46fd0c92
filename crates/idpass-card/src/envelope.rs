// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Card envelope: the signed, encrypted card record.
//
// Opening runs four checks in a fixed order and stops at the first failure:
//
//   1. parse the envelope           -> MalformedEnvelope
//   2. verify the system signature  -> InvalidSignature
//   3. decrypt the sealed record    -> DecryptionFailed
//   4. decode the card record       -> CorruptRecord
//
// The decryption key is not touched until a trusted system key has vouched
// for the ciphertext.

use idpass_core::error::Result;
use idpass_core::types::CardDetails;
use idpass_security::{CardCipher, KeyContext, fingerprint};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::codec::RecordCodec;

/// What a card carries: the sealed record and the system signature over it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope {
    /// `nonce || ciphertext || tag` of the encoded `CardDetails`.
    pub encrypted_card: Vec<u8>,
    /// System Ed25519 signature over `encrypted_card`.
    pub signature: Vec<u8>,
}

/// Encode, encrypt and sign `details`.
#[instrument(skip_all)]
pub fn seal_card<R, C>(
    keys: &KeyContext,
    codec: &R,
    cipher: &C,
    details: &CardDetails,
) -> Result<Envelope>
where
    R: RecordCodec + ?Sized,
    C: CardCipher + ?Sized,
{
    let plaintext = codec.encode_details(details)?;
    let encrypted_card = cipher.seal(keys, &plaintext)?;
    let signature = keys.sign(&encrypted_card)?.to_vec();

    debug!(card = %fingerprint(&encrypted_card), "card sealed and signed");
    Ok(Envelope {
        encrypted_card,
        signature,
    })
}

/// Authenticate, decrypt and decode an envelope.
#[instrument(skip_all, fields(envelope_len = envelope.len()))]
pub fn open_card<R, C>(
    keys: &KeyContext,
    codec: &R,
    cipher: &C,
    envelope: &[u8],
) -> Result<CardDetails>
where
    R: RecordCodec + ?Sized,
    C: CardCipher + ?Sized,
{
    let Envelope {
        encrypted_card,
        signature,
    } = codec.decode_envelope(envelope).inspect_err(|err| {
        warn!(%err, "envelope rejected");
    })?;

    let card = fingerprint(&encrypted_card);
    keys.verify(&encrypted_card, &signature).inspect_err(|_| {
        warn!(%card, "card signature rejected");
    })?;

    let plaintext = cipher.open(keys, &encrypted_card).inspect_err(|_| {
        // Signed by a trusted key yet undecryptable: the signing and
        // encryption keys do not belong to the same deployment.
        warn!(%card, "signed card failed to decrypt");
    })?;

    let details = codec.decode_details(&plaintext).inspect_err(|err| {
        warn!(%card, %err, "card record rejected");
    })?;

    debug!(%card, "card opened");
    Ok(details)
}
