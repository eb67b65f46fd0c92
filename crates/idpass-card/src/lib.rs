// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>

//! idpass-card: Issue and verify offline identity cards.
//!
//! A card is an envelope holding the encrypted cardholder record and a system
//! signature over it. [`CardService`] issues cards, verifies them against a
//! PIN or a live photo, and signs messages with the keypair sealed inside a
//! card. Envelope bytes go onto paper as a QR code through the same service.
//!
//! Every operation takes a [`KeyContext`](idpass_security::KeyContext) by
//! reference. Services and contexts are immutable, so both can be shared
//! across threads.

pub mod codec;
pub mod envelope;
pub mod issuance;
pub mod service;
pub mod signing;
pub mod verification;

#[cfg(test)]
mod scenario;
#[cfg(test)]
mod test_support;

pub use codec::{BincodeCodec, RecordCodec};
pub use envelope::{Envelope, open_card, seal_card};
pub use service::CardService;
pub use signing::verify_card_signature;
