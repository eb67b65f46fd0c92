// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// IDPass barcode codec: turns envelope bytes into a printable QR bit matrix
// and a scanned matrix back into bytes. Payloads are opaque here.

pub mod qr;

pub use qr::{MAX_PAYLOAD_LEN, QrBitmap, QrCodec, decode, encode};
