// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// QR codec.
//
// Encoding always uses a single byte-mode segment so arbitrary binary
// payloads survive the round trip unchanged, and picks the smallest symbol
// that fits. Decoding renders the bit matrix with a quiet zone and hands it
// to a QR scanner, so the same path reads clean bitmaps and lightly damaged
// ones (Reed-Solomon repairs the rest).
//
// Bitmap layout: row-major, one bit per module, module `k` stored in byte
// `k / 8` at bit `k % 8` (LSB first). A set bit is a dark module.

use idpass_core::config::QrErrorCorrection;
use idpass_core::error::{IdPassError, Result};
use qrcode::bits::Bits;
use qrcode::render::svg;
use qrcode::{Color, EcLevel, QrCode, Version};
use tracing::{debug, instrument, warn};

/// Largest payload any supported symbol holds (version 40, low correction).
pub const MAX_PAYLOAD_LEN: usize = 2953;

const MIN_SIDE: usize = 21;
const MAX_SIDE: usize = 177;
/// Light border, in modules, drawn around the symbol before scanning.
const QUIET_ZONE: usize = 4;
/// Pixels per module in the rendered scan image.
const SCAN_SCALE: usize = 4;

/// A square QR module matrix, bit-packed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrBitmap {
    side: usize,
    bits: Vec<u8>,
}

fn packed_len(side: usize) -> usize {
    (side * side).div_ceil(8)
}

impl QrBitmap {
    /// Wrap a captured bitmap, checking that `side` is a legal QR size and
    /// `bits` holds exactly `side * side` modules.
    pub fn from_parts(side: usize, bits: Vec<u8>) -> Result<Self> {
        if !(MIN_SIDE..=MAX_SIDE).contains(&side) || (side - MIN_SIDE) % 4 != 0 {
            return Err(IdPassError::UnreadableCode(format!(
                "{side} is not a QR symbol size"
            )));
        }
        if bits.len() != packed_len(side) {
            return Err(IdPassError::UnreadableCode(format!(
                "expected {} bytes for side {side}, got {}",
                packed_len(side),
                bits.len()
            )));
        }
        Ok(Self { side, bits })
    }

    fn from_code(code: &QrCode) -> Self {
        let side = code.width();
        let mut bits = vec![0u8; packed_len(side)];
        for (k, color) in code.to_colors().into_iter().enumerate() {
            if color == Color::Dark {
                bits[k / 8] |= 1 << (k % 8);
            }
        }
        Self { side, bits }
    }

    /// Modules per side.
    pub fn side(&self) -> usize {
        self.side
    }

    /// The packed module bits.
    pub fn bits(&self) -> &[u8] {
        &self.bits
    }

    pub fn into_bits(self) -> Vec<u8> {
        self.bits
    }

    /// Whether the module at column `x`, row `y` is dark. Positions outside
    /// the symbol read as light.
    pub fn is_dark(&self, x: usize, y: usize) -> bool {
        if x >= self.side || y >= self.side {
            return false;
        }
        let k = y * self.side + x;
        self.bits[k / 8] & (1 << (k % 8)) != 0
    }
}

fn ec_level(level: QrErrorCorrection) -> EcLevel {
    match level {
        QrErrorCorrection::Low => EcLevel::L,
        QrErrorCorrection::Medium => EcLevel::M,
        QrErrorCorrection::Quartile => EcLevel::Q,
        QrErrorCorrection::High => EcLevel::H,
    }
}

/// Smallest byte-mode symbol holding `payload` at `level`, if any.
fn smallest_symbol(payload: &[u8], level: EcLevel) -> Option<QrCode> {
    (1..=40i16).find_map(|version| {
        let mut bits = Bits::new(Version::Normal(version));
        bits.push_byte_data(payload).ok()?;
        bits.push_terminator(level).ok()?;
        QrCode::with_bits(bits, level).ok()
    })
}

/// QR encoder/decoder with a preferred error-correction level.
#[derive(Debug, Clone, Copy)]
pub struct QrCodec {
    error_correction: QrErrorCorrection,
}

impl Default for QrCodec {
    fn default() -> Self {
        Self::new(QrErrorCorrection::Medium)
    }
}

impl QrCodec {
    /// Prefer `error_correction`, stepping down to weaker levels only when a
    /// payload does not fit at any version.
    pub fn new(error_correction: QrErrorCorrection) -> Self {
        Self { error_correction }
    }

    fn build(&self, payload: &[u8]) -> Result<QrCode> {
        if payload.len() > MAX_PAYLOAD_LEN {
            return Err(IdPassError::PayloadTooLarge {
                len: payload.len(),
                max: MAX_PAYLOAD_LEN,
            });
        }
        for level in self.error_correction.fallbacks() {
            if let Some(code) = smallest_symbol(payload, ec_level(level)) {
                if level != self.error_correction {
                    warn!(?level, "payload only fits at reduced error correction");
                }
                return Ok(code);
            }
        }
        Err(IdPassError::PayloadTooLarge {
            len: payload.len(),
            max: MAX_PAYLOAD_LEN,
        })
    }

    /// Encode `payload` into the smallest fitting QR bit matrix.
    #[instrument(skip_all, fields(payload_len = payload.len()))]
    pub fn encode(&self, payload: &[u8]) -> Result<QrBitmap> {
        let code = self.build(payload)?;
        let bitmap = QrBitmap::from_code(&code);
        debug!(side = bitmap.side(), "payload encoded");
        Ok(bitmap)
    }

    /// Recover the payload from a captured bit matrix.
    #[instrument(skip_all, fields(side = bitmap.side()))]
    pub fn decode(&self, bitmap: &QrBitmap) -> Result<Vec<u8>> {
        let side = bitmap.side();
        let span = (side + 2 * QUIET_ZONE) * SCAN_SCALE;
        let mut image = rqrr::PreparedImage::prepare_from_greyscale(span, span, |x, y| {
            let (mx, my) = (x / SCAN_SCALE, y / SCAN_SCALE);
            let inside = (QUIET_ZONE..side + QUIET_ZONE).contains(&mx)
                && (QUIET_ZONE..side + QUIET_ZONE).contains(&my);
            if inside && bitmap.is_dark(mx - QUIET_ZONE, my - QUIET_ZONE) {
                0
            } else {
                255
            }
        });

        let grids = image.detect_grids();
        let grid = grids
            .first()
            .ok_or_else(|| IdPassError::UnreadableCode("no QR symbol found".into()))?;

        let mut payload = Vec::new();
        grid.decode_to(&mut payload)
            .map_err(|e| IdPassError::UnreadableCode(format!("{e:?}")))?;

        debug!(payload_len = payload.len(), "payload decoded");
        Ok(payload)
    }

    /// Render `payload` as a standalone SVG document for printing.
    pub fn render_svg(&self, payload: &[u8]) -> Result<String> {
        let code = self.build(payload)?;
        Ok(code
            .render::<svg::Color>()
            .min_dimensions(256, 256)
            .quiet_zone(true)
            .build())
    }
}

/// Encode with the default codec.
pub fn encode(payload: &[u8]) -> Result<QrBitmap> {
    QrCodec::default().encode(payload)
}

/// Decode a packed bitmap of `side` modules per side with the default codec.
pub fn decode(bits: &[u8], side: usize) -> Result<Vec<u8>> {
    QrCodec::default().decode(&QrBitmap::from_parts(side, bits.to_vec())?)
}
