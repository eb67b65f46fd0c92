// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Face engine capability trait.

use idpass_core::error::Result;
use idpass_core::types::FaceTemplate;

/// Converts photos into fixed-size templates and scores template similarity.
///
/// Implementations decide what "a face was found" means; when none is,
/// `extract_template` fails with `IdPassError::NoFaceDetected`.
pub trait FaceEngine {
    /// Extract a template from an encoded photo (JPEG, PNG, BMP, ...).
    fn extract_template(&self, photo: &[u8]) -> Result<FaceTemplate>;

    /// Similarity of two templates in `0.0..=1.0`, higher meaning more alike.
    fn compare(&self, enrolled: &FaceTemplate, presented: &FaceTemplate) -> f32;
}

impl<T: FaceEngine + ?Sized> FaceEngine for &T {
    fn extract_template(&self, photo: &[u8]) -> Result<FaceTemplate> {
        (**self).extract_template(photo)
    }

    fn compare(&self, enrolled: &FaceTemplate, presented: &FaceTemplate) -> f32 {
        (**self).compare(enrolled, presented)
    }
}

/// Cosine similarity clamped to `0.0..=1.0`; anti-correlated or degenerate
/// inputs score zero.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let (mut dot, mut norm_a, mut norm_b) = (0.0f32, 0.0f32, 0.0f32);
    for (x, y) in a.iter().zip(b) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }
    if norm_a <= f32::EPSILON || norm_b <= f32::EPSILON {
        return 0.0;
    }
    (dot / (norm_a.sqrt() * norm_b.sqrt())).clamp(0.0, 1.0)
}
