// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Luminance-profile face engine: a model-free adapter for controlled
// enrollment photos (passport-style framing, face centred). It crops the
// central face region, equalises its histogram so lighting changes cancel
// out, and downsamples it into a 128-value zero-mean unit vector.
//
// Deployments with uncontrolled capture plug a model-backed `FaceEngine`
// in its place; the card pipelines do not care which one runs.

use idpass_core::error::{IdPassError, Result};
use idpass_core::types::{FaceTemplate, TEMPLATE_DIM};
use image::GrayImage;
use image::imageops::{self, FilterType};
use imageproc::contrast::equalize_histogram;
use tracing::{debug, instrument};

use crate::engine::{FaceEngine, cosine_similarity};

/// Template grid: 8 columns by 16 rows, matching a portrait face crop.
const PROFILE_WIDTH: u32 = 8;
const PROFILE_HEIGHT: u32 = 16;
const _: () = assert!((PROFILE_WIDTH * PROFILE_HEIGHT) as usize == TEMPLATE_DIM);

/// Model-free face engine for centred portrait photos.
#[derive(Debug, Clone)]
pub struct LumaFaceEngine {
    /// Fraction of width and height kept around the image centre.
    pub face_region: f32,
    /// Minimum luminance standard deviation for the region to count as a face.
    pub min_contrast: f32,
    /// Smallest accepted photo side, in pixels.
    pub min_side: u32,
}

impl Default for LumaFaceEngine {
    fn default() -> Self {
        Self {
            face_region: 0.6,
            min_contrast: 4.0,
            min_side: 32,
        }
    }
}

impl LumaFaceEngine {
    fn face_crop(&self, gray: &GrayImage) -> GrayImage {
        let (w, h) = gray.dimensions();
        let region = self.face_region.clamp(0.1, 1.0);
        let cw = ((w as f32 * region) as u32).max(PROFILE_WIDTH).min(w);
        let ch = ((h as f32 * region) as u32).max(PROFILE_HEIGHT).min(h);
        imageops::crop_imm(gray, (w - cw) / 2, (h - ch) / 2, cw, ch).to_image()
    }
}

fn std_dev(image: &GrayImage) -> f32 {
    let n = (image.width() * image.height()) as f32;
    let mean = image.pixels().map(|p| p.0[0] as f32).sum::<f32>() / n;
    let var = image
        .pixels()
        .map(|p| {
            let d = p.0[0] as f32 - mean;
            d * d
        })
        .sum::<f32>()
        / n;
    var.sqrt()
}

impl FaceEngine for LumaFaceEngine {
    #[instrument(skip_all, fields(photo_len = photo.len()))]
    fn extract_template(&self, photo: &[u8]) -> Result<FaceTemplate> {
        let image = image::load_from_memory(photo).map_err(|err| {
            debug!(%err, "photo could not be decoded");
            IdPassError::NoFaceDetected
        })?;
        if image.width() < self.min_side || image.height() < self.min_side {
            debug!(
                width = image.width(),
                height = image.height(),
                "photo too small"
            );
            return Err(IdPassError::NoFaceDetected);
        }

        let face = self.face_crop(&image.to_luma8());
        let contrast = std_dev(&face);
        if contrast < self.min_contrast {
            debug!(contrast, "face region is featureless");
            return Err(IdPassError::NoFaceDetected);
        }

        let equalized = equalize_histogram(&face);
        let profile = imageops::resize(
            &equalized,
            PROFILE_WIDTH,
            PROFILE_HEIGHT,
            FilterType::Triangle,
        );

        let mut values: Vec<f32> = profile.pixels().map(|p| p.0[0] as f32).collect();
        let mean = values.iter().sum::<f32>() / values.len() as f32;
        values.iter_mut().for_each(|v| *v -= mean);
        let norm = values.iter().map(|v| v * v).sum::<f32>().sqrt();
        if norm <= f32::EPSILON {
            return Err(IdPassError::NoFaceDetected);
        }
        values.iter_mut().for_each(|v| *v /= norm);

        debug!(contrast, "face template extracted");
        FaceTemplate::new(values)
    }

    fn compare(&self, enrolled: &FaceTemplate, presented: &FaceTemplate) -> f32 {
        cosine_similarity(enrolled.as_slice(), presented.as_slice())
    }
}
