// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Face templates for IDPass: the capability boundary between card
// pipelines and whatever face engine a deployment runs.

pub mod engine;
pub mod luma;

pub use engine::{FaceEngine, cosine_similarity};
pub use luma::LumaFaceEngine;
