// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// IDPass: Core card types, configuration and error definitions shared
// across all crates.

pub mod config;
pub mod error;
pub mod outcome;
pub mod types;

pub use config::{CardConfig, QrErrorCorrection};
pub use error::{IdPassError, Result};
pub use types::*;
