// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Textwerk — Core types and error definitions shared across all crates.

pub mod cancel;
pub mod config;
pub mod error;
pub mod progress;
pub mod types;

pub use cancel::CancelFlag;
pub use config::{ClassifierThresholds, ConversionOptions};
pub use error::TextwerkError;
pub use types::*;
