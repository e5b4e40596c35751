// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Text quality classifier — decides, from extracted text alone, whether a
// document is native text or a scan that needs OCR.

use textwerk_core::config::ClassifierThresholds;
use tracing::debug;

/// Verdict on directly extracted text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextQuality {
    /// The extraction is usable as-is.
    Sufficient,
    /// The document looks scanned, empty, or garbled — run OCR instead.
    NeedsOcr,
}

/// Classify extracted text.
///
/// Rules, evaluated in order:
///
/// 1. Stripped length below `min_chars` → the document is a scan or empty.
/// 2. Non-whitespace ratio below `min_ink_ratio` → the extraction is
///    dominated by layout whitespace or artifacts.
/// 3. Otherwise the text is good enough.
///
/// Extraction *failure* is classified upstream as [`TextQuality::NeedsOcr`]
/// as well: an unreadable file is a suspected scan, and the expensive path
/// is the robust one.
pub fn classify_text(text: &str, thresholds: &ClassifierThresholds) -> TextQuality {
    let stripped_len = text.trim().chars().count();
    if stripped_len < thresholds.min_chars {
        debug!(stripped_len, "short extraction — treating as scanned");
        return TextQuality::NeedsOcr;
    }

    let total = text.chars().count();
    let ink = text.chars().filter(|c| !c.is_whitespace()).count();
    let ratio = ink as f32 / total as f32;
    if ratio < thresholds.min_ink_ratio {
        debug!(ratio, "low text density — treating as scanned");
        return TextQuality::NeedsOcr;
    }

    TextQuality::Sufficient
}
