// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Conversion configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::types::OutputFormat;

/// Thresholds used to decide whether directly extracted text is good enough,
/// or whether the document is a scan and needs OCR.
///
/// The defaults are the empirically tuned values the converter has always
/// shipped with; treat them as tunables, not laws.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ClassifierThresholds {
    /// Minimum stripped character count. Anything shorter is treated as a
    /// scanned or empty document.
    pub min_chars: usize,
    /// Minimum ratio of non-whitespace characters to total characters.
    /// Lower ratios indicate garbled or layout-dominated extraction output.
    pub min_ink_ratio: f32,
}

impl Default for ClassifierThresholds {
    fn default() -> Self {
        Self {
            min_chars: 100,
            min_ink_ratio: 0.10,
        }
    }
}

/// Options for one batch run. Supplied once, read-only for the duration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionOptions {
    /// Requested output format. Documents that need OCR are downgraded to
    /// plain text regardless of this setting (OCR-to-DOCX is never done).
    pub format: OutputFormat,
    /// Directory where output files are written.
    pub output_dir: PathBuf,
    /// Tesseract language code; "+"-joined for mixed-language documents
    /// (e.g. "pol+eng").
    pub language: String,
    /// Page-to-pixel scale factor for rasterization. 3.0 is roughly
    /// 216–300 DPI; higher trades time for OCR accuracy.
    pub render_scale: f32,
    /// Fixed luminance threshold for binarization. Pixels darker than this
    /// become black, everything else white.
    pub binarize_threshold: u8,
    /// Text quality thresholds for the scan-detection classifier.
    pub classifier: ClassifierThresholds,
}

impl Default for ConversionOptions {
    fn default() -> Self {
        Self {
            format: OutputFormat::Docx,
            output_dir: PathBuf::from("."),
            language: "eng".to_string(),
            render_scale: 3.0,
            binarize_threshold: 180,
            classifier: ClassifierThresholds::default(),
        }
    }
}
