// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// textwerk-document — Document processing for the Textwerk converter.
//
// Provides the leaf components of the scan-detection pipeline: direct text
// extraction, the text quality classifier, page rasterization, OCR image
// preprocessing, the OCR engine seam, text cleaning, and TXT/DOCX output
// assembly.

pub mod classify;
pub mod clean;
pub mod extract;
pub mod ocr;
pub mod output;
pub mod preprocess;
pub mod raster;

// Re-export the primary items so callers can use `textwerk_document::classify_text` etc.
pub use classify::{TextQuality, classify_text};
pub use clean::clean_text;
pub use extract::{PdfTextExtractor, TextExtractor};
pub use ocr::{OcrEngine, SegmentationMode};
pub use output::{PAGE_SEPARATOR, join_pages, write_docx, write_txt};
pub use preprocess::preprocess_page;
pub use raster::{PageRasterizer, PdfiumRasterizer};

#[cfg(feature = "ocr")]
pub use ocr::TesseractOcr;
