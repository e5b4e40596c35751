// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// OCR engine seam, with a Tesseract-backed implementation behind the "ocr"
// feature gate.
//
// # Feature Gate
//
// The Tesseract engine links the system tesseract/leptonica libraries and is
// only compiled when the `ocr` feature is enabled:
//
// ```toml
// textwerk-document = { path = "crates/textwerk-document", features = ["ocr"] }
// ```
//
// Without the feature the converter still builds and runs; documents that
// need OCR degrade to empty text with a warning.

use image::GrayImage;
use textwerk_core::error::Result;

/// Assumed layout structure of the input image.
///
/// The conversion pipeline always uses [`SegmentationMode::SingleBlock`]:
/// preprocessed page scans are treated as one uniform block of text, not a
/// layout to be segmented into columns or regions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentationMode {
    /// One uniform block of text (tesseract PSM 6).
    SingleBlock,
    /// Full automatic page segmentation (tesseract PSM 3).
    Automatic,
}

/// Recognizes text in a preprocessed page image.
///
/// `language` is a tesseract language code, optionally "+"-joined for
/// mixed-language documents (e.g. "pol+eng"). An empty result string means
/// the engine found no text — that is a valid outcome, not an error.
/// Implementations hold no per-page state: every page is recognized
/// independently, and redundantly if reprocessed.
pub trait OcrEngine {
    fn recognize(&self, image: &GrayImage, language: &str, mode: SegmentationMode) -> Result<String>;
}

#[cfg(feature = "ocr")]
pub use tesseract_engine::TesseractOcr;

#[cfg(feature = "ocr")]
mod tesseract_engine {
    use std::io::Cursor;

    use image::{DynamicImage, GrayImage, ImageFormat};
    use tesseract::{PageSegMode, Tesseract};
    use textwerk_core::error::{Result, TextwerkError};
    use tracing::{debug, info, instrument};

    use super::{OcrEngine, SegmentationMode};

    /// OCR engine backed by the system Tesseract installation.
    ///
    /// A fresh Tesseract instance is configured per page; the library keeps
    /// recognition state per image, and per-page construction keeps the
    /// engine free of cross-page caching.
    #[derive(Debug)]
    pub struct TesseractOcr;

    impl TesseractOcr {
        /// Construct the engine, probing that Tesseract and the traineddata
        /// for `language` are actually present.
        ///
        /// The probe is the capability check: a failure here means OCR is
        /// unavailable for this run, not that a document failed.
        pub fn new(language: &str) -> Result<Self> {
            Tesseract::new(None, Some(language)).map_err(|err| {
                TextwerkError::Ocr(format!(
                    "tesseract initialisation failed for language {language:?}: {err}"
                ))
            })?;
            info!(language, "tesseract engine available");
            Ok(Self)
        }
    }

    impl OcrEngine for TesseractOcr {
        #[instrument(skip(self, image), fields(width = image.width(), height = image.height(), language))]
        fn recognize(
            &self,
            image: &GrayImage,
            language: &str,
            mode: SegmentationMode,
        ) -> Result<String> {
            // Leptonica reads encoded image bytes, so hand the page over as PNG.
            let mut png = Vec::new();
            DynamicImage::ImageLuma8(image.clone())
                .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
                .map_err(|err| TextwerkError::Image(format!("PNG encoding failed: {err}")))?;

            let mut engine = Tesseract::new(None, Some(language))
                .map_err(|err| {
                    TextwerkError::Ocr(format!("tesseract initialisation failed: {err}"))
                })?
                .set_image_from_mem(&png)
                .map_err(|err| TextwerkError::Ocr(format!("failed to set page image: {err}")))?;

            engine.set_page_seg_mode(match mode {
                SegmentationMode::SingleBlock => PageSegMode::PsmSingleBlock,
                SegmentationMode::Automatic => PageSegMode::PsmAuto,
            });

            let text = engine
                .get_text()
                .map_err(|err| TextwerkError::Ocr(format!("text recognition failed: {err}")))?;

            debug!(chars = text.len(), "page recognized");
            Ok(text)
        }
    }
}
