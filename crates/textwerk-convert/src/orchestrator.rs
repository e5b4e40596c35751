// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Per-document conversion orchestrator.
//
// State machine per document:
//   PENDING → CLASSIFYING → {EXTRACTING | OCR_RUNNING} → ASSEMBLING
//           → {WRITTEN | FAILED | CANCELLED | SKIPPED}
//
// Exactly one of the direct-extraction path and the OCR path runs per
// document; the choice is made once and never revisited. All collaborator
// failures are caught here and folded into the returned ConversionResult —
// convert() never propagates an error to its caller.

use std::path::Path;
use std::sync::Arc;

use textwerk_core::cancel::CancelFlag;
use textwerk_core::config::ConversionOptions;
use textwerk_core::error::{Result, TextwerkError};
use textwerk_core::progress::{OverwritePrompt, ProgressSink};
use textwerk_core::types::{ConversionPhase, ConversionResult, OutputFormat};
use textwerk_document::classify::{TextQuality, classify_text};
use textwerk_document::clean::clean_text;
use textwerk_document::extract::TextExtractor;
use textwerk_document::ocr::{OcrEngine, SegmentationMode};
use textwerk_document::output::{join_pages, output_path, write_docx, write_txt};
use textwerk_document::preprocess::preprocess_page;
use textwerk_document::raster::PageRasterizer;
use tracing::{debug, info, warn};

/// Whether the OCR path can actually run.
///
/// Resolved once at startup, the way the front end sees fit (cargo feature,
/// probe of the system tesseract, presence of a pdfium library). When
/// unavailable, documents classified as scans degrade to empty text with a
/// warning instead of invoking a missing engine.
pub enum OcrCapability {
    Available {
        rasterizer: Box<dyn PageRasterizer>,
        engine: Box<dyn OcrEngine>,
    },
    Unavailable,
}

/// Result of the OCR page loop.
enum PagePass {
    Complete(Vec<String>),
    Cancelled,
}

/// Converts one source document into one output file.
pub struct ConversionOrchestrator {
    extractor: Box<dyn TextExtractor>,
    ocr: OcrCapability,
    prompt: Box<dyn OverwritePrompt>,
    sink: Arc<dyn ProgressSink>,
    cancel: CancelFlag,
}

impl ConversionOrchestrator {
    pub fn new(
        extractor: Box<dyn TextExtractor>,
        ocr: OcrCapability,
        prompt: Box<dyn OverwritePrompt>,
        sink: Arc<dyn ProgressSink>,
        cancel: CancelFlag,
    ) -> Self {
        Self {
            extractor,
            ocr,
            prompt,
            sink,
            cancel,
        }
    }

    /// Convert one document. Never panics, never returns an error: every
    /// failure is recorded in the result and the batch moves on.
    pub fn convert(&self, source: &Path, options: &ConversionOptions) -> ConversionResult {
        if self.cancel.is_cancelled() {
            return ConversionResult::cancelled(source);
        }

        let name = source
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| source.display().to_string());
        self.sink.log(&format!("converting {name}"));

        match self.convert_inner(source, options) {
            Ok(result) => result,
            Err(err) => {
                warn!(source = %source.display(), %err, "document conversion failed");
                self.sink.log(&format!("ERROR converting {name}: {err}"));
                ConversionResult::failed(source, err.to_string())
            }
        }
    }

    fn convert_inner(&self, source: &Path, options: &ConversionOptions) -> Result<ConversionResult> {
        debug!(phase = %ConversionPhase::Classifying, source = %source.display(), "phase");

        // Attempt direct extraction; a failure here is a suspected scan, not
        // a document failure.
        let extracted = match self.extractor.extract(source) {
            Ok(text) => match classify_text(&text, &options.classifier) {
                TextQuality::Sufficient => Some(text),
                TextQuality::NeedsOcr => {
                    self.sink.log("scan or low-quality text detected — using OCR");
                    None
                }
            },
            Err(err) => {
                self.sink
                    .log(&format!("extraction failed ({err}) — treating as scan"));
                None
            }
        };

        let (pages, format, downgraded) = match extracted {
            Some(text) => {
                debug!(phase = %ConversionPhase::Extracting, "phase");
                (vec![clean_text(&text)], options.format, false)
            }
            None => {
                debug!(phase = %ConversionPhase::OcrRunning, "phase");
                let pages = match self.ocr_pages(source, options)? {
                    PagePass::Complete(pages) => pages,
                    PagePass::Cancelled => return Ok(ConversionResult::cancelled(source)),
                };
                // OCR output is never assembled into DOCX. If DOCX was
                // requested, this document drops to plain text and the
                // caller is told.
                let downgraded = options.format == OutputFormat::Docx;
                if downgraded {
                    self.sink
                        .log("OCR to DOCX is not supported — writing TXT instead");
                }
                (pages, OutputFormat::Txt, downgraded)
            }
        };

        debug!(phase = %ConversionPhase::Assembling, "phase");
        let joined = join_pages(&pages);
        let output = output_path(source, &options.output_dir, format);

        if output.exists() && !self.prompt.ask_overwrite(&output) {
            self.sink
                .log(&format!("skipped {} (already exists)", output.display()));
            return Ok(ConversionResult::skipped(source, output));
        }

        if let Err(err) = self.write_output(&output, &joined, format) {
            // No partial file may survive a failed document.
            let _ = std::fs::remove_file(&output);
            return Err(err);
        }
        validate_output(&output)?;

        info!(output = %output.display(), "document written");
        Ok(ConversionResult::written(source, output, downgraded))
    }

    /// Run OCR over every page, in page order.
    ///
    /// Cancellation is polled before each page and immediately after each
    /// recognition; pages already processed are discarded on cancellation.
    /// A page that fails to render or recognize contributes empty text.
    fn ocr_pages(&self, source: &Path, options: &ConversionOptions) -> Result<PagePass> {
        let OcrCapability::Available { rasterizer, engine } = &self.ocr else {
            warn!(source = %source.display(), "OCR support unavailable — emitting empty text");
            self.sink
                .log("OCR support is not available; scanned document yields no text");
            return Ok(PagePass::Complete(vec![String::new()]));
        };

        let total = match rasterizer.page_count(source) {
            Ok(total) => total,
            Err(err) => {
                // Document-level rasterizer failure degrades to empty text;
                // it does not fail the document outright.
                warn!(%err, "could not open document for rasterization");
                self.sink.log(&format!("OCR pass failed: {err}"));
                return Ok(PagePass::Complete(vec![String::new()]));
            }
        };
        self.sink.log(&format!("{total} pages to recognize"));

        let mut pages = Vec::with_capacity(total);
        for index in 0..total {
            if self.cancel.is_cancelled() {
                self.sink.log("cancelled during OCR");
                return Ok(PagePass::Cancelled);
            }
            self.sink.log(&format!("OCR page {}/{total}", index + 1));

            let text = match rasterizer.render_page(source, index, options.render_scale) {
                Ok(image) => {
                    let prepared = preprocess_page(&image, options.binarize_threshold);
                    match engine.recognize(&prepared, &options.language, SegmentationMode::SingleBlock)
                    {
                        Ok(raw) => clean_text(&raw),
                        Err(err) => {
                            warn!(page = index + 1, %err, "recognition failed — empty page text");
                            String::new()
                        }
                    }
                }
                Err(err) => {
                    warn!(page = index + 1, %err, "render failed — skipping page");
                    String::new()
                }
            };
            pages.push(text);

            if self.cancel.is_cancelled() {
                self.sink.log("cancelled during OCR");
                return Ok(PagePass::Cancelled);
            }
        }

        Ok(PagePass::Complete(pages))
    }

    fn write_output(&self, path: &Path, joined: &str, format: OutputFormat) -> Result<()> {
        match format {
            OutputFormat::Docx => write_docx(path, joined),
            OutputFormat::Txt => write_txt(path, joined),
        }
    }
}

/// The output file must exist and be non-empty; anything else is a failure
/// even though no exception occurred. An empty file is removed so that
/// failed documents leave nothing on disk.
fn validate_output(path: &Path) -> Result<()> {
    let size = std::fs::metadata(path).map(|m| m.len()).unwrap_or(0);
    if size == 0 {
        let _ = std::fs::remove_file(path);
        return Err(TextwerkError::Validation(format!(
            "output not created: {}",
            path.display()
        )));
    }
    Ok(())
}
