// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Direct text extraction from PDF documents using `lopdf`, with a
// `pdf-extract` fallback for files lopdf reads poorly.

use std::path::Path;

use textwerk_core::error::{Result, TextwerkError};
use tracing::{debug, info, instrument, warn};

/// Extracts embedded text from a source document without rasterization.
///
/// Implementations may fail on corrupt or encrypted input; the caller
/// treats any failure as a suspected scan and falls back to OCR.
pub trait TextExtractor {
    fn extract(&self, path: &Path) -> Result<String>;
}

/// If page-wise lopdf extraction yields less stripped text than this, the
/// pdf-extract fallback is tried as well and the longer result wins.
const FALLBACK_MIN_CHARS: usize = 50;

/// Default extractor: page-wise `lopdf` extraction, falling back to
/// `pdf-extract` when lopdf cannot load the file or finds almost nothing.
#[derive(Debug, Default)]
pub struct PdfTextExtractor;

impl PdfTextExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Extract text page by page with lopdf, in page order.
    ///
    /// A page that fails to decode contributes nothing; the rest of the
    /// document is still extracted.
    fn extract_with_lopdf(&self, path: &Path) -> Result<String> {
        let document = lopdf::Document::load(path).map_err(|err| {
            TextwerkError::Extraction(format!("failed to load {}: {}", path.display(), err))
        })?;

        let mut text = String::new();
        for (page_number, _) in document.get_pages() {
            match document.extract_text(&[page_number]) {
                Ok(page_text) => {
                    text.push_str(&page_text);
                    text.push('\n');
                }
                Err(err) => {
                    warn!(page_number, %err, "page text extraction failed");
                }
            }
        }
        Ok(text)
    }
}

impl TextExtractor for PdfTextExtractor {
    #[instrument(skip(self), fields(path = %path.display()))]
    fn extract(&self, path: &Path) -> Result<String> {
        let primary = self.extract_with_lopdf(path);

        // lopdf result is kept unless it is weak and pdf-extract does better.
        match primary {
            Ok(text) if text.trim().chars().count() >= FALLBACK_MIN_CHARS => {
                debug!(chars = text.len(), "lopdf extraction sufficient");
                Ok(text)
            }
            Ok(text) => match pdf_extract::extract_text(path) {
                Ok(fallback) if fallback.trim().len() > text.trim().len() => {
                    info!(path = %path.display(), "using pdf-extract fallback");
                    Ok(fallback)
                }
                Ok(_) => Ok(text),
                Err(err) => {
                    warn!(%err, "pdf-extract fallback failed");
                    Ok(text)
                }
            },
            Err(primary_err) => match pdf_extract::extract_text(path) {
                Ok(fallback) => {
                    info!(path = %path.display(), "lopdf failed, using pdf-extract fallback");
                    Ok(fallback)
                }
                Err(err) => Err(TextwerkError::Extraction(format!(
                    "{primary_err}; pdf-extract also failed: {err}"
                ))),
            },
        }
    }
}
