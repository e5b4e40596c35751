// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// In-memory fake collaborators shared by the orchestrator and batch runner
// tests. Call counters let tests assert which path actually ran.

use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use image::{DynamicImage, GrayImage, Luma};
use textwerk_core::cancel::CancelFlag;
use textwerk_core::error::{Result, TextwerkError};
use textwerk_core::progress::{OverwritePrompt, ProgressSink};
use textwerk_document::extract::TextExtractor;
use textwerk_document::ocr::{OcrEngine, SegmentationMode};
use textwerk_document::raster::PageRasterizer;

/// Extractor that always yields the same text (or the same failure).
pub struct FixedExtractor {
    outcome: std::result::Result<String, String>,
    pub calls: Arc<AtomicUsize>,
}

impl FixedExtractor {
    pub fn text(text: &str) -> Self {
        Self {
            outcome: Ok(text.to_string()),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            outcome: Err(message.to_string()),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }
}

impl TextExtractor for FixedExtractor {
    fn extract(&self, _path: &Path) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.outcome {
            Ok(text) => Ok(text.clone()),
            Err(message) => Err(TextwerkError::Extraction(message.clone())),
        }
    }
}

/// Extractor with per-file behaviour, keyed by source file name.
/// Files without an entry fail extraction.
#[derive(Default)]
pub struct MapExtractor {
    by_name: HashMap<String, String>,
}

impl MapExtractor {
    pub fn with(mut self, name: &str, text: &str) -> Self {
        self.by_name.insert(name.to_string(), text.to_string());
        self
    }
}

impl TextExtractor for MapExtractor {
    fn extract(&self, path: &Path) -> Result<String> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.by_name
            .get(&name)
            .cloned()
            .ok_or_else(|| TextwerkError::Extraction(format!("no fixture for {name}")))
    }
}

/// Rasterizer producing blank white pages, with optional per-page failures.
pub struct FakeRasterizer {
    page_total: usize,
    failing: Vec<usize>,
    pub render_calls: Arc<AtomicUsize>,
}

impl FakeRasterizer {
    pub fn pages(page_total: usize) -> Self {
        Self {
            page_total,
            failing: Vec::new(),
            render_calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn failing_on(mut self, index: usize) -> Self {
        self.failing.push(index);
        self
    }
}

impl PageRasterizer for FakeRasterizer {
    fn page_count(&self, _path: &Path) -> Result<usize> {
        Ok(self.page_total)
    }

    fn render_page(&self, _path: &Path, index: usize, _scale: f32) -> Result<DynamicImage> {
        self.render_calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.contains(&index) {
            return Err(TextwerkError::Rasterization(format!(
                "synthetic render failure on page {index}"
            )));
        }
        Ok(DynamicImage::ImageLuma8(GrayImage::from_pixel(
            16,
            16,
            Luma([255u8]),
        )))
    }
}

/// OCR engine returning canned text; `numbered` labels pages by call order.
pub struct FakeOcr {
    text: Option<String>,
    pub calls: Arc<AtomicUsize>,
}

impl Default for FakeOcr {
    fn default() -> Self {
        Self::with_text("recognized text")
    }
}

impl FakeOcr {
    pub fn with_text(text: &str) -> Self {
        Self {
            text: Some(text.to_string()),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Returns "page 1", "page 2", … in recognition order.
    pub fn numbered() -> Self {
        Self {
            text: None,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }
}

impl OcrEngine for FakeOcr {
    fn recognize(
        &self,
        _image: &GrayImage,
        _language: &str,
        _mode: SegmentationMode,
    ) -> Result<String> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(match &self.text {
            Some(text) => text.clone(),
            None => format!("page {call}"),
        })
    }
}

/// Prompt that always allows overwriting.
pub struct AllowPrompt;

impl OverwritePrompt for AllowPrompt {
    fn ask_overwrite(&self, _path: &Path) -> bool {
        true
    }
}

/// Prompt that always declines.
pub struct DenyPrompt;

impl OverwritePrompt for DenyPrompt {
    fn ask_overwrite(&self, _path: &Path) -> bool {
        false
    }
}

/// Sink that records everything it hears, and can flip the cancellation
/// flag after a configured number of progress notifications (for testing
/// mid-batch cancellation).
#[derive(Default)]
pub struct RecordingSink {
    pub logs: Mutex<Vec<String>>,
    pub progress_events: Mutex<Vec<(usize, usize)>>,
    cancel_after: Option<(usize, CancelFlag)>,
}

impl RecordingSink {
    pub fn cancelling_after(done: usize, flag: CancelFlag) -> Self {
        Self {
            cancel_after: Some((done, flag)),
            ..Default::default()
        }
    }
}

impl ProgressSink for RecordingSink {
    fn log(&self, message: &str) {
        self.logs.lock().expect("log lock").push(message.to_string());
    }

    fn progress(&self, done: usize, total: usize) {
        self.progress_events
            .lock()
            .expect("progress lock")
            .push((done, total));
        if let Some((after, flag)) = &self.cancel_after
            && done >= *after
        {
            flag.cancel();
        }
    }
}
