// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the Textwerk converter.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Supported output document formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Docx,
    Txt,
}

impl OutputFormat {
    /// File extension (without the dot) for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Docx => "docx",
            Self::Txt => "txt",
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}

/// Processing phases a document moves through.
///
/// `Pending → Classifying → {Extracting | OcrRunning} → Assembling` and then
/// one of the terminal [`DocumentOutcome`] states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConversionPhase {
    Pending,
    Classifying,
    Extracting,
    OcrRunning,
    Assembling,
}

impl std::fmt::Display for ConversionPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Pending => "pending",
            Self::Classifying => "classifying",
            Self::Extracting => "extracting",
            Self::OcrRunning => "ocr-running",
            Self::Assembling => "assembling",
        };
        f.write_str(label)
    }
}

/// Terminal state of one document's conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DocumentOutcome {
    /// Output file written and validated.
    Written,
    /// Conversion failed — see the result's error message.
    Failed,
    /// Cancellation signal observed; no output written.
    Cancelled,
    /// User declined to overwrite an existing output file. Not a failure.
    Skipped,
}

/// Per-document record produced by the orchestrator.
///
/// Immutable once created. Exactly one file exists on disk for a `Written`
/// outcome; zero files for every other outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionResult {
    /// The source document.
    pub source: PathBuf,
    /// The output file, if one was (or would have been) produced.
    pub output: Option<PathBuf>,
    pub outcome: DocumentOutcome,
    /// True when OCR forced a DOCX request down to plain text.
    pub downgraded: bool,
    /// Failure reason for `Failed` outcomes.
    pub error: Option<String>,
}

impl ConversionResult {
    pub fn written(source: &Path, output: PathBuf, downgraded: bool) -> Self {
        Self {
            source: source.to_path_buf(),
            output: Some(output),
            outcome: DocumentOutcome::Written,
            downgraded,
            error: None,
        }
    }

    pub fn failed(source: &Path, message: impl Into<String>) -> Self {
        Self {
            source: source.to_path_buf(),
            output: None,
            outcome: DocumentOutcome::Failed,
            downgraded: false,
            error: Some(message.into()),
        }
    }

    pub fn cancelled(source: &Path) -> Self {
        Self {
            source: source.to_path_buf(),
            output: None,
            outcome: DocumentOutcome::Cancelled,
            downgraded: false,
            error: None,
        }
    }

    pub fn skipped(source: &Path, output: PathBuf) -> Self {
        Self {
            source: source.to_path_buf(),
            output: Some(output),
            outcome: DocumentOutcome::Skipped,
            downgraded: false,
            error: None,
        }
    }

    /// File name of the source document, for summaries and logs.
    pub fn file_name(&self) -> String {
        self.source
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.source.display().to_string())
    }
}

/// Aggregated outcome of a whole batch run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchSummary {
    /// Output paths of successfully converted documents, in batch order.
    pub converted: Vec<PathBuf>,
    /// (source file name, failure reason) pairs.
    pub errors: Vec<(String, String)>,
    /// Documents skipped because the user declined an overwrite.
    pub skipped: usize,
    /// Documents whose requested DOCX output was downgraded to TXT.
    pub downgraded: usize,
    /// Whether the run was cut short by the cancellation signal.
    pub cancelled: bool,
}

impl BatchSummary {
    /// The batch succeeded overall iff nothing failed and it ran to completion.
    pub fn is_success(&self) -> bool {
        self.errors.is_empty() && !self.cancelled
    }
}
