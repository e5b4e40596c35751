// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Textwerk.

use thiserror::Error;

/// Top-level error type for all Textwerk operations.
///
/// Every variant maps to one class in the conversion failure taxonomy.
/// Failures are contained at the single-document boundary by the
/// orchestrator — none of these ever aborts a whole batch.
#[derive(Debug, Error)]
pub enum TextwerkError {
    // -- Document errors --
    #[error("text extraction failed: {0}")]
    Extraction(String),

    #[error("page rasterization failed: {0}")]
    Rasterization(String),

    #[error("OCR failed: {0}")]
    Ocr(String),

    #[error("image processing failed: {0}")]
    Image(String),

    // -- Output errors --
    #[error("document write failed: {0}")]
    Write(String),

    #[error("output validation failed: {0}")]
    Validation(String),

    // -- Ambient --
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, TextwerkError>;
