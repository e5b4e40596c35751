// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// textwerk-convert — Conversion orchestration for the Textwerk converter.
//
// `ConversionOrchestrator` drives one document through classification,
// extraction or the OCR page loop, cleaning, assembly, and output writing,
// containing every failure at the document boundary. `BatchRunner` sequences
// the orchestrator over a document list and aggregates the outcome.

pub mod batch;
pub mod orchestrator;

#[cfg(test)]
pub(crate) mod fakes;

pub use batch::BatchRunner;
pub use orchestrator::{ConversionOrchestrator, OcrCapability};
