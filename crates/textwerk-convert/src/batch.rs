// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Batch runner — sequences the orchestrator over a document list.
//
// Documents run strictly sequentially, in user-selection order, on whatever
// single worker thread the front end dedicates to conversion. The
// cancellation signal is re-checked before every document; documents not yet
// reached are simply not attempted and never appear in the summary.

use std::path::PathBuf;
use std::sync::Arc;

use textwerk_core::cancel::CancelFlag;
use textwerk_core::config::ConversionOptions;
use textwerk_core::progress::ProgressSink;
use textwerk_core::types::{BatchSummary, DocumentOutcome};
use tracing::{info, instrument};

use crate::orchestrator::ConversionOrchestrator;

/// Runs a whole batch and aggregates per-document results.
pub struct BatchRunner {
    orchestrator: ConversionOrchestrator,
    sink: Arc<dyn ProgressSink>,
    cancel: CancelFlag,
}

impl BatchRunner {
    pub fn new(
        orchestrator: ConversionOrchestrator,
        sink: Arc<dyn ProgressSink>,
        cancel: CancelFlag,
    ) -> Self {
        Self {
            orchestrator,
            sink,
            cancel,
        }
    }

    /// Convert every document in order. Failures are contained per document;
    /// the batch itself cannot fail — it always produces a summary.
    #[instrument(skip_all, fields(documents = documents.len()))]
    pub fn run(&self, documents: &[PathBuf], options: &ConversionOptions) -> BatchSummary {
        let total = documents.len();
        let mut summary = BatchSummary::default();

        for (index, document) in documents.iter().enumerate() {
            if self.cancel.is_cancelled() {
                self.sink.log("batch cancelled — remaining documents not attempted");
                summary.cancelled = true;
                break;
            }

            let result = self.orchestrator.convert(document, options);
            match result.outcome {
                DocumentOutcome::Written => {
                    if result.downgraded {
                        summary.downgraded += 1;
                    }
                    if let Some(output) = result.output.clone() {
                        summary.converted.push(output);
                    }
                }
                DocumentOutcome::Failed => {
                    summary
                        .errors
                        .push((result.file_name(), result.error.clone().unwrap_or_default()));
                }
                DocumentOutcome::Skipped => summary.skipped += 1,
                DocumentOutcome::Cancelled => {
                    summary.cancelled = true;
                }
            }

            self.sink.progress(index + 1, total);

            if summary.cancelled {
                break;
            }
        }

        info!(
            converted = summary.converted.len(),
            errors = summary.errors.len(),
            skipped = summary.skipped,
            cancelled = summary.cancelled,
            "batch finished"
        );
        summary
    }
}
