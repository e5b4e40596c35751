// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Front-end callback seams. The conversion core reports progress and asks
// questions through these traits, so it stays independent of any particular
// presentation technology (CLI today, anything else tomorrow).

use std::path::Path;

use tracing::info;

/// Receives human-readable progress from the orchestrator and batch runner.
pub trait ProgressSink {
    /// A log line intended for the user (not the tracing diagnostics stream).
    fn log(&self, message: &str);

    /// Called after each document: `done` of `total` processed.
    fn progress(&self, done: usize, total: usize);
}

/// Discards everything. Useful for tests and embedding.
#[derive(Debug, Default)]
pub struct NullSink;

impl ProgressSink for NullSink {
    fn log(&self, _message: &str) {}
    fn progress(&self, _done: usize, _total: usize) {}
}

/// Forwards progress into the `tracing` stream.
#[derive(Debug, Default)]
pub struct TracingSink;

impl ProgressSink for TracingSink {
    fn log(&self, message: &str) {
        info!("{message}");
    }

    fn progress(&self, done: usize, total: usize) {
        info!(done, total, "batch progress");
    }
}

/// Asks whether an existing output file may be overwritten.
///
/// Declining is not an error — the document is skipped.
pub trait OverwritePrompt {
    fn ask_overwrite(&self, path: &Path) -> bool;
}

/// Always answers yes. For non-interactive runs.
#[derive(Debug, Default)]
pub struct AlwaysOverwrite;

impl OverwritePrompt for AlwaysOverwrite {
    fn ask_overwrite(&self, _path: &Path) -> bool {
        true
    }
}
