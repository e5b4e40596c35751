// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Textwerk — PDF to DOCX/TXT batch converter.
//
// Entry point. Parses arguments, initialises logging, resolves the OCR
// capability, and runs the batch on a dedicated blocking worker so the async
// context stays free for Ctrl-C handling.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, ValueEnum};
use textwerk_convert::{BatchRunner, ConversionOrchestrator, OcrCapability};
use textwerk_core::cancel::CancelFlag;
use textwerk_core::config::ConversionOptions;
use textwerk_core::progress::{AlwaysOverwrite, OverwritePrompt, ProgressSink};
use textwerk_core::types::{BatchSummary, OutputFormat};
use textwerk_document::PdfTextExtractor;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum FormatArg {
    Docx,
    Txt,
}

impl From<FormatArg> for OutputFormat {
    fn from(value: FormatArg) -> Self {
        match value {
            FormatArg::Docx => OutputFormat::Docx,
            FormatArg::Txt => OutputFormat::Txt,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "textwerk", version, about = "Convert PDF documents to DOCX or TXT, with OCR for scans")]
struct Cli {
    /// PDF files to convert, processed in the given order.
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Output format. Documents that need OCR are always written as TXT.
    #[arg(short, long, value_enum, default_value_t = FormatArg::Docx)]
    format: FormatArg,

    /// Directory for converted files.
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// OCR language code; join multiple with '+' for mixed-language
    /// documents (e.g. "pol+eng").
    #[arg(short, long, default_value = "eng")]
    language: String,

    /// Page-to-pixel scale factor for OCR rasterization.
    #[arg(long, default_value_t = 3.0)]
    scale: f32,

    /// Overwrite existing output files without asking.
    #[arg(long)]
    overwrite: bool,
}

/// Prompt on stdin before overwriting an existing output file.
struct StdinPrompt;

impl OverwritePrompt for StdinPrompt {
    fn ask_overwrite(&self, path: &Path) -> bool {
        print!("{} already exists. Overwrite? [y/N] ", path.display());
        let _ = io::stdout().flush();

        let mut answer = String::new();
        if io::stdin().lock().read_line(&mut answer).is_err() {
            return false;
        }
        matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
    }
}

/// Progress straight to the terminal.
struct ConsoleSink;

impl ProgressSink for ConsoleSink {
    fn log(&self, message: &str) {
        println!("{message}");
    }

    fn progress(&self, done: usize, total: usize) {
        println!("[{done}/{total}] documents processed");
    }
}

/// Probe the rasterizer and OCR engine once at startup. Both must be usable
/// for the OCR path to run at all; otherwise scans degrade to empty text.
#[cfg(feature = "ocr")]
fn resolve_ocr_capability(language: &str) -> OcrCapability {
    use textwerk_document::{PdfiumRasterizer, TesseractOcr};

    let rasterizer = match PdfiumRasterizer::new() {
        Ok(rasterizer) => rasterizer,
        Err(err) => {
            warn!(%err, "pdfium unavailable — OCR disabled for this run");
            return OcrCapability::Unavailable;
        }
    };
    match TesseractOcr::new(language) {
        Ok(engine) => OcrCapability::Available {
            rasterizer: Box::new(rasterizer),
            engine: Box::new(engine),
        },
        Err(err) => {
            warn!(%err, "tesseract unavailable — OCR disabled for this run");
            OcrCapability::Unavailable
        }
    }
}

#[cfg(not(feature = "ocr"))]
fn resolve_ocr_capability(_language: &str) -> OcrCapability {
    warn!("built without the \"ocr\" feature — scanned documents will produce no text");
    OcrCapability::Unavailable
}

fn print_summary(summary: &BatchSummary, total: usize) {
    println!();
    println!(
        "Converted {} of {} file(s).",
        summary.converted.len(),
        total
    );
    if summary.downgraded > 0 {
        println!(
            "{} scanned file(s) were written as TXT instead of DOCX.",
            summary.downgraded
        );
    }
    if summary.skipped > 0 {
        println!("{} file(s) skipped (output already exists).", summary.skipped);
    }
    if !summary.errors.is_empty() {
        println!("Errors:");
        for (name, message) in &summary.errors {
            println!("  - {name}: {message}");
        }
    }
    if summary.cancelled {
        println!("Run was cancelled before completion.");
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    for file in &cli.files {
        if !file.is_file() {
            eprintln!("error: {} is not a readable file", file.display());
            return ExitCode::FAILURE;
        }
    }
    if let Err(err) = std::fs::create_dir_all(&cli.output_dir) {
        eprintln!(
            "error: cannot create output directory {}: {err}",
            cli.output_dir.display()
        );
        return ExitCode::FAILURE;
    }

    let options = ConversionOptions {
        format: cli.format.into(),
        output_dir: cli.output_dir.clone(),
        language: cli.language.clone(),
        render_scale: cli.scale,
        ..Default::default()
    };

    let cancel = CancelFlag::new();
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("cancellation requested — finishing the current page");
                cancel.cancel();
            }
        });
    }

    // The whole batch runs on one dedicated worker; documents and pages are
    // strictly sequential within it.
    let files = cli.files.clone();
    let overwrite = cli.overwrite;
    let worker_cancel = cancel.clone();
    let worker = tokio::task::spawn_blocking(move || {
        let prompt: Box<dyn OverwritePrompt> = if overwrite {
            Box::new(AlwaysOverwrite)
        } else {
            Box::new(StdinPrompt)
        };
        let sink: Arc<dyn ProgressSink> = Arc::new(ConsoleSink);
        let ocr = resolve_ocr_capability(&options.language);

        let orchestrator = ConversionOrchestrator::new(
            Box::new(PdfTextExtractor::new()),
            ocr,
            prompt,
            sink.clone(),
            worker_cancel.clone(),
        );
        BatchRunner::new(orchestrator, sink, worker_cancel).run(&files, &options)
    });

    match worker.await {
        Ok(summary) => {
            print_summary(&summary, cli.files.len());
            if summary.is_success() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Err(err) => {
            eprintln!("error: conversion worker failed: {err}");
            ExitCode::FAILURE
        }
    }
}
