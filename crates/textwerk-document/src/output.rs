// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Output assembly — joins per-page text with an explicit page-boundary
// marker and writes the final TXT or DOCX document.

use std::fs::File;
use std::path::{Path, PathBuf};

use docx_rs::{Docx, Paragraph, Run};
use textwerk_core::error::{Result, TextwerkError};
use textwerk_core::types::OutputFormat;
use tracing::{debug, instrument};

/// Sentinel line inserted between pages of multi-page output.
///
/// TXT output keeps it verbatim; DOCX assembly splits on it and renders the
/// boundary as a blank paragraph instead.
pub const PAGE_SEPARATOR: &str = "\n\n----------\n\n";

/// Join ordered per-page texts with the page-boundary marker.
pub fn join_pages(pages: &[String]) -> String {
    pages.join(PAGE_SEPARATOR)
}

/// Output file path: `<original-basename>.<ext>` in the output directory.
pub fn output_path(source: &Path, output_dir: &Path, format: OutputFormat) -> PathBuf {
    let stem = source
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    output_dir.join(format!("{stem}.{}", format.extension()))
}

/// Write joined text verbatim as UTF-8 plain text.
#[instrument(skip(text), fields(path = %path.display(), chars = text.len()))]
pub fn write_txt(path: &Path, text: &str) -> Result<()> {
    std::fs::write(path, text)
        .map_err(|err| TextwerkError::Write(format!("failed to write {}: {err}", path.display())))
}

/// Write joined text as a paragraph-structured DOCX document.
///
/// The text is split back on [`PAGE_SEPARATOR`]; each non-empty line becomes
/// one paragraph, pages are separated by a single blank paragraph, and a
/// trailing empty paragraph is trimmed.
#[instrument(skip(joined), fields(path = %path.display()))]
pub fn write_docx(path: &Path, joined: &str) -> Result<()> {
    let plan = paragraph_plan(joined);
    debug!(paragraphs = plan.len(), "assembling DOCX");

    let mut docx = Docx::new();
    for paragraph in &plan {
        let mut para = Paragraph::new();
        if !paragraph.is_empty() {
            para = para.add_run(Run::new().add_text(paragraph.as_str()));
        }
        docx = docx.add_paragraph(para);
    }

    let file = File::create(path)
        .map_err(|err| TextwerkError::Write(format!("failed to create {}: {err}", path.display())))?;
    docx.build()
        .pack(file)
        .map_err(|err| TextwerkError::Write(format!("failed to pack {}: {err}", path.display())))?;
    Ok(())
}

/// Plan the DOCX paragraph sequence for joined page text.
///
/// An empty string in the plan is a blank separator paragraph between pages.
fn paragraph_plan(joined: &str) -> Vec<String> {
    let mut plan = Vec::new();
    for (index, page) in joined.split(PAGE_SEPARATOR).enumerate() {
        if index > 0 {
            plan.push(String::new());
        }
        for line in page.lines().filter(|line| !line.trim().is_empty()) {
            plan.push(line.trim().to_string());
        }
    }
    while plan.last().is_some_and(|p| p.is_empty()) {
        plan.pop();
    }
    plan
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_then_split_round_trips() {
        let pages = vec!["page one".to_string(), "page two".to_string()];
        let joined = join_pages(&pages);
        let split: Vec<&str> = joined.split(PAGE_SEPARATOR).collect();
        assert_eq!(split, vec!["page one", "page two"]);
    }

    #[test]
    fn single_page_has_no_separator() {
        let joined = join_pages(&["only page".to_string()]);
        assert!(!joined.contains(PAGE_SEPARATOR.trim()));
    }

    #[test]
    fn output_path_uses_basename_and_extension() {
        let path = output_path(
            Path::new("/incoming/Report Final.pdf"),
            Path::new("/out"),
            OutputFormat::Docx,
        );
        assert_eq!(path, PathBuf::from("/out/Report Final.docx"));

        let path = output_path(Path::new("scan.pdf"), Path::new("."), OutputFormat::Txt);
        assert_eq!(path, PathBuf::from("./scan.txt"));
    }

    #[test]
    fn plan_emits_one_paragraph_per_nonempty_line() {
        let plan = paragraph_plan("first line\n\nsecond line\nthird line");
        assert_eq!(plan, vec!["first line", "second line", "third line"]);
    }

    #[test]
    fn plan_separates_pages_with_one_blank_paragraph() {
        let joined = join_pages(&["alpha".to_string(), "beta\ngamma".to_string()]);
        let plan = paragraph_plan(&joined);
        assert_eq!(plan, vec!["alpha", "", "beta", "gamma"]);
    }

    #[test]
    fn plan_trims_trailing_blank_paragraphs() {
        // Last page empty: the inter-page blank must not survive at the end.
        let joined = join_pages(&["alpha".to_string(), String::new()]);
        let plan = paragraph_plan(&joined);
        assert_eq!(plan, vec!["alpha"]);
    }

    #[test]
    fn plan_of_empty_text_is_empty() {
        assert!(paragraph_plan("").is_empty());
    }

    #[test]
    fn write_txt_writes_verbatim() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("out.txt");
        let joined = join_pages(&["one".to_string(), "two".to_string()]);

        write_txt(&path, &joined).expect("write");
        let on_disk = std::fs::read_to_string(&path).expect("read back");
        assert_eq!(on_disk, joined);
        assert!(on_disk.contains("----------"));
    }

    #[test]
    fn write_docx_produces_nonempty_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("out.docx");

        write_docx(&path, "first line\nsecond line").expect("write");
        let size = std::fs::metadata(&path).expect("metadata").len();
        assert!(size > 0, "docx file must not be empty");
    }

    #[test]
    fn write_docx_to_bad_path_is_a_write_error() {
        let result = write_docx(Path::new("/nonexistent-dir/out.docx"), "text");
        assert!(matches!(result, Err(TextwerkError::Write(_))));
    }
}
