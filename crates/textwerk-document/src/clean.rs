// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Text cleaner — whitespace and punctuation normalization for raw extraction
// and OCR output. Pure and idempotent.

use std::sync::LazyLock;

use regex::Regex;

/// Control characters other than tab and newline. Line endings are
/// normalized to `\n` before this runs, so `\r` never reaches the class.
static CONTROL_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\x00-\x08\x0B\x0C\x0E-\x1F\x7F]").expect("valid regex"));

/// Three or more consecutive newlines. Two are kept — that is a paragraph
/// break; anything more is dead space.
static EXCESS_NEWLINES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{3,}").expect("valid regex"));

/// Runs of horizontal whitespace. Never matches newlines, so line structure
/// survives this pass.
static HORIZONTAL_WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ \t]+").expect("valid regex"));

/// Whitespace directly before sentence punctuation. OCR loves inserting it.
static SPACE_BEFORE_PUNCTUATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+([.,!?;:])").expect("valid regex"));

/// Normalize whitespace and punctuation spacing in raw page text.
///
/// Transformations, in order:
///
/// 1. Strip control characters (after normalizing line endings to `\n`).
/// 2. Collapse runs of 3+ newlines to exactly 2.
/// 3. Collapse runs of spaces/tabs to a single space.
/// 4. Remove whitespace immediately preceding `.,!?;:`.
/// 5. Trim the whole result.
///
/// The output never contains a triple-newline run, a double space, or
/// punctuation preceded by whitespace — and `clean_text(clean_text(x)) ==
/// clean_text(x)` for all inputs.
pub fn clean_text(raw: &str) -> String {
    let text = raw.replace("\r\n", "\n").replace('\r', "\n");
    let text = CONTROL_CHARS.replace_all(&text, "");
    let text = EXCESS_NEWLINES.replace_all(&text, "\n\n");
    let text = HORIZONTAL_WHITESPACE.replace_all(&text, " ");
    let text = SPACE_BEFORE_PUNCTUATION.replace_all(&text, "$1");
    text.trim().to_string()
}
