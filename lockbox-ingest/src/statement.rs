//! Statement text to ordered lines.
//!
//! PDF-to-text extraction happens upstream (pdftotext or similar);
//! this adapter takes the extracted text and yields trimmed, non-empty
//! lines in document order.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// Split extracted statement text into trimmed, non-empty lines.
pub fn extract_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Read a statement text file and split it into lines.
pub fn read_statement_text(path: impl AsRef<Path>) -> Result<Vec<String>> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading statement text {}", path.display()))?;
    Ok(extract_lines(&text))
}
