//! Upload validation: format rejection, binary sniffing, and async file reads.

use std::path::Path;
use std::sync::OnceLock;

use analyzer_core::Transaction;
use chrono::Utc;
use regex::Regex;
use tracing::{debug, info, warn};

use crate::error::{IngestError, Result};
use crate::parsers::csv_statement::parse_statement_report;
use crate::types::{ParseReport, UploadedFile};

/// File extensions rejected by name, regardless of content
pub const REJECTED_EXTENSIONS: &[&str] = &[".pdf", ".xls", ".xlsx"];

/// Number of leading characters inspected by the binary heuristic
pub const SNIFF_CHARS: usize = 500;

/// True when the file name ends in a PDF or spreadsheet extension (case-insensitive)
pub fn is_rejected_format(name: &str) -> bool {
    let name = name.to_lowercase();
    REJECTED_EXTENSIONS.iter().any(|ext| name.ends_with(ext))
}

/// Heuristic: control characters U+0000–U+0008 or U+000E–U+001F within the
/// first 500 characters mark the text as binary. Tabs, newlines and carriage
/// returns are allowed.
pub fn looks_binary(text: &str) -> bool {
    let head = match text.char_indices().nth(SNIFF_CHARS) {
        Some((end, _)) => &text[..end],
        None => text,
    };
    control_re().is_match(head)
}

fn control_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[\x00-\x08\x0E-\x1F]").expect("invalid control-char regex"))
}

/// Validate and parse an uploaded file into a non-empty transaction batch.
pub fn parse_upload(file: &UploadedFile) -> Result<Vec<Transaction>> {
    parse_upload_report(file).map(|report| report.transactions)
}

/// Like [`parse_upload`], but also returns the rows that were dropped.
pub fn parse_upload_report(file: &UploadedFile) -> Result<ParseReport> {
    if is_rejected_format(&file.name) {
        warn!(file = %file.name, "rejecting unsupported format");
        return Err(IngestError::UnsupportedFormat);
    }

    let text = file.text();
    if looks_binary(&text) {
        warn!(file = %file.name, "rejecting binary content");
        return Err(IngestError::BinaryContentDetected);
    }

    let report = parse_statement_report(&text, Utc::now());
    if report.transactions.is_empty() {
        return Err(IngestError::NoValidTransactions);
    }

    info!(
        file = %file.name,
        count = report.transactions.len(),
        dropped = report.dropped.len(),
        "parsed statement"
    );
    Ok(report)
}

/// Read a file from disk. Dropping the returned future abandons the read.
pub async fn read_upload(path: impl AsRef<Path>) -> Result<UploadedFile> {
    let path = path.as_ref();
    let content = tokio::fs::read(path).await.map_err(|source| IngestError::Read {
        path: path.display().to_string(),
        source,
    })?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    debug!(file = %name, bytes = content.len(), "read upload");
    Ok(UploadedFile { name, content })
}

/// Check the name, read the file, then parse it. Rejected formats are never read.
pub async fn ingest_path(path: impl AsRef<Path>) -> Result<Vec<Transaction>> {
    ingest_path_report(path).await.map(|report| report.transactions)
}

/// Like [`ingest_path`], but also returns the rows that were dropped.
pub async fn ingest_path_report(path: impl AsRef<Path>) -> Result<ParseReport> {
    let path = path.as_ref();
    if is_rejected_format(&path.to_string_lossy()) {
        warn!(path = %path.display(), "rejecting unsupported format");
        return Err(IngestError::UnsupportedFormat);
    }
    let file = read_upload(path).await?;
    parse_upload_report(&file)
}
