//! Helpers for handing finished reports to and from transport layers.

use crate::error::ReportError;
use crate::report::sanitize::sanitize;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use regex::Regex;
use std::fmt::Display;
use std::sync::LazyLock;

static PDF_EXTENSION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\.pdf$").expect("BUG: invalid PDF_EXTENSION_RE regex literal"));

static UNSAFE_FILENAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9._-]+").expect("BUG: invalid UNSAFE_FILENAME_RE regex literal"));

/// Returns the payload after a `data:...,` prefix, or `source` trimmed.
pub fn strip_data_uri(source: &str) -> &str {
    let trimmed = source.trim();
    match trimmed.strip_prefix("data:").and_then(|rest| rest.split_once(',')) {
        Some((_, payload)) => payload,
        None => trimmed,
    }
}

/// Decodes a stored report payload.
///
/// Accepts bare base64 or a data URI. Padding and alphabet are checked
/// strictly, and empty content is rejected.
pub fn decode_report_payload(payload: &str) -> Result<Vec<u8>, ReportError> {
    let encoded = strip_data_uri(payload);
    if encoded.is_empty() {
        return Err(ReportError::InvalidInput("report payload is empty".to_string()));
    }
    let bytes = STANDARD.decode(encoded)?;
    if bytes.is_empty() {
        return Err(ReportError::InvalidInput("report payload decodes to no data".to_string()));
    }
    Ok(bytes)
}

/// Builds a `Content-Disposition` value for downloading a report.
///
/// `filename*` carries the full name with `.pdf` appended, percent-encoded.
/// `filename` is the ASCII fallback: a trailing `.pdf` is dropped, every run
/// of characters outside `[A-Za-z0-9._-]` becomes `_`, and outer underscores
/// are trimmed. Blank names, and names with nothing left for the fallback,
/// use `report_<id>`.
pub fn content_disposition(report_id: impl Display, name: Option<&str>, inline: bool) -> String {
    let disposition = if inline { "inline" } else { "attachment" };
    let default_base = format!("report_{report_id}");

    let cleaned = name.map(sanitize).unwrap_or_default();
    let raw = match cleaned.trim() {
        "" => default_base.clone(),
        trimmed => trimmed.to_string(),
    };

    let without_extension = PDF_EXTENSION_RE.replace(&raw, "");
    let replaced = UNSAFE_FILENAME_RE.replace_all(&without_extension, "_");
    let ascii_base = match replaced.trim_matches('_') {
        "" => default_base.as_str(),
        base => base,
    };

    format!(
        "{disposition}; filename=\"{ascii_base}.pdf\"; filename*=UTF-8''{}",
        urlencoding::encode(&format!("{raw}.pdf"))
    )
}
