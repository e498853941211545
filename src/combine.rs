//! Merging finished reports into a single document.

use crate::delivery::decode_report_payload;
use crate::error::ReportError;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use orcas_pdf_composer::combine_documents;

/// Concatenates the pages of at least two reports, in the given order.
pub fn combine_reports(reports: &[&[u8]]) -> Result<Vec<u8>, ReportError> {
    if reports.len() < 2 {
        return Err(ReportError::InvalidInput(format!(
            "at least two reports are required to combine, got {}",
            reports.len()
        )));
    }
    Ok(combine_documents(reports)?)
}

/// [`combine_reports`] over base64 payloads, returning base64.
pub fn combine_reports_base64<S: AsRef<str>>(payloads: &[S]) -> Result<String, ReportError> {
    let decoded = payloads
        .iter()
        .map(|p| decode_report_payload(p.as_ref()))
        .collect::<Result<Vec<_>, _>>()?;
    let slices: Vec<&[u8]> = decoded.iter().map(Vec::as_slice).collect();
    Ok(STANDARD.encode(combine_reports(&slices)?))
}
