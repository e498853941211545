use super::FlowContext;
use super::input::MetadataRow;
use super::sanitize::{print_value, sanitize};
use crate::error::ReportError;
use orcas_layout::LayoutCursor;

/// Draws the `Field | Value` grid at the top of the document.
///
/// Returns `cursor` unchanged when there are no rows.
pub fn render_metadata(
    ctx: &mut FlowContext<'_>,
    rows: &[MetadataRow],
    cursor: LayoutCursor,
) -> Result<LayoutCursor, ReportError> {
    if rows.is_empty() {
        return Ok(cursor);
    }
    let columns = vec!["Field".to_string(), "Value".to_string()];
    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|row| vec![sanitize(&row.label), print_value(&row.value)])
        .collect();

    let end = ctx.layout_grid(&columns, &cells, cursor)?;
    log::debug!("Metadata grid with {} rows ends at {:?}", rows.len(), end);
    Ok(end.advanced(ctx.config.spacing.section_gap))
}
