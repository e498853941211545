use super::FlowContext;
use super::input::LegendItem;
use super::sanitize::sanitize;
use crate::error::ReportError;
use orcas_layout::{LayoutCursor, PositionedElement, RectElement, TextElement};
use orcas_types::{Color, Rect};

/// Splits items into rows for a line of `available` points.
///
/// Each entry is `(item index, x offset from the row start)`. An item that
/// would overflow moves to a new row unless it is the first on its row.
pub fn plan_legend_rows(widths: &[f32], available: f32) -> Vec<Vec<(usize, f32)>> {
    let mut rows: Vec<Vec<(usize, f32)>> = Vec::new();
    let mut x = 0.0f32;
    for (index, width) in widths.iter().enumerate() {
        match rows.last_mut() {
            Some(row) if x + width <= available => row.push((index, x)),
            _ => {
                x = 0.0;
                rows.push(vec![(index, x)]);
            }
        }
        x += width;
    }
    rows
}

/// Draws swatch and label pairs left to right, wrapping rows and breaking
/// pages as needed. Returns the cursor one line below the last row.
pub fn render_legend(
    ctx: &mut FlowContext<'_>,
    items: &[LegendItem],
    cursor: LayoutCursor,
) -> Result<LayoutCursor, ReportError> {
    if items.is_empty() {
        return Ok(cursor);
    }
    let spacing = ctx.config.spacing;
    let font_size = ctx.config.typography.body_size;
    let line_height = spacing.line_height;

    let labels: Vec<String> = items.iter().map(|item| sanitize(&item.label)).collect();
    let widths: Vec<f32> = labels
        .iter()
        .map(|label| {
            spacing.legend_swatch + spacing.legend_swatch_gap + ctx.text_width(label, font_size) + spacing.legend_item_gap
        })
        .collect();
    let rows = plan_legend_rows(&widths, ctx.geometry().content_width());
    log::debug!("Legend of {} items wraps into {} row(s)", items.len(), rows.len());

    let left = ctx.geometry().content_left();
    let mut cursor = ctx.ensure_room(cursor, line_height);
    for (row_index, row) in rows.iter().enumerate() {
        if row_index > 0 {
            cursor = ctx.ensure_room(cursor.advanced(line_height), line_height);
        }
        for &(index, offset) in row {
            let x = left + offset;
            let color = Color::from_hex_or_black(items[index].color.as_deref());
            let swatch = Rect::new(
                x,
                cursor.y + (line_height - spacing.legend_swatch) / 2.0,
                spacing.legend_swatch,
                spacing.legend_swatch,
            );
            ctx.pages
                .push(cursor.page_index, PositionedElement::rect(swatch, RectElement::filled(color)))?;
            ctx.push_text(
                cursor.page_index,
                x + spacing.legend_swatch + spacing.legend_swatch_gap,
                cursor.y + (line_height - font_size) / 2.0,
                TextElement::new(labels[index].clone(), font_size),
            )?;
        }
    }
    Ok(cursor.advanced(line_height))
}
