use super::FlowContext;
use super::input::Section;
use super::sanitize::{print_value, sanitize};
use crate::error::ReportError;
use orcas_layout::{LayoutCursor, TextElement, wrap_text};

const BULLET: &str = "•";

/// Draws one section: bold title, data grid, then bulleted notes.
///
/// The title only starts on the current page if the grid's header and first
/// row fit below it as well. The grid engine decides its own page breaks;
/// the cursor resumes from wherever it finished. Rows whose cell count
/// differs from the column count are rejected.
pub fn render_section(
    ctx: &mut FlowContext<'_>,
    section: &Section,
    cursor: LayoutCursor,
) -> Result<LayoutCursor, ReportError> {
    let spacing = ctx.config.spacing;
    let typography = ctx.config.typography;
    let geometry = *ctx.geometry();

    let columns: Vec<String> = section.columns.iter().map(|c| sanitize(c)).collect();
    let rows: Vec<Vec<String>> = if columns.is_empty() {
        Vec::new()
    } else {
        section
            .rows
            .iter()
            .map(|row| row.iter().map(print_value).collect())
            .collect()
    };

    let title_advance = spacing.line_height.max(typography.section_title_size + 4.0);
    let grid_lead = ctx.grid_lead_height(&columns, &rows)?;
    let needed = spacing.min_section_space.max(title_advance + grid_lead);
    let at_top = cursor.y <= geometry.content_top() + 0.01;
    let mut cursor = if !at_top && cursor.remaining(&geometry) < needed {
        ctx.pages.break_page(cursor)
    } else {
        cursor
    };

    ctx.push_text(
        cursor.page_index,
        geometry.content_left(),
        cursor.y,
        TextElement::new(sanitize(&section.title), typography.section_title_size).bold(),
    )?;
    cursor = cursor.advanced(title_advance);

    if !columns.is_empty() {
        cursor = ctx
            .layout_grid(&columns, &rows, cursor)?
            .advanced(spacing.section_gap);
    } else if !section.rows.is_empty() {
        log::warn!(
            "Section '{}' has {} rows but no columns; rows are not drawn",
            section.title,
            section.rows.len()
        );
    }

    if section.notes.is_empty() {
        return Ok(cursor);
    }
    cursor = render_notes(ctx, &section.notes, cursor)?;
    Ok(cursor.advanced(spacing.section_gap))
}

/// One bullet per note; wrapped lines are indented under the bullet text and
/// each line gets its own fit check.
fn render_notes(ctx: &mut FlowContext<'_>, notes: &[String], mut cursor: LayoutCursor) -> Result<LayoutCursor, ReportError> {
    let line_height = ctx.config.spacing.line_height;
    let font_size = ctx.config.typography.body_size;
    let geometry = *ctx.geometry();
    let indent = ctx.text_width(&format!("{BULLET} "), font_size);
    let text_width = geometry.content_width() - indent;

    for note in notes {
        let lines = wrap_text(&ctx.font.metrics, &sanitize(note), font_size, text_width);
        for (i, line) in lines.into_iter().enumerate() {
            cursor = ctx.ensure_room(cursor, line_height);
            let (x, content) = if i == 0 {
                (geometry.content_left(), format!("{BULLET} {line}"))
            } else {
                (geometry.content_left() + indent, line)
            };
            ctx.push_text(
                cursor.page_index,
                x,
                cursor.y + (line_height - font_size) / 2.0,
                TextElement::new(content, font_size),
            )?;
            cursor = cursor.advanced(line_height);
        }
    }
    Ok(cursor)
}
