use crate::LayoutCursor;
use crate::LayoutError;
use crate::algorithms::pagination::check_child_fit;
use orcas_types::PageGeometry;
use std::ops::Range;

/// Slack allowed when comparing heights against the page bottom.
const EPSILON: f32 = 0.01;

/// How a row's height follows from its wrapped line count.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowSizing {
    pub line_height: f32,
    pub padding: f32,
}

impl RowSizing {
    pub fn height(&self, lines: usize) -> f32 {
        lines as f32 * self.line_height + 2.0 * self.padding
    }

    /// How many lines of one row fit into `available` points.
    pub fn lines_fitting(&self, available: f32) -> usize {
        if self.line_height <= 0.0 {
            return 0;
        }
        ((available - 2.0 * self.padding + EPSILON) / self.line_height)
            .floor()
            .max(0.0) as usize
    }
}

/// A run of one body row's lines drawn together on one page.
#[derive(Debug, Clone, PartialEq)]
pub struct RowSlice {
    pub row: usize,
    pub lines: Range<usize>,
    pub at: LayoutCursor,
}

/// Where each header instance and each body row slice of a grid lands.
#[derive(Debug, Clone, PartialEq)]
pub struct GridPlacement {
    /// One entry per page the grid touches; the header row is repeated there.
    pub headers: Vec<LayoutCursor>,
    /// In row order. Rows that fit on a page get exactly one slice.
    pub slices: Vec<RowSlice>,
    /// Cursor just below the last drawn row.
    pub end: LayoutCursor,
}

/// Body lines that fit on a page below a header.
fn page_lines(geometry: &PageGeometry, header_height: f32, sizing: RowSizing) -> usize {
    sizing.lines_fitting(geometry.content_height() - header_height)
}

/// Height that must be free where the grid starts: the header plus its first
/// row, or the first line of that row when the row is split anyway.
pub fn lead_height(geometry: &PageGeometry, header_height: f32, sizing: RowSizing, first_row_lines: Option<usize>) -> f32 {
    match first_row_lines {
        Some(lines) if lines <= page_lines(geometry, header_height, sizing) => header_height + sizing.height(lines),
        Some(_) => header_height + sizing.height(1),
        None => header_height,
    }
}

/// Assigns rows to pages without drawing anything.
///
/// The header and first row are kept together and every continuation page
/// starts with a repeated header. A row that fits on a page is never split;
/// a row taller than a page is split by lines, starting wherever at least
/// one of its lines fits.
pub fn place_rows(
    geometry: &PageGeometry,
    start: LayoutCursor,
    header_height: f32,
    sizing: RowSizing,
    row_lines: &[usize],
) -> Result<GridPlacement, LayoutError> {
    let capacity = geometry.content_height();
    let bottom = geometry.content_bottom();

    if header_height > capacity + EPSILON {
        return Err(LayoutError::ElementTooLarge(header_height, capacity));
    }
    let per_page = page_lines(geometry, header_height, sizing);
    if per_page == 0 && !row_lines.is_empty() {
        return Err(LayoutError::ElementTooLarge(header_height + sizing.height(1), capacity));
    }

    let next_page = |cursor: LayoutCursor| LayoutCursor::top_of_page(cursor.page_index + 1, geometry);

    let mut cursor = start;
    let lead = lead_height(geometry, header_height, sizing, row_lines.first().copied());
    if check_child_fit(cursor.y, lead, bottom).should_break {
        cursor = next_page(cursor);
    }

    let mut headers = vec![cursor];
    cursor = cursor.advanced(header_height);

    let mut slices = Vec::with_capacity(row_lines.len());
    for (row, &lines) in row_lines.iter().enumerate() {
        let oversized = lines > per_page;
        let mut first = 0;
        while first < lines {
            let fitting = sizing.lines_fitting(bottom - cursor.y);
            let remaining = lines - first;
            let take = if remaining <= fitting {
                remaining
            } else if oversized {
                fitting
            } else {
                0
            };
            if take == 0 {
                cursor = next_page(cursor);
                headers.push(cursor);
                cursor = cursor.advanced(header_height);
                continue;
            }
            slices.push(RowSlice {
                row,
                lines: first..first + take,
                at: cursor,
            });
            cursor = cursor.advanced(sizing.height(take));
            first += take;
        }
    }
    if slices.len() > row_lines.len() {
        log::debug!(
            "Split oversized rows into {} slices across {} page(s)",
            slices.len(),
            headers.len()
        );
    }

    Ok(GridPlacement {
        headers,
        slices,
        end: cursor,
    })
}
