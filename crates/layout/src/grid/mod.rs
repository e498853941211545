//! Tabular layout: column sizing, cell wrapping and row pagination.
//!
//! A grid is laid out in three steps. Natural column widths are measured
//! from the header and every cell and then fitted to the content width
//! ([`solver`]). Each cell is wrapped to its column and rows are sized from
//! their tallest cell. Finally rows are assigned to pages ([`pagination`]),
//! with the header row repeated at the top of every continuation page. A
//! row taller than a whole page is continued line by line on the next.

pub mod pagination;
pub mod solver;

use crate::fonts::FontMetrics;
use crate::text::wrap_text;
use crate::{LayoutCursor, LayoutError, PageSet, PositionedElement, RectElement, TextElement};
use orcas_types::{Color, PageGeometry, Rect};
use pagination::RowSizing;
use std::ops::Range;

#[derive(Debug, Clone, PartialEq)]
pub struct GridStyle {
    pub font_size: f32,
    pub line_height: f32,
    pub padding: f32,
    /// Lower bound for a column's natural width.
    pub min_column_width: f32,
    pub header_fill: Color,
    pub header_text: Color,
    /// Background of every second body row.
    pub stripe_fill: Option<Color>,
    pub border: Color,
    pub border_width: f32,
}

impl Default for GridStyle {
    fn default() -> Self {
        Self {
            font_size: 9.0,
            line_height: 11.0,
            padding: 4.0,
            min_column_width: 24.0,
            header_fill: Color::rgb(31, 58, 95),
            header_text: Color::WHITE,
            stripe_fill: Some(Color::gray(244)),
            border: Color::gray(200),
            border_width: 0.5,
        }
    }
}

/// Cell text already wrapped to its column.
type WrappedRow = Vec<Vec<String>>;

struct PreparedGrid {
    widths: Vec<f32>,
    header: WrappedRow,
    body: Vec<WrappedRow>,
}

pub struct GridLayout<'a> {
    metrics: &'a FontMetrics,
    style: &'a GridStyle,
}

impl<'a> GridLayout<'a> {
    pub fn new(metrics: &'a FontMetrics, style: &'a GridStyle) -> Self {
        Self { metrics, style }
    }

    /// Height the grid needs where it starts: its header plus the part of
    /// the first row that is kept with it. Zero when there are no columns.
    pub fn lead_height(
        &self,
        geometry: &PageGeometry,
        columns: &[String],
        rows: &[Vec<String>],
    ) -> Result<f32, LayoutError> {
        validate_rows(columns.len(), rows)?;
        if columns.is_empty() {
            return Ok(0.0);
        }
        let grid = self.prepare(geometry, columns, rows);
        Ok(pagination::lead_height(
            geometry,
            self.sizing().height(line_count(&grid.header)),
            self.sizing(),
            grid.body.first().map(line_count),
        ))
    }

    /// Lays out a grid starting at `start` and returns the cursor just below
    /// its last row. Every row must have exactly one cell per column.
    pub fn layout(
        &self,
        pages: &mut PageSet,
        columns: &[String],
        rows: &[Vec<String>],
        start: LayoutCursor,
    ) -> Result<LayoutCursor, LayoutError> {
        validate_rows(columns.len(), rows)?;
        if columns.is_empty() {
            log::debug!("Grid has no columns; nothing to lay out");
            return Ok(start);
        }

        let geometry = *pages.geometry();
        let grid = self.prepare(&geometry, columns, rows);
        let sizing = self.sizing();
        let header_height = sizing.height(line_count(&grid.header));
        let row_lines: Vec<usize> = grid.body.iter().map(line_count).collect();

        let placement = pagination::place_rows(&geometry, start, header_height, sizing, &row_lines)?;
        log::debug!(
            "Grid of {} columns x {} rows spans {} page(s)",
            columns.len(),
            rows.len(),
            placement.headers.len()
        );

        let left = geometry.content_left();
        let header: Vec<&[String]> = grid.header.iter().map(Vec::as_slice).collect();
        for cursor in &placement.headers {
            pages.ensure_page(cursor.page_index);
            self.draw_row(pages, *cursor, left, &grid.widths, &header, header_height, RowKind::Header)?;
        }
        for slice in &placement.slices {
            pages.ensure_page(slice.at.page_index);
            let cells: Vec<&[String]> = grid.body[slice.row]
                .iter()
                .map(|lines| line_window(lines, &slice.lines))
                .collect();
            let kind = if slice.row % 2 == 1 { RowKind::Striped } else { RowKind::Plain };
            let height = sizing.height(slice.lines.len());
            self.draw_row(pages, slice.at, left, &grid.widths, &cells, height, kind)?;
        }

        Ok(placement.end)
    }

    fn sizing(&self) -> RowSizing {
        RowSizing {
            line_height: self.style.line_height,
            padding: self.style.padding,
        }
    }

    fn prepare(&self, geometry: &PageGeometry, columns: &[String], rows: &[Vec<String>]) -> PreparedGrid {
        let widths = solver::resolve_widths(&self.natural_widths(columns, rows), geometry.content_width());
        let header = self.wrap_row(columns, &widths);
        let body = rows.iter().map(|row| self.wrap_row(row, &widths)).collect();
        PreparedGrid { widths, header, body }
    }

    fn natural_widths(&self, columns: &[String], rows: &[Vec<String>]) -> Vec<f32> {
        let size = self.style.font_size;
        let pad = 2.0 * self.style.padding;
        (0..columns.len())
            .map(|col| {
                let widest = std::iter::once(&columns[col])
                    .chain(rows.iter().map(|row| &row[col]))
                    .map(|text| self.metrics.text_width(text, size))
                    .fold(0.0f32, f32::max);
                (widest + pad).max(self.style.min_column_width)
            })
            .collect()
    }

    fn wrap_row(&self, cells: &[String], widths: &[f32]) -> WrappedRow {
        cells
            .iter()
            .zip(widths)
            .map(|(text, width)| {
                let inner = (width - 2.0 * self.style.padding).max(0.0);
                wrap_text(self.metrics, text, self.style.font_size, inner)
            })
            .collect()
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_row(
        &self,
        pages: &mut PageSet,
        cursor: LayoutCursor,
        left: f32,
        widths: &[f32],
        cells: &[&[String]],
        height: f32,
        kind: RowKind,
    ) -> Result<(), LayoutError> {
        let style = self.style;
        let total_width: f32 = widths.iter().sum();
        let background = match kind {
            RowKind::Header => Some(style.header_fill),
            RowKind::Striped => style.stripe_fill,
            RowKind::Plain => None,
        };
        if let Some(fill) = background {
            let rect = Rect::new(left, cursor.y, total_width, height);
            pages.push(cursor.page_index, PositionedElement::rect(rect, RectElement::filled(fill)))?;
        }

        // Center the line box within the line height.
        let leading = (style.line_height - style.font_size) / 2.0;
        let mut x = left;
        for (lines, width) in cells.iter().zip(widths) {
            for (i, line) in lines.iter().enumerate() {
                if line.is_empty() {
                    continue;
                }
                let y = cursor.y + style.padding + leading + i as f32 * style.line_height;
                let text = match kind {
                    RowKind::Header => TextElement::new(line.clone(), style.font_size)
                        .bold()
                        .colored(style.header_text),
                    _ => TextElement::new(line.clone(), style.font_size),
                };
                let inner = (width - 2.0 * style.padding).max(0.0);
                pages.push(
                    cursor.page_index,
                    PositionedElement::text(x + style.padding, y, inner, text),
                )?;
            }
            let cell = Rect::new(x, cursor.y, *width, height);
            pages.push(
                cursor.page_index,
                PositionedElement::rect(cell, RectElement::stroked(style.border, style.border_width)),
            )?;
            x += width;
        }
        Ok(())
    }
}

fn line_count(row: &WrappedRow) -> usize {
    row.iter().map(Vec::len).max().unwrap_or(1).max(1)
}

/// The lines of one cell that fall into `window`; shorter cells yield fewer.
fn line_window<'l>(lines: &'l [String], window: &Range<usize>) -> &'l [String] {
    let end = window.end.min(lines.len());
    &lines[window.start.min(end)..end]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RowKind {
    Header,
    Plain,
    Striped,
}

fn validate_rows(expected: usize, rows: &[Vec<String>]) -> Result<(), LayoutError> {
    match rows.iter().position(|row| row.len() != expected) {
        Some(row) => Err(LayoutError::RaggedRow {
            row,
            expected,
            found: rows[row].len(),
        }),
        None => Ok(()),
    }
}
