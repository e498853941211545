//! Report composition: content renderers, page decoration and the engine
//! that sequences them.
//!
//! Every renderer takes the [`FlowContext`] and the current [`LayoutCursor`]
//! and returns the cursor where the next block starts.

pub mod chart;
pub mod decorator;
pub mod engine;
pub mod input;
pub mod legend;
pub mod metadata;
pub mod sanitize;
pub mod section;

use crate::config::ReportConfig;
use orcas_layout::{EmbeddedFont, GridLayout, GridStyle, LayoutCursor, LayoutError, PageSet, PositionedElement, TextElement};
use orcas_types::PageGeometry;

/// Mutable page state and read-only settings for one document build.
pub struct FlowContext<'a> {
    pub pages: PageSet,
    pub font: &'a EmbeddedFont,
    pub config: &'a ReportConfig,
    grid_style: GridStyle,
}

impl<'a> FlowContext<'a> {
    pub fn new(font: &'a EmbeddedFont, config: &'a ReportConfig) -> Self {
        Self {
            pages: PageSet::new(config.geometry),
            font,
            config,
            grid_style: config.grid_style(),
        }
    }

    pub fn geometry(&self) -> &PageGeometry {
        self.pages.geometry()
    }

    pub fn start_cursor(&self) -> LayoutCursor {
        self.pages.start_cursor()
    }

    pub fn text_width(&self, text: &str, font_size: f32) -> f32 {
        self.font.metrics.text_width(text, font_size)
    }

    /// Breaks to the next page unless `height` fits below `cursor`.
    pub fn ensure_room(&mut self, cursor: LayoutCursor, height: f32) -> LayoutCursor {
        self.pages.ensure_room(cursor, height)
    }

    /// Places one line of text whose line box starts at `y`.
    pub fn push_text(&mut self, page_index: usize, x: f32, y: f32, text: TextElement) -> Result<(), LayoutError> {
        let width = self.text_width(&text.content, text.font_size);
        self.pages.push(page_index, PositionedElement::text(x, y, width, text))
    }

    /// Room a grid needs where it starts; see [`GridLayout::lead_height`].
    pub fn grid_lead_height(&self, columns: &[String], rows: &[Vec<String>]) -> Result<f32, LayoutError> {
        GridLayout::new(&self.font.metrics, &self.grid_style).lead_height(self.pages.geometry(), columns, rows)
    }

    /// Lays out a grid at `cursor` through the shared grid engine.
    pub fn layout_grid(
        &mut self,
        columns: &[String],
        rows: &[Vec<String>],
        cursor: LayoutCursor,
    ) -> Result<LayoutCursor, LayoutError> {
        GridLayout::new(&self.font.metrics, &self.grid_style).layout(&mut self.pages, columns, rows, cursor)
    }

    pub fn into_pages(self) -> PageSet {
        self.pages
    }
}
