use orcas_types::PageGeometry;

/// The vertical write position while flowing content.
///
/// Cursors are plain values: every rendering step takes one and hands back
/// the next, so no layout state outlives a single call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutCursor {
    pub page_index: usize,
    pub y: f32,
}

impl LayoutCursor {
    pub fn new(page_index: usize, y: f32) -> Self {
        Self { page_index, y }
    }

    /// Cursor at the first content line of `page_index`.
    pub fn top_of_page(page_index: usize, geometry: &PageGeometry) -> Self {
        Self::new(page_index, geometry.content_top())
    }

    pub fn advanced(self, dy: f32) -> Self {
        Self {
            y: self.y + dy,
            ..self
        }
    }

    /// Space left between the cursor and the bottom margin.
    pub fn remaining(&self, geometry: &PageGeometry) -> f32 {
        (geometry.content_bottom() - self.y).max(0.0)
    }
}
