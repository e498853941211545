//! The growing list of laid-out pages for one document build.

use crate::algorithms::pagination::check_child_fit;
use crate::{LayoutCursor, LayoutError, PositionedElement};
use orcas_types::PageGeometry;

/// A decoded raster ready for embedding: 8-bit RGB, row-major, no padding.
#[derive(Clone, PartialEq)]
pub struct RasterImage {
    pub width: u32,
    pub height: u32,
    pub rgb: Vec<u8>,
}

impl std::fmt::Debug for RasterImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RasterImage")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes", &self.rgb.len())
            .finish()
    }
}

/// Pages of positioned elements plus the images they reference.
///
/// A fresh set always holds one empty page, so a cursor at page 0 is valid
/// from the start.
#[derive(Debug, Clone)]
pub struct PageSet {
    geometry: PageGeometry,
    pages: Vec<Vec<PositionedElement>>,
    images: Vec<RasterImage>,
}

impl PageSet {
    pub fn new(geometry: PageGeometry) -> Self {
        Self {
            geometry,
            pages: vec![Vec::new()],
            images: Vec::new(),
        }
    }

    pub fn geometry(&self) -> &PageGeometry {
        &self.geometry
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn pages(&self) -> &[Vec<PositionedElement>] {
        &self.pages
    }

    pub fn images(&self) -> &[RasterImage] {
        &self.images
    }

    /// Cursor at the first content line of page 1.
    pub fn start_cursor(&self) -> LayoutCursor {
        LayoutCursor::top_of_page(0, &self.geometry)
    }

    pub fn push(&mut self, page_index: usize, element: PositionedElement) -> Result<(), LayoutError> {
        let count = self.pages.len();
        let page = self
            .pages
            .get_mut(page_index)
            .ok_or(LayoutError::PageOutOfRange(page_index, count))?;
        page.push(element);
        Ok(())
    }

    pub fn add_image(&mut self, image: RasterImage) -> usize {
        self.images.push(image);
        self.images.len() - 1
    }

    /// Whether `height` more points fit below `cursor` on its page.
    pub fn fits(&self, cursor: LayoutCursor, height: f32) -> bool {
        !check_child_fit(cursor.y, height, self.geometry.content_bottom()).should_break
    }

    /// Moves to the page after `from`, creating it when `from` is on the
    /// last page, and returns a cursor just below that page's header band.
    pub fn break_page(&mut self, from: LayoutCursor) -> LayoutCursor {
        let next = from.page_index + 1;
        self.ensure_page(next);
        log::debug!("Page break: page {} -> page {}", from.page_index + 1, next + 1);
        LayoutCursor::top_of_page(next, &self.geometry)
    }

    /// Appends empty pages until `page_index` exists.
    pub fn ensure_page(&mut self, page_index: usize) {
        while self.pages.len() <= page_index {
            self.pages.push(Vec::new());
        }
    }

    /// Returns `cursor` if `height` fits on its page, otherwise breaks first.
    pub fn ensure_room(&mut self, cursor: LayoutCursor, height: f32) -> LayoutCursor {
        if self.fits(cursor, height) {
            cursor
        } else {
            self.break_page(cursor)
        }
    }

    pub fn into_parts(self) -> (PageGeometry, Vec<Vec<PositionedElement>>, Vec<RasterImage>) {
        (self.geometry, self.pages, self.images)
    }
}
