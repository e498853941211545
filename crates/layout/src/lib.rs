//! Page model and layout primitives for ORCAS report documents.
//!
//! Renderers flow content top-down into a [`PageSet`] by threading a
//! [`LayoutCursor`] through each step. Everything here is synchronous and
//! font-aware only through [`fonts::FontMetrics`].

pub mod algorithms {
    pub mod pagination;
}
mod cursor;
mod elements;
pub mod encoding;
mod error;
pub mod fonts;
pub mod grid;
mod page;
pub mod text;

pub use self::cursor::LayoutCursor;
pub use self::elements::{ImageElement, LayoutElement, PositionedElement, RectElement, TextElement};
pub use self::error::LayoutError;
pub use self::fonts::{EmbeddedFont, FontMetrics};
pub use self::grid::{GridLayout, GridStyle};
pub use self::page::{PageSet, RasterImage};
pub use self::text::wrap_text;

#[cfg(test)]
mod test_utils;
