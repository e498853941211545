//! PDF serializer for laid-out report pages.
//!
//! Pages are written with one embedded composite font, filled and stroked
//! rectangles, and RGB image XObjects. The whole document is built in memory
//! with `lopdf` and returned as bytes.

mod error;
mod font;
mod helpers;
mod image;
mod renderer;

pub use error::RenderError;
pub use helpers::{FONT_RESOURCE, image_resource_name};
pub use renderer::{DocumentInfo, LopdfRenderer};
