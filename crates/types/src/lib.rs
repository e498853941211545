pub mod color;
pub mod geometry;
pub mod value;

pub use color::Color;
pub use geometry::{Margins, PageGeometry, Rect, Size};
pub use value::Value;
