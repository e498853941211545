use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LayoutError {
    #[error("Element has a height of {0:.2} which exceeds the total page content height of {1:.2}.")]
    ElementTooLarge(f32, f32),
    #[error("Row {row} has {found} cells but the grid declares {expected} columns.")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("Page index {0} is out of range ({1} pages).")]
    PageOutOfRange(usize, usize),
    #[error("Font could not be parsed: {0}")]
    Font(String),
}
