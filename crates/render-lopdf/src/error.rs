use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("PDF generation error: {0}")]
    Pdf(String),
    #[error("Element references image #{0} but only {1} images were registered")]
    MissingImage(usize, usize),
    #[error("Image #{index} has {found} bytes of RGB data, expected {expected}")]
    MalformedImage {
        index: usize,
        expected: usize,
        found: usize,
    },
}

impl From<lopdf::Error> for RenderError {
    fn from(err: lopdf::Error) -> Self {
        RenderError::Pdf(err.to_string())
    }
}
