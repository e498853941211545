use thiserror::Error;

#[derive(Error, Debug)]
pub enum ComposerError {
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Document #{index} could not be parsed: {message}")]
    Unreadable { index: usize, message: String },

    #[error("{0}")]
    InvalidInput(String),
}
