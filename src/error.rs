use orcas_layout::LayoutError;
use orcas_pdf_composer::ComposerError;
use orcas_render_lopdf::RenderError;
use orcas_traits::AssetError;
use thiserror::Error;

/// Everything that can abort a report build or a delivery helper.
///
/// Chart decoding failures never surface here; they only drop the chart.
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Asset unavailable: {0}")]
    Asset(#[from] AssetError),

    #[error("Layout failed: {0}")]
    Layout(#[from] LayoutError),

    #[error("Rendering failed: {0}")]
    Render(#[from] RenderError),

    #[error("Combining reports failed: {0}")]
    Composer(#[from] ComposerError),

    #[error("Invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
