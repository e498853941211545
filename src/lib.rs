//! ORCAS report document engine.
//!
//! Turns structured analytical results (metadata, a legend, an optional
//! chart raster and tabular sections with notes) into a paginated A4 PDF.
//!
//! ```no_run
//! use orcas_report::{ReportDocumentInput, ReportEngine, ReportKind, Section};
//!
//! # async fn run() -> Result<(), orcas_report::ReportError> {
//! let mut input = ReportDocumentInput::new("Top banks", ReportKind::AnalysisScreening);
//! input.sections.push(Section::new("Ranking", ["Ticker", "Score"]).with_row(["BBRI", "0.8421"]));
//!
//! let base64_pdf = ReportEngine::default().build_report_document(&input).await?;
//! # Ok(())
//! # }
//! ```

pub mod combine;
pub mod config;
pub mod delivery;
pub mod error;
pub mod report;

pub use combine::{combine_reports, combine_reports_base64};
pub use config::{ReportConfig, Spacing, Typography};
pub use delivery::{content_disposition, decode_report_payload};
pub use error::ReportError;
pub use report::engine::{ReportEngine, ReportEngineBuilder, bundled_asset_dir};
pub use report::input::{ChartImage, LegendItem, MetadataInput, MetadataRow, ReportDocumentInput, ReportKind, Section};
pub use report::sanitize::{PLACEHOLDER, print_value, sanitize};

pub use orcas_resource::{AssetDirectory, AssetError, AssetSource, FontCache, StaticAssets};
pub use orcas_types::{PageGeometry, Value};

#[cfg(test)]
mod test_support;
