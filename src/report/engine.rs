use super::FlowContext;
use super::chart::render_chart;
use super::decorator::{PageHeader, decorate_pages};
use super::input::ReportDocumentInput;
use super::legend::render_legend;
use super::metadata::render_metadata;
use super::sanitize::sanitize;
use super::section::render_section;
use crate::config::ReportConfig;
use crate::error::ReportError;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use chrono::{DateTime, Utc};
use orcas_layout::{EmbeddedFont, PageSet};
use orcas_render_lopdf::{DocumentInfo, LopdfRenderer};
use orcas_resource::{AssetDirectory, AssetSource, FontCache};
use std::fmt::Write as _;
use std::path::Path;
use std::sync::Arc;

/// The `assets/` directory shipped with this crate.
pub fn bundled_asset_dir() -> &'static Path {
    Path::new(concat!(env!("CARGO_MANIFEST_DIR"), "/assets"))
}

/// Builds report documents. Cheap to clone; clones share the font cache.
#[derive(Clone)]
pub struct ReportEngine {
    config: Arc<ReportConfig>,
    assets: Arc<dyn AssetSource>,
    fonts: Arc<FontCache>,
}

impl std::fmt::Debug for ReportEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReportEngine")
            .field("assets", &self.assets.describe())
            .field("font_loaded", &self.fonts.is_loaded())
            .finish()
    }
}

impl Default for ReportEngine {
    fn default() -> Self {
        ReportEngineBuilder::new().build()
    }
}

impl ReportEngine {
    pub fn builder() -> ReportEngineBuilder {
        ReportEngineBuilder::new()
    }

    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    /// Builds the report and returns it as standard padded base64, without
    /// any data-URI prefix.
    pub async fn build_report_document(&self, input: &ReportDocumentInput) -> Result<String, ReportError> {
        let bytes = self.build_report_bytes(input).await?;
        Ok(STANDARD.encode(bytes))
    }

    /// Builds the report and returns the raw PDF bytes.
    pub async fn build_report_bytes(&self, input: &ReportDocumentInput) -> Result<Vec<u8>, ReportError> {
        let font = self.load_font().await?;
        let created_at = input.created_at.unwrap_or_else(Utc::now);
        let pages = self.lay_out(input, &font, created_at).await?;

        let info = DocumentInfo {
            title: sanitize(&input.name),
            producer: format!("{} report engine", self.config.product_label),
            creation_date: Some(created_at.format("D:%Y%m%d%H%M%SZ").to_string()),
        };
        let bytes = LopdfRenderer::new(&font).render(&pages, &info)?;
        log::info!(
            "Built report '{}' ({}): {} page(s), {} bytes",
            input.name,
            input.kind_label(),
            pages.page_count(),
            bytes.len()
        );
        Ok(bytes)
    }

    /// Flows and decorates every page without serializing them.
    pub async fn layout_pages(&self, input: &ReportDocumentInput) -> Result<PageSet, ReportError> {
        let font = self.load_font().await?;
        let created_at = input.created_at.unwrap_or_else(Utc::now);
        self.lay_out(input, &font, created_at).await
    }

    async fn load_font(&self) -> Result<Arc<EmbeddedFont>, ReportError> {
        Ok(self
            .fonts
            .load_embedded_font(self.assets.as_ref(), &self.config.font_path)
            .await?)
    }

    async fn lay_out(
        &self,
        input: &ReportDocumentInput,
        font: &EmbeddedFont,
        created_at: DateTime<Utc>,
    ) -> Result<PageSet, ReportError> {
        let config = self.config.as_ref();
        let mut ctx = FlowContext::new(font, config);
        let mut cursor = ctx.start_cursor();

        cursor = render_metadata(&mut ctx, &input.metadata.rows(), cursor)?;
        cursor = render_legend(&mut ctx, &input.legend_items, cursor)?;
        if let Some(chart) = &input.chart_image {
            cursor = render_chart(&mut ctx, chart, cursor).await;
        }
        for section in &input.sections {
            cursor = render_section(&mut ctx, section, cursor)?;
        }
        log::debug!("Content flow finished at {:?}", cursor);

        let header = PageHeader {
            product_label: config.product_label.clone(),
            kind_label: input.kind_label().to_string(),
            title: input.name.clone(),
            generated: format_timestamp(created_at, &config.timestamp_format),
        };
        let mut pages = ctx.into_pages();
        decorate_pages(&mut pages, &header, &font.metrics, &config.typography)?;
        Ok(pages)
    }
}

/// Formats with a `strftime` pattern, falling back to RFC 3339 when the
/// pattern is invalid.
fn format_timestamp(ts: DateTime<Utc>, pattern: &str) -> String {
    let mut out = String::new();
    match write!(out, "{}", ts.format(pattern)) {
        Ok(()) => out,
        Err(_) => {
            log::warn!("Invalid timestamp format '{pattern}', using RFC 3339");
            ts.to_rfc3339()
        }
    }
}

/// Configures a [`ReportEngine`].
pub struct ReportEngineBuilder {
    config: ReportConfig,
    assets: Option<Arc<dyn AssetSource>>,
    fonts: Option<Arc<FontCache>>,
}

impl Default for ReportEngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportEngineBuilder {
    pub fn new() -> Self {
        Self {
            config: ReportConfig::default(),
            assets: None,
            fonts: None,
        }
    }

    pub fn with_config(mut self, config: ReportConfig) -> Self {
        self.config = config;
        self
    }

    /// Where the text font is fetched from. Defaults to the bundled `assets/`.
    pub fn with_asset_source(mut self, assets: Arc<dyn AssetSource>) -> Self {
        self.assets = Some(assets);
        self
    }

    /// Shorthand for an [`AssetDirectory`] rooted at `path`.
    pub fn with_asset_dir<P: AsRef<Path>>(self, path: P) -> Self {
        self.with_asset_source(Arc::new(AssetDirectory::new(path)))
    }

    /// Uses a private font cache instead of the process-wide one.
    pub fn with_font_cache(mut self, fonts: Arc<FontCache>) -> Self {
        self.fonts = Some(fonts);
        self
    }

    pub fn build(self) -> ReportEngine {
        let assets = self
            .assets
            .unwrap_or_else(|| Arc::new(AssetDirectory::new(bundled_asset_dir())));
        ReportEngine {
            config: Arc::new(self.config),
            assets,
            fonts: self.fonts.unwrap_or_else(FontCache::global),
        }
    }
}
