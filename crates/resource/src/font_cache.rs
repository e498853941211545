use once_cell::sync::Lazy;
use orcas_layout::EmbeddedFont;
use orcas_traits::{AssetError, AssetSource};
use std::sync::Arc;
use tokio::sync::OnceCell;

/// Location of the bundled text font inside an asset source.
pub const DEFAULT_FONT_PATH: &str = "fonts/DejaVuSans.ttf";

static GLOBAL: Lazy<Arc<FontCache>> = Lazy::new(|| Arc::new(FontCache::new()));

/// Memoizes the parsed text font.
///
/// The first successful load is kept for the lifetime of the cache and
/// every later call returns the same `Arc`, regardless of the source or path
/// it is given. Concurrent first callers wait on the same initialization.
/// Failures are not cached.
#[derive(Debug, Default)]
pub struct FontCache {
    font: OnceCell<Arc<EmbeddedFont>>,
}

impl FontCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide cache used by engines that were not given their own.
    pub fn global() -> Arc<FontCache> {
        GLOBAL.clone()
    }

    pub fn is_loaded(&self) -> bool {
        self.font.initialized()
    }

    pub async fn load_embedded_font(
        &self,
        source: &dyn AssetSource,
        path: &str,
    ) -> Result<Arc<EmbeddedFont>, AssetError> {
        let font = self
            .font
            .get_or_try_init(|| async {
                let data = source.fetch(path)?;
                let font = EmbeddedFont::parse(data).map_err(|e| AssetError::InvalidFormat {
                    path: path.to_string(),
                    message: e.to_string(),
                })?;
                log::info!(
                    "Loaded font '{}' from {} ({})",
                    font.metrics.postscript_name,
                    path,
                    source.describe()
                );
                Ok::<_, AssetError>(Arc::new(font))
            })
            .await?;
        Ok(font.clone())
    }
}
