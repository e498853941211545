//! `AssetSource` trait for abstracting where static assets come from.
//!
//! The report engine needs exactly one external asset at build time, its
//! text font. Keeping the lookup behind a trait lets the engine run against
//! the bundled `assets/` directory, an in-memory store in tests, or any other
//! backing store a host application provides.

use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::Arc;
use thiserror::Error;

/// Error type for asset loading operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AssetError {
    #[error("Asset not found: {0}")]
    NotFound(String),

    #[error("Failed to load asset '{path}': {message}")]
    LoadFailed { path: String, message: String },

    #[error("Invalid asset format for '{path}': {message}")]
    InvalidFormat { path: String, message: String },
}

/// Asset bytes shared between concurrent document builds.
pub type SharedAsset = Arc<Vec<u8>>;

/// A read-only source of named static assets.
///
/// Implementations must be cheap to call repeatedly; memoization of parsed
/// forms is the caller's responsibility (see `orcas_resource::FontCache`).
pub trait AssetSource: Send + Sync + Debug {
    /// Fetch an asset by its relative path.
    fn fetch(&self, path: &str) -> Result<SharedAsset, AssetError>;

    /// Human-readable name used in log lines.
    fn describe(&self) -> String;
}

/// An immutable, pre-populated in-memory asset store.
#[derive(Debug, Default, Clone)]
pub struct StaticAssets {
    assets: HashMap<String, SharedAsset>,
}

impl StaticAssets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insertion; later inserts replace earlier ones.
    pub fn with_asset(mut self, path: impl Into<String>, data: Vec<u8>) -> Self {
        self.assets.insert(path.into(), Arc::new(data));
        self
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }
}

impl AssetSource for StaticAssets {
    fn fetch(&self, path: &str) -> Result<SharedAsset, AssetError> {
        self.assets
            .get(path)
            .cloned()
            .ok_or_else(|| AssetError::NotFound(path.to_string()))
    }

    fn describe(&self) -> String {
        format!("StaticAssets({} entries)", self.assets.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetch_returns_shared_bytes() {
        let assets = StaticAssets::new().with_asset("fonts/a.ttf", b"font".to_vec());

        let first = assets.fetch("fonts/a.ttf").unwrap();
        let second = assets.fetch("fonts/a.ttf").unwrap();
        assert_eq!(&*first, b"font");
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn missing_asset_is_not_found() {
        let assets = StaticAssets::new();
        assert_eq!(
            assets.fetch("fonts/missing.ttf"),
            Err(AssetError::NotFound("fonts/missing.ttf".into()))
        );
        assert!(assets.is_empty());
    }

    #[test]
    fn later_insert_replaces_earlier() {
        let assets = StaticAssets::new()
            .with_asset("x", b"old".to_vec())
            .with_asset("x", b"new".to_vec());
        assert_eq!(&*assets.fetch("x").unwrap(), b"new");
        assert_eq!(assets.len(), 1);
    }

    #[test]
    fn error_messages_name_the_path() {
        let err = AssetError::LoadFailed {
            path: "fonts/a.ttf".into(),
            message: "permission denied".into(),
        };
        assert!(err.to_string().contains("fonts/a.ttf"));
        assert!(err.to_string().contains("permission denied"));
    }
}
