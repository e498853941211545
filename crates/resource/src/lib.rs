//! Asset loading for report builds.
//!
//! - [`AssetDirectory`]: reads assets from a directory on the local filesystem
//! - [`FontCache`]: loads and parses the embedded text font once per process
//!
//! The in-memory [`StaticAssets`] store from `orcas-traits` is re-exported
//! for convenience.

mod filesystem;
mod font_cache;

pub use filesystem::AssetDirectory;
pub use font_cache::{DEFAULT_FONT_PATH, FontCache};

pub use orcas_traits::{AssetError, AssetSource, SharedAsset, StaticAssets};
