pub mod resource;

pub use resource::{AssetError, AssetSource, SharedAsset, StaticAssets};
