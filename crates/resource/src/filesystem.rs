//! Directory-backed asset source.
//!
//! Every lookup is resolved relative to the directory root, and resolved
//! paths must stay inside it: absolute paths and `..` escapes are reported
//! as not found.

use orcas_traits::{AssetError, AssetSource, SharedAsset};
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct AssetDirectory {
    root: PathBuf,
    /// `None` when the root did not exist at construction time.
    canonical_root: Option<PathBuf>,
}

impl AssetDirectory {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        let root = root.as_ref().to_path_buf();
        let canonical_root = root.canonicalize().ok();
        Self {
            root,
            canonical_root,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolves `path` under the root, or `None` if it would escape it.
    fn resolve(&self, path: &str) -> Option<PathBuf> {
        let relative = Path::new(path);
        if relative.is_absolute() {
            return None;
        }

        let full_path = self.root.join(relative);
        if let Ok(canonical) = full_path.canonicalize()
            && let Some(base) = &self.canonical_root
        {
            return canonical.starts_with(base).then_some(canonical);
        }

        // Nonexistent targets cannot be canonicalized; fall back to a lexical check.
        if relative.components().any(|c| matches!(c, Component::ParentDir)) {
            return None;
        }
        Some(full_path)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.resolve(path).is_some_and(|p| p.is_file())
    }
}

impl AssetSource for AssetDirectory {
    fn fetch(&self, path: &str) -> Result<SharedAsset, AssetError> {
        let full_path = self
            .resolve(path)
            .ok_or_else(|| AssetError::NotFound(format!("{path} (outside asset directory)")))?;

        std::fs::read(&full_path).map(Arc::new).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                AssetError::NotFound(path.to_string())
            } else {
                AssetError::LoadFailed {
                    path: path.to_string(),
                    message: e.to_string(),
                }
            }
        })
    }

    fn describe(&self) -> String {
        format!("AssetDirectory({})", self.root.display())
    }
}
