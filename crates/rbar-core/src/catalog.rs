//! Local catalog implementations.

use async_trait::async_trait;
use bytes::Bytes;
use std::path::PathBuf;

use crate::error::CatalogError;
use crate::logo::CatalogRef;
use crate::provider::LogoCatalog;

/// URL-style prefix every directory reference carries.
pub const GALLERY_PREFIX: &str = "/gallery/";

/// `*.svg` files of one flat directory, listed in name order as
/// `/gallery/<file>`.
#[derive(Debug, Clone)]
pub struct DirectoryCatalog {
    root: PathBuf,
}

impl DirectoryCatalog {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Map a reference back to a file under `root`, refusing anything that
    /// would leave the directory.
    fn path_for(&self, reference: &CatalogRef) -> Result<PathBuf, CatalogError> {
        let unknown = || CatalogError::UnknownReference(reference.to_string());

        let name = reference
            .as_str()
            .strip_prefix(GALLERY_PREFIX)
            .ok_or_else(unknown)?;
        if name.is_empty() || name.contains(&['/', '\\'][..]) || name == ".." || name == "." {
            return Err(unknown());
        }
        Ok(self.root.join(name))
    }
}

#[async_trait]
impl LogoCatalog for DirectoryCatalog {
    async fn references(&self) -> Result<Vec<CatalogRef>, CatalogError> {
        let mut dir = tokio::fs::read_dir(&self.root).await.map_err(|e| {
            CatalogError::Listing(format!("{}: {}", self.root.display(), e))
        })?;

        let mut names: Vec<String> = Vec::new();
        while let Some(entry) = dir
            .next_entry()
            .await
            .map_err(|e| CatalogError::Listing(e.to_string()))?
        {
            let is_file = entry
                .file_type()
                .await
                .map(|t| t.is_file())
                .unwrap_or(false);
            if !is_file {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                if name.ends_with(".svg") {
                    names.push(name.to_string());
                }
            }
        }

        names.sort();
        Ok(names
            .into_iter()
            .map(|n| CatalogRef::new(format!("{GALLERY_PREFIX}{n}")))
            .collect())
    }

    async fn fetch(&self, reference: &CatalogRef) -> Result<Bytes, CatalogError> {
        let path = self.path_for(reference)?;
        let raw = tokio::fs::read(&path)
            .await
            .map_err(|e| CatalogError::Fetch {
                reference: reference.to_string(),
                reason: e.to_string(),
            })?;
        Ok(Bytes::from(raw))
    }
}

/// Catalog with nothing in it, for kiosks configured without a gallery.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyCatalog;

#[async_trait]
impl LogoCatalog for EmptyCatalog {
    async fn references(&self) -> Result<Vec<CatalogRef>, CatalogError> {
        Ok(Vec::new())
    }

    async fn fetch(&self, reference: &CatalogRef) -> Result<Bytes, CatalogError> {
        Err(CatalogError::UnknownReference(reference.to_string()))
    }
}
